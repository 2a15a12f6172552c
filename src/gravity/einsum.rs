//! Derivative tensors of $`1/r`$ from a single formula valid at every order.
//!
//! Differentiating $`1/r`$ $`n`$ times gives
//!
//! ```math
//! D^{(n)}_{i_1 \ldots i_n} = \sum_{k = 0}^{\lfloor n/2 \rfloor} g_{n - k}
//!     \sum_{\text{$k$ pairings}} \delta_{i_a i_b} \cdots \; r_{i_c} \cdots
//! ```
//!
//! where the inner sum runs over every way of coupling $`k`$ disjoint pairs of index
//! positions with Kronecker deltas, the uncoupled positions each contributing a component of
//! $`\mathbf{r}`$, and $`g_m = (-1)^m (2m - 1)!! / r^{2m + 1}`$.

use crate::gravity::{radial_coefficients, Derivative, Derivatives, Einsum, GravityScalar, Order};
use crate::multipole::Multipole;
use crate::tensor::d3::{Rank1, Rank2, Rank3, Rank4, Rank5};
use crate::tensor::IndexableVector;

/// Computes the derivative tensor of $`1/r`$ of order `N` at `r`.
pub fn derivative<const N: usize, S>(
    r: &impl IndexableVector<S, 3>,
) -> <Order<N> as Derivative<Einsum, S>>::Tensor
where
    Order<N>: Derivative<Einsum, S>,
{
    <Order<N> as Derivative<Einsum, S>>::derivative(&r.to_array())
}

/// Computes the derivative tensors of $`1/r`$ of orders $`1`$ to `N` at `r`.
pub fn derivatives<const N: usize, S>(
    r: &impl IndexableVector<S, 3>,
) -> Multipole<<Order<N> as Derivatives<Einsum, S>>::Tensors>
where
    Order<N>: Derivatives<Einsum, S>,
{
    <Order<N> as Derivatives<Einsum, S>>::derivatives(&r.to_array())
}

/// Evaluates a single entry of the derivative tensor of $`1/r`$ at `r`.
///
/// The order of the derivative is the length of `index`, which must not exceed
/// [`MAX_ORDER`](crate::gravity::MAX_ORDER).
///
/// # Arguments
///
/// * `index` - The dimensional index of the entry. Any permutation gives the same value.
/// * `r` - The position vector.
///
/// # Returns
///
/// The value of $`\partial^n (1/r) / \partial r_{i_1} \cdots \partial r_{i_n}`$.
pub fn derivative_at<S: GravityScalar>(index: &[usize], r: &[S; 3]) -> S {
    let n = index.len();
    debug_assert!(
        (1..=crate::gravity::MAX_ORDER).contains(&n),
        "Unsupported derivative order."
    );
    let g = radial_coefficients(r);
    match n {
        1 => g[1] * r[index[0]],
        2 => {
            let delta = if index[0] == index[1] {
                g[1]
            } else {
                S::zero()
            };
            g[2] * r[index[0]] * r[index[1]] + delta
        }
        _ => {
            let positions = (1u32 << n) - 1;
            (0..=n / 2).fold(S::zero(), |acc, k| {
                acc + g[n - k] * pairing_sum(index, r, positions, k)
            })
        }
    }
}

/// Sums, over every way of coupling exactly `pairs` disjoint pairs of equal symbols among the
/// index positions set in `positions`, the product of the components of `r` selected by the
/// uncoupled positions.
fn pairing_sum<S: GravityScalar>(index: &[usize], r: &[S; 3], positions: u32, pairs: usize) -> S {
    if positions == 0 {
        return if pairs == 0 { S::one() } else { S::zero() };
    }
    if 2 * pairs > positions.count_ones() as usize {
        return S::zero();
    }
    let first = positions.trailing_zeros() as usize;
    let rest = positions & !(1 << first);

    let uncoupled = r[index[first]] * pairing_sum(index, r, rest, pairs);
    if pairs == 0 {
        return uncoupled;
    }
    (first + 1..index.len())
        .filter(|&other| rest & (1 << other) != 0 && index[other] == index[first])
        .fold(uncoupled, |acc, other| {
            acc + pairing_sum(index, r, rest & !(1 << other), pairs - 1)
        })
}

macro_rules! impl_einsum_derivative {
    ($($n:literal => $tensor:ident),+) => {$(
        impl<S: GravityScalar> Derivative<Einsum, S> for Order<$n> {
            type Tensor = $tensor<S>;

            fn derivative(r: &[S; 3]) -> Self::Tensor {
                $tensor::nullary_expression(|index| derivative_at(&index, r))
            }
        }
    )+};
}

impl_einsum_derivative!(1 => Rank1, 2 => Rank2, 3 => Rank3, 4 => Rank4, 5 => Rank5);
