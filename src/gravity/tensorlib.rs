//! Derivative tensors of $`1/r`$ from a fixed chain of unrolled tensor kernels.
//!
//! The chain first builds the cartesian powers $`\mathbf{r}^{\otimes k}`$ for $`k = 1, \ldots, 5`$
//! and the powers of $`g_0 = 1/r`$, then assembles every derivative tensor from scaled sums of
//! those powers and their Kronecker-delta embeddings. All orders are produced together, so the
//! single-order functions here share the cost of the full chain.

use crate::gravity::tensorlib_kernels::{
    add, delta_cube_5, delta_delta_vector_5, delta_outer_4, delta_vector_3, identity_2,
    identity_4, outer_2, raise_3, raise_4, raise_5, scale,
};
use crate::gravity::{cast, length, Derivative, Derivatives, GravityScalar, Order, Tensorlib};
use crate::multipole::Multipole;
use crate::tensor::d3::{Rank1, Rank2, Rank3, Rank4, Rank5};
use crate::tensor::IndexableVector;

/// Computes the derivative tensor of $`1/r`$ of order `N` at `r`.
pub fn derivative<const N: usize, S>(
    r: &impl IndexableVector<S, 3>,
) -> <Order<N> as Derivative<Tensorlib, S>>::Tensor
where
    Order<N>: Derivative<Tensorlib, S>,
{
    <Order<N> as Derivative<Tensorlib, S>>::derivative(&r.to_array())
}

/// Computes the derivative tensors of $`1/r`$ of orders $`1`$ to `N` at `r`.
pub fn derivatives<const N: usize, S>(
    r: &impl IndexableVector<S, 3>,
) -> Multipole<<Order<N> as Derivatives<Tensorlib, S>>::Tensors>
where
    Order<N>: Derivatives<Tensorlib, S>,
{
    <Order<N> as Derivatives<Tensorlib, S>>::derivatives(&r.to_array())
}

/// Computes the potential $`1/r`$ together with all of its derivative tensors up to order five.
///
/// # Arguments
///
/// * `r` - The position vector. It must not be the zero vector.
///
/// # Returns
///
/// A tuple of $`1/r`$ and the multipole $`(\mathbf{D}^{(1)}, \ldots, \mathbf{D}^{(5)})`$.
pub fn potential_derivatives<S: GravityScalar>(
    r: &impl IndexableVector<S, 3>,
) -> (S, Multipole<(Rank1<S>, Rank2<S>, Rank3<S>, Rank4<S>, Rank5<S>)>) {
    let p1 = r.to_array();
    let p2 = outer_2(p1);
    let p3 = raise_3(p1, p2);
    let p4 = raise_4(p1, p3);
    let p5 = raise_5(p1, p4);

    let g0 = length(&p1).recip();
    let g0_2 = g0 * g0;
    let g0_3 = g0_2 * g0;
    let g0_5 = g0_3 * g0_2;
    let g0_7 = g0_5 * g0_2;
    let g0_9 = g0_7 * g0_2;
    let g0_11 = g0_9 * g0_2;

    let three = cast::<S>(3.0);
    let fifteen = cast::<S>(15.0);
    let hundred_five = cast::<S>(105.0);
    let nine_hundred_forty_five = cast::<S>(945.0);

    let d1 = scale(p1, -g0_3);
    let d2 = add(scale(p2, three * g0_5), identity_2(-g0_3));
    let d3 = add(
        scale(delta_vector_3(p1), three * g0_5),
        scale(p3, -fifteen * g0_7),
    );
    let d4 = add(
        add(
            scale(delta_outer_4(p2), -fifteen * g0_7),
            identity_4(three * g0_5),
        ),
        scale(p4, hundred_five * g0_9),
    );
    let d5 = add(
        add(
            scale(delta_delta_vector_5(p1), -fifteen * g0_7),
            scale(delta_cube_5(p3), hundred_five * g0_9),
        ),
        scale(p5, -nine_hundred_forty_five * g0_11),
    );

    (
        g0,
        Multipole::new((
            Rank1::new(d1),
            Rank2::new(d2),
            Rank3::new(d3),
            Rank4::new(d4),
            Rank5::new(d5),
        )),
    )
}

macro_rules! impl_tensorlib_derivative {
    ($($n:literal => $tensor:ident),+) => {$(
        impl<S: GravityScalar> Derivative<Tensorlib, S> for Order<$n> {
            type Tensor = $tensor<S>;

            fn derivative(r: &[S; 3]) -> Self::Tensor {
                let (_, derivatives) = potential_derivatives(r);
                *derivatives.tensor::<$n>()
            }
        }
    )+};
}

impl_tensorlib_derivative!(1 => Rank1, 2 => Rank2, 3 => Rank3, 4 => Rank4, 5 => Rank5);
