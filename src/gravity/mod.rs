//! Derivatives of the $`1/r`$ potential and multipole expansions of gravitational fields.
//!
//! The rank-$`n`$ derivative tensor $`\mathbf{D}^{(n)}(\mathbf{R})`$ holds every $`n`$-th
//! order partial derivative of $`1/|\mathbf{R}|`$ with respect to the components of
//! $`\mathbf{R}`$. Three independent backends compute it:
//!
//! - [`direct`]: closed-form expressions expanded by hand for every order,
//! - [`einsum`]: one generic formula summing over Kronecker pairings of the index, and
//! - [`tensorlib`]: a fixed chain of unrolled tensor-algebra kernels.
//!
//! All three must agree to floating-point tolerance, which [`validation`] checks.
//!
//! Backends are selected by marker types ([`Direct`], [`Einsum`], [`Tensorlib`]) and orders by
//! [`Order`], so that the tensor type of every derivative is known at compile time:
//!
//! ```
//! use symtensor::gravity::{direct, einsum};
//!
//! let r = [1.0, 2.0, 3.0];
//! let d3 = direct::derivative::<3, _>(&r);
//! let e3 = einsum::derivative::<3, _>(&r);
//! assert!((d3 - e3).norm() < 1e-12 * d3.norm());
//! ```

use num_traits::{Float, NumCast};

use crate::multipole::Multipole;
use crate::tensor::TensorScalar;

pub mod direct;
pub mod einsum;
pub mod field;
pub mod tensorlib;
mod tensorlib_kernels;
pub mod validation;

#[cfg(test)]
#[path = "gravity_tests.rs"]
mod gravity_tests;

/// The highest derivative order supported by every backend.
pub const MAX_ORDER: usize = 5;

// =================
// Trait definitions
// =================

/// Trait for floating-point scalars usable in derivative tensors and field expansions.
pub trait GravityScalar: TensorScalar + Float {}

// Blanket implementation
impl<T> GravityScalar for T where T: TensorScalar + Float {}

/// Trait for computing a single derivative tensor of $`1/r`$ with backend `B`.
pub trait Derivative<B, S> {
    /// The symmetric tensor type of the derivative.
    type Tensor;

    /// Computes the derivative tensor at `r`.
    fn derivative(r: &[S; 3]) -> Self::Tensor;
}

/// Trait for computing all derivative tensors of $`1/r`$ up to a given order with backend `B`.
pub trait Derivatives<B, S> {
    /// The tuple of derivative tensors of orders $`1`$ to $`N`$.
    type Tensors;

    /// Computes the derivative tensors of orders $`1`$ to $`N`$ at `r`.
    fn derivatives(r: &[S; 3]) -> Multipole<Self::Tensors>;
}

// ==================
// Struct definitions
// ==================

/// Selects the derivative order `N` at the type level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Order<const N: usize>;

/// Marker for the closed-form backend in [`direct`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Direct;

/// Marker for the Kronecker-pairing backend in [`einsum`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Einsum;

/// Marker for the unrolled kernel backend in [`tensorlib`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tensorlib;

macro_rules! impl_derivatives {
    ($n:literal => $($k:literal),+) => {
        impl<B, S> Derivatives<B, S> for Order<$n>
        where
            $(Order<$k>: Derivative<B, S>,)+
        {
            type Tensors = ($(<Order<$k> as Derivative<B, S>>::Tensor,)+);

            fn derivatives(r: &[S; 3]) -> Multipole<Self::Tensors> {
                Multipole::new(($(<Order<$k> as Derivative<B, S>>::derivative(r),)+))
            }
        }
    };
}

impl_derivatives!(1 => 1);
impl_derivatives!(2 => 1, 2);
impl_derivatives!(3 => 1, 2, 3);
impl_derivatives!(4 => 1, 2, 3, 4);
impl_derivatives!(5 => 1, 2, 3, 4, 5);

// =========
// Functions
// =========

/// Converts a numeric constant into a gravity scalar.
pub(crate) fn cast<S: NumCast>(value: f64) -> S {
    <S as NumCast>::from(value).expect("Unable to convert a numeric constant into a scalar.")
}

/// Returns $`|\mathbf{r}|`$.
pub(crate) fn length<S: GravityScalar>(r: &[S; 3]) -> S {
    (r[0] * r[0] + r[1] * r[1] + r[2] * r[2]).sqrt()
}

/// Returns the radial derivatives $`g_m = (-1)^m (2m - 1)!! / r^{2m + 1}`$ for
/// $`m = 0, \ldots, 5`$.
///
/// The derivative tensor of order $`n`$ is a sum of terms $`g_{n - k}`$ times products of $`k`$
/// Kronecker deltas and $`n - 2k`$ components of $`\mathbf{r}`$.
pub(crate) fn radial_coefficients<S: GravityScalar>(r: &[S; 3]) -> [S; MAX_ORDER + 1] {
    let inv_r = length(r).recip();
    let inv_r2 = inv_r * inv_r;
    let mut g = [inv_r; MAX_ORDER + 1];
    for m in 1..=MAX_ORDER {
        g[m] = -g[m - 1] * cast::<S>((2 * m - 1) as f64) * inv_r2;
    }
    g
}
