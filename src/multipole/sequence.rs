//! Traits implemented by the tensor tuples held in multipoles.
//!
//! A multipole of order $`O`$ stores the tuple `(T1, T2, ..., TO)` of symmetric tensors of ranks
//! $`1`$ to $`O`$. The traits here lift tensor operations to such tuples, one tuple arity at a
//! time.

use crate::tensor::{IndexableVector, SymmetricTensor, TensorScalar};

// =================
// Trait definitions
// =================

/// Trait for values that support elementwise addition and subtraction with values of the same
/// shape.
pub trait Elementwise: Copy {
    /// Returns the all-zero value.
    fn zeroed() -> Self;

    /// Adds `other` elementwise.
    fn add_elementwise(&mut self, other: &Self);

    /// Subtracts `other` elementwise.
    fn sub_elementwise(&mut self, other: &Self);
}

/// Trait for values that support broadcasting arithmetic with a scalar of type `S`.
pub trait ScalarBroadcast<S>: Elementwise {
    fn add_scalar(&mut self, rhs: S);

    fn sub_scalar(&mut self, rhs: S);

    fn mul_scalar(&mut self, rhs: S);

    fn div_scalar(&mut self, rhs: S);
}

/// Trait for values that can be built as cartesian powers of a vector `V`.
pub trait CartesianPowers<V>: Sized {
    /// Builds every tensor as the cartesian power of `v` of its own rank.
    fn cartesian_powers(v: &V) -> Self;
}

/// Trait for tensor tuples, giving the number of tensors they hold.
pub trait TensorSequence {
    /// The highest rank in the tuple, which is also the number of tensors.
    const ORDER: usize;
}

/// Trait for tensor tuples holding a tensor of rank `K`.
pub trait TensorOfRank<const K: usize> {
    /// The type of the rank-`K` tensor.
    type Tensor;

    /// Returns the rank-`K` tensor.
    fn tensor(&self) -> &Self::Tensor;

    /// Returns the rank-`K` tensor mutably.
    fn tensor_mut(&mut self) -> &mut Self::Tensor;
}

// ============================
// Tensor-level implementations
// ============================

impl<S: TensorScalar, const D: usize, const R: usize, const N: usize> Elementwise
    for SymmetricTensor<S, D, R, N>
{
    fn zeroed() -> Self {
        Self::zeros()
    }

    fn add_elementwise(&mut self, other: &Self) {
        *self += *other;
    }

    fn sub_elementwise(&mut self, other: &Self) {
        *self -= *other;
    }
}

impl<S: TensorScalar, const D: usize, const R: usize, const N: usize> ScalarBroadcast<S>
    for SymmetricTensor<S, D, R, N>
{
    fn add_scalar(&mut self, rhs: S) {
        *self += rhs;
    }

    fn sub_scalar(&mut self, rhs: S) {
        *self -= rhs;
    }

    fn mul_scalar(&mut self, rhs: S) {
        *self *= rhs;
    }

    fn div_scalar(&mut self, rhs: S) {
        *self /= rhs;
    }
}

impl<S, V, const D: usize, const R: usize, const N: usize> CartesianPowers<V>
    for SymmetricTensor<S, D, R, N>
where
    S: TensorScalar,
    V: IndexableVector<S, D>,
{
    fn cartesian_powers(v: &V) -> Self {
        Self::cartesian_power(v)
    }
}

// ===========================
// Tuple-level implementations
// ===========================

macro_rules! impl_tensor_tuple {
    ($($T:ident . $idx:tt),+) => {
        impl<$($T: Elementwise),+> Elementwise for ($($T,)+) {
            fn zeroed() -> Self {
                ($($T::zeroed(),)+)
            }

            fn add_elementwise(&mut self, other: &Self) {
                $(self.$idx.add_elementwise(&other.$idx);)+
            }

            fn sub_elementwise(&mut self, other: &Self) {
                $(self.$idx.sub_elementwise(&other.$idx);)+
            }
        }

        impl<S: Copy, $($T: ScalarBroadcast<S>),+> ScalarBroadcast<S> for ($($T,)+) {
            fn add_scalar(&mut self, rhs: S) {
                $(self.$idx.add_scalar(rhs);)+
            }

            fn sub_scalar(&mut self, rhs: S) {
                $(self.$idx.sub_scalar(rhs);)+
            }

            fn mul_scalar(&mut self, rhs: S) {
                $(self.$idx.mul_scalar(rhs);)+
            }

            fn div_scalar(&mut self, rhs: S) {
                $(self.$idx.div_scalar(rhs);)+
            }
        }

        impl<V, $($T: CartesianPowers<V>),+> CartesianPowers<V> for ($($T,)+) {
            fn cartesian_powers(v: &V) -> Self {
                ($($T::cartesian_powers(v),)+)
            }
        }

        impl<$($T),+> TensorSequence for ($($T,)+) {
            const ORDER: usize = count_exprs!($($idx),+);
        }
    };
}

impl_tensor_tuple!(T1.0);
impl_tensor_tuple!(T1.0, T2.1);
impl_tensor_tuple!(T1.0, T2.1, T3.2);
impl_tensor_tuple!(T1.0, T2.1, T3.2, T4.3);
impl_tensor_tuple!(T1.0, T2.1, T3.2, T4.3, T5.4);

macro_rules! impl_tensor_of_rank {
    ($rank:literal => $idx:tt : $Sel:ident in [$($T:ident),+]) => {
        impl<$($T),+> TensorOfRank<$rank> for ($($T,)+) {
            type Tensor = $Sel;

            fn tensor(&self) -> &Self::Tensor {
                &self.$idx
            }

            fn tensor_mut(&mut self) -> &mut Self::Tensor {
                &mut self.$idx
            }
        }
    };
}

impl_tensor_of_rank!(1 => 0: T1 in [T1]);

impl_tensor_of_rank!(1 => 0: T1 in [T1, T2]);
impl_tensor_of_rank!(2 => 1: T2 in [T1, T2]);

impl_tensor_of_rank!(1 => 0: T1 in [T1, T2, T3]);
impl_tensor_of_rank!(2 => 1: T2 in [T1, T2, T3]);
impl_tensor_of_rank!(3 => 2: T3 in [T1, T2, T3]);

impl_tensor_of_rank!(1 => 0: T1 in [T1, T2, T3, T4]);
impl_tensor_of_rank!(2 => 1: T2 in [T1, T2, T3, T4]);
impl_tensor_of_rank!(3 => 2: T3 in [T1, T2, T3, T4]);
impl_tensor_of_rank!(4 => 3: T4 in [T1, T2, T3, T4]);

impl_tensor_of_rank!(1 => 0: T1 in [T1, T2, T3, T4, T5]);
impl_tensor_of_rank!(2 => 1: T2 in [T1, T2, T3, T4, T5]);
impl_tensor_of_rank!(3 => 2: T3 in [T1, T2, T3, T4, T5]);
impl_tensor_of_rank!(4 => 3: T4 in [T1, T2, T3, T4, T5]);
impl_tensor_of_rank!(5 => 4: T5 in [T1, T2, T3, T4, T5]);
