//! Fully symmetric tensors of fixed dimension and rank.
//!
//! A [`SymmetricTensor`] only stores its unique values, in the canonical flat order described in
//! [`crate::index`]. Dimension, rank and storage size are all part of the type, so shape errors
//! are caught during compilation and the storage lives inline in a fixed-size array.

use std::fmt;
use std::marker::PhantomData;

use anyhow::{self, ensure};
use approx::{AbsDiffEq, RelativeEq};
use num_traits::{Float, Num, NumAssign, NumCast};
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::combinatorics::{
    kronecker_delta, multiplicity, num_unique_values_in_symmetric_tensor, num_values_in_tensor,
};
use crate::index::{axis_label, dimensional_indices, flat_index, packed_rank, unpack_indices};

mod tensor_arithmetic;
mod tensor_interop;


// =================
// Trait definitions
// =================

/// Trait for scalar types that can be stored in a [`SymmetricTensor`].
///
/// Any copyable numeric type with the usual arithmetic and assignment operators qualifies, so
/// both integer and floating-point tensors are possible.
pub trait TensorScalar: Copy + fmt::Debug + Num + NumAssign + NumCast {}

// Blanket implementation
impl<T> TensorScalar for T where T: Copy + fmt::Debug + Num + NumAssign + NumCast {}

/// Converts a count into a scalar.
pub(crate) fn scalar_from_usize<S: NumCast>(value: usize) -> S {
    <S as NumCast>::from(value).expect("Unable to convert a `usize` count into a scalar.")
}

/// Trait for anything that can act as a $`D`$-dimensional vector of scalars `S`.
pub trait IndexableVector<S, const D: usize> {
    /// Returns component `i` of the vector.
    fn component(&self, i: usize) -> S;

    /// Copies the components into an array.
    fn to_array(&self) -> [S; D] {
        std::array::from_fn(|i| self.component(i))
    }
}

impl<S: Copy, const D: usize> IndexableVector<S, D> for [S; D] {
    fn component(&self, i: usize) -> S {
        self[i]
    }
}

impl<S: nalgebra::Scalar + Copy, const D: usize> IndexableVector<S, D> for nalgebra::SVector<S, D> {
    fn component(&self, i: usize) -> S {
        self[i]
    }
}

impl<S: nalgebra::Scalar + Copy, const D: usize> IndexableVector<S, D> for nalgebra::Point<S, D> {
    fn component(&self, i: usize) -> S {
        self[i]
    }
}

impl<S: Copy, const D: usize> IndexableVector<S, D> for SymmetricTensor<S, D, 1, D> {
    fn component(&self, i: usize) -> S {
        self.data[i]
    }
}

impl<S, T: IndexableVector<S, D>, const D: usize> IndexableVector<S, D> for &T {
    fn component(&self, i: usize) -> S {
        (*self).component(i)
    }
}

// ==================
// Struct definitions
// ==================

/// A fully symmetric tensor of dimension `D` and rank `R` holding its `N` unique values.
///
/// `N` must equal [`num_unique_values_in_symmetric_tensor`]`(D, R)`. Any other value makes every
/// constructor fail to compile, so in practice the aliases in [`d2`], [`d3`] and [`d4`] are used.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymmetricTensor<S, const D: usize, const R: usize, const N: usize> {
    data: [S; N],
}

impl<S, const D: usize, const R: usize, const N: usize> SymmetricTensor<S, D, R, N> {
    /// The dimension of the tensor.
    pub const DIMENSION: usize = D;

    /// The rank of the tensor.
    pub const RANK: usize = R;

    /// The number of values of the equivalent full tensor, $`D^R`$.
    pub const NUM_VALUES: usize = num_values_in_tensor(D, R);

    /// The number of stored unique values.
    pub const NUM_UNIQUE_VALUES: usize = N;

    const SHAPE_CHECK: () = assert!(
        D > 0 && N == num_unique_values_in_symmetric_tensor(D, R),
        "The storage size of a symmetric tensor does not match its dimension and rank."
    );

    /// Returns the flat storage position of a dimensional index. Every permutation of the index
    /// gives the same position.
    pub const fn flat_offset(indices: [usize; R]) -> usize {
        flat_index(indices, D)
    }

    const fn code_offset(code: u64) -> usize {
        assert!(
            packed_rank(code) == R,
            "The number of indices does not match the tensor rank."
        );
        let indices = unpack_indices::<R>(code);
        let mut pos = 0;
        while pos < R {
            assert!(indices[pos] < D, "Axis symbol out of range for the tensor dimension.");
            pos += 1;
        }
        flat_index(indices, D)
    }

    /// Returns the stored values in canonical flat order.
    pub fn as_slice(&self) -> &[S] {
        &self.data
    }

    /// Returns the stored values in canonical flat order, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [S] {
        &mut self.data
    }

    /// Consumes the tensor and returns its stored values.
    pub fn into_array(self) -> [S; N] {
        self.data
    }

    /// Returns the value at flat storage position `i`.
    pub fn flat(&self, i: usize) -> &S {
        debug_assert!(i < N, "Flat index out of range.");
        &self.data[i]
    }

    /// Returns the value at flat storage position `i`, mutably.
    pub fn flat_mut(&mut self, i: usize) -> &mut S {
        debug_assert!(i < N, "Flat index out of range.");
        &mut self.data[i]
    }

    /// Returns the value at a dimensional index given as a packed code, with the flat offset
    /// computed at compile time. Use the [`at!`](crate::at) macro rather than calling this
    /// directly.
    pub fn at<const CODE: u64>(&self) -> &S {
        &self.data[const { Self::code_offset(CODE) }]
    }

    /// Mutable counterpart of [`Self::at`]. Use the [`at_mut!`](crate::at_mut) macro.
    pub fn at_mut<const CODE: u64>(&mut self) -> &mut S {
        &mut self.data[const { Self::code_offset(CODE) }]
    }

    /// Iterates over the stored values together with their canonical dimensional indices.
    pub fn indexed_iter(&self) -> impl Iterator<Item = ([usize; R], &S)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(i, value)| (dimensional_indices::<R>(i, D), value))
    }
}

impl<S: TensorScalar, const D: usize, const R: usize, const N: usize> SymmetricTensor<S, D, R, N> {
    /// Constructs a tensor from its unique values in canonical flat order.
    pub fn new(data: [S; N]) -> Self {
        let () = Self::SHAPE_CHECK;
        Self { data }
    }

    /// Constructs a tensor from a slice of unique values in canonical flat order.
    ///
    /// # Errors
    ///
    /// Errors if the slice does not contain exactly [`Self::NUM_UNIQUE_VALUES`] values.
    pub fn try_from_slice(values: &[S]) -> Result<Self, anyhow::Error> {
        ensure!(
            values.len() == N,
            "A symmetric tensor of dimension {D} and rank {R} needs {N} unique values, but {} were given.",
            values.len()
        );
        let mut data = [S::zero(); N];
        data.copy_from_slice(values);
        Ok(Self::new(data))
    }

    /// Constructs a tensor by evaluating `f` at every canonical dimensional index, in flat order.
    pub fn nullary_expression<F: FnMut([usize; R]) -> S>(mut f: F) -> Self {
        let () = Self::SHAPE_CHECK;
        let mut data = [S::zero(); N];
        data.iter_mut()
            .enumerate()
            .for_each(|(i, value)| *value = f(dimensional_indices::<R>(i, D)));
        Self { data }
    }

    /// Returns the tensor with every value equal to zero.
    pub fn zeros() -> Self {
        Self::new([S::zero(); N])
    }

    /// Returns the tensor with every value equal to one.
    pub fn ones() -> Self {
        Self::new([S::one(); N])
    }

    /// Returns the generalised identity: one where all indices are equal and zero elsewhere.
    pub fn identity() -> Self {
        Self::nullary_expression(|indices| {
            if kronecker_delta(&indices) {
                S::one()
            } else {
                S::zero()
            }
        })
    }

    /// Returns the tensor with component `d` of `v` on the all-`d` entry and zero elsewhere.
    pub fn diagonal<V: IndexableVector<S, D>>(v: &V) -> Self {
        Self::nullary_expression(|indices| {
            if kronecker_delta(&indices) {
                v.component(indices[0])
            } else {
                S::zero()
            }
        })
    }

    /// Returns the `R`-fold outer power of `v`: each entry is the product of the components of
    /// `v` selected by its indices.
    pub fn cartesian_power<V: IndexableVector<S, D>>(v: &V) -> Self {
        Self::nullary_expression(|indices| {
            indices
                .iter()
                .fold(S::one(), |acc, &i| acc * v.component(i))
        })
    }

    /// Raises a rank-`R - 1` tensor to rank `R` by multiplying along a new leading axis with
    /// `v`. Applied to a cartesian power of `v`, this gives the next cartesian power.
    pub fn cartesian_product<const RL: usize, const NL: usize, V: IndexableVector<S, D>>(
        lower: &SymmetricTensor<S, D, RL, NL>,
        v: &V,
    ) -> Self {
        const { assert!(RL + 1 == R, "The lower tensor must have rank one less than the result.") };
        Self::nullary_expression(|indices| {
            let mut tail = [0; RL];
            tail.copy_from_slice(&indices[1..]);
            v.component(indices[0]) * lower[tail]
        })
    }

    /// Returns the tensor with every value equal to `value`.
    pub fn filled(value: S) -> Self {
        Self::new([value; N])
    }

    /// Returns the sum of the `D` diagonal entries (all indices equal).
    pub fn trace(&self) -> S {
        (0..D).fold(S::zero(), |acc, d| acc + self[[d; R]])
    }

    /// Returns the diagonal entries (all indices equal) as a vector.
    pub fn diagonal_entries(&self) -> SymmetricTensor<S, D, 1, D> {
        SymmetricTensor::<S, D, 1, D>::nullary_expression(|[d]| self[[d; R]])
    }

    /// Contracts the trailing `RO` indices of this tensor with all indices of `other`,
    /// producing a tensor of rank `RR = R - RO`.
    ///
    /// Each output entry $`a`$ is $`\sum_b T_{ab} M_b`$ over all positional indices $`b`$,
    /// evaluated over the canonical indices of `other` weighted by their multiplicities.
    pub fn contract<const RO: usize, const NO: usize, const RR: usize, const NR: usize>(
        &self,
        other: &SymmetricTensor<S, D, RO, NO>,
    ) -> SymmetricTensor<S, D, RR, NR> {
        const { assert!(RR + RO == R, "Contraction rank mismatch.") };
        SymmetricTensor::<S, D, RR, NR>::nullary_expression(|outer| {
            other
                .indexed_iter()
                .fold(S::zero(), |acc, (inner, &value)| {
                    let mut full = [0; R];
                    full[..RR].copy_from_slice(&outer);
                    full[RR..].copy_from_slice(&inner);
                    acc + scalar_from_usize::<S>(multiplicity(&inner)) * self[full] * value
                })
        })
    }

    /// Fully contracts this tensor with another tensor of the same shape.
    pub fn inner(&self, other: &Self) -> S {
        self.indexed_iter()
            .zip(other.data.iter())
            .fold(S::zero(), |acc, ((indices, &a), &b)| {
                acc + scalar_from_usize::<S>(multiplicity(&indices)) * a * b
            })
    }
}

impl<S: TensorScalar + Float, const D: usize, const R: usize, const N: usize>
    SymmetricTensor<S, D, R, N>
{
    /// Returns the Frobenius norm of the equivalent full tensor.
    pub fn norm(&self) -> S {
        self.inner(self).sqrt()
    }
}

impl<S: TensorScalar, const D: usize, const N: usize> SymmetricTensor<S, D, 2, N> {
    /// Returns the symmetric part of the outer product $`a \otimes b`$.
    pub fn symmetric_outer_product<A, B>(a: &A, b: &B) -> Self
    where
        A: IndexableVector<S, D>,
        B: IndexableVector<S, D>,
    {
        let two = S::one() + S::one();
        Self::nullary_expression(|[i, j]| {
            (a.component(i) * b.component(j) + a.component(j) * b.component(i)) / two
        })
    }
}

impl<S: TensorScalar, const D: usize, const R: usize, const N: usize> Default
    for SymmetricTensor<S, D, R, N>
{
    fn default() -> Self {
        Self::zeros()
    }
}

impl<S, const D: usize, const R: usize, const N: usize> std::ops::Index<[usize; R]>
    for SymmetricTensor<S, D, R, N>
{
    type Output = S;

    fn index(&self, indices: [usize; R]) -> &Self::Output {
        debug_assert!(
            indices.iter().all(|&i| i < D),
            "Axis symbol out of range for the tensor dimension."
        );
        &self.data[Self::flat_offset(indices)]
    }
}

impl<S, const D: usize, const R: usize, const N: usize> std::ops::IndexMut<[usize; R]>
    for SymmetricTensor<S, D, R, N>
{
    fn index_mut(&mut self, indices: [usize; R]) -> &mut Self::Output {
        debug_assert!(
            indices.iter().all(|&i| i < D),
            "Axis symbol out of range for the tensor dimension."
        );
        &mut self.data[Self::flat_offset(indices)]
    }
}

impl<S: fmt::Display, const D: usize, const R: usize, const N: usize> fmt::Display
    for SymmetricTensor<S, D, R, N>
{
    /// The alternate form `{:#}` labels every value with its canonical dimensional index, e.g.
    /// `[XX: 1, XY: 2, YY: 3]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (indices, value)) in self.indexed_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if f.alternate() {
                let label = indices
                    .iter()
                    .map(|&axis| axis_label(D, axis))
                    .collect::<String>();
                write!(f, "{label}: ")?;
            }
            fmt::Display::fmt(value, f)?;
        }
        write!(f, "]")
    }
}

impl<S, const D: usize, const R: usize, const N: usize> AbsDiffEq for SymmetricTensor<S, D, R, N>
where
    S: AbsDiffEq,
    S::Epsilon: Copy,
{
    type Epsilon = S::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        S::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<S, const D: usize, const R: usize, const N: usize> RelativeEq for SymmetricTensor<S, D, R, N>
where
    S: RelativeEq,
    S::Epsilon: Copy,
{
    fn default_max_relative() -> Self::Epsilon {
        S::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

// -----
// Serde
// -----

impl<S: Serialize, const D: usize, const R: usize, const N: usize> Serialize
    for SymmetricTensor<S, D, R, N>
{
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut tuple = serializer.serialize_tuple(N)?;
        for value in self.data.iter() {
            tuple.serialize_element(value)?;
        }
        tuple.end()
    }
}

struct SymmetricTensorVisitor<S, const D: usize, const R: usize, const N: usize> {
    marker: PhantomData<S>,
}

impl<'de, S, const D: usize, const R: usize, const N: usize> Visitor<'de>
    for SymmetricTensorVisitor<S, D, R, N>
where
    S: TensorScalar + Deserialize<'de>,
{
    type Value = SymmetricTensor<S, D, R, N>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a sequence of {N} unique tensor values")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut data = [S::zero(); N];
        for (i, value) in data.iter_mut().enumerate() {
            *value = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(i, &self))?;
        }
        Ok(SymmetricTensor::new(data))
    }
}

impl<'de, S, const D: usize, const R: usize, const N: usize> Deserialize<'de>
    for SymmetricTensor<S, D, R, N>
where
    S: TensorScalar + Deserialize<'de>,
{
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        deserializer.deserialize_tuple(
            N,
            SymmetricTensorVisitor::<S, D, R, N> {
                marker: PhantomData,
            },
        )
    }
}

// =======
// Aliases
// =======

/// Symmetric tensors in two dimensions.
pub mod d2 {
    use super::SymmetricTensor;

    pub type Rank1<S> = SymmetricTensor<S, 2, 1, 2>;
    pub type Rank2<S> = SymmetricTensor<S, 2, 2, 3>;
    pub type Rank3<S> = SymmetricTensor<S, 2, 3, 4>;
    pub type Rank4<S> = SymmetricTensor<S, 2, 4, 5>;
    pub type Rank5<S> = SymmetricTensor<S, 2, 5, 6>;
}

/// Symmetric tensors in three dimensions.
pub mod d3 {
    use super::SymmetricTensor;

    pub type Rank1<S> = SymmetricTensor<S, 3, 1, 3>;
    pub type Rank2<S> = SymmetricTensor<S, 3, 2, 6>;
    pub type Rank3<S> = SymmetricTensor<S, 3, 3, 10>;
    pub type Rank4<S> = SymmetricTensor<S, 3, 4, 15>;
    pub type Rank5<S> = SymmetricTensor<S, 3, 5, 21>;
}

/// Symmetric tensors in four dimensions.
pub mod d4 {
    use super::SymmetricTensor;

    pub type Rank1<S> = SymmetricTensor<S, 4, 1, 4>;
    pub type Rank2<S> = SymmetricTensor<S, 4, 2, 10>;
    pub type Rank3<S> = SymmetricTensor<S, 4, 3, 20>;
    pub type Rank4<S> = SymmetricTensor<S, 4, 4, 35>;
    pub type Rank5<S> = SymmetricTensor<S, 4, 5, 56>;
}
