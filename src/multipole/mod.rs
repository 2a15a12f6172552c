//! Multipoles and multipole moments.
//!
//! A [`Multipole`] of order $`O`$ is the sequence of symmetric tensors of ranks $`1`$ to $`O`$,
//! stored as a tuple so that every rank keeps its own compile-time shape. A [`MultipoleMoment`]
//! prepends a rank-0 scalar (typically a mass or charge) to a multipole.
//!
//! Arithmetic is broadcast over every element: a scalar operand applies to every value of every
//! tensor (and to the rank-0 scalar of a moment), and two multipoles of the same type combine
//! tensor by tensor. The only operations that treat the rank-0 scalar of a moment differently
//! are [`MultipoleMoment::mass_weighted`] and [`MultipoleMoment::mass_normalized`].

use std::iter::Sum;

use anyhow::{self, ensure};
use serde::{Deserialize, Serialize};

use crate::tensor::TensorScalar;

mod multipole_arithmetic;
mod sequence;

pub use sequence::{CartesianPowers, Elementwise, ScalarBroadcast, TensorOfRank, TensorSequence};

#[cfg(test)]
#[path = "multipole_tests.rs"]
mod multipole_tests;

// ==================
// Struct definitions
// ==================

/// A sequence of symmetric tensors of ranks $`1`$ to $`O`$, held in a tuple `T`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Multipole<T> {
    tensors: T,
}

impl<T> Multipole<T> {
    /// Wraps a tuple of tensors of ranks $`1`$ to $`O`$.
    pub fn new(tensors: T) -> Self {
        Self { tensors }
    }

    /// Returns the tuple of tensors.
    pub fn tensors(&self) -> &T {
        &self.tensors
    }

    /// Returns the tuple of tensors mutably.
    pub fn tensors_mut(&mut self) -> &mut T {
        &mut self.tensors
    }

    /// Consumes the multipole and returns its tuple of tensors, for structured decomposition.
    pub fn into_tensors(self) -> T {
        self.tensors
    }

    /// Returns the tensor of rank `K`. Ranks outside $`1..=O`$ fail to compile.
    pub fn tensor<const K: usize>(&self) -> &<T as TensorOfRank<K>>::Tensor
    where
        T: TensorOfRank<K>,
    {
        TensorOfRank::<K>::tensor(&self.tensors)
    }

    /// Returns the tensor of rank `K` mutably.
    pub fn tensor_mut<const K: usize>(&mut self) -> &mut <T as TensorOfRank<K>>::Tensor
    where
        T: TensorOfRank<K>,
    {
        TensorOfRank::<K>::tensor_mut(&mut self.tensors)
    }
}

impl<T: TensorSequence> Multipole<T> {
    /// The order of the multipole, i.e. its highest tensor rank.
    pub const ORDER: usize = T::ORDER;
}

impl<T: Elementwise> Multipole<T> {
    /// Returns the multipole with every tensor equal to zero.
    pub fn zeros() -> Self {
        Self::new(T::zeroed())
    }
}

impl<T> Multipole<T> {
    /// Returns the multipole whose rank-$`k`$ tensor is the $`k`$-fold cartesian power of `v`.
    pub fn from_vector<V>(v: &V) -> Self
    where
        T: CartesianPowers<V>,
    {
        Self::new(T::cartesian_powers(v))
    }
}

impl<T: Elementwise> Default for Multipole<T> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T: Elementwise> Sum for Multipole<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zeros(), |acc, multipole| acc + multipole)
    }
}

/// A rank-0 scalar followed by a multipole of order $`O`$.
///
/// For a point mass $`m`$ at $`\mathbf{p}`$, [`Self::from_point_mass`] gives
/// $`(m, \mathbf{p}, \mathbf{p}^{\otimes 2}, \ldots)`$. Summing the
/// [mass-weighted](Self::mass_weighted) moments of many point masses and then
/// [normalising](Self::mass_normalized) gives the total mass together with the mass-averaged
/// cartesian powers of the positions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultipoleMoment<S, T> {
    scalar: S,
    multipole: Multipole<T>,
}

impl<S: Copy, T> MultipoleMoment<S, T> {
    /// Constructs a moment from its rank-0 scalar and its tuple of tensors.
    pub fn new(scalar: S, tensors: T) -> Self {
        Self {
            scalar,
            multipole: Multipole::new(tensors),
        }
    }

    /// Returns the rank-0 scalar.
    pub fn scalar(&self) -> S {
        self.scalar
    }

    /// Returns the rank-0 scalar mutably.
    pub fn scalar_mut(&mut self) -> &mut S {
        &mut self.scalar
    }

    /// Returns the multipole of ranks $`1`$ to $`O`$.
    pub fn multipole(&self) -> &Multipole<T> {
        &self.multipole
    }

    /// Returns the tuple of tensors of ranks $`1`$ to $`O`$.
    pub fn tensors(&self) -> &T {
        self.multipole.tensors()
    }

    /// Consumes the moment and returns the rank-0 scalar and the tuple of tensors.
    pub fn into_parts(self) -> (S, T) {
        (self.scalar, self.multipole.into_tensors())
    }

    /// Returns the tensor of rank `K` for $`K \geq 1`$. The rank-0 value is [`Self::scalar`].
    pub fn tensor<const K: usize>(&self) -> &<T as TensorOfRank<K>>::Tensor
    where
        T: TensorOfRank<K>,
    {
        self.multipole.tensor::<K>()
    }

    /// Returns the tensor of rank `K` mutably.
    pub fn tensor_mut<const K: usize>(&mut self) -> &mut <T as TensorOfRank<K>>::Tensor
    where
        T: TensorOfRank<K>,
    {
        self.multipole.tensor_mut::<K>()
    }

    /// Returns the moment of a point of mass `mass` at `position`. The tensors are the cartesian
    /// powers of `position` and do not depend on the mass.
    pub fn from_point_mass<V>(mass: S, position: &V) -> Self
    where
        T: CartesianPowers<V>,
    {
        Self {
            scalar: mass,
            multipole: Multipole::from_vector(position),
        }
    }
}

impl<S: TensorScalar, T: TensorSequence> MultipoleMoment<S, T> {
    /// The order of the moment, i.e. its highest tensor rank.
    pub const ORDER: usize = T::ORDER;
}

impl<S: TensorScalar, T: Elementwise> MultipoleMoment<S, T> {
    /// Returns the moment with a zero scalar and zero tensors.
    pub fn zeros() -> Self {
        Self {
            scalar: S::zero(),
            multipole: Multipole::zeros(),
        }
    }
}

impl<S: TensorScalar, T: ScalarBroadcast<S>> MultipoleMoment<S, T> {
    /// Multiplies every tensor by the rank-0 scalar, leaving the scalar unchanged.
    pub fn mass_weighted(mut self) -> Self {
        self.multipole.tensors.mul_scalar(self.scalar);
        self
    }

    /// Divides every tensor by the rank-0 scalar, leaving the scalar unchanged.
    ///
    /// # Errors
    ///
    /// Errors if the rank-0 scalar is zero.
    pub fn mass_normalized(mut self) -> Result<Self, anyhow::Error> {
        ensure!(
            self.scalar != S::zero(),
            "Unable to normalise a multipole moment with a zero rank-0 value."
        );
        self.multipole.tensors.div_scalar(self.scalar);
        Ok(self)
    }

    /// Multiplies every tensor by `factor`, leaving the rank-0 scalar unchanged.
    pub fn scale_tensors(mut self, factor: S) -> Self {
        self.multipole.tensors.mul_scalar(factor);
        self
    }
}

impl<S: TensorScalar, T: Elementwise> Default for MultipoleMoment<S, T> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<S: TensorScalar, T: Elementwise> Sum for MultipoleMoment<S, T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zeros(), |acc, moment| acc + moment)
    }
}

// =======
// Aliases
// =======

/// Multipoles and moments in two dimensions.
pub mod d2 {
    use super::{Multipole, MultipoleMoment};
    use crate::tensor::d2::{Rank1, Rank2, Rank3, Rank4, Rank5};

    pub type Dipole<S> = Multipole<(Rank1<S>,)>;
    pub type Quadrupole<S> = Multipole<(Rank1<S>, Rank2<S>)>;
    pub type Octupole<S> = Multipole<(Rank1<S>, Rank2<S>, Rank3<S>)>;
    pub type Hexadecupole<S> = Multipole<(Rank1<S>, Rank2<S>, Rank3<S>, Rank4<S>)>;
    pub type Triacontadipole<S> = Multipole<(Rank1<S>, Rank2<S>, Rank3<S>, Rank4<S>, Rank5<S>)>;

    pub type DipoleMoment<S> = MultipoleMoment<S, (Rank1<S>,)>;
    pub type QuadrupoleMoment<S> = MultipoleMoment<S, (Rank1<S>, Rank2<S>)>;
    pub type OctupoleMoment<S> = MultipoleMoment<S, (Rank1<S>, Rank2<S>, Rank3<S>)>;
    pub type HexadecupoleMoment<S> = MultipoleMoment<S, (Rank1<S>, Rank2<S>, Rank3<S>, Rank4<S>)>;
    pub type TriacontadipoleMoment<S> =
        MultipoleMoment<S, (Rank1<S>, Rank2<S>, Rank3<S>, Rank4<S>, Rank5<S>)>;
}

/// Multipoles and moments in three dimensions.
pub mod d3 {
    use super::{Multipole, MultipoleMoment};
    use crate::tensor::d3::{Rank1, Rank2, Rank3, Rank4, Rank5};

    pub type Dipole<S> = Multipole<(Rank1<S>,)>;
    pub type Quadrupole<S> = Multipole<(Rank1<S>, Rank2<S>)>;
    pub type Octupole<S> = Multipole<(Rank1<S>, Rank2<S>, Rank3<S>)>;
    pub type Hexadecupole<S> = Multipole<(Rank1<S>, Rank2<S>, Rank3<S>, Rank4<S>)>;
    pub type Triacontadipole<S> = Multipole<(Rank1<S>, Rank2<S>, Rank3<S>, Rank4<S>, Rank5<S>)>;

    pub type DipoleMoment<S> = MultipoleMoment<S, (Rank1<S>,)>;
    pub type QuadrupoleMoment<S> = MultipoleMoment<S, (Rank1<S>, Rank2<S>)>;
    pub type OctupoleMoment<S> = MultipoleMoment<S, (Rank1<S>, Rank2<S>, Rank3<S>)>;
    pub type HexadecupoleMoment<S> = MultipoleMoment<S, (Rank1<S>, Rank2<S>, Rank3<S>, Rank4<S>)>;
    pub type TriacontadipoleMoment<S> =
        MultipoleMoment<S, (Rank1<S>, Rank2<S>, Rank3<S>, Rank4<S>, Rank5<S>)>;
}
