//! # symtensor: symmetric tensors for multipole expansions
//!
//! `symtensor` is a numerical library for fully symmetric tensors of small, fixed rank and
//! dimension, written to compute multipole expansions of gravitational fields. It provides:
//! - compact storage of the unique values of a symmetric tensor, with a canonical mapping
//!   between flat indices and sorted dimensional indices,
//! - element access by runtime index tuples in any order, or by index codes resolved during
//!   compilation,
//! - arithmetic, traces, contractions and inner products between symmetric tensors,
//! - multipoles and multipole moments, i.e. sequences of tensors of increasing rank built
//!   from cartesian powers of position vectors, and
//! - three independent generators of the derivative tensors of $`1/r`$ up to fifth order,
//!   which can be cross-validated against each other.
//!
//! On top of these, the [`gravity::field`] module approximates the gravitational acceleration
//! and potential of a set of point masses by its multipole moments, and the
//! [`drivers::gravity_approximation`] driver measures how the accuracy of these approximations
//! improves with the expansion order.
//!
//! ## Getting started
//!
//! Tensor types are parametrised by their scalar type, dimension, rank and number of unique
//! values. Aliases such as [`tensor::d3::Rank2`] fix the last three parameters:
//!
//! ```
//! use symtensor::at;
//! use symtensor::index::xyz::{X, Y, Z};
//! use symtensor::tensor::d3::{Rank1, Rank2};
//!
//! let r = [1.0, 2.0, 3.0];
//! let rr = Rank2::cartesian_power(&r);
//! assert_eq!(rr[[Z, X]], 3.0);
//! assert_eq!(*at!(rr, Y, Y), 4.0);
//!
//! let q: Rank1<f64> = rr.contract(&Rank1::new(r));
//! assert_eq!(q.into_array(), [14.0, 28.0, 42.0]);
//! ```
//!
//! ## Binary
//!
//! The `symtensor` binary runs the gravity approximation driver with parameters read from a
//! YAML configuration file:
//!
//! ```text
//! symtensor --config input.yml --output report.out
//! ```
//!
//! ## License
//!
//! GNU Lesser General Public License v3.0.

macro_rules! count_exprs {
    () => (0);
    ($head:expr) => (1);
    ($head:expr, $($tail:expr),*) => (1 + count_exprs!($($tail),*));
}

pub mod combinatorics;
pub mod drivers;
pub mod gravity;
pub mod index;
pub mod interfaces;
pub mod io;
pub mod multipole;
pub mod tensor;
