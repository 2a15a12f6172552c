//! Conversions between symmetric tensors and dense `nalgebra`/`ndarray` containers.

use anyhow::{self, ensure};
use nalgebra::SMatrix;
use ndarray::{ArrayD, IxDyn};

use crate::combinatorics::multiplicity;
use crate::index::{dimensional_indices, lexicographical_indices};
use crate::tensor::{scalar_from_usize, SymmetricTensor, TensorScalar};

impl<S: TensorScalar, const D: usize, const R: usize, const N: usize> SymmetricTensor<S, D, R, N> {
    /// Expands the tensor into a dense array of shape `[D; R]`, filled in lexicographical order.
    pub fn to_dense(&self) -> ArrayD<S> {
        let values = (0..Self::NUM_VALUES)
            .map(|i| self[lexicographical_indices::<R>(i, D)])
            .collect::<Vec<_>>();
        ArrayD::from_shape_vec(IxDyn(&[D; R]), values)
            .expect("Unable to construct a dense array from the tensor values.")
    }

    /// Folds a dense array of shape `[D; R]` into a symmetric tensor. Every stored value is the
    /// average of the dense values over all orderings of its index, so a dense array that is
    /// already symmetric is reproduced exactly.
    ///
    /// # Errors
    ///
    /// Errors if the dense array does not have shape `[D; R]`.
    pub fn from_dense(dense: &ArrayD<S>) -> Result<Self, anyhow::Error> {
        ensure!(
            dense.shape() == [D; R].as_slice(),
            "Expected a dense array of shape {:?}, but got {:?}.",
            [D; R],
            dense.shape()
        );
        let mut tensor = Self::zeros();
        dense.iter().enumerate().for_each(|(i, &value)| {
            tensor[lexicographical_indices::<R>(i, D)] += value;
        });
        tensor.data.iter_mut().enumerate().for_each(|(i, value)| {
            let indices = dimensional_indices::<R>(i, D);
            *value /= scalar_from_usize::<S>(multiplicity(&indices));
        });
        Ok(tensor)
    }
}

impl<S, const D: usize, const N: usize> SymmetricTensor<S, D, 2, N>
where
    S: TensorScalar + nalgebra::Scalar,
{
    /// Converts a rank-2 tensor into the equivalent square matrix.
    pub fn to_matrix(&self) -> SMatrix<S, D, D> {
        SMatrix::<S, D, D>::from_fn(|i, j| self[[i, j]])
    }

    /// Constructs a rank-2 tensor from the symmetric part of a square matrix.
    pub fn from_matrix(matrix: &SMatrix<S, D, D>) -> Self {
        let two = S::one() + S::one();
        Self::nullary_expression(|[i, j]| (matrix[(i, j)] + matrix[(j, i)]) / two)
    }
}
