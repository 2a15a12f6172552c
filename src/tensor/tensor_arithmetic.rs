//! Elementwise arithmetic on symmetric tensors.
//!
//! Scalar operands are broadcast over every stored unique value, and tensor operands of the same
//! shape combine value by value.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use duplicate::duplicate_item;

use crate::tensor::{SymmetricTensor, TensorScalar};

#[duplicate_item(
    assign_trait_  assign_method_;
    [AddAssign]    [add_assign];
    [SubAssign]    [sub_assign];
    [MulAssign]    [mul_assign];
    [DivAssign]    [div_assign];
)]
impl<S: TensorScalar, const D: usize, const R: usize, const N: usize> assign_trait_<S>
    for SymmetricTensor<S, D, R, N>
{
    fn assign_method_(&mut self, rhs: S) {
        self.data
            .iter_mut()
            .for_each(|value| assign_trait_::assign_method_(value, rhs));
    }
}

#[duplicate_item(
    op_trait_  op_method_  assign_method_;
    [Add]      [add]       [add_assign];
    [Sub]      [sub]       [sub_assign];
    [Mul]      [mul]       [mul_assign];
    [Div]      [div]       [div_assign];
)]
impl<S: TensorScalar, const D: usize, const R: usize, const N: usize> op_trait_<S>
    for SymmetricTensor<S, D, R, N>
{
    type Output = Self;

    fn op_method_(mut self, rhs: S) -> Self::Output {
        self.assign_method_(rhs);
        self
    }
}

#[duplicate_item(
    assign_trait_  assign_method_;
    [AddAssign]    [add_assign];
    [SubAssign]    [sub_assign];
)]
impl<S: TensorScalar, const D: usize, const R: usize, const N: usize> assign_trait_
    for SymmetricTensor<S, D, R, N>
{
    fn assign_method_(&mut self, rhs: Self) {
        self.data
            .iter_mut()
            .zip(rhs.data.iter())
            .for_each(|(value, &other)| assign_trait_::assign_method_(value, other));
    }
}

#[duplicate_item(
    op_trait_  op_method_  assign_method_;
    [Add]      [add]       [add_assign];
    [Sub]      [sub]       [sub_assign];
)]
impl<S: TensorScalar, const D: usize, const R: usize, const N: usize> op_trait_
    for SymmetricTensor<S, D, R, N>
{
    type Output = Self;

    fn op_method_(mut self, rhs: Self) -> Self::Output {
        self.assign_method_(rhs);
        self
    }
}

impl<S, const D: usize, const R: usize, const N: usize> Neg for SymmetricTensor<S, D, R, N>
where
    S: TensorScalar + Neg<Output = S>,
{
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        self.data.iter_mut().for_each(|value| *value = -*value);
        self
    }
}

impl<S: TensorScalar, const D: usize, const R: usize, const N: usize> Sum
    for SymmetricTensor<S, D, R, N>
{
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zeros(), |acc, tensor| acc + tensor)
    }
}

// Scalars on the left-hand side can only be supported for concrete scalar types.
#[duplicate_item(scalar_; [f32]; [f64])]
impl<const D: usize, const R: usize, const N: usize> Mul<SymmetricTensor<scalar_, D, R, N>>
    for scalar_
{
    type Output = SymmetricTensor<scalar_, D, R, N>;

    fn mul(self, rhs: SymmetricTensor<scalar_, D, R, N>) -> Self::Output {
        rhs * self
    }
}
