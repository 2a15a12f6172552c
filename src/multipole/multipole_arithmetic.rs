use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use crate::multipole::{Elementwise, Multipole, MultipoleMoment, ScalarBroadcast};
use crate::tensor::TensorScalar;

// -----------
// Elementwise
// -----------

impl<T: Elementwise> AddAssign for Multipole<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.tensors.add_elementwise(&rhs.tensors);
    }
}

impl<T: Elementwise> SubAssign for Multipole<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.tensors.sub_elementwise(&rhs.tensors);
    }
}

impl<T: Elementwise> Add for Multipole<T> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl<T: Elementwise> Sub for Multipole<T> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self::Output {
        self -= rhs;
        self
    }
}

impl<S: TensorScalar, T: Elementwise> AddAssign for MultipoleMoment<S, T> {
    fn add_assign(&mut self, rhs: Self) {
        self.scalar += rhs.scalar;
        self.multipole += rhs.multipole;
    }
}

impl<S: TensorScalar, T: Elementwise> SubAssign for MultipoleMoment<S, T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.scalar -= rhs.scalar;
        self.multipole -= rhs.multipole;
    }
}

impl<S: TensorScalar, T: Elementwise> Add for MultipoleMoment<S, T> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl<S: TensorScalar, T: Elementwise> Sub for MultipoleMoment<S, T> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self::Output {
        self -= rhs;
        self
    }
}

// ------
// Scalar
// ------

macro_rules! impl_scalar_broadcast_ops {
    (@binary $scalar:ty, $target:ty) => {
        impl<T: ScalarBroadcast<$scalar>> Add<$scalar> for $target {
            type Output = Self;

            fn add(mut self, rhs: $scalar) -> Self::Output {
                self += rhs;
                self
            }
        }

        impl<T: ScalarBroadcast<$scalar>> Sub<$scalar> for $target {
            type Output = Self;

            fn sub(mut self, rhs: $scalar) -> Self::Output {
                self -= rhs;
                self
            }
        }

        impl<T: ScalarBroadcast<$scalar>> Mul<$scalar> for $target {
            type Output = Self;

            fn mul(mut self, rhs: $scalar) -> Self::Output {
                self *= rhs;
                self
            }
        }

        impl<T: ScalarBroadcast<$scalar>> Div<$scalar> for $target {
            type Output = Self;

            fn div(mut self, rhs: $scalar) -> Self::Output {
                self /= rhs;
                self
            }
        }
    };
    ($($scalar:ty),+) => {$(
        impl<T: ScalarBroadcast<$scalar>> AddAssign<$scalar> for Multipole<T> {
            fn add_assign(&mut self, rhs: $scalar) {
                self.tensors.add_scalar(rhs);
            }
        }

        impl<T: ScalarBroadcast<$scalar>> SubAssign<$scalar> for Multipole<T> {
            fn sub_assign(&mut self, rhs: $scalar) {
                self.tensors.sub_scalar(rhs);
            }
        }

        impl<T: ScalarBroadcast<$scalar>> MulAssign<$scalar> for Multipole<T> {
            fn mul_assign(&mut self, rhs: $scalar) {
                self.tensors.mul_scalar(rhs);
            }
        }

        impl<T: ScalarBroadcast<$scalar>> DivAssign<$scalar> for Multipole<T> {
            fn div_assign(&mut self, rhs: $scalar) {
                self.tensors.div_scalar(rhs);
            }
        }

        impl<T: ScalarBroadcast<$scalar>> AddAssign<$scalar> for MultipoleMoment<$scalar, T> {
            fn add_assign(&mut self, rhs: $scalar) {
                self.scalar += rhs;
                self.multipole += rhs;
            }
        }

        impl<T: ScalarBroadcast<$scalar>> SubAssign<$scalar> for MultipoleMoment<$scalar, T> {
            fn sub_assign(&mut self, rhs: $scalar) {
                self.scalar -= rhs;
                self.multipole -= rhs;
            }
        }

        impl<T: ScalarBroadcast<$scalar>> MulAssign<$scalar> for MultipoleMoment<$scalar, T> {
            fn mul_assign(&mut self, rhs: $scalar) {
                self.scalar *= rhs;
                self.multipole *= rhs;
            }
        }

        impl<T: ScalarBroadcast<$scalar>> DivAssign<$scalar> for MultipoleMoment<$scalar, T> {
            fn div_assign(&mut self, rhs: $scalar) {
                self.scalar /= rhs;
                self.multipole /= rhs;
            }
        }

        impl_scalar_broadcast_ops!(@binary $scalar, Multipole<T>);
        impl_scalar_broadcast_ops!(@binary $scalar, MultipoleMoment<$scalar, T>);
    )+};
}

impl_scalar_broadcast_ops!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
