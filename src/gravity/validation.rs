//! Cross-validation of the derivative backends.

use std::fmt;

use anyhow::{self, ensure};

use crate::gravity::{direct, einsum, tensorlib, GravityScalar};
use crate::tensor::SymmetricTensor;

fn relative_difference<S, const D: usize, const R: usize, const N: usize>(
    reference: &SymmetricTensor<S, D, R, N>,
    other: &SymmetricTensor<S, D, R, N>,
) -> S
where
    S: GravityScalar,
{
    let scale = reference.norm();
    let difference = (*reference - *other).norm();
    if scale > S::zero() {
        difference / scale
    } else {
        difference
    }
}

/// Checks that the [`einsum`] and [`tensorlib`] backends agree with the [`direct`] backend at
/// every order from one to five.
///
/// # Arguments
///
/// * `r` - The position at which the derivatives are evaluated.
/// * `tolerance` - The largest accepted relative Frobenius norm of the difference between two
/// backends.
///
/// # Errors
///
/// Errors naming the order and the backend of the first disagreement found.
pub fn cross_validate_derivatives<S>(r: &[S; 3], tolerance: S) -> Result<(), anyhow::Error>
where
    S: GravityScalar + fmt::LowerExp,
{
    macro_rules! check_order {
        ($($n:literal),+) => {$(
            let reference = direct::derivative::<$n, S>(r);
            for (backend, candidate) in [
                ("einsum", einsum::derivative::<$n, S>(r)),
                ("tensorlib", tensorlib::derivative::<$n, S>(r)),
            ] {
                let difference = relative_difference(&reference, &candidate);
                log::debug!(
                    "Order-{} derivatives from the {backend} backend: relative difference {difference:.3e}.",
                    $n
                );
                ensure!(
                    difference <= tolerance,
                    "Order-{} derivatives from the {backend} backend differ from the direct backend by a relative norm of {difference:.3e}, above the tolerance of {tolerance:.3e}.",
                    $n
                );
            }
        )+};
    }

    check_order!(1, 2, 3, 4, 5);
    Ok(())
}
