//! Unrolled kernels over the canonical storage of three-dimensional symmetric tensors.
//!
//! Each kernel is a fixed sequence of scalar operations on arrays holding the unique values of a
//! tensor in canonical flat order (`XX, XY, XZ, YY, YZ, ZZ` for rank 2, and so on). Kernels
//! named after a rank produce a tensor of that rank.

use std::array;

use crate::gravity::{cast, GravityScalar};

/// Scales every value by `f`.
pub(crate) fn scale<S: GravityScalar, const N: usize>(a: [S; N], f: S) -> [S; N] {
    a.map(|value| value * f)
}

/// Adds two tensors of the same shape.
pub(crate) fn add<S: GravityScalar, const N: usize>(a: [S; N], b: [S; N]) -> [S; N] {
    array::from_fn(|i| a[i] + b[i])
}

/// $`a \otimes a`$.
pub(crate) fn outer_2<S: GravityScalar>(a: [S; 3]) -> [S; 6] {
    [
        a[0] * a[0],
        a[0] * a[1],
        a[0] * a[2],
        a[1] * a[1],
        a[1] * a[2],
        a[2] * a[2],
    ]
}

/// $`a \otimes t`$ for the rank-2 cartesian power $`t`$ of $`a`$.
pub(crate) fn raise_3<S: GravityScalar>(a: [S; 3], t: [S; 6]) -> [S; 10] {
    [
        a[0] * t[0],
        a[0] * t[1],
        a[0] * t[2],
        a[0] * t[3],
        a[0] * t[4],
        a[0] * t[5],
        a[1] * t[3],
        a[1] * t[4],
        a[1] * t[5],
        a[2] * t[5],
    ]
}

/// $`a \otimes t`$ for the rank-3 cartesian power $`t`$ of $`a`$.
pub(crate) fn raise_4<S: GravityScalar>(a: [S; 3], t: [S; 10]) -> [S; 15] {
    [
        a[0] * t[0],
        a[0] * t[1],
        a[0] * t[2],
        a[0] * t[3],
        a[0] * t[4],
        a[0] * t[5],
        a[0] * t[6],
        a[0] * t[7],
        a[0] * t[8],
        a[0] * t[9],
        a[1] * t[6],
        a[1] * t[7],
        a[1] * t[8],
        a[1] * t[9],
        a[2] * t[9],
    ]
}

/// $`a \otimes t`$ for the rank-4 cartesian power $`t`$ of $`a`$.
pub(crate) fn raise_5<S: GravityScalar>(a: [S; 3], t: [S; 15]) -> [S; 21] {
    [
        a[0] * t[0],
        a[0] * t[1],
        a[0] * t[2],
        a[0] * t[3],
        a[0] * t[4],
        a[0] * t[5],
        a[0] * t[6],
        a[0] * t[7],
        a[0] * t[8],
        a[0] * t[9],
        a[0] * t[10],
        a[0] * t[11],
        a[0] * t[12],
        a[0] * t[13],
        a[0] * t[14],
        a[1] * t[10],
        a[1] * t[11],
        a[1] * t[12],
        a[1] * t[13],
        a[1] * t[14],
        a[2] * t[14],
    ]
}

/// $`f \delta_{ij}`$.
pub(crate) fn identity_2<S: GravityScalar>(f: S) -> [S; 6] {
    let zero = S::zero();
    [f, zero, zero, f, zero, f]
}

/// $`\delta_{ij} a_k + \delta_{ik} a_j + \delta_{jk} a_i`$.
pub(crate) fn delta_vector_3<S: GravityScalar>(a: [S; 3]) -> [S; 10] {
    let three = cast::<S>(3.0);
    [
        three * a[0],
        a[1],
        a[2],
        a[0],
        S::zero(),
        a[0],
        three * a[1],
        a[2],
        a[1],
        three * a[2],
    ]
}

/// The sum of $`\delta_{ij} t_{kl}`$ over the six ways of pairing four indices.
pub(crate) fn delta_outer_4<S: GravityScalar>(t: [S; 6]) -> [S; 15] {
    let three = cast::<S>(3.0);
    let six = cast::<S>(6.0);
    [
        six * t[0],
        three * t[1],
        three * t[2],
        t[0] + t[3],
        t[4],
        t[0] + t[5],
        three * t[1],
        t[2],
        t[1],
        three * t[2],
        six * t[3],
        three * t[4],
        t[3] + t[5],
        three * t[4],
        six * t[5],
    ]
}

/// $`f (\delta_{ij}\delta_{kl} + \delta_{ik}\delta_{jl} + \delta_{il}\delta_{jk})`$.
pub(crate) fn identity_4<S: GravityScalar>(f: S) -> [S; 15] {
    let zero = S::zero();
    let three_f = cast::<S>(3.0) * f;
    [
        three_f, zero, zero, f, zero, f, zero, zero, zero, zero, three_f, zero, f, zero, three_f,
    ]
}

/// The sum of $`\delta \delta a`$ over the fifteen ways of coupling two pairs among five
/// indices.
pub(crate) fn delta_delta_vector_5<S: GravityScalar>(a: [S; 3]) -> [S; 21] {
    let zero = S::zero();
    let three = cast::<S>(3.0);
    let fifteen = cast::<S>(15.0);
    [
        fifteen * a[0],
        three * a[1],
        three * a[2],
        three * a[0],
        zero,
        three * a[0],
        three * a[1],
        a[2],
        a[1],
        three * a[2],
        three * a[0],
        zero,
        a[0],
        zero,
        three * a[0],
        fifteen * a[1],
        three * a[2],
        three * a[1],
        three * a[2],
        three * a[1],
        fifteen * a[2],
    ]
}

/// The sum of $`\delta_{ij} t_{klm}`$ over the ten ways of choosing a pair among five indices.
pub(crate) fn delta_cube_5<S: GravityScalar>(t: [S; 10]) -> [S; 21] {
    let three = cast::<S>(3.0);
    let six = cast::<S>(6.0);
    let ten = cast::<S>(10.0);
    [
        ten * t[0],
        six * t[1],
        six * t[2],
        t[0] + three * t[3],
        three * t[4],
        t[0] + three * t[5],
        three * t[1] + t[6],
        t[2] + t[7],
        t[1] + t[8],
        three * t[2] + t[9],
        six * t[3],
        three * t[4],
        t[3] + t[5],
        three * t[4],
        six * t[5],
        ten * t[6],
        six * t[7],
        t[6] + three * t[8],
        three * t[7] + t[9],
        six * t[8],
        ten * t[9],
    ]
}
