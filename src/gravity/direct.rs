//! Closed-form derivative tensors of $`1/r`$.
//!
//! Every order is expanded by hand into a cartesian power of $`\mathbf{r}`$ scaled by the
//! leading radial coefficient, plus explicit per-index Kronecker-delta terms. This is the
//! reference backend the others are validated against.

use crate::gravity::{cast, radial_coefficients, Derivative, Derivatives, Direct, GravityScalar, Order};
use crate::index::xyz::{X, Y, Z};
use crate::multipole::Multipole;
use crate::tensor::d3::{Rank1, Rank2, Rank3, Rank4, Rank5};
use crate::tensor::IndexableVector;
use crate::{at, at_mut};

/// Computes the derivative tensor of $`1/r`$ of order `N` at `r`.
pub fn derivative<const N: usize, S>(
    r: &impl IndexableVector<S, 3>,
) -> <Order<N> as Derivative<Direct, S>>::Tensor
where
    Order<N>: Derivative<Direct, S>,
{
    <Order<N> as Derivative<Direct, S>>::derivative(&r.to_array())
}

/// Computes the derivative tensors of $`1/r`$ of orders $`1`$ to `N` at `r`.
pub fn derivatives<const N: usize, S>(
    r: &impl IndexableVector<S, 3>,
) -> Multipole<<Order<N> as Derivatives<Direct, S>>::Tensors>
where
    Order<N>: Derivatives<Direct, S>,
{
    <Order<N> as Derivatives<Direct, S>>::derivatives(&r.to_array())
}

impl<S: GravityScalar> Derivative<Direct, S> for Order<1> {
    type Tensor = Rank1<S>;

    fn derivative(r: &[S; 3]) -> Self::Tensor {
        let g = radial_coefficients(r);
        Rank1::new(*r) * g[1]
    }
}

impl<S: GravityScalar> Derivative<Direct, S> for Order<2> {
    type Tensor = Rank2<S>;

    fn derivative(r: &[S; 3]) -> Self::Tensor {
        let g = radial_coefficients(r);
        let mut d = Rank2::cartesian_power(r) * g[2];
        *at_mut!(d, X, X) += g[1];
        *at_mut!(d, Y, Y) += g[1];
        *at_mut!(d, Z, Z) += g[1];
        d
    }
}

impl<S: GravityScalar> Derivative<Direct, S> for Order<3> {
    type Tensor = Rank3<S>;

    fn derivative(r: &[S; 3]) -> Self::Tensor {
        let g = radial_coefficients(r);
        let [x, y, z] = *r;
        let three = cast::<S>(3.0);

        let mut d = Rank3::cartesian_power(r) * g[3];
        *at_mut!(d, X, X, X) += g[2] * three * x;
        *at_mut!(d, Y, Y, Y) += g[2] * three * y;
        *at_mut!(d, Z, Z, Z) += g[2] * three * z;

        *at_mut!(d, X, Y, Y) += g[2] * x;
        *at_mut!(d, X, Z, Z) += g[2] * x;
        *at_mut!(d, X, X, Y) += g[2] * y;
        *at_mut!(d, Y, Z, Z) += g[2] * y;
        *at_mut!(d, X, X, Z) += g[2] * z;
        *at_mut!(d, Y, Y, Z) += g[2] * z;
        d
    }
}

impl<S: GravityScalar> Derivative<Direct, S> for Order<4> {
    type Tensor = Rank4<S>;

    fn derivative(r: &[S; 3]) -> Self::Tensor {
        let g = radial_coefficients(r);
        let [x, y, z] = *r;
        let three = cast::<S>(3.0);
        let six = cast::<S>(6.0);
        let rr = Rank2::cartesian_power(r);
        let squares = rr.diagonal_entries();

        let mut d = Rank4::cartesian_power(r) * g[4];

        // Two Kronecker deltas.
        *at_mut!(d, X, X, X, X) += g[2] * three;
        *at_mut!(d, Y, Y, Y, Y) += g[2] * three;
        *at_mut!(d, Z, Z, Z, Z) += g[2] * three;
        *at_mut!(d, X, X, Y, Y) += g[2];
        *at_mut!(d, X, X, Z, Z) += g[2];
        *at_mut!(d, Y, Y, Z, Z) += g[2];

        // One Kronecker delta and two components.
        *at_mut!(d, X, X, X, X) += g[3] * six * *at!(squares, X);
        *at_mut!(d, Y, Y, Y, Y) += g[3] * six * *at!(squares, Y);
        *at_mut!(d, Z, Z, Z, Z) += g[3] * six * *at!(squares, Z);

        *at_mut!(d, X, X, X, Y) += g[3] * three * x * y;
        *at_mut!(d, X, Y, Y, Y) += g[3] * three * x * y;
        *at_mut!(d, X, X, X, Z) += g[3] * three * x * z;
        *at_mut!(d, X, Z, Z, Z) += g[3] * three * x * z;
        *at_mut!(d, Y, Y, Y, Z) += g[3] * three * y * z;
        *at_mut!(d, Y, Z, Z, Z) += g[3] * three * y * z;

        *at_mut!(d, X, X, Y, Y) += g[3] * (*at!(rr, X, X) + *at!(rr, Y, Y));
        *at_mut!(d, X, X, Z, Z) += g[3] * (*at!(rr, X, X) + *at!(rr, Z, Z));
        *at_mut!(d, Y, Y, Z, Z) += g[3] * (*at!(rr, Y, Y) + *at!(rr, Z, Z));

        *at_mut!(d, X, X, Y, Z) += g[3] * y * z;
        *at_mut!(d, X, Y, Y, Z) += g[3] * x * z;
        *at_mut!(d, X, Y, Z, Z) += g[3] * x * y;
        d
    }
}

impl<S: GravityScalar> Derivative<Direct, S> for Order<5> {
    type Tensor = Rank5<S>;

    fn derivative(r: &[S; 3]) -> Self::Tensor {
        let g = radial_coefficients(r);
        let [x, y, z] = *r;
        let three = cast::<S>(3.0);
        let six = cast::<S>(6.0);
        let ten = cast::<S>(10.0);
        let fifteen = cast::<S>(15.0);

        let mut d = Rank5::cartesian_power(r) * g[5];

        // One Kronecker delta and three components.
        let (xx, yy, zz) = (x * x, y * y, z * z);
        *at_mut!(d, X, X, X, X, X) += g[4] * ten * xx * x;
        *at_mut!(d, Y, Y, Y, Y, Y) += g[4] * ten * yy * y;
        *at_mut!(d, Z, Z, Z, Z, Z) += g[4] * ten * zz * z;

        *at_mut!(d, X, X, X, X, Y) += g[4] * six * xx * y;
        *at_mut!(d, X, X, X, X, Z) += g[4] * six * xx * z;
        *at_mut!(d, X, Y, Y, Y, Y) += g[4] * six * x * yy;
        *at_mut!(d, Y, Y, Y, Y, Z) += g[4] * six * yy * z;
        *at_mut!(d, X, Z, Z, Z, Z) += g[4] * six * x * zz;
        *at_mut!(d, Y, Z, Z, Z, Z) += g[4] * six * y * zz;

        *at_mut!(d, X, X, X, Y, Y) += g[4] * (three * x * yy + xx * x);
        *at_mut!(d, X, X, X, Z, Z) += g[4] * (three * x * zz + xx * x);
        *at_mut!(d, X, X, Y, Y, Y) += g[4] * (three * xx * y + yy * y);
        *at_mut!(d, Y, Y, Y, Z, Z) += g[4] * (three * y * zz + yy * y);
        *at_mut!(d, X, X, Z, Z, Z) += g[4] * (three * xx * z + zz * z);
        *at_mut!(d, Y, Y, Z, Z, Z) += g[4] * (three * yy * z + zz * z);

        *at_mut!(d, X, X, X, Y, Z) += g[4] * three * x * y * z;
        *at_mut!(d, X, Y, Y, Y, Z) += g[4] * three * x * y * z;
        *at_mut!(d, X, Y, Z, Z, Z) += g[4] * three * x * y * z;

        *at_mut!(d, X, X, Y, Y, Z) += g[4] * (xx + yy) * z;
        *at_mut!(d, X, X, Y, Z, Z) += g[4] * (xx + zz) * y;
        *at_mut!(d, X, Y, Y, Z, Z) += g[4] * (yy + zz) * x;

        // Two Kronecker deltas and one component.
        *at_mut!(d, X, X, X, X, X) += g[3] * fifteen * x;
        *at_mut!(d, Y, Y, Y, Y, Y) += g[3] * fifteen * y;
        *at_mut!(d, Z, Z, Z, Z, Z) += g[3] * fifteen * z;

        *at_mut!(d, X, X, X, X, Y) += g[3] * three * y;
        *at_mut!(d, X, X, X, X, Z) += g[3] * three * z;
        *at_mut!(d, X, X, X, Y, Y) += g[3] * three * x;
        *at_mut!(d, X, X, X, Z, Z) += g[3] * three * x;
        *at_mut!(d, X, X, Y, Y, Y) += g[3] * three * y;
        *at_mut!(d, X, X, Z, Z, Z) += g[3] * three * z;
        *at_mut!(d, X, Y, Y, Y, Y) += g[3] * three * x;
        *at_mut!(d, X, Z, Z, Z, Z) += g[3] * three * x;
        *at_mut!(d, Y, Y, Y, Y, Z) += g[3] * three * z;
        *at_mut!(d, Y, Y, Y, Z, Z) += g[3] * three * y;
        *at_mut!(d, Y, Y, Z, Z, Z) += g[3] * three * z;
        *at_mut!(d, Y, Z, Z, Z, Z) += g[3] * three * y;

        *at_mut!(d, X, X, Y, Y, Z) += g[3] * z;
        *at_mut!(d, X, X, Y, Z, Z) += g[3] * y;
        *at_mut!(d, X, Y, Y, Z, Z) += g[3] * x;
        d
    }
}
