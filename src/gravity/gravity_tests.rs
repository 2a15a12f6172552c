use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::{Point3, Vector3};

use crate::gravity::field::{
    center_of_mass, direct_acceleration, direct_potential, moment_about, FieldExpansion,
    PointMass,
};
use crate::gravity::validation::cross_validate_derivatives;
use crate::gravity::{direct, einsum, tensorlib};
use crate::multipole::d3;
use crate::tensor::d3::{Rank1, Rank2};
use crate::{at, index::xyz::{X, Y, Z}};

fn central_difference<F: Fn(&[f64; 3]) -> f64>(f: F, r: &[f64; 3], axis: usize) -> f64 {
    let h = 1e-5;
    let mut plus = *r;
    plus[axis] += h;
    let mut minus = *r;
    minus[axis] -= h;
    (f(&plus) - f(&minus)) / (2.0 * h)
}

fn relative_error(approx: &[f64; 3], exact: &[f64; 3]) -> f64 {
    let diff = Vector3::from(*approx) - Vector3::from(*exact);
    diff.norm() / Vector3::from(*exact).norm()
}

#[test]
fn test_direct_low_orders() {
    let r = [1.0, 2.0, 3.0];
    let r2: f64 = 14.0;
    let inv_r3 = r2.powf(-1.5);
    let inv_r5 = r2.powf(-2.5);

    let d1 = direct::derivative::<1, f64>(&r);
    assert_relative_eq!(
        d1,
        Rank1::new([-inv_r3, -2.0 * inv_r3, -3.0 * inv_r3]),
        max_relative = 1e-14
    );

    let d2 = direct::derivative::<2, f64>(&r);
    assert_relative_eq!(*at!(d2, X, X), 3.0 * inv_r5 - inv_r3, max_relative = 1e-14);
    assert_relative_eq!(*at!(d2, X, Y), 6.0 * inv_r5, max_relative = 1e-14);
    assert_relative_eq!(*at!(d2, Y, X), 6.0 * inv_r5, max_relative = 1e-14);
    assert_relative_eq!(*at!(d2, Y, Z), 18.0 * inv_r5, max_relative = 1e-14);
    assert_relative_eq!(*at!(d2, Z, Z), 27.0 * inv_r5 - inv_r3, max_relative = 1e-14);
}

#[test]
fn test_direct_finite_differences() {
    for r in [[1.0, 2.0, 3.0], [-0.7, 0.4, 1.3], [2.5, -1.5, -0.5]] {
        let d1 = direct::derivative::<1, f64>(&r);
        for ([i], &value) in d1.indexed_iter() {
            let fd = central_difference(
                |p| 1.0 / (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt(),
                &r,
                i,
            );
            assert_abs_diff_eq!(value, fd, epsilon = 1e-8);
        }

        let d2 = direct::derivative::<2, f64>(&r);
        for ([i, j], &value) in d2.indexed_iter() {
            let fd = central_difference(|p| direct::derivative::<1, f64>(p)[[j]], &r, i);
            assert_abs_diff_eq!(value, fd, epsilon = 1e-8);
        }

        let d3 = direct::derivative::<3, f64>(&r);
        for ([i, j, k], &value) in d3.indexed_iter() {
            let fd = central_difference(|p| direct::derivative::<2, f64>(p)[[j, k]], &r, i);
            assert_abs_diff_eq!(value, fd, epsilon = 1e-7);
        }

        let d4 = direct::derivative::<4, f64>(&r);
        for ([i, j, k, l], &value) in d4.indexed_iter() {
            let fd = central_difference(|p| direct::derivative::<3, f64>(p)[[j, k, l]], &r, i);
            assert_abs_diff_eq!(value, fd, epsilon = 1e-6);
        }

        let d5 = direct::derivative::<5, f64>(&r);
        for ([i, j, k, l, m], &value) in d5.indexed_iter() {
            let fd = central_difference(
                |p| direct::derivative::<4, f64>(p)[[j, k, l, m]],
                &r,
                i,
            );
            assert_abs_diff_eq!(value, fd, epsilon = 1e-5);
        }
    }
}

#[test]
fn test_derivatives_are_traceless() {
    let r = [0.3, -1.2, 0.8];
    let delta = Rank2::<f64>::identity();

    let d2 = direct::derivative::<2, f64>(&r);
    assert_abs_diff_eq!(d2.trace(), 0.0, epsilon = 1e-12);

    let d3 = direct::derivative::<3, f64>(&r);
    let d3_trace: Rank1<f64> = d3.contract(&delta);
    assert_abs_diff_eq!(d3_trace, Rank1::zeros(), epsilon = 1e-10);

    let d4 = direct::derivative::<4, f64>(&r);
    let d4_trace: Rank2<f64> = d4.contract(&delta);
    assert_abs_diff_eq!(d4_trace, Rank2::zeros(), epsilon = 1e-9);

    let d5 = einsum::derivative::<5, f64>(&r);
    let d5_trace: crate::tensor::d3::Rank3<f64> = d5.contract(&delta);
    assert_abs_diff_eq!(d5_trace, crate::tensor::d3::Rank3::zeros(), epsilon = 1e-8);
}

#[test]
fn test_backends_agree() {
    let r = [1.0, 2.0, 3.0];

    assert_relative_eq!(
        direct::derivative::<1, f64>(&r),
        einsum::derivative::<1, f64>(&r),
        max_relative = 1e-7
    );
    assert_relative_eq!(
        direct::derivative::<2, f64>(&r),
        einsum::derivative::<2, f64>(&r),
        max_relative = 1e-7
    );
    assert_relative_eq!(
        direct::derivative::<3, f64>(&r),
        einsum::derivative::<3, f64>(&r),
        max_relative = 1e-7
    );
    assert_relative_eq!(
        direct::derivative::<4, f64>(&r),
        einsum::derivative::<4, f64>(&r),
        max_relative = 1e-7
    );
    assert_relative_eq!(
        direct::derivative::<5, f64>(&r),
        einsum::derivative::<5, f64>(&r),
        max_relative = 1e-7
    );

    assert_relative_eq!(
        direct::derivative::<2, f64>(&r),
        tensorlib::derivative::<2, f64>(&r),
        max_relative = 1e-7
    );
    assert_relative_eq!(
        direct::derivative::<3, f64>(&r),
        tensorlib::derivative::<3, f64>(&r),
        max_relative = 1e-7
    );
    assert_relative_eq!(
        direct::derivative::<4, f64>(&r),
        tensorlib::derivative::<4, f64>(&r),
        max_relative = 1e-7
    );
    assert_relative_eq!(
        direct::derivative::<5, f64>(&r),
        tensorlib::derivative::<5, f64>(&r),
        max_relative = 1e-7
    );

    for r in [
        [1.0, 2.0, 3.0],
        [-0.5, 0.25, 4.0],
        [10.0, -3.0, 0.0],
        [0.0, 0.0, 1.0],
        [1e-2, 2e-2, -3e-2],
    ] {
        assert!(cross_validate_derivatives(&r, 1e-10).is_ok());
    }
    assert!(cross_validate_derivatives(&[1.0f32, -2.0, 0.5], 1e-4).is_ok());
}

#[test]
fn test_einsum_derivative_at() {
    let r = [0.4, -1.1, 2.3];
    let d5 = direct::derivative::<5, f64>(&r);
    assert_relative_eq!(
        einsum::derivative_at(&[X, Y, Y, Z, Z], &r),
        d5[[X, Y, Y, Z, Z]],
        max_relative = 1e-12
    );
    // Any permutation of the index gives the same entry.
    assert_relative_eq!(
        einsum::derivative_at(&[Z, Y, X, Z, Y], &r),
        einsum::derivative_at(&[X, Y, Y, Z, Z], &r),
        max_relative = 1e-12
    );
    assert_relative_eq!(
        einsum::derivative_at(&[Z, Z, Z], &r),
        *at!(direct::derivative::<3, f64>(&r), Z, Z, Z),
        max_relative = 1e-12
    );
}

#[test]
fn test_derivatives_tuples() {
    let r = Vector3::new(1.0, -2.0, 0.5);
    let (d1, d2, d3) = direct::derivatives::<3, f64>(&r).into_tensors();
    assert_eq!(d1, direct::derivative::<1, f64>(&r));
    assert_eq!(d2, direct::derivative::<2, f64>(&r));
    assert_eq!(d3, direct::derivative::<3, f64>(&r));

    let e = einsum::derivatives::<4, f64>(&Point3::new(1.0, -2.0, 0.5));
    assert_relative_eq!(*e.tensor::<2>(), d2, max_relative = 1e-12);
    assert_relative_eq!(*e.tensor::<3>(), d3, max_relative = 1e-12);

    let t = tensorlib::derivatives::<2, f64>(&[1.0, -2.0, 0.5]);
    assert_relative_eq!(*t.tensor::<1>(), d1, max_relative = 1e-12);

    let (inv_r, all) = tensorlib::potential_derivatives(&[1.0, 2.0, 2.0]);
    assert_relative_eq!(inv_r, 1.0 / 3.0, max_relative = 1e-15);
    assert_relative_eq!(
        *all.tensor::<1>(),
        Rank1::new([-1.0 / 27.0, -2.0 / 27.0, -2.0 / 27.0]),
        max_relative = 1e-14
    );
}

fn cloud() -> Vec<PointMass<f64>> {
    vec![
        PointMass::new(1.0, [0.3, -0.2, 0.1]),
        PointMass::new(2.0, [-0.4, 0.5, 0.2]),
        PointMass::new(0.5, [0.1, 0.1, -0.6]),
        PointMass::new(1.5, [0.2, -0.3, -0.2]),
    ]
}

#[test]
fn test_center_of_mass() {
    let com = center_of_mass(&cloud()).unwrap();
    assert_relative_eq!(com.mass(), 5.0);
    assert_relative_eq!(com.position()[0], -0.03, max_relative = 1e-12);
    assert_relative_eq!(com.position()[1], 0.08, max_relative = 1e-12);
    assert_relative_eq!(com.position()[2], -0.02, max_relative = 1e-12);

    assert!(center_of_mass::<f64>(&[]).is_err());
    assert!(center_of_mass(&[PointMass::new(1.0, [0.0; 3]), PointMass::new(-1.0, [1.0; 3])])
        .is_err());
}

#[test]
fn test_moment_about() {
    let particles = cloud();
    let com = center_of_mass(&particles).unwrap();
    let moment: d3::QuadrupoleMoment<f64> = moment_about(&particles, com.position()).unwrap();
    assert_relative_eq!(moment.scalar(), 5.0);
    // The dipole vanishes about the centre of mass.
    assert_abs_diff_eq!(*moment.tensor::<1>(), Rank1::zeros(), epsilon = 1e-15);

    let single: d3::QuadrupoleMoment<f64> =
        moment_about(&[PointMass::new(3.0, [1.0, 2.0, 3.0])], &[1.0, 1.0, 1.0]).unwrap();
    assert_eq!(
        single,
        d3::QuadrupoleMoment::from_point_mass(3.0, &[0.0, 1.0, 2.0])
    );

    assert!(moment_about::<f64, (Rank1<f64>,)>(&[], &[0.0; 3]).is_err());
}

#[test]
fn test_field_expansion_single_mass() {
    let particles = [PointMass::new(2.0, [0.5, -0.5, 1.0])];
    let center = *particles[0].position();
    let position = [3.0, 1.0, -2.0];
    let exact = direct_acceleration(&particles, &position);
    let exact_potential = direct_potential(&particles, &position);

    let moment: d3::HexadecupoleMoment<f64> = moment_about(&particles, &center).unwrap();
    let approx = moment.acceleration(&center, &position);
    assert!(relative_error(&approx, &exact) < 1e-12);
    assert_relative_eq!(
        moment.potential(&center, &position),
        exact_potential,
        max_relative = 1e-12
    );
}

#[test]
fn test_field_expansion_convergence() {
    let particles = cloud();
    let com = center_of_mass(&particles).unwrap();
    let center = *com.position();
    let position = [12.0, -8.0, 6.0];
    let exact = direct_acceleration(&particles, &position);
    let exact_potential = direct_potential(&particles, &position);

    let monopole: d3::DipoleMoment<f64> = moment_about(&particles, &center).unwrap();
    let quadrupole: d3::QuadrupoleMoment<f64> = moment_about(&particles, &center).unwrap();
    let octupole: d3::OctupoleMoment<f64> = moment_about(&particles, &center).unwrap();
    let hexadecupole: d3::HexadecupoleMoment<f64> = moment_about(&particles, &center).unwrap();

    let errors = [
        relative_error(&monopole.acceleration(&center, &position), &exact),
        relative_error(&quadrupole.acceleration(&center, &position), &exact),
        relative_error(&octupole.acceleration(&center, &position), &exact),
        relative_error(&hexadecupole.acceleration(&center, &position), &exact),
    ];
    assert!(errors[0] < 2e-2);
    assert!(errors[1] < 1e-3);
    assert!(errors[2] < 5e-5);
    assert!(errors[3] < 3e-6);
    assert!(errors[3] < errors[0]);

    let potential_error = |phi: f64| ((phi - exact_potential) / exact_potential).abs();
    assert!(potential_error(monopole.potential(&center, &position)) < 1e-2);
    assert!(potential_error(quadrupole.potential(&center, &position)) < 5e-4);
    assert!(potential_error(octupole.potential(&center, &position)) < 2e-5);
    assert!(potential_error(hexadecupole.potential(&center, &position)) < 1e-6);
}
