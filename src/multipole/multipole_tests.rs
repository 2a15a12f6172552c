use approx::assert_relative_eq;

use crate::multipole::{d2, d3, Multipole};
use crate::tensor::d3::{Rank1, Rank2, Rank3};

#[test]
fn test_multipole_construction() {
    let zeros = d3::Octupole::<f64>::zeros();
    assert_eq!(zeros, d3::Octupole::default());
    assert_eq!(*zeros.tensor::<3>(), Rank3::zeros());
    assert_eq!(d3::Octupole::<f64>::ORDER, 3);
    assert_eq!(d3::Triacontadipole::<f32>::ORDER, 5);
    assert_eq!(d3::QuadrupoleMoment::<f64>::ORDER, 2);

    let v = [1.0, 2.0, 3.0];
    let a = d3::Octupole::from_vector(&v);
    assert_eq!(a.tensor::<1>().into_array(), v);
    assert_eq!(
        a.tensor::<2>().into_array(),
        [1.0, 2.0, 3.0, 4.0, 6.0, 9.0]
    );
    assert_eq!(*a.tensor::<3>(), Rank3::cartesian_power(&v));

    let (a1, a2, a3) = a.into_tensors();
    assert_eq!(a1, Rank1::new(v));
    assert_eq!(a2, Rank2::cartesian_power(&v));
    assert_eq!(a3, Rank3::cartesian_power(&v));

    let b = Multipole::new((a1, a2));
    let c: d3::Quadrupole<f64> = b;
    assert_eq!(*c.tensors(), (a1, a2));

    let mut d = d2::Quadrupole::<f64>::zeros();
    d.tensor_mut::<2>()[[0, 1]] = 4.0;
    assert_eq!(d.tensor::<2>().into_array(), [0.0, 4.0, 0.0]);
}

#[test]
fn test_multipole_arithmetic() {
    let a = d3::Quadrupole::from_vector(&[1.0, 2.0, 3.0]);
    let b = d3::Quadrupole::from_vector(&[1.0, 0.0, -1.0]);

    let sum = a + b;
    assert_eq!(sum.tensor::<1>().into_array(), [2.0, 2.0, 2.0]);
    assert_eq!(
        sum.tensor::<2>().into_array(),
        [2.0, 2.0, 2.0, 4.0, 6.0, 10.0]
    );
    assert_eq!(sum - b, a);

    let shifted = a + 1.0_f64;
    assert_eq!(shifted.tensor::<1>().into_array(), [2.0, 3.0, 4.0]);
    assert_eq!((shifted - 1.0_f64), a);
    let scaled = a * 2.0_f64;
    assert_eq!(scaled.tensor::<2>().into_array(), [2.0, 4.0, 6.0, 8.0, 12.0, 18.0]);
    assert_eq!(scaled / 2.0_f64, a);

    let mut c = a;
    c += b;
    c -= a;
    assert_eq!(c, b);
    c *= 3.0_f64;
    c /= 3.0_f64;
    c += 0.5_f64;
    c -= 0.5_f64;
    assert_eq!(c, b);

    let total: d3::Quadrupole<f64> = vec![a, b, a].into_iter().sum();
    assert_eq!(total, a * 2.0_f64 + b);

    let f = d3::Dipole::from_vector(&[1.0f32, 2.0, 3.0]) * 2.0f32;
    assert_eq!(f.tensor::<1>().into_array(), [2.0, 4.0, 6.0]);
}

#[test]
fn test_multipole_moment_point_mass() {
    let m = d3::QuadrupoleMoment::from_point_mass(1.0, &[1.0, 2.0, 3.0]);
    assert_eq!(m.scalar(), 1.0);
    assert_eq!(m.tensor::<1>().into_array(), [1.0, 2.0, 3.0]);
    assert_eq!(
        m.tensor::<2>().into_array(),
        [1.0, 2.0, 3.0, 4.0, 6.0, 9.0]
    );

    // The tensors do not depend on the mass.
    let heavy = d3::QuadrupoleMoment::from_point_mass(5.0, &[1.0, 2.0, 3.0]);
    assert_eq!(heavy.scalar(), 5.0);
    assert_eq!(heavy.tensors(), m.tensors());

    let (mass, (t1, t2)) = heavy.into_parts();
    assert_eq!(mass, 5.0);
    assert_eq!(t1, *m.tensor::<1>());
    assert_eq!(t2, *m.tensor::<2>());
}

#[test]
fn test_multipole_moment_arithmetic() {
    let a = d3::QuadrupoleMoment::from_point_mass(2.0, &[1.0, 0.0, 0.0]);
    let b = d3::QuadrupoleMoment::from_point_mass(3.0, &[0.0, 1.0, 0.0]);

    // Scalar operators act on the rank-0 value as well.
    let doubled = a * 2.0_f64;
    assert_eq!(doubled.scalar(), 4.0);
    assert_eq!(doubled.tensor::<1>().into_array(), [2.0, 0.0, 0.0]);
    let shifted = a - 1.0_f64;
    assert_eq!(shifted.scalar(), 1.0);
    assert_eq!(shifted.tensor::<1>().into_array(), [0.0, -1.0, -1.0]);
    assert_eq!((shifted + 1.0_f64), a);
    assert_eq!((doubled / 2.0_f64), a);

    let sum = a + b;
    assert_eq!(sum.scalar(), 5.0);
    assert_eq!(sum.tensor::<1>().into_array(), [1.0, 1.0, 0.0]);
    assert_eq!(sum - b, a);

    let mut c = d3::QuadrupoleMoment::<f64>::zeros();
    c += a;
    c *= 3.0;
    c /= 3.0;
    c -= a;
    assert_eq!(c, d3::QuadrupoleMoment::default());
}

#[test]
fn test_multipole_moment_mass_weighting() {
    let points = [
        (1.0, [1.0, 0.0, 0.0]),
        (3.0, [-1.0, 2.0, 0.0]),
        (4.0, [0.0, 0.0, 2.0]),
    ];
    let weighted: d3::OctupoleMoment<f64> = points
        .iter()
        .map(|(mass, position)| {
            d3::OctupoleMoment::from_point_mass(*mass, position).mass_weighted()
        })
        .sum();
    assert_eq!(weighted.scalar(), 8.0);
    assert_eq!(weighted.tensor::<1>().into_array(), [-2.0, 6.0, 8.0]);

    let averaged = weighted.mass_normalized().unwrap();
    assert_eq!(averaged.scalar(), 8.0);
    assert_relative_eq!(
        *averaged.tensor::<1>(),
        Rank1::new([-0.25, 0.75, 1.0]),
        max_relative = 1e-14
    );
    // <x x> = (1 + 3) / 8, <y y> = 12 / 8, <z z> = 16 / 8, <x y> = -6 / 8.
    assert_relative_eq!(
        *averaged.tensor::<2>(),
        Rank2::new([0.5, -0.75, 0.0, 1.5, 0.0, 2.0]),
        max_relative = 1e-14
    );

    let scaled = averaged.scale_tensors(2.0);
    assert_eq!(scaled.scalar(), 8.0);
    assert_relative_eq!(
        *scaled.tensor::<1>(),
        Rank1::new([-0.5, 1.5, 2.0]),
        max_relative = 1e-14
    );

    assert!(d3::DipoleMoment::<f64>::zeros().mass_normalized().is_err());
}

#[test]
fn test_multipole_integer_scalar_broadcast() {
    let a: d3::Quadrupole<i32> = d3::Quadrupole::from_vector(&[1, 2, 3]);
    let shifted: d3::Quadrupole<i32> = a + 1_i32;
    assert_eq!(shifted.tensor::<1>().into_array(), [2, 3, 4]);
    assert_eq!(shifted.tensor::<2>().into_array(), [2, 3, 4, 5, 7, 10]);
    assert_eq!(shifted - 1_i32, a);
    assert_eq!((a * 4_i32) / 2_i32, a * 2_i32);

    let mut m: d2::DipoleMoment<u32> = d2::DipoleMoment::from_point_mass(3, &[2, 5]);
    m *= 2_u32;
    assert_eq!(m.scalar(), 6);
    assert_eq!(m.tensor::<1>().into_array(), [4, 10]);
    assert_eq!(m.mass_weighted().tensor::<1>().into_array(), [24, 60]);
}

#[test]
fn test_multipole_triacontadipole_moment() {
    let m: d3::TriacontadipoleMoment<f64> =
        d3::TriacontadipoleMoment::from_point_mass(2.0, &[1.0, -1.0, 2.0]);
    assert_eq!(d3::TriacontadipoleMoment::<f64>::ORDER, 5);
    assert_eq!(m.tensor::<5>().into_array().len(), 21);
    // x^3 y z at canonical index [X, X, X, Y, Z].
    assert_eq!(m.tensor::<5>()[[0, 0, 0, 1, 2]], -2.0);
    assert_eq!(m.mass_weighted().tensor::<5>()[[2, 2, 2, 2, 2]], 64.0);

    let planar: d2::TriacontadipoleMoment<f64> =
        d2::TriacontadipoleMoment::from_point_mass(1.0, &[2.0, 1.0]);
    assert_eq!(planar.tensor::<5>().into_array(), [32.0, 16.0, 8.0, 4.0, 2.0, 1.0]);
}

#[test]
fn test_multipole_serde() {
    let m = d3::QuadrupoleMoment::from_point_mass(2.0, &[1.0, 2.0, 3.0]);
    let yaml = serde_yaml::to_string(&m).unwrap();
    let n: d3::QuadrupoleMoment<f64> = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(m, n);
}
