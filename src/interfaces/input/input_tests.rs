use std::env;

use crate::drivers::gravity_approximation::{GravityApproximationDriver, GravityApproximationParams};
use crate::drivers::SymtensorDriver;
use crate::interfaces::InputHandle;
use crate::io::read_symtensor_yaml;

use super::{GravityApproximationInputKind, Input};

const ROOT: &str = env!("CARGO_MANIFEST_DIR");

#[test]
fn test_interfaces_input_gravity_approximation_parameters() {
    let name = format!("{ROOT}/tests/input/gravity_approximation.yml");
    let inp = read_symtensor_yaml::<Input, _>(&name).unwrap();

    if let Some(GravityApproximationInputKind::Parameters(ga_params)) =
        inp.gravity_approximation.as_ref()
    {
        assert_eq!(ga_params.n_particles, 6);
        assert_eq!(ga_params.n_samples, 300);
        assert_eq!(ga_params.seed, 11);
        assert_eq!(ga_params.mass_range, (0.5, 2.0));
        assert_eq!(ga_params.min_sample_distance, 5.0);
        assert!(!ga_params.validate_derivatives);

        // Unspecified fields take their default values.
        assert_eq!(ga_params.particle_extent, 1.0);
        assert_eq!(ga_params.sample_extent, 10.0);
        assert_eq!(ga_params.derivative_tolerance, 1e-10);
        assert!(ga_params.result_save_name.is_none());
    } else {
        panic!("Expected gravity approximation parameters.");
    }

    assert!(inp.handle().is_ok());
}

#[test]
fn test_interfaces_input_gravity_approximation_fromfile() {
    let name = format!("{ROOT}/tests/input/gravity_approximation_fromfile.yml");
    let inp = read_symtensor_yaml::<Input, _>(&name).unwrap();
    if let Some(GravityApproximationInputKind::FromFile(path)) = inp.gravity_approximation.as_ref()
    {
        assert_eq!(path.to_str().unwrap(), "saved_gravity_approximation");
    } else {
        panic!("Expected a gravity approximation result file.");
    }

    let save_name = env::temp_dir().join("symtensor_test_interfaces_input_fromfile");
    let ga_params = GravityApproximationParams::builder()
        .n_samples(50)
        .validate_derivatives(false)
        .result_save_name(Some(save_name.clone()))
        .build()
        .unwrap();
    let mut ga_driver = GravityApproximationDriver::builder()
        .parameters(&ga_params)
        .build()
        .unwrap();
    assert!(ga_driver.run().is_ok());

    let inp = Input {
        gravity_approximation: Some(GravityApproximationInputKind::FromFile(save_name)),
    };
    assert!(inp.handle().is_ok());

    let missing = Input {
        gravity_approximation: Some(GravityApproximationInputKind::FromFile(
            env::temp_dir().join("symtensor_test_interfaces_input_fromfile_missing"),
        )),
    };
    assert!(missing.handle().is_err());
}

#[test]
fn test_interfaces_input_empty() {
    let inp: Input = serde_yaml::from_str("{}").unwrap();
    assert!(inp.gravity_approximation.is_none());
    assert!(inp.handle().is_ok());

    let inp = Input::default();
    if let Some(GravityApproximationInputKind::Parameters(ga_params)) =
        inp.gravity_approximation.as_ref()
    {
        assert_eq!(ga_params.n_samples, 10000);
    } else {
        panic!("Expected default gravity approximation parameters.");
    }
}

#[test]
fn test_interfaces_input_invalid_parameters() {
    let inp: Input = serde_yaml::from_str(
        "gravity_approximation: !Parameters\n  sample_extent: 2.0\n  min_sample_distance: 3.0\n",
    )
    .unwrap();
    assert!(inp.handle().is_err());
}
