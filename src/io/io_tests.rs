use std::env;
use std::fs;

use crate::io::{read_symtensor_binary, read_symtensor_yaml, write_symtensor_binary, SymtensorFileType};
use crate::multipole::d3;
use crate::tensor::d3::Rank3;

#[test]
fn test_io_file_type_extension() {
    assert_eq!(SymtensorFileType::Grav.ext(), "symtensor.grav");
}

#[test]
fn test_io_binary() {
    let name = env::temp_dir().join("symtensor_test_io_binary");
    let moment = d3::OctupoleMoment::from_point_mass(2.5, &[1.0, -2.0, 0.5]);
    write_symtensor_binary(&name, SymtensorFileType::Grav, &moment).unwrap();
    let read_moment: d3::OctupoleMoment<f64> =
        read_symtensor_binary(&name, SymtensorFileType::Grav).unwrap();
    assert_eq!(read_moment, moment);

    let missing = env::temp_dir().join("symtensor_test_io_binary_missing");
    assert!(read_symtensor_binary::<d3::OctupoleMoment<f64>, _>(
        &missing,
        SymtensorFileType::Grav
    )
    .is_err());
}

#[test]
fn test_io_yaml() {
    let name = env::temp_dir().join("symtensor_test_io_yaml.yml");
    let tensor = Rank3::cartesian_power(&[1.0, 2.0, 3.0]);
    fs::write(&name, serde_yaml::to_string(&tensor).unwrap()).unwrap();
    let read_tensor: Rank3<f64> = read_symtensor_yaml(&name).unwrap();
    assert_eq!(read_tensor, tensor);

    let missing = env::temp_dir().join("symtensor_test_io_yaml_missing.yml");
    assert!(read_symtensor_yaml::<Rank3<f64>, _>(&missing).is_err());
}
