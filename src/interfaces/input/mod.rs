//! Input configuration of the `symtensor` binary.

use std::path::PathBuf;

use anyhow::{self, Context};
use serde::{Deserialize, Serialize};

use crate::drivers::gravity_approximation::{
    GravityApproximationDriver, GravityApproximationParams, GravityApproximationResult,
};
use crate::drivers::SymtensorDriver;
use crate::interfaces::InputHandle;
use crate::io::format::{
    log_macsec_begin, log_macsec_end, symtensor_error, symtensor_output, SymtensorOutput,
};
use crate::io::{read_symtensor_binary, SymtensorFileType};

#[cfg(test)]
#[path = "input_tests.rs"]
mod input_tests;

/// An enumerated type representing possible input kinds for gravity approximation from a YAML
/// input file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum GravityApproximationInputKind {
    /// Variant indicating that the parameters for the gravity approximation driver will be
    /// specified.
    Parameters(GravityApproximationParams),

    /// Variant indicating that previously saved gravity approximation results will be read in
    /// from a [`SymtensorFileType::Grav`] binary file and reported. The associated path gives the
    /// name of the file without its `.symtensor.grav` extension.
    FromFile(PathBuf),
}

impl Default for GravityApproximationInputKind {
    fn default() -> Self {
        GravityApproximationInputKind::Parameters(GravityApproximationParams::default())
    }
}

/// A structure containing `symtensor` input parameters which can be serialised into and
/// deserialised from a YAML input file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Input {
    /// Specification for gravity approximation. If `None`, no gravity approximation will be
    /// performed. If not `None`, then this either specifies the parameters for gravity
    /// approximation, or the name of a [`SymtensorFileType::Grav`] binary file containing saved
    /// results.
    ///
    /// # Default
    ///
    /// If not specified, this will be taken to be `None`.
    #[serde(default)]
    pub gravity_approximation: Option<GravityApproximationInputKind>,
}

impl Default for Input {
    fn default() -> Self {
        Input {
            gravity_approximation: Some(GravityApproximationInputKind::default()),
        }
    }
}

impl InputHandle for Input {
    fn handle(&self) -> Result<(), anyhow::Error> {
        let Some(ga_input) = self.gravity_approximation.as_ref() else {
            symtensor_output!("No calculations requested.");
            return Ok(());
        };

        log_macsec_begin("Gravity approximation");
        symtensor_output!("");
        let ga_res = match ga_input {
            GravityApproximationInputKind::Parameters(ga_params) => {
                GravityApproximationDriver::builder()
                    .parameters(ga_params)
                    .build()
                    .map_err(anyhow::Error::from)
                    .and_then(|mut ga_driver| ga_driver.run())
            }
            GravityApproximationInputKind::FromFile(name) => {
                read_symtensor_binary::<GravityApproximationResult, _>(name, SymtensorFileType::Grav)
                    .with_context(|| {
                        format!(
                            "Unable to read `{}.{}`",
                            name.display(),
                            SymtensorFileType::Grav.ext()
                        )
                    })
                    .map(|res| {
                        symtensor_output!("Gravity approximation results read from file.");
                        symtensor_output!("");
                        res.log_output_display();
                    })
            }
        };
        symtensor_output!("");
        log_macsec_end("Gravity approximation");
        symtensor_output!("");

        ga_res.map_err(|err| {
            symtensor_error!("Gravity approximation failed: {err}");
            err
        })
    }
}
