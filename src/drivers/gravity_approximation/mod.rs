//! Driver for assessing multipole approximations of gravitational fields in `symtensor`.
//!
//! A cloud of point masses is expanded into multipole moments of increasing order about its
//! centre of mass. The approximate accelerations and potentials from every expansion are then
//! compared against direct summation over the point masses at sample positions far from the
//! cloud. Higher-order expansions are expected to give smaller errors.

use std::fmt;
use std::path::PathBuf;

use anyhow::{self, ensure, format_err};
use derive_builder::Builder;
use itertools::Itertools;
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::drivers::SymtensorDriver;
use crate::gravity::field::{
    center_of_mass, direct_acceleration, direct_potential, moment_about, FieldExpansion,
    PointMass,
};
use crate::gravity::validation::cross_validate_derivatives;
use crate::io::format::{
    log_subtitle, log_title, nice_bool, symtensor_output, write_subtitle, SymtensorOutput,
};
use crate::io::{write_symtensor_binary, SymtensorFileType};
use crate::multipole::d3;


// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

fn default_true() -> bool {
    true
}
fn default_n_particles() -> usize {
    10
}
fn default_n_samples() -> usize {
    10000
}
fn default_seed() -> u64 {
    3
}
fn default_particle_extent() -> f64 {
    1.0
}
fn default_mass_range() -> (f64, f64) {
    (0.1, 1.0)
}
fn default_sample_extent() -> f64 {
    10.0
}
fn default_min_sample_distance() -> f64 {
    4.0
}
fn default_derivative_tolerance() -> f64 {
    1e-10
}

/// Structure containing control parameters for gravity approximation.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct GravityApproximationParams {
    /// The number of randomly generated point masses. This is ignored when point masses are
    /// supplied to the driver.
    #[builder(default = "10")]
    #[serde(default = "default_n_particles")]
    pub n_particles: usize,

    /// The number of randomly generated sample positions at which the field is evaluated.
    #[builder(default = "10000")]
    #[serde(default = "default_n_samples")]
    pub n_samples: usize,

    /// The seed of the random number generator.
    #[builder(default = "3")]
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// The half-width of the cube, centred at the origin, in which point masses are generated.
    #[builder(default = "1.0")]
    #[serde(default = "default_particle_extent")]
    pub particle_extent: f64,

    /// The lower and upper bounds of the generated masses.
    #[builder(default = "(0.1, 1.0)")]
    #[serde(default = "default_mass_range")]
    pub mass_range: (f64, f64),

    /// The half-width of the cube, centred at the centre of mass, in which sample positions are
    /// generated.
    #[builder(default = "10.0")]
    #[serde(default = "default_sample_extent")]
    pub sample_extent: f64,

    /// The smallest distance between a sample position and the centre of mass. Sample positions
    /// closer than this are rejected and regenerated.
    #[builder(default = "4.0")]
    #[serde(default = "default_min_sample_distance")]
    pub min_sample_distance: f64,

    /// Boolean indicating if the derivative backends are cross-validated before the field is
    /// evaluated.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub validate_derivatives: bool,

    /// The relative tolerance for cross-validating the derivative backends.
    #[builder(default = "1e-10")]
    #[serde(default = "default_derivative_tolerance")]
    pub derivative_tolerance: f64,

    /// Optional name for saving the result as a binary file of type
    /// [`SymtensorFileType::Grav`]. If `None`, the result will not be saved.
    #[builder(default = "None")]
    #[serde(default)]
    pub result_save_name: Option<PathBuf>,
}

impl GravityApproximationParams {
    /// Returns a builder to construct a [`GravityApproximationParams`] structure.
    pub fn builder() -> GravityApproximationParamsBuilder {
        GravityApproximationParamsBuilder::default()
    }
}

impl Default for GravityApproximationParams {
    fn default() -> Self {
        Self::builder()
            .build()
            .expect("Unable to construct a default `GravityApproximationParams`.")
    }
}

impl fmt::Display for GravityApproximationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of generated point masses: {}", self.n_particles)?;
        writeln!(f, "Point mass extent: ±{:.3}", self.particle_extent)?;
        writeln!(
            f,
            "Mass range: [{:.3}, {:.3}]",
            self.mass_range.0, self.mass_range.1
        )?;
        writeln!(f, "Number of sample positions: {}", self.n_samples)?;
        writeln!(f, "Sample extent: ±{:.3}", self.sample_extent)?;
        writeln!(
            f,
            "Minimum sample distance from centre of mass: {:.3}",
            self.min_sample_distance
        )?;
        writeln!(f, "Random seed: {}", self.seed)?;
        writeln!(f)?;
        writeln!(
            f,
            "Cross-validate derivative backends: {}",
            if self.validate_derivatives {
                format!("yes (tolerance: {:.3e})", self.derivative_tolerance)
            } else {
                nice_bool(false)
            }
        )?;
        writeln!(
            f,
            "Save gravity approximation results to file: {}",
            if let Some(name) = self.result_save_name.as_ref() {
                let mut path = name.clone();
                path.set_extension(SymtensorFileType::Grav.ext());
                path.display().to_string()
            } else {
                nice_bool(false)
            }
        )?;
        writeln!(f)?;

        Ok(())
    }
}

// ------
// Result
// ------

/// An enumerated type for the multipole expansions compared against direct summation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpansionKind {
    /// The field of the total mass placed at the centre of mass.
    Monopole,

    /// The expansion up to the quadrupole moment.
    Quadrupole,

    /// The expansion up to the octupole moment.
    Octupole,

    /// The expansion up to the hexadecupole moment.
    Hexadecupole,
}

impl ExpansionKind {
    /// All expansion kinds in order of increasing expansion order.
    pub const ALL: [ExpansionKind; 4] = [
        ExpansionKind::Monopole,
        ExpansionKind::Quadrupole,
        ExpansionKind::Octupole,
        ExpansionKind::Hexadecupole,
    ];

    /// Returns the highest moment rank retained by the expansion.
    pub fn order(&self) -> usize {
        match self {
            ExpansionKind::Monopole => 0,
            ExpansionKind::Quadrupole => 2,
            ExpansionKind::Octupole => 3,
            ExpansionKind::Hexadecupole => 4,
        }
    }
}

impl fmt::Display for ExpansionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpansionKind::Monopole => write!(f, "Monopole"),
            ExpansionKind::Quadrupole => write!(f, "Quadrupole"),
            ExpansionKind::Octupole => write!(f, "Octupole"),
            ExpansionKind::Hexadecupole => write!(f, "Hexadecupole"),
        }
    }
}

/// Structure containing the relative errors of one expansion over all sample positions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpansionError {
    /// The mean relative error of the acceleration.
    pub mean_acceleration_error: f64,

    /// The maximum relative error of the acceleration.
    pub max_acceleration_error: f64,

    /// The mean relative error of the potential.
    pub mean_potential_error: f64,

    /// The maximum relative error of the potential.
    pub max_potential_error: f64,
}

/// Structure to contain gravity approximation results.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct GravityApproximationResult {
    /// The control parameters used to obtain this set of results.
    pub parameters: GravityApproximationParams,

    /// The point masses whose field has been approximated.
    pub particles: Vec<PointMass<f64>>,

    /// The total mass and centre of mass of the point masses.
    pub center_of_mass: PointMass<f64>,

    /// The errors of every expansion, in order of increasing expansion order.
    pub errors: Vec<(ExpansionKind, ExpansionError)>,
}

impl GravityApproximationResult {
    /// Returns a builder to construct a [`GravityApproximationResult`] structure.
    fn builder() -> GravityApproximationResultBuilder {
        GravityApproximationResultBuilder::default()
    }

    /// Returns the errors of the expansion of kind `kind`, if it has been evaluated.
    pub fn error(&self, kind: ExpansionKind) -> Option<&ExpansionError> {
        self.errors
            .iter()
            .find_map(|(k, error)| if *k == kind { Some(error) } else { None })
    }
}

impl fmt::Display for GravityApproximationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_subtitle(f, "Relative errors against direct summation")?;
        writeln!(f)?;
        writeln!(f, "{}", "┈".repeat(75))?;
        writeln!(
            f,
            " {:<12}  {:>5}  {:>12}  {:>12}  {:>12}  {:>12}",
            "Expansion", "Order", "Mean |Δa|/|a|", "Max |Δa|/|a|", "Mean |Δφ/φ|", "Max |Δφ/φ|"
        )?;
        writeln!(f, "{}", "┈".repeat(75))?;
        for (kind, error) in self.errors.iter() {
            writeln!(
                f,
                " {:<12}  {:>5}  {:>12.3e}  {:>12.3e}  {:>12.3e}  {:>12.3e}",
                kind.to_string(),
                kind.order(),
                error.mean_acceleration_error,
                error.max_acceleration_error,
                error.mean_potential_error,
                error.max_potential_error,
            )?;
        }
        writeln!(f, "{}", "┈".repeat(75))?;
        Ok(())
    }
}

// ------
// Driver
// ------

/// Driver for gravity approximation in `symtensor`.
#[derive(Clone, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct GravityApproximationDriver<'a> {
    /// The control parameters for gravity approximation.
    parameters: &'a GravityApproximationParams,

    /// Optional point masses whose field is approximated. If `None`, point masses are generated
    /// randomly from the control parameters.
    #[builder(default = "None")]
    particles: Option<&'a [PointMass<f64>]>,

    /// The result of the gravity approximation.
    #[builder(setter(skip), default = "None")]
    result: Option<GravityApproximationResult>,
}

impl<'a> GravityApproximationDriverBuilder<'a> {
    fn validate(&self) -> Result<(), String> {
        let params = self
            .parameters
            .ok_or("No gravity approximation parameters found.".to_string())?;
        if params.n_samples == 0 {
            return Err("At least one sample position is required.".to_string());
        }
        if params.particle_extent <= 0.0 || params.sample_extent <= 0.0 {
            return Err("The particle and sample extents must be positive.".to_string());
        }
        if params.min_sample_distance < 0.0 || params.min_sample_distance >= params.sample_extent
        {
            return Err(format!(
                "The minimum sample distance, `{:.3}`, must be non-negative and smaller than the \
                    sample extent, `{:.3}`.",
                params.min_sample_distance, params.sample_extent
            ));
        }
        if params.mass_range.0 <= 0.0 || params.mass_range.0 > params.mass_range.1 {
            return Err(format!(
                "Invalid mass range: `[{:.3}, {:.3}]`.",
                params.mass_range.0, params.mass_range.1
            ));
        }
        if params.derivative_tolerance < 0.0 {
            return Err("The derivative tolerance cannot be negative.".to_string());
        }
        match self.particles {
            Some(Some(particles)) if particles.is_empty() => {
                Err("The supplied set of point masses is empty.".to_string())
            }
            Some(Some(_)) => Ok(()),
            _ if params.n_particles == 0 => {
                Err("At least one point mass must be generated.".to_string())
            }
            _ => Ok(()),
        }
    }
}

impl<'a> GravityApproximationDriver<'a> {
    /// Returns a builder to construct a [`GravityApproximationDriver`] structure.
    pub fn builder() -> GravityApproximationDriverBuilder<'a> {
        GravityApproximationDriverBuilder::default()
    }

    /// Generates point masses uniformly in a cube centred at the origin.
    fn generate_particles(&self, rng: &mut StdRng) -> Vec<PointMass<f64>> {
        let params = self.parameters;
        let extent = params.particle_extent;
        let (min_mass, max_mass) = params.mass_range;
        (0..params.n_particles)
            .map(|_| {
                let position = [
                    rng.gen_range(-extent..=extent),
                    rng.gen_range(-extent..=extent),
                    rng.gen_range(-extent..=extent),
                ];
                PointMass::new(rng.gen_range(min_mass..=max_mass), position)
            })
            .collect()
    }

    /// Generates sample positions uniformly in a cube centred at `center`, rejecting those too
    /// close to `center`.
    fn generate_samples(&self, rng: &mut StdRng, center: &[f64; 3]) -> Vec<[f64; 3]> {
        let params = self.parameters;
        let extent = params.sample_extent;
        let mut samples = Vec::with_capacity(params.n_samples);
        while samples.len() < params.n_samples {
            let offset = Vector3::new(
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
            );
            if offset.norm() >= params.min_sample_distance {
                samples.push([
                    center[0] + offset[0],
                    center[1] + offset[1],
                    center[2] + offset[2],
                ]);
            }
        }
        samples
    }

    /// Executes gravity approximation.
    fn approximate_gravity(&mut self) -> Result<(), anyhow::Error> {
        log_title("Gravity Approximation");
        symtensor_output!("");
        let params = self.parameters;
        params.log_output_display();

        let mut rng = StdRng::seed_from_u64(params.seed);
        let particles = match self.particles {
            Some(particles) => particles.to_vec(),
            None => self.generate_particles(&mut rng),
        };
        ensure!(
            !particles.is_empty(),
            "No point masses available for gravity approximation."
        );
        let com = center_of_mass(&particles)?;
        let center = *com.position();

        log_subtitle("Point masses");
        symtensor_output!("");
        particles
            .iter()
            .for_each(|particle| {
                symtensor_output!("  {particle:.6}");
            });
        symtensor_output!("");
        symtensor_output!("Total mass and centre of mass: {com:.6}");
        symtensor_output!("");

        let samples = self.generate_samples(&mut rng, &center);

        if params.validate_derivatives {
            log_subtitle("Derivative backend cross-validation");
            symtensor_output!("");
            let r = [
                samples[0][0] - center[0],
                samples[0][1] - center[1],
                samples[0][2] - center[2],
            ];
            cross_validate_derivatives(&r, params.derivative_tolerance)?;
            symtensor_output!(
                "Direct, einsum and tensorlib derivatives of orders 1 to 5 agree to within {:.3e}.",
                params.derivative_tolerance
            );
            symtensor_output!("");
        }

        let monopole: d3::DipoleMoment<f64> = moment_about(&particles, &center)?;
        let quadrupole: d3::QuadrupoleMoment<f64> = moment_about(&particles, &center)?;
        let octupole: d3::OctupoleMoment<f64> = moment_about(&particles, &center)?;
        let hexadecupole: d3::HexadecupoleMoment<f64> = moment_about(&particles, &center)?;
        log::debug!(
            "Quadrupole tensor about the centre of mass: {:#.6}",
            quadrupole.tensor::<2>()
        );

        let errors_per_sample = samples
            .par_iter()
            .map(|position| {
                let exact_acceleration = Vector3::from(direct_acceleration(&particles, position));
                let exact_potential = direct_potential(&particles, position);
                let approximations = [
                    (
                        monopole.acceleration(&center, position),
                        monopole.potential(&center, position),
                    ),
                    (
                        quadrupole.acceleration(&center, position),
                        quadrupole.potential(&center, position),
                    ),
                    (
                        octupole.acceleration(&center, position),
                        octupole.potential(&center, position),
                    ),
                    (
                        hexadecupole.acceleration(&center, position),
                        hexadecupole.potential(&center, position),
                    ),
                ];
                approximations.map(|(acceleration, potential)| {
                    (
                        (Vector3::from(acceleration) - exact_acceleration).norm()
                            / exact_acceleration.norm(),
                        ((potential - exact_potential) / exact_potential).abs(),
                    )
                })
            })
            .collect::<Vec<_>>();

        let n_samples_f64 = errors_per_sample.len() as f64;
        let errors = ExpansionKind::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                let (sum_a, max_a, sum_p, max_p) = errors_per_sample.iter().fold(
                    (0.0, 0.0_f64, 0.0, 0.0_f64),
                    |(sum_a, max_a, sum_p, max_p), sample_errors| {
                        let (err_a, err_p) = sample_errors[i];
                        (sum_a + err_a, max_a.max(err_a), sum_p + err_p, max_p.max(err_p))
                    },
                );
                (
                    *kind,
                    ExpansionError {
                        mean_acceleration_error: sum_a / n_samples_f64,
                        max_acceleration_error: max_a,
                        mean_potential_error: sum_p / n_samples_f64,
                        max_potential_error: max_p,
                    },
                )
            })
            .collect_vec();

        self.result = Some(
            GravityApproximationResult::builder()
                .parameters(params.clone())
                .particles(particles)
                .center_of_mass(com)
                .errors(errors)
                .build()?,
        );

        if let Some(res) = self.result.as_ref() {
            res.log_output_display();
            symtensor_output!("");
            if let Some(name) = params.result_save_name.as_ref() {
                write_symtensor_binary(name, SymtensorFileType::Grav, res)?;
                let mut path = name.clone();
                path.set_extension(SymtensorFileType::Grav.ext());
                symtensor_output!("Gravity approximation results saved as {}.", path.display());
                symtensor_output!("");
            }
        }

        Ok(())
    }
}

impl<'a> SymtensorDriver for GravityApproximationDriver<'a> {
    type Params = GravityApproximationParams;

    type Outcome = GravityApproximationResult;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No gravity approximation results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.approximate_gravity()
    }
}
