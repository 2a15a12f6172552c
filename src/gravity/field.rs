//! Gravitational fields of point masses, by direct summation and by multipole expansion.
//!
//! Units are chosen so that the gravitational constant is one. For a set of point masses with
//! total mass $`M`$ and mass-averaged moments $`\mathbf{Q}^{(n)}`$ about a centre
//! $`\mathbf{c}`$, the field at $`\mathbf{x}`$ with $`\mathbf{R} = \mathbf{x} - \mathbf{c}`$ is
//! approximated by
//!
//! ```math
//! \phi(\mathbf{x}) \approx -M \sum_n \frac{(-1)^n}{n!} \mathbf{D}^{(n)}(\mathbf{R}) \cdot \mathbf{Q}^{(n)},
//! \qquad
//! \mathbf{a}(\mathbf{x}) \approx M \sum_n \frac{(-1)^n}{n!} \mathbf{D}^{(n+1)}(\mathbf{R}) \cdot \mathbf{Q}^{(n)},
//! ```
//!
//! where $`\mathbf{D}^{(0)} = 1/R`$, $`\mathbf{Q}^{(0)} = 1`$, and the dot contracts all indices
//! of $`\mathbf{Q}^{(n)}`$ with the trailing indices of the derivative tensor.

use std::fmt;

use anyhow::{self, ensure};
use serde::{Deserialize, Serialize};

use crate::gravity::{cast, length, Derivatives, Direct, GravityScalar, Order};
use crate::multipole::{d3, CartesianPowers, MultipoleMoment, ScalarBroadcast};
use crate::tensor::d3::Rank1;

// ==================
// Struct definitions
// ==================

/// A point mass in three dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointMass<S> {
    /// The mass.
    mass: S,

    /// The position.
    position: [S; 3],
}

impl<S: Copy> PointMass<S> {
    /// Constructs a point mass.
    pub fn new(mass: S, position: [S; 3]) -> Self {
        Self { mass, position }
    }

    /// Returns the mass.
    pub fn mass(&self) -> S {
        self.mass
    }

    /// Returns the position.
    pub fn position(&self) -> &[S; 3] {
        &self.position
    }
}

impl<S: fmt::Display> fmt::Display for PointMass<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(6);
        write!(
            f,
            "m = {:.precision$} at ({:+.precision$}, {:+.precision$}, {:+.precision$})",
            self.mass, self.position[0], self.position[1], self.position[2]
        )
    }
}

// =================
// Trait definitions
// =================

/// Trait for multipole moments that approximate the field of the masses they were built from.
pub trait FieldExpansion<S> {
    /// Returns the approximate acceleration at `position` for a moment taken about `center`.
    fn acceleration(&self, center: &[S; 3], position: &[S; 3]) -> [S; 3];

    /// Returns the approximate potential at `position` for a moment taken about `center`.
    fn potential(&self, center: &[S; 3], position: &[S; 3]) -> S;
}

// =========
// Functions
// =========

fn difference<S: GravityScalar>(a: &[S; 3], b: &[S; 3]) -> [S; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Computes the acceleration at `position` by summing over every point mass. A mass located
/// exactly at `position` is skipped.
pub fn direct_acceleration<S: GravityScalar>(particles: &[PointMass<S>], position: &[S; 3]) -> [S; 3] {
    particles
        .iter()
        .fold([S::zero(); 3], |mut acc, particle| {
            let separation = difference(&particle.position, position);
            let distance = length(&separation);
            if distance > S::zero() {
                let factor = particle.mass / (distance * distance * distance);
                acc.iter_mut()
                    .zip(separation.iter())
                    .for_each(|(a, &s)| *a = *a + factor * s);
            }
            acc
        })
}

/// Computes the potential at `position` by summing over every point mass. A mass located
/// exactly at `position` is skipped.
pub fn direct_potential<S: GravityScalar>(particles: &[PointMass<S>], position: &[S; 3]) -> S {
    particles.iter().fold(S::zero(), |acc, particle| {
        let distance = length(&difference(&particle.position, position));
        if distance > S::zero() {
            acc - particle.mass / distance
        } else {
            acc
        }
    })
}

/// Computes the total mass and the centre of mass of a set of point masses.
///
/// # Errors
///
/// Errors if the set is empty or its total mass is zero.
pub fn center_of_mass<S: GravityScalar>(
    particles: &[PointMass<S>],
) -> Result<PointMass<S>, anyhow::Error> {
    ensure!(
        !particles.is_empty(),
        "Unable to find the centre of mass of an empty set of point masses."
    );
    let (mass, weighted) = particles.iter().fold(
        (S::zero(), [S::zero(); 3]),
        |(mass, mut weighted), particle| {
            weighted
                .iter_mut()
                .zip(particle.position.iter())
                .for_each(|(w, &p)| *w = *w + particle.mass * p);
            (mass + particle.mass, weighted)
        },
    );
    ensure!(
        mass != S::zero(),
        "Unable to find the centre of mass of point masses with zero total mass."
    );
    Ok(PointMass::new(mass, weighted.map(|w| w / mass)))
}

/// Computes the multipole moment of a set of point masses about `center`: the total mass and the
/// mass-averaged cartesian powers of the positions relative to `center`.
///
/// # Errors
///
/// Errors if the set is empty or its total mass is zero.
pub fn moment_about<S, T>(
    particles: &[PointMass<S>],
    center: &[S; 3],
) -> Result<MultipoleMoment<S, T>, anyhow::Error>
where
    S: GravityScalar,
    T: ScalarBroadcast<S> + CartesianPowers<[S; 3]>,
{
    ensure!(
        !particles.is_empty(),
        "Unable to compute the multipole moment of an empty set of point masses."
    );
    particles
        .iter()
        .map(|particle| {
            MultipoleMoment::<S, T>::from_point_mass(
                particle.mass,
                &difference(&particle.position, center),
            )
            .mass_weighted()
        })
        .sum::<MultipoleMoment<S, T>>()
        .mass_normalized()
}

// =====================
// Trait implementations
// =====================

impl<S: GravityScalar> FieldExpansion<S> for d3::DipoleMoment<S> {
    fn acceleration(&self, center: &[S; 3], position: &[S; 3]) -> [S; 3] {
        let r = difference(position, center);
        let (d1, d2) = <Order<2> as Derivatives<Direct, S>>::derivatives(&r).into_tensors();
        let (mass, (q1,)) = self.into_parts();

        let d2_q1: Rank1<S> = d2.contract(&q1);
        ((d1 - d2_q1) * mass).into_array()
    }

    fn potential(&self, center: &[S; 3], position: &[S; 3]) -> S {
        let r = difference(position, center);
        let (d1,) = <Order<1> as Derivatives<Direct, S>>::derivatives(&r).into_tensors();
        let (mass, (q1,)) = self.into_parts();

        -mass * (length(&r).recip() - d1.inner(&q1))
    }
}

impl<S: GravityScalar> FieldExpansion<S> for d3::QuadrupoleMoment<S> {
    fn acceleration(&self, center: &[S; 3], position: &[S; 3]) -> [S; 3] {
        let r = difference(position, center);
        let (d1, d2, d3) = <Order<3> as Derivatives<Direct, S>>::derivatives(&r).into_tensors();
        let (mass, (q1, q2)) = self.into_parts();
        let half = cast::<S>(0.5);

        let d2_q1: Rank1<S> = d2.contract(&q1);
        let d3_q2: Rank1<S> = d3.contract(&q2);
        ((d1 - d2_q1 + d3_q2 * half) * mass).into_array()
    }

    fn potential(&self, center: &[S; 3], position: &[S; 3]) -> S {
        let r = difference(position, center);
        let (d1, d2) = <Order<2> as Derivatives<Direct, S>>::derivatives(&r).into_tensors();
        let (mass, (q1, q2)) = self.into_parts();
        let half = cast::<S>(0.5);

        -mass * (length(&r).recip() - d1.inner(&q1) + d2.inner(&q2) * half)
    }
}

impl<S: GravityScalar> FieldExpansion<S> for d3::OctupoleMoment<S> {
    fn acceleration(&self, center: &[S; 3], position: &[S; 3]) -> [S; 3] {
        let r = difference(position, center);
        let (d1, d2, d3, d4) =
            <Order<4> as Derivatives<Direct, S>>::derivatives(&r).into_tensors();
        let (mass, (q1, q2, q3)) = self.into_parts();
        let half = cast::<S>(0.5);
        let sixth = cast::<S>(6.0).recip();

        let d2_q1: Rank1<S> = d2.contract(&q1);
        let d3_q2: Rank1<S> = d3.contract(&q2);
        let d4_q3: Rank1<S> = d4.contract(&q3);
        ((d1 - d2_q1 + d3_q2 * half - d4_q3 * sixth) * mass).into_array()
    }

    fn potential(&self, center: &[S; 3], position: &[S; 3]) -> S {
        let r = difference(position, center);
        let (d1, d2, d3) = <Order<3> as Derivatives<Direct, S>>::derivatives(&r).into_tensors();
        let (mass, (q1, q2, q3)) = self.into_parts();
        let half = cast::<S>(0.5);
        let sixth = cast::<S>(6.0).recip();

        -mass
            * (length(&r).recip() - d1.inner(&q1) + d2.inner(&q2) * half
                - d3.inner(&q3) * sixth)
    }
}

impl<S: GravityScalar> FieldExpansion<S> for d3::HexadecupoleMoment<S> {
    fn acceleration(&self, center: &[S; 3], position: &[S; 3]) -> [S; 3] {
        let r = difference(position, center);
        let (d1, d2, d3, d4, d5) =
            <Order<5> as Derivatives<Direct, S>>::derivatives(&r).into_tensors();
        let (mass, (q1, q2, q3, q4)) = self.into_parts();
        let half = cast::<S>(0.5);
        let sixth = cast::<S>(6.0).recip();
        let twenty_fourth = cast::<S>(24.0).recip();

        let d2_q1: Rank1<S> = d2.contract(&q1);
        let d3_q2: Rank1<S> = d3.contract(&q2);
        let d4_q3: Rank1<S> = d4.contract(&q3);
        let d5_q4: Rank1<S> = d5.contract(&q4);
        ((d1 - d2_q1 + d3_q2 * half - d4_q3 * sixth + d5_q4 * twenty_fourth) * mass)
            .into_array()
    }

    fn potential(&self, center: &[S; 3], position: &[S; 3]) -> S {
        let r = difference(position, center);
        let (d1, d2, d3, d4) =
            <Order<4> as Derivatives<Direct, S>>::derivatives(&r).into_tensors();
        let (mass, (q1, q2, q3, q4)) = self.into_parts();
        let half = cast::<S>(0.5);
        let sixth = cast::<S>(6.0).recip();
        let twenty_fourth = cast::<S>(24.0).recip();

        -mass
            * (length(&r).recip() - d1.inner(&q1) + d2.inner(&q2) * half - d3.inner(&q3) * sixth
                + d4.inner(&q4) * twenty_fourth)
    }
}
