use super::{check_positive, SolidKind};
use crate::error::ShapeError;
use crate::uniform::Uniform;
use crate::unit::UnitSphere;
use geom::prelude::*;
use geom::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::f32::consts::PI;

/// A solid ball without cuts, like `G4Orb`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrbParams")]
pub struct Orb {
    radius: f32,
}

#[derive(Deserialize)]
struct OrbParams {
    radius: f32,
}

impl TryFrom<OrbParams> for Orb {
    type Error = ShapeError;

    fn try_from(params: OrbParams) -> Result<Self, ShapeError> {
        Orb::new(params.radius)
    }
}

impl Orb {
    pub fn new(radius: f32) -> Result<Self, ShapeError> {
        let orb = Orb { radius };
        orb.validate()?;
        Ok(orb)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    fn validate(&self) -> Result<(), ShapeError> {
        check_positive(SolidKind::Orb, "radius", self.radius)
    }

    pub fn volume(&self) -> f32 {
        4.0 / 3.0 * PI * self.radius.powi(3)
    }

    pub fn surface_area(&self) -> f32 {
        4.0 * PI * self.radius * self.radius
    }

    pub(super) fn margin(&self, point: Vec3) -> f32 {
        point.magnitude() - self.radius
    }
}

impl Uniform for Orb {
    /// Scales the unit ball, which in volume mode is rejection sampled from
    /// the enclosing cube.
    fn uniform<R: Rng>(&self, rng: &mut R, on_surface: bool) -> Vec3 {
        UnitSphere.uniform(rng, on_surface) * self.radius
    }
}
