use super::{check_positive, choose_weighted, SolidKind};
use crate::error::ShapeError;
use crate::uniform::Uniform;
use geom::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// An axis-aligned box given by its half-lengths, like `G4Box`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoxParams")]
pub struct BoxSolid {
    half_x: f32,
    half_y: f32,
    half_z: f32,
}

/// Unchecked half-lengths as read from a configuration.
#[derive(Deserialize)]
struct BoxParams {
    half_x: f32,
    half_y: f32,
    half_z: f32,
}

impl TryFrom<BoxParams> for BoxSolid {
    type Error = ShapeError;

    fn try_from(params: BoxParams) -> Result<Self, ShapeError> {
        BoxSolid::new(params.half_x, params.half_y, params.half_z)
    }
}

impl BoxSolid {
    pub fn new(half_x: f32, half_y: f32, half_z: f32) -> Result<Self, ShapeError> {
        let solid = BoxSolid { half_x, half_y, half_z };
        solid.validate()?;
        Ok(solid)
    }

    pub fn half_lengths(&self) -> Vec3 {
        Vec3::new(self.half_x, self.half_y, self.half_z)
    }

    fn validate(&self) -> Result<(), ShapeError> {
        check_positive(SolidKind::Box, "half x", self.half_x)?;
        check_positive(SolidKind::Box, "half y", self.half_y)?;
        check_positive(SolidKind::Box, "half z", self.half_z)
    }

    pub fn volume(&self) -> f32 {
        8.0 * self.half_x * self.half_y * self.half_z
    }

    pub fn surface_area(&self) -> f32 {
        self.face_pair_areas().iter().sum()
    }

    /// Total area of the two faces normal to x, y and z, respectively.
    fn face_pair_areas(&self) -> [f32; 3] {
        [
            8.0 * self.half_y * self.half_z,
            8.0 * self.half_x * self.half_z,
            8.0 * self.half_x * self.half_y,
        ]
    }

    pub(super) fn margin(&self, point: Vec3) -> f32 {
        (point.x.abs() - self.half_x)
            .max(point.y.abs() - self.half_y)
            .max(point.z.abs() - self.half_z)
    }
}

impl Uniform for BoxSolid {
    fn uniform<R: Rng>(&self, rng: &mut R, on_surface: bool) -> Vec3 {
        let half = [self.half_x, self.half_y, self.half_z];
        let mut coords = [
            rng.gen_range(-half[0], half[0]),
            rng.gen_range(-half[1], half[1]),
            rng.gen_range(-half[2], half[2]),
        ];

        if on_surface {
            // Pick a pair of opposing faces by area, then one of the two
            let axis = choose_weighted(rng, &self.face_pair_areas());
            coords[axis] = if rng.gen() { half[axis] } else { -half[axis] };
        }

        Vec3::new(coords[0], coords[1], coords[2])
    }
}
