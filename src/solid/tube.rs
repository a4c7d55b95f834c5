use super::angle::{self, FULL_TURN};
use super::{check_phi, check_positive, check_radii, choose_weighted, SolidKind};
use crate::error::ShapeError;
use crate::uniform::Uniform;
use geom::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

fn full_phi() -> f32 {
    FULL_TURN
}

/// A cylindrical section around the z axis, like `G4Tubs`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TubeParams")]
pub struct Tube {
    inner_radius: f32,
    outer_radius: f32,
    half_z: f32,
    start_phi: f32,
    delta_phi: f32,
}

#[derive(Deserialize)]
struct TubeParams {
    #[serde(default)]
    inner_radius: f32,
    outer_radius: f32,
    half_z: f32,
    #[serde(default)]
    start_phi: f32,
    #[serde(default = "full_phi")]
    delta_phi: f32,
}

impl TryFrom<TubeParams> for Tube {
    type Error = ShapeError;

    fn try_from(params: TubeParams) -> Result<Self, ShapeError> {
        Tube::new(
            params.inner_radius,
            params.outer_radius,
            params.half_z,
            params.start_phi,
            params.delta_phi,
        )
    }
}

/// Parts of the tube boundary that surface sampling covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    OuterWall,
    InnerWall,
    TopCap,
    BottomCap,
}

const PIECES: [Piece; 4] = [Piece::OuterWall, Piece::InnerWall, Piece::TopCap, Piece::BottomCap];

impl Tube {
    pub fn new(
        inner_radius: f32,
        outer_radius: f32,
        half_z: f32,
        start_phi: f32,
        delta_phi: f32,
    ) -> Result<Self, ShapeError> {
        let tube = Tube {
            inner_radius,
            outer_radius,
            half_z,
            start_phi,
            delta_phi,
        };
        tube.validate()?;

        Ok(Tube {
            delta_phi: angle::normalize_delta_phi(delta_phi),
            ..tube
        })
    }

    /// Full solid cylinder.
    pub fn cylinder(radius: f32, half_z: f32) -> Result<Self, ShapeError> {
        Tube::new(0.0, radius, half_z, 0.0, FULL_TURN)
    }

    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    pub fn half_z(&self) -> f32 {
        self.half_z
    }

    fn validate(&self) -> Result<(), ShapeError> {
        check_radii(SolidKind::Tubs, self.inner_radius, self.outer_radius)?;
        check_positive(SolidKind::Tubs, "half z", self.half_z)?;
        check_phi(SolidKind::Tubs, self.start_phi, self.delta_phi)
    }

    fn delta_phi(&self) -> f32 {
        self.delta_phi.min(FULL_TURN)
    }

    /// Area of a single end cap.
    fn cap_area(&self) -> f32 {
        0.5 * self.delta_phi() * (self.outer_radius * self.outer_radius - self.inner_radius * self.inner_radius)
    }

    fn piece_areas(&self) -> [f32; 4] {
        let height = 2.0 * self.half_z;
        [
            self.delta_phi() * self.outer_radius * height,
            self.delta_phi() * self.inner_radius * height,
            self.cap_area(),
            self.cap_area(),
        ]
    }

    pub fn volume(&self) -> f32 {
        self.cap_area() * 2.0 * self.half_z
    }

    /// Area of the walls and end caps.
    pub fn surface_area(&self) -> f32 {
        self.piece_areas().iter().sum()
    }

    /// Radius with density proportional to `r`, as for a uniform annulus.
    fn sample_radius<R: Rng>(&self, rng: &mut R) -> f32 {
        let inner2 = self.inner_radius * self.inner_radius;
        let outer2 = self.outer_radius * self.outer_radius;
        (inner2 + (outer2 - inner2) * rng.gen::<f32>()).sqrt()
    }

    pub(super) fn margin(&self, point: Vec3) -> f32 {
        let rho = point.x.hypot(point.y);
        let mut margin = (rho - self.outer_radius).max(point.z.abs() - self.half_z);

        if self.inner_radius > 0.0 {
            margin = margin.max(self.inner_radius - rho);
        }

        margin.max(angle::phi_margin(point.x, point.y, self.start_phi, self.delta_phi))
    }
}

impl Uniform for Tube {
    fn uniform<R: Rng>(&self, rng: &mut R, on_surface: bool) -> Vec3 {
        let (radius, z) = if on_surface {
            // Inner wall has zero area without an inner radius and is never chosen
            match PIECES[choose_weighted(rng, &self.piece_areas())] {
                Piece::OuterWall => (self.outer_radius, rng.gen_range(-self.half_z, self.half_z)),
                Piece::InnerWall => (self.inner_radius, rng.gen_range(-self.half_z, self.half_z)),
                Piece::TopCap => (self.sample_radius(rng), self.half_z),
                Piece::BottomCap => (self.sample_radius(rng), -self.half_z),
            }
        } else {
            (self.sample_radius(rng), rng.gen_range(-self.half_z, self.half_z))
        };

        let phi = angle::sample_phi(rng, self.start_phi, self.delta_phi);
        Vec3::new(radius * phi.cos(), radius * phi.sin(), z)
    }
}
