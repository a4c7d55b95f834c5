use super::angle::{self, ANGLE_TOLERANCE, FULL_TURN};
use super::{check_phi, check_radii, SolidKind};
use crate::error::ShapeError;
use crate::uniform::Uniform;
use crate::unit::UnitSphere;
use geom::prelude::*;
use geom::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::f32::consts::PI;

fn full_phi() -> f32 {
    FULL_TURN
}

fn full_theta() -> f32 {
    PI
}

/// A spherical shell section, like `G4Sphere`.
///
/// The polar angle theta is measured from the positive z axis and covers
/// `[start_theta, start_theta + delta_theta]` within `[0, π]`, the azimuth
/// covers `[start_phi, start_phi + delta_phi]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SphereParams")]
pub struct Sphere {
    inner_radius: f32,
    outer_radius: f32,
    start_phi: f32,
    delta_phi: f32,
    start_theta: f32,
    delta_theta: f32,
}

/// Sphere parameters as read from a configuration, with angles defaulting
/// to the full sphere.
#[derive(Deserialize)]
struct SphereParams {
    #[serde(default)]
    inner_radius: f32,
    outer_radius: f32,
    #[serde(default)]
    start_phi: f32,
    #[serde(default = "full_phi")]
    delta_phi: f32,
    #[serde(default)]
    start_theta: f32,
    #[serde(default = "full_theta")]
    delta_theta: f32,
}

impl TryFrom<SphereParams> for Sphere {
    type Error = ShapeError;

    fn try_from(params: SphereParams) -> Result<Self, ShapeError> {
        Sphere::new(
            params.inner_radius,
            params.outer_radius,
            params.start_phi,
            params.delta_phi,
            params.start_theta,
            params.delta_theta,
        )
    }
}

impl Sphere {
    pub fn new(
        inner_radius: f32,
        outer_radius: f32,
        start_phi: f32,
        delta_phi: f32,
        start_theta: f32,
        delta_theta: f32,
    ) -> Result<Self, ShapeError> {
        let sphere = Sphere {
            inner_radius,
            outer_radius,
            start_phi,
            delta_phi,
            start_theta,
            delta_theta,
        };
        sphere.validate()?;

        Ok(Sphere {
            delta_phi: angle::normalize_delta_phi(delta_phi),
            delta_theta: delta_theta.min(PI - start_theta),
            ..sphere
        })
    }

    /// Full spherical shell without angular cuts.
    pub fn shell(inner_radius: f32, outer_radius: f32) -> Result<Self, ShapeError> {
        Sphere::new(inner_radius, outer_radius, 0.0, FULL_TURN, 0.0, PI)
    }

    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    fn validate(&self) -> Result<(), ShapeError> {
        check_radii(SolidKind::Sphere, self.inner_radius, self.outer_radius)?;
        check_phi(SolidKind::Sphere, self.start_phi, self.delta_phi)?;

        if !(self.start_theta.is_finite() && self.start_theta >= 0.0 && self.start_theta < PI) {
            return Err(ShapeError::invalid(
                SolidKind::Sphere,
                format!("start theta must be in [0, pi), got {}", self.start_theta),
            ));
        }

        let end_theta = self.start_theta + self.delta_theta;
        if !(self.delta_theta.is_finite() && self.delta_theta > 0.0 && end_theta <= PI + ANGLE_TOLERANCE) {
            return Err(ShapeError::invalid(
                SolidKind::Sphere,
                format!(
                    "theta range [{}, {}] must be non-empty and end at or before pi",
                    self.start_theta, end_theta
                ),
            ));
        }

        Ok(())
    }

    fn end_theta(&self) -> f32 {
        (self.start_theta + self.delta_theta).min(PI)
    }

    fn has_start_theta_cut(&self) -> bool {
        self.start_theta > ANGLE_TOLERANCE
    }

    fn has_end_theta_cut(&self) -> bool {
        self.end_theta() < PI - ANGLE_TOLERANCE
    }

    /// True for a plain ball, which is sampled like an `Orb`.
    fn is_full(&self) -> bool {
        self.inner_radius == 0.0
            && angle::is_full_phi(self.delta_phi)
            && !self.has_start_theta_cut()
            && !self.has_end_theta_cut()
    }

    /// Cosines of the start and end polar angle, the first being the larger.
    fn cos_theta_range(&self) -> (f32, f32) {
        (self.start_theta.cos(), self.end_theta().cos())
    }

    /// Integral of `sin θ dθ dφ` over the allowed angles.
    fn solid_angle(&self) -> f32 {
        let (cos_start, cos_end) = self.cos_theta_range();
        self.delta_phi.min(FULL_TURN) * (cos_start - cos_end)
    }

    pub fn volume(&self) -> f32 {
        self.solid_angle() / 3.0 * (self.outer_radius.powi(3) - self.inner_radius.powi(3))
    }

    /// Area of the inner and outer spherical patches.
    pub fn surface_area(&self) -> f32 {
        self.solid_angle() * (self.inner_radius * self.inner_radius + self.outer_radius * self.outer_radius)
    }

    /// Direction with `cos θ` uniform over the allowed range, which makes the
    /// density on the sphere proportional to `sin θ`.
    fn sample_direction<R: Rng>(&self, rng: &mut R) -> Vec3 {
        let (cos_start, cos_end) = self.cos_theta_range();
        let cos_theta = cos_start - (cos_start - cos_end) * rng.gen::<f32>();
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let phi = angle::sample_phi(rng, self.start_phi, self.delta_phi);

        Vec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
    }

    /// Radius with density proportional to `r²` between inner and outer radius.
    fn sample_radius<R: Rng>(&self, rng: &mut R) -> f32 {
        let inner3 = self.inner_radius.powi(3);
        let outer3 = self.outer_radius.powi(3);
        (inner3 + (outer3 - inner3) * rng.gen::<f32>()).cbrt()
    }

    /// Inner or outer radius, weighted by the areas of their patches.
    fn sample_boundary_radius<R: Rng>(&self, rng: &mut R) -> f32 {
        let inner2 = self.inner_radius * self.inner_radius;
        let outer2 = self.outer_radius * self.outer_radius;

        if self.inner_radius > 0.0 && rng.gen::<f32>() * (inner2 + outer2) < inner2 {
            self.inner_radius
        } else {
            self.outer_radius
        }
    }

    pub(super) fn margin(&self, point: Vec3) -> f32 {
        let r = point.magnitude();
        let mut margin = r - self.outer_radius;

        if self.inner_radius > 0.0 {
            margin = margin.max(self.inner_radius - r);
        }

        if r > 0.0 {
            let theta = point.x.hypot(point.y).atan2(point.z);
            if self.has_start_theta_cut() {
                margin = margin.max((self.start_theta - theta) * r);
            }
            if self.has_end_theta_cut() {
                margin = margin.max((theta - self.end_theta()) * r);
            }
        }

        margin.max(angle::phi_margin(point.x, point.y, self.start_phi, self.delta_phi))
    }
}

impl Uniform for Sphere {
    fn uniform<R: Rng>(&self, rng: &mut R, on_surface: bool) -> Vec3 {
        if self.is_full() {
            return UnitSphere.uniform(rng, on_surface) * self.outer_radius;
        }

        let radius = if on_surface {
            self.sample_boundary_radius(rng)
        } else {
            self.sample_radius(rng)
        };

        self.sample_direction(rng) * radius
    }
}
