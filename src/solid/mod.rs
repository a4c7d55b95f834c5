//! Solids that points can be sampled in, modelled after their Geant4 counterparts.

mod angle;
mod box_solid;
mod kind;
mod orb;
mod sphere;
mod tube;

pub use self::box_solid::BoxSolid;
pub use self::kind::{is_sampleable, SolidKind};
pub use self::orb::Orb;
pub use self::sphere::Sphere;
pub use self::tube::Tube;

use crate::error::ShapeError;
use crate::uniform::Uniform;
use geom::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Location of a point relative to a solid, see `Solid::inside`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inside {
    Inside,
    Surface,
    Outside,
}

impl Inside {
    /// Classifies a point by its largest signed distance to any of the
    /// bounding constraints of a solid, positive meaning outside.
    fn from_margin(margin: f32, tolerance: f32) -> Inside {
        if margin > tolerance {
            Inside::Outside
        } else if margin >= -tolerance {
            Inside::Surface
        } else {
            Inside::Inside
        }
    }
}

/// One of the sampleable solids, centered in its own local coordinate frame.
///
/// Deserializes from an object tagged with the Geant4 type name, e.g.
/// `{ "type": "G4Orb", "radius": 2.0 }`. Parameters are checked like in the
/// constructors, so invalid ones fail to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Solid {
    #[serde(rename = "G4Box")]
    Box(BoxSolid),
    #[serde(rename = "G4Orb")]
    Orb(Orb),
    #[serde(rename = "G4Sphere")]
    Sphere(Sphere),
    #[serde(rename = "G4Tubs")]
    Tube(Tube),
}

impl Solid {
    pub fn kind(&self) -> SolidKind {
        match self {
            Solid::Box(_) => SolidKind::Box,
            Solid::Orb(_) => SolidKind::Orb,
            Solid::Sphere(_) => SolidKind::Sphere,
            Solid::Tube(_) => SolidKind::Tubs,
        }
    }

    pub fn volume(&self) -> f32 {
        match self {
            Solid::Box(solid) => solid.volume(),
            Solid::Orb(solid) => solid.volume(),
            Solid::Sphere(solid) => solid.volume(),
            Solid::Tube(solid) => solid.volume(),
        }
    }

    /// Area of the part of the boundary that surface sampling covers.
    pub fn surface_area(&self) -> f32 {
        match self {
            Solid::Box(solid) => solid.surface_area(),
            Solid::Orb(solid) => solid.surface_area(),
            Solid::Sphere(solid) => solid.surface_area(),
            Solid::Tube(solid) => solid.surface_area(),
        }
    }

    /// Classifies `point` in local coordinates, treating everything within
    /// `tolerance` of the boundary as on the surface.
    pub fn inside(&self, point: Vec3, tolerance: f32) -> Inside {
        let margin = match self {
            Solid::Box(solid) => solid.margin(point),
            Solid::Orb(solid) => solid.margin(point),
            Solid::Sphere(solid) => solid.margin(point),
            Solid::Tube(solid) => solid.margin(point),
        };

        Inside::from_margin(margin, tolerance)
    }
}

impl Uniform for Solid {
    fn uniform<R: Rng>(&self, rng: &mut R, on_surface: bool) -> Vec3 {
        match self {
            Solid::Box(solid) => solid.uniform(rng, on_surface),
            Solid::Orb(solid) => solid.uniform(rng, on_surface),
            Solid::Sphere(solid) => solid.uniform(rng, on_surface),
            Solid::Tube(solid) => solid.uniform(rng, on_surface),
        }
    }
}

impl From<BoxSolid> for Solid {
    fn from(solid: BoxSolid) -> Self {
        Solid::Box(solid)
    }
}

impl From<Orb> for Solid {
    fn from(solid: Orb) -> Self {
        Solid::Orb(solid)
    }
}

impl From<Sphere> for Solid {
    fn from(solid: Sphere) -> Self {
        Solid::Sphere(solid)
    }
}

impl From<Tube> for Solid {
    fn from(solid: Tube) -> Self {
        Solid::Tube(solid)
    }
}

/// Selects an index with probability proportional to its weight.
///
/// Weights must be non-negative with a positive sum.
fn choose_weighted<R: Rng>(rng: &mut R, weights: &[f32]) -> usize {
    let total: f32 = weights.iter().sum();
    let mut r = rng.gen::<f32>() * total;

    for (idx, &weight) in weights.iter().enumerate() {
        if r < weight {
            return idx;
        }
        r -= weight;
    }

    // Rounding may leave r slightly above the last weight
    weights
        .iter()
        .rposition(|&w| w > 0.0)
        .expect("At least one weight must be positive")
}

/// Requires `value` to be finite and strictly positive.
fn check_positive(kind: SolidKind, name: &str, value: f32) -> Result<(), ShapeError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ShapeError::invalid(kind, format!("{} must be positive and finite, got {}", name, value)))
    }
}

/// Requires `0 <= inner < outer`, both finite.
fn check_radii(kind: SolidKind, inner: f32, outer: f32) -> Result<(), ShapeError> {
    check_positive(kind, "outer radius", outer)?;
    if !(inner.is_finite() && inner >= 0.0) {
        return Err(ShapeError::invalid(
            kind,
            format!("inner radius must be non-negative and finite, got {}", inner),
        ));
    }
    if inner >= outer {
        return Err(ShapeError::invalid(
            kind,
            format!("inner radius {} must be smaller than outer radius {}", inner, outer),
        ));
    }
    Ok(())
}

/// Requires a finite start angle and a positive extent. Extents of a full
/// turn or more mean the full azimuth.
fn check_phi(kind: SolidKind, start_phi: f32, delta_phi: f32) -> Result<(), ShapeError> {
    if !start_phi.is_finite() {
        return Err(ShapeError::invalid(kind, format!("start phi must be finite, got {}", start_phi)));
    }
    if !(delta_phi.is_finite() && delta_phi > 0.0) {
        return Err(ShapeError::invalid(
            kind,
            format!("delta phi must be positive and finite, got {}", delta_phi),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::random::seeded;
    use std::f32::consts::PI;

    /// One of every kind, with cuts and inner radii where supported.
    fn assorted_solids() -> Vec<Solid> {
        vec![
            BoxSolid::new(1.0, 2.0, 3.0).unwrap().into(),
            Orb::new(2.5).unwrap().into(),
            Sphere::shell(1.0, 3.0).unwrap().into(),
            Sphere::new(0.5, 2.0, 0.3, 1.2 * PI, 0.2, 0.6 * PI).unwrap().into(),
            Tube::cylinder(2.0, 5.0).unwrap().into(),
            Tube::new(1.0, 4.0, 0.5, -0.25 * PI, 0.75 * PI).unwrap().into(),
        ]
    }

    #[test]
    fn test_volume_samples_inside() {
        let mut rng = seeded(11);
        for solid in assorted_solids() {
            for _ in 0..100_000 {
                let point = solid.uniform(&mut rng, false);
                assert_ne!(
                    Inside::Outside,
                    solid.inside(point, 1.0e-4),
                    "{:?} sampled outside of {:?}",
                    point,
                    solid
                );
            }
        }
    }

    #[test]
    fn test_surface_samples_on_surface() {
        let mut rng = seeded(12);
        for solid in assorted_solids() {
            for _ in 0..20_000 {
                let point = solid.uniform(&mut rng, true);
                assert_eq!(
                    Inside::Surface,
                    solid.inside(point, 1.0e-4),
                    "{:?} sampled off the surface of {:?}",
                    point,
                    solid
                );
            }
        }
    }

    #[test]
    fn test_kind_of_variants() {
        let kinds: Vec<_> = assorted_solids().iter().map(Solid::kind).collect();
        assert_eq!(
            vec![
                SolidKind::Box,
                SolidKind::Orb,
                SolidKind::Sphere,
                SolidKind::Sphere,
                SolidKind::Tubs,
                SolidKind::Tubs
            ],
            kinds
        );
    }

    #[test]
    fn test_inside_classification() {
        let cube: Solid = BoxSolid::new(1.0, 1.0, 1.0).unwrap().into();
        assert_eq!(Inside::Inside, cube.inside(Vec3::new(0.0, 0.5, -0.5), 1.0e-6));
        assert_eq!(Inside::Surface, cube.inside(Vec3::new(1.0, 0.5, -0.5), 1.0e-6));
        assert_eq!(Inside::Outside, cube.inside(Vec3::new(1.1, 0.5, -0.5), 1.0e-6));
    }

    #[test]
    fn test_deserialize_tagged() {
        let solid: Solid = serde_json::from_str(r#"{ "type": "G4Orb", "radius": 2.0 }"#).unwrap();
        assert_eq!(Solid::Orb(Orb::new(2.0).unwrap()), solid);

        let solid: Solid =
            serde_json::from_str(r#"{ "type": "G4Tubs", "outer_radius": 2.0, "half_z": 1.0 }"#).unwrap();
        assert_eq!(Solid::Tube(Tube::cylinder(2.0, 1.0).unwrap()), solid);
    }

    #[test]
    fn test_deserialize_unknown_type_fails() {
        let result = serde_json::from_str::<Solid>(r#"{ "type": "G4Cons", "radius": 2.0 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_invalid_parameters_fails() {
        let invalid = [
            r#"{ "type": "G4Box", "half_x": 1, "half_y": 0, "half_z": 1 }"#,
            r#"{ "type": "G4Orb", "radius": -1.0 }"#,
            r#"{ "type": "G4Sphere", "inner_radius": 3.0, "outer_radius": 2.0 }"#,
            r#"{ "type": "G4Sphere", "outer_radius": 1.0, "start_theta": 2.0, "delta_theta": 2.0 }"#,
            r#"{ "type": "G4Tubs", "outer_radius": 1.0, "half_z": 0.0 }"#,
            r#"{ "type": "G4Tubs", "outer_radius": 1.0, "half_z": 1.0, "delta_phi": 0.0 }"#,
        ];

        for json in invalid.iter() {
            let err = serde_json::from_str::<Solid>(json).unwrap_err();
            assert!(err.to_string().contains("invalid"), "Unexpected error {} for {}", err, json);
        }
    }

    #[test]
    fn test_deserialize_normalizes_angles() {
        let solid: Solid =
            serde_json::from_str(r#"{ "type": "G4Sphere", "outer_radius": 1.0, "delta_phi": 7.0 }"#).unwrap();
        assert_eq!(Solid::Sphere(Sphere::shell(0.0, 1.0).unwrap()), solid);
    }

    #[test]
    fn test_sample_with_boxed_rng() {
        let solid: Solid = Tube::cylinder(1.0, 1.0).unwrap().into();
        let mut rng: Box<dyn Rng> = Box::new(seeded(14));

        for on_surface in [false, true].iter().cloned() {
            let point = solid.uniform(&mut rng, on_surface);
            assert_ne!(Inside::Outside, solid.inside(point, 1.0e-4));
        }
    }

    #[test]
    fn test_choose_weighted_skips_zero_weights() {
        let mut rng = seeded(13);
        for _ in 0..1000 {
            assert_ne!(1, choose_weighted(&mut rng, &[1.0, 0.0, 2.0]));
        }
    }
}
