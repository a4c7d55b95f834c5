//! Provides uniform sampling of primary vertex positions in simulation geometry, for instance:
//! * Uniformly sampling a point inside or on the surface of a [`Solid`](enum.Solid.html)
//!   (`G4Box`, `G4Orb`, `G4Sphere` and `G4Tubs` shaped) with the [`Uniform`](trait.Uniform.html) trait,
//! * checking whether a Geant4 solid type can be sampled with [`is_sampleable`](fn.is_sampleable.html),
//! * confining vertices to a set of placed volumes, weighted by volume or surface area,
//!   with [`Confinement`](struct.Confinement.html) and its endless [`Vertices`](sequence/struct.Vertices.html) sequence,
//! * efficiently selecting one of many weighted items with [`WeightedBins`](struct.WeightedBins.html).
//!
//! All samplers draw from a random source passed in by the caller, so sampling is
//! deterministic under a fixed seed, see [`random::seeded`](random/fn.seeded.html).

extern crate aitios_geom as geom;
extern crate float_extras;
extern crate rand;
extern crate serde;
extern crate serde_json;
extern crate thiserror;
extern crate tracing;

mod bins;
mod confinement;
mod error;
mod solid;
mod uniform;
mod unit;
pub mod config;
pub mod random;
pub mod sequence;

#[cfg(test)]
mod stats;

pub use self::bins::WeightedBins;
pub use self::config::ConfinementConfig;
pub use self::confinement::{Confinement, PlacedSolid, Vertex};
pub use self::error::{ConfigError, ConfinementError, ShapeError};
pub use self::solid::*;
pub use self::uniform::Uniform;
pub use self::unit::UnitSphere;
pub use self::sequence::Vertices;
pub use geom::Vec3;
