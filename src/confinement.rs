use crate::bins::WeightedBins;
use crate::error::ConfinementError;
use crate::sequence::Vertices;
use crate::solid::Solid;
use crate::uniform::Uniform;
use geom::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// A named solid placed in the global frame by a translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedSolid {
    pub name: String,
    pub solid: Solid,
    #[serde(default)]
    pub translation: [f32; 3],
}

impl PlacedSolid {
    pub fn new<S: Into<String>>(name: S, solid: Solid, translation: Vec3) -> Self {
        PlacedSolid {
            name: name.into(),
            solid,
            translation: [translation.x, translation.y, translation.z],
        }
    }

    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.translation[0], self.translation[1], self.translation[2])
    }

    /// Weight of this volume when picking one of many.
    fn weight(&self, on_surface: bool) -> f32 {
        if on_surface {
            self.solid.surface_area()
        } else {
            self.solid.volume()
        }
    }
}

/// A primary vertex in global coordinates along with the volume it was sampled in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex<'a> {
    pub volume: &'a str,
    pub position: Vec3,
}

/// Confines vertices to a set of placed volumes.
///
/// Each sample first picks a volume with probability proportional to its
/// cubic volume, or to its surface area when sampling on surfaces, and then
/// a uniform point in or on it, so that vertices are uniform over the union
/// of all volumes.
pub struct Confinement {
    volumes: WeightedBins<PlacedSolid>,
    on_surface: bool,
}

impl Confinement {
    #[instrument(skip(volumes), fields(volume_count = volumes.len()))]
    pub fn new(volumes: Vec<PlacedSolid>, on_surface: bool) -> Result<Self, ConfinementError> {
        if volumes.is_empty() {
            return Err(ConfinementError::Empty);
        }

        let mut names = HashSet::new();
        for volume in &volumes {
            if !names.insert(volume.name.as_str()) {
                return Err(ConfinementError::DuplicateVolume(volume.name.clone()));
            }
        }

        let weighted: Vec<(PlacedSolid, f32)> = volumes
            .into_iter()
            .map(|volume| {
                let weight = volume.weight(on_surface);
                debug!(volume = %volume.name, kind = %volume.solid.kind(), weight, "confining vertices");
                (volume, weight)
            })
            .collect();

        let volumes: WeightedBins<_> = weighted.into_iter().collect();
        if volumes.is_empty() {
            return Err(ConfinementError::ZeroWeight(if on_surface { "surface area" } else { "volume" }));
        }

        Ok(Confinement { volumes, on_surface })
    }

    pub fn on_surface(&self) -> bool {
        self.on_surface
    }

    /// The volumes vertices can be placed in, in no particular order.
    pub fn volumes(&self) -> impl Iterator<Item = &PlacedSolid> {
        self.volumes.iter().map(|(volume, _)| volume)
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vertex {
        let volume = self.volumes.sample(rng);
        let local = volume.solid.uniform(rng, self.on_surface);

        Vertex {
            volume: &volume.name,
            position: volume.translation() + local,
        }
    }

    /// Endless sequence of vertices drawn from `rng`.
    pub fn vertices<'a, R: Rng>(&'a self, rng: &'a mut R) -> Vertices<'a, R> {
        Vertices::new(self, rng)
    }
}
