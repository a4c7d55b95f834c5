use crate::error::ShapeError;
use std::fmt;
use std::str::FromStr;

/// The Geant4 solid types that can be sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolidKind {
    Box,
    Orb,
    Sphere,
    Tubs,
}

impl SolidKind {
    /// All sampleable kinds.
    pub const ALL: [SolidKind; 4] = [SolidKind::Box, SolidKind::Orb, SolidKind::Sphere, SolidKind::Tubs];

    /// Type name of the solid as reported by Geant4, e.g. `"G4Tubs"`.
    pub fn name(self) -> &'static str {
        match self {
            SolidKind::Box => "G4Box",
            SolidKind::Orb => "G4Orb",
            SolidKind::Sphere => "G4Sphere",
            SolidKind::Tubs => "G4Tubs",
        }
    }
}

impl fmt::Display for SolidKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolidKind {
    type Err = ShapeError;

    /// Looks up a Geant4 type name. Matching is exact and case sensitive.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        SolidKind::ALL
            .iter()
            .cloned()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| ShapeError::Unsupported(name.to_string()))
    }
}

/// Checks whether points can be sampled in solids with the given Geant4 type name.
pub fn is_sampleable(g4_solid_type: &str) -> bool {
    g4_solid_type.parse::<SolidKind>().is_ok()
}
