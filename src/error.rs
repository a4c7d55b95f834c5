use crate::solid::SolidKind;
use std::io;

/// Errors when describing a solid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("unsupported solid type {0:?}, only G4Box, G4Orb, G4Sphere and G4Tubs can be sampled")]
    Unsupported(String),

    #[error("invalid {kind} parameters: {reason}")]
    InvalidParameters { kind: SolidKind, reason: String },
}

impl ShapeError {
    pub(crate) fn invalid(kind: SolidKind, reason: impl Into<String>) -> Self {
        ShapeError::InvalidParameters {
            kind,
            reason: reason.into(),
        }
    }
}

/// Errors when setting up a vertex confinement.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfinementError {
    #[error("no volumes to confine vertices to")]
    Empty,

    #[error("volume {0:?} is listed more than once")]
    DuplicateVolume(String),

    #[error("no volume has a positive {0}")]
    ZeroWeight(&'static str),
}

/// Errors when loading a confinement configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Confinement(#[from] ConfinementError),
}
