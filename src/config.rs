//! JSON description of where primary vertices are confined to.
//!
//! ```json
//! {
//!   "on_surface": false,
//!   "seed": 42,
//!   "volumes": [
//!     {
//!       "name": "crystal",
//!       "translation": [0.0, 0.0, 10.0],
//!       "solid": { "type": "G4Tubs", "outer_radius": 4.0, "half_z": 4.0 }
//!     }
//!   ]
//! }
//! ```

use crate::confinement::{Confinement, PlacedSolid};
use crate::error::ConfigError;
use crate::random;
use rand::XorShiftRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfinementConfig {
    /// Sample on the volume surfaces instead of throughout the volumes.
    #[serde(default)]
    pub on_surface: bool,
    /// Seed for the random source, zero if absent.
    #[serde(default)]
    pub seed: Option<u64>,
    pub volumes: Vec<PlacedSolid>,
}

impl ConfinementConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Self::from_json(&fs::read_to_string(path)?)?;
        info!(
            path = %path.display(),
            volumes = config.volumes.len(),
            on_surface = config.on_surface,
            "loaded vertex confinement"
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the volume names and sets up the confinement.
    pub fn build(&self) -> Result<Confinement, ConfigError> {
        Ok(Confinement::new(self.volumes.clone(), self.on_surface)?)
    }

    /// Random source seeded as configured.
    pub fn rng(&self) -> XorShiftRng {
        random::seeded(self.seed.unwrap_or(0))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ConfinementError;
    use crate::solid::{Inside, Solid, SolidKind, Tube};
    use geom::Vec3;
    use std::env;
    use std::f32::consts::PI;

    const CONFIG: &str = r#"{
        "on_surface": false,
        "seed": 42,
        "volumes": [
            {
                "name": "crystal",
                "translation": [0.0, 0.0, 10.0],
                "solid": { "type": "G4Tubs", "outer_radius": 4.0, "half_z": 4.0 }
            },
            {
                "name": "source",
                "solid": { "type": "G4Sphere", "outer_radius": 1.0, "delta_theta": 1.5707964 }
            }
        ]
    }"#;

    #[test]
    fn test_parse() {
        let config = ConfinementConfig::from_json(CONFIG).unwrap();
        assert!(!config.on_surface);
        assert_eq!(Some(42), config.seed);
        assert_eq!(2, config.volumes.len());
        assert_eq!(Solid::Tube(Tube::cylinder(4.0, 4.0).unwrap()), config.volumes[0].solid);
        assert_eq!(Vec3::new(0.0, 0.0, 10.0), config.volumes[0].translation());
        assert_eq!(Vec3::new(0.0, 0.0, 0.0), config.volumes[1].translation());
        assert_eq!(SolidKind::Sphere, config.volumes[1].solid.kind());
    }

    #[test]
    fn test_build_and_sample() {
        let config = ConfinementConfig::from_json(CONFIG).unwrap();
        let confinement = config.build().unwrap();
        let mut rng = config.rng();

        for vertex in confinement.vertices(&mut rng).take(1000) {
            let placed = config.volumes.iter().find(|v| v.name == vertex.volume).unwrap();
            let local = vertex.position - placed.translation();
            assert_ne!(Inside::Outside, placed.solid.inside(local, 1.0e-4));
        }
    }

    #[test]
    fn test_json_round_trip() {
        let config = ConfinementConfig::from_json(CONFIG).unwrap();
        let again = ConfinementConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(config, again);
    }

    #[test]
    fn test_unknown_solid_type() {
        let json = r#"{ "volumes": [ { "name": "x", "solid": { "type": "G4Cons" } } ] }"#;
        match ConfinementConfig::from_json(json) {
            Err(ConfigError::Parse(_)) => {}
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_solid_fails_parse() {
        let json = r#"{ "volumes": [ { "name": "x", "solid": { "type": "G4Box", "half_x": 1, "half_y": 0, "half_z": 1 } } ] }"#;

        match ConfinementConfig::from_json(json) {
            Err(ConfigError::Parse(err)) => assert!(err.to_string().contains("invalid G4Box parameters"), "{}", err),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let config = ConfinementConfig::from_json(r#"{ "volumes": [] }"#).unwrap();
        assert!(!config.on_surface);
        assert_eq!(None, config.seed);
        match config.build() {
            Err(ConfigError::Confinement(ConfinementError::Empty)) => {}
            other => panic!("Expected empty confinement, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_load_from_file() {
        let path = env::temp_dir().join(format!("solid-sampling-config-{}.json", ::std::process::id()));
        fs::write(&path, CONFIG).unwrap();
        let config = ConfinementConfig::load(&path);
        fs::remove_file(&path).unwrap();

        assert_eq!(2, config.unwrap().volumes.len());
    }

    #[test]
    fn test_load_missing_file() {
        match ConfinementConfig::load("/nonexistent/solid-sampling/config.json") {
            Err(ConfigError::Io(_)) => {}
            other => panic!("Expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_hemisphere_from_config() {
        let config = ConfinementConfig::from_json(CONFIG).unwrap();
        let expected = crate::solid::Sphere::new(0.0, 1.0, 0.0, 2.0 * PI, 0.0, 0.5 * PI).unwrap();
        assert_eq!(Solid::Sphere(expected), config.volumes[1].solid);
    }
}
