//! Gameplay tuning
//!
//! World setup (ground weapon and NPC placement) is a RON file with a
//! compiled-in default, so designers can move things around without a
//! rebuild. A missing or malformed file falls back to the defaults with
//! a diagnostic; a spawn entry naming an unknown weapon or NPC kind is
//! fatal at startup (that is a config bug, not a runtime condition).

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const TUNING_PATH: &str = "assets/tuning.ron";

#[derive(Debug)]
pub enum TuningError {
    Io(String),
    Parse(ron::error::SpannedError),
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::Io(msg) => write!(f, "I/O error: {}", msg),
            TuningError::Parse(err) => write!(f, "Parse error: {}", err),
        }
    }
}

impl std::error::Error for TuningError {}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e.to_string())
    }
}

impl From<ron::error::SpannedError> for TuningError {
    fn from(e: ron::error::SpannedError) -> Self {
        TuningError::Parse(e)
    }
}

/// One ground weapon waiting in the world at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponSpawn {
    /// Weapon type name; parsed through `WeaponKind::from_name` (fatal
    /// if unknown).
    pub kind: String,
    pub pos: (f32, f32),
}

/// One NPC placed in the world at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcSpawn {
    /// NPC kind name; parsed through `NpcKind::from_name`.
    pub kind: String,
    pub pos: (f32, f32),
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Extra body segments appended to the two-segment starter chain.
    pub starting_growth: usize,
    pub ground_weapons: Vec<WeaponSpawn>,
    pub npcs: Vec<NpcSpawn>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_growth: 3,
            ground_weapons: vec![
                WeaponSpawn { kind: "Gun".into(), pos: (100.0, 200.0) },
                WeaponSpawn { kind: "Sword".into(), pos: (300.0, 400.0) },
                WeaponSpawn { kind: "Healing".into(), pos: (500.0, 300.0) },
            ],
            npcs: vec![
                NpcSpawn { kind: "wizard".into(), pos: (-600.0, -200.0), active: true },
                NpcSpawn { kind: "vampire".into(), pos: (700.0, 300.0), active: true },
            ],
        }
    }
}

impl Tuning {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let text = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&text)?)
    }

    /// Load the tuning file, falling back to defaults with a diagnostic.
    /// Parse errors also fall back - a broken file should not brick the
    /// game, only a semantically invalid spawn does (checked later).
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(tuning) => tuning,
            Err(err) => {
                println!(
                    "[tuning] {} unusable ({}), using defaults",
                    path.as_ref().display(),
                    err
                );
                Self::default()
            }
        }
    }
}
