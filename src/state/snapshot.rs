//! The persisted aggregate of all mutable game data

use serde::{Deserialize, Serialize};

use super::resources::Resources;
use super::roster::{Quest, Unit, initial_quests, initial_units};
use super::sector::{MapSector, generate_sectors};
use crate::settings::GameSettings;

/// Everything a save contains.
///
/// Fields missing from a saved blob fall back to: initial resources, empty
/// unit and quest lists, an empty map (regenerated by the caller) and
/// initial settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    #[serde(default)]
    pub resources: Resources,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub quests: Vec<Quest>,
    #[serde(default)]
    pub map_sectors: Vec<MapSector>,
    #[serde(default)]
    pub settings: GameSettings,
}

impl StateSnapshot {
    /// Fresh game: initial resources, roster, quests and a map from `seed`
    pub fn new_game(seed: u64) -> Self {
        Self {
            resources: Resources::default(),
            units: initial_units(),
            quests: initial_quests(),
            map_sectors: generate_sectors(seed),
            settings: GameSettings::default(),
        }
    }

    /// Serialize to the text form stored remotely and locally
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn sector(&self, id: u32) -> Option<&MapSector> {
        self.map_sectors.iter().find(|s| s.id == id)
    }
}
