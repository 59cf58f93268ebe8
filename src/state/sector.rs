//! Strategic map sectors and their seeded generator

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::resources::ResourceBundle;
use super::roster::Unit;

/// Number of sectors on the map
pub const SECTOR_COUNT: u32 = 64;
/// Sectors per grid row
pub const GRID_COLUMNS: u32 = 8;

/// Who controls a sector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectorControl {
    Neutral,
    Friendly,
    Enemy,
    /// Valid in saved data; the generator never produces it
    Contested,
}

impl SectorControl {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectorControl::Neutral => "neutral",
            SectorControl::Friendly => "friendly",
            SectorControl::Enemy => "enemy",
            SectorControl::Contested => "contested",
        }
    }

    /// Selecting a sector with this tag raises a threat warning
    pub fn is_hostile(&self) -> bool {
        *self == SectorControl::Enemy
    }
}

/// One cell of the strategic map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSector {
    pub id: u32,
    #[serde(rename = "type")]
    pub control: SectorControl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceBundle>,
    /// Threat level in percent
    pub threat: u32,
    #[serde(default)]
    pub units: Vec<Unit>,
}

/// Generate a full map from a seed. The same seed always yields the same map.
pub fn generate_sectors(seed: u64) -> Vec<MapSector> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let sectors: Vec<MapSector> = (0..SECTOR_COUNT)
        .map(|id| generate_sector(id, &mut rng))
        .collect();

    let enemies = sectors
        .iter()
        .filter(|s| s.control == SectorControl::Enemy)
        .count();
    log::info!(
        "Generated {} sectors (seed {}, {} hostile)",
        sectors.len(),
        seed,
        enemies
    );
    sectors
}

/// Draw one sector. Each sector uses independent draws: control first, then
/// the optional deposit, then threat.
fn generate_sector<R: Rng>(id: u32, rng: &mut R) -> MapSector {
    let control = if rng.random::<f64>() > 0.7 {
        SectorControl::Enemy
    } else if rng.random::<f64>() > 0.5 {
        SectorControl::Neutral
    } else {
        SectorControl::Friendly
    };

    let resources = if rng.random::<f64>() > 0.5 {
        Some(ResourceBundle {
            energy: Some(rng.random_range(0..1000)),
            data_shards: Some(rng.random_range(0..500)),
            quantum_cores: Some(rng.random_range(0..100)),
        })
    } else {
        None
    };

    MapSector {
        id,
        control,
        resources,
        threat: rng.random_range(0..100),
        units: Vec::new(),
    }
}
