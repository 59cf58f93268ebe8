//! Game state data model
//!
//! Plain serializable data, no rules engine:
//! - Resources, units, quests
//! - Map sectors (seeded generation only)
//! - The snapshot that the persistence gateway round-trips

pub mod resources;
pub mod roster;
pub mod sector;
pub mod snapshot;

pub use resources::{Resource, ResourceBundle, ResourceKind, Resources};
pub use roster::{
    Difficulty, Quest, QuestRewards, Unit, UnitKind, initial_quests, initial_units,
};
pub use sector::{GRID_COLUMNS, MapSector, SECTOR_COUNT, SectorControl, generate_sectors};
pub use snapshot::StateSnapshot;
