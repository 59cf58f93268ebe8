//! AI units and quests

use serde::{Deserialize, Serialize};

use super::ResourceBundle;

/// Unit role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Attack,
    Defense,
    Support,
}

impl UnitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::Attack => "attack",
            UnitKind::Defense => "defense",
            UnitKind::Support => "support",
        }
    }
}

/// An AI unit in the player's roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: UnitKind,
    pub level: u32,
    pub attack: u32,
    pub defense: u32,
    /// Build cost; any subset of the resources
    #[serde(default)]
    pub cost: ResourceBundle,
    pub description: String,
    pub experience: u32,
    pub max_experience: u32,
}

impl Unit {
    /// Experience bar fill, clamped to [0, 1]
    pub fn experience_ratio(&self) -> f64 {
        if self.max_experience == 0 {
            return 0.0;
        }
        (self.experience as f64 / self.max_experience as f64).clamp(0.0, 1.0)
    }
}

/// Quest difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Rewards granted on quest completion; every entry is optional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestRewards {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_shards: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum_cores: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
}

impl QuestRewards {
    /// `(key, amount)` pairs in display order
    pub fn entries(&self) -> Vec<(&'static str, u32)> {
        [
            ("energy", self.energy),
            ("dataShards", self.data_shards),
            ("quantumCores", self.quantum_cores),
            ("experience", self.experience),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect()
    }
}

/// An active quest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Completion percentage, nominally 0 - 100
    pub progress: f64,
    #[serde(default)]
    pub rewards: QuestRewards,
    /// Declared by the data format but not used by any screen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u64>,
    pub difficulty: Difficulty,
}

impl Quest {
    /// Progress bar width in percent, clamped to [0, 100]
    pub fn progress_pct(&self) -> f64 {
        self.progress.clamp(0.0, 100.0)
    }
}

/// Roster a new game starts with
pub fn initial_units() -> Vec<Unit> {
    vec![
        Unit {
            id: 1,
            name: "Quantum Striker".to_string(),
            kind: UnitKind::Attack,
            level: 5,
            attack: 75,
            defense: 60,
            cost: ResourceBundle {
                energy: Some(100),
                data_shards: Some(50),
                quantum_cores: None,
            },
            description: "High-damage assault unit".to_string(),
            experience: 450,
            max_experience: 1000,
        },
        Unit {
            id: 2,
            name: "Data Guardian".to_string(),
            kind: UnitKind::Defense,
            level: 4,
            attack: 45,
            defense: 90,
            cost: ResourceBundle {
                energy: Some(150),
                data_shards: Some(75),
                quantum_cores: None,
            },
            description: "Specialized defensive unit".to_string(),
            experience: 300,
            max_experience: 1000,
        },
    ]
}

/// Quest log a new game starts with
pub fn initial_quests() -> Vec<Quest> {
    vec![
        Quest {
            id: 1,
            title: "Secure the Grid".to_string(),
            description: "Eliminate enemy presence in Sector 7".to_string(),
            progress: 60.0,
            rewards: QuestRewards {
                energy: Some(500),
                data_shards: Some(200),
                experience: Some(100),
                ..Default::default()
            },
            time_limit: None,
            difficulty: Difficulty::Medium,
        },
        Quest {
            id: 2,
            title: "Data Mining Operation".to_string(),
            description: "Extract valuable data from contested zones".to_string(),
            progress: 30.0,
            rewards: QuestRewards {
                data_shards: Some(400),
                quantum_cores: Some(50),
                experience: Some(150),
                ..Default::default()
            },
            time_limit: None,
            difficulty: Difficulty::Hard,
        },
    ]
}
