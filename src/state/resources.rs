//! Resource stockpiles shown in the top bar

use serde::{Deserialize, Serialize};

/// One stockpile: current amount, production rate and storage cap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub amount: f64,
    /// Production per second (display only)
    pub increment: f64,
    pub capacity: f64,
}

impl Resource {
    pub const fn new(amount: f64, increment: f64, capacity: f64) -> Self {
        Self {
            amount,
            increment,
            capacity,
        }
    }

    /// Fill level for the progress bar, clamped to [0, 1].
    ///
    /// Stored amounts are never clamped; only the display is.
    pub fn fill_ratio(&self) -> f64 {
        if self.capacity <= 0.0 {
            return 0.0;
        }
        (self.amount / self.capacity).clamp(0.0, 1.0)
    }
}

/// Which stockpile a value refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Energy,
    DataShards,
    QuantumCores,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [Self::Energy, Self::DataShards, Self::QuantumCores];

    /// Key used in saved data and reward lists
    pub fn key(&self) -> &'static str {
        match self {
            ResourceKind::Energy => "energy",
            ResourceKind::DataShards => "dataShards",
            ResourceKind::QuantumCores => "quantumCores",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Energy => "Energy",
            ResourceKind::DataShards => "Data Shards",
            ResourceKind::QuantumCores => "Quantum Cores",
        }
    }
}

/// The three fixed stockpiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resources {
    pub energy: Resource,
    pub data_shards: Resource,
    pub quantum_cores: Resource,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            energy: Resource::new(1000.0, 10.0, 5000.0),
            data_shards: Resource::new(500.0, 5.0, 2000.0),
            quantum_cores: Resource::new(100.0, 1.0, 1000.0),
        }
    }
}

impl Resources {
    pub fn get(&self, kind: ResourceKind) -> &Resource {
        match kind {
            ResourceKind::Energy => &self.energy,
            ResourceKind::DataShards => &self.data_shards,
            ResourceKind::QuantumCores => &self.quantum_cores,
        }
    }

    /// Iterate in display order
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &Resource)> {
        ResourceKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

/// A sparse set of resource amounts (sector deposits, unit costs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_shards: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum_cores: Option<u32>,
}

impl ResourceBundle {
    /// Present entries in display order
    pub fn entries(&self) -> Vec<(ResourceKind, u32)> {
        [
            (ResourceKind::Energy, self.energy),
            (ResourceKind::DataShards, self.data_shards),
            (ResourceKind::QuantumCores, self.quantum_cores),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect()
    }
}
