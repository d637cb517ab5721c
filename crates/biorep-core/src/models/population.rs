use serde::{Deserialize, Serialize};

/// Reference scores for one risk model, split by group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferencePopulation {
    /// Group indicator 0.
    pub healthy: Vec<f64>,
    /// Group indicator 1.
    pub unhealthy: Vec<f64>,
}

impl ReferencePopulation {
    pub fn pooled(&self) -> impl Iterator<Item = f64> + '_ {
        self.healthy.iter().chain(self.unhealthy.iter()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.healthy.is_empty() && self.unhealthy.is_empty()
    }
}
