use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Requirement;

/// Bed geometry shared by every requirement in one plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Usable height of every strip, in the same unit as crop radii.
    pub strip_height: f64,
    /// Usable width of one bed row.
    pub capacity: f64,
    /// Bed rows on hand. If undefined, the plan is not checked against a budget
    pub available_containers: Option<usize>,
}

impl PlanConfig {
    pub const DEFAULT_STRIP_HEIGHT: f64 = 36.0;
    pub const DEFAULT_CAPACITY: f64 = 360.0;

    pub fn validate(&self) -> Result<()> {
        if !self.strip_height.is_finite() || self.strip_height <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "strip height must be positive, got {}",
                self.strip_height
            )));
        }
        if !self.capacity.is_finite() || self.capacity <= 0.0 {
            return Err(Error::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            strip_height: Self::DEFAULT_STRIP_HEIGHT,
            capacity: Self::DEFAULT_CAPACITY,
            available_containers: None,
        }
    }
}

/// Config plus crop list, as read from a JSON file or an HTTP body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    #[serde(flatten)]
    pub config: PlanConfig,
    #[serde(default)]
    pub items: Vec<Requirement>,
    /// Scale every count by the largest multiplier that fits
    /// `available_containers`.
    #[serde(default)]
    pub scale_to_budget: bool,
}

impl PlanRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}
