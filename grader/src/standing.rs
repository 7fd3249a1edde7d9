//! Performance tiers for an index or a subject's grade points.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Standing {
    /// Tier for an SPI/CPI value: 8.5 and up Excellent, 7.5 Good, 6.5 Fair.
    pub fn from_index(index: f64) -> Self {
        match index {
            x if x >= 8.5 => Standing::Excellent,
            x if x >= 7.5 => Standing::Good,
            x if x >= 6.5 => Standing::Fair,
            _ => Standing::Poor,
        }
    }

    /// Tier for one subject's grade points (AA/AB, BB, BC, rest).
    pub fn from_points(points: f64) -> Self {
        match points {
            p if p >= 9.0 => Standing::Excellent,
            p if p >= 8.0 => Standing::Good,
            p if p >= 7.0 => Standing::Fair,
            _ => Standing::Poor,
        }
    }
}
