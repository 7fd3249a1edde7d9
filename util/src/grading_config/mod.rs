use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

use crate::paths::ensure_parent_dir;

/// Minimum sessional marks a student needs, below which the subject is failed.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SessionalFloor {
    /// Fixed mark floor, independent of the sessional cap.
    Absolute { marks: f64 },
    /// Percentage of the sessional cap excluding the attendance allotment.
    Proportional { percent: f64 },
}

impl Default for SessionalFloor {
    fn default() -> Self {
        SessionalFloor::Absolute {
            marks: default_sessional_floor_marks(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FailPolicy {
    /// External marks below this percentage of the external cap fail the subject.
    #[serde(default = "default_external_min_percent")]
    pub external_min_percent: f64,

    /// Termwork marks below this percentage of the termwork cap fail the subject.
    #[serde(default = "default_termwork_min_percent")]
    pub termwork_min_percent: f64,

    #[serde(default)]
    pub sessional_floor: SessionalFloor,
}

impl Default for FailPolicy {
    fn default() -> Self {
        Self {
            external_min_percent: default_external_min_percent(),
            termwork_min_percent: default_termwork_min_percent(),
            sessional_floor: SessionalFloor::default(),
        }
    }
}

impl FailPolicy {
    /// Clamps thresholds into their meaningful ranges. Non-finite values fall
    /// back to the defaults.
    pub fn sanitize(mut self) -> Self {
        self.external_min_percent =
            clamp_percent(self.external_min_percent, default_external_min_percent());
        self.termwork_min_percent =
            clamp_percent(self.termwork_min_percent, default_termwork_min_percent());
        self.sessional_floor = match self.sessional_floor {
            SessionalFloor::Absolute { marks } => SessionalFloor::Absolute {
                marks: if marks.is_finite() {
                    marks.max(0.0)
                } else {
                    default_sessional_floor_marks()
                },
            },
            SessionalFloor::Proportional { percent } => SessionalFloor::Proportional {
                percent: clamp_percent(percent, 0.0),
            },
        };
        self
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DisplayOptions {
    /// Decimal places used when rendering SPI/CPI values.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            decimal_places: default_decimal_places(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct GradingConfig {
    #[serde(default)]
    pub policy: FailPolicy,
    #[serde(default)]
    pub display: DisplayOptions,
}

impl GradingConfig {
    pub fn sanitize(mut self) -> Self {
        self.policy = self.policy.sanitize();
        if self.display.decimal_places > MAX_DECIMAL_PLACES {
            self.display.decimal_places = MAX_DECIMAL_PLACES;
        }
        self
    }

    pub fn default_config() -> Self {
        GradingConfig {
            policy: FailPolicy::default(),
            display: DisplayOptions::default(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let file_contents = fs::read_to_string(path)
            .map_err(|_| format!("Failed to read grading config at {path:?}"))?;

        let cfg: GradingConfig = serde_json::from_str(&file_contents)
            .map_err(|e| format!("Invalid grading config JSON format: {e}"))?;

        Ok(cfg.sanitize())
    }

    /// Loads `path` when given. A missing file falls back to defaults; a file
    /// that exists but cannot be parsed is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self, String> {
        match path {
            Some(p) if p.as_ref().exists() => Self::load(p),
            Some(p) => {
                warn!(
                    "Grading config {:?} not found, using defaults",
                    p.as_ref()
                );
                Ok(Self::default_config())
            }
            None => Ok(Self::default_config()),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        ensure_parent_dir(path)
            .map_err(|e| format!("Failed to create config directory: {e:?}"))?;

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config to JSON: {e}"))?;

        fs::write(path, json).map_err(|e| format!("Failed to write config file to disk: {e:?}"))?;

        Ok(())
    }
}

const MAX_DECIMAL_PLACES: u32 = 6;

fn clamp_percent(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        fallback
    }
}

//Default Functions
fn default_external_min_percent() -> f64 {
    35.0
}

fn default_termwork_min_percent() -> f64 {
    35.0
}

fn default_sessional_floor_marks() -> f64 {
    8.0
}

fn default_decimal_places() -> u32 {
    2
}
