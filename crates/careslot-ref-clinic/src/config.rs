//! Clinic configuration.
//!
//! Loaded from TOML. The reference clinic embeds `config/clinic.toml`; a
//! deployment can point at its own file instead.

use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use careslot_contracts::error::{CareError, CareResult};

/// The configuration shipped with the reference clinic.
pub const EMBEDDED_CONFIG: &str = include_str!("../config/clinic.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicConfig {
    pub session: SessionSettings,
    pub slots: SlotTemplate,
    #[serde(default)]
    pub booking: BookingSettings,
    #[serde(default)]
    pub forecast: ForecastSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    pub storage_key: String,
    pub directory: PathBuf,
}

impl SessionSettings {
    /// Path of the session record for the file-backed store.
    pub fn file_path(&self) -> PathBuf {
        self.directory.join(format!("{}.json", self.storage_key))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSettings {
    pub horizon_days: u32,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self { horizon_days: 90 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForecastSettings {
    /// Risk above this percentage recommends overbooking.
    pub overbooking_threshold: u8,
    /// Risk above this percentage is high.
    pub high_risk_threshold: u8,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            overbooking_threshold: 30,
            high_risk_threshold: 50,
        }
    }
}

/// A closed interval of the day with no slots, e.g. lunch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotBreak {
    pub start: String,
    pub end: String,
}

/// Generates the master slot list: every `interval_minutes` from `start`
/// (inclusive) to `end` (exclusive), skipping slots that begin inside a
/// break. Times are `HH:MM`, 24-hour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotTemplate {
    pub start: String,
    pub end: String,
    pub interval_minutes: u32,
    #[serde(default)]
    pub breaks: Vec<SlotBreak>,
}

fn parse_time(field: &str, value: &str) -> CareResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| CareError::ConfigError {
        reason: format!("slots.{} '{}' is not HH:MM: {}", field, value, e),
    })
}

impl SlotTemplate {
    /// Slot labels in the `09:00 AM` format.
    pub fn labels(&self) -> CareResult<Vec<String>> {
        if self.interval_minutes == 0 {
            return Err(CareError::ConfigError {
                reason: "slots.interval_minutes must be positive".to_string(),
            });
        }
        let start = parse_time("start", &self.start)?;
        let end = parse_time("end", &self.end)?;
        if start >= end {
            return Err(CareError::ConfigError {
                reason: format!(
                    "slots.start '{}' is not before slots.end '{}'",
                    self.start, self.end
                ),
            });
        }
        let breaks = self
            .breaks
            .iter()
            .map(|b| Ok((parse_time("breaks.start", &b.start)?, parse_time("breaks.end", &b.end)?)))
            .collect::<CareResult<Vec<_>>>()?;

        let step = Duration::minutes(i64::from(self.interval_minutes));
        let mut labels = Vec::new();
        let mut at = start;
        while at < end {
            if !breaks.iter().any(|(from, to)| at >= *from && at < *to) {
                labels.push(at.format("%I:%M %p").to_string());
            }
            let (next, wrapped) = at.overflowing_add_signed(step);
            if wrapped != 0 {
                break;
            }
            at = next;
        }

        if labels.is_empty() {
            return Err(CareError::ConfigError {
                reason: "slot template produces no slots".to_string(),
            });
        }
        Ok(labels)
    }
}

impl ClinicConfig {
    pub fn from_toml_str(s: &str) -> CareResult<Self> {
        let config: ClinicConfig = toml::from_str(s).map_err(|e| CareError::ConfigError {
            reason: format!("failed to parse clinic config TOML: {}", e),
        })?;
        if config.session.storage_key.trim().is_empty() {
            return Err(CareError::ConfigError {
                reason: "session.storage_key must not be empty".to_string(),
            });
        }
        config.slots.labels()?;
        debug!(storage_key = %config.session.storage_key, "clinic config loaded");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> CareResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CareError::ConfigError {
            reason: format!("failed to read clinic config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn embedded() -> CareResult<Self> {
        Self::from_toml_str(EMBEDDED_CONFIG)
    }
}
