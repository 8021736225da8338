//! Calendar configuration.
//!
//! Loaded from TOML; every key is optional and falls back to the defaults
//! below.
//!
//! ```toml
//! timezone = "Europe/Paris"
//! lookahead_days = 14
//! max_upcoming_events = 5
//! weekend_mask = 65
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::bucket::DEFAULT_WEEKEND_MASK;
use crate::calendar::{GregorianCalendar, parse_tz};
use crate::error::{CalendarError, Result};

pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 21;
pub const DEFAULT_MAX_UPCOMING_EVENTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    /// IANA timezone the calendar is observed in.
    pub timezone: String,
    /// Length of the upcoming view in days.
    pub lookahead_days: u32,
    /// Cap on events listed by the upcoming view.
    pub max_upcoming_events: usize,
    /// Bit `n` set marks weekday `n % days_per_week` as weekend.
    pub weekend_mask: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
            max_upcoming_events: DEFAULT_MAX_UPCOMING_EVENTS,
            weekend_mask: DEFAULT_WEEKEND_MASK,
        }
    }
}

impl CalendarConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: CalendarConfig =
            toml::from_str(input).map_err(|e| CalendarError::ConfigError(e.to_string()))?;
        parse_tz(&config.timezone)?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CalendarError::ConfigError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// The Gregorian calendar in the configured timezone.
    pub fn calendar(&self) -> Result<GregorianCalendar> {
        GregorianCalendar::from_tz_name(&self.timezone)
    }
}
