use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Condition {
    pub main_category: String,
    pub icon_id: String,
}

/// One forecast point, typically 3 hours apart from its neighbours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp_utc: i64,
    pub temperature: Option<f64>,
    pub temperature_min: Option<f64>,
    pub temperature_max: Option<f64>,
    pub condition: Condition,
    pub humidity: u8,
    pub wind_speed: f64,
}

impl Sample {
    /// Returns the (min, max) temperature span of the slot.
    ///
    /// Missing min/max fall back on the plain temperature, and then on each other.
    /// Returns None when the sample carries no temperature reading at all.
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        let min = self.temperature_min.or(self.temperature).or(self.temperature_max)?;
        let max = self.temperature_max.or(self.temperature).or(self.temperature_min)?;

        Some((min.min(max), min.max(max)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub condition: Condition,
    pub humidity: u8,
    pub wind_speed: f64,
}
