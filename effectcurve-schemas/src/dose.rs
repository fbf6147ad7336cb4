use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The on-disk and on-screen format for a dose's time of day.
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M";

/// A single administration of `amount_mg` at a time of day.
///
/// There is no date component: every dose of a day is placed on the same
/// reference date before aggregation. On disk a dose is the pair
/// `[amount, "HH:MM"]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, String)", into = "(f64, String)")]
pub struct DoseEvent {
    pub amount_mg: f64,
    pub time: NaiveTime,
}

impl DoseEvent {
    pub fn new(amount_mg: f64, time: NaiveTime) -> Self {
        Self { amount_mg, time }
    }

    /// The dose time formatted as `HH:MM`.
    pub fn time_label(&self) -> String {
        self.time.format(TIME_OF_DAY_FORMAT).to_string()
    }

    /// Whether this dose is the `(amount, time)` pair used as a deletion key.
    pub fn matches(&self, amount_mg: f64, time: NaiveTime) -> bool {
        self.amount_mg == amount_mg && self.time == time
    }
}

impl TryFrom<(f64, String)> for DoseEvent {
    type Error = String;

    fn try_from((amount_mg, time): (f64, String)) -> Result<Self, Self::Error> {
        let time = NaiveTime::parse_from_str(&time, TIME_OF_DAY_FORMAT)
            .map_err(|e| format!("invalid time of day '{}': {}", time, e))?;
        Ok(Self { amount_mg, time })
    }
}

impl From<DoseEvent> for (f64, String) {
    fn from(dose: DoseEvent) -> Self {
        (dose.amount_mg, dose.time_label())
    }
}

impl fmt::Display for DoseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mg at {}", self.amount_mg, self.time_label())
    }
}
