//! Boundary validation for user-entered doses.
//!
//! Everything that reaches the aggregation engine has passed through here, so
//! the engine itself never has to reject a value.

use crate::error::EffectError;
use chrono::NaiveTime;
use effectcurve_schemas::dose::{DoseEvent, TIME_OF_DAY_FORMAT};

/// Parses a 24h `HH:MM` time of day.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, EffectError> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, TIME_OF_DAY_FORMAT)
        .map_err(|_| EffectError::InvalidTimeFormat(trimmed.to_string()))
}

/// Parses a dose amount in mg. Accepts an optional `mg` suffix.
pub fn parse_dose_amount(input: &str) -> Result<f64, EffectError> {
    let trimmed = input.trim();
    let number = trimmed
        .strip_suffix("mg")
        .map_or(trimmed, str::trim_end);
    match number.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(EffectError::InvalidDoseAmount(trimmed.to_string())),
    }
}

pub fn parse_dose(amount: &str, time: &str) -> Result<DoseEvent, EffectError> {
    let time = parse_time_of_day(time)?;
    let amount_mg = parse_dose_amount(amount)?;
    Ok(DoseEvent::new(amount_mg, time))
}

/// Parses the `AMOUNT@HH:MM` shorthand, e.g. `40@08:00` or `20mg@13:30`.
pub fn parse_dose_spec(spec: &str) -> Result<DoseEvent, EffectError> {
    let (amount, time) = spec
        .split_once('@')
        .ok_or_else(|| EffectError::InvalidDoseAmount(spec.trim().to_string()))?;
    parse_dose(amount, time)
}
