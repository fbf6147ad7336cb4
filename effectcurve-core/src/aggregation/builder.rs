use crate::{aggregation::engine::EffectAggregator, error::EffectError};
use chrono::NaiveDate;
use effectcurve_schemas::profile::EffectProfile;

/// A fluent builder for constructing an `EffectAggregator`.
///
/// The builder is where a configured profile is checked, so a built
/// aggregator can compute any dose set without failing.
#[derive(Default)]
pub struct AggregatorBuilder {
    profile: Option<EffectProfile>,
    reference_date: Option<NaiveDate>,
}

impl AggregatorBuilder {
    /// Creates a new builder using the default 40 mg profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the effect profile every dose is shifted and scaled from.
    pub fn with_profile(mut self, profile: EffectProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Pins the date dose times are placed on. Without it the current local
    /// date is used at compute time.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Consumes the builder and returns an `EffectAggregator`.
    ///
    /// # Errors
    ///
    /// Returns `EffectError::InvalidProfile` if the profile has no samples, a
    /// zero step, a non-positive reference dose or a non-finite percent.
    pub fn build(self) -> Result<EffectAggregator, EffectError> {
        let profile = self.profile.unwrap_or_default();
        validate_profile(&profile)?;

        Ok(EffectAggregator {
            profile,
            reference_date: self.reference_date,
        })
    }
}

fn validate_profile(profile: &EffectProfile) -> Result<(), EffectError> {
    if profile.percents.is_empty() {
        return Err(EffectError::InvalidProfile(
            "profile must have at least one sample".to_string(),
        ));
    }
    if profile.step_minutes == 0 {
        return Err(EffectError::InvalidProfile(
            "step_minutes must be greater than zero".to_string(),
        ));
    }
    if !(profile.reference_dose_mg.is_finite() && profile.reference_dose_mg > 0.0) {
        return Err(EffectError::InvalidProfile(format!(
            "reference_dose_mg must be a positive number, got {}",
            profile.reference_dose_mg
        )));
    }
    if let Some(i) = profile.percents.iter().position(|p| !p.is_finite()) {
        return Err(EffectError::InvalidProfile(format!(
            "percent at sample {} is not a finite number",
            i
        )));
    }
    Ok(())
}
