use chrono::Duration;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STEP_MINUTES: u32 = 30;

/// The dose the percent table is expressed for.
pub const DEFAULT_REFERENCE_DOSE_MG: f64 = 40.0;

/// Effect percent every half hour after a 40 mg dose.
pub const DEFAULT_EFFECT_PERCENTS: [f64; 19] = [
    0.0, 0.0, 0.0, 50.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0,
    80.0, 60.0, 40.0, 20.0, 0.0,
];

/// Normalized effect curve of a reference-strength dose.
///
/// Sample `i` is the effect percent `i * step_minutes` after the dose. Other
/// dose amounts scale the whole curve linearly by `amount / reference_dose_mg`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectProfile {
    pub step_minutes: u32,
    pub reference_dose_mg: f64,
    pub percents: Vec<f64>,
}

impl Default for EffectProfile {
    fn default() -> Self {
        Self {
            step_minutes: DEFAULT_STEP_MINUTES,
            reference_dose_mg: DEFAULT_REFERENCE_DOSE_MG,
            percents: DEFAULT_EFFECT_PERCENTS.to_vec(),
        }
    }
}

impl EffectProfile {
    pub fn step(&self) -> Duration {
        Duration::minutes(i64::from(self.step_minutes))
    }

    /// Time from the dose to the last profile sample.
    pub fn effect_duration(&self) -> Duration {
        let intervals = self.percents.len().saturating_sub(1) as i32;
        self.step() * intervals
    }

    /// `(offset after the dose, percent)` pairs in order.
    pub fn samples(&self) -> impl Iterator<Item = (Duration, f64)> + '_ {
        let step = self.step();
        self.percents
            .iter()
            .enumerate()
            .map(move |(i, percent)| (step * i as i32, *percent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_effect_duration_is_nine_hours() {
        let profile = EffectProfile::default();
        assert_eq!(profile.percents.len(), 19);
        assert_eq!(profile.effect_duration(), Duration::minutes(540));
    }

    #[test]
    fn test_samples_are_offset_by_step() {
        let profile = EffectProfile::default();
        let samples: Vec<_> = profile.samples().collect();
        assert_eq!(samples[0], (Duration::zero(), 0.0));
        assert_eq!(samples[3], (Duration::minutes(90), 50.0));
        assert_eq!(samples[18], (Duration::minutes(540), 0.0));
    }

    #[test]
    fn test_empty_profile_has_zero_duration() {
        let profile = EffectProfile {
            percents: vec![],
            ..EffectProfile::default()
        };
        assert_eq!(profile.effect_duration(), Duration::zero());
        assert_eq!(profile.samples().count(), 0);
    }
}
