use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSample {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// Combined effect sampled every `step_minutes`, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSeries {
    step_minutes: u32,
    samples: Vec<EffectSample>,
}

impl EffectSeries {
    pub fn empty(step_minutes: u32) -> Self {
        Self {
            step_minutes,
            samples: Vec::new(),
        }
    }

    /// Builds a series whose `i`th value sits at `start + i * step`.
    pub fn from_grid(start: NaiveDateTime, step_minutes: u32, values: Vec<f64>) -> Self {
        let step = Duration::minutes(i64::from(step_minutes));
        let samples = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| EffectSample {
                timestamp: start + step * i as i32,
                value,
            })
            .collect();
        Self {
            step_minutes,
            samples,
        }
    }

    /// Wraps already-sampled points, e.g. read back from an export.
    pub fn from_samples(step_minutes: u32, samples: Vec<EffectSample>) -> Self {
        Self {
            step_minutes,
            samples,
        }
    }

    pub fn step_minutes(&self) -> u32 {
        self.step_minutes
    }

    pub fn samples(&self) -> &[EffectSample] {
        &self.samples
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.samples.first().map(|s| s.timestamp)
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.samples.last().map(|s| s.timestamp)
    }

    pub fn max_value(&self) -> f64 {
        self.samples.iter().map(|s| s.value).fold(0.0, f64::max)
    }

    pub fn value_at(&self, timestamp: NaiveDateTime) -> Option<f64> {
        self.samples
            .iter()
            .find(|s| s.timestamp == timestamp)
            .map(|s| s.value)
    }

    /// The series with every value multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            step_minutes: self.step_minutes,
            samples: self
                .samples
                .iter()
                .map(|s| EffectSample {
                    timestamp: s.timestamp,
                    value: s.value * factor,
                })
                .collect(),
        }
    }
}
