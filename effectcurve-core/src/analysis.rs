use crate::aggregation::series::EffectSeries;
use chrono::NaiveDateTime;
use effectcurve_schemas::dose::DoseEvent;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct EffectSummary {
    pub total_dose_mg: f64,
    pub peak_value: f64,
    pub peak_at: Option<NaiveDateTime>,
    pub onset_at: Option<NaiveDateTime>,
    pub wear_off_at: Option<NaiveDateTime>,
    pub threshold_percent: f64,
    pub minutes_at_or_above_threshold: i64,
    /// Trapezoidal area under the curve, in percent-hours.
    pub area_percent_hours: f64,
}

pub fn total_dose_mg(doses: &[DoseEvent]) -> f64 {
    doses.iter().map(|d| d.amount_mg).sum()
}

/// Peak, onset, wear-off, time above `threshold_percent` and area for a
/// computed series. The earliest sample wins a tie for the peak.
pub fn summarize(
    doses: &[DoseEvent],
    series: &EffectSeries,
    threshold_percent: f64,
) -> EffectSummary {
    let mut summary = EffectSummary {
        total_dose_mg: total_dose_mg(doses),
        threshold_percent,
        ..EffectSummary::default()
    };
    let samples = series.samples();
    let step_minutes = i64::from(series.step_minutes());

    for sample in samples {
        if summary.peak_at.is_none() || sample.value > summary.peak_value {
            summary.peak_value = sample.value;
            summary.peak_at = Some(sample.timestamp);
        }
        if sample.value > 0.0 {
            summary.onset_at.get_or_insert(sample.timestamp);
            summary.wear_off_at = Some(sample.timestamp);
        }
        if sample.value >= threshold_percent {
            summary.minutes_at_or_above_threshold += step_minutes;
        }
    }

    let step_hours = step_minutes as f64 / 60.0;
    summary.area_percent_hours = samples
        .windows(2)
        .map(|pair| (pair[0].value + pair[1].value) / 2.0 * step_hours)
        .sum();

    summary
}
