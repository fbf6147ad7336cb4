pub mod builder;
pub mod engine;
pub mod series;

use effectcurve_schemas::dose::DoseEvent;

/// Combined effect of `doses` under the default 40 mg profile, placed on
/// today's date.
pub fn compute_effect_series(doses: &[DoseEvent]) -> series::EffectSeries {
    engine::EffectAggregator::default().compute(doses)
}
