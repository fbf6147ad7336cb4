use crate::aggregation::{builder::AggregatorBuilder, series::EffectSeries};
use chrono::{Local, NaiveDate, NaiveDateTime};
use effectcurve_schemas::{dose::DoseEvent, profile::EffectProfile};
use tracing::debug;

/// Sums the time-shifted, amount-scaled effect profile of every dose onto a
/// uniform grid.
///
/// The aggregator holds no mutable state; one instance can serve any number
/// of independent dose sets, from any thread.
#[derive(Debug, Clone, Default)]
pub struct EffectAggregator {
    pub(super) profile: EffectProfile,
    pub(super) reference_date: Option<NaiveDate>,
}

impl EffectAggregator {
    pub fn builder() -> AggregatorBuilder {
        AggregatorBuilder::new()
    }

    pub fn profile(&self) -> &EffectProfile {
        &self.profile
    }

    /// The date every dose time is placed on.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Computes the combined effect series for `doses`.
    ///
    /// The grid starts at the earliest dose and runs in profile steps up to
    /// the latest dose plus the effect duration. A dose's sample falling past
    /// the last grid point is dropped; every other sample is added to the
    /// nearest grid point. Times are all placed on one reference date, so a
    /// 00:30 dose is earlier than a 23:30 dose rather than a day later.
    pub fn compute(&self, doses: &[DoseEvent]) -> EffectSeries {
        let step = self.profile.step();
        let reference_date = self.reference_date();
        let normalized: Vec<(f64, NaiveDateTime)> = doses
            .iter()
            .map(|dose| (dose.amount_mg, reference_date.and_time(dose.time)))
            .collect();

        let (Some(start), Some(latest)) = (
            normalized.iter().map(|(_, t)| *t).min(),
            normalized.iter().map(|(_, t)| *t).max(),
        ) else {
            return EffectSeries::empty(self.profile.step_minutes);
        };
        let end = latest + self.profile.effect_duration();

        let step_seconds = step.num_seconds();
        let grid_len = ((end - start).num_seconds() / step_seconds) as usize + 1;
        let last = start + step * (grid_len - 1) as i32;
        debug!(
            "Grid {} -> {} ({} points, requested end {})",
            start, last, grid_len, end
        );

        let mut values = vec![0.0; grid_len];
        for (amount_mg, dose_time) in &normalized {
            let scale = amount_mg / self.profile.reference_dose_mg;
            debug!("Applying {} mg at {}, scale={}", amount_mg, dose_time.time(), scale);

            for (offset, percent) in self.profile.samples() {
                let sample_time = *dose_time + offset;
                if sample_time > last {
                    debug!("Dropping samples from {} onwards: past end of grid", sample_time);
                    break;
                }
                let pos = nearest_grid_index(start, sample_time, step_seconds, grid_len);
                values[pos] += percent * scale;
            }
        }

        EffectSeries::from_grid(start, self.profile.step_minutes, values)
    }
}

/// Index of the grid point nearest to `time`; halfway ties go to the later
/// point.
fn nearest_grid_index(
    start: NaiveDateTime,
    time: NaiveDateTime,
    step_seconds: i64,
    grid_len: usize,
) -> usize {
    let offset = (time - start).num_seconds();
    let below = offset / step_seconds;
    let remainder = offset % step_seconds;
    let index = if remainder * 2 >= step_seconds { below + 1 } else { below };
    (index.max(0) as usize).min(grid_len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use effectcurve_schemas::profile::DEFAULT_EFFECT_PERCENTS;

    fn aggregator() -> EffectAggregator {
        EffectAggregator::builder()
            .with_reference_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
            .build()
            .unwrap()
    }

    fn dose(amount_mg: f64, hour: u32, minute: u32) -> DoseEvent {
        DoseEvent::new(amount_mg, NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
    }

    #[test]
    fn test_empty_doses_give_empty_series() {
        let series = aggregator().compute(&[]);
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
    }

    #[test]
    fn test_single_reference_dose_reproduces_profile() {
        let series = aggregator().compute(&[dose(40.0, 8, 0)]);
        assert_eq!(series.len(), 19);
        assert_eq!(series.start().unwrap().time(), NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(series.end().unwrap().time(), NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        assert_eq!(series.values(), DEFAULT_EFFECT_PERCENTS.to_vec());
    }

    #[test]
    fn test_off_grid_dose_snaps_to_nearest_point() {
        // Grid starts at 08:00; the 08:10 dose lands on 08:00, 08:30, ...
        let series = aggregator().compute(&[dose(40.0, 8, 0), dose(40.0, 8, 10)]);
        assert_eq!(series.len(), 19);
        assert_eq!(series.samples()[3].value, 100.0);
        assert_eq!(series.samples()[4].value, 200.0);
    }

    #[test]
    fn test_halfway_sample_snaps_to_later_point() {
        let series = aggregator().compute(&[dose(0.0, 8, 0), dose(40.0, 8, 15)]);
        // 08:15 + 90min = 09:45 is halfway between 09:30 and 10:00.
        assert_eq!(series.samples()[3].value, 0.0);
        assert_eq!(series.samples()[4].value, 50.0);
    }

    #[test]
    fn test_samples_past_grid_end_are_dropped() {
        let profile = EffectProfile {
            percents: vec![10.0, 20.0, 30.0],
            ..EffectProfile::default()
        };
        let aggregator = EffectAggregator::builder()
            .with_profile(profile)
            .with_reference_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
            .build()
            .unwrap();

        // end = 08:20 + 60min = 09:20, so the grid is 08:00, 08:30, 09:00.
        // The 08:20 dose's last sample (09:20) is past 09:00 and dropped
        // rather than piled onto the last point.
        let series = aggregator.compute(&[dose(40.0, 8, 0), dose(40.0, 8, 20)]);
        assert_eq!(series.len(), 3);
        assert_eq!(series.values(), vec![10.0, 20.0 + 10.0, 30.0 + 20.0]);
    }

    #[test]
    fn test_midnight_is_not_wrapped() {
        let series = aggregator().compute(&[dose(40.0, 23, 30), dose(40.0, 0, 30)]);
        let start = series.start().unwrap();
        assert_eq!(start.time(), NaiveTime::from_hms_opt(0, 30, 0).unwrap());
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        // 00:30 .. 23:30 + 9h = 08:30 next day, a 32h span at 30min steps.
        assert_eq!(series.len(), 65);
    }

    #[test]
    fn test_nearest_grid_index() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let at = |h, m| start.date().and_hms_opt(h, m, 0).unwrap();
        assert_eq!(nearest_grid_index(start, at(8, 0), 1800, 5), 0);
        assert_eq!(nearest_grid_index(start, at(8, 14), 1800, 5), 0);
        assert_eq!(nearest_grid_index(start, at(8, 15), 1800, 5), 1);
        assert_eq!(nearest_grid_index(start, at(8, 44), 1800, 5), 1);
        assert_eq!(nearest_grid_index(start, at(12, 0), 1800, 5), 4);
    }
}
