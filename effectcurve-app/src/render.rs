//! Plain-text rendering of doses, series and summaries for the terminal.

use effectcurve_core::{analysis::EffectSummary, EffectSeries};
use effectcurve_schemas::day::Day;

const BAR_WIDTH: f64 = 40.0;

pub fn render_doses(day: &Day) -> String {
    if day.is_empty() {
        return format!("{}: no doses added yet.\n", day.name);
    }
    let mut output = format!("{}:\n", day.name);
    for dose in &day.doses {
        output.push_str(&format!("  - {}\n", dose));
    }
    output
}

/// One line per sample: time, value and a bar scaled to the series peak.
pub fn render_series_table(series: &EffectSeries) -> String {
    if series.is_empty() {
        return "No effect to show.\n".to_string();
    }

    let scale_max = series.max_value().max(100.0);
    let mut output = String::new();
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for sample in series.samples() {
        let bar_length = ((sample.value.max(0.0) / scale_max) * BAR_WIDTH).round() as usize;
        output.push_str(&format!(
            "{} {:>7.1}% {}\n",
            sample.timestamp.format("%H:%M"),
            sample.value,
            "█".repeat(bar_length)
        ));
    }

    output.push_str(&"─".repeat(60));
    output.push('\n');
    output
}

pub fn render_summary(summary: &EffectSummary) -> String {
    let time = |t: Option<chrono::NaiveDateTime>| {
        t.map_or("-".to_string(), |t| t.format("%H:%M").to_string())
    };
    let mut output = String::from("Summary:\n");
    output.push_str(&format!("  - Total dose:        {} mg\n", summary.total_dose_mg));
    output.push_str(&format!(
        "  - Peak effect:       {:.1}% at {}\n",
        summary.peak_value,
        time(summary.peak_at)
    ));
    output.push_str(&format!("  - Onset:             {}\n", time(summary.onset_at)));
    output.push_str(&format!("  - Last effect:       {}\n", time(summary.wear_off_at)));
    output.push_str(&format!(
        "  - At or above {:.0}%:   {}h{:02}m\n",
        summary.threshold_percent,
        summary.minutes_at_or_above_threshold / 60,
        summary.minutes_at_or_above_threshold % 60
    ));
    output.push_str(&format!(
        "  - Area under curve:  {:.1} %·h\n",
        summary.area_percent_hours
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use effectcurve_core::analysis;
    use effectcurve_schemas::dose::DoseEvent;

    fn start() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_series_table_rows() {
        let series = EffectSeries::from_grid(start(), 30, vec![0.0, 50.0, 100.0]);
        let table = render_series_table(&series);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "08:00     0.0% ");
        assert_eq!(lines[2], format!("08:30    50.0% {}", "█".repeat(20)));
        assert_eq!(lines[3], format!("09:00   100.0% {}", "█".repeat(40)));
    }

    #[test]
    fn test_empty_renders() {
        assert_eq!(render_series_table(&EffectSeries::empty(30)), "No effect to show.\n");
        assert_eq!(render_doses(&Day::new("Day 4")), "Day 4: no doses added yet.\n");
    }

    #[test]
    fn test_doses_listing() {
        let mut day = Day::new("Day 1");
        day.doses
            .push(DoseEvent::new(40.0, NaiveTime::from_hms_opt(8, 0, 0).unwrap()));
        assert_eq!(render_doses(&day), "Day 1:\n  - 40 mg at 08:00\n");
    }

    #[test]
    fn test_summary_mentions_peak() {
        let series = EffectSeries::from_grid(start(), 30, vec![0.0, 50.0, 100.0, 0.0]);
        let summary = analysis::summarize(&[], &series, 50.0);
        let text = render_summary(&summary);
        assert!(text.contains("Peak effect:       100.0% at 09:00"));
        assert!(text.contains("At or above 50%:   1h00m"));
    }
}
