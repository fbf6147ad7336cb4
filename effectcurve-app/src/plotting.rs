//! This module is responsible for drawing effect series to PNG charts.

use crate::config::ChartConfig;
use anyhow::{bail, Context, Result};
use chrono::Duration;
use effectcurve_core::{
    logger::SeriesRow,
    EffectSample, EffectSeries,
};
use plotters::{coord::Shift, prelude::*};
use std::path::Path;

const BACKGROUND: RGBColor = RGBColor(18, 18, 18);
const GRID: RGBColor = RGBColor(90, 90, 90);

/// Draws `series` as a line with markers, x ticks every series step.
pub fn plot_effect_series(
    output_path: &Path,
    series: &EffectSeries,
    subtitle: &str,
    chart_config: &ChartConfig,
) -> Result<()> {
    if series.is_empty() {
        bail!("Nothing to plot: the series is empty");
    }

    let root = BitMapBackend::new(output_path, (chart_config.width, chart_config.height))
        .into_drawing_area();
    draw_effect_chart(&root, series, subtitle, chart_config)?;
    root.present()
        .with_context(|| format!("Failed to write chart to {:?}", output_path))?;
    Ok(())
}

/// Tick positions in minutes from the series start, one per step up to and
/// including `total_minutes`.
fn time_key_points(total_minutes: i64, step_minutes: i64) -> Vec<i64> {
    (0..=total_minutes).step_by(step_minutes.max(1) as usize).collect()
}

fn draw_effect_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &EffectSeries,
    subtitle: &str,
    chart_config: &ChartConfig,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (Some(start), Some(end)) = (series.start(), series.end()) else {
        bail!("Nothing to plot: the series is empty");
    };
    root.fill(&BACKGROUND)?;

    let total_minutes = (end - start).num_minutes().max(1);
    let step_minutes = i64::from(series.step_minutes());
    let y_max = series.max_value().max(100.0) * 1.1;
    let caption = format!("{} ({})", chart_config.title, subtitle);
    let key_points = time_key_points(total_minutes, step_minutes);
    let x_range = (0i64..total_minutes).with_key_points(key_points);

    let mut chart = ChartBuilder::on(root)
        .caption(caption, ("sans-serif", 30).into_font().color(&WHITE))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, 0f64..y_max)?;

    let time_label = |minutes: &i64| {
        (start + Duration::minutes(*minutes))
            .format("%H:%M")
            .to_string()
    };
    chart
        .configure_mesh()
        .x_label_formatter(&time_label)
        .x_desc("Time")
        .y_desc("Effect (%)")
        .axis_style(WHITE)
        .label_style(("sans-serif", 14).into_font().color(&WHITE))
        .light_line_style(TRANSPARENT)
        .bold_line_style(GRID.mix(0.5))
        .draw()?;

    let points: Vec<(i64, f64)> = series
        .samples()
        .iter()
        .map(|s| ((s.timestamp - start).num_minutes(), s.value))
        .collect();

    chart.draw_series(LineSeries::new(points.iter().copied(), CYAN.stroke_width(2)))?;
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 4, CYAN.filled())),
    )?;
    Ok(())
}

/// Reads a series previously written by the CSV exporter.
pub fn parse_series_file(path: &Path) -> Result<EffectSeries> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open series file: {:?}", path))?;
    let mut samples = Vec::new();

    for result in reader.deserialize() {
        let row: SeriesRow =
            result.with_context(|| format!("Failed to parse series row in {:?}", path))?;
        samples.push(EffectSample {
            timestamp: row.timestamp,
            value: row.effect_percent,
        });
    }

    let step_minutes = match samples.as_slice() {
        [first, second, ..] => (second.timestamp - first.timestamp).num_minutes(),
        _ => i64::from(effectcurve_schemas::profile::DEFAULT_STEP_MINUTES),
    };
    if step_minutes <= 0 {
        bail!("Series in {:?} is not in chronological order", path);
    }

    Ok(EffectSeries::from_samples(step_minutes as u32, samples))
}
