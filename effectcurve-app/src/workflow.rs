//! Orchestrates each command: load the store, compute, render, save.

use crate::config::AppConfig;
use crate::plotting;
use crate::render;
use anyhow::{Context, Result};
use effectcurve_core::{
    analysis,
    input::{self, parse_dose},
    logger::SeriesCsvWriter,
    store::DayStore,
    EffectSeries,
};
use effectcurve_schemas::day::Day;
use std::{fs, path::Path};
use tracing::debug;

fn load_store(config: &AppConfig) -> Result<DayStore> {
    DayStore::load(&config.data_file)
        .with_context(|| format!("Failed to load saved days from {:?}", config.data_file))
}

fn save_store(config: &AppConfig, store: &DayStore) -> Result<()> {
    store
        .save(&config.data_file)
        .with_context(|| format!("Failed to save days to {:?}", config.data_file))
}

fn compute_day(config: &AppConfig, day: &Day) -> Result<EffectSeries> {
    let aggregator = config.aggregator()?;
    debug!("Computing {} with {} dose(s)", day.name, day.doses.len());
    Ok(aggregator.compute(&day.doses))
}

pub fn list_days(config: &AppConfig) -> Result<()> {
    let store = load_store(config)?;
    for name in store.day_names() {
        let day = store.day(name)?;
        println!("{:<10} {} dose(s)", day.name, day.doses.len());
    }
    Ok(())
}

pub fn new_day(config: &AppConfig) -> Result<String> {
    let mut store = load_store(config)?;
    let name = store.create_day().name.clone();
    save_store(config, &store)?;
    println!("Started {}", name);
    Ok(name)
}

pub fn add_dose(config: &AppConfig, day: Option<&str>, amount: &str, time: &str) -> Result<()> {
    let dose = parse_dose(amount, time)?;
    let mut store = load_store(config)?;
    let day_name = store.resolve_day(day)?.name.clone();
    store.add_dose(&day_name, dose)?;
    save_store(config, &store)?;
    println!("Last dose: {} ({})", dose, day_name);
    Ok(())
}

pub fn remove_dose(
    config: &AppConfig,
    day: Option<&str>,
    amount: &str,
    time: &str,
) -> Result<usize> {
    let dose = parse_dose(amount, time)?;
    let mut store = load_store(config)?;
    let day_name = store.resolve_day(day)?.name.clone();
    let removed = store.remove_dose(&day_name, dose.amount_mg, dose.time)?;
    if removed == 0 {
        println!("No dose of {} in {}", dose, day_name);
        return Ok(0);
    }
    save_store(config, &store)?;
    println!("Removed {} dose(s) of {} from {}", removed, dose, day_name);
    Ok(removed)
}

pub fn show_day(config: &AppConfig, day: Option<&str>) -> Result<()> {
    let store = load_store(config)?;
    let day = store.resolve_day(day)?;
    let series = compute_day(config, day)?;

    print!("{}", render::render_doses(day));
    print!("{}", render::render_series_table(&series));
    if !series.is_empty() {
        let summary = analysis::summarize(&day.doses, &series, config.analysis.threshold_percent);
        print!("{}", render::render_summary(&summary));
    }
    Ok(())
}

pub fn plot(
    config: &AppConfig,
    day: Option<&str>,
    from_csv: Option<&Path>,
    output: &Path,
) -> Result<()> {
    let (series, subtitle) = match from_csv {
        Some(csv_path) => (
            plotting::parse_series_file(csv_path)?,
            csv_path.display().to_string(),
        ),
        None => {
            let store = load_store(config)?;
            let day = store.resolve_day(day)?;
            (compute_day(config, day)?, day.name.clone())
        }
    };

    plotting::plot_effect_series(output, &series, &subtitle, &config.chart)?;
    println!("Chart saved to '{}'", output.display());
    Ok(())
}

pub fn export(config: &AppConfig, day: Option<&str>, output: &Path, json: bool) -> Result<()> {
    let store = load_store(config)?;
    let day = store.resolve_day(day)?;
    let series = compute_day(config, day)?;

    if json {
        let content = serde_json::to_string_pretty(series.samples())?;
        fs::write(output, content)
            .with_context(|| format!("Failed to write series to {:?}", output))?;
    } else {
        let output_str = output
            .to_str()
            .with_context(|| format!("Output path is not valid UTF-8: {:?}", output))?;
        SeriesCsvWriter::create(output_str)?.write_series(&series)?;
    }
    println!("Exported {} sample(s) of {} to '{}'", series.len(), day.name, output.display());
    Ok(())
}

pub fn compute(config: &AppConfig, specs: &[String], json: bool) -> Result<()> {
    let doses = specs
        .iter()
        .map(|spec| input::parse_dose_spec(spec))
        .collect::<Result<Vec<_>, _>>()?;
    let series = config.aggregator()?.compute(&doses);

    if json {
        println!("{}", serde_json::to_string_pretty(series.samples())?);
    } else {
        print!("{}", render::render_series_table(&series));
        let summary = analysis::summarize(&doses, &series, config.analysis.threshold_percent);
        print!("{}", render::render_summary(&summary));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use effectcurve_core::EffectError;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> AppConfig {
        AppConfig::default().with_data_file(Some(dir.path().join("doses.json")))
    }

    #[test]
    fn test_add_new_day_and_remove() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        add_dose(&config, None, "40", "08:00").unwrap();
        assert_eq!(new_day(&config).unwrap(), "Day 2");
        add_dose(&config, None, "20", "09:30").unwrap();
        add_dose(&config, Some("Day 1"), "10", "12:00").unwrap();

        assert_eq!(
            fs::read_to_string(&config.data_file).unwrap(),
            r#"{"Day 1": [[40.0, "08:00"], [10.0, "12:00"]], "Day 2": [[20.0, "09:30"]]}"#
        );

        assert_eq!(remove_dose(&config, Some("Day 1"), "40", "08:00").unwrap(), 1);
        assert_eq!(remove_dose(&config, Some("Day 1"), "40", "08:00").unwrap(), 0);
        assert_eq!(
            fs::read_to_string(&config.data_file).unwrap(),
            r#"{"Day 1": [[10.0, "12:00"]], "Day 2": [[20.0, "09:30"]]}"#
        );
    }

    #[test]
    fn test_invalid_input_commits_nothing() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let err = add_dose(&config, None, "forty", "08:00").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EffectError>(),
            Some(EffectError::InvalidDoseAmount(_))
        ));
        let err = add_dose(&config, None, "40", "8am").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EffectError>(),
            Some(EffectError::InvalidTimeFormat(_))
        ));
        assert!(!config.data_file.exists());
    }

    #[test]
    fn test_unknown_day() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        assert!(add_dose(&config, Some("Day 5"), "40", "08:00").is_err());
        assert!(show_day(&config, Some("Day 5")).is_err());
    }

    #[test]
    fn test_export_csv_and_json() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        add_dose(&config, None, "40", "08:00").unwrap();

        let csv_path = dir.path().join("series.csv");
        export(&config, None, &csv_path, false).unwrap();
        let series = plotting::parse_series_file(&csv_path).unwrap();
        assert_eq!(series.len(), 19);
        assert_eq!(series.max_value(), 100.0);

        let json_path = dir.path().join("series.json");
        export(&config, None, &json_path, true).unwrap();
        let samples: Vec<serde_json::Value> =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(samples.len(), 19);
        assert_eq!(samples[4]["value"], 100.0);
    }

    #[test]
    fn test_show_and_compute_run() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        show_day(&config, None).unwrap();
        add_dose(&config, None, "40", "08:00").unwrap();
        show_day(&config, None).unwrap();

        compute(&config, &["40@08:00".to_string(), "20@12:00".to_string()], true).unwrap();
        assert!(compute(&config, &["40-08:00".to_string()], false).is_err());
    }
}
