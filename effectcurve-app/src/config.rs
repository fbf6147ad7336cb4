use anyhow::{Context, Result};
use effectcurve_core::EffectAggregator;
use effectcurve_schemas::profile::EffectProfile;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = "effectcurve.yaml";
pub const DEFAULT_DATA_FILE: &str = "doses.json";

/// Settings loaded from the YAML configuration file. Every field is
/// optional; a missing file means all defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub profile: EffectProfile,
    pub chart: ChartConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Effect percent counted as "in effect" for the summary.
    pub threshold_percent: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            profile: EffectProfile::default(),
            chart: ChartConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            title: "Combined Effect of Doses".to_string(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold_percent: 50.0,
        }
    }
}

impl AppConfig {
    /// Loads the configuration.
    ///
    /// An explicitly given path must exist. Without one, the default path is
    /// read if present and defaults are used otherwise.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = match explicit_path {
            Some(path) => path,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if !default_path.exists() {
                    return Ok(Self::default());
                }
                default_path
            }
        };

        info!("Loading configuration from '{}'", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse YAML from {:?}", path))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Applies command-line overrides.
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.data_file = path;
        }
        self
    }

    /// Builds the aggregator for the configured profile.
    pub fn aggregator(&self) -> Result<EffectAggregator> {
        EffectAggregator::builder()
            .with_profile(self.profile.clone())
            .build()
            .context("Configured effect profile is not usable")
    }
}
