//! The owned store of saved days and its on-disk form.

pub mod python_json;

use crate::error::EffectError;
use chrono::NaiveTime;
use effectcurve_schemas::{
    day::Day,
    dose::DoseEvent,
    file_formats::DaysFile,
};
use std::{cmp::Ordering, fs, path::Path};
use tracing::{debug, info};

/// Named days of doses, in the order they were created or loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct DayStore {
    days: Vec<Day>,
}

impl Default for DayStore {
    /// A store holding a single empty `Day 1`.
    fn default() -> Self {
        Self {
            days: vec![Day::numbered(1)],
        }
    }
}

impl DayStore {
    pub fn from_file(file: DaysFile) -> Self {
        Self { days: file.days }
    }

    pub fn to_file(&self) -> DaysFile {
        DaysFile {
            days: self.days.clone(),
        }
    }

    /// Loads the store from `path`, or starts a fresh one if the file does
    /// not exist yet. A file with no days also starts with an empty `Day 1`.
    pub fn load(path: &Path) -> Result<Self, EffectError> {
        let path_label = path.display().to_string();
        if !path.exists() {
            info!("No saved days at '{}', starting with an empty Day 1", path_label);
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).map_err(|e| EffectError::FileIO(path_label.clone(), e))?;
        let file: DaysFile = serde_json::from_str(&content)
            .map_err(|e| EffectError::JsonParsing(path_label.clone(), e))?;
        info!("Loaded {} day(s) from '{}'", file.days.len(), path_label);
        if file.days.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self::from_file(file))
    }

    /// Writes every day to `path` in the saved-days layout.
    pub fn save(&self, path: &Path) -> Result<(), EffectError> {
        let path_label = path.display().to_string();
        let bytes = python_json::to_python_json(&self.to_file())
            .map_err(|e| EffectError::JsonParsing(path_label.clone(), e))?;
        fs::write(path, bytes).map_err(|e| EffectError::FileIO(path_label.clone(), e))?;
        info!("Saved {} day(s) to '{}'", self.days.len(), path_label);
        Ok(())
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn day(&self, name: &str) -> Result<&Day, EffectError> {
        self.days
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| EffectError::DayNotFound(name.to_string()))
    }

    fn day_mut(&mut self, name: &str) -> Result<&mut Day, EffectError> {
        self.days
            .iter_mut()
            .find(|d| d.name == name)
            .ok_or_else(|| EffectError::DayNotFound(name.to_string()))
    }

    /// Day names ordered by their `Day N` index; names without an index
    /// follow, alphabetically.
    pub fn day_names(&self) -> Vec<&str> {
        let mut days: Vec<&Day> = self.days.iter().collect();
        days.sort_by(|a, b| compare_days(a, b));
        days.into_iter().map(|d| d.name.as_str()).collect()
    }

    /// The highest-numbered day, or the last name in `day_names` order when
    /// no day carries an index.
    pub fn latest_day(&self) -> Option<&Day> {
        self.days
            .iter()
            .filter(|d| d.index().is_some())
            .max_by_key(|d| d.index())
            .or_else(|| self.days.iter().max_by(|a, b| compare_days(a, b)))
    }

    /// The named day, or the latest one when no name is given.
    pub fn resolve_day(&self, name: Option<&str>) -> Result<&Day, EffectError> {
        match name {
            Some(name) => self.day(name),
            None => self
                .latest_day()
                .ok_or_else(|| EffectError::DayNotFound("<latest>".to_string())),
        }
    }

    /// Appends an empty day numbered one past the highest existing index.
    pub fn create_day(&mut self) -> &Day {
        let next_index = self.days.iter().filter_map(Day::index).max().unwrap_or(0) + 1;
        debug!("Creating Day {}", next_index);
        self.days.push(Day::numbered(next_index));
        &self.days[self.days.len() - 1]
    }

    pub fn add_dose(&mut self, day: &str, dose: DoseEvent) -> Result<(), EffectError> {
        self.day_mut(day)?.doses.push(dose);
        Ok(())
    }

    /// Removes every dose of `day` equal to `(amount_mg, time)` and returns
    /// how many were removed.
    pub fn remove_dose(
        &mut self,
        day: &str,
        amount_mg: f64,
        time: NaiveTime,
    ) -> Result<usize, EffectError> {
        let doses = &mut self.day_mut(day)?.doses;
        let before = doses.len();
        doses.retain(|d| !d.matches(amount_mg, time));
        Ok(before - doses.len())
    }
}

fn compare_days(a: &Day, b: &Day) -> Ordering {
    match (a.index(), b.index()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    }
}
