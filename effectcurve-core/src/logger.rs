use crate::{aggregation::series::EffectSeries, error::EffectError};
use chrono::NaiveDateTime;
use csv::Writer;
use serde::{Deserialize, Serialize};
use std::{fs, io};

/// One row of an exported effect series.
#[derive(Debug, Serialize, Deserialize)]
pub struct SeriesRow {
    pub timestamp: NaiveDateTime,
    pub time: String,
    pub effect_percent: f64,
}

/// Writes effect series to CSV, one sample per row.
pub struct SeriesCsvWriter<W: io::Write> {
    writer: Writer<W>,
    target: String,
}

impl SeriesCsvWriter<fs::File> {
    pub fn create(path: &str) -> Result<Self, EffectError> {
        let writer =
            Writer::from_path(path).map_err(|e| EffectError::CsvError(path.to_string(), e))?;
        Ok(Self {
            writer,
            target: path.to_string(),
        })
    }
}

impl<W: io::Write> SeriesCsvWriter<W> {
    pub fn from_writer(inner: W) -> Self {
        Self {
            writer: Writer::from_writer(inner),
            target: "<writer>".to_string(),
        }
    }

    pub fn write_series(&mut self, series: &EffectSeries) -> Result<(), EffectError> {
        for sample in series.samples() {
            let row = SeriesRow {
                timestamp: sample.timestamp,
                time: sample.timestamp.format("%H:%M").to_string(),
                effect_percent: sample.value,
            };
            self.writer
                .serialize(row)
                .map_err(|e| EffectError::CsvError(self.target.clone(), e))?;
        }
        self.writer
            .flush()
            .map_err(|e| EffectError::FileIO(self.target.clone(), e))?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W, EffectError> {
        let target = self.target;
        self.writer
            .into_inner()
            .map_err(|e| EffectError::FileIO(target, e.into_error()))
    }
}
