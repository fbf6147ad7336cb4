//! Command-line interface argument parsing.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Track doses by day and chart their combined effect over time.
///
/// Examples:
///   effectcurve add --time 08:00 --dose 40
///   effectcurve show --day "Day 2"
///   effectcurve plot --output effect.png
///   effectcurve compute --dose 40@08:00 --dose 20@13:00
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the YAML configuration file
    ///
    /// If not specified, effectcurve.yaml in the current directory is used
    /// when it exists.
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Saved-days JSON file (overrides the configured data_file)
    #[arg(long, value_name = "FILE", global = true)]
    pub data_file: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List saved days
    Days,

    /// Start a new, empty day
    NewDay,

    /// Add a dose to a day
    Add {
        #[command(flatten)]
        dose: DoseArgs,

        /// Day to add to (defaults to the latest day)
        #[arg(long, value_name = "NAME")]
        day: Option<String>,
    },

    /// Remove every matching dose from a day
    Remove {
        #[command(flatten)]
        dose: DoseArgs,

        /// Day to remove from (defaults to the latest day)
        #[arg(long, value_name = "NAME")]
        day: Option<String>,
    },

    /// Print a day's doses, effect table and summary
    Show {
        /// Day to show (defaults to the latest day)
        #[arg(long, value_name = "NAME")]
        day: Option<String>,
    },

    /// Render a day's effect curve to a PNG chart
    Plot {
        /// Day to plot (defaults to the latest day)
        #[arg(long, value_name = "NAME", conflicts_with = "from_csv")]
        day: Option<String>,

        /// Plot a previously exported CSV series instead of a saved day
        #[arg(long, value_name = "FILE")]
        from_csv: Option<PathBuf>,

        /// Output PNG path
        #[arg(short, long, default_value = "effect.png", value_name = "FILE")]
        output: PathBuf,
    },

    /// Export a day's effect series
    Export {
        /// Day to export (defaults to the latest day)
        #[arg(long, value_name = "NAME")]
        day: Option<String>,

        /// Output file path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Output format
        #[arg(long, default_value = "csv", value_name = "FORMAT")]
        format: ExportFormat,
    },

    /// Compute a series for ad-hoc doses without touching saved days
    Compute {
        /// Dose as AMOUNT@HH:MM, e.g. 40@08:00 (repeatable)
        #[arg(long = "dose", value_name = "AMOUNT@HH:MM", required = true)]
        doses: Vec<String>,

        /// Print the series as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct DoseArgs {
    /// Dose time of day (HH:MM, 24h)
    #[arg(short, long, value_name = "HH:MM")]
    pub time: String,

    /// Dose amount in mg
    #[arg(short, long, value_name = "MG")]
    pub dose: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let args = Args::try_parse_from([
            "effectcurve", "add", "--time", "08:00", "--dose", "40", "--day", "Day 2",
        ])
        .unwrap();
        match args.command {
            Command::Add { dose, day } => {
                assert_eq!(dose.time, "08:00");
                assert_eq!(dose.dose, "40");
                assert_eq!(day.as_deref(), Some("Day 2"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["effectcurve", "days", "--data-file", "x.json", "-v"]).unwrap();
        assert_eq!(args.data_file, Some(PathBuf::from("x.json")));
        assert_eq!(args.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_compute_requires_doses() {
        assert!(Args::try_parse_from(["effectcurve", "compute"]).is_err());
        let args = Args::try_parse_from([
            "effectcurve", "compute", "--dose", "40@08:00", "--dose", "20@12:00", "--json",
        ])
        .unwrap();
        match args.command {
            Command::Compute { doses, json } => {
                assert_eq!(doses, ["40@08:00", "20@12:00"]);
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_plot_day_conflicts_with_csv() {
        assert!(Args::try_parse_from([
            "effectcurve", "plot", "--day", "Day 1", "--from-csv", "s.csv"
        ])
        .is_err());
    }

    #[test]
    fn test_export_format() {
        let args = Args::try_parse_from([
            "effectcurve", "export", "-o", "s.json", "--format", "json",
        ])
        .unwrap();
        match args.command {
            Command::Export { format, .. } => assert_eq!(format, ExportFormat::Json),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
