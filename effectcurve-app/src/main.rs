use anyhow::Result;
use cli::{Args, Command, ExportFormat};
use config::AppConfig;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod cli;
mod config;
mod plotting;
mod render;
mod workflow;

fn main() -> Result<()> {
    let args = Args::parse_args();
    init_logging(&args);
    debug!("Arguments: {:?}", args);

    let config = AppConfig::load(args.config.as_deref())?.with_data_file(args.data_file.clone());
    debug!("Using saved days at {:?}", config.data_file);

    match &args.command {
        Command::Days => workflow::list_days(&config)?,
        Command::NewDay => {
            workflow::new_day(&config)?;
        }
        Command::Add { dose, day } => {
            workflow::add_dose(&config, day.as_deref(), &dose.dose, &dose.time)?
        }
        Command::Remove { dose, day } => {
            workflow::remove_dose(&config, day.as_deref(), &dose.dose, &dose.time)?;
        }
        Command::Show { day } => workflow::show_day(&config, day.as_deref())?,
        Command::Plot { day, from_csv, output } => {
            workflow::plot(&config, day.as_deref(), from_csv.as_deref(), output)?
        }
        Command::Export { day, output, format } => workflow::export(
            &config,
            day.as_deref(),
            output,
            *format == ExportFormat::Json,
        )?,
        Command::Compute { doses, json } => workflow::compute(&config, doses, *json)?,
    }

    Ok(())
}

/// Initialize logging; `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().to_string().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}
