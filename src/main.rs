use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use fiveam::core::config;
use fiveam::core::state::App;
use fiveam::store::{Store, paths};
use fiveam::tui;

#[derive(Parser)]
#[command(name = "5am", about = "Terminal todo manager")]
struct Args {
    /// Database file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("5am: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = config::load_config()?;
    let resolved = config::resolve(&config, args.db.as_deref());

    let db_path = match resolved.db_path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            path
        }
        None => paths::database_path()?,
    };

    // File logger next to the database. Logging is best-effort; the app
    // runs fine without it.
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let log_path = db_path.with_file_name("5am.log");
    if let Ok(log_file) = File::create(&log_path) {
        let _ = WriteLogger::init(LevelFilter::Info, log_config, log_file);
    }

    log::info!("5am starting up, database at {}", db_path.display());

    let store = Store::open(&db_path)?;
    let app = App::new(store, resolved.history_days)?;
    tui::run(app)?;
    Ok(())
}
