use std::path::PathBuf;

use clap::Parser;

use crate::logging;

const DEFAULT_DATA_DIR: &str = ".data";
const DEFAULT_DB_FILE: &str = "shajra.db";
const DEFAULT_LOG_DIR: &str = "logs";

/// Shajra - family tree record keeper.
#[derive(Debug, Parser)]
#[command(name = "shajra", version, about)]
pub struct Args {
    /// Database file path (default: .data/shajra.db)
    #[arg(short = 'f', long = "file", env = "SHAJRA_DB")]
    pub db_path: Option<PathBuf>,

    /// Import a tree snapshot (JSON) into the database, then exit
    #[arg(long = "import", value_name = "JSON_PATH")]
    pub import_path: Option<PathBuf>,

    /// Directory for log files (default: .data/logs)
    #[arg(long, env = "SHAJRA_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace | debug | info | warn | error
    #[arg(long, env = "SHAJRA_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub import_path: Option<PathBuf>,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_args(args: Args) -> Self {
        let data_dir = PathBuf::from(DEFAULT_DATA_DIR);
        Self {
            db_path: args.db_path.unwrap_or_else(|| data_dir.join(DEFAULT_DB_FILE)),
            import_path: args.import_path,
            log_dir: args.log_dir.unwrap_or_else(|| data_dir.join(DEFAULT_LOG_DIR)),
            log_level: args
                .log_level
                .unwrap_or_else(|| logging::default_log_level().to_string()),
        }
    }
}
