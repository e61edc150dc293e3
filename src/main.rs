use clap::Parser;

use shajra::auth::Session;
use shajra::config::{AppConfig, Args};
use shajra::db::{schema, user_repo};

fn main() {
    let config = AppConfig::from_args(Args::parse());

    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: cannot create {}: {}", parent.display(), e);
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = shajra::logging::init_logging(&config.log_level, &config.log_dir) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    if let Some(json_path) = &config.import_path {
        println!("Importing from {}...", json_path.display());
        let conn = match schema::open(&config.db_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error opening database: {}", e);
                std::process::exit(1);
            }
        };
        let user = match user_repo::find_first(&conn) {
            Ok(Some(user)) => user,
            Ok(None) => {
                eprintln!("Error: no profile in {}.", config.db_path.display());
                eprintln!("Run shajra once without --import to create one.");
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Error loading profile: {}", e);
                std::process::exit(1);
            }
        };

        match shajra::migrate::import_tree_json(&conn, &Session::signed_in(user.id), json_path) {
            Ok((tree, stats)) => {
                println!("Import complete!");
                println!("  Tree: {}", tree.name);
                println!("  Members: {}", stats.members);
                println!("  Relationships: {}", stats.relationships);
                println!("  Skipped relationships: {}", stats.skipped_relationships);
            }
            Err(e) => {
                eprintln!("Import failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    shajra::cli::run(&config);
}
