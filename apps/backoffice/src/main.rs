//! # Stockroom Back Office Entry Point
//!
//! Loads configuration, opens the store, loads the inventory and prints
//! the startup report (dashboard, category chart, first products page).
//!
//! ## Usage
//! ```text
//! stockroom-backoffice [--config <PATH>]
//! ```
//!
//! The actual setup is in lib.rs so it can be tested.

use std::env;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Back Office");
                println!();
                println!("Usage: stockroom-backoffice [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file (default: platform config dir)");
                println!("  -h, --help           Show this help message");
                println!();
                println!("Environment:");
                println!("  STOCKROOM_DB_PATH        Database file");
                println!("  STOCKROOM_LOG            Log filter");
                println!("  STOCKROOM_SEED_DEFAULTS  Seed default categories (true/false)");
                println!("  RUST_LOG                 Overrides the log filter");
                return;
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    if let Err(e) = stockroom_backoffice::run(config_path).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
