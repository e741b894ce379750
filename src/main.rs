mod cli;
mod config;
mod connection;
mod db;
mod encode;
mod load;
mod logger;
mod schema;
mod seed;

use clap::Parser;

use crate::logger::{error, init};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize file logging under the app config directory
    if let Ok(dir) = crate::config::Config::app_config_dir() {
        let log_path = dir.join("mfstload.log");
        let _ = init(log_path);
    }

    let args = cli::Cli::parse();
    let result = cli::run(args);

    if let Err(err) = result {
        println!("{:?}", err);
        error(&format!("fatal error: {:?}", err));
        std::process::exit(1);
    }

    Ok(())
}
