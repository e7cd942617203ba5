use anyhow::Result;
use std::io;
use std::process;

use slcsp::{app, Config};

/// Exit status when configuration cannot be loaded
const CONFIG_ERROR_EXIT: i32 = 4;

fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only results
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slcsp=warn".into()),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            process::exit(CONFIG_ERROR_EXIT);
        }
    };

    let stdout = io::stdout();
    if let Err(e) = app::run(&config, stdout.lock()) {
        eprintln!("❌ {}", e);
        process::exit(e.exit_code());
    }
}

fn load_config() -> Result<Config> {
    let config = Config::from_env()?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}
