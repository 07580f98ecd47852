use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use rusty_log_domain::api_state::AppState;
use rusty_log_domain::build_rocket;
use rusty_log_domain::models::config::{setup_config, Config};
use rusty_log_domain::repo::sqlite::SqliteLogRepository;

#[derive(Parser)]
#[command(name = "RustyLogDomain")]
#[command(about = "Log service with create, list and paginated list", long_about = None)]
struct Cli {
    #[arg(
        short = 'c',
        long = "config",
        default_value = "config.json",
        env = "RUSTYLOGDOMAIN_CONFIG"
    )]
    config_file: String,

    #[arg(
        short = 'l',
        long = "log-level",
        default_value = "info",
        env = "LOG_LEVEL"
    )]
    log_level: String,

    #[arg(short = 'v', long = "validate-only")]
    validate_only: bool,
}

fn parse_level(level: &str) -> log::LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    }
}

/// Strip any surrounding quotes from config file path
fn config_path(config_file: &str) -> String {
    config_file
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string()
}

fn load_config(config_file_path: String) -> Config {
    match setup_config(config_file_path.clone()) {
        Ok(config) => {
            info!("Loaded configuration from: {}", config_file_path);
            config
        }
        Err(e) => {
            warn!(
                "Failed to load config from: {}. Error: {}",
                config_file_path, e
            );
            warn!("Starting with in-memory database.");
            Config::in_memory()
        }
    }
}

#[rocket::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(parse_level(&args.log_level))
        .format_timestamp_secs()
        .init();

    let config_file_path = config_path(&args.config_file);

    if args.validate_only {
        setup_config(config_file_path).context("Failed to load configuration")?;
        info!("Configuration is valid. Exiting (--validate-only mode).");
        return Ok(());
    }

    let config = load_config(config_file_path);
    let repository = SqliteLogRepository::open(&config.database_file, config.pool_size)
        .context("Failed to initialize database")?;

    build_rocket(AppState::new(repository, &config))
        .launch()
        .await?;
    Ok(())
}
