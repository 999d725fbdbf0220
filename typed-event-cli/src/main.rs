//! Typed Event demo CLI
//!
//! A small application built on the typed-event library. It:
//! - Declares an `on_user_login` event with a `(username, user_id)` signature
//! - Subscribes welcome, audit and ban-guard listeners
//! - Dispatches the configured logins
//! - Prints what the listeners recorded (TXT/JSON)

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod config;
mod login;
mod report;

use config::{AppConfig, LoginConfig, OutputFormat};

/// Typed Event demo - dispatch user logins to typed listeners
#[derive(Parser, Debug)]
#[command(name = "typed-event-cli")]
#[command(about = "Dispatch user logins through a typed event", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Dispatch a single login for this user instead of the configured ones
    #[arg(short, long, value_name = "NAME")]
    user: Option<String>,

    /// User ID for --user
    #[arg(long, value_name = "ID", default_value_t = 1, requires = "user")]
    id: u64,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Typed Event CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using typed-event library v{}", typed_event::VERSION);

    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(username) = &args.user {
        config.logins = vec![LoginConfig {
            username: username.clone(),
            user_id: args.id,
        }];
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }

    let report = login::run(&config);
    println!("{}", report::render(&report, config.output.format)?);

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
