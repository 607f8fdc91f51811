//! feedgate — startup configuration check for the ingestion process.
//!
//! Startup sequence:
//!   1. Resolve the environment (process env over the optional `.env` file)
//!   2. Resolve log settings (CLI `-v` flags > env > debug flag)
//!   3. Init logger once
//!   4. Build and validate the configuration
//!   5. Print status and exit

use std::path::PathBuf;

use feedgate::config;
use feedgate::env::{DEFAULT_OVERRIDE_FILE, Env};
use feedgate::error::AppError;
use feedgate::logger::{self, LOG_LEVEL_VAR, LogSettings};
use tracing::{info, warn};

/// Exit code for a configuration that parsed but failed validation.
const EXIT_VALIDATION: i32 = 2;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        let code = match e {
            AppError::Validation(_) => EXIT_VALIDATION,
            _ => 1,
        };
        std::process::exit(code);
    }
}

fn run() -> Result<(), AppError> {
    let args = parse_cli_args();

    let override_path = args
        .env_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OVERRIDE_FILE));
    let env = Env::from_process(Some(&override_path))?;

    let settings = LogSettings::from_env(&env)?;
    let effective_log_level = args.log_level.unwrap_or(settings.level.as_str());
    let log_file = settings
        .log_dir
        .as_deref()
        .map(logger::log_file_path)
        .transpose()?;
    logger::init(effective_log_level, args.log_level.is_some(), log_file.as_deref())?;

    if let Some(rejected) = &settings.rejected_level {
        warn!(
            value = %rejected,
            fallback = %settings.level,
            "unrecognised {LOG_LEVEL_VAR}; expected error, warn, info, debug or trace"
        );
    }

    match env.override_file() {
        Some(path) => info!(path = %path.display(), "loaded environment overrides"),
        None => warn!(
            path = %override_path.display(),
            "override file not found; relying on process environment"
        ),
    }

    let config = config::load(env)?;

    info!(
        system = %config.system_name(),
        debug = config.debug(),
        polling_interval_secs = config.polling_interval_secs(),
        sources = config.data_sources().len(),
        active_sources = config.active_sources().count(),
        "configuration ready"
    );

    if args.json {
        let report = serde_json::to_string_pretty(&config)
            .map_err(|e| AppError::Config(format!("cannot render status report: {e}")))?;
        println!("{report}");
    } else {
        let active: Vec<&str> = config.active_sources().map(|(key, _)| key).collect();
        println!(
            "✓ {} configured: active sources = [{}]",
            config.system_name(),
            active.join(", ")
        );
    }

    Ok(())
}

struct CliArgs {
    log_level: Option<&'static str>,
    env_file: Option<PathBuf>,
    json: bool,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut env_file = None;
    let mut json = false;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: feedgate [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -e, --env-file <PATH>      Override file to layer under the process environment (default: .env)");
                println!("      --json                 Print the validated configuration as JSON");
                println!("  -v, -vv, -vvv, -vvvv       Set logging verbosity");
                std::process::exit(0);
            }
            "-e" | "--env-file" => {
                if let Some(path) = iter.next() {
                    env_file = Some(PathBuf::from(path));
                } else {
                    eprintln!("error: -e/--env-file requires a path argument");
                    std::process::exit(1);
                }
            }
            "--json" => json = true,
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            other => {
                eprintln!("error: unknown argument '{other}'");
                eprintln!("Run 'feedgate --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    //   -v      → warn
    //   -vv     → info
    //   -vvv    → debug
    //   -vvvv+  → trace
    let log_level = match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    };

    CliArgs { log_level, env_file, json }
}
