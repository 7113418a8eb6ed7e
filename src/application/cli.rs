#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::GeolocatorName;
use crate::domain::services::actions::help_text;
use crate::infrastructure::api::SafetyApi;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

pub fn log_path() -> path::PathBuf {
    let log_dir = env::var("SHESAFE_LOG_DIR").map(path::PathBuf::from).unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join("shesafe");
    });

    return log_dir.join("debug.log");
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn print_health() -> Result<()> {
    let api_url = Config::get(ConfigKey::ApiURL);
    let res = SafetyApi::default().health_check().await;
    match res {
        Ok(health) => {
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
        Err(err) => {
            bail!(format!("SheSafe API at {api_url} is not healthy: {err}"));
        }
    }

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for SheSafe")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running SheSafe with environment variable RUST_LOG=shesafe")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_health() -> Command {
    return Command::new("health")
        .about("Calls the SheSafe API health endpoint and prints the response.");
}

fn arg_api_url() -> Arg {
    return Arg::new(ConfigKey::ApiURL.to_string())
        .short('u')
        .long(ConfigKey::ApiURL.to_string())
        .env("SHESAFE_API_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the SheSafe API, including the /api prefix. [default: {}]",
            Config::default(ConfigKey::ApiURL)
        ))
        .global(true);
}

fn arg_geolocator() -> Arg {
    return Arg::new(ConfigKey::Geolocator.to_string())
        .short('g')
        .long(ConfigKey::Geolocator.to_string())
        .env("SHESAFE_GEOLOCATOR")
        .num_args(1)
        .help(format!(
            "Where your position comes from for safety scores and SOS alerts. [default: {}]",
            Config::default(ConfigKey::Geolocator)
        ))
        .value_parser(PossibleValuesParser::new(GeolocatorName::VARIANTS))
        .global(true);
}

fn arg_geolocator_url() -> Arg {
    return Arg::new(ConfigKey::GeolocatorURL.to_string())
        .long(ConfigKey::GeolocatorURL.to_string())
        .env("SHESAFE_GEOLOCATOR_URL")
        .num_args(1)
        .help(format!(
            "IP lookup service URL when using the ip geolocator. [default: {}]",
            Config::default(ConfigKey::GeolocatorURL)
        ))
        .global(true);
}

fn arg_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::HealthCheckTimeout.to_string())
        .long(ConfigKey::HealthCheckTimeout.to_string())
        .env("SHESAFE_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before timing out when checking the health of the API. [default: {}]",
            Config::default(ConfigKey::HealthCheckTimeout)
        ))
        .global(true);
}

fn arg_latitude() -> Arg {
    return Arg::new(ConfigKey::Latitude.to_string())
        .long(ConfigKey::Latitude.to_string())
        .env("SHESAFE_LATITUDE")
        .num_args(1)
        .allow_negative_numbers(true)
        .help("Latitude reported by the fixed geolocator.")
        .global(true);
}

fn arg_longitude() -> Arg {
    return Arg::new(ConfigKey::Longitude.to_string())
        .long(ConfigKey::Longitude.to_string())
        .env("SHESAFE_LONGITUDE")
        .num_args(1)
        .allow_negative_numbers(true)
        .help("Longitude reported by the fixed geolocator.")
        .global(true);
}

fn arg_username() -> Arg {
    return Arg::new(ConfigKey::Username.to_string())
        .short('n')
        .long(ConfigKey::Username.to_string())
        .env("SHESAFE_USERNAME")
        .num_args(1)
        .help("Name sent with SOS alerts, location shares and check-ins. Falls back to \"User\" when empty.")
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.ends_with(':') && line.to_uppercase() == line {
                return Paint::new(format!("TUI {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_DESCRIBE").unwrap_or("unknown")
    );

    return Command::new("shesafe")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(subcommand_health())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(arg_api_url())
        .arg(arg_geolocator())
        .arg(arg_geolocator_url())
        .arg(arg_health_check_timeout())
        .arg(arg_latitude())
        .arg(arg_longitude())
        .arg(arg_username())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("SHESAFE_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        );
}

/// Handles subcommands. Returns true when the TUI should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    println!("{}", log_path().to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("health", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            print_health().await?;
            return Ok(false);
        }
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
