use std::cmp::Ordering;
use std::path::PathBuf;

use anyhow::Context;
use bcos_node_version::config::{config_path, load_config};
use bcos_node_version::logging::init_logging;
use bcos_node_version::version::checker::check_code;
use bcos_node_version::version::release::Release;
use bcos_node_version::version::semver::{Version, compare, parse_version};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

#[derive(Parser)]
#[command(name = "bcos-node-version")]
#[command(version, about = "Identify node releases from version codes and compare versions")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Path to the config file (defaults to the data directory)
    #[arg(long, global = true, env = "BCOS_NODE_VERSION_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a node version code (decimal or 0x-prefixed hex) to its release
    Resolve {
        #[arg(allow_hyphen_values = true)]
        code: String,
    },
    /// Parse a version string
    Parse { version: String },
    /// Compare two version strings
    Compare { left: String, right: String },
    /// Check a node version code against the minimum supported version
    Check {
        #[arg(allow_hyphen_values = true)]
        code: String,
        #[arg(long)]
        minimum: Option<String>,
    },
    /// List all known releases
    List,
}

#[derive(Serialize)]
struct ReleaseView {
    release: Release,
    code: i64,
    version: Version,
}

impl ReleaseView {
    fn new(release: Release) -> anyhow::Result<Self> {
        Ok(Self {
            release,
            code: release.code(),
            version: release.to_version()?,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let path = cli.config.clone().unwrap_or_else(config_path);
    let config =
        load_config(&path).with_context(|| format!("Failed to load {}", path.display()))?;
    let _guard = init_logging(&config.log)?;

    match cli.command {
        Command::Resolve { code } => {
            let code = parse_code(&code)?;
            let view = ReleaseView::new(Release::resolve(code))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!(
                    "{} (code {}) -> {}",
                    view.release.as_str(),
                    code,
                    view.version
                );
            }
        }
        Command::Parse { version } => {
            let version = parse_version(&version)?;
            if cli.json {
                let value = json!({
                    "major": version.major,
                    "minor": version.minor,
                    "patch": version.patch,
                    "ext": version.ext,
                    "version": version.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!(
                    "major={} minor={} patch={} ext={:?} -> {}",
                    version.major, version.minor, version.patch, version.ext, version
                );
            }
        }
        Command::Compare { left, right } => {
            let left = parse_version(&left)?;
            let right = parse_version(&right)?;
            let ordering = ordering_name(compare(&left, &right));
            if cli.json {
                let value = json!({
                    "left": left,
                    "right": right,
                    "ordering": ordering,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{left} is {ordering} {right}");
            }
        }
        Command::Check { code, minimum } => {
            let code = parse_code(&code)?;
            let minimum = match minimum {
                Some(minimum) => parse_version(&minimum)?,
                None => config.minimum_version()?,
            };
            let result = check_code(code, &minimum);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "{} ({}) is {:?} against minimum {}",
                    result.release.as_str(),
                    result.version,
                    result.status,
                    minimum
                );
            }
        }
        Command::List => {
            let views = Release::KNOWN
                .into_iter()
                .map(ReleaseView::new)
                .collect::<anyhow::Result<Vec<_>>>()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else {
                for view in views {
                    println!(
                        "{:<16} {:#010x} {}",
                        view.release.as_str(),
                        view.code,
                        view.version
                    );
                }
            }
        }
    }

    Ok(())
}

/// Parse a node version code written in decimal or as 0x-prefixed hex
fn parse_code(input: &str) -> anyhow::Result<i64> {
    let input = input.trim();
    let parsed = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => input.parse::<i64>(),
    };
    parsed.with_context(|| format!("Invalid node version code: {input:?}"))
}

fn ordering_name(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "less",
        Ordering::Equal => "equal",
        Ordering::Greater => "greater",
    }
}
