//! Top-level CLI definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::core::selector::SelectionMode;

/// Power-hint management daemon.
#[derive(Parser)]
#[command(name = "powerhintd", version, about)]
pub struct Cli {
    /// Configuration-selection strategy.
    #[arg(long, value_enum, default_value_t = SelectionArg::Named)]
    pub select: SelectionArg,

    /// Directory holding the hint-definition files.
    #[arg(long, default_value = "/vendor/etc")]
    pub config_dir: PathBuf,

    /// Seed property values, repeatable.
    #[arg(long = "property", value_name = "KEY=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,

    /// Log filter (tracing env-filter syntax); RUST_LOG takes precedence.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run the daemon in the foreground.
    Run,
    /// Resolve and validate the hint configuration, then exit.
    Check,
}

/// CLI spelling of the selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SelectionArg {
    /// Map the power-plan property onto the plan config files.
    Plan,
    /// Use the config-name property as the filename.
    Named,
}

impl From<SelectionArg> for SelectionMode {
    fn from(arg: SelectionArg) -> Self {
        match arg {
            SelectionArg::Plan => Self::PowerPlan,
            SelectionArg::Named => Self::NamedConfig,
        }
    }
}

fn parse_property(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))
}
