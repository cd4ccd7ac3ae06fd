//! Read-only inspector for a persisted roster.
//!
//! Prints one view of the stored roster as JSON on stdout. Never writes to
//! the store, so it is safe to run against a live data directory.

use anyhow::{Result, bail};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use roster_common::config::RosterConfig;
use roster_data::Roster;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Parser)]
#[command(name = "roster-inspect", version, about = "Print stored roster views as JSON")]
struct Cli {
    /// Data directory holding teamMembers.json and games.json
    #[arg(long, env = "ROSTER_DATA_DIR")]
    data_dir: Option<Utf8PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    view: View,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum View {
    /// Member count, game count, wins and losses
    Summary,
    /// Games starting now or later, in stored order
    Schedule,
    /// All team members in stored order
    Members,
    /// All games in stored order
    Games,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = resolve_config(cli.data_dir)?;
    tracing::debug!(data_dir = %config.data_dir, view = ?cli.view, "inspecting roster");
    let roster = Roster::from_config(&config);

    let mut stdout = io::stdout().lock();
    match cli.view {
        View::Summary => write_json(&mut stdout, &roster.summary(), cli.pretty)?,
        View::Schedule => write_json(&mut stdout, &roster.upcoming_games(), cli.pretty)?,
        View::Members => write_json(&mut stdout, roster.list_team_members(), cli.pretty)?,
        View::Games => write_json(&mut stdout, roster.list_games(), cli.pretty)?,
    }
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Resolve the data directory, requiring an explicit one to exist.
fn resolve_config(data_dir: Option<Utf8PathBuf>) -> Result<RosterConfig> {
    let config = RosterConfig::from_env();
    let Some(data_dir) = data_dir else {
        return Ok(config);
    };

    if !data_dir.is_dir() {
        bail!("Data directory not found: {}", data_dir);
    }
    Ok(config.with_data_dir(data_dir))
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(out, "{}", json)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_view() {
        let cli = Cli::try_parse_from(["roster-inspect", "--pretty", "schedule"]).unwrap();
        assert!(cli.pretty);
        assert!(matches!(cli.view, View::Schedule));
    }

    #[test]
    fn test_write_json_compact() {
        let mut out = Vec::new();
        write_json(&mut out, &vec![1, 2, 3], false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[1,2,3]\n");
    }

    #[test]
    fn test_missing_data_dir_rejected() {
        let err = resolve_config(Some(Utf8PathBuf::from("/nonexistent/roster-data"))).unwrap_err();
        assert!(err.to_string().contains("Data directory not found"));
    }
}
