use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use xpchart::render::{terminal_config, JsonRenderer, Renderer, TerminalRenderer};
use xpchart::services::binner::MAX_WINDOW_DAYS;
use xpchart::services::{bin_by_day, label_from_path, Aggregator, DashboardData, Snapshot};
use xpchart::types::Viewport;
use xpchart::ChartConfig;

/// Default chart rows in the terminal
const TERMINAL_CHART_HEIGHT: u16 = 12;
const FALLBACK_TERMINAL_WIDTH: u16 = 80;

/// Default viewport for JSON geometry
const JSON_VIEWPORT: (u16, u16) = (800, 400);

/// Profile dashboard charts from a snapshot of records
#[derive(Parser)]
#[command(name = "xpchart")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the XP, skills, collaborators and activity charts
    Report {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Output geometry as JSON
        #[arg(long)]
        json: bool,

        /// Viewport width (cells, or pixels with --json)
        #[arg(long)]
        width: Option<u16>,

        /// Chart height (cells, or pixels with --json)
        #[arg(long)]
        height: Option<u16>,

        /// Config file (defaults to ~/.xpchart/config.json)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Anchor date for the activity window (YYYY-MM-DD, default today UTC)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Show the daily activity heatmap only
    Activity {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Trailing window length in days
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_WINDOW_DAYS)))]
        days: Option<u32>,

        /// Anchor date (YYYY-MM-DD, default today UTC)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Output buckets as JSON
        #[arg(long)]
        json: bool,

        /// Config file (defaults to ~/.xpchart/config.json)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the display label derived from an object path
    Label {
        /// Slash-separated path, e.g. /school/piscine-go/quest-01
        path: String,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Report {
                snapshot,
                json,
                width,
                height,
                config,
                today,
            } => {
                let config = ChartConfig::load(config.as_deref()).context("loading config")?;
                let snapshot = load_snapshot(&snapshot)?;
                let today = today.unwrap_or_else(|| Utc::now().date_naive());

                let output = if json {
                    let viewport = Viewport::new(
                        f64::from(width.unwrap_or(JSON_VIEWPORT.0)),
                        f64::from(height.unwrap_or(JSON_VIEWPORT.1)),
                    );
                    let data = DashboardData::from_snapshot(&snapshot, &config, today);
                    let view = data.layout(viewport, &config);
                    JsonRenderer { pretty: true }.render(&view)?
                } else {
                    let config = terminal_config(&config);
                    let viewport = Viewport::new(
                        f64::from(width.unwrap_or_else(terminal_width)),
                        f64::from(height.unwrap_or(TERMINAL_CHART_HEIGHT)),
                    );
                    let data = DashboardData::from_snapshot(&snapshot, &config, today);
                    let view = data.layout(viewport, &config);
                    TerminalRenderer::new(std::io::stdout().is_terminal()).render(&view)?
                };

                print!("{}", output);
                Ok(())
            }
            Commands::Activity {
                snapshot,
                days,
                today,
                json,
                config,
            } => {
                let config = ChartConfig::load(config.as_deref()).context("loading config")?;
                let snapshot = load_snapshot(&snapshot)?;
                let today = today.unwrap_or_else(|| Utc::now().date_naive());
                let window = days.unwrap_or(config.activity_window_days);

                let buckets = bin_by_day(
                    &Aggregator::daily_activity(&snapshot.transactions),
                    window,
                    today,
                );

                if json {
                    println!("{}", serde_json::to_string_pretty(&buckets)?);
                } else {
                    let renderer = TerminalRenderer::new(std::io::stdout().is_terminal());
                    print!("{}", renderer.render_activity(&buckets, terminal_width()));
                }
                Ok(())
            }
            Commands::Label { path } => {
                println!("{}", label_from_path(Some(&path)));
                Ok(())
            }
        }
    }
}

fn load_snapshot(path: &std::path::Path) -> anyhow::Result<Snapshot> {
    let snapshot = Snapshot::load(path)
        .with_context(|| format!("loading snapshot {}", path.display()))?;
    Ok(snapshot)
}

fn terminal_width() -> u16 {
    crossterm::terminal::size()
        .map(|(w, _)| w)
        .unwrap_or(FALLBACK_TERMINAL_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["xpchart"]).is_err());
    }

    #[test]
    fn test_cli_parse_report() {
        let cli = Cli::try_parse_from(["xpchart", "report", "profile.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Report {
                json: false,
                width: None,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_parse_report_json_with_viewport() {
        let cli = Cli::try_parse_from([
            "xpchart", "report", "profile.json", "--json", "--width", "640", "--height", "320",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Report {
                json: true,
                width: Some(640),
                height: Some(320),
                ..
            }
        ));
    }

    #[test]
    fn test_cli_parse_activity_today() {
        let cli = Cli::try_parse_from([
            "xpchart", "activity", "profile.json", "--days", "30", "--today", "2024-06-15",
        ])
        .unwrap();
        match cli.command {
            Commands::Activity { days, today, .. } => {
                assert_eq!(days, Some(30));
                assert_eq!(today, NaiveDate::from_ymd_opt(2024, 6, 15));
            }
            _ => panic!("expected activity"),
        }
    }

    #[test]
    fn test_cli_rejects_oversized_window() {
        let result = Cli::try_parse_from(["xpchart", "activity", "profile.json", "--days", "4000000000"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        assert!(Cli::try_parse_from(["xpchart", "activity", "p.json", "--today", "June"]).is_err());
    }

    #[test]
    fn test_cli_parse_label() {
        let cli = Cli::try_parse_from(["xpchart", "label", "/school/piscine-go"]).unwrap();
        assert!(matches!(cli.command, Commands::Label { .. }));
    }
}
