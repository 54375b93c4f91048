//! `smerge` CLI -- resolve a JSON schedule into a conflict-free timeline.
//!
//! Input is a JSON array of events:
//!
//! ```json
//! [
//!   {"id": "standup", "start": "2026-03-01T09:00:00Z", "end": "2026-03-01T12:00:00Z", "desirability": 1},
//!   {"id": "review",  "start": "2026-03-01T10:00:00Z", "end": "2026-03-01T11:00:00Z", "desirability": 2}
//! ]
//! ```
//!
//! ## Usage
//!
//! ```sh
//! # Resolve, dropping losers whole (stdin → stdout)
//! smerge merge < schedule.json
//!
//! # Resolve, trimming losers to the time they can still keep
//! smerge merge --trim -i schedule.json -o timeline.json
//!
//! # List overlapping pairs without resolving them
//! smerge conflicts -i schedule.json
//!
//! # Trace every classification on stderr
//! smerge -vv merge --trim -i schedule.json
//! ```

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use schedule_merge::{find_conflicts, merge_schedule, OverlapPolicy, ScheduledEvent};
use serde_json::Value;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(
    name = "smerge",
    version,
    about = "Resolve prioritized, overlapping events into a conflict-free timeline"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log to stderr (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve overlaps and print the resulting timeline
    Merge {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Trim losing events to their free sub-intervals instead of dropping them
        #[arg(long)]
        trim: bool,
        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// List every pair of overlapping events in the input
    Conflicts {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Merge {
            input,
            output,
            trim,
            compact,
        } => {
            let mut schedule = read_schedule(input.as_deref())?;
            let policy = OverlapPolicy::from_trim(trim);
            debug!(events = schedule.len(), ?policy, "read schedule");

            let timeline =
                merge_schedule(&mut schedule, policy).context("Failed to merge schedule")?;
            let json = render(&serde_json::to_value(&timeline)?, compact)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Conflicts { input, compact } => {
            let schedule = read_schedule(input.as_deref())?;
            let conflicts = find_conflicts(&schedule);
            debug!(conflicts = conflicts.len(), "scanned schedule");

            let json = render(&serde_json::to_value(&conflicts)?, compact)?;
            write_output(None, &json)?;
        }
    }

    Ok(())
}

/// Route `tracing` output to stderr so stdout stays pure JSON.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn read_schedule(path: Option<&str>) -> Result<Vec<ScheduledEvent>> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse schedule JSON")
}

fn render(value: &Value, compact: bool) -> Result<String> {
    let mut json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    json.push('\n');
    Ok(json)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
