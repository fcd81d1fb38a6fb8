//! Motif - Main entry point
//!
//! With a file or events on the command line, detects once and prints the
//! most prominent repeated span. Without either, starts the REPL.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use motif::commands::CommandContext;
use motif::report::describe_detection;
use motif_core::types::time::parse_time;
use motif_core::{FinderConfig, ProminencePolicy, Time};

/// Command-line arguments for motif
#[derive(Parser, Debug)]
#[command(name = "motif")]
#[command(about = "Find the most prominent repeated span in a melodic line")]
#[command(version)]
struct Args {
    /// Notation file to read the line from
    #[arg(short, long, env = "MOTIF_FILE")]
    file: Option<PathBuf>,

    /// Events of the line, e.g. `C4 D4@1/2 _ E4`
    #[arg(conflicts_with = "file")]
    events: Vec<String>,

    /// Shortest candidate span, in events
    #[arg(long, default_value_t = 1, env = "MOTIF_MIN_LENGTH")]
    min_length: usize,

    /// Longest candidate span, in events (defaults to the line length)
    #[arg(long, env = "MOTIF_MAX_LENGTH")]
    max_length: Option<usize>,

    /// Slack between the lengths of two aligned spans
    #[arg(short = 'd', long, default_value_t = 1, env = "MOTIF_MAX_LENGTH_DIFFERENCE")]
    max_length_difference: usize,

    /// Lower bound on a candidate's summed duration, in quarters
    #[arg(long, value_parser = parse_duration, env = "MOTIF_MIN_DURATION")]
    min_duration: Option<Time>,

    /// Upper bound on a candidate's summed duration, in quarters
    #[arg(long, value_parser = parse_duration, env = "MOTIF_MAX_DURATION")]
    max_duration: Option<Time>,

    /// Prominence policy: `weighted` or `thresholded[:n]`
    #[arg(short, long, default_value = "weighted", value_parser = parse_policy, env = "MOTIF_POLICY")]
    policy: ProminencePolicy,
}

impl Args {
    fn config(&self) -> Result<FinderConfig> {
        let config = FinderConfig {
            min_length: self.min_length,
            max_length: self.max_length,
            max_length_difference: self.max_length_difference,
            min_duration: self.min_duration,
            max_duration: self.max_duration,
            policy: self.policy,
        };
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

fn parse_duration(s: &str) -> std::result::Result<Time, String> {
    parse_time(s).map_err(|e| e.to_string())
}

fn parse_policy(s: &str) -> std::result::Result<ProminencePolicy, String> {
    s.parse().map_err(|e: motif_core::DetectError| e.to_string())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.config()?;
    info!("Finder configuration: {:?}", config);

    let mut ctx = CommandContext::new(config);
    if let Some(file) = &args.file {
        ctx.load_file(file)?;
    } else if !args.events.is_empty() {
        ctx.set_events(&args.events.join(" "))
            .context("Failed to parse events")?;
    } else {
        return motif::repl::start(ctx.config);
    }

    println!("{}", describe_detection(&ctx.events, &ctx.config)?);
    Ok(())
}
