//! gatekey-cast: play the GateKey CLI walkthrough in your terminal.
//!
//! Press `r` to start over, `q` or `Esc` to quit.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use cast::{PlaybackConfig, Runtime, RuntimeConfig, Transcript, ViewConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Scripted terminal playback of the GateKey CLI walkthrough.
#[derive(Parser, Debug)]
#[command(name = "gatekey-cast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Transcript file (TOML) to play instead of the built-in walkthrough
    #[arg(short, long)]
    transcript: Option<PathBuf>,

    /// Validate a transcript file and exit
    #[arg(long, value_name = "FILE", conflicts_with = "transcript")]
    check: Option<PathBuf>,

    /// Pause before the first line of each cycle, in milliseconds
    #[arg(long, default_value_t = 1000)]
    first_delay: u64,

    /// Pause after the last line before replaying, in milliseconds
    #[arg(long, default_value_t = 5000)]
    reset_pause: u64,

    /// Cursor blink half-period in milliseconds (0 disables blinking)
    #[arg(long, default_value_t = 530)]
    blink: u64,

    /// Exit after this many cycles instead of looping forever
    #[arg(long)]
    cycles: Option<u64>,

    /// User name shown in the prompt
    #[arg(long, default_value = "jesse")]
    user: String,

    /// Draw on the main screen instead of the alternate screen
    #[arg(long)]
    no_alt_screen: bool,

    /// Hide the title bar
    #[arg(long)]
    no_chrome: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(cli.debug)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &cli.check {
        let transcript = Transcript::load(path)
            .with_context(|| format!("failed to load transcript {}", path.display()))?;
        let last = transcript.lines().last().map_or(0, |line| line.offset_millis);
        println!(
            "{}: {} lines, {} prompts, last line at {}ms",
            path.display(),
            transcript.len(),
            transcript.iter().filter(|line| line.is_prompt).count(),
            last
        );
        return Ok(());
    }

    let transcript = match &cli.transcript {
        Some(path) => Transcript::load(path)
            .with_context(|| format!("failed to load transcript {}", path.display()))?,
        None => Transcript::gatekey(),
    };

    let config = RuntimeConfig {
        playback: PlaybackConfig {
            first_line_delay: Duration::from_millis(cli.first_delay),
            reset_pause: Duration::from_millis(cli.reset_pause),
        },
        view: ViewConfig {
            user: cli.user,
            chrome: !cli.no_chrome,
            ..ViewConfig::default()
        },
        alternate_screen: !cli.no_alt_screen,
        blink_interval: Duration::from_millis(cli.blink),
        max_cycles: cli.cycles,
        ..RuntimeConfig::default()
    };

    let summary = Runtime::new(config)
        .run(transcript)
        .context("terminal playback failed")?;
    tracing::info!(?summary, "done");
    Ok(())
}
