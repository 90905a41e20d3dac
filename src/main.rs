//! Text-to-Speech Sync CLI Application

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::EnvFilter;

use tts_sync::output::session_cues;
use tts_sync::{
    wav_duration, BoundaryPolicy, Config, ConsoleHighlighter, CueWriter, OutputFormat,
    PlaybackDriver, PlaybackEvent, PlaybackSignal, PositionSource, PositionUpdate, Segmenter,
    SimulatedClock, SyncController,
};

/// Text-to-Speech playback synchronization
#[derive(Parser)]
#[command(name = "tts-sync")]
#[command(about = "Sentence highlighting in step with speech playback", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Where the text comes from
#[derive(Args)]
struct TextInput {
    /// Text to speak
    text: Option<String>,

    /// Read the text from a file instead
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Treat line breaks as unit boundaries
    #[arg(long)]
    line_breaks: bool,
}

/// Where the audio duration comes from
#[derive(Args)]
struct DurationInput {
    /// Audio duration in seconds
    #[arg(short, long)]
    duration: Option<f64>,

    /// Read the duration from a WAV file header
    #[arg(short, long, conflicts_with = "duration")]
    audio: Option<PathBuf>,

    /// Boundary rule for positions on a shared edge (later, inclusive)
    #[arg(long)]
    boundary: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the text units
    Segment {
        #[command(flatten)]
        input: TextInput,
    },

    /// Estimate unit timings and write them as a cue sheet
    Timings {
        #[command(flatten)]
        input: TextInput,

        #[command(flatten)]
        timing: DurationInput,

        /// Output format (text, json, srt, vtt)
        #[arg(short = 'F', long)]
        format: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Simulate playback and print highlight changes
    Simulate {
        #[command(flatten)]
        input: TextInput,

        #[command(flatten)]
        timing: DurationInput,

        /// Position report interval in milliseconds
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Run at wall-clock speed
        #[arg(long)]
        realtime: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging - quiet by default, use -v for more
    let log_level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();

    let mut config = if let Some(ref config_path) = cli.config {
        Config::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        Config::default()
    };

    match cli.command {
        Commands::Segment { input } => {
            let text = read_text(&input, &mut config)?;
            let segmenter = Segmenter::new(config.segmentation.clone());
            for unit in segmenter.units(&text) {
                println!("{:>3}  {}", unit.index, unit.text);
            }
            Ok(())
        }
        Commands::Timings {
            input,
            timing,
            format,
            output,
        } => {
            let text = read_text(&input, &mut config)?;
            let duration = read_duration(&timing, &mut config)?;
            if let Some(format) = format {
                config.output.format = format.parse::<OutputFormat>()?;
            }
            if let Some(output) = output {
                config.output.output_path = Some(output);
            }
            write_timings(config, &text, duration)
        }
        Commands::Simulate {
            input,
            timing,
            tick_ms,
            realtime,
        } => {
            let text = read_text(&input, &mut config)?;
            let duration = read_duration(&timing, &mut config)?;
            if let Some(tick_ms) = tick_ms {
                config.playback.tick_interval_ms = tick_ms;
            }
            if realtime {
                config.playback.realtime = true;
            }
            config.validate()?;
            simulate(config, &text, duration)
        }
    }
}

/// Load the input text and apply segmentation overrides
fn read_text(input: &TextInput, config: &mut Config) -> Result<String> {
    if input.line_breaks {
        config.segmentation.split_on_line_breaks = true;
    }

    match (&input.text, &input.file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read text from {}", path.display())),
        (None, None) => anyhow::bail!("Provide text as an argument or with --file"),
    }
}

/// Resolve the duration hint and apply timing overrides
fn read_duration(input: &DurationInput, config: &mut Config) -> Result<Option<f64>> {
    if let Some(ref boundary) = input.boundary {
        config.timing.boundary = boundary.parse::<BoundaryPolicy>()?;
    }

    if let Some(ref path) = input.audio {
        let duration = wav_duration(path)
            .with_context(|| format!("Failed to read audio duration from {}", path.display()))?;
        info!("Audio duration from {}: {:.2}s", path.display(), duration);
        return Ok(Some(duration));
    }

    if input.duration.is_none() {
        warn!("No duration given, timings use the per-character fallback");
    }
    Ok(input.duration)
}

/// Estimate timings for `text` and write them as a cue sheet
fn write_timings(config: Config, text: &str, duration: Option<f64>) -> Result<()> {
    let mut controller = SyncController::new(&config);
    controller.start_session(text);
    controller.duration_known(duration)?;

    let session = controller
        .session()
        .context("Session missing after start")?;
    let cues = session_cues(session);
    debug!("Writing {} cues as {}", cues.len(), config.output.format);

    let mut writer = CueWriter::new(config.output).context("Failed to create cue writer")?;
    writer.write_sheet(&cues)?;

    if let Some(path) = writer.output_path() {
        info!("Cue sheet written to {}", path.display());
    }

    Ok(())
}

/// Drive a session from a simulated clock, printing each highlight change
fn simulate(config: Config, text: &str, duration: Option<f64>) -> Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    let mut driver = PlaybackDriver::new(SyncController::new(&config));
    let events = driver.controller_mut().subscribe();
    let mut highlighter = ConsoleHighlighter::new(true);

    let session = driver.controller_mut().start_session(text);
    driver
        .controller_mut()
        .duration_known(duration)?;

    let total = driver
        .controller()
        .session()
        .and_then(|s| s.intervals().last())
        .map_or(0.0, |i| i.end);
    let tick = Duration::from_millis(config.playback.tick_interval_ms);
    info!(
        "Simulating {:.2}s of playback in {}ms ticks (realtime: {})",
        total, config.playback.tick_interval_ms, config.playback.realtime
    );

    let sender = driver.sender();
    let mut clock = SimulatedClock::new(total, tick);
    let started = Instant::now();

    while let Some(update) = clock.next_update() {
        if !running.load(Ordering::SeqCst) {
            warn!("Simulation interrupted");
            break;
        }

        let signal = match update {
            PositionUpdate::Position(t) => {
                if config.playback.realtime {
                    let due = Duration::from_secs_f64(t);
                    if let Some(wait) = due.checked_sub(started.elapsed()) {
                        std::thread::sleep(wait);
                    }
                }
                PlaybackSignal::Position(t)
            }
            PositionUpdate::Ended => PlaybackSignal::Ended,
        };

        sender
            .send(PlaybackEvent::new(session, signal))
            .context("Playback event channel closed")?;
        driver.run_until_idle()?;
        events.drain_into(&mut highlighter);
    }

    driver.controller_mut().stop();
    events.drain_into(&mut highlighter);

    let stats = driver.stats();
    info!(
        "Simulation complete: {} events applied, {} stale, took {:.1}s",
        stats.applied,
        stats.stale,
        started.elapsed().as_secs_f32()
    );

    Ok(())
}
