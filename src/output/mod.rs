//! Output: cue sheet export and console highlighting

pub mod formats;

use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, Stdout, Write};
use std::path::PathBuf;

use crate::config::{OutputConfig, OutputFormat};
use crate::sync::{PresentationAdapter, SyncSession};
use crate::text::TextUnit;
use crate::timing::Interval;

pub use formats::{format_json, format_srt, format_text, format_vtt};

/// A text unit with its estimated time window, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cue {
    pub index: usize,
    pub text: String,
    pub start_ms: i64,
    pub end_ms: i64,
}

impl Cue {
    pub fn new(unit: &TextUnit, interval: &Interval) -> Self {
        Self {
            index: unit.index,
            text: unit.text.clone(),
            start_ms: (interval.start * 1000.0).round() as i64,
            end_ms: (interval.end * 1000.0).round() as i64,
        }
    }
}

/// Build cues for every timed unit of a session
pub fn session_cues(session: &SyncSession) -> Vec<Cue> {
    session.cues().map(|(unit, interval)| Cue::new(unit, interval)).collect()
}

/// Writes cue sheets to the console and/or a file
pub struct CueWriter {
    config: OutputConfig,
    file: Option<File>,
}

impl CueWriter {
    /// Create a new cue writer. An existing output file is overwritten.
    pub fn new(config: OutputConfig) -> io::Result<Self> {
        let file = if let Some(ref path) = config.output_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            Some(
                OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(path)?,
            )
        } else {
            None
        };

        Ok(Self { config, file })
    }

    /// Write a full cue sheet in the configured format
    pub fn write_sheet(&mut self, cues: &[Cue]) -> io::Result<()> {
        let formatted = self.format(cues);

        if self.config.enable_console {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", formatted)?;
            stdout.flush()?;
        }

        if let Some(ref mut file) = self.file {
            write!(file, "{}", formatted)?;
            file.flush()?;
        }

        Ok(())
    }

    /// Render cues according to the configured format
    pub fn format(&self, cues: &[Cue]) -> String {
        match self.config.format {
            OutputFormat::Text => cues.iter().map(|c| format_text(c) + "\n").collect(),
            OutputFormat::Json => format_json(cues) + "\n",
            OutputFormat::Srt => cues
                .iter()
                .enumerate()
                .map(|(i, c)| format_srt(c, i + 1))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Vtt => {
                if cues.is_empty() {
                    return "WEBVTT\n".to_string();
                }
                cues.iter()
                    .enumerate()
                    .map(|(i, c)| format_vtt(c, i == 0))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    }

    /// Get the output file path if configured
    pub fn output_path(&self) -> Option<&PathBuf> {
        self.config.output_path.as_ref()
    }
}

/// Presentation adapter that prints the active unit as it changes
pub struct ConsoleHighlighter<W: Write = Stdout> {
    out: W,
    units: Vec<TextUnit>,
    show_index: bool,
}

impl ConsoleHighlighter<Stdout> {
    pub fn new(show_index: bool) -> Self {
        Self::with_writer(io::stdout(), show_index)
    }
}

impl<W: Write> ConsoleHighlighter<W> {
    pub fn with_writer(out: W, show_index: bool) -> Self {
        Self {
            out,
            units: Vec::new(),
            show_index,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PresentationAdapter for ConsoleHighlighter<W> {
    fn render(&mut self, units: &[TextUnit]) {
        self.units = units.to_vec();
        let _ = writeln!(self.out, "-- {} units --", units.len());
    }

    fn activate(&mut self, index: usize) {
        let Some(unit) = self.units.get(index) else {
            return;
        };
        let _ = if self.show_index {
            writeln!(self.out, "> [{}] {}", index, unit.text)
        } else {
            writeln!(self.out, "> {}", unit.text)
        };
        let _ = self.out.flush();
    }

    fn deactivate(&mut self, _index: usize) {}
}

/// Format milliseconds as MM:SS.mmm, or HH:MM:SS.mmm past the hour
pub fn format_timestamp(ms: i64) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    let millis = ms % 1000;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    } else {
        format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
    }
}
