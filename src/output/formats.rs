//! Cue sheet format implementations

use serde::Serialize;

use super::{format_timestamp, Cue};

/// JSON output structure
#[derive(Debug, Serialize)]
struct JsonSheet<'a> {
    units: usize,
    duration_ms: i64,
    cues: &'a [Cue],
}

/// Format a cue as plain text with timestamps
pub fn format_text(cue: &Cue) -> String {
    let start = format_timestamp(cue.start_ms);
    let end = format_timestamp(cue.end_ms);
    format!("[{} --> {}] {}", start, end, cue.text)
}

/// Format a whole cue sheet as JSON
pub fn format_json(cues: &[Cue]) -> String {
    let sheet = JsonSheet {
        units: cues.len(),
        duration_ms: cues.last().map_or(0, |c| c.end_ms),
        cues,
    };

    serde_json::to_string_pretty(&sheet)
        .unwrap_or_else(|_| format!("{{\"units\": {}}}", cues.len()))
}

/// Format a cue as an SRT block (1-based sequence numbers)
pub fn format_srt(cue: &Cue, sequence: usize) -> String {
    let start = format_srt_timestamp(cue.start_ms);
    let end = format_srt_timestamp(cue.end_ms);

    format!("{}\n{} --> {}\n{}\n", sequence, start, end, cue.text)
}

/// Format a cue as a WebVTT block
pub fn format_vtt(cue: &Cue, include_header: bool) -> String {
    let start = format_vtt_timestamp(cue.start_ms);
    let end = format_vtt_timestamp(cue.end_ms);

    if include_header {
        format!("WEBVTT\n\n{} --> {}\n{}\n", start, end, cue.text)
    } else {
        format!("{} --> {}\n{}\n", start, end, cue.text)
    }
}

/// Format timestamp for SRT (HH:MM:SS,mmm)
fn format_srt_timestamp(ms: i64) -> String {
    let (hours, minutes, seconds, millis) = split_ms(ms);
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Format timestamp for VTT (HH:MM:SS.mmm)
fn format_vtt_timestamp(ms: i64) -> String {
    let (hours, minutes, seconds, millis) = split_ms(ms);
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

fn split_ms(ms: i64) -> (i64, i64, i64, i64) {
    let total_seconds = ms / 1000;
    (
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60,
        ms % 1000,
    )
}
