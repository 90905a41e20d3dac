//! WAV header probing

use std::path::Path;

use tracing::debug;

use crate::error::{Result, TtsSyncError};

/// Read the duration of a WAV file in seconds from its header.
///
/// Only the header is read; samples are not decoded.
pub fn wav_duration<P: AsRef<Path>>(path: P) -> Result<f64> {
    let path = path.as_ref();
    let reader = hound::WavReader::open(path).map_err(|e| match e {
        hound::Error::IoError(io) => TtsSyncError::Io(io),
        other => TtsSyncError::Metadata(format!("{}: {}", path.display(), other)),
    })?;

    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err(TtsSyncError::Metadata(format!(
            "{}: sample rate is zero",
            path.display()
        )));
    }

    let duration = reader.duration() as f64 / spec.sample_rate as f64;
    debug!(
        "WAV {}: {} channels @ {} Hz, {:.2}s",
        path.display(),
        spec.channels,
        spec.sample_rate,
        duration
    );

    Ok(duration)
}
