//! Audio duration probing.

use std::path::Path;

use crate::error::{Error, Result};

/// Duration of a WAV file in seconds, read from its header.
///
/// Used as the global time bound when seeding TextGrids for audio files.
pub fn wav_duration(path: &Path) -> Result<f64> {
    let reader = hound::WavReader::open(path).map_err(|e| Error::AudioOpen {
        path: path.to_path_buf(),
        source: e,
    })?;
    let sample_rate = reader.spec().sample_rate;
    Ok(f64::from(reader.duration()) / f64::from(sample_rate))
}
