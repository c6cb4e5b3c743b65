//! Batch processing pipelines.
//!
//! One driver per subcommand, plus the shared file enumeration and
//! output directory helpers they all use. Any per-file error aborts the
//! whole batch; partially written earlier outputs are left on disk.

mod generate;
mod modify;
pub mod progress;
mod seed;

pub use generate::{GenerateOptions, GenerateSummary, generate};
pub use modify::{ModifyOptions, ModifySummary, RestructureContext, modify, restructure};
pub use seed::{SeedOptions, SeedSummary, seed};

use std::path::{Path, PathBuf};

use tracing::info;

use crate::constants::TEXTGRID_EXTENSION;
use crate::error::{Error, Result};

/// Enumerate files in `dir` (non-recursively) whose name ends with
/// `extension`, matched exactly and case-sensitively. Everything else
/// is skipped silently. Results are sorted by file name.
pub fn collect_files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(extension));
        if matches {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(Error::NoInputFiles {
            path: dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }
    Ok(files)
}

/// Create the output directory if it does not exist. Idempotent: a
/// directory that already exists is left alone.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| Error::OutputDirCreate {
        path: dir.to_path_buf(),
        source: e,
    })?;
    info!("Created directory '{}'", dir.display());
    Ok(())
}

/// Derive the participant key from a TextGrid file name by stripping the
/// `.TextGrid` suffix.
///
/// The key must be non-empty; a file named just `.TextGrid` is rejected.
pub fn participant_key(path: &Path) -> Result<String> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let key = file_name
        .strip_suffix(TEXTGRID_EXTENSION)
        .unwrap_or(file_name);
    if key.is_empty() {
        return Err(Error::InvalidParticipantKey {
            file_name: file_name.to_string(),
        });
    }
    Ok(key.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_files_matches_extension_exactly() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.TextGrid", "b.TextGrid", "c.textgrid", "d.wav", "notes.txt"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }

        let files = collect_files_with_extension(dir.path(), ".TextGrid").unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.TextGrid", "b.TextGrid"]);
    }

    #[test]
    fn test_collect_files_is_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.wav"), "x").unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("b.wav"), "x").unwrap();

        let files = collect_files_with_extension(dir.path(), ".wav").unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_collect_files_empty_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = collect_files_with_extension(dir.path(), ".TextGrid");
        assert!(matches!(result, Err(Error::NoInputFiles { .. })));
    }

    #[test]
    fn test_ensure_output_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("textgrids");

        ensure_output_dir(&out).unwrap();
        assert!(out.is_dir());
        // A second run must not fail.
        ensure_output_dir(&out).unwrap();
    }

    #[test]
    fn test_participant_key_strips_suffix() {
        let key = participant_key(Path::new("/data/S01.TextGrid")).unwrap();
        assert_eq!(key, "S01");
    }

    #[test]
    fn test_participant_key_rejects_bare_extension() {
        let result = participant_key(Path::new("/data/.TextGrid"));
        assert!(matches!(result, Err(Error::InvalidParticipantKey { .. })));
    }
}
