//! Saving exported audio under a suggested filename.

use chrono::Utc;

use vocable_core::{AudioBlob, DownloadError, FileSaver};

/// Filename offered for a blob captured at `unix_millis`.
pub fn filename_at(unix_millis: i64) -> String {
    format!("speech-{unix_millis}.wav")
}

/// Filename offered when the caller does not supply one.
pub fn default_filename() -> String {
    filename_at(Utc::now().timestamp_millis())
}

/// Reject names that are empty or could escape the save location.
fn validate_filename(filename: &str) -> Result<(), DownloadError> {
    let trimmed = filename.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || filename.contains(['/', '\\', '\0']);

    if invalid {
        return Err(DownloadError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}

/// Hands audio blobs to the host save interaction.
#[derive(Debug, Clone, Default)]
pub struct DownloadHelper<S> {
    saver: S,
}

impl<S: FileSaver> DownloadHelper<S> {
    pub const fn new(saver: S) -> Self {
        Self { saver }
    }

    pub const fn saver(&self) -> &S {
        &self.saver
    }

    /// Save `blob` and return the filename used.
    ///
    /// Without a `filename`, the blob is saved as `speech-<unix-millis>.wav`.
    pub fn download_audio(
        &self,
        blob: &AudioBlob,
        filename: Option<&str>,
    ) -> Result<String, DownloadError> {
        let filename = filename.map_or_else(default_filename, str::to_owned);
        validate_filename(&filename)?;

        self.saver.save(blob, &filename)?;
        tracing::info!(%filename, bytes = blob.len(), mime = blob.mime(), "Audio saved");
        Ok(filename)
    }
}

// ============================================================================
// Directory saver
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
pub use directory::DirectorySaver;

#[cfg(not(target_arch = "wasm32"))]
mod directory {
    use std::path::{Path, PathBuf};

    use vocable_core::{AudioBlob, DownloadError, FileSaver};

    /// Writes blobs into a directory on the local filesystem.
    #[derive(Debug, Clone)]
    pub struct DirectorySaver {
        dir: PathBuf,
    }

    impl DirectorySaver {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }
    }

    impl FileSaver for DirectorySaver {
        fn save(&self, blob: &AudioBlob, filename: &str) -> Result<(), DownloadError> {
            std::fs::create_dir_all(&self.dir)?;
            let path = self.dir.join(filename);
            std::fs::write(&path, blob.bytes())?;
            tracing::debug!(path = %path.display(), "Wrote audio file");
            Ok(())
        }
    }
}
