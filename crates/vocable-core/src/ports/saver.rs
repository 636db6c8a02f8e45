//! File-save port.

use crate::domain::AudioBlob;
use crate::error::DownloadError;

/// Host save-as interaction.
pub trait FileSaver {
    /// Offer `blob` to the user under `filename`.
    fn save(&self, blob: &AudioBlob, filename: &str) -> Result<(), DownloadError>;
}
