//! Date-partitioned storage for synthesized audio
//!
//! Files land in `<root>/<YYYY>/<MM>/<DD>/<uuid>.mp3`. Every file gets a fresh
//! UUID, so writers sharing a root never clash, and an already existing day
//! directory is reused.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::debug;
use uuid::Uuid;

use crate::error::SpeechError;

/// Extension of synthesized audio files
pub const AUDIO_EXTENSION: &str = "mp3";

/// Writes synthesized audio below a root directory
#[derive(Debug, Clone)]
pub struct AudioStore {
    root: PathBuf,
}

impl AudioStore {
    /// Store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the files of `date`
    #[must_use]
    pub fn partition_dir(&self, date: NaiveDate) -> PathBuf {
        self.root
            .join(date.format("%Y").to_string())
            .join(date.format("%m").to_string())
            .join(date.format("%d").to_string())
    }

    /// Write `audio` into today's partition (local time)
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Storage` if the directory or file cannot be written.
    pub async fn store(&self, audio: &[u8]) -> Result<PathBuf, SpeechError> {
        self.store_on(Local::now().date_naive(), audio).await
    }

    /// Write `audio` into the partition of `date`, returning the absolute path
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Storage` if the directory or file cannot be written.
    pub async fn store_on(&self, date: NaiveDate, audio: &[u8]) -> Result<PathBuf, SpeechError> {
        let dir = self.partition_dir(date);
        tokio::fs::create_dir_all(&dir).await?;
        let dir = tokio::fs::canonicalize(&dir).await?;

        let path = dir.join(format!("{}.{AUDIO_EXTENSION}", Uuid::new_v4().simple()));
        tokio::fs::write(&path, audio).await?;

        debug!(path = %path.display(), size = audio.len(), "Stored synthesized audio");
        Ok(path)
    }
}
