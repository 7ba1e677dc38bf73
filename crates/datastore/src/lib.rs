use domain::VideoSummary;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

mod filesystem;

pub use filesystem::FileSystemRepository;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("summary store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("summary record could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid summary key '{0}'")]
    InvalidKey(String),

    #[error("summary store lock poisoned")]
    LockPoisoned,
}

/// Repository trait for the summary cache.
/// Implementations only need single-key atomicity: a write either replaces
/// the whole record or leaves the previous one in place.
pub trait SummaryRepository: Send + Sync {
    /// Get the stored summary for a video, if any
    fn get_summary(&self, video_id: &str) -> Result<Option<VideoSummary>, PersistenceError>;

    /// Insert or overwrite the summary for `summary.video_id`
    fn upsert_summary(&self, summary: VideoSummary) -> Result<(), PersistenceError>;
}

/// In-memory implementation of the SummaryRepository trait
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    summaries: Arc<RwLock<HashMap<String, VideoSummary>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.summaries.read().map(|s| s.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SummaryRepository for InMemoryRepository {
    fn get_summary(&self, video_id: &str) -> Result<Option<VideoSummary>, PersistenceError> {
        Ok(self
            .summaries
            .read()
            .map_err(|_| PersistenceError::LockPoisoned)?
            .get(video_id)
            .cloned())
    }

    fn upsert_summary(&self, summary: VideoSummary) -> Result<(), PersistenceError> {
        self.summaries
            .write()
            .map_err(|_| PersistenceError::LockPoisoned)?
            .insert(summary.video_id.clone(), summary);
        Ok(())
    }
}
