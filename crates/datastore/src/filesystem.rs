use crate::{PersistenceError, SummaryRepository};
use domain::VideoSummary;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores each summary as `<root>/<video_id>.json`.
///
/// Writes go to a uniquely named temp file in the same directory and are
/// renamed over the target, so readers never observe a partial record.
pub struct FileSystemRepository {
    root: PathBuf,
}

impl FileSystemRepository {
    /// Open (and create if needed) a store rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, video_id: &str) -> Result<PathBuf, PersistenceError> {
        let valid = !video_id.is_empty()
            && video_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PersistenceError::InvalidKey(video_id.to_string()));
        }
        Ok(self.root.join(format!("{video_id}.json")))
    }
}

impl SummaryRepository for FileSystemRepository {
    fn get_summary(&self, video_id: &str) -> Result<Option<VideoSummary>, PersistenceError> {
        let path = self.record_path(video_id)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn upsert_summary(&self, summary: VideoSummary) -> Result<(), PersistenceError> {
        let path = self.record_path(&summary.video_id)?;
        let tmp = self
            .root
            .join(format!(".{}.{}.tmp", summary.video_id, uuid::Uuid::new_v4()));

        fs::write(&tmp, serde_json::to_vec_pretty(&summary)?)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!(video_id = %summary.video_id, path = %path.display(), "summary written");
        Ok(())
    }
}
