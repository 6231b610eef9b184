/// Ordered registry of probed files, keyed by path.
///
/// The registry is owned by the host and shared with the ingestion
/// controller as a [`SharedRegistry`]. Only the controller's commit thread
/// takes the write lock; the UI holds a read lock while rendering.
///
/// # Duplicate paths
///
/// Re-dropping a path that is already registered replaces the existing
/// entry **in place** (last write wins, original position kept) and reports
/// [`AppendOutcome::Replaced`] so the caller can surface the conflict.
use super::media_file::MediaFile;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A registry shared between the commit thread and readers.
pub type SharedRegistry = Arc<RwLock<FileRegistry>>;

/// Result of [`FileRegistry::append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// New path, pushed at `position`.
    Inserted { position: usize },
    /// Existing path, its entry at `position` was overwritten.
    Replaced { position: usize },
}

impl AppendOutcome {
    pub fn position(self) -> usize {
        match self {
            Self::Inserted { position } | Self::Replaced { position } => position,
        }
    }

    pub fn is_replacement(self) -> bool {
        matches!(self, Self::Replaced { .. })
    }
}

#[derive(Debug, Default, Clone)]
pub struct FileRegistry {
    files: Vec<MediaFile>,
    /// Path → position in `files`.
    index: HashMap<String, usize>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry wrapped for sharing.
    pub fn shared() -> SharedRegistry {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Add a fully-built file, replacing any entry with the same path.
    pub fn append(&mut self, file: MediaFile) -> AppendOutcome {
        if let Some(&position) = self.index.get(file.path()) {
            self.files[position] = file;
            return AppendOutcome::Replaced { position };
        }
        let position = self.files.len();
        self.index.insert(file.path().to_owned(), position);
        self.files.push(file);
        AppendOutcome::Inserted { position }
    }

    /// Read-only ordered view.
    #[inline]
    pub fn files(&self) -> &[MediaFile] {
        &self.files
    }

    /// Owned copy of the current contents.
    pub fn snapshot(&self) -> Vec<MediaFile> {
        self.files.clone()
    }

    pub fn get(&self, path: &str) -> Option<&MediaFile> {
        self.index.get(path).map(|&i| &self.files[i])
    }

    pub fn position(&self, path: &str) -> Option<usize> {
        self.index.get(path).copied()
    }

    /// Total number of frames across all files.
    pub fn total_frames(&self) -> usize {
        self.files.iter().map(|f| f.data().len()).sum()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::frame::{Frame, StreamDetail};

    fn file_with_frames(path: &str, frames: usize) -> MediaFile {
        let mut file = MediaFile::new(path).unwrap();
        for i in 0..frames {
            file.push_frame(Frame::new(
                format!("{i}:data"),
                0,
                StreamDetail::Data {
                    codec: "bin".into(),
                },
            ));
        }
        file
    }

    #[test]
    fn append_keeps_order() {
        let mut reg = FileRegistry::new();
        assert_eq!(
            reg.append(file_with_frames("a.mp4", 1)),
            AppendOutcome::Inserted { position: 0 }
        );
        assert_eq!(
            reg.append(file_with_frames("b.mkv", 2)),
            AppendOutcome::Inserted { position: 1 }
        );
        let paths: Vec<&str> = reg.files().iter().map(|f| f.path()).collect();
        assert_eq!(paths, ["a.mp4", "b.mkv"]);
        assert_eq!(reg.total_frames(), 3);
    }

    /// Re-appending a path overwrites in place: last write wins and the
    /// original position is preserved.
    #[test]
    fn duplicate_path_replaces_in_place() {
        let mut reg = FileRegistry::new();
        reg.append(file_with_frames("a.mp4", 1));
        reg.append(file_with_frames("b.mkv", 1));

        let outcome = reg.append(file_with_frames("a.mp4", 3));
        assert_eq!(outcome, AppendOutcome::Replaced { position: 0 });
        assert!(outcome.is_replacement());

        assert_eq!(reg.len(), 2);
        assert_eq!(reg.files()[0].path(), "a.mp4");
        assert_eq!(reg.files()[0].data().len(), 3);
        assert_eq!(reg.get("a.mp4").map(|f| f.data().len()), Some(3));
    }

    #[test]
    fn snapshot_is_independent() {
        let mut reg = FileRegistry::new();
        reg.append(file_with_frames("a.mp4", 1));
        let snap = reg.snapshot();
        reg.append(file_with_frames("b.mp4", 1));
        assert_eq!(snap.len(), 1);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn empty_registry() {
        let reg = FileRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.get("missing"), None);
        assert_eq!(reg.position("missing"), None);
        assert_eq!(reg.total_frames(), 0);
    }
}
