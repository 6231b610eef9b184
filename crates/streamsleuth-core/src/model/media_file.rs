/// One dropped, probed file and its ordered streams.
///
/// A `MediaFile` is assembled by the ingestion commit thread (frames pushed
/// in the order the prober reported them) and then moved into the
/// `FileRegistry`, which only hands out shared references.
use super::frame::Frame;
use super::media_type::{classify_path, MediaType};
use crate::error::RegistryError;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    /// Path exactly as delivered by the host. Never empty.
    path: String,
    /// Streams in probe discovery order.
    data: Vec<Frame>,
    media_type: MediaType,
    /// Container size in bytes as reported by the prober; 0 when unknown.
    size: u64,
    duration: Option<Duration>,
}

impl MediaFile {
    /// Create an empty file record for `path`.
    pub fn new(path: impl Into<String>) -> Result<Self, RegistryError> {
        let path = path.into();
        if path.is_empty() {
            return Err(RegistryError::EmptyPath);
        }
        let media_type = classify_path(&path);
        Ok(Self {
            path,
            data: Vec::new(),
            media_type,
            size: 0,
            duration: None,
        })
    }

    /// Append a frame. Only called while the file is being built.
    pub fn push_frame(&mut self, frame: Frame) {
        self.data.push(frame);
    }

    /// Replace the extension-based classification, e.g. with one derived
    /// from the file's content.
    pub fn set_media_type(&mut self, media_type: MediaType) {
        self.media_type = media_type;
    }

    /// Record container-level facts reported alongside the streams.
    pub fn set_container(&mut self, size: u64, duration: Option<Duration>) {
        self.size = size;
        self.duration = duration;
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn data(&self) -> &[Frame] {
        &self.data
    }

    #[inline]
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Final path component, or the whole path if it has none.
    pub fn file_name(&self) -> &str {
        self.path
            .rsplit(['/', '\\'])
            .find(|s| !s.is_empty())
            .unwrap_or(&self.path)
    }

    /// Sum of all frame sizes.
    pub fn stream_bytes(&self) -> u64 {
        self.data.iter().map(|f| u64::from(f.bytes())).sum()
    }

    /// Look up a frame by key.
    pub fn frame(&self, key: &str) -> Option<&Frame> {
        self.data.iter().find(|f| f.key() == key)
    }
}
