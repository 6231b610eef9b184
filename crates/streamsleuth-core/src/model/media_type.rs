//! Media type classification: magic numbers first, file extension second.
//!
//! Purely informational: every dropped path is handed to the prober
//! regardless of its classification, because containers are frequently
//! misnamed. The result is recorded on the `MediaFile` for display.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes read from the head of a file for signature matching.
pub const SNIFF_LEN: usize = 512;

/// Broad media categories for display and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Audio,
    Video,
    Image,
    Document,
    Archive,
    Executable,
    Library,
    Unknown,
}

impl MediaType {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Audio => "Audio",
            Self::Video => "Video",
            Self::Image => "Image",
            Self::Document => "Document",
            Self::Archive => "Archive",
            Self::Executable => "Executable",
            Self::Library => "Library",
            Self::Unknown => "Unknown",
        }
    }

    /// `true` for the types ffprobe can be expected to enumerate streams for.
    pub fn is_media(self) -> bool {
        matches!(self, Self::Audio | Self::Video | Self::Image)
    }
}

/// Classify a file extension (without the dot).
///
/// Zero-heap-allocation: extensions are lowercased into a fixed-size stack
/// buffer. Extensions longer than 16 bytes are `Unknown`.
pub fn classify_extension(ext: &str) -> MediaType {
    let bytes = ext.as_bytes();
    if bytes.len() > 16 {
        return MediaType::Unknown;
    }

    let mut lower = [0u8; 16];
    for (dest, &src) in lower.iter_mut().zip(bytes.iter()) {
        *dest = src.to_ascii_lowercase();
    }
    let lower_str = match std::str::from_utf8(&lower[..bytes.len()]) {
        Ok(s) => s,
        Err(_) => return MediaType::Unknown,
    };

    match lower_str {
        "mp3" | "wav" | "flac" | "ogg" | "oga" | "opus" | "m4a" | "aac" | "wma" | "mid"
        | "amr" | "aiff" | "dsf" | "ape" => MediaType::Audio,

        "mp4" | "mkv" | "webm" | "mov" | "avi" | "wmv" | "mpg" | "mpeg" | "flv" | "m4v"
        | "ts" | "m2ts" | "3gp" => MediaType::Video,

        "gif" | "png" | "jpg" | "jpeg" | "bmp" | "tiff" | "tif" | "webp" | "cr2" | "heif"
        | "heic" | "avif" | "jxr" | "psd" | "ico" | "ora" | "djvu" => MediaType::Image,

        "txt" | "md" | "pdf" | "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" | "odt"
        | "ods" | "odp" | "rtf" => MediaType::Document,

        "zip" | "rar" | "7z" | "tar" | "gz" | "bz2" | "bz3" | "xz" | "swf" | "sqlite" | "nes"
        | "crx" | "cab" | "deb" | "ar" | "z" | "lz" | "rpm" | "dcm" | "zst" | "lz4" | "cpio"
        | "par2" | "epub" | "mobi" => MediaType::Archive,

        "exe" | "dll" | "msi" | "dmg" | "pkg" | "app" | "elf" | "bc" | "mach" | "class"
        | "dex" | "dey" | "der" | "obj" => MediaType::Executable,

        "so" | "dylib" => MediaType::Library,

        _ => MediaType::Unknown,
    }
}

/// Classify a path string by its final extension.
///
/// Dotfiles (`.hidden`) and names ending in a dot have no extension.
pub fn classify_path(path: &str) -> MediaType {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name.rfind('.') {
        Some(pos) if pos > 0 && pos + 1 < name.len() => classify_extension(&name[pos + 1..]),
        _ => MediaType::Unknown,
    }
}

/// Classify by content signature. `None` when the bytes match nothing
/// that maps to a category (fonts, custom matchers, unknown data).
pub fn sniff_bytes(head: &[u8]) -> Option<MediaType> {
    use infer::MatcherType;
    let kind = infer::get(head)?;
    match kind.matcher_type() {
        MatcherType::Audio => Some(MediaType::Audio),
        MatcherType::Video => Some(MediaType::Video),
        MatcherType::Image => Some(MediaType::Image),
        MatcherType::Doc | MatcherType::Book | MatcherType::Text => Some(MediaType::Document),
        MatcherType::Archive => Some(MediaType::Archive),
        MatcherType::App => Some(MediaType::Executable),
        _ => None,
    }
}

/// Read up to [`SNIFF_LEN`] bytes of `path` and classify them.
///
/// Unreadable files yield `None`.
pub fn sniff_file(path: &Path) -> Option<MediaType> {
    let mut head = Vec::with_capacity(SNIFF_LEN);
    File::open(path)
        .and_then(|f| f.take(SNIFF_LEN as u64).read_to_end(&mut head))
        .ok()?;
    sniff_bytes(&head)
}

/// Classify `path` by its content when readable and recognised, otherwise
/// by its extension.
pub fn detect_path(path: &str) -> MediaType {
    sniff_file(Path::new(path)).unwrap_or_else(|| classify_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MP4_HEAD: &[u8] = &[
        0x00, 0x00, 0x00, 0x18, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm', 0x00, 0x00, 0x02,
        0x00, b'i', b's', b'o', b'm', b'i', b's', b'o', b'2',
    ];
    const PNG_HEAD: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0x0d];

    #[test]
    fn sniff_recognises_signatures() {
        assert_eq!(sniff_bytes(MP4_HEAD), Some(MediaType::Video));
        assert_eq!(sniff_bytes(PNG_HEAD), Some(MediaType::Image));
        assert_eq!(sniff_bytes(b"fLaC\0\0\0\x22"), Some(MediaType::Audio));
        assert_eq!(sniff_bytes(b"just some words"), None);
        assert_eq!(sniff_bytes(&[]), None);
    }

    #[test]
    fn misnamed_container_is_detected_by_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.bin");
        std::fs::write(&path, MP4_HEAD).unwrap();
        let path = path.to_str().unwrap();

        assert_eq!(classify_path(path), MediaType::Unknown);
        assert_eq!(detect_path(path), MediaType::Video);
    }

    #[test]
    fn unrecognised_content_falls_back_to_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.flac");
        std::fs::write(&path, b"plain text, no signature").unwrap();
        assert_eq!(detect_path(path.to_str().unwrap()), MediaType::Audio);

        // Missing files are classified by name alone.
        assert_eq!(detect_path("/no/such/dir/clip.mkv"), MediaType::Video);
    }

    #[test]
    fn classify_known_video_extensions() {
        for ext in &["mp4", "mkv", "webm", "mov", "avi", "m4v", "ts"] {
            assert_eq!(
                classify_extension(ext),
                MediaType::Video,
                "expected Video for .{ext}"
            );
        }
    }

    #[test]
    fn classify_known_audio_extensions() {
        for ext in &["mp3", "flac", "wav", "m4a", "opus"] {
            assert_eq!(
                classify_extension(ext),
                MediaType::Audio,
                "expected Audio for .{ext}"
            );
        }
    }

    #[test]
    fn classify_unknown_extension() {
        assert_eq!(classify_extension("xyz"), MediaType::Unknown);
        assert_eq!(classify_extension(""), MediaType::Unknown);
        assert_eq!(
            classify_extension("averyveryverylongextension"),
            MediaType::Unknown
        );
    }

    /// Extension matching must be case-insensitive so "MKV" == "mkv".
    #[test]
    fn classify_case_insensitive() {
        assert_eq!(classify_extension("MKV"), MediaType::Video);
        assert_eq!(classify_extension("Flac"), MediaType::Audio);
        assert_eq!(classify_extension("SO"), MediaType::Library);
    }

    #[test]
    fn classify_path_uses_last_component() {
        assert_eq!(classify_path("/media/films/a.b/movie.mkv"), MediaType::Video);
        assert_eq!(classify_path("C:\\Music\\song.MP3"), MediaType::Audio);
        assert_eq!(classify_path("/tmp/dir.mp4/README"), MediaType::Unknown);
    }

    #[test]
    fn classify_path_without_extension() {
        assert_eq!(classify_path(".hidden"), MediaType::Unknown);
        assert_eq!(classify_path("file."), MediaType::Unknown);
        assert_eq!(classify_path(""), MediaType::Unknown);
    }

    #[test]
    fn media_types_are_flagged() {
        assert!(MediaType::Video.is_media());
        assert!(MediaType::Image.is_media());
        assert!(!MediaType::Archive.is_media());
        assert!(!MediaType::Unknown.is_media());
    }
}
