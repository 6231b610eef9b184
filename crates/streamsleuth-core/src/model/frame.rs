/// A single normalised media stream.
///
/// Frames are built once by the normaliser and never mutated afterwards:
/// all fields are private and exposed through accessors.
use compact_str::CompactString;
use std::fmt;

/// Per-kind summary of a stream, kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamDetail {
    Video {
        codec: CompactString,
        width: Option<u32>,
        height: Option<u32>,
        /// Rational frame rate as reported (e.g. `"24000/1001"`).
        frame_rate: Option<CompactString>,
        bit_rate: Option<u64>,
    },
    Audio {
        codec: CompactString,
        sample_rate: Option<u32>,
        channels: Option<u32>,
        bit_rate: Option<u64>,
    },
    Subtitle {
        codec: CompactString,
        language: Option<CompactString>,
    },
    /// Data, attachment, and unrecognised stream types.
    Data { codec: CompactString },
}

impl StreamDetail {
    /// Codec short name, `"unknown"` when the prober did not report one.
    pub fn codec(&self) -> &str {
        match self {
            Self::Video { codec, .. }
            | Self::Audio { codec, .. }
            | Self::Subtitle { codec, .. }
            | Self::Data { codec } => codec.as_str(),
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Video { .. } => "Video",
            Self::Audio { .. } => "Audio",
            Self::Subtitle { .. } => "Subtitle",
            Self::Data { .. } => "Data",
        }
    }
}

impl fmt::Display for StreamDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video {
                codec,
                width,
                height,
                frame_rate,
                ..
            } => {
                write!(f, "{codec}")?;
                if let (Some(w), Some(h)) = (width, height) {
                    write!(f, " {w}x{h}")?;
                }
                if let Some(fps) = frame_rate.as_deref().and_then(parse_frame_rate) {
                    write!(f, " @ {fps:.3} fps")?;
                }
                Ok(())
            }
            Self::Audio {
                codec,
                sample_rate,
                channels,
                ..
            } => {
                write!(f, "{codec}")?;
                if let Some(hz) = sample_rate {
                    write!(f, " {hz} Hz")?;
                }
                if let Some(ch) = channels {
                    write!(f, " {ch} ch")?;
                }
                Ok(())
            }
            Self::Subtitle { codec, language } => match language {
                Some(lang) => write!(f, "{codec} [{lang}]"),
                None => write!(f, "{codec}"),
            },
            Self::Data { codec } => write!(f, "{codec}"),
        }
    }
}

/// One stream of a probed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Stable identifier within the file: `"<index>:<kind>"`.
    key: CompactString,
    /// Size measure of the stream in bytes, saturated at `u32::MAX`.
    bytes: u32,
    detail: StreamDetail,
}

impl Frame {
    pub fn new(key: impl Into<CompactString>, bytes: u32, detail: StreamDetail) -> Self {
        Self {
            key: key.into(),
            bytes,
            detail,
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    #[inline]
    pub fn bytes(&self) -> u32 {
        self.bytes
    }

    #[inline]
    pub fn detail(&self) -> &StreamDetail {
        &self.detail
    }
}

/// Parse an ffprobe rational frame rate (`"30000/1001"`, `"25/1"`, `"25"`).
///
/// Returns `None` for `0/0` (ffprobe's "unknown") and malformed input.
pub fn parse_frame_rate(s: &str) -> Option<f64> {
    let fps = match s.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => s.trim().parse().ok()?,
    };
    (fps.is_finite() && fps > 0.0).then_some(fps)
}
