//! Raw stream descriptors as reported by the prober.
//!
//! These mirror the subset of ffprobe's JSON output that the normaliser
//! and the diagnostic sink consume. Numeric fields that ffprobe reports as
//! strings (`bit_rate`, `duration`, `sample_rate`) stay strings here and
//! are parsed on demand.

use crate::error::ProbeError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// One stream of a container, exactly as the prober reported it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StreamDescriptor {
    #[serde(default)]
    pub index: u32,
    pub codec_type: Option<String>,
    pub codec_name: Option<String>,
    pub codec_long_name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub r_frame_rate: Option<String>,
    pub sample_rate: Option<String>,
    pub channels: Option<u32>,
    pub bit_rate: Option<String>,
    pub duration: Option<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl StreamDescriptor {
    /// Lowercase codec type, or `"unknown"` when absent or blank.
    pub fn kind(&self) -> String {
        match self.codec_type.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_ascii_lowercase(),
            _ => "unknown".to_owned(),
        }
    }

    pub fn bit_rate_bps(&self) -> Option<u64> {
        self.bit_rate.as_deref().and_then(|s| s.trim().parse().ok())
    }

    /// Stream duration in seconds, if reported and finite.
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|d| d.is_finite() && *d >= 0.0)
    }

    pub fn sample_rate_hz(&self) -> Option<u32> {
        self.sample_rate.as_deref().and_then(|s| s.trim().parse().ok())
    }

    /// Exact tag lookup, case-insensitive on the key.
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// First tag (in key order) whose name starts with `prefix`.
    ///
    /// Matroska muxers write statistics tags with a language suffix
    /// (`NUMBER_OF_BYTES-eng`), so exact lookup is not enough.
    pub fn tag_with_prefix(&self, prefix: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| {
                k.get(..prefix.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
            })
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for StreamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {}",
            self.index,
            self.kind(),
            self.codec_name.as_deref().unwrap_or("unknown")
        )?;
        if let (Some(w), Some(h)) = (self.width, self.height) {
            write!(f, " {w}x{h}")?;
        }
        if let Some(rate) = self
            .r_frame_rate
            .as_deref()
            .filter(|r| *r != "0/0" && self.width.is_some())
        {
            write!(f, " {rate} fps")?;
        }
        if let Some(hz) = self.sample_rate_hz() {
            write!(f, " {hz} Hz")?;
        }
        if let Some(ch) = self.channels {
            write!(f, " {ch} ch")?;
        }
        if let Some(bps) = self.bit_rate_bps() {
            write!(f, " {} kb/s", bps / 1000)?;
        }
        if let Some(secs) = self.duration_secs() {
            write!(f, " {secs:.3}s")?;
        }
        if let Some(lang) = self.tag("language") {
            write!(f, " [{lang}]")?;
        }
        Ok(())
    }
}

/// Container-level facts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FormatDescriptor {
    pub format_name: Option<String>,
    pub duration: Option<String>,
    pub size: Option<String>,
    pub bit_rate: Option<String>,
}

impl FormatDescriptor {
    pub fn size_bytes(&self) -> Option<u64> {
        self.size.as_deref().and_then(|s| s.trim().parse().ok())
    }

    /// Container duration. Negative, non-finite and out-of-range values
    /// are treated as unreported.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .and_then(|d| Duration::try_from_secs_f64(d).ok())
    }
}

/// Everything one probe returns for a path.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProbeReport {
    #[serde(default)]
    pub streams: Vec<StreamDescriptor>,
    #[serde(default)]
    pub format: Option<FormatDescriptor>,
}

impl ProbeReport {
    /// A report with streams only, no container facts.
    pub fn from_streams(streams: Vec<StreamDescriptor>) -> Self {
        Self {
            streams,
            format: None,
        }
    }

    /// Parse ffprobe's `-print_format json` output.
    pub fn from_json(path: &str, json: &str) -> Result<Self, ProbeError> {
        serde_json::from_str(json).map_err(|e| ProbeError::Parse {
            path: path.to_owned(),
            message: e.to_string(),
        })
    }
}
