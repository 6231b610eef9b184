/// Raw stream descriptor → [`Frame`].
///
/// Pure and total: every descriptor, however sparse, yields a frame.
use crate::model::{Frame, StreamDetail};
use crate::probe::StreamDescriptor;
use compact_str::{format_compact, CompactString};

/// Matroska statistics tag carrying the exact stream payload size.
const BYTES_TAG_PREFIX: &str = "NUMBER_OF_BYTES";

/// Build the internal frame for one reported stream.
pub fn normalize(descriptor: &StreamDescriptor) -> Frame {
    let kind = descriptor.kind();
    let key = format_compact!("{}:{}", descriptor.index, kind);
    Frame::new(key, stream_bytes(descriptor), detail(&kind, descriptor))
}

/// Size measure of a stream, saturated at `u32::MAX`.
///
/// Prefers the muxer's byte-count tag, then `bit_rate × duration / 8`,
/// then 0.
pub fn stream_bytes(descriptor: &StreamDescriptor) -> u32 {
    if let Some(n) = descriptor
        .tag_with_prefix(BYTES_TAG_PREFIX)
        .and_then(|v| v.trim().parse::<u64>().ok())
    {
        return saturate(n);
    }

    match (descriptor.bit_rate_bps(), descriptor.duration_secs()) {
        (Some(bps), Some(secs)) => {
            let bytes = bps as f64 * secs / 8.0;
            if bytes >= u32::MAX as f64 {
                u32::MAX
            } else {
                bytes as u32
            }
        }
        _ => 0,
    }
}

#[inline]
fn saturate(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn detail(kind: &str, d: &StreamDescriptor) -> StreamDetail {
    let codec: CompactString = d
        .codec_name
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or("unknown")
        .into();

    match kind {
        "video" => StreamDetail::Video {
            codec,
            width: d.width,
            height: d.height,
            frame_rate: d
                .r_frame_rate
                .as_deref()
                .filter(|r| *r != "0/0")
                .map(CompactString::from),
            bit_rate: d.bit_rate_bps(),
        },
        "audio" => StreamDetail::Audio {
            codec,
            sample_rate: d.sample_rate_hz(),
            channels: d.channels,
            bit_rate: d.bit_rate_bps(),
        },
        "subtitle" => StreamDetail::Subtitle {
            codec,
            language: d.tag("language").map(CompactString::from),
        },
        _ => StreamDetail::Data { codec },
    }
}
