use bytes::{Buf, BufMut, BytesMut};

use crate::error::{FrameError, Result};
use crate::frame::Frame;

/// Frame header: event (2) + len (2) + offset (2) + layer_specific (2) = 8 bytes.
pub const HEADER_SIZE: usize = 8;

/// Default maximum payload size: the full 16-bit length range.
pub const DEFAULT_MAX_PAYLOAD: usize = u16::MAX as usize;

/// Configuration for the frame wire codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default: 65535.
    pub max_payload_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}

/// Encode a frame into the wire format.
///
/// Wire format (header fields in native byte order):
/// ```text
/// ┌───────────┬──────────┬──────────┬────────────────┬──────────────────┐
/// │ Event     │ Length   │ Offset   │ Layer specific │ Payload          │
/// │ (2B)      │ (2B)     │ (2B, =0) │ (2B)           │ (Length bytes)   │
/// └───────────┴──────────┴──────────┴────────────────┴──────────────────┘
/// ```
///
/// Only the live data is written, so the offset on the wire is always 0.
pub fn encode_frame(frame: &Frame, dst: &mut BytesMut) {
    dst.reserve(HEADER_SIZE + frame.len() as usize);
    dst.put_slice(&frame.event().to_ne_bytes());
    dst.put_slice(&frame.len().to_ne_bytes());
    dst.put_slice(&0u16.to_ne_bytes());
    dst.put_slice(&frame.layer_specific().to_ne_bytes());
    dst.put_slice(frame.data());
}

/// Decode a frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes from the buffer. The decoded frame's
/// capacity equals its length.
pub fn decode_frame(src: &mut BytesMut, config: &FrameConfig) -> Result<Option<Frame>> {
    if src.len() < HEADER_SIZE {
        return Ok(None); // Need more data
    }

    let event = u16::from_ne_bytes([src[0], src[1]]);
    let payload_len = u16::from_ne_bytes([src[2], src[3]]) as usize;
    let layer_specific = u16::from_ne_bytes([src[6], src[7]]);

    if payload_len > config.max_payload_size {
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max: config.max_payload_size,
        });
    }

    let total = HEADER_SIZE + payload_len;
    if src.len() < total {
        return Ok(None); // Need more data
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(payload_len);

    let mut frame = Frame::from_payload(event, &payload)?;
    frame.set_layer_specific(layer_specific);
    Ok(Some(frame))
}
