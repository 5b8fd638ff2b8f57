//! Length-delimited frame header for messages passed between stack layers.
//!
//! Every inter-layer message is a [`Frame`]: four 16-bit header fields
//! (event, length, offset, layer-specific) in front of a fixed-capacity
//! payload buffer. Producers reserve head room with an offset, lower layers
//! [`Frame::prepend`] their headers into it, and consumers
//! [`Frame::consume`] bytes without moving the payload.
//!
//! The wire form (see [`encode_frame`]) is the four header fields in native
//! byte order followed by the live payload bytes.

pub mod codec;
pub mod error;
pub mod event;
pub mod frame;
pub mod reader;
pub mod writer;

pub use codec::{decode_frame, encode_frame, FrameConfig, DEFAULT_MAX_PAYLOAD, HEADER_SIZE};
pub use error::{FrameError, Result};
pub use event::{layer_name, EVT_MASK, SUB_EVT_MASK};
pub use frame::Frame;
pub use reader::FrameReader;
pub use writer::FrameWriter;
