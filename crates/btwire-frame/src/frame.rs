use btwire_stream::{read_field, Endian};
use bytes::BytesMut;

use crate::error::{FrameError, Result};
use crate::event::{event_layer, sub_event};

/// An inter-layer message: header fields plus a fixed-capacity payload.
///
/// The live data is `payload[offset..offset + len]`. Bytes before `offset`
/// are head room for lower-layer headers; bytes after the live data are free
/// for appends. `offset + len <= capacity` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    event: u16,
    len: u16,
    offset: u16,
    layer_specific: u16,
    buf: BytesMut,
}

impl Frame {
    /// Create an empty frame with `capacity` payload bytes.
    pub fn new(event: u16, capacity: u16) -> Self {
        Self {
            event,
            len: 0,
            offset: 0,
            layer_specific: 0,
            buf: BytesMut::zeroed(capacity as usize),
        }
    }

    /// Create an empty frame whose live data starts `offset` bytes in.
    pub fn with_offset(event: u16, capacity: u16, offset: u16) -> Result<Self> {
        if offset > capacity {
            return Err(FrameError::OutOfBounds {
                needed: offset as usize,
                available: capacity as usize,
            });
        }
        let mut frame = Self::new(event, capacity);
        frame.offset = offset;
        Ok(frame)
    }

    /// Create a frame holding exactly `payload`.
    pub fn from_payload(event: u16, payload: &[u8]) -> Result<Self> {
        let capacity = u16::try_from(payload.len()).map_err(|_| FrameError::PayloadTooLarge {
            size: payload.len(),
            max: u16::MAX as usize,
        })?;
        let mut frame = Self::new(event, capacity);
        frame.append(payload)?;
        Ok(frame)
    }

    pub fn event(&self) -> u16 {
        self.event
    }

    /// Destination layer (high byte of the event).
    pub fn layer(&self) -> u16 {
        event_layer(self.event)
    }

    pub fn sub_event(&self) -> u8 {
        sub_event(self.event)
    }

    /// Re-address the frame when handing it to another layer.
    pub fn set_event(&mut self, event: u16) {
        self.event = event;
    }

    pub fn len(&self) -> u16 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn capacity(&self) -> u16 {
        self.buf.len() as u16
    }

    pub fn layer_specific(&self) -> u16 {
        self.layer_specific
    }

    pub fn set_layer_specific(&mut self, value: u16) {
        self.layer_specific = value;
    }

    /// Bytes free after the live data.
    pub fn tailroom(&self) -> usize {
        self.buf.len() - self.offset as usize - self.len as usize
    }

    /// The live data.
    pub fn data(&self) -> &[u8] {
        let start = self.offset as usize;
        &self.buf[start..start + self.len as usize]
    }

    /// Copy `bytes` after the live data.
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        let available = self.tailroom();
        if bytes.len() > available {
            return Err(FrameError::OutOfBounds {
                needed: bytes.len(),
                available,
            });
        }
        let start = self.offset as usize + self.len as usize;
        self.buf[start..start + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len() as u16;
        Ok(())
    }

    /// Copy `bytes` into the head room directly before the live data.
    pub fn prepend(&mut self, bytes: &[u8]) -> Result<()> {
        let available = self.offset as usize;
        if bytes.len() > available {
            return Err(FrameError::OutOfBounds {
                needed: bytes.len(),
                available,
            });
        }
        let start = available - bytes.len();
        self.buf[start..available].copy_from_slice(bytes);
        self.offset = start as u16;
        self.len += bytes.len() as u16;
        Ok(())
    }

    /// Drop `n` bytes from the front of the live data. The payload is not moved.
    pub fn consume(&mut self, n: u16) -> Result<()> {
        if n > self.len {
            return Err(FrameError::OutOfBounds {
                needed: n as usize,
                available: self.len as usize,
            });
        }
        self.offset += n;
        self.len -= n;
        Ok(())
    }

    /// Opcode of an HCI command at the start of the live data.
    pub fn hci_command_opcode(&self) -> Option<u16> {
        let data = self.data();
        (data.len() >= 2).then(|| read_field::<2>(data, 0, Endian::Little) as u16)
    }

    /// Parameter length of an HCI command at the start of the live data.
    pub fn hci_command_param_len(&self) -> Option<u8> {
        let data = self.data();
        (data.len() >= 3).then(|| read_field::<1>(data, 2, Endian::Little) as u8)
    }

    /// Event code of an HCI event at the start of the live data.
    pub fn hci_event_code(&self) -> Option<u8> {
        self.data().first().copied()
    }

    /// Parameter length of an HCI event at the start of the live data.
    pub fn hci_event_param_len(&self) -> Option<u8> {
        self.data().get(1).copied()
    }
}
