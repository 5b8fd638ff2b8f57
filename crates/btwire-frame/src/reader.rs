use std::io::{ErrorKind, Read};

use bytes::BytesMut;
use tracing::trace;

use crate::codec::{decode_frame, FrameConfig};
use crate::error::{FrameError, Result};
use crate::frame::Frame;

const INITIAL_BUFFER_CAPACITY: usize = 4 * 1024;
const READ_CHUNK_SIZE: usize = 4 * 1024;

/// Reads complete frames from any `Read` stream (capture files, pipes, stdin).
///
/// Partial reads are buffered internally; callers only see complete frames.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Read the next complete frame (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached.
    pub fn read_frame(&mut self) -> Result<Frame> {
        loop {
            if let Some(frame) = decode_frame(&mut self.buf, &self.config)? {
                trace!(event = frame.event(), len = frame.len(), "frame decoded");
                return Ok(frame);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Read frames until a clean end of stream.
    ///
    /// EOF in the middle of a frame is still an error.
    pub fn read_all(&mut self) -> Result<Vec<Frame>> {
        let mut frames = Vec::new();
        loop {
            match self.read_frame() {
                Ok(frame) => frames.push(frame),
                Err(FrameError::ConnectionClosed) if self.buf.is_empty() => return Ok(frames),
                Err(err) => return Err(err),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bytes::BytesMut;

    use super::*;
    use crate::codec::{encode_frame, HEADER_SIZE};
    use crate::event::{EVT_TO_BTU_HCI_EVT, EVT_TO_LM_HCI_CMD};

    fn wire_of(frames: &[Frame]) -> Vec<u8> {
        let mut wire = BytesMut::new();
        for frame in frames {
            encode_frame(frame, &mut wire);
        }
        wire.to_vec()
    }

    #[test]
    fn read_single_frame() {
        let wire = wire_of(&[Frame::from_payload(EVT_TO_LM_HCI_CMD, b"hello").unwrap()]);
        let mut reader = FrameReader::new(Cursor::new(wire));
        let frame = reader.read_frame().unwrap();

        assert_eq!(frame.event(), EVT_TO_LM_HCI_CMD);
        assert_eq!(frame.data(), b"hello");
    }

    #[test]
    fn read_all_until_eof() {
        let wire = wire_of(&[
            Frame::from_payload(EVT_TO_LM_HCI_CMD, b"one").unwrap(),
            Frame::from_payload(EVT_TO_BTU_HCI_EVT, b"two").unwrap(),
        ]);
        let frames = FrameReader::new(Cursor::new(wire)).read_all().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].event(), EVT_TO_BTU_HCI_EVT);
        assert_eq!(frames[1].data(), b"two");
    }

    #[test]
    fn partial_read_handling() {
        let wire = wire_of(&[Frame::from_payload(4, b"slow").unwrap()]);
        let mut reader = FrameReader::new(ByteByByteReader {
            bytes: wire,
            pos: 0,
        });

        let frame = reader.read_frame().unwrap();
        assert_eq!(frame.event(), 4);
        assert_eq!(frame.data(), b"slow");
    }

    #[test]
    fn stream_closed_cleanly() {
        let mut reader = FrameReader::new(Cursor::new(Vec::<u8>::new()));
        assert!(matches!(
            reader.read_frame().unwrap_err(),
            FrameError::ConnectionClosed
        ));
        let mut reader = FrameReader::new(Cursor::new(Vec::<u8>::new()));
        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn stream_closed_mid_frame() {
        let mut wire = wire_of(&[Frame::from_payload(2, b"only-part").unwrap()]);
        wire.truncate(HEADER_SIZE + 3);

        let mut reader = FrameReader::new(Cursor::new(wire));
        assert!(matches!(
            reader.read_all().unwrap_err(),
            FrameError::ConnectionClosed
        ));
    }

    #[test]
    fn oversized_frame_in_stream() {
        let wire = wire_of(&[Frame::from_payload(1, &[0u8; 64]).unwrap()]);
        let cfg = FrameConfig {
            max_payload_size: 16,
        };
        let mut reader = FrameReader::with_config(Cursor::new(wire), cfg);
        assert!(matches!(
            reader.read_frame().unwrap_err(),
            FrameError::PayloadTooLarge { size: 64, max: 16 }
        ));
    }

    #[test]
    fn interrupted_read_retries() {
        let wire = wire_of(&[Frame::from_payload(8, b"ok").unwrap()]);
        let mut framed = FrameReader::new(InterruptedThenData {
            interrupted: false,
            inner: Cursor::new(wire),
        });
        let frame = framed.read_frame().unwrap();
        assert_eq!(frame.event(), 8);
        assert_eq!(frame.data(), b"ok");
    }

    #[derive(Debug)]
    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct InterruptedThenData {
        interrupted: bool,
        inner: Cursor<Vec<u8>>,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }
}
