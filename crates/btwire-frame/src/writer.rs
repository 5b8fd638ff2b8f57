use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use tracing::trace;

use crate::codec::{encode_frame, FrameConfig, HEADER_SIZE};
use crate::error::{FrameError, Result};
use crate::frame::Frame;

/// Writes frames in wire form to any `Write` stream.
///
/// Frames are not flushed individually; call [`FrameWriter::flush`] or use
/// [`FrameWriter::write_frames`] when the stream should be complete on disk.
pub struct FrameWriter<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
    written: usize,
}

impl<T: Write> FrameWriter<T> {
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(HEADER_SIZE + 256),
            config,
            written: 0,
        }
    }

    /// Encode and write one frame. Only the live bytes are emitted.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        let size = frame.len() as usize;
        if size > self.config.max_payload_size {
            return Err(FrameError::PayloadTooLarge {
                size,
                max: self.config.max_payload_size,
            });
        }

        self.buf.clear();
        encode_frame(frame, &mut self.buf);
        write_fully(&mut self.inner, &self.buf)?;
        self.written += 1;
        trace!(event = frame.event(), len = size, "frame written");
        Ok(())
    }

    /// Write every frame in order, then flush once.
    ///
    /// Stops at the first failing frame; frames before it are already on the
    /// stream.
    pub fn write_frames<'a, I>(&mut self, frames: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Frame>,
    {
        let before = self.written;
        for frame in frames {
            self.write_frame(frame)?;
        }
        self.flush()?;
        Ok(self.written - before)
    }

    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Frames written so far.
    pub fn frames_written(&self) -> usize {
        self.written
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

/// A zero-length write means the sink will take no more bytes.
fn write_fully<T: Write>(inner: &mut T, mut bytes: &[u8]) -> Result<()> {
    while !bytes.is_empty() {
        match inner.write(bytes) {
            Ok(0) => return Err(FrameError::ConnectionClosed),
            Ok(n) => bytes = &bytes[n..],
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(FrameError::Io(err)),
        }
    }
    Ok(())
}
