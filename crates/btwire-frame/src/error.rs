/// Errors that can occur while building, encoding, or decoding frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// An append, prepend, or consume would cross the frame's bounds.
    #[error("frame out of bounds ({needed} bytes needed, {available} available)")]
    OutOfBounds { needed: usize, available: usize },

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before a complete frame was received.
    #[error("stream closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
