/// Errors reported by the checked stream cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// The operation needs more bytes than are left in the buffer.
    #[error("stream overrun ({needed} bytes needed, {remaining} remaining)")]
    Overrun { needed: usize, remaining: usize },
}

pub type Result<T> = std::result::Result<T, StreamError>;
