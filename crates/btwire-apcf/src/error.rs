use btwire_frame::FrameError;
use btwire_stream::StreamError;

/// Errors that can occur while translating or encoding filters.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// The width resolver produced a width other than 2, 4, or 16 bytes.
    #[error("illegal UUID length {0}")]
    InvalidUuidWidth(u8),

    /// A UUID string could not be parsed.
    #[error("invalid UUID: {0}")]
    InvalidUuid(String),

    /// A device address string could not be parsed.
    #[error("invalid device address: {0}")]
    InvalidAddress(String),

    #[error("invalid address type {0}")]
    InvalidAddressType(u8),

    #[error("invalid filter type {0}")]
    InvalidFilterType(u8),

    #[error("invalid filter action {0}")]
    InvalidAction(u8),

    #[error("invalid delivery mode {0}")]
    InvalidDeliveryMode(u8),

    /// A UUID filter was added without a UUID.
    #[error("{0:?} filter requires a UUID")]
    MissingUuid(crate::command::ApcfFilterType),

    /// A data mask does not cover its data byte for byte.
    #[error("{field} mask length {mask} does not match data length {data}")]
    MaskLengthMismatch {
        field: &'static str,
        data: usize,
        mask: usize,
    },

    /// The encoded command parameters exceed the HCI limit.
    #[error("command parameters too long ({len} bytes, max {max})")]
    ParameterTooLong { len: usize, max: usize },

    #[error("stream error: {0}")]
    Stream(#[from] StreamError),

    #[error("frame error: {0}")]
    Frame(#[from] FrameError),
}

pub type Result<T> = std::result::Result<T, FilterError>;
