use btwire_apcf::FilterError;

/// Errors returned by scanner shim operations.
#[derive(Debug, thiserror::Error)]
pub enum ScannerError {
    /// A filter spec failed translation or validation.
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// The operation belongs to a capability this scanner does not provide.
    #[error("{0} is not supported")]
    Unsupported(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, ScannerError>;
