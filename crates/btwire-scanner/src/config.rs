use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ScanType {
    Passive = 0,
    #[default]
    Active = 1,
}

/// Scanner shim configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Scan type passed to the manager with scan parameters. Default: active.
    pub scan_type: ScanType,
    /// Emit a success event after each forwarded configuration request.
    /// Disable when the manager reports controller status itself. Default: true.
    pub synthesize_completions: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            scan_type: ScanType::Active,
            synthesize_completions: true,
        }
    }
}
