//! BLE scanner shim.
//!
//! [`BleScanner`] forwards scanning requests to an external
//! [`ScanningManager`] and relays the manager's callbacks to the owner as
//! [`ScannerEvent`]s over a channel. Filter specs are translated and
//! validated with `btwire-apcf` before anything reaches the manager.
//!
//! Operations are grouped into capability traits. Capabilities the shim does
//! not provide ([`BatchScan`], [`PeriodicSync`], filter clear) return
//! [`ScannerError::Unsupported`].

pub mod capability;
pub mod config;
pub mod error;
pub mod event;
pub mod manager;
pub mod scanner;

pub use capability::{BatchScan, FilterControl, PeriodicSync, ScannerControl};
pub use config::{ScanType, ScannerConfig};
pub use error::{Result, ScannerError};
pub use event::{AdStructure, AdStructures, EventSink, ScanResult, ScannerEvent, STATUS_SUCCESS};
pub use manager::{ScannerId, ScanningManager};
pub use scanner::BleScanner;
