//! Bluetooth wire encoding.
//!
//! btwire turns BLE advertising content filter specs into the exact bytes a
//! controller expects, and carries them between stack layers in
//! length-delimited frames.
//!
//! # Crate Structure
//!
//! - [`stream`]: fixed-width integer and byte-array codec, plain and checked
//! - [`frame`]: inter-layer frame header, event namespace, and wire codec
//! - [`apcf`]: UUID width resolution, filter translation, and APCF encoding
//! - [`scanner`]: scanner shim over an external scanning manager (behind `scanner` feature)

/// Re-export stream codec types.
pub mod stream {
    pub use btwire_stream::*;
}

/// Re-export frame types.
pub mod frame {
    pub use btwire_frame::*;
}

/// Re-export APCF types.
pub mod apcf {
    pub use btwire_apcf::*;
}

/// Re-export scanner types (requires `scanner` feature).
#[cfg(feature = "scanner")]
pub mod scanner {
    pub use btwire_scanner::*;
}
