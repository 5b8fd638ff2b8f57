//! Lengths of common Bluetooth fields.
//!
//! Fields listed here are stored byte-reversed relative to their wire order
//! (see [`crate::write_reversed`]).

/// Device address.
pub const BD_ADDR_LEN: usize = 6;

/// Class of device.
pub const DEV_CLASS_LEN: usize = 3;

/// Inquiry access code (LAP).
pub const LAP_LEN: usize = 3;

/// 64-bit octet array.
pub const OCTET8_LEN: usize = 8;

/// 128-bit octet array (link keys, LTKs, random numbers).
pub const OCTET16_LEN: usize = 16;

/// 256-bit octet array (AMP link keys).
pub const OCTET32_LEN: usize = 32;

/// Maximum device name length, excluding the terminator.
pub const BD_NAME_LEN: usize = 248;
