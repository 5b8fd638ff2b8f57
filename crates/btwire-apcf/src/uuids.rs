//! Bluetooth UUIDs and their shortest wire width.
//!
//! A 16- or 32-bit UUID is shorthand for the Bluetooth Base UUID
//! `00000000-0000-1000-8000-00805F9B34FB` with the short value substituted
//! into its leading bytes. In big-endian byte order:
//!
//! ```text
//!  bytes  0  1  2  3 | 4 .. 15
//!        [ 32-bit    ]  must equal the Base UUID
//!              [16-bit] bytes 0..2 must also be zero
//! ```

use std::fmt;
use std::str::FromStr;

use ::uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// The Bluetooth Base UUID, big-endian.
pub const BASE_UUID: [u8; 16] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x80, 0x00, 0x00, 0x80, 0x5f, 0x9b, 0x34, 0xfb,
];

/// Canonical encoded width of a UUID, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum UuidWidth {
    Bits16 = 2,
    Bits32 = 4,
    Bits128 = 16,
}

impl UuidWidth {
    pub fn num_bytes(self) -> usize {
        self as usize
    }

    /// Map a byte count back to a width; `None` for anything but 2, 4, 16.
    pub fn from_num_bytes(n: u8) -> Option<Self> {
        match n {
            2 => Some(Self::Bits16),
            4 => Some(Self::Bits32),
            16 => Some(Self::Bits128),
            _ => None,
        }
    }
}

/// Shortest width that round-trips `uuid` (big-endian) to the same 128-bit value.
///
/// The narrowest matching width wins; a 16-bit match implies a 32-bit one.
pub fn shortest_width(uuid: &[u8; 16]) -> UuidWidth {
    if uuid[4..] != BASE_UUID[4..] {
        return UuidWidth::Bits128;
    }
    if uuid[0..2] == BASE_UUID[0..2] {
        UuidWidth::Bits16
    } else {
        UuidWidth::Bits32
    }
}

/// A 128-bit Bluetooth UUID.
///
/// The nil UUID is the "empty" value: optional UUID fields that are nil are
/// treated as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BtUuid(Uuid);

impl BtUuid {
    pub const EMPTY: Self = Self(Uuid::nil());

    pub fn from_16bit(value: u16) -> Self {
        let mut bytes = BASE_UUID;
        bytes[2..4].copy_from_slice(&value.to_be_bytes());
        Self(Uuid::from_bytes(bytes))
    }

    pub fn from_32bit(value: u32) -> Self {
        let mut bytes = BASE_UUID;
        bytes[0..4].copy_from_slice(&value.to_be_bytes());
        Self(Uuid::from_bytes(bytes))
    }

    pub fn from_128bit_be(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    pub fn from_128bit_le(mut bytes: [u8; 16]) -> Self {
        bytes.reverse();
        Self(Uuid::from_bytes(bytes))
    }

    pub fn to_128bit_be(&self) -> [u8; 16] {
        *self.0.as_bytes()
    }

    pub fn to_128bit_le(&self) -> [u8; 16] {
        let mut bytes = *self.0.as_bytes();
        bytes.reverse();
        bytes
    }

    /// The 16-bit slot, regardless of whether the UUID is 16-bit representable.
    pub fn as_16bit(&self) -> u16 {
        let b = self.0.as_bytes();
        u16::from_be_bytes([b[2], b[3]])
    }

    /// The 32-bit slot, regardless of whether the UUID is 32-bit representable.
    pub fn as_32bit(&self) -> u32 {
        let b = self.0.as_bytes();
        u32::from_be_bytes([b[0], b[1], b[2], b[3]])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_nil()
    }

    pub fn shortest_width(&self) -> UuidWidth {
        shortest_width(self.0.as_bytes())
    }

    /// Shortest representation size in bytes (2, 4, or 16).
    pub fn shortest_representation_size(&self) -> u8 {
        self.shortest_width() as u8
    }

    /// Encode at `width` in little-endian (HCI) order.
    pub fn to_wire_le(&self, width: UuidWidth) -> Vec<u8> {
        match width {
            UuidWidth::Bits16 => self.as_16bit().to_le_bytes().to_vec(),
            UuidWidth::Bits32 => self.as_32bit().to_le_bytes().to_vec(),
            UuidWidth::Bits128 => self.to_128bit_le().to_vec(),
        }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for BtUuid {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for BtUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

/// Accepts `180d` (16-bit), `0000180d` (32-bit), any full 128-bit form, or
/// the empty string (nil).
impl FromStr for BtUuid {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let is_hex = s.bytes().all(|b| b.is_ascii_hexdigit());
        match s.len() {
            0 => Ok(Self::EMPTY),
            4 if is_hex => u16::from_str_radix(s, 16)
                .map(Self::from_16bit)
                .map_err(|_| FilterError::InvalidUuid(s.to_string())),
            8 if is_hex => u32::from_str_radix(s, 16)
                .map(Self::from_32bit)
                .map_err(|_| FilterError::InvalidUuid(s.to_string())),
            _ => Uuid::parse_str(s)
                .map(Self)
                .map_err(|err| FilterError::InvalidUuid(format!("{s}: {err}"))),
        }
    }
}

impl TryFrom<String> for BtUuid {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BtUuid> for String {
    fn from(value: BtUuid) -> Self {
        value.to_string()
    }
}

/// A UUID paired with the width it is encoded at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SizedUuid {
    pub width: UuidWidth,
    pub uuid: BtUuid,
}

impl SizedUuid {
    /// Re-encode `uuid` at `width` using the matching short constructor, the
    /// way a controller will read it back.
    pub fn narrow(uuid: &BtUuid, width: UuidWidth) -> Self {
        let uuid = match width {
            UuidWidth::Bits16 => BtUuid::from_16bit(uuid.as_16bit()),
            UuidWidth::Bits32 => BtUuid::from_32bit(uuid.as_32bit()),
            UuidWidth::Bits128 => BtUuid::from_128bit_be(uuid.to_128bit_be()),
        };
        Self { width, uuid }
    }

    pub fn to_wire_le(&self) -> Vec<u8> {
        self.uuid.to_wire_le(self.width)
    }
}
