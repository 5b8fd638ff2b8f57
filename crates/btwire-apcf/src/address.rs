use std::fmt;
use std::str::FromStr;

use btwire_stream::BD_ADDR_LEN;
use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// A Bluetooth device address, most significant byte first.
///
/// On the wire the bytes are reversed; see [`btwire_stream::StreamWriter::put_bd_addr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; BD_ADDR_LEN]);

impl Address {
    /// `00:00:00:00:00:00`, used when a filter is not address-scoped.
    pub const ANY: Self = Self([0; BD_ADDR_LEN]);

    pub fn is_empty(&self) -> bool {
        *self == Self::ANY
    }

    pub fn as_bytes(&self) -> &[u8; BD_ADDR_LEN] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

/// Parses `AA:BB:CC:DD:EE:FF` (case-insensitive). The empty string is [`Address::ANY`].
impl FromStr for Address {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::ANY);
        }

        let mut bytes = [0u8; BD_ADDR_LEN];
        let mut parts = s.split(':');
        for slot in bytes.iter_mut() {
            let part = parts
                .next()
                .filter(|p| p.len() == 2 && p.bytes().all(|b| b.is_ascii_hexdigit()))
                .ok_or_else(|| FilterError::InvalidAddress(s.to_string()))?;
            *slot = u8::from_str_radix(part, 16)
                .map_err(|_| FilterError::InvalidAddress(s.to_string()))?;
        }
        if parts.next().is_some() {
            return Err(FilterError::InvalidAddress(s.to_string()));
        }
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Address {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_string()
    }
}
