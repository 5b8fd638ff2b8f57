use serde::{Deserialize, Deserializer, Serialize};

use crate::address::Address;
use crate::error::FilterError;
use crate::uuids::{BtUuid, SizedUuid};

/// Which advertisement field a content filter matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ApcfFilterType {
    BroadcasterAddress = 0,
    ServiceUuid = 1,
    ServiceSolicitationUuid = 2,
    LocalName = 3,
    ManufacturerData = 4,
    ServiceData = 5,
}

impl ApcfFilterType {
    /// Filters whose condition is a (UUID, mask) pair.
    pub fn is_uuid_filter(self) -> bool {
        matches!(self, Self::ServiceUuid | Self::ServiceSolicitationUuid)
    }
}

impl TryFrom<u8> for ApcfFilterType {
    type Error = FilterError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::BroadcasterAddress),
            1 => Ok(Self::ServiceUuid),
            2 => Ok(Self::ServiceSolicitationUuid),
            3 => Ok(Self::LocalName),
            4 => Ok(Self::ManufacturerData),
            5 => Ok(Self::ServiceData),
            other => Err(FilterError::InvalidFilterType(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ApcfAction {
    #[default]
    Add = 0,
    Delete = 1,
    Clear = 2,
}

impl TryFrom<u8> for ApcfAction {
    type Error = FilterError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Add),
            1 => Ok(Self::Delete),
            2 => Ok(Self::Clear),
            other => Err(FilterError::InvalidAction(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ApcfApplicationAddressType {
    #[default]
    Public = 0,
    Random = 1,
    NotApplicable = 2,
}

impl TryFrom<u8> for ApcfApplicationAddressType {
    type Error = FilterError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Public),
            1 => Ok(Self::Random),
            2 => Ok(Self::NotApplicable),
            other => Err(FilterError::InvalidAddressType(other)),
        }
    }
}

/// Application-level filter specification, as handed in by a scanning client.
///
/// Every field is optional in serialized form. Integer tags are validated
/// during translation, not deserialization, so a bad entry in a batch is
/// reported by the translator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApcfCommand {
    #[serde(rename = "type")]
    pub filter_type: u8,
    /// `AA:BB:CC:DD:EE:FF`; empty means any address.
    pub address: String,
    pub addr_type: u8,
    /// Nil (empty) when the filter has no UUID condition.
    pub uuid: BtUuid,
    pub uuid_mask: BtUuid,
    /// Local name bytes. Accepts a JSON string or a byte array.
    #[serde(deserialize_with = "name_bytes")]
    pub name: Vec<u8>,
    pub company: u16,
    /// `None` matches the company id exactly (`0xFFFF`).
    pub company_mask: Option<u16>,
    pub data: Vec<u8>,
    pub data_mask: Vec<u8>,
}

fn name_bytes<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Name {
        Text(String),
        Bytes(Vec<u8>),
    }

    Ok(match Name::deserialize(deserializer)? {
        Name::Text(text) => text.into_bytes(),
        Name::Bytes(bytes) => bytes,
    })
}

/// A validated content filter ready for wire encoding.
///
/// `uuid` and `uuid_mask` are `Some` only when the caller supplied a
/// non-empty value. Both are narrowed to the width resolved from `uuid`; a
/// mask is never resolved on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvertisingPacketContentFilterCommand {
    pub filter_type: ApcfFilterType,
    pub address: Address,
    pub application_address_type: ApcfApplicationAddressType,
    pub uuid: Option<SizedUuid>,
    pub uuid_mask: Option<SizedUuid>,
    pub name: Vec<u8>,
    pub company: u16,
    pub company_mask: u16,
    pub data: Vec<u8>,
    pub data_mask: Vec<u8>,
}
