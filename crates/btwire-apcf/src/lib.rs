//! BLE advertising packet content filter (APCF) translation.
//!
//! Turns application-level filter specifications ([`ApcfCommand`]) into
//! validated controller commands ([`AdvertisingPacketContentFilterCommand`]),
//! and serialises those into vendor HCI command parameters with
//! [`ApcfEncoder`].
//!
//! UUID fields are narrowed to the shortest representation that round-trips
//! through the Bluetooth Base UUID (see [`shortest_width`]).

pub mod address;
pub mod command;
pub mod config;
pub mod encode;
pub mod error;
pub mod param;
pub mod translate;
pub mod uuids;

pub use address::Address;
pub use command::{
    AdvertisingPacketContentFilterCommand, ApcfAction, ApcfApplicationAddressType, ApcfCommand,
    ApcfFilterType,
};
pub use config::ApcfConfig;
pub use encode::{ApcfEncoder, HCI_VENDOR_APCF_OPCODE};
pub use error::{FilterError, Result};
pub use param::{AdvertisingFilterParameter, DeliveryMode, FilterParamSetup};
pub use translate::{translate, translate_batch, ShortestWidth, Translator, WidthResolver};
pub use uuids::{shortest_width, BtUuid, SizedUuid, UuidWidth, BASE_UUID};
