use btwire_apcf::{ApcfFilterType, HCI_VENDOR_APCF_OPCODE};
use btwire_frame::{encode_frame, Frame};
use bytes::BytesMut;
use serde::Serialize;

use crate::output::Record;

/// One encoded APCF command, framed for the link manager.
#[derive(Debug, Serialize)]
pub struct HciCommandRecord {
    pub index: usize,
    pub command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_index: Option<u8>,
    pub opcode: String,
    pub param_len: usize,
    pub params: String,
    /// Frame wire encoding (header + HCI command).
    pub frame: String,
    #[serde(skip)]
    wire: Vec<u8>,
}

impl HciCommandRecord {
    pub fn new(
        index: usize,
        command: &'static str,
        filter_index: Option<u8>,
        params: &[u8],
        frame: &Frame,
    ) -> Self {
        let mut wire = BytesMut::new();
        encode_frame(frame, &mut wire);
        Self {
            index,
            command,
            filter_index,
            opcode: format!("0x{HCI_VENDOR_APCF_OPCODE:04x}"),
            param_len: params.len(),
            params: hex::encode(params),
            frame: hex::encode(&wire),
            wire: wire.to_vec(),
        }
    }
}

impl Record for HciCommandRecord {
    fn header() -> &'static [&'static str] {
        &["ENTRY", "COMMAND", "INDEX", "OPCODE", "LEN", "PARAMS"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.index.to_string(),
            self.command.to_string(),
            self.filter_index.map(|i| i.to_string()).unwrap_or_default(),
            self.opcode.clone(),
            self.param_len.to_string(),
            self.params.clone(),
        ]
    }

    fn raw(&self) -> Vec<u8> {
        self.wire.clone()
    }
}

pub fn filter_type_name(filter_type: ApcfFilterType) -> &'static str {
    match filter_type {
        ApcfFilterType::BroadcasterAddress => "broadcaster_address",
        ApcfFilterType::ServiceUuid => "service_uuid",
        ApcfFilterType::ServiceSolicitationUuid => "service_solicitation_uuid",
        ApcfFilterType::LocalName => "local_name",
        ApcfFilterType::ManufacturerData => "manufacturer_data",
        ApcfFilterType::ServiceData => "service_data",
    }
}
