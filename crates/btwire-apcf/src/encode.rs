use btwire_frame::event::EVT_TO_LM_HCI_CMD;
use btwire_frame::{Frame, FrameError};
use btwire_stream::{write_field, Endian, StreamWriter, BD_ADDR_LEN};
use tracing::trace;

use crate::command::{AdvertisingPacketContentFilterCommand, ApcfAction, ApcfFilterType};
use crate::config::ApcfConfig;
use crate::error::{FilterError, Result};
use crate::param::AdvertisingFilterParameter;

/// Vendor-specific HCI opcode (OGF 0x3F, OCF 0x157) carrying APCF sub-commands.
pub const HCI_VENDOR_APCF_OPCODE: u16 = 0xFD57;

/// HCI command header: opcode (2) + parameter length (1).
pub const HCI_COMMAND_HEADER_LEN: usize = 3;

pub const APCF_SUB_ENABLE: u8 = 0x00;
pub const APCF_SUB_FILTER_PARAM: u8 = 0x01;
pub const APCF_SUB_BROADCASTER_ADDRESS: u8 = 0x02;
pub const APCF_SUB_SERVICE_UUID: u8 = 0x03;
pub const APCF_SUB_SERVICE_SOLICITATION_UUID: u8 = 0x04;
pub const APCF_SUB_LOCAL_NAME: u8 = 0x05;
pub const APCF_SUB_MANUFACTURER_DATA: u8 = 0x06;
pub const APCF_SUB_SERVICE_DATA: u8 = 0x07;

/// `[sub_op][action][filter_index]`
const SUB_HEADER_LEN: usize = 3;
/// feature selection, list logic, filter logic, rssi high, delivery mode
const FILTER_PARAM_BASE_LEN: usize = 2 + 2 + 1 + 1 + 1;
/// on-found timeout, timeout count, rssi low, on-lost timeout, tracking entries
const FILTER_PARAM_ON_FOUND_LEN: usize = 2 + 1 + 1 + 2 + 2;

pub fn sub_opcode(filter_type: ApcfFilterType) -> u8 {
    match filter_type {
        ApcfFilterType::BroadcasterAddress => APCF_SUB_BROADCASTER_ADDRESS,
        ApcfFilterType::ServiceUuid => APCF_SUB_SERVICE_UUID,
        ApcfFilterType::ServiceSolicitationUuid => APCF_SUB_SERVICE_SOLICITATION_UUID,
        ApcfFilterType::LocalName => APCF_SUB_LOCAL_NAME,
        ApcfFilterType::ManufacturerData => APCF_SUB_MANUFACTURER_DATA,
        ApcfFilterType::ServiceData => APCF_SUB_SERVICE_DATA,
    }
}

/// Serialises validated APCF commands into HCI vendor command parameters.
///
/// Multi-byte fields are little-endian; device addresses are byte-reversed.
#[derive(Debug, Clone, Default)]
pub struct ApcfEncoder {
    config: ApcfConfig,
}

impl ApcfEncoder {
    pub fn new() -> Self {
        Self::with_config(ApcfConfig::default())
    }

    pub fn with_config(config: ApcfConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApcfConfig {
        &self.config
    }

    /// `[0x00][enable]`
    pub fn encode_enable(&self, enable: bool) -> Result<Vec<u8>> {
        self.write_params(2, |w| {
            w.put_u8(APCF_SUB_ENABLE)?;
            w.put_u8(u8::from(enable))
        })
    }

    /// Set filtering parameters for `filter_index`.
    ///
    /// `Delete` and `Clear` carry no parameter body. The on-found block is
    /// only emitted under [`crate::DeliveryMode::OnFound`].
    pub fn encode_filter_param(
        &self,
        action: ApcfAction,
        filter_index: u8,
        param: &AdvertisingFilterParameter,
    ) -> Result<Vec<u8>> {
        let body = match action {
            ApcfAction::Add if param.tracks_on_found() => {
                FILTER_PARAM_BASE_LEN + FILTER_PARAM_ON_FOUND_LEN
            }
            ApcfAction::Add => FILTER_PARAM_BASE_LEN,
            ApcfAction::Delete | ApcfAction::Clear => 0,
        };

        self.write_params(SUB_HEADER_LEN + body, |w| {
            w.put_u8(APCF_SUB_FILTER_PARAM)?;
            w.put_u8(action as u8)?;
            w.put_u8(filter_index)?;
            if action != ApcfAction::Add {
                return Ok(());
            }
            w.put_u16(param.feature_selection, Endian::Little)?;
            w.put_u16(param.list_logic_type, Endian::Little)?;
            w.put_u8(param.filter_logic_type)?;
            w.put_i8(param.rssi_high_thresh)?;
            w.put_u8(param.delivery_mode as u8)?;
            if param.tracks_on_found() {
                w.put_u16(param.onfound_timeout, Endian::Little)?;
                w.put_u8(param.onfound_timeout_cnt)?;
                w.put_i8(param.rssi_low_thresh)?;
                w.put_u16(param.onlost_timeout, Endian::Little)?;
                w.put_u16(param.num_of_tracking_entries, Endian::Little)?;
            }
            Ok(())
        })
    }

    /// Encode one content filter condition for `filter_index`.
    pub fn encode_filter_command(
        &self,
        action: ApcfAction,
        filter_index: u8,
        command: &AdvertisingPacketContentFilterCommand,
    ) -> Result<Vec<u8>> {
        let sub_op = sub_opcode(command.filter_type);
        if action != ApcfAction::Add {
            return self.write_params(SUB_HEADER_LEN, |w| {
                w.put_u8(sub_op)?;
                w.put_u8(action as u8)?;
                w.put_u8(filter_index)
            });
        }

        let body = condition_body(command)?;
        self.write_params(SUB_HEADER_LEN + body.len(), |w| {
            w.put_u8(sub_op)?;
            w.put_u8(action as u8)?;
            w.put_u8(filter_index)?;
            match &body {
                Body::Address { addr, addr_type } => {
                    w.put_bd_addr(addr)?;
                    w.put_u8(*addr_type)
                }
                Body::Masked { value, mask } => {
                    w.put_slice(value)?;
                    w.put_slice(mask)
                }
                Body::Plain(bytes) => w.put_slice(bytes),
            }
        })
    }

    /// Encode every command of a batch for the same filter index.
    pub fn encode_filter_batch(
        &self,
        action: ApcfAction,
        filter_index: u8,
        commands: &[AdvertisingPacketContentFilterCommand],
    ) -> Result<Vec<Vec<u8>>> {
        commands
            .iter()
            .map(|command| self.encode_filter_command(action, filter_index, command))
            .collect()
    }

    /// Wrap APCF parameters in an HCI command inside a frame bound for the link manager.
    ///
    /// `config.frame_offset` bytes of head room are reserved in front of the
    /// HCI header.
    pub fn to_hci_frame(&self, params: &[u8]) -> Result<Frame> {
        let param_len = u8::try_from(params.len()).map_err(|_| FilterError::ParameterTooLong {
            len: params.len(),
            max: u8::MAX as usize,
        })?;

        let offset = self.config.frame_offset;
        let total = offset as usize + HCI_COMMAND_HEADER_LEN + params.len();
        let capacity = u16::try_from(total).map_err(|_| FrameError::PayloadTooLarge {
            size: total,
            max: u16::MAX as usize,
        })?;

        let mut header = [0u8; HCI_COMMAND_HEADER_LEN];
        write_field::<2>(&mut header, 0, u64::from(HCI_VENDOR_APCF_OPCODE), Endian::Little);
        write_field::<1>(&mut header, 2, u64::from(param_len), Endian::Little);

        let mut frame = Frame::with_offset(EVT_TO_LM_HCI_CMD, capacity, offset)?;
        frame.append(&header)?;
        frame.append(params)?;
        trace!(len = frame.len(), offset, "apcf command framed");
        Ok(frame)
    }

    fn write_params<F>(&self, len: usize, fill: F) -> Result<Vec<u8>>
    where
        F: FnOnce(&mut StreamWriter<'_>) -> btwire_stream::Result<()>,
    {
        if len > self.config.max_parameter_len {
            return Err(FilterError::ParameterTooLong {
                len,
                max: self.config.max_parameter_len,
            });
        }
        let mut buf = vec![0u8; len];
        let mut w = StreamWriter::new(&mut buf);
        fill(&mut w)?;
        debug_assert_eq!(w.remaining(), 0);
        Ok(buf)
    }
}

enum Body {
    Address {
        addr: [u8; BD_ADDR_LEN],
        addr_type: u8,
    },
    Masked {
        value: Vec<u8>,
        mask: Vec<u8>,
    },
    Plain(Vec<u8>),
}

impl Body {
    fn len(&self) -> usize {
        match self {
            Body::Address { .. } => BD_ADDR_LEN + 1,
            Body::Masked { value, mask } => value.len() + mask.len(),
            Body::Plain(bytes) => bytes.len(),
        }
    }
}

fn condition_body(command: &AdvertisingPacketContentFilterCommand) -> Result<Body> {
    let body = match command.filter_type {
        ApcfFilterType::BroadcasterAddress => Body::Address {
            addr: command.address.0,
            addr_type: command.application_address_type as u8,
        },
        ApcfFilterType::ServiceUuid | ApcfFilterType::ServiceSolicitationUuid => {
            let uuid = command
                .uuid
                .ok_or(FilterError::MissingUuid(command.filter_type))?;
            let mask = match command.uuid_mask {
                Some(mask) => mask.to_wire_le(),
                None => vec![0xff; uuid.width.num_bytes()],
            };
            if mask.len() != uuid.width.num_bytes() {
                return Err(FilterError::MaskLengthMismatch {
                    field: "uuid",
                    data: uuid.width.num_bytes(),
                    mask: mask.len(),
                });
            }
            Body::Masked {
                value: uuid.to_wire_le(),
                mask,
            }
        }
        ApcfFilterType::LocalName => Body::Plain(command.name.clone()),
        ApcfFilterType::ManufacturerData => {
            let data_mask = data_mask(&command.data, &command.data_mask)?;
            let mut value = command.company.to_le_bytes().to_vec();
            value.extend_from_slice(&command.data);
            let mut mask = command.company_mask.to_le_bytes().to_vec();
            mask.extend_from_slice(&data_mask);
            Body::Masked { value, mask }
        }
        ApcfFilterType::ServiceData => Body::Masked {
            value: command.data.clone(),
            mask: data_mask(&command.data, &command.data_mask)?,
        },
    };
    Ok(body)
}

/// An empty mask matches every data byte exactly.
fn data_mask(data: &[u8], mask: &[u8]) -> Result<Vec<u8>> {
    if mask.is_empty() {
        return Ok(vec![0xff; data.len()]);
    }
    if mask.len() != data.len() {
        return Err(FilterError::MaskLengthMismatch {
            field: "data",
            data: data.len(),
            mask: mask.len(),
        });
    }
    Ok(mask.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ApcfCommand;
    use crate::param::{DeliveryMode, FilterParamSetup};
    use crate::translate::translate;
    use crate::uuids::{BtUuid, SizedUuid, UuidWidth};

    fn command(spec: ApcfCommand) -> AdvertisingPacketContentFilterCommand {
        translate(&spec).unwrap()
    }

    #[test]
    fn enable_disable() {
        let enc = ApcfEncoder::new();
        assert_eq!(enc.encode_enable(true).unwrap(), vec![0x00, 0x01]);
        assert_eq!(enc.encode_enable(false).unwrap(), vec![0x00, 0x00]);
    }

    #[test]
    fn broadcaster_address_is_reversed() {
        let cmd = command(ApcfCommand {
            filter_type: ApcfFilterType::BroadcasterAddress as u8,
            address: "11:22:33:44:55:66".into(),
            addr_type: 1,
            ..ApcfCommand::default()
        });
        let params = ApcfEncoder::new()
            .encode_filter_command(ApcfAction::Add, 4, &cmd)
            .unwrap();
        assert_eq!(
            params,
            vec![0x02, 0x00, 0x04, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11, 0x01]
        );
    }

    #[test]
    fn service_uuid_default_mask() {
        let cmd = command(ApcfCommand {
            filter_type: ApcfFilterType::ServiceUuid as u8,
            uuid: BtUuid::from_16bit(0x180d),
            ..ApcfCommand::default()
        });
        let params = ApcfEncoder::new()
            .encode_filter_command(ApcfAction::Add, 0, &cmd)
            .unwrap();
        assert_eq!(params, vec![0x03, 0x00, 0x00, 0x0d, 0x18, 0xff, 0xff]);
        assert_eq!(params.len(), SUB_HEADER_LEN + 2 * UuidWidth::Bits16.num_bytes());
    }

    #[test]
    fn solicitation_uuid_with_mask() {
        let cmd = command(ApcfCommand {
            filter_type: ApcfFilterType::ServiceSolicitationUuid as u8,
            uuid: BtUuid::from_32bit(0x1234_5678),
            uuid_mask: BtUuid::from_32bit(0xffff_0000),
            ..ApcfCommand::default()
        });
        let params = ApcfEncoder::new()
            .encode_filter_command(ApcfAction::Add, 2, &cmd)
            .unwrap();
        assert_eq!(
            params,
            vec![0x04, 0x00, 0x02, 0x78, 0x56, 0x34, 0x12, 0x00, 0x00, 0xff, 0xff]
        );
    }

    #[test]
    fn full_width_uuid() {
        let cmd = command(ApcfCommand {
            filter_type: ApcfFilterType::ServiceUuid as u8,
            uuid: "6e400001-b5a3-f393-e0a9-e50e24dcca9e".parse().unwrap(),
            ..ApcfCommand::default()
        });
        let params = ApcfEncoder::new()
            .encode_filter_command(ApcfAction::Add, 0, &cmd)
            .unwrap();
        assert_eq!(params.len(), SUB_HEADER_LEN + 32);
        assert_eq!(params[3], 0x9e);
        assert_eq!(params[18], 0x6e);
        assert!(params[19..].iter().all(|b| *b == 0xff));
    }

    #[test]
    fn uuid_filter_without_uuid_rejected() {
        let mut cmd = command(ApcfCommand {
            filter_type: ApcfFilterType::ServiceUuid as u8,
            uuid: BtUuid::from_16bit(0x180d),
            ..ApcfCommand::default()
        });
        cmd.uuid = None;
        let err = ApcfEncoder::new()
            .encode_filter_command(ApcfAction::Add, 0, &cmd)
            .unwrap_err();
        assert!(matches!(
            err,
            FilterError::MissingUuid(ApcfFilterType::ServiceUuid)
        ));
    }

    #[test]
    fn uuid_mask_of_other_width_reports_mismatch() {
        let mut cmd = command(ApcfCommand {
            filter_type: ApcfFilterType::ServiceUuid as u8,
            uuid: BtUuid::from_16bit(0x180d),
            ..ApcfCommand::default()
        });
        cmd.uuid_mask = Some(SizedUuid::narrow(
            &BtUuid::from_16bit(0xffff),
            UuidWidth::Bits128,
        ));
        assert!(matches!(
            ApcfEncoder::new().encode_filter_command(ApcfAction::Add, 0, &cmd),
            Err(FilterError::MaskLengthMismatch {
                field: "uuid",
                data: 2,
                mask: 16
            })
        ));
    }

    #[test]
    fn local_name() {
        let cmd = command(ApcfCommand {
            filter_type: ApcfFilterType::LocalName as u8,
            name: "tag".into(),
            ..ApcfCommand::default()
        });
        let params = ApcfEncoder::new()
            .encode_filter_command(ApcfAction::Add, 1, &cmd)
            .unwrap();
        assert_eq!(params, vec![0x05, 0x00, 0x01, b't', b'a', b'g']);
    }

    #[test]
    fn manufacturer_data_prefixes_company() {
        let cmd = command(ApcfCommand {
            filter_type: ApcfFilterType::ManufacturerData as u8,
            company: 0x004c,
            company_mask: Some(0xffff),
            data: vec![0x02, 0x15],
            data_mask: vec![0xff, 0x00],
            ..ApcfCommand::default()
        });
        let params = ApcfEncoder::new()
            .encode_filter_command(ApcfAction::Add, 3, &cmd)
            .unwrap();
        assert_eq!(
            params,
            vec![0x06, 0x00, 0x03, 0x4c, 0x00, 0x02, 0x15, 0xff, 0xff, 0xff, 0x00]
        );
    }

    #[test]
    fn manufacturer_company_only_matches_company() {
        let cmd = command(ApcfCommand {
            filter_type: ApcfFilterType::ManufacturerData as u8,
            company: 0x004c,
            ..ApcfCommand::default()
        });
        let params = ApcfEncoder::new()
            .encode_filter_command(ApcfAction::Add, 0, &cmd)
            .unwrap();
        assert_eq!(params, vec![0x06, 0x00, 0x00, 0x4c, 0x00, 0xff, 0xff]);
    }

    #[test]
    fn non_utf8_local_name_encoded_verbatim() {
        let cmd = command(ApcfCommand {
            filter_type: ApcfFilterType::LocalName as u8,
            name: vec![0xe2, 0x82],
            ..ApcfCommand::default()
        });
        let params = ApcfEncoder::new()
            .encode_filter_command(ApcfAction::Add, 1, &cmd)
            .unwrap();
        assert_eq!(params, vec![0x05, 0x00, 0x01, 0xe2, 0x82]);
    }

    #[test]
    fn service_data_mask_rules() {
        let enc = ApcfEncoder::new();
        let cmd = command(ApcfCommand {
            filter_type: ApcfFilterType::ServiceData as u8,
            data: vec![0xaa, 0xbb],
            ..ApcfCommand::default()
        });
        assert_eq!(
            enc.encode_filter_command(ApcfAction::Add, 0, &cmd).unwrap(),
            vec![0x07, 0x00, 0x00, 0xaa, 0xbb, 0xff, 0xff]
        );

        let cmd = command(ApcfCommand {
            filter_type: ApcfFilterType::ServiceData as u8,
            data: vec![0xaa, 0xbb],
            data_mask: vec![0xff],
            ..ApcfCommand::default()
        });
        assert!(matches!(
            enc.encode_filter_command(ApcfAction::Add, 0, &cmd),
            Err(FilterError::MaskLengthMismatch {
                field: "data",
                data: 2,
                mask: 1
            })
        ));
    }

    #[test]
    fn delete_and_clear_carry_no_condition() {
        let cmd = command(ApcfCommand {
            filter_type: ApcfFilterType::LocalName as u8,
            name: "ignored".into(),
            ..ApcfCommand::default()
        });
        let enc = ApcfEncoder::new();
        assert_eq!(
            enc.encode_filter_command(ApcfAction::Delete, 5, &cmd).unwrap(),
            vec![0x05, 0x01, 0x05]
        );
        assert_eq!(
            enc.encode_filter_command(ApcfAction::Clear, 5, &cmd).unwrap(),
            vec![0x05, 0x02, 0x05]
        );
    }

    #[test]
    fn filter_param_immediate() {
        let param = AdvertisingFilterParameter {
            feature_selection: 0x0102,
            list_logic_type: 0x0001,
            filter_logic_type: 1,
            rssi_high_thresh: -70,
            delivery_mode: DeliveryMode::Immediate,
            ..AdvertisingFilterParameter::default()
        };
        let params = ApcfEncoder::new()
            .encode_filter_param(ApcfAction::Add, 7, &param)
            .unwrap();
        assert_eq!(
            params,
            vec![0x01, 0x00, 0x07, 0x02, 0x01, 0x01, 0x00, 0x01, 0xba, 0x00]
        );
    }

    #[test]
    fn filter_param_on_found_appends_tracking_block() {
        let setup = FilterParamSetup {
            dely_mode: 1,
            rssi_high_thres: -60,
            rssi_low_thres: -80,
            found_timeout: 0x0200,
            found_timeout_cnt: 2,
            lost_timeout: 0x0300,
            num_of_tracking_entries: 4,
            ..FilterParamSetup::default()
        };
        let param = AdvertisingFilterParameter::try_from(&setup).unwrap();
        let params = ApcfEncoder::new()
            .encode_filter_param(ApcfAction::Add, 0, &param)
            .unwrap();
        assert_eq!(
            params.len(),
            SUB_HEADER_LEN + FILTER_PARAM_BASE_LEN + FILTER_PARAM_ON_FOUND_LEN
        );
        assert_eq!(
            &params[10..],
            &[0x00, 0x02, 0x02, 0xb0, 0x00, 0x03, 0x04, 0x00]
        );
    }

    #[test]
    fn filter_param_delete() {
        let params = ApcfEncoder::new()
            .encode_filter_param(ApcfAction::Delete, 9, &AdvertisingFilterParameter::default())
            .unwrap();
        assert_eq!(params, vec![0x01, 0x01, 0x09]);
    }

    #[test]
    fn parameter_limit_enforced() {
        let enc = ApcfEncoder::with_config(ApcfConfig {
            max_parameter_len: 8,
            ..ApcfConfig::default()
        });
        let cmd = command(ApcfCommand {
            filter_type: ApcfFilterType::LocalName as u8,
            name: "long-device-name".into(),
            ..ApcfCommand::default()
        });
        assert!(matches!(
            enc.encode_filter_command(ApcfAction::Add, 0, &cmd),
            Err(FilterError::ParameterTooLong { len: 19, max: 8 })
        ));
    }

    #[test]
    fn hci_frame_wraps_params() {
        let enc = ApcfEncoder::with_config(ApcfConfig {
            frame_offset: 4,
            ..ApcfConfig::default()
        });
        let params = enc.encode_enable(true).unwrap();
        let frame = enc.to_hci_frame(&params).unwrap();

        assert_eq!(frame.event(), EVT_TO_LM_HCI_CMD);
        assert_eq!(frame.offset(), 4);
        assert_eq!(frame.capacity(), 4 + 3 + 2);
        assert_eq!(frame.data(), &[0x57, 0xfd, 0x02, 0x00, 0x01]);
        assert_eq!(frame.hci_command_opcode(), Some(HCI_VENDOR_APCF_OPCODE));
        assert_eq!(frame.hci_command_param_len(), Some(2));
    }

    #[test]
    fn hci_frame_rejects_oversized_params() {
        let params = vec![0u8; 256];
        assert!(matches!(
            ApcfEncoder::new().to_hci_frame(&params),
            Err(FilterError::ParameterTooLong { len: 256, max: 255 })
        ));
    }

    #[test]
    fn batch_encodes_each_command() {
        let cmds = crate::translate::translate_batch(&[
            ApcfCommand {
                filter_type: ApcfFilterType::ServiceUuid as u8,
                uuid: BtUuid::from_16bit(0x180f),
                ..ApcfCommand::default()
            },
            ApcfCommand {
                filter_type: ApcfFilterType::LocalName as u8,
                name: "x".into(),
                ..ApcfCommand::default()
            },
        ])
        .unwrap();
        let encoded = ApcfEncoder::new()
            .encode_filter_batch(ApcfAction::Add, 1, &cmds)
            .unwrap();
        assert_eq!(encoded.len(), 2);
        assert_eq!(encoded[0][0], APCF_SUB_SERVICE_UUID);
        assert_eq!(encoded[1], vec![APCF_SUB_LOCAL_NAME, 0x00, 0x01, b'x']);
    }
}
