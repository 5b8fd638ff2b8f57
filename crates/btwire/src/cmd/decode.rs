use std::fs::File;
use std::io::{Cursor, Read};

use btwire_frame::event::is_to_lm;
use btwire_frame::{layer_name, Frame, FrameConfig, FrameReader};
use serde::Serialize;

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{print_records, OutputFormat, Record};

#[derive(Debug, Serialize)]
struct FrameRecord {
    index: usize,
    event: String,
    layer: &'static str,
    sub_event: u8,
    len: u16,
    layer_specific: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    hci_opcode: Option<String>,
    payload: String,
    #[serde(skip)]
    data: Vec<u8>,
}

impl FrameRecord {
    fn new(index: usize, frame: &Frame) -> Self {
        let hci_opcode = is_to_lm(frame.event())
            .then(|| frame.hci_command_opcode())
            .flatten()
            .map(|opcode| format!("0x{opcode:04x}"));
        Self {
            index,
            event: format!("0x{:04x}", frame.event()),
            layer: layer_name(frame.event()),
            sub_event: frame.sub_event(),
            len: frame.len(),
            layer_specific: frame.layer_specific(),
            hci_opcode,
            payload: hex::encode(frame.data()),
            data: frame.data().to_vec(),
        }
    }
}

impl Record for FrameRecord {
    fn header() -> &'static [&'static str] {
        &["ENTRY", "EVENT", "LAYER", "SUB", "LEN", "LS", "OPCODE", "PAYLOAD"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.index.to_string(),
            self.event.clone(),
            self.layer.to_string(),
            self.sub_event.to_string(),
            self.len.to_string(),
            self.layer_specific.to_string(),
            self.hci_opcode.clone().unwrap_or_default(),
            self.payload.clone(),
        ]
    }

    fn raw(&self) -> Vec<u8> {
        self.data.clone()
    }
}

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let config = FrameConfig {
        max_payload_size: args.max_payload,
    };

    let frames = match (&args.hex, &args.file) {
        (Some(hex), _) => read_frames(Cursor::new(parse_hex(hex)?), config)?,
        (None, Some(path)) => {
            let file = File::open(path)
                .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?;
            read_frames(file, config)?
        }
        (None, None) => return Err(CliError::new(USAGE, "nothing to decode")),
    };

    let records: Vec<_> = frames
        .iter()
        .enumerate()
        .map(|(index, frame)| FrameRecord::new(index, frame))
        .collect();
    tracing::debug!(count = records.len(), "frames decoded");
    print_records(&records, format);
    Ok(SUCCESS)
}

fn read_frames<R: Read>(inner: R, config: FrameConfig) -> CliResult<Vec<Frame>> {
    FrameReader::with_config(inner, config)
        .read_all()
        .map_err(|err| frame_error("decode failed", err))
}

/// Hex with optional `0x` prefix; whitespace and `:` separators are ignored.
fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let cleaned: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    hex::decode(&cleaned)
        .map_err(|err| CliError::new(DATA_INVALID, format!("invalid hex input: {err}")))
}
