use btwire_apcf::{BtUuid, UuidWidth};
use serde::Serialize;

use crate::cmd::UuidArgs;
use crate::exit::{CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_records, OutputFormat, Record};

#[derive(Debug, Serialize)]
struct UuidRecord {
    uuid: String,
    width: usize,
    short: String,
    wire_le: String,
    #[serde(skip)]
    wire: Vec<u8>,
}

impl UuidRecord {
    fn new(uuid: BtUuid) -> Self {
        let width = uuid.shortest_width();
        let short = match width {
            UuidWidth::Bits16 => format!("{:04x}", uuid.as_16bit()),
            UuidWidth::Bits32 => format!("{:08x}", uuid.as_32bit()),
            UuidWidth::Bits128 => uuid.to_string(),
        };
        let wire = uuid.to_wire_le(width);
        Self {
            uuid: uuid.to_string(),
            width: width.num_bytes(),
            short,
            wire_le: hex::encode(&wire),
            wire,
        }
    }
}

impl Record for UuidRecord {
    fn header() -> &'static [&'static str] {
        &["UUID", "WIDTH", "SHORT", "WIRE_LE"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.uuid.clone(),
            self.width.to_string(),
            self.short.clone(),
            self.wire_le.clone(),
        ]
    }

    fn raw(&self) -> Vec<u8> {
        self.wire.clone()
    }
}

pub fn run(args: UuidArgs, format: OutputFormat) -> CliResult<i32> {
    let uuid: BtUuid = args
        .uuid
        .parse()
        .map_err(|err| CliError::new(USAGE, format!("{err}")))?;
    if uuid.is_empty() {
        return Err(CliError::new(USAGE, "UUID must not be empty"));
    }

    print_records(&[UuidRecord::new(uuid)], format);
    Ok(SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_for_sixteen_bit() {
        let record = UuidRecord::new(BtUuid::from_16bit(0x180d));
        assert_eq!(record.width, 2);
        assert_eq!(record.short, "180d");
        assert_eq!(record.wire_le, "0d18");
    }

    #[test]
    fn record_for_full_width() {
        let uuid: BtUuid = "6e400001-b5a3-f393-e0a9-e50e24dcca9e".parse().unwrap();
        let record = UuidRecord::new(uuid);
        assert_eq!(record.width, 16);
        assert_eq!(record.short, "6e400001-b5a3-f393-e0a9-e50e24dcca9e");
        assert!(record.wire_le.starts_with("9eca"));
    }
}
