use btwire_apcf::ApcfEncoder;

use crate::cmd::record::HciCommandRecord;
use crate::cmd::EnableArgs;
use crate::exit::{filter_error, CliResult, SUCCESS};
use crate::output::{print_records, OutputFormat};

pub fn run(args: EnableArgs, format: OutputFormat) -> CliResult<i32> {
    let encoder = ApcfEncoder::new();
    let params = encoder
        .encode_enable(!args.off)
        .map_err(|err| filter_error("encode failed", err))?;
    let frame = encoder
        .to_hci_frame(&params)
        .map_err(|err| filter_error("framing failed", err))?;

    let command = if args.off { "disable" } else { "enable" };
    print_records(&[HciCommandRecord::new(0, command, None, &params, &frame)], format);
    Ok(SUCCESS)
}
