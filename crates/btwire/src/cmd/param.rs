use btwire_apcf::{AdvertisingFilterParameter, ApcfAction, ApcfEncoder, FilterParamSetup};

use crate::cmd::record::HciCommandRecord;
use crate::cmd::{read_input, ParamArgs};
use crate::exit::{filter_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_records, OutputFormat};

pub fn run(args: ParamArgs, format: OutputFormat) -> CliResult<i32> {
    let setup = resolve_setup(&args)?;
    let parameter = AdvertisingFilterParameter::from_setup(setup.as_ref())
        .map_err(|err| filter_error("invalid filter parameters", err))?;

    let encoder = ApcfEncoder::new();
    let action = ApcfAction::from(args.action);
    let params = encoder
        .encode_filter_param(action, args.filter_index, &parameter)
        .map_err(|err| filter_error("encode failed", err))?;
    let frame = encoder
        .to_hci_frame(&params)
        .map_err(|err| filter_error("framing failed", err))?;

    let record = HciCommandRecord::new(0, "filter_param", Some(args.filter_index), &params, &frame);
    print_records(&[record], format);
    Ok(SUCCESS)
}

fn resolve_setup(args: &ParamArgs) -> CliResult<Option<FilterParamSetup>> {
    let raw = match (&args.json, &args.file) {
        (Some(json), _) => json.as_bytes().to_vec(),
        (None, Some(path)) => read_input(path)?,
        (None, None) => return Ok(None),
    };
    serde_json::from_slice(&raw).map(Some).map_err(|err| {
        CliError::new(DATA_INVALID, format!("invalid filter parameter setup: {err}"))
    })
}
