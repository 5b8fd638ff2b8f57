use std::fs::File;

use btwire_apcf::{ApcfAction, ApcfCommand, ApcfConfig, ApcfEncoder, Translator};
use btwire_frame::{Frame, FrameWriter};
use tracing::info;

use crate::cmd::record::{filter_type_name, HciCommandRecord};
use crate::cmd::{read_input, TranslateArgs};
use crate::exit::{filter_error, frame_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_records, OutputFormat};

pub fn run(args: TranslateArgs, format: OutputFormat) -> CliResult<i32> {
    let input = read_input(&args.file)?;
    let specs = parse_specs(&input)?;
    let action = ApcfAction::from(args.action);
    let encoder = ApcfEncoder::with_config(ApcfConfig {
        max_parameter_len: args.max_param_len,
        frame_offset: args.frame_offset,
    });

    let commands = Translator::new()
        .translate_batch(&specs)
        .map_err(|err| filter_error("translate failed", err))?;

    let mut records = Vec::with_capacity(commands.len());
    let mut frames = Vec::with_capacity(commands.len());
    for (index, command) in commands.iter().enumerate() {
        let params = encoder
            .encode_filter_command(action, args.filter_index, command)
            .map_err(|err| filter_error(&format!("encode failed for entry {index}"), err))?;
        let frame = encoder
            .to_hci_frame(&params)
            .map_err(|err| filter_error(&format!("framing failed for entry {index}"), err))?;
        records.push(HciCommandRecord::new(
            index,
            filter_type_name(command.filter_type),
            Some(args.filter_index),
            &params,
            &frame,
        ));
        frames.push(frame);
    }

    if let Some(path) = &args.out {
        write_frames(path, &frames)?;
    }

    info!(
        count = records.len(),
        filter_index = args.filter_index,
        action = ?action,
        "filters translated"
    );
    print_records(&records, format);
    Ok(SUCCESS)
}

/// Accepts a single spec object or a list of specs.
fn parse_specs(input: &[u8]) -> CliResult<Vec<ApcfCommand>> {
    let value: serde_json::Value = serde_json::from_slice(input)
        .map_err(|err| CliError::new(DATA_INVALID, format!("input is not valid JSON: {err}")))?;
    let specs = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|spec| vec![spec])
    };
    specs.map_err(|err| CliError::new(DATA_INVALID, format!("invalid filter spec: {err}")))
}

fn write_frames(path: &std::path::Path, frames: &[Frame]) -> CliResult<()> {
    let context = format!("failed writing {}", path.display());
    let file = File::create(path).map_err(|err| io_error(&context, err))?;
    let written = FrameWriter::new(file)
        .write_frames(frames)
        .map_err(|err| frame_error(&context, err))?;
    tracing::debug!(written, path = %path.display(), "frame stream written");
    Ok(())
}
