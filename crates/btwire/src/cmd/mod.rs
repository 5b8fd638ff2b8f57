use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use btwire_apcf::ApcfAction;
use clap::{Args, Subcommand, ValueEnum};

use crate::exit::{io_error, CliResult};
use crate::output::OutputFormat;

pub mod decode;
pub mod enable;
pub mod param;
mod record;
pub mod translate;
pub mod uuid;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the shortest wire width of a UUID.
    Uuid(UuidArgs),
    /// Translate filter specs into APCF HCI commands.
    Translate(TranslateArgs),
    /// Encode a filter parameter setup command.
    Param(ParamArgs),
    /// Encode the APCF enable/disable command.
    Enable(EnableArgs),
    /// Decode a frame stream and print the headers.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Uuid(args) => uuid::run(args, format),
        Command::Translate(args) => translate::run(args, format),
        Command::Param(args) => param::run(args, format),
        Command::Enable(args) => enable::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum ActionArg {
    #[default]
    Add,
    Delete,
    Clear,
}

impl From<ActionArg> for ApcfAction {
    fn from(value: ActionArg) -> Self {
        match value {
            ActionArg::Add => ApcfAction::Add,
            ActionArg::Delete => ApcfAction::Delete,
            ActionArg::Clear => ApcfAction::Clear,
        }
    }
}

#[derive(Args, Debug)]
pub struct UuidArgs {
    /// 16-bit (`180d`), 32-bit (`0000180d`), or full 128-bit UUID.
    pub uuid: String,
}

#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// JSON file with one filter spec or a list of them (`-` for stdin).
    pub file: PathBuf,
    /// Controller filter index the conditions belong to.
    #[arg(long, short = 'i', default_value = "0")]
    pub filter_index: u8,
    #[arg(long, value_enum, default_value = "add")]
    pub action: ActionArg,
    /// Maximum encoded parameter length per command.
    #[arg(long, default_value = "255", env = "BTWIRE_MAX_PARAM_LEN")]
    pub max_param_len: usize,
    /// Head room reserved in front of each HCI command.
    #[arg(long, default_value = "0")]
    pub frame_offset: u16,
    /// Also write the frame stream to this file.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ParamArgs {
    #[arg(long, short = 'i', default_value = "0")]
    pub filter_index: u8,
    #[arg(long, value_enum, default_value = "add")]
    pub action: ActionArg,
    /// Filter parameter setup as inline JSON.
    #[arg(long, conflicts_with = "file")]
    pub json: Option<String>,
    /// Read the filter parameter setup from a JSON file.
    #[arg(long, conflicts_with = "json")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct EnableArgs {
    /// Encode the disable command instead.
    #[arg(long)]
    pub off: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frame stream as hex.
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read a binary frame stream from a file.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Reject frames with larger payloads.
    #[arg(long, default_value = "65535")]
    pub max_payload: usize,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Read a file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> CliResult<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|err| io_error("failed reading stdin", err))?;
        return Ok(buf);
    }
    fs::read(path).map_err(|err| io_error(&format!("failed reading {}", path.display()), err))
}
