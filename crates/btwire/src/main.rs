mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "btwire", version, about = "Bluetooth wire encoding CLI")]
struct Cli {
    /// Output format. Default: table on a terminal, json otherwise.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "warn",
        env = "BTWIRE_LOG_LEVEL",
        global = true
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    match cmd::run(cli.command, format) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            tracing::debug!(code = err.code, "command failed");
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_translate_subcommand() {
        let cli = Cli::try_parse_from([
            "btwire",
            "translate",
            "filters.json",
            "--filter-index",
            "3",
            "--action",
            "delete",
        ])
        .expect("translate args should parse");

        let Command::Translate(args) = cli.command else {
            panic!("expected translate");
        };
        assert_eq!(args.filter_index, 3);
        assert!(matches!(args.action, cmd::ActionArg::Delete));
    }

    #[test]
    fn rejects_conflicting_param_inputs() {
        let err = Cli::try_parse_from([
            "btwire",
            "param",
            "--json",
            "{}",
            "--file",
            "setup.json",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn decode_requires_input() {
        let err = Cli::try_parse_from(["btwire", "decode"]).expect_err("missing input should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn filter_index_must_fit_u8() {
        assert!(Cli::try_parse_from(["btwire", "param", "--filter-index", "256"]).is_err());
    }
}
