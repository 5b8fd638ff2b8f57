use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line.
    Json,
    Table,
    /// `key=value` pairs, one record per line.
    Pretty,
    /// Wire bytes only.
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// A row of command output.
pub trait Record: Serialize {
    /// Column names, matching the order of [`Record::cells`].
    fn header() -> &'static [&'static str];

    fn cells(&self) -> Vec<String>;

    /// Bytes written in `raw` format.
    fn raw(&self) -> Vec<u8>;
}

pub fn print_records<R: Record>(records: &[R], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            for record in records {
                println!(
                    "{}",
                    serde_json::to_string(record).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(R::header().to_vec());
            for record in records {
                table.add_row(record.cells());
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for record in records {
                println!("{}", pretty_line(R::header(), &record.cells()));
            }
        }
        OutputFormat::Raw => {
            let bytes: Vec<u8> = records.iter().flat_map(|record| record.raw()).collect();
            print_raw(&bytes);
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn pretty_line(header: &[&str], cells: &[String]) -> String {
    header
        .iter()
        .zip(cells)
        .filter(|(_, cell)| !cell.is_empty())
        .map(|(name, cell)| format!("{}={cell}", name.to_ascii_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}
