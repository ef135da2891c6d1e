//! attrib-decode - decode a capture file into tagged text lines
//!
//! Writes `<Meta>`, `<Movement>`, `<Click>`, `<Event>`, `<Data>`, and
//! `<Human>` lines to standard output. Logging goes to standard error.

use std::path::PathBuf;

use anyhow::Result;
use attrib::capture::DecodeOptions;
use attrib_cli::InputFormat;
use clap::Parser;

#[derive(Parser)]
#[command(name = "attrib-decode")]
#[command(about = "Decode an attrib capture file")]
#[command(version)]
struct Cli {
    /// Capture file to decode
    data_filename: Option<PathBuf>,
}

fn main() -> Result<()> {
    attrib_cli::init_tracing();
    let cli = Cli::parse();

    let Some(path) = cli.data_filename else {
        println!("Usage: attrib-decode <DATA_FILENAME>");
        return Ok(());
    };

    let input = attrib_cli::read_input(Some(&path))?;
    attrib_cli::run(&input, &DecodeOptions::default(), InputFormat::Capture)?;
    Ok(())
}
