//! attrib-section - decode one bare section stream
//!
//! Reads the file named on the command line, or standard input, and
//! writes raw record lines without event interpretation.

use std::path::PathBuf;

use anyhow::Result;
use attrib::capture::DecodeOptions;
use attrib_cli::InputFormat;
use clap::Parser;

#[derive(Parser)]
#[command(name = "attrib-section")]
#[command(about = "Decode a bare attrib section stream")]
#[command(version)]
struct Cli {
    /// Section file to decode (default: standard input)
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    attrib_cli::init_tracing();
    let cli = Cli::parse();

    let input = attrib_cli::read_input(cli.input.as_deref())?;
    attrib_cli::run(&input, &DecodeOptions::raw(), InputFormat::Section)?;
    Ok(())
}
