//! Shared plumbing for the attrib command-line decoders.
//!
//! Both binaries read their whole input into memory, decode it to standard
//! output, and log a summary to standard error.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use std::fs;
use std::io::{self, BufWriter, Read};
use std::path::Path;

use anyhow::{Context, Result};
use attrib::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Which framing the input uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// A full capture file, decoded with [`decode_capture`].
    Capture,
    /// One bare section, decoded with [`decode_section_stream`].
    Section,
}

impl InputFormat {
    /// Decode `input` into `sink`.
    pub fn decode<S: LineSink + ?Sized>(
        self,
        input: &[u8],
        options: &DecodeOptions,
        sink: &mut S,
    ) -> io::Result<DecodeReport> {
        match self {
            Self::Capture => decode_capture(input, options, sink),
            Self::Section => decode_section_stream(input, options, sink),
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default
/// `warn` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

/// Read the input file, or standard input when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .context("failed to read standard input")?;
            Ok(bytes)
        }
    }
}

/// Decode `input` to standard output and log the summary.
pub fn run(input: &[u8], options: &DecodeOptions, format: InputFormat) -> Result<DecodeReport> {
    options.validate()?;
    let stdout = io::stdout();
    let mut sink = WriterSink::new(BufWriter::new(stdout.lock()));
    let report = format
        .decode(input, options, &mut sink)
        .context("failed to write output")?;
    sink.flush().context("failed to write output")?;
    info!(%report, "decode finished");
    Ok(report)
}

/// Decode into any sink, for callers that do not write to stdout.
pub fn run_into<S: LineSink + ?Sized>(
    input: &[u8],
    options: &DecodeOptions,
    format: InputFormat,
    sink: &mut S,
) -> Result<DecodeReport> {
    options.validate()?;
    Ok(format.decode(input, options, sink)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_select_framing() {
        let empty_capture = [1, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut lines: Vec<String> = Vec::new();
        let report = run_into(
            &empty_capture,
            &DecodeOptions::default(),
            InputFormat::Capture,
            &mut lines,
        )
        .unwrap();
        assert!(report.is_complete());
        assert_eq!(lines[0], "<Meta>,0000000000,File Format Version:1");

        // Read as a section, the same bytes lack a buffer count.
        let mut lines: Vec<String> = Vec::new();
        let report = run_into(&empty_capture, &DecodeOptions::raw(), InputFormat::Section, &mut lines)
            .unwrap();
        assert!(!report.is_complete());
    }

    #[test]
    fn invalid_options_rejected() {
        let opts = DecodeOptions::default().with_supported_version(0);
        let mut lines: Vec<String> = Vec::new();
        assert!(run_into(&[], &opts, InputFormat::Capture, &mut lines).is_err());
        assert!(lines.is_empty());
    }

    #[test]
    fn missing_file_has_context() {
        let err = read_input(Some(Path::new("/nonexistent/attrib/capture.bin"))).unwrap_err();
        assert!(err.to_string().contains("failed to read /nonexistent/attrib/capture.bin"));
    }
}
