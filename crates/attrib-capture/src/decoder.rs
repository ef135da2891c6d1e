//! Decode drivers.

use std::io;

use attrib_core::error::ReadError;
use attrib_core::{FatalError, WordReader};
use attrib_interp::EventInterpreter;
use thiserror::Error;
use tracing::{debug, debug_span, error};

use crate::emit::{Line, LineSink};
use crate::options::DecodeOptions;
use crate::report::DecodeReport;

/// Why a decode stopped before the end of its input.
#[derive(Debug, Error)]
pub(crate) enum Halt {
    #[error(transparent)]
    Fatal(#[from] FatalError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<ReadError> for Halt {
    fn from(err: ReadError) -> Self {
        Self::Fatal(err.into())
    }
}

/// State for one decode run.
pub(crate) struct Decoder<'s, S: LineSink + ?Sized> {
    pub(crate) options: &'s DecodeOptions,
    sink: &'s mut S,
    pub(crate) interpreter: EventInterpreter,
    pub(crate) report: DecodeReport,
}

impl<'s, S: LineSink + ?Sized> Decoder<'s, S> {
    fn new(options: &'s DecodeOptions, sink: &'s mut S) -> Self {
        Self {
            options,
            sink,
            interpreter: EventInterpreter::new(),
            report: DecodeReport::default(),
        }
    }

    pub(crate) fn emit(&mut self, line: Line) -> io::Result<()> {
        self.sink.emit(&line)
    }

    pub(crate) fn meta(&mut self, text: String) -> io::Result<()> {
        self.emit(Line::Meta(text))
    }

    /// Close the run: a terminal diagnostic on failure, the trailing-byte
    /// note otherwise.
    fn finish(
        mut self,
        outcome: Result<(), Halt>,
        reader: &WordReader<'_>,
    ) -> io::Result<DecodeReport> {
        match outcome {
            Ok(()) => {
                let trailing = reader.remaining();
                debug!(trailing, "input consumed");
                if trailing > 0 {
                    self.meta(format!("{trailing} bytes left unprocessed in the input file"))?;
                }
                self.report.trailing_bytes = Some(trailing);
            }
            Err(Halt::Fatal(err)) => {
                error!(offset = reader.offset(), %err, "decode aborted");
                self.meta(format!("Error reading file(s): {err}"))?;
                self.report.fatal = Some(err);
            }
            Err(Halt::Io(err)) => return Err(err),
        }
        Ok(self.report)
    }
}

/// Decode a complete capture file into `sink`.
///
/// Each call starts from a fresh, unconfigured decode context. Decode
/// problems are reported as lines and in the returned [`DecodeReport`];
/// `Err` means the sink failed.
pub fn decode_capture<S>(
    input: &[u8],
    options: &DecodeOptions,
    sink: &mut S,
) -> io::Result<DecodeReport>
where
    S: LineSink + ?Sized,
{
    let span = debug_span!("decode_capture", bytes = input.len());
    let _guard = span.enter();

    let mut decoder = Decoder::new(options, sink);
    let mut reader = WordReader::new(input);
    let outcome = decoder.capture(&mut reader);
    decoder.finish(outcome, &reader)
}

/// Decode a single bare section, as exported by the stand-alone
/// controller, into `sink`.
///
/// There is no file header, so no version is enforced.
pub fn decode_section_stream<S>(
    input: &[u8],
    options: &DecodeOptions,
    sink: &mut S,
) -> io::Result<DecodeReport>
where
    S: LineSink + ?Sized,
{
    let span = debug_span!("decode_section_stream", bytes = input.len());
    let _guard = span.enter();

    let mut decoder = Decoder::new(options, sink);
    let mut reader = WordReader::new(input);
    let outcome = decoder.section(&mut reader);
    decoder.finish(outcome, &reader)
}
