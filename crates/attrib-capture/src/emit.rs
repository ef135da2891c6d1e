//! Tagged output lines and where they go.
//!
//! Every line starts with a bracketed tag. Most continue with a
//! zero-padded ten-digit timestamp and comma-separated fields; the
//! `<Event>` line keeps its timestamp unpadded, as downstream consumers
//! expect.

use std::fmt;
use std::io::{self, Write};

use attrib_core::{ActionRecord, EventHeader, PartialRecord, RecordKind, TelemetryRecord};

/// Timestamp carried by `<Meta>` lines.
pub const META_TIMESTAMP: u32 = 0;

/// One output line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line {
    /// Container structure or a decoder diagnostic.
    Meta(String),
    /// A decoded Telemetry record.
    Movement(TelemetryRecord),
    /// A decoded Action record.
    Click(ActionRecord),
    /// A decoded Event header.
    Event(EventHeader),
    /// One payload word of the preceding event.
    Data {
        /// The event's timestamp.
        timestamp: u32,
        /// Zero-based position in the payload.
        index: usize,
        /// The word.
        word: u16,
    },
    /// Human-readable description of a record.
    Human {
        /// Timestamp of the record described, if it decoded.
        timestamp: Option<u32>,
        /// The description.
        text: String,
    },
    /// A record that failed to decode, with the fields that did.
    Corrupt(PartialRecord),
}

impl Line {
    /// A `<Meta>` line.
    pub fn meta(text: impl Into<String>) -> Self {
        Self::Meta(text.into())
    }

    /// A `<Human>` line for a record with a known timestamp.
    pub fn human(timestamp: u32, text: impl Into<String>) -> Self {
        Self::Human {
            timestamp: Some(timestamp),
            text: text.into(),
        }
    }

    /// The line's bracketed tag, without brackets.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Meta(_) => "Meta",
            Self::Movement(_) => "Movement",
            Self::Click(_) => "Click",
            Self::Event(_) => "Event",
            Self::Data { .. } => "Data",
            Self::Human { .. } => "Human",
            Self::Corrupt(partial) => partial.kind.corrupt_tag(),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.tag())?;
        match self {
            Self::Meta(text) => write!(f, ",{META_TIMESTAMP:010},{text}"),
            Self::Movement(r) => write!(f, ",{:010},{},{}", r.timestamp, r.x, r.y),
            Self::Click(r) => write!(
                f,
                ",{:010},{},{},{},{}",
                r.timestamp, r.x, r.y, r.kind, r.value
            ),
            Self::Event(h) => write!(
                f,
                ",{},{},{},{},{},0",
                h.timestamp, h.x, h.y, h.event_type, h.data_len
            ),
            Self::Data {
                timestamp,
                index,
                word,
            } => write!(f, ",{timestamp:010},{index:010},{word}"),
            Self::Human {
                timestamp: Some(ts),
                text,
            } => write!(f, ",{ts:010},{text}"),
            Self::Human {
                timestamp: None,
                text,
            } => write!(f, ",{text}"),
            Self::Corrupt(partial) => {
                let mut fields = partial.fields.iter();
                if let Some(ts) = fields.next() {
                    write!(f, ",{ts:010}")?;
                }
                for field in fields {
                    write!(f, ",{field}")?;
                }
                if partial.kind == RecordKind::Event && partial.header_complete() {
                    f.write_str(",0")?;
                }
                Ok(())
            }
        }
    }
}

/// Destination for decoded lines.
pub trait LineSink {
    /// Accept one line.
    fn emit(&mut self, line: &Line) -> io::Result<()>;
}

impl<S: LineSink + ?Sized> LineSink for &mut S {
    fn emit(&mut self, line: &Line) -> io::Result<()> {
        (**self).emit(line)
    }
}

impl LineSink for Vec<String> {
    fn emit(&mut self, line: &Line) -> io::Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

impl LineSink for Vec<Line> {
    fn emit(&mut self, line: &Line) -> io::Result<()> {
        self.push(line.clone());
        Ok(())
    }
}

/// Writes each line, newline-terminated, to an `io::Write`.
///
/// No buffering of its own; wrap the writer in a `BufWriter` for files
/// and standard output.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LineSink for WriterSink<W> {
    fn emit(&mut self, line: &Line) -> io::Result<()> {
        writeln!(self.writer, "{line}")
    }
}
