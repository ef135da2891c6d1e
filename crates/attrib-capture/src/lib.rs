//! Capture-file decoding for attrib.
//!
//! Walks a capture file's header, sections, registers, and typed buffers,
//! decodes each buffer's records, interprets events through a per-file
//! [`DecodeContext`](attrib_interp::DecodeContext), and writes the result
//! as a stream of tagged text [`Line`]s.
//!
//! # Architecture
//!
//! - [`decode_capture`] decodes a whole file; [`decode_section_stream`]
//!   decodes one bare section
//! - [`records`] holds the pure per-record decoders and their
//!   [`RecordOutcome`]
//! - [`LineSink`] receives every output line; [`WriterSink`] adapts any
//!   `io::Write`, and `Vec<String>` collects lines in tests
//! - [`DecodeReport`] summarizes what was decoded and why it stopped
//!
//! # Failure handling
//!
//! Record-level corruption is reported inline and decoding resumes at the
//! next record. An Event buffer whose record boundaries can no longer be
//! trusted is abandoned and decoding resumes at the buffer's declared end.
//! Fatal conditions end the decode with one `<Meta>` diagnostic line. Only
//! sink I/O failures surface as `Err`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod decoder;
mod dispatch;
pub mod emit;
mod frame;
pub mod options;
pub mod records;
pub mod report;

pub use decoder::{decode_capture, decode_section_stream};
pub use emit::{Line, LineSink, WriterSink};
pub use options::{DecodeOptions, OptionsError};
pub use records::RecordOutcome;
pub use report::DecodeReport;
