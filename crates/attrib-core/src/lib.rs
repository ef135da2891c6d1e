//! Wire-level types for attrib capture files.
//!
//! This is the leaf crate of the attrib workspace. It defines the
//! little-endian [`WordReader`], the closed tag enumerations for buffers,
//! actions, and events, the decoded header and record values, and the
//! error taxonomy shared by the interpreter and the capture decoder.
//!
//! # Format
//!
//! ```text
//! [version u16] [reserved u16] [session_id u16] [section_count u32]
//! [Section 1] ... [Section N]
//!
//! Section:
//! [version u16] [reserved u16] [section_id u16]
//! [register_count u32] [register u16]*
//! [buffer_count u32] [Buffer]*
//!
//! Buffer:
//! [type u16] [length u32, in 16-bit words] [records ...]
//! ```
//!
//! Every field is little-endian. A `u32` is stored as two 16-bit words,
//! low word first.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod reader;
pub mod tags;
pub mod types;

pub use error::{BufferDesync, FatalError, ReadError};
pub use reader::WordReader;
pub use tags::{ActionKind, BufferType, EventType, RegisterKind};
pub use types::{
    ActionRecord, BufferHeader, EventHeader, EventRecord, FileHeader, PartialRecord, RecordKind,
    SectionHeader, TelemetryRecord,
};

/// The capture format version this decoder understands.
///
/// Both the file header and every section header carry a version word;
/// only the file header's is enforced.
pub const FORMAT_VERSION: u16 = 1;

/// Size in bytes of one format word.
pub const WORD_BYTES: usize = 2;
