//! Attrib: a decoder for interaction-capture files.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the attrib sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use attrib::prelude::*;
//!
//! // Version 1, session 7, no sections.
//! let input = [1, 0, 0, 0, 7, 0, 0, 0, 0, 0];
//! let mut lines: Vec<String> = Vec::new();
//! let report = decode_capture(&input, &DecodeOptions::default(), &mut lines).unwrap();
//!
//! assert_eq!(lines[1], "<Meta>,0000000000,Session ID:7");
//! assert_eq!(report.trailing_bytes, Some(0));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`wire`] | `attrib-core` | Word reader, tags, record types, error taxonomy |
//! | [`interp`] | `attrib-interp` | Decode context, vocabularies, grid rendering, event interpretation |
//! | [`capture`] | `attrib-capture` | Frame walking, record recovery, tagged output |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Wire-level types (`attrib-core`).
///
/// The little-endian [`wire::WordReader`], tag enumerations such as
/// [`wire::EventType`], and the [`wire::FatalError`] taxonomy.
pub use attrib_core as wire;

/// Event interpretation (`attrib-interp`).
///
/// [`interp::EventInterpreter`] turns event payloads into human-readable
/// lines using a per-file [`interp::DecodeContext`].
pub use attrib_interp as interp;

/// Capture decoding (`attrib-capture`).
pub use attrib_capture as capture;

/// Common imports for typical attrib usage.
pub mod prelude {
    // Decoding
    pub use attrib_capture::{
        decode_capture, decode_section_stream, DecodeOptions, DecodeReport, Line, LineSink,
        WriterSink,
    };

    // Wire types
    pub use attrib_core::{BufferType, EventType, FatalError, FORMAT_VERSION};

    // Interpretation
    pub use attrib_interp::{Advisory, DecodeContext, EventInterpreter, HumanLine};
}
