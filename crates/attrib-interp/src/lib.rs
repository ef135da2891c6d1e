//! Semantic interpretation of attrib event records.
//!
//! Event payloads are bare word vectors whose meaning depends on the most
//! recent ControlReset seen in the same capture. This crate holds that
//! state and turns payloads into human-readable text:
//!
//! - [`VocabularyRegistry`] maps a client `uiType` to its attribute labels
//! - [`DecodeContext`] tracks layout, active vocabulary, and the current
//!   challenge, with "unconfigured" as an explicit state
//! - [`GridFormatter`] renders attribute vectors as a bordered text grid
//! - [`EventInterpreter`] owns a context and interprets one event at a time

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod error;
pub mod grid;
pub mod interpret;
pub mod vocab;

pub use context::{Attributes, Configuration, ContextState, DecodeContext, Layout};
pub use error::{Advisory, InterpretError, PayloadError};
pub use grid::{GridError, GridFormatter};
pub use interpret::{EventInterpreter, HumanLine};
pub use vocab::{Vocabulary, VocabularyRegistry};
