//! Interpretation outcomes that are not plain text.

use attrib_core::EventType;
use thiserror::Error;

use crate::grid::GridError;

/// A condition reported inline as a note; decoding carries on.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Advisory {
    /// ControlReset named a `uiType` with no vocabulary table.
    #[error("uiType not found in keyVal lookup tables.")]
    UnknownUiType {
        /// The unrecognized name.
        ui_type: String,
    },
    /// The named vocabulary has too few keys or labels for the layout.
    #[error("uiType {ui_type} vocabulary does not cover keySize {key_size} and valSize {val_size}.")]
    IncompatibleVocabulary {
        /// The vocabulary name.
        ui_type: String,
        /// Requested key count.
        key_size: u16,
        /// Requested value count.
        val_size: u16,
    },
    /// A grid-dependent event arrived before a usable ControlReset.
    #[error("Decoder not configured: no usable controller reset has been seen.")]
    Unconfigured,
    /// Submit referenced a digit the current challenge does not have.
    #[error("Digit {digit} has no entry in the current challenge.")]
    UnresolvedDigit {
        /// The digit index from the payload.
        digit: u16,
    },
    /// A secret entry decoded to a key beyond `keySize`.
    #[error("Secret entry {entry} decodes to key {key}, outside keySize {key_size}.")]
    SecretKeyOutOfRange {
        /// Raw `key * valSize + val` word.
        entry: u16,
        /// Decoded key.
        key: u16,
        /// Configured key count.
        key_size: u16,
    },
    /// The grid could not be drawn.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// OtherData was not a UTF-8 byte string.
    #[error("UTF-8 Decoding Error!")]
    InvalidUtf8,
}

/// An event payload whose shape is wrong for its type.
///
/// The record's declared size is still trustworthy, so the decoder reports
/// the record as corrupt and resumes at the next one.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// A required field is absent.
    #[error("{field} is missing")]
    Missing {
        /// Field name.
        field: &'static str,
    },
    /// A string field has no terminating line feed.
    #[error("{field} is not terminated by a line feed")]
    Unterminated {
        /// Field name.
        field: &'static str,
    },
    /// A string field holds a word that is not a byte.
    #[error("{field} holds word {value}, which is not a byte")]
    NotAByte {
        /// Field name.
        field: &'static str,
        /// The offending word.
        value: u16,
    },
    /// A string field is not valid UTF-8.
    #[error("{field} is not valid UTF-8")]
    InvalidUtf8 {
        /// Field name.
        field: &'static str,
    },
    /// A dimension that is used as a divisor is zero.
    #[error("{field} must be non-zero")]
    Zero {
        /// Field name.
        field: &'static str,
    },
    /// A challenge does not split into whole attribute tuples.
    #[error("challenge of {len} words is not a multiple of keySize {key_size}")]
    Ragged {
        /// Payload length.
        len: usize,
        /// Configured key count.
        key_size: u16,
    },
}

/// Why an event could not be interpreted at all.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InterpretError {
    /// The event type is outside the enumeration.
    #[error("unknown event type {0}")]
    UnknownEventType(u16),
    /// The payload does not fit the event type.
    #[error("malformed {kind:?} payload: {source}")]
    Malformed {
        /// Event type being interpreted.
        kind: EventType,
        /// What was wrong.
        #[source]
        source: PayloadError,
    },
}
