//! Error taxonomy for capture decoding.
//!
//! - [`ReadError`]: the primitive reader ran out of bytes.
//! - [`FatalError`]: the file decode stops after one terminal diagnostic.
//! - [`BufferDesync`]: the current buffer's record stream is abandoned;
//!   the rest of the file continues at the buffer's declared end.

use thiserror::Error;

/// Failure of the primitive reader.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReadError {
    /// Fewer bytes were available than the read required.
    #[error("truncated input at offset {offset:#x}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        /// Absolute offset where the read started.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
        /// Bytes that were left.
        available: usize,
    },
}

/// Conditions that abort the whole file decode.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FatalError {
    /// The file header's version is not the supported one.
    #[error("version mismatch: file declares {found}, decoder supports {supported}")]
    VersionMismatch {
        /// Version found in the file.
        found: u16,
        /// Version this decoder supports.
        supported: u16,
    },
    /// A buffer declared a type with no known record size.
    #[error("unknown buffer type {tag} (buffer {index})")]
    UnknownBufferType {
        /// Index of the buffer within its section.
        index: u32,
        /// The unrecognized tag.
        tag: u16,
    },
    /// An event record carried a type outside the enumeration.
    #[error("unknown event type {tag} at timestamp {timestamp}")]
    UnknownEventType {
        /// The unrecognized tag.
        tag: u16,
        /// Timestamp of the offending record.
        timestamp: u32,
    },
    /// The container structure ran past the end of the input.
    #[error(transparent)]
    Truncated(#[from] ReadError),
}

/// Reasons an Event buffer cannot be resynchronized.
///
/// Event records are only recoverable while their own `dataLen` is
/// trustworthy. Once the header itself is cut short, or the payload runs
/// past the buffer, there is no safe record boundary to resume from.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BufferDesync {
    /// The event header ended before `dataLen` decoded.
    #[error("event header truncated after {decoded} of 5 fields")]
    HeaderTruncated {
        /// Header fields that did decode.
        decoded: usize,
    },
    /// The payload declares more words than the buffer holds.
    #[error("event payload declares {declared} words but only {available} remain in the buffer")]
    PayloadOverrun {
        /// Declared `dataLen`.
        declared: u16,
        /// Whole words left in the buffer.
        available: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_converts_to_fatal() {
        let err = ReadError::TruncatedInput {
            offset: 0x10,
            needed: 4,
            available: 1,
        };
        let fatal: FatalError = err.clone().into();
        assert_eq!(fatal, FatalError::Truncated(err));
        assert_eq!(
            fatal.to_string(),
            "truncated input at offset 0x10: needed 4 bytes, 1 available"
        );
    }

    #[test]
    fn version_mismatch_message() {
        let err = FatalError::VersionMismatch {
            found: 2,
            supported: 1,
        };
        assert_eq!(
            err.to_string(),
            "version mismatch: file declares 2, decoder supports 1"
        );
    }
}
