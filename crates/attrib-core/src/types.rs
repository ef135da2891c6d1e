//! Decoded header and record values.

use smallvec::SmallVec;

use crate::tags::{ActionKind, BufferType, EventType};

/// Words per Telemetry record: timestamp (2), x, y.
pub const TELEMETRY_RECORD_WORDS: usize = 4;
/// Words per Action record: timestamp (2), x, y, kind, value.
pub const ACTION_RECORD_WORDS: usize = 6;
/// Words in an Event record before its payload: timestamp (2), x, y, type, dataLen.
pub const EVENT_HEADER_WORDS: usize = 6;

/// Capture file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    /// Format version written by the client.
    pub version: u16,
    /// Session identifier.
    pub session_id: u16,
    /// Number of sections that follow.
    pub section_count: u32,
}

/// Fixed leading fields of a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionHeader {
    /// Section format version (reported, not enforced).
    pub version: u16,
    /// Section identifier.
    pub section_id: u16,
}

/// Type and extent of one buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferHeader {
    /// Absolute file offset of the buffer's type word.
    pub offset: usize,
    /// Declared record stream type.
    pub buffer_type: BufferType,
    /// Declared record stream length in 16-bit words. Authoritative for
    /// cursor advancement.
    pub length_words: u32,
}

impl BufferHeader {
    /// Declared record stream length in bytes.
    pub fn length_bytes(&self) -> usize {
        self.length_words as usize * crate::WORD_BYTES
    }
}

/// One pointer-movement sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TelemetryRecord {
    /// Client clock, milliseconds (low 32 bits).
    pub timestamp: u32,
    /// Page-relative x.
    pub x: u16,
    /// Page-relative y.
    pub y: u16,
}

/// One click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionRecord {
    /// Client clock, milliseconds (low 32 bits).
    pub timestamp: u32,
    /// Page-relative x.
    pub x: u16,
    /// Page-relative y.
    pub y: u16,
    /// Raw kind word.
    pub kind: u16,
    /// Kind-specific value (digit index, error detail, or empty).
    pub value: u16,
}

impl ActionRecord {
    /// Typed view of [`kind`](Self::kind).
    pub fn action_kind(&self) -> ActionKind {
        ActionKind::from(self.kind)
    }
}

/// Fixed leading fields of an Event record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventHeader {
    /// Client clock, milliseconds (low 32 bits).
    pub timestamp: u32,
    /// Page-relative x.
    pub x: u16,
    /// Page-relative y.
    pub y: u16,
    /// Raw event type word.
    pub event_type: u16,
    /// Payload length in words.
    pub data_len: u16,
}

impl EventHeader {
    /// Typed view of [`event_type`](Self::event_type).
    pub fn kind(&self) -> EventType {
        EventType::from(self.event_type)
    }

    /// Total record size in words, header included.
    pub fn record_words(&self) -> usize {
        EVENT_HEADER_WORDS + self.data_len as usize
    }
}

/// A complete Event record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    /// Header fields.
    pub header: EventHeader,
    /// Payload words, exactly `header.data_len` of them.
    pub data: Vec<u16>,
}

/// Which record stream a partially decoded record came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Telemetry sample.
    Movement,
    /// Click.
    Action,
    /// Event.
    Event,
}

impl RecordKind {
    /// Number of fixed fields in this kind's header.
    pub fn header_fields(self) -> usize {
        match self {
            Self::Movement => 3,
            Self::Action | Self::Event => 5,
        }
    }

    /// Tag used on the corruption diagnostic line.
    pub fn corrupt_tag(self) -> &'static str {
        match self {
            Self::Movement => "CORRUPT_MOVEMENT",
            Self::Action => "CORRUPT_ACTION",
            Self::Event => "CORRUPT_EVENT",
        }
    }
}

/// The fields of a record that decoded before it failed.
///
/// Only fields read from *this* record are held; nothing carries over from
/// the previous one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialRecord {
    /// Record stream the failure happened in.
    pub kind: RecordKind,
    /// Decoded fields in wire order, timestamp first.
    pub fields: SmallVec<[u32; 5]>,
}

impl PartialRecord {
    /// An empty partial of the given kind.
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            fields: SmallVec::new(),
        }
    }

    /// Append a decoded field.
    pub fn push(&mut self, value: impl Into<u32>) {
        self.fields.push(value.into());
    }

    /// The timestamp, if it decoded.
    pub fn timestamp(&self) -> Option<u32> {
        self.fields.first().copied()
    }

    /// `true` when every fixed header field decoded.
    pub fn header_complete(&self) -> bool {
        self.fields.len() >= self.kind.header_fields()
    }
}

impl From<&EventHeader> for PartialRecord {
    fn from(header: &EventHeader) -> Self {
        let mut partial = Self::new(RecordKind::Event);
        partial.push(header.timestamp);
        partial.push(header.x);
        partial.push(header.y);
        partial.push(header.event_type);
        partial.push(header.data_len);
        partial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_record_size_includes_header() {
        let header = EventHeader {
            timestamp: 1,
            x: 0,
            y: 0,
            event_type: 12,
            data_len: 9,
        };
        assert_eq!(header.record_words(), 15);
        assert_eq!(header.kind(), EventType::NewChallenge);
    }

    #[test]
    fn partial_from_header_is_complete() {
        let header = EventHeader {
            timestamp: 7,
            x: 1,
            y: 2,
            event_type: 46,
            data_len: 2,
        };
        let partial = PartialRecord::from(&header);
        assert!(partial.header_complete());
        assert_eq!(partial.timestamp(), Some(7));
        assert_eq!(partial.fields.as_slice(), &[7, 1, 2, 46, 2]);
    }

    #[test]
    fn partial_tracks_progress() {
        let mut partial = PartialRecord::new(RecordKind::Movement);
        assert_eq!(partial.timestamp(), None);
        partial.push(99u32);
        partial.push(3u16);
        assert!(!partial.header_complete());
        partial.push(4u16);
        assert!(partial.header_complete());
    }

    #[test]
    fn buffer_length_is_in_words() {
        let header = BufferHeader {
            offset: 0,
            buffer_type: BufferType::Telemetry,
            length_words: 8,
        };
        assert_eq!(header.length_bytes(), 16);
    }
}
