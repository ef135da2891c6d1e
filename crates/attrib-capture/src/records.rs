//! Per-record decoders.
//!
//! Each decoder reads one record from a buffer's clipped reader and says
//! how it went. None of them emit output; the buffer loops decide what a
//! given outcome means for the stream.

use attrib_core::error::ReadError;
use attrib_core::{
    ActionRecord, BufferDesync, EventHeader, EventRecord, PartialRecord, RecordKind,
    TelemetryRecord, WordReader, WORD_BYTES,
};

/// Result of decoding one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordOutcome<T> {
    /// Every field decoded.
    Decoded(T),
    /// The record failed part-way but its size is known, so the stream can
    /// resume at the next nominal record boundary.
    Corrupt(PartialRecord),
    /// The record failed in a way that leaves no trustworthy boundary. The
    /// rest of the buffer must be abandoned.
    Desync {
        /// Fields that decoded before the failure.
        partial: PartialRecord,
        /// Why resynchronization is impossible.
        reason: BufferDesync,
    },
}

impl<T> RecordOutcome<T> {
    /// The decoded record, if any.
    pub fn decoded(self) -> Option<T> {
        match self {
            Self::Decoded(record) => Some(record),
            Self::Corrupt(_) | Self::Desync { .. } => None,
        }
    }
}

/// Reads header fields, remembering each one that decodes.
struct FieldReader<'r, 'a> {
    reader: &'r mut WordReader<'a>,
    partial: PartialRecord,
}

impl<'r, 'a> FieldReader<'r, 'a> {
    fn new(reader: &'r mut WordReader<'a>, kind: RecordKind) -> Self {
        Self {
            reader,
            partial: PartialRecord::new(kind),
        }
    }

    fn u32(&mut self) -> Result<u32, ReadError> {
        let value = self.reader.read_u32()?;
        self.partial.push(value);
        Ok(value)
    }

    fn u16(&mut self) -> Result<u16, ReadError> {
        let value = self.reader.read_u16()?;
        self.partial.push(value);
        Ok(value)
    }
}

fn telemetry_fields(fields: &mut FieldReader<'_, '_>) -> Result<TelemetryRecord, ReadError> {
    Ok(TelemetryRecord {
        timestamp: fields.u32()?,
        x: fields.u16()?,
        y: fields.u16()?,
    })
}

fn action_fields(fields: &mut FieldReader<'_, '_>) -> Result<ActionRecord, ReadError> {
    Ok(ActionRecord {
        timestamp: fields.u32()?,
        x: fields.u16()?,
        y: fields.u16()?,
        kind: fields.u16()?,
        value: fields.u16()?,
    })
}

fn event_header_fields(fields: &mut FieldReader<'_, '_>) -> Result<EventHeader, ReadError> {
    Ok(EventHeader {
        timestamp: fields.u32()?,
        x: fields.u16()?,
        y: fields.u16()?,
        event_type: fields.u16()?,
        data_len: fields.u16()?,
    })
}

/// Decode one Telemetry record.
pub fn read_telemetry(reader: &mut WordReader<'_>) -> RecordOutcome<TelemetryRecord> {
    let mut fields = FieldReader::new(reader, RecordKind::Movement);
    match telemetry_fields(&mut fields) {
        Ok(record) => RecordOutcome::Decoded(record),
        Err(_) => RecordOutcome::Corrupt(fields.partial),
    }
}

/// Decode one Action record.
pub fn read_action(reader: &mut WordReader<'_>) -> RecordOutcome<ActionRecord> {
    let mut fields = FieldReader::new(reader, RecordKind::Action);
    match action_fields(&mut fields) {
        Ok(record) => RecordOutcome::Decoded(record),
        Err(_) => RecordOutcome::Corrupt(fields.partial),
    }
}

/// Decode one Event record, header and payload.
///
/// Never returns [`RecordOutcome::Corrupt`]: an event whose header or
/// payload is cut short has no boundary to resume from. Payload shape
/// problems are found later, by the interpreter.
pub fn read_event(reader: &mut WordReader<'_>) -> RecordOutcome<EventRecord> {
    let mut fields = FieldReader::new(reader, RecordKind::Event);
    let header = event_header_fields(&mut fields);
    let FieldReader { reader, partial } = fields;
    let header = match header {
        Ok(header) => header,
        Err(_) => {
            let decoded = partial.fields.len();
            return RecordOutcome::Desync {
                partial,
                reason: BufferDesync::HeaderTruncated { decoded },
            };
        }
    };

    let available = reader.remaining() / WORD_BYTES;
    match reader.read_words(usize::from(header.data_len)) {
        Ok(data) => RecordOutcome::Decoded(EventRecord { header, data }),
        Err(_) => RecordOutcome::Desync {
            partial,
            reason: BufferDesync::PayloadOverrun {
                declared: header.data_len,
                available,
            },
        },
    }
}
