//! Buffer dispatch and the per-type record loops.

use attrib_core::types::{ACTION_RECORD_WORDS, TELEMETRY_RECORD_WORDS};
use attrib_core::{
    ActionKind, ActionRecord, BufferDesync, BufferHeader, BufferType, EventRecord, FatalError,
    PartialRecord, RecordKind, TelemetryRecord, WordReader, WORD_BYTES,
};
use attrib_interp::InterpretError;
use tracing::{debug_span, trace, warn};

use crate::decoder::{Decoder, Halt};
use crate::emit::{Line, LineSink};
use crate::records::{read_action, read_event, read_telemetry, RecordOutcome};

type ReadFn<T> = fn(&mut WordReader<'_>) -> RecordOutcome<T>;

impl<S: LineSink + ?Sized> Decoder<'_, S> {
    /// Decode one buffer's records from `records`, a reader clipped to the
    /// buffer's declared extent.
    pub(crate) fn dispatch(
        &mut self,
        index: u32,
        header: &BufferHeader,
        mut records: WordReader<'_>,
    ) -> Result<(), Halt> {
        let span = debug_span!("buffer", index, offset = header.offset);
        let _guard = span.enter();
        match header.buffer_type {
            BufferType::Telemetry => self.drain(
                index,
                &mut records,
                read_telemetry,
                Some(TELEMETRY_RECORD_WORDS * WORD_BYTES),
                Self::movement,
            ),
            BufferType::Action => self.drain(
                index,
                &mut records,
                read_action,
                Some(ACTION_RECORD_WORDS * WORD_BYTES),
                Self::click,
            ),
            BufferType::Event => self.drain(index, &mut records, read_event, None, Self::event),
            BufferType::Unknown(tag) => Err(FatalError::UnknownBufferType { index, tag }.into()),
        }
    }

    /// Run `read` until the buffer is exhausted.
    ///
    /// With a fixed `stride`, each iteration restarts at the previous
    /// record's nominal end whatever the outcome. Variable-size records
    /// leave the reader at their own end instead.
    fn drain<T>(
        &mut self,
        index: u32,
        records: &mut WordReader<'_>,
        read: ReadFn<T>,
        stride: Option<usize>,
        handle: fn(&mut Self, T) -> Result<(), Halt>,
    ) -> Result<(), Halt> {
        while !records.is_exhausted() {
            let start = records.position();
            match read(records) {
                RecordOutcome::Decoded(record) => handle(self, record)?,
                RecordOutcome::Corrupt(partial) => self.corrupt(partial)?,
                RecordOutcome::Desync { partial, reason } => {
                    self.corrupt(partial)?;
                    return self.desync(index, &reason);
                }
            }
            if let Some(stride) = stride {
                records.seek(start + stride);
            }
        }
        Ok(())
    }

    fn movement(&mut self, record: TelemetryRecord) -> Result<(), Halt> {
        trace!(?record, "movement");
        self.report.movements += 1;
        self.emit(Line::Movement(record))?;
        if self.options.human_lines {
            self.emit(Line::human(
                record.timestamp,
                format!(
                    "Mouse moved to relative page location (x={}, y={}).",
                    record.x, record.y
                ),
            ))?;
        }
        Ok(())
    }

    fn click(&mut self, record: ActionRecord) -> Result<(), Halt> {
        trace!(?record, "click");
        self.report.clicks += 1;
        self.emit(Line::Click(record))?;
        if self.options.human_lines {
            self.emit(Line::human(record.timestamp, describe_action(&record)))?;
        }
        Ok(())
    }

    fn event(&mut self, record: EventRecord) -> Result<(), Halt> {
        let EventRecord { header, data } = record;
        trace!(?header, "event");
        self.report.events += 1;
        self.emit(Line::Event(header))?;
        for (index, &word) in data.iter().enumerate() {
            self.emit(Line::Data {
                timestamp: header.timestamp,
                index,
                word,
            })?;
        }
        if !self.options.interpret_events {
            return Ok(());
        }

        match self.interpreter.interpret(header.kind(), &data) {
            Ok(lines) => {
                for line in lines {
                    if line.is_note() {
                        warn!(timestamp = header.timestamp, note = %line, "advisory");
                        self.report.advisories += 1;
                    }
                    self.emit(Line::human(header.timestamp, line.to_string()))?;
                }
                Ok(())
            }
            Err(err @ InterpretError::Malformed { .. }) => {
                warn!(timestamp = header.timestamp, %err, "malformed event payload");
                self.corrupt(PartialRecord::from(&header))
            }
            Err(InterpretError::UnknownEventType(tag)) => Err(FatalError::UnknownEventType {
                tag,
                timestamp: header.timestamp,
            }
            .into()),
        }
    }

    fn corrupt(&mut self, partial: PartialRecord) -> Result<(), Halt> {
        warn!(kind = ?partial.kind, fields = partial.fields.len(), "corrupt record");
        self.report.corrupt_records += 1;
        let timestamp = partial.timestamp();
        let kind = partial.kind;
        self.emit(Line::Corrupt(partial))?;
        if kind == RecordKind::Action && self.options.human_lines {
            self.emit(Line::Human {
                timestamp,
                text: "Corrupted action.".to_string(),
            })?;
        }
        Ok(())
    }

    fn desync(&mut self, index: u32, reason: &BufferDesync) -> Result<(), Halt> {
        warn!(index, %reason, "abandoning buffer");
        self.report.desynced_buffers += 1;
        self.meta(format!("Buffer({index}) desynchronized: {reason}"))?;
        Ok(())
    }
}

fn describe_action(record: &ActionRecord) -> String {
    match record.action_kind() {
        ActionKind::Error => format!("Error action with data={}.", record.value),
        ActionKind::Digit => format!(
            "Challenge digit {} was selected.",
            u32::from(record.value) + 1
        ),
        ActionKind::Other => format!(
            "Click at relative page location (x={}, y={}).",
            record.x, record.y
        ),
        ActionKind::Unknown(_) => "Unknown action.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(kind: u16, value: u16) -> ActionRecord {
        ActionRecord {
            timestamp: 1,
            x: 10,
            y: 20,
            kind,
            value,
        }
    }

    #[test]
    fn action_descriptions() {
        assert_eq!(describe_action(&click(0, 7)), "Error action with data=7.");
        assert_eq!(
            describe_action(&click(1, 0)),
            "Challenge digit 1 was selected."
        );
        assert_eq!(
            describe_action(&click(2, 0)),
            "Click at relative page location (x=10, y=20)."
        );
        assert_eq!(describe_action(&click(9, 0)), "Unknown action.");
    }
}
