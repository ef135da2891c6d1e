//! Summary of one decode run.

use std::fmt;

use attrib_core::FatalError;

/// What a decode run saw and how it ended.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Sections fully walked.
    pub sections: u32,
    /// Buffers whose declared extent was consumed.
    pub buffers: u32,
    /// Telemetry records decoded.
    pub movements: u64,
    /// Action records decoded.
    pub clicks: u64,
    /// Event records decoded.
    pub events: u64,
    /// Records reported as `CORRUPT_*`.
    pub corrupt_records: u64,
    /// Event buffers abandoned before their declared end.
    pub desynced_buffers: u32,
    /// Advisory notes emitted by the interpreter.
    pub advisories: u64,
    /// Unconsumed input after the last section. `None` if the decode
    /// stopped early.
    pub trailing_bytes: Option<usize>,
    /// The condition that stopped the decode, if any.
    pub fatal: Option<FatalError>,
}

impl DecodeReport {
    /// `true` if every declared section was walked.
    pub fn is_complete(&self) -> bool {
        self.fatal.is_none()
    }

    /// Records decoded without corruption, across all kinds.
    pub fn records(&self) -> u64 {
        self.movements + self.clicks + self.events
    }
}

impl fmt::Display for DecodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sections, {} buffers, {} records ({} corrupt), {} desynced buffers, {} advisories",
            self.sections,
            self.buffers,
            self.records(),
            self.corrupt_records,
            self.desynced_buffers,
            self.advisories
        )?;
        match (&self.fatal, self.trailing_bytes) {
            (Some(err), _) => write!(f, "; stopped: {err}"),
            (None, Some(n)) if n > 0 => write!(f, "; {n} trailing bytes"),
            (None, _) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_stop_reason() {
        let report = DecodeReport {
            sections: 1,
            movements: 2,
            fatal: Some(FatalError::UnknownBufferType { index: 0, tag: 9 }),
            ..DecodeReport::default()
        };
        assert!(!report.is_complete());
        assert_eq!(
            report.to_string(),
            "1 sections, 0 buffers, 2 records (0 corrupt), 0 desynced buffers, 0 advisories; \
             stopped: unknown buffer type 9 (buffer 0)"
        );
    }

    #[test]
    fn display_mentions_trailing_bytes() {
        let report = DecodeReport {
            trailing_bytes: Some(3),
            ..DecodeReport::default()
        };
        assert!(report.to_string().ends_with("; 3 trailing bytes"));
    }
}
