//! Benchmark inputs for the attrib capture decoder.
//!
//! - [`session_profile`]: a realistic interpreted session
//! - [`telemetry_profile`]: a large raw movement stream
//! - [`corrupt_profile`]: a stream dominated by recovery paths

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use attrib_core::EventType;
use attrib_test_utils::{grid_session, BufferSpec, CaptureBuilder, SectionSpec};

/// A single-section grid session with `rounds` challenge/submit rounds.
pub fn session_profile(rounds: u16) -> Vec<u8> {
    grid_session(rounds).build()
}

/// `samples` movements split across buffers of at most 4096 records.
pub fn telemetry_profile(samples: u32) -> Vec<u8> {
    let mut section = SectionSpec::new(1);
    let mut remaining = samples;
    let mut ts = 0u32;
    while remaining > 0 {
        let n = remaining.min(4096);
        let mut buffer = BufferSpec::telemetry();
        for _ in 0..n {
            buffer = buffer.movement(ts, (ts % 1920) as u16, (ts % 1080) as u16);
            ts += 16;
        }
        section = section.buffer(buffer);
        remaining -= n;
    }
    CaptureBuilder::new().section(section).build()
}

/// Action and event buffers whose records are mostly cut short or
/// malformed, so decoding exercises the corruption paths.
pub fn corrupt_profile(records: u16) -> Vec<u8> {
    let mut actions = BufferSpec::action();
    let mut events = BufferSpec::event();
    for i in 0..records {
        let ts = u32::from(i) * 10;
        actions = actions.click(ts, i, i, 1, i % 9);
        // TimeSync needs two words; one makes it malformed.
        events = events.event_record(ts, EventType::TimeSync.tag(), &[i]);
    }
    // Odd tail so the last action is partial.
    actions = actions.words(&[1, 0, 2]);
    CaptureBuilder::new()
        .section(SectionSpec::new(1).buffer(actions).buffer(events))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telemetry_profile_size() {
        // 10 byte header, 14 byte section header, 2 buffers of 6 + 8n bytes.
        let bytes = telemetry_profile(5000);
        assert_eq!(bytes.len(), 10 + 14 + 2 * 6 + 5000 * 8);
    }

    #[test]
    fn profiles_are_nonempty() {
        assert!(session_profile(1).len() > 100);
        assert!(corrupt_profile(4).len() > 100);
    }
}
