//! Event payloads and a representative session.

use attrib_core::EventType;

use crate::{BufferSpec, CaptureBuilder, SectionSpec};

/// Layout words following `gridX` in a ControlReset payload.
pub const DEFAULT_GEOMETRY: [u16; 17] = [
    3, 300, 300, 3, 1, 300, 100, 3, 1, 300, 100, 3, 1, 300, 100, 4, 4,
];

/// One word per byte of `text`.
pub fn text_payload(text: &str) -> Vec<u16> {
    text.bytes().map(u16::from).collect()
}

/// A ControlReset payload with [`DEFAULT_GEOMETRY`].
pub fn control_reset_payload(
    key_size: u16,
    val_size: u16,
    ui_type: &str,
    challenge_mode: &str,
    grid_x: u16,
) -> Vec<u16> {
    let mut data = vec![key_size, val_size];
    data.extend(text_payload(ui_type));
    data.push(10);
    data.extend(text_payload(challenge_mode));
    data.push(10);
    data.push(grid_x);
    data.extend_from_slice(&DEFAULT_GEOMETRY);
    data
}

/// A single-section session with `digits` rounds of challenge, clicks and
/// submit on the built-in `grid` vocabulary, plus pointer telemetry.
pub fn grid_session(digits: u16) -> CaptureBuilder {
    let mut telemetry = BufferSpec::telemetry();
    let mut actions = BufferSpec::action();
    let mut events = BufferSpec::event().event_record(
        0,
        EventType::ControlReset.tag(),
        &control_reset_payload(3, 9, "grid", "random", 3),
    );

    let challenge: Vec<u16> = (0..9u16).map(|i| i % 9 + 1).collect();
    for round in 0..u32::from(digits) {
        let ts = 1_000 + round * 100;
        events = events.event_record(ts, EventType::NewChallenge.tag(), &challenge);
        for step in 0..10u16 {
            telemetry = telemetry.movement(ts + u32::from(step), step * 3, step * 2);
        }
        actions = actions.click(ts + 50, 40, 60, 1, (round % 3) as u16);
        events = events.event_record(
            ts + 60,
            EventType::Submit.tag(),
            &[1, (round % 3) as u16],
        );
    }
    events = events.event_record(
        9_999,
        EventType::OtherData.tag(),
        &text_payload("age=42\nhand=right\n"),
    );

    CaptureBuilder::new().section(
        SectionSpec::new(1)
            .register(digits)
            .register(digits)
            .register(0)
            .register(0)
            .register(0)
            .buffer(telemetry)
            .buffer(actions)
            .buffer(events),
    )
}
