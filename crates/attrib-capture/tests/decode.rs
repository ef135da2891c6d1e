//! Decoding well-formed captures end to end.

use attrib_capture::{decode_capture, decode_section_stream, DecodeOptions, DecodeReport};
use attrib_core::EventType;
use attrib_test_utils::{
    control_reset_payload, grid_session, text_payload, BufferSpec, CaptureBuilder, SectionSpec,
};
use proptest::prelude::*;

fn decode(bytes: &[u8]) -> (Vec<String>, DecodeReport) {
    let mut lines = Vec::new();
    let report = decode_capture(bytes, &DecodeOptions::default(), &mut lines).unwrap();
    (lines, report)
}

fn single_buffer(buffer: BufferSpec) -> Vec<u8> {
    CaptureBuilder::new()
        .section(SectionSpec::new(1).buffer(buffer))
        .build()
}

/// Text of the `<Human>` lines stamped with `timestamp`.
fn human(lines: &[String], timestamp: u32) -> Vec<String> {
    let prefix = format!("<Human>,{timestamp:010},");
    lines
        .iter()
        .filter_map(|line| line.strip_prefix(&prefix))
        .map(str::to_string)
        .collect()
}

fn reset(events: BufferSpec, ts: u32, ui_type: &str, grid_x: u16) -> BufferSpec {
    events.event_record(
        ts,
        EventType::ControlReset.tag(),
        &control_reset_payload(3, 9, ui_type, "random", grid_x),
    )
}

#[test]
fn minimal_file_lists_structure() {
    let bytes = CaptureBuilder::new()
        .session_id(7)
        .section(
            SectionSpec::new(3)
                .register(5)
                .buffer(BufferSpec::telemetry().movement(42, 1, 2)),
        )
        .build();
    let (lines, report) = decode(&bytes);
    assert_eq!(
        lines,
        [
            "<Meta>,0000000000,File Format Version:1",
            "<Meta>,0000000000,Session ID:7",
            "<Meta>,0000000000,Section Count:1",
            "<Meta>,0000000000,Section Format Version:1",
            "<Meta>,0000000000,Section ID:3",
            "<Meta>,0000000000,Register Count:1",
            "<Meta>,0000000000,Register(0):5",
            "<Meta>,0000000000,Buffers Count:1",
            "<Meta>,0000000000,Buffer(0) File Offset:1a",
            "<Meta>,0000000000,Buffer Type(0):1",
            "<Meta>,0000000000,Buffer(0) Length:4",
            "<Movement>,0000000042,1,2",
            "<Human>,0000000042,Mouse moved to relative page location (x=1, y=2).",
        ]
    );
    assert_eq!(report.trailing_bytes, Some(0));
    assert_eq!(report.sections, 1);
    assert_eq!(report.buffers, 1);
    assert_eq!(report.movements, 1);
    assert!(report.is_complete());
}

#[test]
fn trailing_bytes_are_reported_not_fatal() {
    let bytes = CaptureBuilder::new().trailing(&[1, 2, 3]).build();
    let (lines, report) = decode(&bytes);
    assert_eq!(
        lines.last().unwrap(),
        "<Meta>,0000000000,3 bytes left unprocessed in the input file"
    );
    assert_eq!(report.trailing_bytes, Some(3));
    assert!(report.fatal.is_none());
}

#[test]
fn clicks_carry_fields_and_descriptions() {
    let bytes = single_buffer(
        BufferSpec::action()
            .click(5, 10, 20, 1, 3)
            .click(6, 11, 21, 2, 0),
    );
    let (lines, report) = decode(&bytes);
    assert!(lines.contains(&"<Click>,0000000005,10,20,1,3".to_string()));
    assert_eq!(human(&lines, 5), ["Challenge digit 4 was selected."]);
    assert_eq!(
        human(&lines, 6),
        ["Click at relative page location (x=11, y=21)."]
    );
    assert_eq!(report.clicks, 2);
}

#[test]
fn challenge_renders_one_column_grid() {
    let events = reset(BufferSpec::event(), 100, "grid", 1).event_record(
        200,
        EventType::NewChallenge.tag(),
        &[2, 4, 6],
    );
    let (lines, report) = decode(&single_buffer(events));
    assert_eq!(
        human(&lines, 200),
        [
            "Valid challenge generated:",
            " -------",
            "|Hrect  |",
            "|yellow |",
            "|magenta|",
            " -------",
        ]
    );
    assert!(lines.contains(&"<Event>,200,7,9,12,3,0".to_string()));
    assert!(lines.contains(&"<Data>,0000000200,0000000002,6".to_string()));
    assert_eq!(report.advisories, 0);
}

#[test]
fn submit_resolves_through_challenge() {
    let events = reset(BufferSpec::event(), 100, "grid", 1)
        .event_record(200, EventType::NewChallenge.tag(), &[2, 4, 6])
        .event_record(300, EventType::Submit.tag(), &[1, 0]);
    let (lines, _) = decode(&single_buffer(events));
    let challenge = human(&lines, 200);
    let submit = human(&lines, 300);
    assert_eq!(submit[0], "Correct response submitted:");
    assert_eq!(submit[1..], challenge[1..]);
}

#[test]
fn control_reset_lists_parameters() {
    let (lines, _) = decode(&single_buffer(reset(BufferSpec::event(), 1, "grid", 3)));
    let text = human(&lines, 1);
    assert_eq!(text[0], "System reset with controller parameters:");
    assert_eq!(text[3], "uiType = grid");
    assert_eq!(text[5], "challengeChallengeDimX = 3");
    assert_eq!(text.last().unwrap(), "secretSizeMax = 4");
}

#[test]
fn unknown_ui_type_leaves_grid_events_unconfigured() {
    let events = reset(BufferSpec::event(), 1, "grid", 1)
        .event_record(2, EventType::NewChallenge.tag(), &[2, 4, 6])
        .event_record(3, EventType::ControlReset.tag(), &[]);
    let events = reset(events, 4, "dial", 1)
        .event_record(5, EventType::NewChallenge.tag(), &[2, 4, 6])
        .event_record(6, EventType::Submit.tag(), &[1, 0]);
    let (lines, report) = decode(&single_buffer(events));

    assert_eq!(
        human(&lines, 4).last().unwrap(),
        "uiType not found in keyVal lookup tables."
    );
    let unconfigured = "Decoder not configured: no usable controller reset has been seen.";
    assert_eq!(human(&lines, 5), ["Valid challenge generated:", unconfigured]);
    assert_eq!(human(&lines, 6), ["Correct response submitted:", unconfigured]);
    assert_eq!(report.advisories, 3);
    // The empty reset at ts 3 is malformed, not fatal.
    assert!(lines.contains(&"<CORRUPT_EVENT>,0000000003,7,9,47,0,0".to_string()));
    assert!(report.is_complete());
}

#[test]
fn stateless_events_and_form_data() {
    let events = BufferSpec::event()
        .event_record(1, EventType::Activation.tag(), &[])
        .event_record(2, EventType::OtherData.tag(), &text_payload("age=42\nok\n"))
        .event_record(3, EventType::TimeSync.tag(), &[0x5678, 0x1234]);
    let (lines, _) = decode(&single_buffer(events));
    assert_eq!(human(&lines, 1), ["Telemeter activated."]);
    assert_eq!(human(&lines, 2), ["Form data:", "age=42", "ok"]);
    assert_eq!(human(&lines, 3), ["Time Sync :", "305419896"]);
}

#[test]
fn each_decode_starts_unconfigured() {
    let configured = single_buffer(
        reset(BufferSpec::event(), 1, "grid", 1).event_record(
            2,
            EventType::NewChallenge.tag(),
            &[2, 4, 6],
        ),
    );
    let submit_only =
        single_buffer(BufferSpec::event().event_record(3, EventType::Submit.tag(), &[1, 0]));

    let (_, first) = decode(&configured);
    assert_eq!(first.advisories, 0);
    let (lines, second) = decode(&submit_only);
    assert_eq!(second.advisories, 1);
    assert_eq!(
        human(&lines, 3)[1],
        "Decoder not configured: no usable controller reset has been seen."
    );
}

#[test]
fn raw_options_skip_interpretation() {
    let events = reset(BufferSpec::event(), 1, "grid", 1);
    let bytes = CaptureBuilder::new()
        .section(
            SectionSpec::new(1)
                .buffer(BufferSpec::telemetry().movement(1, 2, 3))
                .buffer(events.event_record(9, 99, &[])),
        )
        .build();
    let mut lines: Vec<String> = Vec::new();
    let report = decode_capture(&bytes, &DecodeOptions::raw(), &mut lines).unwrap();
    assert!(lines.iter().all(|line| !line.starts_with("<Human>")));
    // Unknown event types only matter to the interpreter.
    assert!(report.is_complete());
    assert!(lines.contains(&"<Event>,9,7,9,99,0,0".to_string()));
}

#[test]
fn grid_session_decodes_cleanly() {
    let (lines, report) = decode(&grid_session(4).build());
    assert!(report.is_complete());
    assert_eq!(report.trailing_bytes, Some(0));
    assert_eq!(report.corrupt_records, 0);
    assert_eq!(report.advisories, 0);
    assert_eq!(report.movements, 40);
    assert_eq!(report.clicks, 4);
    assert_eq!(report.events, 1 + 4 * 2 + 1);
    assert!(lines.iter().any(|l| l.ends_with(",Correct response submitted:")));
}

#[test]
fn section_stream_decodes_without_file_header() {
    let mut bytes = SectionSpec::new(4)
        .buffer(BufferSpec::action().click(3, 1, 1, 2, 0))
        .to_bytes();
    bytes.extend_from_slice(&[0, 0]);
    let mut lines: Vec<String> = Vec::new();
    let report = decode_section_stream(&bytes, &DecodeOptions::raw(), &mut lines).unwrap();
    assert_eq!(
        lines,
        [
            "<Meta>,0000000000,Section Format Version:1",
            "<Meta>,0000000000,Section ID:4",
            "<Meta>,0000000000,Register Count:0",
            "<Meta>,0000000000,Buffers Count:1",
            "<Meta>,0000000000,Buffer(0) File Offset:0e",
            "<Meta>,0000000000,Buffer Type(0):2",
            "<Meta>,0000000000,Buffer(0) Length:6",
            "<Click>,0000000003,1,1,2,0",
            "<Meta>,0000000000,2 bytes left unprocessed in the input file",
        ]
    );
    assert_eq!(report.trailing_bytes, Some(2));
}

proptest! {
    #[test]
    fn movement_fields_reach_output_verbatim(
        samples in proptest::collection::vec((any::<u32>(), any::<u16>(), any::<u16>()), 1..20),
    ) {
        let buffer = samples
            .iter()
            .fold(BufferSpec::telemetry(), |b, &(ts, x, y)| b.movement(ts, x, y));
        let (lines, report) = decode(&single_buffer(buffer));
        prop_assert_eq!(report.movements, samples.len() as u64);
        let movements: Vec<&String> =
            lines.iter().filter(|l| l.starts_with("<Movement>")).collect();
        for (line, &(ts, x, y)) in movements.iter().zip(&samples) {
            prop_assert_eq!(line.as_str(), format!("<Movement>,{ts:010},{x},{y}"));
        }
    }

    #[test]
    fn event_fields_reach_output_verbatim(
        ts in any::<u32>(),
        data in proptest::collection::vec(any::<u16>(), 0..16),
    ) {
        let buffer = BufferSpec::event().event_record(ts, EventType::ResponseClear.tag(), &data);
        let (lines, _) = decode(&single_buffer(buffer));
        let event = format!("<Event>,{ts},7,9,14,{},0", data.len());
        prop_assert!(lines.contains(&event));
        for (i, word) in data.iter().enumerate() {
            let expected = format!("<Data>,{ts:010},{i:010},{word}");
            prop_assert!(lines.contains(&expected));
        }
    }
}
