//! Event interpretation.
//!
//! [`EventInterpreter`] owns the [`DecodeContext`] for one file and turns
//! each event's payload into [`HumanLine`]s. Outcomes fall in three
//! classes:
//!
//! - `Ok(lines)`, possibly containing [`HumanLine::Note`] advisories;
//! - `Err(InterpretError::Malformed)`: the payload shape is wrong, the
//!   record is corrupt but the stream continues;
//! - `Err(InterpretError::UnknownEventType)`: fatal for the file.

use std::fmt;

use attrib_core::reader::combine_words;
use attrib_core::EventType;
use tracing::trace;

use crate::context::{DecodeContext, Layout};
use crate::error::{Advisory, InterpretError, PayloadError};

/// Validity flag value meaning "valid" / "correct".
pub const FLAG_VALID: u16 = 1;

/// Line feed, the string delimiter inside ControlReset payloads.
const LINE_FEED: u16 = 10;

/// Names of the fixed layout words that close a ControlReset payload.
const LAYOUT_FIELDS: [&str; 17] = [
    "challengeChallengeDimY",
    "challengeChallengeResX",
    "challengeChallengeResY",
    "challengeResponseDimX",
    "challengeResponseDimY",
    "challengeResponseResX",
    "challengeResponseResY",
    "secretChallengeDimX",
    "secretChallengeDimY",
    "secretChallengeResX",
    "secretChallengeResY",
    "secretResponseDimX",
    "secretResponseDimY",
    "secretResponseResX",
    "secretResponseResY",
    "secretSizeMin",
    "secretSizeMax",
];

/// One line of human-readable output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HumanLine {
    /// Rendered text.
    Text(String),
    /// An advisory condition, shown inline.
    Note(Advisory),
}

impl HumanLine {
    /// `true` for advisories.
    pub fn is_note(&self) -> bool {
        matches!(self, Self::Note(_))
    }
}

impl fmt::Display for HumanLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Note(note) => write!(f, "{note}"),
        }
    }
}

impl From<String> for HumanLine {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for HumanLine {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Parsed ControlReset payload.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ControllerParams {
    layout: Layout,
    ui_type: String,
    challenge_mode: String,
    geometry: [u16; 17],
}

/// Interprets the events of one capture file.
#[derive(Debug, Default)]
pub struct EventInterpreter {
    ctx: DecodeContext,
}

impl EventInterpreter {
    /// An interpreter over a fresh, unconfigured context.
    pub fn new() -> Self {
        Self::with_context(DecodeContext::new())
    }

    /// An interpreter over the given context.
    pub fn with_context(ctx: DecodeContext) -> Self {
        Self { ctx }
    }

    /// Read-only view of the decode context.
    pub fn context(&self) -> &DecodeContext {
        &self.ctx
    }

    /// Interpret one event.
    pub fn interpret(
        &mut self,
        kind: EventType,
        data: &[u16],
    ) -> Result<Vec<HumanLine>, InterpretError> {
        trace!(?kind, len = data.len(), "interpreting event");
        let malformed = |source| InterpretError::Malformed { kind, source };
        match kind {
            EventType::Error => Ok(vec!["Error event.".into()]),
            EventType::NewSecret => self.new_secret(data).map_err(malformed),
            EventType::NewChallenge => self.new_challenge(data).map_err(malformed),
            EventType::Submit => self.submit(data).map_err(malformed),
            EventType::ResponseClear => Ok(vec!["Response cleared.".into()]),
            EventType::Activation => Ok(vec!["Telemeter activated.".into()]),
            EventType::Deactivation => Ok(vec!["Telemeter deactivated.".into()]),
            EventType::ActivationChange => Ok(vec!["Telemeter activation state change.".into()]),
            EventType::OtherData => Ok(other_data(data)),
            EventType::TimeSync => time_sync(data).map_err(malformed),
            EventType::ControlReset => self.control_reset(data).map_err(malformed),
            EventType::Unknown(tag) => Err(InterpretError::UnknownEventType(tag)),
        }
    }

    fn new_secret(&self, data: &[u16]) -> Result<Vec<HumanLine>, PayloadError> {
        let (&flag, entries) = data.split_first().ok_or(PayloadError::Missing {
            field: "validity flag",
        })?;
        let validity = if flag == FLAG_VALID { "Valid" } else { "Invalid" };
        let mut lines = vec![HumanLine::Text(format!("{validity} secret generated:"))];
        match self.secret_grid(entries) {
            Ok(rows) => lines.extend(rows.into_iter().map(HumanLine::Text)),
            Err(note) => lines.push(HumanLine::Note(note)),
        }
        Ok(lines)
    }

    /// Expand `key * valSize + val` entries into full tuples and render
    /// them as a single row.
    fn secret_grid(&self, entries: &[u16]) -> Result<Vec<String>, Advisory> {
        let config = self.ctx.configuration()?;
        let Layout {
            key_size, val_size, ..
        } = config.layout();
        let width = key_size as usize;

        let mut cells = vec![0u16; entries.len() * width];
        for (digit, &entry) in entries.iter().enumerate() {
            let key = entry / val_size;
            let val = entry % val_size;
            if key >= key_size {
                return Err(Advisory::SecretKeyOutOfRange {
                    entry,
                    key,
                    key_size,
                });
            }
            // Secrets are stored without the sentinel.
            cells[digit * width + key as usize] = val + 1;
        }
        Ok(config.formatter().render(&cells, entries.len())?)
    }

    fn new_challenge(&mut self, data: &[u16]) -> Result<Vec<HumanLine>, PayloadError> {
        let mut lines = vec![HumanLine::from("Valid challenge generated:")];
        let config = match self.ctx.configuration() {
            Ok(config) => config,
            Err(note) => {
                lines.push(HumanLine::Note(note));
                return Ok(lines);
            }
        };
        let layout = config.layout();
        let key_size = layout.key_size as usize;
        if data.len() % key_size != 0 {
            return Err(PayloadError::Ragged {
                len: data.len(),
                key_size: layout.key_size,
            });
        }

        match config.formatter().render(data, layout.grid_x as usize) {
            Ok(rows) => lines.extend(rows.into_iter().map(HumanLine::Text)),
            Err(err) => lines.push(HumanLine::Note(err.into())),
        }
        self.ctx.store_challenge(data, key_size);
        Ok(lines)
    }

    fn submit(&self, data: &[u16]) -> Result<Vec<HumanLine>, PayloadError> {
        let (&flag, digits) = data.split_first().ok_or(PayloadError::Missing {
            field: "correctness flag",
        })?;
        let verdict = if flag == FLAG_VALID {
            "Correct"
        } else {
            "Incorrect"
        };
        let mut lines = vec![HumanLine::Text(format!("{verdict} response submitted:"))];
        match self.response_grid(digits) {
            Ok(rows) => lines.extend(rows.into_iter().map(HumanLine::Text)),
            Err(note) => lines.push(HumanLine::Note(note)),
        }
        Ok(lines)
    }

    /// Resolve each digit through the challenge lookup and render the
    /// tuples as a single row.
    fn response_grid(&self, digits: &[u16]) -> Result<Vec<String>, Advisory> {
        let config = self.ctx.configuration()?;
        let mut cells = Vec::with_capacity(digits.len() * config.layout().key_size as usize);
        for &digit in digits {
            let tuple = self
                .ctx
                .challenge_digit(digit)
                .ok_or(Advisory::UnresolvedDigit { digit })?;
            cells.extend_from_slice(tuple);
        }
        Ok(config.formatter().render(&cells, digits.len())?)
    }

    fn control_reset(&mut self, data: &[u16]) -> Result<Vec<HumanLine>, PayloadError> {
        let params = parse_controller_params(data)?;
        let Layout {
            key_size,
            val_size,
            grid_x,
        } = params.layout;

        let mut lines = vec![
            HumanLine::from("System reset with controller parameters:"),
            HumanLine::Text(format!("keySize = {key_size}")),
            HumanLine::Text(format!("valSize = {val_size}")),
            HumanLine::Text(format!("uiType = {}", params.ui_type)),
            HumanLine::Text(format!("challengeMode = {}", params.challenge_mode)),
            HumanLine::Text(format!("challengeChallengeDimX = {grid_x}")),
        ];
        lines.extend(
            LAYOUT_FIELDS
                .iter()
                .zip(params.geometry)
                .map(|(name, value)| HumanLine::Text(format!("{name} = {value}"))),
        );

        if let Err(note) = self.ctx.reset(params.layout, &params.ui_type) {
            lines.push(HumanLine::Note(note));
        }
        Ok(lines)
    }
}

/// Walks a ControlReset payload word by word.
struct PayloadCursor<'a> {
    data: &'a [u16],
    pos: usize,
}

impl<'a> PayloadCursor<'a> {
    fn word(&mut self, field: &'static str) -> Result<u16, PayloadError> {
        let value = *self
            .data
            .get(self.pos)
            .ok_or(PayloadError::Missing { field })?;
        self.pos += 1;
        Ok(value)
    }

    fn non_zero(&mut self, field: &'static str) -> Result<u16, PayloadError> {
        match self.word(field)? {
            0 => Err(PayloadError::Zero { field }),
            value => Ok(value),
        }
    }

    /// A UTF-8 string of one byte per word, terminated by a line feed.
    fn line(&mut self, field: &'static str) -> Result<String, PayloadError> {
        let rest = &self.data[self.pos.min(self.data.len())..];
        let end = rest
            .iter()
            .position(|&w| w == LINE_FEED)
            .ok_or(PayloadError::Unterminated { field })?;
        let bytes = words_to_bytes(&rest[..end])
            .map_err(|value| PayloadError::NotAByte { field, value })?;
        self.pos += end + 1;
        String::from_utf8(bytes).map_err(|_| PayloadError::InvalidUtf8 { field })
    }
}

fn parse_controller_params(data: &[u16]) -> Result<ControllerParams, PayloadError> {
    let mut cursor = PayloadCursor { data, pos: 0 };
    let key_size = cursor.non_zero("keySize")?;
    let val_size = cursor.non_zero("valSize")?;
    let ui_type = cursor.line("uiType")?;
    let challenge_mode = cursor.line("challengeMode")?;
    let grid_x = cursor.non_zero("challengeChallengeDimX")?;
    let mut geometry = [0u16; 17];
    for (slot, name) in geometry.iter_mut().zip(LAYOUT_FIELDS) {
        *slot = cursor.word(name)?;
    }
    Ok(ControllerParams {
        layout: Layout {
            key_size,
            val_size,
            grid_x,
        },
        ui_type,
        challenge_mode,
        geometry,
    })
}

/// Narrow words to bytes, failing on the first word above 255.
fn words_to_bytes(words: &[u16]) -> Result<Vec<u8>, u16> {
    words
        .iter()
        .map(|&w| u8::try_from(w).map_err(|_| w))
        .collect()
}

/// Form data: UTF-8 text with a trailing line feed, one line per field.
fn other_data(data: &[u16]) -> Vec<HumanLine> {
    let mut lines = vec![HumanLine::from("Form data:")];
    let text = words_to_bytes(data)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok());
    match text {
        Some(mut text) => {
            text.pop();
            lines.extend(text.split('\n').map(HumanLine::from));
        }
        None => lines.push(HumanLine::Note(Advisory::InvalidUtf8)),
    }
    lines
}

fn time_sync(data: &[u16]) -> Result<Vec<HumanLine>, PayloadError> {
    let (low, high) = match data {
        [low, high, ..] => (*low, *high),
        _ => {
            return Err(PayloadError::Missing {
                field: "sync time",
            })
        }
    };
    Ok(vec![
        HumanLine::from("Time Sync :"),
        HumanLine::Text(combine_words(low, high).to_string()),
    ])
}
