//! Closed enumerations for the integer tags carried on the wire.
//!
//! Each enum has one variant per known tag plus an `Unknown` catch-all
//! holding the raw value, so an unrecognized tag survives decoding and is
//! handled by an exhaustive `match` at the point where it matters.

use std::fmt;

/// Type of a buffer's record stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferType {
    /// Pointer-movement samples (4 words per record).
    Telemetry,
    /// Discrete clicks (6 words per record).
    Action,
    /// Variable-length semantic events (`6 + dataLen` words per record).
    Event,
    /// A tag this decoder does not know how to step over.
    Unknown(u16),
}

impl BufferType {
    /// Raw wire value.
    pub fn tag(self) -> u16 {
        match self {
            Self::Telemetry => 1,
            Self::Action => 2,
            Self::Event => 3,
            Self::Unknown(tag) => tag,
        }
    }
}

impl From<u16> for BufferType {
    fn from(tag: u16) -> Self {
        match tag {
            1 => Self::Telemetry,
            2 => Self::Action,
            3 => Self::Event,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for BufferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Kind of a click recorded in an Action buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// The client flagged the click as an error; `value` carries detail.
    Error,
    /// A challenge digit was clicked; `value` is the zero-based digit.
    Digit,
    /// Any other click on the page.
    Other,
    /// Unrecognized kind. Reported, never fatal.
    Unknown(u16),
}

impl ActionKind {
    /// Raw wire value.
    pub fn tag(self) -> u16 {
        match self {
            Self::Error => 0,
            Self::Digit => 1,
            Self::Other => 2,
            Self::Unknown(tag) => tag,
        }
    }
}

impl From<u16> for ActionKind {
    fn from(tag: u16) -> Self {
        match tag {
            0 => Self::Error,
            1 => Self::Digit,
            2 => Self::Other,
            other => Self::Unknown(other),
        }
    }
}

/// Type of an Event record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Client-side error.
    Error,
    /// A secret was generated. Payload: validity flag, then `key * valSize + val` per digit.
    NewSecret,
    /// A challenge was shown. Payload: one attribute index per (digit, key) cell.
    NewChallenge,
    /// A response was submitted. Payload: correctness flag, then digit indices.
    Submit,
    /// The response entry was cleared.
    ResponseClear,
    /// Recording started.
    Activation,
    /// Recording stopped.
    Deactivation,
    /// Recording state toggled (cross-references the two clock domains).
    ActivationChange,
    /// Free-form form data, one UTF-8 byte per word.
    OtherData,
    /// External clock sample, two words low-first.
    TimeSync,
    /// Controller parameters; configures every grid-dependent event after it.
    ControlReset,
    /// A tag outside the enumeration.
    Unknown(u16),
}

impl EventType {
    /// Raw wire value.
    pub fn tag(self) -> u16 {
        match self {
            Self::Error => 0,
            Self::NewSecret => 11,
            Self::NewChallenge => 12,
            Self::Submit => 13,
            Self::ResponseClear => 14,
            Self::Activation => 42,
            Self::Deactivation => 43,
            Self::ActivationChange => 44,
            Self::OtherData => 45,
            Self::TimeSync => 46,
            Self::ControlReset => 47,
            Self::Unknown(tag) => tag,
        }
    }
}

impl From<u16> for EventType {
    fn from(tag: u16) -> Self {
        match tag {
            0 => Self::Error,
            11 => Self::NewSecret,
            12 => Self::NewChallenge,
            13 => Self::Submit,
            14 => Self::ResponseClear,
            42 => Self::Activation,
            43 => Self::Deactivation,
            44 => Self::ActivationChange,
            45 => Self::OtherData,
            46 => Self::TimeSync,
            47 => Self::ControlReset,
            other => Self::Unknown(other),
        }
    }
}

/// Meaning of a section register by index.
///
/// Registers are reported by index only; this names the slots the
/// session manager fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegisterKind {
    /// Total submissions.
    Total,
    /// Correct submissions.
    Ack,
    /// Current run of correct submissions.
    AckRun,
    /// Incorrect submissions.
    Nak,
    /// Current run of incorrect submissions.
    NakRun,
}

impl RegisterKind {
    /// Register kind stored at `index`, if the session manager defines one.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Total),
            1 => Some(Self::Ack),
            2 => Some(Self::AckRun),
            3 => Some(Self::Nak),
            4 => Some(Self::NakRun),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_tags_map_both_ways() {
        for tag in [0u16, 11, 12, 13, 14, 42, 43, 44, 45, 46, 47] {
            let ty = EventType::from(tag);
            assert!(!matches!(ty, EventType::Unknown(_)), "tag {tag}");
            assert_eq!(ty.tag(), tag);
        }
    }

    #[test]
    fn unknown_tags_keep_raw_value() {
        assert_eq!(EventType::from(15), EventType::Unknown(15));
        assert_eq!(BufferType::from(0), BufferType::Unknown(0));
        assert_eq!(BufferType::from(4).tag(), 4);
        assert_eq!(ActionKind::from(9), ActionKind::Unknown(9));
    }

    #[test]
    fn register_slots() {
        assert_eq!(RegisterKind::from_index(3), Some(RegisterKind::Nak));
        assert_eq!(RegisterKind::from_index(5), None);
    }
}
