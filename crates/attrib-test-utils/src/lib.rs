//! Capture-file builders and payload fixtures for attrib development.
//!
//! [`CaptureBuilder`] assembles a whole capture file from
//! [`SectionSpec`]s and [`BufferSpec`]s. Every count and length is derived
//! from the content unless overridden, so tests can state only what they
//! want to corrupt.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use attrib_core::{BufferType, FORMAT_VERSION};

pub use fixtures::{control_reset_payload, grid_session, text_payload, DEFAULT_GEOMETRY};

fn push_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    push_u16(out, value as u16);
    push_u16(out, (value >> 16) as u16);
}

/// Builder for a complete capture file.
#[derive(Clone, Debug)]
pub struct CaptureBuilder {
    version: u16,
    session_id: u16,
    sections: Vec<SectionSpec>,
    declared_sections: Option<u32>,
    trailing: Vec<u8>,
}

impl CaptureBuilder {
    pub fn new() -> Self {
        Self {
            version: FORMAT_VERSION,
            session_id: 1,
            sections: Vec::new(),
            declared_sections: None,
            trailing: Vec::new(),
        }
    }

    pub fn version(mut self, version: u16) -> Self {
        self.version = version;
        self
    }

    pub fn session_id(mut self, session_id: u16) -> Self {
        self.session_id = session_id;
        self
    }

    pub fn section(mut self, section: SectionSpec) -> Self {
        self.sections.push(section);
        self
    }

    /// Override the section count written in the header.
    pub fn declared_sections(mut self, count: u32) -> Self {
        self.declared_sections = Some(count);
        self
    }

    /// Bytes appended after the last section.
    pub fn trailing(mut self, bytes: &[u8]) -> Self {
        self.trailing.extend_from_slice(bytes);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        push_u16(&mut out, self.version);
        push_u16(&mut out, 0);
        push_u16(&mut out, self.session_id);
        let count = self
            .declared_sections
            .unwrap_or(self.sections.len() as u32);
        push_u32(&mut out, count);
        for section in &self.sections {
            section.encode(&mut out);
        }
        out.extend_from_slice(&self.trailing);
        out
    }
}

impl Default for CaptureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One section: registers then buffers.
#[derive(Clone, Debug)]
pub struct SectionSpec {
    version: u16,
    section_id: u16,
    registers: Vec<u16>,
    buffers: Vec<BufferSpec>,
}

impl SectionSpec {
    pub fn new(section_id: u16) -> Self {
        Self {
            version: FORMAT_VERSION,
            section_id,
            registers: Vec::new(),
            buffers: Vec::new(),
        }
    }

    pub fn version(mut self, version: u16) -> Self {
        self.version = version;
        self
    }

    pub fn register(mut self, value: u16) -> Self {
        self.registers.push(value);
        self
    }

    pub fn buffer(mut self, buffer: BufferSpec) -> Self {
        self.buffers.push(buffer);
        self
    }

    pub fn encode(&self, out: &mut Vec<u8>) {
        push_u16(out, self.version);
        push_u16(out, 0);
        push_u16(out, self.section_id);
        push_u32(out, self.registers.len() as u32);
        for &register in &self.registers {
            push_u16(out, register);
        }
        push_u32(out, self.buffers.len() as u32);
        for buffer in &self.buffers {
            buffer.encode(out);
        }
    }

    /// The section alone, as read by the section-stream decoder.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode(&mut out);
        out
    }
}

/// One typed buffer of records, held as raw words.
#[derive(Clone, Debug)]
pub struct BufferSpec {
    tag: u16,
    words: Vec<u16>,
    declared_len: Option<u32>,
}

impl BufferSpec {
    pub fn new(buffer_type: BufferType) -> Self {
        Self::with_tag(buffer_type.tag())
    }

    pub fn with_tag(tag: u16) -> Self {
        Self {
            tag,
            words: Vec::new(),
            declared_len: None,
        }
    }

    pub fn telemetry() -> Self {
        Self::new(BufferType::Telemetry)
    }

    pub fn action() -> Self {
        Self::new(BufferType::Action)
    }

    pub fn event() -> Self {
        Self::new(BufferType::Event)
    }

    pub fn movement(self, timestamp: u32, x: u16, y: u16) -> Self {
        self.words(&[timestamp as u16, (timestamp >> 16) as u16, x, y])
    }

    pub fn click(self, timestamp: u32, x: u16, y: u16, kind: u16, value: u16) -> Self {
        self.words(&[timestamp as u16, (timestamp >> 16) as u16, x, y, kind, value])
    }

    /// An event record whose `dataLen` matches `data`.
    pub fn event_record(self, timestamp: u32, event_type: u16, data: &[u16]) -> Self {
        self.event_with_len(timestamp, event_type, data.len() as u16, data)
    }

    /// An event record with an explicit `dataLen`, which may disagree
    /// with the words actually written.
    pub fn event_with_len(
        self,
        timestamp: u32,
        event_type: u16,
        data_len: u16,
        data: &[u16],
    ) -> Self {
        self.words(&[
            timestamp as u16,
            (timestamp >> 16) as u16,
            7,
            9,
            event_type,
            data_len,
        ])
        .words(data)
    }

    /// Append raw words.
    pub fn words(mut self, words: &[u16]) -> Self {
        self.words.extend_from_slice(words);
        self
    }

    /// Override the length field, in words.
    pub fn declared_len(mut self, words: u32) -> Self {
        self.declared_len = Some(words);
        self
    }

    pub fn encode(&self, out: &mut Vec<u8>) {
        push_u16(out, self.tag);
        push_u32(out, self.declared_len.unwrap_or(self.words.len() as u32));
        for &word in &self.words {
            push_u16(out, word);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_capture_is_ten_bytes() {
        let bytes = CaptureBuilder::new().session_id(0x0102).build();
        assert_eq!(bytes, [1, 0, 0, 0, 2, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn buffer_length_counts_words() {
        let mut out = Vec::new();
        BufferSpec::telemetry().movement(0x0001_0002, 3, 4).encode(&mut out);
        assert_eq!(out, [1, 0, 4, 0, 0, 0, 2, 0, 1, 0, 3, 0, 4, 0]);
    }

    #[test]
    fn section_bytes_include_counts() {
        let bytes = SectionSpec::new(5).register(7).to_bytes();
        assert_eq!(bytes, [1, 0, 0, 0, 5, 0, 1, 0, 0, 0, 7, 0, 0, 0, 0, 0]);
    }
}
