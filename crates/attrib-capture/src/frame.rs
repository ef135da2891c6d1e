//! Container walking: file header, sections, registers, buffer headers.
//!
//! Counts come from the stream and are never inferred. After each buffer
//! the cursor moves to the buffer's declared end, whatever happened
//! inside it.

use attrib_core::{
    BufferHeader, FatalError, FileHeader, RegisterKind, SectionHeader, WordReader,
};
use tracing::{debug, debug_span, trace, warn};

use crate::decoder::{Decoder, Halt};
use crate::emit::LineSink;

impl<S: LineSink + ?Sized> Decoder<'_, S> {
    /// File header followed by every declared section.
    pub(crate) fn capture(&mut self, reader: &mut WordReader<'_>) -> Result<(), Halt> {
        let version = reader.read_u16()?;
        self.meta(format!("File Format Version:{version}"))?;
        let supported = self.options.supported_version;
        if version != supported {
            return Err(FatalError::VersionMismatch {
                found: version,
                supported,
            }
            .into());
        }
        let _reserved = reader.read_u16()?;

        let session_id = reader.read_u16()?;
        self.meta(format!("Session ID:{session_id}"))?;
        let section_count = reader.read_u32()?;
        self.meta(format!("Section Count:{section_count}"))?;

        let header = FileHeader {
            version,
            session_id,
            section_count,
        };
        debug!(?header, "file header");

        for _ in 0..header.section_count {
            self.section(reader)?;
        }
        Ok(())
    }

    /// One section: header, registers, buffers.
    pub(crate) fn section(&mut self, reader: &mut WordReader<'_>) -> Result<(), Halt> {
        let version = reader.read_u16()?;
        self.meta(format!("Section Format Version:{version}"))?;
        let _reserved = reader.read_u16()?;
        let section_id = reader.read_u16()?;
        self.meta(format!("Section ID:{section_id}"))?;

        let header = SectionHeader {
            version,
            section_id,
        };
        let span = debug_span!("section", id = header.section_id);
        let _guard = span.enter();
        if header.version != self.options.supported_version {
            warn!(version = header.version, "unexpected section format version");
        }

        let register_count = reader.read_u32()?;
        self.meta(format!("Register Count:{register_count}"))?;
        for index in 0..register_count {
            let value = reader.read_u16()?;
            trace!(index, kind = ?RegisterKind::from_index(index as usize), value, "register");
            self.meta(format!("Register({index}):{value}"))?;
        }

        let buffer_count = reader.read_u32()?;
        self.meta(format!("Buffers Count:{buffer_count}"))?;
        for index in 0..buffer_count {
            self.buffer(reader, index)?;
        }

        self.report.sections += 1;
        Ok(())
    }

    fn buffer(&mut self, reader: &mut WordReader<'_>, index: u32) -> Result<(), Halt> {
        let offset = reader.offset();
        self.meta(format!("Buffer({index}) File Offset:{offset:02x}"))?;
        let tag = reader.read_u16()?;
        self.meta(format!("Buffer Type({index}):{tag}"))?;
        let length_words = reader.read_u32()?;
        self.meta(format!("Buffer({index}) Length:{length_words}"))?;

        let header = BufferHeader {
            offset,
            buffer_type: tag.into(),
            length_words,
        };
        debug!(index, buffer_type = ?header.buffer_type, length_words, "buffer");

        let records = reader.window(header.length_bytes());
        self.dispatch(index, &header, records)?;
        reader.skip(header.length_bytes())?;
        self.report.buffers += 1;
        Ok(())
    }
}
