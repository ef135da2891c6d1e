//! Decode options.

use attrib_core::FORMAT_VERSION;
use thiserror::Error;

/// Errors detected by [`DecodeOptions::validate`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// Version 0 is never written by the capture client.
    #[error("supported_version must be non-zero")]
    ZeroVersion,
}

/// What a decode run emits and accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// File format version accepted in the file header.
    pub supported_version: u16,
    /// Interpret event payloads into `<Human>` lines. When off, events
    /// are emitted as raw `<Event>`/`<Data>` lines only and unknown event
    /// types are not fatal.
    pub interpret_events: bool,
    /// Emit `<Human>` lines describing movements and clicks.
    pub human_lines: bool,
}

impl DecodeOptions {
    /// Raw record output, as produced by the section-stream decoder.
    pub fn raw() -> Self {
        Self {
            interpret_events: false,
            human_lines: false,
            ..Self::default()
        }
    }

    /// Set the accepted file format version.
    pub fn with_supported_version(mut self, version: u16) -> Self {
        self.supported_version = version;
        self
    }

    /// Enable or disable event interpretation.
    pub fn with_interpret_events(mut self, enabled: bool) -> Self {
        self.interpret_events = enabled;
        self
    }

    /// Enable or disable movement and click descriptions.
    pub fn with_human_lines(mut self, enabled: bool) -> Self {
        self.human_lines = enabled;
        self
    }

    /// Check the options for internal consistency.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.supported_version == 0 {
            return Err(OptionsError::ZeroVersion);
        }
        Ok(())
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            supported_version: FORMAT_VERSION,
            interpret_events: true,
            human_lines: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_interpret_everything() {
        let opts = DecodeOptions::default();
        assert_eq!(opts.supported_version, 1);
        assert!(opts.interpret_events);
        assert!(opts.human_lines);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn raw_keeps_version() {
        let opts = DecodeOptions::raw();
        assert_eq!(opts.supported_version, FORMAT_VERSION);
        assert!(!opts.interpret_events);
        assert!(!opts.human_lines);
    }

    #[test]
    fn zero_version_rejected() {
        let opts = DecodeOptions::default().with_supported_version(0);
        assert_eq!(opts.validate(), Err(OptionsError::ZeroVersion));
    }
}
