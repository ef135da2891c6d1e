//! Per-file decode state set by ControlReset and read by later events.
//!
//! A [`DecodeContext`] lives for exactly one file decode. It starts
//! [`Unconfigured`](ContextState::Unconfigured); grid-dependent events
//! check the state explicitly and report an advisory instead of indexing
//! into tables that do not exist yet.

use smallvec::SmallVec;
use tracing::debug;

use crate::error::Advisory;
use crate::grid::GridFormatter;
use crate::vocab::{Vocabulary, VocabularyRegistry};

/// One digit's attribute indices, one per key.
pub type Attributes = SmallVec<[u16; 4]>;

/// Dimensions announced by a ControlReset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Attribute keys per digit.
    pub key_size: u16,
    /// Values per key, sentinel excluded.
    pub val_size: u16,
    /// Challenge grid columns.
    pub grid_x: u16,
}

/// A layout paired with a vocabulary that covers it.
#[derive(Clone, Debug)]
pub struct Configuration {
    layout: Layout,
    vocabulary: Vocabulary,
    cell_width: usize,
}

impl Configuration {
    /// The active layout.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The active vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Grid column width, computed once when the configuration was made.
    pub fn cell_width(&self) -> usize {
        self.cell_width
    }

    /// A grid formatter over this configuration.
    pub fn formatter(&self) -> GridFormatter<'_> {
        GridFormatter::new(
            &self.vocabulary,
            self.layout.key_size as usize,
            self.cell_width,
        )
    }
}

/// Whether grid-dependent events can be interpreted.
#[derive(Clone, Debug, Default)]
pub enum ContextState {
    /// No ControlReset seen yet.
    #[default]
    Unconfigured,
    /// The last ControlReset named a vocabulary that was missing or did not
    /// cover its layout. Grid events stay uninterpretable.
    LayoutOnly(Layout),
    /// Ready.
    Configured(Configuration),
}

/// Mutable interpretation state for one capture file.
#[derive(Clone, Debug)]
pub struct DecodeContext {
    registry: VocabularyRegistry,
    state: ContextState,
    challenge: Vec<Attributes>,
}

impl DecodeContext {
    /// A fresh, unconfigured context over the built-in vocabularies.
    pub fn new() -> Self {
        Self::with_registry(VocabularyRegistry::builtin())
    }

    /// A fresh, unconfigured context over a custom registry.
    pub fn with_registry(registry: VocabularyRegistry) -> Self {
        Self {
            registry,
            state: ContextState::Unconfigured,
            challenge: Vec::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &ContextState {
        &self.state
    }

    /// `true` once a ControlReset selected a usable vocabulary.
    pub fn is_configured(&self) -> bool {
        matches!(self.state, ContextState::Configured(_))
    }

    /// The active configuration, or [`Advisory::Unconfigured`].
    pub fn configuration(&self) -> Result<&Configuration, Advisory> {
        match &self.state {
            ContextState::Configured(config) => Ok(config),
            ContextState::Unconfigured | ContextState::LayoutOnly(_) => {
                Err(Advisory::Unconfigured)
            }
        }
    }

    /// Apply a ControlReset.
    ///
    /// The layout always takes effect and the challenge lookup is cleared.
    /// If `ui_type` has no vocabulary, or its vocabulary cannot address the
    /// layout, the context drops to [`ContextState::LayoutOnly`] and the
    /// reason is returned for the caller to report.
    pub fn reset(&mut self, layout: Layout, ui_type: &str) -> Result<(), Advisory> {
        self.challenge.clear();

        let Some(vocabulary) = self.registry.get(ui_type) else {
            debug!(ui_type, "no vocabulary for uiType");
            self.state = ContextState::LayoutOnly(layout);
            return Err(Advisory::UnknownUiType {
                ui_type: ui_type.to_string(),
            });
        };
        if !vocabulary.covers(layout.key_size, layout.val_size) {
            debug!(ui_type, ?layout, "vocabulary does not cover layout");
            self.state = ContextState::LayoutOnly(layout);
            return Err(Advisory::IncompatibleVocabulary {
                ui_type: ui_type.to_string(),
                key_size: layout.key_size,
                val_size: layout.val_size,
            });
        }

        let cell_width = vocabulary.cell_width(layout.key_size, layout.val_size);
        debug!(ui_type, ?layout, cell_width, "decode context configured");
        self.state = ContextState::Configured(Configuration {
            layout,
            vocabulary: vocabulary.clone(),
            cell_width,
        });
        Ok(())
    }

    /// Replace the challenge lookup with `cells` split into `key_size`
    /// tuples, digit 0 first. A trailing partial tuple is dropped.
    pub fn store_challenge(&mut self, cells: &[u16], key_size: usize) {
        self.challenge = if key_size == 0 {
            Vec::new()
        } else {
            cells
                .chunks_exact(key_size)
                .map(Attributes::from_slice)
                .collect()
        };
    }

    /// Attribute tuple for `digit` of the current challenge.
    pub fn challenge_digit(&self, digit: u16) -> Option<&Attributes> {
        self.challenge.get(digit as usize)
    }

    /// Number of digits in the current challenge.
    pub fn challenge_len(&self) -> usize {
        self.challenge.len()
    }
}

impl Default for DecodeContext {
    fn default() -> Self {
        Self::new()
    }
}
