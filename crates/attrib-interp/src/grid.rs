//! Bordered text grid for attribute vectors.
//!
//! A grid has `columns` digits per visual row. Each visual row is drawn as
//! `key_size` stacked sub-rows, one per attribute key, framed by rule
//! lines:
//!
//! ```text
//!  -------
//! |Hrect  |
//! |yellow |
//! |magenta|
//!  -------
//! ```
//!
//! Rules between visual rows are closed with `|` at both ends; the outer
//! rules are open. A short final row stops at its last digit instead of
//! padding with blank cells.

use std::fmt::Write;

use thiserror::Error;

use crate::vocab::Vocabulary;

/// Cell separator.
pub const V_DELIMITER: char = '|';
/// Rule character.
pub const H_DELIMITER: char = '-';

/// Why a grid could not be rendered.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Zero digits per row.
    #[error("Grid has no columns.")]
    NoColumns,
    /// The cell count does not split into whole attribute tuples.
    #[error("Grid of {len} cells does not split into tuples of {key_size}.")]
    Ragged {
        /// Number of cells.
        len: usize,
        /// Tuple size.
        key_size: usize,
    },
    /// A cell indexes past its key's labels.
    #[error("Attribute value {value} is outside the {key} vocabulary.")]
    ValueOutOfRange {
        /// Key name.
        key: String,
        /// The offending value.
        value: u16,
    },
}

/// Renders attribute grids against one vocabulary.
#[derive(Clone, Copy, Debug)]
pub struct GridFormatter<'a> {
    vocabulary: &'a Vocabulary,
    key_size: usize,
    cell_width: usize,
}

impl<'a> GridFormatter<'a> {
    /// A formatter for `key_size`-tuples padded to `cell_width`.
    pub fn new(vocabulary: &'a Vocabulary, key_size: usize, cell_width: usize) -> Self {
        Self {
            vocabulary,
            key_size,
            cell_width,
        }
    }

    /// Width in characters of a full row of `columns` cells, delimiters
    /// included.
    pub fn row_width(&self, columns: usize) -> usize {
        self.cell_width * columns + columns + 1
    }

    /// Render `cells` (row-major digits, `key_size` values each) with
    /// `columns` digits per visual row. Returns one string per output line.
    pub fn render(&self, cells: &[u16], columns: usize) -> Result<Vec<String>, GridError> {
        if columns == 0 {
            return Err(GridError::NoColumns);
        }
        if self.key_size == 0 || cells.len() % self.key_size != 0 {
            return Err(GridError::Ragged {
                len: cells.len(),
                key_size: self.key_size,
            });
        }

        let labels = cells
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let key = i % self.key_size;
                self.vocabulary
                    .label(key, value)
                    .ok_or_else(|| GridError::ValueOutOfRange {
                        key: self.vocabulary.key_name(key).unwrap_or("?").to_string(),
                        value,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let digits = cells.len() / self.key_size;
        let rows = digits.div_ceil(columns);
        let width = self.row_width(columns);
        let dashes: String = std::iter::repeat_n(H_DELIMITER, width - 2).collect();
        let outer = format!(" {dashes}");
        let inner = format!("{V_DELIMITER}{dashes}{V_DELIMITER}");

        let mut lines = Vec::with_capacity(rows * (self.key_size + 1) + 2);
        lines.push(outer.clone());
        for row in 0..rows {
            let first = row * columns;
            let last = (first + columns).min(digits);
            for key in 0..self.key_size {
                let mut line = String::with_capacity(width);
                line.push(V_DELIMITER);
                for digit in first..last {
                    let label = labels[digit * self.key_size + key];
                    let _ = write!(line, "{label:<w$}{V_DELIMITER}", w = self.cell_width);
                }
                lines.push(line);
            }
            if row + 1 < rows {
                lines.push(inner.clone());
            }
        }
        lines.push(outer);
        Ok(lines)
    }
}
