//! Deduplicated colour table shared by all file structures.

use crate::error::{to_u32, Result};
use crate::types::RgbaColor;

/// Insertion-ordered list of distinct colours.
///
/// The position of a colour is its index in the globals colour and style
/// tables. Indices are never reassigned.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    colours: Vec<RgbaColor>,
}

impl Palette {
    /// Create an empty palette
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index of `colour`, appending it if it is not present.
    ///
    /// Lookup is a linear scan with exact equality.
    pub fn intern(&mut self, colour: RgbaColor) -> Result<u32> {
        if let Some(index) = self.find(&colour) {
            return Ok(index);
        }
        let index = to_u32(self.colours.len(), "palette index")?;
        self.colours.push(colour);
        Ok(index)
    }

    /// Index of an existing colour
    pub fn find(&self, colour: &RgbaColor) -> Option<u32> {
        self.colours
            .iter()
            .position(|c| c == colour)
            .and_then(|i| u32::try_from(i).ok())
    }

    /// Colour at `index`
    pub fn get(&self, index: u32) -> Option<&RgbaColor> {
        self.colours.get(index as usize)
    }

    /// Number of distinct colours
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Whether no colour has been interned
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Iterate in index order
    pub fn iter(&self) -> impl Iterator<Item = &RgbaColor> {
        self.colours.iter()
    }
}
