//! Display List - positioned words ready for drawing.
//!
//! The display list is the output of layout. Items are stored in document
//! order, which is also top-to-bottom, left-to-right order.

use serde::Serialize;

use crate::font::FontKey;

/// One word placed on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayItem {
    /// Left edge of the word.
    pub x: f32,
    /// Top edge of the word (its baseline minus its font's ascent).
    pub y: f32,
    /// The word itself, never containing whitespace.
    pub text: String,
    /// The font the word was measured with.
    pub font: FontKey,
}

/// The ordered output of a layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DisplayList {
    items: Vec<DisplayItem>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub(crate) fn push(&mut self, item: DisplayItem) {
        self.items.push(item);
    }

    /// All items in document order.
    #[must_use]
    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    /// Iterate over the items in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, DisplayItem> {
        self.items.iter()
    }

    /// Number of placed words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if nothing was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bottom edge of the lowest item according to `line_height`, or 0.0 for
    /// an empty list.
    pub fn content_height(&self, mut line_height: impl FnMut(FontKey) -> f32) -> f32 {
        self.items
            .iter()
            .map(|item| item.y + line_height(item.font))
            .fold(0.0, f32::max)
    }

    /// Consume the list and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<DisplayItem> {
        self.items
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DisplayItem;
    type IntoIter = std::slice::Iter<'a, DisplayItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
