//! Text layout for the Petal engine.
//!
//! # Scope
//!
//! This crate turns a parsed [`petal_dom::DomTree`] into a [`DisplayList`]:
//! - **Style context** - size, weight and slant inherited down the tree and
//!   adjusted by `b`, `i`, `small` and `big`
//! - **Line breaking** - greedy word wrapping against the right margin, with
//!   forced breaks at `br` and paragraph gaps after `p`
//! - **Vertical metrics** - each line is aligned on a shared baseline derived
//!   from the tallest font on it
//! - **Font cache** - realized fonts memoized by (size, weight, slant)
//!
//! Layout never fails: unknown tags carry no style and words too wide for a
//! line are still placed.

pub mod config;
pub mod display_list;
pub mod font;
pub mod layout;

pub use config::LayoutConfig;
pub use display_list::{DisplayItem, DisplayList};
pub use font::{
    ApproximateFont, ApproximateFontProvider, DEFAULT_FONT_SIZE, FontCache, FontKey, FontMetrics,
    FontProvider, Slant, Weight,
};
pub use layout::{DocumentLayout, StyleContext, layout};
