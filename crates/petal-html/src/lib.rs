//! HTML parser for the Petal engine.
//!
//! # Scope
//!
//! This crate implements a tolerant, single-pass tree builder:
//! - **Attribute scanning** - tag name plus a best-effort attribute map
//! - **Tree construction** - an explicit stack of open elements, self-closing
//!   elements, and mismatched-close recovery
//! - **Implicit tags** - the `html > (head?, body)` skeleton is synthesized
//!   whenever the markup leaves it out
//!
//! Parsing never fails. Every recovery is recorded as a [`ParseIssue`] and the
//! tree is always returned.
//!
//! # Not Implemented
//!
//! - Character references (`&amp;` and friends are kept verbatim)
//! - Raw-text elements (`<script>` and `<style>` bodies are parsed as markup)
//! - Any of the WHATWG insertion modes beyond the head/body split

/// Tag-interior scanning into a name and attributes.
pub mod attributes;
/// Tree dumps and text extraction.
pub mod dump;
/// Tree construction.
pub mod parser;

pub use attributes::{ScannedTag, scan_tag};
pub use dump::{print_tree, text_content, tree_to_string};
pub use parser::{HEAD_TAGS, HtmlParser, IssueKind, ParseIssue, SELF_CLOSING_TAGS};

use petal_dom::DomTree;

/// Parse `body` into a tree rooted at `<html>`.
///
/// Shorthand for `HtmlParser::new(body).run()`.
#[must_use]
pub fn parse(body: &str) -> DomTree {
    HtmlParser::new(body).run()
}
