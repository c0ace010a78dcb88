//! HTML parser module for tree construction.

/// The one-pass tree builder.
pub mod builder;
/// Synthesis of missing `html`, `head` and `body` elements.
pub mod implicit;

pub use builder::{HtmlParser, IssueKind, ParseIssue, SELF_CLOSING_TAGS};
pub use implicit::HEAD_TAGS;
