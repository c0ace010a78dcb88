use std::fmt;

use strum_macros::Display;

use petal_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

use super::implicit::{Fixup, next_fixup};
use crate::attributes::{ScannedTag, scan_tag};

/// Tags that never take a matching close. They are attached as leaves and
/// never pushed onto the stack of open elements.
pub const SELF_CLOSING_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements that are closed silently at end of input without an issue.
const STRUCTURAL_TAGS: &[&str] = &["html", "head", "body"];

/// The kind of recovery the parser performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum IssueKind {
    /// `<>` with nothing inside; dropped.
    EmptyTag,
    /// A closing tag popped an element with a different name.
    MismatchedClose,
    /// An element was still open at end of input and closed implicitly.
    UnclosedElement,
    /// A tag interior was cut short by `<` or by end of input.
    UnterminatedTag,
}

/// A recovery performed while building the tree.
///
/// Issues are diagnostics only: the tree is complete either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// What kind of recovery this was.
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
    /// Byte offset into the input of the token that triggered it.
    pub offset: usize,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}: {}", self.kind, self.offset, self.message)
    }
}

/// One-pass tree builder.
///
/// Reads the input one character at a time, accumulating either text or a
/// tag interior, and keeps an explicit stack of still-open elements. Elements
/// are attached to their parent when they are popped, so every element's
/// children are complete by the time it joins the tree.
pub struct HtmlParser<'a> {
    /// Full input text.
    input: &'a str,

    /// Arena holding every node created so far.
    tree: DomTree,

    /// Stack of open elements, outermost first. The bottom entry is always
    /// the root once it exists.
    unfinished: Vec<NodeId>,

    /// Recoveries recorded so far.
    issues: Vec<ParseIssue>,

    /// Byte offset of the token being processed.
    offset: usize,
}

impl<'a> HtmlParser<'a> {
    /// Create a parser over `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            tree: DomTree::new(),
            unfinished: Vec::new(),
            issues: Vec::new(),
            offset: 0,
        }
    }

    /// Parse and return the finished tree.
    #[must_use]
    pub fn run(self) -> DomTree {
        self.run_with_issues().0
    }

    /// Parse and return the finished tree together with every recovery that
    /// was needed to build it.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        let input = self.input;
        let mut buffer = String::new();
        let mut in_tag = false;
        let mut token_start = 0;

        for (i, c) in input.char_indices() {
            match c {
                '<' => {
                    if in_tag {
                        self.offset = token_start;
                        self.issue(
                            IssueKind::UnterminatedTag,
                            format!("`<{buffer}` is not closed by `>`; kept as text"),
                        );
                    }
                    if !buffer.is_empty() {
                        self.offset = token_start;
                        self.add_text(std::mem::take(&mut buffer));
                    }
                    in_tag = true;
                    token_start = i;
                }
                '>' if in_tag => {
                    self.offset = token_start;
                    self.add_tag(&buffer);
                    buffer.clear();
                    in_tag = false;
                    token_start = i + 1;
                }
                _ => buffer.push(c),
            }
        }

        if in_tag {
            self.offset = token_start;
            self.issue(
                IssueKind::UnterminatedTag,
                format!("`<{buffer}` runs to end of input; dropped"),
            );
        } else if !buffer.is_empty() {
            self.offset = token_start;
            self.add_text(buffer);
        }

        self.finish();
        (self.tree, self.issues)
    }

    /// Attach a run of text to the current element.
    ///
    /// Whitespace-only runs never produce a node.
    fn add_text(&mut self, text: String) {
        if text.chars().all(char::is_whitespace) {
            return;
        }
        self.implicit_tags(None);
        let Some(&parent) = self.unfinished.last() else {
            return;
        };
        let node = self.tree.alloc(NodeType::Text(text), Some(parent));
        self.tree.append_child(parent, node);
    }

    /// Handle one tag interior (the text between `<` and `>`).
    fn add_tag(&mut self, interior: &str) {
        let ScannedTag { name, attrs } = scan_tag(interior);

        if name.is_empty() {
            self.issue(IssueKind::EmptyTag, "empty tag `<>` ignored".to_string());
            return;
        }

        // Comments and doctypes.
        if name.starts_with('!') {
            return;
        }

        self.implicit_tags(Some(name.as_str()));

        if let Some(closing) = name.strip_prefix('/') {
            self.close_element(closing);
        } else if SELF_CLOSING_TAGS.contains(&name.as_str()) {
            let Some(&parent) = self.unfinished.last() else {
                return;
            };
            let node = self.tree.alloc(
                NodeType::Element(ElementData::new(name, attrs)),
                Some(parent),
            );
            self.tree.append_child(parent, node);
        } else {
            self.open_element(name, attrs);
        }
    }

    /// Pop the current element for a `</name>` tag.
    ///
    /// The root is never popped, so a `</html>` leaves it open until the end
    /// of input. The name is only used for diagnostics: the top of the stack
    /// is closed whatever it is called.
    fn close_element(&mut self, name: &str) {
        let Some(node) = self.pop_into_parent() else {
            return;
        };
        let open = self.tree.tag_name(node).unwrap_or_default();
        if open != name {
            let message = format!("`</{name}>` closed `<{open}>`");
            self.issue(IssueKind::MismatchedClose, message);
        }
    }

    /// Create an element under the current top (or as the root when the
    /// stack is empty) and push it.
    fn open_element(&mut self, name: String, attrs: AttributesMap) {
        let parent = self.unfinished.last().copied();
        let node = self
            .tree
            .alloc(NodeType::Element(ElementData::new(name, attrs)), parent);
        self.unfinished.push(node);
    }

    /// Pop the top element and append it to the element below it.
    ///
    /// Returns `None` without touching the stack when only the root is open.
    fn pop_into_parent(&mut self) -> Option<NodeId> {
        if self.unfinished.len() <= 1 {
            return None;
        }
        let node = self.unfinished.pop()?;
        let &parent = self.unfinished.last()?;
        self.tree.append_child(parent, node);
        Some(node)
    }

    /// Insert whatever `html`, `head` or `body` elements the markup left
    /// out, re-checking until the stack is in shape for `tag`.
    fn implicit_tags(&mut self, tag: Option<&str>) {
        while let Some(fixup) = next_fixup(&self.tree, &self.unfinished, tag) {
            match fixup {
                Fixup::Open(name) => self.open_element(name.to_string(), AttributesMap::new()),
                Fixup::CloseHead => {
                    let _ = self.pop_into_parent();
                }
            }
        }
    }

    /// Close everything still open and make sure a root exists.
    fn finish(&mut self) {
        if self.unfinished.is_empty() {
            self.open_element("html".to_string(), AttributesMap::new());
        }

        self.offset = self.input.len();
        while let Some(node) = self.pop_into_parent() {
            let tag = self.tree.tag_name(node).unwrap_or_default().to_string();
            if !STRUCTURAL_TAGS.contains(&tag.as_str()) {
                self.issue(
                    IssueKind::UnclosedElement,
                    format!("`<{tag}>` still open at end of input; closed"),
                );
            }
        }
    }

    fn issue(&mut self, kind: IssueKind, message: String) {
        self.issues.push(ParseIssue {
            kind,
            message,
            offset: self.offset,
        });
    }
}
