use petal_dom::{DomTree, NodeId};

/// Tags whose presence before any body content opens `<head>` rather than
/// `<body>`.
pub const HEAD_TAGS: &[&str] = &[
    "base", "basefont", "bgsound", "noscript", "link", "meta", "title", "style", "script",
];

/// One structural repair the tree builder must perform before attaching the
/// pending token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixup {
    /// Synthesize and push an element with this name.
    Open(&'static str),
    /// Pop `<head>` and attach it to `<html>`.
    CloseHead,
}

/// True if `tag` belongs in `<head>`.
#[must_use]
pub fn is_head_tag(tag: &str) -> bool {
    HEAD_TAGS.contains(&tag)
}

/// Decide the next structural repair, if any.
///
/// `tag` is the name about to be processed (closing tags keep their `/`), or
/// `None` for a text run. The caller applies the returned fixup and asks again
/// until this returns `None`.
#[must_use]
pub fn next_fixup(tree: &DomTree, open: &[NodeId], tag: Option<&str>) -> Option<Fixup> {
    // Only stacks of depth two or less can need a repair.
    match *open {
        [] if tag != Some("html") => Some(Fixup::Open("html")),
        [html]
            if is_named(tree, html, "html")
                && !matches!(tag, Some("head" | "body" | "/html")) =>
        {
            if tag.is_some_and(is_head_tag) {
                Some(Fixup::Open("head"))
            } else {
                Some(Fixup::Open("body"))
            }
        }
        [html, head]
            if is_named(tree, html, "html")
                && is_named(tree, head, "head")
                && tag != Some("/head")
                && !tag.is_some_and(is_head_tag) =>
        {
            Some(Fixup::CloseHead)
        }
        _ => None,
    }
}

fn is_named(tree: &DomTree, id: NodeId, name: &str) -> bool {
    tree.tag_name(id) == Some(name)
}
