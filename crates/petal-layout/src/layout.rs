//! The layout pass.
//!
//! A depth-first, document-order walk over the tree. Style is a flat value:
//! entering `b`, `i`, `small` or `big` adjusts it and leaving the element
//! applies the inverse adjustment. The walk pushes an exit step beneath each
//! element's children, so the adjustments pair up exactly as nesting does.
//! Words accumulate on a pending line until it is flushed, either
//! because the next word would cross the right margin or because a `br` or
//! the end of a `p` forces a break.

use std::sync::Arc;

use petal_dom::{DomTree, NodeId, NodeType};

use crate::config::LayoutConfig;
use crate::display_list::{DisplayItem, DisplayList};
use crate::font::{DEFAULT_FONT_SIZE, FontCache, FontKey, FontMetrics, FontProvider, Slant, Weight};

/// Baselines sit this many ascents below the line top, and the next line
/// starts this many descents below the baseline.
const LEADING: f32 = 1.25;

/// The inherited (size, weight, slant) triple governing font selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleContext {
    /// Font size in pixels; may drift below zero under deep `small` nesting.
    pub size: i32,
    /// Current weight.
    pub weight: Weight,
    /// Current slant.
    pub slant: Slant,
}

impl StyleContext {
    /// The cache key for this style.
    #[must_use]
    pub const fn font_key(self) -> FontKey {
        FontKey::new(self.size, self.weight, self.slant)
    }
}

impl Default for StyleContext {
    fn default() -> Self {
        Self {
            size: DEFAULT_FONT_SIZE,
            weight: Weight::Normal,
            slant: Slant::Roman,
        }
    }
}

/// A word waiting on the pending line.
struct LineWord<F> {
    x: f32,
    text: String,
    key: FontKey,
    font: Arc<F>,
}

/// One unit of work in the document walk.
enum Step<'t> {
    /// Apply the entry delta of a node and queue its children.
    Enter(NodeId),
    /// Apply the exit delta of the element with this tag.
    Exit(&'t str),
}

/// State of one layout pass.
pub struct DocumentLayout<'a, P: FontProvider> {
    fonts: &'a FontCache<P>,
    config: &'a LayoutConfig,
    display_list: DisplayList,
    cursor_x: f32,
    cursor_y: f32,
    style: StyleContext,
    line: Vec<LineWord<P::Font>>,
}

impl<'a, P: FontProvider> DocumentLayout<'a, P> {
    /// Start a pass with the cursor at the top-left inset.
    #[must_use]
    pub fn new(fonts: &'a FontCache<P>, config: &'a LayoutConfig) -> Self {
        Self {
            fonts,
            config,
            display_list: DisplayList::new(),
            cursor_x: config.hstep,
            cursor_y: config.vstep,
            style: StyleContext::default(),
            line: Vec::new(),
        }
    }

    /// Lay out the subtree at `id`.
    ///
    /// The walk keeps its own stack of enter and exit steps, so every
    /// element's exit delta runs right after its last descendant no matter
    /// how deep the tree is.
    pub fn layout_node(&mut self, tree: &DomTree, id: NodeId) {
        let mut steps = vec![Step::Enter(id)];
        while let Some(step) = steps.pop() {
            match step {
                Step::Exit(tag) => self.close_tag(tag),
                Step::Enter(id) => {
                    let Some(node) = tree.get(id) else {
                        continue;
                    };
                    match &node.node_type {
                        NodeType::Text(text) => self.add_text(text),
                        NodeType::Element(element) => {
                            self.open_tag(&element.tag_name);
                            steps.push(Step::Exit(&element.tag_name));
                            steps.extend(node.children.iter().rev().map(|&child| Step::Enter(child)));
                        }
                    }
                }
            }
        }
    }

    fn open_tag(&mut self, tag: &str) {
        match tag {
            "i" => self.style.slant = Slant::Italic,
            "b" => self.style.weight = Weight::Bold,
            "small" => self.style.size -= 2,
            "big" => self.style.size += 4,
            "br" => self.flush(),
            _ => {}
        }
    }

    fn close_tag(&mut self, tag: &str) {
        match tag {
            "i" => self.style.slant = Slant::Roman,
            "b" => self.style.weight = Weight::Normal,
            "small" => self.style.size += 2,
            "big" => self.style.size -= 4,
            "p" => {
                self.flush();
                self.cursor_y += self.config.vstep;
            }
            _ => {}
        }
    }

    /// Place the whitespace-separated words of `text` in the current style.
    ///
    /// A word that would cross the right margin starts a new line first. A
    /// word wider than the whole line is placed anyway.
    pub fn add_text(&mut self, text: &str) {
        let key = self.style.font_key();
        let font = self.fonts.get(key);
        let space = font.measure(" ");

        for word in text.split_whitespace() {
            let width = font.measure(word);
            if self.cursor_x + width > self.config.right_margin() {
                self.flush();
            }
            self.line.push(LineWord {
                x: self.cursor_x,
                text: word.to_string(),
                key,
                font: Arc::clone(&font),
            });
            self.cursor_x += width + space;
        }
    }

    /// Commit the pending line to the display list.
    ///
    /// Every word on the line shares one baseline, placed `LEADING` times the
    /// tallest ascent below the cursor. Does nothing when the line is empty.
    pub fn flush(&mut self) {
        if self.line.is_empty() {
            return;
        }

        let max_ascent = self
            .line
            .iter()
            .map(|word| word.font.ascent())
            .fold(0.0, f32::max);
        let max_descent = self
            .line
            .iter()
            .map(|word| word.font.descent())
            .fold(0.0, f32::max);
        let baseline = LEADING.mul_add(max_ascent, self.cursor_y);

        for word in self.line.drain(..) {
            self.display_list.push(DisplayItem {
                x: word.x,
                y: baseline - word.font.ascent(),
                text: word.text,
                font: word.key,
            });
        }

        self.cursor_x = self.config.hstep;
        self.cursor_y = LEADING.mul_add(max_descent, baseline);
    }

    /// Current (x, y) cursor.
    #[must_use]
    pub const fn cursor(&self) -> (f32, f32) {
        (self.cursor_x, self.cursor_y)
    }

    /// Current style context.
    #[must_use]
    pub const fn style(&self) -> StyleContext {
        self.style
    }

    /// Items committed so far.
    #[must_use]
    pub const fn display_list(&self) -> &DisplayList {
        &self.display_list
    }

    /// Flush the last line and return the finished display list.
    #[must_use]
    pub fn finish(mut self) -> DisplayList {
        self.flush();
        self.display_list
    }
}

/// Lay out a whole document.
///
/// ```
/// use petal_layout::{ApproximateFontProvider, FontCache, LayoutConfig, layout};
///
/// let tree = petal_html::parse("<p>Hello <b>world</b></p>");
/// let fonts = FontCache::new(ApproximateFontProvider);
/// let list = layout(&tree, &fonts, &LayoutConfig::default());
/// assert_eq!(list.len(), 2);
/// ```
#[must_use]
pub fn layout<P: FontProvider>(
    tree: &DomTree,
    fonts: &FontCache<P>,
    config: &LayoutConfig,
) -> DisplayList {
    let mut engine = DocumentLayout::new(fonts, config);
    if !tree.is_empty() {
        engine.layout_node(tree, tree.root());
    }
    engine.finish()
}
