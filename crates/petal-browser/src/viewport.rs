//! The visible window onto a laid-out page.

use petal_layout::{DisplayItem, DisplayList, FontCache, FontMetrics, FontProvider, LayoutConfig};

/// A vertical scroll offset and a visible height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scroll: f32,
    height: f32,
    step: f32,
}

impl Viewport {
    /// A viewport at the top of the page, sized and stepped per `config`.
    #[must_use]
    pub const fn new(config: &LayoutConfig) -> Self {
        Self {
            scroll: 0.0,
            height: config.height,
            step: config.scroll_step,
        }
    }

    /// Current scroll offset from the top of the page.
    #[must_use]
    pub const fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Visible height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Move one step down the page.
    pub fn scroll_down(&mut self) {
        self.scroll += self.step;
    }

    /// Move one step up the page, stopping at the top.
    pub fn scroll_up(&mut self) {
        self.scroll = (self.scroll - self.step).max(0.0);
    }

    /// Jump to an absolute offset, clamped at the top.
    pub fn scroll_to(&mut self, offset: f32) {
        self.scroll = offset.max(0.0);
    }

    /// Convert a page y coordinate to a screen y coordinate.
    #[must_use]
    pub fn to_screen(&self, y: f32) -> f32 {
        y - self.scroll
    }

    /// Items that overlap the viewport, in display-list order.
    ///
    /// An item is skipped when its top is below the bottom edge, or when its
    /// top plus its font's line spacing is still above the top edge.
    #[must_use]
    pub fn visible<'a, P: FontProvider>(
        &self,
        list: &'a DisplayList,
        fonts: &FontCache<P>,
    ) -> Vec<&'a DisplayItem> {
        list.iter()
            .filter(|item| {
                if item.y > self.scroll + self.height {
                    return false;
                }
                let linespace = fonts.get(item.font).linespace();
                item.y + linespace >= self.scroll
            })
            .collect()
    }
}
