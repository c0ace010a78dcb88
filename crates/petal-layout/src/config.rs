//! Page geometry shared by layout and the viewport.

use serde::{Deserialize, Serialize};

/// Page width used when nothing else is configured.
pub const DEFAULT_WIDTH: f32 = 800.0;
/// Viewport height used when nothing else is configured.
pub const DEFAULT_HEIGHT: f32 = 600.0;
/// Horizontal inset on both sides of every line.
pub const DEFAULT_HSTEP: f32 = 13.0;
/// Top inset, and the extra gap after each paragraph.
pub const DEFAULT_VSTEP: f32 = 18.0;
/// Distance one scroll moves the viewport.
pub const DEFAULT_SCROLL_STEP: f32 = 100.0;

/// Page geometry in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Page width. Lines break before `width - hstep`.
    pub width: f32,
    /// Viewport height (read by the viewport, not by layout).
    pub height: f32,
    /// Left inset where every line starts, also used as the right inset.
    pub hstep: f32,
    /// Initial vertical cursor and paragraph gap.
    pub vstep: f32,
    /// Viewport scroll distance (read by the viewport, not by layout).
    pub scroll_step: f32,
}

impl LayoutConfig {
    /// Default geometry with a different page size.
    #[must_use]
    pub fn with_size(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// The x coordinate no word may cross unless it is alone on its line.
    #[must_use]
    pub fn right_margin(&self) -> f32 {
        self.width - self.hstep
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            hstep: DEFAULT_HSTEP,
            vstep: DEFAULT_VSTEP,
            scroll_step: DEFAULT_SCROLL_STEP,
        }
    }
}
