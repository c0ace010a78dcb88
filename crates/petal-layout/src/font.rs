//! Font keys, metrics and the font cache.
//!
//! Layout never talks to a font library directly. It asks a [`FontCache`] for
//! the font matching the current style, and the cache asks its
//! [`FontProvider`] only the first time a key is seen.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Size of body text in pixels.
pub const DEFAULT_FONT_SIZE: i32 = 16;

/// Smallest size a provider will actually realize. Repeated `<small>` can
/// push a key below this; the key keeps the raw value.
pub const MIN_FONT_SIZE: i32 = 1;

/// Stroke weight.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Weight {
    /// Regular strokes.
    #[default]
    Normal,
    /// Heavy strokes.
    Bold,
}

/// Upright or slanted glyphs.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Slant {
    /// Upright glyphs.
    #[default]
    Roman,
    /// Slanted glyphs.
    Italic,
}

/// The (size, weight, slant) triple that identifies a realized font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontKey {
    /// Size in pixels, unclamped.
    pub size: i32,
    /// Stroke weight.
    pub weight: Weight,
    /// Slant.
    pub slant: Slant,
}

impl FontKey {
    /// Build a key from its parts.
    #[must_use]
    pub const fn new(size: i32, weight: Weight, slant: Slant) -> Self {
        Self {
            size,
            weight,
            slant,
        }
    }

    /// The size a provider should realize, clamped to [`MIN_FONT_SIZE`].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pixel_size(&self) -> f32 {
        self.size.max(MIN_FONT_SIZE) as f32
    }
}

impl Default for FontKey {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_SIZE, Weight::Normal, Slant::Roman)
    }
}

/// Measurements a realized font offers to layout.
///
/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// "CSS assumes that every font has font metrics that specify a
/// characteristic height above the baseline and a depth below it."
pub trait FontMetrics {
    /// Advance width of `text` rendered in this font.
    fn measure(&self, text: &str) -> f32;

    /// Height above the baseline, positive.
    fn ascent(&self) -> f32;

    /// Depth below the baseline, positive.
    fn descent(&self) -> f32;

    /// Distance between consecutive baselines when set solid.
    fn linespace(&self) -> f32 {
        self.ascent() + self.descent()
    }
}

/// Builds fonts for keys the cache has not seen yet.
pub trait FontProvider {
    /// The realized font handle.
    type Font: FontMetrics;

    /// Realize the font for `key`. Called at most once per key per cache.
    fn realize(&self, key: FontKey) -> Self::Font;
}

/// Memoizing map from [`FontKey`] to a shared font handle.
///
/// Entries are never evicted. The map sits behind a mutex, and realization
/// happens while it is held, so a cache shared between threads still builds
/// each font exactly once.
pub struct FontCache<P: FontProvider> {
    provider: P,
    fonts: Mutex<HashMap<FontKey, Arc<P::Font>>>,
}

impl<P: FontProvider> FontCache<P> {
    /// Create an empty cache over `provider`.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            fonts: Mutex::new(HashMap::new()),
        }
    }

    /// The font for `key`, realizing it on first use.
    ///
    /// Repeated calls with the same key return the same handle.
    pub fn get(&self, key: FontKey) -> Arc<P::Font> {
        let mut fonts = self.fonts.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            fonts
                .entry(key)
                .or_insert_with(|| Arc::new(self.provider.realize(key))),
        )
    }

    /// Number of fonts realized so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fonts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True before any font has been realized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The provider fonts are realized from.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }
}

/// Approximate font metrics using fixed ratios.
///
/// Implementation note: Without access to actual font data, we use fixed
/// ratio approximations. Every glyph advances half the font size (five
/// eighths when bold); ascent and descent split the size 3:1. The ratios are
/// exact in binary so positions computed from them are exact too.
///
/// This is used as a fallback when no system font is available, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontProvider;

/// A font realized by [`ApproximateFontProvider`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximateFont {
    size: f32,
    advance_ratio: f32,
}

impl ApproximateFont {
    const ADVANCE_RATIO: f32 = 0.5;
    const BOLD_ADVANCE_RATIO: f32 = 0.625;
    const ASCENT_RATIO: f32 = 0.75;
    const DESCENT_RATIO: f32 = 0.25;

    /// Realize the approximation for `key`.
    #[must_use]
    pub fn new(key: FontKey) -> Self {
        let advance_ratio = match key.weight {
            Weight::Normal => Self::ADVANCE_RATIO,
            Weight::Bold => Self::BOLD_ADVANCE_RATIO,
        };
        Self {
            size: key.pixel_size(),
            advance_ratio,
        }
    }
}

impl FontMetrics for ApproximateFont {
    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, text: &str) -> f32 {
        let glyphs = text.chars().filter(|ch| !ch.is_control()).count();
        glyphs as f32 * self.size * self.advance_ratio
    }

    fn ascent(&self) -> f32 {
        self.size * Self::ASCENT_RATIO
    }

    fn descent(&self) -> f32 {
        self.size * Self::DESCENT_RATIO
    }
}

impl FontProvider for ApproximateFontProvider {
    type Font = ApproximateFont;

    fn realize(&self, key: FontKey) -> ApproximateFont {
        ApproximateFont::new(key)
    }
}
