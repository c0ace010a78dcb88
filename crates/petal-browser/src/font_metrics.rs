//! Font metrics backed by fontdue for accurate text measurement during layout.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use std::sync::Arc;

use fontdue::{Font, FontSettings, LineMetrics};
use petal_common::warning::warn_once;
use petal_layout::{ApproximateFont, FontKey, FontMetrics, FontProvider, Slant, Weight};

/// Common system font paths to search for a default (regular) font.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFNS.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// System font paths for bold variants.
const FONT_BOLD_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// System font paths for italic variants.
const FONT_ITALIC_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
    "/Library/Fonts/Arial Italic.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansOblique.ttf",
    // Windows
    "C:\\Windows\\Fonts\\ariali.ttf",
];

/// System font paths for bold-italic variants.
const FONT_BOLD_ITALIC_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Supplemental/Arial Bold Italic.ttf",
    "/Library/Fonts/Arial Bold Italic.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-BoldItalic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBoldOblique.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arialbi.ttf",
];

/// Realizes fonts from the faces installed on this machine.
///
/// Faces are loaded once, up front; realizing a key only pairs a face with a
/// pixel size. A missing variant falls back through bold/italic to regular,
/// and with no regular face at all every key is measured by
/// [`ApproximateFont`].
#[derive(Clone, Default)]
pub struct SystemFontProvider {
    regular: Option<Arc<Font>>,
    bold: Option<Arc<Font>>,
    italic: Option<Arc<Font>>,
    bold_italic: Option<Arc<Font>>,
}

impl SystemFontProvider {
    /// Search the usual system locations for all four variants.
    #[must_use]
    pub fn load() -> Self {
        let provider = Self {
            regular: load_font_from_paths(FONT_SEARCH_PATHS),
            bold: load_font_from_paths(FONT_BOLD_SEARCH_PATHS),
            italic: load_font_from_paths(FONT_ITALIC_SEARCH_PATHS),
            bold_italic: load_font_from_paths(FONT_BOLD_ITALIC_SEARCH_PATHS),
        };

        if provider.regular.is_none() {
            warn_once(
                "Fonts",
                "no system font found; text is measured approximately and not drawn",
            );
        } else {
            for (face, label) in [
                (&provider.bold, "bold"),
                (&provider.italic, "italic"),
                (&provider.bold_italic, "bold-italic"),
            ] {
                if face.is_none() {
                    warn_once("Fonts", &format!("no {label} face found; using a fallback"));
                }
            }
        }

        provider
    }

    /// A provider with no faces: every key is measured approximately.
    #[must_use]
    pub fn without_fonts() -> Self {
        Self::default()
    }

    /// A provider using one face for every variant.
    ///
    /// # Errors
    ///
    /// Returns fontdue's message if `data` is not a usable font file.
    pub fn from_bytes(data: &[u8]) -> Result<Self, &'static str> {
        let face = Arc::new(Font::from_bytes(data, FontSettings::default())?);
        Ok(Self {
            regular: Some(face),
            ..Self::default()
        })
    }

    /// True if at least a regular face was found.
    #[must_use]
    pub const fn has_fonts(&self) -> bool {
        self.regular.is_some()
    }

    /// Select the best available face for the given weight and slant,
    /// falling back through: exact match → partial match → regular.
    fn face(&self, weight: Weight, slant: Slant) -> Option<&Arc<Font>> {
        match (weight, slant) {
            (Weight::Bold, Slant::Italic) => self
                .bold_italic
                .as_ref()
                .or(self.bold.as_ref())
                .or(self.italic.as_ref())
                .or(self.regular.as_ref()),
            (Weight::Bold, Slant::Roman) => self.bold.as_ref().or(self.regular.as_ref()),
            (Weight::Normal, Slant::Italic) => self.italic.as_ref().or(self.regular.as_ref()),
            (Weight::Normal, Slant::Roman) => self.regular.as_ref(),
        }
    }
}

impl FontProvider for SystemFontProvider {
    type Font = FontdueFont;

    fn realize(&self, key: FontKey) -> FontdueFont {
        let size = key.pixel_size();
        let face = self.face(key.weight, key.slant).cloned();
        let line = face.as_ref().and_then(|f| f.horizontal_line_metrics(size));
        FontdueFont {
            face,
            size,
            line,
            fallback: ApproximateFont::new(key),
        }
    }
}

/// A face at one pixel size.
///
/// This implementation queries fontdue for exact per-character advance
/// widths. It uses `Font::metrics()` (not `Font::rasterize()`) to avoid the
/// cost of bitmap generation when only measurements are needed.
pub struct FontdueFont {
    face: Option<Arc<Font>>,
    size: f32,
    line: Option<LineMetrics>,
    fallback: ApproximateFont,
}

impl FontdueFont {
    /// The underlying face, if one was found.
    #[must_use]
    pub fn face(&self) -> Option<&Font> {
        self.face.as_deref()
    }

    /// The realized pixel size.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }
}

impl FontMetrics for FontdueFont {
    fn measure(&self, text: &str) -> f32 {
        let Some(face) = &self.face else {
            return self.fallback.measure(text);
        };
        // Sum per-character advance widths, matching the cursor advancement
        // used in Renderer::draw_word (renderer.rs).
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| face.metrics(ch, self.size).advance_width)
            .sum()
    }

    fn ascent(&self) -> f32 {
        self.line
            .as_ref()
            .map_or_else(|| self.fallback.ascent(), |line| line.ascent)
    }

    fn descent(&self) -> f32 {
        // fontdue reports descent as a negative offset from the baseline.
        self.line
            .as_ref()
            .map_or_else(|| self.fallback.descent(), |line| -line.descent)
    }

    fn linespace(&self) -> f32 {
        self.line
            .as_ref()
            .map_or_else(|| self.fallback.linespace(), |line| line.new_line_size)
    }
}

/// Try to load a font from a list of filesystem paths.
fn load_font_from_paths(paths: &[&str]) -> Option<Arc<Font>> {
    paths.iter().find_map(|path| {
        let data = std::fs::read(path).ok()?;
        Font::from_bytes(data, FontSettings::default())
            .ok()
            .map(Arc::new)
    })
}
