//! Software renderer for headless screenshot generation.
//!
//! Draws the visible part of a `DisplayList` to a pixel buffer using fontdue
//! for glyph rasterization.
//!
//! # Architecture
//!
//! The renderer is the final stage in the pipeline:
//!
//! ```text
//! Parse → Layout → Render
//!           ↓        ↓
//!     DisplayList → Pixels
//! ```
//!
//! The renderer knows nothing about the tree or layout. It places each word
//! at its (x, y) minus the viewport's scroll offset.

use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageBuffer, Rgba, RgbaImage};
use petal_layout::{DisplayList, FontCache, FontMetrics};

use crate::font_metrics::{FontdueFont, SystemFontProvider};
use crate::viewport::Viewport;

/// Page background.
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Text color.
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Software renderer that draws a display list to a pixel buffer.
pub struct Renderer {
    /// RGBA pixel buffer
    buffer: RgbaImage,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
}

impl Renderer {
    /// Create a renderer with a white canvas of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: ImageBuffer::from_pixel(width, height, WHITE),
            width,
            height,
        }
    }

    /// Draw every item the viewport can see.
    ///
    /// Words whose font has no face (no system font was found) are skipped.
    pub fn render(
        &mut self,
        display_list: &DisplayList,
        viewport: &Viewport,
        fonts: &FontCache<SystemFontProvider>,
    ) {
        for item in viewport.visible(display_list, fonts) {
            let font = fonts.get(item.font);
            self.draw_word(&item.text, item.x, viewport.to_screen(item.y), &font);
        }
    }

    /// Draw one word whose top-left corner is at (x, top).
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    fn draw_word(&mut self, text: &str, x: f32, top: f32, font: &FontdueFont) {
        let Some(face) = font.face() else {
            return;
        };

        let baseline = (top + font.ascent()) as i32;
        let mut cursor_x = x;

        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let (metrics, bitmap) = face.rasterize(ch, font.size());

            // fontdue gives the bitmap's offset from the pen position, with
            // ymin measured upwards from the baseline.
            let glyph_x = cursor_x as i32 + metrics.xmin;
            let glyph_y = baseline - metrics.ymin - metrics.height as i32;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let alpha = bitmap[gy * metrics.width + gx];
                    if alpha == 0 {
                        continue;
                    }
                    let px = glyph_x + gx as i32;
                    let py = glyph_y + gy as i32;
                    if px >= 0 && py >= 0 && (px as u32) < self.width && (py as u32) < self.height {
                        let bg = *self.buffer.get_pixel(px as u32, py as u32);
                        self.buffer
                            .put_pixel(px as u32, py as u32, alpha_blend(BLACK, bg, alpha));
                    }
                }
            }

            cursor_x += metrics.advance_width;
        }
    }

    /// The rendered pixels.
    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.buffer
    }

    /// Save the rendered image to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be saved to the given path.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.buffer
            .save(path)
            .with_context(|| format!("failed to save screenshot to '{}'", path.display()))
    }
}

/// Alpha blend a foreground color onto a background color.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn alpha_blend(fg: Rgba<u8>, bg: Rgba<u8>, alpha: u8) -> Rgba<u8> {
    let a = f32::from(alpha) / 255.0;
    let inv_a = 1.0 - a;

    Rgba([
        f32::from(fg[0]).mul_add(a, f32::from(bg[0]) * inv_a) as u8,
        f32::from(fg[1]).mul_add(a, f32::from(bg[1]) * inv_a) as u8,
        f32::from(fg[2]).mul_add(a, f32::from(bg[2]) * inv_a) as u8,
        255,
    ])
}
