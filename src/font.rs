use crate::RenderError;
use log::warn;
use rusttype::Scale;
use std::path::Path;

/// The size (in pixels) at which the built-in fallback face renders,
/// regardless of the size that was requested. Text rendered with the
/// fallback may therefore come out smaller or larger than asked for.
pub const FALLBACK_FONT_SIZE: f32 = 24.0;

static FALLBACK_FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// A parsed font face. Fonts can be TTF or OTF fonts. Metrics are measured
/// per character, in pixels, at a given pixel size.
pub struct Font {
    pub face: rusttype::Font<'static>,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, RenderError> {
        let face = rusttype::Font::try_from_vec(bytes).ok_or(RenderError::FontParsing)?;
        Ok(Font { face })
    }

    /// Load a font from a file on disk
    pub fn load_from_disk<P: AsRef<Path>>(path: P) -> Result<Font, RenderError> {
        let bytes = std::fs::read(path)?;
        Font::load(bytes)
    }

    /// The built-in fallback face, embedded in the library itself so that a
    /// usable font is always available
    pub fn fallback() -> Font {
        let face = rusttype::Font::try_from_bytes(FALLBACK_FONT_DATA)
            .expect("embedded fallback font parses");
        Font { face }
    }

    /// Calculate the ascent (distance from the top of a line to the baseline)
    /// for the given pixel size
    pub fn ascent(&self, size: f32) -> f32 {
        self.face.v_metrics(Scale::uniform(size)).ascent
    }

    /// The horizontal advance of a single character at the given pixel size
    pub fn char_advance(&self, ch: char, size: f32) -> f32 {
        self.face
            .glyph(ch)
            .scaled(Scale::uniform(size))
            .h_metrics()
            .advance_width
    }

    /// The inked height of a single character at the given pixel size.
    /// Characters with no ink (e.g. a space) measure zero
    pub fn char_height(&self, ch: char, size: f32) -> f32 {
        self.face
            .glyph(ch)
            .scaled(Scale::uniform(size))
            .exact_bounding_box()
            .map(|bb| bb.max.y - bb.min.y)
            .unwrap_or(0.0)
    }

    /// Calculate the width of a given string of text at the given pixel size
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|ch| self.char_advance(ch, size)).sum()
    }

    /// Calculate the inked height of a given string of text at the given
    /// pixel size: the tallest character wins
    pub fn text_height(&self, text: &str, size: f32) -> f32 {
        text.chars()
            .map(|ch| self.char_height(ch, size))
            .fold(0.0, f32::max)
    }
}

/// A font paired with the pixel size it renders at.
///
/// The pairing matters because of the fallback policy: when a requested font
/// cannot be loaded the fallback face takes over at [FALLBACK_FONT_SIZE],
/// not at the requested size.
pub struct SizedFont {
    pub font: Font,
    pub size: f32,
}

impl SizedFont {
    pub fn new(font: Font, size: f32) -> SizedFont {
        SizedFont { font, size }
    }

    /// Resolve a font reference into a usable font. A missing path or a font
    /// that fails to load degrades to the built-in fallback face at its fixed
    /// size; this never fails.
    pub fn resolve<P: AsRef<Path>>(path: Option<P>, size: f32) -> SizedFont {
        if let Some(path) = path {
            match Font::load_from_disk(&path) {
                Ok(font) => return SizedFont { font, size },
                Err(err) => {
                    warn!(
                        "could not load font from {}, using the fallback face: {err}",
                        path.as_ref().display()
                    );
                }
            }
        }
        SizedFont {
            font: Font::fallback(),
            size: FALLBACK_FONT_SIZE,
        }
    }

    pub fn ascent(&self) -> f32 {
        self.font.ascent(self.size)
    }

    pub fn char_advance(&self, ch: char) -> f32 {
        self.font.char_advance(ch, self.size)
    }

    pub fn text_width(&self, text: &str) -> f32 {
        self.font.text_width(text, self.size)
    }

    pub fn text_height(&self, text: &str) -> f32 {
        self.font.text_height(text, self.size)
    }

    /// The advance of a single space character, added after every word
    pub fn space_advance(&self) -> f32 {
        self.char_advance(' ')
    }
}
