//! The pagination core.
//!
//! Text is tokenized into words and explicit line-break tokens, then walked
//! once: words wrap within their column, columns spill into the next column,
//! and the last column spills into a fresh page. Each character is placed
//! individually with a small random offset for a handwritten look.
//!
//! Layout and rasterization are separate stages: [paginate] produces
//! per-page placement instructions, [rasterize] draws them onto sheets.
//! [render_text] runs both in one call.

use crate::colour::Colour;
use crate::font::SizedFont;
use crate::page::{Background, Page, A4_HEIGHT, A4_WIDTH};
use log::debug;
use rand::Rng;

/// Parameters for a single layout run. All values are in pixels on the
/// A4-at-300dpi sheet.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Requested font size. Also drives the vertical line advance, even when
    /// the fallback font renders at its own fixed size.
    pub font_size: f32,
    /// Extra vertical space between lines
    pub line_spacing: f32,
    /// Margin applied on all four sides of the sheet and between columns
    pub margin: u32,
    /// Bound for the random per-character offset; 0 disables jitter
    pub jitter: u32,
    /// Number of columns per page (1 to 3)
    pub columns: u32,
    /// Ink colour
    pub colour: Colour,
}

impl Default for LayoutOptions {
    fn default() -> LayoutOptions {
        LayoutOptions {
            font_size: 48.0,
            line_spacing: 10.0,
            margin: 70,
            jitter: 0,
            columns: 1,
            colour: crate::colours::BLACK,
        }
    }
}

/// A source of bounded random offsets for glyph placement.
///
/// The default [RandomJitter] draws from the thread-local RNG; tests can
/// inject a deterministic source to assert exact pixel placement.
pub trait JitterSource {
    /// Produce an `(x, y)` offset with each component in `[-bound, bound]`
    fn offset(&mut self, bound: i32) -> (i32, i32);
}

/// Jitter drawn from the thread-local RNG. Renders using this source are
/// intentionally not reproducible bit-for-bit.
#[derive(Default)]
pub struct RandomJitter;

impl JitterSource for RandomJitter {
    fn offset(&mut self, bound: i32) -> (i32, i32) {
        if bound <= 0 {
            return (0, 0);
        }
        let mut rng = rand::thread_rng();
        (rng.gen_range(-bound..=bound), rng.gen_range(-bound..=bound))
    }
}

/// A single glyph placement instruction: draw `ch` with its visual top-left
/// at `(x, y)`. Jitter is already folded into the coordinates; it never
/// affects how far the pen advanced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub ch: char,
    pub x: f32,
    pub y: f32,
}

/// The placement instructions for one page, in drawing order
#[derive(Debug, Default, Clone)]
pub struct PagePlan {
    pub glyphs: Vec<Placement>,
}

/// Horizontal column geometry for a sheet.
///
/// Column width uses integer division, so the bands are not guaranteed to
/// tile the sheet exactly; any remainder pixels go unused at the right edge.
struct Columns {
    margin: i64,
    width: i64,
    count: u32,
}

impl Columns {
    fn new(margin: u32, count: u32) -> Columns {
        let count = count.max(1);
        let margin = margin as i64;
        let width = (A4_WIDTH as i64 - (count as i64 + 1) * margin) / count as i64;
        Columns {
            margin,
            width,
            count,
        }
    }

    /// Where column `col`'s drawing band starts
    fn start(&self, col: u32) -> f32 {
        (self.margin + col as i64 * (self.width + self.margin)) as f32
    }

    /// The right boundary of column `col`'s drawing band
    fn right_edge(&self, col: u32) -> f32 {
        (self.margin + (col as i64 + 1) * self.width + col as i64 * self.margin) as f32
    }

    fn is_last(&self, col: u32) -> bool {
        col + 1 >= self.count
    }
}

/// Walk the token stream once and produce placement instructions for every
/// page the text needs. The current page is always emitted at the end, even
/// if nothing was placed on it.
pub fn paginate<J: JitterSource>(
    text: &str,
    font: &SizedFont,
    opts: &LayoutOptions,
    jitter: &mut J,
) -> Vec<PagePlan> {
    let columns = Columns::new(opts.margin, opts.columns);
    let line_advance = opts.font_size + opts.line_spacing;
    let bottom = A4_HEIGHT as f32 - opts.margin as f32;

    let mut pages: Vec<PagePlan> = Vec::new();
    let mut page = PagePlan::default();

    let mut col: u32 = 0;
    let mut pen = columns.start(col);
    let mut baseline = opts.margin as f32;

    // map every literal newline onto an explicit line-break token, then
    // split on single spaces; empty tokens from runs of spaces are benign
    let text = text.replace('\n', " \n ");
    for word in text.split(' ') {
        if word == "\n" {
            // an explicit break advances without drawing; overflow is caught
            // at the next drawn glyph
            pen = columns.start(col);
            baseline += line_advance;
            continue;
        }

        let word_width = font.text_width(word);
        let word_height = font.text_height(word);

        // wrap: words are never split across lines. A word wider than the
        // whole column still starts at the column edge and may draw past it.
        if pen + word_width > columns.right_edge(col) {
            pen = columns.start(col);
            baseline += line_advance;
        }

        // vertical overflow: spill into the next column, or a fresh page
        // once the last column is exhausted
        if baseline + word_height > bottom {
            if columns.is_last(col) {
                debug!("page {} is full, starting a new page", pages.len() + 1);
                pages.push(std::mem::take(&mut page));
                col = 0;
            } else {
                col += 1;
                debug!("column is full, moving to column {col}");
            }
            pen = columns.start(col);
            baseline = opts.margin as f32;
        }

        for ch in word.chars() {
            let advance = font.char_advance(ch);
            let (dx, dy) = jitter.offset(opts.jitter as i32);
            page.glyphs.push(Placement {
                ch,
                x: pen + dx as f32,
                y: baseline + dy as f32,
            });
            pen += advance;
        }
        // the trailing space advance applies after every word, even one
        // immediately followed by a forced line break
        pen += font.space_advance();
    }

    pages.push(page);
    pages
}

/// Draw each page's placements onto a fresh sheet backed by `background`
pub fn rasterize(
    plans: &[PagePlan],
    font: &SizedFont,
    colour: Colour,
    background: &Background,
) -> Vec<Page> {
    plans
        .iter()
        .map(|plan| {
            let mut page = Page::new(background);
            for glyph in &plan.glyphs {
                page.draw_char(glyph.x, glyph.y, glyph.ch, font, colour);
            }
            page
        })
        .collect()
}

/// Lay out and rasterize `text` in one pass, returning the finished pages
/// in reading order
pub fn render_text<J: JitterSource>(
    text: &str,
    font: &SizedFont,
    opts: &LayoutOptions,
    background: &Background,
    jitter: &mut J,
) -> Vec<Page> {
    let plans = paginate(text, font, opts, jitter);
    rasterize(&plans, font, opts.colour, background)
}
