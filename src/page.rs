use crate::colour::Colour;
use crate::font::SizedFont;
use image::{imageops::FilterType, DynamicImage, Rgba, RgbaImage};
use log::warn;
use rusttype::{point, Scale};
use std::path::PathBuf;

/// Sheet width in pixels: A4 at 300dpi
pub const A4_WIDTH: u32 = 2480;
/// Sheet height in pixels: A4 at 300dpi
pub const A4_HEIGHT: u32 = 3508;

/// What to paint behind the text on every page.
///
/// Backgrounds are best-effort: a path that cannot be opened or decoded is
/// silently replaced with a blank sheet, so a malformed asset never aborts
/// a render.
#[derive(Default)]
pub enum Background {
    /// A plain opaque white sheet
    #[default]
    Blank,
    /// An already-decoded image, resized to the sheet if needed
    Image(DynamicImage),
    /// An image loaded from disk, resized to the sheet if needed
    Path(PathBuf),
}

/// A single fixed-size raster sheet that glyphs are drawn onto
pub struct Page {
    surface: RgbaImage,
}

impl Page {
    /// Create a new page backed by the given background. Never fails: any
    /// problem loading the background degrades to a blank white sheet.
    pub fn new(background: &Background) -> Page {
        match background {
            Background::Blank => Page::blank(),
            Background::Image(img) => Page {
                surface: fit_to_sheet(img),
            },
            Background::Path(path) => match image::open(path) {
                Ok(img) => Page {
                    surface: fit_to_sheet(&img),
                },
                Err(err) => {
                    warn!(
                        "could not load background from {}, using a blank sheet: {err}",
                        path.display()
                    );
                    Page::blank()
                }
            },
        }
    }

    fn blank() -> Page {
        Page {
            surface: RgbaImage::from_pixel(A4_WIDTH, A4_HEIGHT, Rgba([255, 255, 255, 255])),
        }
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn buffer(&self) -> &RgbaImage {
        &self.surface
    }

    pub fn into_buffer(self) -> RgbaImage {
        self.surface
    }

    /// Draw a single character onto the page with its top-left at `(x, y)`,
    /// coverage-blended over whatever is already on the sheet. Pixels that
    /// land outside the sheet are dropped rather than wrapped.
    pub fn draw_char(&mut self, x: f32, y: f32, ch: char, font: &SizedFont, colour: Colour) {
        let scale = Scale::uniform(font.size);
        let glyph = font
            .font
            .face
            .glyph(ch)
            .scaled(scale)
            .positioned(point(x, y + font.ascent()));

        let Some(bb) = glyph.pixel_bounding_box() else {
            return;
        };

        let width = self.surface.width() as i32;
        let height = self.surface.height() as i32;
        glyph.draw(|gx, gy, coverage| {
            let px = bb.min.x + gx as i32;
            let py = bb.min.y + gy as i32;
            if px >= 0 && px < width && py >= 0 && py < height {
                let under = *self.surface.get_pixel(px as u32, py as u32);
                let blend = |ink: u8, under: u8| {
                    (ink as f32 * coverage + under as f32 * (1.0 - coverage)).round() as u8
                };
                self.surface.put_pixel(
                    px as u32,
                    py as u32,
                    Rgba([
                        blend(colour.r, under[0]),
                        blend(colour.g, under[1]),
                        blend(colour.b, under[2]),
                        255,
                    ]),
                );
            }
        });
    }
}

fn fit_to_sheet(img: &DynamicImage) -> RgbaImage {
    if img.width() == A4_WIDTH && img.height() == A4_HEIGHT {
        img.to_rgba8()
    } else {
        img.resize_exact(A4_WIDTH, A4_HEIGHT, FilterType::Lanczos3)
            .to_rgba8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Font;

    #[test]
    fn blank_pages_are_white_a4_sheets() {
        let page = Page::new(&Background::Blank);
        assert_eq!((page.width(), page.height()), (A4_WIDTH, A4_HEIGHT));
        assert_eq!(*page.buffer().get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(
            *page.buffer().get_pixel(A4_WIDTH - 1, A4_HEIGHT - 1),
            Rgba([255, 255, 255, 255])
        );
    }

    #[test]
    fn missing_background_degrades_to_a_blank_sheet() {
        let page = Page::new(&Background::Path("/no/such/background.png".into()));
        assert_eq!((page.width(), page.height()), (A4_WIDTH, A4_HEIGHT));
        assert_eq!(*page.buffer().get_pixel(100, 100), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn background_images_are_resized_to_the_sheet() {
        let tiny = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([0, 0, 255, 255])));
        let page = Page::new(&Background::Image(tiny));
        assert_eq!((page.width(), page.height()), (A4_WIDTH, A4_HEIGHT));
        // resampling keeps the solid fill recognisably blue
        let centre = page.buffer().get_pixel(1240, 1754);
        assert!(centre[2] > 200 && centre[0] < 50 && centre[1] < 50);
    }

    #[test]
    fn drawing_a_character_leaves_ink_on_the_sheet() {
        let mut page = Page::new(&Background::Blank);
        let font = SizedFont::new(Font::fallback(), 48.0);
        page.draw_char(70.0, 70.0, 'M', &font, crate::colours::BLACK);
        let inked = page
            .buffer()
            .pixels()
            .any(|p| *p != Rgba([255, 255, 255, 255]));
        assert!(inked);
    }

    #[test]
    fn out_of_bounds_ink_is_dropped() {
        let mut page = Page::new(&Background::Blank);
        let font = SizedFont::new(Font::fallback(), 48.0);
        // far off the left edge; must not panic
        page.draw_char(-5000.0, 70.0, 'M', &font, crate::colours::BLACK);
    }
}
