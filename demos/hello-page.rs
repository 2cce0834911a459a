use pen_gen::layout::RandomJitter;
use pen_gen::{render_text, Background, Colour, Font, LayoutOptions, SizedFont};

fn main() {
    // use the built-in face; pass a path to Font::load_from_disk for your own
    let font = SizedFont::new(Font::fallback(), 48.0);

    // a little jitter makes the placement look less mechanical
    let options = LayoutOptions {
        jitter: 4,
        colour: Colour::from_hex("#102a7a").expect("a valid hex colour"),
        ..Default::default()
    };

    let pages = render_text(
        "Hello world!\nThis page was written by a machine with a shaky hand.",
        &font,
        &options,
        &Background::Blank,
        &mut RandomJitter,
    );

    // each page is a plain RGBA raster, save it wherever you like
    for (idx, page) in pages.iter().enumerate() {
        let filename = format!("hello_page_{}.png", idx + 1);
        page.buffer().save(&filename).expect("can save page image");
        println!("wrote {filename}");
    }
}
