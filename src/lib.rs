mod colour;
pub use colour::*;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// The pagination core: tokenization, column/page cursor tracking and
/// jittered glyph placement
pub mod layout;
pub use layout::{
    paginate, rasterize, render_text, JitterSource, LayoutOptions, PagePlan, Placement,
    RandomJitter,
};

mod page;
pub use page::*;

pub(crate) mod refs;

mod render;
pub use render::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
