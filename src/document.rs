use crate::info::Info;
use crate::page::Page;
use crate::refs::{ObjectReferences, RefType};
use crate::RenderError;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Name, Pdf, Rect, Ref};
use std::io::Write;

/// Points per pixel when mapping the 300dpi sheets into PDF page space
const PT_PER_PX: f32 = 72.0 / 300.0;

/// A document collects rendered pages in reading order and writes them out
/// as a multi-page PDF, one full-bleed page image per PDF page, with a call
/// to [Document::write]
#[derive(Default)]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Vec<Page>,
}

impl Document {
    /// Sets information about the document. If not provided, no information
    /// block will be written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Append a rendered page to the end of the document
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Write the entire document to the writer. The document is rendered in
    /// memory first, so very large documents can allocate a significant
    /// amount of memory.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), RenderError> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..self.pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (i, page) in self.pages.iter().enumerate() {
            write_page_image(&mut refs, i, page, &mut writer);
            write_page(&mut refs, i, page, &mut writer);
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}

/// Embed one page's raster as a flate-compressed RGB image XObject with a
/// greyscale soft mask carrying the alpha channel
fn write_page_image(refs: &mut ObjectReferences, index: usize, page: &Page, writer: &mut Pdf) {
    let id = refs.gen(RefType::Image(index));
    let mask_id = refs.gen(RefType::ImageMask(index));
    let level = CompressionLevel::DefaultLevel as u8;

    let buffer = page.buffer();
    let rgb: Vec<u8> = buffer.pixels().flat_map(|p| [p[0], p[1], p[2]]).collect();
    let bytes = compress_to_vec_zlib(&rgb, level);
    let alphas: Vec<u8> = buffer.pixels().map(|p| p[3]).collect();
    let mask = compress_to_vec_zlib(&alphas, level);

    let mut image = writer.image_xobject(id, &bytes);
    image.filter(Filter::FlateDecode);
    image.width(page.width() as i32);
    image.height(page.height() as i32);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    image.s_mask(mask_id);
    image.finish();

    let mut s_mask = writer.image_xobject(mask_id, &mask);
    s_mask.filter(Filter::FlateDecode);
    s_mask.width(page.width() as i32);
    s_mask.height(page.height() as i32);
    s_mask.color_space().device_gray();
    s_mask.bits_per_component(8);
}

fn write_page(refs: &mut ObjectReferences, index: usize, page: &Page, writer: &mut Pdf) {
    let width = page.width() as f32 * PT_PER_PX;
    let height = page.height() as f32 * PT_PER_PX;

    let id = refs.get(RefType::Page(index)).unwrap();
    let content_id = refs.gen(RefType::ContentForPage(index));

    let mut pdf_page = writer.page(id);
    pdf_page.media_box(Rect::new(0.0, 0.0, width, height));
    pdf_page.parent(refs.get(RefType::PageTree).unwrap());

    let mut resources = pdf_page.resources();
    resources.x_objects().pair(
        Name(format!("I{index}").as_bytes()),
        refs.get(RefType::Image(index)).unwrap(),
    );
    resources.finish();

    pdf_page.contents(content_id);
    pdf_page.finish();

    let mut content: Vec<u8> = Vec::default();
    write!(
        &mut content,
        "q\n{width} 0 0 {height} 0 0 cm\n/I{index} Do\nQ\n"
    )
    .unwrap();
    writer.stream(content_id, &content);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Background;

    #[test]
    fn writes_a_parsable_pdf_header() {
        let mut doc = Document::default();
        doc.set_info(Info::new().title("Handwriting Export").clone());
        doc.add_page(Page::new(&Background::Blank));
        doc.add_page(Page::new(&Background::Blank));

        let mut out: Vec<u8> = Vec::new();
        doc.write(&mut out).expect("can write document");

        assert!(out.starts_with(b"%PDF-"));
        assert!(out.len() > 1024);
    }

    #[test]
    fn empty_documents_still_write() {
        let mut out: Vec<u8> = Vec::new();
        Document::default()
            .write(&mut out)
            .expect("can write an empty document");
        assert!(out.starts_with(b"%PDF-"));
    }
}
