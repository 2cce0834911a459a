use crate::document::Document;
use crate::font::SizedFont;
use crate::info::Info;
use crate::layout::{paginate, rasterize, LayoutOptions, RandomJitter};
use crate::page::{Background, Page};
use crate::RenderError;
use log::debug;
use std::path::{Path, PathBuf};

/// Where rendered artifacts land on disk. The directories are created on
/// demand before anything is written.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub images: PathBuf,
    pub pdfs: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> OutputPaths {
        OutputPaths {
            images: "generated/images".into(),
            pdfs: "generated/pdfs".into(),
        }
    }
}

/// One batch render request: the inputs the core needs plus the output
/// switches. The interactive control surface maps directly onto this.
#[derive(Default)]
pub struct RenderRequest {
    /// Raw bytes of an uploaded text file; takes priority over `text`
    pub text_bytes: Option<Vec<u8>>,
    /// Typed text; ignored when empty after trimming
    pub text: Option<String>,
    /// Path to the handwriting font. The built-in face takes over when this
    /// is absent or unreadable.
    pub font_path: Option<PathBuf>,
    pub background: Background,
    pub options: LayoutOptions,
    /// Surface only the first page as an image
    pub preview_only: bool,
    /// Also export a combined multi-page PDF
    pub export_pdf: bool,
}

/// The artifacts produced by one render invocation
#[derive(Debug, Default)]
pub struct RenderArtifacts {
    /// One PNG per surfaced page, in reading order
    pub image_paths: Vec<PathBuf>,
    /// The combined document, when requested
    pub pdf_path: Option<PathBuf>,
}

/// Run one full render: resolve the text and font, lay out and rasterize
/// every page, write the page images, and optionally export the combined
/// PDF document.
///
/// Returns `Ok(None)` when there is no usable text (nothing uploaded and
/// nothing typed, after trimming): a silent no-output result, not an error.
pub fn render(
    request: RenderRequest,
    out: &OutputPaths,
) -> Result<Option<RenderArtifacts>, RenderError> {
    let Some(text) = resolve_text(&request) else {
        return Ok(None);
    };

    let font = SizedFont::resolve(request.font_path.as_deref(), request.options.font_size);
    let plans = paginate(&text, &font, &request.options, &mut RandomJitter);
    let pages = rasterize(&plans, &font, request.options.colour, &request.background);

    std::fs::create_dir_all(&out.images)?;
    std::fs::create_dir_all(&out.pdfs)?;

    let surfaced = if request.preview_only {
        &pages[..1]
    } else {
        &pages[..]
    };
    let mut image_paths = Vec::with_capacity(surfaced.len());
    for (idx, page) in surfaced.iter().enumerate() {
        let path = out.images.join(format!("handwriting_page_{}.png", idx + 1));
        page.buffer().save(&path)?;
        debug!("wrote page image {}", path.display());
        image_paths.push(path);
    }

    let pdf_path = if request.export_pdf {
        Some(export_pdf(pages, &out.pdfs)?)
    } else {
        None
    };

    Ok(Some(RenderArtifacts {
        image_paths,
        pdf_path,
    }))
}

/// Uploaded file content wins over typed text; typed text only counts when
/// it is non-empty after trimming
fn resolve_text(request: &RenderRequest) -> Option<String> {
    if let Some(bytes) = &request.text_bytes {
        // a stray byte shouldn't abort a render either
        return Some(String::from_utf8_lossy(bytes).into_owned());
    }
    match &request.text {
        Some(text) if !text.trim().is_empty() => Some(text.clone()),
        _ => None,
    }
}

/// The combined document is always built from *all* pages, even when the
/// image output was truncated to a preview. It lands at a unique temporary
/// path that is kept (not deleted) once written.
fn export_pdf(pages: Vec<Page>, dir: &Path) -> Result<PathBuf, RenderError> {
    let mut doc = Document::default();
    doc.set_info(Info::new().title("Handwriting Export").clone());
    for page in pages {
        doc.add_page(page);
    }

    let file = tempfile::Builder::new()
        .prefix("handwriting_")
        .suffix(".pdf")
        .tempfile_in(dir)?;
    doc.write(file.as_file())?;
    let (_, path) = file
        .keep()
        .map_err(|err| RenderError::PersistDocument(err.to_string()))?;
    debug!("wrote document {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths_in(dir: &Path) -> OutputPaths {
        OutputPaths {
            images: dir.join("images"),
            pdfs: dir.join("pdfs"),
        }
    }

    #[test]
    fn no_usable_text_is_a_silent_no_output() {
        let dir = tempfile::tempdir().expect("can create a temp dir");
        let out = paths_in(dir.path());

        let nothing = RenderRequest::default();
        assert!(render(nothing, &out).expect("render succeeds").is_none());

        let whitespace = RenderRequest {
            text: Some("   \n\t  ".to_string()),
            ..Default::default()
        };
        assert!(render(whitespace, &out).expect("render succeeds").is_none());
    }

    #[test]
    fn uploaded_bytes_take_priority_over_typed_text() {
        let request = RenderRequest {
            text_bytes: Some(b"from the file".to_vec()),
            text: Some("from the textarea".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_text(&request).as_deref(), Some("from the file"));
    }

    #[test]
    fn renders_indexed_page_images() {
        let dir = tempfile::tempdir().expect("can create a temp dir");
        let out = paths_in(dir.path());

        let request = RenderRequest {
            text: Some("Hello World".to_string()),
            ..Default::default()
        };
        let artifacts = render(request, &out)
            .expect("render succeeds")
            .expect("text produces output");

        assert_eq!(artifacts.image_paths.len(), 1);
        assert!(artifacts.image_paths[0].ends_with("handwriting_page_1.png"));
        assert!(artifacts.image_paths[0].exists());
        assert!(artifacts.pdf_path.is_none());
    }

    #[test]
    fn preview_truncates_images_but_the_pdf_keeps_every_page() {
        let dir = tempfile::tempdir().expect("can create a temp dir");
        let out = paths_in(dir.path());

        // a tall line advance forces several pages out of few words
        let request = RenderRequest {
            text: Some("abcdef ".repeat(400)),
            options: LayoutOptions {
                font_size: 300.0,
                ..Default::default()
            },
            preview_only: true,
            export_pdf: true,
            ..Default::default()
        };
        let artifacts = render(request, &out)
            .expect("render succeeds")
            .expect("text produces output");

        assert_eq!(artifacts.image_paths.len(), 1);
        let pdf_path = artifacts.pdf_path.expect("a document was requested");
        assert_eq!(pdf_path.extension().and_then(|e| e.to_str()), Some("pdf"));
        let pdf = std::fs::read(&pdf_path).expect("the document was kept on disk");
        assert!(pdf.starts_with(b"%PDF-"));
    }
}
