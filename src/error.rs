use thiserror::Error;

/// All errors that the crate can generate.
///
/// Note that recoverable asset failures (an unreadable background image or
/// an unparsable uploaded font) never surface through this type: those
/// degrade to a blank page / the built-in fallback font instead.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [image] failed to parse or encode an image
    Image(#[from] image::ImageError),

    /// [rusttype] could not parse the font data
    #[error("could not parse font data")]
    FontParsing,

    /// The temporary file holding the exported PDF could not be kept
    #[error("could not persist the exported document: {0}")]
    PersistDocument(String),
}
