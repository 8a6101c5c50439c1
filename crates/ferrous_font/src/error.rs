use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a font could not be turned into a usable asset.
///
/// Every variant is recoverable: the loader converts it into an invalid
/// asset (or hands it to the caller) instead of panicking.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("could not read font `{}`: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("font data could not be parsed: {0}")]
    Parse(#[from] ttf_parser::FaceParsingError),
    #[error("font provides {present} glyph(s) of the alphabet besides space, {required} required")]
    NoUsableGlyphs { present: usize, required: usize },
    #[error("atlas of {width}x{height} exceeds the device limit of {limit}")]
    AtlasTooLarge { width: u32, height: u32, limit: u32 },
}
