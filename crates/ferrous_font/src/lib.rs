//! CPU half of the glyph baker: which code points to bake, how to pull their
//! outlines out of a font, and how to turn an outline into GPU vertex streams.
//!
//! Nothing in this crate touches the GPU; `ferrous_glyphs` uploads and bakes
//! what [`extract`] and [`GlyphGeometry::build`] produce.

pub mod alphabet;
pub mod config;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod path;
pub mod source;
pub mod synth;

pub use alphabet::Alphabet;
pub use config::{LoadOptions, MAX_SAMPLES};
pub use error::FontError;
pub use extract::{extract, ExtractedFont, ExtractedGlyph, GlyphMetrics, PixelRect};
pub use geometry::GlyphGeometry;
pub use path::{GlyphOutline, OutlineVertex, VertexTag};
pub use source::FontSource;
