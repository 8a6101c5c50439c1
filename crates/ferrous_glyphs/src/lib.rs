//! `ferrous_glyphs`: bakes font outlines into a single-channel coverage
//! atlas on the GPU.
//!
//! The CPU side (alphabet, outline extraction, vertex streams) lives in
//! `ferrous_font`; this crate uploads the streams and rasterizes them with
//! two passes:
//!
//! | Module     | Responsibility                                              |
//! |------------|-------------------------------------------------------------|
//! | `pipeline` | `GlyphPipeline`: programs, scratch targets, bake loop       |
//! | `passes`   | Arc pass (winding + curve correction) and blend pass        |
//! | `scratch`  | Accumulation / blend render targets and their lifecycle     |
//! | `uniforms` | Per-sample draw uniforms behind a dynamic offset            |
//! | `atlas`    | Grid layout and the atlas texture                           |
//! | `glyph`    | `GlyphRecord` and its uploaded streams                      |
//! | `font`     | `FontAsset`: load, lookup, dispose                          |
//!
//! ```no_run
//! use ferrous_font::{FontSource, LoadOptions};
//! use ferrous_glyphs::{FontAsset, GlyphPipeline};
//! use ferrous_gpu::GpuContext;
//!
//! let ctx = pollster::block_on(GpuContext::headless()).unwrap();
//! let mut pipeline = GlyphPipeline::new(&ctx.device);
//! let font = FontAsset::load_or_invalid(&mut pipeline, &ctx, FontSource::Fallback, &LoadOptions::default());
//! assert!(font.glyph_for_codepoint('A').is_valid());
//! ```

pub mod atlas;
pub mod font;
pub mod glyph;
pub mod passes;
pub mod pipeline;
pub mod scratch;
pub mod shaders;
pub mod uniforms;

pub use atlas::{AtlasLayout, AtlasRect, AtlasTexture};
pub use font::FontAsset;
pub use glyph::{GlyphRecord, GlyphStream};
pub use pipeline::GlyphPipeline;
pub use scratch::ScratchTargets;
