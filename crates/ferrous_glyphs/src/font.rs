/// `FontAsset` holds a baked font: its glyph records and atlas.
///
/// Loading runs the whole pipeline once:
///
/// 1. read the source bytes and extract outlines for every alphabet slot
/// 2. build and upload the edge and curve streams per glyph
/// 3. lay out the atlas grid and size the scratch targets to one cell
/// 4. bake every glyph with geometry into its cell
///
/// Records stay aligned 1:1 with the alphabet; code points the font lacks
/// keep an invalid placeholder in their slot.
use ferrous_font::{extract, Alphabet, FontError, FontSource, GlyphGeometry, LoadOptions};
use ferrous_gpu::GpuContext;

use crate::atlas::{content_extent, AtlasLayout, AtlasTexture};
use crate::glyph::GlyphRecord;
use crate::pipeline::GlyphPipeline;

pub struct FontAsset {
    name: String,
    alphabet: Alphabet,
    glyphs: Vec<GlyphRecord>,
    atlas: Option<AtlasTexture>,
    atlas_size: [u32; 2],
    line_height: f32,
    valid: bool,
    /// Returned by lookups once the mapping is empty.
    fallback: GlyphRecord,
}

impl FontAsset {
    /// Loads and bakes `source`.
    ///
    /// # Errors
    ///
    /// Any [`FontError`]: unreadable source, unparsable bytes, too few
    /// usable glyphs, or an atlas exceeding the device's texture limit.
    ///
    /// # Panics
    ///
    /// Only on fatal GPU faults (scratch target or program creation).
    pub fn load(
        pipeline: &mut GlyphPipeline,
        ctx: &GpuContext,
        source: FontSource,
        options: &LoadOptions,
    ) -> Result<Self, FontError> {
        let name = options.name.clone().unwrap_or_else(|| source.name());
        let data = source.read()?;
        let font = extract(&data, options)?;

        let extents: Vec<Option<[u32; 2]>> = font
            .glyphs
            .iter()
            .map(|g| match g.metrics.bounds {
                Some(bounds) if g.present && !g.outline.is_empty() => Some(content_extent(&bounds)),
                _ => None,
            })
            .collect();
        let limit = ctx.max_texture_dimension();
        let Some(layout) = AtlasLayout::new(&extents, options.padding) else {
            return Err(FontError::AtlasTooLarge {
                width: u32::MAX,
                height: u32::MAX,
                limit,
            });
        };
        let atlas_size = layout.size();
        if atlas_size[0] > limit || atlas_size[1] > limit || layout.cell[0] > limit || layout.cell[1] > limit {
            return Err(FontError::AtlasTooLarge {
                width: atlas_size[0],
                height: atlas_size[1],
                limit,
            });
        }

        let atlas = AtlasTexture::new(&ctx.device, &name, atlas_size);
        pipeline.init(&ctx.device);
        pipeline.scratch_mut().ensure(&ctx.device, layout.cell[0], layout.cell[1]);

        let padding = options.padding as f32;
        let mut glyphs = Vec::with_capacity(font.glyphs.len());
        let mut baked = 0usize;
        for ((glyph, slot), extent) in font.glyphs.iter().zip(&layout.slots).zip(&extents) {
            let geometry = GlyphGeometry::build(&glyph.outline, glyph.scale);
            let mut record = GlyphRecord::upload(&ctx.device, glyph, &geometry);

            if let (Some(cell), Some(extent)) = (*slot, *extent) {
                if record.has_geometry() {
                    // pen position that puts the snapped bbox corner at (padding, padding)
                    let origin = [padding - record.bearing[0], padding - record.bearing[1]];
                    pipeline.bake_into(ctx, &record, origin, options.samples, &atlas.texture, cell);
                    let content = layout.content_rect(cell, extent);
                    record.atlas_rect = Some(content);
                    record.uv = content.uv(atlas_size);
                    baked += 1;
                }
            }
            glyphs.push(record);
        }

        log::info!(
            "font `{name}`: {} of {} glyph(s) present, {baked} baked into {}x{} atlas ({} sample(s))",
            font.coverage(),
            glyphs.len(),
            atlas_size[0],
            atlas_size[1],
            options.samples,
        );

        Ok(Self {
            name,
            alphabet: options.alphabet.clone(),
            glyphs,
            atlas: Some(atlas),
            atlas_size,
            line_height: font.line_height,
            valid: true,
            fallback: GlyphRecord::invalid(' '),
        })
    }

    /// Like [`load`](Self::load) but never fails: errors are logged and the
    /// invalid sentinel is returned.
    pub fn load_or_invalid(
        pipeline: &mut GlyphPipeline,
        ctx: &GpuContext,
        source: FontSource,
        options: &LoadOptions,
    ) -> Self {
        let name = options.name.clone().unwrap_or_else(|| source.name());
        match Self::load(pipeline, ctx, source, options) {
            Ok(asset) => asset,
            Err(err) => {
                log::warn!("font `{name}` failed to load: {err}");
                Self::invalid(&name)
            }
        }
    }

    /// An asset with no glyphs and no atlas.
    pub fn invalid(name: &str) -> Self {
        Self {
            name: name.to_string(),
            alphabet: Alphabet::new([' ']),
            glyphs: Vec::new(),
            atlas: None,
            atlas_size: [0, 0],
            line_height: 0.0,
            valid: false,
            fallback: GlyphRecord::invalid(' '),
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn atlas_size(&self) -> [u32; 2] {
        self.atlas_size
    }

    /// The coverage atlas, if the asset is valid.
    #[inline]
    pub fn atlas(&self) -> Option<&AtlasTexture> {
        self.atlas.as_ref()
    }

    /// Baseline-to-baseline distance in pixels.
    #[inline]
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    #[inline]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The record for `c`.
    ///
    /// Alphabet members get their own slot, which is invalid if the font
    /// lacks them. Anything outside the alphabet gets the space glyph.
    pub fn glyph_for_codepoint(&self, c: char) -> &GlyphRecord {
        self.alphabet
            .index_of(c)
            .and_then(|slot| self.glyphs.get(slot))
            .or_else(|| self.glyphs.get(self.alphabet.space_index()))
            .unwrap_or(&self.fallback)
    }

    /// All records in alphabet order; empty for an invalid asset.
    pub fn glyphs(&self) -> impl Iterator<Item = &GlyphRecord> + '_ {
        self.glyphs.iter()
    }

    /// Frees the atlas and the vertex streams and resets the asset to the
    /// invalid state. Safe to call on an invalid or already disposed asset.
    pub fn dispose(&mut self) {
        if let Some(atlas) = self.atlas.take() {
            atlas.texture.destroy();
        }
        for glyph in &mut self.glyphs {
            glyph.release();
        }
        if self.valid {
            log::debug!("font `{}` disposed", self.name);
        }
        self.glyphs.clear();
        self.atlas_size = [0, 0];
        self.line_height = 0.0;
        self.valid = false;
    }
}

impl std::fmt::Debug for FontAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontAsset")
            .field("name", &self.name)
            .field("valid", &self.valid)
            .field("glyphs", &self.glyphs.len())
            .field("atlas_size", &self.atlas_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_asset_falls_back_to_a_placeholder_space() {
        let asset = FontAsset::invalid("broken");
        assert!(!asset.is_valid());
        assert_eq!(asset.name(), "broken");
        assert_eq!(asset.glyphs().count(), 0);
        assert_eq!(asset.atlas_size(), [0, 0]);
        let g = asset.glyph_for_codepoint('Z');
        assert_eq!(g.codepoint, ' ');
        assert!(!g.is_valid());
    }

    #[test]
    fn dispose_is_idempotent_on_invalid_asset() {
        let mut asset = FontAsset::invalid("x");
        asset.dispose();
        asset.dispose();
        assert!(!asset.is_valid());
        assert!(asset.atlas().is_none());
        assert_eq!(asset.atlas_size(), [0, 0]);
    }
}
