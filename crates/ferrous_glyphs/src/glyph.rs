//! GPU-side glyph records.

use std::sync::Arc;

use ferrous_font::{ExtractedGlyph, GlyphGeometry, GlyphMetrics};
use ferrous_gpu::resources::buffer::create_vertex;

use crate::atlas::AtlasRect;

/// An uploaded vertex stream. Empty streams own no buffer.
#[derive(Clone, Default)]
pub struct GlyphStream {
    buffer: Option<Arc<wgpu::Buffer>>,
    vertex_count: u32,
}

impl GlyphStream {
    pub fn upload(device: &wgpu::Device, label: &str, vertices: &[[f32; 2]]) -> Self {
        Self {
            buffer: create_vertex(device, label, vertices),
            vertex_count: vertices.len() as u32,
        }
    }

    #[inline]
    pub fn buffer(&self) -> Option<&Arc<wgpu::Buffer>> {
        self.buffer.as_ref()
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// Drops this handle. The buffer itself is freed once no clone holds it.
    fn release(&mut self) {
        self.buffer = None;
        self.vertex_count = 0;
    }
}

/// Everything a text renderer needs to place and draw one glyph.
///
/// Positions are in pixels, y up, relative to the pen position on the
/// baseline. An invalid record (code point absent from the font) has empty
/// streams and zeroed metrics.
///
/// Clones share the vertex buffers. A clone taken before its font is disposed
/// keeps them alive and stays bakeable.
#[derive(Clone)]
pub struct GlyphRecord {
    pub codepoint: char,
    /// Width and height of the outline bounds.
    pub width: f32,
    pub height: f32,
    /// Horizontal and vertical pen advance.
    pub advance: [f32; 2],
    /// Top of the outline above the baseline, or −1 without an outline.
    pub ascent: f32,
    /// Bottom of the outline relative to the baseline, or −1 without one.
    pub descent: f32,
    /// Lower-left corner of the atlas cell's content relative to the pen,
    /// padding excluded.
    pub bearing: [f32; 2],
    /// Baked coverage in the atlas, in texels, padding excluded. Its lower
    /// left corner sits at `bearing` from the pen. `None` when nothing was
    /// baked.
    pub atlas_rect: Option<AtlasRect>,
    /// Normalized `[u0, v0, u1, v1]` of `atlas_rect`, v0 at the top.
    pub uv: [f32; 4],
    pub(crate) edge: GlyphStream,
    pub(crate) curve: GlyphStream,
    valid: bool,
}

impl GlyphRecord {
    /// The record stored for (or returned in place of) a missing code point.
    pub fn invalid(codepoint: char) -> Self {
        Self {
            codepoint,
            width: 0.0,
            height: 0.0,
            advance: [0.0, 0.0],
            ascent: GlyphMetrics::UNAVAILABLE,
            descent: GlyphMetrics::UNAVAILABLE,
            bearing: [0.0, 0.0],
            atlas_rect: None,
            uv: [0.0; 4],
            edge: GlyphStream::default(),
            curve: GlyphStream::default(),
            valid: false,
        }
    }

    /// Uploads `geometry` and copies metrics from `glyph`. The atlas fields
    /// are filled in by the caller once a cell is assigned.
    pub(crate) fn upload(device: &wgpu::Device, glyph: &ExtractedGlyph, geometry: &GlyphGeometry) -> Self {
        if !glyph.present {
            return Self::invalid(glyph.codepoint);
        }
        let (width, height, bearing) = match glyph.metrics.bounds {
            Some(b) => (b.width(), b.height(), [b.min[0].floor(), b.min[1].floor()]),
            None => (0.0, 0.0, [0.0, 0.0]),
        };
        let label = format!("Glyph U+{:04X}", glyph.codepoint as u32);
        Self {
            codepoint: glyph.codepoint,
            width,
            height,
            advance: glyph.metrics.advance,
            ascent: glyph.metrics.ascent,
            descent: glyph.metrics.descent,
            bearing,
            atlas_rect: None,
            uv: [0.0; 4],
            edge: GlyphStream::upload(device, &format!("{label} Edge"), &geometry.edge),
            curve: GlyphStream::upload(device, &format!("{label} Curve"), &geometry.curve),
            valid: true,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Fan triangles `{pivot, v1, v2}`, three vertices each.
    #[inline]
    pub fn edge_stream(&self) -> &GlyphStream {
        &self.edge
    }

    /// Curve triangles `{start, control, end}`, three vertices each.
    #[inline]
    pub fn curve_stream(&self) -> &GlyphStream {
        &self.curve
    }

    /// `true` when the record has something to rasterize.
    #[inline]
    pub fn has_geometry(&self) -> bool {
        !self.edge.is_empty() || !self.curve.is_empty()
    }

    pub(crate) fn release(&mut self) {
        self.edge.release();
        self.curve.release();
    }
}

impl std::fmt::Debug for GlyphRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphRecord")
            .field("codepoint", &self.codepoint)
            .field("valid", &self.valid)
            .field("advance", &self.advance)
            .field("edge_vertices", &self.edge.vertex_count())
            .field("curve_vertices", &self.curve.vertex_count())
            .field("atlas_rect", &self.atlas_rect)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_record_has_no_geometry() {
        let g = GlyphRecord::invalid('€');
        assert!(!g.is_valid());
        assert!(!g.has_geometry());
        assert!(g.edge_stream().buffer().is_none());
        assert_eq!(g.curve_stream().vertex_count(), 0);
        assert_eq!(g.advance, [0.0, 0.0]);
        assert_eq!(g.ascent, GlyphMetrics::UNAVAILABLE);
        assert!(g.atlas_rect.is_none());
    }
}
