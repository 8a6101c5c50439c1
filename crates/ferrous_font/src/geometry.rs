//! Turns an outline into the two vertex streams the GPU passes consume.
//!
//! * **Edge stream**: one triangle `{pivot, v1, v2}` per outline segment.
//!   Drawn with additive blending and a sign taken from the triangle's
//!   facing, the triangles sum to the winding number of every pixel, so the
//!   glyph interior is resolved without tessellation or scanline fill.
//! * **Curve stream**: one triangle `{start, control, end}` per quadratic
//!   segment. The fragment stage evaluates the implicit `u² − v` test and adds
//!   or removes the sliver between chord and curve, turning the polygon of
//!   chords into the exact quadratic boundary.
//!
//! Both streams are in pixels, relative to the glyph origin, y pointing up.

use crate::path::{OutlineVertex, VertexTag};

/// Fixed apex shared by every edge-stream triangle.
pub const PIVOT: [f32; 2] = [0.0, 0.0];

/// CPU-side geometry of one glyph, ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphGeometry {
    pub edge: Vec<[f32; 2]>,
    pub curve: Vec<[f32; 2]>,
}

impl GlyphGeometry {
    /// Vertices per edge-stream triangle.
    pub const EDGE_ARITY: usize = 3;
    /// Vertices per curve (start, control, end).
    pub const CURVE_ARITY: usize = 3;

    /// Builds both streams from `outline`, scaling font units by `scale`.
    pub fn build(outline: &[OutlineVertex], scale: f32) -> Self {
        let px = |p: [f32; 2]| [p[0] * scale, p[1] * scale];
        let mut edge = Vec::new();
        let mut curve = Vec::new();

        for pair in outline.windows(2) {
            let (v1, v2) = (&pair[0], &pair[1]);
            if v2.tag == VertexTag::PathStart {
                continue;
            }
            edge.extend_from_slice(&[PIVOT, px(v1.position), px(v2.position)]);
            if v2.tag == VertexTag::CurveTo {
                curve.extend_from_slice(&[px(v1.position), px(v2.control), px(v2.position)]);
            }
        }

        Self { edge, curve }
    }

    #[inline]
    pub fn edge_vertex_count(&self) -> u32 {
        self.edge.len() as u32
    }

    #[inline]
    pub fn curve_vertex_count(&self) -> u32 {
        self.curve.len() as u32
    }

    /// `true` when there is nothing to draw (e.g. space).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edge.is_empty() && self.curve.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::OutlineVertex as V;

    #[test]
    fn triangle_contour_yields_one_fan_triangle_per_segment() {
        let outline = [V::start(0.0, 0.0), V::line(10.0, 0.0), V::line(0.0, 10.0), V::line(0.0, 0.0)];
        let g = GlyphGeometry::build(&outline, 2.0);
        assert_eq!(g.edge_vertex_count(), 9);
        assert_eq!(g.curve_vertex_count(), 0);
        assert_eq!(&g.edge[0..3], &[PIVOT, [0.0, 0.0], [20.0, 0.0]]);
        assert_eq!(&g.edge[3..6], &[PIVOT, [20.0, 0.0], [0.0, 20.0]]);
    }

    #[test]
    fn curves_emit_start_control_end() {
        let outline = [V::start(0.0, 0.0), V::curve(5.0, 10.0, 10.0, 0.0), V::line(0.0, 0.0)];
        let g = GlyphGeometry::build(&outline, 1.0);
        assert_eq!(g.curve, vec![[0.0, 0.0], [5.0, 10.0], [10.0, 0.0]]);
        // the chord of the curve still takes part in the winding fan
        assert_eq!(&g.edge[0..3], &[PIVOT, [0.0, 0.0], [10.0, 0.0]]);
        assert_eq!(g.edge_vertex_count() as usize % GlyphGeometry::EDGE_ARITY, 0);
        assert_eq!(g.curve_vertex_count() as usize % GlyphGeometry::CURVE_ARITY, 0);
    }

    #[test]
    fn no_segment_bridges_two_contours() {
        let outline = [
            V::start(0.0, 0.0),
            V::line(1.0, 0.0),
            V::start(5.0, 5.0),
            V::line(6.0, 5.0),
        ];
        let g = GlyphGeometry::build(&outline, 1.0);
        assert_eq!(g.edge, vec![PIVOT, [0.0, 0.0], [1.0, 0.0], PIVOT, [5.0, 5.0], [6.0, 5.0]]);
    }

    #[test]
    fn empty_outline_is_a_valid_no_op() {
        let g = GlyphGeometry::build(&[], 3.0);
        assert!(g.is_empty());
        assert_eq!(g.edge_vertex_count(), 0);
        assert_eq!(g.curve_vertex_count(), 0);
    }
}
