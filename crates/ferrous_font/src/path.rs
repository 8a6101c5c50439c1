//! Outline vertices as handed over by the font parser.

/// What an outline vertex does with the pen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexTag {
    /// Lifts the pen and starts a new contour at `position`.
    PathStart,
    /// Straight segment from the previous vertex to `position`.
    LineTo,
    /// Quadratic segment from the previous vertex to `position`, bent
    /// towards `control`.
    CurveTo,
}

/// One point of a glyph outline in font units, y pointing up.
///
/// `control` is only meaningful for [`VertexTag::CurveTo`]; other tags carry
/// a copy of `position` there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineVertex {
    pub position: [f32; 2],
    pub control: [f32; 2],
    pub tag: VertexTag,
}

impl OutlineVertex {
    pub fn start(x: f32, y: f32) -> Self {
        Self { position: [x, y], control: [x, y], tag: VertexTag::PathStart }
    }

    pub fn line(x: f32, y: f32) -> Self {
        Self { position: [x, y], control: [x, y], tag: VertexTag::LineTo }
    }

    pub fn curve(cx: f32, cy: f32, x: f32, y: f32) -> Self {
        Self { position: [x, y], control: [cx, cy], tag: VertexTag::CurveTo }
    }
}

/// A glyph outline is just a sequence of tagged vertices.
pub type GlyphOutline = Vec<OutlineVertex>;
