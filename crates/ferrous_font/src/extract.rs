//! Outline extraction: font bytes → one outline + metrics per alphabet slot.

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use crate::alphabet::Alphabet;
use crate::config::LoadOptions;
use crate::error::FontError;
use crate::path::{GlyphOutline, OutlineVertex};

/// Advance given to a synthesized space glyph, in em.
const SPACE_ADVANCE_EM: f32 = 0.25;

/// Axis-aligned box in pixels, y pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl PixelRect {
    #[inline]
    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }
}

/// Scaled metrics of one glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Horizontal and vertical pen advance in pixels.
    pub advance: [f32; 2],
    /// Outline bounds; `None` for glyphs without contours.
    pub bounds: Option<PixelRect>,
    /// Distance from the baseline to the top of the outline, or −1.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the outline, or −1.
    pub descent: f32,
}

impl GlyphMetrics {
    /// Value stored in `ascent`/`descent` when the glyph has no outline.
    pub const UNAVAILABLE: f32 = -1.0;

    pub const fn empty() -> Self {
        Self {
            advance: [0.0, 0.0],
            bounds: None,
            ascent: Self::UNAVAILABLE,
            descent: Self::UNAVAILABLE,
        }
    }
}

/// Everything the extractor learned about one alphabet slot.
#[derive(Debug, Clone)]
pub struct ExtractedGlyph {
    pub codepoint: char,
    /// `false` for placeholder slots whose code point the font lacks.
    pub present: bool,
    /// Outline in font units; empty for placeholders and blank glyphs.
    pub outline: GlyphOutline,
    /// Font units → pixels.
    pub scale: f32,
    pub metrics: GlyphMetrics,
}

impl ExtractedGlyph {
    fn placeholder(codepoint: char, scale: f32) -> Self {
        Self {
            codepoint,
            present: false,
            outline: Vec::new(),
            scale,
            metrics: GlyphMetrics::empty(),
        }
    }
}

/// The extractor's output, aligned 1:1 with the alphabet it was run with.
#[derive(Debug, Clone)]
pub struct ExtractedFont {
    pub units_per_em: u16,
    pub scale: f32,
    /// Ascender − descender + line gap, in pixels.
    pub line_height: f32,
    pub glyphs: Vec<ExtractedGlyph>,
}

impl ExtractedFont {
    /// Number of present glyphs other than space.
    pub fn coverage(&self) -> usize {
        self.glyphs
            .iter()
            .filter(|g| g.present && g.codepoint != ' ')
            .count()
    }
}

/// Parses `data` and pulls outline and metrics for every code point of
/// `options.alphabet`, in order.
///
/// A code point the font lacks still produces a (non-present) placeholder so
/// slot `i` of the result always belongs to slot `i` of the alphabet.
pub fn extract(data: &[u8], options: &LoadOptions) -> Result<ExtractedFont, FontError> {
    let face = Face::parse(data, 0)?;
    let units_per_em = face.units_per_em();
    let scale = pixel_scale(&face, options.pixel_height);
    let line_height =
        (face.ascender() as f32 - face.descender() as f32 + face.line_gap() as f32) * scale;

    let glyphs = extract_alphabet(&face, &options.alphabet, scale, line_height);

    let font = ExtractedFont {
        units_per_em,
        scale,
        line_height,
        glyphs,
    };

    let present = font.coverage();
    if present < options.min_glyphs {
        return Err(FontError::NoUsableGlyphs {
            present,
            required: options.min_glyphs,
        });
    }

    let missing = font.glyphs.iter().filter(|g| !g.present).count();
    if missing > 0 {
        log::warn!(
            "font lacks {missing} of {} alphabet code point(s)",
            font.glyphs.len()
        );
    }
    Ok(font)
}

/// Scale that maps the face's ascender..descender extent onto `pixel_height`.
pub fn pixel_scale(face: &Face<'_>, pixel_height: f32) -> f32 {
    let extent = face.ascender() as f32 - face.descender() as f32;
    if extent > 0.0 {
        pixel_height / extent
    } else {
        pixel_height / face.units_per_em() as f32
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn extract_alphabet(
    face: &Face<'_>,
    alphabet: &Alphabet,
    scale: f32,
    line_height: f32,
) -> Vec<ExtractedGlyph> {
    alphabet
        .as_slice()
        .par_iter()
        .map(|&c| extract_glyph(face, c, scale, line_height))
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn extract_alphabet(
    face: &Face<'_>,
    alphabet: &Alphabet,
    scale: f32,
    line_height: f32,
) -> Vec<ExtractedGlyph> {
    alphabet
        .iter()
        .map(|c| extract_glyph(face, c, scale, line_height))
        .collect()
}

fn extract_glyph(face: &Face<'_>, c: char, scale: f32, line_height: f32) -> ExtractedGlyph {
    let id = match face.glyph_index(c) {
        Some(id) if id.0 != 0 => id,
        _ if c == ' ' => return synthesized_space(face, scale, line_height),
        _ => return ExtractedGlyph::placeholder(c, scale),
    };

    let mut collector = OutlineCollector::default();
    let bbox = face.outline_glyph(id, &mut collector);

    let bounds = bbox.map(|r| PixelRect {
        min: [r.x_min as f32 * scale, r.y_min as f32 * scale],
        max: [r.x_max as f32 * scale, r.y_max as f32 * scale],
    });
    let (ascent, descent) = match bounds {
        Some(b) => (b.max[1], -b.min[1]),
        None => (GlyphMetrics::UNAVAILABLE, GlyphMetrics::UNAVAILABLE),
    };

    ExtractedGlyph {
        codepoint: c,
        present: true,
        outline: collector.vertices,
        scale,
        metrics: GlyphMetrics {
            advance: advance(face, id, scale, line_height),
            bounds,
            ascent,
            descent,
        },
    }
}

fn advance(face: &Face<'_>, id: GlyphId, scale: f32, line_height: f32) -> [f32; 2] {
    let horizontal = face.glyph_hor_advance(id).unwrap_or(0) as f32 * scale;
    let vertical = face
        .glyph_ver_advance(id)
        .map(|v| v as f32 * scale)
        .unwrap_or(line_height);
    [horizontal, vertical]
}

fn synthesized_space(face: &Face<'_>, scale: f32, line_height: f32) -> ExtractedGlyph {
    log::debug!("font has no space glyph, synthesizing one");
    ExtractedGlyph {
        codepoint: ' ',
        present: true,
        outline: Vec::new(),
        scale,
        metrics: GlyphMetrics {
            advance: [face.units_per_em() as f32 * SPACE_ADVANCE_EM * scale, line_height],
            ..GlyphMetrics::empty()
        },
    }
}

/// Receives path commands from the parser and records them as tagged
/// vertices. Cubic segments are split at t = 0.5 and each half replaced by
/// its best-fit quadratic.
#[derive(Default)]
struct OutlineCollector {
    vertices: GlyphOutline,
    start: [f32; 2],
    last: [f32; 2],
}

impl OutlineCollector {
    fn push_quad(&mut self, c: [f32; 2], p: [f32; 2]) {
        self.vertices.push(OutlineVertex::curve(c[0], c[1], p[0], p[1]));
        self.last = p;
    }
}

impl OutlineBuilder for OutlineCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        self.vertices.push(OutlineVertex::start(x, y));
        self.start = [x, y];
        self.last = [x, y];
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.vertices.push(OutlineVertex::line(x, y));
        self.last = [x, y];
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.push_quad([x1, y1], [x, y]);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let p0 = self.last;
        let (c1, c2, p3) = ([x1, y1], [x2, y2], [x, y]);

        let mid = |a: [f32; 2], b: [f32; 2]| [(a[0] + b[0]) * 0.5, (a[1] + b[1]) * 0.5];
        let ab = mid(p0, c1);
        let bc = mid(c1, c2);
        let cd = mid(c2, p3);
        let abc = mid(ab, bc);
        let bcd = mid(bc, cd);
        let split = mid(abc, bcd);

        self.push_quad(cubic_to_quad(p0, ab, abc, split), split);
        self.push_quad(cubic_to_quad(split, bcd, cd, p3), p3);
    }

    fn close(&mut self) {
        if self.last != self.start {
            self.line_to(self.start[0], self.start[1]);
        }
    }
}

/// Control point of the quadratic closest to the cubic `p0 c1 c2 p3`.
fn cubic_to_quad(p0: [f32; 2], c1: [f32; 2], c2: [f32; 2], p3: [f32; 2]) -> [f32; 2] {
    [
        (3.0 * (c1[0] + c2[0]) - p0[0] - p3[0]) * 0.25,
        (3.0 * (c1[1] + c2[1]) - p0[1] - p3[1]) * 0.25,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::VertexTag;
    use crate::synth::{fallback_face, SyntheticFont};

    fn options(chars: &str) -> LoadOptions {
        LoadOptions::default()
            .with_alphabet(Alphabet::new(chars.chars()))
            .with_pixel_height(100.0)
    }

    #[test]
    fn slots_stay_aligned_with_alphabet() {
        let data = fallback_face();
        let font = extract(&data, &options(" A€B.")).unwrap();
        let order: Vec<char> = font.glyphs.iter().map(|g| g.codepoint).collect();
        assert_eq!(order, vec![' ', 'A', '€', 'B', '.']);
        assert!(font.glyphs[1].present);
        assert!(!font.glyphs[2].present);
        assert!(font.glyphs[2].outline.is_empty());
        assert_eq!(font.glyphs[2].metrics, GlyphMetrics::empty());
        assert_eq!(font.coverage(), 3);
    }

    #[test]
    fn scale_maps_extent_to_pixel_height() {
        // fallback face: ascender 800, descender -200
        let data = fallback_face();
        let font = extract(&data, &options(" A")).unwrap();
        assert!((font.scale - 0.1).abs() < 1e-6);
        assert!((font.line_height - 100.0).abs() < 1e-3);
    }

    #[test]
    fn flat_vertical_metrics_scale_by_units_per_em() {
        let data = SyntheticFont::new(2000)
            .metrics(0, 0)
            .glyph('x', 1000, &[&[(0, 0, true), (0, 1000, true), (1000, 0, true)]])
            .build();
        let font = extract(&data, &options(" x")).unwrap();
        assert!((font.scale - 0.05).abs() < 1e-6);
        let bounds = font.glyphs[1].metrics.bounds.unwrap();
        assert!((bounds.height() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn metrics_are_scaled_and_blank_glyphs_use_sentinels() {
        let data = fallback_face();
        let font = extract(&data, &options(" I")).unwrap();

        let space = &font.glyphs[0];
        assert!(space.present);
        assert!(space.outline.is_empty());
        assert_eq!(space.metrics.ascent, GlyphMetrics::UNAVAILABLE);
        assert_eq!(space.metrics.descent, GlyphMetrics::UNAVAILABLE);
        assert!(space.metrics.advance[0] > 0.0);

        let i = &font.glyphs[1];
        let bounds = i.metrics.bounds.unwrap();
        assert!((bounds.height() - 70.0).abs() < 1e-3);
        assert!((i.metrics.ascent - 70.0).abs() < 1e-3);
        assert!(i.metrics.descent.abs() < 1e-3);
        // no vmtx: vertical advance falls back to the line height
        assert!((i.metrics.advance[1] - font.line_height).abs() < 1e-3);
    }

    #[test]
    fn contours_start_with_path_start_and_close() {
        let data = fallback_face();
        let font = extract(&data, &options(" O")).unwrap();
        let outline = &font.glyphs[1].outline;
        assert_eq!(outline[0].tag, VertexTag::PathStart);
        let starts = outline.iter().filter(|v| v.tag == VertexTag::PathStart).count();
        assert_eq!(starts, 2);
        assert!(outline.iter().any(|v| v.tag == VertexTag::CurveTo));
        assert_eq!(outline.last().unwrap().position, {
            let last_start = outline
                .iter()
                .rev()
                .find(|v| v.tag == VertexTag::PathStart)
                .unwrap();
            last_start.position
        });
    }

    #[test]
    fn missing_space_is_synthesized() {
        let data = SyntheticFont::new(1000)
            .glyph('x', 500, &[&[(0, 0, true), (0, 500, true), (500, 0, true)]])
            .build();
        let font = extract(&data, &options("x")).unwrap();
        assert_eq!(font.glyphs[0].codepoint, ' ');
        assert!(font.glyphs[0].present);
        assert!((font.glyphs[0].metrics.advance[0] - 25.0).abs() < 1e-3);
    }

    #[test]
    fn corrupted_bytes_fail_to_parse() {
        let err = extract(&[0xde, 0xad, 0xbe, 0xef, 1, 2, 3], &options("A")).unwrap_err();
        assert!(matches!(err, FontError::Parse(_)));
    }

    #[test]
    fn coverage_policy_rejects_space_only_fonts() {
        let data = SyntheticFont::new(1000).glyph(' ', 250, &[]).build();
        let err = extract(&data, &options(" A")).unwrap_err();
        assert!(matches!(
            err,
            FontError::NoUsableGlyphs { present: 0, required: 1 }
        ));
    }

    #[test]
    fn cubic_split_lands_on_curve_midpoint() {
        let mut c = OutlineCollector::default();
        c.move_to(0.0, 0.0);
        c.curve_to(0.0, 100.0, 100.0, 100.0, 100.0, 0.0);
        assert_eq!(c.vertices.len(), 3);
        assert_eq!(c.vertices[1].position, [50.0, 75.0]);
        assert_eq!(c.vertices[2].position, [100.0, 0.0]);
        assert!(c.vertices[1..].iter().all(|v| v.tag == VertexTag::CurveTo));
    }
}
