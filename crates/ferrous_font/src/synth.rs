//! Minimal in-memory TrueType writer.
//!
//! Produces just the tables the parser needs (`cmap` format 4, `glyf`,
//! `head`, `hhea`, `hmtx`, `loca`, `maxp`) for simple quadratic glyphs. It
//! backs [`crate::FontSource::Fallback`] and gives tests fonts with exactly
//! known contents.

/// A contour point: x, y in font units and the on-curve flag.
pub type Point = (i16, i16, bool);

struct SynthGlyph {
    codepoint: char,
    advance: u16,
    contours: Vec<Vec<Point>>,
}

/// Builder for a tiny TrueType face. Glyph 0 (`.notdef`) is always empty.
pub struct SyntheticFont {
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    glyphs: Vec<SynthGlyph>,
}

impl SyntheticFont {
    /// New face with an ascender of 0.8 em and a descender of −0.2 em.
    pub fn new(units_per_em: u16) -> Self {
        let em = units_per_em as i32;
        Self {
            units_per_em,
            ascender: (em * 4 / 5) as i16,
            descender: -(em / 5) as i16,
            glyphs: Vec::new(),
        }
    }

    /// Overrides the `hhea` ascender and descender.
    pub fn metrics(mut self, ascender: i16, descender: i16) -> Self {
        self.ascender = ascender;
        self.descender = descender;
        self
    }

    /// Adds a glyph mapped from `codepoint`. Only BMP code points can be
    /// mapped by a format 4 `cmap`; others are ignored.
    pub fn glyph(mut self, codepoint: char, advance: u16, contours: &[&[Point]]) -> Self {
        if (codepoint as u32) <= 0xFFFF {
            self.glyphs.push(SynthGlyph {
                codepoint,
                advance,
                contours: contours.iter().map(|c| c.to_vec()).collect(),
            });
        }
        self
    }

    /// Serializes the face.
    pub fn build(&self) -> Vec<u8> {
        let num_glyphs = self.glyphs.len() as u16 + 1;

        // glyf + loca (long offsets)
        let mut glyf = Vec::new();
        let mut loca: Vec<u8> = Vec::new();
        loca.extend(0u32.to_be_bytes());
        loca.extend(0u32.to_be_bytes()); // .notdef is empty
        let mut bbox = [i16::MAX, i16::MAX, i16::MIN, i16::MIN];
        for g in &self.glyphs {
            if let Some(b) = encode_glyph(&g.contours, &mut glyf) {
                bbox = [bbox[0].min(b[0]), bbox[1].min(b[1]), bbox[2].max(b[2]), bbox[3].max(b[3])];
            }
            loca.extend((glyf.len() as u32).to_be_bytes());
        }
        if bbox[0] > bbox[2] {
            bbox = [0; 4];
        }

        let mut head = vec![0u8; 54];
        head[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
        head[12..16].copy_from_slice(&0x5F0F_3CF5u32.to_be_bytes());
        head[18..20].copy_from_slice(&self.units_per_em.to_be_bytes());
        for (i, v) in bbox.iter().enumerate() {
            head[36 + i * 2..38 + i * 2].copy_from_slice(&v.to_be_bytes());
        }
        head[50..52].copy_from_slice(&1i16.to_be_bytes()); // indexToLocFormat: long

        let mut hhea = vec![0u8; 36];
        hhea[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
        hhea[4..6].copy_from_slice(&self.ascender.to_be_bytes());
        hhea[6..8].copy_from_slice(&self.descender.to_be_bytes());
        hhea[34..36].copy_from_slice(&num_glyphs.to_be_bytes());

        let mut hmtx = Vec::new();
        hmtx.extend((self.units_per_em / 2).to_be_bytes());
        hmtx.extend(0i16.to_be_bytes());
        for g in &self.glyphs {
            hmtx.extend(g.advance.to_be_bytes());
            hmtx.extend(0i16.to_be_bytes());
        }

        let mut maxp = Vec::new();
        maxp.extend(0x0000_5000u32.to_be_bytes());
        maxp.extend(num_glyphs.to_be_bytes());

        // the directory is binary-searched by readers, keep tags sorted
        let tables: [(&[u8; 4], Vec<u8>); 7] = [
            (b"cmap", self.cmap()),
            (b"glyf", glyf),
            (b"head", head),
            (b"hhea", hhea),
            (b"hmtx", hmtx),
            (b"loca", loca),
            (b"maxp", maxp),
        ];
        assemble(&tables)
    }

    fn cmap(&self) -> Vec<u8> {
        let mut mapping: Vec<(u16, u16)> = self
            .glyphs
            .iter()
            .enumerate()
            .map(|(i, g)| (g.codepoint as u16, i as u16 + 1))
            .collect();
        mapping.sort_by_key(|&(code, _)| code);
        mapping.dedup_by_key(|&mut (code, _)| code);

        // one segment per code point plus the mandatory 0xFFFF terminator
        let seg_count = mapping.len() as u16 + 1;
        let mut sub = Vec::new();
        sub.extend(4u16.to_be_bytes());
        sub.extend(0u16.to_be_bytes()); // length, patched below
        sub.extend(0u16.to_be_bytes()); // language
        sub.extend((seg_count * 2).to_be_bytes());
        sub.extend([0u8; 6]); // searchRange, entrySelector, rangeShift
        for &(code, _) in &mapping {
            sub.extend(code.to_be_bytes());
        }
        sub.extend(0xFFFFu16.to_be_bytes());
        sub.extend(0u16.to_be_bytes()); // reservedPad
        for &(code, _) in &mapping {
            sub.extend(code.to_be_bytes());
        }
        sub.extend(0xFFFFu16.to_be_bytes());
        for &(code, glyph) in &mapping {
            sub.extend((glyph.wrapping_sub(code) as i16).to_be_bytes());
        }
        sub.extend(1i16.to_be_bytes());
        for _ in 0..seg_count {
            sub.extend(0u16.to_be_bytes());
        }
        let len = sub.len() as u16;
        sub[2..4].copy_from_slice(&len.to_be_bytes());

        let mut cmap = Vec::new();
        cmap.extend(0u16.to_be_bytes()); // version
        cmap.extend(1u16.to_be_bytes()); // numTables
        cmap.extend(3u16.to_be_bytes()); // platform: Windows
        cmap.extend(1u16.to_be_bytes()); // encoding: Unicode BMP
        cmap.extend(12u32.to_be_bytes());
        cmap.extend(sub);
        cmap
    }
}

/// Appends a simple glyph to `glyf` and returns its bbox, or `None` (and
/// writes nothing) for a glyph without contours.
fn encode_glyph(contours: &[Vec<Point>], glyf: &mut Vec<u8>) -> Option<[i16; 4]> {
    let points: Vec<Point> = contours.iter().flatten().copied().collect();
    if points.is_empty() {
        return None;
    }
    let bbox = points.iter().fold(
        [i16::MAX, i16::MAX, i16::MIN, i16::MIN],
        |b, &(x, y, _)| [b[0].min(x), b[1].min(y), b[2].max(x), b[3].max(y)],
    );

    glyf.extend((contours.len() as i16).to_be_bytes());
    for v in bbox {
        glyf.extend(v.to_be_bytes());
    }
    let mut end = 0u16;
    for contour in contours {
        end += contour.len() as u16;
        glyf.extend((end - 1).to_be_bytes());
    }
    glyf.extend(0u16.to_be_bytes()); // instructionLength
    for &(_, _, on_curve) in &points {
        glyf.push(u8::from(on_curve)); // ON_CURVE_POINT, full i16 deltas
    }
    let mut prev = 0i16;
    for &(x, _, _) in &points {
        glyf.extend((x - prev).to_be_bytes());
        prev = x;
    }
    prev = 0;
    for &(_, y, _) in &points {
        glyf.extend((y - prev).to_be_bytes());
        prev = y;
    }
    while glyf.len() % 4 != 0 {
        glyf.push(0);
    }
    Some(bbox)
}

fn assemble(tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend(0x0001_0000u32.to_be_bytes()); // sfnt version
    data.extend((tables.len() as u16).to_be_bytes());
    data.extend([0u8; 6]); // search info

    let mut offset = 12 + tables.len() * 16;
    for (tag, table) in tables {
        data.extend(tag.iter());
        data.extend(0u32.to_be_bytes()); // checksum
        data.extend((offset as u32).to_be_bytes());
        data.extend((table.len() as u32).to_be_bytes());
        offset += table.len();
    }
    for (_, table) in tables {
        data.extend(table);
    }
    data
}

/// The face behind [`crate::FontSource::Fallback`]: space, `A`, `B`, `I`,
/// `O` and `.` on a 1000-unit em. `A` and `O` have counters, `B` and `O`
/// use quadratic segments.
pub fn fallback_face() -> Vec<u8> {
    SyntheticFont::new(1000)
        .glyph(' ', 250, &[])
        .glyph(
            'A',
            520,
            &[
                &[
                    (0, 0, true),
                    (210, 700, true),
                    (290, 700, true),
                    (500, 0, true),
                    (410, 0, true),
                    (360, 180, true),
                    (140, 180, true),
                    (90, 0, true),
                ],
                &[(165, 260, true), (335, 260, true), (250, 560, true)],
            ],
        )
        .glyph(
            'B',
            500,
            &[&[
                (0, 0, true),
                (0, 700, true),
                (200, 700, true),
                (400, 700, false),
                (400, 525, true),
                (400, 350, false),
                (200, 350, true),
                (450, 350, false),
                (450, 175, true),
                (450, 0, false),
                (200, 0, true),
            ]],
        )
        .glyph('I', 220, &[&[(0, 0, true), (0, 700, true), (120, 700, true), (120, 0, true)]])
        .glyph(
            'O',
            540,
            &[
                &[
                    (250, 0, true),
                    (0, 0, false),
                    (0, 350, true),
                    (0, 700, false),
                    (250, 700, true),
                    (500, 700, false),
                    (500, 350, true),
                    (500, 0, false),
                ],
                &[
                    (250, 100, true),
                    (400, 100, false),
                    (400, 350, true),
                    (400, 600, false),
                    (250, 600, true),
                    (100, 600, false),
                    (100, 350, true),
                    (100, 100, false),
                ],
            ],
        )
        .glyph('.', 220, &[&[(50, 0, true), (50, 120, true), (170, 120, true), (170, 0, true)]])
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_parser::{Face, GlyphId};

    #[test]
    fn fallback_face_parses() {
        let data = fallback_face();
        let face = Face::parse(&data, 0).expect("fallback face must parse");
        assert_eq!(face.units_per_em(), 1000);
        assert_eq!(face.ascender(), 800);
        assert_eq!(face.descender(), -200);
        assert_eq!(face.number_of_glyphs(), 7);
        assert_eq!(face.glyph_index(' '), Some(GlyphId(1)));
        assert_eq!(face.glyph_index('A'), Some(GlyphId(2)));
        assert_eq!(face.glyph_index('.'), Some(GlyphId(6)));
        assert_eq!(face.glyph_index('€'), None);
        assert_eq!(face.glyph_hor_advance(GlyphId(2)), Some(520));
    }

    #[test]
    fn glyph_bbox_matches_points() {
        let data = fallback_face();
        let face = Face::parse(&data, 0).unwrap();
        let rect = face.glyph_bounding_box(GlyphId(4)).unwrap(); // 'I'
        assert_eq!((rect.x_min, rect.y_min, rect.x_max, rect.y_max), (0, 0, 120, 700));
        assert!(face.glyph_bounding_box(GlyphId(1)).is_none()); // space
    }
}
