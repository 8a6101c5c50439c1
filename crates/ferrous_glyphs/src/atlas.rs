//! Grid packing and the atlas texture glyph coverage is baked into.

use ferrous_font::PixelRect;
use ferrous_gpu::resources::texture::{self, TextureDesc};

/// A rectangle of texels, origin at the top-left of the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl AtlasRect {
    /// `[u0, v0, u1, v1]` in an atlas of `size` texels.
    pub fn uv(&self, size: [u32; 2]) -> [f32; 4] {
        let (w, h) = (size[0] as f32, size[1] as f32);
        [
            self.x as f32 / w,
            self.y as f32 / h,
            (self.x + self.width) as f32 / w,
            (self.y + self.height) as f32 / h,
        ]
    }
}

/// Whole texels covered by `bounds` once its corner is snapped down to the
/// pixel grid. Extents beyond `u32::MAX` saturate.
pub fn content_extent(bounds: &PixelRect) -> [u32; 2] {
    let w = bounds.max[0].ceil() - bounds.min[0].floor();
    let h = bounds.max[1].ceil() - bounds.min[1].floor();
    [w.max(1.0) as u32, h.max(1.0) as u32]
}

/// Uniform grid: every cell is as large as the largest glyph plus padding on
/// each side, `ceil(sqrt(n))` cells per row.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasLayout {
    pub cell: [u32; 2],
    pub columns: u32,
    pub rows: u32,
    pub padding: u32,
    /// Per glyph: its cell, or `None` if it has nothing to bake.
    pub slots: Vec<Option<AtlasRect>>,
    size: [u32; 2],
}

impl AtlasLayout {
    /// Lays out one cell per `Some` extent. Returns `None` when the cell or
    /// the whole grid does not fit in `u32` texels.
    pub fn new(extents: &[Option<[u32; 2]>], padding: u32) -> Option<Self> {
        let count = extents.iter().flatten().count() as u32;
        let max = extents
            .iter()
            .flatten()
            .fold([1u32, 1u32], |m, e| [m[0].max(e[0]), m[1].max(e[1])]);
        let border = padding.checked_mul(2)?;
        let cell = [max[0].checked_add(border)?, max[1].checked_add(border)?];
        let columns = ((count as f32).sqrt().ceil() as u32).max(1);
        let rows = count.div_ceil(columns).max(1);
        let size = [columns.checked_mul(cell[0])?, rows.checked_mul(cell[1])?];

        // every cell origin lies inside `size`, so none of these overflow
        let mut next = 0u32;
        let slots = extents
            .iter()
            .map(|extent| {
                extent.map(|_| {
                    let rect = AtlasRect {
                        x: (next % columns) * cell[0],
                        y: (next / columns) * cell[1],
                        width: cell[0],
                        height: cell[1],
                    };
                    next += 1;
                    rect
                })
            })
            .collect();

        Some(Self {
            cell,
            columns,
            rows,
            padding,
            slots,
            size,
        })
    }

    #[inline]
    pub fn size(&self) -> [u32; 2] {
        self.size
    }

    /// The part of `cell` a glyph of `extent` texels is baked into.
    ///
    /// Bakes place the content `padding` texels from the cell's bottom-left
    /// corner; atlas rows run top to bottom.
    pub fn content_rect(&self, cell: AtlasRect, extent: [u32; 2]) -> AtlasRect {
        let width = extent[0].min(cell.width.saturating_sub(2 * self.padding));
        let height = extent[1].min(cell.height.saturating_sub(2 * self.padding));
        AtlasRect {
            x: cell.x + self.padding,
            y: cell.y + cell.height - self.padding - height,
            width,
            height,
        }
    }
}

/// Single-channel coverage texture plus the sampler text quads use with it.
pub struct AtlasTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: [u32; 2],
}

impl AtlasTexture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::R8Unorm;

    pub fn new(device: &wgpu::Device, name: &str, size: [u32; 2]) -> Self {
        let label = format!("Glyph Atlas: {name}");
        let texture = texture::create_texture(
            device,
            &TextureDesc {
                label: &label,
                width: size[0],
                height: size[1],
                format: Self::FORMAT,
                usage: wgpu::TextureUsages::TEXTURE_BINDING
                    | wgpu::TextureUsages::COPY_DST
                    | wgpu::TextureUsages::COPY_SRC,
            },
        );
        let view = texture::default_view(&texture);
        let sampler = texture::linear_sampler(device, &format!("{label} Sampler"));
        Self {
            texture,
            view,
            sampler,
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_square_ish_and_skips_empty_glyphs() {
        let extents = [None, Some([10, 20]), Some([12, 8]), None, Some([4, 4]), Some([1, 1]), Some([3, 3])];
        let layout = AtlasLayout::new(&extents, 2).unwrap();
        assert_eq!(layout.cell, [16, 24]);
        assert_eq!((layout.columns, layout.rows), (3, 2));
        assert_eq!(layout.size(), [48, 48]);
        assert_eq!(layout.slots[0], None);
        assert_eq!(layout.slots[1], Some(AtlasRect { x: 0, y: 0, width: 16, height: 24 }));
        assert_eq!(layout.slots[2].map(|r| (r.x, r.y)), Some((16, 0)));
        assert_eq!(layout.slots[5].map(|r| (r.x, r.y)), Some((0, 24)));
    }

    #[test]
    fn layout_without_content_still_has_one_cell() {
        let layout = AtlasLayout::new(&[None, None], 0).unwrap();
        assert_eq!(layout.size(), [1, 1]);
        assert!(layout.slots.iter().all(Option::is_none));
    }

    #[test]
    fn oversized_layouts_are_rejected_instead_of_overflowing() {
        assert!(AtlasLayout::new(&[Some([10, 10])], u32::MAX / 2).is_none());
        assert!(AtlasLayout::new(&[Some([u32::MAX, 1])], 1).is_none());
        // each cell fits, the 2x2 grid does not
        let big = Some([u32::MAX / 2 + 1, 8]);
        assert!(AtlasLayout::new(&[big, big, big], 0).is_none());
    }

    #[test]
    fn content_rect_sits_above_the_bottom_padding() {
        let layout = AtlasLayout::new(&[Some([10, 20]), Some([4, 6])], 2).unwrap();
        let cell = layout.slots[1].unwrap();
        assert_eq!(cell, AtlasRect { x: 14, y: 0, width: 14, height: 24 });
        assert_eq!(
            layout.content_rect(cell, [4, 6]),
            AtlasRect { x: 16, y: 16, width: 4, height: 6 }
        );
        let tallest = layout.content_rect(layout.slots[0].unwrap(), [10, 20]);
        assert_eq!(tallest, AtlasRect { x: 2, y: 2, width: 10, height: 20 });
    }

    #[test]
    fn extent_snaps_to_texels() {
        let r = PixelRect { min: [-0.5, 1.2], max: [3.1, 4.0] };
        assert_eq!(content_extent(&r), [5, 3]);
    }

    #[test]
    fn huge_bounds_saturate() {
        let r = PixelRect { min: [0.0, 0.0], max: [1.0e12, f32::INFINITY] };
        assert_eq!(content_extent(&r), [u32::MAX, u32::MAX]);
    }

    #[test]
    fn uv_is_normalized_top_left_origin() {
        let r = AtlasRect { x: 16, y: 24, width: 16, height: 24 };
        assert_eq!(r.uv([64, 48]), [0.25, 0.5, 0.5, 1.0]);
    }
}
