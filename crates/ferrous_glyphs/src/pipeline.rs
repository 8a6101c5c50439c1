/// `GlyphPipeline`: everything a bake needs that outlives a single font.
///
/// Holds the two compiled programs, the scratch targets and the per-sample
/// uniform buffer. One pipeline is created per device and passed explicitly
/// to [`crate::FontAsset::load`]; nothing is global.
///
/// A bake renders `samples` jittered copies of a glyph:
///
/// ```text
/// for each sample i:
///     arc pass    clear accumulation, draw edge fan + curves at offset + jitter(i)
///     blend pass  blend += min(|winding|, 1) / samples
/// copy blend → atlas cell
/// ```
///
/// Everything for one glyph goes into a single submission.
use ferrous_gpu::GpuContext;

use crate::glyph::GlyphRecord;
use crate::passes::{ArcPass, BlendPass};
use crate::scratch::ScratchTargets;
use crate::uniforms::{self, DrawUniform, DrawUniforms};

/// Sub-pixel offset of sample `index` out of `count`, in `[-0.5, 0.5)²`.
///
/// x steps evenly across the pixel, y follows the base-2 radical inverse, so
/// every row and column of an n×n sub-grid holds at most one sample.
pub fn jitter(index: u32, count: u32) -> [f32; 2] {
    let n = count.max(1) as f32;
    let x = (index as f32 + 0.5) / n - 0.5;
    let y = radical_inverse(index) + 0.5 / n - 0.5;
    [x, y]
}

fn radical_inverse(index: u32) -> f32 {
    (index.reverse_bits() as f64 / 4_294_967_296.0) as f32
}

pub struct GlyphPipeline {
    uniform_layout: wgpu::BindGroupLayout,
    uniforms: DrawUniforms,
    arc: ArcPass,
    blend: BlendPass,
    scratch: ScratchTargets,
}

impl GlyphPipeline {
    /// Creates the uniform storage. Programs and scratch targets are created
    /// on first use.
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform_layout = uniforms::layout(device);
        let uniforms = DrawUniforms::new(device, &uniform_layout, ferrous_font::MAX_SAMPLES as usize);
        Self {
            uniform_layout,
            uniforms,
            arc: ArcPass::new(),
            blend: BlendPass::new(),
            scratch: ScratchTargets::new(),
        }
    }

    /// Compiles both programs if they are not compiled yet.
    pub fn init(&mut self, device: &wgpu::Device) {
        self.arc.init(device, &self.uniform_layout);
        self.blend.init(device, &self.uniform_layout);
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.arc.is_initialized() && self.blend.is_initialized()
    }

    #[inline]
    pub fn scratch(&self) -> &ScratchTargets {
        &self.scratch
    }

    #[inline]
    pub fn scratch_mut(&mut self) -> &mut ScratchTargets {
        &mut self.scratch
    }

    /// Renders `glyph` into the blend target and submits.
    ///
    /// `origin` is where the glyph's pen position lands in the scratch
    /// targets, in pixels from the bottom-left.
    ///
    /// # Panics
    ///
    /// Panics if the scratch targets have not been allocated.
    pub fn bake(&mut self, ctx: &GpuContext, glyph: &GlyphRecord, origin: [f32; 2], samples: u32) {
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Glyph Bake Encoder"),
            });
        self.encode_bake(ctx, &mut encoder, glyph, origin, samples);
        ctx.queue.submit(Some(encoder.finish()));
    }

    /// Like [`bake`](Self::bake), then copies the blend target into `cell`
    /// of `atlas` within the same submission.
    ///
    /// # Panics
    ///
    /// Panics if the scratch targets are unallocated or smaller than `cell`.
    pub fn bake_into(
        &mut self,
        ctx: &GpuContext,
        glyph: &GlyphRecord,
        origin: [f32; 2],
        samples: u32,
        atlas: &wgpu::Texture,
        cell: crate::atlas::AtlasRect,
    ) {
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Glyph Bake Encoder"),
            });
        self.encode_bake(ctx, &mut encoder, glyph, origin, samples);

        let pair = self.scratch_pair();
        assert!(
            cell.width <= pair.width && cell.height <= pair.height,
            "atlas cell {}x{} exceeds scratch targets {}x{}",
            cell.width,
            cell.height,
            pair.width,
            pair.height
        );
        encoder.copy_texture_to_texture(
            wgpu::ImageCopyTexture {
                texture: &pair.blend.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyTexture {
                texture: atlas,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: cell.x,
                    y: cell.y,
                    z: 0,
                },
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::Extent3d {
                width: cell.width,
                height: cell.height,
                depth_or_array_layers: 1,
            },
        );
        ctx.queue.submit(Some(encoder.finish()));
    }

    fn encode_bake(
        &mut self,
        ctx: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        glyph: &GlyphRecord,
        origin: [f32; 2],
        samples: u32,
    ) {
        self.init(&ctx.device);
        let samples = samples.clamp(1, ferrous_font::MAX_SAMPLES);

        let pair = self.scratch_pair();
        let (width, height) = (pair.width, pair.height);
        let Some(signal) = self.blend.bind_signal(&ctx.device, &pair.accumulation.view) else {
            return;
        };

        let weight = 1.0 / samples as f32;
        for i in 0..samples {
            let j = jitter(i, samples);
            let uniform = DrawUniform::new(
                width,
                height,
                [origin[0] + j[0], origin[1] + j[1]],
                1.0,
                weight,
            );
            self.uniforms.write(&ctx.queue, i as usize, &uniform);
        }

        for i in 0..samples as usize {
            self.arc.encode(
                encoder,
                &pair.accumulation.view,
                &self.uniforms,
                i,
                glyph.edge_stream(),
                glyph.curve_stream(),
            );
            self.blend
                .encode(encoder, &pair.blend.view, &signal, &self.uniforms, i, i == 0);
        }
        log::trace!("baked U+{:04X} with {samples} sample(s)", glyph.codepoint as u32);
    }

    fn scratch_pair(&self) -> &crate::scratch::ScratchPair {
        match self.scratch.pair() {
            Some(pair) => pair,
            None => panic!("glyph bake before scratch targets were allocated"),
        }
    }

    /// Frees the scratch targets. The programs stay compiled; a later bake
    /// needs the scratch targets reallocated. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.scratch.is_initialized() {
            self.scratch.dispose();
            log::debug!("glyph pipeline scratch targets released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sample_is_not_jittered() {
        assert_eq!(jitter(0, 1), [0.0, 0.0]);
    }

    #[test]
    fn four_samples_form_a_rook_pattern() {
        let js: Vec<[f32; 2]> = (0..4).map(|i| jitter(i, 4)).collect();
        assert_eq!(
            js,
            vec![[-0.375, -0.375], [-0.125, 0.125], [0.125, -0.125], [0.375, 0.375]]
        );
    }

    #[test]
    fn jitter_stays_inside_the_pixel() {
        for n in 1..=16 {
            for i in 0..n {
                let [x, y] = jitter(i, n);
                assert!((-0.5..0.5).contains(&x), "x={x} for {i}/{n}");
                assert!((-0.5..0.5).contains(&y), "y={y} for {i}/{n}");
            }
        }
    }
}
