mod common;

use ferrous_font::{FontSource, LoadOptions};
use ferrous_glyphs::{FontAsset, GlyphPipeline, GlyphRecord};
use ferrous_gpu::resources::readback::read_texture;
use ferrous_gpu::GpuContext;

const PADDING: f32 = 2.0;

fn bake_and_read(pipeline: &mut GlyphPipeline, ctx: &GpuContext, glyph: &GlyphRecord) -> Vec<u8> {
    let origin = [PADDING - glyph.bearing[0], PADDING - glyph.bearing[1]];
    pipeline.bake(ctx, glyph, origin, 4);
    let pair = pipeline.scratch().pair().expect("scratch targets allocated");
    read_texture(&ctx.device, &ctx.queue, &pair.blend.texture, [0, 0], pair.width, pair.height, 1)
}

#[test]
fn previous_glyph_does_not_bleed_into_the_next() {
    let Some(ctx) = common::gpu() else { return };
    let mut pipeline = GlyphPipeline::new(&ctx.device);
    let font = FontAsset::load(&mut pipeline, &ctx, FontSource::Fallback, &LoadOptions::default())
        .expect("fallback font loads");
    let a = font.glyph_for_codepoint('A');
    let b = font.glyph_for_codepoint('B');

    let b_alone = bake_and_read(&mut pipeline, &ctx, b);
    let a_only = bake_and_read(&mut pipeline, &ctx, a);
    let b_after_a = bake_and_read(&mut pipeline, &ctx, b);

    assert!(b_alone.iter().any(|&v| v > 0), "'B' left no coverage");
    assert_ne!(a_only, b_alone);
    assert_eq!(b_after_a, b_alone);
}

#[test]
fn programs_compile_once() {
    let Some(ctx) = common::gpu() else { return };
    let mut pipeline = GlyphPipeline::new(&ctx.device);
    assert!(!pipeline.is_initialized());
    pipeline.init(&ctx.device);
    pipeline.init(&ctx.device);
    assert!(pipeline.is_initialized());
}

#[test]
fn independent_pipelines_do_not_share_scratch() {
    let Some(ctx) = common::gpu() else { return };
    let mut small = GlyphPipeline::new(&ctx.device);
    let mut large = GlyphPipeline::new(&ctx.device);
    let a = FontAsset::load(&mut small, &ctx, FontSource::Fallback, &LoadOptions::default().with_pixel_height(16.0))
        .expect("fallback font loads");
    let b = FontAsset::load(&mut large, &ctx, FontSource::Fallback, &LoadOptions::default().with_pixel_height(64.0))
        .expect("fallback font loads");

    assert!(a.is_valid() && b.is_valid());
    let (sw, sh) = small.scratch().size().expect("allocated");
    let (lw, lh) = large.scratch().size().expect("allocated");
    assert!(sw < lw && sh < lh);
    assert!(a.atlas_size()[0] < b.atlas_size()[0]);
}

#[test]
fn sample_counts_beyond_the_maximum_are_clamped() {
    let Some(ctx) = common::gpu() else { return };
    let mut pipeline = GlyphPipeline::new(&ctx.device);
    let font = FontAsset::load(&mut pipeline, &ctx, FontSource::Fallback, &LoadOptions::default())
        .expect("fallback font loads");
    let a = font.glyph_for_codepoint('A');
    let origin = [PADDING - a.bearing[0], PADDING - a.bearing[1]];

    let read = |pipeline: &GlyphPipeline| {
        let pair = pipeline.scratch().pair().expect("scratch targets allocated");
        read_texture(&ctx.device, &ctx.queue, &pair.blend.texture, [0, 0], pair.width, pair.height, 1)
    };
    pipeline.bake(&ctx, a, origin, ferrous_font::MAX_SAMPLES);
    let at_max = read(&pipeline);
    pipeline.bake(&ctx, a, origin, ferrous_font::MAX_SAMPLES * 4);
    let beyond = read(&pipeline);

    assert!(at_max.iter().any(|&v| v > 0));
    assert_eq!(beyond, at_max);
}

#[test]
fn record_cloned_before_dispose_still_bakes() {
    let Some(ctx) = common::gpu() else { return };
    let mut pipeline = GlyphPipeline::new(&ctx.device);
    let mut font = FontAsset::load(&mut pipeline, &ctx, FontSource::Fallback, &LoadOptions::default())
        .expect("fallback font loads");
    let before = bake_and_read(&mut pipeline, &ctx, font.glyph_for_codepoint('A'));
    let kept = font.glyph_for_codepoint('A').clone();

    font.dispose();
    assert!(!font.glyph_for_codepoint('A').is_valid());
    assert!(kept.is_valid());
    assert!(kept.edge_stream().buffer().is_some());

    let after = bake_and_read(&mut pipeline, &ctx, &kept);
    assert!(after.iter().any(|&v| v > 0), "'A' left no coverage");
    assert_eq!(after, before);
}
