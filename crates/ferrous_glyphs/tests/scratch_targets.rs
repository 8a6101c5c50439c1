mod common;

use std::panic::{catch_unwind, AssertUnwindSafe};

use ferrous_glyphs::ScratchTargets;

#[test]
fn reinit_replaces_the_pair() {
    let Some(ctx) = common::gpu() else { return };
    let mut targets = ScratchTargets::new();
    assert!(!targets.is_initialized());
    assert_eq!(targets.live_textures(), 0);

    targets.reinit(&ctx.device, 64, 32);
    targets.reinit(&ctx.device, 16, 8);

    assert_eq!(targets.size(), Some((16, 8)));
    assert_eq!(targets.live_textures(), 2);
    assert_eq!(targets.allocations(), 4);
    let pair = targets.pair().expect("allocated");
    assert_eq!((pair.accumulation.texture.width(), pair.accumulation.texture.height()), (16, 8));
    assert_eq!((pair.blend.texture.width(), pair.blend.texture.height()), (16, 8));
    assert_eq!(pair.accumulation.texture.format(), ScratchTargets::ACCUMULATION_FORMAT);
    assert_eq!(pair.blend.texture.format(), ScratchTargets::BLEND_FORMAT);
}

#[test]
fn ensure_keeps_a_matching_pair() {
    let Some(ctx) = common::gpu() else { return };
    let mut targets = ScratchTargets::new();
    targets.ensure(&ctx.device, 32, 32);
    targets.ensure(&ctx.device, 32, 32);
    assert_eq!(targets.allocations(), 2);
    targets.ensure(&ctx.device, 40, 32);
    assert_eq!(targets.allocations(), 4);
    assert_eq!(targets.live_textures(), 2);
}

#[test]
fn dispose_is_idempotent() {
    let Some(ctx) = common::gpu() else { return };
    let mut never = ScratchTargets::new();
    never.dispose();
    assert_eq!(never.live_textures(), 0);

    let mut targets = ScratchTargets::new();
    targets.reinit(&ctx.device, 8, 8);
    targets.dispose();
    targets.dispose();
    assert!(!targets.is_initialized());
    assert_eq!(targets.size(), None);
    assert_eq!(targets.live_textures(), 0);
}

#[test]
fn impossible_size_is_fatal() {
    let Some(ctx) = common::gpu() else { return };
    let too_wide = ctx.max_texture_dimension() + 1;
    for (w, h) in [(0, 4), (4, 0), (too_wide, 4)] {
        let mut targets = ScratchTargets::new();
        let result = catch_unwind(AssertUnwindSafe(|| targets.reinit(&ctx.device, w, h)));
        assert!(result.is_err(), "{w}x{h} should abort");
        assert!(!targets.is_initialized());
    }
}
