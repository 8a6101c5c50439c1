//! Bakes a font into a coverage atlas and writes it out as a grayscale PNG.
//!
//! ```text
//! cargo run -p ferrous_glyphs --example bake_atlas -- [font.ttf] [atlas.png] [pixel_height]
//! ```
//!
//! Without a font path the built-in fallback face is used.

use anyhow::{bail, Context, Result};
use ferrous_font::{FontSource, LoadOptions};
use ferrous_glyphs::{FontAsset, GlyphPipeline};
use ferrous_gpu::resources::readback::read_texture;
use ferrous_gpu::GpuContext;

fn main() -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{:<5} {}] {}", record.level(), record.target(), message))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stderr())
        .apply()?;

    let mut args = std::env::args().skip(1);
    let source = match args.next() {
        Some(path) if path != "-" => FontSource::from_path(path),
        _ => FontSource::Fallback,
    };
    let output = args.next().unwrap_or_else(|| "atlas.png".to_string());
    let pixel_height: f32 = match args.next() {
        Some(h) => h.parse().context("pixel height must be a number")?,
        None => 48.0,
    };

    let ctx = pollster::block_on(GpuContext::headless())?;
    let mut pipeline = GlyphPipeline::new(&ctx.device);
    let options = LoadOptions::default().with_pixel_height(pixel_height);
    let font = FontAsset::load(&mut pipeline, &ctx, source, &options)?;

    let Some(atlas) = font.atlas() else {
        bail!("font `{}` has no atlas", font.name());
    };
    let [width, height] = font.atlas_size();
    let texels = read_texture(&ctx.device, &ctx.queue, &atlas.texture, [0, 0], width, height, 1);
    let image = image::GrayImage::from_raw(width, height, texels).context("atlas readback has the wrong size")?;
    image
        .save(&output)
        .with_context(|| format!("writing {output}"))?;

    let present = font.glyphs().filter(|g| g.is_valid()).count();
    println!(
        "{}: {present}/{} glyphs, {width}x{height} atlas -> {output}",
        font.name(),
        font.alphabet().len()
    );

    pipeline.dispose();
    Ok(())
}
