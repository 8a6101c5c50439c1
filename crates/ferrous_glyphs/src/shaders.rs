//! WGSL sources embedded under their fixed resource names.

use ferrous_gpu::ShaderSource;

pub const GLYPH_ARC: ShaderSource = ShaderSource {
    name: "glyph_arc.wgsl",
    wgsl: include_str!("../../../assets/shaders/glyph_arc.wgsl"),
};

pub const GLYPH_BLEND: ShaderSource = ShaderSource {
    name: "glyph_blend.wgsl",
    wgsl: include_str!("../../../assets/shaders/glyph_blend.wgsl"),
};
