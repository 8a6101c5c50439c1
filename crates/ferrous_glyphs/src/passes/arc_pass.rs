/// Winding accumulation: edge fan plus curve correction in one render pass.
use ferrous_gpu::{compile_module, fatal_scope};

use super::{additive_pipeline, ProgramDesc};
use crate::glyph::GlyphStream;
use crate::scratch::ScratchTargets;
use crate::shaders::GLYPH_ARC;
use crate::uniforms::DrawUniforms;

struct ArcProgram {
    fill: wgpu::RenderPipeline,
    arc: wgpu::RenderPipeline,
}

/// Draws a glyph's streams into the accumulation target.
///
/// The pass always begins by clearing the target to zero, so whatever the
/// previous glyph left behind can never leak into the next bake.
#[derive(Default)]
pub struct ArcPass {
    program: Option<ArcProgram>,
}

impl ArcPass {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.program.is_some()
    }

    /// Compiles the arc program. Later calls are no-ops.
    ///
    /// # Panics
    ///
    /// Panics if the device rejects the shader or either pipeline.
    pub fn init(&mut self, device: &wgpu::Device, uniform_layout: &wgpu::BindGroupLayout) {
        if self.program.is_some() {
            return;
        }
        let module = compile_module(device, GLYPH_ARC);
        let program = fatal_scope(device, "arc program", || {
            let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Arc Pipeline Layout"),
                bind_group_layouts: &[uniform_layout],
                push_constant_ranges: &[],
            });
            let desc = |label, vs, fs| ProgramDesc {
                label,
                module: &module,
                layout: &layout,
                vs,
                fs,
                format: ScratchTargets::ACCUMULATION_FORMAT,
            };
            ArcProgram {
                fill: additive_pipeline(device, &desc("Arc Fill Pipeline", "vs_fill", "fs_fill")),
                arc: additive_pipeline(device, &desc("Arc Curve Pipeline", "vs_arc", "fs_arc")),
            }
        });
        log::debug!("compiled glyph arc program");
        self.program = Some(program);
    }

    /// Records the pass: clear `target`, draw the edge fan, then the curve
    /// triangles, both with the uniforms in `slot`.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        uniforms: &DrawUniforms,
        slot: usize,
        edge: &GlyphStream,
        curve: &GlyphStream,
    ) {
        let Some(program) = &self.program else {
            log::error!("arc pass used before init; glyph skipped");
            return;
        };

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Glyph Arc Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_bind_group(0, uniforms.bind_group(), &[uniforms.offset(slot)]);

        for (pipeline, stream) in [(&program.fill, edge), (&program.arc, curve)] {
            if let Some(buffer) = stream.buffer() {
                rpass.set_pipeline(pipeline);
                rpass.set_vertex_buffer(0, buffer.slice(..));
                rpass.draw(0..stream.vertex_count(), 0..1);
            }
        }
    }
}
