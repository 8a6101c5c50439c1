/// Coverage resolve: accumulation signal → weighted coverage in the blend
/// target.
use wgpu::util::DeviceExt;

use ferrous_gpu::{compile_module, fatal_scope};

use super::{additive_pipeline, ProgramDesc};
use crate::scratch::ScratchTargets;
use crate::shaders::GLYPH_BLEND;
use crate::uniforms::DrawUniforms;

/// Two triangles covering clip space.
const FULLSCREEN_QUAD: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

struct BlendProgram {
    pipeline: wgpu::RenderPipeline,
    signal_layout: wgpu::BindGroupLayout,
    quad: wgpu::Buffer,
}

#[derive(Default)]
pub struct BlendPass {
    program: Option<BlendProgram>,
}

impl BlendPass {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.program.is_some()
    }

    /// Compiles the blend program and uploads the full-screen quad. Later
    /// calls are no-ops.
    ///
    /// # Panics
    ///
    /// Panics if the device rejects the shader or the pipeline.
    pub fn init(&mut self, device: &wgpu::Device, uniform_layout: &wgpu::BindGroupLayout) {
        if self.program.is_some() {
            return;
        }
        let module = compile_module(device, GLYPH_BLEND);
        let program = fatal_scope(device, "blend program", || {
            let signal_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Layout: Glyph Signal"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        // R16Float read with textureLoad, never filtered
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                }],
            });
            let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Blend Pipeline Layout"),
                bind_group_layouts: &[uniform_layout, &signal_layout],
                push_constant_ranges: &[],
            });
            let pipeline = additive_pipeline(
                device,
                &ProgramDesc {
                    label: "Blend Pipeline",
                    module: &module,
                    layout: &layout,
                    vs: "vs_main",
                    fs: "fs_main",
                    format: ScratchTargets::BLEND_FORMAT,
                },
            );
            let quad = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Blend Quad"),
                contents: bytemuck::cast_slice(&FULLSCREEN_QUAD),
                usage: wgpu::BufferUsages::VERTEX,
            });
            BlendProgram {
                pipeline,
                signal_layout,
                quad,
            }
        });
        log::debug!("compiled glyph blend program");
        self.program = Some(program);
    }

    /// Binds `accumulation` as the signal texture. The result stays valid
    /// until the scratch targets are reallocated.
    pub fn bind_signal(
        &self,
        device: &wgpu::Device,
        accumulation: &wgpu::TextureView,
    ) -> Option<wgpu::BindGroup> {
        let program = self.program.as_ref()?;
        Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Glyph Signal BindGroup"),
            layout: &program.signal_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(accumulation),
            }],
        }))
    }

    /// Records the pass. `clear` resets the blend target first; it is set for
    /// the first sample of a glyph only so later samples add up.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        signal: &wgpu::BindGroup,
        uniforms: &DrawUniforms,
        slot: usize,
        clear: bool,
    ) {
        let Some(program) = &self.program else {
            log::error!("blend pass used before init; sample skipped");
            return;
        };
        let load = if clear {
            wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT)
        } else {
            wgpu::LoadOp::Load
        };

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Glyph Blend Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_pipeline(&program.pipeline);
        rpass.set_bind_group(0, uniforms.bind_group(), &[uniforms.offset(slot)]);
        rpass.set_bind_group(1, signal, &[]);
        rpass.set_vertex_buffer(0, program.quad.slice(..));
        rpass.draw(0..FULLSCREEN_QUAD.len() as u32, 0..1);
    }
}
