/// The two render passes a glyph bake is made of.
///
/// * [`ArcPass`] draws the edge and curve streams into the accumulation
///   target, producing a signed winding value per pixel.
/// * [`BlendPass`] resolves that value into coverage and adds it, weighted,
///   into the blend target.
///
/// Both programs are compiled lazily and at most once; see
/// [`ArcPass::init`] and [`BlendPass::init`].
pub mod arc_pass;
pub mod blend_pass;

pub use arc_pass::ArcPass;
pub use blend_pass::BlendPass;

/// Every stream in the pipeline is a tightly packed `vec2<f32>` at location 0.
pub(crate) const POSITION_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x2,
    }],
};

/// `dst = dst + src` on every channel.
pub(crate) const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Entry points and target of one additive, non-culled triangle program.
pub(crate) struct ProgramDesc<'a> {
    pub label: &'a str,
    pub module: &'a wgpu::ShaderModule,
    pub layout: &'a wgpu::PipelineLayout,
    pub vs: &'a str,
    pub fs: &'a str,
    pub format: wgpu::TextureFormat,
}

/// Builds a triangle-list pipeline with additive blending and no culling:
/// back-facing triangles carry the negative half of the winding sum.
pub(crate) fn additive_pipeline(device: &wgpu::Device, desc: &ProgramDesc<'_>) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(desc.layout),
        vertex: wgpu::VertexState {
            module: desc.module,
            entry_point: Some(desc.vs),
            buffers: &[POSITION_LAYOUT],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.module,
            entry_point: Some(desc.fs),
            targets: &[Some(wgpu::ColorTargetState {
                format: desc.format,
                blend: Some(ADDITIVE),
                write_mask: wgpu::ColorWrites::RED,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
