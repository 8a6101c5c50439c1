/// Per-draw uniforms for the arc and blend passes.
///
/// A glyph is baked in several jittered samples, all recorded into one
/// command encoder. `Queue::write_buffer` calls land before the whole
/// submission, so one uniform buffer cannot be rewritten between samples.
/// Instead every sample gets its own slot and the passes bind the buffer
/// with a dynamic offset:
///
/// ```text
/// rpass.set_bind_group(0, uniforms.bind_group(), &[uniforms.offset(sample)]);
/// ```
///
/// Slots are `align_up(size_of::<DrawUniform>(), min_uniform_buffer_offset_alignment)`
/// bytes apart.
use ferrous_gpu::resources::buffer::{align_up, create_uniform_storage};

/// Mirrors `struct Draw` in the glyph shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniform {
    /// Pixel space → clip space.
    pub projection: [[f32; 4]; 4],
    /// x, y offset in pixels, scale, sample weight.
    pub params: [f32; 4],
}

impl DrawUniform {
    pub const SIZE: u64 = std::mem::size_of::<DrawUniform>() as u64;

    /// Orthographic projection of a `width x height` pixel area, origin at
    /// the bottom-left, y up.
    pub fn new(width: u32, height: u32, offset: [f32; 2], scale: f32, weight: f32) -> Self {
        let projection =
            glam::Mat4::orthographic_rh(0.0, width as f32, 0.0, height as f32, -1.0, 1.0);
        Self {
            projection: projection.to_cols_array_2d(),
            params: [offset[0], offset[1], scale, weight],
        }
    }
}

/// Bind-group layout entry shared by both glyph programs (group 0).
pub fn layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Layout: Glyph Draw (dynamic)"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: true,
                min_binding_size: wgpu::BufferSize::new(DrawUniform::SIZE),
            },
            count: None,
        }],
    })
}

/// A uniform buffer holding one [`DrawUniform`] per slot, sized once for
/// the largest sample count a bake can use.
pub struct DrawUniforms {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    stride: u32,
    capacity: usize,
}

impl DrawUniforms {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, capacity: usize) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment;
        let stride = align_up(DrawUniform::SIZE as u32, alignment);
        let capacity = capacity.max(1);
        let buffer = create_uniform_storage(device, "Glyph Draw Uniforms", capacity as u64 * stride as u64);
        let bind_group = Self::create_bind_group(device, layout, &buffer);
        Self {
            buffer,
            bind_group,
            stride,
            capacity,
        }
    }

    #[inline]
    pub fn offset(&self, slot: usize) -> u32 {
        slot as u32 * self.stride
    }

    #[inline]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Writes `uniform` into `slot`. Panics in debug builds if `slot` is out
    /// of range.
    pub fn write(&self, queue: &wgpu::Queue, slot: usize, uniform: &DrawUniform) {
        debug_assert!(slot < self.capacity, "draw uniform slot out of range");
        queue.write_buffer(&self.buffer, self.offset(slot) as u64, bytemuck::bytes_of(uniform));
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Glyph Draw BindGroup"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer,
                    offset: 0,
                    // the dynamic window the shader sees
                    size: wgpu::BufferSize::new(DrawUniform::SIZE),
                }),
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_matches_wgsl_layout() {
        // mat4x4<f32> + vec4<f32>
        assert_eq!(DrawUniform::SIZE, 80);
    }

    #[test]
    fn projection_maps_pixel_corners_to_clip_corners() {
        let u = DrawUniform::new(64, 32, [1.0, 2.0], 1.0, 0.25);
        let m = glam::Mat4::from_cols_array_2d(&u.projection);
        let bl = m * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let tr = m * glam::Vec4::new(64.0, 32.0, 0.0, 1.0);
        assert!((bl.x + 1.0).abs() < 1e-6 && (bl.y + 1.0).abs() < 1e-6);
        assert!((tr.x - 1.0).abs() < 1e-6 && (tr.y - 1.0).abs() < 1e-6);
        assert_eq!(u.params, [1.0, 2.0, 1.0, 0.25]);
    }
}
