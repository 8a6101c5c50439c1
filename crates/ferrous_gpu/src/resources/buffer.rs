/// Thin wrappers over `wgpu::Buffer` creation that fix the usage flags for
/// the two kinds of buffer the glyph pipeline allocates.
use std::sync::Arc;
use wgpu::util::DeviceExt;

/// Creates a position-only vertex buffer from a slice of `Pod` data.
///
/// Returns `None` for an empty slice: zero-vertex streams (the space glyph)
/// own no GPU memory and are skipped at draw time.
pub fn create_vertex<T: bytemuck::Pod>(
    device: &wgpu::Device,
    label: &str,
    data: &[T],
) -> Option<Arc<wgpu::Buffer>> {
    if data.is_empty() {
        return None;
    }
    Some(Arc::new(device.create_buffer_init(
        &wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::VERTEX,
        },
    )))
}

/// Allocates a zeroed uniform buffer of `size` bytes that is rewritten
/// through `Queue::write_buffer`.
pub fn create_uniform_storage(device: &wgpu::Device, label: &str, size: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Round `value` up to the next multiple of `alignment` (which must be a
/// power of two).
#[inline]
pub fn align_up(value: u32, alignment: u32) -> u32 {
    (value + alignment - 1) & !(alignment - 1)
}

#[cfg(test)]
mod tests {
    use super::align_up;

    #[test]
    fn align_up_rounds_to_power_of_two() {
        assert_eq!(align_up(80, 256), 256);
        assert_eq!(align_up(256, 256), 256);
        assert_eq!(align_up(257, 64), 320);
        assert_eq!(align_up(0, 16), 0);
    }
}
