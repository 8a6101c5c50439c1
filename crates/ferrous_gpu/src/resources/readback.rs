//! Copies texture contents back to the CPU.
//!
//! This blocks until the GPU has finished, so it is meant for tests, tooling
//! and offline export, never for the per-frame path.

/// Reads `width x height` texels starting at `origin` and returns them
/// tightly packed (row padding stripped).
///
/// `bytes_per_texel` must match the texture format (1 for `R8Unorm`, 2 for
/// `R16Float`).
///
/// # Panics
///
/// Panics if the staging buffer cannot be mapped.
pub fn read_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    origin: [u32; 2],
    width: u32,
    height: u32,
    bytes_per_texel: u32,
) -> Vec<u8> {
    // bytes per row must be a multiple of COPY_BYTES_PER_ROW_ALIGNMENT
    let unpadded = width * bytes_per_texel;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    let padded = unpadded.div_ceil(align) * align;

    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Readback Buffer"),
        size: padded as u64 * height as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Readback Encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::ImageCopyTexture {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d {
                x: origin[0],
                y: origin[1],
                z: 0,
            },
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::ImageCopyBuffer {
            buffer: &staging,
            layout: wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(padded),
                rows_per_image: None,
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    device.poll(wgpu::Maintain::Wait).panic_on_timeout();
    rx.recv()
        .expect("readback map callback was dropped")
        .expect("failed to map readback buffer");

    let mut out = Vec::with_capacity((unpadded * height) as usize);
    {
        let data = slice.get_mapped_range();
        for row in 0..height as usize {
            let start = row * padded as usize;
            out.extend_from_slice(&data[start..start + unpadded as usize]);
        }
    }
    staging.unmap();
    staging.destroy();
    out
}
