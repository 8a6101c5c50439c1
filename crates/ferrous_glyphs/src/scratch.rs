/// The pair of off-screen targets every bake renders into.
///
/// * **accumulation** (`R16Float`): signed winding sum written by the arc
///   pass, read back with `textureLoad` by the blend pass.
/// * **blend** (`R8Unorm`): coverage summed over jitter samples, copied into
///   the atlas once a glyph is done.
///
/// Both share one size. The pair is either fully allocated or absent; any
/// failure to allocate it is a fatal GPU fault.
use ferrous_gpu::fatal_scope;
use ferrous_gpu::resources::texture::{self, TextureDesc};

/// One texture plus its default view.
pub struct ScratchTarget {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl ScratchTarget {
    fn new(
        device: &wgpu::Device,
        label: &str,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        usage: wgpu::TextureUsages,
    ) -> Self {
        let texture = texture::create_texture(
            device,
            &TextureDesc {
                label,
                width,
                height,
                format,
                usage,
            },
        );
        let view = texture::default_view(&texture);
        Self { texture, view }
    }
}

pub struct ScratchPair {
    pub accumulation: ScratchTarget,
    pub blend: ScratchTarget,
    pub width: u32,
    pub height: u32,
}

#[derive(Default)]
pub struct ScratchTargets {
    pair: Option<ScratchPair>,
    allocated: u64,
    released: u64,
}

impl ScratchTargets {
    pub const ACCUMULATION_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::R16Float;
    pub const BLEND_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::R8Unorm;

    /// Starts unallocated; call [`reinit`](Self::reinit) or
    /// [`ensure`](Self::ensure) before baking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases the current pair (if any) and allocates a new one of the
    /// given size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or exceeds the device's 2-D texture
    /// limit, or if the device rejects either texture.
    pub fn reinit(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.release();

        let limit = device.limits().max_texture_dimension_2d;
        if width == 0 || height == 0 || width > limit || height > limit {
            log::error!("scratch targets {width}x{height} cannot be allocated (limit {limit})");
            panic!("incomplete scratch targets: {width}x{height} (limit {limit})");
        }

        let pair = fatal_scope(device, "scratch targets", || ScratchPair {
            accumulation: ScratchTarget::new(
                device,
                "Glyph Accumulation Target",
                width,
                height,
                Self::ACCUMULATION_FORMAT,
                wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            ),
            blend: ScratchTarget::new(
                device,
                "Glyph Blend Target",
                width,
                height,
                Self::BLEND_FORMAT,
                wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::TEXTURE_BINDING
                    | wgpu::TextureUsages::COPY_SRC,
            ),
            width,
            height,
        });
        self.allocated += 2;
        log::debug!("scratch targets allocated at {width}x{height}");
        self.pair = Some(pair);
    }

    /// Reallocates only when the pair is missing or has a different size.
    pub fn ensure(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.size() != Some((width, height)) {
            self.reinit(device, width, height);
        }
    }

    /// Frees both targets. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(pair) = self.pair.take() {
            pair.accumulation.texture.destroy();
            pair.blend.texture.destroy();
            self.released += 2;
        }
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.pair.is_some()
    }

    #[inline]
    pub fn size(&self) -> Option<(u32, u32)> {
        self.pair.as_ref().map(|p| (p.width, p.height))
    }

    #[inline]
    pub fn pair(&self) -> Option<&ScratchPair> {
        self.pair.as_ref()
    }

    /// Textures currently held: 2 while allocated, 0 otherwise.
    #[inline]
    pub fn live_textures(&self) -> u64 {
        self.allocated - self.released
    }

    /// Total textures ever allocated.
    #[inline]
    pub fn allocations(&self) -> u64 {
        self.allocated
    }
}
