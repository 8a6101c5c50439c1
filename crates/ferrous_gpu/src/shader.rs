//! WGSL compilation helper.

use std::borrow::Cow;

use crate::scope::fatal_scope;

/// A shader embedded in the binary under a fixed resource name.
#[derive(Debug, Clone, Copy)]
pub struct ShaderSource {
    pub name: &'static str,
    pub wgsl: &'static str,
}

/// Compiles `source` into a shader module.
///
/// # Panics
///
/// A source that fails to parse or validate is a build defect, not a runtime
/// condition, so the error aborts instead of being returned.
pub fn compile_module(device: &wgpu::Device, source: ShaderSource) -> wgpu::ShaderModule {
    log::debug!("compiling shader `{}`", source.name);
    fatal_scope(device, source.name, || {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(source.name),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(source.wgsl)),
        })
    })
}
