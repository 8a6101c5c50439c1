//! Validation error scopes around object creation.
//!
//! wgpu reports invalid descriptors asynchronously through error scopes. The
//! glyph pipeline treats such errors during render-target or program creation
//! as driver/configuration faults: they are never retried and abort the
//! process with a message naming the object that failed.

/// Runs `create` inside a `Validation` error scope and panics if the device
/// reported an error for anything created in it.
///
/// Popping the scope only waits for wgpu's own validation, not for GPU
/// execution.
///
/// # Panics
///
/// Panics when the device rejects any object created by `create`.
pub fn fatal_scope<T>(device: &wgpu::Device, what: &str, create: impl FnOnce() -> T) -> T {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        log::error!("{what}: {err}");
        panic!("fatal GPU error while creating {what}: {err}");
    }
    value
}
