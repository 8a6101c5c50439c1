use ferrous_gpu::GpuContext;

/// Headless device, or `None` on machines without a usable adapter.
pub fn gpu() -> Option<GpuContext> {
    let _ = env_logger::builder().is_test(true).try_init();
    match pollster::block_on(GpuContext::headless()) {
        Ok(ctx) => Some(ctx),
        Err(err) => {
            eprintln!("skipping GPU test: {err:#}");
            None
        }
    }
}
