/// `ferrous_gpu`: the thin graphics-API layer shared by the font crates.
///
/// # Module layout
///
/// | Module      | Responsibility                                          |
/// |-------------|---------------------------------------------------------|
/// | `context`   | `GpuContext`: instance / adapter / device / queue       |
/// | `resources` | Buffer, texture and readback helpers                    |
/// | `scope`     | Validation error scopes that abort on driver faults     |
/// | `shader`    | WGSL module compilation (fatal on failure)              |
pub mod context;
pub mod resources;
pub mod scope;
pub mod shader;

pub use context::{ContextError, GpuContext};
pub use scope::fatal_scope;
pub use shader::{compile_module, ShaderSource};
