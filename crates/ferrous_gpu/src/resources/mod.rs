pub mod buffer;
pub mod readback;
pub mod texture;
