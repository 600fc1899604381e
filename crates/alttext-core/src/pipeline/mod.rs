//! Per-image pipeline components.
//!
//! - **discovery**: Expand input paths into image files
//! - **validate**: Size limits and header sniffing
//! - **load**: Read image bytes from disk or memory
//! - **describe**: Run one image through the vision provider

pub mod describe;
pub mod discovery;
pub mod load;
pub mod validate;

// Re-exports for convenient access
pub use describe::Describer;
pub use discovery::FileDiscovery;
pub use load::ImageLoader;
pub use validate::{detect_media_type, Validator};
