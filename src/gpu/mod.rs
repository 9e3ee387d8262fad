//! GPU resource management.
//!
//! Provides wgpu device/surface initialization, bind-group-layout entry
//! helpers, depth/color render targets, image-file texture upload, and
//! WGSL shader loading from disk.

/// Shared bind-group-layout entry helpers.
pub mod bindings;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader modules loaded (and reloaded) from disk.
pub mod shader;
/// Depth/color render targets and image-file textures.
pub mod texture;
