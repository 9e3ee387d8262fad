//! WGSL shader modules loaded from disk.
//!
//! Shaders stay on disk (rather than `include_str!`) so they can be hot
//! swapped at runtime: the viewer rebuilds its pipelines from freshly
//! loaded modules when the reload key is pressed. Validation errors are
//! caught through a wgpu error scope, so a broken edit reports an error
//! and leaves the previous pipeline running.

use std::path::Path;

use crate::error::GloamError;

/// Load and validate a WGSL shader module from `path`.
///
/// # Errors
///
/// Returns [`GloamError::Io`] if the file cannot be read and
/// [`GloamError::Shader`] if the WGSL fails validation.
pub fn load_shader_module(
    device: &wgpu::Device,
    path: &Path,
) -> Result<wgpu::ShaderModule, GloamError> {
    let source = std::fs::read_to_string(path)?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: path.to_str(),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        return Err(GloamError::Shader(format!(
            "{}: {error}",
            path.display()
        )));
    }

    log::debug!("loaded shader `{}`", path.display());
    Ok(module)
}
