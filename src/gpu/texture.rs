//! Depth/color render targets and image-file textures.

use std::path::Path;

use crate::error::GloamError;

/// Depth format shared by every depth attachment in the crate.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// A depth texture and its default view.
pub struct DepthTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    /// Depth attachment for a render pass (optionally multisampled).
    #[must_use]
    pub fn attachment(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> Self {
        Self::create(
            device,
            "Scene Depth",
            width,
            height,
            sample_count,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        )
    }

    /// Square depth texture rendered from the light's point of view and
    /// sampled by the lit pass.
    #[must_use]
    pub fn shadow_map(device: &wgpu::Device, resolution: u32) -> Self {
        Self::create(
            device,
            "Shadow Map",
            resolution,
            resolution,
            1,
            wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING,
        )
    }

    fn create(
        device: &wgpu::Device,
        label: &str,
        width: u32,
        height: u32,
        sample_count: u32,
        usage: wgpu::TextureUsages,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// A multisampled color target resolved into the swapchain each frame.
pub struct RenderTarget {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl RenderTarget {
    /// Create a new color target with the given dimensions, format, and
    /// sample count.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("MSAA Color Target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// A sampled 2D color texture decoded from an image file.
pub struct ImageTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
    /// Repeat-wrapped linear sampler.
    pub sampler: wgpu::Sampler,
}

impl ImageTexture {
    /// Decode `path` (PNG or JPEG) and upload it as an RGBA8 texture.
    ///
    /// # Errors
    ///
    /// Returns [`GloamError::Io`]/[`GloamError::Image`] if the file cannot
    /// be read or decoded.
    pub fn from_file(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
    ) -> Result<Self, GloamError> {
        let decoded = image::open(path)?.flipv().into_rgba8();
        let (width, height) = decoded.dimensions();
        log::info!(
            "loaded texture `{}` ({width}x{height})",
            path.display()
        );
        Ok(Self::from_pixels(device, queue, width, height, &decoded))
    }

    /// Load `path`, or fall back to a generated checkerboard so the demo
    /// runs without any assets on disk.
    #[must_use]
    pub fn from_file_or_checkerboard(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
    ) -> Self {
        match Self::from_file(device, queue, path) {
            Ok(texture) => texture,
            Err(e) => {
                log::warn!(
                    "falling back to checkerboard for `{}`: {e}",
                    path.display()
                );
                let pixels = checkerboard_pixels(CHECKERBOARD_SIZE);
                Self::from_pixels(
                    device,
                    queue,
                    CHECKERBOARD_SIZE,
                    CHECKERBOARD_SIZE,
                    &pixels,
                )
            }
        }
    }

    fn from_pixels(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Image Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Image Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}

/// A sampled cube texture for the skybox.
pub struct CubemapTexture {
    /// The underlying six-layer GPU texture.
    pub texture: wgpu::Texture,
    /// A cube-dimension view over all six faces.
    pub view: wgpu::TextureView,
    /// Clamped linear sampler.
    pub sampler: wgpu::Sampler,
}

impl CubemapTexture {
    /// Decode six face images (`+X, -X, +Y, -Y, +Z, -Z` order) and upload
    /// them as one cube texture.
    ///
    /// # Errors
    ///
    /// Returns a decode error for an unreadable face and
    /// [`GloamError::Texture`] when face sizes differ or are not square.
    pub fn from_files(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        paths: &[&Path; 6],
    ) -> Result<Self, GloamError> {
        let mut faces = Vec::with_capacity(6);
        let mut size = None;
        for path in paths {
            let decoded = image::open(path)?.into_rgba8();
            let (width, height) = decoded.dimensions();
            if width != height {
                return Err(GloamError::Texture(format!(
                    "cubemap face `{}` is not square ({width}x{height})",
                    path.display()
                )));
            }
            match size {
                None => size = Some(width),
                Some(expected) if expected != width => {
                    return Err(GloamError::Texture(format!(
                        "cubemap face `{}` is {width}px, expected {expected}px",
                        path.display()
                    )));
                }
                Some(_) => {}
            }
            faces.push(decoded.into_raw());
        }

        // Six decoded faces guarantee the size was latched.
        let size = size.unwrap_or(1);
        log::info!("loaded cubemap ({size}px faces)");
        let face_refs: Vec<&[u8]> = faces.iter().map(Vec::as_slice).collect();
        Ok(Self::from_face_pixels(device, queue, size, &face_refs))
    }

    /// Load the six faces, or fall back to a generated sky gradient so the
    /// demo runs without any assets on disk.
    #[must_use]
    pub fn from_files_or_gradient(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        paths: &[&Path; 6],
    ) -> Self {
        match Self::from_files(device, queue, paths) {
            Ok(texture) => texture,
            Err(e) => {
                log::warn!("falling back to gradient skybox: {e}");
                let faces = gradient_sky_faces(GRADIENT_FACE_SIZE);
                let face_refs: Vec<&[u8]> =
                    faces.iter().map(Vec::as_slice).collect();
                Self::from_face_pixels(
                    device,
                    queue,
                    GRADIENT_FACE_SIZE,
                    &face_refs,
                )
            }
        }
    }

    fn from_face_pixels(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        size: u32,
        faces: &[&[u8]],
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Skybox Cubemap"),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (face, pixels) in faces.iter().enumerate() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: face as u32,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(size * 4),
                    rows_per_image: Some(size),
                },
                wgpu::Extent3d {
                    width: size,
                    height: size,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Skybox Cubemap View"),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Skybox Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}

const CHECKERBOARD_SIZE: u32 = 256;
const CHECKERBOARD_CELL: u32 = 32;

fn checkerboard_pixels(size: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let even =
                ((x / CHECKERBOARD_CELL) + (y / CHECKERBOARD_CELL)) % 2 == 0;
            let rgb: [u8; 3] = if even {
                [150, 105, 60] // light wood
            } else {
                [110, 75, 40] // dark wood
            };
            pixels.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
    }
    pixels
}

const GRADIENT_FACE_SIZE: u32 = 64;

// Cubemap face order: +X, -X, +Y, -Y, +Z, -Z. Maps a texel's face-local UV
// (in [-1, 1]) to its world-space sampling direction.
fn cubemap_face_direction(face: u32, u: f32, v: f32) -> [f32; 3] {
    match face {
        0 => [1.0, -v, -u],  // +X
        1 => [-1.0, -v, u],  // -X
        2 => [u, 1.0, v],    // +Y
        3 => [u, -1.0, -v],  // -Y
        4 => [u, -v, 1.0],   // +Z
        _ => [-u, -v, -1.0], // -Z
    }
}

fn gradient_sky_faces(size: u32) -> Vec<Vec<u8>> {
    let horizon = [168.0, 178.0, 186.0];
    let zenith = [88.0, 130.0, 196.0];
    let ground = [52.0, 48.0, 44.0];

    (0..6)
        .map(|face| {
            let mut data = Vec::with_capacity((size * size * 4) as usize);
            for y in 0..size {
                for x in 0..size {
                    let u = (x as f32 + 0.5) / size as f32 * 2.0 - 1.0;
                    let v = (y as f32 + 0.5) / size as f32 * 2.0 - 1.0;
                    let dir = cubemap_face_direction(face, u, v);
                    let len = (dir[0] * dir[0]
                        + dir[1] * dir[1]
                        + dir[2] * dir[2])
                        .sqrt();
                    let up = dir[1] / len;

                    // Smooth-stepped blend: ground below the horizon, sky
                    // gradient above it.
                    let rgb = if up < 0.0 {
                        ground
                    } else {
                        let t = up * up * (3.0 - 2.0 * up);
                        [
                            horizon[0] + (zenith[0] - horizon[0]) * t,
                            horizon[1] + (zenith[1] - horizon[1]) * t,
                            horizon[2] + (zenith[2] - horizon[2]) * t,
                        ]
                    };
                    data.extend_from_slice(&[
                        rgb[0] as u8,
                        rgb[1] as u8,
                        rgb[2] as u8,
                        255,
                    ]);
                }
            }
            data
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_is_rgba_and_alternates() {
        let pixels = checkerboard_pixels(CHECKERBOARD_SIZE);
        assert_eq!(
            pixels.len(),
            (CHECKERBOARD_SIZE * CHECKERBOARD_SIZE * 4) as usize
        );
        // Opposite corners of adjacent cells differ.
        let first = &pixels[0..3];
        let next_cell_offset = (CHECKERBOARD_CELL * 4) as usize;
        let neighbor = &pixels[next_cell_offset..next_cell_offset + 3];
        assert_ne!(first, neighbor);
    }

    #[test]
    fn gradient_faces_cover_all_six_directions() {
        let faces = gradient_sky_faces(GRADIENT_FACE_SIZE);
        assert_eq!(faces.len(), 6);
        for face in &faces {
            assert_eq!(
                face.len(),
                (GRADIENT_FACE_SIZE * GRADIENT_FACE_SIZE * 4) as usize
            );
        }
        // The +Y face center looks straight up and must be pure sky.
        let up_face = &faces[2];
        let center = ((GRADIENT_FACE_SIZE / 2) * GRADIENT_FACE_SIZE
            + GRADIENT_FACE_SIZE / 2) as usize
            * 4;
        assert!(up_face[center + 2] > up_face[center]); // blue dominates
    }

    #[test]
    fn face_directions_have_unit_major_axis() {
        for face in 0..6 {
            let dir = cubemap_face_direction(face, 0.0, 0.0);
            let magnitude: f32 = dir.iter().map(|c| c.abs()).sum();
            assert_eq!(magnitude, 1.0);
        }
    }
}
