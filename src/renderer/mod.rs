//! The demo scene renderer.
//!
//! Four passes per frame: a depth-only shadow pass from the directional
//! light, the shadow-mapped lit pass over a ground plane and three cubes,
//! a skybox pass, and (replacing the lit output while requested) a
//! fullscreen debug view of the shadow map. Pipelines are built from WGSL
//! files on disk and can be hot swapped at runtime.

mod debug_quad;
mod scene;
mod shadow;
mod skybox;
pub mod uniforms;

use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use debug_quad::DebugQuadPass;
use scene::ScenePass;
use shadow::ShadowPass;
use skybox::SkyboxPass;
use uniforms::{gl_to_wgpu, DirectionalLight, ModelUniform};
use wgpu::util::DeviceExt;

use crate::camera::Camera;
use crate::error::GloamError;
use crate::geometry::{
    cube_vertices_ndc, CUBE_VERTICES, PLANE_VERTICES, SKYBOX_VERTICES,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader::load_shader_module;
use crate::gpu::texture::{
    CubemapTexture, DepthTexture, ImageTexture, RenderTarget,
};
use crate::math::{Mat4, Vec3};
use crate::options::Options;

const SHADERS_DIR: &str = "shaders";
const ASSETS_DIR: &str = "assets";

// Relative to SHADERS_DIR; order matches the module array in
// `load_shader_modules`.
const SHADER_FILES: [&str; 4] = [
    "shadow_depth.wgsl",
    "scene.wgsl",
    "skybox.wgsl",
    "debug_quad.wgsl",
];

// Face order: +X, -X, +Y, -Y, +Z, -Z.
const SKYBOX_FACES: [&str; 6] =
    ["right.jpg", "left.jpg", "top.jpg", "bottom.jpg", "front.jpg", "back.jpg"];

#[derive(Debug, Clone, Copy)]
enum Mesh {
    Plane,
    Cube,
}

struct SceneObject {
    mesh: Mesh,
    model: Mat4,
}

// The ground plane plus three cubes: two sitting on the plane, one
// floating and tilted so it casts an interesting shadow.
fn scene_objects() -> Vec<SceneObject> {
    vec![
        SceneObject {
            mesh: Mesh::Plane,
            model: Mat4::IDENTITY,
        },
        SceneObject {
            mesh: Mesh::Cube,
            model: Mat4::from_translation(Vec3::new(0.0, 1.5, 0.0))
                * Mat4::from_scale(Vec3::splat(0.5)),
        },
        SceneObject {
            mesh: Mesh::Cube,
            model: Mat4::from_translation(Vec3::new(2.0, 0.0, 1.0))
                * Mat4::from_scale(Vec3::splat(0.5)),
        },
        SceneObject {
            mesh: Mesh::Cube,
            model: Mat4::from_translation(Vec3::new(-1.0, 0.0, 2.0))
                * Mat4::from_axis_angle(
                    Vec3::new(1.0, 0.0, 1.0),
                    60.0_f32.to_radians(),
                )
                * Mat4::from_scale(Vec3::splat(0.25)),
        },
    ]
}

struct GeometryBuffers {
    plane: wgpu::Buffer,
    cube: wgpu::Buffer,
    skybox: wgpu::Buffer,
}

impl GeometryBuffers {
    fn new(device: &wgpu::Device) -> Self {
        let plane =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Plane Vertex Buffer"),
                contents: bytemuck::cast_slice(&PLANE_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let cube =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Cube Vertex Buffer"),
                contents: bytemuck::cast_slice(&cube_vertices_ndc()),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let skybox =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Skybox Vertex Buffer"),
                contents: bytemuck::cast_slice(&SKYBOX_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });
        Self {
            plane,
            cube,
            skybox,
        }
    }
}

// Per-object uniforms packed into one buffer, selected per draw with a
// dynamic offset.
struct ModelBuffers {
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    stride: u64,
}

impl ModelBuffers {
    fn new(device: &wgpu::Device, objects: &[SceneObject]) -> Self {
        let size = size_of::<ModelUniform>() as u64;
        let alignment =
            u64::from(device.limits().min_uniform_buffer_offset_alignment);
        let stride = size.div_ceil(alignment) * alignment;

        let mut contents = vec![0_u8; (stride * objects.len() as u64) as usize];
        for (i, object) in objects.iter().enumerate() {
            let offset = i * stride as usize;
            let uniform = ModelUniform::new(object.model);
            contents[offset..offset + size as usize]
                .copy_from_slice(bytemuck::bytes_of(&uniform));
        }

        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Model Uniform Buffer"),
                contents: &contents,
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Model Bind Group Layout"),
                entries: &[crate::gpu::bindings::uniform_buffer_dynamic(
                    0,
                    wgpu::ShaderStages::VERTEX,
                )],
            },
        );
        let bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Model Bind Group"),
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(
                        wgpu::BufferBinding {
                            buffer: &buffer,
                            offset: 0,
                            size: NonZeroU64::new(size),
                        },
                    ),
                }],
            });

        Self {
            layout,
            bind_group,
            stride,
        }
    }
}

/// Owns the GPU context, pipelines, and scene resources, and records the
/// per-frame passes.
pub struct Renderer {
    context: RenderContext,
    light: DirectionalLight,
    objects: Vec<SceneObject>,
    geometry: GeometryBuffers,
    models: ModelBuffers,
    depth: DepthTexture,
    msaa_target: Option<RenderTarget>,
    shadow: ShadowPass,
    scene: ScenePass,
    skybox: SkyboxPass,
    debug_quad: DebugQuadPass,
}

impl Renderer {
    /// Create the GPU context and every pipeline and resource the demo
    /// scene needs.
    ///
    /// # Errors
    ///
    /// Returns an error when GPU initialization fails or a shader fails to
    /// load; missing texture assets fall back to generated placeholders
    /// instead of failing.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        options: &Options,
    ) -> Result<Self, GloamError> {
        let context =
            RenderContext::new(window, initial_size, &options.window).await?;
        let device = &context.device;

        let [shadow_shader, scene_shader, skybox_shader, quad_shader] =
            load_shader_modules(device)?;

        let objects = scene_objects();
        let geometry = GeometryBuffers::new(device);
        let models = ModelBuffers::new(device, &objects);

        let wood = ImageTexture::from_file_or_checkerboard(
            device,
            &context.queue,
            &Path::new(ASSETS_DIR).join("wood.png"),
        );
        let skybox_dir = Path::new(ASSETS_DIR).join("skybox");
        let face_paths: Vec<PathBuf> =
            SKYBOX_FACES.iter().map(|f| skybox_dir.join(f)).collect();
        let face_refs: [&Path; 6] = [
            &face_paths[0],
            &face_paths[1],
            &face_paths[2],
            &face_paths[3],
            &face_paths[4],
            &face_paths[5],
        ];
        let cubemap = CubemapTexture::from_files_or_gradient(
            device,
            &context.queue,
            &face_refs,
        );

        let depth = DepthTexture::attachment(
            device,
            context.config.width,
            context.config.height,
            context.sample_count,
        );
        let msaa_target = (context.sample_count > 1).then(|| {
            RenderTarget::new(
                device,
                context.config.width,
                context.config.height,
                context.format(),
                context.sample_count,
            )
        });

        let shadow = ShadowPass::new(device, &models.layout, &shadow_shader)?;
        let scene = ScenePass::new(
            device,
            context.format(),
            context.sample_count,
            &models.layout,
            &shadow.depth.view,
            &wood,
            &scene_shader,
        )?;
        let skybox = SkyboxPass::new(
            device,
            context.format(),
            context.sample_count,
            &cubemap,
            &skybox_shader,
        )?;
        let debug_quad = DebugQuadPass::new(
            device,
            context.format(),
            &shadow.depth.view,
            &quad_shader,
        )?;

        Ok(Self {
            context,
            light: DirectionalLight::default(),
            objects,
            geometry,
            models,
            depth,
            msaa_target,
            shadow,
            scene,
            skybox,
            debug_quad,
        })
    }

    /// Current swapchain aspect ratio (width / height).
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.context.config.width as f32 / self.context.config.height as f32
    }

    /// Resize the swapchain and the size-dependent attachments.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.depth = DepthTexture::attachment(
            &self.context.device,
            self.context.config.width,
            self.context.config.height,
            self.context.sample_count,
        );
        if self.msaa_target.is_some() {
            self.msaa_target = Some(RenderTarget::new(
                &self.context.device,
                self.context.config.width,
                self.context.config.height,
                self.context.format(),
                self.context.sample_count,
            ));
        }
    }

    /// Reload every shader from disk and rebuild the pipelines. On any
    /// load or validation error the previous pipelines keep running.
    pub fn reload_shaders(&mut self) {
        log::info!("hot swapping shaders");
        match load_shader_modules(&self.context.device) {
            Ok([shadow, scene, skybox, quad]) => {
                let device = &self.context.device;
                self.shadow.rebuild_pipeline(device, &shadow);
                self.scene.rebuild_pipeline(device, &scene);
                self.skybox.rebuild_pipeline(device, &skybox);
                self.debug_quad.rebuild_pipeline(device, &quad);
            }
            Err(e) => {
                log::error!(
                    "shader reload failed, keeping previous pipelines: {e}"
                );
            }
        }
    }

    /// Render one frame from the camera's point of view. While
    /// `show_debug_quad` is set the lit scene is replaced by a fullscreen
    /// view of the shadow map (the shadow pass still runs).
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the swapchain texture cannot be
    /// acquired; the caller decides whether to resize or bail.
    pub fn render(
        &mut self,
        camera: &Camera,
        show_debug_quad: bool,
    ) -> Result<(), wgpu::SurfaceError> {
        self.shadow.update(
            &self.context.queue,
            gl_to_wgpu(self.light.space_matrix()).to_cols_array_2d(),
        );
        self.scene.update(&self.context.queue, camera, &self.light);
        self.skybox.update(&self.context.queue, camera);

        let frame = self.context.get_next_frame()?;
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();

        {
            let mut pass = self.shadow.begin(&mut encoder);
            self.draw_objects(&mut pass);
        }

        if show_debug_quad {
            self.debug_quad.record(&mut encoder, &frame_view);
        } else {
            self.record_scene(&mut encoder, &frame_view);
        }

        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    fn record_scene(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        frame_view: &wgpu::TextureView,
    ) {
        let (color_view, resolve_target) = match &self.msaa_target {
            Some(target) => (&target.view, Some(frame_view)),
            None => (frame_view, None),
        };

        let mut pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.1,
                            b: 0.1,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                ..Default::default()
            });

        self.scene.bind(&mut pass);
        self.draw_objects(&mut pass);
        self.skybox.draw(&mut pass, &self.geometry.skybox);
    }

    fn draw_objects(&self, pass: &mut wgpu::RenderPass<'_>) {
        for (i, object) in self.objects.iter().enumerate() {
            let offset = (i as u64 * self.models.stride) as u32;
            pass.set_bind_group(1, &self.models.bind_group, &[offset]);
            let (buffer, vertex_count) = match object.mesh {
                Mesh::Plane => {
                    (&self.geometry.plane, PLANE_VERTICES.len() as u32)
                }
                Mesh::Cube => {
                    (&self.geometry.cube, CUBE_VERTICES.len() as u32)
                }
            };
            pass.set_vertex_buffer(0, buffer.slice(..));
            pass.draw(0..vertex_count, 0..1);
        }
    }
}

fn load_shader_modules(
    device: &wgpu::Device,
) -> Result<[wgpu::ShaderModule; 4], GloamError> {
    let dir = Path::new(SHADERS_DIR);
    Ok([
        load_shader_module(device, &dir.join(SHADER_FILES[0]))?,
        load_shader_module(device, &dir.join(SHADER_FILES[1]))?,
        load_shader_module(device, &dir.join(SHADER_FILES[2]))?,
        load_shader_module(device, &dir.join(SHADER_FILES[3]))?,
    ])
}
