//! The shadow-mapped lit pass over the demo scene.

use wgpu::util::DeviceExt;

use super::uniforms::{DirectionalLight, SceneUniform};
use crate::camera::Camera;
use crate::error::GloamError;
use crate::geometry::MeshVertex;
use crate::gpu::{bindings, texture};

/// The lit pass: Blinn-Phong shading with a diffuse texture and a
/// comparison-sampled shadow map.
pub(crate) struct ScenePass {
    pipeline: wgpu::RenderPipeline,
    pipeline_layout: wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    sample_count: u32,
    uniform_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    material_bind_group: wgpu::BindGroup,
}

impl ScenePass {
    /// Build the pass. `model_layout` is the shared per-object layout
    /// (group 1); `shadow_view` is the shadow map written by the shadow
    /// pass.
    ///
    /// # Errors
    ///
    /// Propagates shader load/validation failures.
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        sample_count: u32,
        model_layout: &wgpu::BindGroupLayout,
        shadow_view: &wgpu::TextureView,
        diffuse: &texture::ImageTexture,
        shader: &wgpu::ShaderModule,
    ) -> Result<Self, GloamError> {
        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Scene Uniform Buffer"),
                contents: bytemuck::bytes_of(&SceneUniform::new(
                    &Camera::new(crate::math::Vec3::ZERO),
                    &DirectionalLight::default(),
                )),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let frame_layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Scene Frame Bind Group Layout"),
                entries: &[bindings::uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX_FRAGMENT,
                )],
            },
        );
        let frame_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Scene Frame Bind Group"),
                layout: &frame_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });

        let material_layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Scene Material Bind Group Layout"),
                entries: &[
                    bindings::texture_2d(0),
                    bindings::filtering_sampler(1),
                    bindings::depth_texture_2d(2),
                    bindings::comparison_sampler(3),
                ],
            },
        );
        let shadow_sampler =
            device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("Shadow Comparison Sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                compare: Some(wgpu::CompareFunction::LessEqual),
                ..Default::default()
            });
        let material_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Scene Material Bind Group"),
                layout: &material_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(
                            &diffuse.view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(
                            &diffuse.sampler,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::TextureView(
                            shadow_view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: wgpu::BindingResource::Sampler(
                            &shadow_sampler,
                        ),
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Scene Pipeline Layout"),
                bind_group_layouts: &[
                    &frame_layout,
                    model_layout,
                    &material_layout,
                ],
                push_constant_ranges: &[],
            },
        );
        let pipeline = create_pipeline(
            device,
            &pipeline_layout,
            shader,
            format,
            sample_count,
        );

        Ok(Self {
            pipeline,
            pipeline_layout,
            format,
            sample_count,
            uniform_buffer,
            frame_bind_group,
            material_bind_group,
        })
    }

    /// Swap in a freshly loaded shader module.
    pub(crate) fn rebuild_pipeline(
        &mut self,
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
    ) {
        self.pipeline = create_pipeline(
            device,
            &self.pipeline_layout,
            shader,
            self.format,
            self.sample_count,
        );
    }

    /// Upload this frame's camera and light state.
    pub(crate) fn update(
        &self,
        queue: &wgpu::Queue,
        camera: &Camera,
        light: &DirectionalLight,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniform::new(camera, light)),
        );
    }

    /// Bind the pipeline and pass-level state onto an already-begun render
    /// pass. The caller binds per-object state and draws.
    pub(crate) fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.frame_bind_group, &[]);
        pass.set_bind_group(2, &self.material_bind_group, &[]);
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    sample_count: u32,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Scene Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[MeshVertex::layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            // The plane is single-sided and the cube tables are not
            // consistently wound; draw both sides like the source scene.
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: texture::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: sample_count,
            ..Default::default()
        },
        multiview: None,
        cache: None,
    })
}
