//! The skybox pass, drawn after the scene at maximum depth.

use wgpu::util::DeviceExt;

use super::uniforms::SkyboxUniform;
use crate::camera::Camera;
use crate::error::GloamError;
use crate::geometry::PositionVertex;
use crate::gpu::{bindings, texture};

/// The skybox pass: an inward-facing cube sampled from a cubemap, drawn
/// with its depth pinned to the far plane so the scene always wins the
/// depth test.
pub(crate) struct SkyboxPass {
    pipeline: wgpu::RenderPipeline,
    pipeline_layout: wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    sample_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl SkyboxPass {
    /// Build the pass around the given cubemap.
    ///
    /// # Errors
    ///
    /// Propagates shader load/validation failures.
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        sample_count: u32,
        cubemap: &texture::CubemapTexture,
        shader: &wgpu::ShaderModule,
    ) -> Result<Self, GloamError> {
        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Skybox Uniform Buffer"),
                contents: bytemuck::bytes_of(&SkyboxUniform {
                    view_rot: [[0.0; 4]; 4],
                    proj: [[0.0; 4]; 4],
                }),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Skybox Bind Group Layout"),
                entries: &[
                    bindings::uniform_buffer(0, wgpu::ShaderStages::VERTEX),
                    bindings::texture_cube(1),
                    bindings::filtering_sampler(2),
                ],
            },
        );
        let bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Skybox Bind Group"),
                layout: &layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(
                            &cubemap.view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(
                            &cubemap.sampler,
                        ),
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Skybox Pipeline Layout"),
                bind_group_layouts: &[&layout],
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
            bind_group,
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

    /// Upload this frame's rotation-only view and projection.
    pub(crate) fn update(&self, queue: &wgpu::Queue, camera: &Camera) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&SkyboxUniform::new(camera)),
        );
    }

    /// Draw the skybox onto an already-begun render pass.
    pub(crate) fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        vertex_buffer: &wgpu::Buffer,
    ) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        pass.draw(0..36, 0..1);
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
        label: Some("Skybox Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[PositionVertex::layout()],
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
            // Faces point inward; culling would drop the whole box.
            cull_mode: None,
            ..Default::default()
        },
        // LessEqual so fragments pinned to the far plane still pass.
        depth_stencil: Some(wgpu::DepthStencilState {
            format: texture::DEPTH_FORMAT,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::LessEqual,
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
