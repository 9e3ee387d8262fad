//! Depth-only pass rendering the scene from the light's point of view.

use wgpu::util::DeviceExt;

use super::uniforms::ShadowUniform;
use crate::error::GloamError;
use crate::geometry::MeshVertex;
use crate::gpu::{bindings, texture};

/// Side length of the square shadow map, in texels.
pub(crate) const SHADOW_MAP_RESOLUTION: u32 = 1024;

/// The shadow-map pass: a fragmentless pipeline writing scene depth as
/// seen from the light into a sampleable depth texture.
pub(crate) struct ShadowPass {
    pipeline: wgpu::RenderPipeline,
    pipeline_layout: wgpu::PipelineLayout,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    /// The shadow map sampled by the lit pass and the debug quad.
    pub(crate) depth: texture::DepthTexture,
}

impl ShadowPass {
    /// Build the pass. `model_layout` is the shared per-object
    /// dynamic-offset bind group layout (group 1).
    ///
    /// # Errors
    ///
    /// Propagates shader load/validation failures.
    pub(crate) fn new(
        device: &wgpu::Device,
        model_layout: &wgpu::BindGroupLayout,
        shader: &wgpu::ShaderModule,
    ) -> Result<Self, GloamError> {
        let depth = texture::DepthTexture::shadow_map(
            device,
            SHADOW_MAP_RESOLUTION,
        );

        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Shadow Uniform Buffer"),
                contents: bytemuck::bytes_of(&ShadowUniform {
                    light_space: [[0.0; 4]; 4],
                }),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Shadow Bind Group Layout"),
                entries: &[bindings::uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX,
                )],
            },
        );

        let bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Shadow Bind Group"),
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Shadow Pipeline Layout"),
                bind_group_layouts: &[&layout, model_layout],
                push_constant_ranges: &[],
            },
        );
        let pipeline = create_pipeline(device, &pipeline_layout, shader);

        Ok(Self {
            pipeline,
            pipeline_layout,
            uniform_buffer,
            bind_group,
            depth,
        })
    }

    /// Swap in a freshly loaded shader module.
    pub(crate) fn rebuild_pipeline(
        &mut self,
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
    ) {
        self.pipeline = create_pipeline(device, &self.pipeline_layout, shader);
    }

    /// Upload the world-to-light-clip matrix for this frame.
    pub(crate) fn update(&self, queue: &wgpu::Queue, light_space: [[f32; 4]; 4]) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&ShadowUniform { light_space }),
        );
    }

    /// Begin the depth-only pass over the shadow map and bind the
    /// pass-level state. The caller binds per-object state and draws.
    #[must_use]
    pub(crate) fn begin<'a>(
        &self,
        encoder: &'a mut wgpu::CommandEncoder,
    ) -> wgpu::RenderPass<'a> {
        let mut pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Pass"),
                color_attachments: &[],
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
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Shadow Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[MeshVertex::layout()],
            compilation_options: Default::default(),
        },
        // Depth-only: no fragment stage, no color targets.
        fragment: None,
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: texture::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            // Push stored depth away from the light to avoid shadow acne.
            bias: wgpu::DepthBiasState {
                constant: 2,
                slope_scale: 2.0,
                clamp: 0.0,
            },
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
