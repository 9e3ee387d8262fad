//! Fullscreen visualization of the shadow map, toggled while Shift is
//! held.

use wgpu::util::DeviceExt;

use crate::error::GloamError;
use crate::geometry::{QuadVertex, QUAD_VERTICES};
use crate::gpu::bindings;

/// Draws the raw shadow-map depth onto a fullscreen quad, replacing the
/// scene for the frame. The light projection is orthographic, so stored
/// depth is already linear and displays directly as grayscale.
pub(crate) struct DebugQuadPass {
    pipeline: wgpu::RenderPipeline,
    pipeline_layout: wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
}

impl DebugQuadPass {
    /// Build the pass around the shadow map view.
    ///
    /// # Errors
    ///
    /// Propagates shader load/validation failures.
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        shadow_view: &wgpu::TextureView,
        shader: &wgpu::ShaderModule,
    ) -> Result<Self, GloamError> {
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Debug Quad Vertex Buffer"),
                contents: bytemuck::cast_slice(&QUAD_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Debug Quad Bind Group Layout"),
                entries: &[
                    bindings::depth_texture_2d(0),
                    bindings::non_filtering_sampler(1),
                ],
            },
        );
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Debug Quad Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Debug Quad Bind Group"),
                layout: &layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(
                            shadow_view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Debug Quad Pipeline Layout"),
                bind_group_layouts: &[&layout],
                push_constant_ranges: &[],
            },
        );
        let pipeline =
            create_pipeline(device, &pipeline_layout, shader, format);

        Ok(Self {
            pipeline,
            pipeline_layout,
            format,
            bind_group,
            vertex_buffer,
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
        );
    }

    /// Record the fullscreen pass straight onto the frame.
    pub(crate) fn record(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        frame_view: &wgpu::TextureView,
    ) {
        let mut pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Debug Quad Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: frame_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..QUAD_VERTICES.len() as u32, 0..1);
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Debug Quad Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[QuadVertex::layout()],
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
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
