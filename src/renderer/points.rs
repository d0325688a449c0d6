//! Point-cloud rendering: the whole cloud in one buffer and one draw.

use wgpu::util::DeviceExt;

use crate::gpu::texture::DEPTH_FORMAT;
use crate::gpu::{RenderContext, TypedBuffer};
use crate::scene::prepared::PreparedFrame;

/// Uniform parameters shared by every point in the cloud.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct PointParams {
    color: [f32; 4],
}

/// Batched point-cloud renderer.
///
/// The whole cloud lives in one growable vertex buffer and renders with a
/// single draw call: N points cost one buffer write and one draw,
/// independent of N. Color is uniform, applied at draw time.
pub struct PointRenderer {
    pipeline: wgpu::RenderPipeline,
    vertices: TypedBuffer<[f32; 3]>,
    params_bind_group: wgpu::BindGroup,
}

impl PointRenderer {
    /// Build the pipeline, the params uniform, and the vertex buffer.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        color: [f32; 3],
    ) -> Self {
        let params = PointParams {
            color: [color[0], color[1], color[2], 1.0],
        };

        let params_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Point Params Buffer"),
                contents: bytemuck::cast_slice(&[params]),
                usage: wgpu::BufferUsages::UNIFORM,
            },
        );

        let params_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Point Params Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let params_bind_group = context.device.create_bind_group(
            &wgpu::BindGroupDescriptor {
                layout: &params_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params_buffer.as_entire_binding(),
                }],
                label: Some("Point Params Bind Group"),
            },
        );

        let vertices = TypedBuffer::new(
            &context.device,
            "Point Vertex Buffer",
            1024,
            wgpu::BufferUsages::VERTEX,
        );

        let pipeline =
            Self::create_pipeline(context, camera_layout, &params_layout);

        Self {
            pipeline,
            vertices,
            params_bind_group,
        }
    }

    fn create_pipeline(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        params_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/points.wgsl"
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Point Pipeline Layout"),
                bind_group_layouts: &[camera_layout, params_layout],
                push_constant_ranges: &[],
            },
        );

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<[f32; 3]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0, // position
            }],
        };

        context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Point Render Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[vertex_layout],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::PointList,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        )
    }

    /// Upload this frame's point cloud in one buffer write. Empty frames
    /// reset the count without touching the GPU.
    pub fn prepare(&mut self, context: &RenderContext, frame: &PreparedFrame) {
        let _ = self.vertices.write(
            &context.device,
            &context.queue,
            &frame.point_vertices,
        );
    }

    /// Record the single batched point draw. No-op when the cloud is empty.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.vertices.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.params_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertices.buffer().slice(..));
        render_pass.draw(0..self.vertices.count() as u32, 0..1);
    }
}
