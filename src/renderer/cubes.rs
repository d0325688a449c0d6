//! Wireframe cube rendering: one shared mesh, one instanced draw.

use wgpu::util::DeviceExt;

use crate::gpu::texture::DEPTH_FORMAT;
use crate::gpu::{RenderContext, TypedBuffer};
use crate::scene::prepared::{CubeInstanceRaw, PreparedFrame};

/// Vertex of the shared unit-cube wireframe mesh.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct CubeVertex {
    position: [f32; 3],
}

/// The 8 corners of the ±1 unit cube.
const CUBE_CORNERS: [CubeVertex; 8] = [
    CubeVertex { position: [-1.0, -1.0, -1.0] },
    CubeVertex { position: [1.0, -1.0, -1.0] },
    CubeVertex { position: [1.0, 1.0, -1.0] },
    CubeVertex { position: [-1.0, 1.0, -1.0] },
    CubeVertex { position: [-1.0, -1.0, 1.0] },
    CubeVertex { position: [1.0, -1.0, 1.0] },
    CubeVertex { position: [1.0, 1.0, 1.0] },
    CubeVertex { position: [-1.0, 1.0, 1.0] },
];

/// The 12 edges of the cube as line-list indices.
const CUBE_EDGES: [u16; 24] = [
    0, 1, 1, 2, 2, 3, 3, 0, // back face
    4, 5, 5, 6, 6, 7, 7, 4, // front face
    0, 4, 1, 5, 2, 6, 3, 7, // connecting edges
];

/// Instanced wireframe cube renderer.
///
/// One static mesh (8 vertices, 12 edges), one growable instance buffer,
/// one `draw_indexed` for every cube in the scene.
pub struct CubeRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instances: TypedBuffer<CubeInstanceRaw>,
}

impl CubeRenderer {
    /// Build the pipeline and the shared wireframe mesh.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let vertex_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Cube Vertex Buffer"),
                contents: bytemuck::cast_slice(&CUBE_CORNERS),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let index_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Cube Index Buffer"),
                contents: bytemuck::cast_slice(&CUBE_EDGES),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        let instances = TypedBuffer::new(
            &context.device,
            "Cube Instance Buffer",
            64,
            wgpu::BufferUsages::VERTEX,
        );

        let pipeline = Self::create_pipeline(context, camera_layout);

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            instances,
        }
    }

    fn create_pipeline(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/cube_wireframe.wgsl"
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Cube Pipeline Layout"),
                bind_group_layouts: &[camera_layout],
                push_constant_ranges: &[],
            },
        );

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0, // position
            }],
        };

        // Instance buffer layout (4x4 matrix as 4 vec4s + color)
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<CubeInstanceRaw>()
                as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 0,
                    shader_location: 1, // model matrix col 0
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 2, // model matrix col 1
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 32,
                    shader_location: 3, // model matrix col 2
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 48,
                    shader_location: 4, // model matrix col 3
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 64,
                    shader_location: 5, // color
                },
            ],
        };

        context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Cube Render Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[vertex_layout, instance_layout],
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
                    topology: wgpu::PrimitiveTopology::LineList,
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

    /// Upload this frame's instance records. Empty frames reset the count
    /// without touching the GPU.
    pub fn prepare(&mut self, context: &RenderContext, frame: &PreparedFrame) {
        let _ = self.instances.write(
            &context.device,
            &context.queue,
            &frame.cube_instances,
        );
    }

    /// Record the instanced wireframe draw. No-op when there are no cubes.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.instances.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instances.buffer().slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint16,
        );
        render_pass.draw_indexed(
            0..CUBE_EDGES.len() as u32,
            0,
            0..self.instances.count() as u32,
        );
    }
}
