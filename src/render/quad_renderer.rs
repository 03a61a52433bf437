//! A renderer for `QuadBatch`es: one alpha-blended, per-vertex-color
//! pipeline, one vertex/index buffer pair grown on demand.
//!
//! Everything a deck frame draws goes through here — segment billboards,
//! overlay field strips, and the fade quad — so draw order is simply batch
//! push order.

use std::{borrow::Cow, mem};

use crate::render::gpu::Gpu;
use crate::render::primitives::{QuadBatch, QuadVertex};

fn round_up_to(v: u64, align: u64) -> u64 {
    debug_assert!(align.is_power_of_two());
    (v + (align - 1)) & !(align - 1)
}

pub struct QuadRenderer {
    pipeline: wgpu::RenderPipeline,

    vertex_buffer: wgpu::Buffer,
    vertex_capacity_bytes: u64,

    index_buffer: wgpu::Buffer,
    index_capacity_bytes: u64,
}

impl QuadRenderer {
    pub fn new(gpu: &Gpu) -> anyhow::Result<Self> {
        let shader = gpu
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Deck Quad Shader"),
                source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!(
                    "shaders/deck_quad.wgsl"
                ))),
            });

        let pipeline_layout = gpu
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Deck Quad Pipeline Layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        let pipeline = gpu
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Deck Quad Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[QuadVertex::layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: gpu.surface_format.add_srgb_suffix(),
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        let initial = 4096u64;
        let vertex_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Deck Quad Vertex Buffer"),
            size: initial,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let index_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Deck Quad Index Buffer"),
            size: initial,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            pipeline,
            vertex_buffer,
            vertex_capacity_bytes: initial,
            index_buffer,
            index_capacity_bytes: initial,
        })
    }

    /// Upload and draw a batch into the provided render pass.
    ///
    /// The caller owns the pass (and the clear color behind the batch).
    pub fn draw<'pass>(
        &'pass mut self,
        gpu: &Gpu,
        pass: &mut wgpu::RenderPass<'pass>,
        batch: &QuadBatch,
    ) {
        if batch.is_empty() {
            return;
        }

        let vb_bytes = (batch.vertices.len() * mem::size_of::<QuadVertex>()) as u64;
        let ib_bytes = (batch.indices.len() * mem::size_of::<u16>()) as u64;

        // `Queue::write_buffer` requires COPY_BUFFER_ALIGNMENT; pad uploads
        // and slice only the real ranges when drawing.
        let align = wgpu::COPY_BUFFER_ALIGNMENT;
        let vb_upload = round_up_to(vb_bytes, align);
        let ib_upload = round_up_to(ib_bytes, align);

        self.ensure_capacity(gpu, vb_upload, ib_upload);
        Self::write_padded(gpu, &self.vertex_buffer, bytemuck::cast_slice(&batch.vertices), vb_upload);
        Self::write_padded(gpu, &self.index_buffer, bytemuck::cast_slice(&batch.indices), ib_upload);

        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..vb_bytes));
        pass.set_index_buffer(self.index_buffer.slice(..ib_bytes), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..(batch.indices.len() as u32), 0, 0..1);
    }

    fn write_padded(gpu: &Gpu, buffer: &wgpu::Buffer, raw: &[u8], upload_len: u64) {
        if upload_len == raw.len() as u64 {
            gpu.queue.write_buffer(buffer, 0, raw);
        } else {
            let mut padded = Vec::<u8>::with_capacity(upload_len as usize);
            padded.extend_from_slice(raw);
            padded.resize(upload_len as usize, 0);
            gpu.queue.write_buffer(buffer, 0, &padded);
        }
    }

    fn ensure_capacity(&mut self, gpu: &Gpu, vb_bytes: u64, ib_bytes: u64) {
        if vb_bytes > self.vertex_capacity_bytes {
            let new_size = vb_bytes.next_power_of_two().max(4096);
            self.vertex_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Deck Quad Vertex Buffer (resized)"),
                size: new_size,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.vertex_capacity_bytes = new_size;
        }

        if ib_bytes > self.index_capacity_bytes {
            let new_size = ib_bytes.next_power_of_two().max(4096);
            self.index_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Deck Quad Index Buffer (resized)"),
                size: new_size,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.index_capacity_bytes = new_size;
        }
    }
}
