use crate::MeshData;
use log::debug;
use wgpu::util::DeviceExt;

/// A [`MeshData`] uploaded to the GPU.
pub struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl Mesh {
    #[must_use]
    pub fn new(device: &wgpu::Device, data: &MeshData, label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        #[expect(
            clippy::cast_possible_truncation,
            reason = "procedural meshes stay far below 2^32 indices"
        )]
        let index_count = data.indices.len() as u32;

        debug!(
            "uploaded {label}: {} vertices, {} triangles",
            data.vertices.len(),
            data.triangle_count()
        );

        Self {
            vertex_buffer,
            index_buffer,
            index_count,
        }
    }

    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn draw<'pass>(&'pass self, render_pass: &mut wgpu::RenderPass<'pass>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
