use anyhow::{Result, ensure};
use bytemuck::Pod;
use wgpu::util::DeviceExt;

use super::vertex::ColorVertex;

/// Indexed geometry uploaded to the GPU.
pub struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl Mesh {
    /// Uploads `vertices` and 16-bit `indices` into immutable buffers.
    pub fn upload<V: Pod>(
        device: &wgpu::Device,
        label: &str,
        vertices: &[V],
        indices: &[u16],
    ) -> Result<Self> {
        ensure!(!vertices.is_empty(), "mesh {label:?} has no vertices");
        ensure!(!indices.is_empty(), "mesh {label:?} has no indices");

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vbo")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // wgpu requires copy sizes aligned to 4 bytes; pad odd index counts.
        let mut padded = indices.to_vec();
        if padded.len() % 2 == 1 {
            padded.push(0);
        }
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} ibo")),
            contents: bytemuck::cast_slice(&padded),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        })
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Binds the buffers to slot 0 and issues one indexed draw.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Regular polygon with `sides` vertices as a triangle fan around vertex 0.
///
/// Vertices go counter-clockwise in angle but Y is flipped, so the fan is
/// emitted as `(i + 1, i, 0)` to stay counter-clockwise on screen. Color
/// follows the angle.
pub fn polygon(sides: usize, radius: f32) -> Result<(Vec<ColorVertex>, Vec<u16>)> {
    ensure!(sides >= 3, "a polygon needs at least 3 sides, got {sides}");
    ensure!(
        sides <= usize::from(u16::MAX) + 1,
        "{sides} sides do not fit 16-bit indices"
    );

    let step = std::f32::consts::TAU / sides as f32;
    let vertices = (0..sides)
        .map(|i| {
            let (sin, cos) = (step * i as f32).sin_cos();
            ColorVertex {
                position: [radius * cos, -radius * sin, 0.0],
                color: [(1.0 + cos) / 2.0, (1.0 + sin) / 2.0, 1.0],
            }
        })
        .collect();

    let indices = (1..sides - 1)
        .flat_map(|i| {
            let i = i as u16;
            [i + 1, i, 0]
        })
        .collect();

    Ok((vertices, indices))
}
