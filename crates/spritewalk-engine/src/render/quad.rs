use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::RenderCtx;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 2], // -1..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Unit quad as a triangle strip: top-left, top-right, bottom-left, bottom-right.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [-1.0, 1.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [-1.0, -1.0] },
    QuadVertex { pos: [1.0, -1.0] },
];

/// The static quad vertex buffer. Uploaded once, never written again.
pub struct QuadBuffer {
    vbo: wgpu::Buffer,
}

impl QuadBuffer {
    pub fn upload(ctx: &RenderCtx<'_>) -> Self {
        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("spritewalk quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        log::debug!("uploaded quad vertex buffer ({} bytes)", vbo.size());
        Self { vbo }
    }

    #[inline]
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.vbo.slice(..)
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        QUAD_VERTICES.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_is_the_unit_square_strip() {
        let pos: Vec<[f32; 2]> = QUAD_VERTICES.iter().map(|v| v.pos).collect();
        assert_eq!(pos, vec![[-1.0, 1.0], [1.0, 1.0], [-1.0, -1.0], [1.0, -1.0]]);
    }

    #[test]
    fn vertex_bytes_are_tightly_packed() {
        let bytes: &[u8] = bytemuck::cast_slice(&QUAD_VERTICES);
        assert_eq!(bytes.len(), 4 * 2 * std::mem::size_of::<f32>());
        assert_eq!(QuadVertex::layout().array_stride, 8);
    }
}
