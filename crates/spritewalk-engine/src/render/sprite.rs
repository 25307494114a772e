use bytemuck::{Pod, Zeroable};

use crate::assets::AssetId;
use crate::scene::DrawList;

use super::program::{ProgramSource, ShaderProgram};
use super::quad::QuadBuffer;
use super::texture::TextureCache;
use super::{RenderCtx, RenderTarget};

/// Counters describing what the renderer has sent to the GPU so far.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RenderStats {
    /// Quad vertex buffer uploads. Stays at 1 for the renderer's lifetime.
    pub quad_uploads: u32,
    /// Sprite textures created.
    pub texture_uploads: u64,
    /// Draw calls issued across all frames.
    pub draw_calls: u64,
    /// Draw lists executed.
    pub frames: u64,
}

/// Draws sprites from a [`DrawList`] with a single textured-quad program.
///
/// One draw call per sprite, in paint order. When the program failed to build,
/// frames are still cleared but sprites are skipped.
pub struct SpriteRenderer {
    program: Option<ShaderProgram>,
    quad: QuadBuffer,
    textures: TextureCache,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    stats: RenderStats,
    warned_missing_program: bool,
}

impl SpriteRenderer {
    /// Builds the program from `source` (logging any failure) and uploads the quad.
    pub fn new(ctx: &RenderCtx<'_>, source: ProgramSource<'_>) -> Self {
        let program = ShaderProgram::build_or_log(ctx, source);
        let quad = QuadBuffer::upload(ctx);
        let textures = TextureCache::new(ctx);

        Self {
            program,
            quad,
            textures,
            instance_vbo: None,
            instance_capacity: 0,
            stats: RenderStats {
                quad_uploads: 1,
                ..RenderStats::default()
            },
            warned_missing_program: false,
        }
    }

    #[inline]
    pub fn has_program(&self) -> bool {
        self.program.is_some()
    }

    #[inline]
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    #[inline]
    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    /// Executes `draw_list` into `target`.
    ///
    /// The pass clears to the list's last clear color (or loads the previous
    /// contents when there is none), then draws every sprite recorded after it.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
    ) {
        self.stats.frames += 1;

        let load = match draw_list.clear_color() {
            Some(c) => wgpu::LoadOp::Clear(c.to_wgpu()),
            None => wgpu::LoadOp::Load,
        };

        let Some(program) = self.program.as_ref() else {
            if !self.warned_missing_program {
                log::warn!("SpriteRenderer: no shader program; sprites will not be drawn");
                self.warned_missing_program = true;
            }
            if matches!(load, wgpu::LoadOp::Clear(_)) {
                drop(begin_pass(target, load));
            }
            return;
        };

        // Upload missing textures and build per-sprite instance data.
        let projection = draw_list.projection();
        let mut drawn: Vec<AssetId> = Vec::new();
        let mut instances: Vec<SpriteInstance> = Vec::new();

        for sprite in draw_list.sprites() {
            let before = self.textures.uploads();
            let uploaded = self
                .textures
                .get_or_upload(ctx, program.texture_layout(), sprite.image_id, &sprite.image)
                .is_some();
            self.stats.texture_uploads += self.textures.uploads() - before;

            if !uploaded {
                continue;
            }

            let transform = projection * sprite.model_view;
            instances.push(SpriteInstance {
                transform: transform.to_cols_array_2d(),
                tint: sprite.tint.to_array(),
            });
            drawn.push(sprite.image_id);
        }

        if instances.is_empty() {
            if matches!(load, wgpu::LoadOp::Clear(_)) {
                drop(begin_pass(target, load));
            }
            return;
        }

        let instance_vbo = instance_buffer(
            &mut self.instance_vbo,
            &mut self.instance_capacity,
            ctx,
            instances.len(),
        );
        ctx.queue
            .write_buffer(instance_vbo, 0, bytemuck::cast_slice(&instances));

        let mut rpass = begin_pass(target, load);
        rpass.set_pipeline(program.pipeline());
        rpass.set_vertex_buffer(0, self.quad.slice());
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));

        let vertices = 0..self.quad.vertex_count();
        for (i, id) in drawn.iter().enumerate() {
            let Some(texture) = self.textures.get(*id) else { continue };
            let i = i as u32;
            rpass.set_bind_group(0, &texture.bind_group, &[]);
            rpass.draw(vertices.clone(), i..i + 1);
            self.stats.draw_calls += 1;
        }
    }
}

/// Returns an instance buffer holding at least `required` instances, replacing
/// the current one when it is too small.
fn instance_buffer<'b>(
    slot: &'b mut Option<wgpu::Buffer>,
    capacity: &mut usize,
    ctx: &RenderCtx<'_>,
    required: usize,
) -> &'b wgpu::Buffer {
    if required > *capacity {
        *slot = None;
    }

    slot.get_or_insert_with(|| {
        let new_cap = grown_capacity(required);
        *capacity = new_cap;
        ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("spritewalk sprite instance vbo"),
            size: (new_cap * std::mem::size_of::<SpriteInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    })
}

#[inline]
fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(16)
}

fn begin_pass<'e>(
    target: &'e mut RenderTarget<'_>,
    load: wgpu::LoadOp<wgpu::Color>,
) -> wgpu::RenderPass<'e> {
    target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("spritewalk sprite pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load,
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    })
}

/// Instance data layout (80 bytes):
///
///  offset  0  transform  [[f32; 4]; 4]  loc 1..4  (columns)
///  offset 64  tint       [f32; 4]       loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct SpriteInstance {
    transform: [[f32; 4]; 4],
    tint: [f32; 4],
}

impl SpriteInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x4,
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4  // tint
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
