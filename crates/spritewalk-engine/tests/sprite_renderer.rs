//! Offscreen renderer tests. Each test is skipped when no GPU adapter is available.

use std::sync::Arc;

use spritewalk_engine::assets::{AssetStore, ImageData};
use spritewalk_engine::coords::{ortho_projection, Rect, Viewport};
use spritewalk_engine::device::HeadlessGpu;
use spritewalk_engine::paint::Color;
use spritewalk_engine::render::{ProgramSource, RenderTarget, SpriteRenderer};
use spritewalk_engine::scene::{DrawList, SpriteCmd, SpriteSizing};

const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
const VIEWPORT: Viewport = Viewport::new(64.0, 64.0);

fn headless() -> Option<HeadlessGpu> {
    match pollster::block_on(HeadlessGpu::new()) {
        Ok(gpu) => Some(gpu),
        Err(e) => {
            eprintln!("skipping GPU test: {e:#}");
            None
        }
    }
}

fn color_target(gpu: &HeadlessGpu) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = gpu.device().create_texture(&wgpu::TextureDescriptor {
        label: Some("test color target"),
        size: wgpu::Extent3d {
            width: VIEWPORT.width as u32,
            height: VIEWPORT.height as u32,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

fn two_sprite_list(store: &mut AssetStore) -> DrawList {
    let background = store.insert("bg", ImageData::solid(8, 8, [0, 0, 255, 255]));
    let character = store.insert("fg", ImageData::solid(2, 2, [255, 0, 0, 255]));

    let mut list = DrawList::new(ortho_projection(VIEWPORT));
    list.clear_to(Color::BLACK);
    for (id, rect) in [
        (background, Rect::new(0.0, 0.0, 64.0, 64.0)),
        (character, Rect::new(10.0, 10.0, 8.0, 8.0)),
    ] {
        let image = Arc::clone(store.image(id).expect("inserted images are ready"));
        list.sprite(SpriteCmd::new(id, image, rect, SpriteSizing::UnitQuad));
    }
    list
}

fn render_frames(
    gpu: &HeadlessGpu,
    renderer: &mut SpriteRenderer,
    list: &DrawList,
    frames: u32,
) -> wgpu::Texture {
    let ctx = gpu.render_ctx(FORMAT, VIEWPORT);
    let (texture, view) = color_target(gpu);

    for _ in 0..frames {
        let mut encoder = gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("test encoder"),
            });
        {
            let mut target = RenderTarget::new(&mut encoder, &view);
            renderer.render(&ctx, &mut target, list);
        }
        gpu.queue().submit(std::iter::once(encoder.finish()));
    }
    texture
}

/// Copies the 64x64 target back to the CPU as tightly packed RGBA8 rows.
fn read_pixels(gpu: &HeadlessGpu, texture: &wgpu::Texture) -> Vec<u8> {
    let width = VIEWPORT.width as u32;
    let height = VIEWPORT.height as u32;
    // 64 px * 4 bytes is already a multiple of COPY_BYTES_PER_ROW_ALIGNMENT.
    let bytes_per_row = width * 4;
    assert_eq!(bytes_per_row % wgpu::COPY_BYTES_PER_ROW_ALIGNMENT, 0);

    let buffer = gpu.device().create_buffer(&wgpu::BufferDescriptor {
        label: Some("test readback"),
        size: u64::from(bytes_per_row * height),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = gpu
        .device()
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("test readback encoder"),
        });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    gpu.queue().submit(std::iter::once(encoder.finish()));

    let slice = buffer.slice(..);
    let (sender, receiver) = flume::bounded(1);
    slice.map_async(wgpu::MapMode::Read, move |res| {
        let _ = sender.send(res);
    });
    gpu.device()
        .poll(wgpu::PollType::wait_indefinitely())
        .expect("device poll");
    receiver
        .recv()
        .expect("map callback ran")
        .expect("readback buffer mapped");

    let pixels = slice.get_mapped_range().to_vec();
    buffer.unmap();
    pixels
}

fn pixel(pixels: &[u8], x: usize, y: usize) -> [u8; 4] {
    let at = (y * VIEWPORT.width as usize + x) * 4;
    [pixels[at], pixels[at + 1], pixels[at + 2], pixels[at + 3]]
}

const BLACK: [u8; 4] = [0, 0, 0, 255];
const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

#[test]
fn quad_and_textures_are_uploaded_once() {
    let Some(gpu) = headless() else { return };
    let ctx = gpu.render_ctx(FORMAT, VIEWPORT);
    let mut renderer = SpriteRenderer::new(&ctx, ProgramSource::SPRITE);
    assert!(renderer.has_program());

    let mut store = AssetStore::new();
    let list = two_sprite_list(&mut store);
    let _ = render_frames(&gpu, &mut renderer, &list, 5);

    let stats = renderer.stats();
    assert_eq!(stats.quad_uploads, 1);
    assert_eq!(stats.texture_uploads, 2);
    assert_eq!(stats.frames, 5);
    assert_eq!(stats.draw_calls, 10);
    assert_eq!(renderer.textures().len(), 2);
}

#[test]
fn broken_program_skips_sprites_without_panicking() {
    let Some(gpu) = headless() else { return };
    let ctx = gpu.render_ctx(FORMAT, VIEWPORT);
    let broken = ProgramSource {
        vertex: "@vertex fn vs_main( {",
        fragment: ProgramSource::SPRITE.fragment,
    };
    let mut renderer = SpriteRenderer::new(&ctx, broken);
    assert!(!renderer.has_program());

    let mut store = AssetStore::new();
    let list = two_sprite_list(&mut store);
    let _ = render_frames(&gpu, &mut renderer, &list, 3);

    let stats = renderer.stats();
    assert_eq!(stats.quad_uploads, 1);
    assert_eq!(stats.frames, 3);
    assert_eq!(stats.draw_calls, 0);
    assert!(renderer.textures().is_empty());
}

#[test]
fn clear_only_frame_is_opaque_black() {
    let Some(gpu) = headless() else { return };
    let ctx = gpu.render_ctx(FORMAT, VIEWPORT);
    let mut renderer = SpriteRenderer::new(&ctx, ProgramSource::SPRITE);

    let mut list = DrawList::new(ortho_projection(VIEWPORT));
    list.clear_to(Color::BLACK);
    let texture = render_frames(&gpu, &mut renderer, &list, 1);

    let pixels = read_pixels(&gpu, &texture);
    assert_eq!(pixels.len(), 64 * 64 * 4);
    assert!(pixels.chunks_exact(4).all(|p| p == BLACK));
}

#[test]
fn unit_quad_lands_on_its_translated_pixels() {
    let Some(gpu) = headless() else { return };
    let ctx = gpu.render_ctx(FORMAT, VIEWPORT);
    let mut renderer = SpriteRenderer::new(&ctx, ProgramSource::SPRITE);

    let mut store = AssetStore::new();
    let list = two_sprite_list(&mut store);
    let texture = render_frames(&gpu, &mut renderer, &list, 1);
    let pixels = read_pixels(&gpu, &texture);

    // A unit quad translated to (10, 10) spans 9..11 on both axes.
    for (x, y) in [(9, 9), (10, 9), (9, 10), (10, 10)] {
        assert_eq!(pixel(&pixels, x, y), RED, "character pixel ({x}, {y})");
    }
    for (x, y) in [(8, 10), (11, 10), (10, 8), (10, 11)] {
        assert_eq!(pixel(&pixels, x, y), BLACK, "outside the character ({x}, {y})");
    }

    // The background is also a unit quad, centered on the origin.
    assert_eq!(pixel(&pixels, 0, 0), BLUE);
    assert_eq!(pixel(&pixels, 20, 20), BLACK);
    assert_eq!(pixel(&pixels, 63, 63), BLACK);
}

#[test]
fn identical_draw_lists_render_identical_frames() {
    let Some(gpu) = headless() else { return };
    let ctx = gpu.render_ctx(FORMAT, VIEWPORT);
    let mut renderer = SpriteRenderer::new(&ctx, ProgramSource::SPRITE);

    let mut store = AssetStore::new();
    let list = two_sprite_list(&mut store);
    let first = render_frames(&gpu, &mut renderer, &list, 1);
    let second = render_frames(&gpu, &mut renderer, &list, 1);

    assert_eq!(read_pixels(&gpu, &first), read_pixels(&gpu, &second));
}

#[test]
fn image_over_the_texture_limit_is_skipped_without_panicking() {
    let Some(gpu) = headless() else { return };
    let ctx = gpu.render_ctx(FORMAT, VIEWPORT);
    let mut renderer = SpriteRenderer::new(&ctx, ProgramSource::SPRITE);
    let limit = gpu.device().limits().max_texture_dimension_2d;

    let mut store = AssetStore::new();
    let wide = store.insert("wide", ImageData::solid(limit + 1, 4, [0, 255, 0, 255]));
    let character = store.insert("fg", ImageData::solid(2, 2, [255, 0, 0, 255]));

    let mut list = DrawList::new(ortho_projection(VIEWPORT));
    list.clear_to(Color::BLACK);
    for (id, rect) in [
        (wide, Rect::new(0.0, 0.0, 64.0, 64.0)),
        (character, Rect::new(10.0, 10.0, 8.0, 8.0)),
    ] {
        let image = Arc::clone(store.image(id).expect("inserted images are ready"));
        list.sprite(SpriteCmd::new(id, image, rect, SpriteSizing::UnitQuad));
    }

    let texture = render_frames(&gpu, &mut renderer, &list, 3);

    let stats = renderer.stats();
    assert_eq!(stats.texture_uploads, 1);
    assert_eq!(stats.draw_calls, 3);
    assert_eq!(renderer.textures().len(), 1);
    assert_eq!(renderer.textures().rejected(), 1);

    let pixels = read_pixels(&gpu, &texture);
    assert_eq!(pixel(&pixels, 0, 0), BLACK);
    assert_eq!(pixel(&pixels, 10, 10), RED);
}

#[test]
fn instance_buffer_grows_when_the_list_outgrows_it() {
    let Some(gpu) = headless() else { return };
    let ctx = gpu.render_ctx(FORMAT, VIEWPORT);
    let mut renderer = SpriteRenderer::new(&ctx, ProgramSource::SPRITE);

    let mut store = AssetStore::new();
    let dot = store.insert("dot", ImageData::solid(1, 1, [255, 0, 0, 255]));
    let image = Arc::clone(store.image(dot).expect("inserted images are ready"));

    let list_of = |count: usize| {
        let mut list = DrawList::new(ortho_projection(VIEWPORT));
        list.clear_to(Color::BLACK);
        for i in 0..count {
            let x = (i % 32) as f32 * 2.0 + 1.0;
            let y = (i / 32) as f32 * 2.0 + 1.0;
            let rect = Rect::new(x, y, 1.0, 1.0);
            list.sprite(SpriteCmd::new(dot, Arc::clone(&image), rect, SpriteSizing::UnitQuad));
        }
        list
    };

    let _ = render_frames(&gpu, &mut renderer, &list_of(4), 1);
    let texture = render_frames(&gpu, &mut renderer, &list_of(40), 1);

    assert_eq!(renderer.stats().draw_calls, 44);
    assert_eq!(renderer.textures().len(), 1);

    // The 40th quad sits at (15, 3) and spans 14..16 by 2..4.
    let pixels = read_pixels(&gpu, &texture);
    assert_eq!(pixel(&pixels, 15, 3), RED);
}
