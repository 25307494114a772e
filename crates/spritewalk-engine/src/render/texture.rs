use std::collections::{HashMap, HashSet};

use crate::assets::{AssetId, ImageData};

use super::RenderCtx;

/// A sprite image resident on the GPU, with the bind group the sprite pipeline samples.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub bind_group: wgpu::BindGroup,
}

impl GpuTexture {
    /// Uploads `image` as an sRGB texture and binds it with `sampler`.
    pub fn upload(
        ctx: &RenderCtx<'_>,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        image: &ImageData,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("spritewalk sprite texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.bytes_per_row()),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("spritewalk sprite texture bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self {
            texture,
            view,
            bind_group,
        }
    }
}

/// GPU textures keyed by asset id.
///
/// A texture is created the first time its asset is drawn and reused on every
/// later frame. Textures are released when the cache drops.
pub struct TextureCache {
    sampler: wgpu::Sampler,
    textures: HashMap<AssetId, GpuTexture>,
    /// Images the device cannot hold; warned about once, never retried.
    rejected: HashSet<AssetId>,
    uploads: u64,
}

impl TextureCache {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("spritewalk sprite sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Self {
            sampler,
            textures: HashMap::new(),
            rejected: HashSet::new(),
            uploads: 0,
        }
    }

    /// Returns the texture for `id`, uploading `image` on first use.
    ///
    /// Empty images and images larger than the device's 2D texture limit are never
    /// uploaded and yield `None`.
    pub fn get_or_upload(
        &mut self,
        ctx: &RenderCtx<'_>,
        layout: &wgpu::BindGroupLayout,
        id: AssetId,
        image: &ImageData,
    ) -> Option<&GpuTexture> {
        if image.is_empty() || self.rejected.contains(&id) {
            return None;
        }

        if !self.textures.contains_key(&id) {
            let max = ctx.device.limits().max_texture_dimension_2d;
            if !fits(image, max) {
                log::warn!(
                    "image for {id:?} is {}x{}, over the device limit of {max}px; not drawn",
                    image.width,
                    image.height
                );
                self.rejected.insert(id);
                return None;
            }

            let texture = GpuTexture::upload(ctx, layout, &self.sampler, image);
            log::debug!(
                "uploaded texture for {id:?} ({}x{})",
                image.width,
                image.height
            );
            self.textures.insert(id, texture);
            self.uploads += 1;
        }

        self.textures.get(&id)
    }

    #[inline]
    pub fn get(&self, id: AssetId) -> Option<&GpuTexture> {
        self.textures.get(&id)
    }

    /// Number of resident textures.
    #[inline]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Number of images skipped for exceeding the device texture limit.
    #[inline]
    pub fn rejected(&self) -> usize {
        self.rejected.len()
    }

    /// Total uploads since creation.
    #[inline]
    pub fn uploads(&self) -> u64 {
        self.uploads
    }
}

fn fits(image: &ImageData, max_dimension: u32) -> bool {
    image.width <= max_dimension && image.height <= max_dimension
}
