//====================================================================

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use super::tools;

use crate::engine::tools::Size;

//====================================================================

#[derive(Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    pub const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    fn wrap(device: &wgpu::Device, texture: wgpu::Texture) -> Self {
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor::default());

        Self {
            texture,
            view,
            sampler,
        }
    }

    fn extent(size: Size<u32>) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: 1,
        }
    }

    fn create(
        device: &wgpu::Device,
        size: Size<u32>,
        label: &str,
        format: wgpu::TextureFormat,
        usage: wgpu::TextureUsages,
    ) -> Self {
        let raw = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: Self::extent(size),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage,
            view_formats: &[],
        });

        Self::wrap(device, raw)
    }

    /// Depth attachment matching the window, recreated on resize.
    pub fn create_depth_texture(device: &wgpu::Device, size: Size<u32>, label: &str) -> Self {
        Self::create(
            device,
            size,
            label,
            Self::DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        )
    }

    /// Offscreen colour target that can also be sampled afterwards.
    pub fn create_render_target(device: &wgpu::Device, size: Size<u32>, label: &str) -> Self {
        Self::create(
            device,
            size,
            label,
            Self::TARGET_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        )
    }

    /// Single pixel texture of the given colour, tinted and stretched by the
    /// sprites drawn with it.
    pub fn from_color(device: &wgpu::Device, queue: &wgpu::Queue, color: [u8; 3]) -> Self {
        let pixel = image::Rgba([color[0], color[1], color[2], 255]);
        let image = image::RgbaImage::from_pixel(1, 1, pixel);

        Self::from_image(device, queue, &image.into(), Some("Color Texture"))
    }

    /// Upload an image::DynamicImage as a sampleable rgba texture.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &image::DynamicImage,
        label: Option<&str>,
    ) -> Self {
        let pixels = image.to_rgba8();
        let size = Size::new(pixels.width(), pixels.height());

        let uploaded = Self::create(
            device,
            size,
            label.unwrap_or("image"),
            Self::TARGET_FORMAT,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &uploaded.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * size.width),
                rows_per_image: None,
            },
            Self::extent(size),
        );

        uploaded
    }
}

//====================================================================

static NEXT_TEXTURE_ID: AtomicU32 = AtomicU32::new(0);

/// A texture bound for sampling, keyed by a unique id so sprite instances
/// can be grouped per texture.
pub struct LoadedTexture {
    id: u32,
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

impl LoadedTexture {
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn size(&self) -> Size<u32> {
        Size::new(self.texture.texture.width(), self.texture.texture.height())
    }

    #[inline]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

//====================================================================

/// Owns the shared sampling bind group layout and turns raw textures into
/// [`LoadedTexture`]s.
pub struct TextureLoader {
    bind_group_layout: wgpu::BindGroupLayout,
}

impl TextureLoader {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    tools::texture_layout_entry(0),
                    tools::sampler_layout_entry(1),
                ],
            });

        Self { bind_group_layout }
    }

    #[inline]
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn load(&self, device: &wgpu::Device, texture: Texture) -> Arc<LoadedTexture> {
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: None,
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });

        Arc::new(LoadedTexture {
            id: NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed),
            texture,
            bind_group,
        })
    }
}

//====================================================================
