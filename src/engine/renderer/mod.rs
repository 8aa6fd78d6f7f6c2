//====================================================================

use std::sync::Arc;

use self::camera::{Camera, OrthographicCamera};
use self::pipelines::{
    ShapeBatch, ShapePipeline, SpritePipeline, TextLabel, TextLabelDescriptor, TextPipeline,
};
use self::textures::{LoadedTexture, Texture, TextureLoader};

use super::{
    assets::{self, AssetError},
    tools::Size,
};

pub mod camera;
pub mod pipelines;
pub mod textures;
pub mod tools;

//====================================================================

const FALLBACK_SIZE: Size<u32> = Size::new(1280, 720);

pub struct Renderer {
    core: RendererCore,
    loader: TextureLoader,
    depth_texture: Texture,
    pub default_texture: Arc<LoadedTexture>,

    pub camera: Camera,
    pub clear_color: wgpu::Color,

    pub sprite_pipeline: SpritePipeline,
    shape_pipeline: ShapePipeline,
    text_pipeline: TextPipeline,
}

impl Renderer {
    pub fn new(window: Arc<winit::window::Window>) -> Self {
        let size = match window.inner_size().into() {
            Size { width: 0, .. } | Size { height: 0, .. } => FALLBACK_SIZE,
            size => size,
        };

        let core = pollster::block_on(RendererCore::new(window, size));
        let loader = TextureLoader::new(&core.device);

        let depth_texture = Texture::create_depth_texture(&core.device, size, "frame depth");

        let default_texture = loader.load(
            &core.device,
            Texture::from_color(&core.device, &core.queue, [255; 3]),
        );

        let camera = Camera::new(
            &core.device,
            OrthographicCamera::new_sized(size.width as f32, size.height as f32),
        );

        let sprite_pipeline = SpritePipeline::new(
            &core.device,
            core.config.format,
            &loader,
            camera.bind_group_layout(),
        );

        let shape_pipeline = ShapePipeline::new(
            &core.device,
            Texture::TARGET_FORMAT,
            camera.bind_group_layout(),
        );

        let text_pipeline = TextPipeline::new(
            &core.device,
            core.config.format,
            &loader,
            camera.bind_group_layout(),
        );

        Self {
            core,
            loader,
            depth_texture,
            default_texture,
            camera,
            clear_color: wgpu::Color {
                r: 0.2,
                g: 0.2,
                b: 0.2,
                a: 1.,
            },
            sprite_pipeline,
            shape_pipeline,
            text_pipeline,
        }
    }

    pub fn resize(&mut self, new_size: Size<u32>) {
        self.core.reconfigure(new_size);
        self.depth_texture = Texture::create_depth_texture(&self.core.device, new_size, "frame depth");

        self.camera
            .projection
            .set_size(new_size.width as f32, new_size.height as f32);
    }

    pub fn tick(&mut self) {
        self.camera.update(&self.core.queue);
        self.sprite_pipeline.prep(&self.core.device, &self.core.queue);
        self.text_pipeline.prep(&self.core.device, &self.core.queue);

        self.render_frame();
    }

    fn render_frame(&mut self) {
        let Ok(frame) = self.core.surface.get_current_texture() else {
            log::warn!("Surface texture unavailable, skipping frame");
            return;
        };

        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .core
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        self.sprite_pipeline.render(&mut pass, self.camera.bind_group());
        self.text_pipeline.render(&mut pass, self.camera.bind_group());

        drop(pass);

        self.core.queue.submit(Some(encoder.finish()));
        frame.present();
    }
}

//--------------------------------------------------

impl Renderer {
    /// Draw a batch of shapes into a fresh offscreen target and hand the
    /// result back as a sprite texture. The target gets its own camera with
    /// the origin at its bottom-left corner.
    pub fn render_to_texture(&mut self, size: Size<u32>, batch: &ShapeBatch) -> Arc<LoadedTexture> {
        let target = Texture::create_render_target(&self.core.device, size, "offscreen target");

        let target_camera = Camera::new(
            &self.core.device,
            OrthographicCamera::new_sized(size.width as f32, size.height as f32),
        );

        self.shape_pipeline
            .prep(&self.core.device, &self.core.queue, batch);

        let mut encoder = self
            .core
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("offscreen encoder"),
            });

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("offscreen pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &target.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        self.shape_pipeline.render(&mut pass, target_camera.bind_group());

        drop(pass);

        self.core.queue.submit(Some(encoder.finish()));

        self.loader.load(&self.core.device, target)
    }

    /// Load an image asset from disk into a sprite texture.
    pub fn load_texture_file(&self, path: &str) -> Result<Arc<LoadedTexture>, AssetError> {
        let image = assets::load_image(path)?;
        let texture = Texture::from_image(&self.core.device, &self.core.queue, &image, Some(path));

        Ok(self.loader.load(&self.core.device, texture))
    }

    #[inline]
    pub fn create_label(&mut self, desc: &TextLabelDescriptor) -> TextLabel {
        self.text_pipeline
            .create_label(&self.core.device, &self.core.queue, &self.loader, desc)
    }

    #[inline]
    pub fn draw_label(&mut self, label: &TextLabel, position: glam::Vec3) {
        self.text_pipeline.draw_label(label, position);
    }
}

//====================================================================

struct RendererCore {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl RendererCore {
    async fn new(window: Arc<winit::window::Window>, size: Size<u32>) -> Self {
        log::debug!("Setting up wgpu, surface size = {}", size);

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window).unwrap();

        let adapter = pick_adapter(&instance, &surface).await;
        log::debug!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default(), None)
            .await
            .unwrap();

        let capabilities = surface.get_capabilities(&adapter);

        let format = capabilities
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .unwrap_or(capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::AutoNoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: capabilities.alpha_modes[0],
            view_formats: vec![],
        };

        surface.configure(&device, &config);

        Self {
            device,
            queue,
            surface,
            config,
        }
    }

    fn reconfigure(&mut self, size: Size<u32>) {
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }
}

async fn pick_adapter(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'_>,
) -> wgpu::Adapter {
    instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(surface),
        })
        .await
        .unwrap()
}

//====================================================================
