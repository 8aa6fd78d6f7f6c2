//====================================================================

use std::{collections::HashMap, sync::atomic::AtomicU32, sync::Arc};

use cosmic_text::{Attrs, Buffer, Metrics, Shaping, SwashContent};

use super::{
    super::{
        textures::{LoadedTexture, Texture, TextureLoader},
        tools::{self, InstanceBuffer, Vertex},
    },
    sprite_pipeline::InstanceSprite,
};

//====================================================================

static NEXT_LABEL_ID: AtomicU32 = AtomicU32::new(0);

/// Handle to a label baked by the text pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLabel {
    id: u32,
}

pub struct TextLabelDescriptor<'a> {
    pub text: &'a str,
    pub font_size: f32,
    pub color: [u8; 3],
}

impl<'a> Default for TextLabelDescriptor<'a> {
    fn default() -> Self {
        Self {
            text: "",
            font_size: 30.,
            color: [255, 255, 255],
        }
    }
}

//====================================================================

/// Static text rendering. Labels never change once created, so each one is
/// shaped and rasterised a single time into its own small texture and drawn
/// as a quad from then on.
pub struct TextPipeline {
    pipeline: wgpu::RenderPipeline,

    font_system: cosmic_text::FontSystem,
    swash_cache: cosmic_text::SwashCache,

    labels: HashMap<u32, LabelData>,
    visible: Vec<(u32, glam::Vec3)>,
}

struct LabelData {
    texture: Arc<LoadedTexture>,
    size: glam::Vec2,
    buffer: InstanceBuffer<InstanceSprite>,
}

impl TextPipeline {
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        loader: &TextureLoader,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let pipeline = tools::build_pipeline(
            device,
            format,
            "Text Pipeline",
            &[camera_bind_group_layout, loader.layout()],
            &[InstanceSprite::desc()],
            include_str!("shaders/text.wgsl"),
            tools::PipelineSettings {
                fragment_targets: Some(&[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::all(),
                })]),
                // Text draws over everything already in the frame
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: Texture::DEPTH_FORMAT,
                    depth_write_enabled: false,
                    depth_compare: wgpu::CompareFunction::Always,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
            },
        );

        Self {
            pipeline,
            font_system: cosmic_text::FontSystem::new(),
            swash_cache: cosmic_text::SwashCache::new(),
            labels: HashMap::default(),
            visible: Vec::new(),
        }
    }

    pub(crate) fn create_label(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        loader: &TextureLoader,
        desc: &TextLabelDescriptor,
    ) -> TextLabel {
        let id = NEXT_LABEL_ID.fetch_add(1, std::sync::atomic::Ordering::Relaxed);

        let bitmap = self.rasterize(desc);
        let size = glam::vec2(bitmap.width() as f32, bitmap.height() as f32);

        let texture = loader.load(
            device,
            Texture::from_image(device, queue, &bitmap.into(), Some("Label Texture")),
        );

        self.labels.insert(
            id,
            LabelData {
                texture,
                size,
                buffer: InstanceBuffer::new(device, &[]),
            },
        );

        TextLabel { id }
    }

    /// Queue a label for this frame, centred on `position`.
    pub fn draw_label(&mut self, label: &TextLabel, position: glam::Vec3) {
        match self.labels.contains_key(&label.id) {
            true => self.visible.push((label.id, position)),
            false => log::warn!("Tried to draw unknown text label {}", label.id),
        }
    }

    pub(crate) fn prep(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        for (id, position) in &self.visible {
            let data = self.labels.get_mut(id).unwrap();

            let instance = InstanceSprite {
                transform: glam::Mat4::from_translation(*position),
                color: glam::Vec4::ONE,
                size: data.size,
                pad: [0.; 2],
            };

            data.buffer.update(device, queue, &[instance]);
        }
    }

    pub(crate) fn render(
        &mut self,
        pass: &mut wgpu::RenderPass,
        camera_bind_group: &wgpu::BindGroup,
    ) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, camera_bind_group, &[]);

        for (id, _) in self.visible.drain(..) {
            let data = &self.labels[&id];

            pass.set_bind_group(1, data.texture.bind_group(), &[]);
            pass.set_vertex_buffer(0, data.buffer.raw().slice(..));
            pass.draw(0..4, 0..data.buffer.len());
        }
    }
}

//--------------------------------------------------

impl TextPipeline {
    /// Shape and rasterise the label text into an rgba bitmap, alpha taken
    /// from glyph coverage.
    fn rasterize(&mut self, desc: &TextLabelDescriptor) -> image::RgbaImage {
        let metrics = Metrics::new(desc.font_size, desc.font_size * 1.2);

        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_text(&mut self.font_system, desc.text, Attrs::new(), Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        // Rasterise each glyph and track the area they cover together.
        // Coordinates are y-down, relative to the top-left of the text block.
        let mut glyphs = Vec::new();
        let (mut min_x, mut min_y) = (i32::MAX, i32::MAX);
        let (mut max_x, mut max_y) = (i32::MIN, i32::MIN);

        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                let physical = glyph.physical((0., 0.), 1.);

                let image = match self
                    .swash_cache
                    .get_image_uncached(&mut self.font_system, physical.cache_key)
                {
                    Some(image) if image.placement.width > 0 && image.placement.height > 0 => {
                        image
                    }
                    _ => continue,
                };

                if image.content != SwashContent::Mask {
                    log::warn!("Skipping non-mask glyph in label '{}'", desc.text);
                    continue;
                }

                let left = physical.x + image.placement.left;
                let top = run.line_y.round() as i32 + physical.y - image.placement.top;

                min_x = min_x.min(left);
                min_y = min_y.min(top);
                max_x = max_x.max(left + image.placement.width as i32);
                max_y = max_y.max(top + image.placement.height as i32);

                glyphs.push((left, top, image));
            }
        }

        if glyphs.is_empty() {
            log::error!("Label '{}' produced no glyphs", desc.text);
            return image::RgbaImage::new(1, 1);
        }

        let mut bitmap =
            image::RgbaImage::new((max_x - min_x) as u32, (max_y - min_y) as u32);

        for (left, top, image) in glyphs {
            let width = image.placement.width;

            for (index, coverage) in image.data.iter().enumerate() {
                if *coverage == 0 {
                    continue;
                }

                let x = (left - min_x) as u32 + index as u32 % width;
                let y = (top - min_y) as u32 + index as u32 / width;

                let pixel = bitmap.get_pixel_mut(x, y);
                let alpha = (*coverage).max(pixel.0[3]);
                *pixel = image::Rgba([desc.color[0], desc.color[1], desc.color[2], alpha]);
            }
        }

        bitmap
    }
}

//====================================================================
