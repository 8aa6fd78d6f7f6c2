//====================================================================

use std::{collections::HashMap, sync::Arc};

use super::super::{
    textures::{LoadedTexture, TextureLoader},
    tools::{self, InstanceBuffer, Vertex},
};

//====================================================================

pub struct SpritePipeline {
    pipeline: wgpu::RenderPipeline,

    batches: HashMap<u32, SpriteBatch>,
    to_draw: HashMap<u32, (Arc<LoadedTexture>, Vec<InstanceSprite>)>,
}

struct SpriteBatch {
    texture: Arc<LoadedTexture>,
    buffer: InstanceBuffer<InstanceSprite>,
}

impl SpritePipeline {
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        loader: &TextureLoader,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let pipeline = tools::build_pipeline(
            device,
            format,
            "Sprite Pipeline",
            &[camera_bind_group_layout, loader.layout()],
            &[InstanceSprite::desc()],
            include_str!("shaders/sprite.wgsl"),
            tools::PipelineSettings::default().with_depth(),
        );

        Self {
            pipeline,
            batches: HashMap::default(),
            to_draw: HashMap::default(),
        }
    }

    /// Queue a textured quad for this frame. `position.z` picks the layer:
    /// smaller z draws on top.
    pub fn draw(
        &mut self,
        texture: &Arc<LoadedTexture>,
        size: glam::Vec2,
        color: [f32; 4],
        position: glam::Vec3,
    ) {
        let instance = InstanceSprite {
            transform: glam::Mat4::from_translation(position),
            color: color.into(),
            size,
            pad: [0.; 2],
        };

        self.to_draw
            .entry(texture.id())
            .or_insert_with(|| (texture.clone(), Vec::new()))
            .1
            .push(instance);
    }

    pub(crate) fn prep(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        // Drop batches for textures nothing queued this frame
        self.batches.retain(|id, _| self.to_draw.contains_key(id));

        for (id, (texture, raw)) in self.to_draw.drain() {
            self.batches
                .entry(id)
                .and_modify(|batch| batch.buffer.update(device, queue, &raw))
                .or_insert_with(|| SpriteBatch {
                    texture,
                    buffer: InstanceBuffer::new(device, &raw),
                });
        }
    }

    pub(crate) fn render(
        &mut self,
        pass: &mut wgpu::RenderPass,
        camera_bind_group: &wgpu::BindGroup,
    ) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, camera_bind_group, &[]);

        self.batches.values().for_each(|batch| {
            pass.set_bind_group(1, batch.texture.bind_group(), &[]);
            pass.set_vertex_buffer(0, batch.buffer.raw().slice(..));
            pass.draw(0..4, 0..batch.buffer.len());
        });
    }
}

//====================================================================

#[repr(C)]
#[derive(bytemuck::Pod, bytemuck::Zeroable, Clone, Copy, Debug)]
pub struct InstanceSprite {
    pub transform: glam::Mat4,
    pub color: glam::Vec4,
    pub size: glam::Vec2,
    pub pad: [f32; 2],
}

impl Vertex for InstanceSprite {
    fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        // Transform columns, then color, then size
        const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
            0 => Float32x4,
            1 => Float32x4,
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x2,
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}

//====================================================================
