//====================================================================

use std::marker::PhantomData;

use wgpu::util::DeviceExt;

use super::textures::Texture;

//====================================================================

pub trait Vertex: bytemuck::Pod {
    fn desc<'a>() -> wgpu::VertexBufferLayout<'a>;
}

//====================================================================

/// The handful of pipeline knobs the scene's passes differ in. Everything
/// else gets the wgpu defaults.
#[derive(Default)]
pub struct PipelineSettings<'a> {
    pub depth_stencil: Option<wgpu::DepthStencilState>,
    pub fragment_targets: Option<&'a [Option<wgpu::ColorTargetState>]>,
}

impl PipelineSettings<'_> {
    /// Depth tested and written, for passes that layer sprites by z.
    pub fn with_depth(mut self) -> Self {
        self.depth_stencil = Some(wgpu::DepthStencilState {
            format: Texture::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        self
    }
}

pub fn build_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    label: &str,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    vertex_buffers: &[wgpu::VertexBufferLayout],
    shader_source: &str,

    settings: PipelineSettings,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{label} layout")),
        bind_group_layouts,
        push_constant_ranges: &[],
    });

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{label} shader")),
        source: wgpu::ShaderSource::Wgsl(shader_source.into()),
    });

    let opaque_target = [Some(wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::REPLACE),
        write_mask: wgpu::ColorWrites::all(),
    })];

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: vertex_buffers,
        },
        // Every pass in this scene draws unit quads as triangle strips
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            ..Default::default()
        },
        depth_stencil: settings.depth_stencil,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: settings.fragment_targets.unwrap_or(&opaque_target),
        }),
        multiview: None,
        cache: None,
    })
}

//====================================================================

pub fn texture_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

pub fn sampler_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

//====================================================================

/// Growable vertex buffer of per-instance data. Refilling with fewer
/// instances reuses the allocation; growing past capacity reallocates.
pub struct InstanceBuffer<T> {
    marker: PhantomData<T>,
    raw: wgpu::Buffer,
    len: u32,
    capacity: u32,
}

impl<T: bytemuck::Pod> InstanceBuffer<T> {
    pub fn new(device: &wgpu::Device, data: &[T]) -> Self {
        Self {
            marker: PhantomData,
            raw: Self::allocate(device, data),
            len: data.len() as u32,
            capacity: data.len() as u32,
        }
    }

    pub fn update(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) {
        self.len = data.len() as u32;

        if self.len > self.capacity {
            self.raw = Self::allocate(device, data);
            self.capacity = self.len;
            return;
        }

        if !data.is_empty() {
            queue.write_buffer(&self.raw, 0, bytemuck::cast_slice(data));
        }
    }

    fn allocate(device: &wgpu::Device, data: &[T]) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} instances", std::any::type_name::<T>())),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        })
    }

    #[inline]
    pub fn raw(&self) -> &wgpu::Buffer {
        &self.raw
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }
}

//====================================================================
