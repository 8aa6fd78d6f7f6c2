//====================================================================

use super::super::tools::{self, InstanceBuffer, Vertex};

//====================================================================

const SHAPE_RECT: f32 = 0.;
const SHAPE_CIRCLE: f32 = 1.;

const LINE_THICKNESS: f32 = 1.;

//====================================================================

/// CPU-side queue of shape draw commands. Instances are drawn in the order
/// they were queued, so later shapes paint over earlier ones.
#[derive(Default)]
pub struct ShapeBatch {
    instances: Vec<InstanceShape>,
}

impl ShapeBatch {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    #[inline]
    pub fn instances(&self) -> &[InstanceShape] {
        &self.instances
    }

    pub fn draw_solid_rect(&mut self, min: glam::Vec2, max: glam::Vec2, color: [f32; 4]) {
        let size = max - min;
        let centre = min + size / 2.;

        self.instances.push(InstanceShape {
            transform: glam::Mat4::from_scale_rotation_translation(
                size.abs().extend(1.),
                glam::Quat::IDENTITY,
                centre.extend(0.),
            ),
            fill_color: color.into(),
            border_color: glam::Vec4::ZERO,
            params: glam::vec4(SHAPE_RECT, 0., 0., 0.),
        });
    }

    pub fn draw_solid_circle(
        &mut self,
        centre: glam::Vec2,
        radius: f32,
        scale: f32,
        fill_color: [f32; 4],
        border_width: f32,
        border_color: [f32; 4],
    ) {
        let diameter = radius * 2. * scale;

        self.instances.push(InstanceShape {
            transform: glam::Mat4::from_scale_rotation_translation(
                glam::vec3(diameter, diameter, 1.),
                glam::Quat::IDENTITY,
                centre.extend(0.),
            ),
            fill_color: fill_color.into(),
            border_color: border_color.into(),
            params: glam::vec4(SHAPE_CIRCLE, border_width / diameter, 0., 0.),
        });
    }

    pub fn draw_line(&mut self, from: glam::Vec2, to: glam::Vec2, color: [f32; 4]) {
        let delta = to - from;
        let length = delta.length();
        let angle = delta.y.atan2(delta.x);
        let centre = from + delta / 2.;

        self.instances.push(InstanceShape {
            transform: glam::Mat4::from_scale_rotation_translation(
                glam::vec3(length, LINE_THICKNESS, 1.),
                glam::Quat::from_rotation_z(angle),
                centre.extend(0.),
            ),
            fill_color: color.into(),
            border_color: glam::Vec4::ZERO,
            params: glam::vec4(SHAPE_RECT, 0., 0., 0.),
        });
    }

    #[inline]
    pub fn clear(&mut self) {
        self.instances.clear();
    }
}

//====================================================================

pub struct ShapePipeline {
    pipeline: wgpu::RenderPipeline,
    buffer: InstanceBuffer<InstanceShape>,
}

impl ShapePipeline {
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let pipeline = tools::build_pipeline(
            device,
            format,
            "Shape Pipeline",
            &[camera_bind_group_layout],
            &[InstanceShape::desc()],
            include_str!("shaders/shape.wgsl"),
            tools::PipelineSettings {
                fragment_targets: Some(&[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::all(),
                })]),
                ..Default::default()
            },
        );

        Self {
            pipeline,
            buffer: InstanceBuffer::new(device, &[]),
        }
    }

    pub(crate) fn prep(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, batch: &ShapeBatch) {
        self.buffer.update(device, queue, batch.instances());
    }

    pub(crate) fn render(
        &mut self,
        pass: &mut wgpu::RenderPass,
        camera_bind_group: &wgpu::BindGroup,
    ) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, camera_bind_group, &[]);

        pass.set_vertex_buffer(0, self.buffer.raw().slice(..));
        pass.draw(0..4, 0..self.buffer.len());
    }
}

//====================================================================

#[repr(C)]
#[derive(bytemuck::Pod, bytemuck::Zeroable, Clone, Copy, Debug)]
pub struct InstanceShape {
    pub transform: glam::Mat4,
    pub fill_color: glam::Vec4,
    pub border_color: glam::Vec4,
    /// x = shape kind, y = border width as a fraction of the quad.
    pub params: glam::Vec4,
}

impl Vertex for InstanceShape {
    fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
            0 => Float32x4, // Transform
            1 => Float32x4,
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4, // Fill color
            5 => Float32x4, // Border color
            6 => Float32x4, // Params
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &VERTEX_ATTRIBUTES,
        }
    }
}

//====================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn corner(instance: &InstanceShape, local: glam::Vec2) -> glam::Vec2 {
        (instance.transform * local.extend(0.).extend(1.)).truncate().truncate()
    }

    #[test]
    fn rect_quad_spans_min_to_max() {
        let mut batch = ShapeBatch::new();
        batch.draw_solid_rect(glam::vec2(10., 20.), glam::vec2(40., 80.), [1.; 4]);

        let instance = &batch.instances()[0];
        assert_eq!(instance.params.x, SHAPE_RECT);

        let min = corner(instance, glam::vec2(-0.5, -0.5));
        let max = corner(instance, glam::vec2(0.5, 0.5));
        assert!((min - glam::vec2(10., 20.)).length() < 1e-4);
        assert!((max - glam::vec2(40., 80.)).length() < 1e-4);
    }

    #[test]
    fn rect_handles_top_down_corners() {
        // Rows painted top-down pass min.y > max.y; the quad must not be
        // mirrored into negative scale.
        let mut batch = ShapeBatch::new();
        batch.draw_solid_rect(glam::vec2(0., 100.), glam::vec2(50., 50.), [1.; 4]);

        let instance = &batch.instances()[0];
        let a = corner(instance, glam::vec2(-0.5, -0.5));
        let b = corner(instance, glam::vec2(0.5, 0.5));
        assert!(a.x < b.x);
        assert!(a.y < b.y);
        assert!((b.y - a.y - 50.).abs() < 1e-4);
    }

    #[test]
    fn circle_quad_covers_scaled_diameter() {
        let mut batch = ShapeBatch::new();
        batch.draw_solid_circle(glam::vec2(100., 100.), 25., 0.8, [0., 1., 0., 1.], 1., [0., 0., 0., 1.]);

        let instance = &batch.instances()[0];
        assert_eq!(instance.params.x, SHAPE_CIRCLE);

        let left = corner(instance, glam::vec2(-0.5, 0.));
        let right = corner(instance, glam::vec2(0.5, 0.));
        assert!((right.x - left.x - 40.).abs() < 1e-4);

        // Border fraction normalised against the scaled diameter
        assert!((instance.params.y - 1. / 40.).abs() < 1e-6);
    }

    #[test]
    fn line_quad_connects_endpoints() {
        let mut batch = ShapeBatch::new();
        batch.draw_line(glam::vec2(0., 0.), glam::vec2(0., 300.), [0., 0., 0., 1.]);

        let instance = &batch.instances()[0];
        let start = corner(instance, glam::vec2(-0.5, 0.));
        let end = corner(instance, glam::vec2(0.5, 0.));
        assert!((start - glam::vec2(0., 0.)).length() < 1e-3);
        assert!((end - glam::vec2(0., 300.)).length() < 1e-3);
    }

    #[test]
    fn batch_preserves_submission_order() {
        let mut batch = ShapeBatch::new();
        batch.draw_solid_rect(glam::Vec2::ZERO, glam::Vec2::ONE, [1.; 4]);
        batch.draw_solid_circle(glam::Vec2::ZERO, 1., 1., [1.; 4], 0.1, [0.; 4]);
        batch.draw_line(glam::Vec2::ZERO, glam::Vec2::ONE, [1.; 4]);

        let kinds = batch
            .instances()
            .iter()
            .map(|instance| instance.params.x)
            .collect::<Vec<_>>();
        assert_eq!(kinds, vec![SHAPE_RECT, SHAPE_CIRCLE, SHAPE_RECT]);

        batch.clear();
        assert!(batch.is_empty());
    }
}
