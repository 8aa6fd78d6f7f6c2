//====================================================================

use wgpu::util::DeviceExt;

//====================================================================

/// Screen-space camera: world origin at the bottom-left of the viewport,
/// one unit per pixel. Larger z is further away.
#[derive(Debug, Clone)]
pub struct OrthographicCamera {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for OrthographicCamera {
    fn default() -> Self {
        Self {
            left: 0.,
            right: 1280.,
            bottom: 0.,
            top: 720.,
            z_near: 0.,
            z_far: 1000.,
        }
    }
}

impl OrthographicCamera {
    pub fn new_sized(width: f32, height: f32) -> Self {
        Self {
            right: width,
            top: height,
            ..Default::default()
        }
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.right = width;
        self.top = height;
    }

    pub fn get_projection(&self) -> glam::Mat4 {
        glam::Mat4::orthographic_lh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.z_near,
            self.z_far,
        )
    }

    fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_projection: self.get_projection(),
            camera_position: glam::Vec3::ZERO,
            _padding: 0,
        }
    }
}

//====================================================================

pub struct Camera {
    pub projection: OrthographicCamera,

    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl Camera {
    pub fn new(device: &wgpu::Device, projection: OrthographicCamera) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera uniform"),
            contents: bytemuck::cast_slice(&[projection.to_uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera bind group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(buffer.as_entire_buffer_binding()),
            }],
        });

        Self {
            projection,
            buffer,
            bind_group_layout: layout,
            bind_group,
        }
    }

    pub fn update(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.projection.to_uniform()]),
        );
    }

    #[inline]
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    #[inline]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

//====================================================================

#[repr(C)]
#[derive(bytemuck::Pod, bytemuck::Zeroable, Clone, Copy)]
struct CameraUniform {
    view_projection: glam::Mat4,
    camera_position: glam::Vec3,
    _padding: u32,
}

//====================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn project(camera: &OrthographicCamera, point: glam::Vec3) -> glam::Vec3 {
        let clip = camera.get_projection() * point.extend(1.);
        clip.truncate() / clip.w
    }

    #[test]
    fn sized_camera_maps_viewport_corners_to_ndc() {
        let camera = OrthographicCamera::new_sized(800., 600.);

        let bottom_left = project(&camera, glam::vec3(0., 0., 0.));
        assert!((bottom_left.x - -1.).abs() < 1e-6);
        assert!((bottom_left.y - -1.).abs() < 1e-6);

        let top_right = project(&camera, glam::vec3(800., 600., 0.));
        assert!((top_right.x - 1.).abs() < 1e-6);
        assert!((top_right.y - 1.).abs() < 1e-6);

        let centre = project(&camera, glam::vec3(400., 300., 0.));
        assert!(centre.x.abs() < 1e-6);
        assert!(centre.y.abs() < 1e-6);
    }

    #[test]
    fn nearer_points_have_smaller_depth() {
        let camera = OrthographicCamera::new_sized(800., 600.);

        let near = project(&camera, glam::vec3(10., 10., 100.));
        let far = project(&camera, glam::vec3(10., 10., 300.));
        assert!(near.z < far.z);
    }

    #[test]
    fn set_size_keeps_bottom_left_origin() {
        let mut camera = OrthographicCamera::new_sized(800., 600.);
        camera.set_size(1280., 720.);

        assert_eq!(camera.left, 0.);
        assert_eq!(camera.bottom, 0.);
        assert_eq!(camera.right, 1280.);
        assert_eq!(camera.top, 720.);
    }
}
