//====================================================================

use std::{sync::Arc, time::Duration};

use winit::{
    dpi::LogicalSize,
    event::{MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow},
    window::{Window, WindowAttributes, WindowId},
};

use self::renderer::Renderer;
use self::scene::Scene;
use self::tools::{Input, KeyCode, Mouse, Size};

pub mod assets;
pub mod renderer;
pub mod runner;
pub mod scene;
pub mod tools;

//====================================================================

const FRAME_INTERVAL: Duration = Duration::from_millis(13);

pub struct State {
    inner: StateInner,
    scene: Box<dyn Scene>,
}

pub struct StateInner {
    pub window: Arc<Window>,
    pub renderer: Renderer,
    pub keys: Input<KeyCode>,
    pub mouse: Mouse,

    exit_requested: bool,
}

impl StateInner {
    #[inline]
    pub fn window_size(&self) -> Size<u32> {
        self.window.inner_size().into()
    }

    /// Ask the runner to shut the application down after the current tick.
    #[inline]
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }
}

impl State {
    pub fn new<S: Scene>(event_loop: &ActiveEventLoop) -> Self {
        let attributes = WindowAttributes::default()
            .with_title("Grid Panel")
            .with_inner_size(LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(attributes).unwrap());
        let renderer = Renderer::new(window.clone());

        let mut inner = StateInner {
            window,
            renderer,
            keys: Input::default(),
            mouse: Mouse::default(),
            exit_requested: false,
        };

        let scene = Box::new(S::new(&mut inner));

        Self { inner, scene }
    }

    pub fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::Resized(new_size) => {
                if new_size.width == 0 || new_size.height == 0 {
                    log::warn!("Ignoring resize to empty size {:?}", new_size);
                    return;
                }
                let size: Size<u32> = new_size.into();
                self.inner.renderer.resize(size);
                self.scene.resize(&mut self.inner, size);
            }

            WindowEvent::CloseRequested => {
                log::info!("Close requested, shutting down");
                event_loop.exit();
            }

            WindowEvent::Destroyed => log::error!("Window destroyed"),

            WindowEvent::KeyboardInput { event, .. } => {
                if let winit::keyboard::PhysicalKey::Code(key) = event.physical_key {
                    match event.state.is_pressed() {
                        true => log::trace!("Key pressed: {:?}", key),
                        false => log::trace!("Key released: {:?}", key),
                    }
                    self.inner.keys.process(key, event.state.is_pressed());
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                log::trace!("Mouse moved, X:{}  Y:{}", position.x, position.y);
                self.inner.mouse.position = glam::vec2(position.x as f32, position.y as f32);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                match state.is_pressed() {
                    true => log::trace!("Mouse down: {:?}", button),
                    false => log::trace!("Mouse up: {:?}", button),
                }
                self.inner.mouse.buttons.process(button, state.is_pressed());
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(x, y) => glam::vec2(x, y),
                    MouseScrollDelta::PixelDelta(pos) => glam::vec2(pos.x as f32, pos.y as f32),
                };
                log::trace!("Mouse scroll, X:{}  Y:{}", scroll.x, scroll.y);
                self.inner.mouse.scroll += scroll;
            }

            WindowEvent::Touch(touch) => {
                log::trace!(
                    "Touch {:?}, X:{}  Y:{}",
                    touch.phase,
                    touch.location.x,
                    touch.location.y
                );
            }

            WindowEvent::RedrawRequested => {
                event_loop.set_control_flow(ControlFlow::wait_duration(FRAME_INTERVAL));

                self.tick();

                if self.inner.exit_requested {
                    log::info!("Scene requested exit, shutting down");
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }

    #[inline]
    pub fn request_redraw(&self) {
        self.inner.window.request_redraw();
    }

    pub fn tick(&mut self) {
        self.scene.update(&mut self.inner);
        self.inner.renderer.tick();

        self.inner.keys.reset();
        self.inner.mouse.reset();
    }
}

//====================================================================
