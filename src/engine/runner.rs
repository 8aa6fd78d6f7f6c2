//====================================================================

use std::marker::PhantomData;

use winit::{
    application::ApplicationHandler,
    event::{StartCause, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::WindowId,
};

use super::{scene::Scene, State};

//====================================================================

/// Owns the event loop and hands everything else to [`State`] once winit
/// resumes the application.
pub struct Runner<S: Scene> {
    app: Option<State>,
    scene_kind: PhantomData<S>,
}

impl<S: Scene> Runner<S> {
    pub fn run() {
        let mut runner = Self {
            app: None,
            scene_kind: PhantomData,
        };

        EventLoop::new().unwrap().run_app(&mut runner).unwrap();
    }
}

impl<S: Scene> ApplicationHandler for Runner<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        match self.app.is_none() {
            true => {
                log::trace!("App resumed, building state");
                self.app = Some(State::new::<S>(event_loop));
            }
            false => log::warn!("App resumed with existing state"),
        }
    }

    #[inline]
    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if let Some(app) = &mut self.app {
            app.window_event(event_loop, id, event);
        }
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let (Some(app), StartCause::ResumeTimeReached { .. }) = (&self.app, cause) {
            app.request_redraw();
        }
    }
}

//====================================================================
