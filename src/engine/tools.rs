//====================================================================

use std::{
    collections::HashSet,
    fmt,
    hash::{BuildHasherDefault, Hash},
};

use rustc_hash::FxHasher;

//====================================================================

type FxBuild = BuildHasherDefault<FxHasher>;

//====================================================================

#[derive(Clone, Copy, Debug, Hash, PartialEq)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    #[inline]
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }
}

impl<T: fmt::Display> fmt::Display for Size<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl<T> From<winit::dpi::PhysicalSize<T>> for Size<T> {
    #[inline]
    fn from(size: winit::dpi::PhysicalSize<T>) -> Self {
        Size::new(size.width, size.height)
    }
}

//====================================================================

pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// Per-frame view of a set of digital inputs. `down` persists while the
/// input is held, the edge sets last for one frame.
#[derive(Debug)]
pub struct Input<T> {
    down: HashSet<T, FxBuild>,
    just_pressed: HashSet<T, FxBuild>,
    just_released: HashSet<T, FxBuild>,
}

impl<T> Default for Input<T> {
    fn default() -> Self {
        Self {
            down: HashSet::default(),
            just_pressed: HashSet::default(),
            just_released: HashSet::default(),
        }
    }
}

impl<T> Input<T>
where
    T: Eq + Hash + Copy,
{
    pub fn process(&mut self, value: T, is_down: bool) {
        match is_down {
            true => {
                self.down.insert(value);
                self.just_pressed.insert(value);
            }
            false => {
                self.down.remove(&value);
                self.just_released.insert(value);
            }
        }
    }

    pub fn reset(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    #[inline]
    pub fn pressed(&self, value: T) -> bool {
        self.down.contains(&value)
    }

    #[inline]
    pub fn just_pressed(&self, value: T) -> bool {
        self.just_pressed.contains(&value)
    }

    #[inline]
    pub fn released(&self, value: T) -> bool {
        self.just_released.contains(&value)
    }
}

//====================================================================

/// Cursor position is kept in window coordinates (origin top-left, y down)
/// exactly as winit reports it. Scenes flip it when hit-testing in world
/// space.
#[derive(Debug, Default)]
pub struct Mouse {
    pub buttons: Input<MouseButton>,
    pub position: glam::Vec2,
    pub scroll: glam::Vec2,
}

impl Mouse {
    /// Cursor position in world coordinates (origin bottom-left, y up).
    #[inline]
    pub fn world_position(&self, window_size: Size<u32>) -> glam::Vec2 {
        glam::vec2(self.position.x, window_size.height as f32 - self.position.y)
    }

    pub fn reset(&mut self) {
        self.buttons.reset();
        self.scroll = glam::Vec2::ZERO;
    }
}

//====================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_tracks_press_and_release() {
        let mut input = Input::<KeyCode>::default();

        input.process(KeyCode::Enter, true);
        assert!(input.pressed(KeyCode::Enter));
        assert!(input.just_pressed(KeyCode::Enter));
        assert!(!input.released(KeyCode::Enter));

        input.reset();
        assert!(input.pressed(KeyCode::Enter));
        assert!(!input.just_pressed(KeyCode::Enter));

        input.process(KeyCode::Enter, false);
        assert!(!input.pressed(KeyCode::Enter));
        assert!(input.released(KeyCode::Enter));

        input.reset();
        assert!(!input.released(KeyCode::Enter));
    }

    #[test]
    fn mouse_world_position_flips_y() {
        let mut mouse = Mouse::default();
        mouse.position = glam::vec2(100., 20.);

        let world = mouse.world_position(Size::new(1280, 720));
        assert_eq!(world, glam::vec2(100., 700.));
    }

    #[test]
    fn mouse_reset_clears_frame_state() {
        let mut mouse = Mouse::default();
        mouse.buttons.process(MouseButton::Left, true);
        mouse.scroll = glam::vec2(0., 1.);

        mouse.reset();
        assert!(mouse.buttons.pressed(MouseButton::Left));
        assert!(!mouse.buttons.just_pressed(MouseButton::Left));
        assert_eq!(mouse.scroll, glam::Vec2::ZERO);
    }
}
