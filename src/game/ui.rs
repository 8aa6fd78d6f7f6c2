//====================================================================

use std::sync::Arc;

use crate::engine::{
    renderer::{pipelines::TextLabel, textures::LoadedTexture, Renderer},
    tools::{Input, MouseButton},
};

//====================================================================

const BUTTON_LAYER: f32 = 100.;

const FLAT_COLOR: [f32; 4] = [0.35, 0.35, 0.35, 1.];
const FLAT_HELD_COLOR: [f32; 4] = [0.25, 0.25, 0.25, 1.];

//====================================================================

pub enum ButtonArt {
    /// Textured button with separate art for the held state.
    Image {
        normal: Arc<LoadedTexture>,
        pressed: Arc<LoadedTexture>,
    },
    /// Plain quad that darkens while held, with an optional text label.
    Flat { label: Option<TextLabel> },
}

pub struct Button {
    pub position: glam::Vec2,
    pub size: glam::Vec2,
    art: ButtonArt,

    held: bool,
}

impl Button {
    pub fn new(position: glam::Vec2, size: glam::Vec2, art: ButtonArt) -> Self {
        Self {
            position,
            size,
            art,
            held: false,
        }
    }

    #[inline]
    pub fn contains(&self, point: glam::Vec2) -> bool {
        let delta = point - self.position;
        delta.x.abs() <= self.size.x / 2. && delta.y.abs() <= self.size.y / 2.
    }

    /// Track the mouse for one frame. Returns true on a completed click:
    /// pressed on the button and released on it again.
    pub fn update(&mut self, cursor: glam::Vec2, buttons: &Input<MouseButton>) -> bool {
        if buttons.just_pressed(MouseButton::Left) && self.contains(cursor) {
            self.held = true;
        }

        if buttons.released(MouseButton::Left) {
            let was_held = self.held;
            self.held = false;

            return was_held && self.contains(cursor);
        }

        false
    }

    #[inline]
    pub fn held(&self) -> bool {
        self.held
    }

    pub fn render(&self, renderer: &mut Renderer) {
        let position = self.position.extend(BUTTON_LAYER);

        match &self.art {
            ButtonArt::Image { normal, pressed } => {
                let texture = match self.held {
                    true => pressed,
                    false => normal,
                };

                renderer
                    .sprite_pipeline
                    .draw(texture, self.size, [1., 1., 1., 1.], position);
            }

            ButtonArt::Flat { label } => {
                let color = match self.held {
                    true => FLAT_HELD_COLOR,
                    false => FLAT_COLOR,
                };

                let backdrop = renderer.default_texture.clone();
                renderer
                    .sprite_pipeline
                    .draw(&backdrop, self.size, color, position);

                if let Some(label) = label {
                    renderer.draw_label(label, position);
                }
            }
        }
    }
}

//====================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_button() -> Button {
        Button::new(
            glam::vec2(100., 100.),
            glam::vec2(60., 40.),
            ButtonArt::Flat { label: None },
        )
    }

    #[test]
    fn contains_covers_the_full_extent() {
        let button = flat_button();

        assert!(button.contains(glam::vec2(100., 100.)));
        assert!(button.contains(glam::vec2(70., 80.)));
        assert!(button.contains(glam::vec2(130., 120.)));
        assert!(!button.contains(glam::vec2(131., 100.)));
        assert!(!button.contains(glam::vec2(100., 121.)));
    }

    #[test]
    fn press_and_release_inside_clicks() {
        let mut button = flat_button();
        let mut buttons = Input::default();
        let on_button = glam::vec2(100., 100.);

        buttons.process(MouseButton::Left, true);
        assert!(!button.update(on_button, &buttons));
        assert!(button.held());
        buttons.reset();

        buttons.process(MouseButton::Left, false);
        assert!(button.update(on_button, &buttons));
        assert!(!button.held());
    }

    #[test]
    fn releasing_outside_cancels_the_click() {
        let mut button = flat_button();
        let mut buttons = Input::default();

        buttons.process(MouseButton::Left, true);
        button.update(glam::vec2(100., 100.), &buttons);
        buttons.reset();

        buttons.process(MouseButton::Left, false);
        assert!(!button.update(glam::vec2(500., 500.), &buttons));
        assert!(!button.held());
    }

    #[test]
    fn pressing_outside_never_clicks() {
        let mut button = flat_button();
        let mut buttons = Input::default();

        buttons.process(MouseButton::Left, true);
        assert!(!button.update(glam::vec2(0., 0.), &buttons));
        assert!(!button.held());
        buttons.reset();

        buttons.process(MouseButton::Left, false);
        assert!(!button.update(glam::vec2(100., 100.), &buttons));
    }
}
