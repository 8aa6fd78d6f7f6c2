//====================================================================

use crate::engine::{
    assets,
    renderer::pipelines::{ShapeBatch, TextLabelDescriptor},
    scene::Scene,
    tools::Size,
    StateInner,
};

use super::{
    grid::{self, GridPattern, GRID_COLUMNS, GRID_ROWS},
    panel::Panel,
    ui::{Button, ButtonArt},
};

//====================================================================

const CLOSE_NORMAL_PATH: &str = "assets/CloseNormal.png";
const CLOSE_SELECTED_PATH: &str = "assets/CloseSelected.png";
const CLOSE_BUTTON_FALLBACK_SIZE: glam::Vec2 = glam::Vec2::new(40., 40.);

const RESET_BUTTON_SIZE: glam::Vec2 = glam::Vec2::new(220., 70.);
const RESET_FONT_SIZE: f32 = 50.;

const TARGET_SIZE: Size<u32> = Size {
    width: 500,
    height: 500,
};
const GRID_SIZE: glam::Vec2 = glam::Vec2::new(400., 400.);

//====================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Init,
    Update,
    Pause,
    Menu1,
    Menu2,
    End,
}

//====================================================================

pub struct MainScene {
    game_state: GameState,

    panel: Panel,
    close_button: Button,
    reset_button: Button,

    reset_queued: bool,
}

impl Scene for MainScene {
    fn new(state: &mut StateInner) -> Self {
        let window_size = state.window_size();

        // Close button art, with a fallback so a missing file degrades to a
        // plain white quad instead of killing the scene
        let (close_normal, close_pressed, close_size) = match (
            state.renderer.load_texture_file(CLOSE_NORMAL_PATH),
            state.renderer.load_texture_file(CLOSE_SELECTED_PATH),
        ) {
            (Ok(normal), Ok(pressed)) => {
                let size = normal.size();
                let size = glam::vec2(size.width as f32, size.height as f32);
                (normal, pressed, size)
            }
            (Err(err), _) | (_, Err(err)) => {
                assets::problem_loading(
                    "'assets/CloseNormal.png' and 'assets/CloseSelected.png'",
                    &err,
                );
                let fallback = state.renderer.default_texture.clone();
                (fallback.clone(), fallback, CLOSE_BUTTON_FALLBACK_SIZE)
            }
        };

        let close_button = Button::new(
            close_button_position(window_size, close_size),
            close_size,
            ButtonArt::Image {
                normal: close_normal,
                pressed: close_pressed,
            },
        );

        let reset_label = state.renderer.create_label(&TextLabelDescriptor {
            text: "RESET",
            font_size: RESET_FONT_SIZE,
            ..Default::default()
        });

        let reset_button = Button::new(
            reset_button_position(window_size),
            RESET_BUTTON_SIZE,
            ButtonArt::Flat {
                label: Some(reset_label),
            },
        );

        Self {
            game_state: GameState::default(),
            panel: Panel::new(),
            close_button,
            reset_button,
            reset_queued: false,
        }
    }

    fn resize(&mut self, _state: &mut StateInner, new_size: Size<u32>) {
        self.close_button.position = close_button_position(new_size, self.close_button.size);
        self.reset_button.position = reset_button_position(new_size);
    }

    fn update(&mut self, state: &mut StateInner) {
        self.tick_game_state(state);
        self.tick_buttons(state);

        self.panel.render(state);
        self.close_button.render(&mut state.renderer);
        self.reset_button.render(&mut state.renderer);
    }
}

//====================================================================

impl MainScene {
    fn tick_game_state(&mut self, state: &mut StateInner) {
        match self.game_state {
            GameState::Init => {
                self.game_state = GameState::Update;
            }

            GameState::Update => {
                if std::mem::take(&mut self.reset_queued) {
                    self.reset_grid(state);
                }
            }

            GameState::Pause => {}

            GameState::Menu1 => {}

            GameState::Menu2 => {}

            GameState::End => state.request_exit(),
        }
    }

    // Clicks only take effect on the following update tick
    fn tick_buttons(&mut self, state: &mut StateInner) {
        let cursor = state.mouse.world_position(state.window_size());

        if self.close_button.update(cursor, &state.mouse.buttons) {
            log::info!("Close button clicked");
            self.game_state = GameState::End;
        }

        if self.reset_button.update(cursor, &state.mouse.buttons) {
            log::info!("Reset button clicked");
            self.reset_queued = true;
        }
    }

    fn reset_grid(&mut self, state: &mut StateInner) {
        let pattern = GridPattern::roll(GRID_COLUMNS, GRID_ROWS, &mut rand::thread_rng());

        let mut batch = ShapeBatch::new();
        let origin = (glam::vec2(TARGET_SIZE.width as f32, TARGET_SIZE.height as f32) - GRID_SIZE) / 2.;
        grid::paint(&pattern, origin, GRID_SIZE, &mut batch);

        let texture = state.renderer.render_to_texture(TARGET_SIZE, &batch);

        self.panel.set_grid(
            texture,
            glam::vec2(TARGET_SIZE.width as f32, TARGET_SIZE.height as f32),
        );

        log::debug!(
            "Generated new grid with {} decorated cells",
            pattern.decoration_count()
        );
    }
}

//====================================================================

fn close_button_position(window_size: Size<u32>, button_size: glam::Vec2) -> glam::Vec2 {
    glam::vec2(
        window_size.width as f32 - button_size.x / 2.,
        button_size.y / 2.,
    )
}

fn reset_button_position(window_size: Size<u32>) -> glam::Vec2 {
    glam::vec2(
        window_size.width as f32 * 0.5,
        window_size.height as f32 * 0.2,
    )
}

//====================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_state_starts_at_init() {
        assert_eq!(GameState::default(), GameState::Init);
    }

    #[test]
    fn close_button_sits_in_the_bottom_right_corner() {
        let position = close_button_position(Size::new(1280, 720), glam::vec2(40., 40.));
        assert_eq!(position, glam::vec2(1260., 20.));
    }

    #[test]
    fn reset_button_sits_low_on_the_centre_line() {
        let position = reset_button_position(Size::new(1280, 720));
        assert_eq!(position, glam::vec2(640., 144.));
    }
}
