//====================================================================

use std::sync::Arc;

use crate::engine::{renderer::textures::LoadedTexture, StateInner};

//====================================================================

const PANEL_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.];

const PANEL_LAYER: f32 = 300.;
const GRID_LAYER: f32 = 200.;

//====================================================================

/// Gray backdrop covering the window, holding at most one generated grid
/// sprite at a time.
pub struct Panel {
    grid: Option<GridSprite>,
}

struct GridSprite {
    texture: Arc<LoadedTexture>,
    size: glam::Vec2,
}

impl Panel {
    pub fn new() -> Self {
        Self { grid: None }
    }

    /// Replace the displayed grid sprite. Any previous sprite is dropped.
    pub fn set_grid(&mut self, texture: Arc<LoadedTexture>, size: glam::Vec2) {
        self.grid = Some(GridSprite { texture, size });
    }

    pub fn render(&self, state: &mut StateInner) {
        let size = state.window_size();
        let window_size = glam::vec2(size.width as f32, size.height as f32);

        let backdrop = state.renderer.default_texture.clone();
        state.renderer.sprite_pipeline.draw(
            &backdrop,
            window_size,
            PANEL_COLOR,
            (window_size / 2.).extend(PANEL_LAYER),
        );

        if let Some(grid) = &self.grid {
            state.renderer.sprite_pipeline.draw(
                &grid.texture,
                grid.size,
                [1., 1., 1., 1.],
                (window_size / 2.).extend(GRID_LAYER),
            );
        }
    }
}

//====================================================================
