//====================================================================

use crate::engine::runner::Runner;

use self::scenes::MainScene;

pub mod grid;
pub mod panel;
pub mod scenes;
pub mod ui;

//====================================================================

pub fn run() {
    Runner::<MainScene>::run();
}

//====================================================================
