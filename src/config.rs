// Compile-time settings for the example. There is no config file and no CLI:
// everything the program needs is fixed here.

use crate::types::{BlendFunction, rgb};
use std::time::Duration;

pub const WINDOW_TITLE: &str = "Sprite Blend Example";
pub const WINDOW_WIDTH: usize = 320;
pub const WINDOW_HEIGHT: usize = 320;

/// Minimum amount of time for each update cycle.
pub const STEP_RATE: Duration = Duration::from_millis(13);

/// Cornflower blue, drawn under the sprite every frame.
pub const BACKGROUND: u32 = rgb(100, 149, 237);

pub const SPRITE_WIDTH: usize = 320;
pub const SPRITE_HEIGHT: usize = 320;

/// Semi-transparent: roughly 50% on top of the sprite's own alpha.
pub const BLENDER: BlendFunction = BlendFunction::source_over(127);

#[derive(Clone, Debug)]
pub struct Config {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub step_rate: Duration,
    pub background: u32,
    pub blend: BlendFunction,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_owned(),
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            step_rate: STEP_RATE,
            background: BACKGROUND,
            blend: BLENDER,
        }
    }
}
