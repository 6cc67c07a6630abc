//! Build-time constants of the demo.
//!
//! Nothing here is read from the environment or from files; a run is fully described by
//! [`DemoConfig::default`]. Tests build their own [`DemoConfig`] values.

use std::time::Duration;

use crate::{
    foundation::core::{Placement, ScreenDimensions},
    render::frame_loop::{DEFAULT_FRAME_COUNT, DEFAULT_FRAME_INTERVAL},
};

pub const SCREEN: ScreenDimensions = ScreenDimensions::new(640, 480);

pub const WINDOW_TITLE: &str = "Hello, World!";

pub const WINDOW_POSITION: Placement = Placement::new(100, 100);

pub const FRAME_COUNT: u32 = DEFAULT_FRAME_COUNT;

pub const FRAME_INTERVAL: Duration = DEFAULT_FRAME_INTERVAL;

/// Opaque black, straight alpha.
pub const CLEAR_RGBA: [u8; 4] = [0, 0, 0, 255];

pub const STRETCH_IMAGE: &str = "res/hello.bmp";

pub const BACKGROUND_IMAGE: &str = "res/background.bmp";

pub const FOREGROUND_IMAGE: &str = "res/image.bmp";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoConfig {
    pub screen: ScreenDimensions,
    pub title: String,
    pub position: Placement,
    pub frame_count: u32,
    pub frame_interval: Duration,
    pub clear_rgba: [u8; 4],
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            screen: SCREEN,
            title: WINDOW_TITLE.to_string(),
            position: WINDOW_POSITION,
            frame_count: FRAME_COUNT,
            frame_interval: FRAME_INTERVAL,
            clear_rgba: CLEAR_RGBA,
        }
    }
}
