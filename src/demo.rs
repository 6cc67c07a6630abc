use std::path::PathBuf;

use crate::{
    assets::loader::load_texture,
    compose::Compositor,
    config::{self, DemoConfig},
    foundation::error::{DemoError, DemoResult},
    platform::{Platform, Target},
    render::{RenderSettings, backend::RenderBackend, frame_loop::FrameLoop},
};

/// What gets drawn each frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scene {
    /// One image stretched over the whole screen.
    Stretch { image: PathBuf },
    /// `background` tiled over the screen with `foreground` centered on top.
    Tiled {
        background: PathBuf,
        foreground: PathBuf,
    },
}

impl Scene {
    pub fn stretch() -> Self {
        Self::Stretch {
            image: PathBuf::from(config::STRETCH_IMAGE),
        }
    }

    pub fn tiled() -> Self {
        Self::Tiled {
            background: PathBuf::from(config::BACKGROUND_IMAGE),
            foreground: PathBuf::from(config::FOREGROUND_IMAGE),
        }
    }
}

/// Bring the backend up, play `scene`, and tear down.
///
/// Resources are released in reverse acquisition order on every path out of this function.
#[tracing::instrument(skip(config))]
pub fn run_demo(config: &DemoConfig, target: &Target, scene: &Scene) -> DemoResult<()> {
    let platform = Platform::init(target).map_err(DemoError::Init)?;
    let window = platform
        .create_window(&config.title, config.position, config.screen)
        .map_err(DemoError::WindowCreation)?;
    let mut renderer = window
        .create_renderer(
            config.screen,
            RenderSettings {
                clear_rgba: Some(config.clear_rgba),
            },
        )
        .map_err(DemoError::RendererCreation)?;

    play_scene(&mut renderer, config, scene)?;

    tracing::info!(
        frames = renderer.frames_presented(),
        live_textures = renderer.live_textures(),
        "demo finished"
    );
    Ok(())
}

/// Load the scene's images into `renderer`, compose them, and run the frame loop.
///
/// Every texture loaded here is dropped before returning, including when a later load fails.
pub fn play_scene<R: RenderBackend>(
    renderer: &mut R,
    config: &DemoConfig,
    scene: &Scene,
) -> DemoResult<()> {
    let compositor = Compositor::new(config.screen);
    let frame_loop = FrameLoop::new(config.frame_count, config.frame_interval);

    match scene {
        Scene::Stretch { image } => {
            let image = load_texture(renderer, image)?;
            let draws = compositor.stretched(&image);
            frame_loop.run(renderer, &draws);
        }
        Scene::Tiled {
            background,
            foreground,
        } => {
            let background = load_texture(renderer, background)?;
            let foreground = load_texture(renderer, foreground)?;
            let draws = compositor.tiled_with_overlay(&background, &foreground);
            frame_loop.run(renderer, &draws);
        }
    }
    Ok(())
}
