//! Staged backend bring-up: subsystem, then window, then renderer.
//!
//! Each stage consumes the previous one, so the renderer ends up owning its window and the
//! window its subsystem. Dropping the renderer tears everything down in reverse order.

use std::path::PathBuf;

use crate::{
    foundation::{
        core::{Placement, ScreenDimensions},
        error::BackendResult,
    },
    present::{PngSequence, Presenter},
    render::{RenderSettings, cpu::CpuRenderer},
};

#[cfg(feature = "window")]
use crate::present::window::{OpenWindow, WindowSystem};

/// Where presented frames end up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Window,
    Headless { out_dir: PathBuf },
}

pub type DemoRenderer = CpuRenderer<Box<dyn Presenter>>;

pub struct Platform {
    kind: PlatformKind,
}

enum PlatformKind {
    Headless { out_dir: PathBuf },
    #[cfg(feature = "window")]
    Window(WindowSystem),
    #[cfg(not(feature = "window"))]
    WindowUnavailable,
}

impl Platform {
    #[tracing::instrument(level = "debug")]
    pub fn init(target: &Target) -> BackendResult<Self> {
        let kind = match target {
            Target::Headless { out_dir } => PlatformKind::Headless {
                out_dir: out_dir.clone(),
            },
            #[cfg(feature = "window")]
            Target::Window => PlatformKind::Window(WindowSystem::init()?),
            #[cfg(not(feature = "window"))]
            Target::Window => PlatformKind::WindowUnavailable,
        };
        Ok(Self { kind })
    }

    /// Open the output: a real window, or the PNG output directory when headless.
    #[tracing::instrument(level = "debug", skip(self))]
    #[cfg_attr(not(feature = "window"), allow(unused_variables))]
    pub fn create_window(
        self,
        title: &str,
        position: Placement,
        screen: ScreenDimensions,
    ) -> BackendResult<DemoWindow> {
        match self.kind {
            PlatformKind::Headless { out_dir } => {
                Ok(DemoWindow::Headless(PngSequence::create(out_dir)?))
            }
            #[cfg(feature = "window")]
            PlatformKind::Window(system) => Ok(DemoWindow::Window(system.create_window(
                title, position, screen,
            )?)),
            #[cfg(not(feature = "window"))]
            PlatformKind::WindowUnavailable => Err(crate::foundation::error::BackendError::new(
                "built without window support; rebuild with --features window or pass --headless <DIR>",
            )),
        }
    }
}

pub enum DemoWindow {
    Headless(PngSequence),
    #[cfg(feature = "window")]
    Window(OpenWindow),
}

impl DemoWindow {
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn create_renderer(
        self,
        screen: ScreenDimensions,
        settings: RenderSettings,
    ) -> BackendResult<DemoRenderer> {
        let presenter: Box<dyn Presenter> = match self {
            DemoWindow::Headless(seq) => Box::new(seq),
            #[cfg(feature = "window")]
            DemoWindow::Window(window) => Box::new(window.into_presenter()?),
        };
        CpuRenderer::new(screen, settings, presenter)
    }
}
