use std::time::Duration;

use crate::{
    compose::{Draw, DrawTarget},
    foundation::core::DstRect,
    render::backend::{RenderBackend, Texture},
};

pub const DEFAULT_FRAME_COUNT: u32 = 3;

pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(1000);

/// Fixed-length, blocking render loop.
///
/// Runs exactly `frame_count` iterations of clear, draw, present, sleep. There is no input
/// polling and no way to stop early. A failing backend call is logged and the loop moves on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameLoop {
    frame_count: u32,
    interval: Duration,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_COUNT, DEFAULT_FRAME_INTERVAL)
    }
}

impl FrameLoop {
    pub fn new(frame_count: u32, interval: Duration) -> Self {
        Self {
            frame_count,
            interval,
        }
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[tracing::instrument(skip_all, fields(frames = self.frame_count, draws = draws.len()))]
    pub fn run<R: RenderBackend>(&self, renderer: &mut R, draws: &[Draw<'_, R::Texture>]) {
        for frame in 0..self.frame_count {
            if let Err(e) = renderer.clear() {
                tracing::warn!(frame, error = %e, "clear failed");
            }

            for draw in draws {
                let dst = match draw.target {
                    DrawTarget::Fill => None,
                    DrawTarget::At(at) => Some(DstRect::at(at, draw.texture.size())),
                };
                if let Err(e) = renderer.copy(draw.texture, dst) {
                    tracing::warn!(frame, error = %e, "draw failed");
                }
            }

            if let Err(e) = renderer.present() {
                tracing::warn!(frame, error = %e, "present failed");
            }
            tracing::debug!(frame, "frame presented");

            std::thread::sleep(self.interval);
        }
    }
}
