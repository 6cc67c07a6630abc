//! Where presented frames go: a window, a directory of PNGs, or memory.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::error::{BackendError, BackendResult},
    render::FrameRGBA,
};

#[cfg(feature = "window")]
pub mod window;

/// Receives each finished backbuffer.
pub trait Presenter {
    fn present(&mut self, frame: &FrameRGBA) -> BackendResult<()>;
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn present(&mut self, frame: &FrameRGBA) -> BackendResult<()> {
        (**self).present(frame)
    }
}

/// Keeps every presented frame in memory.
impl Presenter for Vec<FrameRGBA> {
    fn present(&mut self, frame: &FrameRGBA) -> BackendResult<()> {
        self.push(frame.clone());
        Ok(())
    }
}

/// Headless presenter writing `frame_0000.png`, `frame_0001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequence {
    dir: PathBuf,
    next_index: u32,
}

impl PngSequence {
    pub fn create(dir: impl Into<PathBuf>) -> BackendResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))
            .map_err(|e| BackendError::new(format!("{e:#}")))?;
        tracing::info!(dir = %dir.display(), "presenting frames as png files");
        Ok(Self { dir, next_index: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn frame_path(&self, index: u32) -> PathBuf {
        self.dir.join(format!("frame_{index:04}.png"))
    }

    fn write_png(&self, path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
        let mut data = frame.data.clone();
        if frame.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        image::save_buffer_with_format(
            path,
            &data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))
    }
}

impl Presenter for PngSequence {
    fn present(&mut self, frame: &FrameRGBA) -> BackendResult<()> {
        let path = self.frame_path(self.next_index);
        self.write_png(&path, frame)
            .map_err(|e| BackendError::new(format!("{e:#}")))?;
        tracing::debug!(path = %path.display(), "frame written");
        self.next_index += 1;
        Ok(())
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
