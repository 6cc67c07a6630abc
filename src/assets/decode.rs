use std::path::Path;

use crate::{
    foundation::{
        core::Size,
        error::{BackendError, BackendResult},
    },
    render::composite::premul_rgba8,
};

/// Decoded pixels straight from an image file, before upload to a renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Straight-alpha RGBA8, row-major, tightly packed.
    pub rgba8: Vec<u8>,
}

impl DecodedImage {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Decode the file at `path`, sniffing the format from its contents rather than its name.
pub fn decode_image_file(path: &Path) -> BackendResult<DecodedImage> {
    let bytes = std::fs::read(path).map_err(|e| BackendError::new(e.to_string()))?;
    decode_image(&bytes)
}

pub fn decode_image(bytes: &[u8]) -> BackendResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes).map_err(|e| BackendError::new(e.to_string()))?;
    Ok(from_dynamic(dyn_img))
}

fn from_dynamic(dyn_img: image::DynamicImage) -> DecodedImage {
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    DecodedImage {
        width,
        height,
        rgba8: rgba.into_raw(),
    }
}

pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let out = premul_rgba8([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&out);
    }
}
