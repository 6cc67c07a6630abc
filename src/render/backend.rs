use std::path::Path;

use crate::foundation::{
    core::{DstRect, Size},
    error::BackendResult,
};

/// A renderer-resident image. Dropping the handle releases the resource.
pub trait Texture {
    fn size(&self) -> Size;
}

/// The drawing half of a graphics backend: decoding, upload, and the per-frame calls.
///
/// `Surface` is the transient decoded buffer; `Texture` is the handle the renderer draws
/// from. Both release their backend memory on drop.
pub trait RenderBackend {
    type Surface;
    type Texture: Texture;

    /// Decode the image file at `path`. Does not touch renderer state.
    fn load_surface(&self, path: &Path) -> BackendResult<Self::Surface>;

    fn create_texture_from_surface(
        &mut self,
        surface: &Self::Surface,
    ) -> BackendResult<Self::Texture>;

    fn clear(&mut self) -> BackendResult<()>;

    /// Draw the whole `texture` into `dst`, or over the full backbuffer when `dst` is `None`.
    fn copy(&mut self, texture: &Self::Texture, dst: Option<DstRect>) -> BackendResult<()>;

    fn present(&mut self) -> BackendResult<()>;
}
