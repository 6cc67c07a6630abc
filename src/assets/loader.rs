use std::path::{Path, PathBuf};

use crate::{
    foundation::error::{BackendError, DemoError},
    render::backend::RenderBackend,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("decode failed for '{}': {source}", path.display())]
    DecodeFailed { path: PathBuf, source: BackendError },

    #[error("upload failed for '{}': {source}", path.display())]
    UploadFailed { path: PathBuf, source: BackendError },
}

impl From<LoadError> for DemoError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::DecodeFailed { path, source } => DemoError::ImageDecode { path, source },
            LoadError::UploadFailed { path, source } => DemoError::ImageUpload { path, source },
        }
    }
}

/// Decode the image at `path` and upload it to `renderer`.
///
/// The decoded surface never outlives this call: it is dropped right after the upload
/// attempt, before the upload result is looked at. On success the caller owns the only
/// handle to the new texture.
#[tracing::instrument(skip(renderer, path), fields(path = %path.as_ref().display()))]
pub fn load_texture<R: RenderBackend>(
    renderer: &mut R,
    path: impl AsRef<Path>,
) -> Result<R::Texture, LoadError> {
    let path = path.as_ref();

    let surface = renderer.load_surface(path).map_err(|source| {
        tracing::debug!(error = %source, "image decode failed");
        LoadError::DecodeFailed {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let uploaded = renderer.create_texture_from_surface(&surface);
    drop(surface);

    match uploaded {
        Ok(texture) => {
            tracing::debug!("texture uploaded");
            Ok(texture)
        }
        Err(source) => {
            tracing::debug!(error = %source, "texture upload failed");
            Err(LoadError::UploadFailed {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}
