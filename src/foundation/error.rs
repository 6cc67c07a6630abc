use std::path::PathBuf;

pub type BackendResult<T> = Result<T, BackendError>;

pub type DemoResult<T> = Result<T, DemoError>;

/// A failing backend call, carrying the backend's own description of what went wrong.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Terminal conditions of a demo run.
///
/// Every variant ends the run: acquired resources are released in reverse order by the
/// time the error reaches the caller, which reports it once and exits with a failure status.
#[derive(thiserror::Error, Debug)]
pub enum DemoError {
    #[error("init error: {0}")]
    Init(BackendError),

    #[error("window creation error: {0}")]
    WindowCreation(BackendError),

    #[error("renderer creation error: {0}")]
    RendererCreation(BackendError),

    #[error("image decode error for '{}': {source}", path.display())]
    ImageDecode { path: PathBuf, source: BackendError },

    #[error("image upload error for '{}': {source}", path.display())]
    ImageUpload { path: PathBuf, source: BackendError },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DemoError {
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(BackendError::new(msg))
    }

    pub fn window_creation(msg: impl Into<String>) -> Self {
        Self::WindowCreation(BackendError::new(msg))
    }

    pub fn renderer_creation(msg: impl Into<String>) -> Self {
        Self::RendererCreation(BackendError::new(msg))
    }

    /// Name of the backend operation that failed, as shown in the one-line diagnostic.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Init(_) => "Init",
            Self::WindowCreation(_) => "CreateWindow",
            Self::RendererCreation(_) => "CreateRenderer",
            Self::ImageDecode { .. } => "LoadImage",
            Self::ImageUpload { .. } => "CreateTextureFromSurface",
            Self::Other(_) => "Demo",
        }
    }

    /// The backend's message without the taxonomy prefix.
    pub fn backend_message(&self) -> String {
        match self {
            Self::Init(e) | Self::WindowCreation(e) | Self::RendererCreation(e) => {
                e.message().to_owned()
            }
            Self::ImageDecode { path, source } | Self::ImageUpload { path, source } => {
                format!("{}: {}", path.display(), source.message())
            }
            Self::Other(e) => format!("{e:#}"),
        }
    }
}
