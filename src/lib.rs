//! tileshow shows a bitmap in a window for a few fixed frames, then exits.
//!
//! A run has two layouts to choose from: one image stretched over the screen, or a
//! background image tiled over the screen with a second image centered on top.
//!
//! # Pipeline overview
//!
//! 1. **Bring-up**: [`Platform`] -> [`DemoWindow`] -> renderer, each stage owning the last
//! 2. **Load**: [`load_texture`] decodes a file and uploads it, dropping the decoded buffer
//! 3. **Compose**: [`Compositor`] turns resource and screen sizes into an ordered draw list
//! 4. **Loop**: [`FrameLoop`] clears, draws, presents and sleeps a fixed number of times
//!
//! Textures are RAII handles: whatever was acquired is released on every exit path, in
//! reverse order of acquisition.
#![forbid(unsafe_code)]

pub mod assets;
pub mod compose;
pub mod config;
pub mod demo;
pub mod foundation;
pub mod platform;
pub mod present;
pub mod render;
pub mod report;

pub use assets::decode::{DecodedImage, decode_image, decode_image_file};
pub use assets::loader::{LoadError, load_texture};
pub use compose::{Compositor, Draw, DrawTarget, centered_placement, tile_placements};
pub use config::DemoConfig;
pub use demo::{Scene, play_scene, run_demo};
pub use foundation::core::{DstRect, Placement, ScreenDimensions, Size};
pub use foundation::error::{BackendError, BackendResult, DemoError, DemoResult};
pub use platform::{DemoRenderer, DemoWindow, Platform, Target};
pub use present::{PngSequence, Presenter};
pub use render::backend::{RenderBackend, Texture};
pub use render::cpu::{CpuRenderer, CpuTexture, MAX_TEXTURE_DIMENSION};
pub use render::frame_loop::FrameLoop;
pub use render::{FrameRGBA, RenderSettings};
pub use report::ErrorReporter;

#[cfg(feature = "window")]
pub use present::window::{OpenWindow, WindowPresenter, WindowSystem};
