use std::{cell::Cell, path::Path, rc::Rc};

use crate::{
    assets::decode::{DecodedImage, decode_image_file, premultiply_rgba8_in_place},
    foundation::{
        core::{DstRect, ScreenDimensions, Size},
        error::{BackendError, BackendResult},
    },
    present::Presenter,
    render::{
        FrameRGBA, RenderSettings,
        backend::{RenderBackend, Texture},
        composite::{over, premul_rgba8},
    },
};

/// Largest texture edge the CPU renderer accepts.
pub const MAX_TEXTURE_DIMENSION: u32 = 16384;

#[derive(Debug, Default)]
struct TextureRegistry {
    live: Cell<usize>,
    created: Cell<u64>,
}

impl TextureRegistry {
    fn acquire(&self) {
        self.live.set(self.live.get() + 1);
        self.created.set(self.created.get() + 1);
    }

    fn release(&self) {
        self.live.set(self.live.get().saturating_sub(1));
    }
}

/// Premultiplied pixels owned by a [`CpuRenderer`]. Released when dropped.
pub struct CpuTexture {
    width: u32,
    height: u32,
    rgba8_premul: Vec<u8>,
    registry: Rc<TextureRegistry>,
}

impl Texture for CpuTexture {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Drop for CpuTexture {
    fn drop(&mut self) {
        self.registry.release();
    }
}

impl std::fmt::Debug for CpuTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuTexture")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Software renderer drawing into a premultiplied RGBA8 backbuffer and handing finished
/// frames to a [`Presenter`].
pub struct CpuRenderer<P> {
    settings: RenderSettings,
    screen: ScreenDimensions,
    backbuffer: FrameRGBA,
    presenter: P,
    registry: Rc<TextureRegistry>,
    frames_presented: u64,
}

impl<P: Presenter> CpuRenderer<P> {
    pub fn new(
        screen: ScreenDimensions,
        settings: RenderSettings,
        presenter: P,
    ) -> BackendResult<Self> {
        let screen = screen.validate()?;
        let len = screen
            .pixel_count()
            .checked_mul(4)
            .ok_or_else(|| BackendError::new("backbuffer size overflow"))?;

        Ok(Self {
            settings,
            screen,
            backbuffer: FrameRGBA {
                width: screen.width,
                height: screen.height,
                data: vec![0; len],
                premultiplied: true,
            },
            presenter,
            registry: Rc::new(TextureRegistry::default()),
            frames_presented: 0,
        })
    }

    pub fn screen(&self) -> ScreenDimensions {
        self.screen
    }

    /// Textures created by this renderer and not yet dropped.
    pub fn live_textures(&self) -> usize {
        self.registry.live.get()
    }

    pub fn textures_created(&self) -> u64 {
        self.registry.created.get()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn backbuffer(&self) -> &FrameRGBA {
        &self.backbuffer
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    fn owns(&self, texture: &CpuTexture) -> bool {
        Rc::ptr_eq(&self.registry, &texture.registry)
    }

    fn blit(&mut self, texture: &CpuTexture, dst: DstRect) {
        let sw = i64::from(self.screen.width);
        let sh = i64::from(self.screen.height);
        let (dx, dy) = (i64::from(dst.x), i64::from(dst.y));
        let (dw, dh) = (i64::from(dst.width), i64::from(dst.height));
        let (tw, th) = (i64::from(texture.width), i64::from(texture.height));

        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (dx + dw).min(sw);
        let y1 = (dy + dh).min(sh);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let data = &mut self.backbuffer.data;
        for y in y0..y1 {
            // Nearest-neighbour: destination pixel -> source texel.
            let ty = (y - dy) * th / dh;
            let dst_row = (y * sw) as usize;
            let src_row = (ty * tw) as usize;
            for x in x0..x1 {
                let tx = (x - dx) * tw / dw;
                let si = (src_row + tx as usize) * 4;
                let di = (dst_row + x as usize) * 4;
                let s = &texture.rgba8_premul[si..si + 4];
                let d = &mut data[di..di + 4];
                let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
                d.copy_from_slice(&out);
            }
        }
    }
}

impl<P: Presenter> RenderBackend for CpuRenderer<P> {
    type Surface = DecodedImage;
    type Texture = CpuTexture;

    fn load_surface(&self, path: &Path) -> BackendResult<DecodedImage> {
        decode_image_file(path)
    }

    fn create_texture_from_surface(&mut self, surface: &DecodedImage) -> BackendResult<CpuTexture> {
        let (width, height) = (surface.width, surface.height);
        if width == 0
            || height == 0
            || width > MAX_TEXTURE_DIMENSION
            || height > MAX_TEXTURE_DIMENSION
        {
            return Err(BackendError::new(format!(
                "Texture dimensions are limited to {MAX_TEXTURE_DIMENSION}x{MAX_TEXTURE_DIMENSION}"
            )));
        }
        if surface.rgba8.len() != (width as usize) * (height as usize) * 4 {
            return Err(BackendError::new("surface byte length mismatch"));
        }

        let mut rgba8_premul = surface.rgba8.clone();
        premultiply_rgba8_in_place(&mut rgba8_premul);

        self.registry.acquire();
        Ok(CpuTexture {
            width,
            height,
            rgba8_premul,
            registry: Rc::clone(&self.registry),
        })
    }

    fn clear(&mut self) -> BackendResult<()> {
        let premul = self
            .settings
            .clear_rgba
            .map(premul_rgba8)
            .unwrap_or([0, 0, 0, 0]);
        for px in self.backbuffer.data.chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
        Ok(())
    }

    fn copy(&mut self, texture: &CpuTexture, dst: Option<DstRect>) -> BackendResult<()> {
        if !self.owns(texture) {
            return Err(BackendError::new(
                "texture was created by a different renderer",
            ));
        }
        let dst = dst.unwrap_or_else(|| DstRect::full_screen(self.screen));
        if dst.is_empty() {
            return Ok(());
        }
        self.blit(texture, dst);
        Ok(())
    }

    fn present(&mut self) -> BackendResult<()> {
        self.presenter.present(&self.backbuffer)?;
        self.frames_presented += 1;
        Ok(())
    }
}
