//! Placement math: where each resource lands on screen.
//!
//! Everything in here is pure. Placements may fall partly (or wholly) outside the screen;
//! clipping is the renderer's job.

use crate::{
    foundation::core::{Placement, ScreenDimensions, Size},
    render::backend::Texture,
};

/// Where a draw lands on the backbuffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawTarget {
    /// Stretch over the whole backbuffer.
    Fill,
    /// Natural size, top-left corner at the placement.
    At(Placement),
}

/// One draw call of a frame. Borrows the texture; ownership stays with the loader's caller.
#[derive(Debug)]
pub struct Draw<'t, T> {
    pub texture: &'t T,
    pub target: DrawTarget,
}

impl<T> Clone for Draw<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Draw<'_, T> {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Compositor {
    screen: ScreenDimensions,
}

impl Compositor {
    pub fn new(screen: ScreenDimensions) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> ScreenDimensions {
        self.screen
    }

    pub fn tile_placements(&self, resource: Size) -> Vec<Placement> {
        tile_placements(resource, self.screen)
    }

    pub fn centered_placement(&self, resource: Size) -> Placement {
        centered_placement(resource, self.screen)
    }

    /// A single draw covering the whole screen.
    pub fn stretched<'t, T: Texture>(&self, image: &'t T) -> Vec<Draw<'t, T>> {
        vec![Draw {
            texture: image,
            target: DrawTarget::Fill,
        }]
    }

    /// `background` tiled over the screen in row-major order, then `foreground` centered on top.
    pub fn tiled_with_overlay<'t, T: Texture>(
        &self,
        background: &'t T,
        foreground: &'t T,
    ) -> Vec<Draw<'t, T>> {
        let tiles = self.tile_placements(background.size());
        let mut draws = Vec::with_capacity(tiles.len() + 1);
        draws.extend(tiles.into_iter().map(|p| Draw {
            texture: background,
            target: DrawTarget::At(p),
        }));
        draws.push(Draw {
            texture: foreground,
            target: DrawTarget::At(self.centered_placement(foreground.size())),
        });
        draws
    }
}

/// Tile origins `(i*w, j*h)` with `i*w < W` and `j*h < H`, row-major.
///
/// The last column and row may overhang the screen edge. A zero-sized resource yields no
/// tiles.
pub fn tile_placements(resource: Size, screen: ScreenDimensions) -> Vec<Placement> {
    if resource.is_empty() {
        return Vec::new();
    }

    let xs = axis_origins(resource.width, screen.width);
    let ys = axis_origins(resource.height, screen.height);

    let mut out = Vec::with_capacity(xs.len() * ys.len());
    for &y in &ys {
        for &x in &xs {
            out.push(Placement::new(x, y));
        }
    }
    out
}

/// `((W - w) / 2, (H - h) / 2)`, truncating toward zero. Negative when the resource is
/// larger than the screen on that axis.
pub fn centered_placement(resource: Size, screen: ScreenDimensions) -> Placement {
    Placement::new(
        center_axis(resource.width, screen.width),
        center_axis(resource.height, screen.height),
    )
}

fn axis_origins(step: u32, extent: u32) -> Vec<i32> {
    (0..extent)
        .step_by(step as usize)
        .map_while(|v| i32::try_from(v).ok())
        .collect()
}

fn center_axis(len: u32, extent: u32) -> i32 {
    let offset = (i64::from(extent) - i64::from(len)) / 2;
    offset.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
