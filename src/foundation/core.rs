use crate::foundation::error::{BackendError, BackendResult};

/// Fixed output size, in pixels, for the lifetime of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenDimensions {
    pub width: u32,
    pub height: u32,
}

impl ScreenDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn validate(self) -> BackendResult<Self> {
        if self.width == 0 || self.height == 0 {
            return Err(BackendError::new(format!(
                "invalid screen size {}x{}",
                self.width, self.height
            )));
        }
        Ok(self)
    }

    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// Natural pixel size of an image resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Screen position of a resource's top-left corner. May be negative (partially off-screen).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
}

impl Placement {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Destination rectangle of a draw call, in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DstRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl DstRect {
    /// Rectangle at `at` with the resource's natural size.
    pub fn at(at: Placement, size: Size) -> Self {
        Self {
            x: at.x,
            y: at.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn full_screen(screen: ScreenDimensions) -> Self {
        Self {
            x: 0,
            y: 0,
            width: screen.width,
            height: screen.height,
        }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}
