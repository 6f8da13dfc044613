//! Registration between the on-screen video box and the overlay surface.
//!
//! Overlay coordinates are pixels of the drawing surface, and the drawing
//! surface covers the displayed video box exactly. Whenever the container
//! is resized the box must be recomputed and the surface re-registered.

use serde::{Deserialize, Serialize};

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn aspect(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.width / self.height)
    }
}

/// The rectangle the video occupies on screen, relative to its container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayBox {
    /// Left offset inside the container.
    pub x: f64,
    /// Top offset inside the container.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayBox {
    /// A box filling the whole container.
    pub fn filling(container: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: container.width,
            height: container.height,
        }
    }

    /// Letterboxed fit of media of size `media` inside `container`
    /// (object-fit: contain). Unknown media size fills the container.
    pub fn contain(container: Size, media: Size) -> Self {
        let (Some(container_aspect), Some(media_aspect)) = (container.aspect(), media.aspect())
        else {
            return Self::filling(container);
        };

        if media_aspect > container_aspect {
            let height = container.width / media_aspect;
            Self {
                x: 0.0,
                y: (container.height - height) / 2.0,
                width: container.width,
                height,
            }
        } else {
            let width = container.height * media_aspect;
            Self {
                x: (container.width - width) / 2.0,
                y: 0.0,
                width,
                height: container.height,
            }
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Map a point in container coordinates to surface pixels, given the
    /// surface's backing resolution. Returns `None` outside the box.
    pub fn to_surface(&self, px: f64, py: f64, surface: Size) -> Option<(f64, f64)> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let lx = px - self.x;
        let ly = py - self.y;
        if lx < 0.0 || ly < 0.0 || lx > self.width || ly > self.height {
            return None;
        }
        let scale_x = surface.width / self.width;
        let scale_y = surface.height / self.height;
        Some((lx * scale_x, ly * scale_y))
    }
}
