// Core types shared by the compositor and the frame loop.

use crate::error::Error;

/// Pack an opaque RGB triple as 0x00RRGGBB (what minifb expects).
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Split a 0xAARRGGBB word into its (a, r, g, b) channels.
#[inline]
pub const fn channels(px: u32) -> (u8, u8, u8, u8) {
    ((px >> 24) as u8, (px >> 16) as u8, (px >> 8) as u8, px as u8)
}

/// A 2D pixel buffer, 32 bits per pixel, top-down rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    pub width: usize,     // pixels per row
    pub height: usize,    // number of rows
    pub pixels: Vec<u32>, // each entry is 0xAARRGGBB; alpha is ignored when presenting
}

impl Surface {
    /// A blank (all zero) surface of `width` x `height`.
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::SurfaceSize { width, height });
        }
        Ok(Self { width, height, pixels: vec![0u32; width * height] })
    }

    /// Wrap existing pixel data; the length must match the dimensions exactly.
    /// Surfaces used as a blend source hold premultiplied colors: a channel above
    /// its pixel's alpha is clamped to that alpha when blended with per-pixel alpha.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u32>) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::SurfaceSize { width, height });
        }
        if pixels.len() != width * height {
            return Err(Error::AssetLoad(format!(
                "expected {} pixels for {width}x{height}, got {}",
                width * height,
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    /// Reallocate to a new size. Old contents are discarded; the next frame repaints everything.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Err(Error::SurfaceSize { width, height });
        }
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, 0);
        Ok(())
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendOp {
    /// Source is composited over the destination.
    SourceOver,
}

/// How a source surface is mixed into a destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlendFunction {
    pub op: BlendOp,
    /// Opacity applied to every source pixel, 0..=255.
    pub constant_alpha: u8,
    /// When true the source's own (premultiplied) alpha channel is honoured too.
    pub per_pixel_alpha: bool,
}

impl BlendFunction {
    /// Source-over with a constant factor and per-pixel alpha.
    pub const fn source_over(constant_alpha: u8) -> Self {
        Self { op: BlendOp::SourceOver, constant_alpha, per_pixel_alpha: true }
    }
}
