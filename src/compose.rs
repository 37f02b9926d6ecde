// Software compositing on 0xAARRGGBB surfaces.
// Visual effects provided here:
// 1) A solid background fill (the brush).
// 2) Source-over alpha blending of a sprite with a constant opacity on top.
// 3) An opaque rectangle copy, used to present the back buffer onto the window's front buffer.

use crate::types::{BlendFunction, BlendOp, Surface, channels};

/// `a * b / 255`, rounded. Exact for b = 0 and b = 255.
#[inline]
pub fn mul_div255(a: u8, b: u8) -> u8 {
    ((a as u32 * b as u32 + 127) / 255) as u8
}

/// Fill the whole surface with one color.
/// Visual: the window turns a flat color, erasing the previous frame.
pub fn fill(dst: &mut Surface, color: u32) {
    dst.pixels.fill(color);
}

/// Visible part of a `src_w` x `src_h` rectangle placed at (x,y) on `dst`, as (cols, rows).
#[inline]
fn clip(dst: &Surface, x: usize, y: usize, src_w: usize, src_h: usize) -> (usize, usize) {
    let cols = src_w.min(dst.width.saturating_sub(x));
    let rows = src_h.min(dst.height.saturating_sub(y));
    (cols, rows)
}

/// Opaque copy of `src` onto `dst` with its top-left corner at (x,y).
/// Visual: the destination rectangle shows exactly the source pixels.
pub fn bit_blt(dst: &mut Surface, x: usize, y: usize, src: &Surface) {
    let (cols, rows) = clip(dst, x, y, src.width, src.height);
    for row in 0..rows {
        let d = (y + row) * dst.width + x;
        let s = row * src.width;
        dst.pixels[d..d + cols].copy_from_slice(&src.pixels[s..s + cols]);
    }
}

/// Mix one premultiplied source pixel into one destination pixel.
#[inline]
fn blend_pixel(dst: u32, src: u32, blend: &BlendFunction) -> u32 {
    let ca = match blend.op {
        BlendOp::SourceOver => blend.constant_alpha,
    };
    let (sa, mut sr, mut sg, mut sb) = channels(src);
    let (_, dr, dg, db) = channels(dst);

    // Effective opacity of this source pixel. Premultiplied colors never exceed alpha.
    let a = if blend.per_pixel_alpha {
        (sr, sg, sb) = (sr.min(sa), sg.min(sa), sb.min(sa));
        mul_div255(sa, ca)
    } else {
        ca
    };
    let inv = 255 - a;

    let mix = |s: u8, d: u8| mul_div255(s, ca).saturating_add(mul_div255(d, inv)) as u32;
    (mix(sr, dr) << 16) | (mix(sg, dg) << 8) | mix(sb, db)
}

/// Composite `src` over `dst` at (x,y) using `blend`.
/// With per-pixel alpha on, `src` must hold premultiplied colors (as produced by `dib`).
/// Visual: the sprite appears on top of the background, see-through where it is transparent.
pub fn alpha_blend(dst: &mut Surface, x: usize, y: usize, src: &Surface, blend: &BlendFunction) {
    let (cols, rows) = clip(dst, x, y, src.width, src.height);
    for row in 0..rows {
        let d = (y + row) * dst.width + x;
        let s = row * src.width;
        let dst_row = &mut dst.pixels[d..d + cols];
        let src_row = &src.pixels[s..s + cols];
        for (out, &px) in dst_row.iter_mut().zip(src_row) {
            *out = blend_pixel(*out, px, blend);
        }
    }
}
