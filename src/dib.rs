// Device-independent bitmap (DIB) pixel arrays.
//
// Images are flattened to row-major, top-down 0xAARRGGBB words with the color
// channels premultiplied by alpha, which is the layout the compositor expects.
//
// This file is also compiled into `build.rs` (via `#[path]`), so it must only
// depend on std and `image`.

use image::DynamicImage;
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    /// Uncompressed RGB words.
    Rgb,
    /// Color masks follow the header. Never produced here.
    Bitfields,
}

/// Header describing a raw pixel array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapInfo {
    pub width: i32,
    /// Negative for top-down row order.
    pub height: i32,
    pub bit_count: u16,
    pub compression: Compression,
}

impl BitmapInfo {
    /// 32 bits per pixel, uncompressed, first row at the top.
    pub const fn top_down(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: -(height as i32),
            bit_count: 32,
            compression: Compression::Rgb,
        }
    }

    pub const fn is_top_down(&self) -> bool {
        self.height < 0
    }

    /// (width, rows) regardless of row order.
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width.unsigned_abs() as usize, self.height.unsigned_abs() as usize)
    }

    pub const fn byte_len(&self) -> usize {
        let (w, h) = self.dimensions();
        w * h * (self.bit_count as usize / 8)
    }
}

/// Pack one straight-alpha RGBA pixel as premultiplied 0xAARRGGBB.
/// Channels are truncated, not rounded: `A * C / 255`.
#[inline]
pub fn premultiply(r: u8, g: u8, b: u8, a: u8) -> u32 {
    let pm = |c: u8| (a as u32 * c as u32) / 255;
    ((a as u32) << 24) | (pm(r) << 16) | (pm(g) << 8) | pm(b)
}

/// Convert any image to premultiplied DIB words (an alpha channel is added if missing).
pub fn encode_image(image: &DynamicImage) -> Vec<u32> {
    let rgba = image.to_rgba8();
    rgba.pixels()
        .map(|p| premultiply(p[0], p[1], p[2], p[3]))
        .collect()
}

/// Little-endian serialization, the format baked into the binary.
pub fn to_le_bytes(pixels: &[u32]) -> Vec<u8> {
    pixels.iter().flat_map(|p| p.to_le_bytes()).collect()
}

/// Inverse of [`to_le_bytes`]. `None` when the length isn't a whole number of words.
pub fn from_le_bytes(bytes: &[u8]) -> Option<Vec<u32>> {
    if bytes.len() % 4 != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
    )
}

/// Line endings for generated source files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Newline {
    Dos,
    Mac,
    Unix,
    System,
}

impl Newline {
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Newline::Dos => b"\r\n",
            Newline::Mac => b"\r",
            Newline::Unix => b"\n",
            Newline::System => {
                if cfg!(windows) {
                    b"\r\n"
                } else {
                    b"\n"
                }
            }
        }
    }
}

const PIXELS_PER_LINE: usize = 6;

/// Emit the pixel words, six per line, each line indented by four spaces.
fn write_words<W: Write>(out: &mut W, pixels: &[u32], nl: &[u8]) -> io::Result<()> {
    out.write_all(b"    ")?;
    for (i, px) in pixels.iter().enumerate() {
        if i > 0 && i % PIXELS_PER_LINE == 0 {
            out.write_all(nl)?;
            out.write_all(b"    ")?;
        }
        write!(out, "0x{px:08X},")?;
    }
    out.write_all(nl)
}

/// Write `pixels` as a C declaration: `DWORD name[len] = { ... };`.
pub fn write_c_array<W: Write>(
    out: &mut W,
    variable: &str,
    pixels: &[u32],
    newline: Newline,
) -> io::Result<()> {
    let nl = newline.as_bytes();
    out.write_all(nl)?;
    write!(out, "DWORD {variable}[{}] = {{", pixels.len())?;
    out.write_all(nl)?;
    write_words(out, pixels, nl)?;
    out.write_all(b"};")?;
    out.write_all(nl)
}

/// Write `pixels` as a Rust item: `pub static NAME: [u32; len] = [ ... ];`.
pub fn write_rust_array<W: Write>(
    out: &mut W,
    variable: &str,
    pixels: &[u32],
    newline: Newline,
) -> io::Result<()> {
    let nl = newline.as_bytes();
    out.write_all(nl)?;
    write!(out, "pub static {}: [u32; {}] = [", rust_ident(variable), pixels.len())?;
    out.write_all(nl)?;
    write_words(out, pixels, nl)?;
    out.write_all(b"];")?;
    out.write_all(nl)
}

/// SCREAMING_CASE identifier for a static, e.g. "my-sprite" -> "MY_SPRITE".
pub fn rust_ident(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn premultiply_truncates() {
        assert_eq!(premultiply(255, 255, 255, 255), 0xFF_FF_FF_FF);
        assert_eq!(premultiply(200, 100, 50, 0), 0);
        // 128 * 255 / 255 = 128, 128 * 1 / 255 = 0
        assert_eq!(premultiply(255, 1, 0, 128), 0x80_80_00_00);
    }

    #[test]
    fn images_without_alpha_become_opaque() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 1, Rgb([1, 2, 3])));
        assert_eq!(encode_image(&img), vec![0xFF_01_02_03; 2]);
    }

    #[test]
    fn encode_is_row_major_top_down() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
        let words = encode_image(&DynamicImage::ImageRgba8(img));
        assert_eq!(words, vec![0, 0xFF_FF_00_00, 0xFF_00_00_FF, 0]);
    }

    #[test]
    fn le_bytes_reject_partial_words() {
        let bytes = to_le_bytes(&[0x11_22_33_44]);
        assert_eq!(bytes, vec![0x44, 0x33, 0x22, 0x11]);
        assert_eq!(from_le_bytes(&bytes), Some(vec![0x11_22_33_44]));
        assert_eq!(from_le_bytes(&bytes[..3]), None);
    }

    #[test]
    fn top_down_descriptor() {
        let info = BitmapInfo::top_down(320, 320);
        assert_eq!(info.height, -320);
        assert!(info.is_top_down());
        assert_eq!(info.dimensions(), (320, 320));
        assert_eq!(info.byte_len(), 320 * 320 * 4);
    }

    #[test]
    fn c_array_wraps_after_six_pixels() {
        let mut out = Vec::new();
        write_c_array(&mut out, "cat", &[1, 2, 3, 4, 5, 6, 0xFFFF_FFFF], Newline::Unix).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "\nDWORD cat[7] = {\n    0x00000001,0x00000002,0x00000003,0x00000004,0x00000005,0x00000006,\n    0xFFFFFFFF,\n};\n"
        );
    }

    #[test]
    fn rust_array_uses_requested_newline() {
        let mut out = Vec::new();
        write_rust_array(&mut out, "my-sprite", &[0xAB], Newline::Dos).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "\r\npub static MY_SPRITE: [u32; 1] = [\r\n    0x000000AB,\r\n];\r\n");
    }

    #[test]
    fn identifiers_never_start_with_a_digit() {
        assert_eq!(rust_ident("8bit"), "_8BIT");
        assert_eq!(rust_ident(""), "_");
    }
}
