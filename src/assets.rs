// The sprite baked into the binary by build.rs.

use crate::config::{SPRITE_HEIGHT, SPRITE_WIDTH};
use crate::dib::{self, BitmapInfo, Compression};
use crate::error::Error;
use crate::types::Surface;

/// Premultiplied 0xAARRGGBB words, little-endian, top-down.
static SPRITE_DIB: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/sprite.dib"));

pub const SPRITE_INFO: BitmapInfo = BitmapInfo::top_down(SPRITE_WIDTH as u32, SPRITE_HEIGHT as u32);

/// Build a surface from raw DIB bytes described by `info`.
pub fn load_dib(info: &BitmapInfo, bytes: &[u8]) -> Result<Surface, Error> {
    if !info.is_top_down() || info.bit_count != 32 {
        return Err(Error::AssetLoad("only top-down 32-bit bitmaps are supported".into()));
    }
    if info.compression != Compression::Rgb {
        return Err(Error::AssetLoad(format!("unsupported compression {:?}", info.compression)));
    }
    if bytes.len() != info.byte_len() {
        return Err(Error::AssetLoad(format!(
            "expected {} bytes of pixel data, got {}",
            info.byte_len(),
            bytes.len()
        )));
    }
    let pixels = dib::from_le_bytes(bytes)
        .ok_or_else(|| Error::AssetLoad("pixel data is not a whole number of words".into()))?;
    let (w, h) = info.dimensions();
    Surface::from_pixels(w, h, pixels)
}

/// Load the embedded sprite.
/// Visual: nothing yet; the sprite only shows up once it is blended into the back buffer.
pub fn load_sprite() -> Result<Surface, Error> {
    let sprite = load_dib(&SPRITE_INFO, SPRITE_DIB)?;
    log::debug!("loaded embedded sprite {}x{}", sprite.width, sprite.height);
    Ok(sprite)
}
