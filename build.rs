//! Bake the sprite into the binary as raw premultiplied DIB words.

use std::path::Path;

#[allow(dead_code)]
#[path = "src/dib.rs"]
mod dib;

const SPRITE: &str = "assets/sprite.png";
const SPRITE_SIZE: u32 = 320;

fn main() {
    println!("cargo::rerun-if-changed={SPRITE}");

    let image = image::open(SPRITE).expect("Error decoding sprite image");
    assert_eq!(
        (image.width(), image.height()),
        (SPRITE_SIZE, SPRITE_SIZE),
        "Sprite must be {SPRITE_SIZE}x{SPRITE_SIZE}"
    );

    let words = dib::encode_image(&image);

    let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR not set by cargo");
    let target = Path::new(&out_dir).join("sprite.dib");
    std::fs::write(target, dib::to_le_bytes(&words)).expect("Error writing sprite DIB to file");
}
