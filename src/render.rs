use image::{ImageBuffer, Rgba, RgbaImage};

use crate::hilbert::slash24_xy;
use crate::map::RouteMap;

pub const IMAGE_SIZE: u32 = 4096;

/// Paint every /24 block onto the 4096x4096 grid. The Hilbert mapping is a
/// bijection over the block indices, so each pixel is written exactly once.
pub fn render(map: &RouteMap) -> RgbaImage {
    let mut image = ImageBuffer::from_pixel(IMAGE_SIZE, IMAGE_SIZE, Rgba([0, 0, 0, 255]));

    for (i, flags) in map.blocks().iter().enumerate() {
        let (x, y) = slash24_xy(i as u32);
        image.put_pixel(x, y, flags.color());
    }

    image
}
