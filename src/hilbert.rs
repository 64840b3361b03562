/// Curve order for the /24 map: 2^12 x 2^12 pixels covers 2^24 blocks.
pub const SLASH24_ORDER: u32 = 12;

/// Map a distance along the Hilbert curve to (x, y) on a 2^order square
/// grid. Bijective over [0, 4^order).
pub fn hilbert_d2xy(d: u64, order: u32) -> (u32, u32) {
    let n = 1u64 << order;
    let mut x = 0u64;
    let mut y = 0u64;
    let mut t = d;

    let mut s = 1u64;
    while s < n {
        let rx = 1 & (t >> 1);
        let ry = 1 & (t ^ rx);

        if ry == 0 {
            if rx == 1 {
                x = s - 1 - x;
                y = s - 1 - y;
            }
            std::mem::swap(&mut x, &mut y);
        }

        x += s * rx;
        y += s * ry;
        t >>= 2;
        s <<= 1;
    }

    (x as u32, y as u32)
}

/// Pixel coordinate of a /24 block index on the 4096x4096 map.
pub fn slash24_xy(index: u32) -> (u32, u32) {
    hilbert_d2xy(index as u64, SLASH24_ORDER)
}
