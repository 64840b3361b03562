use std::ops::{BitOr, BitOrAssign};

use image::Rgba;

/// Classification bits for a single /24 block. Bits accumulate over the
/// ingestion passes and are never cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteFlags(u8);

impl RouteFlags {
    pub const NONE: RouteFlags = RouteFlags(0);
    /// Block is covered by a locally observed route.
    pub const HAVE_ROUTE: RouteFlags = RouteFlags(1 << 0);
    /// Learned from a transit session rather than peering.
    pub const IS_TRANSIT: RouteFlags = RouteFlags(1 << 1);
    /// US gov/DoD space (the /8s seen on the exchange route servers).
    pub const IS_GOV: RouteFlags = RouteFlags(1 << 2);
    /// Advertised by the exchange route servers.
    pub const ON_SIX: RouteFlags = RouteFlags(1 << 3);
    /// Special-use range (private, loopback, multicast, ...).
    pub const RESERVED: RouteFlags = RouteFlags(1 << 4);
    /// Learned from Hurricane Electric.
    pub const IS_HE: RouteFlags = RouteFlags(1 << 5);
    /// Learned from Cloudflare.
    pub const IS_CLOUDFLARE: RouteFlags = RouteFlags(1 << 6);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if any bit of `other` is set on `self`.
    pub fn intersects(self, other: RouteFlags) -> bool {
        self.0 & other.0 != 0
    }

    /// Pixel colour for this classification. A fixed priority cascade, not
    /// additive blending: reserved wins over everything, exchange presence
    /// over the per-peer bits, plain reachability last.
    pub fn color(self) -> Rgba<u8> {
        if self.intersects(Self::RESERVED) {
            return Rgba([140, 140, 140, 255]);
        }
        if self.intersects(Self::ON_SIX) {
            if self.intersects(Self::IS_GOV) {
                return Rgba([161, 188, 237, 255]);
            }
            return Rgba([0, 44, 201, 255]);
        }
        if self.intersects(Self::IS_TRANSIT) {
            return Rgba([244, 252, 3, 255]);
        }
        if self.intersects(Self::IS_CLOUDFLARE) {
            return Rgba([244, 129, 32, 255]);
        }
        if self.intersects(Self::IS_HE) {
            return Rgba([86, 232, 125, 255]);
        }
        if self.intersects(Self::HAVE_ROUTE) {
            return Rgba([255, 0, 0, 255]);
        }
        Rgba([235, 235, 247, 255])
    }
}

impl BitOr for RouteFlags {
    type Output = RouteFlags;

    fn bitor(self, rhs: RouteFlags) -> RouteFlags {
        RouteFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for RouteFlags {
    fn bitor_assign(&mut self, rhs: RouteFlags) {
        self.0 |= rhs.0;
    }
}
