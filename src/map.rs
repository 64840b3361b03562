use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

use crate::route::RouteFlags;

/// One entry per /24 network.
pub const BLOCK_COUNT: usize = 1 << 24;

/// Well-known special-use ranges, marked reserved at construction.
const RESERVED_RANGES: [&str; 10] = [
    "224.0.0.0/4", // multicast
    "240.0.0.0/4", // future use
    "0.0.0.0/8",
    "127.0.0.0/8",
    "10.0.0.0/8",
    "172.16.0.0/12",
    "192.168.0.0/16",
    "100.64.0.0/10",  // CGNAT
    "169.254.0.0/16", // link local
    "198.18.0.0/15",  // benchmarking
];

/// Index of the /24 block containing `addr`: the address as a big-endian
/// u32 with the host octet discarded.
pub fn block_index(addr: Ipv4Addr) -> u32 {
    u32::from(addr) >> 8
}

/// Classification of the entire IPv4 space at /24 granularity, one
/// [`RouteFlags`] per block.
pub struct RouteMap {
    blocks: Vec<RouteFlags>,
}

impl RouteMap {
    /// An empty map with the special-use ranges already marked reserved.
    pub fn new() -> Self {
        let mut map = Self {
            blocks: vec![RouteFlags::NONE; BLOCK_COUNT],
        };
        for s in RESERVED_RANGES {
            let net: Ipv4Net = s.parse().expect("reserved range literal");
            map.set_prefix(&net, RouteFlags::RESERVED);
        }
        map
    }

    /// OR `flags` onto the block containing `addr`.
    pub fn set(&mut self, addr: Ipv4Addr, flags: RouteFlags) {
        self.blocks[block_index(addr) as usize] |= flags;
    }

    /// OR `flags` onto every block covered by `net`. Prefixes longer than a
    /// /24 or the degenerate /0 are ignored.
    pub fn set_prefix(&mut self, net: &Ipv4Net, flags: RouteFlags) {
        if net.prefix_len() == 0 || net.prefix_len() > 24 {
            return;
        }
        // Widened so that to == BLOCK_COUNT-1 terminates.
        let from = block_index(net.network()) as u64;
        let to = block_index(net.broadcast()) as u64;
        for i in from..=to {
            self.blocks[i as usize] |= flags;
        }
    }

    pub fn get(&self, index: u32) -> RouteFlags {
        self.blocks[index as usize]
    }

    pub fn blocks(&self) -> &[RouteFlags] {
        &self.blocks
    }

    /// Aggregate counts over the map. Blocks carrying any bit of `skip` are
    /// excluded from every counter, including the total.
    pub fn stats(&self, skip: RouteFlags) -> Stats {
        let mut stats = Stats::default();
        for &flags in &self.blocks {
            if flags.intersects(skip) {
                continue;
            }
            stats.total += 1;
            if flags.intersects(RouteFlags::ON_SIX) {
                stats.on_six += 1;
            }
            if flags.intersects(RouteFlags::HAVE_ROUTE) {
                stats.reachable += 1;
            }
        }
        stats
    }
}

impl Default for RouteMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-/24 counts from one [`RouteMap::stats`] pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stats {
    pub on_six: u64,
    pub reachable: u64,
    pub total: u64,
}

impl Stats {
    pub fn six_pct(&self) -> f64 {
        pct(self.on_six, self.total)
    }

    pub fn reach_pct(&self) -> f64 {
        pct(self.reachable, self.total)
    }
}

fn pct(n: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * n as f64 / total as f64
}
