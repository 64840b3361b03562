//! Line-oriented ingestion of the three routing data sources. Each parser
//! reduces its input to (prefix, flag) pairs fed into the shared [`RouteMap`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use ipnet::Ipv4Net;

use crate::map::RouteMap;
use crate::route::RouteFlags;

pub const DEFAULT_RS_URL: &str = "https://www.seattleix.net/rs/rs2.1500.v4.unique.txt";

/// Fetch the exchange route server listing and mark the advertised prefixes.
pub fn add_route_servers(map: &mut RouteMap, url: &str) -> Result<()> {
    log::debug!("fetching route server listing from {}", url);
    let res = reqwest::blocking::get(url).with_context(|| format!("Failed to fetch {}", url))?;
    if !res.status().is_success() {
        bail!("{}: {}", url, res.status());
    }
    let body = res
        .text()
        .context("Failed to read route server listing body")?;
    parse_route_servers(map, body.as_bytes())
}

/// Parse the route server listing: one `prefix via nexthop` entry per line
/// after a header line. The source is expected to be well-formed, so a line
/// that does not yield a prefix is an error rather than a skip.
pub fn parse_route_servers<R: BufRead>(map: &mut RouteMap, reader: R) -> Result<()> {
    for line in reader.lines().skip(1) {
        let line = line.context("Failed to read line")?;
        let i = line
            .find("via ")
            .with_context(|| format!("bogus route server line {:?}", line))?;
        let s = line[..i].trim();
        let net: Ipv4Net = s
            .parse()
            .with_context(|| format!("bogus route server prefix {:?}", s))?;
        if net.prefix_len() > 24 {
            continue;
        }
        if net.prefix_len() == 8 {
            // The /8s on the route servers are all US gov/DoD space.
            map.set_prefix(&net, RouteFlags::IS_GOV);
        }
        map.set_prefix(&net, RouteFlags::ON_SIX);
    }
    Ok(())
}

/// Mark blocks reachable per an `ip -4 route` dump.
pub fn add_reachable(map: &mut RouteMap, path: &Path) -> Result<()> {
    let f = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    parse_reachable(map, BufReader::new(f))
}

/// Parse `ip -4 route` output. Lines without a `via` next hop or without a
/// CIDR destination carry no prefix and are skipped; anything that looks
/// like a prefix but fails to parse is an error.
pub fn parse_reachable<R: BufRead>(map: &mut RouteMap, reader: R) -> Result<()> {
    for line in reader.lines() {
        let line = line.context("Failed to read line")?;
        let line = line.trim();
        let Some(i) = line.find("via ") else {
            continue;
        };
        let s = line[..i].trim();
        if !s.contains('/') {
            continue;
        }
        let net: Ipv4Net = s
            .parse()
            .with_context(|| format!("bogus route prefix {:?}", s))?;
        if net.prefix_len() > 24 {
            continue;
        }
        map.set_prefix(&net, RouteFlags::HAVE_ROUTE);
    }
    Ok(())
}

/// Classify routes from a `birdc show route` dump by originating protocol.
pub fn add_bird_routes(map: &mut RouteMap, path: &Path) -> Result<()> {
    let f = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    parse_bird_routes(map, BufReader::new(f))
}

/// Parse bird routing table output. Only selected routes (`*`) with a `via`
/// next hop are considered; unparsable or out-of-range prefixes and routes
/// from unrecognized protocols are skipped.
pub fn parse_bird_routes<R: BufRead>(map: &mut RouteMap, reader: R) -> Result<()> {
    for line in reader.lines() {
        let line = line.context("Failed to read line")?;
        let line = line.trim();
        if !line.contains(" * ") {
            continue;
        }
        let Some(i) = line.find("via ") else {
            continue;
        };
        let s = line[..i].trim();
        let Ok(net) = s.parse::<Ipv4Net>() else {
            continue;
        };
        if net.prefix_len() == 0 || net.prefix_len() > 24 {
            continue;
        }
        let flags = if line.contains("[transit ") {
            RouteFlags::IS_TRANSIT
        } else if line.contains("[he ") {
            RouteFlags::IS_HE
        } else if line.contains("[cloudflare ") {
            RouteFlags::IS_CLOUDFLARE
        } else {
            continue;
        };
        map.set_prefix(&net, flags);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::block_index;
    use std::net::Ipv4Addr;

    fn idx(ip: &str) -> u32 {
        block_index(ip.parse::<Ipv4Addr>().unwrap())
    }

    #[test]
    fn test_parse_route_servers() {
        let input = "\
RS2 routes for 1500 sessions
23.159.0.0/24          via 206.81.80.1
6.0.0.0/8              via 206.81.80.2
198.51.100.0/28        via 206.81.80.3
";
        let mut map = RouteMap::new();
        parse_route_servers(&mut map, input.as_bytes()).unwrap();

        assert!(map.get(idx("23.159.0.0")).intersects(RouteFlags::ON_SIX));
        // /8 entries are tagged gov as well.
        let gov = map.get(idx("6.1.2.0"));
        assert!(gov.intersects(RouteFlags::ON_SIX));
        assert!(gov.intersects(RouteFlags::IS_GOV));
        // More specific than /24 is ignored.
        assert!(!map.get(idx("198.51.100.0")).intersects(RouteFlags::ON_SIX));
    }

    #[test]
    fn test_parse_route_servers_skips_header() {
        let input = "this header line would not parse\n1.2.3.0/24 via 206.81.80.1\n";
        let mut map = RouteMap::new();
        parse_route_servers(&mut map, input.as_bytes()).unwrap();
        assert!(map.get(idx("1.2.3.0")).intersects(RouteFlags::ON_SIX));
    }

    #[test]
    fn test_parse_route_servers_bogus_line_is_fatal() {
        let input = "header\nnot a prefix at all\n";
        let mut map = RouteMap::new();
        assert!(parse_route_servers(&mut map, input.as_bytes()).is_err());

        let input = "header\ngarbage via 206.81.80.1\n";
        let mut map = RouteMap::new();
        assert!(parse_route_servers(&mut map, input.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_reachable() {
        let input = "\
default via 192.0.2.1 dev eth0
5.44.16.0/21 via 192.0.2.1 dev eth0
192.0.2.0/24 dev eth0 proto kernel scope link
203.0.113.0/26 via 192.0.2.1 dev eth0
";
        let mut map = RouteMap::new();
        parse_reachable(&mut map, input.as_bytes()).unwrap();

        assert!(map.get(idx("5.44.16.0")).intersects(RouteFlags::HAVE_ROUTE));
        assert!(map.get(idx("5.44.23.0")).intersects(RouteFlags::HAVE_ROUTE));
        // "default" has no slash, the kernel route has no via, the /26 is
        // more specific than a /24.
        assert!(!map.get(idx("192.0.2.0")).intersects(RouteFlags::HAVE_ROUTE));
        assert!(!map.get(idx("203.0.113.0")).intersects(RouteFlags::HAVE_ROUTE));
    }

    #[test]
    fn test_parse_reachable_bogus_prefix_is_fatal() {
        let input = "300.0.0.0/8 via 192.0.2.1 dev eth0\n";
        let mut map = RouteMap::new();
        assert!(parse_reachable(&mut map, input.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_bird_routes() {
        let input = "\
8.8.8.0/24           *  [transit 2024-01-01] via 192.0.2.10 on eth0
66.220.0.0/19        *  [he 2024-01-01] via 192.0.2.11 on eth0
104.16.0.0/13        *  [cloudflare 2024-01-01] via 192.0.2.12 on eth0
9.9.9.0/24              [transit 2024-01-01] via 192.0.2.10 on eth0
10.66.0.0/16         *  [static1 2024-01-01] via 192.0.2.13 on eth0
";
        let mut map = RouteMap::new();
        parse_bird_routes(&mut map, input.as_bytes()).unwrap();

        assert!(map.get(idx("8.8.8.0")).intersects(RouteFlags::IS_TRANSIT));
        assert!(map.get(idx("66.220.1.0")).intersects(RouteFlags::IS_HE));
        assert!(map.get(idx("104.20.0.0")).intersects(RouteFlags::IS_CLOUDFLARE));
        // Not a selected route.
        assert!(!map.get(idx("9.9.9.0")).intersects(RouteFlags::IS_TRANSIT));
        // Unrecognized protocol.
        assert!(map.get(idx("10.66.0.0")).intersects(RouteFlags::RESERVED));
        assert!(!map.get(idx("10.66.0.0")).intersects(RouteFlags::IS_TRANSIT));
    }

    #[test]
    fn test_parse_bird_routes_skips_garbage() {
        let input = "\
garbage            *  [transit x] via 192.0.2.10
0.0.0.0/0          *  [transit x] via 192.0.2.10
1.2.3.4/32         *  [transit x] via 192.0.2.10
";
        let mut map = RouteMap::new();
        parse_bird_routes(&mut map, input.as_bytes()).unwrap();
        assert!(!map.get(idx("1.2.3.0")).intersects(RouteFlags::IS_TRANSIT));
        assert!(!map.get(0).intersects(RouteFlags::IS_TRANSIT));
    }
}
