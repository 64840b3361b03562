use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use routemap::{RouteFlags, RouteMap, ingest, render};

#[derive(Parser)]
#[command(name = "routemap")]
#[command(about = "Classify IPv4 /24 blocks from routing data and render them on a Hilbert curve")]
#[command(version = "0.1.0")]
struct Args {
    #[arg(
        long,
        value_name = "FILE",
        help = "ip -4 route output; marks covered blocks as reachable"
    )]
    v4_routes: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "bird 'show route' output; classifies routes by originating protocol"
    )]
    bird_routes: Option<PathBuf>,

    #[arg(
        long,
        value_name = "URL",
        default_value = ingest::DEFAULT_RS_URL,
        help = "Exchange route server listing to fetch"
    )]
    rs_url: String,

    #[arg(short = 'v', long = "verbose", help = "Verbose output (-v for debug, -vv for trace)", action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(default_value = "map.png", help = "Output filename")]
    output: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Configure logging based on verbose level
    let log_level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let mut map = RouteMap::new();

    if let Some(path) = &args.v4_routes {
        ingest::add_reachable(&mut map, path)?;
    }
    if let Some(path) = &args.bird_routes {
        ingest::add_bird_routes(&mut map, path)?;
    }
    ingest::add_route_servers(&mut map, &args.rs_url)?;

    let stats = map.stats(RouteFlags::RESERVED);
    println!(
        "num /24s   six: {} of {} ({:.2}%)",
        stats.on_six,
        stats.total,
        stats.six_pct()
    );
    println!(
        "num /24s reach: {} of {} ({:.2}%)",
        stats.reachable,
        stats.total,
        stats.reach_pct()
    );

    let stats = map.stats(RouteFlags::RESERVED | RouteFlags::IS_GOV);
    println!(
        "num /24s non-gov: {} of {} ({:.2}%)",
        stats.on_six,
        stats.total,
        stats.six_pct()
    );

    log::info!("making image..");
    let image = render(&map);

    log::info!("encoding png..");
    image
        .save(&args.output)
        .with_context(|| format!("Failed to save image to {}", args.output))
}
