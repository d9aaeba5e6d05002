use std::process::ExitCode;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use terrain_autotiler::ascii::{self, AsciiMode};
use terrain_autotiler::autotile::Autotiler;
use terrain_autotiler::config::AutotileConfig;
use terrain_autotiler::error::Result;
use terrain_autotiler::export::{self, TileDocument};
use terrain_autotiler::heightmap::{self, IslandParams};

#[derive(Parser, Debug)]
#[command(name = "autotile")]
#[command(about = "Classify a height grid into biomes and pick transition tiles for every cell")]
struct Args {
    /// JSON config file (bands, seed, base tiles)
    #[arg(short, long)]
    config: Option<String>,

    /// JSON height grid ({width, height, samples}); a synthetic island is used if absent
    #[arg(long)]
    heights: Option<String>,

    /// Width of the synthetic island
    #[arg(short = 'W', long, default_value = "96")]
    width: usize,

    /// Height of the synthetic island
    #[arg(short = 'H', long, default_value = "64")]
    height: usize,

    /// Random seed (overrides the config; random if neither sets one)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Skip laying base tiles before transition tiling
    #[arg(long)]
    no_base_tiles: bool,

    /// Write the tile document as JSON
    #[arg(short, long)]
    output: Option<String>,

    /// Write a PNG preview
    #[arg(long)]
    preview: Option<String>,

    /// Print the biome grid as ASCII
    #[arg(long)]
    ascii: bool,

    /// Write biome and mask ASCII maps to a text file
    #[arg(long)]
    export_ascii: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => AutotileConfig::load(path)?,
        None => AutotileConfig::default(),
    };
    if args.no_base_tiles {
        config.place_base_tiles = false;
    }

    // Bands are checked before any height data is read or generated
    let tiler = Autotiler::from_config(&config)?;

    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    log::info!("Seed: {seed}");

    let heights = match &args.heights {
        Some(path) => heightmap::load_heightmap(path)?,
        None => {
            log::info!("Generating {}x{} island height field", args.width, args.height);
            heightmap::generate_island(args.width, args.height, seed, &IslandParams::default())
        }
    };

    let (pass, canvas) = tiler.run_to_tilemap(&heights, &mut rng);

    let counts = pass.biomes.counts();
    log::info!(
        "Biomes: {} water, {} sand, {} grass, {} upland",
        counts.water,
        counts.sand,
        counts.grass,
        counts.upland
    );

    if args.ascii {
        print!("{}", ascii::render_ascii(&pass.biomes, AsciiMode::Biome));
    }

    if let Some(path) = &args.export_ascii {
        ascii::export_ascii(&pass.biomes, seed, path)?;
        log::info!("Wrote ASCII maps to {path}");
    }

    if let Some(path) = &args.preview {
        export::export_preview(&pass.biomes, &canvas, path)?;
        log::info!("Wrote preview to {path}");
    }

    if let Some(path) = &args.output {
        TileDocument::new(&pass.biomes, &canvas, pass.stats, seed).save(path)?;
        log::info!("Wrote tile document to {path}");
    }

    Ok(())
}
