//! # Delve Main Entry Point
//!
//! Parses the command line, sets up logging, loads the tilesets and runs the
//! macroquad game loop.

use clap::Parser;
use delve::config::{
    DEFAULT_DUNGEON_HEIGHT, DEFAULT_DUNGEON_WIDTH, DEFAULT_TILE_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use delve::{
    find_asset_dir, DelveError, DelveResult, GameState, GenerationConfig, InputHandler,
    MacroquadDisplay, SceneManager, TileAtlas, Viewport, World, DEFAULT_ASSET_DIRS,
};
use macroquad::window::Conf;
use std::path::PathBuf;

/// Command line arguments for Delve.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A tile-based dungeon crawler with procedural room-and-corridor levels")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation (time-based when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Dungeon width in tiles
    #[arg(long, default_value_t = DEFAULT_DUNGEON_WIDTH)]
    width: u32,

    /// Dungeon height in tiles
    #[arg(long, default_value_t = DEFAULT_DUNGEON_HEIGHT)]
    height: u32,

    /// Rooms to attempt per level
    #[arg(long, default_value_t = 5)]
    rooms: u32,

    /// Tile edge length in pixels
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    tile_size: u32,

    /// Directory holding tileset1.png and the optional tileset2.png
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Traps per level
    #[arg(long, default_value_t = 30)]
    traps: u32,

    /// Enemies per room (the spawn room never gets any)
    #[arg(long, default_value_t = 1)]
    enemies: u32,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the first level's rooms as JSON and exit without opening a window
    #[arg(long)]
    dump_rooms: bool,
}

impl Args {
    fn generation_config(&self) -> GenerationConfig {
        let seed = self.seed.unwrap_or_else(time_seed);
        GenerationConfig {
            width: self.width,
            height: self.height,
            tile_size: self.tile_size,
            room_count: self.rooms,
            trap_count: self.traps,
            enemies_per_room: self.enemies,
            ..GenerationConfig::new(seed)
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = initialize_logging(&args.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let config = args.generation_config();
    if let Err(e) = config.validate() {
        log::error!("{}", e);
        std::process::exit(2);
    }

    if args.dump_rooms {
        if let Err(e) = dump_rooms(config) {
            log::error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    let conf = window_conf();
    let assets = args.assets.clone();
    macroquad::Window::from_config(conf, async move {
        if let Err(e) = run_game(config, assets).await {
            log::error!("Fatal: {}", e);
            std::process::exit(1);
        }
    });
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Delve".to_string(),
        window_width: SCREEN_WIDTH as i32,
        window_height: SCREEN_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> DelveResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        let filter = tracing_subscriber::EnvFilter::try_new(log_level)
            .map_err(|e| DelveError::InvalidConfig(format!("bad log level: {}", e)))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
            .map_err(|e| DelveError::InvalidState(e.to_string()))?;
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_timestamp(None)
            .try_init()
            .map_err(|e| DelveError::InvalidState(e.to_string()))?;
    }

    Ok(())
}

fn dump_rooms(config: GenerationConfig) -> DelveResult<()> {
    let world = World::new(config)?;
    println!("{}", serde_json::to_string_pretty(world.layout())?);
    Ok(())
}

/// Loads assets and runs the scene loop.
async fn run_game(config: GenerationConfig, assets: Option<PathBuf>) -> DelveResult<()> {
    log::info!("Starting Delve v{} with seed {}", delve::VERSION, config.seed);

    let asset_dir = assets
        .or_else(|| find_asset_dir(&DEFAULT_ASSET_DIRS))
        .ok_or_else(|| DelveError::AssetMissing {
            path: format!("tileset1.png in any of {:?}", DEFAULT_ASSET_DIRS),
        })?;
    let atlas = TileAtlas::load(&asset_dir, config.tile_size)?;

    let game_state = GameState::new(config)?;
    let viewport = Viewport::new(SCREEN_WIDTH as i32, SCREEN_HEIGHT as i32);
    let display = MacroquadDisplay::new(atlas, &asset_dir, viewport);

    let mut scenes = SceneManager::new(game_state, display, InputHandler::new());
    scenes.run().await?;

    log::info!("Game loop ended");
    Ok(())
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(12345)
}
