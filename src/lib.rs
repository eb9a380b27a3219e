//! # Delve
//!
//! A tile-based dungeon crawler built around procedural room-and-corridor generation.
//!
//! ## Architecture Overview
//!
//! The crate is organised around a small tile world engine and the systems that
//! consume it:
//!
//! - **Grid**: the authoritative 2D array of wall/floor cells
//! - **Generation**: rooms and L-shaped corridors carved into the grid
//! - **World Query**: the walkability predicate every consumer relies on
//! - **Rendering**: camera-relative viewport planning and tileset slicing
//! - **Game**: player, traps, enemies and stairs built on top of the world
//!
//! Everything below the rendering layer is deterministic under a seeded
//! random source and can be exercised without a window.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use scenes::*;
pub use utils::*;

/// Core error type for the Delve engine.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A required asset file does not exist
    #[error("Required asset not found: {path}")]
    AssetMissing { path: String },

    /// An asset exists but could not be decoded
    #[error("Failed to decode asset {path}: {reason}")]
    AssetDecode { path: String, reason: String },

    /// Configuration values are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Generated content failed validation
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default tile edge length in pixels
    pub const DEFAULT_TILE_SIZE: u32 = 48;

    /// Tile edge length used by the older 16px tilesets
    pub const LEGACY_TILE_SIZE: u32 = 16;

    /// Default dungeon width in tiles
    pub const DEFAULT_DUNGEON_WIDTH: u32 = 50;

    /// Default dungeon height in tiles
    pub const DEFAULT_DUNGEON_HEIGHT: u32 = 50;

    /// Default window width in pixels
    pub const SCREEN_WIDTH: u32 = 1000;

    /// Default window height in pixels
    pub const SCREEN_HEIGHT: u32 = 700;

    /// Camera pan speed in pixels per frame
    pub const CAMERA_PAN_SPEED: i32 = 10;

    /// Tileset file names looked up inside the asset directory, in load order.
    /// The first one is required.
    pub const TILESET_FILES: [&str; 2] = ["tileset1.png", "tileset2.png"];
}
