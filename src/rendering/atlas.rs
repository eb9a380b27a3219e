//! # Tile Atlas
//!
//! Tileset images sliced into fixed-size square tiles.
//!
//! Tiles are numbered row-major from the top-left corner of each tileset:
//! `index = row * columns + column`. Images stay on the CPU side so slicing
//! works without a graphics context; textures are created by the display.

use crate::config::TILESET_FILES;
use crate::{DelveError, DelveResult};
use macroquad::prelude::{Image, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directories searched for tilesets when none is given explicitly.
pub const DEFAULT_ASSET_DIRS: [&str; 3] = ["Assets", "assets", "."];

/// A tile address: tileset number plus row-major tile index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRef {
    pub tileset: usize,
    pub index: usize,
}

impl TileRef {
    pub const fn new(tileset: usize, index: usize) -> Self {
        Self { tileset, index }
    }
}

/// Which tiles draw floor and wall cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSelection {
    pub floor: TileRef,
    pub wall: TileRef,
}

impl TileSelection {
    /// Floor comes from the first tileset, walls from the second when loaded.
    pub fn for_tileset_count(count: usize) -> Self {
        let wall = if count >= 2 {
            TileRef::new(1, 1)
        } else {
            TileRef::new(0, 1)
        };
        Self {
            floor: TileRef::new(0, 0),
            wall,
        }
    }
}

#[derive(Clone)]
struct Tileset {
    name: String,
    image: Image,
    columns: usize,
    rows: usize,
}

impl Tileset {
    fn new(name: String, image: Image, tile_size: u32) -> Self {
        let columns = (image.width() as u32 / tile_size) as usize;
        let rows = (image.height() as u32 / tile_size) as usize;
        Self {
            name,
            image,
            columns,
            rows,
        }
    }

    fn tile_count(&self) -> usize {
        self.columns * self.rows
    }
}

/// All loaded tilesets sharing one tile size.
#[derive(Clone)]
pub struct TileAtlas {
    tile_size: u32,
    tilesets: Vec<Tileset>,
}

impl fmt::Debug for TileAtlas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sets: Vec<(&str, usize, usize)> = self
            .tilesets
            .iter()
            .map(|t| (t.name.as_str(), t.columns, t.rows))
            .collect();
        f.debug_struct("TileAtlas")
            .field("tile_size", &self.tile_size)
            .field("tilesets", &sets)
            .finish()
    }
}

impl TileAtlas {
    /// Loads the tilesets from `dir`.
    ///
    /// The first tileset is required and its absence is fatal. Later ones are
    /// optional and skipped when missing. A file that exists but cannot be
    /// decoded is always an error.
    pub fn load(dir: &Path, tile_size: u32) -> DelveResult<Self> {
        let mut images = Vec::new();

        for (i, path) in tileset_paths(dir).into_iter().enumerate() {
            match read_image(&path) {
                Ok(image) => images.push((display_name(&path), image)),
                Err(DelveError::AssetMissing { path }) if i > 0 => {
                    log::info!("Optional tileset {} not found, skipping", path);
                }
                Err(e) => return Err(e),
            }
        }

        Self::from_named_images(images, tile_size)
    }

    /// Builds an atlas from already decoded images.
    pub fn from_images(images: Vec<Image>, tile_size: u32) -> DelveResult<Self> {
        let named = images
            .into_iter()
            .enumerate()
            .map(|(i, image)| (format!("tileset{}", i + 1), image))
            .collect();
        Self::from_named_images(named, tile_size)
    }

    fn from_named_images(images: Vec<(String, Image)>, tile_size: u32) -> DelveResult<Self> {
        if tile_size == 0 {
            return Err(DelveError::InvalidConfig(
                "tile size must be positive".to_string(),
            ));
        }
        if images.is_empty() {
            return Err(DelveError::InvalidConfig(
                "an atlas needs at least one tileset".to_string(),
            ));
        }

        let tilesets: Vec<Tileset> = images
            .into_iter()
            .map(|(name, image)| Tileset::new(name, image, tile_size))
            .collect();

        for tileset in &tilesets {
            log::info!(
                "Loaded tileset {}: {}x{} = {} tiles",
                tileset.name,
                tileset.columns,
                tileset.rows,
                tileset.tile_count()
            );
        }

        Ok(Self {
            tile_size,
            tilesets,
        })
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn tileset_count(&self) -> usize {
        self.tilesets.len()
    }

    /// Number of whole tiles in a tileset, `None` for an unknown tileset.
    pub fn tile_count(&self, tileset: usize) -> Option<usize> {
        self.tilesets.get(tileset).map(Tileset::tile_count)
    }

    /// Pixel rectangle of a tile inside its tileset image.
    ///
    /// Returns `None` when either index is out of range.
    pub fn tile_rect(&self, tile: TileRef) -> Option<Rect> {
        let tileset = self.tilesets.get(tile.tileset)?;
        if tile.index >= tileset.tile_count() {
            return None;
        }

        let size = self.tile_size as f32;
        let column = tile.index % tileset.columns;
        let row = tile.index / tileset.columns;
        Some(Rect::new(
            column as f32 * size,
            row as f32 * size,
            size,
            size,
        ))
    }

    /// A copy of one tile's pixels.
    pub fn tile_image(&self, tile: TileRef) -> Option<Image> {
        let rect = self.tile_rect(tile)?;
        Some(self.tilesets[tile.tileset].image.sub_image(rect))
    }

    /// The whole image of a tileset.
    pub fn tileset_image(&self, tileset: usize) -> Option<&Image> {
        self.tilesets.get(tileset).map(|t| &t.image)
    }

    pub fn tileset_name(&self, tileset: usize) -> Option<&str> {
        self.tilesets.get(tileset).map(|t| t.name.as_str())
    }
}

/// Expected tileset files inside `dir`, in load order.
pub fn tileset_paths(dir: &Path) -> Vec<PathBuf> {
    TILESET_FILES.iter().map(|name| dir.join(name)).collect()
}

/// The first candidate directory holding the required tileset.
pub fn find_asset_dir<P: AsRef<Path>>(candidates: &[P]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|dir| dir.as_ref())
        .find(|dir| dir.join(TILESET_FILES[0]).is_file())
        .map(Path::to_path_buf)
}

pub(crate) fn read_image(path: &Path) -> DelveResult<Image> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DelveError::AssetMissing {
            path: path.display().to_string(),
        },
        _ => DelveError::Io(e),
    })?;

    Image::from_file_with_format(&bytes, None).map_err(|e| DelveError::AssetDecode {
        path: path.display().to_string(),
        reason: format!("{:?}", e),
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::WHITE;

    fn atlas(sizes: &[(u16, u16)], tile_size: u32) -> TileAtlas {
        let images = sizes
            .iter()
            .map(|&(w, h)| Image::gen_image_color(w, h, WHITE))
            .collect();
        TileAtlas::from_images(images, tile_size).unwrap()
    }

    #[test]
    fn test_row_major_slicing() {
        // 4 columns, 2 rows of 16px tiles.
        let atlas = atlas(&[(64, 32)], 16);
        assert_eq!(atlas.tile_count(0), Some(8));

        assert_eq!(atlas.tile_rect(TileRef::new(0, 0)), Some(Rect::new(0.0, 0.0, 16.0, 16.0)));
        assert_eq!(atlas.tile_rect(TileRef::new(0, 3)), Some(Rect::new(48.0, 0.0, 16.0, 16.0)));
        assert_eq!(atlas.tile_rect(TileRef::new(0, 5)), Some(Rect::new(16.0, 16.0, 16.0, 16.0)));
    }

    #[test]
    fn test_partial_tiles_are_dropped() {
        let atlas = atlas(&[(100, 50)], 48);
        assert_eq!(atlas.tile_count(0), Some(2));
        assert_eq!(atlas.tile_rect(TileRef::new(0, 2)), None);
    }

    #[test]
    fn test_out_of_range_lookup_is_none() {
        let atlas = atlas(&[(96, 96)], 48);
        assert_eq!(atlas.tile_rect(TileRef::new(0, 4)), None);
        assert_eq!(atlas.tile_rect(TileRef::new(1, 0)), None);
        assert!(atlas.tile_image(TileRef::new(3, 0)).is_none());
        assert_eq!(atlas.tile_count(2), None);
    }

    #[test]
    fn test_tile_image_has_tile_size() {
        let atlas = atlas(&[(96, 48)], 48);
        let tile = atlas.tile_image(TileRef::new(0, 1)).unwrap();
        assert_eq!(tile.width(), 48);
        assert_eq!(tile.height(), 48);
    }

    #[test]
    fn test_selection_depends_on_tileset_count() {
        let single = TileSelection::for_tileset_count(1);
        assert_eq!(single.floor, TileRef::new(0, 0));
        assert_eq!(single.wall, TileRef::new(0, 1));

        let double = TileSelection::for_tileset_count(2);
        assert_eq!(double.wall, TileRef::new(1, 1));
    }

    #[test]
    fn test_empty_atlas_is_rejected() {
        assert!(matches!(
            TileAtlas::from_images(Vec::new(), 48),
            Err(DelveError::InvalidConfig(_))
        ));
        assert!(TileAtlas::from_images(vec![Image::gen_image_color(48, 48, WHITE)], 0).is_err());
    }
}
