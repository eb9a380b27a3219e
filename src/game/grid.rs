//! # Tile Grid
//!
//! The authoritative wall/floor storage for one dungeon level.

use crate::game::Position;
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    /// Solid rock. Never walkable.
    Wall,
    /// Carved floor.
    Floor,
}

impl TileType {
    /// Returns true if entities can stand on this tile.
    pub fn is_passable(self) -> bool {
        matches!(self, TileType::Floor)
    }
}

/// Fixed-size 2D array of cells, stored row-major.
///
/// Every accessor is bounds-checked: reads outside the grid report
/// [`TileType::Wall`] (or `None` from [`Grid::get`]) and writes outside the
/// grid are ignored. Carving and rendering code can therefore run over
/// clipped rectangles without guarding each coordinate.
///
/// # Examples
///
/// ```
/// use delve::{Grid, Position, TileType};
///
/// let mut grid = Grid::new(20, 20, 48).unwrap();
/// assert!(grid.set(Position::new(3, 4), TileType::Floor));
/// assert_eq!(grid.get(Position::new(3, 4)), Some(TileType::Floor));
/// assert!(!grid.set(Position::new(-1, 4), TileType::Floor));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    tile_size: u32,
    cells: Vec<TileType>,
}

impl Grid {
    /// Creates a grid with every cell set to wall.
    pub fn new(width: u32, height: u32, tile_size: u32) -> DelveResult<Self> {
        if width == 0 || height == 0 {
            return Err(DelveError::InvalidConfig(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if tile_size == 0 {
            return Err(DelveError::InvalidConfig(
                "tile size must be positive".to_string(),
            ));
        }

        Ok(Self {
            width,
            height,
            tile_size,
            cells: vec![TileType::Wall; width as usize * height as usize],
        })
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel edge length of one cell.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// World size in pixels as `(width, height)`.
    pub fn pixel_size(&self) -> (i32, i32) {
        (
            (self.width * self.tile_size) as i32,
            (self.height * self.tile_size) as i32,
        )
    }

    /// Checks whether a position lies inside the grid.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.is_valid_position(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// Returns the cell state, or `None` outside the grid.
    pub fn get(&self, pos: Position) -> Option<TileType> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Returns the cell state, treating anything outside the grid as wall.
    pub fn tile_or_wall(&self, pos: Position) -> TileType {
        self.get(pos).unwrap_or(TileType::Wall)
    }

    /// Sets a cell. Returns false (and changes nothing) outside the grid.
    pub fn set(&mut self, pos: Position, tile: TileType) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Overwrites every cell in place. The allocation is reused.
    pub fn fill_all(&mut self, tile: TileType) {
        self.cells.fill(tile);
    }

    /// Number of floor cells.
    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|tile| tile.is_passable()).count()
    }

    /// Iterates over every floor cell position in row-major order.
    pub fn floor_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_passable())
            .map(move |(i, _)| Position::new((i % width) as i32, (i / width) as i32))
    }

    /// Renders the grid as text, `#` for wall and `.` for floor. Handy in logs and test failures.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for row in self.cells.chunks(self.width as usize) {
            for tile in row {
                out.push(match tile {
                    TileType::Wall => '#',
                    TileType::Floor => '.',
                });
            }
            out.push('\n');
        }
        out
    }
}
