//! # Viewport Renderer
//!
//! Decides which tiles of the grid are on screen and how they are drawn.
//!
//! Only floor cells are drawn directly. A floor cell whose northern neighbour
//! is wall (or lies off the top edge) also draws a wall tile in that
//! neighbour's cell, which gives elevated terrain a visible south face. All
//! other wall cells stay background. Planning is a pure function of the grid,
//! the camera and the viewport size.

use crate::game::{Grid, Position, TileType};
use crate::rendering::{Camera, TileAtlas, TileRef, TileSelection};

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

/// Half-open rectangle of tile indices, `[start_x, end_x) x [start_y, end_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub start_x: i32,
    pub end_x: i32,
    pub start_y: i32,
    pub end_y: i32,
}

impl TileRange {
    pub fn is_empty(&self) -> bool {
        self.start_x >= self.end_x || self.start_y >= self.end_y
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.start_x && pos.x < self.end_x && pos.y >= self.start_y && pos.y < self.end_y
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        ((self.end_x - self.start_x) * (self.end_y - self.start_y)) as usize
    }
}

/// One tile to draw at a screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDraw {
    /// Floor for the cell itself, wall for a face drawn above a floor cell
    pub tile: TileType,
    /// Grid cell the tile is drawn into
    pub cell: Position,
    pub screen_x: i32,
    pub screen_y: i32,
}

/// Drawing target for planned tiles.
pub trait TileSurface {
    /// Draws a resolved atlas tile with its top-left corner at the screen position.
    fn draw_tile(&mut self, tile: TileRef, screen_x: f32, screen_y: f32, size: f32);

    /// Draws the solid stand-in for a tile the atlas could not resolve.
    fn draw_fallback(&mut self, tile: TileType, screen_x: f32, screen_y: f32, size: f32);
}

/// Stateless floor/wall-face renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportRenderer {
    pub selection: TileSelection,
}

impl ViewportRenderer {
    pub fn new(selection: TileSelection) -> Self {
        Self { selection }
    }

    /// Tile indices intersecting the viewport.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Camera, Grid, Viewport, ViewportRenderer};
    ///
    /// let grid = Grid::new(50, 50, 48).unwrap();
    /// let range = ViewportRenderer::visible_range(&grid, Camera { x: 100, y: 0 }, Viewport::new(1000, 700));
    /// assert_eq!((range.start_x, range.end_x), (2, 23));
    /// assert_eq!((range.start_y, range.end_y), (0, 15));
    /// ```
    pub fn visible_range(grid: &Grid, camera: Camera, viewport: Viewport) -> TileRange {
        let ts = grid.tile_size() as i32;
        TileRange {
            start_x: camera.x.div_euclid(ts).max(0),
            end_x: ceil_div(camera.x + viewport.width, ts).min(grid.width() as i32),
            start_y: camera.y.div_euclid(ts).max(0),
            end_y: ceil_div(camera.y + viewport.height, ts).min(grid.height() as i32),
        }
    }

    /// Lists the tiles to draw this frame, top row first.
    ///
    /// The row just below the visible range is scanned as well so that its
    /// wall faces, which land inside the view, are not lost.
    pub fn plan(grid: &Grid, camera: Camera, viewport: Viewport) -> Vec<TileDraw> {
        let range = Self::visible_range(grid, camera, viewport);
        let mut draws = Vec::new();
        if range.is_empty() {
            return draws;
        }

        let ts = grid.tile_size() as i32;
        let scan_end_y = (range.end_y + 1).min(grid.height() as i32);

        for y in range.start_y..scan_end_y {
            for x in range.start_x..range.end_x {
                let cell = Position::new(x, y);
                if grid.get(cell) != Some(TileType::Floor) {
                    continue;
                }

                let (screen_x, screen_y) = camera.to_screen(x * ts, y * ts);
                if y < range.end_y {
                    draws.push(TileDraw {
                        tile: TileType::Floor,
                        cell,
                        screen_x,
                        screen_y,
                    });
                }

                let above = Position::new(x, y - 1);
                if grid.tile_or_wall(above) == TileType::Wall {
                    draws.push(TileDraw {
                        tile: TileType::Wall,
                        cell: above,
                        screen_x,
                        screen_y: screen_y - ts,
                    });
                }
            }
        }

        draws
    }

    /// The atlas tile that draws `tile`.
    pub fn tile_for(&self, tile: TileType) -> TileRef {
        match tile {
            TileType::Floor => self.selection.floor,
            TileType::Wall => self.selection.wall,
        }
    }

    /// Plans the frame and sends every tile to `surface`.
    ///
    /// Tiles the atlas cannot resolve go to [`TileSurface::draw_fallback`].
    pub fn draw<S: TileSurface>(
        &self,
        grid: &Grid,
        atlas: &TileAtlas,
        camera: Camera,
        viewport: Viewport,
        surface: &mut S,
    ) {
        let size = grid.tile_size() as f32;
        for draw in Self::plan(grid, camera, viewport) {
            let tile = self.tile_for(draw.tile);
            let (x, y) = (draw.screen_x as f32, draw.screen_y as f32);
            if atlas.tile_rect(tile).is_some() {
                surface.draw_tile(tile, x, y, size);
            } else {
                surface.draw_fallback(draw.tile, x, y, size);
            }
        }
    }
}

fn ceil_div(value: i32, divisor: i32) -> i32 {
    -(-value).div_euclid(divisor)
}
