//! # Camera
//!
//! Pixel offset of the viewport's top-left corner into world space.

use crate::game::Position;
use serde::{Deserialize, Serialize};

/// A clamped viewport offset.
///
/// After every mutation the offset satisfies
/// `0 <= x <= max(0, world_width - viewport_width)` and the same for `y`, so
/// a world larger than the screen never shows area outside itself and a
/// smaller one is pinned to the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: i32,
    pub y: i32,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Centres the view on `cell`, then clamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Camera, Position};
    ///
    /// let mut camera = Camera::new();
    /// camera.follow(Position::new(25, 25), 48, (1000, 700), (2400, 2400));
    /// assert_eq!((camera.x, camera.y), (724, 874));
    /// ```
    pub fn follow(
        &mut self,
        cell: Position,
        tile_size: u32,
        viewport: (i32, i32),
        world: (i32, i32),
    ) {
        let ts = tile_size as i32;
        self.x = cell.x * ts - viewport.0 / 2 + ts / 2;
        self.y = cell.y * ts - viewport.1 / 2 + ts / 2;
        self.clamp(viewport, world);
    }

    /// Moves the view by a pixel delta, then clamps.
    pub fn pan(&mut self, dx: i32, dy: i32, viewport: (i32, i32), world: (i32, i32)) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
        self.clamp(viewport, world);
    }

    /// Pans towards `target` by at most `max_step` pixels per axis.
    ///
    /// Targets more than one viewport away are snapped to, so a new level
    /// does not scroll in from the old position.
    pub fn approach(
        &mut self,
        target: Camera,
        max_step: i32,
        viewport: (i32, i32),
        world: (i32, i32),
    ) {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        if dx.abs() > viewport.0 || dy.abs() > viewport.1 {
            *self = target;
            self.clamp(viewport, world);
            return;
        }
        self.pan(
            dx.clamp(-max_step, max_step),
            dy.clamp(-max_step, max_step),
            viewport,
            world,
        );
    }

    /// Pulls the offset back inside the world.
    pub fn clamp(&mut self, viewport: (i32, i32), world: (i32, i32)) {
        self.x = self.x.clamp(0, (world.0 - viewport.0).max(0));
        self.y = self.y.clamp(0, (world.1 - viewport.1).max(0));
    }

    /// Screen position of a world pixel.
    pub fn to_screen(&self, world_x: i32, world_y: i32) -> (i32, i32) {
        (world_x - self.x, world_y - self.y)
    }
}
