//! # Display Management
//!
//! Screen output with macroquad: the tile map, entities, HUD and end screen.

use crate::config::CAMERA_PAN_SPEED;
use crate::game::{Facing, GameCompletionState, GameEvent, GameState, TileType};
use crate::rendering::{
    read_image, Camera, TileAtlas, TileRef, TileSelection, TileSurface, Viewport, ViewportRenderer,
};
use macroquad::prelude::*;
use std::path::Path;

/// Solid floor colour used when the floor tile cannot be resolved.
pub const FLOOR_FALLBACK_RGB: [u8; 3] = [200, 200, 200];

/// Solid wall colour used when the wall tile cannot be resolved.
pub const WALL_FALLBACK_RGB: [u8; 3] = [80, 60, 40];

/// Optional sprite files looked up next to the tilesets.
pub const PLAYER_SPRITE_FILE: &str = "player.png";
pub const ENEMY_SPRITE_FILE: &str = "enemy.png";

const STAIRS_RGB: [u8; 3] = [255, 215, 0];
const HUD_FONT_SIZE: f32 = 24.0;
const HUD_LINE_HEIGHT: f32 = 25.0;

/// Solid colour for a tile kind.
pub fn fallback_color(tile: TileType) -> Color {
    let [r, g, b] = match tile {
        TileType::Floor => FLOOR_FALLBACK_RGB,
        TileType::Wall => WALL_FALLBACK_RGB,
    };
    Color::from_rgba(r, g, b, 255)
}

/// HUD text, top line first.
pub fn hud_lines(state: &GameState, selection: TileSelection, tile_size: u32) -> Vec<String> {
    let stats = &state.player.stats;
    let visibility = if state.show_traps { "Visible" } else { "Invisible" };

    vec![
        "SPACE: Regenerate | WASD/Arrows: Move | T: Traps | F1: Help".to_string(),
        format!(
            "Floor: TS{}[{}] | Wall: TS{}[{}] ({}x{} Tiles)",
            selection.floor.tileset,
            selection.floor.index,
            selection.wall.tileset,
            selection.wall.index,
            tile_size,
            tile_size
        ),
        format!("Traps: {} ({})", state.traps.len(), visibility),
        format!(
            "Depth: {} | HP: {}/{} | Lv: {} | Turn: {}",
            state.world.depth(),
            stats.current_hp,
            stats.max_hp(),
            stats.level,
            state.turn_number
        ),
    ]
}

/// Message log text for an event, `None` for events not worth reporting.
pub fn event_message(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::TrapTriggered {
            kind,
            damage,
            remaining_hp,
            ..
        } => Some(format!(
            "A {} trap hits you for {} damage! HP: {}",
            kind.name(),
            damage,
            remaining_hp
        )),
        GameEvent::PlayerDied => Some("You died.".to_string()),
        GameEvent::Descended { depth } => Some(format!("You descend to depth {}.", depth)),
        GameEvent::LevelRegenerated => Some("The dungeon shifts around you.".to_string()),
        GameEvent::TrapVisibilityChanged { visible } => Some(format!(
            "Traps are now {}.",
            if *visible { "visible" } else { "hidden" }
        )),
        GameEvent::GameRestarted => Some("New game started!".to_string()),
        GameEvent::PlayerMoved { .. }
        | GameEvent::MoveBlocked { .. }
        | GameEvent::EnemyMoved { .. } => None,
    }
}

/// Executes tile draws against uploaded tileset textures.
struct TextureSurface<'a> {
    atlas: &'a TileAtlas,
    textures: &'a [Texture2D],
}

impl TileSurface for TextureSurface<'_> {
    fn draw_tile(&mut self, tile: TileRef, screen_x: f32, screen_y: f32, size: f32) {
        let (Some(texture), Some(source)) =
            (self.textures.get(tile.tileset), self.atlas.tile_rect(tile))
        else {
            draw_rectangle(screen_x, screen_y, size, size, fallback_color(TileType::Floor));
            return;
        };

        draw_texture_ex(
            texture,
            screen_x,
            screen_y,
            WHITE,
            DrawTextureParams {
                source: Some(source),
                dest_size: Some(vec2(size, size)),
                ..Default::default()
            },
        );
    }

    fn draw_fallback(&mut self, tile: TileType, screen_x: f32, screen_y: f32, size: f32) {
        draw_rectangle(screen_x, screen_y, size, size, fallback_color(tile));
    }
}

/// Macroquad display manager for the game.
///
/// Owns the GPU textures, so it can only be created inside the macroquad
/// frame loop.
pub struct MacroquadDisplay {
    pub viewport: Viewport,
    pub camera: Camera,
    pub renderer: ViewportRenderer,
    atlas: TileAtlas,
    textures: Vec<Texture2D>,
    player_sprite: Option<Texture2D>,
    enemy_sprite: Option<Texture2D>,
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    pub show_help: bool,
}

impl MacroquadDisplay {
    /// Uploads the atlas and any sprites found in `asset_dir`.
    pub fn new(atlas: TileAtlas, asset_dir: &Path, viewport: Viewport) -> Self {
        let textures = (0..atlas.tileset_count())
            .filter_map(|i| atlas.tileset_image(i))
            .map(|image| {
                let texture = Texture2D::from_image(image);
                texture.set_filter(FilterMode::Nearest);
                texture
            })
            .collect();

        let selection = TileSelection::for_tileset_count(atlas.tileset_count());

        Self {
            viewport,
            camera: Camera::new(),
            renderer: ViewportRenderer::new(selection),
            atlas,
            textures,
            player_sprite: load_sprite(&asset_dir.join(PLAYER_SPRITE_FILE)),
            enemy_sprite: load_sprite(&asset_dir.join(ENEMY_SPRITE_FILE)),
            messages: Vec::new(),
            max_messages: 100,
            show_help: false,
        }
    }

    /// Renders the complete game screen.
    pub fn render_game(&mut self, state: &GameState) {
        let grid = state.world.grid();
        let target = state
            .player
            .camera_target(&state.world.query(), self.viewport);
        self.camera.approach(
            target,
            CAMERA_PAN_SPEED,
            self.viewport.size(),
            grid.pixel_size(),
        );

        clear_background(BLACK);

        let mut surface = TextureSurface {
            atlas: &self.atlas,
            textures: &self.textures,
        };
        self.renderer
            .draw(grid, &self.atlas, self.camera, self.viewport, &mut surface);

        self.render_stairs(state);
        if state.show_traps {
            self.render_traps(state);
        }
        self.render_enemies(state);
        self.render_player(state);
        self.render_hud(state);
        self.render_messages();
        if self.show_help {
            self.render_help();
        }
    }

    fn cell_to_screen(&self, x: i32, y: i32, tile_size: f32) -> (f32, f32) {
        let ts = tile_size as i32;
        let (sx, sy) = self.camera.to_screen(x * ts, y * ts);
        (sx as f32, sy as f32)
    }

    fn render_stairs(&self, state: &GameState) {
        let Some(stairs) = state.world.stairs() else {
            return;
        };
        let size = state.world.tile_size() as f32;
        let (x, y) = self.cell_to_screen(stairs.x, stairs.y, size);
        let [r, g, b] = STAIRS_RGB;

        draw_rectangle(x, y, size, size, Color::from_rgba(r, g, b, 255));
        let step = size / 4.0;
        for i in 1..4 {
            let line_y = y + step * i as f32;
            draw_line(x, line_y, x + size, line_y, 2.0, Color::from_rgba(200, 180, 0, 255));
        }
        let (cx, cy) = (x + size / 2.0, y + size / 2.0);
        let arrow = Color::from_rgba(100, 80, 0, 255);
        draw_line(cx, cy - 8.0, cx, cy + 8.0, 3.0, arrow);
        draw_triangle(
            vec2(cx, cy + 10.0),
            vec2(cx - 6.0, cy + 2.0),
            vec2(cx + 6.0, cy + 2.0),
            arrow,
        );
    }

    fn render_traps(&self, state: &GameState) {
        let size = state.world.tile_size() as f32;
        for trap in state.traps.traps().iter().filter(|t| t.active) {
            let (x, y) = self.cell_to_screen(trap.position.x, trap.position.y, size);
            let [r, g, b, a] = trap.kind.debug_color();
            draw_rectangle(x, y, size, size, Color::from_rgba(r, g, b, a));
            if trap.triggered {
                draw_rectangle_lines(x, y, size, size, 2.0, WHITE);
            }
        }
    }

    fn render_enemies(&self, state: &GameState) {
        let size = state.world.tile_size() as f32;
        for enemy in &state.enemies {
            let (x, y) = self.cell_to_screen(enemy.position.x, enemy.position.y, size);
            match &self.enemy_sprite {
                Some(texture) => draw_sprite(texture, x, y, size, false),
                None => draw_rectangle(x, y, size, size, Color::from_rgba(200, 50, 50, 255)),
            }
        }
    }

    fn render_player(&self, state: &GameState) {
        let size = state.world.tile_size() as f32;
        let player = &state.player;
        let (x, y) = self.cell_to_screen(player.position.x, player.position.y, size);
        let flip = player.facing == Facing::Left;

        match &self.player_sprite {
            Some(texture) => draw_sprite(texture, x, y, size, flip),
            None => {
                draw_rectangle(x, y, size, size, Color::from_rgba(50, 120, 255, 255));
                let eye_x = if flip { x + size * 0.2 } else { x + size * 0.8 };
                draw_circle(eye_x, y + size * 0.3, size * 0.08, WHITE);
            }
        }
    }

    fn render_hud(&self, state: &GameState) {
        let colors = [
            WHITE,
            Color::from_rgba(150, 200, 255, 255),
            Color::from_rgba(255, 255, 100, 255),
            WHITE,
        ];
        let lines = hud_lines(state, self.renderer.selection, state.world.tile_size());
        for (i, line) in lines.iter().enumerate() {
            let color = colors.get(i).copied().unwrap_or(WHITE);
            draw_text(line, 10.0, 25.0 + i as f32 * HUD_LINE_HEIGHT, HUD_FONT_SIZE, color);
        }
    }

    fn render_messages(&self) {
        let base_y = self.viewport.height as f32 - 70.0;
        draw_rectangle(
            0.0,
            base_y - 20.0,
            self.viewport.width as f32,
            90.0,
            Color::new(0.0, 0.0, 0.0, 0.7),
        );

        let start = self.messages.len().saturating_sub(3);
        for (i, message) in self.messages[start..].iter().enumerate() {
            draw_text(message, 10.0, base_y + i as f32 * 20.0, 20.0, WHITE);
        }
    }

    fn render_help(&self) {
        let lines = [
            "WASD / Arrows: move one cell",
            "SPACE: regenerate the level",
            "T: show or hide traps",
            "F1: toggle this help",
            "ESC: quit",
        ];
        let x = self.viewport.width as f32 / 2.0 - 180.0;
        let y = self.viewport.height as f32 / 2.0 - 80.0;
        draw_rectangle(x - 20.0, y - 40.0, 400.0, 180.0, Color::new(0.0, 0.0, 0.0, 0.85));
        for (i, line) in lines.iter().enumerate() {
            draw_text(line, x, y + i as f32 * HUD_LINE_HEIGHT, HUD_FONT_SIZE, WHITE);
        }
    }

    /// Renders the end screen for a finished game.
    pub fn render_game_over(&self, state: &GameState) {
        clear_background(BLACK);

        let title = match state.completion_state {
            GameCompletionState::Died => "YOU DIED",
            GameCompletionState::InProgress => "PAUSED",
        };
        let cx = self.viewport.width as f32 / 2.0;
        let cy = self.viewport.height as f32 / 2.0;

        draw_text(title, cx - 90.0, cy - 60.0, 48.0, RED);
        draw_text(
            &format!(
                "Depth {} | Level {} | {} turns",
                state.world.depth(),
                state.player.stats.level,
                state.turn_number
            ),
            cx - 150.0,
            cy,
            HUD_FONT_SIZE,
            WHITE,
        );
        draw_text("N: new game | ESC: quit", cx - 120.0, cy + 40.0, HUD_FONT_SIZE, GRAY);
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);

        // Keep only the most recent messages
        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }
}

fn draw_sprite(texture: &Texture2D, x: f32, y: f32, size: f32, flip_x: bool) {
    draw_texture_ex(
        texture,
        x,
        y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(size, size)),
            flip_x,
            ..Default::default()
        },
    );
}

fn load_sprite(path: &Path) -> Option<Texture2D> {
    match read_image(path) {
        Ok(image) => {
            let texture = Texture2D::from_image(&image);
            texture.set_filter(FilterMode::Nearest);
            Some(texture)
        }
        Err(e) => {
            log::debug!("No sprite at {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, TrapKind};
    use crate::generation::GenerationConfig;

    #[test]
    fn test_fallback_colors() {
        assert_eq!(fallback_color(TileType::Floor), Color::from_rgba(200, 200, 200, 255));
        assert_eq!(fallback_color(TileType::Wall), Color::from_rgba(80, 60, 40, 255));
    }

    #[test]
    fn test_hud_reports_tiles_and_traps() {
        let mut state = GameState::new(GenerationConfig::for_testing(3)).unwrap();
        let selection = TileSelection::for_tileset_count(2);

        let lines = hud_lines(&state, selection, 48);
        assert_eq!(lines[1], "Floor: TS0[0] | Wall: TS1[1] (48x48 Tiles)");
        assert_eq!(lines[2], format!("Traps: {} (Invisible)", state.traps.len()));
        assert!(lines[3].starts_with("Depth: 1 | HP: 101/101"));

        state.show_traps = true;
        let lines = hud_lines(&state, selection, 48);
        assert!(lines[2].ends_with("(Visible)"));
    }

    #[test]
    fn test_event_messages() {
        let hit = GameEvent::TrapTriggered {
            position: Position::new(1, 1),
            kind: TrapKind::Poison,
            damage: 5,
            remaining_hp: 96,
        };
        assert_eq!(
            event_message(&hit).as_deref(),
            Some("A poison trap hits you for 5 damage! HP: 96")
        );
        assert_eq!(
            event_message(&GameEvent::Descended { depth: 3 }).as_deref(),
            Some("You descend to depth 3.")
        );
        assert!(event_message(&GameEvent::PlayerMoved {
            from: Position::new(0, 0),
            to: Position::new(1, 0)
        })
        .is_none());
    }
}
