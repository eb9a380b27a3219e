//! Performance tests for generation and tile planning

use std::time::Instant;
use delve::{
    Camera, DelveResult, Direction, GameState, GenerationConfig, PlayerInput, Viewport,
    ViewportRenderer,
};

#[test]
fn test_viewport_plan_performance() -> DelveResult<()> {
    let state = GameState::new(GenerationConfig::new(12345))?;
    let grid = state.world.grid();
    let viewport = Viewport::new(1000, 700);

    let mut camera = Camera::new();
    camera.follow(state.player.position, grid.tile_size(), viewport.size(), grid.pixel_size());

    let start = Instant::now();
    let iterations = 200;
    let mut drawn = 0;

    for _ in 0..iterations {
        drawn += ViewportRenderer::plan(grid, camera, viewport).len();
    }

    let elapsed = start.elapsed();
    let avg_frame_time = elapsed / iterations;

    println!("Average tile planning time: {:?}", avg_frame_time);
    println!("Tiles planned per frame: {}", drawn / iterations as usize);

    // Planning alone must leave most of a 60 FPS frame for drawing.
    assert!(
        avg_frame_time.as_millis() < 8,
        "Tile planning too slow: {:?}",
        avg_frame_time
    );

    Ok(())
}

#[test]
fn test_regeneration_performance() -> DelveResult<()> {
    let mut state = GameState::new(GenerationConfig::new(54321))?;

    let start = Instant::now();
    let iterations = 50;

    for _ in 0..iterations {
        state.handle_input(PlayerInput::Regenerate)?;
    }

    let elapsed = start.elapsed();
    let avg = elapsed / iterations;
    println!("Average regeneration time: {:?}", avg);

    // Regeneration happens on a key press and must not stall a frame noticeably.
    assert!(avg.as_millis() < 50, "Regeneration too slow: {:?}", avg);

    Ok(())
}

#[test]
fn test_turn_processing_performance() -> DelveResult<()> {
    let config = GenerationConfig {
        enemies_per_room: 4,
        trap_count: 0,
        ..GenerationConfig::new(999)
    };
    let mut state = GameState::new(config)?;

    let start = Instant::now();
    let mut turns = 0;
    for direction in Direction::all().into_iter().cycle().take(400) {
        if state.is_game_ended() {
            break;
        }
        state.handle_input(PlayerInput::Move(direction))?;
        turns += 1;
    }

    let elapsed = start.elapsed();
    println!("Processed {} turns in {:?}", turns, elapsed);
    assert!(elapsed.as_millis() < 1000, "Turns too slow: {:?}", elapsed);

    Ok(())
}
