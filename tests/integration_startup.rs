//! Integration test to ensure a game can start up without a window.

use delve::{DelveResult, GameCompletionState, GameState, GenerationConfig, Player, Position, TileType};

#[test]
fn test_basic_startup() -> DelveResult<()> {
    let game_state = GameState::new(GenerationConfig::new(12345))?;

    assert_eq!(game_state.turn_number, 0);
    assert_eq!(game_state.world.depth(), 1);
    assert_eq!(game_state.completion_state, GameCompletionState::InProgress);

    // The player stands on the first room's center.
    let spawn = game_state.world.spawn().expect("default config places rooms");
    assert_eq!(game_state.player.position, spawn);
    assert_eq!(game_state.world.rooms()[0].center(), spawn);
    assert_eq!(game_state.world.grid().get(spawn), Some(TileType::Floor));

    // Traps never sit under the player or the stairs.
    assert!(game_state.traps.trap_at(spawn).is_none());
    if let Some(stairs) = game_state.world.stairs() {
        assert!(game_state.traps.trap_at(stairs).is_none());
    }
    assert!(game_state.traps.len() <= 30);

    // Enemies stay out of the spawn room.
    let first_room = &game_state.world.rooms()[0];
    assert!(game_state
        .enemies
        .iter()
        .all(|enemy| !first_room.contains(enemy.position)));

    Ok(())
}

#[test]
fn test_player_can_be_created() {
    let player = Player::new(Position::new(5, 5));
    assert_eq!(player.position, Position::new(5, 5));
    assert_eq!(player.stats.level, 1);
    assert!(!player.stats.is_dead());
}

#[test]
fn test_invalid_config_fails_startup() {
    let config = GenerationConfig {
        room_min_size: 9,
        room_max_size: 3,
        ..GenerationConfig::new(1)
    };
    assert!(GameState::new(config).is_err());
}
