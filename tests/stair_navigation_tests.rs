//! Integration tests for walking to the stairs and descending.

use delve::{shortest_path, Direction, GameEvent, GameState, GenerationConfig, PlayerInput};

/// Walks the player along the shortest path to the stairs.
///
/// Enemies and traps are cleared so the walk is never interrupted.
fn walk_to_stairs(state: &mut GameState) -> Vec<GameEvent> {
    state.enemies.clear();
    state.traps.clear();

    let stairs = state.world.stairs().expect("level has stairs");
    let path = shortest_path(&state.world.query(), state.player.position, stairs)
        .expect("stairs are reachable from the spawn");

    let mut events = Vec::new();
    for step in path.windows(2) {
        let direction = Direction::from_delta(step[1] - step[0]).expect("path steps are cardinal");
        events.extend(state.handle_input(PlayerInput::Move(direction)).unwrap());
    }
    events
}

#[test]
fn test_stairs_take_player_down() {
    let mut state = GameState::new(GenerationConfig::new(98765)).unwrap();
    let events = walk_to_stairs(&mut state);

    assert_eq!(events.last(), Some(&GameEvent::Descended { depth: 2 }));
    assert_eq!(state.world.depth(), 2);
    assert_eq!(Some(state.player.position), state.world.spawn());
}

#[test]
fn test_descending_several_levels() {
    let mut state = GameState::new(GenerationConfig::new(54321)).unwrap();

    for _ in 0..20 {
        if state.world.depth() == 5 {
            break;
        }
        if state.world.stairs().is_none() {
            // The last room had no free cell; try a fresh level.
            state.handle_input(PlayerInput::Regenerate).unwrap();
            continue;
        }

        let depth = state.world.depth();
        walk_to_stairs(&mut state);
        assert_eq!(state.world.depth(), depth + 1);
        assert!(state.world.validate().is_ok());
    }

    assert_eq!(state.world.depth(), 5);
}

#[test]
fn test_turns_count_steps() {
    let mut state = GameState::new(GenerationConfig::new(2024)).unwrap();
    let start = state.player.position;
    let stairs = state.world.stairs().unwrap();
    let steps = shortest_path(&state.world.query(), start, stairs).unwrap().len() - 1;

    walk_to_stairs(&mut state);
    assert_eq!(state.turn_number, steps as u64);
}

#[test]
fn test_stairs_sit_in_last_room_on_every_level() {
    let mut state = GameState::new(GenerationConfig::new(777)).unwrap();
    for _ in 0..10 {
        if let Some(stairs) = state.world.stairs() {
            let last = state.world.rooms().last().unwrap();
            assert!(last.contains(stairs));
            assert_ne!(Some(stairs), state.world.spawn());
        }
        state.world.descend();
    }
}
