//! # Input Module
//!
//! Keyboard bindings and their translation into player inputs.

use crate::game::Direction;
use macroquad::prelude::{is_key_pressed, KeyCode};

/// Fixed key binding table, checked in order every frame.
pub const KEY_BINDINGS: [(KeyCode, PlayerInput); 13] = [
    (KeyCode::Escape, PlayerInput::Quit),
    (KeyCode::Up, PlayerInput::Move(Direction::North)),
    (KeyCode::Down, PlayerInput::Move(Direction::South)),
    (KeyCode::Left, PlayerInput::Move(Direction::West)),
    (KeyCode::Right, PlayerInput::Move(Direction::East)),
    (KeyCode::W, PlayerInput::Move(Direction::North)),
    (KeyCode::S, PlayerInput::Move(Direction::South)),
    (KeyCode::A, PlayerInput::Move(Direction::West)),
    (KeyCode::D, PlayerInput::Move(Direction::East)),
    (KeyCode::Space, PlayerInput::Regenerate),
    (KeyCode::T, PlayerInput::ToggleTraps),
    (KeyCode::F1, PlayerInput::Help),
    (KeyCode::N, PlayerInput::NewGame),
];

/// Player input types that can be processed by the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move one cell in a cardinal direction
    Move(Direction),
    /// Rebuild the current level in place
    Regenerate,
    /// Show or hide trap markers
    ToggleTraps,
    /// Toggle the help overlay
    Help,
    /// Quit the game
    Quit,
    /// Start over after the game has ended
    NewGame,
}

/// Looks up the input bound to `key`.
///
/// # Examples
///
/// ```
/// use delve::{input_for_key, Direction, PlayerInput};
/// use macroquad::prelude::KeyCode;
///
/// assert_eq!(input_for_key(KeyCode::A), Some(PlayerInput::Move(Direction::West)));
/// assert_eq!(input_for_key(KeyCode::Q), None);
/// ```
pub fn input_for_key(key: KeyCode) -> Option<PlayerInput> {
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, input)| *input)
}

/// Polls macroquad's keyboard state against the binding table.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// The first bound key pressed this frame, if any.
    ///
    /// Must be called from inside the macroquad frame loop.
    pub fn get_input(&self) -> Option<PlayerInput> {
        KEY_BINDINGS
            .iter()
            .find(|(key, _)| is_key_pressed(*key))
            .map(|(_, input)| *input)
    }
}
