//! # Scene Management System
//!
//! Drives the macroquad frame loop through the playing and game-over scenes.

use crate::{
    event_message, GameCompletionState, GameState, InputHandler, MacroquadDisplay, PlayerInput,
    DelveResult,
};
use macroquad::prelude::next_frame;

/// Represents the current scene in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneType {
    /// Normal gameplay
    Playing,
    /// End screen after the player died
    GameOver(GameCompletionState),
}

/// What the frame loop should do after a scene update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneAction {
    Continue,
    Exit,
}

/// The scene for a game state.
pub fn scene_for(state: &GameState) -> SceneType {
    if state.is_game_ended() {
        SceneType::GameOver(state.completion_state)
    } else {
        SceneType::Playing
    }
}

/// The main scene manager that coordinates all game scenes
pub struct SceneManager {
    current_scene: SceneType,
    game_state: GameState,
    display: MacroquadDisplay,
    input_handler: InputHandler,
}

impl SceneManager {
    pub fn new(game_state: GameState, display: MacroquadDisplay, input_handler: InputHandler) -> Self {
        let mut display = display;
        display.add_message("Welcome to Delve!".to_string());
        display.add_message("Find the stairs. Mind the traps.".to_string());

        Self {
            current_scene: scene_for(&game_state),
            game_state,
            display,
            input_handler,
        }
    }

    /// Runs the main scene loop until the game exits
    pub async fn run(&mut self) -> DelveResult<()> {
        loop {
            let action = match self.current_scene {
                SceneType::Playing => self.update_playing_scene()?,
                SceneType::GameOver(_) => self.update_game_over_scene()?,
            };
            if action == SceneAction::Exit {
                break;
            }
            next_frame().await;
        }
        Ok(())
    }

    fn update_playing_scene(&mut self) -> DelveResult<SceneAction> {
        if let Some(input) = self.input_handler.get_input() {
            match input {
                PlayerInput::Quit => return Ok(SceneAction::Exit),
                PlayerInput::Help => self.display.show_help = !self.display.show_help,
                _ => self.apply(input)?,
            }
        }

        self.current_scene = scene_for(&self.game_state);
        self.display.render_game(&self.game_state);
        Ok(SceneAction::Continue)
    }

    fn update_game_over_scene(&mut self) -> DelveResult<SceneAction> {
        self.display.render_game_over(&self.game_state);

        match self.input_handler.get_input() {
            Some(PlayerInput::Quit) => return Ok(SceneAction::Exit),
            Some(PlayerInput::NewGame) => {
                self.apply(PlayerInput::NewGame)?;
                self.current_scene = scene_for(&self.game_state);
            }
            _ => {}
        }
        Ok(SceneAction::Continue)
    }

    /// Feeds an input to the game state and logs the resulting messages.
    fn apply(&mut self, input: PlayerInput) -> DelveResult<()> {
        for event in self.game_state.handle_input(input)? {
            log::debug!("{:?}", event);
            if let Some(message) = event_message(&event) {
                self.display.add_message(message);
            }
        }
        Ok(())
    }
}
