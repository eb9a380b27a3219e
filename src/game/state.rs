//! # Game State Module
//!
//! Central game state and the turn logic that ties player input to the world.
//!
//! A turn starts with a successful player step. Traps on the destination
//! fire, the stairs take the player one level deeper, and otherwise every
//! enemy gets one step towards the player.

use crate::game::{Direction, Enemy, Player, Position, TrapField, TrapKind, World};
use crate::generation::GenerationConfig;
use crate::input::PlayerInput;
use crate::{DelveError, DelveResult};
use std::collections::HashSet;

/// Game completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCompletionState {
    /// Game is still in progress
    InProgress,
    /// Player health reached zero
    Died,
}

/// Something that happened while processing an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    PlayerMoved { from: Position, to: Position },
    MoveBlocked { direction: Direction },
    TrapTriggered {
        position: Position,
        kind: TrapKind,
        damage: u32,
        remaining_hp: u32,
    },
    PlayerDied,
    Descended { depth: u32 },
    LevelRegenerated,
    EnemyMoved { from: Position, to: Position },
    TrapVisibilityChanged { visible: bool },
    GameRestarted,
}

/// Central game state containing the world and everything placed on it.
#[derive(Debug, Clone)]
pub struct GameState {
    /// The current level and its generator
    pub world: World,
    pub player: Player,
    pub traps: TrapField,
    pub enemies: Vec<Enemy>,
    /// Debug switch that draws the otherwise invisible traps
    pub show_traps: bool,
    /// Number of player steps taken
    pub turn_number: u64,
    pub completion_state: GameCompletionState,
}

impl GameState {
    /// Creates a new game with a freshly generated first level.
    ///
    /// A grid too small to hold any room generates as solid wall, leaving the
    /// player nowhere to stand; that is reported as
    /// [`DelveError::InvalidState`] rather than starting an unplayable game.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{GameState, GenerationConfig};
    ///
    /// let state = GameState::new(GenerationConfig::for_testing(12345)).unwrap();
    /// assert_eq!(state.turn_number, 0);
    /// assert_eq!(Some(state.player.position), state.world.spawn());
    /// ```
    pub fn new(config: GenerationConfig) -> DelveResult<Self> {
        let world = World::new(config)?;

        let mut state = Self {
            world,
            player: Player::new(Position::origin()),
            traps: TrapField::new(),
            enemies: Vec::new(),
            show_traps: false,
            turn_number: 0,
            completion_state: GameCompletionState::InProgress,
        };
        state.populate_level()?;
        Ok(state)
    }

    /// Puts the player on the spawn cell and scatters traps and enemies.
    fn populate_level(&mut self) -> DelveResult<()> {
        let spawn = self
            .world
            .spawn()
            .or_else(|| self.world.grid().floor_positions().next())
            .ok_or_else(|| DelveError::InvalidState("level has no floor to spawn on".to_string()))?;
        self.player.teleport(spawn);

        let mut occupied: HashSet<Position> = HashSet::new();
        occupied.insert(spawn);
        occupied.extend(self.world.stairs());

        let trap_count = self.world.config().trap_count as usize;
        let per_room = self.world.config().enemies_per_room;

        let (query, layout, rng) = self.world.placement_context();
        self.traps.generate(&query, rng, trap_count, &occupied);

        let mut enemies = Enemy::spawn_in_rooms(&layout.rooms, per_room, rng);
        enemies.retain(|enemy| !occupied.contains(&enemy.position));
        self.enemies = enemies;

        log::info!(
            "Depth {}: {} rooms, {} traps, {} enemies",
            self.world.depth(),
            self.world.rooms().len(),
            self.traps.len(),
            self.enemies.len()
        );
        Ok(())
    }

    /// Applies one player input and reports what happened.
    ///
    /// Once the player has died only [`PlayerInput::NewGame`] has an effect.
    pub fn handle_input(&mut self, input: PlayerInput) -> DelveResult<Vec<GameEvent>> {
        if self.is_game_ended() {
            return match input {
                PlayerInput::NewGame => self.restart(),
                _ => Ok(Vec::new()),
            };
        }

        match input {
            PlayerInput::Move(direction) => self.move_player(direction),
            PlayerInput::Regenerate => {
                self.world.regenerate();
                self.populate_level()?;
                Ok(vec![GameEvent::LevelRegenerated])
            }
            PlayerInput::ToggleTraps => {
                self.show_traps = !self.show_traps;
                Ok(vec![GameEvent::TrapVisibilityChanged {
                    visible: self.show_traps,
                }])
            }
            PlayerInput::Help | PlayerInput::Quit | PlayerInput::NewGame => Ok(Vec::new()),
        }
    }

    fn move_player(&mut self, direction: Direction) -> DelveResult<Vec<GameEvent>> {
        let from = self.player.position;
        let blocked = self.enemy_positions();

        if !self
            .player
            .try_move(direction, &self.world.query(), &blocked)
        {
            return Ok(vec![GameEvent::MoveBlocked { direction }]);
        }

        self.turn_number += 1;
        let to = self.player.position;
        let mut events = vec![GameEvent::PlayerMoved { from, to }];

        let kind = self.traps.trap_at(to).map(|trap| trap.kind);
        let damage = self.traps.check(to);
        if let (Some(kind), true) = (kind, damage > 0) {
            let remaining_hp = self.player.stats.take_damage(damage);
            events.push(GameEvent::TrapTriggered {
                position: to,
                kind,
                damage,
                remaining_hp,
            });

            if self.player.stats.is_dead() {
                log::info!("Player died on turn {}", self.turn_number);
                self.completion_state = GameCompletionState::Died;
                events.push(GameEvent::PlayerDied);
                return Ok(events);
            }
        }

        if self.world.stairs() == Some(to) {
            self.world.descend();
            self.populate_level()?;
            events.push(GameEvent::Descended {
                depth: self.world.depth(),
            });
            return Ok(events);
        }

        events.extend(self.enemy_turn());
        Ok(events)
    }

    /// Every enemy takes one step towards the player, in spawn order.
    fn enemy_turn(&mut self) -> Vec<GameEvent> {
        let target = self.player.position;
        let mut events = Vec::new();

        for i in 0..self.enemies.len() {
            let mut occupied: HashSet<Position> = self
                .enemies
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, e)| e.position)
                .collect();
            occupied.insert(target);

            let query = self.world.query();
            let enemy = &mut self.enemies[i];
            let from = enemy.position;
            if enemy.step_towards(target, &query, &occupied) {
                events.push(GameEvent::EnemyMoved {
                    from,
                    to: enemy.position,
                });
            }
        }

        events
    }

    fn restart(&mut self) -> DelveResult<Vec<GameEvent>> {
        self.world.restart();
        self.player = Player::new(Position::origin());
        self.show_traps = false;
        self.turn_number = 0;
        self.completion_state = GameCompletionState::InProgress;
        self.populate_level()?;
        Ok(vec![GameEvent::GameRestarted])
    }

    pub fn is_game_ended(&self) -> bool {
        self.completion_state != GameCompletionState::InProgress
    }

    /// Cells currently holding an enemy.
    pub fn enemy_positions(&self) -> HashSet<Position> {
        self.enemies.iter().map(|e| e.position).collect()
    }
}
