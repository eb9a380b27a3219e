//! # Traps
//!
//! Invisible floor traps that damage the player once.

use crate::game::{Position, WorldQuery};
use crate::generation::scatter_on_floor;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The kinds of trap a level can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapKind {
    Spike,
    Fire,
    Poison,
}

/// Fixed per-kind properties.
struct TrapProfile {
    damage: u32,
    debug_color: [u8; 4],
}

const SPIKE: TrapProfile = TrapProfile {
    damage: 10,
    debug_color: [255, 0, 0, 128],
};
const FIRE: TrapProfile = TrapProfile {
    damage: 15,
    debug_color: [255, 165, 0, 128],
};
const POISON: TrapProfile = TrapProfile {
    damage: 5,
    debug_color: [0, 255, 0, 128],
};

impl TrapKind {
    /// Every trap kind, in the order they are drawn from.
    pub const ALL: [TrapKind; 3] = [TrapKind::Spike, TrapKind::Fire, TrapKind::Poison];

    fn profile(self) -> &'static TrapProfile {
        match self {
            TrapKind::Spike => &SPIKE,
            TrapKind::Fire => &FIRE,
            TrapKind::Poison => &POISON,
        }
    }

    /// Damage dealt when the trap fires.
    pub fn damage(self) -> u32 {
        self.profile().damage
    }

    /// Translucent RGBA used when traps are revealed for debugging.
    pub fn debug_color(self) -> [u8; 4] {
        self.profile().debug_color
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            TrapKind::Spike => "spike",
            TrapKind::Fire => "fire",
            TrapKind::Poison => "poison",
        }
    }
}

/// A single trap on a floor cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trap {
    pub position: Position,
    pub kind: TrapKind,
    /// Inactive traps neither collide nor fire
    pub active: bool,
    /// Set the first time the trap fires
    pub triggered: bool,
}

impl Trap {
    /// Creates an armed trap.
    pub fn new(position: Position, kind: TrapKind) -> Self {
        Self {
            position,
            kind,
            active: true,
            triggered: false,
        }
    }

    /// Fires the trap. Returns its damage the first time, 0 afterwards.
    pub fn activate(&mut self) -> u32 {
        if self.active && !self.triggered {
            self.triggered = true;
            return self.kind.damage();
        }
        0
    }

    /// Disarms the trap permanently.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// All traps of the current level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapField {
    traps: Vec<Trap>,
}

impl TrapField {
    /// Creates an empty trap field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an explicit list of traps.
    pub fn from_traps(traps: Vec<Trap>) -> Self {
        Self { traps }
    }

    /// Replaces every trap with up to `count` new ones on free floor cells.
    ///
    /// Cells in `occupied` (spawn, stairs) never receive a trap. Returns the
    /// number of traps actually placed.
    pub fn generate(
        &mut self,
        query: &WorldQuery<'_>,
        rng: &mut StdRng,
        count: usize,
        occupied: &HashSet<Position>,
    ) -> usize {
        self.traps.clear();

        for position in scatter_on_floor(query, rng, count, occupied, None) {
            let kind = *TrapKind::ALL.choose(rng).unwrap_or(&TrapKind::Spike);
            self.traps.push(Trap::new(position, kind));
        }

        log::debug!("Placed {} of {} traps", self.traps.len(), count);
        self.traps.len()
    }

    /// Fires every trap on `position` and returns the total damage dealt.
    pub fn check(&mut self, position: Position) -> u32 {
        self.traps
            .iter_mut()
            .filter(|trap| trap.active && trap.position == position)
            .map(Trap::activate)
            .sum()
    }

    /// The trap on `position`, if any.
    pub fn trap_at(&self, position: Position) -> Option<&Trap> {
        self.traps.iter().find(|trap| trap.position == position)
    }

    /// All traps.
    pub fn traps(&self) -> &[Trap] {
        &self.traps
    }

    /// Number of traps.
    pub fn len(&self) -> usize {
        self.traps.len()
    }

    /// True when the level has no traps.
    pub fn is_empty(&self) -> bool {
        self.traps.is_empty()
    }

    /// Removes every trap.
    pub fn clear(&mut self) {
        self.traps.clear();
    }
}
