//! # Random Floor Placement
//!
//! Rejection sampling of free floor cells for traps, stairs and other props.

use crate::game::{Position, WorldQuery};
use crate::generation::Room;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashSet;

/// Sampling attempts granted per requested position.
pub const ATTEMPTS_PER_PLACEMENT: usize = 10;

/// Picks up to `count` distinct walkable cells that are not in `occupied`.
///
/// Cells are drawn uniformly from `area` (the whole grid when `None`) and
/// rejected until enough free floor is found or `count * 10` draws have been
/// spent. Running out of attempts is not an error: the caller simply gets
/// fewer positions than requested.
pub fn scatter_on_floor(
    query: &WorldQuery<'_>,
    rng: &mut StdRng,
    count: usize,
    occupied: &HashSet<Position>,
    area: Option<&Room>,
) -> Vec<Position> {
    let (min_x, min_y, max_x, max_y) = match area {
        Some(room) => (room.left(), room.top(), room.right(), room.bottom()),
        None => (0, 0, query.width() as i32, query.height() as i32),
    };

    let mut placed = Vec::with_capacity(count);
    if count == 0 || min_x >= max_x || min_y >= max_y {
        return placed;
    }

    let mut taken: HashSet<Position> = HashSet::new();
    let max_attempts = count.saturating_mul(ATTEMPTS_PER_PLACEMENT);
    let mut attempts = 0;

    while placed.len() < count && attempts < max_attempts {
        attempts += 1;

        let pos = Position::new(rng.gen_range(min_x..max_x), rng.gen_range(min_y..max_y));
        if !query.is_walkable_at(pos) || occupied.contains(&pos) || taken.contains(&pos) {
            continue;
        }

        taken.insert(pos);
        placed.push(pos);
    }

    if placed.len() < count {
        log::debug!(
            "Placement saturated: {} of {} positions after {} attempts",
            placed.len(),
            count,
            attempts
        );
    }

    placed
}

/// Picks a single free floor cell inside `room`.
pub fn pick_floor_in_room(
    query: &WorldQuery<'_>,
    rng: &mut StdRng,
    room: &Room,
    occupied: &HashSet<Position>,
) -> Option<Position> {
    scatter_on_floor(query, rng, 1, occupied, Some(room)).pop()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Grid, TileType};
    use rand::SeedableRng;

    fn grid_with_floor(cells: &[(i32, i32)]) -> Grid {
        let mut grid = Grid::new(20, 20, 48).unwrap();
        for &(x, y) in cells {
            grid.set(Position::new(x, y), TileType::Floor);
        }
        grid
    }

    #[test]
    fn test_placements_are_unique_free_floor() {
        let mut grid = Grid::new(20, 20, 48).unwrap();
        let room = Room::new(0, Position::new(2, 2), 10, 10);
        for pos in room.all_positions() {
            grid.set(pos, TileType::Floor);
        }
        let query = WorldQuery::new(&grid);
        let mut rng = StdRng::seed_from_u64(7);
        let occupied: HashSet<_> = [room.center()].into_iter().collect();

        let placed = scatter_on_floor(&query, &mut rng, 20, &occupied, None);

        let unique: HashSet<_> = placed.iter().copied().collect();
        assert_eq!(unique.len(), placed.len());
        assert!(placed.iter().all(|&pos| query.is_walkable_at(pos)));
        assert!(!placed.contains(&room.center()));
    }

    #[test]
    fn test_saturation_returns_fewer_positions() {
        let grid = grid_with_floor(&[(3, 3), (4, 3), (5, 3)]);
        let query = WorldQuery::new(&grid);
        let mut rng = StdRng::seed_from_u64(99);

        let placed = scatter_on_floor(&query, &mut rng, 50, &HashSet::new(), None);
        assert!(placed.len() <= 3);
    }

    #[test]
    fn test_no_floor_terminates_empty() {
        let grid = Grid::new(20, 20, 48).unwrap();
        let query = WorldQuery::new(&grid);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(scatter_on_floor(&query, &mut rng, 10, &HashSet::new(), None).is_empty());
        assert!(scatter_on_floor(&query, &mut rng, 0, &HashSet::new(), None).is_empty());
    }

    #[test]
    fn test_room_area_restricts_sampling() {
        let mut grid = Grid::new(20, 20, 48).unwrap();
        grid.fill_all(TileType::Floor);
        let query = WorldQuery::new(&grid);
        let room = Room::new(0, Position::new(12, 12), 3, 3);
        let mut rng = StdRng::seed_from_u64(3);

        let placed = scatter_on_floor(&query, &mut rng, 5, &HashSet::new(), Some(&room));
        assert!(!placed.is_empty());
        assert!(placed.iter().all(|&pos| room.contains(pos)));

        let single = pick_floor_in_room(&query, &mut rng, &room, &HashSet::new());
        assert!(single.map(|pos| room.contains(pos)).unwrap_or(false));
    }

    #[test]
    fn test_fully_occupied_room_yields_none() {
        let room = Room::new(0, Position::new(1, 1), 1, 1);
        let grid = grid_with_floor(&[(1, 1)]);
        let query = WorldQuery::new(&grid);
        let mut rng = StdRng::seed_from_u64(5);
        let occupied: HashSet<_> = [Position::new(1, 1)].into_iter().collect();

        assert_eq!(pick_floor_in_room(&query, &mut rng, &room, &occupied), None);
    }
}
