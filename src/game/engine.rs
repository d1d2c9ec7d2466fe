//! Movement and collision: one grid tick at a time.

use log::{debug, info};
use rand::Rng;
use rand::seq::SliceRandom;

use super::config::{MIN_TICK_INTERVAL, TICK_INTERVAL_DECREMENT};
use super::state::{Cell, CollisionType, GameState};

/// Outcome of a grid tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepInfo {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// What the head ran into; the run is over when set
    pub collision_type: Option<CollisionType>,
}

/// Start a new run: centered one-cell snake, fresh food, full boundary
pub fn reset<R: Rng + ?Sized>(rng: &mut R) -> GameState {
    let mut state = GameState::new(None);
    spawn_food(&mut state, rng);
    state
}

/// Add `dt` to the tick accumulator and report whether a tick is due.
///
/// At most one tick is released per call; surplus time stays in the
/// accumulator for the following frames.
pub fn accumulate(state: &mut GameState, dt: f32) -> bool {
    state.accumulator += dt;
    if state.accumulator >= state.tick_interval {
        state.accumulator -= state.tick_interval;
        true
    } else {
        false
    }
}

/// Execute one grid tick
pub fn step<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> StepInfo {
    // Commit the pending heading unless it reverses the current one
    if let Some(next) = state.pending_direction.take() {
        if state.direction.is_none_or(|current| !current.is_opposite(next)) {
            state.direction = Some(next);
        }
    }

    let Some(direction) = state.direction else {
        return StepInfo::default();
    };

    let new_head = state.snake.head().moved_in_direction(direction);

    if let Some(collision_type) = check_collision(state, new_head) {
        info!("Collision ({collision_type:?}) at {new_head:?}, score {}", state.score);
        return StepInfo {
            ate_food: false,
            collision_type: Some(collision_type),
        };
    }

    state.snake.push_head(new_head);
    let ate_food = state.food == Some(new_head);

    if ate_food {
        state.score += 1;
        state.tick_interval = (state.tick_interval - TICK_INTERVAL_DECREMENT).max(MIN_TICK_INTERVAL);
        spawn_food(state, rng);
        debug!(
            "Food eaten, score {} length {} interval {:.3}s",
            state.score,
            state.snake.len(),
            state.tick_interval
        );
    } else {
        state.snake.pop_tail();
    }

    StepInfo {
        ate_food,
        collision_type: None,
    }
}

/// Check if the new head position causes a collision.
///
/// Grid edges are checked first, then the spike walls, then the body. The
/// body check includes the tail, which has not been removed yet.
pub fn check_collision(state: &GameState, cell: Cell) -> Option<CollisionType> {
    if !state.is_in_bounds(cell) {
        return Some(CollisionType::Wall);
    }

    if !state.boundary.contains(cell) {
        return Some(CollisionType::Boundary);
    }

    if state.is_occupied_by_snake(cell) {
        return Some(CollisionType::SelfCollision);
    }

    None
}

/// Place food on a uniformly chosen free cell and reset the spike walls.
///
/// Leaves `food` empty and flags the board as cleared when no cell is free.
pub fn spawn_food<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> Option<Cell> {
    let free = state.free_cells();
    state.food = free.choose(rng).copied();

    if state.food.is_none() {
        state.board_cleared = true;
        info!("Board cleared with score {}", state.score);
    }

    state.boundary.reset_on_food_spawn();
    state.food
}
