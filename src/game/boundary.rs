//! Spike walls that close in on the player when food is left uneaten.

use log::debug;
use serde::{Deserialize, Serialize};

use super::config::{GRID_HEIGHT, GRID_WIDTH, SPIKE_ADVANCE_INTERVAL, SPIKE_GRACE_PERIOD};
use super::state::Cell;

/// Current wall offsets. The legal area is `[left, right) x [top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walls {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Walls {
    /// Walls sitting on the grid edges
    pub fn full(width: i32, height: i32) -> Self {
        Self {
            left: 0,
            right: width,
            top: 0,
            bottom: height,
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.left && cell.x < self.right && cell.y >= self.top && cell.y < self.bottom
    }
}

/// Encroachment state: the walls plus the two timers driving them
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    walls: Walls,
    width: i32,
    height: i32,
    /// Time since the current food spawned
    grace_timer: f32,
    /// Time accumulated towards the next advance once the grace period is over
    advance_timer: f32,
}

impl Boundary {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            walls: Walls::full(width, height),
            width,
            height,
            grace_timer: 0.0,
            advance_timer: 0.0,
        }
    }

    pub fn walls(&self) -> Walls {
        self.walls
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.walls.contains(cell)
    }

    /// Back to the full grid with both timers cleared
    pub fn reset_on_food_spawn(&mut self) {
        self.walls = Walls::full(self.width, self.height);
        self.grace_timer = 0.0;
        self.advance_timer = 0.0;
    }

    /// Advance the timers by `dt` seconds.
    ///
    /// Returns true when the walls moved this call. At most one advance happens
    /// per call; any excess time is carried into the advance timer.
    pub fn update(&mut self, dt: f32) -> bool {
        self.grace_timer += dt;
        if self.grace_timer < SPIKE_GRACE_PERIOD {
            return false;
        }

        self.advance_timer += dt;
        if self.advance_timer < SPIKE_ADVANCE_INTERVAL {
            return false;
        }
        self.advance_timer -= SPIKE_ADVANCE_INTERVAL;

        let before = self.walls;
        self.step_walls();
        if self.walls != before {
            debug!("Spike walls advanced to {:?}", self.walls);
        }
        self.walls != before
    }

    /// Move each wall one cell inward unless it would meet its opposite
    fn step_walls(&mut self) {
        let w = &mut self.walls;
        if w.left < w.right - 1 {
            w.left += 1;
        }
        if w.right > w.left + 1 {
            w.right -= 1;
        }
        if w.top < w.bottom - 1 {
            w.top += 1;
        }
        if w.bottom > w.top + 1 {
            w.bottom -= 1;
        }
    }

    #[cfg(test)]
    pub(crate) fn set_walls(&mut self, walls: Walls) {
        self.walls = walls;
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }
}
