//! The owned game world and its phase machine.
//!
//! [`GameWorld`] holds every piece of mutable state for a session. Each frame
//! the caller feeds it the queued [`Command`]s and then the elapsed time; the
//! active phase's handler decides whether to stay or move on.

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::action::{Command, Direction};
use super::config::{CELL_SIZE, DYING_DURATION, PARTICLE_RADIUS};
use super::engine;
use super::snapshot::{ParticleView, Segment, Snapshot};
use super::state::{CollisionType, GameState};
use crate::fx::{CameraShake, Countdown, ParticleSystem, Reveal, ScorePulse};

/// Phase tag without the per-phase timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    Starting,
    Playing,
    Dying,
    GameOver,
}

/// Top-level game phase, owning the timers that only exist inside it
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Waiting for the first steer
    Starting,
    Playing,
    /// Death animation running; input is ignored
    Dying { timer: Countdown },
    /// Waiting for a restart while the banner grows in
    GameOver { reveal: Reveal },
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Starting => PhaseKind::Starting,
            Phase::Playing => PhaseKind::Playing,
            Phase::Dying { .. } => PhaseKind::Dying,
            Phase::GameOver { .. } => PhaseKind::GameOver,
        }
    }

    fn dying() -> Self {
        let mut timer = Countdown::new(DYING_DURATION);
        timer.start();
        Phase::Dying { timer }
    }

    fn game_over() -> Self {
        let mut reveal = Reveal::new();
        reveal.start();
        Phase::GameOver { reveal }
    }
}

pub struct GameWorld {
    state: GameState,
    phase: Phase,
    particles: ParticleSystem,
    shake: CameraShake,
    pulse: ScorePulse,
    last_collision: Option<CollisionType>,
    rng: StdRng,
}

impl GameWorld {
    /// A world seeded from OS entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// A reproducible world
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let state = engine::reset(&mut rng);
        Self {
            state,
            phase: Phase::Starting,
            particles: ParticleSystem::new(),
            shake: CameraShake::new(),
            pulse: ScorePulse::new(),
            last_collision: None,
            rng,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn last_collision(&self) -> Option<CollisionType> {
        self.last_collision
    }

    /// Apply one input event. Commands that make no sense in the current
    /// phase are dropped.
    pub fn handle_command(&mut self, command: Command) {
        match (self.phase.kind(), command) {
            (PhaseKind::Starting, Command::Steer(direction)) => self.start_playing(direction),
            (PhaseKind::Playing, Command::Steer(direction)) => self.queue_direction(direction),
            (PhaseKind::GameOver, Command::Restart) => self.restart(),
            _ => {}
        }
    }

    /// Advance everything by `dt` seconds of real time
    pub fn update(&mut self, dt: f32) {
        self.shake.update(dt, &mut self.rng);
        self.pulse.update(dt);

        let next = match self.phase.kind() {
            PhaseKind::Starting => None,
            PhaseKind::Playing => self.update_playing(dt),
            PhaseKind::Dying => self.update_dying(dt),
            PhaseKind::GameOver => self.update_game_over(dt),
        };

        if let Some(next) = next {
            self.enter(next);
        }
    }

    fn update_playing(&mut self, dt: f32) -> Option<Phase> {
        let tick_due = engine::accumulate(&mut self.state, dt);
        self.state.boundary.update(dt);

        if !tick_due {
            return None;
        }

        let result = engine::step(&mut self.state, &mut self.rng);
        if result.ate_food {
            self.pulse.trigger();
        }

        let collision = result.collision_type?;
        self.last_collision = Some(collision);
        self.particles.burst(self.state.snake.cells(), &mut self.rng);
        self.shake.trigger();
        Some(Phase::dying())
    }

    fn update_dying(&mut self, dt: f32) -> Option<Phase> {
        let Phase::Dying { timer } = &mut self.phase else {
            return None;
        };
        timer.tick(dt);
        self.particles.update(dt);

        if timer.is_running() {
            None
        } else {
            Some(Phase::game_over())
        }
    }

    fn update_game_over(&mut self, dt: f32) -> Option<Phase> {
        if let Phase::GameOver { reveal } = &mut self.phase {
            reveal.update(dt);
        }
        None
    }

    fn start_playing(&mut self, direction: Direction) {
        self.state.direction = Some(direction);
        self.state.pending_direction = Some(direction);
        // Force a tick on the first Playing frame
        self.state.accumulator = self.state.tick_interval;
        self.enter(Phase::Playing);
    }

    fn queue_direction(&mut self, direction: Direction) {
        if self
            .state
            .direction
            .is_none_or(|current| !current.is_opposite(direction))
        {
            self.state.pending_direction = Some(direction);
        }
    }

    fn restart(&mut self) {
        info!("Restarting after score {}", self.state.score);
        self.state = engine::reset(&mut self.rng);
        self.particles.clear();
        self.shake.reset();
        self.pulse.reset();
        self.last_collision = None;
        self.enter(Phase::Starting);
    }

    fn enter(&mut self, next: Phase) {
        info!("Phase {:?} -> {:?}", self.phase.kind(), next.kind());
        self.phase = next;
    }

    /// Render-ready view of the current frame
    pub fn snapshot(&self) -> Snapshot {
        let snake = self
            .state
            .snake
            .cells()
            .enumerate()
            .map(|(index, &cell)| Segment {
                cell,
                is_head: index == 0,
            })
            .collect();

        let particles = self
            .particles
            .iter()
            .map(|p| ParticleView {
                x: p.position.0,
                y: p.position.1,
                color: p.color.with_alpha(p.opacity()),
            })
            .collect();

        let game_over_scale = match &self.phase {
            Phase::GameOver { reveal } => reveal.scale(),
            _ => 0.0,
        };

        Snapshot {
            phase: self.phase.kind(),
            grid_width: self.state.grid_width,
            grid_height: self.state.grid_height,
            cell_size: CELL_SIZE,
            snake,
            food: self.state.food,
            walls: self.state.boundary.walls(),
            view_offset: self.shake.offset(),
            score: self.state.score,
            score_scale: self.pulse.scale(),
            particles,
            particle_radius: PARTICLE_RADIUS,
            game_over_scale,
            show_instructions: self.phase.kind() == PhaseKind::Starting,
            board_cleared: self.state.board_cleared,
            last_collision: self.last_collision,
            tick_interval: self.state.tick_interval,
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

impl Default for GameWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::boundary::Walls;
    use crate::game::config::{
        BODY_PARTICLES, HEAD_PARTICLES, INITIAL_TICK_INTERVAL, MIN_TICK_INTERVAL,
    };
    use crate::game::state::{Cell, Snake};

    const FRAME: f32 = 1.0 / 60.0;

    fn playing_world(cells: &[(i32, i32)], direction: Direction) -> GameWorld {
        let mut world = GameWorld::with_seed(11);
        world.handle_command(Command::Steer(direction));
        let state = world.state_mut();
        state.snake = Snake::from_cells(cells.iter().map(|&(x, y)| Cell::new(x, y)))
            .expect("test snake has cells");
        state.food = Some(Cell::new(0, 0));
        world
    }

    fn run_until(world: &mut GameWorld, kind: PhaseKind, max_frames: usize) {
        for _ in 0..max_frames {
            if world.phase().kind() == kind {
                return;
            }
            world.update(FRAME);
        }
        panic!("never reached {kind:?}, stuck in {:?}", world.phase().kind());
    }

    #[test]
    fn test_starts_waiting_for_input() {
        let mut world = GameWorld::with_seed(1);
        assert_eq!(world.phase().kind(), PhaseKind::Starting);

        world.update(1.0);
        assert_eq!(world.state().snake.head(), GameState::center());
        assert!(world.snapshot().show_instructions);

        world.handle_command(Command::Restart);
        assert_eq!(world.phase().kind(), PhaseKind::Starting);
    }

    #[test]
    fn test_first_steer_ticks_immediately() {
        let mut world = GameWorld::with_seed(2);
        world.handle_command(Command::Steer(Direction::Up));

        assert_eq!(world.phase().kind(), PhaseKind::Playing);
        assert_eq!(world.state().direction, Some(Direction::Up));

        world.update(0.001);
        assert_eq!(world.state().snake.head(), Cell::new(12, 9));
        assert!(!world.snapshot().show_instructions);
    }

    #[test]
    fn test_long_frame_runs_a_single_tick() {
        let mut world = playing_world(&[(5, 10)], Direction::Right);
        world.update(1.0);
        assert_eq!(world.state().snake.head(), Cell::new(6, 10));
        world.update(0.0);
        // Surplus time carried over releases the next tick
        assert_eq!(world.state().snake.head(), Cell::new(7, 10));
    }

    #[test]
    fn test_reversal_input_is_discarded() {
        let mut world = playing_world(&[(5, 10), (4, 10)], Direction::Right);
        world.update(FRAME);
        world.handle_command(Command::Steer(Direction::Left));
        assert_eq!(world.state().pending_direction, None);

        world.handle_command(Command::Steer(Direction::Down));
        assert_eq!(world.state().pending_direction, Some(Direction::Down));
    }

    #[test]
    fn test_eating_pulses_score() {
        let mut world = playing_world(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
        world.state_mut().food = Some(Cell::new(6, 5));

        world.update(FRAME);

        assert_eq!(world.state().score, 1);
        assert_eq!(world.state().snake.len(), 4);
        assert!(world.state().tick_interval < INITIAL_TICK_INTERVAL);
        world.update(0.1);
        assert!(world.snapshot().score_scale > 1.0);
    }

    #[test]
    fn test_collision_enters_dying_once() {
        let mut world = playing_world(&[(0, 5), (1, 5), (2, 5)], Direction::Left);

        world.update(FRAME);

        assert_eq!(world.phase().kind(), PhaseKind::Dying);
        assert_eq!(world.last_collision(), Some(CollisionType::Wall));
        assert_eq!(
            world.particles().len(),
            HEAD_PARTICLES + 2 * BODY_PARTICLES
        );

        // Shake kicks in from the next frame
        world.update(FRAME);
        assert_ne!(world.snapshot().view_offset, (0.0, 0.0));

        // Input is ignored while dying
        world.handle_command(Command::Steer(Direction::Up));
        world.handle_command(Command::Restart);
        assert_eq!(world.phase().kind(), PhaseKind::Dying);
    }

    #[test]
    fn test_boundary_collision_kills() {
        let mut world = playing_world(&[(3, 8), (4, 8)], Direction::Left);
        world.state_mut().boundary.set_walls(Walls {
            left: 3,
            right: 20,
            top: 0,
            bottom: 20,
        });

        world.update(FRAME);

        assert_eq!(world.phase().kind(), PhaseKind::Dying);
        assert_eq!(world.last_collision(), Some(CollisionType::Boundary));
    }

    #[test]
    fn test_dying_ends_in_game_over_without_particles() {
        let mut world = playing_world(&[(0, 5), (1, 5), (2, 5)], Direction::Left);
        world.update(FRAME);

        run_until(&mut world, PhaseKind::GameOver, 120);

        assert!(world.particles().is_empty());
        assert!(world.snapshot().particles.is_empty());
        assert_eq!(world.snapshot().view_offset, (0.0, 0.0));
    }

    #[test]
    fn test_game_over_reveal_scales_in() {
        let mut world = playing_world(&[(0, 5)], Direction::Left);
        world.update(FRAME);
        run_until(&mut world, PhaseKind::GameOver, 120);
        assert_eq!(world.snapshot().game_over_scale, 0.0);

        world.update(0.1);
        let partial = world.snapshot().game_over_scale;
        assert!(partial > 0.0 && partial < 1.0);

        world.update(1.0);
        world.update(FRAME);
        assert_eq!(world.snapshot().game_over_scale, 1.0);

        // Steering does nothing on the game-over screen
        world.handle_command(Command::Steer(Direction::Up));
        assert_eq!(world.phase().kind(), PhaseKind::GameOver);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut world = playing_world(&[(0, 5), (1, 5), (2, 5)], Direction::Left);
        {
            let state = world.state_mut();
            state.score = 7;
            state.tick_interval = MIN_TICK_INTERVAL;
            state.boundary.set_walls(Walls {
                left: 2,
                right: 22,
                top: 2,
                bottom: 18,
            });
        }
        world.update(FRAME);
        run_until(&mut world, PhaseKind::GameOver, 120);

        world.handle_command(Command::Restart);

        assert_eq!(world.phase().kind(), PhaseKind::Starting);
        let state = world.state();
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), GameState::center());
        assert_eq!(state.score, 0);
        assert_eq!(state.tick_interval, INITIAL_TICK_INTERVAL);
        assert_eq!(state.boundary.walls(), Walls::full(25, 20));
        assert_eq!(state.direction, None);
        assert!(world.particles().is_empty());
        assert_eq!(world.last_collision(), None);
        assert_eq!(world.snapshot().score_scale, 1.0);
    }

    #[test]
    fn test_second_game_over_reveals_from_zero() {
        let mut world = playing_world(&[(0, 5)], Direction::Left);
        world.update(FRAME);
        run_until(&mut world, PhaseKind::GameOver, 120);
        world.update(1.0);
        world.update(FRAME);
        assert_eq!(world.snapshot().game_over_scale, 1.0);

        world.handle_command(Command::Restart);
        world.handle_command(Command::Steer(Direction::Left));
        run_until(&mut world, PhaseKind::GameOver, 2000);

        assert_eq!(world.snapshot().game_over_scale, 0.0);
    }

    #[test]
    fn test_snapshot_marks_head() {
        let world = playing_world(&[(5, 5), (4, 5)], Direction::Right);
        let snapshot = world.snapshot();

        assert_eq!(snapshot.head(), Some(Cell::new(5, 5)));
        assert_eq!(snapshot.snake.iter().filter(|s| s.is_head).count(), 1);
        assert_eq!(snapshot.grid_width, 25);
        assert_eq!(snapshot.grid_height, 20);
        assert!(!snapshot.spikes_visible());
    }
}
