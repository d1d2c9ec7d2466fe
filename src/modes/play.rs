use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, Write, stderr};
use std::time::Instant;
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{Command, GameWorld, PhaseKind};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::settings::Settings;

/// Wall-clock delta time between frames
struct FrameClock {
    last: Instant,
}

impl FrameClock {
    fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds since the previous call
    fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

pub struct PlayMode {
    world: GameWorld,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    settings: Settings,
    /// Commands received since the last frame
    commands: Vec<Command>,
    last_phase: PhaseKind,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(settings: Settings) -> Self {
        let world = match settings.seed {
            Some(seed) => GameWorld::with_seed(seed),
            None => GameWorld::new(),
        };

        Self {
            last_phase: world.phase().kind(),
            world,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            settings,
            commands: Vec::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = match Self::setup_terminal() {
            Ok(terminal) => terminal,
            Err(err) => {
                restore_terminal(&mut stderr());
                return Err(err);
            }
        };

        let result = self.run_game_loop(&mut terminal).await;
        let cleanup = self.cleanup_terminal(&mut terminal);

        // Loop errors are returned first; a cleanup error behind one is only logged
        if let (Err(_), Err(err)) = (&result, &cleanup) {
            warn!("Terminal cleanup failed: {err:#}");
        }
        result.and(cleanup)
    }

    /// Alternate screen and ratatui terminal; raw mode must already be on
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(terminal)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(self.settings.frame_interval());
        // A slow frame must not be followed by a burst of catch-up frames
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut clock = FrameClock::new();

        info!(
            "Game loop running at {} fps ({:?} per frame)",
            self.settings.fps,
            self.settings.frame_interval()
        );

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => warn!("Terminal event error: {err}"),
                        None => self.should_quit = true,
                    }
                }

                // Simulate and render one frame
                _ = frame_timer.tick() => {
                    self.frame(clock.tick());
                    let snapshot = self.world.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("Quit requested");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Game(command) => self.commands.push(command),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    /// Drain queued input, then advance the world by `dt`
    fn frame(&mut self, dt: f32) {
        for command in self.commands.drain(..) {
            self.world.handle_command(command);
            Self::track_phase(&mut self.last_phase, &self.world, &mut self.metrics);
        }

        self.world.update(dt);
        Self::track_phase(&mut self.last_phase, &self.world, &mut self.metrics);
        self.metrics.update();
    }

    fn track_phase(last: &mut PhaseKind, world: &GameWorld, metrics: &mut GameMetrics) {
        let current = world.phase().kind();
        if current == *last {
            return;
        }

        match current {
            PhaseKind::Playing => metrics.on_run_start(),
            PhaseKind::Dying => metrics.on_run_over(world.state().score),
            PhaseKind::Starting | PhaseKind::GameOver => {}
        }
        *last = current;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Best-effort undo of a partial terminal setup
fn restore_terminal<W: Write>(out: &mut W) {
    if let Err(err) = disable_raw_mode() {
        warn!("Failed to disable raw mode: {err}");
    }
    if let Err(err) = execute!(out, LeaveAlternateScreen, Show) {
        warn!("Failed to leave alternate screen: {err}");
    }
}
