//! Platform abstraction layer
//!
//! The game loop is written against the `Frontend` trait, which supplies
//! the external primitives:
//! - Frame time
//! - Keyboard state
//! - Presenting a finished scene

pub mod clock;
pub mod headless;

pub use clock::FixedTimestep;
pub use headless::HeadlessFrontend;

use serde::Serialize;

use crate::highscores::{HighScoreEntry, HighScores};
use crate::renderer::Scene;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Window, input and clock provider
pub trait Frontend {
    /// Seconds since the previous frame
    fn frame_delta(&mut self) -> f32;

    /// Sample input for this frame; `None` means the window was closed
    fn poll_input(&mut self, state: &GameState) -> Option<TickInput>;

    fn present(&mut self, scene: &Scene);
}

/// Outcome of one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    pub session: u32,
    pub score: u64,
    pub level: u32,
    pub ticks: u64,
    /// False if the loop ended before the session hit game over
    pub completed: bool,
}

/// Everything a run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub sessions: Vec<SessionRecord>,
    pub frames: u64,
    pub ticks: u64,
    pub high_scores: HighScores,
}

impl RunSummary {
    fn new(seed: u64) -> Self {
        Self {
            seed,
            sessions: Vec::new(),
            frames: 0,
            ticks: 0,
            high_scores: HighScores::new(),
        }
    }

    pub fn best_score(&self) -> Option<u64> {
        self.sessions.iter().map(|s| s.score).max()
    }

    fn record_event(&mut self, event: &GameEvent, session: u32) {
        log::debug!("[session {session}] {event:?}");
        if let GameEvent::GameOver {
            score,
            level,
            ticks,
        } = *event
        {
            self.sessions.push(SessionRecord {
                session,
                score,
                level,
                ticks,
                completed: true,
            });
            let entry = HighScoreEntry {
                score,
                level,
                ticks,
                session,
            };
            if let Some(rank) = self.high_scores.add_score(entry) {
                log::info!("🏆 Session {session} placed #{rank} with {score} points");
            }
        }
    }
}

/// Drive poll -> tick(s) -> render until the player quits from the game
/// over screen or the frontend closes.
pub fn run<F: Frontend + ?Sized>(state: &mut GameState, frontend: &mut F) -> RunSummary {
    let mut clock = FixedTimestep::from_config(state.config());
    let dt = clock.step();
    let mut summary = RunSummary::new(state.seed());
    // Edge-triggered restart survives frames that run zero steps
    let mut pending = TickInput::default();

    log::info!("Run started (seed {:#x}, dt {:.4}s)", state.seed(), dt);

    loop {
        let Some(input) = frontend.poll_input(state) else {
            log::info!("Frontend closed");
            break;
        };
        if input.quit && state.is_game_over() {
            log::info!("Quit from game over screen");
            break;
        }

        pending.left = input.left;
        pending.right = input.right;
        pending.idle_mode = input.idle_mode;
        pending.restart |= input.restart;

        let steps = clock.advance(frontend.frame_delta());
        for _ in 0..steps {
            tick(state, &pending, dt);
            pending.restart = false;
            summary.ticks += 1;

            // A tick never crosses sessions, so every event belongs to the current one
            let session = state.session();
            for event in state.drain_events() {
                summary.record_event(&event, session);
            }
        }

        frontend.present(&Scene::build(state));
        summary.frames += 1;
    }

    if !state.is_game_over() && state.time_ticks() > 0 {
        summary.sessions.push(SessionRecord {
            session: state.session(),
            score: state.score(),
            level: state.level(),
            ticks: state.time_ticks(),
            completed: false,
        });
    }

    log::info!(
        "Run finished: {} sessions, {} ticks, best score {}",
        summary.sessions.len(),
        summary.ticks,
        summary.best_score().unwrap_or(0)
    );
    summary
}
