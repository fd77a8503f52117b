//! Headless frontend: the autopilot plays a fixed number of sessions
//!
//! Used by the native binary and by tests. Frames are exactly one step
//! long, so a run is fully determined by config and seed.

use super::Frontend;
use crate::renderer::Scene;
use crate::sim::{GameState, TickInput};

#[derive(Debug, Clone)]
pub struct HeadlessFrontend {
    step: f32,
    /// Sessions to finish before quitting
    sessions: u32,
    /// Close the frontend, ending the whole run, once a session reaches this many ticks
    max_ticks: Option<u64>,
    ticks_per_second: u64,
    last_hud_second: u64,
    frames_presented: u64,
    last_scene: Option<Scene>,
}

impl HeadlessFrontend {
    pub fn new(step: f32, sessions: u32, max_ticks: Option<u64>) -> Self {
        Self {
            step,
            sessions: sessions.max(1),
            max_ticks,
            ticks_per_second: ((1.0 / step).round() as u64).max(1),
            last_hud_second: 0,
            frames_presented: 0,
            last_scene: None,
        }
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn last_scene(&self) -> Option<&Scene> {
        self.last_scene.as_ref()
    }

    fn log_hud(&mut self, state: &GameState) {
        let second = state.time_ticks() / self.ticks_per_second;
        if second > self.last_hud_second {
            self.last_hud_second = second;
            log::debug!(
                "[session {} t={}s] score={} level={} obstacles={} spawn={:.1}/s",
                state.session(),
                second,
                state.score(),
                state.level(),
                state.obstacles().len(),
                state.spawns_per_second()
            );
        }
    }
}

impl Frontend for HeadlessFrontend {
    fn frame_delta(&mut self) -> f32 {
        self.step
    }

    fn poll_input(&mut self, state: &GameState) -> Option<TickInput> {
        if state.is_game_over() {
            self.last_hud_second = 0;
            let done = state.session() >= self.sessions;
            return Some(TickInput {
                restart: !done,
                quit: done,
                idle_mode: true,
                ..Default::default()
            });
        }

        if let Some(max) = self.max_ticks.filter(|&max| state.time_ticks() >= max) {
            log::info!(
                "Session {} reached the {} tick limit with score {}",
                state.session(),
                max,
                state.score()
            );
            return None;
        }

        self.log_hud(state);
        Some(TickInput::idle())
    }

    fn present(&mut self, scene: &Scene) {
        self.frames_presented += 1;
        self.last_scene = Some(scene.clone());
    }
}
