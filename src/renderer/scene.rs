//! Draw lists built from game state
//!
//! The simulation never draws. A `Scene` is a flat list of commands in
//! screen pixels (origin top-left, y down) that any canvas can replay.

use glam::Vec2;

use super::vertex::colors;
use crate::sim::{GamePhase, GameState, PickupKind, Rect};

/// Game-over banner text
pub const GAME_OVER_TEXT: &str = "Game Over! Press R to Restart or Q to Quit";
/// Banner height as a fraction of the screen height
pub const GAME_OVER_Y_FRACTION: f32 = 0.5;
/// HUD font size (px)
pub const HUD_FONT_SIZE: f32 = 24.0;
/// Top-left of the first HUD line
pub const HUD_ORIGIN: Vec2 = Vec2::new(10.0, 10.0);
/// Vertical distance between HUD lines
pub const HUD_LINE_HEIGHT: f32 = 30.0;
/// Ticks per invincibility flash cycle
const FLASH_PERIOD: u64 = 20;

/// How a text position is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    /// Horizontally centered on the position
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: [f32; 4],
    },
    Rect {
        rect: Rect,
        color: [f32; 4],
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: [f32; 4],
        anchor: TextAnchor,
    },
}

/// The "draw rectangle / draw text" primitives a frontend provides
pub trait Canvas {
    fn clear(&mut self, color: [f32; 4]);
    fn draw_rect(&mut self, rect: &Rect, color: [f32; 4]);
    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: [f32; 4], anchor: TextAnchor);
}

/// One frame worth of draw commands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    /// Build the frame for the current state
    pub fn build(state: &GameState) -> Self {
        let screen = &state.config().screen;
        let mut scene = Self {
            width: screen.width,
            height: screen.height,
            commands: vec![DrawCommand::Clear {
                color: colors::BACKGROUND,
            }],
        };

        match state.phase() {
            GamePhase::Playing => {
                scene.push_playfield(state);
                scene.push_hud(state);
            }
            GamePhase::GameOver => scene.push_game_over(state),
        }
        scene
    }

    fn push_playfield(&mut self, state: &GameState) {
        let flashing = state.effects().invincible()
            && (state.time_ticks() % FLASH_PERIOD) < FLASH_PERIOD / 2;
        self.commands.push(DrawCommand::Rect {
            rect: state.player().bounding_box(),
            color: if flashing {
                colors::PLAYER_INVINCIBLE
            } else {
                colors::PLAYER
            },
        });

        for obstacle in state.obstacles() {
            self.commands.push(DrawCommand::Rect {
                rect: obstacle.bounding_box(),
                color: colors::OBSTACLE,
            });
        }

        for pickup in state.pickups() {
            self.commands.push(DrawCommand::Rect {
                rect: pickup.bounding_box(),
                color: pickup_color(pickup.kind),
            });
        }
    }

    fn push_hud(&mut self, state: &GameState) {
        let lines = [
            format!("Score: {}", state.score()),
            format!("Level: {}", state.level()),
            format!("Spawn: {:.1}/s", state.spawns_per_second()),
        ];
        for (i, text) in lines.into_iter().enumerate() {
            self.push_text(
                text,
                HUD_ORIGIN + Vec2::new(0.0, HUD_LINE_HEIGHT * i as f32),
                TextAnchor::TopLeft,
            );
        }
    }

    fn push_game_over(&mut self, state: &GameState) {
        let banner_y = self.height * GAME_OVER_Y_FRACTION;
        let center_x = self.width / 2.0;
        self.push_text(
            GAME_OVER_TEXT.to_string(),
            Vec2::new(center_x, banner_y),
            TextAnchor::Center,
        );
        let score = state.final_score().unwrap_or(state.score());
        self.push_text(
            format!("Final Score: {score}"),
            Vec2::new(center_x, banner_y + HUD_LINE_HEIGHT * 1.5),
            TextAnchor::Center,
        );
    }

    fn push_text(&mut self, text: String, pos: Vec2, anchor: TextAnchor) {
        self.commands.push(DrawCommand::Text {
            text,
            pos,
            size: HUD_FONT_SIZE,
            color: colors::TEXT,
            anchor,
        });
    }

    /// Replay every command onto a canvas, in order
    pub fn replay<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear { color } => canvas.clear(*color),
                DrawCommand::Rect { rect, color } => canvas.draw_rect(rect, *color),
                DrawCommand::Text {
                    text,
                    pos,
                    size,
                    color,
                    anchor,
                } => canvas.draw_text(text, *pos, *size, *color, *anchor),
            }
        }
    }

    /// Text of every text command, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count()
    }
}

pub fn pickup_color(kind: PickupKind) -> [f32; 4] {
    match kind {
        PickupKind::SpeedBoost => colors::PICKUP_SPEED_BOOST,
        PickupKind::SlowEnemies => colors::PICKUP_SLOW_ENEMIES,
        PickupKind::Invincibility => colors::PICKUP_INVINCIBILITY,
        PickupKind::ScoreMultiplier => colors::PICKUP_SCORE_MULTIPLIER,
    }
}
