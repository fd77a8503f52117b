//! Idle/demo mode: the game steers the player itself
//!
//! Each tick the three possible moves are played forward over a short
//! horizon against the current obstacles, and the one with the least
//! overlap wins. Ties go to standing still, then to moving toward the
//! middle of the screen.

use glam::Vec2;

use super::collision::overlap_area;
use super::player::Direction;
use super::rect::Rect;
use super::state::GameState;

/// How far ahead moves are evaluated (seconds)
const LOOKAHEAD_SECS: f32 = 0.5;
/// Samples along the horizon
const LOOKAHEAD_SAMPLES: u32 = 6;

/// Pick a direction for this tick
pub fn steer(state: &GameState) -> Direction {
    let player = state.player();
    let start = player.bounding_box();
    let power_ups = &state.config().power_ups;
    let fall_factor = state.effects().obstacle_speed_factor(power_ups);
    let speed = player.speed() * state.effects().player_speed_multiplier(power_ups);

    // Only blocks that have not yet passed the player matter
    let threats: Vec<(Rect, f32)> = state
        .obstacles()
        .iter()
        .filter(|o| o.bounding_box().top() < start.bottom())
        .map(|o| (o.bounding_box(), o.speed * fall_factor))
        .collect();
    if threats.is_empty() {
        return Direction::None;
    }

    let toward_center = if start.center().x < state.config().screen.width / 2.0 {
        Direction::Right
    } else {
        Direction::Left
    };
    let away = match toward_center {
        Direction::Right => Direction::Left,
        _ => Direction::Right,
    };

    [Direction::None, toward_center, away]
        .into_iter()
        .map(|direction| {
            let danger = danger(start, direction, speed, player.max_x(), &threats);
            (direction, danger)
        })
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(direction, _)| direction)
        .unwrap_or_default()
}

/// Summed overlap between the player's projected path and falling threats
fn danger(
    start: Rect,
    direction: Direction,
    speed: f32,
    max_x: f32,
    threats: &[(Rect, f32)],
) -> f32 {
    (1..=LOOKAHEAD_SAMPLES)
        .map(|i| {
            let t = LOOKAHEAD_SECS * i as f32 / LOOKAHEAD_SAMPLES as f32;
            let x = (start.x + direction.sign() * speed * t).clamp(0.0, max_x);
            let player_box = Rect::new(x, start.y, start.w, start.h);
            threats
                .iter()
                .map(|(rect, fall_speed)| {
                    overlap_area(&player_box, &rect.translated(Vec2::new(0.0, fall_speed * t)))
                })
                .sum::<f32>()
        })
        .sum()
}
