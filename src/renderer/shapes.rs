//! Shape generation for 2D primitives
//!
//! Rects are emitted as two triangles in clip space (x, y in [-1, 1],
//! y up), ready for a vertex buffer.

use glam::Vec2;

use super::scene::{DrawCommand, Scene};
use super::vertex::Vertex;
use crate::sim::Rect;

/// Map a screen pixel (origin top-left, y down) to clip space
pub fn to_clip(p: Vec2, screen: Vec2) -> Vec2 {
    Vec2::new(p.x / screen.x * 2.0 - 1.0, 1.0 - p.y / screen.y * 2.0)
}

/// Generate vertices for a filled rectangle
pub fn rect(rect: &Rect, color: [f32; 4], screen: Vec2) -> [Vertex; 6] {
    let tl = to_clip(Vec2::new(rect.left(), rect.top()), screen);
    let br = to_clip(Vec2::new(rect.right(), rect.bottom()), screen);

    [
        Vertex::new(tl.x, tl.y, color),
        Vertex::new(tl.x, br.y, color),
        Vertex::new(br.x, tl.y, color),
        Vertex::new(br.x, tl.y, color),
        Vertex::new(tl.x, br.y, color),
        Vertex::new(br.x, br.y, color),
    ]
}

/// Triangles for every rect in the scene. A clear resets the list, and
/// text is left to the frontend's font renderer.
pub fn tessellate(scene: &Scene) -> Vec<Vertex> {
    let screen = Vec2::new(scene.width, scene.height);
    let mut vertices = Vec::with_capacity(scene.commands.len() * 6);

    for command in &scene.commands {
        match command {
            DrawCommand::Clear { .. } => vertices.clear(),
            DrawCommand::Rect { rect: r, color } => {
                vertices.extend_from_slice(&rect(r, *color, screen));
            }
            DrawCommand::Text { .. } => {}
        }
    }

    vertices
}
