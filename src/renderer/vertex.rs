//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Byte stride of one vertex in a GPU buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
    /// Byte offset of `color` within a vertex
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 2]>();

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// View a vertex list as raw bytes for upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for game elements
pub mod colors {
    /// Opaque color from 8-bit RGB
    pub const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const BACKGROUND: [f32; 4] = rgb(0, 0, 0);
    pub const TEXT: [f32; 4] = rgb(255, 255, 255);
    pub const PLAYER: [f32; 4] = rgb(0, 100, 255);
    pub const PLAYER_INVINCIBLE: [f32; 4] = rgb(0, 255, 255);
    pub const OBSTACLE: [f32; 4] = rgb(255, 0, 0);
    pub const PICKUP_SPEED_BOOST: [f32; 4] = rgb(0, 255, 0);
    pub const PICKUP_SLOW_ENEMIES: [f32; 4] = rgb(0, 255, 255);
    pub const PICKUP_INVINCIBILITY: [f32; 4] = rgb(255, 255, 0);
    pub const PICKUP_SCORE_MULTIPLIER: [f32; 4] = rgb(255, 165, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        assert_eq!(Vertex::STRIDE, 24);
        assert_eq!(Vertex::COLOR_OFFSET, 8);

        let vertices = [Vertex::new(1.0, 2.0, colors::TEXT); 3];
        let bytes = as_bytes(&vertices);
        assert_eq!(bytes.len(), 3 * Vertex::STRIDE);
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
    }

    #[test]
    fn test_rgb() {
        assert_eq!(colors::OBSTACLE, [1.0, 0.0, 0.0, 1.0]);
        assert!((colors::PLAYER[1] - 100.0 / 255.0).abs() < 1e-6);
    }
}
