//! Rendering module
//!
//! Backend-agnostic: builds draw lists from game state and tessellates
//! them into vertex data. Surfaces, fonts and GPU pipelines belong to
//! the frontend.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::{Canvas, DrawCommand, Scene, TextAnchor};
pub use vertex::Vertex;
