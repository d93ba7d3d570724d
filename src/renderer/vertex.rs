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
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride of one vertex in a tightly packed buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    pub const PLAYER_HULL: [f32; 4] = [0.0, 0.71, 1.0, 1.0];
    pub const PLAYER_COCKPIT: [f32; 4] = [0.78, 0.94, 1.0, 1.0];
    pub const PLAYER_FLAME: [f32; 4] = [1.0, 0.59, 0.12, 1.0];

    pub const NORMAL_BODY: [f32; 4] = [0.71, 0.08, 0.31, 1.0];
    pub const NORMAL_CORE: [f32; 4] = [0.94, 0.24, 0.51, 1.0];
    pub const FAST_BODY: [f32; 4] = [0.86, 0.0, 0.47, 1.0];
    pub const FAST_CORE: [f32; 4] = [1.0, 0.31, 0.71, 1.0];
    pub const STRONG_BODY: [f32; 4] = [0.55, 0.0, 0.78, 1.0];
    pub const STRONG_CORE: [f32; 4] = [0.78, 0.24, 1.0, 1.0];
    pub const HEALTH_PIP: [f32; 4] = [1.0, 0.31, 0.71, 1.0];

    pub const HUD_HEALTH: [f32; 4] = [1.0, 0.2, 0.2, 1.0];
    pub const HUD_TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const TITLE: [f32; 4] = [0.0, 0.78, 1.0, 1.0];
    pub const GAME_OVER: [f32; 4] = [1.0, 0.2, 0.2, 1.0];
    pub const PROMPT: [f32; 4] = [0.78, 0.78, 0.78, 1.0];
}
