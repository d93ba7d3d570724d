//! Space Shooter - frame-stepped arcade shooter simulation
//!
//! Core modules:
//! - `sim`: Simulation (entity pools, physics, collisions, spawning, game phases)
//! - `renderer`: Stateless render step turning a frame snapshot into triangles
//! - `settings`: Host configuration loaded from JSON

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Pool capacities (fixed for the lifetime of a game state)
    pub const MAX_BULLETS: usize = 50;
    pub const MAX_ENEMIES: usize = 20;
    pub const MAX_PARTICLES: usize = 200;
    pub const MAX_STARS: usize = 100;

    /// Player defaults
    pub const PLAYER_START_Y_OFFSET: f32 = 80.0; // distance above the bottom edge
    pub const PLAYER_HALF_EXTENT: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_MAX_HEALTH: u8 = 5;
    /// Seconds between double shots
    pub const SHOOT_COOLDOWN: f32 = 0.15;
    /// Contact immunity after being rammed (seconds)
    pub const DAMAGE_IMMUNITY: f32 = 1.0;

    /// Player shots
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const BULLET_SPEED: f32 = 500.0;
    pub const MUZZLE_OFFSET_X: f32 = 12.0;
    pub const MUZZLE_OFFSET_Y: f32 = 20.0;
    /// Bullets are retired this far past the top/bottom edge
    pub const BULLET_MARGIN: f32 = 10.0;

    /// Enemies are retired this far below the bottom edge
    pub const ENEMY_EXIT_MARGIN: f32 = 50.0;
    pub const ENEMY_SPAWN_Y: f32 = -40.0;
    pub const ENEMY_SPAWN_MARGIN_X: i32 = 40;
    /// Wavy descent: phase rate (rad/s) and horizontal amplitude (px/s)
    pub const ENEMY_WAVE_RATE: f32 = 3.0;
    pub const ENEMY_WAVE_AMPLITUDE: f32 = 50.0;

    /// Spawn interval at difficulty 1.0 (seconds)
    pub const BASE_SPAWN_INTERVAL: f32 = 2.0;
    /// Seconds of survival per +1.0 difficulty
    pub const DIFFICULTY_RAMP_SECS: f32 = 30.0;
    /// Seconds of survival per wave
    pub const WAVE_LENGTH_SECS: f32 = 20.0;

    /// Particle velocity multiplier applied once per tick
    pub const PARTICLE_DRAG: f32 = 0.98;

    /// Star speed multiplier on the game over screen
    pub const GAME_OVER_STAR_SPEED: f32 = 0.3;
}
