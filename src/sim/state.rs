//! Game state and core simulation types
//!
//! All entities live in fixed-capacity pools owned by `GameState`. Nothing
//! holds a reference to another entity; cross-entity work goes through pool
//! indices during a single pass.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::pool::Pool;
use super::rng::SimRng;
use crate::consts::*;

/// 8-bit RGBA color carried by bullets and particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Normalised `[r, g, b, a]` with alpha scaled by `alpha`
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0 * alpha.clamp(0.0, 1.0),
        ]
    }
}

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for confirm (retry) or cancel (menu)
    GameOver,
}

/// Enemy archetypes. The kind fixes size, speed and health at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Normal,
    Fast,
    Strong,
}

impl EnemyKind {
    /// Map a uniform draw in `[0, 100)` to a kind (60% / 25% / 15%)
    pub fn from_roll(roll: i32) -> Self {
        if roll < 60 {
            EnemyKind::Normal
        } else if roll < 85 {
            EnemyKind::Fast
        } else {
            EnemyKind::Strong
        }
    }

    pub fn half_extents(self) -> Vec2 {
        match self {
            EnemyKind::Normal => Vec2::splat(15.0),
            EnemyKind::Fast => Vec2::splat(10.0),
            EnemyKind::Strong => Vec2::splat(20.0),
        }
    }

    /// Descent speed (px/s) for the given wave
    pub fn speed(self, wave: u32) -> f32 {
        let wave = wave as f32;
        match self {
            EnemyKind::Normal => 80.0 + wave * 10.0,
            EnemyKind::Fast => 150.0 + wave * 15.0,
            EnemyKind::Strong => 50.0 + wave * 5.0,
        }
    }

    pub fn max_health(self) -> u8 {
        match self {
            EnemyKind::Normal | EnemyKind::Fast => 1,
            EnemyKind::Strong => 3,
        }
    }

    /// Score awarded for a kill
    pub fn points(self) -> u32 {
        match self {
            EnemyKind::Normal => 100,
            EnemyKind::Fast => 150,
            EnemyKind::Strong => 300,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub half_extents: Vec2,
    pub speed: f32,
    pub health: u8,
    pub score: u32,
    /// Seconds until the next shot is allowed
    pub shoot_cooldown: f32,
    /// Contact immunity remaining (also drives the damage flicker)
    pub damage_timer: f32,
    pub active: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - PLAYER_START_Y_OFFSET),
            half_extents: Vec2::splat(PLAYER_HALF_EXTENT),
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            score: 0,
            shoot_cooldown: 0.0,
            damage_timer: 0.0,
            active: true,
        }
    }
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.half_extents)
    }

    /// True while contact collisions are ignored
    pub fn is_invincible(&self) -> bool {
        self.damage_timer > 0.0
    }

    /// Keep the whole ship on screen
    pub fn clamp_to_screen(&mut self) {
        let min = self.half_extents;
        let max = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) - self.half_extents;
        self.pos = self.pos.clamp(min, max);
    }

    /// Spawn points of the twin cannons
    pub fn muzzles(&self) -> [Vec2; 2] {
        [
            self.pos + Vec2::new(-MUZZLE_OFFSET_X, -MUZZLE_OFFSET_Y),
            self.pos + Vec2::new(MUZZLE_OFFSET_X, -MUZZLE_OFFSET_Y),
        ]
    }
}

/// A projectile
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Bullet {
    pub const PLAYER_COLOR: Color = Color::rgb(0, 200, 255);

    /// An upward player shot fired from `pos`
    pub fn player_shot(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, -BULLET_SPEED),
            radius: BULLET_RADIUS,
            color: Self::PLAYER_COLOR,
        }
    }

    /// Only upward (player-owned) bullets can damage enemies
    #[inline]
    pub fn is_upward(&self) -> bool {
        self.vel.y < 0.0
    }
}

/// A descending enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub half_extents: Vec2,
    pub speed: f32,
    pub health: u8,
    /// Phase of the horizontal wobble (radians)
    pub move_angle: f32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, wave: u32, move_angle: f32) -> Self {
        Self {
            kind,
            pos,
            half_extents: kind.half_extents(),
            speed: kind.speed(wave),
            health: kind.max_health(),
            move_angle,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.half_extents)
    }
}

/// A short-lived effect particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Seconds remaining
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub color: Color,
}

impl Particle {
    /// Remaining life in `[0, 1]`; scales alpha and radius when drawn
    pub fn life_ratio(&self) -> f32 {
        if self.max_lifetime <= 0.0 {
            return 0.0;
        }
        (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
    }
}

/// A background star; wraps vertically forever
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub speed: f32,
    pub brightness: f32,
    pub size: f32,
}

/// Things that happened during a tick, for audio/feedback hooks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ShotFired,
    EnemySpawned { kind: EnemyKind },
    /// An enemy survived a bullet hit
    EnemyDamaged { slot: usize },
    EnemyKilled { kind: EnemyKind, points: u32 },
    PlayerHit { health: u8 },
    PlayerDied,
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// Complete simulation state, owned by the host and passed to each subsystem
#[derive(Debug, Clone)]
pub struct GameState {
    pub rng: SimRng,
    pub phase: GamePhase,
    pub player: Player,
    pub bullets: Pool<Bullet>,
    pub enemies: Pool<Enemy>,
    pub particles: Pool<Particle>,
    pub stars: Pool<Star>,
    /// Survival time of the current run (seconds)
    pub elapsed: f32,
    /// Time accumulated toward the next enemy spawn
    pub enemy_timer: f32,
    pub wave: u32,
    pub difficulty: f32,
    /// Ticks processed since creation
    pub time_ticks: u64,
    /// Events emitted by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state on the menu screen
    pub fn new(seed: u64) -> Self {
        Self::with_rng(SimRng::new(seed))
    }

    pub fn with_rng(rng: SimRng) -> Self {
        let mut state = Self {
            rng,
            phase: GamePhase::Menu,
            player: Player::default(),
            bullets: Pool::with_capacity(MAX_BULLETS),
            enemies: Pool::with_capacity(MAX_ENEMIES),
            particles: Pool::with_capacity(MAX_PARTICLES),
            stars: Pool::with_capacity(MAX_STARS),
            elapsed: 0.0,
            enemy_timer: 0.0,
            wave: 1,
            difficulty: 1.0,
            time_ticks: 0,
            events: Vec::new(),
        };
        state.reset_run();
        state
    }

    /// Reset the player, all pools and the difficulty clock for a new run
    pub fn reset_run(&mut self) {
        self.player = Player::default();
        self.bullets.clear();
        self.enemies.clear();
        self.particles.clear();
        self.seed_stars();
        self.elapsed = 0.0;
        self.enemy_timer = 0.0;
        self.wave = 1;
        self.difficulty = 1.0;
    }

    /// Scatter a fresh star field over the whole screen
    pub fn seed_stars(&mut self) {
        self.stars.clear();
        for _ in 0..self.stars.capacity() {
            let star = Star {
                pos: Vec2::new(
                    self.rng.int_inclusive(0, SCREEN_WIDTH as i32) as f32,
                    self.rng.int_inclusive(0, SCREEN_HEIGHT as i32) as f32,
                ),
                speed: self.rng.float(20.0, 150.0),
                brightness: self.rng.float(0.3, 1.0),
                size: self.rng.float(1.0, 3.0),
            };
            if self.stars.acquire(star).is_err() {
                break;
            }
        }
    }

    /// Switch phase, recording the transition
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }
}
