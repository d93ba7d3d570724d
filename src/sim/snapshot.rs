//! Read-only frame view handed to the renderer and the host

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Color, EnemyKind, GamePhase, GameState};
use crate::consts::PLAYER_MAX_HEALTH;

/// HUD values for the current frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub health: u8,
    pub max_health: u8,
    pub score: u32,
    pub wave: u32,
    /// Survival time in seconds
    pub elapsed: f32,
    pub difficulty: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub half_extents: Vec2,
    pub active: bool,
    pub damage_timer: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub half_extents: Vec2,
    pub health: u8,
    pub move_angle: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub life_ratio: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarView {
    pub pos: Vec2,
    pub size: f32,
    pub brightness: f32,
}

/// Everything needed to draw one frame. Active entities only, in slot order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub hud: Hud,
    pub player: PlayerView,
    pub bullets: Vec<BulletView>,
    pub enemies: Vec<EnemyView>,
    pub particles: Vec<ParticleView>,
    pub stars: Vec<StarView>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;

        Self {
            phase: state.phase,
            hud: Hud {
                health: player.health,
                max_health: PLAYER_MAX_HEALTH,
                score: player.score,
                wave: state.wave,
                elapsed: state.elapsed,
                difficulty: state.difficulty,
            },
            player: PlayerView {
                pos: player.pos,
                half_extents: player.half_extents,
                active: player.active,
                damage_timer: player.damage_timer,
            },
            bullets: state
                .bullets
                .iter_active()
                .map(|(_, b)| BulletView {
                    pos: b.pos,
                    radius: b.radius,
                    color: b.color,
                })
                .collect(),
            enemies: state
                .enemies
                .iter_active()
                .map(|(_, e)| EnemyView {
                    kind: e.kind,
                    pos: e.pos,
                    half_extents: e.half_extents,
                    health: e.health,
                    move_angle: e.move_angle,
                })
                .collect(),
            particles: state
                .particles
                .iter_active()
                .map(|(_, p)| ParticleView {
                    pos: p.pos,
                    radius: p.radius,
                    color: p.color,
                    life_ratio: p.life_ratio(),
                })
                .collect(),
            stars: state
                .stars
                .iter_active()
                .map(|(_, s)| StarView {
                    pos: s.pos,
                    size: s.size,
                    brightness: s.brightness,
                })
                .collect(),
        }
    }
}
