//! Collision detection and resolution
//!
//! Two overlap tests cover everything in the game: circle vs axis-aligned box
//! (bullets against enemies) and box vs box (enemies ramming the player).
//! `resolve_collisions` runs once per tick after integration.

use glam::Vec2;

use super::spawner::{self, DAMAGE_SPARKS, PLAYER_DEATH_BURSTS, PLAYER_HIT_BURSTS};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::DAMAGE_IMMUNITY;

/// Axis-aligned box described by its center and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Point of the box nearest to `point` (the point itself when inside)
    #[inline]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min(), self.max())
    }
}

/// Circle vs box. Touching counts as a hit.
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let nearest = rect.closest_point(center);
    center.distance_squared(nearest) <= radius * radius
}

/// Box vs box. Boxes that only share an edge do not overlap.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

/// Resolve bullet↔enemy and player↔enemy overlaps for the current tick
///
/// Enemies are visited in slot order. For each enemy, upward bullets are
/// tested in slot order and every overlapping bullet lands one hit until the
/// enemy dies, so two bullets arriving together produce a damage spark and
/// then a kill burst. A surviving enemy is then tested against the player.
pub fn resolve_collisions(state: &mut GameState) {
    for enemy_idx in 0..state.enemies.capacity() {
        if !state.enemies.is_active(enemy_idx) {
            continue;
        }
        resolve_bullet_hits(state, enemy_idx);
        if state.enemies.is_active(enemy_idx) {
            resolve_player_contact(state, enemy_idx);
        }
    }
}

fn resolve_bullet_hits(state: &mut GameState, enemy_idx: usize) {
    for bullet_idx in 0..state.bullets.capacity() {
        let Some(bounds) = state.enemies.get(enemy_idx).map(|e| e.bounds()) else {
            return;
        };
        let hit_pos = match state.bullets.get(bullet_idx) {
            Some(b) if b.is_upward() && circle_rect_overlap(b.pos, b.radius, &bounds) => b.pos,
            _ => continue,
        };

        // Bullets are single-use
        state.bullets.release(bullet_idx);

        let Some(enemy) = state.enemies.get_mut(enemy_idx) else {
            return;
        };
        enemy.health = enemy.health.saturating_sub(1);

        if enemy.health == 0 {
            let (kind, pos) = (enemy.kind, enemy.pos);
            state.enemies.release(enemy_idx);

            spawner::emit_bursts(state, pos, spawner::kill_bursts(kind));
            let points = kind.points();
            state.player.score += points;
            state.events.push(GameEvent::EnemyKilled { kind, points });
            log::debug!(
                "{:?} destroyed in slot {} (+{}, score {})",
                kind,
                enemy_idx,
                points,
                state.player.score
            );
            return;
        }

        spawner::emit_bursts(state, hit_pos, DAMAGE_SPARKS);
        let event = GameEvent::EnemyDamaged { slot: enemy_idx };
        state.events.push(event);
    }
}

fn resolve_player_contact(state: &mut GameState, enemy_idx: usize) {
    if !state.player.active || state.player.is_invincible() {
        return;
    }
    let Some(enemy_bounds) = state.enemies.get(enemy_idx).map(|e| e.bounds()) else {
        return;
    };
    if !rects_overlap(&state.player.bounds(), &enemy_bounds) {
        return;
    }

    // Rammed enemies are destroyed regardless of remaining health, unscored
    state.enemies.release(enemy_idx);

    let player = &mut state.player;
    player.health = player.health.saturating_sub(1);
    player.damage_timer = DAMAGE_IMMUNITY;
    let (pos, health) = (player.pos, player.health);

    spawner::emit_bursts(state, pos, PLAYER_HIT_BURSTS);
    state.events.push(GameEvent::PlayerHit { health });
    log::debug!("Player hit by slot {}, health {}", enemy_idx, health);

    if health == 0 {
        state.player.active = false;
        spawner::emit_bursts(state, pos, PLAYER_DEATH_BURSTS);
        state.events.push(GameEvent::PlayerDied);
        log::info!(
            "Player destroyed after {:.1}s with score {}",
            state.elapsed,
            state.player.score
        );
        state.set_phase(GamePhase::GameOver);
    }
}
