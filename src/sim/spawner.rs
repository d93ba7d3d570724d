//! Enemy spawning, difficulty curve and particle bursts

use glam::Vec2;

use super::state::{Color, Enemy, EnemyKind, GameEvent, GameState, Particle};
use crate::consts::*;

/// One batch of same-colored particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub color: Color,
    pub count: u32,
}

impl Burst {
    pub const fn new(color: Color, count: u32) -> Self {
        Self { color, count }
    }
}

pub const NORMAL_KILL_BURSTS: &[Burst] = &[
    Burst::new(Color::rgb(255, 60, 30), 10),
    Burst::new(Color::rgb(255, 160, 50), 6),
];
pub const FAST_KILL_BURSTS: &[Burst] = &[
    Burst::new(Color::rgb(0, 230, 255), 10),
    Burst::new(Color::WHITE, 5),
];
pub const STRONG_KILL_BURSTS: &[Burst] = &[
    Burst::new(Color::rgb(200, 0, 255), 15),
    Burst::new(Color::rgb(255, 80, 200), 8),
];
/// Enemy hit but still alive
pub const DAMAGE_SPARKS: &[Burst] = &[Burst::new(Color::rgb(200, 200, 200), 4)];
pub const PLAYER_HIT_BURSTS: &[Burst] = &[
    Burst::new(Color::rgb(0, 180, 255), 12),
    Burst::new(Color::WHITE, 6),
];
pub const PLAYER_DEATH_BURSTS: &[Burst] = &[
    Burst::new(Color::rgb(0, 180, 255), 30),
    Burst::new(Color::WHITE, 20),
    Burst::new(Color::rgb(100, 220, 255), 15),
];

pub fn kill_bursts(kind: EnemyKind) -> &'static [Burst] {
    match kind {
        EnemyKind::Normal => NORMAL_KILL_BURSTS,
        EnemyKind::Fast => FAST_KILL_BURSTS,
        EnemyKind::Strong => STRONG_KILL_BURSTS,
    }
}

/// Spawn rate multiplier after `elapsed` seconds of survival
pub fn difficulty_for(elapsed: f32) -> f32 {
    1.0 + elapsed / DIFFICULTY_RAMP_SECS
}

/// Wave number (1-based) after `elapsed` seconds of survival
pub fn wave_for(elapsed: f32) -> u32 {
    1 + (elapsed.max(0.0) / WAVE_LENGTH_SECS).floor() as u32
}

/// Seconds between enemy spawns at the given difficulty
pub fn spawn_interval(difficulty: f32) -> f32 {
    BASE_SPAWN_INTERVAL / difficulty
}

/// Advance the spawn timer, spawn when due, then refresh the difficulty curve
pub fn update_spawner(state: &mut GameState, dt: f32) {
    state.enemy_timer += dt;
    if state.enemy_timer >= spawn_interval(state.difficulty) {
        state.enemy_timer = 0.0;
        spawn_enemy(state);
    }

    let wave = wave_for(state.elapsed);
    if wave != state.wave {
        log::info!("Wave {} reached at {:.1}s", wave, state.elapsed);
    }
    state.wave = wave;
    state.difficulty = difficulty_for(state.elapsed);
}

/// Place one enemy of a random kind just above the screen
///
/// Returns the slot used, or `None` when the enemy pool is full.
pub fn spawn_enemy(state: &mut GameState) -> Option<usize> {
    if state.enemies.is_full() {
        log::trace!("Enemy pool full, spawn dropped");
        return None;
    }

    let x = state.rng.int_inclusive(
        ENEMY_SPAWN_MARGIN_X,
        SCREEN_WIDTH as i32 - ENEMY_SPAWN_MARGIN_X,
    ) as f32;
    let kind = EnemyKind::from_roll(state.rng.int_inclusive(0, 99));
    let move_angle = state.rng.angle();

    let enemy = Enemy::new(kind, Vec2::new(x, ENEMY_SPAWN_Y), state.wave, move_angle);
    let slot = state.enemies.acquire(enemy).ok()?;
    state.events.push(GameEvent::EnemySpawned { kind });
    log::debug!("Spawned {:?} in slot {} at x={}", kind, slot, x);
    Some(slot)
}

/// Emit a burst of `count` particles flying out of `origin` in random directions
///
/// Particles beyond the pool capacity are dropped. Returns the number emitted.
pub fn emit_burst(state: &mut GameState, origin: Vec2, color: Color, count: u32) -> u32 {
    for emitted in 0..count {
        if state.particles.is_full() {
            log::trace!("Particle pool full, {} particles dropped", count - emitted);
            return emitted;
        }

        let rng = &mut state.rng;
        let angle = rng.angle();
        let speed = rng.float(50.0, 250.0);
        let radius = rng.float(2.0, 6.0);
        let lifetime = rng.float(0.3, 0.8);

        let particle = Particle {
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            radius,
            lifetime,
            max_lifetime: lifetime,
            color,
        };
        if state.particles.acquire(particle).is_err() {
            return emitted;
        }
    }
    count
}

/// Emit each burst of a profile in order
pub fn emit_bursts(state: &mut GameState, origin: Vec2, bursts: &[Burst]) {
    for burst in bursts {
        emit_burst(state, origin, burst.color, burst.count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_difficulty_table() {
        let samples = [
            (0.0, 1, 1.0),
            (20.0, 2, 1.6667),
            (30.0, 2, 2.0),
            (40.0, 3, 2.3333),
            (60.0, 4, 3.0),
        ];
        for (t, wave, multiplier) in samples {
            assert_eq!(wave_for(t), wave, "wave at t={t}");
            assert!(
                (difficulty_for(t) - multiplier).abs() < 1e-3,
                "multiplier at t={t}"
            );
        }
    }

    #[test]
    fn test_spawn_interval_shrinks() {
        assert_eq!(spawn_interval(1.0), 2.0);
        assert_eq!(spawn_interval(2.0), 1.0);
    }

    #[test]
    fn test_spawner_fires_on_interval() {
        let mut state = GameState::new(9);
        state.elapsed = 0.0;

        // 1.5s accumulated: not yet due
        update_spawner(&mut state, 1.5);
        assert_eq!(state.enemies.active_count(), 0);

        update_spawner(&mut state, 0.5);
        assert_eq!(state.enemies.active_count(), 1);
        assert_eq!(state.enemy_timer, 0.0);

        let (_, enemy) = state.enemies.iter_active().next().unwrap();
        assert_eq!(enemy.pos.y, ENEMY_SPAWN_Y);
        assert!((40.0..=760.0).contains(&enemy.pos.x));
        assert_eq!(enemy.health, enemy.kind.max_health());
    }

    #[test]
    fn test_spawner_updates_wave_and_difficulty() {
        let mut state = GameState::new(9);
        state.elapsed = 40.0;
        update_spawner(&mut state, 0.0);
        assert_eq!(state.wave, 3);
        assert!((state.difficulty - 7.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_spawn_into_full_pool_is_dropped() {
        let mut state = GameState::new(5);
        for _ in 0..MAX_ENEMIES {
            assert!(spawn_enemy(&mut state).is_some());
        }
        assert_eq!(spawn_enemy(&mut state), None);
        assert_eq!(state.enemies.active_count(), MAX_ENEMIES);
    }

    #[test]
    fn test_burst_particle_ranges() {
        let mut state = GameState::new(77);
        let origin = Vec2::new(10.0, 20.0);
        assert_eq!(emit_burst(&mut state, origin, Color::WHITE, 50), 50);

        for (_, p) in state.particles.iter_active() {
            let speed = p.vel.length();
            assert!(speed >= 49.9 && speed <= 250.1, "speed {speed}");
            assert!(p.radius >= 2.0 && p.radius <= 6.0 + 1e-5);
            assert!(p.lifetime >= 0.3 - 1e-6 && p.lifetime <= 0.8 + 1e-6);
            assert_eq!(p.lifetime, p.max_lifetime);
            assert_eq!(p.pos, origin);
        }
    }

    #[test]
    fn test_burst_saturates_particle_pool() {
        let mut state = GameState::new(77);
        let emitted = emit_burst(&mut state, Vec2::ZERO, Color::WHITE, 250);
        assert_eq!(emitted, MAX_PARTICLES as u32);
        assert_eq!(emit_burst(&mut state, Vec2::ZERO, Color::WHITE, 1), 0);
    }

    #[test]
    fn test_kill_profiles() {
        let total = |bursts: &[Burst]| bursts.iter().map(|b| b.count).sum::<u32>();
        assert_eq!(total(kill_bursts(EnemyKind::Normal)), 16);
        assert_eq!(total(kill_bursts(EnemyKind::Fast)), 15);
        assert_eq!(total(kill_bursts(EnemyKind::Strong)), 23);
        assert_eq!(total(PLAYER_DEATH_BURSTS), 65);
    }

    proptest! {
        #[test]
        fn prop_difficulty_curve_is_monotonic(a in 0.0f32..3600.0, b in 0.0f32..3600.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(wave_for(lo) <= wave_for(hi));
            prop_assert!(difficulty_for(lo) <= difficulty_for(hi));
            prop_assert!(wave_for(lo) >= 1);
        }
    }
}
