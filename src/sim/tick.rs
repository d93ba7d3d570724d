//! Variable timestep simulation tick
//!
//! Sequences the game phases and, while playing, runs player control, the
//! integrator, the collision resolver and the spawner in that order.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::integrate::{StarWrap, integrate, integrate_particles, integrate_stars};
use super::spawner::update_spawner;
use super::state::{Bullet, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input signals for a single tick
///
/// Movement and fire are level-triggered (held); confirm and cancel are
/// edge-triggered and the host must only set them on the press frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire held
    pub fire: bool,
    /// Start / retry pressed
    pub confirm: bool,
    /// Back to menu pressed
    pub cancel: bool,
}

impl TickInput {
    pub fn confirm() -> Self {
        Self {
            confirm: true,
            ..Default::default()
        }
    }

    pub fn cancel() -> Self {
        Self {
            cancel: true,
            ..Default::default()
        }
    }

    /// Unnormalised movement direction; opposite keys cancel out
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the game state by `dt` seconds of frame time
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Menu => {
            if input.confirm {
                start_run(state);
                return;
            }
            integrate_stars(
                &mut state.stars,
                &mut state.rng,
                dt,
                1.0,
                StarWrap::NewColumn,
            );
        }

        GamePhase::Playing => {
            // Leaving to the menu freezes the run as-is
            if input.cancel {
                state.set_phase(GamePhase::Menu);
                return;
            }

            state.elapsed += dt;
            apply_player_input(state, input, dt);
            integrate(state, dt);
            resolve_collisions(state);
            update_spawner(state, dt);
        }

        GamePhase::GameOver => {
            if input.confirm {
                start_run(state);
                return;
            }
            if input.cancel {
                state.set_phase(GamePhase::Menu);
                return;
            }

            // Keep the aftermath animating; gameplay entities stay frozen
            integrate_stars(
                &mut state.stars,
                &mut state.rng,
                dt,
                GAME_OVER_STAR_SPEED,
                StarWrap::SameColumn,
            );
            integrate_particles(&mut state.particles, dt);
        }
    }
}

fn start_run(state: &mut GameState) {
    state.reset_run();
    log::info!("New run started (seed {})", state.rng.seed());
    state.set_phase(GamePhase::Playing);
}

/// Movement, screen clamping, shooting and the immunity countdown
fn apply_player_input(state: &mut GameState, input: &TickInput, dt: f32) {
    let player = &mut state.player;

    if player.active {
        player.pos += input.direction() * player.speed * dt;
        player.clamp_to_screen();

        player.shoot_cooldown -= dt;
        if input.fire && player.shoot_cooldown <= 0.0 {
            for muzzle in player.muzzles() {
                if state.bullets.acquire(Bullet::player_shot(muzzle)).is_err() {
                    log::trace!("Bullet pool full, shot dropped");
                }
            }
            player.shoot_cooldown = SHOOT_COOLDOWN;
            state.events.push(GameEvent::ShotFired);
        }
    }

    if player.damage_timer > 0.0 {
        player.damage_timer -= dt;
    }
}

/// Demo controller: start runs, steer under the lowest enemy, keep firing
/// and sidestep anything about to ram the ship
pub fn autopilot_input(state: &GameState) -> TickInput {
    match state.phase {
        GamePhase::Menu | GamePhase::GameOver => TickInput::confirm(),
        GamePhase::Playing => {
            let player = &state.player;
            let mut input = TickInput {
                fire: true,
                ..Default::default()
            };

            // Enemies closing in from above within reach of the hull
            let threat = state
                .enemies
                .iter_active()
                .map(|(_, e)| e)
                .filter(|e| {
                    let reach = player.half_extents.x + e.half_extents.x + 10.0;
                    let gap = player.pos.y - e.pos.y;
                    (e.pos.x - player.pos.x).abs() < reach && gap > 0.0 && gap < 140.0
                })
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

            if let Some(enemy) = threat {
                let dodge_left = enemy.pos.x >= player.pos.x;
                let near_left_edge = player.pos.x - player.half_extents.x <= 1.0;
                let near_right_edge = player.pos.x + player.half_extents.x >= SCREEN_WIDTH - 1.0;
                if (dodge_left && !near_left_edge) || near_right_edge {
                    input.left = true;
                } else {
                    input.right = true;
                }
                return input;
            }

            // Line up under the lowest enemy still above the ship
            let target = state
                .enemies
                .iter_active()
                .map(|(_, e)| e)
                .filter(|e| e.pos.y < player.pos.y)
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

            if let Some(enemy) = target {
                let dx = enemy.pos.x - player.pos.x;
                if dx < -6.0 {
                    input.left = true;
                } else if dx > 6.0 {
                    input.right = true;
                }
            }

            input
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawner::emit_burst;
    use crate::sim::state::{Color, Enemy, EnemyKind};

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        tick(&mut state, &TickInput::confirm(), 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_menu_confirm_starts_run() {
        let mut state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Menu);

        // No confirm: stays on menu, gameplay clock frozen
        tick(&mut state, &TickInput::default(), 0.5);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.elapsed, 0.0);

        tick(&mut state, &TickInput::confirm(), 1.0 / 60.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_fire_spawns_twin_bullets() {
        let mut state = started(1);
        let origin = state.player.pos;

        tick(&mut state, &fire(), 0.0);

        let bullets: Vec<_> = state
            .bullets
            .iter_active()
            .map(|(_, b)| b.clone())
            .collect();
        assert_eq!(bullets.len(), 2);
        assert_eq!(bullets[0].pos, origin + Vec2::new(-12.0, -20.0));
        assert_eq!(bullets[1].pos, origin + Vec2::new(12.0, -20.0));
        for b in &bullets {
            assert_eq!(b.vel, Vec2::new(0.0, -500.0));
            assert_eq!(b.radius, 4.0);
        }
        assert!(state.events.contains(&GameEvent::ShotFired));
    }

    #[test]
    fn test_end_to_end_bullets_leave_screen() {
        let mut state = started(2);
        tick(&mut state, &fire(), 0.0);
        assert_eq!(state.bullets.active_count(), 2);

        let dt = 1.0 / 64.0;
        let mut ticks = 0;
        while state.bullets.active_count() > 0 {
            tick(&mut state, &TickInput::default(), dt);
            ticks += 1;
            assert!(ticks < 200, "bullets never left the screen");
        }
        // (520 - 20 + 10) / 500 s at 64 ticks per second
        assert!(ticks >= 65);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_shoot_cooldown() {
        let mut state = started(3);
        let dt = 0.0625;
        tick(&mut state, &fire(), dt);
        tick(&mut state, &fire(), dt);
        tick(&mut state, &fire(), dt);
        assert_eq!(state.bullets.active_count(), 2);

        // Cooldown of 0.15s runs out during the fourth tick
        tick(&mut state, &fire(), dt);
        assert_eq!(state.bullets.active_count(), 4);
    }

    #[test]
    fn test_bullet_pool_saturation_drops_shots() {
        let mut state = started(4);
        for _ in 0..30 {
            state.player.shoot_cooldown = 0.0;
            tick(&mut state, &fire(), 0.0);
        }
        assert_eq!(state.bullets.active_count(), MAX_BULLETS);
    }

    #[test]
    fn test_movement_clamped_to_screen() {
        let mut state = started(5);
        let left = TickInput {
            left: true,
            up: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut state, &left, 0.1);
        }
        assert_eq!(state.player.pos, Vec2::new(20.0, 20.0));
    }

    /// Park a motionless enemy on top of the ship
    fn ram(state: &mut GameState) {
        let mut enemy = Enemy::new(EnemyKind::Normal, state.player.pos, 1, 0.0);
        enemy.speed = 0.0;
        state.enemies.acquire(enemy).unwrap();
    }

    #[test]
    fn test_invincibility_window() {
        let mut state = started(6);
        let dt = 0.25;

        ram(&mut state);
        tick(&mut state, &TickInput::default(), dt);
        assert_eq!(state.player.health, 4);

        // Within the one second window: no further damage
        state.enemies.clear();
        ram(&mut state);
        for _ in 0..3 {
            tick(&mut state, &TickInput::default(), dt);
            assert_eq!(state.player.health, 4);
        }
        assert_eq!(state.enemies.active_count(), 1);

        // One full second after the hit
        tick(&mut state, &TickInput::default(), dt);
        assert_eq!(state.player.health, 3);
    }

    #[test]
    fn test_invincibility_overshoots_by_one_tick_at_60fps() {
        let mut state = started(6);
        let dt = 1.0 / 60.0;

        ram(&mut state);
        tick(&mut state, &TickInput::default(), dt);
        assert_eq!(state.player.health, 4);

        // Sixty subtractions of 1/60 leave a tiny positive remainder in f32
        let mut ticks = 0;
        while state.player.health == 4 {
            state.enemies.clear();
            ram(&mut state);
            tick(&mut state, &TickInput::default(), dt);
            ticks += 1;
            assert!(ticks <= 61, "immunity never ended");
        }
        assert_eq!(ticks, 61);
        assert_eq!(state.player.health, 3);
    }

    #[test]
    fn test_game_over_freezes_gameplay_entities() {
        let mut state = started(12);
        let (enemy_pos, bullet_pos) = (Vec2::new(200.0, 150.0), Vec2::new(600.0, 300.0));
        let normal = Enemy::new(EnemyKind::Normal, enemy_pos, 1, 0.0);
        let enemy = state.enemies.acquire(normal).unwrap();
        let shot = Bullet::player_shot(bullet_pos);
        let bullet = state.bullets.acquire(shot).unwrap();
        let origin = Vec2::new(400.0, 300.0);
        emit_burst(&mut state, origin, Color::WHITE, 5);
        state.set_phase(GamePhase::GameOver);

        let star_before: Vec<Vec2> = state.stars.iter_active().map(|(_, s)| s.pos).collect();
        let particle_before = state.particles.iter_active().next().unwrap().1.pos;

        tick(&mut state, &TickInput::default(), 0.1);

        let frozen = state.enemies.get(enemy).unwrap();
        assert_eq!(frozen.pos, enemy_pos);
        assert_eq!(frozen.move_angle, 0.0);
        assert_eq!(state.bullets.get(bullet).unwrap().pos, bullet_pos);
        assert_eq!(state.elapsed, 0.0);

        let star_after: Vec<Vec2> = state.stars.iter_active().map(|(_, s)| s.pos).collect();
        assert_ne!(star_before, star_after);
        let particle_after = state.particles.iter_active().next().unwrap().1.pos;
        assert_ne!(particle_before, particle_after);
    }

    #[test]
    fn test_death_then_retry_and_menu() {
        let mut state = started(7);
        state.player.health = 1;
        let mut enemy = Enemy::new(EnemyKind::Fast, state.player.pos, 1, 0.0);
        enemy.speed = 0.0;
        state.enemies.acquire(enemy).unwrap();

        tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::PlayerDied));

        // Game over keeps particles fading but freezes the clock
        let elapsed = state.elapsed;
        let particles = state.particles.active_count();
        tick(&mut state, &fire(), 1.0);
        assert_eq!(state.elapsed, elapsed);
        assert!(state.particles.active_count() < particles);
        assert_eq!(state.bullets.active_count(), 0);

        tick(&mut state, &TickInput::confirm(), 0.1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
        assert!(state.player.active);
        assert_eq!(state.particles.active_count(), 0);

        tick(&mut state, &TickInput::cancel(), 0.1);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_cancel_keeps_pools() {
        let mut state = started(8);
        tick(&mut state, &fire(), 0.0);
        tick(&mut state, &TickInput::cancel(), 0.1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.bullets.active_count(), 2);

        tick(&mut state, &TickInput::default(), 0.1);
        assert_eq!(state.bullets.active_count(), 2);
    }

    #[test]
    fn test_game_over_cancel_returns_to_menu() {
        let mut state = started(9);
        state.set_phase(GamePhase::GameOver);
        tick(&mut state, &TickInput::cancel(), 0.1);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let dt = 1.0 / 60.0;
        for frame in 0..1800 {
            let (input1, input2) = if frame == 0 {
                (TickInput::confirm(), TickInput::confirm())
            } else {
                (autopilot_input(&state1), autopilot_input(&state2))
            };
            tick(&mut state1, &input1, dt);
            tick(&mut state2, &input2, dt);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player.score, state2.player.score);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(
            state1.enemies.active_indices(),
            state2.enemies.active_indices()
        );
    }

    #[test]
    fn test_autopilot_dodges_threat() {
        let mut state = started(10);
        let pos = state.player.pos;
        let ahead = pos + Vec2::new(5.0, -60.0);
        let enemy = Enemy::new(EnemyKind::Normal, ahead, 1, 0.0);
        state.enemies.acquire(enemy).unwrap();

        let input = autopilot_input(&state);
        assert!(input.fire);
        assert!(input.left);
        assert!(!input.right);
    }

    #[test]
    fn test_autopilot_lines_up_under_target() {
        let mut state = started(11);
        let pos = state.player.pos;
        let target = Vec2::new(pos.x + 200.0, 50.0);
        let enemy = Enemy::new(EnemyKind::Normal, target, 1, 0.0);
        state.enemies.acquire(enemy).unwrap();

        let input = autopilot_input(&state);
        assert!(input.right);
        assert_eq!(autopilot_input(&GameState::new(1)), TickInput::confirm());
    }
}
