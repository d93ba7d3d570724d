//! Per-tick motion and retirement
//!
//! Every active entity advances by `velocity * dt`. Integration is
//! variable-step: one call per rendered frame with that frame's `dt`.

use super::pool::Pool;
use super::rng::SimRng;
use super::state::{Bullet, Enemy, GameState, Particle, Star};
use crate::consts::*;

/// What a star does when it falls off the bottom edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarWrap {
    /// Re-enter at the top in a random column
    NewColumn,
    /// Re-enter at the top in the same column
    SameColumn,
}

/// Advance all gameplay entities and the star field by `dt`
pub fn integrate(state: &mut GameState, dt: f32) {
    integrate_bullets(&mut state.bullets, dt);
    integrate_enemies(&mut state.enemies, dt);
    integrate_particles(&mut state.particles, dt);
    integrate_stars(
        &mut state.stars,
        &mut state.rng,
        dt,
        1.0,
        StarWrap::NewColumn,
    );
}

/// Move bullets; retire those past the top or bottom margin
pub fn integrate_bullets(bullets: &mut Pool<Bullet>, dt: f32) {
    bullets.retain_active(|b| {
        b.pos += b.vel * dt;
        b.pos.y >= -BULLET_MARGIN && b.pos.y <= SCREEN_HEIGHT + BULLET_MARGIN
    });
}

/// Wavy descent; retire enemies well below the screen
pub fn integrate_enemies(enemies: &mut Pool<Enemy>, dt: f32) {
    enemies.retain_active(|e| {
        e.move_angle += dt * ENEMY_WAVE_RATE;
        e.pos.y += e.speed * dt;
        e.pos.x += e.move_angle.sin() * ENEMY_WAVE_AMPLITUDE * dt;
        e.pos.y <= SCREEN_HEIGHT + ENEMY_EXIT_MARGIN
    });
}

/// Move particles, burn lifetime, apply drag; retire expired ones
///
/// Drag is applied once per tick regardless of `dt`.
pub fn integrate_particles(particles: &mut Pool<Particle>, dt: f32) {
    particles.retain_active(|p| {
        p.pos += p.vel * dt;
        p.lifetime -= dt;
        p.vel *= PARTICLE_DRAG;
        p.lifetime > 0.0
    });
}

/// Scroll the star field at `speed_scale` of each star's own speed
pub fn integrate_stars(
    stars: &mut Pool<Star>,
    rng: &mut SimRng,
    dt: f32,
    speed_scale: f32,
    wrap: StarWrap,
) {
    for (_, star) in stars.iter_active_mut() {
        star.pos.y += star.speed * speed_scale * dt;
        if star.pos.y > SCREEN_HEIGHT {
            star.pos.y = 0.0;
            if wrap == StarWrap::NewColumn {
                star.pos.x = rng.int_inclusive(0, SCREEN_WIDTH as i32) as f32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Color, EnemyKind};
    use glam::Vec2;

    #[test]
    fn test_bullets_retire_past_margin() {
        // 500 px/s over 1/128 s is exactly 3.90625 px
        let dt = 1.0 / 128.0;
        let mut bullets = Pool::with_capacity(4);
        let up = bullets
            .acquire(Bullet::player_shot(Vec2::new(100.0, -6.09375)))
            .unwrap();
        let mut down_shot = Bullet::player_shot(Vec2::new(100.0, 100.0));
        down_shot.vel.y = 500.0;
        let down = bullets.acquire(down_shot).unwrap();

        // Lands exactly on the margin: still active
        integrate_bullets(&mut bullets, dt);
        assert_eq!(bullets.get(up).unwrap().pos.y, -BULLET_MARGIN);

        integrate_bullets(&mut bullets, dt);
        assert!(!bullets.is_active(up));
        assert!(bullets.is_active(down));
        assert_eq!(bullets.get(down).unwrap().pos.y, 107.8125);
    }

    #[test]
    fn test_enemy_wavy_descent() {
        let mut enemies = Pool::with_capacity(1);
        let slot = enemies
            .acquire(Enemy::new(EnemyKind::Normal, Vec2::new(400.0, 0.0), 1, 0.0))
            .unwrap();

        integrate_enemies(&mut enemies, 0.5);

        let e = enemies.get(slot).unwrap();
        assert_eq!(e.move_angle, 1.5);
        assert_eq!(e.pos.y, 45.0);
        let expected_x = 400.0 + 1.5f32.sin() * 50.0 * 0.5;
        assert!((e.pos.x - expected_x).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_retired_below_screen() {
        let mut enemies = Pool::with_capacity(1);
        let slot = enemies
            .acquire(Enemy::new(EnemyKind::Fast, Vec2::new(400.0, 640.0), 1, 0.0))
            .unwrap();
        integrate_enemies(&mut enemies, 0.1);
        assert!(!enemies.is_active(slot));
    }

    #[test]
    fn test_particle_expires_at_lifetime() {
        let mut particles = Pool::with_capacity(1);
        let slot = particles
            .acquire(Particle {
                pos: Vec2::ZERO,
                vel: Vec2::new(100.0, 0.0),
                radius: 3.0,
                lifetime: 0.5,
                max_lifetime: 0.5,
                color: Color::WHITE,
            })
            .unwrap();

        // dt is a power of two so the lifetime hits zero exactly
        let dt = 0.125;
        for step in 1..=3 {
            integrate_particles(&mut particles, dt);
            assert!(particles.is_active(slot), "expired early at step {step}");
        }
        integrate_particles(&mut particles, dt);
        assert!(!particles.is_active(slot));
    }

    #[test]
    fn test_particle_drag_is_per_tick() {
        let mut particles = Pool::with_capacity(1);
        let slot = particles
            .acquire(Particle {
                pos: Vec2::ZERO,
                vel: Vec2::new(100.0, 0.0),
                radius: 3.0,
                lifetime: 10.0,
                max_lifetime: 10.0,
                color: Color::WHITE,
            })
            .unwrap();

        integrate_particles(&mut particles, 0.001);
        let p = particles.get(slot).unwrap();
        assert!((p.vel.x - 98.0).abs() < 1e-4);
    }

    #[test]
    fn test_stars_wrap() {
        let mut rng = SimRng::new(3);
        let mut stars = Pool::with_capacity(2);
        let keep = stars
            .acquire(Star {
                pos: Vec2::new(123.0, 599.0),
                speed: 100.0,
                brightness: 1.0,
                size: 1.0,
            })
            .unwrap();

        integrate_stars(&mut stars, &mut rng, 0.1, 1.0, StarWrap::SameColumn);
        let star = stars.get(keep).unwrap();
        assert_eq!(star.pos, Vec2::new(123.0, 0.0));

        // Slowed stars do not wrap yet
        integrate_stars(&mut stars, &mut rng, 1.0, 0.3, StarWrap::NewColumn);
        assert!((stars.get(keep).unwrap().pos.y - 30.0).abs() < 1e-4);
        assert_eq!(stars.active_count(), 1);
    }

    #[test]
    fn test_stars_wrap_to_new_column() {
        let mut rng = SimRng::new(8);
        let mut stars = Pool::with_capacity(20);
        for _ in 0..20 {
            stars
                .acquire(Star {
                    pos: Vec2::new(123.0, 599.0),
                    speed: 100.0,
                    brightness: 1.0,
                    size: 1.0,
                })
                .unwrap();
        }

        integrate_stars(&mut stars, &mut rng, 0.1, 1.0, StarWrap::NewColumn);

        for (_, star) in stars.iter_active() {
            assert_eq!(star.pos.y, 0.0);
            assert!((0.0..=SCREEN_WIDTH).contains(&star.pos.x));
            assert_eq!(star.pos.x.fract(), 0.0);
        }
        assert!(stars.iter_active().any(|(_, s)| s.pos.x != 123.0));
    }
}
