//! Frame building: snapshot in, triangle list and HUD text out

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shapes::{circle, rect, regular_polygon, rotated_rect, segments_for, triangle};
use super::vertex::{Vertex, colors};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::snapshot::{BulletView, EnemyView, FrameSnapshot, ParticleView, PlayerView};
use crate::sim::{EnemyKind, GamePhase};

/// Presentation switches derived from settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Draw particle effects
    pub particles: bool,
    /// Suppress the damage flicker
    pub reduced_motion: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            particles: true,
            reduced_motion: false,
        }
    }
}

/// One line of HUD or menu text, positioned by its top-left corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudText {
    pub pos: Vec2,
    pub size: f32,
    pub text: String,
    pub color: [f32; 4],
}

/// Everything a backend needs to present one frame
#[derive(Debug, Clone, Default)]
pub struct FrameMesh {
    pub clear_color: [f32; 4],
    /// Triangle list, back to front
    pub vertices: Vec<Vertex>,
    pub text: Vec<HudText>,
}

impl FrameMesh {
    /// Raw vertex bytes ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    fn label(&mut self, pos: Vec2, size: f32, text: impl Into<String>, color: [f32; 4]) {
        self.text.push(HudText {
            pos,
            size,
            text: text.into(),
            color,
        });
    }

    /// Text horizontally centred on the screen (glyphs approximated as half the size wide)
    fn centered(&mut self, y: f32, size: f32, text: impl Into<String>, color: [f32; 4]) {
        let text = text.into();
        let width = text.chars().count() as f32 * size * 0.5;
        let pos = Vec2::new((SCREEN_WIDTH - width) / 2.0, y);
        self.label(pos, size, text, color);
    }
}

/// Build the draw list for one frame
///
/// `clock` is wall time in seconds and only drives cosmetic animation
/// (the engine flame), never anything the simulation reads back.
pub fn build_frame(snapshot: &FrameSnapshot, options: &RenderOptions, clock: f32) -> FrameMesh {
    let mut mesh = FrameMesh {
        clear_color: colors::BACKGROUND,
        ..Default::default()
    };

    match snapshot.phase {
        GamePhase::Menu => {
            draw_stars(&mut mesh.vertices, snapshot, 1.0);
            draw_menu(&mut mesh);
        }
        GamePhase::Playing => {
            draw_stars(&mut mesh.vertices, snapshot, 1.0);
            for bullet in &snapshot.bullets {
                draw_bullet(&mut mesh.vertices, bullet);
            }
            for enemy in &snapshot.enemies {
                draw_enemy(&mut mesh.vertices, enemy);
            }
            if snapshot.player.active {
                draw_player(&mut mesh.vertices, &snapshot.player, options, clock);
            }
            if options.particles {
                for particle in &snapshot.particles {
                    draw_particle(&mut mesh.vertices, particle);
                }
            }
            draw_hud(&mut mesh, snapshot);
        }
        GamePhase::GameOver => {
            draw_stars(&mut mesh.vertices, snapshot, 200.0 / 255.0);
            if options.particles {
                for particle in &snapshot.particles {
                    draw_particle(&mut mesh.vertices, particle);
                }
            }
            draw_game_over(&mut mesh, snapshot);
        }
    }

    mesh
}

fn draw_stars(out: &mut Vec<Vertex>, snapshot: &FrameSnapshot, dim: f32) {
    for star in &snapshot.stars {
        let color = [1.0, 1.0, 1.0, star.brightness * dim];
        rect(out, star.pos, Vec2::splat(star.size / 2.0), color);
    }
}

fn draw_bullet(out: &mut Vec<Vertex>, bullet: &BulletView) {
    let c = bullet.color;
    // Outer glow, inner glow, core
    circle(out, bullet.pos, bullet.radius * 3.0, c.to_rgba(0.15), 12);
    circle(out, bullet.pos, bullet.radius * 1.5, c.to_rgba(0.4), 10);
    circle(out, bullet.pos, bullet.radius, c.to_rgba(1.0), 8);
}

fn draw_enemy(out: &mut Vec<Vertex>, enemy: &EnemyView) {
    let size = enemy.half_extents.x;
    match enemy.kind {
        EnemyKind::Normal => {
            let tilt = (enemy.move_angle.sin() * 15.0).to_radians();
            let (pos, half) = (enemy.pos, enemy.half_extents);
            rotated_rect(out, pos, half, tilt, colors::NORMAL_BODY);
            rotated_rect(out, pos, half * 0.6, tilt, colors::NORMAL_CORE);
        }
        EnemyKind::Fast => {
            // Nose points down the screen
            let tip = enemy.pos + Vec2::new(0.0, size);
            let left = enemy.pos + Vec2::new(-size, -size);
            let right = enemy.pos + Vec2::new(size, -size);
            triangle(out, tip, left, right, colors::FAST_BODY);

            let core = |p: Vec2| enemy.pos + (p - enemy.pos) * 0.5;
            triangle(out, core(tip), core(left), core(right), colors::FAST_CORE);
        }
        EnemyKind::Strong => {
            let rotation = (enemy.move_angle * 10.0).to_radians();
            let pos = enemy.pos;
            let core = size * 2.0 / 3.0;
            regular_polygon(out, pos, 6, size, rotation, colors::STRONG_BODY);
            regular_polygon(out, pos, 6, core, rotation, colors::STRONG_CORE);

            // Remaining health as pips above the hull
            for i in 0..enemy.health {
                let pip = Vec2::new(pos.x - 10.0 + i as f32 * 10.0, pos.y - size - 8.0);
                circle(out, pip, 3.0, colors::HEALTH_PIP, 8);
            }
        }
    }
}

fn draw_player(out: &mut Vec<Vertex>, player: &PlayerView, options: &RenderOptions, clock: f32) {
    // Blink while the contact immunity runs
    let flicker = player.damage_timer > 0.0 && (player.damage_timer * 10.0) as i32 % 2 == 0;
    if flicker && !options.reduced_motion {
        return;
    }

    let p = player.pos;
    let h = player.half_extents;

    let nose = p + Vec2::new(0.0, -h.y);
    let left = p + Vec2::new(-h.x, h.y);
    let right = p + Vec2::new(h.x, h.y);
    triangle(out, nose, left, right, colors::PLAYER_HULL);

    let cockpit = p + Vec2::new(0.0, -h.y * 0.4);
    triangle(
        out,
        cockpit,
        p + Vec2::new(-h.x * 0.3, h.y * 0.2),
        p + Vec2::new(h.x * 0.3, h.y * 0.2),
        colors::PLAYER_COCKPIT,
    );

    let flame_len = 10.0 + (clock * 20.0).sin() * 5.0;
    triangle(
        out,
        p + Vec2::new(-h.x * 0.4, h.y),
        p + Vec2::new(h.x * 0.4, h.y),
        p + Vec2::new(0.0, h.y + flame_len),
        colors::PLAYER_FLAME,
    );
}

fn draw_particle(out: &mut Vec<Vertex>, particle: &ParticleView) {
    let ratio = particle.life_ratio;
    let radius = particle.radius * ratio;
    if radius <= 0.0 {
        return;
    }
    let (pos, c) = (particle.pos, particle.color);
    let glow = radius * 2.0;
    circle(out, pos, glow, c.to_rgba(ratio * 0.3), segments_for(glow));
    circle(out, pos, radius, c.to_rgba(ratio), segments_for(radius));
}

fn draw_hud(mesh: &mut FrameMesh, snapshot: &FrameSnapshot) {
    let hud = &snapshot.hud;
    let white = colors::HUD_TEXT;

    mesh.label(Vec2::new(10.0, 10.0), 20.0, "HP:", white);
    let pip = Vec2::splat(9.0);
    for i in 0..hud.health {
        let center = Vec2::new(50.0 + i as f32 * 25.0, 12.0 + 9.0);
        rect(&mut mesh.vertices, center, pip, colors::HUD_HEALTH);
    }

    let score = format!("SCORE: {}", hud.score);
    mesh.label(Vec2::new(10.0, 40.0), 20.0, score, white);
    let wave = format!("WAVE: {}", hud.wave);
    mesh.label(Vec2::new(10.0, 65.0), 20.0, wave, white);
    let time = format!("{:.1} sec", hud.elapsed);
    let pos = Vec2::new(SCREEN_WIDTH - 110.0, 10.0);
    mesh.label(pos, 20.0, time, white);
}

fn draw_menu(mesh: &mut FrameMesh) {
    let cx = SCREEN_WIDTH / 2.0;
    let gray = colors::PROMPT;

    let title_y = SCREEN_HEIGHT / 2.0 - 100.0;
    mesh.centered(title_y, 50.0, "SPACE SHOOTER", colors::TITLE);
    mesh.centered(320.0, 24.0, "[ ENTER ] to START", gray);

    let info_y = 420.0;
    let pos = Vec2::new(cx - 80.0, info_y);
    mesh.label(pos, 20.0, "CONTROLS:", colors::HUD_TEXT);
    let controls = [
        (35.0, "WASD / Arrow Keys  -  Move"),
        (60.0, "SPACE / Left Click -  Shoot"),
    ];
    for (dy, line) in controls {
        let pos = Vec2::new(cx - 140.0, info_y + dy);
        mesh.label(pos, 16.0, line, gray);
    }

    // Enemy legend: one icon per kind next to its score
    let icon_x = cx - 111.0;
    let text_x = cx - 90.0;

    let normal = Vec2::new(icon_x, info_y + 109.0);
    let half = Vec2::splat(9.0);
    rect(&mut mesh.vertices, normal, half, colors::NORMAL_BODY);
    let pos = Vec2::new(text_x, info_y + 100.0);
    mesh.label(pos, 16.0, "Normal (100 pts)", gray);

    let fast = Vec2::new(icon_x, info_y + 135.0);
    triangle(
        &mut mesh.vertices,
        fast + Vec2::new(0.0, -10.0),
        fast + Vec2::new(10.0, 8.0),
        fast + Vec2::new(-10.0, 8.0),
        colors::FAST_BODY,
    );
    let pos = Vec2::new(text_x, info_y + 128.0);
    mesh.label(pos, 16.0, "Fast   (150 pts)", gray);

    let hex = Vec2::new(icon_x, info_y + 165.0);
    let body = colors::STRONG_BODY;
    regular_polygon(&mut mesh.vertices, hex, 6, 10.0, 0.0, body);
    let pos = Vec2::new(text_x, info_y + 156.0);
    mesh.label(pos, 16.0, "Strong (300 pts)", gray);
}

fn draw_game_over(mesh: &mut FrameMesh, snapshot: &FrameSnapshot) {
    let hud = &snapshot.hud;
    let mid = SCREEN_HEIGHT / 2.0;
    let (white, gray) = (colors::HUD_TEXT, colors::PROMPT);

    let red = colors::GAME_OVER;
    mesh.centered(mid - 100.0, 50.0, "GAME OVER!", red);
    let score = format!("SCORE: {}", hud.score);
    mesh.centered(mid - 30.0, 30.0, score, white);
    let time = format!("Survival time: {:.1} seconds", hud.elapsed);
    mesh.centered(mid + 10.0, 20.0, time, white);
    let wave = format!("Wave reached: {}", hud.wave);
    mesh.centered(mid + 40.0, 20.0, wave, white);
    let retry = "Press ENTER to play again";
    mesh.centered(mid + 90.0, 20.0, retry, gray);
    mesh.centered(mid + 120.0, 20.0, "Press ESC for menu", gray);
}
