//! Space Shooter entry point
//!
//! Runs the simulation headless on a simulated frame clock. Usage:
//!
//! ```text
//! space-shooter [settings.json]
//! ```
//!
//! `RUST_LOG=info` (or `debug`) shows phase changes, waves and kills.

use std::path::PathBuf;

use space_shooter::Settings;
use space_shooter::renderer::{RenderOptions, build_frame};
use space_shooter::sim::{
    FrameSnapshot, GameEvent, GamePhase, GameState, SimRng, TickInput, autopilot_input, tick,
};

/// Outcome of one run, logged when it ends
#[derive(Debug, Default)]
struct RunStats {
    ticks: u64,
    kills: u32,
    hits_taken: u32,
    shots: u32,
    peak_triangles: usize,
}

/// Game instance holding all host-side state
struct Game {
    state: GameState,
    settings: Settings,
    render_options: RenderOptions,
    /// Wall clock for cosmetic animation (seconds)
    clock: f32,
}

impl Game {
    fn new(settings: Settings) -> Self {
        let rng = match settings.seed {
            Some(seed) => SimRng::new(seed),
            None => SimRng::from_entropy(),
        };
        log::info!("Seed: {}", rng.seed());

        Self {
            state: GameState::with_rng(rng),
            render_options: settings.render_options(),
            settings,
            clock: 0.0,
        }
    }

    fn input(&self) -> TickInput {
        if self.settings.autopilot {
            autopilot_input(&self.state)
        } else {
            TickInput::default()
        }
    }

    /// Advance one frame and render it
    fn frame(&mut self, input: &TickInput, stats: &mut RunStats) {
        let dt = self.settings.frame_dt();
        tick(&mut self.state, input, dt);
        self.clock += dt;

        for event in &self.state.events {
            match event {
                GameEvent::ShotFired => stats.shots += 1,
                GameEvent::EnemyKilled { .. } => stats.kills += 1,
                GameEvent::PlayerHit { .. } => stats.hits_taken += 1,
                _ => {}
            }
        }

        let mesh = build_frame(
            &FrameSnapshot::capture(&self.state),
            &self.render_options,
            self.clock,
        );
        stats.peak_triangles = stats.peak_triangles.max(mesh.triangle_count());
        stats.ticks += 1;
    }

    /// Play one run from the menu until game over or the session limit
    fn run_session(&mut self, index: u32) -> RunStats {
        let mut stats = RunStats::default();

        // Menu and game over both start a fresh run on confirm
        self.frame(&TickInput::confirm(), &mut stats);
        log::info!("Session {} started", index + 1);

        let log_every = (self.settings.log_interval_secs * self.settings.target_fps as f32)
            .round()
            .max(1.0) as u64;

        for n in 1..=self.settings.max_ticks() {
            let input = self.input();
            self.frame(&input, &mut stats);

            if self.state.phase != GamePhase::Playing {
                break;
            }
            if n % log_every == 0 {
                let hud = FrameSnapshot::capture(&self.state).hud;
                log::info!(
                    "t={:.1}s wave {} score {} health {}/{} enemies {} particles {}",
                    hud.elapsed,
                    hud.wave,
                    hud.score,
                    hud.health,
                    hud.max_health,
                    self.state.enemies.active_count(),
                    self.state.particles.active_count()
                );
            }
        }

        if self.state.phase == GamePhase::Playing {
            log::info!("Session time limit reached");
            self.frame(&TickInput::cancel(), &mut stats);
        }

        stats
    }
}

fn main() {
    env_logger::init();
    log::info!("Space Shooter (headless) starting...");

    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(path.as_deref());
    let sessions = settings.sessions.max(1);

    let mut game = Game::new(settings);
    for index in 0..sessions {
        let stats = game.run_session(index);
        let hud = FrameSnapshot::capture(&game.state).hud;
        log::info!(
            "Session {} over: score {}, wave {}, survived {:.1}s, {} kills, {} hits taken, {} shots, {} ticks, peak {} triangles",
            index + 1,
            hud.score,
            hud.wave,
            hud.elapsed,
            stats.kills,
            stats.hits_taken,
            stats.shots,
            stats.ticks,
            stats.peak_triangles
        );

        match serde_json::to_string(&hud) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize summary: {}", e),
        }
    }
}
