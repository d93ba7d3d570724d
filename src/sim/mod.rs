//! Simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Fixed-capacity pools with stable slot order
//! - No rendering or platform dependencies
//!
//! The host feeds [`tick`] one [`TickInput`] and the frame's `dt` per frame,
//! then draws a [`FrameSnapshot`] of the result.

pub mod collision;
pub mod integrate;
pub mod pool;
pub mod rng;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_rect_overlap, rects_overlap, resolve_collisions};
pub use pool::{Pool, PoolError};
pub use rng::SimRng;
pub use snapshot::FrameSnapshot;
pub use state::{
    Bullet, Color, Enemy, EnemyKind, GameEvent, GamePhase, GameState, Particle, Player, Star,
};
pub use tick::{TickInput, autopilot_input, tick};
