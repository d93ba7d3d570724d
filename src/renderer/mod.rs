//! Rendering module
//!
//! Backend-agnostic: turns a [`FrameSnapshot`](crate::sim::FrameSnapshot) into
//! a flat triangle list plus HUD text that any GPU or software rasteriser can
//! present.

pub mod frame;
pub mod shapes;
pub mod vertex;

pub use frame::{FrameMesh, HudText, RenderOptions, build_frame};
pub use vertex::Vertex;
