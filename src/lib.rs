//! # Aviary
//!
//! **An articulated blocky bird, rendered with wgpu.**
//!
//! The bird is a tree of unit cubes and one pyramid. Each frame the current
//! joint angles are turned into a [`SceneNode`] tree, flattened into colored
//! [`Shape`]s and recorded through a [`GraphicsContext`]. Sliders and mouse
//! drag rotate the camera and the model; the head, scapulars and wings can
//! each be animated from elapsed time.
//!
//! ## Quick Start
//!
//! ```no_run
//! use aviary::*;
//!
//! fn main() -> Result<(), InitError> {
//!     init_logging(LoggingConfig::default());
//!     run(AppConfig::new().state(SceneState::new().with_flags(AnimationFlags::ALL)))
//! }
//! ```
//!
//! ## Without a window
//!
//! Everything above the GPU passes runs on the CPU, so a frame can be
//! rendered into a [`DrawList`] and inspected:
//!
//! ```
//! use aviary::{DrawList, FrameTime, SceneState, render};
//!
//! let mut state = SceneState::new();
//! let mut list = DrawList::new();
//! render::tick(&mut state, &FrameTime::at(0.0), &mut list);
//! assert_eq!(list.commands().len(), 13);
//! ```

mod animation;
mod app;
pub mod bird;
mod color;
mod controls;
mod error;
mod gpu;
mod graphics;
mod input;
mod logging;
mod overlay;
pub mod render;
mod scene_graph;
mod shape;
mod shape_pass;
mod state;
pub mod transform;

pub use animation::{AnimationFlags, Clock, FrameTime, Joint, JointAngles};
pub use app::{AppConfig, run};
pub use color::Color;
pub use controls::{Control, ControlPanel};
pub use error::InitError;
pub use gpu::GpuContext;
pub use graphics::{ClearBuffers, DrawCommand, DrawList, GraphicsContext};
pub use input::{Action, Input, KEY_BINDINGS, Response};
pub use logging::{LoggingConfig, init_logging};
pub use overlay::{OverlayPass, Quads, Rect};
pub use render::{FrameReport, StatusDisplay};
pub use scene_graph::{SceneNode, Visual};
pub use shape::{Shape, ShapeKind};
pub use shape_pass::ShapePass;
pub use state::{CameraAngles, DragState, ModelAngles, SceneState, Slider};

// Re-export math types for convenience
pub use glam::{IVec2, Mat4, Vec2, Vec3};
