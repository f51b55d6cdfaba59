//! # void_gesture - Gesture Trackball Manipulation
//!
//! Rotates and scales a 3D object from tracked hand positions, with the
//! mouse as a fallback input.
//!
//! # Architecture
//!
//! ```text
//!  PositionProvider ──tick──▶ GestureArbiter ──┐
//!   (hands, torso)           (mode machine)    │
//!                                              ├──▶ Trackball ─┐
//!  PointerEvent ───────────▶ PointerTracker ───┤               ├──▶ ComposedTransform
//!   (press/move/release)                       └──▶ Zoom ──────┘     (scale, then rotate)
//! ```
//!
//! Holding one hand out in front of the torso rotates the object with that
//! hand. Holding both out zooms by moving the right hand sideways.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use void_gesture::prelude::*;
//!
//! let skeleton = Arc::new(SharedSkeleton::new());
//! let controller = Arc::new(ManipulationController::new(GestureConfig::default()));
//!
//! // Capture thread: skeleton.publish(frame) for every tracked frame
//!
//! // Ticks every 10 ms
//! let mut gesture_loop = GestureLoop::new(controller.clone(), skeleton)?;
//! gesture_loop.run()?;
//!
//! let matrix = controller.current_transform().to_matrix();
//! ```

pub mod arbiter;
pub mod config;
pub mod controller;
pub mod error;
pub mod pointer;
pub mod scheduler;
pub mod sensor;
pub mod trackball;
pub mod transform;
pub mod zoom;

pub mod prelude {
    //! Common imports for gesture manipulation
    pub use crate::arbiter::{
        Arbitration, ControlMode, Eligibility, GestureArbiter, GestureEvent, GesturePhase, HandInput,
    };
    pub use crate::config::GestureConfig;
    pub use crate::controller::ManipulationController;
    pub use crate::error::{GestureError, Result};
    pub use crate::pointer::{HeldButtons, PointerAction, PointerButton, PointerEvent, PointerTracker};
    pub use crate::scheduler::GestureLoop;
    pub use crate::sensor::{
        JointSample, Joint, PositionProvider, SharedSkeleton, SkeletonFrame, TrackingStatus,
    };
    pub use crate::trackball::{project_to_sphere, Trackball, Viewport};
    pub use crate::transform::ComposedTransform;
    pub use crate::zoom::Zoom;
}

pub use prelude::*;
