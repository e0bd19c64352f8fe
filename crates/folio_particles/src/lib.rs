//! # Folio Particles
//!
//! The ambient background: a fixed-count field of dots that drift, wrap
//! around the canvas edges and shy away from the pointer, redrawn once per
//! display frame.
//!
//! ```text
//! ┌───────────┐  wait_next_frame  ┌────────────┐  step + render  ┌─────────┐
//! │ FrameClock│ ────────────────> │ FrameLoop  │ ──────────────> │ Surface │
//! └───────────┘                   └────────────┘                 └─────────┘
//!                                   ▲ CancelToken
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod field;
pub mod frame_loop;
pub mod layer;
pub mod particle;
pub mod surface;

pub use field::{count_for_width, repulsion, ParticleField};
pub use frame_loop::{
    CancelToken, FixedRateClock, FrameClock, FrameHandler, FrameInfo, FrameLoop, FrameLoopReport,
    ManualClock,
};
pub use layer::ParticleLayer;
pub use particle::Particle;
pub use surface::{CommandBuffer, DrawCommand, Rgba, Surface};
