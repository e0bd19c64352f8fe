//! A single ambient particle.

use bytemuck::{Pod, Zeroable};

/// One drifting dot.
///
/// `#[repr(C)]` + `Pod` so a whole field can be uploaded to a GPU buffer or
/// shared with a JS canvas as raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// X position (px).
    pub x: f32,
    /// Y position (px).
    pub y: f32,
    /// X velocity (px/frame).
    pub vx: f32,
    /// Y velocity (px/frame).
    pub vy: f32,
    /// Radius (px).
    pub size: f32,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
}

impl Particle {
    /// Size of a particle in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Velocity magnitude (px/frame).
    #[inline]
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.vx.hypot(self.vy)
    }
}
