//! # Ambient Particle Field
//!
//! A fixed-size set of dots drifting across the page background.
//!
//! Per frame, for every particle:
//! 1. Euler step: `position += velocity` (one unit timestep per frame)
//! 2. Wrap each axis into `[0, extent)` (torus, not a bounce)
//! 3. If the pointer is closer than `R`, nudge the position straight away
//!    from it by `(R - d) / R * R * damping`. The nudge is positional only and
//!    does not touch velocity, so it does not carry into the next frame.
//! 4. Wrap again so the nudge cannot leave the canvas
//!
//! The field is only reallocated by [`ParticleField::seed`].

use folio_core::config::ParticleConfig;
use folio_core::{Bounds, FolioRng, Pointer};
use rand::Rng;

use crate::particle::Particle;
use crate::surface::{Rgba, Surface};

/// Particle count for a viewport width: fewer particles at or below the
/// mobile breakpoint.
#[must_use]
pub fn count_for_width(config: &ParticleConfig, width: u32) -> usize {
    if width > config.mobile_breakpoint {
        config.desktop_count
    } else {
        config.mobile_count
    }
}

/// Positional push for a particle at `(x, y)`.
///
/// Zero at or beyond `radius`, and when the particle sits exactly on the
/// pointer (no direction to push in). Otherwise the magnitude is
/// `(radius - d) * damping`, strictly growing as `d` shrinks.
#[inline]
#[must_use]
pub fn repulsion(x: f32, y: f32, pointer: Pointer, radius: f32, damping: f32) -> (f32, f32) {
    let dx = x - pointer.x;
    let dy = y - pointer.y;
    let distance = dx.hypot(dy);

    if distance >= radius || distance <= f32::EPSILON {
        return (0.0, 0.0);
    }

    let force = (radius - distance) / radius;
    let push = force * radius * damping / distance;
    (dx * push, dy * push)
}

/// Wraps `value` into `[0, extent)`.
#[inline]
fn wrap(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid of a tiny negative rounds up to `extent` in f32
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

/// Uniform sample from `[lo, hi)`, or `lo` when the range is empty.
#[inline]
fn sample(rng: &mut FolioRng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// The ambient particle field.
#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Bounds,
    config: ParticleConfig,
    color: Rgba,
    rng: FolioRng,
}

impl ParticleField {
    /// Creates a field sized for `bounds`, with the particle count picked from
    /// the bounds width.
    #[must_use]
    pub fn new(config: ParticleConfig, bounds: Bounds, rng: FolioRng) -> Self {
        let [r, g, b] = config.color;
        let count = count_for_width(&config, bounds.width());
        let mut field = Self {
            particles: Vec::new(),
            bounds,
            color: Rgba::new(r, g, b, 1.0),
            config,
            rng,
        };
        field.seed(count, bounds);
        field
    }

    /// Replaces every particle with `count` fresh ones inside `bounds`.
    ///
    /// Positions are uniform over `[0, width) x [0, height)`, velocities
    /// uniform over `[-speed, speed)` per axis, radius and opacity uniform over
    /// their configured ranges.
    pub fn seed(&mut self, count: usize, bounds: Bounds) {
        self.bounds = bounds;
        self.particles.clear();
        self.particles.reserve_exact(count);

        let width = bounds.width_f32();
        let height = bounds.height_f32();
        let speed = self.config.speed.abs();

        for _ in 0..count {
            let particle = Particle {
                x: sample(&mut self.rng, 0.0, width),
                y: sample(&mut self.rng, 0.0, height),
                vx: sample(&mut self.rng, -speed, speed),
                vy: sample(&mut self.rng, -speed, speed),
                size: sample(&mut self.rng, self.config.radius_min, self.config.radius_max),
                opacity: sample(&mut self.rng, self.config.opacity_min, self.config.opacity_max)
                    .clamp(0.0, 1.0),
            };
            self.particles.push(particle);
        }

        tracing::debug!(count, width = bounds.width(), height = bounds.height(), "seeded particle field");
    }

    /// Reseeds for a resized viewport. Existing particles are discarded.
    pub fn resize(&mut self, bounds: Bounds) {
        let count = count_for_width(&self.config, bounds.width());
        tracing::info!(count, width = bounds.width(), height = bounds.height(), "viewport resized, reseeding");
        self.seed(count, bounds);
    }

    /// Advances every particle by one frame.
    pub fn step(&mut self, pointer: Pointer) {
        let width = self.bounds.width_f32();
        let height = self.bounds.height_f32();
        let radius = self.config.repulsion_radius;
        let damping = self.config.repulsion_damping;

        for particle in &mut self.particles {
            particle.x = wrap(particle.x + particle.vx, width);
            particle.y = wrap(particle.y + particle.vy, height);

            let (nx, ny) = repulsion(particle.x, particle.y, pointer, radius, damping);
            if nx != 0.0 || ny != 0.0 {
                particle.x = wrap(particle.x + nx, width);
                particle.y = wrap(particle.y + ny, height);
            }
        }
    }

    /// Clears `surface` and draws every particle as a filled circle.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.bounds);
        for particle in &self.particles {
            surface.fill_circle(
                particle.x,
                particle.y,
                particle.size,
                self.color.with_alpha(particle.opacity),
            );
        }
    }

    /// Current particles.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True if the field holds no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Canvas bounds the field wraps within.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The particle array as raw bytes (for GPU or JS upload).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }
}
