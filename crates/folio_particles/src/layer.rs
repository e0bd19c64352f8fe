//! The particle field bound to its drawing surface.

use folio_core::config::ParticleConfig;
use folio_core::{rng_from_seed, Bounds, FolioError, FolioResult, Pointer, Viewport};

use crate::field::ParticleField;
use crate::surface::Surface;

/// Particle field plus the canvas it draws into.
///
/// Construction is the only fallible step: a missing surface or a collapsed
/// viewport is a configuration error. After that, [`ParticleLayer::tick`]
/// and [`ParticleLayer::resize`] are total.
#[derive(Debug)]
pub struct ParticleLayer<S: Surface> {
    field: ParticleField,
    surface: S,
}

impl<S: Surface> ParticleLayer<S> {
    /// Binds a freshly seeded field to `surface`.
    ///
    /// # Errors
    ///
    /// - [`FolioError::MissingSurface`] if `surface` is `None`
    /// - [`FolioError::InvalidBounds`] if the viewport has a zero side
    pub fn new(config: ParticleConfig, viewport: Viewport, surface: Option<S>) -> FolioResult<Self> {
        let surface = surface.ok_or(FolioError::MissingSurface)?;
        let bounds = Bounds::new(viewport.width, viewport.height)?;
        let rng = rng_from_seed(config.seed);
        let field = ParticleField::new(config, bounds, rng);
        tracing::info!(particles = field.len(), "particle layer ready");
        Ok(Self { field, surface })
    }

    /// One animation frame: step, then render.
    pub fn tick(&mut self, pointer: Pointer) {
        self.field.step(pointer);
        self.field.render(&mut self.surface);
    }

    /// Reseeds for a new viewport. A collapsed viewport (minimized window)
    /// keeps the current field until a usable size arrives.
    pub fn resize(&mut self, viewport: Viewport) {
        match viewport.bounds() {
            Some(bounds) => self.field.resize(bounds),
            None => tracing::debug!(?viewport, "ignoring resize to empty viewport"),
        }
    }

    /// The simulated field.
    #[must_use]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// The drawing surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CommandBuffer;

    fn config() -> ParticleConfig {
        ParticleConfig {
            seed: Some(1),
            ..ParticleConfig::default()
        }
    }

    #[test]
    fn test_missing_surface_fails_fast() {
        let err = ParticleLayer::<CommandBuffer>::new(config(), Viewport::new(800, 600), None)
            .unwrap_err();
        assert!(matches!(err, FolioError::MissingSurface));
    }

    #[test]
    fn test_zero_viewport_fails_fast() {
        let err = ParticleLayer::new(config(), Viewport::new(0, 600), Some(CommandBuffer::new()))
            .unwrap_err();
        assert!(matches!(err, FolioError::InvalidBounds { .. }));
    }

    #[test]
    fn test_tick_draws_every_particle() {
        let mut layer =
            ParticleLayer::new(config(), Viewport::new(1024, 768), Some(CommandBuffer::new()))
                .unwrap();
        layer.tick(Pointer::default());
        assert_eq!(layer.surface().circle_count(), 50);
        assert_eq!(layer.surface().frames(), 1);
    }

    #[test]
    fn test_resize_reseeds_for_narrow_viewport() {
        let mut layer =
            ParticleLayer::new(config(), Viewport::new(1024, 768), Some(CommandBuffer::new()))
                .unwrap();
        layer.resize(Viewport::new(375, 812));
        assert_eq!(layer.field().len(), 25);
        layer.resize(Viewport::new(0, 0));
        assert_eq!(layer.field().len(), 25);
    }
}
