//! Drawing surface abstraction.
//!
//! The particle field only ever clears the canvas and fills circles, so that
//! is all a surface has to provide. [`CommandBuffer`] records the calls for
//! headless hosts and tests.

use std::fmt;

use folio_core::Bounds;

/// Fill color: 8-bit RGB plus float alpha, like a CSS `rgba()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f32,
}

impl Rgba {
    /// Creates a color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// A 2D canvas in pixel coordinates, origin top-left.
pub trait Surface {
    /// Clears the whole canvas.
    fn clear(&mut self, bounds: Bounds);

    /// Draws a filled circle.
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba);
}

/// A recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Canvas cleared.
    Clear {
        /// Canvas width.
        width: u32,
        /// Canvas height.
        height: u32,
    },
    /// Filled circle.
    Circle {
        /// Center X.
        x: f32,
        /// Center Y.
        y: f32,
        /// Radius.
        radius: f32,
        /// Fill color.
        color: Rgba,
    },
}

/// Surface that records what was drawn since the last clear.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl CommandBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(64),
            frames: 0,
        }
    }

    /// Commands of the current frame.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of clears seen so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of circles in the current frame.
    #[must_use]
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }
}

impl Surface for CommandBuffer {
    fn clear(&mut self, bounds: Bounds) {
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::Clear {
            width: bounds.width(),
            height: bounds.height(),
        });
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle { x, y, radius, color });
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn clear(&mut self, bounds: Bounds) {
        (**self).clear(bounds);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        (**self).fill_circle(x, y, radius, color);
    }
}
