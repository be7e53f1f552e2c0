//! Rendering module
//!
//! The engine draws through the [`Painter`] trait: a handful of primitive
//! operations the host surface provides. `canvas` backs it with a browser 2D
//! context; `recorder` captures draw calls for tests and headless runs.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod colors;
pub mod recorder;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use colors::Rgba;
pub use recorder::{DrawCommand, Recorder};
pub use scene::draw_frame;

use glam::Vec2;

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Vertical text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

/// Font size, color and anchoring for a text draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Rgba,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

/// Primitive draw operations consumed by [`draw_frame`]
pub trait Painter {
    /// Fill the whole surface with a (usually translucent) color
    fn fade(&mut self, color: Rgba);

    /// Filled circle with a soft glow of `glow` units around it
    fn glow_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow: f32);

    /// Circle outline
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, line_width: f32);

    /// Text anchored at `pos`
    fn text(&mut self, pos: Vec2, text: &str, style: &TextStyle);
}
