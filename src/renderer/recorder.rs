//! Draw-call recorder
//!
//! A [`Painter`] that stores every call. Used by tests and the native
//! headless driver, which has no surface to draw on.

use glam::Vec2;

use super::{Painter, Rgba, TextStyle};

/// One captured draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fade {
        color: Rgba,
    },
    GlowCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
        glow: f32,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
        line_width: f32,
    },
    Text {
        pos: Vec2,
        text: String,
        style: TextStyle,
    },
}

/// Collects draw calls for one or more frames
#[derive(Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All recorded text, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn glow_circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::GlowCircle { .. }))
            .count()
    }

    pub fn stroke_circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeCircle { .. }))
            .count()
    }
}

impl Painter for Recorder {
    fn fade(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Fade { color });
    }

    fn glow_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow: f32) {
        self.commands.push(DrawCommand::GlowCircle {
            center,
            radius,
            color,
            glow,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, line_width: f32) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
            line_width,
        });
    }

    fn text(&mut self, pos: Vec2, text: &str, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.to_string(),
            style: *style,
        });
    }
}
