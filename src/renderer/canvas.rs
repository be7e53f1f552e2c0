//! Browser 2D canvas backend

use glam::Vec2;
use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;

use super::colors::to_css;
use super::{Painter, Rgba, TextAlign, TextBaseline, TextStyle};

/// Paints onto a `CanvasRenderingContext2d` in CSS pixels
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d, width: f32, height: f32) -> Self {
        Self {
            ctx,
            width: width as f64,
            height: height as f64,
        }
    }

    /// Track the logical canvas size after a resize
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width as f64;
        self.height = height as f64;
    }

    /// Scale device pixels to logical units (call after the backing store changes)
    pub fn set_pixel_ratio(&self, dpr: f64) {
        if let Err(e) = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
            log::warn!("set_transform failed: {:?}", e);
        }
    }

    fn circle_path(&self, center: Vec2, radius: f32) -> bool {
        self.ctx.begin_path();
        match self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
        {
            Ok(()) => true,
            Err(e) => {
                log::warn!("arc failed: {:?}", e);
                false
            }
        }
    }
}

impl Painter for CanvasPainter {
    fn fade(&mut self, color: Rgba) {
        self.ctx.set_shadow_blur(0.0);
        self.ctx.set_fill_style_str(&to_css(color));
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn glow_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow: f32) {
        if !self.circle_path(center, radius) {
            return;
        }
        let css = to_css(color);
        if glow > 0.0 {
            self.ctx.set_shadow_blur(glow as f64);
            self.ctx.set_shadow_color(&css);
        }
        self.ctx.set_fill_style_str(&css);
        self.ctx.fill();
        self.ctx.set_shadow_blur(0.0);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, line_width: f32) {
        if !self.circle_path(center, radius) {
            return;
        }
        self.ctx.set_stroke_style_str(&to_css(color));
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke();
    }

    fn text(&mut self, pos: Vec2, text: &str, style: &TextStyle) {
        self.ctx
            .set_font(&format!("{}px system-ui, sans-serif", style.size.round()));
        self.ctx.set_text_align(match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
        self.ctx.set_text_baseline(match style.baseline {
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
            TextBaseline::Bottom => "bottom",
        });
        self.ctx.set_fill_style_str(&to_css(style.color));
        if let Err(e) = self.ctx.fill_text(text, pos.x as f64, pos.y as f64) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }
}
