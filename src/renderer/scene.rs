//! Frame composition
//!
//! Turns engine state into primitive draw calls. Reads the engine only.

use glam::Vec2;

use super::colors::{self, particle_color, with_alpha};
use super::{Painter, TextAlign, TextBaseline, TextStyle};
use crate::settings::Settings;
use crate::sim::{EffectKind, GamePhase, SimulationEngine};

/// Draw one frame: trail fade, field, player, effects, HUD
pub fn draw_frame(engine: &SimulationEngine, settings: &Settings, painter: &mut impl Painter) {
    painter.fade(with_alpha(colors::BACKGROUND, settings.effective_trail_fade()));

    let glow = settings.effective_glow();
    for particle in &engine.particles {
        painter.glow_circle(
            particle.pos,
            particle.radius(),
            particle_color(particle.hue, 0.9),
            particle.radius() * glow,
        );
    }

    if let Some(player) = &engine.player {
        let body = &player.body;
        painter.glow_circle(
            body.pos,
            body.radius(),
            particle_color(body.hue, 1.0),
            body.radius() * glow * 1.5,
        );
        painter.stroke_circle(body.pos, body.radius() + 2.0, colors::PLAYER_RING, 2.0);
    }

    if settings.effective_effects() {
        for effect in &engine.effects {
            let color = particle_color(effect.hue, effect.life.clamp(0.0, 1.0));
            match effect.kind {
                EffectKind::Pop => painter.stroke_circle(effect.pos, effect.radius, color, 2.0),
                EffectKind::Debris => painter.glow_circle(effect.pos, effect.radius, color, 0.0),
            }
        }
    }

    if settings.show_hud {
        draw_hud(engine, painter);
    }
}

fn style(size: f32, color: colors::Rgba, align: TextAlign, baseline: TextBaseline) -> TextStyle {
    TextStyle {
        size,
        color,
        align,
        baseline,
    }
}

fn draw_hud(engine: &SimulationEngine, painter: &mut impl Painter) {
    let center = engine.viewport.center();

    match engine.phase {
        GamePhase::Idle => {
            painter.text(
                center,
                "Click or tap to start",
                &style(28.0, colors::HUD_TEXT, TextAlign::Center, TextBaseline::Middle),
            );
            painter.text(
                center + Vec2::new(0.0, 36.0),
                "Absorb smaller blobs. Avoid bigger ones.",
                &style(16.0, colors::HUD_DIM, TextAlign::Center, TextBaseline::Top),
            );
        }
        GamePhase::Running => {
            let top_left = style(20.0, colors::HUD_TEXT, TextAlign::Left, TextBaseline::Top);
            painter.text(Vec2::new(16.0, 16.0), &format!("Score: {}", engine.score), &top_left);
            if let Some(player) = &engine.player {
                let top_right = style(16.0, colors::HUD_DIM, TextAlign::Right, TextBaseline::Top);
                painter.text(
                    Vec2::new(engine.viewport.width - 16.0, 16.0),
                    &format!("Size: {:.0}", player.body.radius()),
                    &top_right,
                );
            }
        }
        GamePhase::GameOver => {
            painter.text(
                center - Vec2::new(0.0, 24.0),
                "Game Over",
                &style(40.0, colors::GAME_OVER, TextAlign::Center, TextBaseline::Bottom),
            );
            painter.text(
                center,
                &format!("Score: {}", engine.score),
                &style(24.0, colors::HUD_TEXT, TextAlign::Center, TextBaseline::Middle),
            );
            painter.text(
                center + Vec2::new(0.0, 32.0),
                "Click or tap to restart",
                &style(16.0, colors::HUD_DIM, TextAlign::Center, TextBaseline::Top),
            );
        }
    }
}
