//! Render settings and preferences
//!
//! Affects only how a frame is drawn, never the simulation. On the web the
//! preset comes from the page URL (`?quality=low`).

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Glow blur as a multiple of particle radius
    pub fn glow_scale(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.0,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 2.0,
        }
    }

    /// Alpha of the per-frame background fill (lower = longer trails)
    pub fn trail_fade(&self) -> f32 {
        match self {
            QualityPreset::Low => 1.0,
            QualityPreset::Medium => 0.25,
            QualityPreset::High => 0.15,
        }
    }
}

/// Render preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Soft glow around particles
    pub glow: bool,
    /// Motion trails via partial-opacity background fill
    pub trails: bool,
    /// Pop rings and debris
    pub effects: bool,

    // === HUD ===
    pub show_hud: bool,

    // === Accessibility ===
    /// Reduced motion (no trails, no pop rings)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            glow: true,
            trails: true,
            effects: true,
            show_hud: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset disables some effects for performance
        if preset == QualityPreset::Low {
            self.glow = false;
            self.trails = false;
        }
    }

    /// Parse `key=value` pairs from a URL query string (leading `?` optional)
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "quality" => match QualityPreset::parse(value) {
                    Some(preset) => settings.apply_preset(preset),
                    None => log::warn!("Unknown quality preset '{}'", value),
                },
                "hud" => settings.show_hud = value != "0" && value != "off",
                "reduced_motion" | "reduce_motion" => settings.reduced_motion = true,
                _ => {}
            }
        }
        settings
    }

    /// Glow blur multiplier (0 = no glow)
    pub fn effective_glow(&self) -> f32 {
        if self.glow {
            self.quality.glow_scale()
        } else {
            0.0
        }
    }

    /// Background fill alpha per frame (1.0 = full clear, respects reduced_motion)
    pub fn effective_trail_fade(&self) -> f32 {
        if self.trails && !self.reduced_motion {
            self.quality.trail_fade()
        } else {
            1.0
        }
    }

    /// Whether pop rings and debris are drawn (respects reduced_motion)
    pub fn effective_effects(&self) -> bool {
        self.effects && !self.reduced_motion
    }
}
