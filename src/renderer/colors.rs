//! Colors for field elements

use crate::sim::Hue;

/// Linear RGBA, each channel 0-1
pub type Rgba = [f32; 4];

pub const BACKGROUND: Rgba = [0.02, 0.02, 0.05, 1.0];
pub const PLAYER_RING: Rgba = [1.0, 1.0, 1.0, 0.9];
pub const HUD_TEXT: Rgba = [0.9, 0.9, 0.95, 1.0];
pub const HUD_DIM: Rgba = [0.6, 0.6, 0.7, 1.0];
pub const GAME_OVER: Rgba = [1.0, 0.35, 0.3, 1.0];

/// HSL to RGBA (`hue` in degrees, saturation/lightness 0-1)
pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Rgba {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m, alpha]
}

/// Saturated body color for a particle hue
pub fn particle_color(hue: Hue, alpha: f32) -> Rgba {
    hsla(hue.0, 0.8, 0.6, alpha)
}

/// Same color with a different alpha
pub fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    [color[0], color[1], color[2], alpha]
}

/// CSS `rgba(...)` string for canvas styles
pub fn to_css(color: Rgba) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {:.3})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgba, b: Rgba) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn test_hsla_primaries() {
        assert!(close(hsla(0.0, 1.0, 0.5, 1.0), [1.0, 0.0, 0.0, 1.0]));
        assert!(close(hsla(120.0, 1.0, 0.5, 1.0), [0.0, 1.0, 0.0, 1.0]));
        assert!(close(hsla(240.0, 1.0, 0.5, 0.5), [0.0, 0.0, 1.0, 0.5]));
        // Wraps past 360
        assert!(close(hsla(480.0, 1.0, 0.5, 1.0), hsla(120.0, 1.0, 0.5, 1.0)));
    }

    #[test]
    fn test_to_css() {
        assert_eq!(to_css([1.0, 0.0, 0.5, 0.25]), "rgba(255, 0, 128, 0.250)");
        assert_eq!(to_css([2.0, -1.0, 0.0, 3.0]), "rgba(255, 0, 0, 1.000)");
    }
}
