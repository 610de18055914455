use css_color_parser::Color as CssColor;

use crate::error::ColorbarCommonError;
use crate::types::{is_opaque, Color};

/// Parse a CSS color string (hex, rgb(), rgba(), hsl(), named colors)
pub fn parse_color(s: &str) -> Result<Color, ColorbarCommonError> {
    let color = s
        .trim()
        .parse::<CssColor>()
        .map_err(|_| ColorbarCommonError::InvalidColor(s.to_string()))?;
    Ok([
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
        color.a,
    ])
}

/// Format a color for an SVG attribute. Opaque colors use hex notation.
pub fn color_to_css(color: &Color) -> String {
    let [r, g, b] = [color[0], color[1], color[2]].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    if is_opaque(color) {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        let a = (color[3].clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
        format!("rgba({r},{g},{b},{a})")
    }
}
