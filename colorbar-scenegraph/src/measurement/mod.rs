//! Text extents for layout. Uses cosmic-text when the `cosmic-text` feature
//! is enabled, and a character-count estimate otherwise.

#[cfg(feature = "cosmic-text")]
pub mod cosmic;

use crate::marks::text::{FontWeight, TextAlign, TextBaseline};

pub trait TextMeasurer: Send + Sync {
    fn measure_text_bounds(&self, config: &TextMeasurementConfig) -> TextBounds;
}

#[derive(Debug, Clone)]
pub struct TextMeasurementConfig<'a> {
    pub text: &'a str,
    /// Font family name or a generic family such as `sans-serif`
    pub font: &'a str,
    pub font_size: f32,
    pub font_weight: FontWeight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBounds {
    pub width: f32,
    /// Ascent plus descent
    pub height: f32,
    /// Distance from the top to the baseline
    pub ascent: f32,
    pub descent: f32,
}

impl TextBounds {
    /// Top left corner of the text box, relative to its anchor point
    pub fn anchor_offset(&self, align: &TextAlign, baseline: &TextBaseline) -> [f32; 2] {
        let x = match align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -self.width / 2.0,
            TextAlign::Right => -self.width,
        };
        let y = match baseline {
            TextBaseline::Top => 0.0,
            TextBaseline::Middle => -self.height / 2.0,
            TextBaseline::Bottom => -self.height,
            TextBaseline::Alphabetic => -self.ascent,
        };
        [x, y]
    }

    pub fn empty(font_size: f32) -> Self {
        TextBounds {
            width: 0.0,
            height: font_size,
            ascent: font_size * 0.8,
            descent: font_size * 0.2,
        }
    }
}

/// Estimates text extents from character counts, without loading fonts
#[derive(Debug, Clone, Copy)]
pub struct HeuristicTextMeasurer {
    /// Average advance per character as a fraction of the font size
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self {
            char_width: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure_text_bounds(&self, config: &TextMeasurementConfig) -> TextBounds {
        let weight_factor = match config.font_weight {
            FontWeight::Normal => 1.0,
            FontWeight::Bold => 1.1,
        };
        let width =
            config.text.chars().count() as f32 * config.font_size * self.char_width * weight_factor;
        let height = config.font_size * self.line_height;
        TextBounds {
            width,
            height,
            ascent: height * 0.8,
            descent: height * 0.2,
        }
    }
}

#[cfg(feature = "cosmic-text")]
pub fn default_text_measurer() -> impl TextMeasurer {
    cosmic::CosmicTextMeasurer::new()
}

#[cfg(not(feature = "cosmic-text"))]
pub fn default_text_measurer() -> impl TextMeasurer {
    HeuristicTextMeasurer::default()
}
