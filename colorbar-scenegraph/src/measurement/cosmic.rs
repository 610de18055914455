use std::collections::HashSet;
use std::sync::Mutex;

use cosmic_text::{fontdb::Database, Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use lazy_static::lazy_static;

use super::{TextBounds, TextMeasurementConfig, TextMeasurer};
use crate::marks::text::FontWeight;

lazy_static! {
    static ref FONT_SYSTEM: Mutex<FontSystem> = Mutex::new(build_font_system());
}

fn build_font_system() -> FontSystem {
    let mut font_system = FontSystem::new();
    setup_default_fonts(font_system.db_mut());
    font_system
}

/// Points the generic families at the first installed match
fn setup_default_fonts(fontdb: &mut Database) {
    let families: HashSet<String> = fontdb
        .faces()
        .flat_map(|face| face.families.iter().map(|(family, _)| family.clone()))
        .collect();

    if let Some(family) = ["Helvetica", "Arial", "Liberation Sans", "DejaVu Sans"]
        .into_iter()
        .find(|f| families.contains(*f))
    {
        fontdb.set_sans_serif_family(family);
    }
    if let Some(family) = ["Times New Roman", "Times", "Liberation Serif", "DejaVu Serif"]
        .into_iter()
        .find(|f| families.contains(*f))
    {
        fontdb.set_serif_family(family);
    }
    if let Some(family) = ["Courier New", "Liberation Mono", "DejaVu Sans Mono"]
        .into_iter()
        .find(|f| families.contains(*f))
    {
        fontdb.set_monospace_family(family);
    }
}

/// Shapes text with the system fonts
#[derive(Debug, Clone, Copy, Default)]
pub struct CosmicTextMeasurer;

impl CosmicTextMeasurer {
    pub fn new() -> Self {
        Self
    }
}

impl TextMeasurer for CosmicTextMeasurer {
    fn measure_text_bounds(&self, config: &TextMeasurementConfig) -> TextBounds {
        // a panic while shaping leaves the font system usable
        let mut font_system = FONT_SYSTEM
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let buffer = make_buffer(config, &mut font_system);
        measure_buffer(&buffer, config.font_size)
    }
}

fn make_buffer(config: &TextMeasurementConfig, font_system: &mut FontSystem) -> Buffer {
    let family = match config.font.to_lowercase().as_str() {
        "serif" => Family::Serif,
        "sans serif" | "sans-serif" => Family::SansSerif,
        "monospace" => Family::Monospace,
        _ => Family::Name(config.font),
    };
    let weight = match config.font_weight {
        FontWeight::Normal => cosmic_text::Weight::NORMAL,
        FontWeight::Bold => cosmic_text::Weight::BOLD,
    };
    let attrs = Attrs::new().family(family).weight(weight);

    let mut buffer = Buffer::new(font_system, Metrics::new(config.font_size, config.font_size));
    buffer.set_text(font_system, config.text, attrs, Shaping::Advanced);
    buffer.set_size(font_system, None, None);
    buffer.shape_until_scroll(font_system, false);
    buffer
}

fn measure_buffer(buffer: &Buffer, font_size: f32) -> TextBounds {
    let mut ascent: f32 = 0.0;
    let mut descent: f32 = 0.0;
    let mut x_range: Option<(f32, f32)> = None;

    for run in buffer.layout_runs() {
        let run_ascent = run.line_y - run.line_top;
        ascent = ascent.max(run_ascent);
        descent = descent.max(run.line_height - run_ascent);
        for glyph in run.glyphs {
            let (lo, hi) = x_range.unwrap_or((glyph.x, glyph.x + glyph.w));
            x_range = Some((lo.min(glyph.x), hi.max(glyph.x + glyph.w)));
        }
    }

    if ascent == 0.0 && descent == 0.0 {
        return TextBounds::empty(font_size);
    }
    TextBounds {
        width: x_range.map(|(lo, hi)| hi - lo).unwrap_or(0.0),
        height: ascent + descent,
        ascent,
        descent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longer_text_is_wider() {
        let measurer = CosmicTextMeasurer::new();
        let measure = |text| {
            measurer.measure_text_bounds(&TextMeasurementConfig {
                text,
                font: "sans-serif",
                font_size: 12.0,
                font_weight: FontWeight::Normal,
            })
        };
        let short = measure("1");
        let long = measure("1000");

        assert!(long.width >= short.width);
        assert!(short.height > 0.0);
        assert!(short.ascent <= short.height);
    }
}
