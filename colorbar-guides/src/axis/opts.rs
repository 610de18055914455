use colorbar_scales::formatter::TickFormat;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Side of the axis line that ticks and labels extend toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AxisOrientation {
    Top,
    Bottom,
    Left,
    Right,
}

impl AxisOrientation {
    pub fn is_vertical(&self) -> bool {
        matches!(self, AxisOrientation::Left | AxisOrientation::Right)
    }

    /// +1 when ticks extend toward increasing coordinates, -1 otherwise
    pub fn direction(&self) -> f32 {
        match self {
            AxisOrientation::Top | AxisOrientation::Left => -1.0,
            AxisOrientation::Bottom | AxisOrientation::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    pub orientation: AxisOrientation,
    /// Approximate number of ticks for continuous scales
    pub tick_count: Option<f32>,
    pub tick_size: f32,
    /// Gap between the end of a tick and its label
    pub tick_padding: f32,
    pub format: TickFormat,
    pub font_size: f32,
    pub title: Option<String>,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            orientation: AxisOrientation::Right,
            tick_count: None,
            tick_size: 5.0,
            tick_padding: 3.0,
            format: TickFormat::Auto,
            font_size: 8.0,
            title: None,
        }
    }
}
