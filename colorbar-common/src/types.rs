use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use strum::VariantNames;

use crate::value::ScalarOrArray;

/// RGBA color with components in the range [0, 1]
pub type Color = [f32; 4];

pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const TRANSPARENT: Color = [0.0, 0.0, 0.0, 0.0];

pub fn is_opaque(color: &Color) -> bool {
    color[3] >= 1.0
}

/// Fill or stroke of a mark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Paint {
    None,
    Color(Color),
    /// Reference to a gradient or pattern def by id
    Url(String),
}

impl Default for Paint {
    fn default() -> Self {
        Paint::None
    }
}

impl Hash for Paint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Paint::None => {}
            Paint::Color(c) => c.iter().for_each(|v| OrderedFloat::from(*v).hash(state)),
            Paint::Url(id) => id.hash(state),
        }
    }
}

impl Paint {
    pub fn url(id: impl Into<String>) -> Self {
        Paint::Url(id.into())
    }

    pub fn color_or_transparent(&self) -> Color {
        match self {
            Paint::Color(c) => *c,
            _ => TRANSPARENT,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Paint::None)
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Color(color)
    }
}

impl From<Color> for ScalarOrArray<Paint> {
    fn from(color: Color) -> Self {
        ScalarOrArray::Scalar(Paint::Color(color))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl Hash for GradientStop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        OrderedFloat::from(self.offset).hash(state);
        self.color
            .iter()
            .for_each(|v| OrderedFloat::from(*v).hash(state));
    }
}

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, VariantNames)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    pub fn as_svg_str(&self) -> &'static str {
        match self {
            StrokeCap::Butt => "butt",
            StrokeCap::Round => "round",
            StrokeCap::Square => "square",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, VariantNames)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StrokeJoin {
    Bevel,
    #[default]
    Miter,
    Round,
}

impl StrokeJoin {
    pub fn as_svg_str(&self) -> &'static str {
        match self {
            StrokeJoin::Bevel => "bevel",
            StrokeJoin::Miter => "miter",
            StrokeJoin::Round => "round",
        }
    }
}
