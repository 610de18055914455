//! Paint servers referenced from marks by id

use colorbar_common::types::{Color, GradientStop, Paint};
use colorbar_common::value::ScalarOrArray;
use serde::{Deserialize, Serialize};

use crate::marks::mark::SceneMark;
use crate::marks::rect::SceneRectMark;

/// Linear gradient whose vector is given in objectBoundingBox units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradientDef {
    pub id: String,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub stops: Vec<GradientStop>,
}

impl LinearGradientDef {
    /// Gradient running left to right
    pub fn horizontal(id: impl Into<String>, stops: Vec<GradientStop>) -> Self {
        Self {
            id: id.into(),
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 0.0,
            stops,
        }
    }

    /// Gradient running bottom to top
    pub fn vertical(id: impl Into<String>, stops: Vec<GradientStop>) -> Self {
        Self {
            id: id.into(),
            x1: 0.0,
            y1: 1.0,
            x2: 0.0,
            y2: 0.0,
            stops,
        }
    }

    pub fn paint(&self) -> Paint {
        Paint::url(&self.id)
    }
}

/// Tiled pattern of marks in user space units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternDef {
    pub id: String,
    pub width: f32,
    pub height: f32,
    pub marks: Vec<SceneMark>,
}

impl PatternDef {
    pub fn paint(&self) -> Paint {
        Paint::url(&self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Def {
    LinearGradient(LinearGradientDef),
    Pattern(PatternDef),
}

impl Def {
    pub fn id(&self) -> &str {
        match self {
            Def::LinearGradient(def) => &def.id,
            Def::Pattern(def) => &def.id,
        }
    }
}

impl From<LinearGradientDef> for Def {
    fn from(def: LinearGradientDef) -> Self {
        Def::LinearGradient(def)
    }
}

impl From<PatternDef> for Def {
    fn from(def: PatternDef) -> Self {
        Def::Pattern(def)
    }
}

/// Checkerboard shown behind translucent colors. Each tile holds two
/// `size` squares of `dark` on a `light` background.
pub fn checker_pattern(id: impl Into<String>, size: f32, light: Color, dark: Color) -> PatternDef {
    let background = SceneRectMark {
        name: "checker_light".to_string(),
        width: ScalarOrArray::new_scalar(size * 2.0),
        height: ScalarOrArray::new_scalar(size * 2.0),
        fill: light.into(),
        ..Default::default()
    };
    let squares = SceneRectMark {
        name: "checker_dark".to_string(),
        len: 2,
        x: ScalarOrArray::new_array(vec![0.0, size]),
        y: ScalarOrArray::new_array(vec![0.0, size]),
        width: ScalarOrArray::new_scalar(size),
        height: ScalarOrArray::new_scalar(size),
        fill: dark.into(),
        ..Default::default()
    };

    PatternDef {
        id: id.into(),
        width: size * 2.0,
        height: size * 2.0,
        marks: vec![background.into(), squares.into()],
    }
}
