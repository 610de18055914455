use colorbar_scales::error::ColorbarScaleError;
use colorbar_scenegraph::error::ColorbarSceneGraphError;
use thiserror::Error;

use crate::legend::colorbar::{ColorbarOrientation, ColorbarSide};

#[derive(Error, Debug)]
pub enum ColorbarGuidesError {
    #[error("A {orientation} colorbar cannot place its axis on the {side} side")]
    InvalidSide {
        orientation: ColorbarOrientation,
        side: ColorbarSide,
    },

    #[error("Invalid {name}: {value} (must be positive)")]
    InvalidDimension { name: &'static str, value: f32 },

    #[error("Value {0} is not in the scale's domain")]
    ValueNotInDomain(String),

    #[error("Invalid scale: {0}")]
    InvalidScale(#[from] ColorbarScaleError),

    #[error(transparent)]
    SceneGraph(#[from] ColorbarSceneGraphError),
}
