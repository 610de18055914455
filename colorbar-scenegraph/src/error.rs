use colorbar_common::error::ColorbarCommonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColorbarSceneGraphError {
    #[error("Internal error: `{0}`")]
    InternalError(String),

    #[error("Failed to write SVG: {0}")]
    FormatError(#[from] std::fmt::Error),

    #[error("Reference to undefined def: {0}")]
    UndefinedDef(String),

    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvasSize { width: f32, height: f32 },

    #[cfg(feature = "png")]
    #[error("usvg error: {0}")]
    UsvgError(#[from] usvg::Error),

    #[cfg(feature = "png")]
    #[error("roxml Error: {0}")]
    RoxmlError(#[from] usvg::roxmltree::Error),

    #[error(transparent)]
    Common(#[from] ColorbarCommonError),
}
