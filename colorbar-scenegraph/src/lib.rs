pub mod bounds;
pub mod defs;
pub mod error;
pub mod ids;
pub mod marks;
pub mod measurement;
#[cfg(feature = "png")]
pub mod png;
pub mod scene_graph;
pub mod svg;
