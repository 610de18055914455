use lazy_static::lazy_static;
use resvg::render;
use std::sync::{Arc, Mutex};
use usvg::fontdb::Database;

use crate::error::ColorbarSceneGraphError;
use crate::scene_graph::SceneGraph;

lazy_static! {
    pub static ref FONT_DB: Mutex<Database> = Mutex::new(init_font_db());
}

fn init_font_db() -> Database {
    let mut font_database = Database::new();
    font_database.load_system_fonts();
    font_database
}

/// Rasterizes an SVG document, `scale` pixels per user unit
pub fn svg_to_png(svg: &str, scale: f32) -> Result<Vec<u8>, ColorbarSceneGraphError> {
    let font_database = FONT_DB
        .lock()
        .map_err(|_| ColorbarSceneGraphError::InternalError("font database lock poisoned".into()))?
        .clone();

    let opts = usvg::Options {
        fontdb: Arc::new(font_database),
        ..Default::default()
    };
    let doc = usvg::roxmltree::Document::parse(svg)?;
    let rtree = usvg::Tree::from_xmltree(&doc, &opts)?;

    let width = (rtree.size().width() * scale).ceil() as u32;
    let height = (rtree.size().height() * scale).ceil() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        ColorbarSceneGraphError::InternalError(format!("cannot allocate {width}x{height} pixmap"))
    })?;

    let transform = tiny_skia::Transform::from_scale(scale, scale);
    render(&rtree, transform, &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|err| ColorbarSceneGraphError::InternalError(err.to_string()))
}

impl SceneGraph {
    pub fn to_png(&self, scale: f32) -> Result<Vec<u8>, ColorbarSceneGraphError> {
        svg_to_png(&self.to_svg()?, scale)
    }
}
