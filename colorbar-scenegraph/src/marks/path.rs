use colorbar_common::types::{Paint, StrokeJoin};
use colorbar_common::value::ScalarOrArray;
use itertools::izip;
use lyon_extra::euclid::Vector2D;
use lyon_path::{
    geom::euclid::{Transform2D, UnknownUnit},
    Path,
};
use serde::{Deserialize, Serialize};

use super::mark::SceneMark;

pub type PathTransform = Transform2D<f32, UnknownUnit, UnknownUnit>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScenePathMark {
    pub name: String,
    pub len: u32,
    pub stroke_join: StrokeJoin,
    pub stroke_width: Option<f32>,
    pub path: ScalarOrArray<Path>,
    pub fill: ScalarOrArray<Paint>,
    pub stroke: ScalarOrArray<Paint>,
    pub transform: ScalarOrArray<PathTransform>,
    pub zindex: Option<i32>,
}

impl ScenePathMark {
    pub fn path_iter(&self) -> Box<dyn Iterator<Item = &Path> + '_> {
        self.path.as_iter(self.len as usize)
    }

    pub fn fill_iter(&self) -> Box<dyn Iterator<Item = &Paint> + '_> {
        self.fill.as_iter(self.len as usize)
    }

    pub fn stroke_iter(&self) -> Box<dyn Iterator<Item = &Paint> + '_> {
        self.stroke.as_iter(self.len as usize)
    }

    pub fn transform_iter(&self) -> Box<dyn Iterator<Item = &PathTransform> + '_> {
        self.transform.as_iter(self.len as usize)
    }

    /// Each path with its transform applied, then shifted by `origin`
    pub fn transformed_path_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = Path> + '_> {
        Box::new(
            izip!(self.path_iter(), self.transform_iter()).map(move |(path, transform)| {
                path.clone()
                    .transformed(&transform.then_translate(Vector2D::new(origin[0], origin[1])))
            }),
        )
    }
}

impl Default for ScenePathMark {
    fn default() -> Self {
        Self {
            name: "path_mark".to_string(),
            len: 1,
            stroke_join: StrokeJoin::Miter,
            stroke_width: None,
            path: ScalarOrArray::new_scalar(Path::default()),
            fill: ScalarOrArray::new_scalar(Paint::None),
            stroke: ScalarOrArray::new_scalar(Paint::None),
            transform: ScalarOrArray::new_scalar(PathTransform::identity()),
            zindex: None,
        }
    }
}

impl From<ScenePathMark> for SceneMark {
    fn from(mark: ScenePathMark) -> Self {
        SceneMark::Path(mark)
    }
}
