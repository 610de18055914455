//! Approximate extents of marks, used to place titles and size canvases

use itertools::izip;
use lyon_algorithms::aabb::bounding_box;
use serde::{Deserialize, Serialize};

use crate::marks::group::SceneGroup;
use crate::marks::mark::SceneMark;
use crate::marks::path::ScenePathMark;
use crate::marks::rect::SceneRectMark;
use crate::marks::rule::SceneRuleMark;
use crate::marks::text::SceneTextMark;
use crate::measurement::{TextMeasurementConfig, TextMeasurer};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Bounds {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = [f32; 2]>) -> Option<Self> {
        let mut points = points.into_iter();
        let [x, y] = points.next()?;
        let mut bounds = Bounds::new(x, y, x, y);
        for [x, y] in points {
            bounds = bounds.union(&Bounds::new(x, y, x, y));
        }
        Some(bounds)
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Bounds {
        Bounds {
            x0: self.x0 + dx,
            y0: self.y0 + dy,
            x1: self.x1 + dx,
            y1: self.y1 + dy,
        }
    }

    pub fn contains(&self, point: [f32; 2]) -> bool {
        point[0] >= self.x0 && point[0] <= self.x1 && point[1] >= self.y0 && point[1] <= self.y1
    }
}

fn union_all(bounds: impl IntoIterator<Item = Bounds>) -> Option<Bounds> {
    bounds.into_iter().reduce(|a, b| a.union(&b))
}

fn rect_bounds(mark: &SceneRectMark) -> Option<Bounds> {
    union_all(
        izip!(mark.x_iter(), mark.y_iter(), mark.width_iter(), mark.height_iter())
            .map(|(x, y, w, h)| Bounds::new(*x, *y, x + w, y + h)),
    )
}

fn rule_bounds(mark: &SceneRuleMark) -> Option<Bounds> {
    union_all(
        izip!(
            mark.x_iter(),
            mark.y_iter(),
            mark.x2_iter(),
            mark.y2_iter(),
            mark.stroke_width_iter()
        )
        .map(|(x, y, x2, y2, sw)| {
            let half = sw / 2.0;
            Bounds::new(
                x.min(*x2) - half,
                y.min(*y2) - half,
                x.max(*x2) + half,
                y.max(*y2) + half,
            )
        }),
    )
}

fn text_bounds(mark: &SceneTextMark, measurer: &dyn TextMeasurer) -> Option<Bounds> {
    union_all(
        izip!(
            mark.text_iter(),
            mark.x_iter(),
            mark.y_iter(),
            mark.align_iter(),
            mark.baseline_iter(),
            mark.angle_iter(),
            mark.font_iter(),
            mark.font_size_iter(),
            mark.font_weight_iter()
        )
        .filter_map(|(text, x, y, align, baseline, angle, font, font_size, weight)| {
            let bounds = measurer.measure_text_bounds(&TextMeasurementConfig {
                text,
                font,
                font_size: *font_size,
                font_weight: *weight,
            });
            let [left, top] = bounds.anchor_offset(align, baseline);
            let (w, h) = (bounds.width, bounds.height);

            // corners relative to the anchor, rotated about it
            let (sin, cos) = angle.to_radians().sin_cos();
            let corners = [[left, top], [left + w, top], [left, top + h], [left + w, top + h]];
            Bounds::from_points(
                corners
                    .iter()
                    .map(|[cx, cy]| [x + cx * cos - cy * sin, y + cx * sin + cy * cos]),
            )
        }),
    )
}

fn path_bounds(mark: &ScenePathMark) -> Option<Bounds> {
    let half = mark.stroke_width.unwrap_or(0.0) / 2.0;
    union_all(mark.transformed_path_iter([0.0, 0.0]).filter_map(|path| {
        path.iter().next()?;
        let bbox = bounding_box(&path);
        Some(Bounds::new(
            bbox.min.x - half,
            bbox.min.y - half,
            bbox.max.x + half,
            bbox.max.y + half,
        ))
    }))
}

impl SceneMark {
    /// Extent of the mark in its parent's coordinates, None when empty
    pub fn bounding_box(&self, measurer: &dyn TextMeasurer) -> Option<Bounds> {
        match self {
            SceneMark::Rect(mark) => rect_bounds(mark),
            SceneMark::Rule(mark) => rule_bounds(mark),
            SceneMark::Text(mark) => text_bounds(mark, measurer),
            SceneMark::Path(mark) => path_bounds(mark),
            SceneMark::Group(group) => group.bounding_box(measurer),
        }
    }
}

impl SceneGroup {
    /// Extent of the group's marks, offset by the group origin
    pub fn bounding_box(&self, measurer: &dyn TextMeasurer) -> Option<Bounds> {
        union_all(self.marks.iter().filter_map(|m| m.bounding_box(measurer)))
            .map(|b| b.translate(self.origin[0], self.origin[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marks::text::{TextAlign, TextBaseline};
    use crate::measurement::HeuristicTextMeasurer;
    use colorbar_common::value::ScalarOrArray;
    use crate::marks::path::PathTransform;
    use lyon_path::math::point;
    use lyon_path::Path;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_rect_and_group_bounds() {
        let rect = SceneRectMark {
            len: 2,
            x: ScalarOrArray::new_array(vec![0.0, 10.0]),
            y: ScalarOrArray::new_scalar(5.0),
            width: ScalarOrArray::new_scalar(5.0),
            height: ScalarOrArray::new_scalar(20.0),
            ..Default::default()
        };
        let mut group = SceneGroup::new("g", [100.0, 0.0]);
        group.push(rect);

        let measurer = HeuristicTextMeasurer::default();
        let bounds = group.bounding_box(&measurer).unwrap();
        assert_eq!(bounds, Bounds::new(100.0, 5.0, 115.0, 25.0));
        assert!(SceneGroup::default().bounding_box(&measurer).is_none());
    }

    #[test]
    fn test_text_bounds_alignment() {
        let measurer = HeuristicTextMeasurer::default();
        let text = SceneTextMark {
            text: ScalarOrArray::new_scalar("abcd".to_string()),
            x: ScalarOrArray::new_scalar(50.0),
            y: ScalarOrArray::new_scalar(10.0),
            align: ScalarOrArray::new_scalar(TextAlign::Right),
            baseline: ScalarOrArray::new_scalar(TextBaseline::Top),
            font_size: ScalarOrArray::new_scalar(10.0),
            ..Default::default()
        };
        let bounds = SceneMark::from(text).bounding_box(&measurer).unwrap();
        assert_approx_eq!(f32, bounds.x0, 26.0);
        assert_approx_eq!(f32, bounds.x1, 50.0);
        assert_approx_eq!(f32, bounds.y0, 10.0);
        assert_approx_eq!(f32, bounds.y1, 22.0);
    }

    #[test]
    fn test_rotated_text_bounds() {
        let measurer = HeuristicTextMeasurer::default();
        let text = SceneTextMark {
            text: ScalarOrArray::new_scalar("abcd".to_string()),
            align: ScalarOrArray::new_scalar(TextAlign::Left),
            baseline: ScalarOrArray::new_scalar(TextBaseline::Top),
            angle: ScalarOrArray::new_scalar(90.0),
            font_size: ScalarOrArray::new_scalar(10.0),
            ..Default::default()
        };
        let bounds = SceneMark::from(text).bounding_box(&measurer).unwrap();
        // width runs down the y axis once rotated
        assert_approx_eq!(f32, bounds.height(), 24.0, epsilon = 1e-4);
        assert_approx_eq!(f32, bounds.width(), 12.0, epsilon = 1e-4);
    }

    #[test]
    fn test_rule_bounds_include_stroke() {
        let rule = SceneRuleMark {
            x2: ScalarOrArray::new_scalar(10.0),
            stroke_width: ScalarOrArray::new_scalar(2.0),
            ..Default::default()
        };
        let bounds = SceneMark::Rule(rule)
            .bounding_box(&HeuristicTextMeasurer::default())
            .unwrap();
        assert_eq!(bounds, Bounds::new(-1.0, -1.0, 11.0, 1.0));
    }

    #[test]
    fn test_path_bounds_include_stroke() {
        let mut builder = Path::builder();
        builder.begin(point(0.0, 0.0));
        builder.line_to(point(8.0, 4.0));
        builder.line_to(point(0.0, 8.0));
        builder.close();
        let mark = ScenePathMark {
            path: ScalarOrArray::new_scalar(builder.build()),
            transform: ScalarOrArray::new_scalar(PathTransform::translation(10.0, 20.0)),
            stroke_width: Some(2.0),
            ..Default::default()
        };
        let bounds = SceneMark::from(mark)
            .bounding_box(&HeuristicTextMeasurer::default())
            .unwrap();
        assert_eq!(bounds, Bounds::new(9.0, 19.0, 19.0, 29.0));
    }
}
