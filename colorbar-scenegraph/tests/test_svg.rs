use colorbar_common::types::{GradientStop, Paint, StrokeCap, BLACK, WHITE};
use colorbar_common::value::ScalarOrArray;
use colorbar_scenegraph::defs::{checker_pattern, LinearGradientDef};
use colorbar_scenegraph::marks::group::{Clip, SceneGroup};
use colorbar_scenegraph::marks::path::ScenePathMark;
use colorbar_scenegraph::marks::rect::SceneRectMark;
use colorbar_scenegraph::marks::rule::SceneRuleMark;
use colorbar_scenegraph::marks::text::{SceneTextMark, TextAlign, TextBaseline};
use colorbar_scenegraph::scene_graph::SceneGraph;
use lyon_path::math::point;
use lyon_path::Path;

fn triangle() -> Path {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(8.0, 4.0));
    builder.line_to(point(0.0, 8.0));
    builder.close();
    builder.build()
}

fn sample_scene() -> SceneGraph {
    let mut group = SceneGroup::new("colorbar", [20.0, 10.0]);
    group.clip = Clip::Rect {
        x: 0.0,
        y: 0.0,
        width: 200.0,
        height: 60.0,
    };
    group.push_def(checker_pattern("checker-test", 4.0, WHITE, [0.8, 0.8, 0.8, 1.0]));
    group.push_def(LinearGradientDef::vertical(
        "gradient-test",
        vec![
            GradientStop { offset: 0.0, color: BLACK },
            GradientStop { offset: 1.0, color: [1.0, 0.0, 0.0, 0.5] },
        ],
    ));
    group.push(SceneRectMark {
        width: ScalarOrArray::new_scalar(16.0),
        height: ScalarOrArray::new_scalar(40.0),
        fill: ScalarOrArray::new_scalar(Paint::url("checker-test")),
        ..Default::default()
    });
    group.push(SceneRectMark {
        width: ScalarOrArray::new_scalar(16.0),
        height: ScalarOrArray::new_scalar(40.0),
        fill: ScalarOrArray::new_scalar(Paint::url("gradient-test")),
        stroke: BLACK.into(),
        stroke_width: ScalarOrArray::new_scalar(1.0),
        ..Default::default()
    });
    group.push(SceneRuleMark {
        len: 3,
        x: ScalarOrArray::new_scalar(16.0),
        x2: ScalarOrArray::new_scalar(22.0),
        y: ScalarOrArray::new_array(vec![0.0, 20.0, 40.0]),
        y2: ScalarOrArray::new_array(vec![0.0, 20.0, 40.0]),
        stroke: BLACK.into(),
        stroke_cap: StrokeCap::Square,
        ..Default::default()
    });
    group.push(SceneTextMark {
        len: 3,
        text: ScalarOrArray::new_array(vec!["0".into(), "5".into(), "10 & more".into()]),
        x: ScalarOrArray::new_scalar(25.0),
        y: ScalarOrArray::new_array(vec![0.0, 20.0, 40.0]),
        align: ScalarOrArray::new_scalar(TextAlign::Left),
        baseline: ScalarOrArray::new_scalar(TextBaseline::Middle),
        ..Default::default()
    });
    group.push(ScenePathMark {
        path: ScalarOrArray::new_scalar(triangle()),
        fill: WHITE.into(),
        stroke: BLACK.into(),
        ..Default::default()
    });

    let mut scene = SceneGraph::new(240.0, 80.0);
    scene.push(group);
    scene
}

#[test]
fn svg_parses_with_usvg() {
    let svg = sample_scene().to_svg().unwrap();
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), 240.0);
    assert_eq!(tree.size().height(), 80.0);
}

#[test]
fn svg_contains_every_mark() {
    let svg = sample_scene().to_svg().unwrap();
    // checker tile (3), clip rect (1), marks (2)
    assert_eq!(svg.matches("<rect ").count(), 6);
    assert_eq!(svg.matches("<line ").count(), 3);
    assert_eq!(svg.matches("<text ").count(), 3);
    assert!(svg.contains(r#"<path d="M0,0L8,4L0,8Z""#));
    assert!(svg.contains("10 &amp; more"));
    assert!(svg.contains(r#"stop-opacity="0.5""#));
    assert!(svg.contains(r#"clip-path="url(#clip-"#));
}

#[cfg(feature = "png")]
#[test]
fn png_has_scaled_size() {
    let png = sample_scene().to_png(2.0).unwrap();
    // PNG signature then the IHDR chunk with big-endian width and height
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
    let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
    assert_eq!((width, height), (480, 160));
}
