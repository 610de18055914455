use chrono::NaiveDate;
use colorbar_common::domain::DomainValue;
use colorbar_common::types::{Color, BLACK, WHITE};
use colorbar_guides::axis::make_axis_marks;
use colorbar_guides::axis::opts::{AxisConfig, AxisOrientation};
use colorbar_guides::handle::{make_handle_marks, HandleConfig};
use colorbar_guides::legend::colorbar::{
    make_colorbar_marks, ColorbarConfig, ColorbarOrientation, ColorbarSide,
};
use colorbar_scales::axis_scale::AxisScale;
use colorbar_scales::color::linear::LinearColorScale;
use colorbar_scales::color::ordinal::OrdinalColorScale;
use colorbar_scales::color::time::TimeColorScale;
use colorbar_scales::kind::ScaleKind;
use colorbar_scenegraph::measurement::default_text_measurer;
use colorbar_scenegraph::marks::group::SceneGroup;
use colorbar_scenegraph::marks::mark::SceneMark;
use colorbar_scenegraph::marks::rule::SceneRuleMark;
use colorbar_scenegraph::marks::text::{SceneTextMark, TextAlign};
use colorbar_scenegraph::scene_graph::SceneGraph;
use float_cmp::assert_approx_eq;
use rstest::rstest;

const RED: Color = [1.0, 0.0, 0.0, 1.0];

fn linear_scale() -> LinearColorScale {
    LinearColorScale::try_new(vec![0.0, 50.0, 100.0], vec![BLACK, RED, WHITE]).unwrap()
}

fn axis_group(group: &SceneGroup) -> &SceneGroup {
    group.find_group("axis").unwrap()
}

fn rule<'a>(group: &'a SceneGroup, name: &str) -> &'a SceneRuleMark {
    group
        .marks
        .iter()
        .find_map(|mark| match mark {
            SceneMark::Rule(rule) if rule.name == name => Some(rule),
            _ => None,
        })
        .unwrap()
}

fn text<'a>(group: &'a SceneGroup, name: &str) -> &'a SceneTextMark {
    group
        .marks
        .iter()
        .find_map(|mark| match mark {
            SceneMark::Text(text) if text.name == name => Some(text.as_ref()),
            _ => None,
        })
        .unwrap()
}

#[rstest]
#[case(ColorbarOrientation::Vertical, ColorbarSide::Left, [0.0, 0.0], AxisOrientation::Left)]
#[case(ColorbarOrientation::Vertical, ColorbarSide::Right, [15.0, 0.0], AxisOrientation::Right)]
#[case(ColorbarOrientation::Horizontal, ColorbarSide::Top, [0.0, 0.0], AxisOrientation::Top)]
#[case(ColorbarOrientation::Horizontal, ColorbarSide::Bottom, [0.0, 15.0], AxisOrientation::Bottom)]
fn axis_follows_side(
    #[case] orientation: ColorbarOrientation,
    #[case] side: ColorbarSide,
    #[case] axis_origin: [f32; 2],
    #[case] axis_orientation: AxisOrientation,
) {
    let config = ColorbarConfig {
        orientation,
        side,
        ..Default::default()
    };
    assert_eq!(config.axis_orientation(), axis_orientation);

    let colorbar = make_colorbar_marks(&linear_scale(), [0.0, 0.0], &config).unwrap();
    let axis = axis_group(&colorbar.group);
    assert_eq!(axis.origin, axis_origin);

    // ticks extend away from the bar
    let ticks = rule(axis, "axis_ticks");
    let tick_end = if orientation == ColorbarOrientation::Vertical {
        ticks.x2_iter().next().copied().unwrap()
    } else {
        ticks.y2_iter().next().copied().unwrap()
    };
    assert_approx_eq!(f32, tick_end, axis_orientation.direction() * 5.0);
}

#[rstest]
#[case(ColorbarOrientation::Vertical, ColorbarSide::Top)]
#[case(ColorbarOrientation::Vertical, ColorbarSide::Bottom)]
#[case(ColorbarOrientation::Horizontal, ColorbarSide::Left)]
#[case(ColorbarOrientation::Horizontal, ColorbarSide::Right)]
fn invalid_sides_are_rejected(#[case] orientation: ColorbarOrientation, #[case] side: ColorbarSide) {
    let config = ColorbarConfig {
        orientation,
        side,
        ..Default::default()
    };
    assert!(make_colorbar_marks(&linear_scale(), [0.0, 0.0], &config).is_err());
}

#[rstest]
#[case(ScaleKind::Linear, ColorbarOrientation::Vertical, (200.0, 0.0))]
#[case(ScaleKind::Time, ColorbarOrientation::Vertical, (200.0, 0.0))]
#[case(ScaleKind::Ordinal, ColorbarOrientation::Vertical, (0.0, 200.0))]
#[case(ScaleKind::Linear, ColorbarOrientation::Horizontal, (0.0, 200.0))]
#[case(ScaleKind::Ordinal, ColorbarOrientation::Horizontal, (0.0, 200.0))]
fn pixel_range_direction(
    #[case] kind: ScaleKind,
    #[case] orientation: ColorbarOrientation,
    #[case] expected: (f32, f32),
) {
    let config = ColorbarConfig {
        orientation,
        side: if orientation == ColorbarOrientation::Vertical {
            ColorbarSide::Right
        } else {
            ColorbarSide::Bottom
        },
        ..Default::default()
    };
    assert_eq!(config.pixel_range(kind), expected);
}

#[test]
fn vertical_ordinal_bands_run_top_to_bottom() {
    let scale = OrdinalColorScale::try_new(
        vec!["low".into(), "mid".into(), "high".into()],
        vec![BLACK, RED, WHITE],
    )
    .unwrap();
    let config = ColorbarConfig {
        length: 90.0,
        ..Default::default()
    };
    let colorbar = make_colorbar_marks(&scale, [0.0, 0.0], &config).unwrap();

    let labels = text(axis_group(&colorbar.group), "axis_labels");
    assert_eq!(labels.text_vec(), vec!["low", "mid", "high"]);
    let ys: Vec<f32> = labels.y_iter().copied().collect();
    assert_eq!(ys, vec![15.0, 45.0, 75.0]);
    assert_eq!(labels.align_iter().next(), Some(&TextAlign::Left));
}

#[test]
fn time_colorbar_labels() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 1, 5)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let scale = TimeColorScale::try_new(vec![start, end], vec![BLACK, WHITE]).unwrap();
    let config = ColorbarConfig {
        tick_count: Some(4.0),
        ..Default::default()
    };
    let colorbar = make_colorbar_marks(&scale, [0.0, 0.0], &config).unwrap();

    assert_eq!(colorbar.kind, ScaleKind::Time);
    let labels = text(axis_group(&colorbar.group), "axis_labels");
    assert_eq!(
        labels.text_vec(),
        vec!["Jan 01", "Jan 02", "Jan 03", "Jan 04", "Jan 05"]
    );
}

#[test]
fn axis_title_clears_labels() {
    let scale = linear_scale();
    let axis_scale = AxisScale::from_color_scale(&scale, ScaleKind::Linear, (100.0, 0.0)).unwrap();
    let config = AxisConfig {
        orientation: AxisOrientation::Left,
        title: Some("Temperature".to_string()),
        ..Default::default()
    };
    let group = make_axis_marks(&axis_scale, [10.0, 0.0], &config).unwrap();
    let measurer = default_text_measurer();

    let labels = SceneMark::Text(std::sync::Arc::new(text(&group, "axis_labels").clone()));
    let label_bounds = labels.bounding_box(&measurer).unwrap();
    let title = SceneMark::Text(std::sync::Arc::new(text(&group, "axis_title").clone()));
    let title_bounds = title.bounding_box(&measurer).unwrap();
    assert!(title_bounds.x1 <= label_bounds.x0);
    assert_eq!(group.origin, [10.0, 0.0]);
}

#[test]
fn domain_line_covers_range_with_half_pixel() {
    let axis_scale =
        AxisScale::from_color_scale(&linear_scale(), ScaleKind::Linear, (0.0, 100.0)).unwrap();
    let config = AxisConfig {
        orientation: AxisOrientation::Bottom,
        ..Default::default()
    };
    let group = make_axis_marks(&axis_scale, [0.0, 0.0], &config).unwrap();
    let line = rule(&group, "axis_domain");
    assert_eq!(line.x_iter().next(), Some(&-0.5));
    assert_eq!(line.x2_iter().next(), Some(&100.5));
    assert_eq!(line.y_iter().next(), Some(&0.0));
}

#[test]
fn colorbar_with_handle_renders_valid_svg() {
    let scale = LinearColorScale::try_new(vec![0.0, 1.0], vec![[0.0, 0.0, 1.0, 0.3], RED]).unwrap();
    let config = ColorbarConfig {
        title: Some("Opacity".to_string()),
        ..Default::default()
    };
    let colorbar = make_colorbar_marks(&scale, [40.0, 20.0], &config).unwrap();

    let mut group = colorbar.group.clone();
    let handle = make_handle_marks(
        &DomainValue::Number(0.25),
        &colorbar.axis_scale,
        &scale,
        &HandleConfig::for_colorbar(&config),
    )
    .unwrap();
    group.push(handle);

    let mut scene = SceneGraph::new(160.0, 260.0);
    scene.push(group);
    let svg = scene.to_svg().unwrap();

    assert!(svg.contains("<linearGradient"));
    assert!(svg.contains("<pattern"));
    assert!(svg.contains(">Opacity</text>"));
    usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
}
