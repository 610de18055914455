//! Axis built from an [`AxisScale`]: a domain line, tick rules, tick labels
//! and an optional title.

pub mod opts;

use colorbar_common::types::{StrokeCap, BLACK};
use colorbar_common::value::ScalarOrArray;
use colorbar_scales::axis_scale::AxisScale;
use colorbar_scenegraph::bounds::Bounds;
use colorbar_scenegraph::marks::group::SceneGroup;
use colorbar_scenegraph::marks::rule::SceneRuleMark;
use colorbar_scenegraph::marks::text::{FontWeight, SceneTextMark, TextAlign, TextBaseline};
use colorbar_scenegraph::measurement::default_text_measurer;
use log::debug;

use crate::error::ColorbarGuidesError;
use opts::{AxisConfig, AxisOrientation};

const TITLE_MARGIN: f32 = 4.0;
const TITLE_FONT_SIZE: f32 = 10.0;
const PIXEL_OFFSET: f32 = 0.5;

/// Builds the marks of an axis whose line passes through `origin`.
///
/// The line runs along the scale's pixel range, vertically for left and
/// right orientations and horizontally otherwise.
pub fn make_axis_marks(
    scale: &AxisScale,
    origin: [f32; 2],
    config: &AxisConfig,
) -> Result<SceneGroup, ColorbarGuidesError> {
    if config.tick_size.is_nan() || config.tick_size < 0.0 {
        return Err(ColorbarGuidesError::InvalidDimension {
            name: "tick_size",
            value: config.tick_size,
        });
    }

    // Build at the local origin so that bounds used for the title are local
    let mut group = SceneGroup::new("axis", [0.0, 0.0]);

    let range = scale.range();
    let start = range.0.min(range.1) - PIXEL_OFFSET;
    let end = range.0.max(range.1) + PIXEL_OFFSET;
    group.push(make_domain_line(start, end, &config.orientation));

    let ticks = scale.ticks(config.tick_count);
    let labels = scale.format(&ticks, config.tick_count, &config.format);
    let (positions, labels): (Vec<f32>, Vec<String>) = ticks
        .iter()
        .zip(labels)
        .filter_map(|(tick, label)| Some((scale.scale(tick)?, label)))
        .unzip();
    debug!(
        "Axis with {} ticks oriented {}",
        positions.len(),
        config.orientation
    );

    if !positions.is_empty() {
        group.push(make_tick_marks(&positions, config));
        group.push(make_tick_labels(&positions, labels, config));
    }

    if let Some(title) = &config.title {
        let measurer = default_text_measurer();
        let envelope = group
            .bounding_box(&measurer)
            .unwrap_or_else(|| Bounds::new(0.0, start, 0.0, end));
        let mid = (range.0 + range.1) / 2.0;
        group.push(make_title(title, mid, &envelope, &config.orientation));
    }

    group.origin = origin;
    Ok(group)
}

/// Maps a position along the axis and an offset across it to x/y
fn along_across(orientation: &AxisOrientation, along: f32, across: f32) -> (f32, f32) {
    if orientation.is_vertical() {
        (across, along)
    } else {
        (along, across)
    }
}

fn make_domain_line(start: f32, end: f32, orientation: &AxisOrientation) -> SceneRuleMark {
    let (x, y) = along_across(orientation, start, 0.0);
    let (x2, y2) = along_across(orientation, end, 0.0);
    SceneRuleMark {
        name: "axis_domain".to_string(),
        x: ScalarOrArray::new_scalar(x),
        y: ScalarOrArray::new_scalar(y),
        x2: ScalarOrArray::new_scalar(x2),
        y2: ScalarOrArray::new_scalar(y2),
        stroke: BLACK.into(),
        stroke_width: ScalarOrArray::new_scalar(1.0),
        ..Default::default()
    }
}

fn make_tick_marks(positions: &[f32], config: &AxisConfig) -> SceneRuleMark {
    let orientation = &config.orientation;
    let tick_end = ScalarOrArray::new_scalar(orientation.direction() * config.tick_size);
    let along = ScalarOrArray::new_array(positions.to_vec());
    let across = ScalarOrArray::new_scalar(0.0);

    let (x, x2, y, y2) = if orientation.is_vertical() {
        (across, tick_end, along.clone(), along)
    } else {
        (along.clone(), along, across, tick_end)
    };

    SceneRuleMark {
        name: "axis_ticks".to_string(),
        len: positions.len() as u32,
        x,
        y,
        x2,
        y2,
        stroke: BLACK.into(),
        stroke_width: ScalarOrArray::new_scalar(1.0),
        stroke_cap: StrokeCap::Butt,
        ..Default::default()
    }
}

fn make_tick_labels(positions: &[f32], labels: Vec<String>, config: &AxisConfig) -> SceneTextMark {
    let offset = config.orientation.direction() * (config.tick_size + config.tick_padding);
    let along = ScalarOrArray::new_array(positions.to_vec());
    let across = ScalarOrArray::new_scalar(offset);

    let (x, y, align, baseline) = match config.orientation {
        AxisOrientation::Left => (across, along, TextAlign::Right, TextBaseline::Middle),
        AxisOrientation::Right => (across, along, TextAlign::Left, TextBaseline::Middle),
        AxisOrientation::Top => (along, across, TextAlign::Center, TextBaseline::Bottom),
        AxisOrientation::Bottom => (along, across, TextAlign::Center, TextBaseline::Top),
    };

    SceneTextMark {
        name: "axis_labels".to_string(),
        len: positions.len() as u32,
        text: ScalarOrArray::new_array(labels),
        x,
        y,
        align: ScalarOrArray::new_scalar(align),
        baseline: ScalarOrArray::new_scalar(baseline),
        color: ScalarOrArray::new_scalar(BLACK),
        font_size: ScalarOrArray::new_scalar(config.font_size),
        ..Default::default()
    }
}

fn make_title(
    title: &str,
    mid: f32,
    envelope: &Bounds,
    orientation: &AxisOrientation,
) -> SceneTextMark {
    // vertical titles are rotated so their baseline faces the labels
    let (x, y, baseline, angle) = match orientation {
        AxisOrientation::Left => (envelope.x0 - TITLE_MARGIN, mid, TextBaseline::Bottom, -90.0),
        AxisOrientation::Right => (envelope.x1 + TITLE_MARGIN, mid, TextBaseline::Bottom, 90.0),
        AxisOrientation::Top => (mid, envelope.y0 - TITLE_MARGIN, TextBaseline::Bottom, 0.0),
        AxisOrientation::Bottom => (mid, envelope.y1 + TITLE_MARGIN, TextBaseline::Top, 0.0),
    };

    SceneTextMark {
        name: "axis_title".to_string(),
        text: ScalarOrArray::new_scalar(title.to_string()),
        x: ScalarOrArray::new_scalar(x),
        y: ScalarOrArray::new_scalar(y),
        align: ScalarOrArray::new_scalar(TextAlign::Center),
        baseline: ScalarOrArray::new_scalar(baseline),
        angle: ScalarOrArray::new_scalar(angle),
        color: ScalarOrArray::new_scalar(BLACK),
        font_size: ScalarOrArray::new_scalar(TITLE_FONT_SIZE),
        font_weight: ScalarOrArray::new_scalar(FontWeight::Bold),
        ..Default::default()
    }
}
