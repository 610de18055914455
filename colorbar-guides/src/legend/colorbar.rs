use std::sync::Arc;

use colorbar_common::domain::DomainValue;
use colorbar_common::types::{is_opaque, Color, GradientStop, Paint, WHITE};
use colorbar_common::value::ScalarOrArray;
use colorbar_scales::axis_scale::AxisScale;
use colorbar_scales::color::ColorScale;
use colorbar_scales::error::ColorbarScaleError;
use colorbar_scales::formatter::TickFormat;
use colorbar_scales::kind::ScaleKind;
use colorbar_scenegraph::defs::{checker_pattern, Def, LinearGradientDef};
use colorbar_scenegraph::ids::unique_id;
use colorbar_scenegraph::marks::group::SceneGroup;
use colorbar_scenegraph::marks::rect::SceneRectMark;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::axis::make_axis_marks;
use crate::axis::opts::{AxisConfig, AxisOrientation};
use crate::error::ColorbarGuidesError;

pub(crate) const CHECKER_SIZE: f32 = 4.0;
pub(crate) const CHECKER_DARK: Color = [0.8, 0.8, 0.8, 1.0];

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ColorbarOrientation {
    Horizontal,
    #[default]
    Vertical,
}

/// Side of the bar the axis is drawn on
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ColorbarSide {
    Left,
    #[default]
    Right,
    Top,
    Bottom,
}

impl ColorbarSide {
    pub fn opposite(&self) -> ColorbarSide {
        match self {
            ColorbarSide::Left => ColorbarSide::Right,
            ColorbarSide::Right => ColorbarSide::Left,
            ColorbarSide::Top => ColorbarSide::Bottom,
            ColorbarSide::Bottom => ColorbarSide::Top,
        }
    }

    pub fn fits(&self, orientation: ColorbarOrientation) -> bool {
        match orientation {
            ColorbarOrientation::Vertical => {
                matches!(self, ColorbarSide::Left | ColorbarSide::Right)
            }
            ColorbarOrientation::Horizontal => {
                matches!(self, ColorbarSide::Top | ColorbarSide::Bottom)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorbarConfig {
    pub orientation: ColorbarOrientation,
    pub side: ColorbarSide,
    /// Extent of the bar along the axis
    pub length: f32,
    pub thickness: f32,
    /// Overrides the inferred scale kind
    pub kind: Option<ScaleKind>,
    /// Number of evenly spaced samples in a continuous gradient
    pub gradient_stops: usize,
    pub tick_count: Option<f32>,
    /// Extend a continuous axis to round values past the scale's domain
    pub nice: bool,
    pub format: TickFormat,
    pub title: Option<String>,
    /// Inner and outer padding of ordinal bands, as a fraction of the step
    pub band_padding: f32,
    /// Where ordinal bands sit within the outer padding, from 0 (start) to 1 (end)
    pub band_align: f32,
    /// Draw the checker background even when every color is opaque
    pub checker: bool,
    pub id_prefix: String,
}

impl Default for ColorbarConfig {
    fn default() -> Self {
        Self {
            orientation: ColorbarOrientation::Vertical,
            side: ColorbarSide::Right,
            length: 200.0,
            thickness: 15.0,
            kind: None,
            gradient_stops: 10,
            tick_count: None,
            nice: false,
            format: TickFormat::Auto,
            title: None,
            band_padding: 0.0,
            band_align: 0.5,
            checker: false,
            id_prefix: "colorbar".to_string(),
        }
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ColorbarGuidesError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ColorbarGuidesError::InvalidDimension { name, value })
    }
}

impl ColorbarConfig {
    pub fn validate(&self) -> Result<(), ColorbarGuidesError> {
        if !self.side.fits(self.orientation) {
            return Err(ColorbarGuidesError::InvalidSide {
                orientation: self.orientation,
                side: self.side,
            });
        }
        positive("length", self.length)?;
        positive("thickness", self.thickness)
    }

    /// Pixel range along the bar. Continuous vertical bars grow upward,
    /// ordinal vertical bars list categories top to bottom.
    pub fn pixel_range(&self, kind: ScaleKind) -> (f32, f32) {
        match (self.orientation, kind.is_continuous()) {
            (ColorbarOrientation::Vertical, true) => (self.length, 0.0),
            _ => (0.0, self.length),
        }
    }

    pub fn axis_orientation(&self) -> AxisOrientation {
        match self.side {
            ColorbarSide::Left => AxisOrientation::Left,
            ColorbarSide::Right => AxisOrientation::Right,
            ColorbarSide::Top => AxisOrientation::Top,
            ColorbarSide::Bottom => AxisOrientation::Bottom,
        }
    }

    /// Where the axis line sits relative to the bar's top left corner
    pub fn axis_origin(&self) -> [f32; 2] {
        match self.side {
            ColorbarSide::Left | ColorbarSide::Top => [0.0, 0.0],
            ColorbarSide::Right => [self.thickness, 0.0],
            ColorbarSide::Bottom => [0.0, self.thickness],
        }
    }

    fn bar_rect(&self, start: f32, extent: f32) -> (f32, f32, f32, f32) {
        match self.orientation {
            ColorbarOrientation::Vertical => (0.0, start, self.thickness, extent),
            ColorbarOrientation::Horizontal => (start, 0.0, extent, self.thickness),
        }
    }
}

/// A rendered colorbar with the pixel mapping used to draw it
#[derive(Debug, Clone)]
pub struct Colorbar {
    pub group: SceneGroup,
    pub axis_scale: AxisScale,
    pub kind: ScaleKind,
}

struct BarMarks {
    rect: SceneRectMark,
    defs: Vec<Def>,
    colors: Vec<Color>,
}

pub fn make_colorbar_marks(
    scale: &dyn ColorScale,
    origin: [f32; 2],
    config: &ColorbarConfig,
) -> Result<Colorbar, ColorbarGuidesError> {
    config.validate()?;

    let kind = match config.kind {
        Some(kind) => kind,
        None => ScaleKind::infer(scale)?,
    };
    let mut axis_scale = AxisScale::from_color_scale(scale, kind, config.pixel_range(kind))?
        .with_band_layout(config.band_padding, config.band_align)?;
    if config.nice {
        axis_scale = axis_scale.nice(config.tick_count);
    }
    debug!(
        "Colorbar: {kind} scale, {} bar, axis on the {} side",
        config.orientation, config.side
    );

    let bar = if kind.is_continuous() {
        make_gradient_bar(scale, &axis_scale, config)?
    } else {
        make_band_rects(scale, &axis_scale, config)
    };

    let mut group = SceneGroup::new("colorbar", origin);
    if config.checker || bar.colors.iter().any(|c| !is_opaque(c)) {
        let pattern = checker_pattern(
            unique_id(&format!("{}-checker", config.id_prefix)),
            CHECKER_SIZE,
            WHITE,
            CHECKER_DARK,
        );
        group.push(SceneRectMark {
            name: "colorbar_checker".to_string(),
            fill: ScalarOrArray::new_scalar(pattern.paint()),
            ..bar.rect.clone()
        });
        group.push_def(pattern);
    }
    for def in bar.defs {
        group.push_def(def);
    }
    group.push(bar.rect);

    let axis_config = AxisConfig {
        orientation: config.axis_orientation(),
        tick_count: config.tick_count,
        format: config.format.clone(),
        title: config.title.clone(),
        ..Default::default()
    };
    group.push(make_axis_marks(
        &axis_scale,
        config.axis_origin(),
        &axis_config,
    )?);

    Ok(Colorbar {
        group,
        axis_scale,
        kind,
    })
}

/// One rect per category, filled with the category color
fn make_band_rects(
    scale: &dyn ColorScale,
    axis_scale: &AxisScale,
    config: &ColorbarConfig,
) -> BarMarks {
    let bandwidth = axis_scale.bandwidth();
    let values = axis_scale
        .as_band()
        .map(|band| band.values().to_vec())
        .unwrap_or_default();

    let mut xs = Vec::with_capacity(values.len());
    let mut ys = Vec::with_capacity(values.len());
    let mut widths = Vec::with_capacity(values.len());
    let mut heights = Vec::with_capacity(values.len());
    let mut fills = Vec::with_capacity(values.len());
    let mut colors = Vec::with_capacity(values.len());

    for value in &values {
        let Some(start) = axis_scale.scale(value).map(|center| center - bandwidth / 2.0) else {
            continue;
        };
        let (x, y, width, height) = config.bar_rect(start, bandwidth);
        xs.push(x);
        ys.push(y);
        widths.push(width);
        heights.push(height);
        match scale.color(value) {
            Some(color) => {
                fills.push(Paint::Color(color));
                colors.push(color);
            }
            None => {
                warn!("No color for category {value}, leaving its band empty");
                fills.push(Paint::None);
            }
        }
    }

    BarMarks {
        rect: SceneRectMark {
            name: "colorbar_bands".to_string(),
            len: xs.len() as u32,
            x: ScalarOrArray::new_array(xs),
            y: ScalarOrArray::new_array(ys),
            width: ScalarOrArray::new_array(widths),
            height: ScalarOrArray::new_array(heights),
            fill: ScalarOrArray::new_array(fills),
            ..Default::default()
        },
        defs: vec![],
        colors,
    }
}

/// Samples `scale` along the bar into gradient stops ordered by offset.
///
/// Every domain stop is kept. Samples closer than 1e-6 to a kept stop are
/// dropped, as are values the scale has no color for.
pub(crate) fn gradient_stops(
    scale: &dyn ColorScale,
    axis_scale: &AxisScale,
    samples: usize,
) -> Vec<GradientStop> {
    let (r0, r1) = axis_scale.range();
    let span = r1 - r0;
    let samples = samples.max(2);
    let (first, last) = axis_scale.domain_extent();

    let resolve = |offset: f32, value: &DomainValue| {
        Some(GradientStop {
            offset: offset.clamp(0.0, 1.0),
            color: scale.color(value)?,
        })
    };

    let mut stops: Vec<GradientStop> = scale
        .domain()
        .iter()
        .filter_map(|value| resolve((axis_scale.scale(value)? - r0) / span, value))
        .collect();

    for i in 0..samples {
        let t = i as f32 / (samples - 1) as f32;
        // ends map exactly onto the domain extent
        let value = match i {
            0 => Some(first.clone()),
            _ if i == samples - 1 => Some(last.clone()),
            _ => axis_scale.invert(r0 + t * span),
        };
        let Some(stop) = value.and_then(|value| resolve(t, &value)) else {
            continue;
        };
        if stops.iter().all(|s| (s.offset - stop.offset).abs() >= 1e-6) {
            stops.push(stop);
        }
    }

    stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
    stops.dedup_by(|a, b| (a.offset - b.offset).abs() < 1e-6);
    stops
}

/// A single rect filled with a gradient running toward increasing values
fn make_gradient_bar(
    scale: &dyn ColorScale,
    axis_scale: &AxisScale,
    config: &ColorbarConfig,
) -> Result<BarMarks, ColorbarGuidesError> {
    let stops = gradient_stops(scale, axis_scale, config.gradient_stops);
    if stops.len() < 2 {
        return Err(ColorbarScaleError::TooFewStops(stops.len()).into());
    }
    let colors = stops.iter().map(|stop| stop.color).collect();

    let id = unique_id(&format!("{}-gradient", config.id_prefix));
    let gradient = match config.orientation {
        ColorbarOrientation::Vertical => LinearGradientDef::vertical(id, stops),
        ColorbarOrientation::Horizontal => LinearGradientDef::horizontal(id, stops),
    };

    let (x, y, width, height) = config.bar_rect(0.0, config.length);
    Ok(BarMarks {
        rect: SceneRectMark {
            name: "colorbar_gradient".to_string(),
            x: ScalarOrArray::new_scalar(x),
            y: ScalarOrArray::new_scalar(y),
            width: ScalarOrArray::new_scalar(width),
            height: ScalarOrArray::new_scalar(height),
            fill: ScalarOrArray::new_scalar(gradient.paint()),
            ..Default::default()
        },
        defs: vec![gradient.into()],
        colors,
    })
}

/// Keeps a scale and config together and re-renders when either changes
#[derive(Debug, Clone)]
pub struct ColorbarState {
    scale: Arc<dyn ColorScale>,
    origin: [f32; 2],
    config: ColorbarConfig,
    colorbar: Colorbar,
}

impl ColorbarState {
    pub fn try_new(
        scale: Arc<dyn ColorScale>,
        origin: [f32; 2],
        config: ColorbarConfig,
    ) -> Result<Self, ColorbarGuidesError> {
        let colorbar = make_colorbar_marks(scale.as_ref(), origin, &config)?;
        Ok(Self {
            scale,
            origin,
            config,
            colorbar,
        })
    }

    pub fn scale(&self) -> &dyn ColorScale {
        self.scale.as_ref()
    }

    pub fn config(&self) -> &ColorbarConfig {
        &self.config
    }

    pub fn colorbar(&self) -> &Colorbar {
        &self.colorbar
    }

    /// Replaces the scale and re-renders. On error the previous state is kept.
    pub fn set_scale(&mut self, scale: Arc<dyn ColorScale>) -> Result<(), ColorbarGuidesError> {
        self.colorbar = make_colorbar_marks(scale.as_ref(), self.origin, &self.config)?;
        self.scale = scale;
        Ok(())
    }

    /// Replaces the config and re-renders. On error the previous state is kept.
    pub fn set_config(&mut self, config: ColorbarConfig) -> Result<(), ColorbarGuidesError> {
        self.colorbar = make_colorbar_marks(self.scale.as_ref(), self.origin, &config)?;
        self.config = config;
        Ok(())
    }

    pub fn set_origin(&mut self, origin: [f32; 2]) {
        self.origin = origin;
        self.colorbar.group.origin = origin;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorbar_common::types::BLACK;
    use colorbar_scales::color::linear::LinearColorScale;
    use colorbar_scales::color::ordinal::OrdinalColorScale;
    use colorbar_scenegraph::marks::mark::SceneMark;
    use float_cmp::assert_approx_eq;

    fn find_rect<'a>(group: &'a SceneGroup, name: &str) -> Option<&'a SceneRectMark> {
        group.marks.iter().find_map(|mark| match mark {
            SceneMark::Rect(rect) if rect.name == name => Some(rect),
            _ => None,
        })
    }

    #[test]
    fn test_gradient_stops_include_domain_stops() -> Result<(), ColorbarScaleError> {
        let scale =
            LinearColorScale::try_new(vec![0.0, 0.25, 1.0], vec![BLACK, WHITE, BLACK])?;
        let axis = AxisScale::from_color_scale(&scale, ScaleKind::Linear, (100.0, 0.0))?;
        let stops = gradient_stops(&scale, &axis, 3);

        let offsets: Vec<f32> = stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets.len(), 4);
        assert_approx_eq!(f32, offsets[0], 0.0);
        assert_approx_eq!(f32, offsets[1], 0.25);
        assert_approx_eq!(f32, offsets[2], 0.5);
        assert_approx_eq!(f32, offsets[3], 1.0);
        for (channel, expected) in stops[1].color.iter().zip(WHITE) {
            assert_approx_eq!(f32, *channel, expected, epsilon = 1e-4);
        }
        Ok(())
    }

    #[test]
    fn test_unclamped_gradient_keeps_end_stops() -> Result<(), ColorbarScaleError> {
        let scale = LinearColorScale::try_new(vec![0.0, 3.3], vec![BLACK, WHITE])?.with_clamp(false);
        let axis = AxisScale::from_color_scale(&scale, ScaleKind::Linear, (333.0, 0.0))?;
        let stops = gradient_stops(&scale, &axis, 10);

        assert_eq!(stops.len(), 10);
        assert_eq!(stops[0].offset, 0.0);
        assert_eq!(stops[9].offset, 1.0);
        for (channel, expected) in stops[9].color.iter().zip(WHITE) {
            assert_approx_eq!(f32, *channel, expected, epsilon = 1e-4);
        }
        assert!(stops.windows(2).all(|w| w[0].offset < w[1].offset));
        Ok(())
    }

    #[test]
    fn test_continuous_colorbar() -> Result<(), ColorbarGuidesError> {
        let scale = LinearColorScale::try_new(vec![0.0, 10.0], vec![BLACK, WHITE])?;
        let colorbar = make_colorbar_marks(&scale, [5.0, 5.0], &ColorbarConfig::default())?;

        assert_eq!(colorbar.kind, ScaleKind::Linear);
        assert_eq!(colorbar.axis_scale.range(), (200.0, 0.0));
        assert_eq!(colorbar.group.origin, [5.0, 5.0]);

        let rect = find_rect(&colorbar.group, "colorbar_gradient").unwrap();
        assert_eq!(rect.width_vec(), vec![15.0]);
        assert_eq!(rect.height_vec(), vec![200.0]);
        let Paint::Url(id) = &rect.fill_vec()[0] else {
            panic!("expected gradient fill");
        };
        assert!(id.starts_with("colorbar-gradient-"));
        assert!(matches!(
            colorbar.group.defs.as_slice(),
            [Def::LinearGradient(gradient)] if gradient.y1 == 1.0 && gradient.stops.len() == 10
        ));
        // opaque colors need no checker
        assert!(find_rect(&colorbar.group, "colorbar_checker").is_none());
        Ok(())
    }

    #[test]
    fn test_nice_colorbar_pads_gradient_with_end_colors() -> Result<(), ColorbarGuidesError> {
        let scale = LinearColorScale::try_new(vec![2.5, 7.5], vec![BLACK, WHITE])?;
        let config = ColorbarConfig {
            nice: true,
            tick_count: Some(1.0),
            gradient_stops: 2,
            ..Default::default()
        };
        let colorbar = make_colorbar_marks(&scale, [0.0, 0.0], &config)?;
        assert_eq!(
            colorbar.axis_scale.domain_extent(),
            (DomainValue::Number(0.0), DomainValue::Number(10.0))
        );

        let [Def::LinearGradient(gradient)] = colorbar.group.defs.as_slice() else {
            panic!("expected a single gradient def");
        };
        let offsets: Vec<f32> = gradient.stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets.len(), 4);
        assert_approx_eq!(f32, offsets[1], 0.25);
        assert_approx_eq!(f32, offsets[2], 0.75);
        Ok(())
    }

    #[test]
    fn test_translucent_colorbar_has_checker() -> Result<(), ColorbarGuidesError> {
        let scale =
            LinearColorScale::try_new(vec![0.0, 1.0], vec![[1.0, 0.0, 0.0, 0.0], BLACK])?;
        let colorbar = make_colorbar_marks(&scale, [0.0, 0.0], &ColorbarConfig::default())?;
        let checker = find_rect(&colorbar.group, "colorbar_checker").unwrap();
        assert_eq!(checker.height_vec(), vec![200.0]);
        assert_eq!(colorbar.group.defs.len(), 2);

        // checker is drawn beneath the gradient
        let names: Vec<&str> = colorbar.group.marks.iter().map(|m| m.name()).collect();
        assert_eq!(&names[..2], &["colorbar_checker", "colorbar_gradient"]);
        Ok(())
    }

    #[test]
    fn test_banded_colorbar() -> Result<(), ColorbarGuidesError> {
        let scale = OrdinalColorScale::try_new(
            vec!["a".into(), "b".into()],
            vec![BLACK, WHITE],
        )?;
        let config = ColorbarConfig {
            orientation: ColorbarOrientation::Horizontal,
            side: ColorbarSide::Bottom,
            length: 100.0,
            ..Default::default()
        };
        let colorbar = make_colorbar_marks(&scale, [0.0, 0.0], &config)?;

        assert_eq!(colorbar.kind, ScaleKind::Ordinal);
        let bands = find_rect(&colorbar.group, "colorbar_bands").unwrap();
        assert_eq!(bands.len, 2);
        assert_eq!(bands.x_vec(), vec![0.0, 50.0]);
        assert_eq!(bands.width_vec(), vec![50.0, 50.0]);
        assert_eq!(bands.height_vec(), vec![15.0, 15.0]);
        assert_eq!(
            bands.fill_vec(),
            vec![Paint::Color(BLACK), Paint::Color(WHITE)]
        );
        assert!(colorbar.group.defs.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_side() {
        let scale = LinearColorScale::try_new(vec![0.0, 1.0], vec![BLACK, WHITE]).unwrap();
        let config = ColorbarConfig {
            side: ColorbarSide::Top,
            ..Default::default()
        };
        assert!(matches!(
            make_colorbar_marks(&scale, [0.0, 0.0], &config),
            Err(ColorbarGuidesError::InvalidSide { .. })
        ));
    }

    #[test]
    fn test_state_keeps_previous_render_on_error() -> Result<(), ColorbarGuidesError> {
        let scale = Arc::new(LinearColorScale::try_new(vec![0.0, 1.0], vec![BLACK, WHITE])?);
        let mut state = ColorbarState::try_new(scale, [0.0, 0.0], ColorbarConfig::default())?;

        let bad = ColorbarConfig {
            length: 0.0,
            ..Default::default()
        };
        assert!(state.set_config(bad).is_err());
        assert_eq!(state.config().length, 200.0);

        let longer = ColorbarConfig {
            length: 300.0,
            ..Default::default()
        };
        state.set_config(longer)?;
        assert_eq!(state.colorbar().axis_scale.range(), (300.0, 0.0));
        Ok(())
    }

    #[test]
    fn test_state_set_scale() -> Result<(), ColorbarGuidesError> {
        let scale = Arc::new(LinearColorScale::try_new(vec![0.0, 1.0], vec![BLACK, WHITE])?);
        let config = ColorbarConfig {
            kind: Some(ScaleKind::Linear),
            ..Default::default()
        };
        let mut state = ColorbarState::try_new(scale, [0.0, 0.0], config)?;

        // categories cannot back a forced linear axis
        let categories = Arc::new(OrdinalColorScale::try_new(
            vec!["a".into(), "b".into()],
            vec![BLACK, WHITE],
        )?);
        assert!(state.set_scale(categories).is_err());
        assert_eq!(state.scale().domain().len(), 2);
        assert_eq!(
            state.colorbar().axis_scale.domain_extent(),
            (DomainValue::Number(0.0), DomainValue::Number(1.0))
        );

        let wider = Arc::new(LinearColorScale::try_new(vec![-5.0, 5.0], vec![BLACK, WHITE])?);
        state.set_scale(wider)?;
        assert_eq!(
            state.colorbar().axis_scale.domain_extent(),
            (DomainValue::Number(-5.0), DomainValue::Number(5.0))
        );
        Ok(())
    }
}
