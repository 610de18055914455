use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use chrono::NaiveDateTime;
use colorbar_common::color::parse_color;
use colorbar_common::domain::DomainValue;
use colorbar_common::types::Color;
use colorbar_guides::handle::{make_handle_marks, HandleConfig};
use colorbar_guides::legend::colorbar::{make_colorbar_marks, ColorbarConfig, ColorbarSide};
use colorbar_scales::color::linear::LinearColorScale;
use colorbar_scales::color::ordinal::OrdinalColorScale;
use colorbar_scales::color::schemes::scheme;
use colorbar_scales::color::time::TimeColorScale;
use colorbar_scales::color::{ColorScale, ColorSpace};
use colorbar_scales::temporal::{from_millis, to_millis};
use colorbar_scenegraph::measurement::default_text_measurer;
use colorbar_scenegraph::scene_graph::SceneGraph;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Colors given explicitly or by scheme name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorRange {
    Scheme(String),
    Colors(Vec<String>),
}

impl ColorRange {
    pub fn colors(&self) -> anyhow::Result<Vec<Color>> {
        match self {
            ColorRange::Scheme(name) => Ok(scheme(name)?),
            ColorRange::Colors(colors) => colors
                .iter()
                .map(|c| parse_color(c).with_context(|| format!("invalid color {c:?}")))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScaleSpec {
    Linear {
        domain: Vec<f32>,
        range: ColorRange,
        #[serde(default)]
        color_space: ColorSpace,
        #[serde(default = "default_clamp")]
        clamp: bool,
    },
    Time {
        domain: Vec<NaiveDateTime>,
        range: ColorRange,
        #[serde(default)]
        color_space: ColorSpace,
    },
    Ordinal {
        domain: Vec<DomainValue>,
        range: ColorRange,
        #[serde(default)]
        unknown: Option<String>,
    },
}

fn default_clamp() -> bool {
    true
}

impl ScaleSpec {
    /// Builds the color scale. A two-value continuous domain is spread
    /// evenly across longer color ranges.
    pub fn build(&self) -> anyhow::Result<Arc<dyn ColorScale>> {
        let scale: Arc<dyn ColorScale> = match self {
            ScaleSpec::Linear {
                domain,
                range,
                color_space,
                clamp,
            } => {
                let colors = range.colors()?;
                let scale = match domain.as_slice() {
                    [start, end] if colors.len() != 2 => {
                        LinearColorScale::try_new_uniform((*start, *end), colors)?
                    }
                    _ => LinearColorScale::try_new(domain.clone(), colors)?,
                };
                Arc::new(scale.with_color_space(*color_space).with_clamp(*clamp))
            }
            ScaleSpec::Time {
                domain,
                range,
                color_space,
            } => {
                let colors = range.colors()?;
                let domain = match domain.as_slice() {
                    [start, end] if colors.len() > 2 => spread(start, end, colors.len())?,
                    _ => domain.clone(),
                };
                Arc::new(TimeColorScale::try_new(domain, colors)?.with_color_space(*color_space))
            }
            ScaleSpec::Ordinal {
                domain,
                range,
                unknown,
            } => {
                let unknown = unknown
                    .as_deref()
                    .map(parse_color)
                    .transpose()
                    .context("invalid unknown color")?;
                Arc::new(
                    OrdinalColorScale::try_new(domain.clone(), range.colors()?)?
                        .with_unknown(unknown)?,
                )
            }
        };
        Ok(scale)
    }
}

/// `n` evenly spaced timestamps from `start` to `end`
fn spread(start: &NaiveDateTime, end: &NaiveDateTime, n: usize) -> anyhow::Result<Vec<NaiveDateTime>> {
    let (t0, t1) = (to_millis(start), to_millis(end));
    let last = (n - 1) as f64;
    (0..n)
        .map(|i| {
            let t = t0 + (t1 - t0) * i as f64 / last;
            from_millis(t).ok_or_else(|| anyhow!("timestamp out of range: {t}"))
        })
        .collect()
}

/// Handle appearance. Fields left out follow the colorbar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandleStyle {
    #[serde(default)]
    pub side: Option<ColorbarSide>,
    #[serde(default)]
    pub size: Option<f32>,
    #[serde(default)]
    pub pointer: Option<f32>,
    #[serde(default)]
    pub stroke: Option<String>,
    #[serde(default)]
    pub stroke_width: Option<f32>,
}

impl HandleStyle {
    /// Handle config for `colorbar` with the given fields overlaid
    pub fn config_for(&self, colorbar: &ColorbarConfig) -> anyhow::Result<HandleConfig> {
        let mut config = HandleConfig::for_colorbar(colorbar);
        if let Some(side) = self.side {
            config.side = side;
        }
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(pointer) = self.pointer {
            config.pointer = pointer;
        }
        if let Some(stroke) = &self.stroke {
            config.stroke =
                parse_color(stroke).with_context(|| format!("invalid handle stroke {stroke:?}"))?;
        }
        if let Some(stroke_width) = self.stroke_width {
            config.stroke_width = stroke_width;
        }
        Ok(config)
    }
}

/// A colorbar with optional handles, as read from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSpec {
    /// Canvas size, fitted to the rendered widget when omitted
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default = "default_margin")]
    pub margin: f32,
    pub scale: ScaleSpec,
    #[serde(default)]
    pub colorbar: ColorbarConfig,
    /// Values to draw handles at
    #[serde(default)]
    pub handles: Vec<DomainValue>,
    #[serde(default)]
    pub handle: HandleStyle,
}

fn default_margin() -> f32 {
    10.0
}

impl WidgetSpec {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid widget description")
    }

    pub fn render(&self) -> anyhow::Result<SceneGraph> {
        if self.margin.is_nan() || self.margin < 0.0 {
            bail!("margin must not be negative, got {}", self.margin);
        }

        let scale = self.scale.build()?;
        let colorbar = make_colorbar_marks(scale.as_ref(), [0.0, 0.0], &self.colorbar)?;
        let mut group = colorbar.group;

        let handle_config = self.handle.config_for(&self.colorbar)?;
        for value in &self.handles {
            let handle = make_handle_marks(value, &colorbar.axis_scale, scale.as_ref(), &handle_config)
                .with_context(|| format!("cannot draw handle at {value}"))?;
            group.push(handle);
        }

        // shift so the top left of the widget sits at the margin
        let bounds = group
            .bounding_box(&default_text_measurer())
            .ok_or_else(|| anyhow!("colorbar has no marks"))?;
        group.origin = [self.margin - bounds.x0, self.margin - bounds.y0];

        let width = self
            .width
            .unwrap_or_else(|| (bounds.width() + 2.0 * self.margin).ceil());
        let height = self
            .height
            .unwrap_or_else(|| (bounds.height() + 2.0 * self.margin).ceil());
        debug!("Widget bounds {bounds:?}, canvas {width}x{height}");
        info!(
            "Rendered {} colorbar with {} handles",
            colorbar.kind,
            self.handles.len()
        );

        let mut scene = SceneGraph::new(width, height);
        scene.push(group);
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorbar_guides::legend::colorbar::ColorbarOrientation;
    use colorbar_scales::kind::ScaleKind;

    #[test]
    fn test_parse_and_render() {
        let json = r#"{
            "scale": {"type": "linear", "domain": [0, 100], "range": "viridis"},
            "colorbar": {"title": "Percent", "length": 150},
            "handles": [25, 75]
        }"#;
        let widget = WidgetSpec::from_json(json).unwrap();
        assert_eq!(widget.margin, 10.0);
        assert_eq!(widget.handles, vec![DomainValue::Number(25.0), DomainValue::Number(75.0)]);

        let scene = widget.render().unwrap();
        assert!(scene.width > 0.0 && scene.height > 150.0);
        let svg = scene.to_svg().unwrap();
        assert_eq!(svg.matches(r#"class="handle""#).count(), 2);
    }

    #[test]
    fn test_ordinal_scale() {
        let json = r##"{
            "type": "ordinal",
            "domain": ["a", "b", "c"],
            "range": ["#ff0000", "#00ff00"],
            "unknown": "#cccccc"
        }"##;
        let spec: ScaleSpec = serde_json::from_str(json).unwrap();
        let scale = spec.build().unwrap();
        assert_eq!(ScaleKind::infer(scale.as_ref()).unwrap(), ScaleKind::Ordinal);
        assert_eq!(scale.color(&"c".into()), Some([1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_time_scale_spreads_colors() {
        let json = r#"{
            "type": "time",
            "domain": ["2024-01-01T00:00:00", "2024-01-03T00:00:00"],
            "range": ["black", "gray", "white"]
        }"#;
        let spec: ScaleSpec = serde_json::from_str(json).unwrap();
        let scale = spec.build().unwrap();
        assert_eq!(scale.domain().len(), 3);
        assert_eq!(ScaleKind::infer(scale.as_ref()).unwrap(), ScaleKind::Time);
    }

    #[test]
    fn test_unknown_scheme() {
        let spec = ScaleSpec::Linear {
            domain: vec![0.0, 1.0],
            range: ColorRange::Scheme("nope".to_string()),
            color_space: ColorSpace::Srgb,
            clamp: true,
        };
        assert!(spec.build().is_err());
    }

    #[test]
    fn test_partial_handle_style_follows_colorbar() {
        let json = r##"{
            "scale": {"type": "linear", "domain": [0, 1], "range": "blues"},
            "colorbar": {"orientation": "horizontal", "side": "bottom", "thickness": 12},
            "handle": {"size": 8, "stroke": "#ff0000"},
            "handles": [0.5]
        }"##;
        let widget = WidgetSpec::from_json(json).unwrap();
        let config = widget.handle.config_for(&widget.colorbar).unwrap();
        assert_eq!(config.orientation, ColorbarOrientation::Horizontal);
        assert_eq!(config.side, ColorbarSide::Top);
        assert_eq!(config.thickness, 12.0);
        assert_eq!(config.size, 8.0);
        assert_eq!(config.stroke, [1.0, 0.0, 0.0, 1.0]);

        let svg = widget.render().unwrap().to_svg().unwrap();
        assert_eq!(svg.matches(r#"class="handle""#).count(), 1);
    }

    #[test]
    fn test_unknown_handle_field() {
        let json = r#"{
            "scale": {"type": "linear", "domain": [0, 1], "range": "blues"},
            "handle": {"sise": 8}
        }"#;
        assert!(WidgetSpec::from_json(json).is_err());
    }
}
