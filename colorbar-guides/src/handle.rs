//! Draggable handle bound to one value of a colorbar's scale.
//!
//! A handle is a triangle whose tip touches the bar at the value's position
//! plus a square swatch filled with the value's color. [`DragHandle`] turns
//! pointer events into updates of the bound datum.

use colorbar_common::domain::DomainValue;
use colorbar_common::types::{is_opaque, Color, Paint, StrokeJoin, BLACK, WHITE};
use colorbar_common::value::ScalarOrArray;
use colorbar_scales::axis_scale::AxisScale;
use colorbar_scales::color::ColorScale;
use colorbar_scenegraph::bounds::Bounds;
use colorbar_scenegraph::defs::checker_pattern;
use colorbar_scenegraph::ids::unique_id;
use colorbar_scenegraph::marks::group::SceneGroup;
use colorbar_scenegraph::marks::path::ScenePathMark;
use colorbar_scenegraph::marks::rect::SceneRectMark;
use lyon_path::math::point;
use lyon_path::Path;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ColorbarGuidesError;
use crate::legend::colorbar::{
    ColorbarConfig, ColorbarOrientation, ColorbarSide, CHECKER_DARK, CHECKER_SIZE,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleConfig {
    pub orientation: ColorbarOrientation,
    /// Side of the bar the handle sits on
    pub side: ColorbarSide,
    /// Thickness of the bar the handle is attached to
    pub thickness: f32,
    /// Edge length of the swatch
    pub size: f32,
    /// Depth of the pointer triangle
    pub pointer: f32,
    pub stroke: Color,
    pub stroke_width: f32,
}

impl Default for HandleConfig {
    fn default() -> Self {
        let colorbar = ColorbarConfig::default();
        Self {
            orientation: colorbar.orientation,
            side: colorbar.side.opposite(),
            thickness: colorbar.thickness,
            size: 12.0,
            pointer: 6.0,
            stroke: BLACK,
            stroke_width: 1.0,
        }
    }
}

impl HandleConfig {
    /// Handle config for a colorbar, placed on the side opposite its axis
    pub fn for_colorbar(config: &ColorbarConfig) -> Self {
        Self {
            orientation: config.orientation,
            side: config.side.opposite(),
            thickness: config.thickness,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<(), ColorbarGuidesError> {
        if !self.side.fits(self.orientation) {
            return Err(ColorbarGuidesError::InvalidSide {
                orientation: self.orientation,
                side: self.side,
            });
        }
        for (name, value) in [("size", self.size), ("pointer", self.pointer)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ColorbarGuidesError::InvalidDimension { name, value });
            }
        }
        Ok(())
    }

    /// Bar edge the pointer touches and the direction the handle extends in
    fn edge(&self) -> (f32, f32) {
        match self.side {
            ColorbarSide::Left | ColorbarSide::Top => (0.0, -1.0),
            ColorbarSide::Right | ColorbarSide::Bottom => (self.thickness, 1.0),
        }
    }

    fn xy(&self, along: f32, across: f32) -> [f32; 2] {
        match self.orientation {
            ColorbarOrientation::Vertical => [across, along],
            ColorbarOrientation::Horizontal => [along, across],
        }
    }

    /// Pointer position along the bar
    fn along(&self, position: [f32; 2]) -> f32 {
        match self.orientation {
            ColorbarOrientation::Vertical => position[1],
            ColorbarOrientation::Horizontal => position[0],
        }
    }

    fn pointer_path(&self, at: f32) -> Path {
        let (edge, dir) = self.edge();
        let base = edge + dir * self.pointer;
        let half = self.pointer / 2.0;

        let [x0, y0] = self.xy(at, edge);
        let [x1, y1] = self.xy(at - half, base);
        let [x2, y2] = self.xy(at + half, base);

        let mut builder = Path::builder();
        builder.begin(point(x0, y0));
        builder.line_to(point(x1, y1));
        builder.line_to(point(x2, y2));
        builder.close();
        builder.build()
    }

    fn swatch_bounds(&self, at: f32) -> Bounds {
        let (edge, dir) = self.edge();
        let near = edge + dir * self.pointer;
        let far = near + dir * self.size;
        let half = self.size / 2.0;
        let [x0, y0] = self.xy(at - half, near);
        let [x1, y1] = self.xy(at + half, far);
        Bounds::new(x0, y0, x1, y1)
    }

    /// Extent of the whole handle for a value at pixel `at`
    pub fn handle_bounds(&self, at: f32) -> Bounds {
        let (edge, _) = self.edge();
        let [tx, ty] = self.xy(at, edge);
        self.swatch_bounds(at).union(&Bounds::new(tx, ty, tx, ty))
    }
}

/// Builds the marks of a handle for `value`, in the colorbar's coordinates
pub fn make_handle_marks(
    value: &DomainValue,
    axis_scale: &AxisScale,
    color_scale: &dyn ColorScale,
    config: &HandleConfig,
) -> Result<SceneGroup, ColorbarGuidesError> {
    config.validate()?;
    let at = axis_scale
        .scale(value)
        .ok_or_else(|| ColorbarGuidesError::ValueNotInDomain(value.to_string()))?;
    let color = color_scale
        .color(value)
        .ok_or_else(|| ColorbarGuidesError::ValueNotInDomain(value.to_string()))?;

    let mut group = SceneGroup::new("handle", [0.0, 0.0]);
    let stroke = Paint::Color(config.stroke);

    group.push(ScenePathMark {
        name: "handle_pointer".to_string(),
        path: ScalarOrArray::new_scalar(config.pointer_path(at)),
        fill: ScalarOrArray::new_scalar(stroke.clone()),
        stroke: ScalarOrArray::new_scalar(stroke.clone()),
        stroke_width: Some(config.stroke_width),
        stroke_join: StrokeJoin::Round,
        ..Default::default()
    });

    let swatch = config.swatch_bounds(at);
    let swatch_rect = SceneRectMark {
        name: "handle_swatch".to_string(),
        x: ScalarOrArray::new_scalar(swatch.x0),
        y: ScalarOrArray::new_scalar(swatch.y0),
        width: ScalarOrArray::new_scalar(swatch.width()),
        height: ScalarOrArray::new_scalar(swatch.height()),
        fill: ScalarOrArray::new_scalar(Paint::Color(color)),
        stroke: ScalarOrArray::new_scalar(stroke),
        stroke_width: ScalarOrArray::new_scalar(config.stroke_width),
        ..Default::default()
    };
    if !is_opaque(&color) {
        let pattern = checker_pattern(unique_id("handle-checker"), CHECKER_SIZE, WHITE, CHECKER_DARK);
        group.push(SceneRectMark {
            name: "handle_checker".to_string(),
            fill: ScalarOrArray::new_scalar(pattern.paint()),
            stroke: ScalarOrArray::new_scalar(Paint::None),
            ..swatch_rect.clone()
        });
        group.push_def(pattern);
    }
    group.push(swatch_rect);

    Ok(group)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandleEvent {
    PointerDown { position: [f32; 2] },
    PointerMove { position: [f32; 2] },
    PointerUp { position: [f32; 2] },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStatus {
    pub rerender: bool,
}

type Accessor<T> = Box<dyn Fn(&T) -> DomainValue + Send + Sync>;
type Setter<T> = Box<dyn Fn(&mut T, DomainValue) + Send + Sync>;

/// Handle bound to a datum through an accessor and a setter.
/// Event positions are in the colorbar's coordinates.
pub struct DragHandle<T> {
    datum: T,
    accessor: Accessor<T>,
    setter: Setter<T>,
    config: HandleConfig,
    /// Pointer offset from the value's position while dragging
    grab_offset: Option<f32>,
}

impl<T> DragHandle<T> {
    pub fn new(
        datum: T,
        accessor: impl Fn(&T) -> DomainValue + Send + Sync + 'static,
        setter: impl Fn(&mut T, DomainValue) + Send + Sync + 'static,
        config: HandleConfig,
    ) -> Self {
        Self {
            datum,
            accessor: Box::new(accessor),
            setter: Box::new(setter),
            config,
            grab_offset: None,
        }
    }

    pub fn datum(&self) -> &T {
        &self.datum
    }

    pub fn into_datum(self) -> T {
        self.datum
    }

    pub fn value(&self) -> DomainValue {
        (self.accessor)(&self.datum)
    }

    pub fn config(&self) -> &HandleConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.grab_offset.is_some()
    }

    pub fn render(
        &self,
        axis_scale: &AxisScale,
        color_scale: &dyn ColorScale,
    ) -> Result<SceneGroup, ColorbarGuidesError> {
        make_handle_marks(&self.value(), axis_scale, color_scale, &self.config)
    }

    pub fn hit_test(&self, position: [f32; 2], axis_scale: &AxisScale) -> bool {
        axis_scale
            .scale(&self.value())
            .is_some_and(|at| self.config.handle_bounds(at).contains(position))
    }

    pub fn handle_event(&mut self, event: &HandleEvent, axis_scale: &AxisScale) -> UpdateStatus {
        match event {
            HandleEvent::PointerDown { position } => {
                if let Some(at) = axis_scale.scale(&self.value()) {
                    if self.config.handle_bounds(at).contains(*position) {
                        self.grab_offset = Some(self.config.along(*position) - at);
                    }
                }
                UpdateStatus::default()
            }
            HandleEvent::PointerMove { position } => {
                let Some(offset) = self.grab_offset else {
                    return UpdateStatus::default();
                };
                let (r0, r1) = axis_scale.range();
                let along = (self.config.along(*position) - offset).clamp(r0.min(r1), r0.max(r1));
                let Some(value) = axis_scale.invert(along) else {
                    return UpdateStatus::default();
                };
                if value == self.value() {
                    return UpdateStatus::default();
                }
                debug!("Handle dragged to {value}");
                (self.setter)(&mut self.datum, value);
                UpdateStatus { rerender: true }
            }
            HandleEvent::PointerUp { .. } => {
                self.grab_offset = None;
                UpdateStatus::default()
            }
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for DragHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragHandle")
            .field("datum", &self.datum)
            .field("config", &self.config)
            .field("grab_offset", &self.grab_offset)
            .finish()
    }
}
