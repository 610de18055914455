//! Pixel mapping along a colorbar, built from a color scale's domain

use chrono::NaiveDateTime;
use colorbar_common::domain::DomainValue;
use log::debug;

use crate::array;
use crate::band::BandScale;
use crate::color::ColorScale;
use crate::error::ColorbarScaleError;
use crate::formatter::TickFormat;
use crate::kind::ScaleKind;
use crate::numeric::linear::{LinearNumericScale, LinearNumericScaleConfig};
use crate::numeric::ContinuousNumericScale;
use crate::temporal::timestamp::{TimestampScale, TimestampScaleConfig};

/// Bands keyed by the display string of each category
#[derive(Debug, Clone)]
pub struct BandAxis {
    scale: BandScale<String>,
    values: Vec<DomainValue>,
}

impl BandAxis {
    pub fn scale(&self) -> &BandScale<String> {
        &self.scale
    }

    pub fn values(&self) -> &[DomainValue] {
        &self.values
    }
}

/// Axis-compatible scale mapping domain values to pixels along a bar
#[derive(Debug, Clone)]
pub enum AxisScale {
    Band(BandAxis),
    Linear(LinearNumericScale),
    Time(TimestampScale),
}

fn extent<T: PartialOrd + Copy>(values: &[T]) -> Option<(T, T)> {
    let first = *values.first()?;
    let last = *values.last()?;
    let mut lo = first;
    let mut hi = first;
    for v in values {
        if *v < lo {
            lo = *v;
        }
        if *v > hi {
            hi = *v;
        }
    }
    // keep the direction of the first and last stops
    if first <= last {
        Some((lo, hi))
    } else {
        Some((hi, lo))
    }
}

impl AxisScale {
    /// Builds a scale that maps the domain of `scale` onto the pixel `range`
    pub fn from_color_scale(
        scale: &dyn ColorScale,
        kind: ScaleKind,
        range: (f32, f32),
    ) -> Result<AxisScale, ColorbarScaleError> {
        let domain = scale.domain();
        if domain.is_empty() {
            return Err(ColorbarScaleError::EmptyDomain);
        }

        let axis_scale = match kind {
            ScaleKind::Ordinal => {
                let mut values: Vec<DomainValue> = Vec::with_capacity(domain.len());
                for v in domain {
                    if !values.iter().any(|seen| seen.to_string() == v.to_string()) {
                        values.push(v);
                    }
                }
                let keys = values.iter().map(|v| v.to_string()).collect();
                let scale = BandScale::try_new(keys)?.range(range)?;
                AxisScale::Band(BandAxis { scale, values })
            }
            ScaleKind::Linear => {
                let numbers = domain
                    .iter()
                    .map(|v| {
                        v.as_number().ok_or(ColorbarScaleError::UnexpectedValueKind {
                            expected: "number",
                            actual: v.kind_name(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let domain = extent(&numbers).ok_or(ColorbarScaleError::EmptyDomain)?;
                AxisScale::Linear(LinearNumericScale::new(&LinearNumericScaleConfig {
                    domain,
                    range,
                    clamp: true,
                }))
            }
            ScaleKind::Time => {
                let timestamps = domain
                    .iter()
                    .map(|v| {
                        v.as_timestamp()
                            .ok_or(ColorbarScaleError::UnexpectedValueKind {
                                expected: "timestamp",
                                actual: v.kind_name(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let domain = extent(&timestamps).ok_or(ColorbarScaleError::EmptyDomain)?;
                AxisScale::Time(TimestampScale::new(&TimestampScaleConfig {
                    domain,
                    range,
                    clamp: true,
                }))
            }
        };

        debug!("Built {kind} axis scale over pixel range {range:?}");
        Ok(axis_scale)
    }

    /// Sets inner and outer padding of ordinal bands, and how the outer slack
    /// is split between the two ends. Continuous scales are returned unchanged.
    pub fn with_band_layout(self, padding: f32, align: f32) -> Result<AxisScale, ColorbarScaleError> {
        match self {
            AxisScale::Band(BandAxis { scale, values }) => Ok(AxisScale::Band(BandAxis {
                scale: scale
                    .padding_inner(padding)?
                    .padding_outer(padding)?
                    .align(align)?,
                values,
            })),
            other => Ok(other),
        }
    }

    /// Extends a continuous domain outward to round values. `count` is the
    /// tick count the rounding should suit. Ordinal scales are unchanged.
    pub fn nice(self, count: Option<f32>) -> AxisScale {
        match self {
            AxisScale::Linear(scale) => {
                AxisScale::Linear(scale.nice(count.map(|c| c.max(1.0).round() as usize)))
            }
            AxisScale::Time(scale) => AxisScale::Time(scale.nice(None)),
            band => band,
        }
    }

    pub fn kind(&self) -> ScaleKind {
        match self {
            AxisScale::Band(_) => ScaleKind::Ordinal,
            AxisScale::Linear(_) => ScaleKind::Linear,
            AxisScale::Time(_) => ScaleKind::Time,
        }
    }

    /// Pixel position of `value`, the band center for ordinal scales
    pub fn scale(&self, value: &DomainValue) -> Option<f32> {
        match self {
            AxisScale::Band(band) => band.scale.scale(&value.to_string(), 0.5),
            AxisScale::Linear(scale) => Some(scale.scale(&value.as_number()?)),
            AxisScale::Time(scale) => Some(scale.scale(&value.as_timestamp()?)),
        }
    }

    /// Domain value at pixel `value`, clamped to the domain extent.
    /// Ordinal scales return the nearest band's value.
    pub fn invert(&self, value: f32) -> Option<DomainValue> {
        match self {
            AxisScale::Band(band) => {
                let key = band.scale.invert(value)?;
                band.values.iter().find(|v| v.to_string() == key).cloned()
            }
            AxisScale::Linear(scale) => {
                if value.is_nan() {
                    return None;
                }
                Some(DomainValue::Number(scale.invert(value)))
            }
            AxisScale::Time(scale) => {
                if value.is_nan() {
                    return None;
                }
                Some(DomainValue::Timestamp(scale.invert(value)))
            }
        }
    }

    /// Tick values. Ordinal scales tick every category.
    pub fn ticks(&self, count: Option<f32>) -> Vec<DomainValue> {
        match self {
            AxisScale::Band(band) => band.values.clone(),
            AxisScale::Linear(scale) => scale
                .ticks(count)
                .into_iter()
                .map(DomainValue::Number)
                .collect(),
            AxisScale::Time(scale) => scale
                .ticks(count)
                .into_iter()
                .map(DomainValue::Timestamp)
                .collect(),
        }
    }

    /// Labels for `values`, which are assumed to come from `ticks(count)`
    pub fn format(
        &self,
        values: &[DomainValue],
        count: Option<f32>,
        format: &TickFormat,
    ) -> Vec<String> {
        match self {
            AxisScale::Band(_) => values.iter().map(|v| v.to_string()).collect(),
            AxisScale::Linear(scale) => {
                let (d0, d1) = scale.domain();
                let step = array::tick_step(d0, d1, count.unwrap_or(10.0));
                let numbers: Vec<f32> = values.iter().filter_map(|v| v.as_number()).collect();
                format.format_numbers(&numbers, Some(step).filter(|s| s.is_finite()))
            }
            AxisScale::Time(scale) => {
                let timestamps: Vec<NaiveDateTime> =
                    values.iter().filter_map(|v| v.as_timestamp()).collect();
                format.format_timestamps(&timestamps, scale.tick_granularity(count))
            }
        }
    }

    pub fn range(&self) -> (f32, f32) {
        match self {
            AxisScale::Band(band) => band.scale.get_range(),
            AxisScale::Linear(scale) => scale.range(),
            AxisScale::Time(scale) => scale.range(),
        }
    }

    /// Band width for ordinal scales, 0 for continuous ones
    pub fn bandwidth(&self) -> f32 {
        match self {
            AxisScale::Band(band) => band.scale.bandwidth(),
            _ => 0.0,
        }
    }

    /// First and last domain values along the axis
    pub fn domain_extent(&self) -> (DomainValue, DomainValue) {
        match self {
            AxisScale::Band(band) => {
                let first = band.values.first().cloned();
                let last = band.values.last().cloned();
                match (first, last) {
                    (Some(first), Some(last)) => (first, last),
                    // band scales are never built with an empty domain
                    _ => (DomainValue::from(""), DomainValue::from("")),
                }
            }
            AxisScale::Linear(scale) => {
                let (d0, d1) = scale.domain();
                (DomainValue::Number(d0), DomainValue::Number(d1))
            }
            AxisScale::Time(scale) => {
                let (d0, d1) = scale.domain();
                (DomainValue::Timestamp(d0), DomainValue::Timestamp(d1))
            }
        }
    }

    pub fn as_band(&self) -> Option<&BandAxis> {
        match self {
            AxisScale::Band(band) => Some(band),
            _ => None,
        }
    }
}
