use chrono::NaiveDateTime;
use colorbar_common::domain::DomainValue;
use colorbar_common::types::Color;

use super::{ascending_stops, interpolate_stops, ColorScale, ColorSpace};
use crate::error::ColorbarScaleError;
use crate::numeric::ContinuousNumericScale;
use crate::temporal::timestamp::{TimestampScale, TimestampScaleConfig};
use crate::temporal::to_millis;

/// Piecewise-linear mapping from timestamps to colors
#[derive(Debug, Clone)]
pub struct TimeColorScale {
    domain: Vec<NaiveDateTime>,
    stops: Vec<f64>,
    colors: Vec<Color>,
    space: ColorSpace,
}

impl TimeColorScale {
    pub fn try_new(
        domain: Vec<NaiveDateTime>,
        range: Vec<Color>,
    ) -> Result<Self, ColorbarScaleError> {
        let (stops, colors) = ascending_stops(domain.iter().map(to_millis).collect(), range)?;
        Ok(Self {
            domain,
            stops,
            colors,
            space: ColorSpace::default(),
        })
    }

    pub fn with_color_space(mut self, space: ColorSpace) -> Self {
        self.space = space;
        self
    }

    pub fn scale(&self, value: &NaiveDateTime) -> Option<Color> {
        interpolate_stops(&self.stops, &self.colors, self.space, to_millis(value))
    }
}

impl ColorScale for TimeColorScale {
    fn domain(&self) -> Vec<DomainValue> {
        self.domain.iter().map(|v| DomainValue::Timestamp(*v)).collect()
    }

    fn color(&self, value: &DomainValue) -> Option<Color> {
        self.scale(&value.as_timestamp()?)
    }

    fn ticks(&self, count: Option<f32>) -> Option<Vec<DomainValue>> {
        let start = *self.domain.first()?;
        let end = *self.domain.last()?;
        let scale = TimestampScale::new(&TimestampScaleConfig {
            domain: (start, end),
            ..Default::default()
        });
        Some(
            scale
                .ticks(count)
                .into_iter()
                .map(DomainValue::Timestamp)
                .collect(),
        )
    }

    fn interpolates(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use float_cmp::assert_approx_eq;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_time_color_scale() -> Result<(), ColorbarScaleError> {
        let scale = TimeColorScale::try_new(
            vec![day(1), day(11)],
            vec![[0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0]],
        )?;
        let mid = scale.color(&DomainValue::Timestamp(day(6))).unwrap();
        assert_approx_eq!(f32, mid[1], 0.5);
        assert_eq!(scale.color(&DomainValue::Number(1.0)), None);

        let ticks = scale.ticks(Some(5.0)).unwrap();
        assert_eq!(ticks.first(), Some(&DomainValue::Timestamp(day(1))));
        assert!(ticks.iter().all(|t| t.as_timestamp().is_some()));
        Ok(())
    }
}
