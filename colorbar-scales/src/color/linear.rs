use colorbar_common::domain::DomainValue;
use colorbar_common::types::Color;

use super::{ascending_stops, interpolate_stops, ColorScale, ColorSpace};
use crate::array;
use crate::error::ColorbarScaleError;

/// Piecewise-linear mapping from numeric stops to colors
#[derive(Debug, Clone)]
pub struct LinearColorScale {
    // as given, possibly descending
    domain: Vec<f32>,
    stops: Vec<f64>,
    colors: Vec<Color>,
    space: ColorSpace,
    clamp: bool,
}

impl LinearColorScale {
    pub fn try_new(domain: Vec<f32>, range: Vec<Color>) -> Result<Self, ColorbarScaleError> {
        let (stops, colors) =
            ascending_stops(domain.iter().map(|v| *v as f64).collect(), range)?;
        Ok(Self {
            domain,
            stops,
            colors,
            space: ColorSpace::default(),
            clamp: true,
        })
    }

    /// Spreads `range` evenly over `(start, end)`
    pub fn try_new_uniform(
        (start, end): (f32, f32),
        range: Vec<Color>,
    ) -> Result<Self, ColorbarScaleError> {
        if range.len() < 2 {
            return Err(ColorbarScaleError::TooFewStops(range.len()));
        }
        let n = (range.len() - 1) as f32;
        let domain = (0..range.len())
            .map(|i| start + (end - start) * i as f32 / n)
            .collect();
        Self::try_new(domain, range)
    }

    pub fn with_color_space(mut self, space: ColorSpace) -> Self {
        self.space = space;
        self
    }

    /// When disabled, values outside the domain extent have no color
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn stops(&self) -> &[f32] {
        &self.domain
    }

    pub fn color_space(&self) -> ColorSpace {
        self.space
    }

    pub fn scale(&self, value: f32) -> Option<Color> {
        let value = value as f64;
        if !self.clamp && (value < self.stops[0] || value > self.stops[self.stops.len() - 1]) {
            return None;
        }
        interpolate_stops(&self.stops, &self.colors, self.space, value)
    }
}

impl ColorScale for LinearColorScale {
    fn domain(&self) -> Vec<DomainValue> {
        self.domain.iter().map(|v| DomainValue::Number(*v)).collect()
    }

    fn color(&self, value: &DomainValue) -> Option<Color> {
        self.scale(value.as_number()?)
    }

    fn ticks(&self, count: Option<f32>) -> Option<Vec<DomainValue>> {
        let start = *self.domain.first()?;
        let end = *self.domain.last()?;
        Some(
            array::ticks(start, end, count.unwrap_or(10.0))
                .into_iter()
                .map(DomainValue::Number)
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
    use float_cmp::assert_approx_eq;

    const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    const BLACK: Color = [0.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_linear_color_scale() -> Result<(), ColorbarScaleError> {
        let scale = LinearColorScale::try_new(vec![0.0, 10.0], vec![BLACK, WHITE])?;
        let mid = scale.color(&DomainValue::Number(5.0)).unwrap();
        assert_approx_eq!(f32, mid[0], 0.5);
        assert_eq!(scale.color(&DomainValue::Number(20.0)), Some(WHITE));
        assert_eq!(scale.color(&DomainValue::from("a")), None);
        assert!(scale.interpolates());
        Ok(())
    }

    #[test]
    fn test_descending_domain() -> Result<(), ColorbarScaleError> {
        let scale = LinearColorScale::try_new(vec![10.0, 0.0], vec![BLACK, WHITE])?;
        assert_eq!(scale.scale(10.0), Some(BLACK));
        assert_eq!(scale.scale(0.0), Some(WHITE));
        assert_eq!(
            scale.domain(),
            vec![DomainValue::Number(10.0), DomainValue::Number(0.0)]
        );
        assert_eq!(
            scale.ticks(Some(2.0)),
            Some(vec![
                DomainValue::Number(10.0),
                DomainValue::Number(5.0),
                DomainValue::Number(0.0)
            ])
        );
        Ok(())
    }

    #[test]
    fn test_unclamped_outside_domain() -> Result<(), ColorbarScaleError> {
        let scale =
            LinearColorScale::try_new(vec![0.0, 1.0], vec![BLACK, WHITE])?.with_clamp(false);
        assert_eq!(scale.scale(1.5), None);
        assert_eq!(scale.scale(1.0), Some(WHITE));
        Ok(())
    }

    #[test]
    fn test_uniform() -> Result<(), ColorbarScaleError> {
        let scale = LinearColorScale::try_new_uniform((0.0, 100.0), vec![BLACK, WHITE, BLACK])?;
        assert_eq!(scale.stops(), &[0.0, 50.0, 100.0]);
        assert_eq!(scale.scale(50.0), Some(WHITE));
        Ok(())
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            LinearColorScale::try_new(vec![0.0], vec![BLACK]),
            Err(ColorbarScaleError::TooFewStops(1))
        ));
        assert!(matches!(
            LinearColorScale::try_new(vec![0.0, 1.0], vec![BLACK]),
            Err(ColorbarScaleError::DomainRangeMismatch { .. })
        ));
    }
}
