pub mod linear;
pub mod ordinal;
pub mod schemes;
pub mod time;

use std::fmt::Debug;

use colorbar_common::domain::DomainValue;
use colorbar_common::types::Color;
use palette::{Hsla, IntoColor, Laba, Mix, Srgba};
use serde::{Deserialize, Serialize};
use strum::{EnumString, VariantNames};

/// A scale that maps domain values to colors.
///
/// Renderers only see this trait. Whether a scale is ordinal, linear or
/// temporal is inferred from how it behaves (see [`crate::kind::ScaleKind::infer`]).
pub trait ColorScale: Debug {
    /// The stops (or categories) that define the scale, in order
    fn domain(&self) -> Vec<DomainValue>;

    /// Color for `value`, or None when the scale cannot map it
    fn color(&self, value: &DomainValue) -> Option<Color>;

    /// Approximately `count` representative domain values. Scales without a
    /// notion of ticks return None.
    fn ticks(&self, _count: Option<f32>) -> Option<Vec<DomainValue>> {
        None
    }

    /// Whether values between domain stops map to intermediate colors
    fn interpolates(&self) -> bool {
        false
    }
}

/// Color space that continuous scales mix colors in
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ColorSpace {
    #[default]
    Srgb,
    Lab,
    Hsl,
}

impl ColorSpace {
    /// Mix two colors, `t` in [0, 1]
    pub fn mix(&self, a: &Color, b: &Color, t: f32) -> Color {
        let a = Srgba::new(a[0], a[1], a[2], a[3]);
        let b = Srgba::new(b[0], b[1], b[2], b[3]);
        let mixed: Srgba = match self {
            ColorSpace::Srgb => a.mix(b, t),
            ColorSpace::Lab => {
                let a: Laba = a.into_color();
                let b: Laba = b.into_color();
                a.mix(b, t).into_color()
            }
            ColorSpace::Hsl => {
                let a: Hsla = a.into_color();
                let b: Hsla = b.into_color();
                a.mix(b, t).into_color()
            }
        };
        [
            mixed.red.clamp(0.0, 1.0),
            mixed.green.clamp(0.0, 1.0),
            mixed.blue.clamp(0.0, 1.0),
            mixed.alpha.clamp(0.0, 1.0),
        ]
    }
}

/// Piecewise interpolation of `colors` over ascending `stops`.
/// Values outside the stops take the nearest end color.
pub(crate) fn interpolate_stops(
    stops: &[f64],
    colors: &[Color],
    space: ColorSpace,
    value: f64,
) -> Option<Color> {
    if !value.is_finite() || stops.is_empty() || stops.len() != colors.len() {
        return None;
    }
    let last = stops.len() - 1;
    if value <= stops[0] {
        return Some(colors[0]);
    }
    if value >= stops[last] {
        return Some(colors[last]);
    }

    // stops[i] <= value < stops[i + 1]
    let i = stops.partition_point(|s| *s <= value).saturating_sub(1).min(last - 1);
    let span = stops[i + 1] - stops[i];
    let t = if span > 0.0 {
        ((value - stops[i]) / span) as f32
    } else {
        0.0
    };
    Some(space.mix(&colors[i], &colors[i + 1], t))
}

/// Validates a continuous domain and returns its stops and colors in ascending order
pub(crate) fn ascending_stops(
    stops: Vec<f64>,
    colors: Vec<Color>,
) -> Result<(Vec<f64>, Vec<Color>), crate::error::ColorbarScaleError> {
    use crate::error::ColorbarScaleError;

    if stops.len() != colors.len() {
        return Err(ColorbarScaleError::DomainRangeMismatch {
            domain_len: stops.len(),
            range_len: colors.len(),
        });
    }
    if stops.len() < 2 {
        return Err(ColorbarScaleError::TooFewStops(stops.len()));
    }

    let ascending = stops.windows(2).all(|w| w[0] <= w[1]);
    let descending = stops.windows(2).all(|w| w[0] >= w[1]);
    if ascending && !descending {
        Ok((stops, colors))
    } else if descending && !ascending {
        Ok((stops.into_iter().rev().collect(), colors.into_iter().rev().collect()))
    } else {
        Err(ColorbarScaleError::DomainNotMonotonic(
            stops.iter().map(|v| *v as f32).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use std::str::FromStr;

    const RED: Color = [1.0, 0.0, 0.0, 1.0];
    const BLUE: Color = [0.0, 0.0, 1.0, 1.0];

    #[test]
    fn test_mix_srgb_midpoint() {
        let mid = ColorSpace::Srgb.mix(&RED, &BLUE, 0.5);
        assert_approx_eq!(f32, mid[0], 0.5);
        assert_approx_eq!(f32, mid[1], 0.0);
        assert_approx_eq!(f32, mid[2], 0.5);
        assert_approx_eq!(f32, mid[3], 1.0);
    }

    #[test]
    fn test_mix_endpoints_in_every_space() {
        for space in [ColorSpace::Srgb, ColorSpace::Lab, ColorSpace::Hsl] {
            let start = space.mix(&RED, &BLUE, 0.0);
            let end = space.mix(&RED, &BLUE, 1.0);
            for c in 0..4 {
                assert_approx_eq!(f32, start[c], RED[c], epsilon = 1e-3);
                assert_approx_eq!(f32, end[c], BLUE[c], epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_color_space_from_str() {
        assert_eq!(ColorSpace::from_str("lab").unwrap(), ColorSpace::Lab);
        assert!(ColorSpace::from_str("cmyk").is_err());
    }

    #[test]
    fn test_interpolate_stops() {
        let stops = [0.0, 1.0, 3.0];
        let colors = [RED, BLUE, RED];
        let c = interpolate_stops(&stops, &colors, ColorSpace::Srgb, 2.0).unwrap();
        assert_approx_eq!(f32, c[0], 0.5);
        assert_eq!(interpolate_stops(&stops, &colors, ColorSpace::Srgb, -1.0), Some(RED));
        assert_eq!(interpolate_stops(&stops, &colors, ColorSpace::Srgb, 1.0), Some(BLUE));
        assert_eq!(interpolate_stops(&stops, &colors, ColorSpace::Srgb, f64::NAN), None);
    }

    #[test]
    fn test_ascending_stops() {
        let (stops, colors) = ascending_stops(vec![1.0, 0.0], vec![RED, BLUE]).unwrap();
        assert_eq!(stops, vec![0.0, 1.0]);
        assert_eq!(colors, vec![BLUE, RED]);
        assert!(ascending_stops(vec![0.0, 2.0, 1.0], vec![RED, BLUE, RED]).is_err());
        assert!(ascending_stops(vec![0.0], vec![RED]).is_err());
    }
}
