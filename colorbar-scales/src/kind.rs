use colorbar_common::domain::DomainValue;
use log::debug;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::color::ColorScale;
use crate::error::ColorbarScaleError;

/// How a color scale is presented: discrete swatches or a continuous gradient
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScaleKind {
    Ordinal,
    Linear,
    Time,
}

impl ScaleKind {
    /// Infers the kind of `scale` from its behavior.
    ///
    /// Scales that cannot produce ticks or do not interpolate are ordinal.
    /// Otherwise the first domain value decides.
    pub fn infer(scale: &dyn ColorScale) -> Result<ScaleKind, ColorbarScaleError> {
        let domain = scale.domain();
        let first = domain.first().ok_or(ColorbarScaleError::EmptyDomain)?;

        let kind = if scale.ticks(Some(2.0)).is_none() || !scale.interpolates() {
            ScaleKind::Ordinal
        } else {
            match first {
                DomainValue::Timestamp(_) => ScaleKind::Time,
                DomainValue::Number(_) => ScaleKind::Linear,
                DomainValue::Category(_) => ScaleKind::Ordinal,
            }
        };
        debug!("Inferred {kind} scale from domain of {} values", domain.len());
        Ok(kind)
    }

    pub fn is_continuous(&self) -> bool {
        !matches!(self, ScaleKind::Ordinal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::linear::LinearColorScale;
    use crate::color::ordinal::OrdinalColorScale;
    use crate::color::time::TimeColorScale;
    use chrono::NaiveDate;
    use colorbar_common::types::Color;
    use rstest::rstest;

    const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
    const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

    /// A scale that offers ticks and interpolation over categories
    #[derive(Debug)]
    struct LabelledScale;

    impl ColorScale for LabelledScale {
        fn domain(&self) -> Vec<DomainValue> {
            vec!["low".into(), "high".into()]
        }

        fn color(&self, _value: &DomainValue) -> Option<Color> {
            Some(BLACK)
        }

        fn ticks(&self, _count: Option<f32>) -> Option<Vec<DomainValue>> {
            Some(self.domain())
        }

        fn interpolates(&self) -> bool {
            true
        }
    }

    #[derive(Debug)]
    struct EmptyScale;

    impl ColorScale for EmptyScale {
        fn domain(&self) -> Vec<DomainValue> {
            vec![]
        }

        fn color(&self, _value: &DomainValue) -> Option<Color> {
            None
        }
    }

    #[test]
    fn test_infer_concrete_scales() {
        let ordinal =
            OrdinalColorScale::try_new(vec![DomainValue::Number(1.0)], vec![BLACK]).unwrap();
        assert_eq!(ScaleKind::infer(&ordinal).unwrap(), ScaleKind::Ordinal);

        let linear = LinearColorScale::try_new(vec![0.0, 1.0], vec![BLACK, WHITE]).unwrap();
        assert_eq!(ScaleKind::infer(&linear).unwrap(), ScaleKind::Linear);

        let d0 = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let d1 = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let time = TimeColorScale::try_new(vec![d0, d1], vec![BLACK, WHITE]).unwrap();
        assert_eq!(ScaleKind::infer(&time).unwrap(), ScaleKind::Time);
    }

    #[test]
    fn test_infer_category_domain() {
        assert_eq!(ScaleKind::infer(&LabelledScale).unwrap(), ScaleKind::Ordinal);
    }

    #[test]
    fn test_infer_empty() {
        assert!(matches!(
            ScaleKind::infer(&EmptyScale),
            Err(ColorbarScaleError::EmptyDomain)
        ));
    }

    #[rstest]
    #[case("ordinal", ScaleKind::Ordinal)]
    #[case("linear", ScaleKind::Linear)]
    #[case("time", ScaleKind::Time)]
    fn test_parse(#[case] name: &str, #[case] expected: ScaleKind) {
        assert_eq!(name.parse::<ScaleKind>().unwrap(), expected);
        assert_eq!(expected.to_string(), name);
    }
}
