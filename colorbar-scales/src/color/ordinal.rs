use colorbar_common::domain::DomainValue;
use colorbar_common::types::Color;

use super::ColorScale;
use crate::error::ColorbarScaleError;
use crate::ordinal::OrdinalScale;

/// Maps discrete domain values to colors. Values are matched by their
/// display string, so numeric categories work the same as text ones.
#[derive(Debug, Clone)]
pub struct OrdinalColorScale {
    domain: Vec<DomainValue>,
    scale: OrdinalScale<String, Option<Color>>,
}

impl OrdinalColorScale {
    /// The range is reused from the start when it is shorter than the domain
    pub fn try_new(domain: Vec<DomainValue>, range: Vec<Color>) -> Result<Self, ColorbarScaleError> {
        if domain.is_empty() {
            return Err(ColorbarScaleError::EmptyDomain);
        }

        let keys: Vec<String> = domain.iter().map(|v| v.to_string()).collect();
        let range: Vec<Option<Color>> = range.into_iter().map(Some).collect();
        let scale = OrdinalScale::new_cycled(&keys, &range, None)?;

        // drop duplicates, keeping first occurrence like the scale does
        let mut seen = std::collections::HashSet::new();
        let domain = domain
            .into_iter()
            .filter(|v| seen.insert(v.to_string()))
            .collect();

        Ok(Self { domain, scale })
    }

    /// Color for values outside the domain. Without one they map to None.
    pub fn with_unknown(mut self, unknown: Option<Color>) -> Result<Self, ColorbarScaleError> {
        self.scale = OrdinalScale::new(&self.scale.domain(), &self.scale.range(), unknown)?;
        Ok(self)
    }

    pub fn unknown(&self) -> Option<Color> {
        *self.scale.default_value()
    }
}

impl ColorScale for OrdinalColorScale {
    fn domain(&self) -> Vec<DomainValue> {
        self.domain.clone()
    }

    fn color(&self, value: &DomainValue) -> Option<Color> {
        self.scale.scale(&value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = [1.0, 0.0, 0.0, 1.0];
    const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
    const GRAY: Color = [0.5, 0.5, 0.5, 1.0];

    #[test]
    fn test_ordinal_color_scale() -> Result<(), ColorbarScaleError> {
        let domain = vec!["a".into(), "b".into(), "c".into(), "a".into()];
        let scale = OrdinalColorScale::try_new(domain, vec![RED, GREEN])?;

        assert_eq!(scale.domain().len(), 3);
        assert_eq!(scale.color(&"a".into()), Some(RED));
        assert_eq!(scale.color(&"b".into()), Some(GREEN));
        assert_eq!(scale.color(&"c".into()), Some(RED));
        assert_eq!(scale.color(&"z".into()), None);
        assert!(scale.ticks(None).is_none());
        assert!(!scale.interpolates());
        Ok(())
    }

    #[test]
    fn test_unknown_color() -> Result<(), ColorbarScaleError> {
        let domain = vec![DomainValue::Number(1.0), DomainValue::Number(2.0)];
        let scale = OrdinalColorScale::try_new(domain, vec![RED, GREEN])?.with_unknown(Some(GRAY))?;
        assert_eq!(scale.color(&DomainValue::Number(2.0)), Some(GREEN));
        assert_eq!(scale.color(&DomainValue::Number(3.0)), Some(GRAY));
        assert_eq!(scale.unknown(), Some(GRAY));
        Ok(())
    }

    #[test]
    fn test_empty_domain() {
        assert!(matches!(
            OrdinalColorScale::try_new(vec![], vec![RED]),
            Err(ColorbarScaleError::EmptyDomain)
        ));
    }
}
