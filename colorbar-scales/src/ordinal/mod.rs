use std::fmt::Debug;
use std::hash::Hash;

use crate::error::ColorbarScaleError;
use indexmap::IndexMap;

/// A discrete scale that maps input values to a fixed set of output values.
/// Inputs not found in the domain map to the default value.
#[derive(Debug, Clone)]
pub struct OrdinalScale<D, R>
where
    D: Clone + Hash + Eq + Debug,
    R: Clone + Debug,
{
    mapping: IndexMap<D, R>,
    default_value: R,
}

impl<D, R> OrdinalScale<D, R>
where
    D: Clone + Hash + Eq + Debug,
    R: Clone + Debug,
{
    /// Creates a scale where domain and range have equal length
    pub fn new(domain: &[D], range: &[R], default_value: R) -> Result<Self, ColorbarScaleError> {
        if domain.len() != range.len() {
            return Err(ColorbarScaleError::DomainRangeMismatch {
                domain_len: domain.len(),
                range_len: range.len(),
            });
        }
        Self::new_cycled(domain, range, default_value)
    }

    /// Creates a scale that reuses range values from the start when the range
    /// is shorter than the domain. Duplicate domain values keep their first position.
    pub fn new_cycled(
        domain: &[D],
        range: &[R],
        default_value: R,
    ) -> Result<Self, ColorbarScaleError> {
        if range.is_empty() && !domain.is_empty() {
            return Err(ColorbarScaleError::EmptyRange);
        }

        let mut mapping = IndexMap::with_capacity(domain.len());
        for d in domain {
            if !mapping.contains_key(d) {
                let r = range[mapping.len() % range.len()].clone();
                mapping.insert(d.clone(), r);
            }
        }

        Ok(Self {
            mapping,
            default_value,
        })
    }

    pub fn default_value(&self) -> &R {
        &self.default_value
    }

    /// Returns the current domain in insertion order
    pub fn domain(&self) -> Vec<D> {
        self.mapping.keys().cloned().collect()
    }

    pub fn range(&self) -> Vec<R> {
        self.mapping.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    pub fn index_of(&self, value: &D) -> Option<usize> {
        self.mapping.get_index_of(value)
    }

    pub fn scale(&self, value: &D) -> R {
        self.mapping
            .get(value)
            .unwrap_or(&self.default_value)
            .clone()
    }

    pub fn scale_values(&self, values: &[D]) -> Vec<R> {
        values.iter().map(|v| self.scale(v)).collect()
    }
}
