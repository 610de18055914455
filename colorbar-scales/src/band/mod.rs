use std::fmt::Debug;
use std::hash::Hash;

use crate::error::ColorbarScaleError;
use crate::ordinal::OrdinalScale;

/// A band scale divides a continuous range into uniform bands, one per
/// element of a discrete domain.
///
/// The colorbar uses it to lay out the swatches of an ordinal color scale,
/// and the axis uses it to position category labels at band centers.
#[derive(Debug, Clone)]
pub struct BandScale<D: Debug + Clone + Hash + Eq> {
    ordinal_scale: OrdinalScale<D, f32>,
    range: (f32, f32),
    padding_inner: f32,
    padding_outer: f32,
    align: f32,
}

impl<D: Debug + Clone + Hash + Eq> BandScale<D> {
    /// Creates a new band scale with the given domain.
    ///
    /// # Defaults
    /// - range: (0.0, 1.0)
    /// - padding_inner: 0.0
    /// - padding_outer: 0.0
    /// - align: 0.5
    pub fn try_new(domain: Vec<D>) -> Result<Self, ColorbarScaleError> {
        if domain.is_empty() {
            return Err(ColorbarScaleError::EmptyDomain);
        }
        let placeholder = vec![f32::NAN; domain.len()];
        let mut this = Self {
            ordinal_scale: OrdinalScale::new_cycled(&domain, &placeholder, f32::NAN)?,
            range: (0.0, 1.0),
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        };
        this.update_positions()?;
        Ok(this)
    }

    fn sorted_range(&self) -> (f32, f32) {
        if self.range.1 < self.range.0 {
            (self.range.1, self.range.0)
        } else {
            (self.range.0, self.range.1)
        }
    }

    fn is_reversed(&self) -> bool {
        self.range.1 < self.range.0
    }

    /// Position of the first band in ascending pixel order
    fn first_start(&self) -> f32 {
        let n = self.ordinal_scale.len() as f32;
        let (start, stop) = self.sorted_range();
        let step = self.step();
        start + (stop - start - step * (n - self.padding_inner)) * self.align
    }

    fn update_positions(&mut self) -> Result<(), ColorbarScaleError> {
        let n = self.ordinal_scale.len();
        let first = self.first_start();
        let step = self.step();

        let mut positions: Vec<f32> = (0..n).map(|i| first + step * i as f32).collect();
        if self.is_reversed() {
            positions.reverse();
        }

        self.ordinal_scale = OrdinalScale::new(&self.ordinal_scale.domain(), &positions, f32::NAN)?;
        Ok(())
    }

    /// Sets the output range. The range may be reversed.
    pub fn range(mut self, range: (f32, f32)) -> Result<Self, ColorbarScaleError> {
        self.range = range;
        self.update_positions()?;
        Ok(self)
    }

    /// Sets the fraction of each step reserved for blank space between bands, clamped to [0, 1]
    pub fn padding_inner(mut self, padding: f32) -> Result<Self, ColorbarScaleError> {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.update_positions()?;
        Ok(self)
    }

    /// Sets the blank space before the first and after the last band, in steps
    pub fn padding_outer(mut self, padding: f32) -> Result<Self, ColorbarScaleError> {
        self.padding_outer = padding.max(0.0);
        self.update_positions()?;
        Ok(self)
    }

    /// Distributes leftover space: 0.0 aligns bands to the start, 1.0 to the end
    pub fn align(mut self, align: f32) -> Result<Self, ColorbarScaleError> {
        self.align = align.clamp(0.0, 1.0);
        self.update_positions()?;
        Ok(self)
    }

    pub fn domain(&self) -> Vec<D> {
        self.ordinal_scale.domain()
    }

    pub fn get_range(&self) -> (f32, f32) {
        self.range
    }

    /// Distance between the starts of adjacent bands
    pub fn step(&self) -> f32 {
        let n = self.ordinal_scale.len();
        if n == 0 {
            return 0.0;
        }
        let (start, stop) = self.sorted_range();
        (stop - start) / 1.0_f32.max(bandspace(n, Some(self.padding_inner), Some(self.padding_outer)))
    }

    pub fn bandwidth(&self) -> f32 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Start of the band for `value`, offset by `band` bandwidths (0.5 for the center).
    /// Returns None for values outside the domain.
    pub fn scale(&self, value: &D, band: f32) -> Option<f32> {
        let start = self.ordinal_scale.scale(value);
        if start.is_nan() {
            None
        } else {
            Some(start + self.bandwidth() * band)
        }
    }

    /// Returns the band containing `value`, or the nearest band when `value`
    /// falls in padding or outside the range
    pub fn invert(&self, value: f32) -> Option<D> {
        let n = self.ordinal_scale.len();
        let step = self.step();
        if n == 0 || value.is_nan() {
            return None;
        }

        let center = self.first_start() + self.bandwidth() / 2.0;
        let index = if step > 0.0 {
            ((value - center) / step).round().clamp(0.0, (n - 1) as f32) as usize
        } else {
            0
        };
        let index = if self.is_reversed() { n - 1 - index } else { index };

        self.domain().get(index).cloned()
    }
}

/// Number of steps a band scale's range spans for `count` bands and the given paddings
pub fn bandspace(count: usize, padding_inner: Option<f32>, padding_outer: Option<f32>) -> f32 {
    let padding_inner = padding_inner.unwrap_or(0.0).clamp(0.0, 1.0);
    let padding_outer = padding_outer.unwrap_or(0.0).max(0.0);

    count as f32 - padding_inner + padding_outer * 2.0
}
