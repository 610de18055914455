pub mod linear;

/// A scale with a continuous domain of type `D` and a continuous numeric range
pub trait ContinuousNumericScale<D>: Clone {
    fn domain(&self) -> (D, D);

    fn range(&self) -> (f32, f32);

    fn clamp(&self) -> bool;

    /// Maps a domain value to the range
    fn scale(&self, value: &D) -> f32;

    /// Maps a range value back to the domain
    fn invert(&self, value: f32) -> D;

    /// Nicely rounded domain values spanning the domain
    fn ticks(&self, count: Option<f32>) -> Vec<D>;

    fn scale_values(&self, values: &[D]) -> Vec<f32> {
        values.iter().map(|v| self.scale(v)).collect()
    }
}
