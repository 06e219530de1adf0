// Technical indicators module
pub mod sma;

pub use sma::Sma;

// Common trait for indicators computed over a price column
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    // None where the indicator can't be calculated yet (insufficient data)
    fn calculate(&self, prices: &[f64]) -> Vec<Option<f64>>;
}
