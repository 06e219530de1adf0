// Simple Moving Average (SMA) indicator implementation
use super::IndicatorCalculator;
use crate::error::EngineError;

#[derive(Debug, Clone)]
pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Result<Self, EngineError> {
        if period == 0 {
            return Err(EngineError::IndicatorError("SMA period must be greater than 0".to_string()));
        }
        Ok(Self {
            name: format!("SMA({})", period),
            period,
        })
    }
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    /// Trailing mean over the last `period` values, inclusive of the current one.
    fn calculate(&self, prices: &[f64]) -> Vec<Option<f64>> {
        if prices.len() < self.period {
            return vec![None; prices.len()];
        }

        let mut results = vec![None; self.period - 1]; // No SMA for initial period

        // Calculate sum for the first window
        let mut sum: f64 = prices.iter().take(self.period).sum();
        results.push(Some(sum / self.period as f64));

        // Slide the window
        for i in self.period..prices.len() {
            sum = sum - prices[i - self.period] + prices[i];
            results.push(Some(sum / self.period as f64));
        }
        results
    }
}
