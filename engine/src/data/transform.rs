// Turns raw price points into a time-indexed series with two trailing SMAs.
use chrono::{DateTime, Utc};
use shared::models::{PricePoint, PriceSeries, SeriesRow};

use crate::error::EngineError;
use crate::indicators::{IndicatorCalculator, Sma};

pub fn from_millis_timestamp(ts_millis: i64) -> Result<DateTime<Utc>, EngineError> {
    DateTime::from_timestamp_millis(ts_millis)
        .ok_or_else(|| EngineError::ProcessingError(format!("Invalid timestamp: {}", ts_millis)))
}

/// Builds the price table. Rows keep the input order; `signal` starts at 0 and
/// `position` empty until [`crate::signals::generate_signals`] fills them in.
pub fn build_price_series(
    points: &[PricePoint],
    short_window: usize,
    long_window: usize,
) -> Result<PriceSeries, EngineError> {
    let short = Sma::new(short_window)?;
    let long = Sma::new(long_window)?;

    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
    let ma_short = short.calculate(&prices);
    let ma_long = long.calculate(&prices);
    tracing::debug!(rows = points.len(), short = short.name(), long = long.name(), "Computed moving averages");

    let rows = points
        .iter()
        .zip(ma_short.into_iter().zip(ma_long))
        .map(|(point, (ma_short, ma_long))| {
            Ok(SeriesRow {
                timestamp: from_millis_timestamp(point.timestamp_ms)?,
                price: point.price,
                ma_short,
                ma_long,
                signal: 0,
                position: None,
            })
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    Ok(PriceSeries {
        short_window,
        long_window,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 86_400_000;

    fn points(prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint { timestamp_ms: 1_600_000_000_000 + i as i64 * DAY_MS, price })
            .collect()
    }

    #[test]
    fn test_build_price_series_windows() {
        let series = build_price_series(&points(&[1.0, 2.0, 3.0, 4.0, 5.0]), 2, 4).unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(series.rows[0].ma_short, None);
        assert_eq!(series.rows[1].ma_short, Some(1.5));
        assert_eq!(series.rows[2].ma_long, None);
        assert_eq!(series.rows[3].ma_long, Some(2.5));
        assert_eq!(series.rows[4].ma_long, Some(3.5));
        assert!(series.rows.iter().all(|r| r.signal == 0 && r.position.is_none()));
    }

    #[test]
    fn test_timestamps_converted_from_millis() {
        let series = build_price_series(&points(&[10.0, 11.0]), 1, 2).unwrap();
        assert_eq!(series.rows[0].timestamp.timestamp_millis(), 1_600_000_000_000);
        assert_eq!(series.rows[1].timestamp.timestamp_millis(), 1_600_000_000_000 + DAY_MS);
    }

    #[test]
    fn test_default_windows_undefined_during_warm_up() {
        let prices: Vec<f64> = (0..250).map(|i| i as f64).collect();
        let series = build_price_series(&points(&prices), 50, 200).unwrap();
        assert!(series.rows[..49].iter().all(|r| r.ma_short.is_none()));
        assert!(series.rows[49..].iter().all(|r| r.ma_short.is_some()));
        assert!(series.rows[..199].iter().all(|r| r.ma_long.is_none()));
        assert!(series.rows[199..].iter().all(|r| r.ma_long.is_some()));
        // mean of 0..=49
        assert!((series.rows[49].ma_short.unwrap() - 24.5).abs() < 1e-9);
    }

    #[test]
    fn test_input_not_mutated_and_order_kept() {
        let input = vec![
            PricePoint { timestamp_ms: 3 * DAY_MS, price: 3.0 },
            PricePoint { timestamp_ms: DAY_MS, price: 1.0 },
        ];
        let copy = input.clone();
        let series = build_price_series(&input, 1, 2).unwrap();
        assert_eq!(input, copy);
        assert_eq!(series.rows[0].price, 3.0);
    }

    #[test]
    fn test_out_of_range_timestamp_is_error() {
        let input = vec![PricePoint { timestamp_ms: i64::MAX, price: 1.0 }];
        let err = build_price_series(&input, 1, 2).unwrap_err();
        assert!(matches!(err, EngineError::ProcessingError(_)));
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(build_price_series(&points(&[1.0]), 0, 2).is_err());
    }
}
