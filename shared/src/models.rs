use chrono::{DateTime, Utc};

/// One `[timestamp_ms, price]` pair as delivered by the market chart endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

/// A single row of a [`PriceSeries`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRow {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub ma_short: Option<f64>,
    pub ma_long: Option<f64>,
    /// Trend flag: 1 while the short average is above the long one.
    pub signal: u8,
    /// First difference of `signal`; absent on the first row.
    pub position: Option<i8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    Buy,
    Sell,
}

impl SeriesRow {
    pub fn crossover(&self) -> Option<Crossover> {
        match self.position {
            Some(1) => Some(Crossover::Buy),
            Some(-1) => Some(Crossover::Sell),
            _ => None,
        }
    }
}

/// Time-ordered table of prices with their moving averages and crossover columns.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub short_window: usize,
    pub long_window: usize,
    pub rows: Vec<SeriesRow>,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn buy_rows(&self) -> impl Iterator<Item = &SeriesRow> {
        self.rows.iter().filter(|r| r.crossover() == Some(Crossover::Buy))
    }

    pub fn sell_rows(&self) -> impl Iterator<Item = &SeriesRow> {
        self.rows.iter().filter(|r| r.crossover() == Some(Crossover::Sell))
    }
}

/// What the user asked for: which coins, and how many days of history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub coins: Vec<String>,
    pub days: u32,
}

/// A coin together with its processed series, ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinAnalysis {
    pub coin: String,
    pub series: PriceSeries,
}
