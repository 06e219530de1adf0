use shared::models::{PriceSeries, SeriesRow};

/// Fills `signal` and `position` for every row and returns a new series.
///
/// `signal` is 0 for the first `short_window` rows, then 1 while the short
/// average is above the long one. Rows where either average is absent get 0.
/// `position` is the first difference of `signal`; the first row has none.
pub fn generate_signals(series: &PriceSeries) -> PriceSeries {
    let warm_up = series.short_window;
    let signals: Vec<u8> = series
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| if i < warm_up { 0 } else { trend_state(row) })
        .collect();

    let rows = series
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| SeriesRow {
            signal: signals[i],
            position: if i == 0 { None } else { Some(signals[i] as i8 - signals[i - 1] as i8) },
            ..row.clone()
        })
        .collect();

    PriceSeries {
        short_window: series.short_window,
        long_window: series.long_window,
        rows,
    }
}

fn trend_state(row: &SeriesRow) -> u8 {
    match (row.ma_short, row.ma_long) {
        (Some(short), Some(long)) if short > long => 1,
        _ => 0,
    }
}

/// Per-coin counts printed after a series has been processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalSummary {
    pub buys: usize,
    pub sells: usize,
    pub in_uptrend: bool,
}

impl SignalSummary {
    pub fn of(series: &PriceSeries) -> Self {
        SignalSummary {
            buys: series.buy_rows().count(),
            sells: series.sell_rows().count(),
            in_uptrend: series.rows.last().map_or(false, |r| r.signal == 1),
        }
    }
}
