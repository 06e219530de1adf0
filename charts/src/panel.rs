// One chart panel: price, both moving averages, crossover markers, labels and legend.
use chrono::{DateTime, Utc};
use shared::models::{CoinAnalysis, PriceSeries, SeriesRow};
use shared::utils::{capitalize, format_price};

use crate::layout::Rect;
use crate::svg::{Anchor, SvgDocument};
use crate::theme::ChartPalette;

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 55.0;
const Y_TICKS: usize = 5;
const X_TICKS: usize = 4;
const MARKER_SIZE: f64 = 7.0;
const DAY_MS: f64 = 86_400_000.0;

/// Maps timestamps and prices into a plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotScale {
    pub area: Rect,
    pub t_min: f64,
    pub t_max: f64,
    pub v_min: f64,
    pub v_max: f64,
}

impl PlotScale {
    /// Fits every price and defined average of `series`. `None` for an empty series.
    pub fn fit(series: &PriceSeries, area: Rect) -> Option<Self> {
        let first = series.rows.first()?;
        let mut t_min = first.timestamp.timestamp_millis() as f64;
        let mut t_max = t_min;
        let mut v_min = f64::INFINITY;
        let mut v_max = f64::NEG_INFINITY;

        for row in &series.rows {
            let t = row.timestamp.timestamp_millis() as f64;
            t_min = t_min.min(t);
            t_max = t_max.max(t);
            for v in [Some(row.price), row.ma_short, row.ma_long].into_iter().flatten() {
                v_min = v_min.min(v);
                v_max = v_max.max(v);
            }
        }

        if t_max <= t_min {
            t_min -= DAY_MS;
            t_max += DAY_MS;
        }
        let span = v_max - v_min;
        let pad = if span > 0.0 { span * 0.05 } else { (v_max.abs() * 0.05).max(1.0) };

        Some(Self {
            area,
            t_min,
            t_max,
            v_min: v_min - pad,
            v_max: v_max + pad,
        })
    }

    pub fn x(&self, ts: DateTime<Utc>) -> f64 {
        self.x_millis(ts.timestamp_millis() as f64)
    }

    fn x_millis(&self, t: f64) -> f64 {
        self.area.x + (t - self.t_min) / (self.t_max - self.t_min) * self.area.width
    }

    pub fn y(&self, value: f64) -> f64 {
        self.area.bottom() - (value - self.v_min) / (self.v_max - self.v_min) * self.area.height
    }
}

/// Draws `analysis` into `rect` of `doc`.
pub fn render_panel(doc: &mut SvgDocument, rect: Rect, analysis: &CoinAnalysis, palette: &ChartPalette, y_label: &str) {
    let series = &analysis.series;
    let area = Rect {
        x: rect.x + MARGIN_LEFT,
        y: rect.y + MARGIN_TOP,
        width: (rect.width - MARGIN_LEFT - MARGIN_RIGHT).max(0.0),
        height: (rect.height - MARGIN_TOP - MARGIN_BOTTOM).max(0.0),
    };

    doc.open_group("panel");
    doc.text(area.x + area.width / 2.0, rect.y + 26.0, &capitalize(&analysis.coin), 16.0, Anchor::Middle, &palette.foreground);
    doc.rect(area.x, area.y, area.width, area.height, &palette.background, Some(palette.frame.as_str()));

    match PlotScale::fit(series, area) {
        Some(scale) => {
            draw_ticks(doc, &scale, palette);
            doc.polyline(&line_points(&scale, &series.rows, |r| Some(r.price)), &palette.price, 1.5);
            for segment in segments(&scale, &series.rows, |r| r.ma_short) {
                doc.polyline(&segment, &palette.ma_short, 1.5);
            }
            for segment in segments(&scale, &series.rows, |r| r.ma_long) {
                doc.polyline(&segment, &palette.ma_long, 1.5);
            }
            draw_markers(doc, &scale, series, palette);
        }
        None => {
            doc.text(area.x + area.width / 2.0, area.y + area.height / 2.0, "No data", 14.0, Anchor::Middle, &palette.foreground);
        }
    }

    doc.text(area.x + area.width / 2.0, area.bottom() + 45.0, "Date", 13.0, Anchor::Middle, &palette.foreground);
    doc.vertical_text(rect.x + 18.0, area.y + area.height / 2.0, y_label, 13.0, &palette.foreground);
    draw_legend(doc, area, series, palette);
    doc.close_group();
}

fn line_points(scale: &PlotScale, rows: &[SeriesRow], value: impl Fn(&SeriesRow) -> Option<f64>) -> Vec<(f64, f64)> {
    rows.iter()
        .filter_map(|r| value(r).map(|v| (scale.x(r.timestamp), scale.y(v))))
        .collect()
}

/// Contiguous runs of defined values; an absent value breaks the line.
fn segments(scale: &PlotScale, rows: &[SeriesRow], value: impl Fn(&SeriesRow) -> Option<f64>) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for row in rows {
        match value(row) {
            Some(v) => current.push((scale.x(row.timestamp), scale.y(v))),
            None if !current.is_empty() => out.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn draw_ticks(doc: &mut SvgDocument, scale: &PlotScale, palette: &ChartPalette) {
    let area = scale.area;
    for k in 0..=Y_TICKS {
        let v = scale.v_min + k as f64 * (scale.v_max - scale.v_min) / Y_TICKS as f64;
        let y = scale.y(v);
        doc.line(area.x, y, area.right(), y, &palette.grid, 0.5);
        doc.text(area.x - 6.0, y + 4.0, &format_price(v), 11.0, Anchor::End, &palette.foreground);
    }
    for k in 0..=X_TICKS {
        let t = scale.t_min + k as f64 * (scale.t_max - scale.t_min) / X_TICKS as f64;
        let x = scale.x_millis(t);
        doc.line(x, area.bottom(), x, area.bottom() + 5.0, &palette.frame, 1.0);
        if let Some(date) = DateTime::from_timestamp_millis(t as i64) {
            doc.text(x, area.bottom() + 20.0, &date.format("%Y-%m-%d").to_string(), 11.0, Anchor::Middle, &palette.foreground);
        }
    }
}

// Markers sit on the short average, like the crossover they mark.
fn draw_markers(doc: &mut SvgDocument, scale: &PlotScale, series: &PriceSeries, palette: &ChartPalette) {
    for row in series.buy_rows() {
        if let Some(v) = row.ma_short {
            doc.polygon(&triangle_up(scale.x(row.timestamp), scale.y(v)), &palette.buy, "buy-marker");
        }
    }
    for row in series.sell_rows() {
        if let Some(v) = row.ma_short {
            doc.polygon(&triangle_down(scale.x(row.timestamp), scale.y(v)), &palette.sell, "sell-marker");
        }
    }
}

fn triangle_up(x: f64, y: f64) -> [(f64, f64); 3] {
    let s = MARKER_SIZE;
    [(x, y - s), (x - s, y + s * 0.8), (x + s, y + s * 0.8)]
}

fn triangle_down(x: f64, y: f64) -> [(f64, f64); 3] {
    let s = MARKER_SIZE;
    [(x, y + s), (x - s, y - s * 0.8), (x + s, y - s * 0.8)]
}

fn draw_legend(doc: &mut SvgDocument, area: Rect, series: &PriceSeries, palette: &ChartPalette) {
    let entries = [
        ("Price".to_string(), palette.price.as_str()),
        (format!("{}-day MA", series.short_window), palette.ma_short.as_str()),
        (format!("{}-day MA", series.long_window), palette.ma_long.as_str()),
    ];
    let x = area.x + 10.0;
    let y = area.y + 10.0;
    let row_height = 16.0;

    doc.open_group("legend");
    doc.rect(x, y, 130.0, row_height * 5.0 + 8.0, &palette.background, Some(palette.grid.as_str()));
    let mut row_y = y + 4.0 + row_height / 2.0;
    for (label, color) in &entries {
        doc.line(x + 6.0, row_y, x + 26.0, row_y, color, 2.0);
        doc.text(x + 32.0, row_y + 4.0, label, 11.0, Anchor::Start, &palette.foreground);
        row_y += row_height;
    }
    doc.polygon(&scaled(triangle_up(x + 16.0, row_y)), &palette.buy, "legend-marker");
    doc.text(x + 32.0, row_y + 4.0, "Buy Signal", 11.0, Anchor::Start, &palette.foreground);
    row_y += row_height;
    doc.polygon(&scaled(triangle_down(x + 16.0, row_y)), &palette.sell, "legend-marker");
    doc.text(x + 32.0, row_y + 4.0, "Sell Signal", 11.0, Anchor::Start, &palette.foreground);
    doc.close_group();
}

// Legend samples are drawn a bit smaller than the plot markers.
fn scaled(points: [(f64, f64); 3]) -> [(f64, f64); 3] {
    let (cx, cy) = points[0];
    let (_, base_y) = points[1];
    let mid = (cy + base_y) / 2.0;
    points.map(|(x, y)| (cx + (x - cx) * 0.7, mid + (y - mid) * 0.7))
}
