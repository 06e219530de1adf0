// Full 2x2 page: title plus up to four panels.
use shared::models::CoinAnalysis;

use crate::layout::{paginate, panel_rect, Page, TITLE_BAND};
use crate::panel::render_panel;
use crate::svg::{Anchor, SvgDocument};
use crate::theme::ChartPalette;

pub const PAGE_TITLE: &str = "Crypto Market Analysis with Moving Averages";

/// Smallest page edge that still leaves every panel a plot area inside its margins.
pub const MIN_PAGE_SIZE: u32 = 400;

#[derive(Debug, Clone, PartialEq)]
pub struct PageStyle {
    pub width: u32,
    pub height: u32,
    pub palette: ChartPalette,
    /// Quote currency shown on the y axis, e.g. "USD".
    pub currency: String,
}

impl Default for PageStyle {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 1000,
            palette: ChartPalette::default(),
            currency: "USD".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub number: usize,
    pub coins: Vec<String>,
    pub blank_slots: usize,
    pub svg: String,
}

pub fn render_page(page: &Page<'_>, style: &PageStyle) -> RenderedPage {
    let width = style.width as f64;
    let height = style.height as f64;
    let y_label = format!("Price ({})", style.currency);

    let mut doc = SvgDocument::new(style.width, style.height);
    doc.rect(0.0, 0.0, width, height, &style.palette.background, None);
    doc.text(width / 2.0, TITLE_BAND * 0.6, PAGE_TITLE, 20.0, Anchor::Middle, &style.palette.foreground);

    for (slot, analysis) in page.slots.iter().enumerate() {
        // Blank slots on the last page stay empty.
        if let Some(analysis) = analysis {
            render_panel(&mut doc, panel_rect(slot, width, height), analysis, &style.palette, &y_label);
        }
    }

    tracing::debug!(page = page.number, panels = page.populated(), "Rendered chart page");
    RenderedPage {
        number: page.number,
        coins: page.coins().into_iter().map(str::to_string).collect(),
        blank_slots: page.blank(),
        svg: doc.finish(),
    }
}

pub fn render_pages(analyses: &[CoinAnalysis], style: &PageStyle) -> Vec<RenderedPage> {
    paginate(analyses).iter().map(|page| render_page(page, style)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::models::{PriceSeries, SeriesRow};

    fn analysis(coin: &str) -> CoinAnalysis {
        let rows = (0..3)
            .map(|i| SeriesRow {
                timestamp: Utc.timestamp_opt(1_700_000_000 + i * 86_400, 0).unwrap(),
                price: 100.0 + i as f64,
                ma_short: None,
                ma_long: None,
                signal: 0,
                position: if i == 0 { None } else { Some(0) },
            })
            .collect();
        CoinAnalysis {
            coin: coin.to_string(),
            series: PriceSeries { short_window: 50, long_window: 200, rows },
        }
    }

    #[test]
    fn test_render_pages_with_partial_last_page() {
        let items: Vec<CoinAnalysis> = ["bitcoin", "ethereum", "litecoin", "cardano", "solana"]
            .iter()
            .map(|c| analysis(c))
            .collect();
        let pages = render_pages(&items, &PageStyle::default());

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].coins, vec!["bitcoin", "ethereum", "litecoin", "cardano"]);
        assert_eq!(pages[0].svg.matches(r#"<g class="panel">"#).count(), 4);
        assert_eq!(pages[1].coins, vec!["solana"]);
        assert_eq!(pages[1].blank_slots, 3);
        assert_eq!(pages[1].svg.matches(r#"<g class="panel">"#).count(), 1);
        assert!(pages[1].svg.contains(">Solana</text>"));
    }

    #[test]
    fn test_page_has_title_and_size() {
        let items = vec![analysis("bitcoin")];
        let style = PageStyle { width: 800, height: 600, currency: "EUR".to_string(), ..PageStyle::default() };
        let page = &render_pages(&items, &style)[0];
        assert!(page.svg.contains(PAGE_TITLE));
        assert!(page.svg.contains(r#"width="800" height="600""#));
        assert!(page.svg.contains(">Price (EUR)</text>"));
    }

    #[test]
    fn test_coin_names_are_escaped() {
        let items = vec![analysis("<script>")];
        let page = &render_pages(&items, &PageStyle::default())[0];
        assert!(!page.svg.contains("<script>"));
        assert!(page.svg.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_smallest_page_keeps_positive_plot_areas() {
        let items: Vec<CoinAnalysis> = ["bitcoin", "ethereum", "litecoin", "cardano"].iter().map(|c| analysis(c)).collect();
        let style = PageStyle { width: MIN_PAGE_SIZE, height: MIN_PAGE_SIZE, ..PageStyle::default() };
        let page = &render_pages(&items, &style)[0];
        assert!(!page.svg.contains(r#"width="-"#));
        assert!(!page.svg.contains(r#"height="-"#));
        assert!(!page.svg.contains(r#"height="0.00""#));
    }

    #[test]
    fn test_no_analyses_no_pages() {
        assert!(render_pages(&[], &PageStyle::default()).is_empty());
    }
}
