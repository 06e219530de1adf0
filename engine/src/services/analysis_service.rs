// Runs the fetch -> transform -> signals pipeline for every requested coin,
// then hands the collected results to the chart renderer.
use charts::{render_pages, PageStyle};
use shared::models::{AnalysisRequest, CoinAnalysis};

use super::chart_output::ChartSink;
use crate::config::AnalyzerSettings;
use crate::data::{build_price_series, PriceSource};
use crate::error::EngineError;
use crate::input::{read_request, InputProvider};
use crate::signals::{generate_signals, SignalSummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCoin {
    pub coin: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct AnalysisReport {
    /// Successful coins, in request order.
    pub analyses: Vec<CoinAnalysis>,
    pub skipped: Vec<SkippedCoin>,
    pub pages: usize,
}

pub struct AnalysisService<S: PriceSource> {
    source: S,
    short_window: usize,
    long_window: usize,
}

impl<S: PriceSource> AnalysisService<S> {
    pub fn new(source: S, settings: &AnalyzerSettings) -> Self {
        AnalysisService {
            source,
            short_window: settings.short_window,
            long_window: settings.long_window,
        }
    }

    pub fn analyze_coin(&self, coin: &str, days: u32) -> Result<CoinAnalysis, EngineError> {
        let points = self.source.fetch_prices(coin, days)?;
        let series = build_price_series(&points, self.short_window, self.long_window)?;
        Ok(CoinAnalysis {
            coin: coin.to_string(),
            series: generate_signals(&series),
        })
    }

    /// One coin at a time; a coin that fails is logged and left out.
    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisReport {
        let mut report = AnalysisReport::default();

        for coin in &request.coins {
            tracing::info!(coin = %coin, days = request.days, "Analyzing {}...", coin);
            match self.analyze_coin(coin, request.days) {
                Ok(analysis) => {
                    let summary = SignalSummary::of(&analysis.series);
                    tracing::info!(
                        coin = %coin,
                        rows = analysis.series.len(),
                        buys = summary.buys,
                        sells = summary.sells,
                        uptrend = summary.in_uptrend,
                        "Processed price series"
                    );
                    report.analyses.push(analysis);
                }
                Err(e) => {
                    let cause = match &e {
                        EngineError::FetchError { .. } => "data fetch error",
                        _ => "data processing error",
                    };
                    tracing::warn!(coin = %coin, error = %e, "Skipping {} due to {}.", coin, cause);
                    report.skipped.push(SkippedCoin {
                        coin: coin.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        report
    }

    /// Analyzes the request and presents the chart pages in order.
    pub fn run(
        &self,
        request: &AnalysisRequest,
        style: &PageStyle,
        sink: &mut dyn ChartSink,
    ) -> Result<AnalysisReport, EngineError> {
        let mut report = self.analyze(request);
        if report.analyses.is_empty() {
            tracing::warn!("No coin could be analyzed, nothing to plot");
            return Ok(report);
        }

        for page in render_pages(&report.analyses, style) {
            sink.present(&page)?;
            report.pages += 1;
        }
        Ok(report)
    }

    /// Asks for the request, then runs it. Invalid input fails with
    /// `EngineError::InputError` before any price is fetched.
    pub fn run_interactive(
        &self,
        provider: &mut dyn InputProvider,
        default_days: u32,
        style: &PageStyle,
        sink: &mut dyn ChartSink,
    ) -> Result<AnalysisReport, EngineError> {
        let request = read_request(provider, default_days)?;
        tracing::info!(coins = ?request.coins, days = request.days, "Starting analysis");
        self.run(&request, style, sink)
    }
}
