// Pipeline orchestration and chart output
pub mod analysis_service;
pub mod chart_output;

pub use analysis_service::{AnalysisReport, AnalysisService, SkippedCoin};
pub use chart_output::{ChartSink, SvgDirectorySink};
