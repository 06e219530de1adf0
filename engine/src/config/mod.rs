// Analyzer configuration
pub mod settings;

pub use settings::{AnalyzerSettings, ChartSettings, DEFAULT_API_URL};
