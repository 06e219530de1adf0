// Moving-average crossover signals
pub mod crossover;

pub use crossover::{generate_signals, SignalSummary};
