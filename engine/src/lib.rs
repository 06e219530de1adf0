// Engine library root: the fetch -> transform -> signals -> charts pipeline.

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod input;
pub mod services;
pub mod signals;

pub use error::{EngineError, FetchError, InputError};
