pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod pipeline;

pub use error::ExtractError;
pub use pipeline::{run, run_envelope, ExportReport, Outcome};
