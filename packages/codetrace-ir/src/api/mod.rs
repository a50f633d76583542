//! Analyzer boundary
//!
//! `{code, language}` in, exactly one `AnalysisResult` out. Errors never
//! cross this boundary; they become the canonical empty result.

pub mod dispatcher;
pub mod worker;

pub use dispatcher::{analyze, AnalysisRequest, Dispatcher};
pub use worker::{AnalysisWorker, PendingAnalysis};
