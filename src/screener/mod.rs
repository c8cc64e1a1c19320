//! Cointegration screening: correlation filtering, the two statistical
//! tests, orchestration and result aggregation.
//!
//! The pipeline runs price series through correlation-based pair
//! selection, then confirms each candidate with two independent tests
//! (Engle-Granger regression residuals and the Johansen trace
//! statistic) before reporting it as a mean-reversion candidate.

pub mod classify;
pub mod coint;
pub mod config;
pub mod correlation;
pub mod engle_granger;
pub mod error;
pub mod johansen;
pub mod orchestrator;
pub mod report;

pub use coint::{CointData, CointegrationTest};
pub use config::ScreenerConfig;
pub use correlation::{select_pairs, CandidatePair, CorrelationMatrix};
pub use engle_granger::EngleGrangerTester;
pub use error::ScreenerError;
pub use johansen::JohansenTester;
pub use orchestrator::Orchestrator;
pub use report::SummaryTable;
