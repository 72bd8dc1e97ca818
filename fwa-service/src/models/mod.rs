//! Request and response bodies for the FWA service.

pub mod analysis;
pub mod item;

pub use analysis::{AnalysisRequest, AnalysisResult, AnalysisStatus};
pub use item::{ItemQuery, ItemResponse};
