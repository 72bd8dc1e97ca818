pub mod analyzer;
pub mod metrics;
pub mod prompt;
pub mod providers;

pub use analyzer::FraudAnalyzer;
