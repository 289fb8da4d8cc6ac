pub mod config;
pub mod detection;
pub mod input;
pub mod models;
pub mod output;
pub mod parser;

// Re-export commonly used types
pub use detection::{BruteForceDetector, DetectionError};
pub use input::{InputError, LogCollector};
pub use models::{BruteForceReport, LoginEvent, OffenderStats};
pub use output::{ReportFormat, ReportWriter, ScanSummary};
pub use parser::LineParser;
