use crate::models::BruteForceReport;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from report rendering and writing
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Everything one scan produces, ready for rendering.
#[derive(Debug, Serialize)]
pub struct ScanSummary {
    /// File that was scanned
    pub file: PathBuf,
    /// Raw text lines read from the file
    pub lines_read: usize,
    /// Lines that parsed into events
    pub events_parsed: usize,
    /// Detection result over the parsed events
    pub report: BruteForceReport,
}

/// Output handler for scan reports
pub struct ReportWriter {
    format: ReportFormat,
    writer: Option<Box<dyn Write + Send>>,
}

#[derive(Debug, Clone)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => ReportFormat::Json,
            _ => ReportFormat::Text, // Default
        }
    }
}

impl ReportWriter {
    /// Create a new report writer; writes to stdout when no path is given.
    pub fn new(format: ReportFormat, file_path: Option<PathBuf>) -> Result<Self, OutputError> {
        let writer: Option<Box<dyn Write + Send>> = match file_path {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Some(Box::new(BufWriter::new(file)))
            }
            None => None,
        };

        Ok(ReportWriter { format, writer })
    }

    /// Write a scan summary in the configured format
    pub fn write_summary(&mut self, summary: &ScanSummary) -> Result<(), OutputError> {
        match &self.format {
            ReportFormat::Json => {
                let json = serde_json::to_string_pretty(summary)?;
                self.write_output(&format!("{}\n", json))?;
            }
            ReportFormat::Text => {
                self.write_output(&render_text(summary))?;
            }
        }
        Ok(())
    }

    fn write_output(&mut self, data: &str) -> Result<(), OutputError> {
        match &mut self.writer {
            Some(writer) => {
                writer.write_all(data.as_bytes())?;
                writer.flush()?;
            }
            None => {
                print!("{}", data);
                std::io::stdout().flush()?;
            }
        }
        Ok(())
    }

    /// Flush any buffered output
    pub fn flush(&mut self) -> Result<(), OutputError> {
        if let Some(writer) = &mut self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

/// Human-readable rendering; offender order follows the report's sorted map.
fn render_text(summary: &ScanSummary) -> String {
    let mut out = String::new();

    out.push_str("=== authwatch scan ===\n");
    out.push_str(&format!("File analyzed: {}\n", summary.file.display()));
    out.push_str(&format!("Lines read: {}\n", summary.lines_read));
    out.push_str(&format!("Events parsed: {}\n", summary.events_parsed));
    out.push_str(&format!(
        "Failed logins: {}\n",
        summary.report.failed_login_count
    ));

    if summary.report.offenders.is_empty() {
        out.push_str("No brute-force sources detected.\n");
    } else {
        out.push_str(&format!(
            "Brute-force sources ({}):\n",
            summary.report.offenders.len()
        ));
        for (source, stats) in &summary.report.offenders {
            out.push_str(&format!(
                "  {} - {} failed attempts between {} and {}\n",
                source, stats.count, stats.first_seen, stats.last_seen
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OffenderStats;
    use chrono::NaiveDate;

    fn summary_with_offender() -> ScanSummary {
        let mut report = BruteForceReport::empty();
        report.total_lines = 6;
        report.failed_login_count = 5;
        report.offenders.insert(
            "10.0.0.1".to_string(),
            OffenderStats {
                count: 5,
                first_seen: NaiveDate::from_ymd_opt(2024, 12, 25)
                    .unwrap()
                    .and_hms_opt(14, 0, 0)
                    .unwrap(),
                last_seen: NaiveDate::from_ymd_opt(2024, 12, 25)
                    .unwrap()
                    .and_hms_opt(14, 2, 30)
                    .unwrap(),
            },
        );

        ScanSummary {
            file: PathBuf::from("/var/log/auth.log"),
            lines_read: 8,
            events_parsed: 6,
            report,
        }
    }

    #[test]
    fn test_text_rendering_lists_offenders() {
        let text = render_text(&summary_with_offender());

        assert!(text.contains("File analyzed: /var/log/auth.log"));
        assert!(text.contains("Lines read: 8"));
        assert!(text.contains("Failed logins: 5"));
        assert!(text.contains("10.0.0.1 - 5 failed attempts"));
        assert!(text.contains("2024-12-25 14:00:00"));
    }

    #[test]
    fn test_text_rendering_without_offenders() {
        let summary = ScanSummary {
            file: PathBuf::from("auth.log"),
            lines_read: 0,
            events_parsed: 0,
            report: BruteForceReport::empty(),
        };

        let text = render_text(&summary);
        assert!(text.contains("No brute-force sources detected."));
    }

    #[test]
    fn test_json_rendering_round_trips() {
        let summary = summary_with_offender();
        let json = serde_json::to_string_pretty(&summary).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["report"]["failed_login_count"], 5);
        assert_eq!(value["report"]["offenders"]["10.0.0.1"]["count"], 5);
        assert_eq!(
            value["report"]["offenders"]["10.0.0.1"]["first_seen"],
            "2024-12-25T14:00:00"
        );
    }

    #[test]
    fn test_format_from_str_defaults_to_text() {
        assert!(matches!(ReportFormat::from_str("json"), ReportFormat::Json));
        assert!(matches!(ReportFormat::from_str("JSON"), ReportFormat::Json));
        assert!(matches!(ReportFormat::from_str("text"), ReportFormat::Text));
        assert!(matches!(
            ReportFormat::from_str("something-else"),
            ReportFormat::Text
        ));
    }
}
