use std::path::PathBuf;
use structopt::StructOpt;

use authwatch::config::Config;
use authwatch::detection::BruteForceDetector;
use authwatch::input::LogCollector;
use authwatch::output::{ReportFormat, ReportWriter, ScanSummary};
use authwatch::parser::LineParser;

/// Authwatch Command Line Interface
#[derive(StructOpt, Debug)]
#[structopt(name = "authwatch", about = "Local auth.log brute-force scanner")]
pub enum Cli {
    /// Scan an auth log for brute-force login sources
    Scan {
        /// Path to the auth log (defaults to the configured path)
        #[structopt(short, long)]
        file: Option<PathBuf>,
        /// Path to configuration file
        #[structopt(short, long, default_value = "authwatch.toml")]
        config: PathBuf,
        /// Sliding window length in minutes (overrides config)
        #[structopt(short, long)]
        window: Option<i64>,
        /// Failed attempts required to flag a source (overrides config)
        #[structopt(short, long)]
        threshold: Option<usize>,
        /// Emit the report as JSON instead of text
        #[structopt(long)]
        json: bool,
    },
    /// Parse and display log events from a file
    Parse {
        /// Path to log file
        #[structopt(short, long)]
        file: PathBuf,
        /// Number of events to display
        #[structopt(short, long, default_value = "10")]
        lines: usize,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the configuration file
        #[structopt(short, long, default_value = "authwatch.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::from_args();

    match cli {
        Cli::Scan {
            file,
            config,
            window,
            threshold,
            json,
        } => {
            let config = if config.exists() {
                Config::from_file(&config)?
            } else {
                log::debug!("Config file not found, using defaults");
                Config::default()
            };

            let path = file.unwrap_or_else(|| config.input.auth_log_path.clone());
            let collector = LogCollector::new(path.clone());
            if !collector.is_valid() {
                eprintln!("Log file not found: {:?}", path);
                std::process::exit(1);
            }

            let lines = collector.collect_lines()?;

            let parser = LineParser::new();
            let mut events = Vec::new();
            let mut skipped = 0usize;
            for line in &lines {
                match parser.parse_line(line) {
                    Some(event) => events.push(event),
                    None => {
                        skipped += 1;
                        log::debug!("Skipped unparsable line: {}", line);
                    }
                }
            }
            log::info!(
                "Parsed {} event(s), skipped {} line(s)",
                events.len(),
                skipped
            );

            let detector = BruteForceDetector::with_config(
                window.unwrap_or(config.detection.window_minutes),
                threshold.unwrap_or(config.detection.threshold),
            );
            let report = detector.detect(&events)?;

            let summary = ScanSummary {
                file: path,
                lines_read: lines.len(),
                events_parsed: events.len(),
                report,
            };

            let format = if json {
                ReportFormat::Json
            } else {
                ReportFormat::from_str(&config.output.format)
            };
            let mut writer = ReportWriter::new(format, config.output.file_path.clone())?;
            writer.write_summary(&summary)?;
            writer.flush()?;
        }
        Cli::Parse { file, lines } => {
            let collector = LogCollector::new(file);
            if !collector.is_valid() {
                eprintln!("File not found: {:?}", collector.path());
                std::process::exit(1);
            }

            let raw_lines = collector.collect_lines()?;

            let parser = LineParser::new();
            let events: Vec<_> = raw_lines
                .iter()
                .filter_map(|line| parser.parse_line(line))
                .collect();
            let display_count = std::cmp::min(lines, events.len());

            println!("Parsed {} event(s) (showing {}):\n", events.len(), display_count);
            for event in events.iter().take(display_count) {
                println!(
                    "  {} {} {}[{}]: user={} ip={}",
                    event.timestamp,
                    event.hostname,
                    event.process,
                    event.pid,
                    event.username.as_deref().unwrap_or("-"),
                    event.ip_address.as_deref().unwrap_or("-"),
                );
            }
        }
        Cli::Config { output } => {
            let config = Config::default();
            config.to_file(&output)?;
            println!("Default configuration written to: {:?}", output);
        }
    }

    Ok(())
}
