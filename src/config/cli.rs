use crate::config::toml_config::ExpiryConfig;
use crate::core::scan::InvalidMarkerPolicy;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "expiry-check")]
#[command(about = "Fail the build when #[expiry(\"dd-mm-yyyy\")] markers have passed their date")]
pub struct CliConfig {
    /// Files or directories to scan (overrides scan.paths)
    pub paths: Vec<String>,

    /// Path to TOML configuration file (default: ./expiry.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Attribute path that marks an expiring declaration
    #[arg(long)]
    pub marker: Option<String>,

    /// Directory or file names to skip
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Evaluate as if the current local time were this (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long, value_parser = parse_now)]
    pub now: Option<NaiveDateTime>,

    /// Output format: text or json
    #[arg(long)]
    pub format: Option<String>,

    /// What to do with markers whose date cannot be read
    #[arg(long, value_enum)]
    pub on_invalid_marker: Option<InvalidMarkerPolicy>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Command line values win over the file.
    pub fn apply_to(&self, config: &mut ExpiryConfig) {
        if !self.paths.is_empty() {
            config.scan.paths = self.paths.clone();
        }
        if let Some(marker) = &self.marker {
            config.scan.marker = marker.clone();
        }
        if !self.exclude.is_empty() {
            config.scan.exclude = self.exclude.clone();
        }
        if let Some(format) = &self.format {
            config.report.format = format.clone();
        }
        if let Some(policy) = self.on_invalid_marker {
            config.report.on_invalid_marker = policy;
        }
    }
}

pub fn parse_now(value: &str) -> Result<NaiveDateTime, String> {
    if let Ok(instant) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(instant);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|e| format!("expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS: {}", e))
}
