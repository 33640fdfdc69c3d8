use crate::core::date::{is_expired, parse_expiry_date};
use crate::core::extractor::{extract_date_argument, extract_expiry_marker};
use crate::core::location::resolve_location;
use crate::core::reporter::{emit, expired_diagnostic, invalid_marker_diagnostic};
use crate::domain::model::{Declaration, Diagnostic, ExpiryDate};
use crate::domain::ports::{Clock, DiagnosticSink, SymbolSource};
use crate::utils::error::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MARKER: &str = "expiry";

/// What to do when a marker has no usable date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum InvalidMarkerPolicy {
    /// Emit an invalid-marker diagnostic and keep scanning.
    #[default]
    Report,
    /// Stop the scan with the error.
    Abort,
}

impl InvalidMarkerPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidMarkerPolicy::Report => "report",
            InvalidMarkerPolicy::Abort => "abort",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub declarations: usize,
    pub evaluated: usize,
    pub expired: usize,
    pub invalid: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanReport {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

enum Outcome {
    Unmarked,
    Live(ExpiryDate),
    Expired(ExpiryDate),
}

pub struct ScanDriver<S: SymbolSource, C: Clock> {
    source: S,
    clock: C,
    marker: String,
    policy: InvalidMarkerPolicy,
}

impl<S: SymbolSource, C: Clock> ScanDriver<S, C> {
    pub fn new(source: S, clock: C) -> Self {
        Self {
            source,
            clock,
            marker: DEFAULT_MARKER.to_string(),
            policy: InvalidMarkerPolicy::default(),
        }
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_policy(mut self, policy: InvalidMarkerPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// One scan pass. Every expired marker is emitted to `sink` and collected in the report.
    pub fn run(&self, sink: &mut dyn DiagnosticSink) -> Result<ScanReport> {
        let declarations = self.source.find_declarations_with_marker(&self.marker)?;
        let mut report = ScanReport::default();

        if declarations.is_empty() {
            tracing::debug!("No declarations carry #[{}]", self.marker);
            return Ok(report);
        }

        let now = self.clock.now();
        tracing::debug!(
            "Scanning {} declarations marked #[{}] at {}",
            declarations.len(),
            self.marker,
            now
        );

        for decl in &declarations {
            report.declarations += 1;

            match self.evaluate(decl, now, &mut report) {
                Ok(Outcome::Unmarked) => {
                    tracing::debug!("{}: no #[{}] marker, skipped", decl, self.marker);
                }
                Ok(Outcome::Live(expiry)) => {
                    tracing::debug!("{}: live until {}", decl, expiry.date());
                }
                Ok(Outcome::Expired(expiry)) => {
                    let location = resolve_location(decl);
                    let diagnostic = expired_diagnostic(decl, expiry, now, &location);
                    emit(&diagnostic, sink);
                    report.expired += 1;
                    report.diagnostics.push(diagnostic);
                }
                Err(err) if err.is_declaration_scoped() => {
                    if self.policy == InvalidMarkerPolicy::Abort {
                        return Err(err);
                    }
                    tracing::warn!("{}: {}", decl, err);
                    let location = resolve_location(decl);
                    let diagnostic = invalid_marker_diagnostic(decl, &err, &location);
                    emit(&diagnostic, sink);
                    report.invalid += 1;
                    report.diagnostics.push(diagnostic);
                }
                Err(err) => return Err(err),
            }
        }

        tracing::info!(
            "Checked {} #[{}] markers: {} expired, {} invalid",
            report.declarations,
            self.marker,
            report.expired,
            report.invalid
        );

        Ok(report)
    }

    fn evaluate(
        &self,
        decl: &Declaration,
        now: NaiveDateTime,
        report: &mut ScanReport,
    ) -> Result<Outcome> {
        let Some(marker) = extract_expiry_marker(decl, &self.marker) else {
            return Ok(Outcome::Unmarked);
        };
        let text = extract_date_argument(decl, marker)?;

        report.evaluated += 1;
        let expiry = parse_expiry_date(text)?;
        if is_expired(expiry, now) {
            Ok(Outcome::Expired(expiry))
        } else {
            Ok(Outcome::Live(expiry))
        }
    }
}
