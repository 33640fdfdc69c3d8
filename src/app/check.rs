use crate::adapters::rust_source::RustSourceSet;
use crate::config::toml_config::ExpiryConfig;
use crate::core::scan::{ScanDriver, ScanReport};
use crate::domain::ports::{Clock, DiagnosticSink};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Scans the Rust sources a config points at.
///
/// Build scripts can call this directly:
///
/// ```no_run
/// use expiry_check::{CheckEngine, ExpiryConfig, StderrSink, SystemClock};
///
/// let report = CheckEngine::new(ExpiryConfig::for_paths(["src"]))
///     .run(SystemClock, &mut StderrSink::new())
///     .expect("expiry scan failed");
/// assert!(!report.has_errors(), "expired #[expiry] markers");
/// ```
pub struct CheckEngine {
    config: ExpiryConfig,
}

impl CheckEngine {
    pub fn new(config: ExpiryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExpiryConfig {
        &self.config
    }

    pub fn source(&self) -> RustSourceSet {
        RustSourceSet::new(self.config.scan.paths.iter()).with_exclude(self.config.scan.exclude.clone())
    }

    pub fn run<C: Clock>(&self, clock: C, sink: &mut dyn DiagnosticSink) -> Result<ScanReport> {
        self.config.validate()?;

        tracing::debug!(
            "Checking {:?} for #[{}] (invalid markers: {})",
            self.config.scan.paths,
            self.config.scan.marker,
            self.config.report.on_invalid_marker.as_str()
        );

        ScanDriver::new(self.source(), clock)
            .with_marker(self.config.scan.marker.clone())
            .with_policy(self.config.report.on_invalid_marker)
            .run(sink)
    }
}
