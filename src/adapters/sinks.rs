use crate::domain::model::Diagnostic;
use crate::domain::ports::DiagnosticSink;
use std::io::Write;

/// Forwards every diagnostic to `tracing::error!`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report_error(&mut self, diagnostic: &Diagnostic) {
        tracing::error!(
            declaration = %diagnostic.declaration,
            location = %diagnostic.location,
            "{}",
            diagnostic.message
        );
    }
}

/// Writes `error: <message>` lines, the shape cargo and most CI log viewers highlight.
pub struct StderrSink<W: Write = std::io::Stderr> {
    out: W,
}

impl StderrSink {
    pub fn new() -> Self {
        Self {
            out: std::io::stderr(),
        }
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StderrSink<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DiagnosticSink for StderrSink<W> {
    fn report_error(&mut self, diagnostic: &Diagnostic) {
        if let Err(e) = writeln!(self.out, "error: {}", diagnostic.message) {
            tracing::warn!("Failed to write diagnostic: {}", e);
        }
    }
}

#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Vec<String>,
}

impl CollectingSink {
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl DiagnosticSink for CollectingSink {
    fn report_error(&mut self, diagnostic: &Diagnostic) {
        self.messages.push(diagnostic.message.clone());
    }
}
