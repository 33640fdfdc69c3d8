use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One positional argument of a marker attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum MarkerArg {
    Text(String),
    Integer(i64),
    Bool(bool),
    /// Any other expression, kept as its token text.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerInstance {
    pub kind: String,
    pub args: Vec<MarkerArg>,
}

impl MarkerInstance {
    pub fn new(kind: impl Into<String>, args: Vec<MarkerArg>) -> Self {
        Self {
            kind: kind.into(),
            args,
        }
    }
}

/// Where a symbol source found a declaration. `line` is 1-based; 0 means unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePosition {
    pub path: String,
    pub line: usize,
}

/// A program symbol as handed out by a [`SymbolSource`](crate::domain::ports::SymbolSource).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    display: String,
    markers: Vec<MarkerInstance>,
    position: Option<SourcePosition>,
}

impl Declaration {
    pub fn new(
        display: impl Into<String>,
        markers: Vec<MarkerInstance>,
        position: Option<SourcePosition>,
    ) -> Self {
        Self {
            display: display.into(),
            markers,
            position,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn markers(&self) -> &[MarkerInstance] {
        &self.markers
    }

    pub fn position(&self) -> Option<&SourcePosition> {
        self.position.as_ref()
    }

    pub fn has_marker(&self, kind: &str) -> bool {
        self.markers.iter().any(|m| m.kind == kind)
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpiryDate(pub NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Known { path: String, line: usize },
    Unknown,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Known { path, line } => write!(f, "{}:{}", path, line),
            Location::Unknown => f.write_str("Invalid location."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    Expired,
    InvalidMarker,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub declaration: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<NaiveDate>,
}
