pub mod date;
pub mod extractor;
pub mod location;
pub mod reporter;
pub mod scan;

pub use crate::domain::model::{Declaration, Diagnostic, ExpiryDate, Location, MarkerInstance};
pub use crate::domain::ports::{Clock, DiagnosticSink, SymbolSource};
pub use crate::utils::error::Result;
