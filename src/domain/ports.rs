use crate::domain::model::{Declaration, Diagnostic};
use crate::utils::error::Result;
use chrono::NaiveDateTime;

/// Supplies the declarations of one compilation unit.
pub trait SymbolSource {
    /// Every declaration with at least one marker of `kind`, in a stable order.
    fn find_declarations_with_marker(&self, kind: &str) -> Result<Vec<Declaration>>;
}

/// The host's error channel.
pub trait DiagnosticSink {
    fn report_error(&mut self, diagnostic: &Diagnostic);
}

pub trait Clock {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

impl<T: SymbolSource + ?Sized> SymbolSource for &T {
    fn find_declarations_with_marker(&self, kind: &str) -> Result<Vec<Declaration>> {
        (**self).find_declarations_with_marker(kind)
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
