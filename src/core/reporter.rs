use crate::core::date::render_date;
use crate::domain::model::{
    Declaration, Diagnostic, DiagnosticKind, ExpiryDate, Location, Severity,
};
use crate::domain::ports::DiagnosticSink;
use crate::utils::error::ExpiryError;
use chrono::NaiveDateTime;

pub fn format_diagnostic(
    decl: &Declaration,
    expiry: ExpiryDate,
    now: NaiveDateTime,
    location: &Location,
) -> String {
    format!(
        "@Expiry -> Feature expired: \"{}\". Expiry: {} - Today: {}. Can be found at : {}",
        decl.display(),
        render_date(expiry.start_of_day()),
        render_date(now),
        location
    )
}

pub fn format_invalid_marker(decl: &Declaration, error: &ExpiryError, location: &Location) -> String {
    format!(
        "@Expiry -> Invalid marker on \"{}\": {}. Can be found at : {}",
        decl.display(),
        error.marker_reason(),
        location
    )
}

pub fn expired_diagnostic(
    decl: &Declaration,
    expiry: ExpiryDate,
    now: NaiveDateTime,
    location: &Location,
) -> Diagnostic {
    Diagnostic {
        severity: Severity::Error,
        kind: DiagnosticKind::Expired,
        message: format_diagnostic(decl, expiry, now, location),
        declaration: decl.display().to_string(),
        location: location.to_string(),
        expiry: Some(expiry.date()),
    }
}

pub fn invalid_marker_diagnostic(
    decl: &Declaration,
    error: &ExpiryError,
    location: &Location,
) -> Diagnostic {
    Diagnostic {
        severity: Severity::Error,
        kind: DiagnosticKind::InvalidMarker,
        message: format_invalid_marker(decl, error, location),
        declaration: decl.display().to_string(),
        location: location.to_string(),
        expiry: None,
    }
}

pub fn emit(diagnostic: &Diagnostic, sink: &mut dyn DiagnosticSink) {
    sink.report_error(diagnostic);
}
