use crate::domain::model::{Declaration, MarkerArg, MarkerInstance};
use crate::utils::error::{ExpiryError, Result};

/// First marker on `decl` whose kind is exactly `kind`.
pub fn extract_expiry_marker<'a>(decl: &'a Declaration, kind: &str) -> Option<&'a MarkerInstance> {
    decl.markers().iter().find(|m| m.kind == kind)
}

/// The date string a well-formed marker carries as its first argument.
pub fn extract_date_argument<'a>(decl: &Declaration, marker: &'a MarkerInstance) -> Result<&'a str> {
    match marker.args.first() {
        Some(MarkerArg::Text(text)) => Ok(text),
        Some(other) => Err(ExpiryError::MalformedMarker {
            declaration: decl.display().to_string(),
            reason: format!("first argument must be a string literal, found {}", describe(other)),
        }),
        None => Err(ExpiryError::MalformedMarker {
            declaration: decl.display().to_string(),
            reason: "no date argument".to_string(),
        }),
    }
}

fn describe(arg: &MarkerArg) -> String {
    match arg {
        MarkerArg::Text(text) => format!("string {:?}", text),
        MarkerArg::Integer(value) => format!("integer {}", value),
        MarkerArg::Bool(value) => format!("bool {}", value),
        MarkerArg::Other(tokens) => format!("`{}`", tokens),
    }
}
