use crate::domain::model::{Declaration, Location};

pub fn resolve_location(decl: &Declaration) -> Location {
    match decl.position() {
        Some(pos) if !pos.path.is_empty() && pos.line > 0 => Location::Known {
            path: pos.path.clone(),
            line: pos.line,
        },
        _ => Location::Unknown,
    }
}
