pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::ExpiryConfig;

pub use adapters::{
    CollectingSink, FixedClock, InMemorySymbolSource, RustSourceSet, StderrSink, SystemClock,
    TracingSink,
};
pub use app::check::CheckEngine;
pub use core::scan::{InvalidMarkerPolicy, ScanDriver, ScanReport};
pub use domain::model::{Declaration, Diagnostic, DiagnosticKind, Location, MarkerArg, MarkerInstance};
pub use utils::error::{ExpiryError, Result};
