// Adapters layer: concrete symbol sources, diagnostic sinks and clocks.

pub mod clock;
pub mod memory;
pub mod rust_source;
pub mod sinks;

pub use clock::{FixedClock, SystemClock};
pub use memory::InMemorySymbolSource;
pub use rust_source::RustSourceSet;
pub use sinks::{CollectingSink, StderrSink, TracingSink};
