// Port Layer - Interfaces for external dependencies

pub mod clock;

// Re-exports
pub use clock::{Clock, SystemClock};
