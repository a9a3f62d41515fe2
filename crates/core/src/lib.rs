// Tempora Core - UTC date-time value type
// NO I/O beyond a clock read: validation, calendar math and rendering only

pub mod domain;
pub mod error;
pub mod port;

pub use domain::{Formatted, UtcDateTime, GENERIC_FORMAT};
pub use error::{DateTimeError, ErrorKind, Field, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
