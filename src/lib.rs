#![deny(rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::missing_panics_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. CollectorError in collector module
    clippy::must_use_candidate       // Annotated selectively on critical APIs
)]

pub mod app;
pub mod collector;
pub mod domain;
pub mod forwarder;
pub mod sender;
pub mod syslog;

// Re-export main types for easy access
pub use app::{App, Config};
pub use forwarder::Forwarder;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
