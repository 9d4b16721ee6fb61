//! Utility types shared across Folio crates.

pub mod logging;

pub use logging::LogLevel;
