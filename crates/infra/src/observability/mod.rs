//! Logging setup
//!
//! The library itself only emits `tracing` events. Binaries and test
//! harnesses call [`init_logging`] once to get them printed.

pub mod logging;

pub use logging::init_logging;
