//! Utility modules.

/// Lenient decoders for loosely typed response values.
pub mod lenient;

/// Log sanitization utilities to prevent credential exposure.
pub mod log_sanitizer;
