//! Tracing/logging setup shared by catalog binaries and tests.

/// Initialize process-wide tracing with defaults (JSON, `info`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() -> bool {
    tracing::init_with(&ObservabilitySettings::default())
}

/// Initialize process-wide tracing from explicit settings.
///
/// Returns `true` when this call installed the subscriber.
pub fn init_with(settings: &ObservabilitySettings) -> bool {
    tracing::init_with(settings)
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use self::tracing::{LogFormat, ObservabilitySettings};
