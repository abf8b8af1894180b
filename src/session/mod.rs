//! Explicit per-user session state.

/// Capture/preview session.
pub mod capture_session;
