//! Architectural Enforcement
//!
//! This crate exists only for its integration tests, which scan the
//! workspace sources and fail on layering violations. See `tests/`.
