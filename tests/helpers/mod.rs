//! Shared fixtures for integration tests.

pub mod display;
pub mod packs;
