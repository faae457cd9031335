//! Shared utilities for Pomoroom packages.

pub mod logger;
pub mod time;
