//! SCOUT: Premarket Stock Scanner
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod providers;
pub mod scanner;
pub mod sentiment;
pub mod types;
