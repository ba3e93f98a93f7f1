//! Integration test harness.

mod scan;
