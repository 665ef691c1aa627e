//! Shared test utilities for requisition integration tests.
//!
//! This module provides:
//! - `TestHarness` running the request store on an ephemeral port
//! - Builders for configs and request payloads

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::TestHarness;
