//! Common test utilities for Stagehand CLI tests.
//!
//! This module provides:
//! - `TestEnv`: an isolated settings directory plus a helper to run the binary
//! - Fixtures: settings documents shared across tests

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
