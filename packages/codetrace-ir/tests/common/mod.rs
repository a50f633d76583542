//! Common test utilities for codetrace-ir
//!
//! Shared snippets and trace assertions for the integration tests.

#![allow(dead_code)]

mod assertions;
mod fixtures;

pub use assertions::*;
pub use fixtures::*;
