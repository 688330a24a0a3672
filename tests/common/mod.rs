//! Common test utilities for msgbuild CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project directory with a fake Go toolchain
//! - `TestResult`: Captured output of one CLI run

pub mod env;

pub use env::*;
