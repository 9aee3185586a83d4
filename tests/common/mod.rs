//! Consolidated test utilities for ai-commit
//!
//! This module provides unified testing utilities for integration tests,
//! focused on real git repository scenarios for reliable testing.

pub mod repository;
