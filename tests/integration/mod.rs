//! Integration test suite for vellum
//!
//! End-to-end tests rendering real template trees from temporary directories and
//! driving the `vellum` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **renderer**: Lookup precedence, partials, formats, options and block content
//! - **decorated_attributes**: Part decoration with default and custom part builders
//! - **cache_concurrency**: Compile-once caching across threads and renderers
//! - **cli**: The `render` and `lookup` commands

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;
#[path = "../fixtures/mod.rs"]
mod fixtures;

mod cache_concurrency;
mod cli;
mod decorated_attributes;
mod renderer;
