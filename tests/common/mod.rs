//! Common test utilities and helpers
//!
//! - In-process application fixture driven through `tower::ServiceExt`
//! - PostgreSQL store fixture for the `--ignored` suite
//!
//! Each test binary uses a different subset of these helpers.

#![allow(dead_code)]

pub mod app;
pub mod database;

pub use app::*;
pub use database::*;
