//! Course catalog browsing and schedule validation.
pub mod catalog_getter;
pub mod error;
pub mod helpers;
pub mod models;
pub mod run_tool;
pub mod session;
