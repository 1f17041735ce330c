//! # Craftplan CLI
//!
//! Front end of the crafting planner:
//! - Configuration loaded from `craftplan.toml`
//! - Recipe matrix and inventory CSV loading
//! - Markdown report and JSON export of a plan

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod loader;
pub mod report;
