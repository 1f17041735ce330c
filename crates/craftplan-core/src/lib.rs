//! # Craftplan Core
//!
//! Recipe cost resolution and crafting planning.
//!
//! This crate provides:
//! - Ordered ingredient catalog and two-input recipe table
//! - Creation graph with conflict and cycle detection
//! - Memoized base-ingredient cost resolution
//! - Route enumeration ranked by yield per base unit
//! - Two-phase greedy crafting planner
//! - Per input-pair plan summaries

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod analysis;
pub mod catalog;
pub mod cost;
pub mod creation;
pub mod error;
pub mod inventory;
pub mod planner;
pub mod recipes;
pub mod routes;
pub mod summary;

/// Default target when none is supplied.
pub const DEFAULT_TARGET: &str = "Wildcards";

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analysis::*;
    pub use crate::catalog::*;
    pub use crate::cost::*;
    pub use crate::creation::*;
    pub use crate::error::*;
    pub use crate::inventory::*;
    pub use crate::planner::*;
    pub use crate::recipes::*;
    pub use crate::routes::*;
    pub use crate::summary::*;
}

pub use prelude::*;
