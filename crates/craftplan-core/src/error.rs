//! Top-level error type for a planning run.

use thiserror::Error;

use crate::cost::CostError;
use crate::creation::CreationError;
use crate::planner::PlannerError;
use crate::routes::RouteError;

/// Any failure that aborts a planning run.
#[derive(Debug, Error)]
pub enum CraftplanError {
    /// Ambiguous or cyclic production
    #[error("Creation error: {0}")]
    Creation(#[from] CreationError),

    /// Cost resolution errors
    #[error("Cost error: {0}")]
    Cost(#[from] CostError),

    /// Route enumeration errors
    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    /// Planning errors
    #[error("Planner error: {0}")]
    Planner(#[from] PlannerError),
}

/// Result type alias for planning runs.
pub type CraftplanResult<T> = Result<T, CraftplanError>;
