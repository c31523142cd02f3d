//! Projected time savings
//!
//! The projection uses a fixed session shape, not the scanned workspace.
//! Only the benefit list scales with real data.

use serde::{Deserialize, Serialize};

/// Times per session you jump to a function definition
pub const FUNCTION_LOOKUPS_PER_SESSION: f64 = 20.0;
/// Times per session you verify an import
pub const IMPORT_CHECKS_PER_SESSION: f64 = 10.0;
/// Type errors caught before runtime per session
pub const TYPE_ERRORS_PREVENTED: f64 = 5.0;
/// Function calls written with completion per session
pub const COMPLETIONS_PER_SESSION: f64 = 100.0;

/// Minutes saved per lookup
pub const MINUTES_PER_LOOKUP: f64 = 2.5;
/// Minutes saved per import check
pub const MINUTES_PER_IMPORT: f64 = 0.5;
/// Minutes saved per prevented type error
pub const MINUTES_PER_TYPE_ERROR: f64 = 1.5;
/// Minutes saved per completion
pub const MINUTES_PER_COMPLETION: f64 = 0.2;

/// Sessions per week
pub const SESSIONS_PER_WEEK: f64 = 5.0;
/// Sessions per month
pub const SESSIONS_PER_MONTH: f64 = 20.0;

/// Time savings projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSavings {
    /// Minutes per 7-hour session
    pub per_session: f64,
    /// Minutes per week
    pub per_week: f64,
    /// Hours per month
    pub per_month: f64,
}

impl TimeSavings {
    /// Compute the fixed projection
    pub fn estimate() -> Self {
        let per_session = FUNCTION_LOOKUPS_PER_SESSION * MINUTES_PER_LOOKUP
            + IMPORT_CHECKS_PER_SESSION * MINUTES_PER_IMPORT
            + TYPE_ERRORS_PREVENTED * MINUTES_PER_TYPE_ERROR
            + COMPLETIONS_PER_SESSION * MINUTES_PER_COMPLETION;

        Self {
            per_session: round1(per_session),
            per_week: round1(per_session * SESSIONS_PER_WEEK),
            per_month: round1(per_session * SESSIONS_PER_MONTH / 60.0),
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
