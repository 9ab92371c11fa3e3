//! Per-move time budgeting.
//!
//! The engine settles on one budget per request; the search then consults a
//! `SearchClock` at two thresholds: the root loop stops taking new moves once
//! the root cutoff has passed, and nodes entered after the full budget fall
//! back to static evaluation.

use std::time::{Duration, Instant};

use crate::engines::engine_trait::SearchParams;

pub const DEFAULT_TIME_BUDGET_MS: u64 = 2_000;
pub const DEFAULT_ROOT_CUTOFF_PERCENT: u8 = 80;

/// Explicit `movetime_ms` wins over the configured budget; zero is raised to
/// one millisecond so the search still completes at least one root move.
pub fn resolve_budget_ms(configured_ms: u64, params: &SearchParams) -> u64 {
    params.movetime_ms.unwrap_or(configured_ms).max(1)
}

#[derive(Debug, Clone, Copy)]
pub struct SearchClock {
    start: Instant,
    root_cutoff: Option<Duration>,
    hard_limit: Option<Duration>,
}

impl SearchClock {
    pub fn start(budget_ms: u64, root_cutoff_percent: u8) -> Self {
        let percent = u64::from(root_cutoff_percent.min(100));
        Self {
            start: Instant::now(),
            root_cutoff: Some(Duration::from_millis(budget_ms.saturating_mul(percent) / 100)),
            hard_limit: Some(Duration::from_millis(budget_ms)),
        }
    }

    /// A clock that never runs out.
    pub fn unlimited() -> Self {
        Self {
            start: Instant::now(),
            root_cutoff: None,
            hard_limit: None,
        }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[inline]
    pub fn root_expired(&self) -> bool {
        self.root_cutoff.is_some_and(|cutoff| self.elapsed() >= cutoff)
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.hard_limit.is_some_and(|limit| self.elapsed() >= limit)
    }
}
