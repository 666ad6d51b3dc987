//! Selection state: which metric is being looked at, over which window.
//!
//! Selection changes arrive as discrete events; the pipeline folds them
//! into a [`SelectionState`] and derives the fetches they trigger. The
//! duration choice is its own small state machine so switching metrics
//! keeps the active window whenever the new metric offers it.

use std::fmt;
use std::str::FromStr;

use gaugeview_types::{DurationSpec, MetricDescriptor};

/// Which metric namespace of a node is being browsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MetricScope {
    #[default]
    Metrics,
    Runtime,
}

impl MetricScope {
    /// The URL path segment for this scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricScope::Metrics => "metrics",
            MetricScope::Runtime => "runtime",
        }
    }

    /// All scopes, in display order.
    pub fn all() -> [MetricScope; 2] {
        [MetricScope::Metrics, MetricScope::Runtime]
    }
}

impl fmt::Display for MetricScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metrics" => Ok(MetricScope::Metrics),
            "runtime" => Ok(MetricScope::Runtime),
            other => Err(format!(
                "unknown scope {:?}, expected one of (metrics,runtime)",
                other
            )),
        }
    }
}

/// The duration-selection state machine.
///
/// `Unselected` until a metric is chosen; then either `Active` with one of
/// the metric's windows, or `NoDurations` when the metric keeps only a
/// single implicit window (fetched with the zero/zero sentinel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationSelection {
    #[default]
    Unselected,
    NoDurations,
    Active(DurationSpec),
}

impl DurationSelection {
    /// The active window, if one is selected.
    pub fn active(&self) -> Option<DurationSpec> {
        match self {
            DurationSelection::Active(d) => Some(*d),
            _ => None,
        }
    }

    /// The window to put in a fetch: the active one, or the zero/zero
    /// sentinel when the metric has none.
    pub fn effective(&self) -> DurationSpec {
        self.active().unwrap_or_default()
    }

    /// Reconcile against a newly selected metric's duration list.
    ///
    /// Keeps the active window if the list still contains it
    /// (structurally); otherwise falls back to the list head, or
    /// `NoDurations` for an empty list. Idempotent: reconciling again
    /// with the same list is a no-op.
    pub fn reconcile(&mut self, durations: &[DurationSpec]) {
        if let DurationSelection::Active(d) = self {
            if durations.contains(d) {
                return;
            }
        }
        *self = match durations.first() {
            Some(first) => DurationSelection::Active(*first),
            None => DurationSelection::NoDurations,
        };
    }
}

/// The complete current selection.
///
/// Only selection events mutate this; every mutation may invalidate
/// in-flight fetches (the pipeline tags fetches with the tuple that
/// issued them and discards mismatched results).
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pub scope: MetricScope,
    pub zone: String,
    pub family: String,
    pub metric: Option<MetricDescriptor>,
    pub duration: DurationSelection,
}

impl SelectionState {
    /// Whether a node target is fully specified.
    pub fn has_target(&self) -> bool {
        !self.zone.is_empty() && !self.family.is_empty()
    }
}

/// A discrete user selection change.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    Scope(MetricScope),
    Zone(String),
    Family(String),
    /// Select a metric by name from the fetched listing.
    Metric(String),
    Duration(DurationSpec),
}
