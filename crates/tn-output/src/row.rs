//! Plain data row types written by output backends.

/// One road's traffic state after a traffic pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStateRow {
    pub step:             u64,
    pub from:             String,
    pub to:               String,
    pub open:             bool,
    pub congestion:       f64,
    /// `+inf` for a closed road; written as `inf`.
    pub effective_weight: f64,
}

/// One replan.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLogRow {
    pub step:   u64,
    /// `SessionEvent::tag()` of the triggering action.
    pub event:  &'static str,
    /// Node labels joined with `>`; empty when there is no path.
    pub path:   String,
    /// `+inf` when there is no path.
    pub cost:   f64,
    pub cursor: usize,
}
