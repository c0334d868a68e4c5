//! Session observer trait for rendering and history capture.

use tn_core::EdgeId;
use tn_network::{RoadGraph, TrafficPass};
use tn_routing::{Algorithm, PlannedPath};

/// The user action that triggered a replan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Session built; first plan.
    Started,
    RouteSelected,
    /// Explicit replan with no state change.
    Replanned,
    RoadToggled { edge: EdgeId, open: bool },
    AlgorithmChanged(Algorithm),
    Advanced,
    Reset,
    Recalculated,
}

impl SessionEvent {
    /// Short lowercase tag, e.g. for a log column.
    pub fn tag(&self) -> &'static str {
        match self {
            SessionEvent::Started             => "start",
            SessionEvent::RouteSelected       => "route",
            SessionEvent::Replanned           => "replan",
            SessionEvent::RoadToggled { .. }  => "toggle",
            SessionEvent::AlgorithmChanged(_) => "algorithm",
            SessionEvent::Advanced            => "advance",
            SessionEvent::Reset               => "reset",
            SessionEvent::Recalculated        => "recalculate",
        }
    }
}

/// Callbacks invoked by [`Session`](crate::Session) after each committed
/// state change.
///
/// Hooks fire only once an action has fully succeeded, so an observer never
/// sees a traffic pass that was rolled back.  All methods default to no-ops.
pub trait SessionObserver {
    /// Called after a traffic pass, before the replan it triggers.
    ///
    /// `step` counts traffic passes since the session started (1-based here).
    fn on_traffic_update(&mut self, _step: u64, _graph: &RoadGraph, _pass: &TrafficPass) {}

    /// Called after every replan with the path now in force.
    fn on_replan(
        &mut self,
        _step:   u64,
        _event:  SessionEvent,
        _graph:  &RoadGraph,
        _path:   &PlannedPath,
        _cursor: usize,
    ) {}
}

/// A [`SessionObserver`] that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}
