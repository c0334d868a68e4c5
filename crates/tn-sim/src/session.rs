//! The session: one graph, one route, one vehicle cursor.

use tracing::{debug, info};

use tn_core::{NodeId, SimRng, TrafficConfig};
use tn_network::{update_traffic, RoadGraph};
use tn_routing::{shortest_path, Algorithm, PlannedPath};

use crate::snapshot::SessionSnapshot;
use crate::{SessionEvent, SessionObserver, SimResult};

/// Outcome of [`Session::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The vehicle moved; `cursor` is its index in the replanned path.
    Moved { cursor: usize },
    /// Already on the last node of the path.  Nothing changed.
    AtDestination,
    /// There is no path to move along.  Nothing changed.
    NoPath,
}

/// A long-lived routing session.
///
/// Owns the road graph for its whole lifetime; construct one per user
/// session with [`SessionBuilder`](crate::SessionBuilder) and drop it when
/// the session ends.
///
/// The cursor always satisfies `cursor < path.len()` for a non-empty path
/// and `cursor == 0` otherwise.
pub struct Session<O: SessionObserver> {
    graph:     RoadGraph,
    config:    TrafficConfig,
    rng:       SimRng,
    algorithm: Algorithm,
    route:     Option<(NodeId, NodeId)>,
    path:      PlannedPath,
    cursor:    usize,
    step:      u64,
    observer:  O,
}

impl<O: SessionObserver> Session<O> {
    pub(crate) fn start(
        graph:     RoadGraph,
        config:    TrafficConfig,
        rng:       SimRng,
        algorithm: Algorithm,
        route:     Option<(NodeId, NodeId)>,
        observer:  O,
    ) -> SimResult<Self> {
        let mut session = Self {
            graph,
            config,
            rng,
            algorithm,
            route,
            path: PlannedPath::unreachable(),
            cursor: 0,
            step: 0,
            observer,
        };
        let path = session.compute_path()?;
        session.commit(path, SessionEvent::Started);
        Ok(session)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    pub fn config(&self) -> &TrafficConfig {
        &self.config
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Current `(source, target)`, if one has been selected.
    pub fn route(&self) -> Option<(NodeId, NodeId)> {
        self.route
    }

    pub fn path(&self) -> &PlannedPath {
        &self.path
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of traffic passes applied so far.
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Node the vehicle currently sits on, if there is a path.
    pub fn vehicle(&self) -> Option<NodeId> {
        self.path.nodes.get(self.cursor).copied()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(self)
    }

    #[cfg(test)]
    pub(crate) fn graph_mut(&mut self) -> &mut RoadGraph {
        &mut self.graph
    }

    // ── User commands ─────────────────────────────────────────────────────

    /// Choose a new source and target by label and replan.
    pub fn select_route(&mut self, source: &str, target: &str) -> SimResult<&PlannedPath> {
        let route = (self.graph.node_id(source)?, self.graph.node_id(target)?);
        let previous = self.route.replace(route);
        match self.compute_path() {
            Ok(path) => {
                self.commit(path, SessionEvent::RouteSelected);
                Ok(&self.path)
            }
            Err(e) => {
                self.route = previous;
                Err(e)
            }
        }
    }

    /// Switch routing algorithm and replan.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> SimResult<&PlannedPath> {
        let previous = std::mem::replace(&mut self.algorithm, algorithm);
        match self.compute_path() {
            Ok(path) => {
                self.commit(path, SessionEvent::AlgorithmChanged(algorithm));
                Ok(&self.path)
            }
            Err(e) => {
                self.algorithm = previous;
                Err(e)
            }
        }
    }

    /// Open or close the road `from → to` and replan.
    pub fn set_open(&mut self, from: &str, to: &str, open: bool) -> SimResult<&PlannedPath> {
        let before = self.graph.traffic_state();
        let edge = self.graph.set_open(from, to, open)?;
        match self.compute_path() {
            Ok(path) => {
                info!(from, to, open, "road toggled");
                self.commit(path, SessionEvent::RoadToggled { edge, open });
                Ok(&self.path)
            }
            Err(e) => {
                self.graph.restore_traffic_state(&before);
                Err(e)
            }
        }
    }

    /// Recompute the path under current weights without any traffic pass.
    pub fn replan(&mut self) -> SimResult<&PlannedPath> {
        let path = self.compute_path()?;
        self.commit(path, SessionEvent::Replanned);
        Ok(&self.path)
    }

    /// Move the vehicle one node along the path.
    ///
    /// Runs a traffic pass over the whole current path, then replans.  When
    /// there is no path or the vehicle is already at the target this is a
    /// no-op: no cursor change and no traffic pass.
    pub fn advance(&mut self) -> SimResult<Advance> {
        if self.path.is_empty() {
            return Ok(Advance::NoPath);
        }
        if self.cursor + 1 >= self.path.len() {
            return Ok(Advance::AtDestination);
        }

        let traveled = self.path.nodes.clone();
        self.traffic_cycle(&traveled, self.cursor + 1, SessionEvent::Advanced)?;
        info!(cursor = self.cursor, step = self.step, "vehicle advanced");
        Ok(Advance::Moved { cursor: self.cursor })
    }

    /// Return the vehicle to the start and let every open road decay once.
    pub fn reset(&mut self) -> SimResult<()> {
        self.traffic_cycle(&[], 0, SessionEvent::Reset)?;
        info!(step = self.step, "vehicle reset");
        Ok(())
    }

    /// Re-run traffic over the current path without moving, then restart the
    /// vehicle from the beginning.
    pub fn recalculate(&mut self) -> SimResult<()> {
        let traveled = self.path.nodes.clone();
        self.traffic_cycle(&traveled, 0, SessionEvent::Recalculated)?;
        info!(step = self.step, "traffic recalculated");
        Ok(())
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Traffic pass + replan as one unit.  If the replan fails the graph is
    /// rolled back and the cursor, step and path are left as they were.
    fn traffic_cycle(&mut self, traveled: &[NodeId], cursor: usize, event: SessionEvent) -> SimResult<()> {
        let before = self.graph.traffic_state();
        let pass = update_traffic(&mut self.graph, traveled, &self.config, &mut self.rng);

        let path = match self.compute_path() {
            Ok(path) => path,
            Err(e) => {
                self.graph.restore_traffic_state(&before);
                return Err(e);
            }
        };

        self.step += 1;
        self.cursor = cursor;
        self.observer.on_traffic_update(self.step, &self.graph, &pass);
        self.commit(path, event);
        Ok(())
    }

    fn compute_path(&self) -> SimResult<PlannedPath> {
        match self.route {
            Some((source, target)) => Ok(shortest_path(&self.graph, source, target, self.algorithm)?),
            None => Ok(PlannedPath::unreachable()),
        }
    }

    /// Install `path`, clamp the cursor into it, and notify the observer.
    fn commit(&mut self, path: PlannedPath, event: SessionEvent) {
        self.path = path;
        self.cursor = self.cursor.min(self.path.len().saturating_sub(1));
        debug!(
            event = event.tag(),
            nodes = self.path.len(),
            cost = self.path.cost,
            cursor = self.cursor,
            "replanned"
        );
        self.observer.on_replan(self.step, event, &self.graph, &self.path, self.cursor);
    }
}
