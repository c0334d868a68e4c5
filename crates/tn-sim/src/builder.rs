//! Fluent builder for constructing a [`Session`].

use tn_core::{SimRng, TrafficConfig};
use tn_network::RoadGraph;
use tn_routing::Algorithm;

use crate::session::Session;
use crate::{NoopObserver, SessionObserver, SimResult};

/// Fluent builder for [`Session<O>`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                           |
/// |---------------------|-----------------------------------|
/// | `.config(c)`        | `TrafficConfig::default()`        |
/// | `.seed(s)`          | entropy-seeded RNG                |
/// | `.rng(r)`           | entropy-seeded RNG                |
/// | `.algorithm(a)`     | `Algorithm::Dijkstra`             |
/// | `.route(s, t)`      | no route (empty path)             |
/// | `.observer(o)`      | `NoopObserver`                    |
///
/// # Example
///
/// ```rust,ignore
/// let session = SessionBuilder::new(graph)
///     .config(TrafficConfig::default())
///     .seed(7)
///     .algorithm(Algorithm::BellmanFord)
///     .route("A", "E")
///     .build()?;
/// ```
pub struct SessionBuilder<O: SessionObserver = NoopObserver> {
    graph:     RoadGraph,
    config:    TrafficConfig,
    rng:       Option<SimRng>,
    algorithm: Algorithm,
    route:     Option<(String, String)>,
    observer:  O,
}

impl SessionBuilder<NoopObserver> {
    pub fn new(graph: RoadGraph) -> Self {
        Self {
            graph,
            config:    TrafficConfig::default(),
            rng:       None,
            algorithm: Algorithm::default(),
            route:     None,
            observer:  NoopObserver,
        }
    }
}

impl<O: SessionObserver> SessionBuilder<O> {
    pub fn config(mut self, config: TrafficConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the fluctuation RNG for a reproducible session.
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = Some(SimRng::new(seed));
        self
    }

    /// Supply the fluctuation RNG directly.
    pub fn rng(mut self, rng: SimRng) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Initial source and target labels.
    pub fn route(mut self, source: &str, target: &str) -> Self {
        self.route = Some((source.to_owned(), target.to_owned()));
        self
    }

    /// Replace the observer, changing the session's observer type.
    pub fn observer<P: SessionObserver>(self, observer: P) -> SessionBuilder<P> {
        SessionBuilder {
            graph:     self.graph,
            config:    self.config,
            rng:       self.rng,
            algorithm: self.algorithm,
            route:     self.route,
            observer,
        }
    }

    /// Validate inputs, resolve the route, and compute the first plan.
    pub fn build(self) -> SimResult<Session<O>> {
        self.config.validate()?;

        let route = match &self.route {
            Some((s, t)) => Some((self.graph.node_id(s)?, self.graph.node_id(t)?)),
            None => None,
        };
        let rng = self.rng.unwrap_or_else(SimRng::from_entropy);

        Session::start(self.graph, self.config, rng, self.algorithm, route, self.observer)
    }
}
