//! Recently visited stops and the suggestions derived from them.
//!
//! Every opened stop is recorded together with the stop opened before it.
//! Suggestions favour stops that usually follow the last visited one and
//! fall back to overall popularity.

mod store;
pub use store::*;

use std::{cmp::Reverse, collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::Stop;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Turns suggestions off entirely, visits are still recorded.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

const fn default_enabled() -> bool {
    true
}

const fn default_max_suggestions() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitedStop {
    pub stop: Stop,
    pub visits: u32,
    pub last_visit: DateTime<Utc>,
}

/// Visit counts per stop and transition counts between consecutive visits.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitGraph {
    stops: HashMap<Arc<str>, VisitedStop>,
    transitions: HashMap<Arc<str>, HashMap<Arc<str>, u32>>,
    last_visited: Option<Arc<str>>,
}

impl VisitGraph {
    pub fn visit(&mut self, stop: &Stop, at: DateTime<Utc>) {
        self.stops
            .entry(stop.id.clone())
            .and_modify(|visited| {
                visited.stop = stop.clone();
                visited.visits += 1;
                visited.last_visit = at;
            })
            .or_insert_with(|| VisitedStop {
                stop: stop.clone(),
                visits: 1,
                last_visit: at,
            });

        if let Some(previous) = self.last_visited.take()
            && previous != stop.id
        {
            *self
                .transitions
                .entry(previous)
                .or_default()
                .entry(stop.id.clone())
                .or_default() += 1;
        }
        self.last_visited = Some(stop.id.clone());
    }

    pub fn visited(&self, stop_id: &str) -> Option<&VisitedStop> {
        self.stops.get(stop_id)
    }

    pub fn last_visited(&self) -> Option<&VisitedStop> {
        self.visited(self.last_visited.as_deref()?)
    }

    pub fn transitions(&self, from: &str, to: &str) -> u32 {
        self.transitions
            .get(from)
            .and_then(|targets| targets.get(to))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Stops ordered by how likely they are to be opened next.
    pub fn ranked(&self) -> Vec<&VisitedStop> {
        let last = self.last_visited.as_deref();
        let mut ranked: Vec<_> = self.stops.values().collect();
        ranked.sort_by_key(|visited| {
            let follows = last
                .map(|last| self.transitions(last, &visited.stop.id))
                .unwrap_or(0);
            (
                Reverse(follows),
                Reverse(visited.visits),
                Reverse(visited.last_visit),
                visited.stop.id.clone(),
            )
        });
        ranked
    }
}

/// Repository over the visit graph with an injected persistence layer.
#[derive(Debug)]
pub struct VisitRepository<S> {
    store: S,
    graph: VisitGraph,
    config: Config,
}

impl<S> VisitRepository<S>
where
    S: VisitStore,
{
    /// Loads the graph from `store`.
    pub fn open(store: S, config: Config) -> Result<Self, StoreError> {
        let graph = store.load()?;
        debug!("Loaded {} visited stops", graph.len());
        Ok(Self {
            store,
            graph,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    pub fn graph(&self) -> &VisitGraph {
        &self.graph
    }

    pub fn get_suggestions(&self) -> Vec<Stop> {
        if !self.config.enabled {
            return Vec::new();
        }
        self.graph
            .ranked()
            .into_iter()
            .take(self.config.max_suggestions)
            .map(|visited| visited.stop.clone())
            .collect()
    }

    pub fn record_visit(&mut self, stop: &Stop) -> Result<(), StoreError> {
        self.record_visit_at(stop, Utc::now())
    }

    /// Records the visit and persists the graph. The in-memory graph is
    /// updated even if persisting fails.
    pub fn record_visit_at(&mut self, stop: &Stop, at: DateTime<Utc>) -> Result<(), StoreError> {
        self.graph.visit(stop, at);
        self.store.save(&self.graph).inspect_err(|err| {
            warn!("Failed to persist visit of {}: {err}", stop.id);
        })
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.graph = VisitGraph::default();
        self.store.save(&self.graph)
    }
}
