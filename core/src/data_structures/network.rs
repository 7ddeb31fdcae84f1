//! Flow network representation with residual edge pairing
//!
//! This module implements a directed, capacitated graph over opaque vertex
//! labels. Every forward edge is created together with a zero-capacity
//! reverse edge; pushing flow across one side of the pair retracts the same
//! amount from the other, so residual capacities always describe exactly the
//! flow that can still be routed or undone. The pairing is an index-based
//! relation into a shared edge arena, never a mutual pointer.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Edge capacity type; integral so the augmenting-path method terminates
pub type Capacity = i64;

/// Signed flow value type
pub type Flow = i64;

/// Index of an edge within the network's edge arena
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

/// Flow network construction and query errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// Self-loop edges are rejected structurally at construction time
    #[error("invalid edge: source and sink are the same vertex ({0})")]
    InvalidEdge(String),

    /// A vertex was referenced before being registered
    #[error("unknown vertex: {0}")]
    UnknownVertex(String),
}

/// Directed edge with a fixed capacity and a mutable signed flow
///
/// For a forward/reverse pair, `capacity(e) + capacity(rev(e))` is fixed at
/// creation and `flow(e) == -flow(rev(e))` holds after every update made
/// through [`FlowNetwork::add_flow`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEdge<V> {
    /// Vertex this edge leaves
    pub source: V,
    /// Vertex this edge enters
    pub sink: V,
    capacity: Capacity,
    flow: Flow,
    reverse: EdgeId,
}

impl<V> FlowEdge<V> {
    /// Capacity bound fixed at creation
    #[inline]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Current signed flow across this edge
    #[inline]
    pub fn flow(&self) -> Flow {
        self.flow
    }

    /// Arena index of the paired reverse edge
    #[inline]
    pub fn reverse(&self) -> EdgeId {
        self.reverse
    }

    /// Remaining capacity after subtracting the current flow
    #[inline]
    pub fn residual_capacity(&self) -> Capacity {
        self.capacity - self.flow
    }
}

/// Directed, capacitated network with per-edge flow state
///
/// Vertices map to their outgoing edge lists in insertion order; that order
/// determines the scan order of the augmenting-path search and therefore
/// which path is found first. Topology and capacities are immutable once
/// solving starts (there are no deletion operations); only flow values
/// mutate. Negative capacities are a caller precondition, not checked here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowNetwork<V: Eq + Hash> {
    adjacency: HashMap<V, Vec<EdgeId>>,
    edges: Vec<FlowEdge<V>>,
}

impl<V> FlowNetwork<V>
where
    V: Clone + Eq + Hash + fmt::Debug,
{
    /// Creates an empty network
    pub fn new() -> Self {
        Self {
            adjacency: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// Registers a vertex with an empty outgoing-edge list
    ///
    /// Re-adding an existing vertex is a no-op; the return value reports
    /// whether the vertex was newly added. The existing outgoing list is
    /// never reset.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.adjacency.contains_key(&vertex) {
            return false;
        }
        self.adjacency.insert(vertex, Vec::new());
        true
    }

    /// Whether the vertex has been registered
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Number of registered vertices
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges in the arena, counting both halves of every pair
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over the registered vertices (unspecified order)
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.adjacency.keys()
    }

    /// Adds a forward edge and its zero-capacity reverse companion
    ///
    /// The two edges reference each other by arena index and each is
    /// appended to its own source vertex's outgoing list; both flows start
    /// at zero. Returns the forward edge's id. Fails with
    /// [`FlowError::InvalidEdge`] on a self-loop and
    /// [`FlowError::UnknownVertex`] if either endpoint is unregistered; a
    /// failed call leaves the network untouched.
    pub fn add_edge(
        &mut self,
        source: V,
        sink: V,
        capacity: Capacity,
    ) -> Result<EdgeId, FlowError> {
        if source == sink {
            return Err(FlowError::InvalidEdge(format!("{source:?}")));
        }
        if !self.adjacency.contains_key(&source) {
            return Err(Self::unknown(&source));
        }
        if !self.adjacency.contains_key(&sink) {
            return Err(Self::unknown(&sink));
        }

        let forward_id = EdgeId(self.edges.len());
        let reverse_id = EdgeId(self.edges.len() + 1);

        self.edges.push(FlowEdge {
            source: source.clone(),
            sink: sink.clone(),
            capacity,
            flow: 0,
            reverse: reverse_id,
        });
        self.edges.push(FlowEdge {
            source: sink.clone(),
            sink: source.clone(),
            capacity: 0,
            flow: 0,
            reverse: forward_id,
        });

        if let Some(outgoing) = self.adjacency.get_mut(&source) {
            outgoing.push(forward_id);
        }
        if let Some(outgoing) = self.adjacency.get_mut(&sink) {
            outgoing.push(reverse_id);
        }

        Ok(forward_id)
    }

    /// Outgoing edge ids of a vertex, in insertion order
    pub fn edges_from(&self, vertex: &V) -> Result<&[EdgeId], FlowError> {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .ok_or_else(|| Self::unknown(vertex))
    }

    /// Edge lookup by arena index
    ///
    /// Ids are only minted by [`FlowNetwork::add_edge`] on this network, so
    /// lookup is infallible for any id the caller legitimately holds.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &FlowEdge<V> {
        &self.edges[id.0]
    }

    /// Remaining capacity of the edge after subtracting its current flow
    #[inline]
    pub fn residual_capacity(&self, id: EdgeId) -> Capacity {
        self.edge(id).residual_capacity()
    }

    /// Adds `delta` to the edge's flow and subtracts it from the paired
    /// reverse edge, preserving `flow(e) == -flow(rev(e))`
    pub fn add_flow(&mut self, id: EdgeId, delta: Flow) {
        let reverse = self.edges[id.0].reverse;
        self.edges[id.0].flow += delta;
        self.edges[reverse.0].flow -= delta;
    }

    /// Sum of flow over the edges leaving `vertex`
    ///
    /// At the source of a solved network this equals the total flow, under
    /// the conservation invariant and assuming no outside edges re-enter
    /// the source.
    pub fn outgoing_flow(&self, vertex: &V) -> Result<Flow, FlowError> {
        Ok(self
            .edges_from(vertex)?
            .iter()
            .map(|&id| self.edge(id).flow)
            .sum())
    }

    /// Iterates over all edge ids, both halves of every pair
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> {
        (0..self.edges.len()).map(EdgeId)
    }

    /// Iterates over all edges in arena order
    pub fn edges(&self) -> impl Iterator<Item = &FlowEdge<V>> {
        self.edges.iter()
    }

    /// Zeroes every flow entry, leaving topology and capacities intact
    ///
    /// Lets one topology be solved repeatedly; for concurrent use, clone
    /// the network instead and give each computation its own copy.
    pub fn reset_flows(&mut self) {
        for edge in &mut self.edges {
            edge.flow = 0;
        }
    }

    fn unknown(vertex: &V) -> FlowError {
        FlowError::UnknownVertex(format!("{vertex:?}"))
    }
}

impl<V> Default for FlowNetwork<V>
where
    V: Clone + Eq + Hash + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
