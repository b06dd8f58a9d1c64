//! Arena-backed bipartite graph of time slots
//!
//! Every slot taking part in a matching run is pushed into a [`SlotGraph`]
//! once and addressed by its [`NodeId`] afterwards. Adjacency and pairing are
//! plain index lists, so pairing two slots is two writes into the arena.
//!
//! The "unmatched" terminal used by Hopcroft-Karp is not a node at all: it is
//! the [`PairTarget::Nil`] variant, which can never be confused with a real
//! slot however its interval compares.

use crate::models::{AvailabilitySlot, RequestSlot, Side, TimeSlot};

/// Handle of a slot inside a [`SlotGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a slot is currently paired with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairTarget {
    Node(NodeId),
    /// The shared end of every augmenting path
    Nil,
}

impl PairTarget {
    pub fn node(self) -> Option<NodeId> {
        match self {
            PairTarget::Node(id) => Some(id),
            PairTarget::Nil => None,
        }
    }

    pub fn is_nil(self) -> bool {
        matches!(self, PairTarget::Nil)
    }
}

#[derive(Debug, Clone)]
enum SlotKind {
    Request(RequestSlot),
    Availability(AvailabilitySlot),
}

#[derive(Debug, Clone)]
struct Node {
    kind: SlotKind,
    neighbours: Vec<NodeId>,
    paired: Option<NodeId>,
}

/// Bipartite graph of request and availability slots
#[derive(Debug, Clone, Default)]
pub struct SlotGraph {
    nodes: Vec<Node>,
    requests: Vec<NodeId>,
    availabilities: Vec<NodeId>,
    edges: usize,
}

impl SlotGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(requests: usize, availabilities: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(requests + availabilities),
            requests: Vec::with_capacity(requests),
            availabilities: Vec::with_capacity(availabilities),
            edges: 0,
        }
    }

    pub fn add_request(&mut self, request: RequestSlot) -> NodeId {
        let id = self.push(SlotKind::Request(request));
        self.requests.push(id);
        id
    }

    pub fn add_availability(&mut self, availability: AvailabilitySlot) -> NodeId {
        let id = self.push(SlotKind::Availability(availability));
        self.availabilities.push(id);
        id
    }

    fn push(&mut self, kind: SlotKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            neighbours: Vec::new(),
            paired: None,
        });
        id
    }

    /// Number of slots on both sides
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Request nodes in insertion order
    pub fn request_ids(&self) -> &[NodeId] {
        &self.requests
    }

    /// Availability nodes in insertion order
    pub fn availability_ids(&self) -> &[NodeId] {
        &self.availabilities
    }

    pub fn side(&self, id: NodeId) -> Side {
        match self.nodes[id.0].kind {
            SlotKind::Request(_) => Side::Request,
            SlotKind::Availability(_) => Side::Availability,
        }
    }

    pub fn slot(&self, id: NodeId) -> &TimeSlot {
        match &self.nodes[id.0].kind {
            SlotKind::Request(request) => &request.slot,
            SlotKind::Availability(availability) => &availability.slot,
        }
    }

    pub fn request(&self, id: NodeId) -> Option<&RequestSlot> {
        match &self.nodes[id.0].kind {
            SlotKind::Request(request) => Some(request),
            SlotKind::Availability(_) => None,
        }
    }

    pub fn availability(&self, id: NodeId) -> Option<&AvailabilitySlot> {
        match &self.nodes[id.0].kind {
            SlotKind::Availability(availability) => Some(availability),
            SlotKind::Request(_) => None,
        }
    }

    /// Connect two slots on opposite sides, in both directions
    ///
    /// Each edge must be added once; duplicates are not filtered.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) {
        debug_assert_ne!(self.side(a), self.side(b), "edge within one side");
        self.nodes[a.0].neighbours.push(b);
        self.nodes[b.0].neighbours.push(a);
        self.edges += 1;
    }

    pub fn neighbours(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].neighbours
    }

    pub fn is_neighbour(&self, a: NodeId, b: NodeId) -> bool {
        self.nodes[a.0].neighbours.contains(&b)
    }

    /// Pair two slots with each other
    ///
    /// Former partners of either slot keep pointing at it; the caller has to
    /// re-pair them to restore symmetry.
    pub fn pair(&mut self, a: NodeId, b: NodeId) {
        self.nodes[a.0].paired = Some(b);
        self.nodes[b.0].paired = Some(a);
    }

    pub fn is_paired(&self, id: NodeId) -> bool {
        self.nodes[id.0].paired.is_some()
    }

    /// Partner of `id`, or [`PairTarget::Nil`] when it is free
    #[inline]
    pub fn paired(&self, id: NodeId) -> PairTarget {
        match self.nodes[id.0].paired {
            Some(partner) => PairTarget::Node(partner),
            None => PairTarget::Nil,
        }
    }

    /// Drop every pairing, keeping the adjacency
    pub fn clear_pairs(&mut self) {
        for node in &mut self.nodes {
            node.paired = None;
        }
    }
}

/// Layer index assigned during one breadth-first pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distance(u32);

impl Distance {
    pub const ZERO: Distance = Distance(0);
    pub const INFINITE: Distance = Distance(u32::MAX);

    pub fn is_infinite(self) -> bool {
        self == Self::INFINITE
    }

    /// Next layer; infinity stays infinite
    #[inline]
    pub fn next(self) -> Distance {
        if self.is_infinite() {
            self
        } else {
            Distance(self.0.saturating_add(1).min(u32::MAX - 1))
        }
    }

    pub fn value(self) -> Option<u32> {
        (!self.is_infinite()).then_some(self.0)
    }
}

/// Per-run distance labels, indexed by node with one extra entry for NIL
#[derive(Debug, Clone)]
pub struct Layering {
    distances: Vec<Distance>,
}

impl Layering {
    pub fn new(node_count: usize) -> Self {
        Self {
            distances: vec![Distance::INFINITE; node_count + 1],
        }
    }

    pub fn for_graph(graph: &SlotGraph) -> Self {
        Self::new(graph.len())
    }

    #[inline]
    fn position(&self, target: PairTarget) -> usize {
        match target {
            PairTarget::Node(id) => id.0,
            PairTarget::Nil => self.distances.len() - 1,
        }
    }

    #[inline]
    pub fn get(&self, target: PairTarget) -> Distance {
        self.distances[self.position(target)]
    }

    #[inline]
    pub fn set(&mut self, target: PairTarget, distance: Distance) {
        let position = self.position(target);
        self.distances[position] = distance;
    }

    pub fn nil(&self) -> Distance {
        self.get(PairTarget::Nil)
    }

    pub fn reset(&mut self) {
        self.distances.fill(Distance::INFINITE);
    }
}
