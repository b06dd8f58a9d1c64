use std::collections::VecDeque;

use crate::core::error::MatchingError;
use crate::core::graph::{Distance, Layering, NodeId, PairTarget, SlotGraph};
use crate::models::{AvailabilitySlot, RequestSlot};

/// Tunables for a [`Matcher`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MatcherOptions {
    /// Re-run the layering pass after termination and log if the matching
    /// is not maximum
    pub verify_maximum: bool,
}

/// Outcome of one matching run
///
/// Owns the graph built for the run, so partners can be looked up after the
/// fact. Only requests that found a volunteer are listed as matched.
#[derive(Debug, Clone)]
pub struct Matching {
    graph: SlotGraph,
    matched: Vec<NodeId>,
    phases: usize,
    dropped: usize,
}

impl Matching {
    fn new(graph: SlotGraph, phases: usize, dropped: usize) -> Self {
        let matched = graph
            .request_ids()
            .iter()
            .copied()
            .filter(|&id| graph.is_paired(id))
            .collect();

        Self {
            graph,
            matched,
            phases,
            dropped,
        }
    }

    /// Number of matched requests
    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    /// Matched request nodes, in input order
    pub fn matched_requests(&self) -> &[NodeId] {
        &self.matched
    }

    /// Every matched request with the volunteer slot serving it
    pub fn pairs(&self) -> impl Iterator<Item = (&RequestSlot, &AvailabilitySlot)> + '_ {
        self.matched.iter().filter_map(move |&id| {
            let request = self.graph.request(id)?;
            let partner = self.partner_of(id)?;
            Some((request, partner))
        })
    }

    /// Volunteer slot paired with the given request node, if any
    pub fn partner_of(&self, request: NodeId) -> Option<&AvailabilitySlot> {
        self.graph
            .paired(request)
            .node()
            .and_then(|partner| self.graph.availability(partner))
    }

    pub fn unmatched_requests(&self) -> impl Iterator<Item = &RequestSlot> + '_ {
        self.graph
            .request_ids()
            .iter()
            .filter(move |&&id| !self.graph.is_paired(id))
            .filter_map(move |&id| self.graph.request(id))
    }

    pub fn unmatched_availabilities(&self) -> impl Iterator<Item = &AvailabilitySlot> + '_ {
        self.graph
            .availability_ids()
            .iter()
            .filter(move |&&id| !self.graph.is_paired(id))
            .filter_map(move |&id| self.graph.availability(id))
    }

    /// Number of layering passes that found an augmenting path
    pub fn phases(&self) -> usize {
        self.phases
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Absent entries dropped from the input collections
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn graph(&self) -> &SlotGraph {
        &self.graph
    }

    /// Whether no augmenting path is left in the final graph
    pub fn is_maximum(&self) -> bool {
        let mut layering = Layering::for_graph(&self.graph);
        !build_layers(&self.graph, &mut layering)
    }
}

/// Hopcroft-Karp matcher for request and availability slots
///
/// A request can be served by an availability slot that contains it. The
/// matcher returns a maximum one-to-one pairing under that relation.
///
/// # Tie-breaking
/// Requests are layered and augmented in input order, and each request tries
/// volunteer slots in input order. The size of the result never depends on
/// the order; which volunteer serves which request does.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    options: MatcherOptions,
}

impl Matcher {
    pub fn new(options: MatcherOptions) -> Self {
        Self { options }
    }

    pub fn with_default_options() -> Self {
        Self::default()
    }

    pub fn options(&self) -> MatcherOptions {
        self.options
    }

    /// Match slots coming from an upstream collection that may be absent or
    /// contain holes
    ///
    /// # Errors
    /// [`MatchingError::InvalidArgument`] if either collection is `None`.
    /// `None` entries inside a collection are skipped.
    pub fn match_slots(
        &self,
        requests: Option<&[Option<RequestSlot>]>,
        availabilities: Option<&[Option<AvailabilitySlot>]>,
    ) -> Result<Matching, MatchingError> {
        let requests = requests.ok_or(MatchingError::InvalidArgument("request slots are missing"))?;
        let availabilities = availabilities
            .ok_or(MatchingError::InvalidArgument("availability slots are missing"))?;

        let present_requests: Vec<RequestSlot> = requests.iter().flatten().cloned().collect();
        let present_availabilities: Vec<AvailabilitySlot> =
            availabilities.iter().flatten().cloned().collect();

        let dropped = (requests.len() - present_requests.len())
            + (availabilities.len() - present_availabilities.len());
        if dropped > 0 {
            tracing::debug!("Dropped {} absent slots before matching", dropped);
        }

        Ok(self.run(present_requests, present_availabilities, dropped))
    }

    /// Match two already-normalised slot lists
    pub fn match_all(
        &self,
        requests: &[RequestSlot],
        availabilities: &[AvailabilitySlot],
    ) -> Matching {
        self.run(requests.to_vec(), availabilities.to_vec(), 0)
    }

    fn run(
        &self,
        requests: Vec<RequestSlot>,
        availabilities: Vec<AvailabilitySlot>,
        dropped: usize,
    ) -> Matching {
        let request_count = requests.len();
        let availability_count = availabilities.len();

        let mut graph = build_graph(requests, availabilities);
        tracing::debug!(
            "Built slot graph: {} requests, {} availabilities, {} edges",
            request_count,
            availability_count,
            graph.edge_count()
        );

        let mut layering = Layering::for_graph(&graph);
        let request_ids = graph.request_ids().to_vec();
        let mut phases = 0;

        while build_layers(&graph, &mut layering) {
            phases += 1;
            let mut augmented = 0;

            for &request in &request_ids {
                if !graph.is_paired(request)
                    && augment(&mut graph, &mut layering, request)
                {
                    augmented += 1;
                }
            }

            tracing::debug!(
                "Phase {}: {} augmenting paths of length {:?}",
                phases,
                augmented,
                layering.nil().value()
            );

            // A successful layering always yields at least one path
            if augmented == 0 {
                break;
            }
        }

        let matching = Matching::new(graph, phases, dropped);

        if self.options.verify_maximum && !matching.is_maximum() {
            tracing::error!(
                "Matching of size {} still has an augmenting path",
                matching.len()
            );
        }

        tracing::info!(
            "Matched {} of {} requests against {} availabilities in {} phases",
            matching.len(),
            request_count,
            availability_count,
            phases
        );

        matching
    }
}

/// Push all slots into a fresh graph and connect every availability to the
/// requests it contains
///
/// This is the N*M part of a run. Further constraints on who may serve whom
/// belong next to the containment check.
fn build_graph(requests: Vec<RequestSlot>, availabilities: Vec<AvailabilitySlot>) -> SlotGraph {
    let mut graph = SlotGraph::with_capacity(requests.len(), availabilities.len());

    let request_ids: Vec<NodeId> = requests
        .into_iter()
        .map(|request| graph.add_request(request))
        .collect();
    let availability_ids: Vec<NodeId> = availabilities
        .into_iter()
        .map(|availability| graph.add_availability(availability))
        .collect();

    for &availability in &availability_ids {
        for &request in &request_ids {
            if graph.slot(availability).contains(graph.slot(request)) {
                graph.add_edge(request, availability);
            }
        }
    }

    graph
}

/// Breadth-first pass from every free request
///
/// Returns true if some free request reaches NIL, i.e. an augmenting path
/// exists. `layering.nil()` is then the length of the shortest one.
fn build_layers(graph: &SlotGraph, layering: &mut Layering) -> bool {
    layering.reset();
    let mut queue = VecDeque::new();

    for &request in graph.request_ids() {
        if !graph.is_paired(request) {
            layering.set(PairTarget::Node(request), Distance::ZERO);
            queue.push_back(request);
        }
    }

    while let Some(node) = queue.pop_front() {
        let distance = layering.get(PairTarget::Node(node));
        if distance >= layering.nil() {
            continue;
        }

        for &neighbour in graph.neighbours(node) {
            let next = graph.paired(neighbour);
            if layering.get(next).is_infinite() {
                layering.set(next, distance.next());
                if let PairTarget::Node(next) = next {
                    queue.push_back(next);
                }
            }
        }
    }

    !layering.nil().is_infinite()
}

/// Depth-first search for a shortest augmenting path starting at `root`
///
/// The path is kept on an explicit stack of (request, next neighbour) frames,
/// so its length is not bounded by the thread's stack. On success every
/// request on the path is paired with the neighbour it stepped through. A
/// request that leads nowhere is marked infinite so the rest of the phase
/// skips it.
fn augment(graph: &mut SlotGraph, layering: &mut Layering, root: NodeId) -> bool {
    if layering.get(PairTarget::Node(root)).is_infinite() {
        return false;
    }

    let mut path: Vec<(NodeId, usize)> = vec![(root, 0)];

    while let Some(frame) = path.last_mut() {
        let (node, cursor) = *frame;
        let neighbours = graph.neighbours(node);

        if cursor == neighbours.len() {
            layering.set(PairTarget::Node(node), Distance::INFINITE);
            path.pop();
            continue;
        }

        let neighbour = neighbours[cursor];
        frame.1 += 1;

        let next = graph.paired(neighbour);
        if layering.get(next) != layering.get(PairTarget::Node(node)).next() {
            continue;
        }

        match next {
            PairTarget::Nil => {
                for &(request, tried) in path.iter().rev() {
                    let partner = graph.neighbours(request)[tried - 1];
                    graph.pair(request, partner);
                }
                return true;
            }
            PairTarget::Node(next) => path.push((next, 0)),
        }
    }

    false
}
