use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, trace};
use petgraph::graph::{EdgeIndex, NodeIndex};

use super::geometry::distance;
use super::graph::VertexGraph;
use super::models::{Point, Route};

/// Bounds on how much work a single search may do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop after expanding this many vertices and report no route.
    pub max_expansions: Option<usize>,
}

#[derive(Copy, Clone, PartialEq)]
struct State {
    f_cost: f64,
    distance: f64,
    node: NodeIndex,
}

impl Eq for State {}

// Min-heap on f_cost
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost
            .total_cmp(&self.f_cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Search bookkeeping for one call, indexed parallel to the graph's vertices.
struct SearchState {
    distance: Vec<f64>,
    heuristic: Vec<f64>,
    visited: Vec<bool>,
    previous_hallway: Vec<Option<EdgeIndex>>,
}

impl SearchState {
    fn new(graph: &VertexGraph, target: Point) -> Self {
        let n = graph.vertex_count();
        Self {
            distance: vec![f64::INFINITY; n],
            heuristic: graph.points().map(|p| distance(p, target)).collect(),
            visited: vec![false; n],
            previous_hallway: vec![None; n],
        }
    }

    fn f_cost(&self, ix: NodeIndex) -> f64 {
        self.distance[ix.index()] + self.heuristic[ix.index()]
    }
}

pub fn find_shortest_path(graph: &VertexGraph, origin: Point, destination: Point) -> Option<Route> {
    find_shortest_path_with_limits(graph, origin, destination, SearchLimits::default())
}

/// A* from the vertex at `origin` to the vertex at `destination`.
///
/// Returns `None` when either point does not resolve to a vertex, when the
/// two are not connected, or when `limits` cut the search short. Ties on
/// f-cost are broken by heap order.
pub fn find_shortest_path_with_limits(
    graph: &VertexGraph,
    origin: Point,
    destination: Point,
    limits: SearchLimits,
) -> Option<Route> {
    let start = graph.vertex_near(origin)?;
    let end = graph.vertex_near(destination)?;

    let mut state = SearchState::new(graph, graph.point(end));
    state.distance[start.index()] = 0.0;

    let mut open = BinaryHeap::new();
    open.push(State {
        f_cost: state.f_cost(start),
        distance: 0.0,
        node: start,
    });
    let mut expansions = 0usize;

    while let Some(State { distance: g, node, .. }) = open.pop() {
        let current = node.index();
        // Stale entries stay in the heap after a better path is found
        if state.visited[current] || g > state.distance[current] {
            continue;
        }

        if node == end {
            debug!(
                "route found after {expansions} expansions, distance {:.2}",
                state.distance[current]
            );
            return Some(Route {
                distance: state.distance[current],
                path: reconstruct_path(graph, &state, start, end),
            });
        }

        state.visited[current] = true;
        expansions += 1;
        if limits.max_expansions.is_some_and(|max| expansions > max) {
            debug!("search abandoned after {expansions} expansions");
            return None;
        }

        for (edge, neighbor, hallway) in graph.touching_hallways(node) {
            let next = neighbor.index();
            if state.visited[next] {
                continue;
            }
            let tentative = state.distance[current] + hallway.length();
            if tentative < state.distance[next] {
                trace!("relaxing {} via {}: {tentative:.2}", graph.point(neighbor), graph.point(node));
                state.distance[next] = tentative;
                state.previous_hallway[next] = Some(edge);
                open.push(State {
                    f_cost: state.f_cost(neighbor),
                    distance: tentative,
                    node: neighbor,
                });
            }
        }
    }

    debug!("no route after {expansions} expansions");
    None
}

fn reconstruct_path(
    graph: &VertexGraph,
    state: &SearchState,
    start: NodeIndex,
    end: NodeIndex,
) -> Vec<Point> {
    let mut path = vec![graph.point(end)];
    let mut current = end;
    while current != start {
        let Some(prev) = state.previous_hallway[current.index()]
            .and_then(|edge| graph.hallway_source(edge))
        else {
            break;
        };
        path.push(graph.point(prev));
        current = prev;
    }
    path.reverse();
    path
}
