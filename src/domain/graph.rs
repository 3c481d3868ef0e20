use log::trace;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use super::geometry::{is_near, is_on_segment, SEGMENT_SPLIT_TOLERANCE};
use super::models::{Hallway, Point};
use crate::infrastructure::VertexIndex;

/// Per-request vertex graph.
///
/// Nodes are merged hallway endpoints (plus any query point that falls
/// inside a hallway), edges are directed hallway records. Every connection
/// is stored twice, once in each direction.
pub struct VertexGraph {
    graph: DiGraph<Point, Hallway>,
    index: VertexIndex,
}

impl VertexGraph {
    pub fn build(hallways: &[Hallway], origin: Point, destination: Point) -> Self {
        let mut vg = Self {
            graph: DiGraph::with_capacity(hallways.len() * 2, hallways.len() * 2),
            index: VertexIndex::new(),
        };

        for hallway in hallways {
            vg.connect(hallway.start, hallway.end);
        }

        // A query point in the middle of a hallway gets wired to both of its
        // ends. The unsplit hallway edge is left in place.
        for point in [origin, destination] {
            for hallway in hallways {
                if is_on_segment(hallway.start, hallway.end, point, SEGMENT_SPLIT_TOLERANCE)
                    && !is_near(point, hallway.start)
                    && !is_near(point, hallway.end)
                {
                    trace!("splicing {point} into hallway {} -> {}", hallway.start, hallway.end);
                    vg.connect(point, hallway.start);
                    vg.connect(point, hallway.end);
                }
            }
        }

        vg
    }

    fn get_or_create_vertex(&mut self, point: Point) -> NodeIndex {
        if let Some(existing) = self.index.first_near(point) {
            return NodeIndex::new(existing);
        }
        let ix = self.graph.add_node(point);
        self.index.insert(point, ix.index());
        ix
    }

    fn connect(&mut self, p1: Point, p2: Point) {
        let v1 = self.get_or_create_vertex(p1);
        let v2 = self.get_or_create_vertex(p2);
        let hallway = Hallway::new(p1, p2);
        self.graph.add_edge(v1, v2, hallway);
        self.graph.add_edge(v2, v1, hallway.reversed());
    }

    /// First vertex, in creation order, within merge tolerance of `point`.
    pub fn vertex_near(&self, point: Point) -> Option<NodeIndex> {
        self.index.first_near(point).map(NodeIndex::new)
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn point(&self, ix: NodeIndex) -> Point {
        self.graph[ix]
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.graph.node_weights().copied()
    }

    /// Hallways leaving `ix`, with the vertex each one leads to.
    pub fn touching_hallways(
        &self,
        ix: NodeIndex,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, &Hallway)> + '_ {
        self.graph
            .edges(ix)
            .map(|e| (e.id(), e.target(), e.weight()))
    }

    /// The vertex a hallway record was drawn from.
    pub fn hallway_source(&self, edge: EdgeIndex) -> Option<NodeIndex> {
        self.graph.edge_endpoints(edge).map(|(source, _)| source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn shared_endpoints_merge_into_one_vertex() {
        let hallways = [
            Hallway::new(p(0.0, 0.0), p(5.0, 0.0)),
            Hallway::new(p(5.3, 0.2), p(10.0, 0.0)),
        ];
        let graph = VertexGraph::build(&hallways, p(0.0, 0.0), p(10.0, 0.0));
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 4);
        let shared = graph.vertex_near(p(5.0, 0.0)).unwrap();
        assert_eq!(graph.point(shared), p(5.0, 0.0));
        assert_eq!(graph.touching_hallways(shared).count(), 2);
    }

    #[test]
    fn query_point_inside_hallway_is_spliced() {
        let hallways = [Hallway::new(p(0.0, 0.0), p(10.0, 0.0))];
        let graph = VertexGraph::build(&hallways, p(4.0, 0.0), p(10.0, 0.0));
        // Two endpoints plus the spliced origin.
        assert_eq!(graph.vertex_count(), 3);
        // Unsplit twin edges plus two spliced connections.
        assert_eq!(graph.edge_count(), 6);
        let origin = graph.vertex_near(p(4.0, 0.0)).unwrap();
        let targets: Vec<Point> = graph
            .touching_hallways(origin)
            .map(|(_, target, _)| graph.point(target))
            .collect();
        assert!(targets.contains(&p(0.0, 0.0)));
        assert!(targets.contains(&p(10.0, 0.0)));
    }

    #[test]
    fn query_point_near_an_endpoint_is_not_spliced() {
        let hallways = [Hallway::new(p(0.0, 0.0), p(10.0, 0.0))];
        let graph = VertexGraph::build(&hallways, p(0.5, 0.0), p(9.5, 0.0));
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn query_point_off_the_network_adds_nothing() {
        let hallways = [Hallway::new(p(0.0, 0.0), p(10.0, 0.0))];
        let graph = VertexGraph::build(&hallways, p(5.0, 50.0), p(10.0, 0.0));
        assert_eq!(graph.vertex_count(), 2);
        assert!(graph.vertex_near(p(5.0, 50.0)).is_none());
    }

    #[test]
    fn edge_targets_match_first_near_vertex() {
        let hallways = [
            Hallway::new(p(0.0, 0.0), p(5.0, 0.0)),
            Hallway::new(p(5.0, 0.0), p(5.0, 5.0)),
            Hallway::new(p(5.4, 4.6), p(0.0, 5.0)),
        ];
        let graph = VertexGraph::build(&hallways, p(0.0, 0.0), p(0.0, 5.0));
        for ix in graph.graph.node_indices() {
            for (edge, target, hallway) in graph.touching_hallways(ix) {
                assert_eq!(graph.vertex_near(hallway.end), Some(target));
                assert_eq!(graph.vertex_near(hallway.start), graph.hallway_source(edge));
            }
        }
    }
}
