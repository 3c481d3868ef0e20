use rstar::primitives::GeomWithData;
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

use crate::domain::geometry::{is_near, nearest_point_on_segment, NEAR_POINT_EPSILON};
use crate::domain::{Hallway, Point};

/// A hallway as stored in the R-tree, tagged with its position in the input list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpatialHallway {
    pub p_u: [f64; 2],
    pub p_v: [f64; 2],
    pub index: usize,
}

impl RTreeObject for SpatialHallway {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_points(&[self.p_u, self.p_v])
    }
}

impl PointDistance for SpatialHallway {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let proj = project_point_to_segment(point, self);
        (proj[0] - point[0]).powi(2) + (proj[1] - point[1]).powi(2)
    }
}

pub fn project_point_to_segment(point: &[f64; 2], sh: &SpatialHallway) -> [f64; 2] {
    nearest_point_on_segment(Point::from(*point), Point::from(sh.p_u), Point::from(sh.p_v)).into()
}

/// Spatial index over the venue's hallways.
///
/// Lookups return the same answers as a linear scan in input order; the tree
/// only narrows which hallways get examined.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HallwayIndex {
    rtree: RTree<SpatialHallway>,
}

impl HallwayIndex {
    pub fn new(hallways: &[Hallway]) -> Self {
        let spatial_hallways = hallways
            .iter()
            .enumerate()
            .map(|(index, h)| SpatialHallway {
                p_u: h.start.into(),
                p_v: h.end.into(),
                index,
            })
            .collect();
        Self {
            rtree: RTree::bulk_load(spatial_hallways),
        }
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }

    /// Whether the tree holds exactly `hallways`, each tagged with its position.
    pub fn matches(&self, hallways: &[Hallway]) -> bool {
        self.rtree.size() == hallways.len()
            && self.rtree.iter().all(|sh| {
                hallways.get(sh.index).is_some_and(|h| {
                    sh.p_u == <[f64; 2]>::from(h.start) && sh.p_v == <[f64; 2]>::from(h.end)
                })
            })
    }

    /// Indices of hallways whose bounding box, grown by `tolerance`, contains `point`.
    /// Returned in input order.
    pub fn candidates_near(&self, point: Point, tolerance: f64) -> Vec<usize> {
        let bound_box = AABB::from_corners(
            [point.x - tolerance, point.y - tolerance],
            [point.x + tolerance, point.y + tolerance],
        );
        let mut candidates: Vec<usize> = self
            .rtree
            .locate_in_envelope_intersecting(&bound_box)
            .map(|sh| sh.index)
            .collect();
        candidates.sort_unstable();
        candidates
    }

    /// Closest point on any hallway to `point`, with the index of that hallway.
    ///
    /// On equal distances the hallway that came first in the input wins.
    pub fn nearest_point(&self, point: Point) -> Option<(usize, Point)> {
        let query: [f64; 2] = point.into();
        let mut best: Option<(usize, Point, f64)> = None;
        for (sh, d2) in self.rtree.nearest_neighbor_iter_with_distance_2(&query) {
            let dist = d2.sqrt();
            if let Some((best_index, _, best_dist)) = best {
                if dist > best_dist {
                    break;
                }
                if sh.index > best_index {
                    continue;
                }
            }
            best = Some((sh.index, Point::from(project_point_to_segment(&query, sh)), dist));
        }
        best.map(|(index, p, _)| (index, p))
    }
}

/// Spatial lookup of graph vertices by position, used for vertex merging.
#[derive(Default)]
pub struct VertexIndex {
    rtree: RTree<GeomWithData<[f64; 2], usize>>,
}

impl VertexIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, point: Point, index: usize) {
        self.rtree.insert(GeomWithData::new(point.into(), index));
    }

    /// The earliest-inserted vertex within the merge tolerance of `point`.
    pub fn first_near(&self, point: Point) -> Option<usize> {
        let bound_box = AABB::from_corners(
            [point.x - NEAR_POINT_EPSILON, point.y - NEAR_POINT_EPSILON],
            [point.x + NEAR_POINT_EPSILON, point.y + NEAR_POINT_EPSILON],
        );
        self.rtree
            .locate_in_envelope(&bound_box)
            .filter(|v| is_near(Point::from(*v.geom()), point))
            .map(|v| v.data)
            .min()
    }
}
