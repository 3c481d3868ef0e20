pub mod geometry;
pub mod graph;
pub mod models;
pub mod pathfinder;

pub use geometry::{distance, is_near, is_on_segment, nearest_point_on_segment};
pub use graph::VertexGraph;
pub use models::{Hallway, Landmark, LandmarkId, MapConfiguration, Point, Route};
pub use pathfinder::{find_shortest_path, find_shortest_path_with_limits, SearchLimits};
