//! Indoor pathfinding for venue maps.
//!
//! Hallway segments and landmarks are loaded once per venue into an immutable
//! [`MapData`] snapshot. Each route request builds a transient vertex graph
//! from the hallways and runs an A* search over it.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::{MapData, RouteRequest, Venue};
pub use domain::{Hallway, Landmark, LandmarkId, MapConfiguration, Point, Route};
pub use error::{LoadErrorKind, MapDataError, NavigationError};
