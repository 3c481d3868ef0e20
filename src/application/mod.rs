pub mod map_data;
pub mod navigation;

pub use map_data::{MapData, Venue};
pub use navigation::{landmark_for_location, RouteRequest};
