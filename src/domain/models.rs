use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::distance;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Sentinel for "no position": a landmark with this entrance point is not navigable.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Self { x: p[0], y: p[1] }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// A straight walkable segment. Stored directionally; connectivity in the
/// vertex graph comes from inserting both `start -> end` and `end -> start`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Hallway {
    pub start: Point,
    pub end: Point,
}

impl Hallway {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        distance(self.start, self.end)
    }

    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LandmarkId(pub u64);

/// A named point of interest.
///
/// `label_position` is where the landmark sits on the map, `entrance_point`
/// is the closest point on the hallway network and is what routes start and
/// end at. Equality is by `id`; names are only for display and lookup.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Landmark {
    pub id: LandmarkId,
    pub name: String,
    pub label_position: Point,
    pub entrance_point: Point,
}

impl Landmark {
    /// An unselected landmark, as shown in pickers before a choice is made.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            id: LandmarkId(u64::MAX),
            name: name.into(),
            label_position: Point::ZERO,
            entrance_point: Point::ZERO,
        }
    }

    pub fn is_navigable(&self) -> bool {
        self.entrance_point != Point::ZERO
    }
}

impl PartialEq for Landmark {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Landmark {}

impl std::hash::Hash for Landmark {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapConfiguration {
    pub scale_factor: f64,
    /// Used when placing landmark entrance points.
    pub near_point_tolerance: f64,
    /// Used by on-path queries against the hallway network.
    pub line_point_tolerance: f64,
}

impl Default for MapConfiguration {
    fn default() -> Self {
        Self {
            scale_factor: 0.25,
            near_point_tolerance: 1.0,
            line_point_tolerance: 3.0,
        }
    }
}

/// Map units per meter.
const UNITS_PER_METER: f64 = 10.0;
/// Map units covered per second of walking.
const UNITS_PER_SECOND: f64 = 14.0;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Route {
    pub distance: f64,
    pub path: Vec<Point>, // origin first, destination last
}

impl Route {
    pub fn distance_in_meters(&self) -> f64 {
        self.distance / UNITS_PER_METER
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn walking_seconds(&self) -> u64 {
        (self.distance / UNITS_PER_SECOND) as u64
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1} m, {} s",
            self.distance_in_meters(),
            self.walking_seconds()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hallway_length_and_reverse() {
        let h = Hallway::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert_eq!(h.length(), 5.0);
        let r = h.reversed();
        assert_eq!(r.start, h.end);
        assert_eq!(r.end, h.start);
        assert_eq!(r.length(), 5.0);
    }

    #[test]
    fn landmark_equality_is_by_id() {
        let a = Landmark {
            id: LandmarkId(1),
            name: "Pantry".to_string(),
            label_position: Point::new(1.0, 1.0),
            entrance_point: Point::new(1.0, 0.0),
        };
        let mut b = a.clone();
        b.name = "Lobby".to_string();
        assert_eq!(a, b);
        b.id = LandmarkId(2);
        b.name = "Pantry".to_string();
        assert_ne!(a, b);
    }

    #[test]
    fn placeholder_is_not_navigable() {
        assert!(!Landmark::placeholder("Select destination").is_navigable());
    }

    #[test]
    fn default_configuration() {
        let config = MapConfiguration::default();
        assert_eq!(config.scale_factor, 0.25);
        assert_eq!(config.near_point_tolerance, 1.0);
        assert_eq!(config.line_point_tolerance, 3.0);
    }

    #[test]
    fn configuration_reads_camel_case() {
        let config: MapConfiguration = serde_json::from_value(serde_json::json!({
            "scaleFactor": 0.5,
            "nearPointTolerance": 2.0,
            "linePointTolerance": 4.0
        }))
        .unwrap();
        assert_eq!(config.scale_factor, 0.5);
        assert_eq!(config.line_point_tolerance, 4.0);
    }

    #[test]
    fn route_unit_conversions() {
        let route = Route {
            distance: 145.0,
            path: vec![Point::new(0.0, 0.0), Point::new(145.0, 0.0)],
        };
        assert_eq!(route.distance_in_meters(), 14.5);
        assert_eq!(route.walking_seconds(), 10);
        assert_eq!(route.to_string(), "14.5 m, 10 s");
    }
}
