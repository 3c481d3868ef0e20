use log::info;

use super::map_data::MapData;
use crate::domain::{Landmark, Route};
use crate::error::NavigationError;

/// A route request between two selected landmarks.
#[derive(Clone, Debug)]
pub struct RouteRequest {
    pub starting_point: Landmark,
    pub destination: Landmark,
}

impl Default for RouteRequest {
    fn default() -> Self {
        Self {
            starting_point: Landmark::placeholder("Select starting point"),
            destination: Landmark::placeholder("Select destination"),
        }
    }
}

impl RouteRequest {
    pub fn new(starting_point: Landmark, destination: Landmark) -> Self {
        Self {
            starting_point,
            destination,
        }
    }

    /// Both ends have a real entrance point.
    pub fn has_valid_selection(&self) -> bool {
        self.starting_point.is_navigable() && self.destination.is_navigable()
    }

    pub fn can_find_route(&self) -> bool {
        self.validate().is_ok()
    }

    // Same-location check compares names, not ids.
    pub fn validate(&self) -> Result<(), NavigationError> {
        if !self.has_valid_selection() {
            return Err(NavigationError::MissingSelection);
        }
        if self.starting_point.name == self.destination.name {
            return Err(NavigationError::SameLocation);
        }
        Ok(())
    }
}

impl MapData {
    /// Validates the request and searches between the two entrance points.
    ///
    /// `Ok(None)` means the request was fine but the landmarks are not connected.
    pub fn route_between(&self, request: &RouteRequest) -> Result<Option<Route>, NavigationError> {
        request.validate()?;
        let route = self.find_shortest_route(
            request.starting_point.entrance_point,
            request.destination.entrance_point,
        );
        match &route {
            Some(r) => info!(
                "route {} -> {}: {r}",
                request.starting_point.name, request.destination.name
            ),
            None => info!(
                "no route between {} and {}",
                request.starting_point.name, request.destination.name
            ),
        }
        Ok(route)
    }
}

/// The landmark a booth's location name refers to.
pub fn landmark_for_location<'a>(map: &'a MapData, loc_name: &str) -> Option<&'a Landmark> {
    map.landmark_named(loc_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Hallway, LandmarkId, MapConfiguration, Point};

    fn landmark(id: u64, name: &str, entrance: Point) -> Landmark {
        Landmark {
            id: LandmarkId(id),
            name: name.to_string(),
            label_position: entrance,
            entrance_point: entrance,
        }
    }

    fn map() -> MapData {
        MapData::from_parts(
            MapConfiguration::default(),
            vec![
                Hallway::new(Point::new(10.0, 10.0), Point::new(30.0, 10.0)),
                Hallway::new(Point::new(30.0, 10.0), Point::new(30.0, 40.0)),
                Hallway::new(Point::new(100.0, 100.0), Point::new(120.0, 100.0)),
            ],
            vec![
                landmark(0, "Pantry", Point::new(20.0, 10.0)),
                landmark(1, "Stage", Point::new(30.0, 40.0)),
                landmark(2, "Annex", Point::new(110.0, 100.0)),
            ],
        )
    }

    #[test]
    fn default_request_is_missing_selection() {
        let request = RouteRequest::default();
        assert!(!request.has_valid_selection());
        assert_eq!(request.validate(), Err(NavigationError::MissingSelection));
    }

    #[test]
    fn same_name_is_rejected() {
        let a = landmark(0, "Pantry", Point::new(20.0, 10.0));
        let b = landmark(7, "Pantry", Point::new(30.0, 40.0));
        let request = RouteRequest::new(a, b);
        assert!(request.has_valid_selection());
        assert!(!request.can_find_route());
        assert_eq!(request.validate(), Err(NavigationError::SameLocation));
    }

    #[test]
    fn routes_between_selected_landmarks() {
        let map = map();
        let request = RouteRequest::new(
            map.landmark_named("Pantry").unwrap().clone(),
            map.landmark_named("Stage").unwrap().clone(),
        );
        let route = map.route_between(&request).unwrap().unwrap();
        assert_eq!(route.distance, 40.0);
        assert_eq!(
            route.path,
            vec![Point::new(20.0, 10.0), Point::new(30.0, 10.0), Point::new(30.0, 40.0)]
        );
    }

    #[test]
    fn unconnected_landmarks_are_not_an_error() {
        let map = map();
        let request = RouteRequest::new(
            map.landmark_named("Pantry").unwrap().clone(),
            map.landmark_named("Annex").unwrap().clone(),
        );
        assert_eq!(map.route_between(&request), Ok(None));
    }

    #[test]
    fn booth_location_resolves_by_name() {
        let map = map();
        assert_eq!(landmark_for_location(&map, "Stage").map(|l| l.id), Some(LandmarkId(1)));
        assert!(landmark_for_location(&map, "Hall 9").is_none());
    }
}
