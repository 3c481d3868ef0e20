use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use hashbrown::HashMap;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::domain::geometry::{distance, is_on_segment};
use crate::domain::{
    find_shortest_path_with_limits, Hallway, Landmark, LandmarkId, MapConfiguration, Point, Route,
    SearchLimits, VertexGraph,
};
use crate::error::{LoadErrorKind, MapDataError};
use crate::infrastructure::{read_map_data, HallwayIndex, RawMapData};

/// Entrances farther than this from their label (5 m in map units) are
/// reported when a venue is processed.
pub const FAR_ENTRANCE_DISTANCE: f64 = 50.0;

/// Whether an entrance sits suspiciously far from where its landmark is drawn.
pub fn is_far_entrance(label_position: Point, entrance_point: Point) -> bool {
    distance(label_position, entrance_point) > FAR_ENTRANCE_DISTANCE
}

/// Processed, immutable geometry for one venue.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MapData {
    configuration: MapConfiguration,
    hallways: Vec<Hallway>,
    landmarks: Vec<Landmark>,
    hallway_index: HallwayIndex,
    name_index: HashMap<String, usize>,
}

impl MapData {
    pub fn empty() -> Self {
        Self::from_parts(MapConfiguration::default(), Vec::new(), Vec::new())
    }

    /// Scales the raw geometry and places every landmark's entrance on the
    /// nearest hallway.
    pub fn process(raw: &RawMapData) -> Self {
        let configuration = raw.configuration;
        let scale = configuration.scale_factor;

        let hallways: Vec<Hallway> = raw
            .path_segments
            .iter()
            .map(|s| Hallway::new(s.start.scaled(scale), s.end.scaled(scale)))
            .collect();
        let hallway_index = HallwayIndex::new(&hallways);

        if hallways.is_empty() && !raw.landmarks.is_empty() {
            warn!(
                "venue has {} landmarks but no hallways; entrances stay at label positions",
                raw.landmarks.len()
            );
        }

        let landmarks = raw
            .landmarks
            .iter()
            .zip(0u64..)
            .map(|(l, id)| {
                let label_position = l.position.scaled(scale);
                let entrance_point = hallway_index
                    .nearest_point(label_position)
                    .map_or(label_position, |(_, p)| p);
                let offset = distance(label_position, entrance_point);
                if is_far_entrance(label_position, entrance_point) {
                    warn!(
                        "landmark '{}' at {label_position} is {offset:.2} units from its entrance {entrance_point}",
                        l.name
                    );
                } else {
                    debug!(
                        "landmark '{}' at {label_position}, entrance {entrance_point} ({offset:.2} away)",
                        l.name
                    );
                }
                Landmark {
                    id: LandmarkId(id),
                    name: l.name.clone(),
                    label_position,
                    entrance_point,
                }
            })
            .collect();

        Self::from_parts_with_index(configuration, hallways, landmarks, hallway_index)
    }

    /// Builds map data from already-scaled hallways and landmarks.
    pub fn from_parts(
        configuration: MapConfiguration,
        hallways: Vec<Hallway>,
        landmarks: Vec<Landmark>,
    ) -> Self {
        let hallway_index = HallwayIndex::new(&hallways);
        Self::from_parts_with_index(configuration, hallways, landmarks, hallway_index)
    }

    fn from_parts_with_index(
        configuration: MapConfiguration,
        hallways: Vec<Hallway>,
        landmarks: Vec<Landmark>,
        hallway_index: HallwayIndex,
    ) -> Self {
        let mut name_index = HashMap::with_capacity(landmarks.len());
        for (i, landmark) in landmarks.iter().enumerate() {
            name_index.entry(landmark.name.clone()).or_insert(i);
        }
        Self {
            configuration,
            hallways,
            landmarks,
            hallway_index,
            name_index,
        }
    }

    pub fn configuration(&self) -> &MapConfiguration {
        &self.configuration
    }

    pub fn hallways(&self) -> &[Hallway] {
        &self.hallways
    }

    /// Landmarks in document order.
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn sorted_landmarks(&self) -> Vec<&Landmark> {
        let mut sorted: Vec<&Landmark> = self.landmarks.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    /// First landmark whose name matches exactly.
    pub fn landmark_named(&self, name: &str) -> Option<&Landmark> {
        self.name_index
            .get(name)
            .and_then(|&i| self.landmarks.get(i))
    }

    /// Whether `point` lies on any hallway within the configured line tolerance.
    pub fn is_point_on_path(&self, point: Point) -> bool {
        let tolerance = self.configuration.line_point_tolerance;
        self.hallway_index
            .candidates_near(point, tolerance)
            .into_iter()
            .filter_map(|i| self.hallways.get(i))
            .any(|h| is_on_segment(h.start, h.end, point, tolerance))
    }

    /// Checks that the lookup indexes agree with the hallway and landmark
    /// lists. Deserialized data is only trusted after this passes.
    pub fn check_indexes(&self) -> Result<(), MapDataError> {
        if !self.hallway_index.matches(&self.hallways) {
            return Err(MapDataError::InvalidData(
                "hallway index does not match the hallway list".to_string(),
            ));
        }
        for (name, &i) in &self.name_index {
            if self.landmarks.iter().position(|l| &l.name == name) != Some(i) {
                return Err(MapDataError::InvalidData(format!(
                    "landmark index entry '{name}' points at landmark {i}"
                )));
            }
        }
        let names_missing = self
            .landmarks
            .iter()
            .any(|l| !self.name_index.contains_key(&l.name));
        if names_missing {
            return Err(MapDataError::InvalidData(
                "landmark index is missing names".to_string(),
            ));
        }
        Ok(())
    }

    pub fn find_shortest_route(&self, from: Point, to: Point) -> Option<Route> {
        self.find_shortest_route_with_limits(from, to, SearchLimits::default())
    }

    pub fn find_shortest_route_with_limits(
        &self,
        from: Point,
        to: Point,
        limits: SearchLimits,
    ) -> Option<Route> {
        let graph = VertexGraph::build(&self.hallways, from, to);
        debug!(
            "route {from} -> {to}: graph has {} vertices and {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        find_shortest_path_with_limits(&graph, from, to, limits)
    }
}

struct VenueState {
    data: Arc<MapData>,
    loaded: bool,
    load_error: Option<LoadErrorKind>,
}

/// Holder for the currently loaded venue.
///
/// Readers take an `Arc` snapshot and keep using it for as long as they need;
/// a reload publishes a whole new snapshot, so a route search never sees a
/// half-rebuilt hallway list.
pub struct Venue {
    state: RwLock<VenueState>,
}

/// An empty venue that has not been loaded yet.
impl Default for Venue {
    fn default() -> Self {
        Self {
            state: RwLock::new(VenueState {
                data: Arc::new(MapData::empty()),
                loaded: false,
                load_error: None,
            }),
        }
    }
}

impl Venue {
    /// A venue holding already-processed data; counts as loaded.
    pub fn new(data: MapData) -> Self {
        let venue = Self::default();
        venue.publish(data, None);
        venue
    }

    /// Loads a venue document. On failure the venue is empty and
    /// [`Venue::load_error`] reports why.
    pub fn load(path: &Path) -> Self {
        let venue = Self::default();
        // The error is recorded in the venue state and logged.
        let _ = venue.reload(path);
        venue
    }

    pub fn reload(&self, path: &Path) -> Result<(), MapDataError> {
        match read_map_data(path) {
            Ok(raw) => {
                let data = MapData::process(&raw);
                info!(
                    "loaded venue {}: {} hallways, {} landmarks",
                    path.display(),
                    data.hallways().len(),
                    data.landmarks().len()
                );
                self.publish(data, None);
                Ok(())
            }
            Err(e) => {
                error!("failed to load map data from {}: {e}", path.display());
                self.publish(MapData::empty(), Some(e.kind()));
                Err(e)
            }
        }
    }

    /// Replaces the current snapshot with already-processed data.
    pub fn replace(&self, data: MapData) {
        self.publish(data, None);
    }

    fn publish(&self, data: MapData, load_error: Option<LoadErrorKind>) {
        let data = Arc::new(data);
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.data = data;
        state.loaded = load_error.is_none();
        state.load_error = load_error;
    }

    pub fn snapshot(&self) -> Arc<MapData> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&state.data)
    }

    /// Whether the current snapshot came from a successful load.
    pub fn is_loaded(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .loaded
    }

    pub fn load_error(&self) -> Option<LoadErrorKind> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .load_error
    }

    pub fn find_shortest_route(&self, from: Point, to: Point) -> Option<Route> {
        self.snapshot().find_shortest_route(from, to)
    }
}
