use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::application::MapData;
use crate::domain::{MapConfiguration, Point};
use crate::error::MapDataError;

/// Venue document as stored on disk, coordinates unscaled.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RawMapData {
    pub configuration: MapConfiguration,
    pub path_segments: Vec<RawSegment>,
    pub landmarks: Vec<RawLandmark>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct RawSegment {
    pub start: Point,
    pub end: Point,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RawLandmark {
    pub name: String,
    pub position: Point,
}

impl RawMapData {
    /// Checks what serde cannot: finite coordinates, a usable scale factor
    /// and non-negative tolerances.
    pub fn validate(&self) -> Result<(), MapDataError> {
        let config = &self.configuration;
        if !config.scale_factor.is_finite() || config.scale_factor <= 0.0 {
            return Err(MapDataError::InvalidData(format!(
                "scale factor must be positive, got {}",
                config.scale_factor
            )));
        }
        for (name, value) in [
            ("nearPointTolerance", config.near_point_tolerance),
            ("linePointTolerance", config.line_point_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MapDataError::InvalidData(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        for (i, segment) in self.path_segments.iter().enumerate() {
            if !segment.start.is_finite() || !segment.end.is_finite() {
                return Err(MapDataError::InvalidData(format!(
                    "path segment {i} has a non-finite coordinate"
                )));
            }
        }
        for (i, landmark) in self.landmarks.iter().enumerate() {
            if landmark.name.trim().is_empty() {
                return Err(MapDataError::InvalidData(format!("landmark {i} has no name")));
            }
            if !landmark.position.is_finite() {
                return Err(MapDataError::InvalidData(format!(
                    "landmark '{}' has a non-finite position",
                    landmark.name
                )));
            }
        }
        Ok(())
    }
}

pub fn parse_map_data(json: &str) -> Result<RawMapData, MapDataError> {
    let data: RawMapData = serde_json::from_str(json)?;
    data.validate()?;
    Ok(data)
}

pub fn read_map_data(path: &Path) -> Result<RawMapData, MapDataError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => MapDataError::NotFound(path.to_path_buf()),
        _ => MapDataError::Io(e),
    })?;
    let reader = BufReader::new(file);
    let data: RawMapData = serde_json::from_reader(reader)?;
    data.validate()?;
    Ok(data)
}

pub fn save_snapshot(data: &MapData, path: &Path) -> Result<(), MapDataError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, data)?;
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<MapData, MapDataError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => MapDataError::NotFound(path.to_path_buf()),
        _ => MapDataError::Io(e),
    })?;
    let reader = BufReader::new(file);
    let data: MapData = bincode::deserialize_from(reader)?;
    data.check_indexes()?;
    Ok(data)
}
