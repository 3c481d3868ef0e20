pub mod persistence;
pub mod spatial;

pub use persistence::{
    load_snapshot, parse_map_data, read_map_data, save_snapshot, RawLandmark, RawMapData,
    RawSegment,
};
pub use spatial::{HallwayIndex, SpatialHallway, VertexIndex};
