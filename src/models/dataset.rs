use crate::models::FileType;
use serde::{Deserialize, Serialize};

/// Profile-dimension arrays, one entry per cast in first-seen order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileArrays {
    pub cruise_ids: Vec<String>,
    pub station_numbers: Vec<String>,
    pub latitudes: Vec<f64>,
    pub longitudes: Vec<f64>,
    pub datestrs: Vec<String>,
    pub timestamps: Vec<f64>,
    /// Empty for XBT extracts.
    pub bottom_depths: Vec<f64>,
    pub shallowest_depths: Vec<f64>,
    pub deepest_depths: Vec<f64>,
}

impl ProfileArrays {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Observation-dimension arrays, one entry per source row. `parent_index`
/// is the only link back to the profile arrays.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservationArrays {
    pub depths: Vec<f64>,
    pub temperatures: Vec<f64>,
    /// Empty for XBT extracts.
    pub pressures: Vec<f64>,
    /// Empty for XBT extracts.
    pub salinities: Vec<f64>,
    pub parent_index: Vec<i32>,
}

impl ObservationArrays {
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }
}

/// The fully accumulated two-axis dataset produced by aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastDataset {
    pub file_type: FileType,
    pub profiles: ProfileArrays,
    pub observations: ObservationArrays,
}

impl CastDataset {
    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    pub fn observation_count(&self) -> usize {
        self.observations.len()
    }
}
