pub mod cast;
pub mod dataset;
pub mod file_type;

pub use cast::CastKey;
pub use dataset::{CastDataset, ObservationArrays, ProfileArrays};
pub use file_type::{FileSchema, FileType};
