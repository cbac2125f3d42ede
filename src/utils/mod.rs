pub mod constants;
pub mod filename;
pub mod progress;

pub use filename::{dataset_name, output_file_name};
pub use progress::ProgressReporter;
