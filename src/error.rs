use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported input extension '{0}' (expected .txt or .csv)")]
    UnsupportedExtension(String),

    #[error("Missing required column '{column}' for file type '{file_type}'")]
    MissingColumn { column: String, file_type: String },

    #[error("Invalid numeric value '{value}' in column '{column}'")]
    InvalidNumber { column: String, value: String },

    #[error("Invalid date component '{value}' in column '{column}'")]
    DateParse { column: String, value: String },

    #[error("Date out of range: {year}-{month}-{day} {hour}:{minute}")]
    DateOutOfRange {
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
    },

    #[error("Cast {cruise}/{station} has no usable depth reading")]
    EmptyDepthSeries { cruise: String, station: String },

    #[error("Input file produced no casts: {0}")]
    EmptyInput(String),

    #[error("Dimension mismatch: variable '{variable}' has length {actual}, expected {expected}")]
    DimensionMismatch {
        variable: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid input path: {0}")]
    InvalidPath(String),

    #[error("NetCDF write error: {0}")]
    Write(String),
}
