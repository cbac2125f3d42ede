pub mod chunked_reader;

pub use chunked_reader::{ChunkedRowReader, ColumnMap, RowChunk};
