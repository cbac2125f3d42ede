use crate::error::{ProcessingError, Result};
use crate::models::FileType;
use crate::utils::constants::*;
use csv::StringRecord;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Source column positions resolved once from the header row against the
/// schema of the selected file type. Optional fields are present for
/// bottle/CTD extracts and `None` for XBT.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    pub cruise: usize,
    pub station: usize,
    pub year: usize,
    pub month: usize,
    pub day: usize,
    pub hour: usize,
    pub minute: usize,
    pub longitude: usize,
    pub latitude: usize,
    pub bottom_depth: Option<usize>,
    pub depth: usize,
    pub temperature: usize,
    pub pressure: Option<usize>,
    pub salinity: Option<usize>,
}

impl ColumnMap {
    pub fn resolve(header: &StringRecord, file_type: FileType) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            header
                .iter()
                .position(|field| field.trim() == name)
                .ok_or_else(|| ProcessingError::MissingColumn {
                    column: name.to_string(),
                    file_type: file_type.tag().to_string(),
                })
        };

        let schema = file_type.schema();
        Ok(Self {
            cruise: find(COL_CRUISE)?,
            station: find(COL_STATION)?,
            year: find(COL_YEAR)?,
            month: find(COL_MONTH)?,
            day: find(COL_DAY)?,
            hour: find(COL_HOUR)?,
            minute: find(COL_MINUTE)?,
            longitude: find(COL_LONGITUDE)?,
            latitude: find(COL_LATITUDE)?,
            bottom_depth: if schema.has_bottom_depth {
                Some(find(COL_BOTTOM_DEPTH)?)
            } else {
                None
            },
            depth: find(COL_DEPTH)?,
            temperature: find(COL_TEMPERATURE)?,
            pressure: if schema.has_pressure_salinity {
                Some(find(COL_PRESSURE)?)
            } else {
                None
            },
            salinity: if schema.has_pressure_salinity {
                Some(find(COL_SALINITY)?)
            } else {
                None
            },
        })
    }
}

/// One batch of source rows, at most `chunk_size` long, sharing the
/// reader's resolved column positions.
#[derive(Debug, Clone)]
pub struct RowChunk {
    pub columns: Arc<ColumnMap>,
    pub rows: Vec<StringRecord>,
}

impl RowChunk {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Incremental reader over a delimited cast extract.
///
/// The delimiter follows the extension (`.txt` tab, `.csv` comma) and rows
/// are yielded as fixed-size chunks of verbatim string fields, preserving
/// input order. The sequence is lazy, finite and non-restartable; a parse
/// failure ends it with the error.
#[derive(Debug)]
pub struct ChunkedRowReader {
    reader: csv::Reader<File>,
    columns: Arc<ColumnMap>,
    chunk_size: usize,
    chunks_read: usize,
    done: bool,
}

impl ChunkedRowReader {
    pub fn open(path: &Path, file_type: FileType) -> Result<Self> {
        Self::with_chunk_size(path, file_type, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(path: &Path, file_type: FileType, chunk_size: usize) -> Result<Self> {
        let delimiter = delimiter_for(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_path(path)?;

        let header = reader.headers()?.clone();
        let columns = Arc::new(ColumnMap::resolve(&header, file_type)?);

        Ok(Self {
            reader,
            columns,
            chunk_size: chunk_size.max(1),
            chunks_read: 0,
            done: false,
        })
    }

    pub fn columns(&self) -> Arc<ColumnMap> {
        Arc::clone(&self.columns)
    }
}

impl Iterator for ChunkedRowReader {
    type Item = Result<RowChunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut rows = Vec::new();
        let mut record = StringRecord::new();

        while rows.len() < self.chunk_size {
            match self.reader.read_record(&mut record) {
                Ok(true) => rows.push(record.clone()),
                Ok(false) => {
                    self.done = true;
                    break;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }

        if rows.is_empty() {
            return None;
        }

        self.chunks_read += 1;
        debug!(chunk = self.chunks_read, rows = rows.len(), "read chunk");

        Some(Ok(RowChunk {
            columns: Arc::clone(&self.columns),
            rows,
        }))
    }
}

fn delimiter_for(path: &Path) -> Result<u8> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match extension.as_str() {
        "txt" => Ok(b'\t'),
        "csv" => Ok(b','),
        other => Err(ProcessingError::UnsupportedExtension(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const XBT_HEADER: &str =
        "Cruise\tStation\tYear\tMonth\tDay\tHour\tMinute\tLongitude [degrees_east]\tLatitude [degrees_north]\tDepth [m]\tTemperature [degC]";

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, "{}", contents).unwrap();
        path
    }

    fn xbt_row(station: &str, depth: &str, temp: &str) -> String {
        format!("C1\t{station}\t2014\t7\t3\t10\t30\t-15.25\t60.5\t{depth}\t{temp}")
    }

    #[test]
    fn test_chunking_preserves_order_and_sizes() {
        let dir = TempDir::new().unwrap();
        let mut contents = format!("{}\n", XBT_HEADER);
        for i in 0..5 {
            contents.push_str(&xbt_row("1", &i.to_string(), "4.2"));
            contents.push('\n');
        }
        let path = write_file(&dir, "extract.txt", &contents);

        let reader = ChunkedRowReader::with_chunk_size(&path, FileType::Xbt, 2).unwrap();
        let chunks: Vec<RowChunk> = reader.map(|c| c.unwrap()).collect();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 2);
        assert_eq!(chunks[1].len(), 2);
        assert_eq!(chunks[2].len(), 1);

        let depth_col = chunks[0].columns.depth;
        let depths: Vec<&str> = chunks
            .iter()
            .flat_map(|c| c.rows.iter().map(|r| r.get(depth_col).unwrap()))
            .collect();
        assert_eq!(depths, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_comma_delimited_input() {
        let dir = TempDir::new().unwrap();
        let contents = format!(
            "{}\n{}\n",
            XBT_HEADER.replace('\t', ","),
            xbt_row("1", "10", "4.2").replace('\t', ",")
        );
        let path = write_file(&dir, "extract.csv", &contents);

        let mut reader = ChunkedRowReader::open(&path, FileType::Xbt).unwrap();
        let chunk = reader.next().unwrap().unwrap();
        assert_eq!(chunk.len(), 1);
    }

    #[test]
    fn test_missing_column_fails() {
        let dir = TempDir::new().unwrap();
        // XBT header lacks the pressure column required by the CTD schema
        let contents = format!("{}\n{}\n", XBT_HEADER, xbt_row("1", "10", "4.2"));
        let path = write_file(&dir, "extract.txt", &contents);

        let err = ChunkedRowReader::open(&path, FileType::Ctd).unwrap_err();
        assert!(matches!(err, ProcessingError::MissingColumn { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "extract.dat", "x\n");
        let err = ChunkedRowReader::open(&path, FileType::Xbt).unwrap_err();
        assert!(matches!(err, ProcessingError::UnsupportedExtension(_)));
    }

    #[test]
    fn test_ragged_row_fails() {
        let dir = TempDir::new().unwrap();
        let contents = format!("{}\nC1\t1\t2014\n", XBT_HEADER);
        let path = write_file(&dir, "extract.txt", &contents);

        let mut reader = ChunkedRowReader::open(&path, FileType::Xbt).unwrap();
        assert!(reader.next().unwrap().is_err());
    }
}
