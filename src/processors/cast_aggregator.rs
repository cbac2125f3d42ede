use crate::error::{ProcessingError, Result};
use crate::models::{CastDataset, CastKey, FileType, ObservationArrays, ProfileArrays};
use crate::readers::{ColumnMap, RowChunk};
use crate::utils::constants::*;
use chrono::NaiveDate;
use csv::StringRecord;
use indexmap::IndexMap;
use tracing::debug;

/// Groups streamed rows into casts and accumulates the profile- and
/// observation-dimension arrays.
///
/// Grouping is chunk-local: a cast whose rows straddle a chunk boundary
/// becomes two casts. The running profile index is the only state carried
/// across chunks, so parent indices stay globally unique.
pub struct CastAggregator {
    file_type: FileType,
    next_index: i32,
    profiles: ProfileArrays,
    observations: ObservationArrays,
}

impl CastAggregator {
    pub fn new(file_type: FileType) -> Self {
        Self {
            file_type,
            next_index: 0,
            profiles: ProfileArrays::default(),
            observations: ObservationArrays::default(),
        }
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    pub fn observation_count(&self) -> usize {
        self.observations.len()
    }

    /// Group one chunk's rows by cast key, in first-seen order, and append
    /// a profile plus its observations for every group.
    pub fn process_chunk(&mut self, chunk: &RowChunk) -> Result<()> {
        let columns = chunk.columns.as_ref();

        let mut groups: IndexMap<CastKey, Vec<usize>> = IndexMap::new();
        for (row_idx, row) in chunk.rows.iter().enumerate() {
            let key = cast_key(row, columns);
            groups.entry(key).or_insert_with(Vec::new).push(row_idx);
        }

        for (key, row_indices) in &groups {
            self.append_cast(key, row_indices, chunk)?;
        }

        debug!(
            casts = groups.len(),
            total_casts = self.profiles.len(),
            total_observations = self.observations.len(),
            "aggregated chunk"
        );
        Ok(())
    }

    /// Consume the aggregator and return the accumulated dataset.
    pub fn finish(self) -> CastDataset {
        CastDataset {
            file_type: self.file_type,
            profiles: self.profiles,
            observations: self.observations,
        }
    }

    fn append_cast(&mut self, key: &CastKey, row_indices: &[usize], chunk: &RowChunk) -> Result<()> {
        let columns = chunk.columns.as_ref();
        let (datestr, timestamp) = synthesize_date(key)?;

        let depths: Vec<f64> = row_indices
            .iter()
            .map(|&i| parse_measurement(&chunk.rows[i], columns.depth, COL_DEPTH))
            .collect::<Result<_>>()?;
        let (shallowest, deepest) =
            depth_extrema(&depths).ok_or_else(|| ProcessingError::EmptyDepthSeries {
                cruise: key.cruise.clone(),
                station: key.station.clone(),
            })?;

        self.profiles.cruise_ids.push(key.cruise.clone());
        self.profiles.station_numbers.push(key.station.clone());
        self.profiles
            .latitudes
            .push(parse_coordinate(&key.latitude, COL_LATITUDE)?);
        self.profiles
            .longitudes
            .push(parse_coordinate(&key.longitude, COL_LONGITUDE)?);
        self.profiles.datestrs.push(datestr);
        self.profiles.timestamps.push(timestamp);
        if let Some(ref raw) = key.bottom_depth {
            self.profiles
                .bottom_depths
                .push(parse_coordinate(raw, COL_BOTTOM_DEPTH)?);
        }
        self.profiles.shallowest_depths.push(shallowest);
        self.profiles.deepest_depths.push(deepest);

        for (&row_idx, &depth) in row_indices.iter().zip(depths.iter()) {
            let row = &chunk.rows[row_idx];
            self.observations.depths.push(depth);
            self.observations
                .temperatures
                .push(parse_measurement(row, columns.temperature, COL_TEMPERATURE)?);
            if let Some(pressure_col) = columns.pressure {
                self.observations
                    .pressures
                    .push(parse_measurement(row, pressure_col, COL_PRESSURE)?);
            }
            if let Some(salinity_col) = columns.salinity {
                self.observations
                    .salinities
                    .push(parse_measurement(row, salinity_col, COL_SALINITY)?);
            }
            self.observations.parent_index.push(self.next_index);
        }

        self.next_index += 1;
        Ok(())
    }
}

fn field<'a>(row: &'a StringRecord, index: usize) -> &'a str {
    row.get(index).unwrap_or("")
}

fn cast_key(row: &StringRecord, columns: &ColumnMap) -> CastKey {
    CastKey {
        cruise: field(row, columns.cruise).to_string(),
        station: field(row, columns.station).to_string(),
        year: field(row, columns.year).to_string(),
        month: field(row, columns.month).to_string(),
        day: field(row, columns.day).to_string(),
        hour: field(row, columns.hour).to_string(),
        minute: field(row, columns.minute).to_string(),
        longitude: field(row, columns.longitude).to_string(),
        latitude: field(row, columns.latitude).to_string(),
        bottom_depth: columns.bottom_depth.map(|i| field(row, i).to_string()),
    }
}

/// Blank measurement fields become NaN; any other unparsable text is a
/// fatal read error rather than a silently dropped row.
fn parse_measurement(row: &StringRecord, index: usize, column: &str) -> Result<f64> {
    let raw = field(row, index).trim();
    if raw.is_empty() {
        return Ok(f64::NAN);
    }
    raw.parse::<f64>()
        .map_err(|_| ProcessingError::InvalidNumber {
            column: column.to_string(),
            value: raw.to_string(),
        })
}

fn parse_coordinate(raw: &str, column: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(f64::NAN);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| ProcessingError::InvalidNumber {
            column: column.to_string(),
            value: trimmed.to_string(),
        })
}

/// Date components must be numeric; "7" and "7.0" both pass, anything else
/// aborts the run.
fn parse_date_component(raw: &str, column: &str) -> Result<i64> {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Ok(v);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
        _ => Err(ProcessingError::DateParse {
            column: column.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Build the display date string and the UTC Unix timestamp from the key's
/// date components.
fn synthesize_date(key: &CastKey) -> Result<(String, f64)> {
    let year = parse_date_component(&key.year, COL_YEAR)?;
    let month = parse_date_component(&key.month, COL_MONTH)?;
    let day = parse_date_component(&key.day, COL_DAY)?;
    let hour = parse_date_component(&key.hour, COL_HOUR)?;
    let minute = parse_date_component(&key.minute, COL_MINUTE)?;

    let out_of_range = || ProcessingError::DateOutOfRange {
        year,
        month,
        day,
        hour,
        minute,
    };

    let date = i32::try_from(year)
        .ok()
        .zip(u32::try_from(month).ok())
        .zip(u32::try_from(day).ok())
        .and_then(|((y, m), d)| NaiveDate::from_ymd_opt(y, m, d))
        .ok_or_else(out_of_range)?;
    let datetime = u32::try_from(hour)
        .ok()
        .zip(u32::try_from(minute).ok())
        .and_then(|(h, min)| date.and_hms_opt(h, min, 0))
        .ok_or_else(out_of_range)?;

    let datestr = datetime.format(DATESTR_FORMAT).to_string();
    let timestamp = datetime.and_utc().timestamp() as f64;
    Ok((datestr, timestamp))
}

/// (shallowest, deepest) for one cast's depth series, skipping NaN blanks.
///
/// With more than one reading the shallowest is the minimum over strictly
/// non-zero readings, so a lone surface zero cannot masquerade as the top
/// of the profile; a single reading is reported verbatim, zero included.
/// Returns None when no usable reading exists.
fn depth_extrema(depths: &[f64]) -> Option<(f64, f64)> {
    let finite: Vec<f64> = depths.iter().copied().filter(|d| !d.is_nan()).collect();
    if finite.is_empty() {
        return None;
    }

    let deepest = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let shallowest = if depths.len() > 1 {
        let min_nonzero = finite
            .iter()
            .copied()
            .filter(|&d| d != 0.0)
            .fold(f64::INFINITY, f64::min);
        if min_nonzero.is_finite() {
            min_nonzero
        } else {
            f64::NAN
        }
    } else {
        finite[0]
    };

    Some((shallowest, deepest))
}
