use crate::error::{ProcessingError, Result};
use crate::models::CastDataset;
use crate::utils::constants::*;
use crate::utils::{dataset_name, output_file_name};
use chrono::Local;
use netcdf3::{DataSet, FileWriter, Version};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Serializes an accumulated [`CastDataset`] to a classic NetCDF file with
/// a `profile` dimension (one entry per cast) and an `obs` dimension (one
/// entry per source row), linked through `parent_index`.
pub struct NetcdfWriter {
    output_dir: PathBuf,
}

impl NetcdfWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write `<parent-dir-of-input>_raw.nc` into the output directory,
    /// creating the directory if absent. Returns the written path.
    ///
    /// The file is removed again if serialization fails partway, so no
    /// partial output survives.
    pub fn write(&self, dataset: &CastDataset, input_path: &Path) -> Result<PathBuf> {
        check_dimensions(dataset)?;
        if dataset.profile_count() == 0 {
            return Err(ProcessingError::EmptyInput(
                input_path.display().to_string(),
            ));
        }

        let file_name = output_file_name(input_path)?;
        fs::create_dir_all(&self.output_dir)?;
        let out_path = self.output_dir.join(file_name);

        if let Err(e) = self.write_file(dataset, input_path, &out_path) {
            let _ = fs::remove_file(&out_path);
            return Err(e);
        }

        info!(
            profiles = dataset.profile_count(),
            observations = dataset.observation_count(),
            path = %out_path.display(),
            "wrote dataset"
        );
        Ok(out_path)
    }

    fn write_file(&self, dataset: &CastDataset, input_path: &Path, out_path: &Path) -> Result<()> {
        let width = string_width(dataset);
        let def = build_definition(dataset, &dataset_name(input_path), width)?;

        let profiles = &dataset.profiles;
        let observations = &dataset.observations;
        let schema = dataset.file_type.schema();

        let mut writer = FileWriter::open(out_path).map_err(nc_err)?;
        writer.set_def(&def, Version::Classic, 0).map_err(nc_err)?;

        writer
            .write_var_f64(VAR_TIMESTAMP, &profiles.timestamps)
            .map_err(nc_err)?;
        writer
            .write_var_f64(VAR_LAT, &profiles.latitudes)
            .map_err(nc_err)?;
        writer
            .write_var_f64(VAR_LON, &profiles.longitudes)
            .map_err(nc_err)?;
        writer
            .write_var_u8(VAR_CRUISE_ID, &encode_strings(&profiles.cruise_ids, width))
            .map_err(nc_err)?;
        writer
            .write_var_u8(
                VAR_STATION_NO,
                &encode_strings(&profiles.station_numbers, width),
            )
            .map_err(nc_err)?;
        writer
            .write_var_u8(VAR_DATESTR, &encode_strings(&profiles.datestrs, width))
            .map_err(nc_err)?;
        if schema.has_bottom_depth {
            writer
                .write_var_f64(VAR_BOTTOM_DEPTH, &profiles.bottom_depths)
                .map_err(nc_err)?;
        }
        writer
            .write_var_f64(VAR_SHALLOWEST_DEPTH, &profiles.shallowest_depths)
            .map_err(nc_err)?;
        writer
            .write_var_f64(VAR_DEEPEST_DEPTH, &profiles.deepest_depths)
            .map_err(nc_err)?;

        writer
            .write_var_f64(VAR_DEPTH, &observations.depths)
            .map_err(nc_err)?;
        writer
            .write_var_f64(VAR_TEMPERATURE, &observations.temperatures)
            .map_err(nc_err)?;
        if schema.has_pressure_salinity {
            writer
                .write_var_f64(VAR_PRESSURE, &observations.pressures)
                .map_err(nc_err)?;
            writer
                .write_var_f64(VAR_SALINITY, &observations.salinities)
                .map_err(nc_err)?;
        }
        writer
            .write_var_i32(VAR_PARENT_INDEX, &observations.parent_index)
            .map_err(nc_err)?;

        writer.close().map_err(nc_err)?;
        Ok(())
    }
}

fn nc_err<E: std::fmt::Debug>(e: E) -> ProcessingError {
    ProcessingError::Write(format!("{e:?}"))
}

fn build_definition(dataset: &CastDataset, dataset_label: &str, width: usize) -> Result<DataSet> {
    let schema = dataset.file_type.schema();
    let mut def = DataSet::new();

    def.add_fixed_dim(DIM_PROFILE, dataset.profile_count())
        .map_err(nc_err)?;
    def.add_fixed_dim(DIM_OBS, dataset.observation_count())
        .map_err(nc_err)?;
    def.add_fixed_dim(DIM_STRING, width).map_err(nc_err)?;

    // profile coordinates
    def.add_var_f64(VAR_TIMESTAMP, &[DIM_PROFILE])
        .map_err(nc_err)?;
    def.add_var_f64(VAR_LAT, &[DIM_PROFILE]).map_err(nc_err)?;
    def.add_var_f64(VAR_LON, &[DIM_PROFILE]).map_err(nc_err)?;

    // profile data variables; strings go out as fixed-width char arrays
    def.add_var_u8(VAR_CRUISE_ID, &[DIM_PROFILE, DIM_STRING])
        .map_err(nc_err)?;
    def.add_var_u8(VAR_STATION_NO, &[DIM_PROFILE, DIM_STRING])
        .map_err(nc_err)?;
    def.add_var_u8(VAR_DATESTR, &[DIM_PROFILE, DIM_STRING])
        .map_err(nc_err)?;
    if schema.has_bottom_depth {
        def.add_var_f64(VAR_BOTTOM_DEPTH, &[DIM_PROFILE])
            .map_err(nc_err)?;
    }
    def.add_var_f64(VAR_SHALLOWEST_DEPTH, &[DIM_PROFILE])
        .map_err(nc_err)?;
    def.add_var_f64(VAR_DEEPEST_DEPTH, &[DIM_PROFILE])
        .map_err(nc_err)?;

    // observation variables
    def.add_var_f64(VAR_DEPTH, &[DIM_OBS]).map_err(nc_err)?;
    def.add_var_f64(VAR_TEMPERATURE, &[DIM_OBS])
        .map_err(nc_err)?;
    if schema.has_pressure_salinity {
        def.add_var_f64(VAR_PRESSURE, &[DIM_OBS]).map_err(nc_err)?;
        def.add_var_f64(VAR_SALINITY, &[DIM_OBS]).map_err(nc_err)?;
    }
    def.add_var_i32(VAR_PARENT_INDEX, &[DIM_OBS])
        .map_err(nc_err)?;

    def.add_global_attr_string("dataset_name", dataset_label.to_string())
        .map_err(nc_err)?;
    def.add_global_attr_string(
        "creation_date",
        Local::now().format(CREATION_DATE_FORMAT).to_string(),
    )
    .map_err(nc_err)?;

    Ok(def)
}

/// Every profile-dimension array must match the cast count and every
/// observation-dimension array the row count before anything is written.
fn check_dimensions(dataset: &CastDataset) -> Result<()> {
    let schema = dataset.file_type.schema();
    let profiles = &dataset.profiles;
    let observations = &dataset.observations;

    let mut profile_lengths = vec![
        (VAR_CRUISE_ID, profiles.cruise_ids.len()),
        (VAR_STATION_NO, profiles.station_numbers.len()),
        (VAR_LAT, profiles.latitudes.len()),
        (VAR_LON, profiles.longitudes.len()),
        (VAR_DATESTR, profiles.datestrs.len()),
        (VAR_SHALLOWEST_DEPTH, profiles.shallowest_depths.len()),
        (VAR_DEEPEST_DEPTH, profiles.deepest_depths.len()),
    ];
    if schema.has_bottom_depth {
        profile_lengths.push((VAR_BOTTOM_DEPTH, profiles.bottom_depths.len()));
    }
    for (variable, actual) in profile_lengths {
        if actual != dataset.profile_count() {
            return Err(ProcessingError::DimensionMismatch {
                variable: variable.to_string(),
                expected: dataset.profile_count(),
                actual,
            });
        }
    }

    let mut obs_lengths = vec![
        (VAR_TEMPERATURE, observations.temperatures.len()),
        (VAR_PARENT_INDEX, observations.parent_index.len()),
    ];
    if schema.has_pressure_salinity {
        obs_lengths.push((VAR_PRESSURE, observations.pressures.len()));
        obs_lengths.push((VAR_SALINITY, observations.salinities.len()));
    }
    for (variable, actual) in obs_lengths {
        if actual != dataset.observation_count() {
            return Err(ProcessingError::DimensionMismatch {
                variable: variable.to_string(),
                expected: dataset.observation_count(),
                actual,
            });
        }
    }

    Ok(())
}

/// Width of the shared char dimension: the longest string across all
/// profile string variables, at least one byte.
fn string_width(dataset: &CastDataset) -> usize {
    let profiles = &dataset.profiles;
    profiles
        .cruise_ids
        .iter()
        .chain(profiles.station_numbers.iter())
        .chain(profiles.datestrs.iter())
        .map(|s| s.len())
        .max()
        .unwrap_or(1)
        .max(1)
}

/// NUL-padded row-major char matrix, `values.len() * width` bytes.
fn encode_strings(values: &[String], width: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; values.len() * width];
    for (row, value) in values.iter().enumerate() {
        let start = row * width;
        bytes[start..start + value.len()].copy_from_slice(value.as_bytes());
    }
    bytes
}
