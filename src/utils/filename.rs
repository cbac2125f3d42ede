use crate::error::{ProcessingError, Result};
use crate::utils::constants::{OUTPUT_EXTENSION, OUTPUT_SUFFIX};
use std::path::Path;

/// Generate the output file name for an input extract: the name of the
/// directory holding the input file, suffixed `_raw.nc`.
///
/// `.../original_data/ICESData_CTD_to_2022/extract.txt` maps to
/// `ICESData_CTD_to_2022_raw.nc`.
pub fn output_file_name(input_path: &Path) -> Result<String> {
    let parent = input_path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            ProcessingError::InvalidPath(format!(
                "cannot derive output name from '{}'",
                input_path.display()
            ))
        })?;

    Ok(format!("{}{}.{}", parent, OUTPUT_SUFFIX, OUTPUT_EXTENSION))
}

/// Derive the dataset name recorded in the global attributes: the name of
/// the directory two levels above the input file (the delivery directory
/// that holds the per-type extract directories).
pub fn dataset_name(input_path: &Path) -> String {
    input_path
        .parent()
        .and_then(|p| p.parent())
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}
