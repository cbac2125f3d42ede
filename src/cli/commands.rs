use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::models::FileType;
use crate::processors::CastAggregator;
use crate::readers::ChunkedRowReader;
use crate::utils::progress::ProgressReporter;
use crate::writers::NetcdfWriter;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            input_file,
            output_dir,
            file_type,
            chunk_size,
            quiet,
        } => {
            let out_path = convert(&input_file, &output_dir, file_type, chunk_size, quiet)?;
            println!("Wrote {}", out_path.display());
            Ok(())
        }
    }
}

/// Run the full pipeline for one extract: stream chunks, aggregate casts,
/// write the NetCDF dataset. Returns the written path.
pub fn convert(
    input_file: &Path,
    output_dir: &Path,
    file_type: FileType,
    chunk_size: usize,
    quiet: bool,
) -> Result<PathBuf> {
    // Naming of the output artifact walks the input's directory tree, so
    // resolve relative paths up front.
    let input_file = input_file.canonicalize()?;

    info!(
        input = %input_file.display(),
        file_type = file_type.tag(),
        chunk_size,
        "converting extract"
    );

    let progress = ProgressReporter::new_spinner("Reading chunks...", quiet);

    let reader = ChunkedRowReader::with_chunk_size(&input_file, file_type, chunk_size)?;
    let mut aggregator = CastAggregator::new(file_type);
    for chunk in reader {
        aggregator.process_chunk(&chunk?)?;
        progress.set_message(&format!(
            "{} casts / {} observations",
            aggregator.profile_count(),
            aggregator.observation_count()
        ));
    }
    progress.finish_with_message(&format!(
        "Aggregated {} casts from {} observations",
        aggregator.profile_count(),
        aggregator.observation_count()
    ));

    let dataset = aggregator.finish();
    let writer = NetcdfWriter::new(output_dir);
    writer.write(&dataset, &input_file)
}
