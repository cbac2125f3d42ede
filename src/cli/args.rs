use crate::models::FileType;
use crate::utils::constants::DEFAULT_CHUNK_SIZE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ices-processor")]
#[command(about = "Converts ICES cast extracts (bottle, CTD, XBT) to ragged profile NetCDF files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert one delimited cast extract into a profile/obs NetCDF file
    Convert {
        #[arg(short, long, help = "Input extract (.txt tab-separated, .csv comma-separated)")]
        input_file: PathBuf,

        #[arg(short, long, help = "Output directory for the _raw.nc file (created if missing)")]
        output_dir: PathBuf,

        #[arg(short, long, value_enum, help = "Cast record type")]
        file_type: FileType,

        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, help = "Rows read per chunk")]
        chunk_size: usize,

        #[arg(long, default_value = "false", help = "Suppress the progress spinner")]
        quiet: bool,
    },
}
