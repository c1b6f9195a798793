use std::path::PathBuf;

use clap::Parser;

/// bin2nc: convert a Fortran unformatted binary restart file to NetCDF.
#[derive(Parser)]
#[command(
    name = "bin2nc",
    version,
    about = "Convert binary restart files to NetCDF"
)]
pub struct Cli {
    /// Path to the input binary file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path for the output NetCDF file (must not already exist).
    #[arg(short, long)]
    pub output: PathBuf,

    /// Path to the YAML descriptor file.
    #[arg(short, long)]
    pub descriptor: PathBuf,

    /// The binary file starts with a two-record header to skip.
    #[arg(short = 't', long = "header")]
    pub header: bool,

    /// Floating-point width of the binary records.
    #[arg(short, long, default_value = "float")]
    pub precision: String,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
