mod cli;
mod logging;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use bin2nc_convert::{define_dataset, fill_variables, synthesize_coordinates, NetcdfSink};
use bin2nc_fortran::{Precision, RecordStream};
use bin2nc_schema::Schema;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let precision: Precision = cli.precision.parse()?;

    let schema = Schema::from_path(&cli.descriptor)
        .with_context(|| format!("failed to load descriptor: {}", cli.descriptor.display()))?;
    debug!(
        dimensions = ?schema.dimensions,
        variables = schema.variables.len(),
        "descriptor loaded"
    );

    let mut sink = NetcdfSink::create(&cli.output)
        .with_context(|| format!("failed to create output: {}", cli.output.display()))?;
    define_dataset(&schema, &mut sink)?;
    synthesize_coordinates(&schema.dimensions, &mut sink)?;

    let mut stream = RecordStream::open(&cli.input, precision)
        .with_context(|| format!("failed to open binary input: {}", cli.input.display()))?;
    if cli.header {
        debug!("reading header");
        stream.skip_header()?;
    }

    fill_variables(stream, &schema, &mut sink)
        .with_context(|| format!("conversion failed: {}", cli.input.display()))?;

    info!(path = %cli.output.display(), "conversion complete");
    Ok(())
}
