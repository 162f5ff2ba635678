//! Converts an `output_id,output` attempt table into a nested submission JSON.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Attempt table with `output_id` and `output` columns.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Path of the submission JSON to write.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    log::debug!(
        "converting {} into {}",
        args.input.display(),
        args.output.display()
    );
    if let Err(err) = gridsub_cli::run_convert(&args.input, &args.output) {
        gridsub_cli::exit_with_error(&err);
    }
}
