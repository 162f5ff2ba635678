//! Pads every test case of a submission JSON to four attempts.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Submission JSON to pad.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Path of the padded submission JSON to write.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    log::debug!(
        "padding {} into {}",
        args.input.display(),
        args.output.display()
    );
    if let Err(err) = gridsub_cli::run_pad(&args.input, &args.output) {
        gridsub_cli::exit_with_error(&err);
    }
}
