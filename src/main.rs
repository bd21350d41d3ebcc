//! clinical-safety CLI
//!
//! Usage:
//!   clinical-safety [request.json] [--rules-dir <dir>]
//!
//! Reads a treatment request as JSON (stdin when no file or "-"), prints the
//! safety report as pretty JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "clinical-safety")]
#[command(version)]
#[command(about = "Renal/hepatic dose adjustment and allergy cross-reactivity checks", long_about = None)]
struct Cli {
    /// Treatment request JSON file, or '-' for stdin
    input: Option<PathBuf>,

    /// Directory with renal_dosing.json, cross_reactivity.json, excipients.json
    #[arg(long)]
    rules_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    clinical_safety::init_tracing();

    match clinical_safety::run(cli.input.as_deref(), cli.rules_dir.as_deref()) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Evaluation failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
