//! PIX BR-Code batch CLI
//!
//! Reads payment requests from CSV and writes one static BR-Code per
//! valid row.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- requests.csv > payloads.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use pix_brcode::{PayloadBatch, PixError, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(PixError::MissingArgument);
    }

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let mut batch = PayloadBatch::new();
    batch.process_csv(reader)?;

    if batch.skipped() > 0 {
        log::warn!("Skipped {} invalid row(s)", batch.skipped());
    }

    let stdout = io::stdout();
    let handle = stdout.lock();
    batch.write_output(handle)?;

    Ok(())
}
