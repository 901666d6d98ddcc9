//! Times generating and then verifying a full-size fixture file in the temp directory.
//! can be run with `cargo run --example benchmark`

use std::error::Error;
use std::time::Instant;

use log::{error, warn};

use dk_fixture::generator::{self, GeneratorConfig};
use dk_fixture::verify::verify_path;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = GeneratorConfig {
        output: std::env::temp_dir().join("dk-fixture-benchmark.txt"),
        ..GeneratorConfig::default()
    };

    let start = Instant::now();
    let rows = generator::run(&config)?;
    error!("Generating {} rows took: {:.2?}", rows, start.elapsed());

    let start_verifying = Instant::now();
    let report = verify_path(&config.output)?;
    warn!(
        "Verifying took: {:.2?} ({} failures)",
        start_verifying.elapsed(),
        report.failures.len()
    );

    warn!("Total took: {:.2?}", start.elapsed());

    std::fs::remove_file(&config.output)?;
    Ok(())
}
