use std::io;
use std::path::PathBuf;

use log::{debug, info};

use crate::encoding::FixtureLine;
use crate::error::FixtureError;
use crate::fixture::FixtureGenerator;
use crate::random::{rng_from_seed, RandomSource};
use crate::region::{RegionCodeProvider, SpecificCultures};
use crate::sink::FixtureSink;

/// The resource name the cross-language signature tests load.
pub const DEFAULT_OUTPUT: &str = "CSharpTestdata.txt";
pub const DEFAULT_ROW_COUNT: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub output: PathBuf,
    pub rows: usize,
    /// Unseeded runs never produce the same file twice.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            output: PathBuf::from(DEFAULT_OUTPUT),
            rows: DEFAULT_ROW_COUNT,
            seed: None,
        }
    }
}

/// Generates `rows` fixtures and writes one line for each.
///
/// # Errors
/// Errors on the first fixture that cannot be generated or written. Lines already written stay
/// in the sink.
pub fn write_fixtures<P, R, W>(
    generator: &FixtureGenerator<P>,
    rng: &mut R,
    sink: &mut FixtureSink<W>,
    rows: usize,
) -> Result<(), FixtureError>
where
    P: RegionCodeProvider,
    R: RandomSource + ?Sized,
    W: io::Write,
{
    for row in 0..rows {
        let fixture = generator.generate(rng)?;
        let line = FixtureLine::from(&fixture);
        debug!("Row {}: {}", row + 1, line.composite);
        sink.write_line(&line)?;
    }
    Ok(())
}

/// Writes a fresh fixture file with regions drawn from [`SpecificCultures`], returning the number
/// of rows written.
///
/// # Errors
/// Errors when the output cannot be created, written or flushed
pub fn run(config: &GeneratorConfig) -> Result<usize, FixtureError> {
    run_with_regions(config, SpecificCultures::default())
}

/// # Errors
/// Errors when the output cannot be created, written or flushed, or when `regions` is empty
pub fn run_with_regions<P: RegionCodeProvider>(
    config: &GeneratorConfig,
    regions: P,
) -> Result<usize, FixtureError> {
    info!(
        "Writing {} fixture rows to {}",
        config.rows,
        config.output.display()
    );
    let mut sink = FixtureSink::create(&config.output)?;
    let mut rng = rng_from_seed(config.seed);
    let generator = FixtureGenerator::new(regions);

    write_fixtures(&generator, &mut rng, &mut sink, config.rows)?;

    let rows = sink.lines_written();
    sink.finish()?;
    info!("Wrote {} rows to {}", rows, config.output.display());
    Ok(rows)
}
