use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::error;

use dk_fixture::generator::{self, GeneratorConfig, DEFAULT_OUTPUT, DEFAULT_ROW_COUNT};
use dk_fixture::verify::verify_path;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Defaults to `generate` with the standard file name and row count
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write a fresh file of random diagnosis key fixture rows
    Generate {
        /// The output file, truncated if it exists
        #[clap(short, long, default_value = DEFAULT_OUTPUT)]
        output: String,
        /// Number of rows to write
        #[clap(short = 'n', long, default_value_t = DEFAULT_ROW_COUNT)]
        count: usize,
        /// Seed for reproducible output
        #[clap(long)]
        seed: Option<u64>,
    },
    /// Check that every row of a fixture file is self-consistent
    Verify {
        /// The fixture file to check
        input_file: String,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Generate {
            output: DEFAULT_OUTPUT.to_owned(),
            count: DEFAULT_ROW_COUNT,
            seed: None,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command.unwrap_or_default() {
        Command::Generate {
            output,
            count,
            seed,
        } => {
            let config = GeneratorConfig {
                output: PathBuf::from(output),
                rows: count,
                seed,
            };
            let rows = generator::run(&config)?;
            println!("Wrote {} rows to {}", rows, config.output.display());
        }
        Command::Verify { input_file } => {
            let report = verify_path(&input_file)?;
            for failure in &report.failures {
                error!("{}:{}: {}", input_file, failure.line, failure.error);
            }
            println!(
                "{}: {} rows, {} failed",
                input_file,
                report.rows,
                report.failures.len()
            );
            if !report.is_ok() {
                return Err(format!("{} rows failed verification", report.failures.len()).into());
            }
        }
    }

    Ok(())
}
