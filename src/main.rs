//! `lutbake` command-line entry point.
//!
//! Each subcommand reads one input file, writes its result to stdout and logs
//! to stderr. Set `RUST_LOG=debug` to trace shape inference and overwrites.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use lutbake::{
    dense_table, round_table_with_options, samples_to_table, Declaration, Error, LiteralOptions,
    LiteralWriter, Result, RoundOptions, SampleOptions, ShapeInference,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "lutbake")]
#[command(about = "Bake N-dimensional sample tables into array literals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Round the value column of a table to a fixed number of significant digits
    Round {
        /// Whitespace-separated table: indices followed by a value per row
        input: PathBuf,
        /// Significant digits kept in the value column
        #[arg(short, long, default_value_t = lutbake::options::DEFAULT_SIGNIFICANT_DIGITS)]
        digits: usize,
    },
    /// Transcode a table into a flattened array literal
    Transcode {
        /// Whitespace-separated table: indices followed by a value per row
        input: PathBuf,
        /// Where the table extents are read from
        #[arg(long, value_enum, default_value_t = ShapeArg::LastRow)]
        shape: ShapeArg,
        /// Literal substituted for `nan` values
        #[arg(long, default_value = "0.f")]
        nan_literal: String,
        /// Emit decimal values without the `f` suffix
        #[arg(long)]
        no_float_suffix: bool,
        /// Wrap the literal in C declarations of a table with this name
        #[arg(long)]
        name: Option<String>,
        /// With --name, emit `extern` declarations instead of definitions
        #[arg(long, requires = "name")]
        header: bool,
    },
    /// Convert a JSON sample set into a table
    Json2dat {
        /// JSON object with `nDims`, `lengths` and `results`
        input: PathBuf,
        /// Field of each result holding the sample value
        #[arg(long, default_value = "albedo")]
        field: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ShapeArg {
    /// Extents from the last row's indices
    LastRow,
    /// Extents from the maximum index of every dimension
    Scan,
}

impl From<ShapeArg> for ShapeInference {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::LastRow => ShapeInference::LastRow,
            ShapeArg::Scan => ShapeInference::MaxScan,
        }
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer().with_target(false).with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::io(&format!("failed to read {}: {}", path.display(), e)))
}

fn write_output(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn run(command: Commands) -> Result<String> {
    match command {
        Commands::Round { input, digits } => {
            let options = RoundOptions::new().with_significant_digits(digits);
            let text = read_input(&input)?;
            info!(input = %input.display(), digits, "rounding table");
            round_table_with_options(&text, &options)
        }
        Commands::Transcode {
            input,
            shape,
            nan_literal,
            no_float_suffix,
            name,
            header,
        } => {
            let mut options = LiteralOptions::new()
                .with_shape_inference(shape.into())
                .with_nan_literal(&nan_literal);
            if no_float_suffix {
                options = options.without_float_suffix();
            }
            let declaration = name.as_deref().map(Declaration::new).transpose()?;

            let text = read_input(&input)?;
            info!(input = %input.display(), "transcoding table");
            let table = dense_table(&text, options.shape_inference)?;
            info!(
                extents = ?table.shape().extents(),
                cells = table.shape().cell_count(),
                "table reconstructed"
            );

            match declaration {
                Some(decl) if header => decl.header(table.shape()),
                Some(decl) => decl.definition(&table, &options),
                None => {
                    let mut writer = LiteralWriter::new(&options);
                    writer.write_table(&table)?;
                    Ok(writer.into_inner())
                }
            }
        }
        Commands::Json2dat { input, field } => {
            let options = SampleOptions::new().with_value_field(&field);
            let text = read_input(&input)?;
            info!(input = %input.display(), field = %field, "converting sample set");
            samples_to_table(&text, &options)
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli.command).and_then(|output| write_output(&output)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lutbake: {}", err);
            ExitCode::FAILURE
        }
    }
}
