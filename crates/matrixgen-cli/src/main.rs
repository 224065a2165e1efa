use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use matrixgen_grid::Region;

mod error;
mod run;

/// Replicate the template sub-circuit of an EAGLE design across a grid.
///
/// Reads `<DESIGN>.sch` and `<DESIGN>.brd`, replicates every entity whose
/// name ends in `_`, wires the copies together, and writes
/// `<DESIGN><suffix>.sch` / `<DESIGN><suffix>.brd`.
#[derive(Parser)]
#[command(name = "matrixgen", version, about)]
struct Cli {
    /// Design path without extension
    #[arg(value_name = "DESIGN")]
    design: PathBuf,

    /// Number of rows in the matrix
    #[arg(short = 'r', long, default_value_t = 4)]
    rows: usize,

    /// Number of columns in the matrix
    #[arg(short = 'c', long, default_value_t = 4)]
    cols: usize,

    /// Board-space X step between positions, in board units
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    spacing_x: f64,

    /// Board-space Y step between positions, in board units
    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    spacing_y: f64,

    /// Schematic-space X step between positions
    #[arg(long, default_value_t = 40.0, allow_negative_numbers = true)]
    schematic_spacing_x: f64,

    /// Schematic-space Y step between positions
    #[arg(long, default_value_t = -40.0, allow_negative_numbers = true)]
    schematic_spacing_y: f64,

    /// Reverse column order and rotate 180 degrees on odd rows
    #[arg(long)]
    zigzag: bool,

    /// Board-space box; shared-signal artwork fully inside it is replicated
    /// per position
    #[arg(long, value_name = "X1,Y1,X2,Y2", value_parser = parse_region)]
    copy_region: Option<Region>,

    /// Appended to the design name for the output files
    #[arg(long, default_value = "matrix")]
    suffix: String,

    /// Write the run report next to the outputs
    #[arg(short, long)]
    debug: bool,
}

fn parse_region(s: &str) -> Result<Region, String> {
    let parts: Vec<&str> = s.split(',').collect();
    let [x1, y1, x2, y2] = parts.as_slice() else {
        return Err("expected four comma-separated numbers".to_string());
    };
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid number \"{v}\""))
    };
    let (x1, y1, x2, y2) = (parse(x1)?, parse(y1)?, parse(x2)?, parse(y2)?);
    Ok(Region {
        min: [x1.min(x2), y1.min(y2)],
        max: [x1.max(x2), y1.max(y2)],
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.code as u8)
        }
    }
}
