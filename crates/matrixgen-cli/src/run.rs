use std::fs;
use std::path::Path;

use matrixgen_eagle::{LoadedBoard, LoadedSchematic};
use matrixgen_engine::replicate_matrix;
use matrixgen_grid::GridOptions;

use crate::error::CliError;
use crate::Cli;

pub fn run(cli: &Cli) -> Result<(), CliError> {
    let options = GridOptions {
        rows: cli.rows,
        cols: cli.cols,
        spacing: [cli.spacing_x, cli.spacing_y],
        schematic_spacing: [cli.schematic_spacing_x, cli.schematic_spacing_y],
        zigzag: cli.zigzag,
        copy_region: cli.copy_region,
    };
    options
        .validate()
        .map_err(|e| CliError::usage(e.to_string()))?;

    let stem = cli
        .design
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::usage("design path has no file name"))?;
    let out_path = |ext: &str| {
        cli.design
            .with_file_name(format!("{}{}.{}", stem, cli.suffix, ext))
    };

    let schematic_path = cli.design.with_extension("sch");
    let board_path = cli.design.with_extension("brd");

    println!("Reading {}...", schematic_path.display());
    let schematic_text = read(&schematic_path)?;
    println!("Reading {}...", board_path.display());
    let board_text = read(&board_path)?;

    let mut schematic = LoadedSchematic::parse(&schematic_text)
        .map_err(|e| CliError::input(format!("{}: {e}", schematic_path.display())))?;
    let mut board = LoadedBoard::parse(&board_text)
        .map_err(|e| CliError::input(format!("{}: {e}", board_path.display())))?;

    println!("Replicating across {}x{} positions...", cli.rows, cli.cols);
    let report = replicate_matrix(&mut schematic.schematic, &mut board.board, &options)
        .map_err(|e| CliError::processing(e.to_string()))?;

    let out_schematic = out_path("sch");
    let out_board = out_path("brd");
    println!("Writing {}...", out_schematic.display());
    write(&out_schematic, &schematic.to_xml())?;
    println!("Writing {}...", out_board.display());
    write(&out_board, &board.to_xml())?;

    if cli.debug {
        let report_path = out_path("report.yaml");
        println!("Writing {}...", report_path.display());
        let yaml =
            serde_yaml::to_string(&report).map_err(|e| CliError::processing(e.to_string()))?;
        write(&report_path, &yaml)?;
    }

    println!("Done.");
    Ok(())
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path)
        .map_err(|e| CliError::input(format!("could not read {}: {e}", path.display())))
}

fn write(path: &Path, contents: &str) -> Result<(), CliError> {
    fs::write(path, contents)
        .map_err(|e| CliError::processing(format!("could not write {}: {e}", path.display())))
}
