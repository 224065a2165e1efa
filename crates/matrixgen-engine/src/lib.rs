//! Replication-and-interconnect engine: takes the parsed schematic/board
//! pair, replicates the template sub-circuit across the grid, and rewires
//! the copies in place.
//!
//! The pipeline is classify -> validate -> per-position replicate and
//! stitch -> cleanup. Positions run in increasing row-major order; MID-link
//! synthesis for position p names the copies belonging to position p-1.

use matrixgen_grid::GridOptions;
use matrixgen_model::{Board, Schematic};
use serde::Serialize;
use tracing::info;

mod classify;
mod cleanup;
mod error;
mod replicate;
mod stitch;
mod validate;

pub use classify::{
    classify_board, classify_schematic, BoardClassification, SchematicClassification,
};
pub use error::MatrixError;

/// What one run did, per document. Serialized as-is by `--debug`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DocumentReport {
    /// Template entities and groups drained during classification.
    pub templates: usize,
    /// Placed-entity and private-group copies created.
    pub replicas: usize,
    /// Segments and contact references copied into shared groups.
    pub propagated: usize,
    /// Interconnect groups synthesized.
    pub synthesized: usize,
    /// Of those, how many folded into an existing group.
    pub merged: usize,
    /// Stale template segments and references dropped by cleanup.
    pub removed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub options: GridOptions,
    pub schematic: DocumentReport,
    pub board: DocumentReport,
}

/// Replicate the template sub-circuit of `schematic` and `board` across the
/// grid described by `options`, rewriting both documents in place.
///
/// On error the documents may already be classified but are never partially
/// replicated: every failure mode is detected before the position loop runs.
pub fn replicate_matrix(
    schematic: &mut Schematic,
    board: &mut Board,
    options: &GridOptions,
) -> Result<Report, MatrixError> {
    options.validate()?;

    let sch_cls = classify::classify_schematic(schematic);
    let board_cls = classify::classify_board(board, options.copy_region.as_ref());
    validate::validate(schematic, board, &sch_cls, &board_cls, options)?;

    let mut report = Report {
        options: options.clone(),
        schematic: DocumentReport {
            templates: sch_cls.templates(),
            ..DocumentReport::default()
        },
        board: DocumentReport {
            templates: board_cls.templates(),
            ..DocumentReport::default()
        },
    };

    info!(
        rows = options.rows,
        cols = options.cols,
        positions = options.last_position(),
        "replicating template across grid"
    );

    for position in options.positions() {
        replicate::replicate_schematic(
            schematic,
            &sch_cls,
            &position,
            options,
            &mut report.schematic,
        );
        replicate::replicate_board(board, &board_cls, &position, options, &mut report.board);
        stitch::stitch_schematic(
            schematic,
            &sch_cls,
            &position,
            options,
            &mut report.schematic,
        );
        stitch::stitch_board(board, &board_cls, &position, options, &mut report.board);
    }

    cleanup::cleanup(
        schematic,
        board,
        &mut report.schematic,
        &mut report.board,
    );

    info!(
        schematic_replicas = report.schematic.replicas,
        board_replicas = report.board.replicas,
        nets_synthesized = report.schematic.synthesized,
        signals_synthesized = report.board.synthesized,
        "replication complete"
    );

    Ok(report)
}
