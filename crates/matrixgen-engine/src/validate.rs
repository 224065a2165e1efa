use std::collections::HashSet;

use matrixgen_grid::GridOptions;
use matrixgen_model::{is_template, Board, Net, Role, Schematic, Signal};
use tracing::warn;

use crate::classify::{BoardClassification, SchematicClassification};
use crate::MatrixError;

/// Pre-flight checks run after classification, before any mutation, so a
/// failing run never writes partially-transformed output.
pub(crate) fn validate(
    schematic: &Schematic,
    board: &Board,
    sch: &SchematicClassification,
    brd: &BoardClassification,
    options: &GridOptions,
) -> Result<(), MatrixError> {
    if sch.templates() == 0 && brd.templates() == 0 {
        warn!("no template entities found; the output will be a plain copy of the input");
    }

    // MID synthesis needs both ends of every stem.
    if options.last_position() > 1 {
        check_stems(
            sch.input_nets.iter().map(|n| n.name.as_str()),
            sch.output_nets.iter().map(|n| n.name.as_str()),
        )?;
        check_stems(
            brd.input_signals.iter().map(|s| s.name.as_str()),
            brd.output_signals.iter().map(|s| s.name.as_str()),
        )?;
    }

    let template_parts: HashSet<&str> = sch.parts.iter().map(|p| p.name.as_str()).collect();
    for net in all_nets(schematic, sch) {
        for segment in &net.segments {
            for pinref in segment.pinrefs() {
                if is_template(&pinref.part) && !template_parts.contains(pinref.part.as_str()) {
                    return Err(MatrixError::DanglingTemplateReference {
                        kind: "net",
                        group: net.name.clone(),
                        target: pinref.part.clone(),
                    });
                }
            }
        }
    }

    let template_elements: HashSet<&str> = brd.elements.iter().map(|e| e.name.as_str()).collect();
    for signal in all_signals(board, brd) {
        for contactref in signal.contactrefs() {
            if is_template(&contactref.element)
                && !template_elements.contains(contactref.element.as_str())
            {
                return Err(MatrixError::DanglingTemplateReference {
                    kind: "signal",
                    group: signal.name.clone(),
                    target: contactref.element.clone(),
                });
            }
        }
    }

    Ok(())
}

fn check_stems<'a>(
    inputs: impl Iterator<Item = &'a str>,
    outputs: impl Iterator<Item = &'a str>,
) -> Result<(), MatrixError> {
    let inputs: Vec<&str> = inputs.collect();
    let outputs: Vec<&str> = outputs.collect();
    let input_stems: Vec<&str> = inputs
        .iter()
        .map(|n| matrixgen_model::stem(n, Role::SerialInput))
        .collect();
    let output_stems: Vec<&str> = outputs
        .iter()
        .map(|n| matrixgen_model::stem(n, Role::SerialOutput))
        .collect();

    for (name, stem) in inputs.iter().zip(&input_stems) {
        if !output_stems.contains(stem) {
            return Err(MatrixError::UnmatchedRolePair {
                name: (*name).to_string(),
                stem: (*stem).to_string(),
                role: "serial-input",
                counterpart: "serial-output",
            });
        }
    }
    for (name, stem) in outputs.iter().zip(&output_stems) {
        if !input_stems.contains(stem) {
            return Err(MatrixError::UnmatchedRolePair {
                name: (*name).to_string(),
                stem: (*stem).to_string(),
                role: "serial-output",
                counterpart: "serial-input",
            });
        }
    }
    Ok(())
}

fn all_nets<'a>(
    schematic: &'a Schematic,
    cls: &'a SchematicClassification,
) -> impl Iterator<Item = &'a Net> {
    schematic
        .nets
        .iter()
        .chain(&cls.template_nets)
        .chain(&cls.input_nets)
        .chain(&cls.output_nets)
        .chain(&cls.row_nets)
        .chain(&cls.col_nets)
}

fn all_signals<'a>(
    board: &'a Board,
    cls: &'a BoardClassification,
) -> impl Iterator<Item = &'a Signal> {
    board
        .signals
        .iter()
        .chain(&cls.template_signals)
        .chain(&cls.input_signals)
        .chain(&cls.output_signals)
        .chain(&cls.row_signals)
        .chain(&cls.col_signals)
}
