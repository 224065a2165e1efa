use matrixgen_grid::{GridOptions, Position};
use matrixgen_model::{external, stem, Board, Net, Role, Schematic, Signal};

use crate::classify::{BoardClassification, SchematicClassification};
use crate::replicate::{
    instantiate_net, instantiate_segment, instantiate_signal, renumber_signal_items,
};
use crate::DocumentReport;

enum Policy {
    /// Fold into an existing group of the same name when one exists, so the
    /// matrix wires straight into nets drawn by hand elsewhere.
    MergeByName,
    /// Chain links are unique per position and always inserted.
    AlwaysInsert,
}

pub(crate) fn stitch_schematic(
    schematic: &mut Schematic,
    cls: &SchematicClassification,
    position: &Position,
    options: &GridOptions,
    report: &mut DocumentReport,
) {
    let p = position.index;
    let last = options.last_position();
    let t = position.schematic_transform(options);

    // Stage everything first; synthesized groups land only after the
    // read-only scan of the template sets completes.
    let mut staged: Vec<(Net, Policy)> = Vec::new();

    // The first position turns each serial input into the matrix's external
    // input net.
    if p == 1 {
        for net in &cls.input_nets {
            staged.push((
                instantiate_net(net, external(&net.name).to_string(), p, &t),
                Policy::MergeByName,
            ));
        }
    }

    // Later positions splice a MID link between their own input side and the
    // previous position's output side.
    if p > 1 {
        for input in &cls.input_nets {
            let input_stem = stem(&input.name, Role::SerialInput);
            for output in &cls.output_nets {
                if stem(&output.name, Role::SerialOutput) != input_stem {
                    continue;
                }
                let mut mid = instantiate_net(input, format!("{input_stem}MID_{}", p - 1), p, &t);
                let prev_t = options.position(p - 1).schematic_transform(options);
                for segment in &output.segments {
                    mid.segments.push(instantiate_segment(segment, p - 1, &prev_t));
                }
                staged.push((mid, Policy::AlwaysInsert));
            }
        }
    }

    // The last position turns each serial output into the external output
    // net. On a 1x1 grid this runs together with the p == 1 arm.
    if p == last {
        for net in &cls.output_nets {
            staged.push((
                instantiate_net(net, external(&net.name).to_string(), p, &t),
                Policy::MergeByName,
            ));
        }
    }

    // Bus groups accumulate one contribution from every position sharing the
    // row (or column).
    for net in &cls.row_nets {
        let name = format!("{}{}", stem(&net.name, Role::RowBus), position.row);
        staged.push((instantiate_net(net, name, p, &t), Policy::MergeByName));
    }
    for net in &cls.col_nets {
        let name = format!("{}{}", stem(&net.name, Role::ColBus), position.col);
        staged.push((instantiate_net(net, name, p, &t), Policy::MergeByName));
    }

    for (net, policy) in staged {
        report.synthesized += 1;
        match policy {
            Policy::AlwaysInsert => schematic.nets.push(net),
            Policy::MergeByName => {
                if let Some(existing) = schematic.nets.iter_mut().find(|n| n.name == net.name) {
                    existing.segments.extend(net.segments);
                    report.merged += 1;
                } else {
                    schematic.nets.push(net);
                }
            }
        }
    }
}

pub(crate) fn stitch_board(
    board: &mut Board,
    cls: &BoardClassification,
    position: &Position,
    options: &GridOptions,
    report: &mut DocumentReport,
) {
    let p = position.index;
    let last = options.last_position();
    let t = position.board_transform(options);

    let mut staged: Vec<(Signal, Policy)> = Vec::new();

    if p == 1 {
        for signal in &cls.input_signals {
            staged.push((
                instantiate_signal(signal, external(&signal.name).to_string(), p, &t),
                Policy::MergeByName,
            ));
        }
    }

    if p > 1 {
        for input in &cls.input_signals {
            let input_stem = stem(&input.name, Role::SerialInput);
            for output in &cls.output_signals {
                if stem(&output.name, Role::SerialOutput) != input_stem {
                    continue;
                }
                let mut mid =
                    instantiate_signal(input, format!("{input_stem}MID_{}", p - 1), p, &t);
                let prev_t = options.position(p - 1).board_transform(options);
                let mut tail = output.items.clone();
                renumber_signal_items(&mut tail, p - 1, &prev_t);
                mid.items.extend(tail);
                staged.push((mid, Policy::AlwaysInsert));
            }
        }
    }

    if p == last {
        for signal in &cls.output_signals {
            staged.push((
                instantiate_signal(signal, external(&signal.name).to_string(), p, &t),
                Policy::MergeByName,
            ));
        }
    }

    for signal in &cls.row_signals {
        let name = format!("{}{}", stem(&signal.name, Role::RowBus), position.row);
        staged.push((instantiate_signal(signal, name, p, &t), Policy::MergeByName));
    }
    for signal in &cls.col_signals {
        let name = format!("{}{}", stem(&signal.name, Role::ColBus), position.col);
        staged.push((instantiate_signal(signal, name, p, &t), Policy::MergeByName));
    }

    for (signal, policy) in staged {
        report.synthesized += 1;
        match policy {
            Policy::AlwaysInsert => board.signals.push(signal),
            Policy::MergeByName => {
                if let Some(existing) = board.signals.iter_mut().find(|s| s.name == signal.name) {
                    existing.items.extend(signal.items);
                    report.merged += 1;
                } else {
                    board.signals.push(signal);
                }
            }
        }
    }
}
