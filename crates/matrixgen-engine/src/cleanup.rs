use matrixgen_model::{is_template, Board, Schematic, SignalItem};

use crate::DocumentReport;

/// Drop the leftovers of the original template occupying position zero: any
/// segment or bare reference still naming a marker-suffixed entity.
pub(crate) fn cleanup(
    schematic: &mut Schematic,
    board: &mut Board,
    sch_report: &mut DocumentReport,
    board_report: &mut DocumentReport,
) {
    for net in &mut schematic.nets {
        let before = net.segments.len();
        net.segments
            .retain(|segment| !segment.pinrefs().any(|r| is_template(&r.part)));
        sch_report.removed += before - net.segments.len();
    }

    for signal in &mut board.signals {
        let before = signal.items.len();
        signal.items.retain(
            |item| !matches!(item, SignalItem::ContactRef(r) if is_template(&r.element)),
        );
        board_report.removed += before - signal.items.len();
    }
}
