use matrixgen_grid::{GridOptions, Position, Transform};
use matrixgen_model::{
    is_template, replica, Board, Net, Schematic, Segment, SegmentItem, Signal, SignalItem,
};

use crate::classify::{BoardClassification, SchematicClassification};
use crate::DocumentReport;

/// Deep-copy a template net under a new name for grid position `p`.
pub(crate) fn instantiate_net(template: &Net, name: String, p: usize, t: &Transform) -> Net {
    Net {
        name,
        class: template.class.clone(),
        segments: template
            .segments
            .iter()
            .map(|segment| instantiate_segment(segment, p, t))
            .collect(),
    }
}

/// Deep-copy a segment, renumbering template pin references to position `p`
/// and moving its drawing to the position's offset.
pub(crate) fn instantiate_segment(template: &Segment, p: usize, t: &Transform) -> Segment {
    let mut segment = template.clone();
    for item in &mut segment.items {
        match item {
            SegmentItem::PinRef(r) => {
                if is_template(&r.part) {
                    r.part = replica(&r.part, p);
                }
            }
            other => other.transform(t),
        }
    }
    segment
}

pub(crate) fn instantiate_signal(template: &Signal, name: String, p: usize, t: &Transform) -> Signal {
    let mut signal = Signal {
        name,
        class: template.class.clone(),
        items: template.items.clone(),
    };
    renumber_signal_items(&mut signal.items, p, t);
    signal
}

pub(crate) fn renumber_signal_items(items: &mut [SignalItem], p: usize, t: &Transform) {
    for item in items {
        match item {
            SignalItem::ContactRef(r) => {
                if is_template(&r.element) {
                    r.element = replica(&r.element, p);
                }
            }
            other => other.transform(t),
        }
    }
}

pub(crate) fn replicate_schematic(
    schematic: &mut Schematic,
    cls: &SchematicClassification,
    position: &Position,
    options: &GridOptions,
    report: &mut DocumentReport,
) {
    let t = position.schematic_transform(options);
    let p = position.index;

    for part in &cls.parts {
        let mut copy = part.clone();
        copy.name = replica(&part.name, p);
        schematic.parts.push(copy);
        report.replicas += 1;
    }
    for instance in &cls.instances {
        let mut copy = instance.clone();
        copy.part = replica(&instance.part, p);
        copy.transform(&t);
        schematic.instances.push(copy);
        report.replicas += 1;
    }
    // Marker-named nets are private to the cell and come back once per
    // position.
    for net in &cls.template_nets {
        schematic
            .nets
            .push(instantiate_net(net, replica(&net.name, p), p, &t));
        report.replicas += 1;
    }

    // Shared nets pick up the new replica's pins: every segment still naming
    // a template part yields a renumbered copy alongside it. Copies carry no
    // marker, so later positions scan past them.
    for net in &mut schematic.nets {
        let copies: Vec<Segment> = net
            .segments
            .iter()
            .filter(|segment| segment.pinrefs().any(|r| is_template(&r.part)))
            .map(|segment| instantiate_segment(segment, p, &t))
            .collect();
        report.propagated += copies.len();
        net.segments.extend(copies);
    }
}

pub(crate) fn replicate_board(
    board: &mut Board,
    cls: &BoardClassification,
    position: &Position,
    options: &GridOptions,
    report: &mut DocumentReport,
) {
    let t = position.board_transform(options);
    let p = position.index;

    for element in &cls.elements {
        let mut copy = element.clone();
        copy.name = replica(&element.name, p);
        copy.transform(&t);
        board.elements.push(copy);
        report.replicas += 1;
    }
    for signal in &cls.template_signals {
        board
            .signals
            .push(instantiate_signal(signal, replica(&signal.name, p), p, &t));
        report.replicas += 1;
    }

    // Shared signals (power, ground) connect every replica in parallel.
    for signal in &mut board.signals {
        let copies: Vec<SignalItem> = signal
            .items
            .iter()
            .filter_map(|item| match item {
                SignalItem::ContactRef(r) if is_template(&r.element) => {
                    let mut copy = r.clone();
                    copy.element = replica(&r.element, p);
                    Some(SignalItem::ContactRef(copy))
                }
                _ => None,
            })
            .collect();
        report.propagated += copies.len();
        signal.items.extend(copies);
    }

    // Copy-region artwork rides along with each position.
    for (signal_name, items) in &cls.region_geometry {
        if let Some(signal) = board.signals.iter_mut().find(|s| &s.name == signal_name) {
            for item in items {
                let mut copy = item.clone();
                copy.transform(&t);
                signal.items.push(copy);
            }
            report.propagated += items.len();
        }
    }
}
