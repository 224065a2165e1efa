use indexmap::IndexMap;
use matrixgen_grid::Region;
use matrixgen_model::{
    is_template, Board, Element, Instance, Net, Part, Role, Schematic, Signal, SignalItem,
};

/// Template and role-tagged schematic content, drained out of the document
/// so the document itself retains only shared entities.
#[derive(Debug, Default)]
pub struct SchematicClassification {
    pub parts: Vec<Part>,
    pub instances: Vec<Instance>,
    /// Marker-named nets with no role suffix: per-position private wiring.
    pub template_nets: Vec<Net>,
    pub input_nets: Vec<Net>,
    pub output_nets: Vec<Net>,
    pub row_nets: Vec<Net>,
    pub col_nets: Vec<Net>,
}

impl SchematicClassification {
    #[must_use]
    pub fn templates(&self) -> usize {
        self.parts.len()
            + self.instances.len()
            + self.template_nets.len()
            + self.input_nets.len()
            + self.output_nets.len()
            + self.row_nets.len()
            + self.col_nets.len()
    }
}

/// Board counterpart of [`SchematicClassification`].
#[derive(Debug, Default)]
pub struct BoardClassification {
    pub elements: Vec<Element>,
    pub template_signals: Vec<Signal>,
    pub input_signals: Vec<Signal>,
    pub output_signals: Vec<Signal>,
    pub row_signals: Vec<Signal>,
    pub col_signals: Vec<Signal>,
    /// Shared-signal artwork inside the copy region, keyed by owning signal.
    pub region_geometry: IndexMap<String, Vec<SignalItem>>,
}

impl BoardClassification {
    #[must_use]
    pub fn templates(&self) -> usize {
        self.elements.len()
            + self.template_signals.len()
            + self.input_signals.len()
            + self.output_signals.len()
            + self.row_signals.len()
            + self.col_signals.len()
    }
}

pub fn classify_schematic(schematic: &mut Schematic) -> SchematicClassification {
    let mut cls = SchematicClassification::default();

    let mut kept = Vec::new();
    for part in std::mem::take(&mut schematic.parts) {
        if is_template(&part.name) {
            cls.parts.push(part);
        } else {
            kept.push(part);
        }
    }
    schematic.parts = kept;

    let mut kept = Vec::new();
    for instance in std::mem::take(&mut schematic.instances) {
        if is_template(&instance.part) {
            cls.instances.push(instance);
        } else {
            kept.push(instance);
        }
    }
    schematic.instances = kept;

    let mut kept = Vec::new();
    for net in std::mem::take(&mut schematic.nets) {
        match Role::of(&net.name) {
            Role::SerialInput => cls.input_nets.push(net),
            Role::SerialOutput => cls.output_nets.push(net),
            Role::RowBus => cls.row_nets.push(net),
            Role::ColBus => cls.col_nets.push(net),
            Role::Template => cls.template_nets.push(net),
            Role::Plain => kept.push(net),
        }
    }
    schematic.nets = kept;

    cls
}

pub fn classify_board(board: &mut Board, region: Option<&Region>) -> BoardClassification {
    let mut cls = BoardClassification::default();

    let mut kept = Vec::new();
    for element in std::mem::take(&mut board.elements) {
        if is_template(&element.name) {
            cls.elements.push(element);
        } else {
            kept.push(element);
        }
    }
    board.elements = kept;

    let mut kept = Vec::new();
    for signal in std::mem::take(&mut board.signals) {
        match Role::of(&signal.name) {
            Role::SerialInput => cls.input_signals.push(signal),
            Role::SerialOutput => cls.output_signals.push(signal),
            Role::RowBus => cls.row_signals.push(signal),
            Role::ColBus => cls.col_signals.push(signal),
            Role::Template => cls.template_signals.push(signal),
            Role::Plain => kept.push(signal),
        }
    }
    board.signals = kept;

    // Artwork inside the copy region becomes per-position template content.
    if let Some(region) = region {
        for signal in &mut board.signals {
            let mut kept = Vec::new();
            for item in std::mem::take(&mut signal.items) {
                if in_region(&item, region) {
                    cls.region_geometry
                        .entry(signal.name.clone())
                        .or_default()
                        .push(item);
                } else {
                    kept.push(item);
                }
            }
            signal.items = kept;
        }
    }

    cls
}

fn in_region(item: &SignalItem, region: &Region) -> bool {
    match item {
        SignalItem::Wire(w) => {
            region.contains(w.x1, w.y1) && region.contains(w.x2, w.y2)
        }
        SignalItem::Via(v) => region.contains(v.x, v.y),
        SignalItem::ContactRef(_) | SignalItem::Polygon(_) => false,
    }
}
