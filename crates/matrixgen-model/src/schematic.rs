use matrixgen_grid::Transform;

use crate::drawing::turn_rot;
use crate::{Junction, Label, Rot, Wire};

/// The schematic collections matrixgen operates on: `<parts>` plus the
/// first sheet's `<instances>` and `<nets>`. Later sheets pass through the
/// I/O layer untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schematic {
    pub parts: Vec<Part>,
    pub instances: Vec<Instance>,
    pub nets: Vec<Net>,
}

/// Logical component, no geometry of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: String,
    pub library: String,
    pub deviceset: String,
    pub device: String,
    pub technology: Option<String>,
    pub value: Option<String>,
}

/// Placement of one gate of a part on the sheet. Identified by the part
/// name it references.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub part: String,
    pub gate: String,
    pub x: f64,
    pub y: f64,
    pub smashed: bool,
    pub rot: Option<Rot>,
}

impl Instance {
    pub fn transform(&mut self, t: &Transform) {
        t.apply_pair(&mut self.x, &mut self.y);
        turn_rot(&mut self.rot, t);
    }
}

/// Schematic connectivity group: an ordered list of segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Net {
    pub name: String,
    pub class: Option<String>,
    pub segments: Vec<Segment>,
}

impl Net {
    pub fn transform(&mut self, t: &Transform) {
        for segment in &mut self.segments {
            segment.transform(t);
        }
    }
}

/// One electrically contiguous piece of a net's drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segment {
    pub items: Vec<SegmentItem>,
}

impl Segment {
    pub fn pinrefs(&self) -> impl Iterator<Item = &PinRef> {
        self.items.iter().filter_map(|item| match item {
            SegmentItem::PinRef(r) => Some(r),
            _ => None,
        })
    }

    pub fn transform(&mut self, t: &Transform) {
        for item in &mut self.items {
            item.transform(t);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SegmentItem {
    PinRef(PinRef),
    Wire(Wire),
    Junction(Junction),
    Label(Label),
}

impl SegmentItem {
    pub fn transform(&mut self, t: &Transform) {
        match self {
            SegmentItem::PinRef(_) => {}
            SegmentItem::Wire(w) => w.transform(t),
            SegmentItem::Junction(j) => j.transform(t),
            SegmentItem::Label(l) => l.transform(t),
        }
    }
}

/// Pointer from a net segment to one pin of a placed part.
#[derive(Debug, Clone, PartialEq)]
pub struct PinRef {
    pub part: String,
    pub gate: String,
    pub pin: String,
}
