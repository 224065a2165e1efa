use matrixgen_grid::Transform;

use crate::drawing::turn_rot;
use crate::{Polygon, Rot, Via, Wire};

/// The board collections matrixgen operates on: `<elements>` and
/// `<signals>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    pub elements: Vec<Element>,
    pub signals: Vec<Signal>,
}

/// Placed footprint on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub library: String,
    pub package: String,
    pub value: String,
    pub x: f64,
    pub y: f64,
    pub locked: bool,
    pub smashed: bool,
    pub rot: Option<Rot>,
    pub attributes: Vec<ElementAttribute>,
}

impl Element {
    pub fn transform(&mut self, t: &Transform) {
        t.apply_pair(&mut self.x, &mut self.y);
        turn_rot(&mut self.rot, t);
        for attribute in &mut self.attributes {
            attribute.transform(t);
        }
    }
}

/// Smashed name/value text riding on an element. The position pair is
/// either fully present or fully absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementAttribute {
    pub name: String,
    pub value: Option<String>,
    pub pos: Option<[f64; 2]>,
    pub size: Option<f64>,
    pub layer: Option<u32>,
    pub font: Option<String>,
    pub ratio: Option<u32>,
    pub rot: Option<Rot>,
    pub display: Option<String>,
}

impl ElementAttribute {
    pub fn transform(&mut self, t: &Transform) {
        if let Some(pos) = &mut self.pos {
            *pos = t.apply(*pos);
        }
        turn_rot(&mut self.rot, t);
    }
}

/// Board connectivity group: contact references plus routed copper.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub name: String,
    pub class: Option<String>,
    pub items: Vec<SignalItem>,
}

impl Signal {
    pub fn contactrefs(&self) -> impl Iterator<Item = &ContactRef> {
        self.items.iter().filter_map(|item| match item {
            SignalItem::ContactRef(r) => Some(r),
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
pub enum SignalItem {
    ContactRef(ContactRef),
    Wire(Wire),
    Via(Via),
    Polygon(Polygon),
}

impl SignalItem {
    pub fn transform(&mut self, t: &Transform) {
        match self {
            SignalItem::ContactRef(_) => {}
            SignalItem::Wire(w) => w.transform(t),
            SignalItem::Via(v) => v.transform(t),
            SignalItem::Polygon(p) => p.transform(t),
        }
    }
}

/// Pointer from a signal to one pad of a placed element.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactRef {
    pub element: String,
    pub pad: String,
    pub route: Option<String>,
    pub routetag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrixgen_grid::Transform;

    #[test]
    fn element_transform_moves_attributes_too() {
        let mut e = Element {
            name: "LED_".into(),
            library: "led".into(),
            package: "LED0805".into(),
            value: "".into(),
            x: 1.0,
            y: 2.0,
            locked: false,
            smashed: true,
            rot: None,
            attributes: vec![ElementAttribute {
                name: "NAME".into(),
                value: None,
                pos: Some([1.5, 3.0]),
                size: Some(1.27),
                layer: Some(25),
                font: None,
                ratio: None,
                rot: None,
                display: None,
            }],
        };
        e.transform(&Transform::translation(10.0, -10.0));
        assert_eq!((e.x, e.y), (11.0, -8.0));
        assert_eq!(e.attributes[0].pos, Some([11.5, -7.0]));
    }

    #[test]
    fn half_turn_sets_rotation_on_unrotated_element() {
        let mut e = Element {
            name: "R_".into(),
            library: "rcl".into(),
            package: "R0805".into(),
            value: "100R".into(),
            x: 2.0,
            y: 3.0,
            locked: false,
            smashed: false,
            rot: None,
            attributes: Vec::new(),
        };
        e.transform(&Transform::new(180.0, 0.0, 0.0));
        assert_eq!((e.x, e.y), (-2.0, -3.0));
        assert_eq!(e.rot.unwrap().to_string(), "R180");
    }
}
