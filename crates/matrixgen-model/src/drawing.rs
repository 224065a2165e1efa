use matrixgen_grid::Transform;

use crate::Rot;

pub(crate) fn turn_rot(rot: &mut Option<Rot>, t: &Transform) {
    if t.rotates() {
        let current = rot.unwrap_or(Rot {
            mirror: false,
            angle: 0.0,
        });
        *rot = Some(current.turned(t.angle));
    }
}

/// Drawn line, `<wire>` in both documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub layer: u32,
    pub curve: Option<f64>,
    pub style: Option<String>,
    pub cap: Option<String>,
}

impl Wire {
    pub fn transform(&mut self, t: &Transform) {
        t.apply_pair(&mut self.x1, &mut self.y1);
        t.apply_pair(&mut self.x2, &mut self.y2);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    pub x: f64,
    pub y: f64,
}

impl Junction {
    pub fn transform(&mut self, t: &Transform) {
        t.apply_pair(&mut self.x, &mut self.y);
    }
}

/// Net-name flag on a schematic segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub layer: u32,
    pub font: Option<String>,
    pub ratio: Option<u32>,
    pub rot: Option<Rot>,
    pub xref: bool,
}

impl Label {
    pub fn transform(&mut self, t: &Transform) {
        t.apply_pair(&mut self.x, &mut self.y);
        turn_rot(&mut self.rot, t);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Via {
    pub x: f64,
    pub y: f64,
    pub extent: String,
    pub drill: f64,
    pub diameter: Option<f64>,
    pub shape: Option<String>,
}

impl Via {
    pub fn transform(&mut self, t: &Transform) {
        t.apply_pair(&mut self.x, &mut self.y);
    }
}

/// Copper pour belonging to a board signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub width: f64,
    pub layer: u32,
    pub spacing: Option<f64>,
    pub isolate: Option<f64>,
    pub orphans: Option<bool>,
    pub thermals: Option<bool>,
    pub rank: Option<u32>,
    pub vertices: Vec<Vertex>,
}

impl Polygon {
    pub fn transform(&mut self, t: &Transform) {
        for v in &mut self.vertices {
            t.apply_pair(&mut v.x, &mut v.y);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub curve: Option<f64>,
}
