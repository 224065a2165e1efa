use std::ops::Range;

use matrixgen_model::{
    Board, ContactRef, Element, ElementAttribute, Instance, Junction, Label, Net, Part, PinRef,
    Polygon, Rot, Schematic, Segment, SegmentItem, Signal, SignalItem, Vertex, Via, Wire,
};
use roxmltree::{Document, Node, ParsingOptions};

use crate::save;
use crate::EagleError;

/// EAGLE documents always carry a `<!DOCTYPE eagle SYSTEM "eagle.dtd">`
/// declaration, which roxmltree rejects unless DTDs are explicitly allowed.
fn parse_document(text: &str) -> Result<Document<'_>, EagleError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(text, options)?)
}

/// A parsed schematic plus everything needed to write it back: the original
/// text and the byte spans of the collections the engine rewrites.
#[derive(Debug)]
pub struct LoadedSchematic {
    pub schematic: Schematic,
    text: String,
    parts_span: Range<usize>,
    instances_span: Range<usize>,
    nets_span: Range<usize>,
}

impl LoadedSchematic {
    pub fn parse(text: &str) -> Result<Self, EagleError> {
        let doc = parse_document(text)?;
        let root = doc.root_element();
        if root.tag_name().name() != "eagle" {
            return Err(EagleError::MissingElement("eagle"));
        }
        let drawing = child(root, "drawing")?;
        let schematic_node = child(drawing, "schematic")?;
        let parts_node = child(schematic_node, "parts")?;
        // Only the first sheet takes part in the transform; later sheets
        // round-trip untouched.
        let sheet = child(child(schematic_node, "sheets")?, "sheet")?;
        let instances_node = child(sheet, "instances")?;
        let nets_node = child(sheet, "nets")?;

        let mut schematic = Schematic::default();
        for node in elements(parts_node) {
            expect_tag(node, "parts", "part")?;
            schematic.parts.push(parse_part(node)?);
        }
        for node in elements(instances_node) {
            expect_tag(node, "instances", "instance")?;
            schematic.instances.push(parse_instance(node)?);
        }
        for node in elements(nets_node) {
            expect_tag(node, "nets", "net")?;
            schematic.nets.push(parse_net(node)?);
        }

        Ok(Self {
            schematic,
            text: text.to_string(),
            parts_span: parts_node.range(),
            instances_span: instances_node.range(),
            nets_span: nets_node.range(),
        })
    }

    /// Render the (possibly transformed) collections back into the original
    /// document text.
    #[must_use]
    pub fn to_xml(&self) -> String {
        save::splice(
            &self.text,
            vec![
                (self.parts_span.clone(), save::render_parts(&self.schematic.parts)),
                (
                    self.instances_span.clone(),
                    save::render_instances(&self.schematic.instances),
                ),
                (self.nets_span.clone(), save::render_nets(&self.schematic.nets)),
            ],
        )
    }
}

/// Board counterpart of [`LoadedSchematic`].
#[derive(Debug)]
pub struct LoadedBoard {
    pub board: Board,
    text: String,
    elements_span: Range<usize>,
    signals_span: Range<usize>,
}

impl LoadedBoard {
    pub fn parse(text: &str) -> Result<Self, EagleError> {
        let doc = parse_document(text)?;
        let root = doc.root_element();
        if root.tag_name().name() != "eagle" {
            return Err(EagleError::MissingElement("eagle"));
        }
        let drawing = child(root, "drawing")?;
        let board_node = child(drawing, "board")?;
        let elements_node = child(board_node, "elements")?;
        let signals_node = child(board_node, "signals")?;

        let mut board = Board::default();
        for node in elements(elements_node) {
            expect_tag(node, "elements", "element")?;
            board.elements.push(parse_element(node)?);
        }
        for node in elements(signals_node) {
            expect_tag(node, "signals", "signal")?;
            board.signals.push(parse_signal(node)?);
        }

        Ok(Self {
            board,
            text: text.to_string(),
            elements_span: elements_node.range(),
            signals_span: signals_node.range(),
        })
    }

    #[must_use]
    pub fn to_xml(&self) -> String {
        save::splice(
            &self.text,
            vec![
                (
                    self.elements_span.clone(),
                    save::render_elements(&self.board.elements),
                ),
                (self.signals_span.clone(), save::render_signals(&self.board.signals)),
            ],
        )
    }
}

fn child<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> Result<Node<'a, 'input>, EagleError> {
    elements(node)
        .find(|n| n.tag_name().name() == name)
        .ok_or(EagleError::MissingElement(name))
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

fn expect_tag(node: Node, parent: &'static str, expected: &str) -> Result<(), EagleError> {
    let tag = node.tag_name().name();
    if tag == expected {
        Ok(())
    } else {
        Err(EagleError::UnsupportedChild {
            parent,
            child: tag.to_string(),
        })
    }
}

fn req_attr<'a>(
    node: Node<'a, '_>,
    element: &'static str,
    attr: &'static str,
) -> Result<&'a str, EagleError> {
    node.attribute(attr)
        .ok_or(EagleError::MissingAttribute { element, attr })
}

fn parse_f64(element: &'static str, attr: &'static str, value: &str) -> Result<f64, EagleError> {
    value.parse().map_err(|_| EagleError::InvalidNumber {
        element,
        attr,
        value: value.to_string(),
    })
}

fn req_num(node: Node, element: &'static str, attr: &'static str) -> Result<f64, EagleError> {
    parse_f64(element, attr, req_attr(node, element, attr)?)
}

fn opt_num(
    node: Node,
    element: &'static str,
    attr: &'static str,
) -> Result<Option<f64>, EagleError> {
    node.attribute(attr)
        .map(|v| parse_f64(element, attr, v))
        .transpose()
}

fn req_u32(node: Node, element: &'static str, attr: &'static str) -> Result<u32, EagleError> {
    let value = req_attr(node, element, attr)?;
    value.parse().map_err(|_| EagleError::InvalidNumber {
        element,
        attr,
        value: value.to_string(),
    })
}

fn opt_u32(
    node: Node,
    element: &'static str,
    attr: &'static str,
) -> Result<Option<u32>, EagleError> {
    match node.attribute(attr) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| EagleError::InvalidNumber {
                element,
                attr,
                value: value.to_string(),
            }),
    }
}

/// Both halves of a coordinate pair, or neither. Half a pair is a structural
/// inconsistency and fails the load.
fn coord_pair(
    node: Node,
    element: &'static str,
    x: &'static str,
    y: &'static str,
) -> Result<Option<[f64; 2]>, EagleError> {
    match (node.attribute(x), node.attribute(y)) {
        (Some(xv), Some(yv)) => Ok(Some([
            parse_f64(element, x, xv)?,
            parse_f64(element, y, yv)?,
        ])),
        (None, None) => Ok(None),
        (Some(_), None) => Err(EagleError::MalformedGeometry {
            element,
            present: x,
            missing: y,
        }),
        (None, Some(_)) => Err(EagleError::MalformedGeometry {
            element,
            present: y,
            missing: x,
        }),
    }
}

fn req_pair(
    node: Node,
    element: &'static str,
    x: &'static str,
    y: &'static str,
) -> Result<[f64; 2], EagleError> {
    coord_pair(node, element, x, y)?.ok_or(EagleError::MissingAttribute { element, attr: x })
}

fn opt_rot(node: Node) -> Result<Option<Rot>, EagleError> {
    match node.attribute("rot") {
        None => Ok(None),
        Some(value) => Rot::parse(value)
            .map(Some)
            .ok_or_else(|| EagleError::InvalidRotation {
                value: value.to_string(),
            }),
    }
}

fn yes_flag(node: Node, attr: &str) -> bool {
    node.attribute(attr) == Some("yes")
}

fn opt_string(node: Node, attr: &str) -> Option<String> {
    node.attribute(attr).map(str::to_string)
}

fn parse_part(node: Node) -> Result<Part, EagleError> {
    Ok(Part {
        name: req_attr(node, "part", "name")?.to_string(),
        library: req_attr(node, "part", "library")?.to_string(),
        deviceset: req_attr(node, "part", "deviceset")?.to_string(),
        device: req_attr(node, "part", "device")?.to_string(),
        technology: opt_string(node, "technology"),
        value: opt_string(node, "value"),
    })
}

fn parse_instance(node: Node) -> Result<Instance, EagleError> {
    let [x, y] = req_pair(node, "instance", "x", "y")?;
    Ok(Instance {
        part: req_attr(node, "instance", "part")?.to_string(),
        gate: req_attr(node, "instance", "gate")?.to_string(),
        x,
        y,
        smashed: yes_flag(node, "smashed"),
        rot: opt_rot(node)?,
    })
}

fn parse_net(node: Node) -> Result<Net, EagleError> {
    let mut net = Net {
        name: req_attr(node, "net", "name")?.to_string(),
        class: opt_string(node, "class"),
        segments: Vec::new(),
    };
    for seg_node in elements(node) {
        expect_tag(seg_node, "net", "segment")?;
        net.segments.push(parse_segment(seg_node)?);
    }
    Ok(net)
}

fn parse_segment(node: Node) -> Result<Segment, EagleError> {
    let mut segment = Segment::default();
    for item in elements(node) {
        let parsed = match item.tag_name().name() {
            "pinref" => SegmentItem::PinRef(PinRef {
                part: req_attr(item, "pinref", "part")?.to_string(),
                gate: req_attr(item, "pinref", "gate")?.to_string(),
                pin: req_attr(item, "pinref", "pin")?.to_string(),
            }),
            "wire" => SegmentItem::Wire(parse_wire(item)?),
            "junction" => {
                let [x, y] = req_pair(item, "junction", "x", "y")?;
                SegmentItem::Junction(Junction { x, y })
            }
            "label" => SegmentItem::Label(parse_label(item)?),
            other => {
                return Err(EagleError::UnsupportedChild {
                    parent: "segment",
                    child: other.to_string(),
                });
            }
        };
        segment.items.push(parsed);
    }
    Ok(segment)
}

fn parse_wire(node: Node) -> Result<Wire, EagleError> {
    let [x1, y1] = req_pair(node, "wire", "x1", "y1")?;
    let [x2, y2] = req_pair(node, "wire", "x2", "y2")?;
    Ok(Wire {
        x1,
        y1,
        x2,
        y2,
        width: req_num(node, "wire", "width")?,
        layer: req_u32(node, "wire", "layer")?,
        curve: opt_num(node, "wire", "curve")?,
        style: opt_string(node, "style"),
        cap: opt_string(node, "cap"),
    })
}

fn parse_label(node: Node) -> Result<Label, EagleError> {
    let [x, y] = req_pair(node, "label", "x", "y")?;
    Ok(Label {
        x,
        y,
        size: req_num(node, "label", "size")?,
        layer: req_u32(node, "label", "layer")?,
        font: opt_string(node, "font"),
        ratio: opt_u32(node, "label", "ratio")?,
        rot: opt_rot(node)?,
        xref: yes_flag(node, "xref"),
    })
}

fn parse_element(node: Node) -> Result<Element, EagleError> {
    let [x, y] = req_pair(node, "element", "x", "y")?;
    let mut element = Element {
        name: req_attr(node, "element", "name")?.to_string(),
        library: req_attr(node, "element", "library")?.to_string(),
        package: req_attr(node, "element", "package")?.to_string(),
        value: req_attr(node, "element", "value")?.to_string(),
        x,
        y,
        locked: yes_flag(node, "locked"),
        smashed: yes_flag(node, "smashed"),
        rot: opt_rot(node)?,
        attributes: Vec::new(),
    };
    for attr_node in elements(node) {
        expect_tag(attr_node, "element", "attribute")?;
        element.attributes.push(parse_element_attribute(attr_node)?);
    }
    Ok(element)
}

fn parse_element_attribute(node: Node) -> Result<ElementAttribute, EagleError> {
    Ok(ElementAttribute {
        name: req_attr(node, "attribute", "name")?.to_string(),
        value: opt_string(node, "value"),
        pos: coord_pair(node, "attribute", "x", "y")?,
        size: opt_num(node, "attribute", "size")?,
        layer: opt_u32(node, "attribute", "layer")?,
        font: opt_string(node, "font"),
        ratio: opt_u32(node, "attribute", "ratio")?,
        rot: opt_rot(node)?,
        display: opt_string(node, "display"),
    })
}

fn parse_signal(node: Node) -> Result<Signal, EagleError> {
    let mut signal = Signal {
        name: req_attr(node, "signal", "name")?.to_string(),
        class: opt_string(node, "class"),
        items: Vec::new(),
    };
    for item in elements(node) {
        let parsed = match item.tag_name().name() {
            "contactref" => SignalItem::ContactRef(ContactRef {
                element: req_attr(item, "contactref", "element")?.to_string(),
                pad: req_attr(item, "contactref", "pad")?.to_string(),
                route: opt_string(item, "route"),
                routetag: opt_string(item, "routetag"),
            }),
            "wire" => SignalItem::Wire(parse_wire(item)?),
            "via" => SignalItem::Via(parse_via(item)?),
            "polygon" => SignalItem::Polygon(parse_polygon(item)?),
            other => {
                return Err(EagleError::UnsupportedChild {
                    parent: "signal",
                    child: other.to_string(),
                });
            }
        };
        signal.items.push(parsed);
    }
    Ok(signal)
}

fn parse_via(node: Node) -> Result<Via, EagleError> {
    let [x, y] = req_pair(node, "via", "x", "y")?;
    Ok(Via {
        x,
        y,
        extent: req_attr(node, "via", "extent")?.to_string(),
        drill: req_num(node, "via", "drill")?,
        diameter: opt_num(node, "via", "diameter")?,
        shape: opt_string(node, "shape"),
    })
}

fn parse_polygon(node: Node) -> Result<Polygon, EagleError> {
    let mut polygon = Polygon {
        width: req_num(node, "polygon", "width")?,
        layer: req_u32(node, "polygon", "layer")?,
        spacing: opt_num(node, "polygon", "spacing")?,
        isolate: opt_num(node, "polygon", "isolate")?,
        orphans: node.attribute("orphans").map(|v| v == "yes"),
        thermals: node.attribute("thermals").map(|v| v == "yes"),
        rank: opt_u32(node, "polygon", "rank")?,
        vertices: Vec::new(),
    };
    for vertex in elements(node) {
        expect_tag(vertex, "polygon", "vertex")?;
        let [x, y] = req_pair(vertex, "vertex", "x", "y")?;
        polygon.vertices.push(Vertex {
            x,
            y,
            curve: opt_num(vertex, "vertex", "curve")?,
        });
    }
    Ok(polygon)
}
