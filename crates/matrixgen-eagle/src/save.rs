use std::ops::Range;

use matrixgen_model::{
    Element, ElementAttribute, Instance, Label, Net, Part, Polygon, Rot, Segment, SegmentItem,
    Signal, SignalItem, Via, Wire,
};

/// Replace each span of the original document text with freshly rendered
/// markup. Spans come from the loader and never overlap.
pub(crate) fn splice(text: &str, mut replacements: Vec<(Range<usize>, String)>) -> String {
    replacements.sort_by_key(|(range, _)| range.start);
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (range, replacement) in replacements {
        out.push_str(&text[cursor..range.start]);
        out.push_str(&replacement);
        cursor = range.end;
    }
    out.push_str(&text[cursor..]);
    out
}

pub(crate) fn render_parts(parts: &[Part]) -> String {
    let mut out = String::from("<parts>\n");
    for p in parts {
        out.push_str("<part");
        attr(&mut out, "name", &p.name);
        attr(&mut out, "library", &p.library);
        attr(&mut out, "deviceset", &p.deviceset);
        attr(&mut out, "device", &p.device);
        if let Some(technology) = &p.technology {
            attr(&mut out, "technology", technology);
        }
        if let Some(value) = &p.value {
            attr(&mut out, "value", value);
        }
        out.push_str("/>\n");
    }
    out.push_str("</parts>");
    out
}

pub(crate) fn render_instances(instances: &[Instance]) -> String {
    let mut out = String::from("<instances>\n");
    for i in instances {
        out.push_str("<instance");
        attr(&mut out, "part", &i.part);
        attr(&mut out, "gate", &i.gate);
        num_attr(&mut out, "x", i.x);
        num_attr(&mut out, "y", i.y);
        if i.smashed {
            attr(&mut out, "smashed", "yes");
        }
        rot_attr(&mut out, i.rot);
        out.push_str("/>\n");
    }
    out.push_str("</instances>");
    out
}

pub(crate) fn render_nets(nets: &[Net]) -> String {
    let mut out = String::from("<nets>\n");
    for net in nets {
        out.push_str("<net");
        attr(&mut out, "name", &net.name);
        if let Some(class) = &net.class {
            attr(&mut out, "class", class);
        }
        out.push_str(">\n");
        for segment in &net.segments {
            render_segment(&mut out, segment);
        }
        out.push_str("</net>\n");
    }
    out.push_str("</nets>");
    out
}

fn render_segment(out: &mut String, segment: &Segment) {
    out.push_str("<segment>\n");
    for item in &segment.items {
        match item {
            SegmentItem::PinRef(r) => {
                out.push_str("<pinref");
                attr(out, "part", &r.part);
                attr(out, "gate", &r.gate);
                attr(out, "pin", &r.pin);
                out.push_str("/>\n");
            }
            SegmentItem::Wire(w) => render_wire(out, w),
            SegmentItem::Junction(j) => {
                out.push_str("<junction");
                num_attr(out, "x", j.x);
                num_attr(out, "y", j.y);
                out.push_str("/>\n");
            }
            SegmentItem::Label(l) => render_label(out, l),
        }
    }
    out.push_str("</segment>\n");
}

fn render_wire(out: &mut String, w: &Wire) {
    out.push_str("<wire");
    num_attr(out, "x1", w.x1);
    num_attr(out, "y1", w.y1);
    num_attr(out, "x2", w.x2);
    num_attr(out, "y2", w.y2);
    num_attr(out, "width", w.width);
    attr(out, "layer", &w.layer.to_string());
    if let Some(curve) = w.curve {
        num_attr(out, "curve", curve);
    }
    if let Some(style) = &w.style {
        attr(out, "style", style);
    }
    if let Some(cap) = &w.cap {
        attr(out, "cap", cap);
    }
    out.push_str("/>\n");
}

fn render_label(out: &mut String, l: &Label) {
    out.push_str("<label");
    num_attr(out, "x", l.x);
    num_attr(out, "y", l.y);
    num_attr(out, "size", l.size);
    attr(out, "layer", &l.layer.to_string());
    if let Some(font) = &l.font {
        attr(out, "font", font);
    }
    if let Some(ratio) = l.ratio {
        attr(out, "ratio", &ratio.to_string());
    }
    rot_attr(out, l.rot);
    if l.xref {
        attr(out, "xref", "yes");
    }
    out.push_str("/>\n");
}

pub(crate) fn render_elements(elements: &[Element]) -> String {
    let mut out = String::from("<elements>\n");
    for e in elements {
        out.push_str("<element");
        attr(&mut out, "name", &e.name);
        attr(&mut out, "library", &e.library);
        attr(&mut out, "package", &e.package);
        attr(&mut out, "value", &e.value);
        num_attr(&mut out, "x", e.x);
        num_attr(&mut out, "y", e.y);
        if e.locked {
            attr(&mut out, "locked", "yes");
        }
        if e.smashed {
            attr(&mut out, "smashed", "yes");
        }
        rot_attr(&mut out, e.rot);
        if e.attributes.is_empty() {
            out.push_str("/>\n");
        } else {
            out.push_str(">\n");
            for a in &e.attributes {
                render_element_attribute(&mut out, a);
            }
            out.push_str("</element>\n");
        }
    }
    out.push_str("</elements>");
    out
}

fn render_element_attribute(out: &mut String, a: &ElementAttribute) {
    out.push_str("<attribute");
    attr(out, "name", &a.name);
    if let Some(value) = &a.value {
        attr(out, "value", value);
    }
    if let Some([x, y]) = a.pos {
        num_attr(out, "x", x);
        num_attr(out, "y", y);
    }
    if let Some(size) = a.size {
        num_attr(out, "size", size);
    }
    if let Some(layer) = a.layer {
        attr(out, "layer", &layer.to_string());
    }
    if let Some(font) = &a.font {
        attr(out, "font", font);
    }
    if let Some(ratio) = a.ratio {
        attr(out, "ratio", &ratio.to_string());
    }
    rot_attr(out, a.rot);
    if let Some(display) = &a.display {
        attr(out, "display", display);
    }
    out.push_str("/>\n");
}

pub(crate) fn render_signals(signals: &[Signal]) -> String {
    let mut out = String::from("<signals>\n");
    for signal in signals {
        out.push_str("<signal");
        attr(&mut out, "name", &signal.name);
        if let Some(class) = &signal.class {
            attr(&mut out, "class", class);
        }
        out.push_str(">\n");
        for item in &signal.items {
            match item {
                SignalItem::ContactRef(r) => {
                    out.push_str("<contactref");
                    attr(&mut out, "element", &r.element);
                    attr(&mut out, "pad", &r.pad);
                    if let Some(route) = &r.route {
                        attr(&mut out, "route", route);
                    }
                    if let Some(routetag) = &r.routetag {
                        attr(&mut out, "routetag", routetag);
                    }
                    out.push_str("/>\n");
                }
                SignalItem::Wire(w) => render_wire(&mut out, w),
                SignalItem::Via(v) => render_via(&mut out, v),
                SignalItem::Polygon(p) => render_polygon(&mut out, p),
            }
        }
        out.push_str("</signal>\n");
    }
    out.push_str("</signals>");
    out
}

fn render_via(out: &mut String, v: &Via) {
    out.push_str("<via");
    num_attr(out, "x", v.x);
    num_attr(out, "y", v.y);
    attr(out, "extent", &v.extent);
    num_attr(out, "drill", v.drill);
    if let Some(diameter) = v.diameter {
        num_attr(out, "diameter", diameter);
    }
    if let Some(shape) = &v.shape {
        attr(out, "shape", shape);
    }
    out.push_str("/>\n");
}

fn render_polygon(out: &mut String, p: &Polygon) {
    out.push_str("<polygon");
    num_attr(out, "width", p.width);
    attr(out, "layer", &p.layer.to_string());
    if let Some(spacing) = p.spacing {
        num_attr(out, "spacing", spacing);
    }
    if let Some(isolate) = p.isolate {
        num_attr(out, "isolate", isolate);
    }
    if let Some(orphans) = p.orphans {
        attr(out, "orphans", if orphans { "yes" } else { "no" });
    }
    if let Some(thermals) = p.thermals {
        attr(out, "thermals", if thermals { "yes" } else { "no" });
    }
    if let Some(rank) = p.rank {
        attr(out, "rank", &rank.to_string());
    }
    out.push_str(">\n");
    for v in &p.vertices {
        out.push_str("<vertex");
        num_attr(out, "x", v.x);
        num_attr(out, "y", v.y);
        if let Some(curve) = v.curve {
            num_attr(out, "curve", curve);
        }
        out.push_str("/>\n");
    }
    out.push_str("</polygon>\n");
}

fn attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

fn num_attr(out: &mut String, name: &str, value: f64) {
    attr(out, name, &fmt_num(value));
}

fn rot_attr(out: &mut String, rot: Option<Rot>) {
    if let Some(rot) = rot {
        attr(out, "rot", &rot.to_string());
    }
}

fn fmt_num(v: f64) -> String {
    let v = if v.abs() < 1e-9 { 0.0 } else { v };
    let mut buf = ryu::Buffer::new();
    let s = buf.format(v);
    s.strip_suffix(".0").unwrap_or(s).to_string()
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_drop_trailing_zero_and_snap_residue() {
        assert_eq!(fmt_num(10.0), "10");
        assert_eq!(fmt_num(-10.16), "-10.16");
        assert_eq!(fmt_num(1.5e-12), "0");
        assert_eq!(fmt_num(0.1524), "0.1524");
    }

    #[test]
    fn attribute_values_are_escaped() {
        assert_eq!(escape("A&B"), "A&amp;B");
        assert_eq!(escape("\"<>\""), "&quot;&lt;&gt;&quot;");
        assert_eq!(escape("GND"), "GND");
    }

    #[test]
    fn splice_replaces_spans_in_order() {
        let text = "aaa[one]bbb[two]ccc";
        let out = splice(
            text,
            vec![(11..16, "2".to_string()), (3..8, "1".to_string())],
        );
        assert_eq!(out, "aaa1bbb2ccc");
    }
}
