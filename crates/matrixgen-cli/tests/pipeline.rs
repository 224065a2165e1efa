//! Full load -> replicate -> save round trips over on-disk fixtures, the
//! way the binary drives the library crates.

use std::fs;

use matrixgen_eagle::{LoadedBoard, LoadedSchematic};
use matrixgen_engine::replicate_matrix;
use matrixgen_grid::GridOptions;
use matrixgen_model::is_template;

const SCH: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE eagle SYSTEM "eagle.dtd">
<eagle version="6.5.0">
<drawing>
<schematic>
<libraries/>
<classes>
<class number="0" name="default" width="0" drill="0">
</class>
</classes>
<parts>
<part name="LED_" library="led" deviceset="WS2812" device=""/>
<part name="J1" library="con" deviceset="PINHD-1X2" device=""/>
</parts>
<sheets>
<sheet>
<plain/>
<instances>
<instance part="LED_" gate="G$1" x="10" y="20"/>
<instance part="J1" gate="A" x="-20" y="0"/>
</instances>
<busses/>
<nets>
<net name="GND" class="0">
<segment>
<pinref part="LED_" gate="G$1" pin="GND"/>
<pinref part="J1" gate="A" pin="2"/>
</segment>
</net>
<net name="DIN_" class="0">
<segment>
<pinref part="LED_" gate="G$1" pin="DIN"/>
<pinref part="J1" gate="A" pin="1"/>
</segment>
</net>
<net name="DOUT_" class="0">
<segment>
<pinref part="LED_" gate="G$1" pin="DOUT"/>
</segment>
</net>
</nets>
</sheet>
</sheets>
</schematic>
</drawing>
</eagle>
"#;

const BRD: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE eagle SYSTEM "eagle.dtd">
<eagle version="6.5.0">
<drawing>
<board>
<plain/>
<libraries/>
<elements>
<element name="LED_" library="led" package="LED5050" value="" x="0" y="0"/>
<element name="J1" library="con" package="1X02" value="" x="-15" y="0"/>
</elements>
<signals>
<signal name="GND">
<contactref element="LED_" pad="GND"/>
<contactref element="J1" pad="2"/>
</signal>
<signal name="DIN_">
<contactref element="LED_" pad="DIN"/>
<contactref element="J1" pad="1"/>
</signal>
<signal name="DOUT_">
<contactref element="LED_" pad="DOUT"/>
</signal>
</signals>
</board>
</drawing>
</eagle>
"#;

fn options(rows: usize, cols: usize) -> GridOptions {
    GridOptions {
        rows,
        cols,
        spacing: [10.0, -10.0],
        schematic_spacing: [40.0, -40.0],
        zigzag: false,
        copy_region: None,
    }
}

#[test]
fn one_led_design_replicates_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let sch_path = dir.path().join("one_led.sch");
    let brd_path = dir.path().join("one_led.brd");
    fs::write(&sch_path, SCH).unwrap();
    fs::write(&brd_path, BRD).unwrap();

    let mut schematic =
        LoadedSchematic::parse(&fs::read_to_string(&sch_path).unwrap()).unwrap();
    let mut board = LoadedBoard::parse(&fs::read_to_string(&brd_path).unwrap()).unwrap();

    let report =
        replicate_matrix(&mut schematic.schematic, &mut board.board, &options(2, 2)).unwrap();
    assert_eq!(report.schematic.replicas, 8);

    let out_sch = dir.path().join("one_ledmatrix.sch");
    let out_brd = dir.path().join("one_ledmatrix.brd");
    fs::write(&out_sch, schematic.to_xml()).unwrap();
    fs::write(&out_brd, board.to_xml()).unwrap();

    // the written documents parse back and carry the replicated design
    let sch = LoadedSchematic::parse(&fs::read_to_string(&out_sch).unwrap()).unwrap();
    let brd = LoadedBoard::parse(&fs::read_to_string(&out_brd).unwrap()).unwrap();

    let part_names: Vec<&str> = sch
        .schematic
        .parts
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(part_names, vec!["J1", "LED_1", "LED_2", "LED_3", "LED_4"]);

    let element_positions: Vec<(f64, f64)> = brd
        .board
        .elements
        .iter()
        .filter(|e| e.name.starts_with("LED_"))
        .map(|e| (e.x, e.y))
        .collect();
    assert_eq!(
        element_positions,
        vec![(0.0, 0.0), (10.0, 0.0), (0.0, -10.0), (10.0, -10.0)]
    );

    let net_names: Vec<&str> = sch.schematic.nets.iter().map(|n| n.name.as_str()).collect();
    assert!(net_names.contains(&"DIN"));
    assert!(net_names.contains(&"DMID_1"));
    assert!(net_names.contains(&"DMID_2"));
    assert!(net_names.contains(&"DMID_3"));
    assert!(net_names.contains(&"DOUT"));

    for net in &sch.schematic.nets {
        assert!(!is_template(&net.name));
        for segment in &net.segments {
            for pinref in segment.pinrefs() {
                assert!(!is_template(&pinref.part));
            }
        }
    }
    for signal in &brd.board.signals {
        assert!(!is_template(&signal.name));
        for contactref in signal.contactrefs() {
            assert!(!is_template(&contactref.element));
        }
    }
}

#[test]
fn shared_connector_stays_wired_to_the_first_position() {
    let mut schematic = LoadedSchematic::parse(SCH).unwrap();
    let mut board = LoadedBoard::parse(BRD).unwrap();
    replicate_matrix(&mut schematic.schematic, &mut board.board, &options(1, 3)).unwrap();

    // DIN_ carried a pinref to the shared connector J1; only template refs
    // were renumbered, so the external DIN net still reaches it
    let din = schematic
        .schematic
        .nets
        .iter()
        .find(|n| n.name == "DIN")
        .unwrap();
    let refs: Vec<(&str, &str)> = din
        .segments
        .iter()
        .flat_map(|s| s.pinrefs())
        .map(|r| (r.part.as_str(), r.pin.as_str()))
        .collect();
    assert!(refs.contains(&("J1", "1")));
    assert!(refs.contains(&("LED_1", "DIN")));

    // MID links clone the input template wholesale: template refs are
    // renumbered, shared refs ride along verbatim
    let mid = schematic
        .schematic
        .nets
        .iter()
        .find(|n| n.name == "DMID_1")
        .unwrap();
    let refs: Vec<&str> = mid
        .segments
        .iter()
        .flat_map(|s| s.pinrefs())
        .map(|r| r.part.as_str())
        .collect();
    assert_eq!(refs, vec!["LED_2", "J1", "LED_1"]);
}
