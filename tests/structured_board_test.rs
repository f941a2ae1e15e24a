// End-to-end checks for the structured per-type description format
use pcb3d::board::decode::{structured, UnknownShapePolicy};
use pcb3d::geom::types::ring_bbox;
use pcb3d::{model_refs, resolve_placement, Board, ModelBounds, ShapeKind, BOARD_THICKNESS};
use serde_json::json;

/// A board with a rectangular outline, a via, a bare hole, and a
/// bottom-side footprint holding a slotted pad and a 3D model reference.
fn board_doc() -> serde_json::Value {
    json!({
        "head": { "x": 4000, "y": 3000 },
        "layers": {
            "1": { "name": "TopLayer", "color": "#FF0000" },
            "2": { "name": "BottomLayer", "color": "#0000FF" },
            "10": { "name": "BoardOutLine", "color": "#FF00FF" }
        },
        "TRACK": {
            "0": {
                "gId": "t1",
                "layerid": "10",
                "strokeWidth": 1,
                "pointArr": [
                    { "x": 4000, "y": 3000 },
                    { "x": 4100, "y": 3000 },
                    { "x": 4100, "y": 2950 },
                    { "x": 4000, "y": 2950 },
                    { "x": 4000, "y": 3000 }
                ]
            }
        },
        "VIA": {
            "0": { "gId": "v1", "x": 4050, "y": 2975, "diameter": 6, "holeR": 2 }
        },
        "HOLE": {
            "0": { "gId": "h1", "x": 4090, "y": 2995, "holeR": 3 }
        },
        "FOOTPRINT": {
            "0": {
                "head": { "gId": "g1", "layerid": "2" },
                "PAD": {
                    "0": {
                        "gId": "p1",
                        "layerid": "2",
                        "x": 4020, "y": 2990,
                        "width": 4, "height": 8,
                        "holeR": 2,
                        "slotPointArr": [
                            { "x": 4018, "y": 2990 },
                            { "x": 4022, "y": 2990 }
                        ]
                    }
                },
                "SVGNODE": {
                    "0": {
                        "gId": "m1",
                        "attrs": {
                            "c_etype": "outline3D",
                            "uuid": "abc123",
                            "c_width": "100",
                            "c_rotation": "0,0,90",
                            "c_origin": "4050,2980"
                        }
                    }
                }
            }
        }
    })
}

#[test]
fn border_and_every_hole_kind_are_extracted() -> anyhow::Result<()> {
    let store = structured::parse_document(&board_doc(), UnknownShapePolicy::Skip)?;
    let board = Board::new(store);
    let outline = board.outline()?;

    let (min, max) = ring_bbox(&outline.border).unwrap();
    assert!((min.x - 0.15).abs() < 1e-9 && (min.y - 0.15).abs() < 1e-9);
    assert!((max.x - 25.25).abs() < 1e-9 && (max.y - 12.55).abs() < 1e-9);

    // Via drill, bare hole, slotted pad hole
    assert_eq!(outline.holes.len(), 3);

    // The via drill: 0.508 mm radius at (12.7, 6.35)
    let (via_min, via_max) = ring_bbox(&outline.holes[0]).unwrap();
    assert!((via_min.x - 12.192).abs() < 1e-9 && (via_max.x - 13.208).abs() < 1e-9);
    assert!((via_min.y - 5.842).abs() < 1e-9 && (via_max.y - 6.858).abs() < 1e-9);

    // The slotted pad hole: the 1.016 mm slot buffered at 0.508 mm
    let (slot_min, slot_max) = ring_bbox(&outline.holes[1]).unwrap();
    assert!((slot_min.x - 4.064).abs() < 1e-9 && (slot_max.x - 6.096).abs() < 1e-9);
    assert!((slot_min.y - 2.032).abs() < 1e-9 && (slot_max.y - 3.048).abs() < 1e-9);

    // The bare hole: 0.762 mm radius at (22.86, 1.27)
    let (hole_min, hole_max) = ring_bbox(&outline.holes[2]).unwrap();
    assert!((hole_min.x - 22.098).abs() < 1e-9 && (hole_max.x - 23.622).abs() < 1e-9);
    Ok(())
}

#[test]
fn nested_shapes_resolve_their_footprint_by_group_id() -> anyhow::Result<()> {
    let store = structured::parse_document(&board_doc(), UnknownShapePolicy::Skip)?;
    let pads = store.shapes_of_kinds(&[ShapeKind::Pad]);
    assert_eq!(pads.len(), 1);
    let gid = pads[0].footprint_gid.as_deref().unwrap();
    assert_eq!(gid, "g1");
    let parent = store.shape_by_gid(gid)?;
    assert_eq!(parent.shape.kind(), ShapeKind::Footprint);
    Ok(())
}

#[test]
fn bottom_side_model_is_flipped_onto_the_underside() -> anyhow::Result<()> {
    let store = structured::parse_document(&board_doc(), UnknownShapePolicy::Skip)?;
    let models = model_refs(&store);
    assert_eq!(models.len(), 1);
    let (model, gid) = models[0];
    assert_eq!(model.uuid, "abc123");

    let raw = ModelBounds {
        min: [-1.0, -1.0, 0.0],
        max: [1.0, 1.0, 2.0],
    };
    let oriented = ModelBounds {
        min: [-5.0, -5.0, 0.0],
        max: [15.0, 5.0, 10.0],
    };
    let transform = resolve_placement(&store, model, gid, &raw, &oriented)?;
    assert!(transform.bottom);
    assert_eq!(transform.scale, 12.7);
    assert_eq!(transform.recenter, [-5.0, 0.0]);
    assert_eq!(transform.translation, [12.7, 5.08, 0.0]);
    assert!((transform.rotation[2] - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

    // The same model on a top-side footprint sits at board thickness
    let top_doc = {
        let mut doc = board_doc();
        doc["FOOTPRINT"]["0"]["head"]["layerid"] = json!("1");
        doc
    };
    let store = structured::parse_document(&top_doc, UnknownShapePolicy::Skip)?;
    let models = model_refs(&store);
    let (model, gid) = models[0];
    let transform = resolve_placement(&store, model, gid, &raw, &oriented)?;
    assert!(!transform.bottom);
    assert_eq!(transform.translation[2], BOARD_THICKNESS);
    Ok(())
}

#[test]
fn outline_result_is_reused_across_calls() -> anyhow::Result<()> {
    let store = structured::parse_document(&board_doc(), UnknownShapePolicy::Skip)?;
    let board = Board::new(store);
    let first = board.outline()? as *const _;
    let second = board.outline()? as *const _;
    assert!(std::ptr::eq(first, second));

    let centroid = board.centroid()?;
    assert!((centroid.x - 12.7).abs() < 1e-9);
    assert!((centroid.y - 6.35).abs() < 1e-9);
    Ok(())
}
