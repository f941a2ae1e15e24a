//! Structured field-record decoding
//!
//! The later description generation groups shapes per kind key, each group a
//! mapping from index to a field record, and nests the same grouping inside
//! every FOOTPRINT record. Decoding walks the groups in a fixed kind order,
//! flattening footprint members into the store with the owning footprint's
//! group id stamped on them.

use super::{bool_field, num, num_field, str_field, UnknownShapePolicy};
use crate::board::layer::Layer;
use crate::board::shape::{
    Arc, ArcGeometry, Circle, Footprint, Hole, ModelRef, Pad, Shape, Track, Via,
};
use crate::board::store::ShapeStore;
use crate::board::units::{dist_to_mm, Offset};
use crate::error::{DecodeError, Result};
use crate::geom::types::Point;
use serde_json::Value;
use tracing::{debug, warn};

/// Kind keys a document may group shapes under, in traversal order.
const SHAPE_TYPE_KEYS: [&str; 12] = [
    "COPPERAREA",
    "TRACK",
    "PAD",
    "VIA",
    "TEXT",
    "FOOTPRINT",
    "ARC",
    "RECT",
    "CIRCLE",
    "SOLIDREGION",
    "HOLE",
    "SVGNODE",
];

/// Decode a whole structured board document into a populated store.
pub fn parse_document(doc: &Value, policy: UnknownShapePolicy) -> Result<ShapeStore> {
    let head = doc.get("head").cloned().unwrap_or(Value::Null);
    let offset = Offset::new(
        num_field(&head, "x").unwrap_or(f64::NAN),
        num_field(&head, "y").unwrap_or(f64::NAN),
    )?;
    let mut store = ShapeStore::new(offset, policy);

    let layers = doc
        .get("layers")
        .and_then(Value::as_object)
        .ok_or_else(|| DecodeError::Document {
            detail: "'layers' must be a mapping from layer id to record".to_string(),
        })?;
    for (id, record) in layers {
        store.add_layer(parse_layer(id, record)?);
    }

    collect_shapes(doc, &mut store, None, policy)?;

    debug!(
        layers = store.layers().count(),
        shapes = store.shapes().len(),
        "decoded structured board description"
    );
    Ok(store)
}

fn parse_layer(id: &str, record: &Value) -> std::result::Result<Layer, DecodeError> {
    let id = id.trim().parse().map_err(|_| DecodeError::InvalidNumber {
        field: "layer id",
        value: id.to_string(),
    })?;
    Ok(Layer {
        id,
        name: require_str(record, "LAYER", "name")?.to_string(),
        color: str_field(record, "color").unwrap_or_default().to_string(),
        visible: bool_field(record, "visible").unwrap_or(true),
        editor_visible: bool_field(record, "pcbVisible").unwrap_or(true),
    })
}

/// Walk one grouping level, recursing into footprints.
fn collect_shapes(
    node: &Value,
    store: &mut ShapeStore,
    footprint_gid: Option<&str>,
    policy: UnknownShapePolicy,
) -> Result<()> {
    let offset = *store.offset();
    for kind in SHAPE_TYPE_KEYS {
        let Some(group) = node.get(kind).and_then(Value::as_object) else {
            continue;
        };
        for record in group.values() {
            match kind {
                "TRACK" => {
                    let track = parse_track(record, &offset)?;
                    push(store, Shape::Track(track), footprint_gid);
                }
                "VIA" => {
                    let via = parse_via(record, &offset)?;
                    push(store, Shape::Via(via), footprint_gid);
                }
                "PAD" => {
                    let pad = parse_pad(record, &offset)?;
                    push(store, Shape::Pad(pad), footprint_gid);
                }
                "ARC" => {
                    let arc = parse_arc(record, &offset)?;
                    push(store, Shape::Arc(arc), footprint_gid);
                }
                "CIRCLE" => {
                    let circle = parse_circle(record, &offset)?;
                    push(store, Shape::Circle(circle), footprint_gid);
                }
                "HOLE" => {
                    let hole = parse_hole(record, &offset)?;
                    push(store, Shape::Hole(hole), footprint_gid);
                }
                "FOOTPRINT" => {
                    let head = record.get("head").cloned().unwrap_or(Value::Null);
                    let gid = require_str(&head, "FOOTPRINT", "gId")?.to_string();
                    let layer_id = require_num(&head, "FOOTPRINT", "layerid")? as i32;
                    push(
                        store,
                        Shape::Footprint(Footprint {
                            id: gid.clone(),
                            layer_id,
                        }),
                        footprint_gid,
                    );
                    collect_shapes(record, store, Some(&gid), policy)?;
                }
                "SVGNODE" => match parse_model_ref(record, &offset)? {
                    Some(model) => push(store, Shape::ModelRef(model), footprint_gid),
                    None => {
                        debug!("skipping svg node that is not a 3D model reference");
                        push(
                            store,
                            Shape::Unsupported {
                                kind: kind.to_string(),
                            },
                            footprint_gid,
                        );
                    }
                },
                _ => match policy {
                    UnknownShapePolicy::Fail => {
                        return Err(DecodeError::UnknownKind {
                            kind: kind.to_string(),
                        }
                        .into())
                    }
                    UnknownShapePolicy::Skip => {
                        warn!(kind, "skipping shape kind with no decoder");
                        push(
                            store,
                            Shape::Unsupported {
                                kind: kind.to_string(),
                            },
                            footprint_gid,
                        );
                    }
                },
            }
        }
    }
    Ok(())
}

fn push(store: &mut ShapeStore, shape: Shape, footprint_gid: Option<&str>) {
    match footprint_gid {
        Some(gid) => store.push_nested(shape, gid),
        None => store.push(shape),
    }
}

fn parse_track(record: &Value, offset: &Offset) -> std::result::Result<Track, DecodeError> {
    Ok(Track {
        id: str_field(record, "gId").unwrap_or_default().to_string(),
        layer_id: require_num(record, "TRACK", "layerid")? as i32,
        net: net_field(record),
        width: dist_to_mm(num_field(record, "strokeWidth").unwrap_or(0.0)),
        locked: bool_field(record, "locked").unwrap_or(false),
        points: point_array(record, "TRACK", "pointArr", offset)?,
    })
}

fn parse_via(record: &Value, offset: &Offset) -> std::result::Result<Via, DecodeError> {
    Ok(Via {
        id: str_field(record, "gId").unwrap_or_default().to_string(),
        net: net_field(record),
        locked: bool_field(record, "locked").unwrap_or(false),
        center: offset.point_to_mm(
            require_num(record, "VIA", "x")?,
            require_num(record, "VIA", "y")?,
        ),
        diameter: dist_to_mm(num_field(record, "diameter").unwrap_or(0.0)),
        drill_diameter: dist_to_mm(require_num(record, "VIA", "holeR")?) * 2.0,
    })
}

fn parse_pad(record: &Value, offset: &Offset) -> std::result::Result<Pad, DecodeError> {
    let hole_center = record.get("holeCenter").and_then(|c| {
        Some(offset.point_to_mm(num_field(c, "x")?, num_field(c, "y")?))
    });
    let slot = match record.get("slotPointArr") {
        Some(_) => point_array(record, "PAD", "slotPointArr", offset)?,
        None => Vec::new(),
    };
    let plated = match record.get("plated") {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "Y",
        _ => false,
    };
    Ok(Pad {
        id: str_field(record, "gId").unwrap_or_default().to_string(),
        layer_id: require_num(record, "PAD", "layerid")? as i32,
        net: net_field(record),
        number: num_field(record, "number").map(|n| n as i32),
        locked: bool_field(record, "locked").unwrap_or(false),
        plated,
        shape_code: str_field(record, "shape").unwrap_or_default().to_string(),
        center: offset.point_to_mm(
            require_num(record, "PAD", "x")?,
            require_num(record, "PAD", "y")?,
        ),
        width: dist_to_mm(num_field(record, "width").unwrap_or(0.0)),
        height: dist_to_mm(num_field(record, "height").unwrap_or(0.0)),
        rotation: num_field(record, "rotation").unwrap_or(0.0),
        hole_diameter: dist_to_mm(num_field(record, "holeR").unwrap_or(0.0)) * 2.0,
        slot_length: dist_to_mm(num_field(record, "holeLength").unwrap_or(0.0)),
        solder_mask_expansion: dist_to_mm(
            num_field(record, "solderMaskExpansion").unwrap_or(0.0),
        ),
        hole_center,
        slot,
    })
}

/// Structured arcs arrive already sampled as a point polyline.
fn parse_arc(record: &Value, offset: &Offset) -> std::result::Result<Arc, DecodeError> {
    Ok(Arc {
        id: str_field(record, "gId").unwrap_or_default().to_string(),
        layer_id: require_num(record, "ARC", "layerid")? as i32,
        net: net_field(record),
        width: dist_to_mm(num_field(record, "strokeWidth").unwrap_or(0.0)),
        locked: bool_field(record, "locked").unwrap_or(false),
        geometry: ArcGeometry::Sampled(point_array(record, "ARC", "pointArr", offset)?),
    })
}

fn parse_circle(record: &Value, offset: &Offset) -> std::result::Result<Circle, DecodeError> {
    Ok(Circle {
        id: str_field(record, "gId").unwrap_or_default().to_string(),
        layer_id: require_num(record, "CIRCLE", "layerid")? as i32,
        center: offset.point_to_mm(
            require_num(record, "CIRCLE", "cx")?,
            require_num(record, "CIRCLE", "cy")?,
        ),
        radius: dist_to_mm(require_num(record, "CIRCLE", "r")?),
    })
}

fn parse_hole(record: &Value, offset: &Offset) -> std::result::Result<Hole, DecodeError> {
    Ok(Hole {
        id: str_field(record, "gId").unwrap_or_default().to_string(),
        center: offset.point_to_mm(
            require_num(record, "HOLE", "x")?,
            require_num(record, "HOLE", "y")?,
        ),
        diameter: dist_to_mm(require_num(record, "HOLE", "holeR")?) * 2.0,
    })
}

/// Decode an SVGNODE record into a model reference, or `None` when the node
/// is not a 3D model outline.
fn parse_model_ref(
    record: &Value,
    offset: &Offset,
) -> std::result::Result<Option<ModelRef>, DecodeError> {
    let attrs = record.get("attrs").cloned().unwrap_or(Value::Null);
    if str_field(&attrs, "c_etype") != Some("outline3D") {
        return Ok(None);
    }

    let origin_raw = require_str(&attrs, "SVGNODE", "c_origin")?;
    let origin_parts = parse_number_list(origin_raw, "c_origin")?;
    if origin_parts.len() != 2 {
        return Err(DecodeError::InvalidNumber {
            field: "c_origin",
            value: origin_raw.to_string(),
        });
    }

    let rotation_raw = str_field(&attrs, "c_rotation").unwrap_or("0,0,0");
    let rotation_parts = parse_number_list(rotation_raw, "c_rotation")?;
    if rotation_parts.len() != 3 {
        return Err(DecodeError::InvalidNumber {
            field: "c_rotation",
            value: rotation_raw.to_string(),
        });
    }

    Ok(Some(ModelRef {
        id: str_field(record, "gId").unwrap_or_default().to_string(),
        uuid: require_str(&attrs, "SVGNODE", "uuid")?.to_string(),
        width: dist_to_mm(require_num(&attrs, "SVGNODE", "c_width")?),
        rotation: [rotation_parts[0], rotation_parts[1], rotation_parts[2]],
        origin: offset.point_to_mm(origin_parts[0], origin_parts[1]),
    }))
}

fn net_field(record: &Value) -> Option<String> {
    super::optional_net(str_field(record, "net").unwrap_or(""))
}

fn require_str<'a>(
    record: &'a Value,
    kind: &'static str,
    field: &'static str,
) -> std::result::Result<&'a str, DecodeError> {
    str_field(record, field).ok_or(DecodeError::MissingField { kind, field })
}

fn require_num(
    record: &Value,
    kind: &'static str,
    field: &'static str,
) -> std::result::Result<f64, DecodeError> {
    num_field(record, field).ok_or(DecodeError::MissingField { kind, field })
}

fn parse_number_list(raw: &str, field: &'static str) -> std::result::Result<Vec<f64>, DecodeError> {
    raw.split(',')
        .map(|part| {
            part.trim().parse().map_err(|_| DecodeError::InvalidNumber {
                field,
                value: raw.to_string(),
            })
        })
        .collect()
}

/// Read an array of `{x, y}` records into converted points.
fn point_array(
    record: &Value,
    kind: &'static str,
    field: &'static str,
    offset: &Offset,
) -> std::result::Result<Vec<Point>, DecodeError> {
    let entries = record
        .get(field)
        .and_then(Value::as_array)
        .ok_or(DecodeError::MissingField { kind, field })?;
    entries
        .iter()
        .map(|entry| {
            let x = entry
                .get("x")
                .and_then(num)
                .ok_or(DecodeError::MissingField { kind, field })?;
            let y = entry
                .get("y")
                .and_then(num)
                .ok_or(DecodeError::MissingField { kind, field })?;
            Ok(offset.point_to_mm(x, y))
        })
        .collect()
}
