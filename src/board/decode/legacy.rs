//! Legacy delimited-record decoding
//!
//! Every shape is a single `~`-joined string whose first field is the kind
//! tag. Field positions are fixed per kind; distances arrive in hundredths
//! of an inch and are converted on the spot. Arc geometry is embedded as an
//! SVG-like path with two observed spellings of the same content:
//!
//! ```text
//! M4120.3937,2995.374 A3.937,3.937 0 0 1 4124.3307,2999.311
//! M 4241.5197 3524.5 A 7.0711 7.0711 0 1 1 4252.442 3531.3835
//! ```

use super::{num_field, optional_net, UnknownShapePolicy};
use crate::board::layer::Layer;
use crate::board::shape::{Arc, ArcGeometry, Pad, Shape, Track, Via};
use crate::board::store::ShapeStore;
use crate::board::units::{dist_to_mm, Offset};
use crate::error::{DecodeError, Result};
use crate::geom::types::Point;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

/// Kind tags that exist in the format but carry no geometry this pipeline
/// consumes. They are skipped without complaint in every revision.
const UNIMPLEMENTED_KINDS: [&str; 7] = [
    "COPPERAREA",
    "LIB",
    "RECT",
    "TEXT",
    "SOLIDREGION",
    "HOLE",
    "CIRCLE",
];

static ARC_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^M ?([0-9.]+)[, ]([0-9.]+) A ?([0-9.]+)[, ]([0-9.]+) ([01]) ([01]) ([01]) ([0-9.]+)[, ]([0-9.]+)$",
    )
    .expect("arc path pattern is valid")
});

/// Decode a whole legacy board document into a populated store.
pub fn parse_document(doc: &Value, policy: UnknownShapePolicy) -> Result<ShapeStore> {
    let head = doc.get("head").cloned().unwrap_or(Value::Null);
    let offset = Offset::new(
        num_field(&head, "x").unwrap_or(f64::NAN),
        num_field(&head, "y").unwrap_or(f64::NAN),
    )?;
    let mut store = ShapeStore::new(offset, policy);

    let layers = doc
        .get("layers")
        .and_then(Value::as_array)
        .ok_or_else(|| DecodeError::Document {
            detail: "'layers' must be a list of delimited strings".to_string(),
        })?;
    for source in layers {
        let source = source.as_str().ok_or_else(|| DecodeError::Document {
            detail: "layer entries must be strings".to_string(),
        })?;
        store.add_layer(parse_layer(source)?);
    }

    let shapes = doc
        .get("shape")
        .and_then(Value::as_array)
        .ok_or_else(|| DecodeError::Document {
            detail: "'shape' must be a list of delimited strings".to_string(),
        })?;
    for source in shapes {
        let source = source.as_str().ok_or_else(|| DecodeError::Document {
            detail: "shape entries must be strings".to_string(),
        })?;
        let parts: Vec<&str> = source.split('~').collect();
        match parts[0] {
            "TRACK" => store.push(Shape::Track(parse_track(&parts, &offset)?)),
            "VIA" => store.push(Shape::Via(parse_via(&parts, &offset)?)),
            "PAD" => store.push(Shape::Pad(parse_pad(&parts, &offset)?)),
            "ARC" => store.push(Shape::Arc(parse_arc(&parts, &offset)?)),
            kind if UNIMPLEMENTED_KINDS.contains(&kind) => {
                debug!(kind, "skipping shape kind with no geometric meaning here");
                store.push(Shape::Unsupported {
                    kind: kind.to_string(),
                });
            }
            kind => match policy {
                UnknownShapePolicy::Fail => {
                    return Err(DecodeError::UnknownKind {
                        kind: kind.to_string(),
                    }
                    .into())
                }
                UnknownShapePolicy::Skip => {
                    warn!(kind, "skipping unknown shape kind");
                    store.push(Shape::Unsupported {
                        kind: kind.to_string(),
                    });
                }
            },
        }
    }

    debug!(
        layers = store.layers().count(),
        shapes = store.shapes().len(),
        "decoded legacy board description"
    );
    Ok(store)
}

/// Decode one delimited layer record.
///
/// Six or seven `~` occur in the wild; when there are seven the final field
/// is always empty, so both counts are accepted and trailing fields beyond
/// the visibility flags are ignored.
pub fn parse_layer(source: &str) -> std::result::Result<Layer, DecodeError> {
    let parts: Vec<&str> = source.split('~').collect();
    if parts.len() != 7 && parts.len() != 8 {
        return Err(DecodeError::FieldCount {
            kind: "LAYER",
            count: parts.len(),
            expected: "7 or 8",
        });
    }
    Ok(Layer {
        id: parse_i32(parts[0], "layer id")?,
        name: parts[1].to_string(),
        color: parts[2].to_string(),
        visible: parts[3] == "true",
        editor_visible: parts[4] == "true",
    })
}

/// Decode a TRACK record: a stroked multi-point line.
pub fn parse_track(parts: &[&str], offset: &Offset) -> std::result::Result<Track, DecodeError> {
    expect_record(parts, "TRACK", 7)?;
    Ok(Track {
        id: parts[5].to_string(),
        layer_id: parse_i32(parts[2], "layer id")?,
        net: optional_net(parts[3]),
        width: dist_to_mm(parse_f64(parts[1], "width")?),
        locked: parts[6] == "1",
        points: parse_point_list(parts[4], "TRACK", offset)?,
    })
}

/// Decode a VIA record: a plated hole between layers.
pub fn parse_via(parts: &[&str], offset: &Offset) -> std::result::Result<Via, DecodeError> {
    expect_record(parts, "VIA", 8)?;
    Ok(Via {
        id: parts[6].to_string(),
        net: optional_net(parts[4]),
        locked: parts[7] == "1",
        center: offset.point_to_mm(
            parse_f64(parts[1], "center x")?,
            parse_f64(parts[2], "center y")?,
        ),
        diameter: dist_to_mm(parse_f64(parts[3], "diameter")?),
        // The record stores the drill radius
        drill_diameter: dist_to_mm(parse_f64(parts[5], "drill radius")? * 2.0),
    })
}

/// Decode a PAD record.
///
/// Twenty fields, several of which (outline polygon, extra point lists) are
/// left unparsed: the pipeline only consumes position, dimensions and hole
/// data.
pub fn parse_pad(parts: &[&str], offset: &Offset) -> std::result::Result<Pad, DecodeError> {
    expect_record(parts, "PAD", 20)?;
    let number = if parts[8].is_empty() {
        None
    } else {
        Some(parse_i32(parts[8], "pad number")?)
    };
    let rotation = if parts[11].is_empty() {
        0.0
    } else {
        parse_f64(parts[11], "rotation")?
    };
    Ok(Pad {
        id: parts[12].to_string(),
        layer_id: parse_i32(parts[6], "layer id")?,
        net: optional_net(parts[7]),
        number,
        locked: parts[16] == "1",
        plated: parts[15] == "Y",
        shape_code: parts[1].to_string(),
        center: offset.point_to_mm(
            parse_f64(parts[2], "center x")?,
            parse_f64(parts[3], "center y")?,
        ),
        width: dist_to_mm(parse_f64(parts[4], "width")?),
        height: dist_to_mm(parse_f64(parts[5], "height")?),
        rotation,
        // The record stores the hole radius
        hole_diameter: dist_to_mm(parse_f64(parts[9], "hole radius")? * 2.0),
        slot_length: dist_to_mm(parse_f64(parts[13], "slot length")?),
        solder_mask_expansion: dist_to_mm(parse_f64(parts[18], "solder mask expansion")?),
        hole_center: None,
        slot: Vec::new(),
    })
}

/// Decode an ARC record, keeping its geometry in encoded two-point form for
/// later reconstruction.
pub fn parse_arc(parts: &[&str], offset: &Offset) -> std::result::Result<Arc, DecodeError> {
    expect_record(parts, "ARC", 8)?;
    let path = parts[4];
    let captures = ARC_PATH.captures(path).ok_or_else(|| DecodeError::ArcPath {
        path: path.to_string(),
    })?;
    let capture_f64 = |i: usize| parse_f64(&captures[i], "arc path");

    let start = offset.point_to_mm(capture_f64(1)?, capture_f64(2)?);
    let end = offset.point_to_mm(capture_f64(8)?, capture_f64(9)?);
    // The editor cannot produce differing axis radii, so the first radius
    // stands for both
    let radius = dist_to_mm(capture_f64(3)?);

    Ok(Arc {
        id: parts[6].to_string(),
        layer_id: parse_i32(parts[2], "layer id")?,
        net: optional_net(parts[3]),
        width: dist_to_mm(parse_f64(parts[1], "width")?),
        locked: parts[7] == "1",
        geometry: ArcGeometry::Encoded {
            start,
            end,
            radius_x: radius,
            radius_y: radius,
            clockwise: &captures[6] == "1",
            solution_select: &captures[7] == "1",
        },
    })
}

fn expect_record(
    parts: &[&str],
    kind: &'static str,
    expected: usize,
) -> std::result::Result<(), DecodeError> {
    if parts.len() != expected {
        return Err(DecodeError::FieldCount {
            kind,
            count: parts.len(),
            expected: match expected {
                7 => "7",
                8 => "8",
                20 => "20",
                _ => "a fixed count",
            },
        });
    }
    if parts[0] != kind {
        return Err(DecodeError::TagMismatch {
            expected: kind,
            found: parts[0].to_string(),
        });
    }
    Ok(())
}

fn parse_f64(raw: &str, field: &'static str) -> std::result::Result<f64, DecodeError> {
    raw.trim()
        .parse()
        .map_err(|_| DecodeError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

fn parse_i32(raw: &str, field: &'static str) -> std::result::Result<i32, DecodeError> {
    raw.trim()
        .parse()
        .map_err(|_| DecodeError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

/// Parse a space-separated list of coordinate pairs into converted points.
fn parse_point_list(
    raw: &str,
    kind: &'static str,
    offset: &Offset,
) -> std::result::Result<Vec<Point>, DecodeError> {
    let values: Vec<&str> = raw.split_whitespace().collect();
    if values.len() % 2 != 0 {
        return Err(DecodeError::OddCoordinateCount { kind });
    }
    values
        .chunks(2)
        .map(|pair| {
            Ok(offset.point_to_mm(
                parse_f64(pair[0], "coordinates")?,
                parse_f64(pair[1], "coordinates")?,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn offset() -> Offset {
        Offset::new(4000.0, 3000.0).unwrap()
    }

    #[test]
    fn layer_record_decodes_with_either_field_count() {
        let layer = parse_layer("10~BoardOutLine~#FF00FF~true~false~true~").unwrap();
        assert_eq!(layer.id, 10);
        assert_eq!(layer.name, "BoardOutLine");
        assert_eq!(layer.color, "#FF00FF");
        assert!(layer.visible);
        assert!(!layer.editor_visible);

        assert!(parse_layer("1~TopLayer~#FF0000~true~true~true~0.3~").is_ok());
        assert!(matches!(
            parse_layer("1~TopLayer~#FF0000"),
            Err(DecodeError::FieldCount { kind: "LAYER", .. })
        ));
    }

    #[test]
    fn track_record_decodes_points_and_flags() {
        let parts: Vec<&str> = "TRACK~0.8~10~GND~4000 3000 4100 2950~gge42~1"
            .split('~')
            .collect();
        let track = parse_track(&parts, &offset()).unwrap();
        assert_eq!(track.id, "gge42");
        assert_eq!(track.layer_id, 10);
        assert_eq!(track.net.as_deref(), Some("GND"));
        assert_eq!(track.width, 0.203);
        assert!(track.locked);
        assert_eq!(
            track.points,
            vec![Point::new(0.0, 0.0), Point::new(25.4, 12.7)]
        );
    }

    #[test]
    fn track_record_rejects_bad_shapes() {
        let short: Vec<&str> = "TRACK~0.8~10~~4000 3000~gge42".split('~').collect();
        assert!(matches!(
            parse_track(&short, &offset()),
            Err(DecodeError::FieldCount { kind: "TRACK", .. })
        ));

        let odd: Vec<&str> = "TRACK~0.8~10~~4000 3000 4100~gge42~0".split('~').collect();
        assert!(matches!(
            parse_track(&odd, &offset()),
            Err(DecodeError::OddCoordinateCount { kind: "TRACK" })
        ));

        let mistagged: Vec<&str> = "VIA~0.8~10~~4000 3000~gge42~0".split('~').collect();
        assert!(matches!(
            parse_track(&mistagged, &offset()),
            Err(DecodeError::TagMismatch { .. })
        ));
    }

    #[test]
    fn via_record_doubles_the_drill_radius() {
        let parts: Vec<&str> = "VIA~4050~2975~6~~2~gge7~0".split('~').collect();
        let via = parse_via(&parts, &offset()).unwrap();
        assert_eq!(via.center, Point::new(12.7, 6.35));
        assert_eq!(via.diameter, 1.524);
        assert_eq!(via.drill_diameter, 1.016);
        assert_eq!(via.net, None);
        assert!(!via.locked);
    }

    #[test]
    fn pad_record_decodes_the_consumed_fields() {
        let parts: Vec<&str> =
            "PAD~OVAL~4020~2990~4~8~1~GND~1~2~poly~90~gge9~16~pts~Y~0~17~0.4~19"
                .split('~')
                .collect();
        assert_eq!(parts.len(), 20);
        let pad = parse_pad(&parts, &offset()).unwrap();
        assert_eq!(pad.shape_code, "OVAL");
        assert_eq!(pad.center, Point::new(5.08, 2.54));
        assert_eq!(pad.width, 1.016);
        assert_eq!(pad.height, 2.032);
        assert_eq!(pad.layer_id, 1);
        assert_eq!(pad.net.as_deref(), Some("GND"));
        assert_eq!(pad.number, Some(1));
        assert_eq!(pad.rotation, 90.0);
        assert_eq!(pad.id, "gge9");
        assert!(pad.plated);
        assert!(!pad.locked);
        assert_eq!(pad.hole_diameter, 1.016);
        assert_eq!(pad.slot_length, 4.064);
        assert_eq!(pad.solder_mask_expansion, 0.102);
        assert!(pad.hole_center.is_none());
        assert!(pad.slot.is_empty());
    }

    #[test]
    fn arc_record_accepts_both_path_spellings() {
        let compact: Vec<&str> =
            "ARC~0.8~10~~M4120.3937,2995.374 A3.937,3.937 0 0 1 4124.3307,2999.311~~gge12~0"
                .split('~')
                .collect();
        let arc = parse_arc(&compact, &offset()).unwrap();
        match arc.geometry {
            ArcGeometry::Encoded {
                start,
                end,
                radius_x,
                radius_y,
                clockwise,
                solution_select,
            } => {
                assert_eq!(start, Point::new(30.58, 1.175));
                assert_eq!(end, Point::new(31.58, 0.175));
                assert_eq!(radius_x, 1.0);
                assert_eq!(radius_y, 1.0);
                assert!(!clockwise);
                assert!(solution_select);
            }
            ArcGeometry::Sampled(_) => panic!("legacy arcs stay in encoded form"),
        }

        let spaced: Vec<&str> =
            "ARC~1~10~~M 4241.5197 3524.5 A 7.0711 7.0711 0 1 1 4252.442 3531.3835~~gge13~0"
                .split('~')
                .collect();
        let arc = parse_arc(&spaced, &offset()).unwrap();
        assert!(matches!(
            arc.geometry,
            ArcGeometry::Encoded {
                clockwise: true,
                solution_select: true,
                ..
            }
        ));
    }

    #[test]
    fn malformed_arc_path_is_a_decode_error() {
        let parts: Vec<&str> = "ARC~0.8~10~~M banana A split~~gge12~0".split('~').collect();
        assert!(matches!(
            parse_arc(&parts, &offset()),
            Err(DecodeError::ArcPath { .. })
        ));
    }

    #[test]
    fn unknown_kinds_follow_the_policy() {
        let doc = json!({
            "head": { "x": 4000, "y": 3000 },
            "layers": ["10~BoardOutLine~#FF00FF~true~true~true~"],
            "shape": ["GLYPH~1~2~3"]
        });
        assert!(matches!(
            parse_document(&doc, UnknownShapePolicy::Fail),
            Err(crate::error::Error::Decode(DecodeError::UnknownKind { .. }))
        ));
        let store = parse_document(&doc, UnknownShapePolicy::Skip).unwrap();
        assert_eq!(store.shapes().len(), 1);
    }

    #[test]
    fn unimplemented_kinds_are_skipped_under_both_policies() {
        let doc = json!({
            "head": { "x": 4000, "y": 3000 },
            "layers": ["10~BoardOutLine~#FF00FF~true~true~true~"],
            "shape": ["HOLE~4050~2975~2~gge8~0", "COPPERAREA~x"]
        });
        let store = parse_document(&doc, UnknownShapePolicy::Fail).unwrap();
        assert_eq!(store.shapes().len(), 2);
    }

    #[test]
    fn missing_offset_is_rejected_before_any_point_converts() {
        let doc = json!({
            "layers": [],
            "shape": []
        });
        assert!(matches!(
            parse_document(&doc, UnknownShapePolicy::Fail),
            Err(crate::error::Error::Decode(DecodeError::NonFiniteOffset { .. }))
        ));
    }
}
