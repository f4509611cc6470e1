//! GeoJSON serialization seam.
//!
//! The tree itself knows nothing about GeoJSON; this module consumes the
//! plain `(x, y, payload)` records from [`QuadTree::features`] and produces a
//! `FeatureCollection` for mapping tools, plus the reverse direction for
//! loading point files. Payloads ride along under the `"data"` property.

use std::fs;
use std::io::Write;
use std::path::Path;

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use serde::Serialize;

use crate::error::{QuadmapError, Result};
use crate::geom::Point;
use crate::tree::QuadTree;

/// Property key the point payload is stored under
pub const PAYLOAD_KEY: &str = "data";

/// Build a GeoJSON feature collection with one Point feature per stored
/// point, in the tree's canonical traversal order.
pub fn to_feature_collection<P: Serialize>(tree: &QuadTree<P>) -> Result<FeatureCollection> {
    let mut features = Vec::with_capacity(tree.len());
    for record in tree.features() {
        let payload =
            serde_json::to_value(record.payload).map_err(|e| QuadmapError::Geojson {
                reason: format!("failed to serialize payload: {e}"),
            })?;
        let mut properties = JsonObject::new();
        properties.insert(PAYLOAD_KEY.to_string(), payload);
        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![record.x, record.y]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }
    Ok(FeatureCollection { bbox: None, features, foreign_members: None })
}

/// Serialize the tree's points as a pretty-printed GeoJSON string
pub fn to_string<P: Serialize>(tree: &QuadTree<P>) -> Result<String> {
    let collection = to_feature_collection(tree)?;
    serde_json::to_string_pretty(&collection)
        .map_err(|e| QuadmapError::Geojson { reason: format!("failed to serialize: {e}") })
}

/// Write the tree's points as GeoJSON to any writer
pub fn to_writer<P: Serialize, W: Write>(tree: &QuadTree<P>, mut writer: W) -> Result<()> {
    let content = to_string(tree)?;
    writer.write_all(content.as_bytes())?;
    Ok(())
}

/// Parse points out of GeoJSON text. Accepts a feature collection, a single
/// feature, or a bare geometry; features without a Point geometry are
/// skipped with a warning. The payload is taken from the `"data"` property
/// when present, `null` otherwise.
pub fn read_points(content: &str) -> Result<Vec<Point<serde_json::Value>>> {
    let geojson: GeoJson = content
        .parse()
        .map_err(|e| QuadmapError::Geojson { reason: format!("failed to parse GeoJSON: {e}") })?;

    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(geometry) => vec![Feature {
            bbox: None,
            geometry: Some(geometry),
            id: None,
            properties: None,
            foreign_members: None,
        }],
    };

    let mut points = Vec::with_capacity(features.len());
    let mut skipped = 0usize;
    for feature in features {
        let coordinates = match feature.geometry.as_ref().map(|geometry| &geometry.value) {
            Some(Value::Point(coordinates)) if coordinates.len() >= 2 => coordinates,
            _ => {
                skipped += 1;
                continue;
            }
        };
        let payload = feature
            .properties
            .as_ref()
            .and_then(|properties| properties.get(PAYLOAD_KEY))
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        points.push(Point::new(coordinates[0], coordinates[1], payload));
    }

    if skipped > 0 {
        tracing::warn!(skipped, "ignored features without a point geometry");
    }
    Ok(points)
}

/// Read points from a GeoJSON file on disk
pub fn read_points_file(path: &Path) -> Result<Vec<Point<serde_json::Value>>> {
    let content = fs::read_to_string(path)?;
    read_points(&content)
}
