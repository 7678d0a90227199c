//! Room description input model
//!
//! Mirrors the JSON record produced by the room-capture side:
//!
//! ```json
//! {
//!   "objects": [
//!     {"id": "door_1", "type": "door", "position": {"x": 2.5, "y": 0.0},
//!      "rotation_deg": 90, "dimensions": {"length_m": 0.1, "width_m": 0.9, "height_m": 2.0}}
//!   ]
//! }
//! ```

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::common::{PlanError, PlanResult};

/// Position on the room plane
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Object extents in meters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Dimensions {
    pub length_m: f64,
    pub width_m: f64,
    /// Not used by the planner
    #[serde(default)]
    pub height_m: Option<f64>,
}

/// One placed item of the room
#[derive(Debug, Clone, Deserialize)]
pub struct RoomObject {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub position: Position,
    #[serde(default)]
    pub rotation_deg: Option<f64>,
    pub dimensions: Dimensions,
}

impl RoomObject {
    /// Finite numbers and a positive footprint
    pub fn is_well_formed(&self) -> bool {
        let d = &self.dimensions;
        self.position.x.is_finite()
            && self.position.y.is_finite()
            && self.rotation_deg.map_or(true, f64::is_finite)
            && d.width_m.is_finite()
            && d.length_m.is_finite()
            && d.width_m > 0.0
            && d.length_m > 0.0
    }
}

/// Top-level room description.
///
/// Objects are kept as raw JSON so a single malformed entry does not reject
/// the whole room; see [`RoomDescription::objects`].
#[derive(Debug, Clone, Deserialize)]
pub struct RoomDescription {
    #[serde(default, rename = "objects")]
    raw_objects: Option<Vec<Value>>,
}

impl RoomDescription {
    pub fn from_json(json: &str) -> PlanResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: Value) -> PlanResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parsed objects, skipping entries that miss required fields.
    ///
    /// Fails only when the `objects` list itself is absent.
    pub fn objects(&self) -> PlanResult<Vec<RoomObject>> {
        let raw = self.raw_objects.as_ref().ok_or(PlanError::MissingObjects)?;

        let objects = raw
            .iter()
            .enumerate()
            .filter_map(|(i, value)| match RoomObject::deserialize(value) {
                Ok(obj) if obj.is_well_formed() => Some(obj),
                Ok(obj) => {
                    debug!("skipping object {} ({:?}): bad numbers", i, obj.id);
                    None
                }
                Err(e) => {
                    debug!("skipping object {}: {}", i, e);
                    None
                }
            })
            .collect();

        Ok(objects)
    }
}
