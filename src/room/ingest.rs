//! Room layout ingestion
//!
//! Splits the parsed objects into furniture obstacles and openings.

use log::debug;
use nalgebra::Vector2;

use crate::common::{PlanResult, Point2D, Size2D};
use crate::room::layout::{RoomDescription, RoomObject};

/// Furniture footprint (axis aligned, rotation ignored)
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: Option<String>,
    pub center: Point2D,
    pub size: Size2D,
}

impl Obstacle {
    /// Footprint corners grown by `padding` on every side
    pub fn inflated_bounds(&self, padding: f64) -> (Point2D, Point2D) {
        footprint_bounds(self.center, self.size, padding)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningKind {
    Door,
    Window,
}

/// Door or window
#[derive(Debug, Clone, PartialEq)]
pub struct Opening {
    pub id: Option<String>,
    pub center: Point2D,
    pub size: Size2D,
    pub orientation_rad: f64,
    pub kind: OpeningKind,
    pub distance_from_origin: f64,
}

impl Opening {
    pub fn is_door(&self) -> bool {
        self.kind == OpeningKind::Door
    }

    /// Unit vector across the opening, `(sin θ, cos θ)`
    pub fn direction(&self) -> Vector2<f64> {
        Vector2::new(self.orientation_rad.sin(), self.orientation_rad.cos())
    }
}

/// Min/max corners of an axis-aligned footprint
pub fn footprint_bounds(center: Point2D, size: Size2D, padding: f64) -> (Point2D, Point2D) {
    let half = size.half_extents().add_scalar(padding);
    let c = center.to_vector();
    (Point2D::from(c - half), Point2D::from(c + half))
}

/// Typed contents of one room
#[derive(Debug, Clone, Default)]
pub struct RoomLayout {
    pub obstacles: Vec<Obstacle>,
    pub openings: Vec<Opening>,
}

impl RoomLayout {
    pub fn from_json(json: &str) -> PlanResult<Self> {
        let desc = RoomDescription::from_json(json)?;
        Self::from_description(&desc)
    }

    pub fn from_description(desc: &RoomDescription) -> PlanResult<Self> {
        Ok(Self::from_objects(desc.objects()?))
    }

    pub fn from_objects<I>(objects: I) -> Self
    where
        I: IntoIterator<Item = RoomObject>,
    {
        let mut layout = RoomLayout::default();

        for obj in objects {
            let center = Point2D::new(obj.position.x, obj.position.y);
            let size = Size2D::new(obj.dimensions.width_m, obj.dimensions.length_m);

            let kind = match obj.kind.to_lowercase().as_str() {
                "door" => Some(OpeningKind::Door),
                "window" => Some(OpeningKind::Window),
                _ => None,
            };

            match kind {
                Some(kind) => layout.openings.push(Opening {
                    id: obj.id,
                    center,
                    size,
                    orientation_rad: obj.rotation_deg.unwrap_or(0.0).to_radians(),
                    kind,
                    distance_from_origin: center.norm(),
                }),
                None => layout.obstacles.push(Obstacle { id: obj.id, center, size }),
            }
        }

        debug!(
            "room layout: {} obstacles, {} openings",
            layout.obstacles.len(),
            layout.openings.len()
        );
        layout
    }

    pub fn doors(&self) -> impl Iterator<Item = &Opening> {
        self.openings.iter().filter(|o| o.is_door())
    }
}
