//! Exit door selection
//!
//! Picks the door the path leaves through and the two anchor points on
//! either side of it. Both rules are distance heuristics relative to the
//! room origin, not topological inside/outside tests.

use log::debug;
use ordered_float::OrderedFloat;

use crate::common::{PlanError, PlanResult, Point2D};
use crate::room::{Opening, RoomLayout};

/// Chosen door with the approach point (room side) and exit point (far side)
#[derive(Debug, Clone, PartialEq)]
pub struct ExitTarget {
    pub door: Opening,
    pub approach: Point2D,
    pub exit: Point2D,
}

/// `door.center ± offset * (sin θ, cos θ)`
pub fn candidate_points(door: &Opening, offset: f64) -> [Point2D; 2] {
    let c = door.center.to_vector();
    let d = door.direction() * offset;
    [Point2D::from(c + d), Point2D::from(c - d)]
}

/// Candidate points of every door, used to size the grid
pub fn door_test_points(layout: &RoomLayout, offset: f64) -> Vec<Point2D> {
    layout
        .doors()
        .flat_map(|door| candidate_points(door, offset).to_vec())
        .collect()
}

/// Door furthest from the origin; ties resolve to the earliest door
pub fn select_door(layout: &RoomLayout) -> PlanResult<&Opening> {
    let doors: Vec<&Opening> = layout.doors().collect();
    doors
        .into_iter()
        .rev()
        .max_by_key(|door| OrderedFloat(door.distance_from_origin))
        .ok_or(PlanError::NoDoor)
}

/// Select the exit door and classify its candidate points.
///
/// The candidate closer to the origin becomes the approach point; on a tie
/// the `center - offset * d` candidate does.
pub fn select_exit(layout: &RoomLayout, offset: f64) -> PlanResult<ExitTarget> {
    let door = select_door(layout)?;
    let [plus, minus] = candidate_points(door, offset);

    let (approach, exit) = if plus.norm() < minus.norm() {
        (plus, minus)
    } else {
        (minus, plus)
    };

    debug!(
        "exit door {:?} at ({:.2}, {:.2}), approach ({:.2}, {:.2}), exit ({:.2}, {:.2})",
        door.id, door.center.x, door.center.y, approach.x, approach.y, exit.x, exit.y
    );

    Ok(ExitTarget { door: door.clone(), approach, exit })
}
