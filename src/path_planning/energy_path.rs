//! Energy path planning pipeline
//!
//! room description -> layout -> exit door -> occupancy grid -> BFS -> polyline
//!
//! The returned polyline starts at the room origin, follows the searched
//! corridor to the approach point and ends outside the chosen door:
//!
//! ```text
//! origin -> grid cells... -> approach -> door center -> exit
//! ```

use log::{debug, warn};
use serde::Deserialize;

use crate::common::{CancelToken, GridNode, Path2D, PlanError, PlanResult, Point2D};
use crate::path_planning::bfs::BreadthFirstPlanner;
use crate::path_planning::exit_selector::{door_test_points, select_exit, ExitTarget};
use crate::room::RoomLayout;
use crate::utils::RoomGrid;

/// Configuration for the energy path planner
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnergyPathConfig {
    /// Grid cell size in meters
    pub cell_size: f64,
    /// Free cells added around the room bounds on each side
    pub margin_cells: i32,
    /// Clearance added to every furniture footprint in meters
    pub safety_padding: f64,
    /// Distance of the approach and exit points from the door center in meters
    pub door_offset: f64,
}

impl Default for EnergyPathConfig {
    fn default() -> Self {
        Self {
            cell_size: 0.15,
            margin_cells: 5,
            safety_padding: 0.3,
            door_offset: 0.8,
        }
    }
}

impl EnergyPathConfig {
    /// Load overrides from JSON, missing keys keep their defaults
    pub fn from_json(json: &str) -> PlanResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PlanResult<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(PlanError::InvalidParameter(format!(
                "cell_size must be > 0, got {}",
                self.cell_size
            )));
        }
        if self.margin_cells < 0 {
            return Err(PlanError::InvalidParameter(format!(
                "margin_cells must be >= 0, got {}",
                self.margin_cells
            )));
        }
        if !(self.safety_padding.is_finite() && self.safety_padding >= 0.0) {
            return Err(PlanError::InvalidParameter(format!(
                "safety_padding must be >= 0, got {}",
                self.safety_padding
            )));
        }
        if !(self.door_offset.is_finite() && self.door_offset >= 0.0) {
            return Err(PlanError::InvalidParameter(format!(
                "door_offset must be >= 0, got {}",
                self.door_offset
            )));
        }
        Ok(())
    }
}

/// Result of one planning call
#[derive(Debug)]
pub enum PlanOutcome {
    /// Searched path around the furniture
    Found(Path2D),
    /// Approach cell was unreachable; straight jump
    /// `[origin, approach, door center, exit]` that ignores obstacles
    Fallback(Path2D),
    NoPath(PlanError),
}

impl PlanOutcome {
    pub fn path(&self) -> Option<&Path2D> {
        match self {
            PlanOutcome::Found(path) | PlanOutcome::Fallback(path) => Some(path),
            PlanOutcome::NoPath(_) => None,
        }
    }

    /// Points of a found or fallback path, `None` when there is no path
    pub fn into_points(self) -> Option<Vec<Point2D>> {
        match self {
            PlanOutcome::Found(path) | PlanOutcome::Fallback(path) => Some(path.points),
            PlanOutcome::NoPath(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PlanOutcome::Found(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, PlanOutcome::Fallback(_))
    }

    pub fn no_path_reason(&self) -> Option<&PlanError> {
        match self {
            PlanOutcome::NoPath(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Plan with the default configuration
pub fn plan_energy_path(room_json: &str) -> PlanOutcome {
    EnergyPathPlanner::default().plan_json(room_json)
}

/// Stateless planner; every call builds and drops its own grid
#[derive(Debug, Clone, Default)]
pub struct EnergyPathPlanner {
    config: EnergyPathConfig,
}

impl EnergyPathPlanner {
    pub fn new(config: EnergyPathConfig) -> Self {
        EnergyPathPlanner { config }
    }

    pub fn config(&self) -> &EnergyPathConfig {
        &self.config
    }

    pub fn plan_json(&self, room_json: &str) -> PlanOutcome {
        match RoomLayout::from_json(room_json) {
            Ok(layout) => self.plan_layout(&layout, None),
            Err(e) => Self::no_path(e),
        }
    }

    pub fn plan_json_with_cancel(&self, room_json: &str, cancel: &CancelToken) -> PlanOutcome {
        match RoomLayout::from_json(room_json) {
            Ok(layout) => self.plan_layout(&layout, Some(cancel)),
            Err(e) => Self::no_path(e),
        }
    }

    pub fn plan_layout(&self, layout: &RoomLayout, cancel: Option<&CancelToken>) -> PlanOutcome {
        match self.try_plan(layout, cancel) {
            Ok(outcome) => outcome,
            Err(e) => Self::no_path(e),
        }
    }

    /// Rasterize the room with the start and approach cells kept clear
    pub fn build_grid(&self, layout: &RoomLayout, target: &ExitTarget) -> PlanResult<RoomGrid> {
        let test_points = door_test_points(layout, self.config.door_offset);
        let mut grid = RoomGrid::from_layout(
            layout,
            &test_points,
            self.config.cell_size,
            self.config.margin_cells,
        )?;

        let keep_clear = [grid.to_grid(Point2D::origin()), grid.to_grid(target.approach)];
        grid.inflate_obstacles(&layout.obstacles, self.config.safety_padding, &keep_clear);
        Ok(grid)
    }

    fn try_plan(&self, layout: &RoomLayout, cancel: Option<&CancelToken>) -> PlanResult<PlanOutcome> {
        self.config.validate()?;

        let target = select_exit(layout, self.config.door_offset)?;
        let grid = self.build_grid(layout, &target)?;

        let mut planner = BreadthFirstPlanner::new(&grid);
        if let Some(token) = cancel {
            planner = planner.with_cancel_token(token.clone());
        }

        let start = grid.to_grid(Point2D::origin());
        let goal = grid.to_grid(target.approach);

        match planner.search(start, goal) {
            Ok(cells) => {
                let path = assemble_path(&grid, &cells, &target);
                debug!("found path with {} points, {:.2} m", path.len(), path.total_length());
                Ok(PlanOutcome::Found(path))
            }
            Err(PlanError::Unreachable) => {
                warn!("approach point unreachable, falling back to a straight jump");
                Ok(PlanOutcome::Fallback(fallback_path(&target)))
            }
            Err(e) => Err(e),
        }
    }

    fn no_path(reason: PlanError) -> PlanOutcome {
        debug!("no path: {}", reason);
        PlanOutcome::NoPath(reason)
    }
}

/// `cells` runs start to goal; the start cell is replaced by the exact origin
fn assemble_path(grid: &RoomGrid, cells: &[GridNode], target: &ExitTarget) -> Path2D {
    let mut path = Path2D::new();
    path.push(Point2D::origin());
    for &cell in cells.iter().skip(1) {
        path.push(grid.to_world(cell));
    }
    push_door_anchors(&mut path, target);
    path
}

fn fallback_path(target: &ExitTarget) -> Path2D {
    let mut path = Path2D::from_points(vec![Point2D::origin()]);
    push_door_anchors(&mut path, target);
    path
}

fn push_door_anchors(path: &mut Path2D, target: &ExitTarget) {
    path.push(target.approach);
    path.push(target.door.center);
    path.push(target.exit);
}
