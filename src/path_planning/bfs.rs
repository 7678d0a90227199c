//! Breadth-first grid search
//!
//! Unweighted search over the 4-connected occupancy grid. Every step costs
//! the same, so the first time the goal cell is dequeued the recorded
//! parent chain is a shortest path in cell count.

use std::collections::{HashMap, HashSet, VecDeque};

use log::debug;

use crate::common::{CancelToken, GridNode, Path2D, PathPlanner, PlanError, PlanResult, Point2D};
use crate::utils::RoomGrid;

/// Breadth-first planner over a rasterized room
pub struct BreadthFirstPlanner<'a> {
    grid: &'a RoomGrid,
    cancel: Option<CancelToken>,
    motion: [(i32, i32); 4],
}

impl<'a> BreadthFirstPlanner<'a> {
    pub fn new(grid: &'a RoomGrid) -> Self {
        BreadthFirstPlanner {
            grid,
            cancel: None,
            motion: Self::get_motion_model(),
        }
    }

    /// Abort the search with [`PlanError::Cancelled`] once `token` fires
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn grid(&self) -> &RoomGrid {
        self.grid
    }

    fn get_motion_model() -> [(i32, i32); 4] {
        // dx, dy (4-connected, fixed expansion order)
        [(1, 0), (0, 1), (-1, 0), (0, -1)]
    }

    /// Cells from `start` to `goal` inclusive.
    ///
    /// The start cell is searched even when it is marked blocked.
    pub fn search(&self, start: GridNode, goal: GridNode) -> PlanResult<Vec<GridNode>> {
        if !self.grid.is_inside(start) || !self.grid.is_inside(goal) {
            return Err(PlanError::Unreachable);
        }

        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        let mut parents: HashMap<GridNode, GridNode> = HashMap::new();

        queue.push_back(start);
        visited.insert(start);

        while let Some(current) = queue.pop_front() {
            if self.cancel.as_ref().map_or(false, CancelToken::is_cancelled) {
                debug!("search cancelled after {} cells", visited.len());
                return Err(PlanError::Cancelled);
            }

            if current == goal {
                debug!("goal reached, {} cells visited", visited.len());
                return Ok(Self::build_path(&parents, start, goal));
            }

            for &(dx, dy) in &self.motion {
                let next = current.offset(dx, dy);
                if !self.grid.is_valid(next.x, next.y) || !visited.insert(next) {
                    continue;
                }
                parents.insert(next, current);
                queue.push_back(next);
            }
        }

        debug!("queue exhausted, {} cells visited", visited.len());
        Err(PlanError::Unreachable)
    }

    fn build_path(parents: &HashMap<GridNode, GridNode>, start: GridNode, goal: GridNode) -> Vec<GridNode> {
        let mut cells = vec![goal];
        let mut current = goal;

        while current != start {
            current = parents[&current];
            cells.push(current);
        }

        cells.reverse();
        cells
    }
}

impl PathPlanner for BreadthFirstPlanner<'_> {
    fn plan(&self, start: Point2D, goal: Point2D) -> Result<Path2D, PlanError> {
        let cells = self.search(self.grid.to_grid(start), self.grid.to_grid(goal))?;
        Ok(Path2D::from_points(
            cells.into_iter().map(|c| self.grid.to_world(c)).collect(),
        ))
    }
}
