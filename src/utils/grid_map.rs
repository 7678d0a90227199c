//! Occupancy grid over a room
//!
//! The grid covers the bounding box of every footprint in the room plus a
//! fixed margin of free cells on each side. World and grid coordinates are
//! related by
//!
//! ```text
//! to_grid(w)  = floor((w - min) / resolution) + margin
//! to_world(c) = (c - margin) * resolution + min
//! ```
//!
//! Every stage uses these two mappings; nothing else converts coordinates.

use itertools::iproduct;
use log::debug;
use nalgebra::DMatrix;

use crate::common::{GridNode, PlanError, PlanResult, Point2D};
use crate::room::{footprint_bounds, Obstacle, RoomLayout};

/// Upper bound on allocated cells, guards against runaway coordinates
pub const MAX_GRID_CELLS: usize = 25_000_000;

pub struct RoomGrid {
    pub resolution: f64,
    pub margin_cells: i32,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub x_width: i32,
    pub y_width: i32,
    obstacle_map: DMatrix<bool>,
}

impl RoomGrid {
    /// Empty grid spanning `[min, max]` plus the margin
    pub fn new(min: Point2D, max: Point2D, resolution: f64, margin_cells: i32) -> PlanResult<Self> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(PlanError::InvalidParameter(format!(
                "resolution must be > 0, got {}",
                resolution
            )));
        }
        if margin_cells < 0 {
            return Err(PlanError::InvalidParameter(format!(
                "margin_cells must be >= 0, got {}",
                margin_cells
            )));
        }
        if !(min.is_finite() && max.is_finite()) || min.x > max.x || min.y > max.y {
            return Err(PlanError::InvalidParameter(format!(
                "bad grid bounds {:?}..{:?}",
                min, max
            )));
        }

        let x_cells = ((max.x - min.x) / resolution).ceil() + 2.0 * margin_cells as f64;
        let y_cells = ((max.y - min.y) / resolution).ceil() + 2.0 * margin_cells as f64;
        if x_cells * y_cells > MAX_GRID_CELLS as f64 {
            return Err(PlanError::InvalidParameter(format!(
                "grid of {}x{} cells is too large",
                x_cells, y_cells
            )));
        }

        let x_width = x_cells as i32;
        let y_width = y_cells as i32;
        debug!(
            "grid bounds x:[{:.2}, {:.2}] y:[{:.2}, {:.2}], {}x{} cells",
            min.x, max.x, min.y, max.y, x_width, y_width
        );

        Ok(RoomGrid {
            resolution,
            margin_cells,
            min_x: min.x,
            min_y: min.y,
            max_x: max.x,
            max_y: max.y,
            x_width,
            y_width,
            obstacle_map: DMatrix::from_element(x_width as usize, y_width as usize, false),
        })
    }

    /// Grid covering every obstacle and opening footprint, the room origin
    /// and any `extra_points`
    pub fn from_layout(
        layout: &RoomLayout,
        extra_points: &[Point2D],
        resolution: f64,
        margin_cells: i32,
    ) -> PlanResult<Self> {
        let footprints = layout
            .obstacles
            .iter()
            .map(|o| footprint_bounds(o.center, o.size, 0.0))
            .chain(layout.openings.iter().map(|o| footprint_bounds(o.center, o.size, 0.0)))
            .flat_map(|(lo, hi)| vec![lo, hi]);

        let points: Vec<Point2D> = footprints.chain(extra_points.iter().copied()).collect();

        // seeded at the origin so the reference point is always covered
        let min_x = points.iter().fold(0.0_f64, |a, p| a.min(p.x));
        let min_y = points.iter().fold(0.0_f64, |a, p| a.min(p.y));
        let max_x = points.iter().fold(0.0_f64, |a, p| a.max(p.x));
        let max_y = points.iter().fold(0.0_f64, |a, p| a.max(p.y));

        Self::new(
            Point2D::new(min_x, min_y),
            Point2D::new(max_x, max_y),
            resolution,
            margin_cells,
        )
    }

    pub fn calc_x_index(&self, x: f64) -> i32 {
        ((x - self.min_x) / self.resolution).floor() as i32 + self.margin_cells
    }

    pub fn calc_y_index(&self, y: f64) -> i32 {
        ((y - self.min_y) / self.resolution).floor() as i32 + self.margin_cells
    }

    pub fn calc_x_position(&self, index: i32) -> f64 {
        (index - self.margin_cells) as f64 * self.resolution + self.min_x
    }

    pub fn calc_y_position(&self, index: i32) -> f64 {
        (index - self.margin_cells) as f64 * self.resolution + self.min_y
    }

    pub fn to_grid(&self, p: Point2D) -> GridNode {
        GridNode::new(self.calc_x_index(p.x), self.calc_y_index(p.y))
    }

    pub fn to_world(&self, node: GridNode) -> Point2D {
        Point2D::new(self.calc_x_position(node.x), self.calc_y_position(node.y))
    }

    pub fn is_inside(&self, node: GridNode) -> bool {
        node.x >= 0 && node.x < self.x_width && node.y >= 0 && node.y < self.y_width
    }

    /// Out-of-grid cells count as not blocked
    pub fn is_blocked(&self, node: GridNode) -> bool {
        self.is_inside(node) && self.obstacle_map[(node.x as usize, node.y as usize)]
    }

    /// Inside the grid and traversable
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        let node = GridNode::new(x, y);
        self.is_inside(node) && !self.is_blocked(node)
    }

    pub fn blocked_count(&self) -> usize {
        self.obstacle_map.iter().filter(|&&b| b).count()
    }

    /// Mark every cell under an obstacle footprint grown by `padding`.
    ///
    /// Cells listed in `keep_clear` are never marked, so the search start
    /// and goal can only fail on connectivity.
    pub fn inflate_obstacles(&mut self, obstacles: &[Obstacle], padding: f64, keep_clear: &[GridNode]) {
        for obstacle in obstacles {
            let (lo, hi) = obstacle.inflated_bounds(padding);
            let lo = self.clamp(self.to_grid(lo));
            let hi = self.clamp(self.to_grid(hi));

            for (ix, iy) in iproduct!(lo.x..=hi.x, lo.y..=hi.y) {
                let node = GridNode::new(ix, iy);
                if keep_clear.contains(&node) {
                    continue;
                }
                self.obstacle_map[(ix as usize, iy as usize)] = true;
            }
        }

        debug!(
            "inflated {} obstacles by {:.2}, {} cells blocked",
            obstacles.len(),
            padding,
            self.blocked_count()
        );
    }

    fn clamp(&self, node: GridNode) -> GridNode {
        GridNode::new(
            node.x.clamp(0, self.x_width - 1),
            node.y.clamp(0, self.y_width - 1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Size2D;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn unit_box_at(x: f64, y: f64, size: f64) -> Obstacle {
        Obstacle {
            id: None,
            center: Point2D::new(x, y),
            size: Size2D::new(size, size),
        }
    }

    fn layout_with(obstacles: Vec<Obstacle>) -> RoomLayout {
        RoomLayout { obstacles, openings: Vec::new() }
    }

    #[test]
    fn test_bounds_include_origin_and_margin() {
        let layout = layout_with(vec![unit_box_at(3.0, 2.0, 1.0)]);
        let grid = RoomGrid::from_layout(&layout, &[], 0.15, 5).unwrap();

        assert_eq!(grid.min_x, 0.0);
        assert_eq!(grid.min_y, 0.0);
        assert_eq!(grid.max_x, 3.5);
        assert_eq!(grid.max_y, 2.5);
        assert_eq!(grid.x_width, (3.5_f64 / 0.15).ceil() as i32 + 10);
        assert_eq!(grid.y_width, (2.5_f64 / 0.15).ceil() as i32 + 10);
        assert_eq!(grid.to_grid(Point2D::origin()), GridNode::new(5, 5));
    }

    #[test]
    fn test_extra_points_extend_bounds() {
        let layout = layout_with(vec![unit_box_at(1.0, 1.0, 0.5)]);
        let grid = RoomGrid::from_layout(&layout, &[Point2D::new(-2.0, 4.0)], 0.15, 5).unwrap();
        assert_eq!(grid.min_x, -2.0);
        assert_eq!(grid.max_y, 4.0);
        assert!(grid.is_inside(grid.to_grid(Point2D::new(-2.0, 4.0))));
    }

    #[test]
    fn test_round_trip_within_one_cell() {
        let layout = layout_with(vec![unit_box_at(-4.0, -3.0, 1.0), unit_box_at(5.0, 6.0, 2.0)]);
        let grid = RoomGrid::from_layout(&layout, &[], 0.15, 5).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = Point2D::new(rng.gen_range(-4.5..6.0), rng.gen_range(-3.5..7.0));
            let back = grid.to_world(grid.to_grid(p));
            assert!((back.x - p.x).abs() <= 0.15 + 1e-9, "{:?} -> {:?}", p, back);
            assert!((back.y - p.y).abs() <= 0.15 + 1e-9, "{:?} -> {:?}", p, back);
            assert!(grid.is_inside(grid.to_grid(p)));
        }
    }

    #[test]
    fn test_inflation_marks_padded_footprint() {
        let layout = layout_with(vec![unit_box_at(2.0, 2.0, 1.0)]);
        let mut grid = RoomGrid::from_layout(&layout, &[], 0.15, 5).unwrap();
        grid.inflate_obstacles(&layout.obstacles, 0.3, &[]);

        assert!(grid.is_blocked(grid.to_grid(Point2D::new(2.0, 2.0))));
        // inside the padding but outside the raw footprint
        assert!(grid.is_blocked(grid.to_grid(Point2D::new(2.7, 2.0))));
        assert!(!grid.is_blocked(grid.to_grid(Point2D::new(3.2, 2.0))));
        assert!(!grid.is_blocked(grid.to_grid(Point2D::origin())));
        assert!(grid.blocked_count() > 0);
    }

    #[test]
    fn test_keep_clear_cells_are_never_blocked() {
        let layout = layout_with(vec![unit_box_at(0.0, 0.0, 1.0)]);
        let mut grid = RoomGrid::from_layout(&layout, &[], 0.15, 5).unwrap();
        let start = grid.to_grid(Point2D::origin());
        grid.inflate_obstacles(&layout.obstacles, 0.3, &[start]);

        assert!(!grid.is_blocked(start));
        assert!(grid.is_valid(start.x, start.y));
        assert!(grid.is_blocked(start.offset(1, 0)));
    }

    #[test]
    fn test_invalid_resolution() {
        let result = RoomGrid::new(Point2D::origin(), Point2D::new(1.0, 1.0), 0.0, 5);
        assert!(matches!(result, Err(PlanError::InvalidParameter(_))));
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let result = RoomGrid::new(Point2D::origin(), Point2D::new(1.0e5, 1.0e5), 0.15, 5);
        assert!(matches!(result, Err(PlanError::InvalidParameter(_))));
    }
}
