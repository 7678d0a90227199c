//! Visualization utilities for energy_path
//!
//! Renders a room layout and its planned path with gnuplot.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};

use crate::common::{Path2D, PlanError, PlanResult, Point2D};
use crate::room::{footprint_bounds, OpeningKind, RoomLayout};

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const GREEN: &str = "#00FF00";
    pub const BLUE: &str = "#0000FF";
    pub const CYAN: &str = "#00FFFF";
    pub const ORANGE: &str = "#FFA500";
    pub const GRAY: &str = "#808080";

    // Semantic colors
    pub const OBSTACLE: &str = BLACK;
    pub const PADDING: &str = GRAY;
    pub const DOOR: &str = ORANGE;
    pub const WINDOW: &str = CYAN;
    pub const START: &str = GREEN;
    pub const GOAL: &str = BLUE;
    pub const PATH: &str = RED;
}

/// Style for path rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::new(colors::PATH, "Energy path")
    }
}

enum Layer {
    Lines { xs: Vec<f64>, ys: Vec<f64>, color: String, width: f64, caption: Option<String> },
    Point { at: Point2D, color: String, caption: String },
}

/// Plot builder for one room; layers are drawn on a single axes at save time
pub struct Visualizer {
    figure: Figure,
    title: String,
    layers: Vec<Layer>,
}

impl Visualizer {
    pub fn new() -> Self {
        Self {
            figure: Figure::new(),
            title: String::new(),
            layers: Vec::new(),
        }
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    /// Draw furniture outlines, optionally with their padded footprint,
    /// and door/window outlines
    pub fn plot_layout(&mut self, layout: &RoomLayout, padding: Option<f64>) -> &mut Self {
        for obstacle in &layout.obstacles {
            let bounds = footprint_bounds(obstacle.center, obstacle.size, 0.0);
            self.outline(bounds, colors::OBSTACLE, 1.5);

            if let Some(pad) = padding {
                self.outline(obstacle.inflated_bounds(pad), colors::PADDING, 0.5);
            }
        }

        for opening in &layout.openings {
            let color = match opening.kind {
                OpeningKind::Door => colors::DOOR,
                OpeningKind::Window => colors::WINDOW,
            };
            self.outline(footprint_bounds(opening.center, opening.size, 0.0), color, 2.0);
        }
        self
    }

    pub fn plot_path(&mut self, path: &Path2D, style: &PathStyle) -> &mut Self {
        self.layers.push(Layer::Lines {
            xs: path.x_coords(),
            ys: path.y_coords(),
            color: style.color.clone(),
            width: style.line_width,
            caption: Some(style.caption.clone()),
        });
        self
    }

    pub fn plot_point(&mut self, point: Point2D, color: &str, caption: &str) -> &mut Self {
        self.layers.push(Layer::Point {
            at: point,
            color: color.to_string(),
            caption: caption.to_string(),
        });
        self
    }

    pub fn save_png(&mut self, path: &str, width: u32, height: u32) -> PlanResult<()> {
        self.render();
        self.figure
            .save_to_png(path, width, height)
            .map_err(|e| PlanError::Visualization(e.to_string()))
    }

    pub fn show(&mut self) -> PlanResult<()> {
        self.render();
        self.figure
            .show()
            .map(|_| ())
            .map_err(|e| PlanError::Visualization(e.to_string()))
    }

    fn outline(&mut self, bounds: (Point2D, Point2D), color: &str, width: f64) {
        let (xs, ys) = rectangle(bounds);
        self.layers.push(Layer::Lines { xs, ys, color: color.to_string(), width, caption: None });
    }

    fn render(&mut self) {
        self.figure.clear_axes();
        let axes = self.figure.axes2d();

        for layer in &self.layers {
            match layer {
                Layer::Lines { xs, ys, color, width, caption: Some(caption) } => {
                    axes.lines(xs, ys, &[Caption(caption), Color(color), LineWidth(*width)]);
                }
                Layer::Lines { xs, ys, color, width, caption: None } => {
                    axes.lines(xs, ys, &[Color(color), LineWidth(*width)]);
                }
                Layer::Point { at, color, caption } => {
                    axes.points(
                        &[at.x],
                        &[at.y],
                        &[Caption(caption), Color(color), PointSymbol('O'), PointSize(1.5)],
                    );
                }
            }
        }

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label("X [m]", &[]);
        axes.set_y_label("Y [m]", &[]);
        axes.set_aspect_ratio(AutoOption::Fix(1.0));
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Closed outline through the four corners
fn rectangle((lo, hi): (Point2D, Point2D)) -> (Vec<f64>, Vec<f64>) {
    (
        vec![lo.x, hi.x, hi.x, lo.x, lo.x],
        vec![lo.y, lo.y, hi.y, hi.y, lo.y],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_is_closed() {
        let (xs, ys) = rectangle((Point2D::new(0.0, 0.0), Point2D::new(2.0, 1.0)));
        assert_eq!(xs.len(), 5);
        assert_eq!(xs.first(), xs.last());
        assert_eq!(ys.first(), ys.last());
        assert_eq!(xs[2], 2.0);
        assert_eq!(ys[2], 1.0);
    }

    #[test]
    fn test_layout_layers() {
        let layout = RoomLayout::from_json(
            r#"{"objects": [
                {"type": "bed", "position": {"x": 1.0, "y": 1.0}, "dimensions": {"length_m": 2.0, "width_m": 1.6}},
                {"type": "door", "position": {"x": 3.0, "y": 0.0}, "dimensions": {"length_m": 0.1, "width_m": 0.9}}
            ]}"#,
        )
        .unwrap();

        let mut vis = Visualizer::new();
        vis.plot_layout(&layout, Some(0.3))
            .plot_point(Point2D::origin(), colors::START, "Origin");
        // bed outline, bed padding, door outline, origin marker
        assert_eq!(vis.layers.len(), 4);
    }

    #[test]
    fn test_path_style() {
        let style = PathStyle::new(colors::RED, "Test Path").with_line_width(3.0);
        assert_eq!(style.line_width, 3.0);
        assert_eq!(style.color, colors::RED);
    }
}
