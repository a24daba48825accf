//! Path model: ordered command sequences built incrementally, then frozen.
//!
//! A [`PdfPath`] owns its subpaths; a [`Subpath`] owns its commands. The
//! "is closed" status and winding orientation of a subpath are derived from
//! the command sequence (shoelace sum over the flattened polygon), never
//! stored, so they cannot drift out of sync while the path is being built.

use crate::geometry::{CubicBezierCurve, Line, Point, Rectangle};
use crate::utils::{EPSILON, bound_of};

/// A single drawing command inside a subpath.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    Move(Point),
    Line(Line),
    BezierCurve(CubicBezierCurve),
    Close,
}

/// An ordered sequence of commands starting (when well-formed) with a Move.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subpath {
    commands: Vec<PathCommand>,
}

impl Subpath {
    /// Creates a subpath directly from commands. No validation happens
    /// here; the clipper rejects malformed sequences when it consumes them.
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Starting point of the subpath, if any.
    pub fn start_point(&self) -> Option<Point> {
        self.commands.first().map(|c| match c {
            PathCommand::Move(p) => *p,
            PathCommand::Line(l) => l.p1,
            PathCommand::BezierCurve(b) => b.start,
            PathCommand::Close => Point::default(),
        })
    }

    /// Last reached point of the subpath, if any.
    pub fn end_point(&self) -> Option<Point> {
        for command in self.commands.iter().rev() {
            match command {
                PathCommand::Move(p) => return Some(*p),
                PathCommand::Line(l) => return Some(l.p2),
                PathCommand::BezierCurve(b) => return Some(b.end),
                PathCommand::Close => return self.start_point(),
            }
        }
        None
    }

    /// Derived closed status: an explicit Close command, or coincident
    /// start and end points.
    pub fn is_closed(&self) -> bool {
        if self
            .commands
            .iter()
            .any(|c| matches!(c, PathCommand::Close))
        {
            return true;
        }
        match (self.start_point(), self.end_point()) {
            (Some(s), Some(e)) => (s.x - e.x).abs() < EPSILON && (s.y - e.y).abs() < EPSILON,
            _ => false,
        }
    }

    /// Flattens the subpath to a polygon, approximating each Bézier
    /// command with `bezier_segments` straight segments.
    pub fn to_polygon(&self, bezier_segments: usize) -> Vec<Point> {
        let mut points = Vec::new();
        for command in &self.commands {
            match command {
                PathCommand::Move(p) => push_point(&mut points, *p),
                PathCommand::Line(l) => {
                    push_point(&mut points, l.p1);
                    push_point(&mut points, l.p2);
                }
                PathCommand::BezierCurve(b) => {
                    for p in b.to_polyline(bezier_segments) {
                        push_point(&mut points, p);
                    }
                }
                PathCommand::Close => {
                    if let Some(start) = self.start_point() {
                        push_point(&mut points, start);
                    }
                }
            }
        }
        points
    }

    /// Shoelace sum over the flattened polygon: twice the signed area,
    /// positive for counter-clockwise winding.
    pub fn shoelace_sum(&self) -> f64 {
        let polygon = self.to_polygon(10);
        if polygon.len() < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..polygon.len() {
            let a = polygon[i];
            let b = polygon[(i + 1) % polygon.len()];
            sum += a.x * b.y - b.x * a.y;
        }
        sum
    }

    /// Winding orientation derived from the shoelace sum.
    pub fn is_counter_clockwise(&self) -> bool {
        self.shoelace_sum() > 0.0
    }

    /// Winding orientation derived from the shoelace sum.
    pub fn is_clockwise(&self) -> bool {
        self.shoelace_sum() < 0.0
    }

    /// Axis-aligned bounding rectangle of the flattened subpath.
    pub fn bounding_rectangle(&self) -> Option<Rectangle> {
        bound_of(self.to_polygon(10))
            .map(|(x0, y0, x1, y1)| Rectangle::from_corners(Point::new(x0, y0), Point::new(x1, y1)))
    }
}

fn push_point(points: &mut Vec<Point>, p: Point) {
    if let Some(last) = points.last() {
        if (last.x - p.x).abs() < EPSILON && (last.y - p.y).abs() < EPSILON {
            return;
        }
    }
    points.push(p);
}

/// A path under construction: commands are appended through the builder
/// methods during content interpretation, then the finished value is only
/// read. Mutation after consumption is a caller bug, not guarded here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PdfPath {
    subpaths: Vec<Subpath>,
    current_point: Option<Point>,
}

impl PdfPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frozen path from finished subpaths.
    pub fn from_subpaths(subpaths: Vec<Subpath>) -> Self {
        let current_point = subpaths.last().and_then(|s| s.end_point());
        Self {
            subpaths,
            current_point,
        }
    }

    /// A closed rectangular path, the most common clip shape.
    pub fn rectangle(rect: Rectangle) -> Self {
        let mut path = Self::new();
        let corners = rect.corners();
        path.move_to(corners[0]);
        for corner in &corners[1..] {
            path.line_to(*corner);
        }
        path.close_subpath();
        path
    }

    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(Subpath::is_empty)
    }

    /// Starts a new subpath at `point`.
    pub fn move_to(&mut self, point: Point) {
        self.subpaths.push(Subpath {
            commands: vec![PathCommand::Move(point)],
        });
        self.current_point = Some(point);
    }

    /// Appends a straight segment from the current point.
    pub fn line_to(&mut self, point: Point) {
        let from = self.ensure_current(point);
        if let Some(sub) = self.subpaths.last_mut() {
            sub.commands.push(PathCommand::Line(Line::new(from, point)));
        }
        self.current_point = Some(point);
    }

    /// Appends a cubic Bézier segment from the current point.
    pub fn bezier_curve_to(&mut self, first_control: Point, second_control: Point, end: Point) {
        let from = self.ensure_current(end);
        if let Some(sub) = self.subpaths.last_mut() {
            sub.commands.push(PathCommand::BezierCurve(CubicBezierCurve::new(
                from,
                first_control,
                second_control,
                end,
            )));
        }
        self.current_point = Some(end);
    }

    /// Closes the current subpath.
    pub fn close_subpath(&mut self) {
        if let Some(sub) = self.subpaths.last_mut() {
            if !sub.is_empty() && !sub.commands.iter().any(|c| matches!(c, PathCommand::Close)) {
                sub.commands.push(PathCommand::Close);
            }
            self.current_point = sub.start_point();
        }
    }

    /// Axis-aligned bounding rectangle over all subpaths.
    pub fn bounding_rectangle(&self) -> Option<Rectangle> {
        let points = self
            .subpaths
            .iter()
            .flat_map(|s| s.to_polygon(10));
        bound_of(points)
            .map(|(x0, y0, x1, y1)| Rectangle::from_corners(Point::new(x0, y0), Point::new(x1, y1)))
    }

    // A Line/Curve before any Move starts an implicit subpath at the
    // command's own start; mirrors what lenient PDF interpreters do.
    fn ensure_current(&mut self, fallback: Point) -> Point {
        match self.current_point {
            Some(p) => p,
            None => {
                self.subpaths.push(Subpath {
                    commands: vec![PathCommand::Move(fallback)],
                });
                fallback
            }
        }
    }
}
