//! Line intersection and point-in-polygon tests used by the scanline fill.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Two points defining a line. Intersections treat it as infinite, the
/// x-span of the two points is checked separately with `spans_x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point2D,
    pub end: Point2D,
}

impl Segment {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    fn slope(&self) -> f64 {
        (self.end.y - self.start.y) / (self.end.x - self.start.x)
    }

    fn intercept(&self) -> f64 {
        (self.start.y * self.end.x - self.start.x * self.end.y) / (self.end.x - self.start.x)
    }

    fn y_at(&self, x: f64) -> f64 {
        self.slope() * x + self.intercept()
    }

    /// Whether `x` lies between the x coordinates of both points, inclusive.
    pub fn spans_x(&self, x: f64) -> bool {
        x >= self.start.x.min(self.end.x) && x <= self.start.x.max(self.end.x)
    }
}

/// Consecutive vertex pairs, without an edge from the last vertex back to the first.
pub fn open_edges(vertices: &[Point2D]) -> impl Iterator<Item = Segment> + '_ {
    vertices
        .windows(2)
        .map(|pair| Segment::new(pair[0], pair[1]))
}

/// Every polygon edge including the one closing the last vertex to the first.
pub fn closed_edges(vertices: &[Point2D]) -> impl Iterator<Item = Segment> + '_ {
    let count = vertices.len();
    (0..count).map(move |index| Segment::new(vertices[index], vertices[(index + 1) % count]))
}

/// The area `[0, width] x [0, height]` in which intersections are accepted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    width: f64,
    height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn contains(&self, point: &Point2D) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    /// Intersection of the infinite lines through `first` and `second`.
    ///
    /// Two vertical lines on the same x meet at the higher endpoint of
    /// `second`; that point is returned without the bounds check. Parallel
    /// lines and points outside the bounds yield `None`.
    pub fn line_intersection(&self, first: &Segment, second: &Segment) -> Option<Point2D> {
        let intersection = match (first.is_vertical(), second.is_vertical()) {
            (true, true) => {
                if first.end.x != second.end.x {
                    return None;
                }
                return Some(Point2D::new(
                    second.end.x,
                    second.start.y.max(second.end.y),
                ));
            }
            (true, false) => Point2D::new(first.end.x, second.y_at(first.end.x)),
            (false, true) => Point2D::new(second.end.x, first.y_at(second.end.x)),
            (false, false) => {
                let (first_slope, second_slope) = (first.slope(), second.slope());
                if first_slope == second_slope {
                    return None;
                }
                let x = (second.intercept() - first.intercept()) / (first_slope - second_slope);
                Point2D::new(x, second_slope * x + second.intercept())
            }
        };
        if !self.contains(&intersection) {
            return None;
        }
        Some(intersection)
    }

    /// Even-odd test with a vertical ray from `(point.x, 0)` down to `point`.
    ///
    /// An edge counts when the ray meets it within the edge's x-span at a y no
    /// greater than `point.y`.
    pub fn point_in_polygon(&self, point: &Point2D, vertices: &[Point2D]) -> bool {
        let ray = Segment::new(
            Point2D::new(point.x, 0.0),
            Point2D::new(point.x, self.height),
        );
        let crossings = closed_edges(vertices)
            .filter(|edge| {
                self.line_intersection(&ray, edge)
                    .is_some_and(|crossing| edge.spans_x(crossing.x) && crossing.y <= point.y)
            })
            .count();
        crossings % 2 == 1
    }
}

#[cfg(test)]
mod test {
    use super::{closed_edges, open_edges, Bounds, Point2D, Segment};

    fn segment(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::new(Point2D::new(x0, y0), Point2D::new(x1, y1))
    }

    fn triangle() -> Vec<Point2D> {
        vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(2.0, 4.0),
        ]
    }

    #[test]
    fn intersect_scanline_with_sloped_edge() {
        let bounds = Bounds::new(8.0, 8.0);
        let scanline = segment(0.0, 2.0, 8.0, 2.0);
        let edge = segment(4.0, 0.0, 2.0, 4.0);
        assert_eq!(
            bounds.line_intersection(&scanline, &edge),
            Some(Point2D::new(3.0, 2.0))
        );
    }

    #[test]
    fn intersect_scanline_with_vertical_edge() {
        let bounds = Bounds::new(8.0, 8.0);
        let scanline = segment(0.0, 3.0, 8.0, 3.0);
        let edge = segment(5.0, 1.0, 5.0, 5.0);
        assert_eq!(
            bounds.line_intersection(&scanline, &edge),
            Some(Point2D::new(5.0, 3.0))
        );
    }

    #[test]
    fn intersect_vertical_ray_with_sloped_edge() {
        let bounds = Bounds::new(8.0, 8.0);
        let ray = segment(2.0, 0.0, 2.0, 8.0);
        let edge = segment(0.0, 0.0, 4.0, 4.0);
        assert_eq!(
            bounds.line_intersection(&ray, &edge),
            Some(Point2D::new(2.0, 2.0))
        );
    }

    #[test]
    fn coincident_vertical_lines_meet_at_higher_endpoint() {
        let bounds = Bounds::new(8.0, 8.0);
        let ray = segment(3.0, 0.0, 3.0, 8.0);
        let edge = segment(3.0, 6.0, 3.0, 2.0);
        assert_eq!(
            bounds.line_intersection(&ray, &edge),
            Some(Point2D::new(3.0, 6.0))
        );
    }

    #[test]
    fn separate_vertical_lines_do_not_meet() {
        let bounds = Bounds::new(8.0, 8.0);
        let ray = segment(3.0, 0.0, 3.0, 8.0);
        let edge = segment(4.0, 1.0, 4.0, 2.0);
        assert_eq!(bounds.line_intersection(&ray, &edge), None);
    }

    #[test]
    fn parallel_lines_do_not_meet() {
        let bounds = Bounds::new(8.0, 8.0);
        let scanline = segment(0.0, 2.0, 8.0, 2.0);
        assert_eq!(
            bounds.line_intersection(&scanline, &segment(0.0, 0.0, 4.0, 0.0)),
            None
        );
        assert_eq!(
            bounds.line_intersection(&scanline, &segment(1.0, 2.0, 4.0, 2.0)),
            None
        );
    }

    #[test]
    fn intersection_outside_bounds_is_rejected() {
        let bounds = Bounds::new(8.0, 8.0);
        let scanline = segment(0.0, 2.0, 8.0, 2.0);
        let edge = segment(9.0, 0.0, 10.0, 1.0);
        assert_eq!(bounds.line_intersection(&scanline, &edge), None);
    }

    #[test]
    fn intersection_at_origin_is_a_real_point() {
        let bounds = Bounds::new(8.0, 8.0);
        let scanline = segment(0.0, 0.0, 8.0, 0.0);
        let edge = segment(0.0, 0.0, 2.0, 4.0);
        assert_eq!(
            bounds.line_intersection(&scanline, &edge),
            Some(Point2D::new(0.0, 0.0))
        );
    }

    #[test]
    fn triangle_midpoint_is_inside() {
        let bounds = Bounds::new(8.0, 8.0);
        assert!(bounds.point_in_polygon(&Point2D::new(2.0, 2.0), &triangle()));
    }

    #[test]
    fn points_beside_triangle_are_outside() {
        let bounds = Bounds::new(8.0, 8.0);
        assert!(!bounds.point_in_polygon(&Point2D::new(1.0, 5.0), &triangle()));
        assert!(!bounds.point_in_polygon(&Point2D::new(6.0, 1.0), &triangle()));
    }

    #[test]
    fn open_edges_do_not_close_polygon() {
        let vertices = triangle();
        let edges: Vec<Segment> = open_edges(&vertices).collect();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1].end, Point2D::new(2.0, 4.0));
    }

    #[test]
    fn closed_edges_wrap_around() {
        let vertices = triangle();
        let edges: Vec<Segment> = closed_edges(&vertices).collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[2], segment(2.0, 4.0, 0.0, 0.0));
    }

    #[test]
    fn spans_x_is_inclusive() {
        let edge = segment(4.0, 0.0, 2.0, 4.0);
        assert!(edge.spans_x(2.0));
        assert!(edge.spans_x(4.0));
        assert!(!edge.spans_x(4.5));
    }
}
