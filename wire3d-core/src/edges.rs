/// Append-only store of homogeneous points, read back as line segments
use crate::error::Result;
use crate::matrix::Matrix;

/// Values per stored point: x, y, z, w
pub const POINT_SIZE: usize = 4;

/// A homogeneous point (x, y, z, 1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    fn to_array(self) -> [f64; POINT_SIZE] {
        [self.x, self.y, self.z, self.w]
    }
}

/// Column indices of the two endpoints of one segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

/// 4xM point matrix kept in a column-major buffer.
///
/// Columns `(2k, 2k + 1)` are the endpoints of segment `k`. Single points
/// appended with [`EdgeMatrix::add_point`] take part in that pairing like any
/// other column, so a circle's samples become chords between neighbours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeMatrix {
    values: Vec<f64>,
}

impl EdgeMatrix {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn with_capacity(points: usize) -> Self {
        Self {
            values: Vec::with_capacity(points * POINT_SIZE),
        }
    }

    pub fn add_point(&mut self, point: Point) {
        self.values.extend_from_slice(&point.to_array());
    }

    pub fn add_edge(&mut self, p0: Point, p1: Point) {
        self.add_point(p0);
        self.add_point(p1);
    }

    /// Append every point of `other`, keeping its order
    pub fn extend(&mut self, other: &EdgeMatrix) {
        self.values.extend_from_slice(&other.values);
    }

    /// Number of stored points (matrix columns)
    pub fn len(&self) -> usize {
        self.values.len() / POINT_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when every point belongs to a segment
    pub fn is_paired(&self) -> bool {
        self.len() % 2 == 0
    }

    pub fn point(&self, index: usize) -> Option<Point> {
        let start = index * POINT_SIZE;
        self.values.get(start..start + POINT_SIZE).map(|c| Point {
            x: c[0],
            y: c[1],
            z: c[2],
            w: c[3],
        })
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.len()).filter_map(move |i| self.point(i))
    }

    /// Endpoint index pairs (0, 1), (2, 3), ...
    ///
    /// A trailing unpaired point is not part of any segment.
    pub fn segments(&self) -> impl Iterator<Item = Segment> {
        (0..self.len() / 2).map(|k| Segment {
            start: 2 * k,
            end: 2 * k + 1,
        })
    }

    /// Endpoint coordinates of every segment
    pub fn lines(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.segments()
            .filter_map(move |s| Some((self.point(s.start)?, self.point(s.end)?)))
    }

    /// Flat column-major buffer, four values per point
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Copy of the store as a 4xM matrix
    pub fn as_matrix(&self) -> Matrix {
        Matrix::from_column_slice(POINT_SIZE, self.len(), &self.values)
    }

    /// Replace every point `p` with `transform * p`
    pub fn apply(&mut self, transform: &Matrix) -> Result<()> {
        transform.apply_to_points(&mut self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;

    #[test]
    fn test_add_edge_appends_pair() {
        let mut edges = EdgeMatrix::new();
        assert!(edges.is_empty());
        edges.add_edge(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 2.0, 3.0));
        assert_eq!(edges.len(), 2);
        assert!(edges.is_paired());
        assert_eq!(edges.point(1), Some(Point::new(1.0, 2.0, 3.0)));
        assert_eq!(edges.as_slice(), &[0.0, 0.0, 0.0, 1.0, 1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut a = EdgeMatrix::new();
        a.add_edge(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0));
        let mut b = EdgeMatrix::with_capacity(2);
        b.add_edge(Point::new(2.0, 0.0, 0.0), Point::new(3.0, 0.0, 0.0));
        a.extend(&b);
        assert_eq!(a.len(), 4);
        assert_eq!(a.point(2), Some(Point::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_segments_pair_consecutive_columns() {
        let mut edges = EdgeMatrix::new();
        for i in 0..5 {
            edges.add_point(Point::new(i as f64, 0.0, 0.0));
        }
        assert!(!edges.is_paired());
        let segments: Vec<_> = edges.segments().collect();
        assert_eq!(
            segments,
            vec![Segment { start: 0, end: 1 }, Segment { start: 2, end: 3 }]
        );

        let lines: Vec<_> = edges.lines().collect();
        assert_eq!(lines[1].0.x, 2.0);
        assert_eq!(lines[1].1.x, 3.0);
    }

    #[test]
    fn test_as_matrix_columns_are_points() {
        let mut edges = EdgeMatrix::new();
        edges.add_edge(Point::new(1.0, 2.0, 3.0), Point::new(4.0, 5.0, 6.0));
        let m = edges.as_matrix();
        assert_eq!((m.rows(), m.cols()), (4, 2));
        assert_eq!(m.get(2, 1), Some(6.0));
        assert_eq!(m.get(3, 0), Some(1.0));
    }

    #[test]
    fn test_apply_transforms_every_point() {
        let mut edges = EdgeMatrix::new();
        edges.add_edge(Point::new(1.0, 1.0, 1.0), Point::new(-1.0, 0.0, 2.0));
        edges.apply(&Transform::translate(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(edges.point(0), Some(Point::new(2.0, 3.0, 4.0)));
        assert_eq!(edges.point(1), Some(Point::new(0.0, 2.0, 5.0)));
    }

    #[test]
    fn test_apply_on_empty_store() {
        let mut edges = EdgeMatrix::new();
        edges.apply(&Transform::scale(2.0, 2.0, 2.0)).unwrap();
        assert!(edges.is_empty());
    }
}
