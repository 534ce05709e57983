/// Tessellation of circles and cubic curves into the edge matrix
use crate::edges::{EdgeMatrix, Point};
use crate::error::Result;
use crate::matrix::Matrix;

/// Parameter increment between samples
pub const STEP: f64 = 0.002;

/// Samples taken over t in [0, 1)
pub const SAMPLES: usize = 500;

/// Offset of the second endpoint of each cubic curve edge
pub const CHORD_OFFSET: f64 = 0.001;

/// Depth given to every Hermite and Bezier point
pub const CURVE_Z: f64 = 1.0;

/// Hermite basis, one entry per column.
const HERMITE_BASIS: [[f64; 4]; 4] = [
    [2.0, -3.0, 0.0, 1.0],
    [-2.0, 3.0, 0.0, 0.0],
    [1.0, -2.0, 1.0, 0.0],
    [1.0, -1.0, 0.0, 0.0],
];

/// Bezier basis, one entry per column.
const BEZIER_BASIS: [[f64; 4]; 4] = [
    [-1.0, 3.0, -3.0, 1.0],
    [3.0, -6.0, 3.0, 0.0],
    [-3.0, 3.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
];

/// Cubic curve family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    Hermite,
    Bezier,
}

impl CurveKind {
    fn basis(self) -> Matrix {
        match self {
            CurveKind::Hermite => Matrix::from_columns(&HERMITE_BASIS),
            CurveKind::Bezier => Matrix::from_columns(&BEZIER_BASIS),
        }
    }
}

/// Polynomial `a t³ + b t² + c t + d` for one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Cubic {
    /// Expand four geometry values through a basis matrix.
    ///
    /// The geometry matrix carries the values in its first column and zeros
    /// elsewhere, so the first column of the product holds the coefficients.
    fn from_geometry(basis: &Matrix, geometry: [f64; 4]) -> Result<Self> {
        let mut columns = [[0.0; 4]; 4];
        columns[0] = geometry;
        let coefs = basis.multiply(&Matrix::from_columns(&columns))?;
        let at = |row| coefs.get(row, 0).unwrap_or_default();
        Ok(Self {
            a: at(0),
            b: at(1),
            c: at(2),
            d: at(3),
        })
    }

    pub fn eval(&self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t + self.d
    }
}

/// Sample parameters 0, STEP, 2 STEP, ... below 1
fn parameters() -> impl Iterator<Item = f64> {
    (0..SAMPLES).map(|i| i as f64 * STEP)
}

/// Append `SAMPLES` points around a circle in the plane z = cz.
///
/// Points are added singly; the store's pairing turns neighbours into
/// chords. No closing chord is added.
pub fn add_circle(edges: &mut EdgeMatrix, cx: f64, cy: f64, cz: f64, r: f64) {
    for t in parameters() {
        let angle = std::f64::consts::TAU * t;
        edges.add_point(Point::new(r * angle.cos() + cx, r * angle.sin() + cy, cz));
    }
}

/// Per-axis coefficients of a cubic curve in the xy plane.
///
/// `x` and `y` are the four geometry values of each axis: endpoints and
/// tangents for Hermite, control points for Bezier.
pub fn coefficients(kind: CurveKind, x: [f64; 4], y: [f64; 4]) -> Result<(Cubic, Cubic)> {
    let basis = kind.basis();
    Ok((
        Cubic::from_geometry(&basis, x)?,
        Cubic::from_geometry(&basis, y)?,
    ))
}

/// Append `SAMPLES` edges along a cubic curve.
///
/// Each edge runs from the point at `t` to the point at `t + CHORD_OFFSET`.
pub fn add_curve(edges: &mut EdgeMatrix, kind: CurveKind, x: [f64; 4], y: [f64; 4]) -> Result<()> {
    let (cx, cy) = coefficients(kind, x, y)?;
    for t in parameters() {
        let u = t + CHORD_OFFSET;
        edges.add_edge(
            Point::new(cx.eval(t), cy.eval(t), CURVE_Z),
            Point::new(cx.eval(u), cy.eval(u), CURVE_Z),
        );
    }
    Ok(())
}

/// Hermite curve from p0 to p1 with tangents r0 and r1
#[allow(clippy::too_many_arguments)]
pub fn add_hermite(
    edges: &mut EdgeMatrix,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    rx0: f64,
    ry0: f64,
    rx1: f64,
    ry1: f64,
) -> Result<()> {
    add_curve(edges, CurveKind::Hermite, [x0, x1, rx0, rx1], [y0, y1, ry0, ry1])
}

/// Bezier curve with control points p0..p3
#[allow(clippy::too_many_arguments)]
pub fn add_bezier(
    edges: &mut EdgeMatrix,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    x3: f64,
    y3: f64,
) -> Result<()> {
    add_curve(edges, CurveKind::Bezier, [x0, x1, x2, x3], [y0, y1, y2, y3])
}

pub fn add_line(edges: &mut EdgeMatrix, p0: Point, p1: Point) {
    edges.add_edge(p0, p1);
}
