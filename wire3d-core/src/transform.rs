/// Elementary 3D transformation matrices
use nalgebra::{Matrix4, Vector3};

use crate::matrix::Matrix;

/// Rotation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Resolve a script axis token.
    ///
    /// Lowercase `x`, `y` and `z` select that axis. Every other token,
    /// uppercase letters included, selects `Z`, matching how existing
    /// scripts have always behaved.
    pub fn from_token(token: &str) -> Self {
        match token {
            "x" => Axis::X,
            "y" => Axis::Y,
            "z" => Axis::Z,
            _ => {
                log::warn!("unknown rotation axis `{}`, rotating about z", token);
                Axis::Z
            }
        }
    }

    fn unit(self) -> nalgebra::Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// diag(sx, sy, sz, 1)
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Matrix {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz)).into()
    }

    /// Identity with (tx, ty, tz) in the last column
    pub fn translate(tx: f64, ty: f64, tz: f64) -> Matrix {
        Matrix4::new_translation(&Vector3::new(tx, ty, tz)).into()
    }

    /// Right-handed rotation about `axis` by `degrees`
    pub fn rotate(axis: Axis, degrees: f64) -> Matrix {
        Matrix4::from_axis_angle(&axis.unit(), degrees.to_radians()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(t: &Matrix, point: [f64; 4]) -> Vec<f64> {
        let mut buf = point.to_vec();
        t.apply_to_points(&mut buf).unwrap();
        buf
    }

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn test_unit_scale_is_identity() {
        let t = Transform::scale(1.0, 1.0, 1.0);
        assert!(t.approx_eq(&Matrix::identity(), 0.0));
        assert_eq!(apply(&t, [3.0, -4.0, 5.0, 1.0]), vec![3.0, -4.0, 5.0, 1.0]);
    }

    #[test]
    fn test_scale_diagonal() {
        let t = Transform::scale(2.0, 3.0, 4.0);
        assert_eq!(t.get(0, 0), Some(2.0));
        assert_eq!(t.get(1, 1), Some(3.0));
        assert_eq!(t.get(2, 2), Some(4.0));
        assert_eq!(t.get(3, 3), Some(1.0));
        assert_eq!(t.get(0, 1), Some(0.0));
    }

    #[test]
    fn test_translate_last_column() {
        let t = Transform::translate(1.0, -2.0, 3.5);
        assert!(close(&apply(&t, [0.0, 0.0, 0.0, 1.0]), &[1.0, -2.0, 3.5, 1.0]));
    }

    #[test]
    fn test_rotate_z_quarter_turn() {
        let t = Transform::rotate(Axis::Z, 90.0);
        assert!(close(&apply(&t, [1.0, 0.0, 0.0, 1.0]), &[0.0, 1.0, 0.0, 1.0]));
    }

    #[test]
    fn test_rotate_x_and_y_are_right_handed() {
        let rx = Transform::rotate(Axis::X, 90.0);
        assert!(close(&apply(&rx, [0.0, 1.0, 0.0, 1.0]), &[0.0, 0.0, 1.0, 1.0]));

        let ry = Transform::rotate(Axis::Y, 90.0);
        assert!(close(&apply(&ry, [0.0, 0.0, 1.0, 1.0]), &[1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_axis_tokens() {
        assert_eq!(Axis::from_token("x"), Axis::X);
        assert_eq!(Axis::from_token("y"), Axis::Y);
        assert_eq!(Axis::from_token("z"), Axis::Z);
    }

    #[test]
    fn test_uppercase_axis_rotates_about_z() {
        assert_eq!(Axis::from_token("X"), Axis::Z);
        assert_eq!(Axis::from_token("Y"), Axis::Z);
        assert_eq!(Axis::from_token("Z"), Axis::Z);
    }

    #[test]
    fn test_unknown_axis_rotates_about_z() {
        let axis = Axis::from_token("w");
        assert_eq!(axis, Axis::Z);
        let unknown = Transform::rotate(axis, 90.0);
        let z = Transform::rotate(Axis::Z, 90.0);
        assert!(unknown.approx_eq(&z, 0.0));
    }
}
