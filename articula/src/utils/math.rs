use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};

pub const VECTOR3_ID: Vector3<f32> = Vector3::new(0.0, 0.0, 0.0);

/// Orthogonality tolerance for joint frame axes.
pub const AXIS_EPSILON: f32 = 1e-4;

pub trait FloatMathExt {
    fn lerp(self, other: Self, t: f32) -> Self;
    /// Same as [`FloatMathExt::lerp`], but `t` is clamped to `[0, 1]` first.
    fn lerp_clamped(self, other: Self, t: f32) -> Self;
}

impl FloatMathExt for f32 {
    fn lerp(self, other: Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }

    fn lerp_clamped(self, other: Self, t: f32) -> Self {
        // NaN signals count as the lower bound
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        self.lerp(other, t)
    }
}

/// Builds the rotation which maps the local X axis onto `x` and the local Y axis onto `y`.
///
/// Returns `None` if either axis is zero or the two aren't orthogonal.
pub fn rotation_from_axes(x: Vector3<f32>, y: Vector3<f32>) -> Option<UnitQuaternion<f32>> {
    let x = x.try_normalize(AXIS_EPSILON)?;
    let y = y.try_normalize(AXIS_EPSILON)?;
    if x.dot(&y).abs() > AXIS_EPSILON {
        return None;
    }

    let z = x.cross(&y);
    let basis = Matrix3::from_columns(&[x, y, z]);
    let rotation = Rotation3::from_matrix_unchecked(basis);

    Some(UnitQuaternion::from_rotation_matrix(&rotation))
}

/// Limits the length of `v` to `max`, keeping its direction.
pub fn clamp_magnitude(v: Vector3<f32>, max: f32) -> Vector3<f32> {
    let norm = v.norm();
    if norm > max && norm > 0.0 {
        v * (max / norm)
    } else {
        v
    }
}
