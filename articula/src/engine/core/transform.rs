use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

/// World pose and box extents of a segment.
///
/// Once a segment has a rigid body, the body is the authority on pose and the transform is
/// re-synced from it after every physics tick. Scale is never touched by physics.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pos: Vector3<f32>,
    rot: UnitQuaternion<f32>,
    scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Transform::new()
    }
}

impl Transform {
    /// Creates a new [`Transform`] at the origin with no rotation and a uniform scale of `1.0`.
    pub fn new() -> Self {
        Transform {
            pos: Vector3::zeros(),
            rot: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.set_position(x, y, z);
        self
    }

    pub fn with_rotation(mut self, rot: UnitQuaternion<f32>) -> Self {
        self.rot = rot;
        self
    }

    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.set_scale(x, y, z);
        self
    }

    #[inline(always)]
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.set_position_vec(Vector3::new(x, y, z))
    }

    pub fn set_position_vec(&mut self, pos: Vector3<f32>) {
        self.pos = pos;
    }

    pub fn position(&self) -> Vector3<f32> {
        self.pos
    }

    pub fn translate(&mut self, offset: Vector3<f32>) {
        self.pos += offset;
    }

    pub fn set_rotation(&mut self, rot: UnitQuaternion<f32>) {
        self.rot = rot;
    }

    pub fn rotation(&self) -> UnitQuaternion<f32> {
        self.rot
    }

    #[inline(always)]
    pub fn set_scale(&mut self, x: f32, y: f32, z: f32) {
        self.set_scale_vec(Vector3::new(x, y, z))
    }

    pub fn set_scale_vec(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
    }

    /// Full extents of the segment box
    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    pub fn half_extents(&self) -> Vector3<f32> {
        self.scale * 0.5
    }

    /// Position and rotation as a rigid motion, scale excluded.
    pub fn isometry(&self) -> Isometry3<f32> {
        Isometry3::from_parts(Translation3::from(self.pos), self.rot)
    }

    pub fn set_isometry(&mut self, iso: &Isometry3<f32>) {
        self.pos = iso.translation.vector;
        self.rot = iso.rotation;
    }
}
