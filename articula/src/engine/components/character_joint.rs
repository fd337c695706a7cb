use self::CharacterJointError::*;
use crate::components::Component;
use crate::physics::PhysicsManager;
use crate::utils::math::rotation_from_axes;
use bon::Builder;
use log::debug;
use nalgebra::{Isometry3, Point3, Translation3, Vector3};
use rapier3d::prelude::*;
use snafu::{Snafu, ensure};

pub const DEFAULT_JOINT_LIMIT_DEG: f32 = 120.0;

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(context(suffix(Err)))]
pub enum CharacterJointError {
    #[snafu(display("CharacterJoint: Twist and swing axes must be non-zero and orthogonal"))]
    DegenerateAxes,
    #[snafu(display("CharacterJoint: Parent doesn't have a rigid body"))]
    NoParentRigidBody,
    #[snafu(display("CharacterJoint: Child doesn't have a rigid body"))]
    NoChildRigidBody,
    #[snafu(display("CharacterJoint: Joint is already connected"))]
    AlreadyConnected,
}

/// Ball-and-socket joint with a limited twist around `axis` and limited swing around the two
/// remaining axes.
///
/// Axes and anchor are given in the child's local frame. The matching frame on the parent is
/// derived from the bodies' poses at the time of [`CharacterJoint::try_connect`].
#[derive(Debug, Clone, Builder)]
pub struct CharacterJoint {
    #[builder(default = DEFAULT_JOINT_LIMIT_DEG)]
    limit_deg: f32,
    #[builder(default = Vector3::x())]
    axis: Vector3<f32>,
    #[builder(default = Vector3::y())]
    swing_axis: Vector3<f32>,
    #[builder(default = Point3::origin())]
    anchor: Point3<f32>,
    #[builder(default = true)]
    enable_collision: bool,
    #[builder(skip)]
    handle: Option<ImpulseJointHandle>,
}

impl Component for CharacterJoint {
    fn delete(&mut self, physics: &mut PhysicsManager) {
        self.disconnect(physics);
    }
}

impl CharacterJoint {
    pub fn try_connect(
        &mut self,
        physics: &mut PhysicsManager,
        parent: RigidBodyHandle,
        child: RigidBodyHandle,
    ) -> Result<ImpulseJointHandle, CharacterJointError> {
        ensure!(self.handle.is_none(), AlreadyConnectedErr);

        let frame_rot = rotation_from_axes(self.axis, self.swing_axis).ok_or(DegenerateAxes)?;

        let parent_pose = *physics
            .rigid_body_set
            .get(parent)
            .ok_or(NoParentRigidBody)?
            .position();
        let child_pose = *physics
            .rigid_body_set
            .get(child)
            .ok_or(NoChildRigidBody)?
            .position();

        let child_frame =
            Isometry3::from_parts(Translation3::from(self.anchor.coords), frame_rot);
        // the same point and orientation, seen from the parent
        let parent_frame = parent_pose.inverse() * child_pose * child_frame;

        let limit = self.limit_deg.to_radians();
        let joint = SphericalJointBuilder::new()
            .local_frame1(parent_frame)
            .local_frame2(child_frame)
            .limits(JointAxis::AngX, [-limit, limit])
            .limits(JointAxis::AngY, [-limit, limit])
            .limits(JointAxis::AngZ, [-limit, limit])
            .contacts_enabled(self.enable_collision);

        let handle = physics
            .impulse_joint_set
            .insert(parent, child, joint, true);
        self.handle = Some(handle);

        debug!(
            "Connected character joint (axis {:?}, swing {:?}, limit {}deg)",
            self.axis, self.swing_axis, self.limit_deg
        );

        Ok(handle)
    }

    pub fn disconnect(&mut self, physics: &mut PhysicsManager) {
        if let Some(joint) = self.handle.take() {
            physics.impulse_joint_set.remove(joint, true);
        }
    }

    pub fn get_joint<'a>(&self, physics: &'a PhysicsManager) -> Option<&'a ImpulseJoint> {
        physics.impulse_joint_set.get(self.handle?)
    }

    pub fn handle(&self) -> Option<ImpulseJointHandle> {
        self.handle
    }

    pub fn is_connected(&self) -> bool {
        self.handle.is_some()
    }

    pub fn axis(&self) -> Vector3<f32> {
        self.axis
    }

    pub fn swing_axis(&self) -> Vector3<f32> {
        self.swing_axis
    }

    pub fn anchor(&self) -> Point3<f32> {
        self.anchor
    }

    pub fn limit_deg(&self) -> f32 {
        self.limit_deg
    }

    pub fn collision_enabled(&self) -> bool {
        self.enable_collision
    }
}
