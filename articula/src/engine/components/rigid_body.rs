use crate::components::Component;
use crate::core::{SegmentId, Transform};
use crate::physics::PhysicsManager;
use nalgebra::{Isometry3, Vector3};
use rapier3d::prelude::*;

pub struct RigidBodyComponent {
    pub body_handle: RigidBodyHandle,
    kinematic: bool,
    mass: f32,
}

impl Component for RigidBodyComponent {
    fn delete(&mut self, physics: &mut PhysicsManager) {
        physics.remove_body(self.body_handle);
    }
}

impl RigidBodyComponent {
    pub fn new(physics: &mut PhysicsManager, owner: SegmentId, transform: &Transform) -> Self {
        let rigid_body = RigidBodyBuilder::dynamic()
            .user_data(owner.as_user_data())
            .position(transform.isometry())
            .build();

        let body_handle = physics.rigid_body_set.insert(rigid_body);

        RigidBodyComponent {
            body_handle,
            kinematic: false,
            mass: 0.0,
        }
    }

    pub fn get_body<'a>(&self, physics: &'a PhysicsManager) -> Option<&'a RigidBody> {
        physics.rigid_body_set.get(self.body_handle)
    }

    pub fn get_body_mut<'a>(&self, physics: &'a mut PhysicsManager) -> Option<&'a mut RigidBody> {
        physics.rigid_body_set.get_mut(self.body_handle)
    }

    pub fn reset_velocity(&self, physics: &mut PhysicsManager) {
        if let Some(rb) = self.get_body_mut(physics) {
            rb.set_linvel(Vector3::zeros(), true);
            rb.set_angvel(Vector3::zeros(), true);
        }
    }

    pub fn set_pose(&self, physics: &mut PhysicsManager, pose: Isometry3<f32>) {
        if let Some(rb) = self.get_body_mut(physics) {
            if rb.is_kinematic() {
                rb.set_next_kinematic_position(pose);
            }
            rb.set_position(pose, true);
        }
    }

    pub fn set_kinematic(&mut self, physics: &mut PhysicsManager, kinematic: bool) {
        let Some(rb) = self.get_body_mut(physics) else {
            return;
        };
        if kinematic {
            rb.set_body_type(RigidBodyType::KinematicPositionBased, true);
        } else {
            rb.set_body_type(RigidBodyType::Dynamic, true);
        }
        self.kinematic = kinematic;
    }

    pub fn is_kinematic(&self) -> bool {
        self.kinematic
    }

    /// Mass the segment asked for. The body picks it up through its collider.
    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub(crate) fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
    }
}
