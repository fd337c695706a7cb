use crate::World;
use crate::components::Component;
use crate::core::SegmentId;
use crate::physics::PhysicsManager;
use log::trace;
use nalgebra::Vector3;
use rapier3d::prelude::*;

pub const DEFAULT_FRICTION: f32 = 0.999;

/// Box collider matching the segment's scale, attached to the segment's rigid body.
pub struct Collider3D {
    pub phys_handle: ColliderHandle,
    linked_to_body: RigidBodyHandle,
}

impl Component for Collider3D {
    fn delete(&mut self, physics: &mut PhysicsManager) {
        physics.collider_set.remove(
            self.phys_handle,
            &mut physics.island_manager,
            &mut physics.rigid_body_set,
            false,
        );
    }
}

impl Collider3D {
    pub fn new(
        physics: &mut PhysicsManager,
        owner: SegmentId,
        body: RigidBodyHandle,
        scale: Vector3<f32>,
        mass: f32,
        friction: f32,
    ) -> Self {
        let collider = ColliderBuilder::cuboid(scale.x / 2., scale.y / 2., scale.z / 2.)
            .mass(mass)
            .friction(friction)
            .user_data(owner.as_user_data())
            .build();

        trace!("[Collider] Cuboid {:?} with mass {mass}", scale);

        let PhysicsManager {
            collider_set,
            rigid_body_set,
            ..
        } = physics;
        let phys_handle = collider_set.insert_with_parent(collider, body, rigid_body_set);

        Collider3D {
            phys_handle,
            linked_to_body: body,
        }
    }

    pub fn get_collider<'a>(&self, physics: &'a PhysicsManager) -> Option<&'a Collider> {
        physics.collider_set.get(self.phys_handle)
    }

    pub fn get_collider_mut<'a>(&self, physics: &'a mut PhysicsManager) -> Option<&'a mut Collider> {
        physics.collider_set.get_mut(self.phys_handle)
    }

    pub fn set_mass(&self, physics: &mut PhysicsManager, mass: f32) {
        if let Some(coll) = self.get_collider_mut(physics) {
            coll.set_mass(mass);
        }
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.linked_to_body
    }

    /// Looks up the segment a collider belongs to, e.g. from a contact or ray hit.
    pub fn owner_of(world: &World, handle: ColliderHandle) -> Option<SegmentId> {
        let collider = world.physics.collider_set.get(handle)?;
        let id = SegmentId::from_user_data(collider.user_data);
        world.segments.contains_key(id).then_some(id)
    }
}
