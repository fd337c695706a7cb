//! Components owned by a [`JointSegment`].
//!
//! Each component wraps one rapier object (a body, a collider or a joint) and knows how to
//! clean it up again. The segment composes them and adds the actuator on top.

pub mod character_joint;
pub mod collider;
pub mod effector;
pub mod joint_segment;
pub mod rigid_body;

pub use character_joint::*;
pub use collider::*;
pub use effector::{Effector, EffectorError};
pub use joint_segment::*;
pub use rigid_body::*;

use crate::physics::PhysicsManager;

/// A piece of segment state that lives (partly) inside the physics sets.
pub trait Component {
    // Gets called once per fixed tick, before physics are evolved
    fn fixed_update(&mut self, _physics: &mut PhysicsManager) {}

    // Gets called when the owner is about to be deleted
    fn delete(&mut self, _physics: &mut PhysicsManager) {}
}
