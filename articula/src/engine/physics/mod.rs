//! Physics simulation powered by `rapier`.
//!
//! The [`PhysicsManager`] struct manages rigid bodies, colliders and joints
//! and executes fixed physics steps.

pub mod simulator;

pub use simulator::*;
