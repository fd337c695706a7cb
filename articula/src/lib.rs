//! Articulated creature segments on top of rapier.
//!
//! A creature is a tree of box-shaped [`JointSegment`](components::JointSegment)s. Every
//! non-root segment hangs off one face of its parent through a character joint and carries a
//! two-axis torque actuator, driven by normalized signals from a
//! [`Controller`](controllers::Controller).
//!
//! ```no_run
//! use articula::core::{SideType, Transform};
//! use articula::World;
//!
//! let mut world = World::new();
//! let torso = world.new_segment("torso", Transform::new().with_scale(2.0, 1.0, 1.0));
//! let leg = world.new_segment("leg", Transform::new().with_scale(1.0, 0.4, 0.4));
//! world.connect(leg, torso, SideType::Right).unwrap();
//!
//! world.affect(torso, &[0.5, 0.5, 1.0, 0.0], 1.0 / 60.0).unwrap();
//! world.fixed_update();
//! ```
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
pub mod engine;
pub mod utils;

pub use engine::*;

pub use ::log;
pub use ::nalgebra;
pub use ::rapier3d;
