use crate::core::SegmentId;
use log::trace;
use nalgebra::Vector3;
use rapier3d::prelude::*;
use std::time::{Duration, Instant};

pub struct PhysicsManager {
    pub gravity: Vector3<f32>,
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub physics_hooks: (),
    pub event_handler: (),
    pub last_update: Instant,
    pub timestep: Duration,
    /// Upper bound for the angular speed actuators may drive a body to
    pub max_angular_velocity: f32,
    steps: u64,
}

pub const EARTH_GRAVITY: f32 = 9.81;
pub const DEFAULT_MAX_ANGULAR_VELOCITY: f32 = 7.0;

impl Default for PhysicsManager {
    fn default() -> Self {
        PhysicsManager::new(
            Vector3::new(0.0, -EARTH_GRAVITY, 0.0),
            Duration::from_secs_f64(1.0 / 60.0),
        )
    }
}

impl PhysicsManager {
    pub fn new(gravity: Vector3<f32>, timestep: Duration) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: timestep.as_secs_f32(),
            ..IntegrationParameters::default()
        };

        PhysicsManager {
            gravity,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            physics_hooks: (),
            event_handler: (),
            last_update: Instant::now(),
            timestep,
            max_angular_velocity: DEFAULT_MAX_ANGULAR_VELOCITY,
            steps: 0,
        }
    }

    /// Advances the simulation by exactly one timestep
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &self.physics_hooks,
            &self.event_handler,
        );
        self.steps += 1;
        trace!("Physics step {} done", self.steps);
    }

    /// Number of steps taken since creation
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Total simulated time, independent of the wall clock
    pub fn simulated_time(&self) -> Duration {
        Duration::from_secs_f64(self.timestep.as_secs_f64() * self.steps as f64)
    }

    /// Removes a body together with its attached colliders and joints.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) -> Option<RigidBody> {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        )
    }

    /// Maps a body back to the segment which owns it.
    pub fn segment_of(&self, handle: RigidBodyHandle) -> Option<SegmentId> {
        let body = self.rigid_body_set.get(handle)?;
        Some(SegmentId::from_user_data(body.user_data))
    }
}
