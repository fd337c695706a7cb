use crate::components::effector::NotEnoughInputsErr;
use crate::components::{
    CharacterJoint, CharacterJointError, Collider3D, Component, DEFAULT_FRICTION, DEFAULT_JOINT_LIMIT_DEG, Effector,
    EffectorError, RigidBodyComponent,
};
use crate::core::{SegmentId, SideType, Transform};
use crate::physics::PhysicsManager;
use crate::utils::math::{FloatMathExt, clamp_magnitude};
use bon::Builder;
use log::trace;
use nalgebra::Vector3;
use snafu::{Snafu, ensure};

pub const DEFAULT_FORCE_RANGE: (f32, f32) = (-100.0, 100.0);
pub const DEFAULT_ANCHOR_GAP: f32 = 0.25;

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum JointSegmentError {
    #[snafu(display("JointSegment: Segment {id:?} doesn't exist"))]
    UnknownSegment { id: SegmentId },
    #[snafu(display("JointSegment: Cannot connect a segment to itself"))]
    SelfConnection,
    #[snafu(display("JointSegment: Parent is part of the child's own subtree"))]
    CycleDetected,
    #[snafu(display("JointSegment: Segment is already connected to a parent"))]
    AlreadyConnected,
    #[snafu(display("JointSegment: Failed to create the joint to the parent: {source}"))]
    Joint { source: CharacterJointError },
}

/// Tunables of a single segment and its actuator.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct SegmentConfig {
    /// Torque range that normalized signals in `[0, 1]` are mapped onto
    #[builder(default = DEFAULT_FORCE_RANGE)]
    pub force_range: (f32, f32),
    /// Twist and swing limit of the joint to the parent, in degrees
    #[builder(default = DEFAULT_JOINT_LIMIT_DEG)]
    pub joint_limit_deg: f32,
    /// Whether the segment may collide with its parent
    #[builder(default = true)]
    pub enable_collision: bool,
    /// Extra spacing between parent and child, as a fraction of the child's half extent
    #[builder(default = DEFAULT_ANCHOR_GAP)]
    pub anchor_gap: f32,
    #[builder(default = DEFAULT_FRICTION)]
    pub friction: f32,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        SegmentConfig::builder().build()
    }
}

/// One rigid box link of an articulated creature.
///
/// A segment owns its rigid body and collider, the joint connecting it to its parent (roots
/// have none) and the actuator state fed by a controller. Tree operations that need the
/// parent live on [`World`](crate::World).
pub struct JointSegment {
    pub(crate) id: SegmentId,
    pub name: String,
    pub transform: Transform,
    pub(crate) body: RigidBodyComponent,
    pub(crate) collider: Collider3D,
    pub(crate) joint: Option<CharacterJoint>,
    pub(crate) side: Option<SideType>,
    pub(crate) parent: Option<SegmentId>,
    pub(crate) segments: Vec<SegmentId>,
    config: SegmentConfig,
    axis_force: f32,
    swing_axis_force: f32,
}

impl Component for JointSegment {
    fn fixed_update(&mut self, physics: &mut PhysicsManager) {
        let Some(joint) = &self.joint else {
            return;
        };
        let max_angvel = physics.max_angular_velocity;
        let Some(rb) = self.body.get_body_mut(physics) else {
            return;
        };
        if !rb.is_dynamic() {
            return;
        }

        // relative velocity-change torque, mass and inertia are ignored
        let local = joint.axis() * self.axis_force + joint.swing_axis() * self.swing_axis_force;
        let world_delta = rb.rotation() * local;
        let angvel = clamp_magnitude(rb.angvel() + world_delta, max_angvel);
        rb.set_angvel(angvel, true);

        trace!("[{}] angular velocity -> {:?}", self.name, angvel);
    }

    fn delete(&mut self, physics: &mut PhysicsManager) {
        if let Some(joint) = &mut self.joint {
            joint.delete(physics);
        }
        self.collider.delete(physics);
        self.body.delete(physics);
    }
}

impl Effector for JointSegment {
    fn input_count(&self) -> usize {
        2
    }

    fn affect(&mut self, inputs: &[f32], _dt: f32) -> Result<(), EffectorError> {
        if self.joint.is_none() {
            return Ok(());
        }
        ensure!(
            inputs.len() >= self.input_count(),
            NotEnoughInputsErr {
                expected: self.input_count(),
                got: inputs.len(),
            }
        );

        let (min, max) = self.config.force_range;
        self.axis_force = min.lerp_clamped(max, inputs[0]);
        self.swing_axis_force = min.lerp_clamped(max, inputs[1]);

        Ok(())
    }
}

impl JointSegment {
    pub(crate) fn new(
        physics: &mut PhysicsManager,
        id: SegmentId,
        name: String,
        transform: Transform,
        config: SegmentConfig,
    ) -> Self {
        let body = RigidBodyComponent::new(physics, id, &transform);
        let mass = transform.scale().norm();
        let collider = Collider3D::new(
            physics,
            id,
            body.body_handle,
            transform.scale(),
            mass,
            config.friction,
        );

        let mut segment = JointSegment {
            id,
            name,
            transform,
            body,
            collider,
            joint: None,
            side: None,
            parent: None,
            segments: vec![],
            config,
            axis_force: 0.0,
            swing_axis_force: 0.0,
        };
        segment.body.set_mass(mass);
        segment
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn segments(&self) -> &[SegmentId] {
        &self.segments
    }

    pub fn parent(&self) -> Option<SegmentId> {
        self.parent
    }

    pub fn side(&self) -> Option<SideType> {
        self.side
    }

    pub fn joint(&self) -> Option<&CharacterJoint> {
        self.joint.as_ref()
    }

    pub fn body(&self) -> &RigidBodyComponent {
        &self.body
    }

    pub fn collider(&self) -> &Collider3D {
        &self.collider
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    pub fn axis_force(&self) -> f32 {
        self.axis_force
    }

    pub fn swing_axis_force(&self) -> f32 {
        self.swing_axis_force
    }

    /// Mass derived from the segment's extents
    pub fn mass(&self) -> f32 {
        self.body.mass()
    }

    pub fn is_kinematic(&self) -> bool {
        self.body.is_kinematic()
    }

    pub(crate) fn add_segment(&mut self, segment: SegmentId) {
        self.segments.push(segment);
    }

    /// Offset from the parent's center to this segment's center when attached on `side`.
    pub(crate) fn attach_offset(&self, parent_scale: Vector3<f32>, side: SideType) -> Vector3<f32> {
        let dir = side.direction();
        let po = dir.component_mul(&parent_scale) * 0.5;
        let lo = dir.component_mul(&self.transform.scale()) * 0.5;
        po + lo + lo * self.config.anchor_gap
    }

    /// Builds the joint to the parent. It still has to be connected to the bodies.
    pub(crate) fn make_joint(&self, side: SideType) -> CharacterJoint {
        let anchor = side
            .inverse()
            .direction()
            .component_mul(&self.transform.scale())
            * 0.5;

        CharacterJoint::builder()
            .limit_deg(self.config.joint_limit_deg)
            .axis(side.axis().direction())
            .swing_axis(side.swing_axis().direction())
            .anchor(anchor.into())
            .enable_collision(self.config.enable_collision)
            .build()
    }

    /// Copies the body's pose into the transform.
    pub(crate) fn sync_from_body(&mut self, physics: &PhysicsManager) {
        if let Some(rb) = self.body.get_body(physics) {
            self.transform.set_isometry(rb.position());
        }
    }
}
