//! The [`World`] struct stores and steps all creature segments. It owns the segment tree
//! and the physics simulation, and offers the tree operations that need access to both a
//! segment and its parent.
//!
//! A creature is a tree of [`JointSegment`]s. Roots are created with [`World::new_segment`]
//! and limbs are attached with [`World::connect`]. Every fixed tick applies the actuator
//! torques, steps rapier and mirrors the resulting poses back into the segment transforms.

use crate::components::effector::{NotEnoughInputsErr, UnknownEffectorErr};
use crate::components::joint_segment::{
    AlreadyConnectedErr, CycleDetectedErr, JointErr, SelfConnectionErr, UnknownSegmentErr,
};
use crate::components::{
    Component, Effector, EffectorError, JointSegment, JointSegmentError, SegmentConfig,
};
use crate::controllers::Controller;
use crate::core::{SegmentId, SideType, Transform};
use crate::physics::{DEFAULT_MAX_ANGULAR_VELOCITY, EARTH_GRAVITY, PhysicsManager};
use bon::Builder;
use itertools::Itertools;
use log::{debug, info, trace, warn};
use nalgebra::Vector3;
use slotmap::HopSlotMap;
use snafu::{OptionExt, ResultExt, ensure};
use std::time::{Duration, Instant};

/// Physics settings of a [`World`].
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct WorldConfig {
    #[builder(default = Vector3::new(0.0, -EARTH_GRAVITY, 0.0))]
    pub gravity: Vector3<f32>,
    /// Length of one fixed tick
    #[builder(default = Duration::from_secs_f64(1.0 / 60.0))]
    pub timestep: Duration,
    /// Angular speed cap for actuated bodies, in rad/s
    #[builder(default = DEFAULT_MAX_ANGULAR_VELOCITY)]
    pub max_angular_velocity: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig::builder().build()
    }
}

/// Central structure holding every segment and the physics simulation.
pub struct World {
    /// All segments indexed by their unique ID
    pub segments: HopSlotMap<SegmentId, JointSegment>,
    /// Segments without a parent
    pub roots: Vec<SegmentId>,
    /// Physics simulation system
    pub physics: PhysicsManager,

    /// Time when the world was created
    start_time: Instant,
    /// Time elapsed since the last frame
    delta_time: Duration,
    /// Time when the last frame started
    last_frame_time: Instant,
    /// Reused by [`World::drive`]
    signal_buffer: Vec<f32>,
}

impl Default for World {
    fn default() -> Self {
        World::new()
    }
}

impl World {
    pub fn new() -> World {
        World::with_config(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> World {
        let mut physics = PhysicsManager::new(config.gravity, config.timestep);
        physics.max_angular_velocity = config.max_angular_velocity;

        World {
            segments: HopSlotMap::with_key(),
            roots: vec![],
            physics,
            start_time: Instant::now(),
            delta_time: Duration::default(),
            last_frame_time: Instant::now(),
            signal_buffer: vec![],
        }
    }

    /// Creates a new root segment with default settings.
    pub fn new_segment<S: Into<String>>(&mut self, name: S, transform: Transform) -> SegmentId {
        self.new_segment_with(name, transform, SegmentConfig::default())
    }

    /// Creates a new root segment with a dynamic body and a box collider matching its scale.
    pub fn new_segment_with<S: Into<String>>(
        &mut self,
        name: S,
        transform: Transform,
        config: SegmentConfig,
    ) -> SegmentId {
        let name = name.into();
        let physics = &mut self.physics;
        let id = self
            .segments
            .insert_with_key(|id| JointSegment::new(physics, id, name, transform, config));
        self.roots.push(id);
        id
    }

    /// Retrieves a reference to a segment by its ID
    pub fn get_segment(&self, id: SegmentId) -> Option<&JointSegment> {
        self.segments.get(id)
    }

    /// Retrieves a mutable reference to a segment by its ID
    pub fn get_segment_mut(&mut self, id: SegmentId) -> Option<&mut JointSegment> {
        self.segments.get_mut(id)
    }

    fn segment(&self, id: SegmentId) -> Result<&JointSegment, JointSegmentError> {
        self.segments.get(id).context(UnknownSegmentErr { id })
    }

    /// Finds a segment by its name
    ///
    /// Note: If multiple segments have the same name, only the first one found will be returned.
    pub fn find_segment_by_name(&self, name: &str) -> Option<SegmentId> {
        self.segments
            .iter()
            .find(|(_, s)| s.name == name)
            .map(|s| s.0)
    }

    pub fn parent_of(&self, id: SegmentId) -> Option<SegmentId> {
        self.segments.get(id)?.parent
    }

    pub fn children_of(&self, id: SegmentId) -> &[SegmentId] {
        self.segments
            .get(id)
            .map(|s| s.segments.as_slice())
            .unwrap_or(&[])
    }

    /// The segment and all its descendants in depth-first pre-order.
    ///
    /// Empty if `root` doesn't exist.
    pub fn subtree(&self, root: SegmentId) -> Vec<SegmentId> {
        let mut order = Vec::new();
        if !self.segments.contains_key(root) {
            return order;
        }

        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children_of(id).iter().rev());
        }
        order
    }

    /// Attaches `child` to the `side` face of `parent`.
    ///
    /// The child is moved next to the parent, gets its mass from its extents and is jointed to
    /// the parent. Anything already attached to the child moves along with it.
    pub fn connect(
        &mut self,
        child: SegmentId,
        parent: SegmentId,
        side: SideType,
    ) -> Result<(), JointSegmentError> {
        ensure!(child != parent, SelfConnectionErr);
        ensure!(
            self.segment(child)?.parent.is_none(),
            AlreadyConnectedErr
        );
        self.segment(parent)?;
        ensure!(!self.subtree(child).contains(&parent), CycleDetectedErr);

        self.segments[child].side = Some(side);
        if let Err(e) = self.init(child, parent) {
            self.segments[child].side = None;
            return Err(e);
        }

        self.segments[parent].add_segment(child);
        self.segments[child].parent = Some(parent);
        if let Some((pos, _)) = self.roots.iter().find_position(|r| **r == child) {
            self.roots.remove(pos);
        }

        debug!(
            "Connected {:?} to the {side:?} side of {:?}",
            self.segments[child].name, self.segments[parent].name
        );

        Ok(())
    }

    /// Same as [`World::connect`], but failures are only logged.
    pub fn connect_or_warn(&mut self, child: SegmentId, parent: SegmentId, side: SideType) {
        if let Err(e) = self.connect(child, parent, side) {
            warn!("{e}");
        }
    }

    /// Places `child` next to `parent` and re-initializes everything below it.
    fn init(&mut self, child: SegmentId, parent: SegmentId) -> Result<(), JointSegmentError> {
        let parent_seg = self.segment(parent)?;
        let parent_transform = parent_seg.transform;

        let seg = self
            .segments
            .get_mut(child)
            .context(UnknownSegmentErr { id: child })?;
        let Some(side) = seg.side else {
            warn!("Segment {:?} has no attachment side, skipping init", seg.name);
            return Ok(());
        };

        seg.body.reset_velocity(&mut self.physics);

        let mass = seg.transform.scale().norm();
        seg.body.set_mass(mass);
        seg.collider.set_mass(&mut self.physics, mass);

        let parent_rot = parent_transform.rotation();
        let offset = parent_rot * seg.attach_offset(parent_transform.scale(), side);
        seg.transform
            .set_position_vec(parent_transform.position() + offset);
        seg.transform.set_rotation(parent_rot);
        seg.body.set_pose(&mut self.physics, seg.transform.isometry());

        // the joint needs the final pose to derive the parent frame
        if seg.joint.is_none() {
            self.activate_joint(child, parent, side)?;
        }

        for grandchild in self.children_of(child).to_vec() {
            self.init(grandchild, child)?;
        }

        Ok(())
    }

    /// Creates the joint between `child` and `parent` for a child sitting on `side`.
    ///
    /// A joint the child already has is replaced.
    pub fn activate_joint(
        &mut self,
        child: SegmentId,
        parent: SegmentId,
        side: SideType,
    ) -> Result<(), JointSegmentError> {
        let parent_body = self.segment(parent)?.body.body_handle;

        let seg = self
            .segments
            .get_mut(child)
            .context(UnknownSegmentErr { id: child })?;
        if let Some(old) = &mut seg.joint {
            old.delete(&mut self.physics);
        }

        let mut joint = seg.make_joint(side);
        joint
            .try_connect(&mut self.physics, parent_body, seg.body.body_handle)
            .context(JointErr)?;
        seg.joint = Some(joint);

        Ok(())
    }

    /// Re-places every descendant of `root` relative to its parent.
    ///
    /// Used to reset a creature into its build pose, e.g. between trials.
    pub fn reinit(&mut self, root: SegmentId) -> Result<(), JointSegmentError> {
        self.segment(root)?;
        for child in self.children_of(root).to_vec() {
            self.init(child, root)?;
        }
        Ok(())
    }

    /// Makes `root` and all its descendants dynamic.
    pub fn wake_up(&mut self, root: SegmentId) -> Result<(), JointSegmentError> {
        self.set_kinematic_rec(root, false)
    }

    /// Makes `root` and all its descendants kinematic. They stop being simulated.
    pub fn sleep(&mut self, root: SegmentId) -> Result<(), JointSegmentError> {
        self.set_kinematic_rec(root, true)
    }

    fn set_kinematic_rec(
        &mut self,
        root: SegmentId,
        kinematic: bool,
    ) -> Result<(), JointSegmentError> {
        self.segment(root)?;
        for id in self.subtree(root) {
            if let Some(seg) = self.segments.get_mut(id) {
                seg.body.set_kinematic(&mut self.physics, kinematic);
            }
        }
        Ok(())
    }

    /// Deletes a segment and everything attached below it, including all physics objects.
    pub fn delete_segment(&mut self, id: SegmentId) {
        let Some(parent) = self.segments.get(id).map(|s| s.parent) else {
            return;
        };

        match parent {
            Some(parent) => {
                if let Some(parent) = self.segments.get_mut(parent) {
                    parent.segments.retain(|c| *c != id);
                }
            }
            None => {
                if let Some((pos, _)) = self.roots.iter().find_position(|r| **r == id) {
                    self.roots.remove(pos);
                }
            }
        }

        for id in self.subtree(id).into_iter().rev() {
            if let Some(mut seg) = self.segments.remove(id) {
                seg.delete(&mut self.physics);
                debug!("Deleted segment {:?}", seg.name);
            }
        }
    }

    /// Every effector in the creature below `root`, in the order signals are consumed.
    pub fn effectors(&self, root: SegmentId) -> Vec<SegmentId> {
        self.subtree(root)
    }

    /// Number of signals [`World::affect`] expects for the creature below `root`.
    pub fn input_count(&self, root: SegmentId) -> usize {
        self.subtree(root)
            .into_iter()
            .filter_map(|id| self.segments.get(id))
            .map(|s| s.input_count())
            .sum()
    }

    /// Splits `signals` across the creature's effectors in depth-first pre-order.
    ///
    /// Fails if `root` doesn't exist or there are fewer signals than [`World::input_count`].
    pub fn affect(
        &mut self,
        root: SegmentId,
        signals: &[f32],
        dt: f32,
    ) -> Result<(), EffectorError> {
        ensure!(
            self.segments.contains_key(root),
            UnknownEffectorErr { id: root }
        );

        let expected = self.input_count(root);
        ensure!(
            signals.len() >= expected,
            NotEnoughInputsErr {
                expected,
                got: signals.len(),
            }
        );

        let mut offset = 0;
        for id in self.subtree(root) {
            let Some(seg) = self.segments.get_mut(id) else {
                continue;
            };
            let count = seg.input_count();
            seg.affect(&signals[offset..offset + count], dt)?;
            offset += count;
        }

        if signals.len() > offset {
            trace!("Ignoring {} surplus signals", signals.len() - offset);
        }

        Ok(())
    }

    /// Samples `controller` at the current simulated time and feeds it to the creature.
    pub fn drive<C: Controller + ?Sized>(
        &mut self,
        root: SegmentId,
        controller: &mut C,
        dt: f32,
    ) -> Result<(), EffectorError> {
        let mut buffer = std::mem::take(&mut self.signal_buffer);
        buffer.clear();
        buffer.resize(controller.output_count(), 0.0);

        controller.evaluate(self.simulated_time().as_secs_f32(), &mut buffer);
        let result = self.affect(root, &buffer, dt);

        self.signal_buffer = buffer;
        result
    }

    /// Runs exactly one fixed tick: actuators, physics step, transform sync.
    pub fn fixed_update(&mut self) {
        for seg in self.segments.values_mut() {
            seg.fixed_update(&mut self.physics);
        }

        self.physics.step();

        for seg in self.segments.values_mut() {
            seg.sync_from_body(&self.physics);
        }
    }

    /// Ticks delta time. Call once per frame.
    pub fn update(&mut self) {
        self.tick_delta_time();
    }

    /// Catches the physics simulation up with the wall clock.
    pub fn post_update(&mut self) {
        while self.physics.last_update.elapsed() > self.physics.timestep {
            self.physics.last_update += self.physics.timestep;
            self.fixed_update();
        }
    }

    /// Mass-weighted mean position of `root` and its descendants.
    pub fn center_of_mass(&self, root: SegmentId) -> Option<Vector3<f32>> {
        let (weighted, total) = self
            .subtree(root)
            .into_iter()
            .filter_map(|id| self.segments.get(id))
            .fold((Vector3::zeros(), 0.0), |(sum, mass), s| {
                (sum + s.transform.position() * s.mass(), mass + s.mass())
            });

        (total > 0.0).then(|| weighted / total)
    }

    /// Updates the delta time based on the elapsed time since the last frame
    fn tick_delta_time(&mut self) {
        self.delta_time = self.last_frame_time.elapsed();
        self.last_frame_time = Instant::now();
    }

    /// Returns the time elapsed since the last frame
    pub fn delta_time(&self) -> Duration {
        self.delta_time
    }

    /// Returns the instant in time when the world was created
    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    /// Returns the total time elapsed since the world was created
    pub fn time(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the time covered by fixed ticks so far
    pub fn simulated_time(&self) -> Duration {
        self.physics.simulated_time()
    }

    /// Prints the segment trees to the log
    pub fn print_segments(&self) {
        info!("{} segments in world.", self.segments.len());
        self.print_segments_rec(&self.roots, 0)
    }

    fn print_segments_rec(&self, ids: &[SegmentId], depth: usize) {
        for id in ids {
            let Some(seg) = self.segments.get(*id) else {
                continue;
            };
            info!("{}- {} ({:?})", "  ".repeat(depth), seg.name, seg.side);
            info!(
                "{}-> Mass: {:.3}, Jointed: {}",
                "  ".repeat(depth + 1),
                seg.mass(),
                seg.joint.is_some()
            );
            self.print_segments_rec(&seg.segments, depth + 1);
        }
    }
}
