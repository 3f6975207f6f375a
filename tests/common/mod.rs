//! In-memory host used to drive the sequencer without an engine.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;
use dicetoss::toss::{
    AnimationId, AnimationTarget, Animator, CameraRig, DiceType, Easing, Panel, Panels,
    PhysicsBodies, Pose, PositionConstraints, ProcessControl,
};

#[derive(Debug, Clone)]
pub struct FakeAnimation {
    pub id: AnimationId,
    pub target: AnimationTarget<u32>,
    pub to: Pose,
    pub duration: f32,
    pub easing: Easing,
}

#[derive(Debug, Default)]
pub struct FakeHost {
    next_body: u32,
    next_animation: u64,
    pub camera: Pose,
    pub alive: HashMap<u32, DiceType>,
    pub spawned: Vec<(u32, DiceType, Pose)>,
    pub destroyed: Vec<u32>,
    pub angular_velocity: HashMap<u32, Vec3>,
    pub speed: HashMap<u32, f32>,
    pub positions: HashMap<u32, Vec3>,
    pub constraints: HashMap<u32, PositionConstraints>,
    pub velocity_changes: Vec<(u32, Vec3)>,
    pub panels: HashMap<Panel, bool>,
    pub animations: Vec<FakeAnimation>,
    pub finished: HashSet<AnimationId>,
    pub terminated: bool,
}

impl FakeHost {
    pub fn new() -> Self {
        let mut host = Self {
            camera: Pose::new(Vec3::new(0.0, 7.0, 9.0), Quat::IDENTITY),
            ..Self::default()
        };
        host.panels.insert(Panel::PreThrow, true);
        host.panels.insert(Panel::PostThrow, false);
        host
    }

    pub fn panel(&self, panel: Panel) -> bool {
        self.panels.get(&panel).copied().unwrap_or(false)
    }

    /// Mark every started animation as finished.
    pub fn finish_all(&mut self) {
        for anim in &self.animations {
            self.finished.insert(anim.id);
        }
    }

    pub fn finish(&mut self, id: AnimationId) {
        self.finished.insert(id);
    }

    pub fn last_animation(&self) -> Option<&FakeAnimation> {
        self.animations.last()
    }
}

impl PhysicsBodies for FakeHost {
    type Body = u32;

    fn spawn(&mut self, die: DiceType, pose: Pose) -> u32 {
        self.next_body += 1;
        let body = self.next_body;
        self.alive.insert(body, die);
        self.spawned.push((body, die, pose));
        self.positions.insert(body, pose.translation);
        self.constraints.insert(body, PositionConstraints::Frozen);
        body
    }

    fn destroy(&mut self, body: u32) {
        self.alive.remove(&body);
        self.destroyed.push(body);
    }

    fn set_angular_velocity(&mut self, body: u32, angular_velocity: Vec3) {
        self.angular_velocity.insert(body, angular_velocity);
    }

    fn linear_speed(&self, body: u32) -> f32 {
        self.speed.get(&body).copied().unwrap_or(0.0)
    }

    fn position(&self, body: u32) -> Vec3 {
        self.positions.get(&body).copied().unwrap_or(Vec3::ZERO)
    }

    fn set_constraints(&mut self, body: u32, constraints: PositionConstraints) {
        self.constraints.insert(body, constraints);
    }

    fn apply_velocity_change(&mut self, body: u32, delta: Vec3) {
        self.velocity_changes.push((body, delta));
    }
}

impl CameraRig for FakeHost {
    fn camera_pose(&self) -> Pose {
        self.camera
    }
}

impl Animator<u32> for FakeHost {
    fn animate(
        &mut self,
        target: AnimationTarget<u32>,
        to: Pose,
        duration: f32,
        easing: Easing,
    ) -> AnimationId {
        self.next_animation += 1;
        let id = AnimationId(self.next_animation);
        self.animations.push(FakeAnimation {
            id,
            target,
            to,
            duration,
            easing,
        });
        id
    }

    fn take_finished(&mut self, id: AnimationId) -> bool {
        self.finished.remove(&id)
    }
}

impl Panels for FakeHost {
    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        self.panels.insert(panel, visible);
    }
}

impl ProcessControl for FakeHost {
    fn terminate(&mut self) {
        self.terminated = true;
    }
}
