//! Collaborator traits
//!
//! The sequencer asks the host engine for everything it cannot do itself:
//! rigid bodies, the camera, tweens, HUD panels and process exit. The Bevy
//! implementation lives in `systems::host`; tests use an in-memory fake.

use std::fmt;

use bevy::prelude::*;

use crate::toss::types::{DiceType, Easing, Panel, Pose};

/// Identifies a running animation until the host reports it finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

/// What an animation moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationTarget<B> {
    Camera,
    Body(B),
}

/// Positional locking of the die's rigid body. Rotation is never locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionConstraints {
    Free,
    Frozen,
}

pub trait PhysicsBodies {
    type Body: Copy + PartialEq + fmt::Debug;

    /// Spawn a die at `pose` with its position frozen.
    fn spawn(&mut self, die: DiceType, pose: Pose) -> Self::Body;

    fn destroy(&mut self, body: Self::Body);

    fn set_angular_velocity(&mut self, body: Self::Body, angular_velocity: Vec3);

    /// Linear speed (velocity magnitude); zero for unknown bodies.
    fn linear_speed(&self, body: Self::Body) -> f32;

    fn position(&self, body: Self::Body) -> Vec3;

    fn set_constraints(&mut self, body: Self::Body, constraints: PositionConstraints);

    /// Mass-independent change of linear velocity.
    fn apply_velocity_change(&mut self, body: Self::Body, delta: Vec3);
}

pub trait CameraRig {
    fn camera_pose(&self) -> Pose;
}

pub trait Animator<B> {
    /// Start moving `target` from where it is now to `to`.
    fn animate(
        &mut self,
        target: AnimationTarget<B>,
        to: Pose,
        duration: f32,
        easing: Easing,
    ) -> AnimationId;

    /// True exactly once for a finished animation; false while it runs and
    /// after it has been taken.
    fn take_finished(&mut self, id: AnimationId) -> bool;
}

pub trait Panels {
    fn set_panel_visible(&mut self, panel: Panel, visible: bool);
}

pub trait ProcessControl {
    fn terminate(&mut self);
}

/// Everything the sequencer needs from the engine.
pub trait TossHost:
    PhysicsBodies + CameraRig + Animator<<Self as PhysicsBodies>::Body> + Panels + ProcessControl
{
}

impl<T> TossHost for T where
    T: PhysicsBodies + CameraRig + Animator<<T as PhysicsBodies>::Body> + Panels + ProcessControl
{
}
