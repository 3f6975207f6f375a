//! Bevy implementation of the sequencer's collaborator traits
//!
//! `BevyTossHost` bundles the queries and resources the sequencer needs for
//! one call. Rigid bodies are `bevy_rapier3d` entities, animations are
//! [`Tween`] components, panels are UI nodes toggled through `Visibility`.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::setup::spawn_die;
use super::tween::{Tween, TweenTracker};
use crate::toss::sequencer::{
    AnimationId, AnimationTarget, Animator, CameraRig, Panels, PhysicsBodies,
    PositionConstraints, ProcessControl,
};
use crate::toss::types::{DiceType, Die, Easing, HudPanel, MainCamera, Panel, Pose};

#[derive(SystemParam)]
pub struct BevyTossHost<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    dice: Query<
        'w,
        's,
        (
            &'static Transform,
            &'static mut Velocity,
            &'static mut LockedAxes,
        ),
        (With<Die>, Without<MainCamera>),
    >,
    camera: Query<'w, 's, (Entity, &'static Transform), (With<MainCamera>, Without<Die>)>,
    panels: Query<'w, 's, (&'static HudPanel, &'static mut Visibility)>,
    tweens: Query<'w, 's, &'static Tween>,
    tracker: ResMut<'w, TweenTracker>,
    exit: MessageWriter<'w, AppExit>,
}

impl BevyTossHost<'_, '_> {
    fn current_pose(&self, entity: Entity) -> Option<Pose> {
        if let Ok((camera, transform)) = self.camera.single() {
            if camera == entity {
                return Some(Pose::from(transform));
            }
        }
        self.dice
            .get(entity)
            .ok()
            .map(|(transform, _, _)| Pose::from(transform))
    }
}

impl PhysicsBodies for BevyTossHost<'_, '_> {
    type Body = Entity;

    fn spawn(&mut self, die: DiceType, pose: Pose) -> Entity {
        spawn_die(
            &mut self.commands,
            &mut self.meshes,
            &mut self.materials,
            die,
            pose,
        )
    }

    fn destroy(&mut self, body: Entity) {
        if let Ok(mut entity) = self.commands.get_entity(body) {
            entity.despawn();
        }
    }

    fn set_angular_velocity(&mut self, body: Entity, angular_velocity: Vec3) {
        if let Ok((_, mut velocity, _)) = self.dice.get_mut(body) {
            velocity.angvel = angular_velocity;
        }
    }

    fn linear_speed(&self, body: Entity) -> f32 {
        self.dice
            .get(body)
            .map_or(0.0, |(_, velocity, _)| velocity.linvel.length())
    }

    fn position(&self, body: Entity) -> Vec3 {
        self.dice
            .get(body)
            .map_or(Vec3::ZERO, |(transform, _, _)| transform.translation)
    }

    fn set_constraints(&mut self, body: Entity, constraints: PositionConstraints) {
        let Ok((_, mut velocity, mut locked)) = self.dice.get_mut(body) else {
            return;
        };
        match constraints {
            PositionConstraints::Free => *locked = LockedAxes::empty(),
            PositionConstraints::Frozen => {
                *locked = LockedAxes::TRANSLATION_LOCKED;
                velocity.linvel = Vec3::ZERO;
            }
        }
    }

    fn apply_velocity_change(&mut self, body: Entity, delta: Vec3) {
        if let Ok((_, mut velocity, _)) = self.dice.get_mut(body) {
            velocity.linvel += delta;
        }
    }
}

impl CameraRig for BevyTossHost<'_, '_> {
    fn camera_pose(&self) -> Pose {
        match self.camera.single() {
            Ok((_, transform)) => Pose::from(transform),
            Err(err) => {
                warn!("No main camera to capture: {err}");
                Pose::default()
            }
        }
    }
}

impl Animator<Entity> for BevyTossHost<'_, '_> {
    fn animate(
        &mut self,
        target: AnimationTarget<Entity>,
        to: Pose,
        duration: f32,
        easing: Easing,
    ) -> AnimationId {
        let id = self.tracker.allocate();

        let entity = match target {
            AnimationTarget::Camera => self.camera.single().ok().map(|(entity, _)| entity),
            AnimationTarget::Body(entity) => Some(entity),
        };
        let Some((entity, from)) = entity.and_then(|e| self.current_pose(e).map(|p| (e, p))) else {
            // Nothing to move; report it done so the sequencer does not wait forever.
            warn!("Animation target {target:?} not found");
            self.tracker.mark_finished(id);
            return id;
        };

        // A new tween replaces a running one on the same entity.
        if let Ok(previous) = self.tweens.get(entity) {
            self.tracker.mark_finished(previous.id);
        }

        // Gravity would drag a free body away from the tweened path.
        if let AnimationTarget::Body(body) = target {
            self.set_constraints(body, PositionConstraints::Frozen);
        }

        self.commands
            .entity(entity)
            .insert(Tween::new(id, from, to, duration, easing));
        id
    }

    fn take_finished(&mut self, id: AnimationId) -> bool {
        self.tracker.take(id)
    }
}

impl Panels for BevyTossHost<'_, '_> {
    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        for (hud, mut visibility) in self.panels.iter_mut() {
            if hud.0 == panel {
                *visibility = if visible {
                    Visibility::Visible
                } else {
                    Visibility::Hidden
                };
            }
        }
    }
}

impl ProcessControl for BevyTossHost<'_, '_> {
    fn terminate(&mut self) {
        self.exit.write(AppExit::Success);
    }
}
