//! Transform tweens
//!
//! A `Tween` component moves its entity from one pose to another over a fixed
//! duration. When it finishes the component is removed and its id lands in
//! [`TweenTracker`], where the sequencer picks it up.

use std::collections::HashSet;

use bevy::prelude::*;

use crate::toss::sequencer::AnimationId;
use crate::toss::types::{Easing, Pose};

#[derive(Component, Debug, Clone)]
pub struct Tween {
    pub id: AnimationId,
    pub from: Pose,
    pub to: Pose,
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(id: AnimationId, from: Pose, to: Pose, duration: f32, easing: Easing) -> Self {
        Self {
            id,
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance by `dt` and return the pose to apply.
    pub fn advance(&mut self, dt: f32) -> Pose {
        self.elapsed += dt;
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(&self.to, self.easing.sample(self.progress()))
    }
}

/// Allocates animation ids and holds finished ones until they are taken.
#[derive(Resource, Debug, Default)]
pub struct TweenTracker {
    next_id: u64,
    finished: HashSet<AnimationId>,
}

impl TweenTracker {
    pub fn allocate(&mut self) -> AnimationId {
        self.next_id += 1;
        AnimationId(self.next_id)
    }

    pub fn mark_finished(&mut self, id: AnimationId) {
        self.finished.insert(id);
    }

    /// True once per finished id.
    pub fn take(&mut self, id: AnimationId) -> bool {
        self.finished.remove(&id)
    }
}

pub fn advance_tweens(
    mut commands: Commands,
    time: Res<Time>,
    mut tracker: ResMut<TweenTracker>,
    mut query: Query<(Entity, &mut Transform, &mut Tween)>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, mut tween) in query.iter_mut() {
        let pose = tween.advance(dt);
        pose.apply_to(&mut transform);

        if tween.is_finished() {
            commands.entity(entity).remove::<Tween>();
            tracker.mark_finished(tween.id);
        }
    }
}
