//! Camera-related types and components
//!
//! `Pose` is the translation + rotation pair the sequencer passes around for
//! the camera and the die; it converts to and from Bevy's `Transform`.

use bevy::prelude::*;

/// Marker component for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Position and orientation, without scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Build a pose from euler angles in degrees; see [`euler_degrees_to_quat`].
    pub fn from_euler_degrees(translation: Vec3, degrees: Vec3) -> Self {
        Self::new(translation, euler_degrees_to_quat(degrees))
    }

    /// Interpolate toward `to`; `t` is expected in `[0, 1]`.
    pub fn lerp(&self, to: &Pose, t: f32) -> Pose {
        Pose {
            translation: self.translation.lerp(to.translation, t),
            rotation: self.rotation.slerp(to.rotation, t),
        }
    }

    /// Write this pose into a transform, keeping its scale.
    pub fn apply_to(&self, transform: &mut Transform) {
        transform.translation = self.translation;
        transform.rotation = self.rotation;
    }
}

impl From<&Transform> for Pose {
    fn from(transform: &Transform) -> Self {
        Self::new(transform.translation, transform.rotation)
    }
}

impl From<Pose> for Transform {
    fn from(pose: Pose) -> Self {
        Transform::from_translation(pose.translation).with_rotation(pose.rotation)
    }
}

/// Euler angles in degrees, applied Z first, then X, then Y.
pub fn euler_degrees_to_quat(degrees: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        degrees.y.to_radians(),
        degrees.x.to_radians(),
        degrees.z.to_radians(),
    )
}
