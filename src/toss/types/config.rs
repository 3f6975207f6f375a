//! Game configuration types and loading
//!
//! The configuration is read once at startup from a RON file (or JSON when the
//! path ends in `.json`). Every field has a default, so a partial file only
//! overrides what it names. Degenerate values are rejected by
//! [`TossConfig::validate`] before the game starts.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::camera::{euler_degrees_to_quat, Pose};
use super::dice::DiceType;
use super::easing::Easing;

/// Where the die waits before the throw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DieStartConfig {
    #[serde(default = "default_die_position")]
    pub position: [f32; 3],
    /// Euler degrees, applied Z, X, then Y.
    #[serde(default)]
    pub rotation_degrees: [f32; 3],
}

fn default_die_position() -> [f32; 3] {
    [0.0, 2.0, 2.2]
}

impl Default for DieStartConfig {
    fn default() -> Self {
        Self {
            position: default_die_position(),
            rotation_degrees: [0.0, 0.0, 0.0],
        }
    }
}

/// Idle tumble: each axis of the angular velocity ping-pongs between its
/// `[min, max]` bounds by `increment` per physics step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OscillationConfig {
    #[serde(default = "default_axis_bounds")]
    pub x_bounds: [f32; 2],
    #[serde(default = "default_axis_bounds")]
    pub y_bounds: [f32; 2],
    #[serde(default = "default_axis_bounds")]
    pub z_bounds: [f32; 2],
    #[serde(default = "default_rotation_increment")]
    pub increment: f32,
}

fn default_axis_bounds() -> [f32; 2] {
    [-5.0, 5.0]
}

fn default_rotation_increment() -> f32 {
    0.1
}

impl Default for OscillationConfig {
    fn default() -> Self {
        Self {
            x_bounds: default_axis_bounds(),
            y_bounds: default_axis_bounds(),
            z_bounds: default_axis_bounds(),
            increment: default_rotation_increment(),
        }
    }
}

impl OscillationConfig {
    pub fn bounds(&self) -> [[f32; 2]; 3] {
        [self.x_bounds, self.y_bounds, self.z_bounds]
    }
}

/// Rest detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettleConfig {
    /// Linear speed under which the die counts as resting.
    #[serde(default = "default_min_speed")]
    pub min_speed: f32,
    /// How long the die must stay under `min_speed` before the camera moves.
    #[serde(default = "default_settle_wait")]
    pub wait_seconds: f32,
}

fn default_min_speed() -> f32 {
    0.05
}

fn default_settle_wait() -> f32 {
    0.5
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            min_speed: default_min_speed(),
            wait_seconds: default_settle_wait(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub start_position: [f32; 3],
    #[serde(default)]
    pub start_look_at: [f32; 3],
    /// Added to the settled die's position to get the close-up position.
    #[serde(default = "default_camera_offset")]
    pub offset: [f32; 3],
    /// Close-up orientation in euler degrees, applied Z, X, then Y.
    #[serde(default = "default_camera_rotation")]
    pub rotation_degrees: [f32; 3],
    #[serde(default = "default_camera_move_duration")]
    pub move_duration: f32,
    #[serde(default)]
    pub easing: Easing,
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 7.0, 9.0]
}

fn default_camera_offset() -> [f32; 3] {
    [0.0, 2.5, 1.4]
}

fn default_camera_rotation() -> [f32; 3] {
    [-60.0, 0.0, 0.0]
}

fn default_camera_move_duration() -> f32 {
    1.0
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: default_camera_position(),
            start_look_at: [0.0, 0.0, 0.0],
            offset: default_camera_offset(),
            rotation_degrees: default_camera_rotation(),
            move_duration: default_camera_move_duration(),
            easing: Easing::default(),
        }
    }
}

/// Top-level configuration, inserted as a resource.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TossConfig {
    /// Die variants in selection order.
    #[serde(default = "default_dice")]
    pub dice: Vec<DiceType>,
    #[serde(default)]
    pub initial_die: Option<DiceType>,
    #[serde(default)]
    pub die_start: DieStartConfig,
    #[serde(default)]
    pub oscillation: OscillationConfig,
    /// World-space velocity change applied when the die is thrown.
    #[serde(default = "default_throw_velocity")]
    pub throw_velocity: [f32; 3],
    #[serde(default)]
    pub settle: SettleConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    /// Seed for the idle tumble; random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_dice() -> Vec<DiceType> {
    DiceType::ALL.to_vec()
}

fn default_throw_velocity() -> [f32; 3] {
    [0.0, 1.5, -5.0]
}

impl Default for TossConfig {
    fn default() -> Self {
        Self {
            dice: default_dice(),
            initial_die: None,
            die_start: DieStartConfig::default(),
            oscillation: OscillationConfig::default(),
            throw_velocity: default_throw_velocity(),
            settle: SettleConfig::default(),
            camera: CameraConfig::default(),
            seed: None,
        }
    }
}

impl TossConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_ron_str(&text)
        }
        .map_err(|e| format!("{}: {e}", path.display()))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_ron_str(text: &str) -> Result<Self, String> {
        let config: Self = ron::from_str(text).map_err(|e| format!("Invalid RON config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| format!("Invalid JSON config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_pretty(&self) -> Result<String, String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| format!("Failed to serialize config: {e}"))
    }

    /// Reject configurations the sequencer cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.dice.is_empty() {
            return Err("dice list must not be empty".to_string());
        }

        if let Some(initial) = self.initial_die {
            if !self.dice.contains(&initial) {
                return Err(format!(
                    "initial die {initial} is not in the dice list"
                ));
            }
        }

        for (axis, [min, max]) in ["x", "y", "z"].iter().zip(self.oscillation.bounds()) {
            if !min.is_finite() || !max.is_finite() {
                return Err(format!("oscillation {axis} bounds must be finite"));
            }
            if min > max {
                return Err(format!(
                    "oscillation {axis} bounds are inverted: min {min} > max {max}"
                ));
            }
        }

        let increment = self.oscillation.increment;
        if !increment.is_finite() || increment <= 0.0 {
            return Err(format!(
                "oscillation increment must be positive, got {increment}"
            ));
        }

        let vectors = [
            ("die_start.position", self.die_start.position),
            ("die_start.rotation_degrees", self.die_start.rotation_degrees),
            ("throw_velocity", self.throw_velocity),
            ("camera.start_position", self.camera.start_position),
            ("camera.start_look_at", self.camera.start_look_at),
            ("camera.offset", self.camera.offset),
            ("camera.rotation_degrees", self.camera.rotation_degrees),
        ];
        for (name, value) in vectors {
            if value.iter().any(|v| !v.is_finite()) {
                return Err(format!("{name} must be finite"));
            }
        }

        let min_speed = self.settle.min_speed;
        if !min_speed.is_finite() || min_speed < 0.0 {
            return Err(format!(
                "settle.min_speed must be zero or positive, got {min_speed}"
            ));
        }

        let wait = self.settle.wait_seconds;
        if !wait.is_finite() || wait < 0.0 {
            return Err(format!(
                "settle.wait_seconds must be zero or positive, got {wait}"
            ));
        }

        let duration = self.camera.move_duration;
        if !duration.is_finite() || duration < 0.0 {
            return Err(format!(
                "camera.move_duration must be zero or positive, got {duration}"
            ));
        }

        Ok(())
    }

    /// Index of the die to start with.
    pub fn initial_die_index(&self) -> usize {
        self.initial_die
            .and_then(|die| self.dice.iter().position(|d| *d == die))
            .unwrap_or(0)
    }

    pub fn die_start_pose(&self) -> Pose {
        Pose::from_euler_degrees(
            Vec3::from_array(self.die_start.position),
            Vec3::from_array(self.die_start.rotation_degrees),
        )
    }

    pub fn throw_velocity(&self) -> Vec3 {
        Vec3::from_array(self.throw_velocity)
    }

    pub fn camera_start_transform(&self) -> Transform {
        let eye = Vec3::from_array(self.camera.start_position);
        let target = Vec3::from_array(self.camera.start_look_at);
        if eye.abs_diff_eq(target, 1e-4) {
            warn!("camera.start_look_at equals camera.start_position; using identity rotation");
            return Transform::from_translation(eye);
        }
        Transform::from_translation(eye).looking_at(target, Vec3::Y)
    }

    pub fn camera_offset(&self) -> Vec3 {
        Vec3::from_array(self.camera.offset)
    }

    pub fn camera_close_up_rotation(&self) -> Quat {
        euler_degrees_to_quat(Vec3::from_array(self.camera.rotation_degrees))
    }
}
