//! Idle tumble
//!
//! While the die waits to be thrown its angular velocity sweeps back and forth
//! on each axis independently. Bounds are checked after the step and the value
//! is never clamped, so it can overshoot a bound by up to one increment before
//! turning around.

use bevy::prelude::*;
use rand::Rng;

use crate::toss::types::OscillationConfig;

/// One axis of the tumble.
#[derive(Debug, Clone, PartialEq)]
pub struct OscillatingAngle {
    value: f32,
    min: f32,
    max: f32,
    ascending: bool,
}

impl OscillatingAngle {
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            value: min,
            min,
            max,
            ascending: false,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    /// Pick a new start value uniformly inside the bounds. The direction is kept.
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        self.value = rng.gen_range(self.min..=self.max);
    }

    pub fn step(&mut self, increment: f32) -> f32 {
        if self.ascending {
            self.value += increment;
        } else {
            self.value -= increment;
        }

        if self.value <= self.min || self.value >= self.max {
            self.ascending = !self.ascending;
        }

        self.value
    }
}

/// The three axes plus the shared increment.
#[derive(Debug, Clone, PartialEq)]
pub struct TumbleOscillator {
    axes: [OscillatingAngle; 3],
    increment: f32,
}

impl TumbleOscillator {
    pub fn new(bounds: [[f32; 2]; 3], increment: f32) -> Self {
        Self {
            axes: bounds.map(|[min, max]| OscillatingAngle::new(min, max)),
            increment,
        }
    }

    pub fn from_config(config: &OscillationConfig) -> Self {
        Self::new(config.bounds(), config.increment)
    }

    pub fn randomize(&mut self, rng: &mut impl Rng) {
        for axis in &mut self.axes {
            axis.randomize(rng);
        }
    }

    /// Advance every axis by one increment and return the new vector.
    pub fn step(&mut self) -> Vec3 {
        let increment = self.increment;
        for axis in &mut self.axes {
            axis.step(increment);
        }
        self.angular_velocity()
    }

    pub fn angular_velocity(&self) -> Vec3 {
        Vec3::new(self.axes[0].value, self.axes[1].value, self.axes[2].value)
    }

    pub fn axes(&self) -> &[OscillatingAngle; 3] {
        &self.axes
    }

    pub fn increment(&self) -> f32 {
        self.increment
    }
}
