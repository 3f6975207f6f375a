//! Rest detection

/// Accumulates how long the die has stayed under the speed threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct SettleTimer {
    elapsed: f32,
    wait: f32,
    threshold: f32,
}

impl SettleTimer {
    pub fn new(threshold: f32, wait: f32) -> Self {
        Self {
            elapsed: 0.0,
            wait,
            threshold,
        }
    }

    /// Feed one frame's speed sample; returns true once the die has rested
    /// for strictly longer than the wait.
    pub fn observe(&mut self, speed: f32, dt: f32) -> bool {
        if speed < self.threshold {
            // Stop accumulating once past the wait.
            if self.elapsed <= self.wait {
                self.elapsed += dt;
            }
        } else {
            self.elapsed = 0.0;
        }
        self.is_settled()
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed > self.wait
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn clear(&mut self) {
        self.elapsed = 0.0;
    }
}
