//! The roll state machine

use std::fmt;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::host::{AnimationId, AnimationTarget, PositionConstraints, TossHost};
use super::oscillation::TumbleOscillator;
use super::settle::SettleTimer;
use super::state::{DieStep, RollState, TossInput};
use crate::toss::types::{DiceType, Easing, Panel, Pose, TossConfig};

/// What to do when an animation finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Completion<B> {
    /// Camera reached the settled die: show the result, allow reset.
    CameraAtDie,
    /// Camera is back home: show the pre-throw panel, allow throwing.
    CameraHome,
    /// Die is back at its start pose: freeze it there again.
    DieHome(B),
}

#[derive(Debug, Clone, Copy)]
struct PendingCompletion<B> {
    id: AnimationId,
    completion: Completion<B>,
}

/// Drives one die through select, tumble, throw, settle, close-up and reset.
///
/// Call [`tick`](Self::tick) once per rendered frame and
/// [`physics_tick`](Self::physics_tick) once per fixed physics step.
/// Operations that are not valid in the current state do nothing.
#[derive(Resource)]
pub struct RollSequencer<B = Entity> {
    dice: Vec<DiceType>,
    die_index: usize,
    die_start: Pose,
    throw_velocity: Vec3,
    camera_offset: Vec3,
    close_up_rotation: Quat,
    move_duration: f32,
    easing: Easing,

    state: RollState,
    started: bool,
    die: Option<B>,
    camera_home: Option<Pose>,
    oscillator: TumbleOscillator,
    settle: SettleTimer,
    pending: Vec<PendingCompletion<B>>,
    rng: StdRng,
}

impl<B> RollSequencer<B>
where
    B: Copy + PartialEq + fmt::Debug,
{
    /// The config is expected to have passed [`TossConfig::validate`].
    pub fn new(config: &TossConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: &TossConfig, rng: StdRng) -> Self {
        Self {
            dice: config.dice.clone(),
            die_index: config.initial_die_index(),
            die_start: config.die_start_pose(),
            throw_velocity: config.throw_velocity(),
            camera_offset: config.camera_offset(),
            close_up_rotation: config.camera_close_up_rotation(),
            move_duration: config.camera.move_duration,
            easing: config.camera.easing,
            state: RollState::Idle,
            started: false,
            die: None,
            camera_home: None,
            oscillator: TumbleOscillator::from_config(&config.oscillation),
            settle: SettleTimer::new(config.settle.min_speed, config.settle.wait_seconds),
            pending: Vec::new(),
            rng,
        }
    }

    pub fn state(&self) -> RollState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn die_index(&self) -> usize {
        self.die_index
    }

    pub fn selected_die(&self) -> DiceType {
        self.dice[self.die_index]
    }

    pub fn dice(&self) -> &[DiceType] {
        &self.dice
    }

    /// Handle of the current die body, once started.
    pub fn die(&self) -> Option<B> {
        self.die
    }

    pub fn camera_home(&self) -> Option<Pose> {
        self.camera_home
    }

    pub fn oscillator(&self) -> &TumbleOscillator {
        &self.oscillator
    }

    pub fn settle_elapsed(&self) -> f32 {
        self.settle.elapsed()
    }

    pub fn pending_animations(&self) -> usize {
        self.pending.len()
    }

    /// Capture the camera's home pose and spawn the first die.
    pub fn start<H>(&mut self, host: &mut H)
    where
        H: TossHost<Body = B>,
    {
        if self.started {
            return;
        }
        self.started = true;

        let home = host.camera_pose();
        self.camera_home = Some(home);

        self.die = Some(host.spawn(self.selected_die(), self.die_start));
        self.oscillator.randomize(&mut self.rng);
        self.state = RollState::Idle;

        info!(
            "Sequencer started with {} ({} variants)",
            self.selected_die(),
            self.dice.len()
        );
    }

    /// Per-frame update.
    pub fn tick<H>(&mut self, dt: f32, input: TossInput, host: &mut H)
    where
        H: TossHost<Body = B>,
    {
        if !self.started {
            return;
        }

        self.resolve_animations(host);

        if input.quit && self.state == RollState::Idle {
            info!("Quit requested");
            host.terminate();
            return;
        }

        match self.state {
            RollState::Idle => {
                if input.throw {
                    self.begin_throw();
                    return;
                }
                if input.next {
                    self.select_die(DieStep::Next, host);
                } else if input.previous {
                    self.select_die(DieStep::Previous, host);
                }
            }
            RollState::Thrown => {
                let speed = self.die.map_or(0.0, |die| host.linear_speed(die));
                self.check_settled(speed, dt, host);
            }
            RollState::ReadyToReset => {
                if input.throw {
                    self.reset(host);
                }
            }
            RollState::Throwing | RollState::Settling | RollState::Resetting => {}
        }
    }

    /// Per-physics-step update.
    pub fn physics_tick<H>(&mut self, host: &mut H)
    where
        H: TossHost<Body = B>,
    {
        if !self.started {
            return;
        }

        match self.state {
            RollState::Throwing => {
                self.apply_throw(host);
            }
            state if state.is_tumbling() => {
                self.tick_idle_oscillation(host);
            }
            _ => {}
        }
    }

    /// Cycle to the next or previous die, replacing the spawned body.
    /// Returns false outside `Idle`.
    pub fn select_die<H>(&mut self, step: DieStep, host: &mut H) -> bool
    where
        H: TossHost<Body = B>,
    {
        if !self.started || self.state != RollState::Idle {
            return false;
        }

        let len = self.dice.len();
        self.die_index = match step {
            DieStep::Next => (self.die_index + 1) % len,
            DieStep::Previous => (self.die_index + len - 1) % len,
        };

        if let Some(old) = self.die.take() {
            host.destroy(old);
            self.pending
                .retain(|p| !matches!(p.completion, Completion::DieHome(body) if body == old));
        }

        self.die = Some(host.spawn(self.selected_die(), self.die_start));
        self.oscillator.randomize(&mut self.rng);

        debug!("Selected {} (index {})", self.selected_die(), self.die_index);
        true
    }

    /// Step the idle tumble and push it to the die as angular velocity.
    pub fn tick_idle_oscillation<H>(&mut self, host: &mut H) -> Option<Vec3>
    where
        H: TossHost<Body = B>,
    {
        if !self.state.is_tumbling() {
            return None;
        }

        let angular_velocity = self.oscillator.step();
        if let Some(die) = self.die {
            host.set_angular_velocity(die, angular_velocity);
        }
        Some(angular_velocity)
    }

    /// Request a throw; the impulse is applied on the next physics step.
    pub fn begin_throw(&mut self) -> bool {
        if !self.started || self.state != RollState::Idle {
            return false;
        }

        self.state = RollState::Throwing;
        info!("Throwing {}", self.selected_die());
        true
    }

    /// Release the die and apply the throw impulse. Only the first call
    /// after [`begin_throw`](Self::begin_throw) does anything.
    pub fn apply_throw<H>(&mut self, host: &mut H) -> bool
    where
        H: TossHost<Body = B>,
    {
        if self.state != RollState::Throwing {
            return false;
        }

        self.state = RollState::Thrown;
        self.settle.clear();

        host.set_panel_visible(Panel::PreThrow, false);
        if let Some(die) = self.die {
            host.set_constraints(die, PositionConstraints::Free);
            host.apply_velocity_change(die, self.throw_velocity);
        }

        debug!("Applied throw velocity {:?}", self.throw_velocity);
        true
    }

    /// Feed the die's speed; once it has rested long enough the camera is
    /// sent to it. Returns true on the frame that happens.
    pub fn check_settled<H>(&mut self, speed: f32, dt: f32, host: &mut H) -> bool
    where
        H: TossHost<Body = B>,
    {
        if self.state != RollState::Thrown {
            return false;
        }

        if self.settle.observe(speed, dt) {
            self.move_camera_to_die(host);
            return true;
        }
        false
    }

    /// Fly the camera to the die. Leaves `Thrown` immediately, so it can
    /// only fire once per throw.
    pub fn move_camera_to_die<H>(&mut self, host: &mut H) -> bool
    where
        H: TossHost<Body = B>,
    {
        if self.state != RollState::Thrown {
            return false;
        }
        self.state = RollState::Settling;

        let die_position = self.die.map_or(self.die_start.translation, |die| host.position(die));
        let target = Pose::new(die_position + self.camera_offset, self.close_up_rotation);

        let id = host.animate(
            AnimationTarget::Camera,
            target,
            self.move_duration,
            self.easing,
        );
        self.pending.push(PendingCompletion {
            id,
            completion: Completion::CameraAtDie,
        });

        info!(
            "{} settled after {:.2}s, moving camera",
            self.selected_die(),
            self.settle.elapsed()
        );
        true
    }

    /// Send the camera and the die back home. Only valid once the close-up
    /// has finished.
    pub fn reset<H>(&mut self, host: &mut H) -> bool
    where
        H: TossHost<Body = B>,
    {
        if self.state != RollState::ReadyToReset {
            return false;
        }
        self.state = RollState::Resetting;

        host.set_panel_visible(Panel::PostThrow, false);

        let home = self.camera_home.unwrap_or_else(|| host.camera_pose());
        let camera = host.animate(
            AnimationTarget::Camera,
            home,
            self.move_duration,
            self.easing,
        );
        self.pending.push(PendingCompletion {
            id: camera,
            completion: Completion::CameraHome,
        });

        self.settle.clear();

        if let Some(die) = self.die {
            let id = host.animate(
                AnimationTarget::Body(die),
                self.die_start,
                self.move_duration,
                self.easing,
            );
            self.pending.push(PendingCompletion {
                id,
                completion: Completion::DieHome(die),
            });
        }

        self.oscillator.randomize(&mut self.rng);

        info!("Resetting");
        true
    }

    fn resolve_animations<H>(&mut self, host: &mut H)
    where
        H: TossHost<Body = B>,
    {
        if self.pending.is_empty() {
            return;
        }

        let mut finished = Vec::new();
        self.pending.retain(|p| {
            if host.take_finished(p.id) {
                finished.push(p.completion);
                false
            } else {
                true
            }
        });

        for completion in finished {
            self.complete(completion, host);
        }
    }

    fn complete<H>(&mut self, completion: Completion<B>, host: &mut H)
    where
        H: TossHost<Body = B>,
    {
        match completion {
            Completion::CameraAtDie => {
                if self.state == RollState::Settling {
                    host.set_panel_visible(Panel::PostThrow, true);
                    self.state = RollState::ReadyToReset;
                    debug!("Camera at die, reset enabled");
                }
            }
            Completion::CameraHome => {
                if self.state == RollState::Resetting {
                    host.set_panel_visible(Panel::PreThrow, true);
                    self.state = RollState::Idle;
                    debug!("Camera home, throwing enabled");
                }
            }
            Completion::DieHome(die) => {
                host.set_constraints(die, PositionConstraints::Frozen);
            }
        }
    }
}
