//! Roll sequencer integration tests, driven through the in-memory host.

mod common;

use bevy::prelude::*;
use common::FakeHost;
use dicetoss::toss::{
    AnimationTarget, DiceType, DieStep, OscillationConfig, Panel, PositionConstraints,
    RollSequencer, RollState, SettleConfig, TossConfig, TossInput,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn test_config(dice: Vec<DiceType>) -> TossConfig {
    TossConfig {
        dice,
        oscillation: OscillationConfig {
            x_bounds: [-5.0, 5.0],
            y_bounds: [-5.0, 5.0],
            z_bounds: [-5.0, 5.0],
            increment: 1.0,
        },
        settle: SettleConfig {
            min_speed: 0.05,
            wait_seconds: 0.4,
        },
        seed: Some(42),
        ..TossConfig::default()
    }
}

fn started(config: &TossConfig) -> (RollSequencer<u32>, FakeHost) {
    let mut host = FakeHost::new();
    let mut seq = RollSequencer::new(config);
    seq.start(&mut host);
    (seq, host)
}

/// Throw and let the die rest until the camera starts moving.
fn throw_and_settle(seq: &mut RollSequencer<u32>, host: &mut FakeHost) {
    seq.tick(0.016, TossInput::throw(), host);
    seq.physics_tick(host);
    let die = seq.die().unwrap();
    host.speed.insert(die, 0.0);
    for _ in 0..10 {
        seq.tick(0.2, TossInput::default(), host);
    }
    assert_eq!(seq.state(), RollState::Settling);
}

fn ready_to_reset(seq: &mut RollSequencer<u32>, host: &mut FakeHost) {
    throw_and_settle(seq, host);
    host.finish_all();
    seq.tick(0.016, TossInput::default(), host);
    assert_eq!(seq.state(), RollState::ReadyToReset);
}

#[test]
fn test_start_spawns_first_die_and_captures_camera() {
    let config = test_config(vec![DiceType::D6, DiceType::D20]);
    let (mut seq, mut host) = started(&config);

    assert_eq!(seq.state(), RollState::Idle);
    assert_eq!(host.spawned.len(), 1);
    assert_eq!(host.spawned[0].1, DiceType::D6);
    assert_eq!(host.spawned[0].2, config.die_start_pose());
    assert_eq!(seq.camera_home(), Some(host.camera));

    seq.start(&mut host);
    assert_eq!(host.spawned.len(), 1, "second start must not respawn");
}

#[test]
fn test_initial_die_from_config() {
    let mut config = test_config(vec![DiceType::D4, DiceType::D8, DiceType::D12]);
    config.initial_die = Some(DiceType::D8);
    let (seq, host) = started(&config);

    assert_eq!(seq.die_index(), 1);
    assert_eq!(host.spawned[0].1, DiceType::D8);
}

#[test]
fn test_next_die_wraps_around() {
    let config = test_config(vec![DiceType::D6, DiceType::D20]);
    let (mut seq, mut host) = started(&config);

    seq.tick(0.016, TossInput::next(), &mut host);
    assert_eq!(seq.die_index(), 1);
    assert_eq!(seq.selected_die(), DiceType::D20);

    seq.tick(0.016, TossInput::next(), &mut host);
    assert_eq!(seq.die_index(), 0);
    assert_eq!(seq.selected_die(), DiceType::D6);
}

#[test]
fn test_previous_die_wraps_to_last() {
    let config = test_config(vec![DiceType::D4, DiceType::D6, DiceType::D8]);
    let (mut seq, mut host) = started(&config);

    seq.tick(0.016, TossInput::previous(), &mut host);
    assert_eq!(seq.die_index(), 2);
    assert_eq!(seq.selected_die(), DiceType::D8);
}

#[test]
fn test_die_index_always_in_range() {
    let config = test_config(DiceType::ALL.to_vec());
    let (mut seq, mut host) = started(&config);
    let n = config.dice.len();
    let mut expected = 0usize;
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..500 {
        let step = if rng.gen_bool(0.5) {
            DieStep::Next
        } else {
            DieStep::Previous
        };
        assert!(seq.select_die(step, &mut host));
        expected = match step {
            DieStep::Next => (expected + 1) % n,
            DieStep::Previous => (expected + n - 1) % n,
        };
        assert!(seq.die_index() < n);
        assert_eq!(seq.die_index(), expected);
    }
}

#[test]
fn test_select_die_replaces_the_body() {
    let config = test_config(vec![DiceType::D6, DiceType::D20]);
    let (mut seq, mut host) = started(&config);
    let first = seq.die().unwrap();

    seq.tick(0.016, TossInput::next(), &mut host);
    let second = seq.die().unwrap();

    assert_ne!(first, second);
    assert_eq!(host.destroyed, vec![first]);
    assert_eq!(host.alive.len(), 1);
    assert_eq!(host.alive.get(&second), Some(&DiceType::D20));
    assert_eq!(host.spawned[1].2, config.die_start_pose());
}

#[test]
fn test_next_wins_when_both_directions_pressed() {
    let config = test_config(vec![DiceType::D4, DiceType::D6, DiceType::D8]);
    let (mut seq, mut host) = started(&config);

    let input = TossInput {
        next: true,
        previous: true,
        ..TossInput::default()
    };
    seq.tick(0.016, input, &mut host);
    assert_eq!(seq.die_index(), 1);
}

#[test]
fn test_select_die_ignored_outside_idle() {
    let config = test_config(vec![DiceType::D6, DiceType::D20]);
    let (mut seq, mut host) = started(&config);

    seq.tick(0.016, TossInput::throw(), &mut host);
    assert!(!seq.select_die(DieStep::Next, &mut host));
    seq.tick(0.016, TossInput::next(), &mut host);

    assert_eq!(seq.die_index(), 0);
    assert_eq!(host.spawned.len(), 1);
}

#[test]
fn test_idle_tumble_stays_within_one_increment_of_bounds() {
    let mut config = test_config(vec![DiceType::D6]);
    config.oscillation.y_bounds = [0.0, 2.5];
    config.oscillation.z_bounds = [-1.0, -0.5];
    let (mut seq, mut host) = started(&config);
    let die = seq.die().unwrap();
    let increment = config.oscillation.increment;

    for _ in 0..1000 {
        seq.physics_tick(&mut host);
        for axis in seq.oscillator().axes() {
            let (min, max) = axis.bounds();
            let v = axis.value();
            assert!(v >= min - increment - 1e-4 && v <= max + increment + 1e-4);
        }
        assert_eq!(
            host.angular_velocity.get(&die).copied(),
            Some(seq.oscillator().angular_velocity())
        );
    }
}

#[test]
fn test_throw_impulse_waits_for_physics_step() {
    let config = test_config(vec![DiceType::D6]);
    let (mut seq, mut host) = started(&config);
    let die = seq.die().unwrap();

    seq.tick(0.016, TossInput::throw(), &mut host);
    assert_eq!(seq.state(), RollState::Throwing);
    assert!(host.velocity_changes.is_empty());
    assert!(host.panel(Panel::PreThrow));

    seq.tick(0.016, TossInput::default(), &mut host);
    assert!(host.velocity_changes.is_empty());

    seq.physics_tick(&mut host);
    assert_eq!(seq.state(), RollState::Thrown);
    assert_eq!(host.velocity_changes, vec![(die, config.throw_velocity())]);
    assert_eq!(host.constraints.get(&die), Some(&PositionConstraints::Free));
    assert!(!host.panel(Panel::PreThrow));
}

#[test]
fn test_throw_frame_ignores_other_input() {
    let config = test_config(vec![DiceType::D6, DiceType::D20]);
    let (mut seq, mut host) = started(&config);

    let input = TossInput {
        throw: true,
        next: true,
        ..TossInput::default()
    };
    seq.tick(0.016, input, &mut host);

    assert_eq!(seq.state(), RollState::Throwing);
    assert_eq!(seq.die_index(), 0);
}

#[test]
fn test_apply_throw_is_idempotent() {
    let config = test_config(vec![DiceType::D6]);
    let (mut seq, mut host) = started(&config);

    assert!(!seq.apply_throw(&mut host), "no throw was requested");
    assert!(seq.begin_throw());
    assert!(!seq.begin_throw());
    assert!(seq.apply_throw(&mut host));
    assert!(!seq.apply_throw(&mut host));
    seq.physics_tick(&mut host);

    assert_eq!(host.velocity_changes.len(), 1);
}

#[test]
fn test_no_tumble_while_thrown() {
    let config = test_config(vec![DiceType::D6]);
    let (mut seq, mut host) = started(&config);
    let die = seq.die().unwrap();

    seq.tick(0.016, TossInput::throw(), &mut host);
    seq.physics_tick(&mut host);
    host.angular_velocity.clear();

    for _ in 0..5 {
        seq.physics_tick(&mut host);
    }
    assert!(!host.angular_velocity.contains_key(&die));
    assert!(seq.tick_idle_oscillation(&mut host).is_none());
}

#[test]
fn test_settle_fires_on_third_frame() {
    let config = test_config(vec![DiceType::D6, DiceType::D20]);
    let (mut seq, mut host) = started(&config);

    seq.tick(0.016, TossInput::next(), &mut host);
    assert_eq!(seq.die_index(), 1);
    seq.tick(0.016, TossInput::next(), &mut host);
    assert_eq!(seq.die_index(), 0);

    seq.tick(0.016, TossInput::throw(), &mut host);
    seq.physics_tick(&mut host);
    let die = seq.die().unwrap();
    host.speed.insert(die, 0.02);
    host.positions.insert(die, Vec3::new(1.0, 0.3, -2.0));

    seq.tick(0.2, TossInput::default(), &mut host);
    assert_eq!(seq.state(), RollState::Thrown);
    seq.tick(0.2, TossInput::default(), &mut host);
    assert_eq!(seq.state(), RollState::Thrown);
    assert!(host.animations.is_empty());
    seq.tick(0.2, TossInput::default(), &mut host);
    assert_eq!(seq.state(), RollState::Settling);

    assert_eq!(host.animations.len(), 1);
    let anim = host.last_animation().unwrap();
    assert_eq!(anim.target, AnimationTarget::Camera);
    assert_eq!(
        anim.to.translation,
        Vec3::new(1.0, 0.3, -2.0) + config.camera_offset()
    );
    assert_eq!(anim.to.rotation, config.camera_close_up_rotation());
    assert_eq!(anim.duration, config.camera.move_duration);
    assert_eq!(anim.easing, config.camera.easing);
}

#[test]
fn test_motion_restarts_the_settle_wait() {
    let config = test_config(vec![DiceType::D6]);
    let (mut seq, mut host) = started(&config);

    seq.tick(0.016, TossInput::throw(), &mut host);
    seq.physics_tick(&mut host);
    let die = seq.die().unwrap();

    for speed in [0.01, 0.01, 3.0, 0.01, 0.01] {
        host.speed.insert(die, speed);
        seq.tick(0.2, TossInput::default(), &mut host);
        assert_eq!(seq.state(), RollState::Thrown);
    }
    assert!((seq.settle_elapsed() - 0.4).abs() < 1e-5);

    seq.tick(0.2, TossInput::default(), &mut host);
    assert_eq!(seq.state(), RollState::Settling);
}

#[test]
fn test_camera_move_fires_once() {
    let config = test_config(vec![DiceType::D6]);
    let (mut seq, mut host) = started(&config);
    throw_and_settle(&mut seq, &mut host);

    for _ in 0..20 {
        assert!(!seq.check_settled(0.0, 0.5, &mut host));
        assert!(!seq.move_camera_to_die(&mut host));
        seq.tick(0.5, TossInput::default(), &mut host);
    }
    assert_eq!(host.animations.len(), 1);
}

#[test]
fn test_reset_rejected_until_camera_arrives() {
    let config = test_config(vec![DiceType::D6]);
    let (mut seq, mut host) = started(&config);

    assert!(!seq.reset(&mut host), "idle");
    throw_and_settle(&mut seq, &mut host);
    assert!(!seq.reset(&mut host), "camera still moving");
    seq.tick(0.016, TossInput::throw(), &mut host);
    assert_eq!(seq.state(), RollState::Settling);
    assert!(!host.panel(Panel::PostThrow));

    host.finish_all();
    seq.tick(0.016, TossInput::default(), &mut host);
    assert_eq!(seq.state(), RollState::ReadyToReset);
    assert!(host.panel(Panel::PostThrow));
}

#[test]
fn test_reset_returns_camera_and_die_home() {
    let config = test_config(vec![DiceType::D6]);
    let (mut seq, mut host) = started(&config);
    let home = host.camera;
    ready_to_reset(&mut seq, &mut host);
    let die = seq.die().unwrap();
    let before = host.animations.len();

    seq.tick(0.016, TossInput::throw(), &mut host);
    assert_eq!(seq.state(), RollState::Resetting);
    assert!(!host.panel(Panel::PostThrow));
    assert!(!host.panel(Panel::PreThrow));
    assert_eq!(seq.settle_elapsed(), 0.0);
    assert!(!seq.reset(&mut host), "reset is one-shot");

    let started_now = host.animations[before..].to_vec();
    assert_eq!(started_now.len(), 2);
    assert_eq!(started_now[0].target, AnimationTarget::Camera);
    assert_eq!(started_now[0].to, home);
    assert_eq!(started_now[1].target, AnimationTarget::Body(die));
    assert_eq!(started_now[1].to, config.die_start_pose());

    // Tumble keeps running while the die flies home.
    host.angular_velocity.clear();
    seq.physics_tick(&mut host);
    assert!(host.angular_velocity.contains_key(&die));

    // Throwing is not possible until the camera is home.
    seq.tick(0.016, TossInput::throw(), &mut host);
    assert_eq!(seq.state(), RollState::Resetting);

    let die_anim = started_now[1].id;
    let camera_anim = started_now[0].id;
    host.finish(die_anim);
    seq.tick(0.016, TossInput::default(), &mut host);
    assert_eq!(host.constraints.get(&die), Some(&PositionConstraints::Frozen));
    assert_eq!(seq.state(), RollState::Resetting);

    host.finish(camera_anim);
    seq.tick(0.016, TossInput::default(), &mut host);
    assert_eq!(seq.state(), RollState::Idle);
    assert!(host.panel(Panel::PreThrow));
    assert_eq!(seq.pending_animations(), 0);
}

fn assert_tumble_in_bounds(seq: &RollSequencer<u32>) {
    for axis in seq.oscillator().axes() {
        let (min, max) = axis.bounds();
        assert!((min..=max).contains(&axis.value()), "{} outside [{min}, {max}]", axis.value());
    }
}

#[test]
fn test_select_die_randomizes_the_tumble() {
    let config = test_config(vec![DiceType::D6, DiceType::D20]);
    let (mut seq, mut host) = started(&config);
    let before = seq.oscillator().angular_velocity();

    assert!(seq.select_die(DieStep::Next, &mut host));

    assert_ne!(seq.oscillator().angular_velocity(), before);
    assert_tumble_in_bounds(&seq);
}

#[test]
fn test_reset_randomizes_the_tumble() {
    let config = test_config(vec![DiceType::D6]);
    let (mut seq, mut host) = started(&config);
    ready_to_reset(&mut seq, &mut host);
    let before = seq.oscillator().angular_velocity();

    assert!(seq.reset(&mut host));

    assert_ne!(seq.oscillator().angular_velocity(), before);
    assert_tumble_in_bounds(&seq);
}

#[test]
fn test_die_swap_drops_pending_return_of_old_die() {
    let config = test_config(vec![DiceType::D6, DiceType::D20]);
    let (mut seq, mut host) = started(&config);
    ready_to_reset(&mut seq, &mut host);
    let old = seq.die().unwrap();
    let before = host.animations.len();

    seq.tick(0.016, TossInput::throw(), &mut host);
    let camera_anim = host.animations[before].id;
    let die_anim = host.animations[before + 1].id;
    assert_eq!(host.animations[before + 1].target, AnimationTarget::Body(old));

    // Camera gets home first; the die is still on its way.
    host.finish(camera_anim);
    seq.tick(0.016, TossInput::default(), &mut host);
    assert_eq!(seq.state(), RollState::Idle);
    assert_eq!(seq.pending_animations(), 1);

    seq.tick(0.016, TossInput::next(), &mut host);
    let new = seq.die().unwrap();
    assert_ne!(old, new);
    assert_eq!(seq.pending_animations(), 0);

    host.constraints.clear();
    host.finish(die_anim);
    seq.tick(0.016, TossInput::default(), &mut host);

    assert!(host.constraints.get(&new).is_none());
    assert!(host.constraints.get(&old).is_none());
    assert_eq!(seq.state(), RollState::Idle);
}

#[test]
fn test_second_throw_after_reset() {
    let config = test_config(vec![DiceType::D6]);
    let (mut seq, mut host) = started(&config);
    ready_to_reset(&mut seq, &mut host);
    seq.tick(0.016, TossInput::throw(), &mut host);
    host.finish_all();
    seq.tick(0.016, TossInput::default(), &mut host);
    assert_eq!(seq.state(), RollState::Idle);

    throw_and_settle(&mut seq, &mut host);
    assert_eq!(host.velocity_changes.len(), 2);
}

#[test]
fn test_quit_only_while_idle() {
    let config = test_config(vec![DiceType::D6]);
    let (mut seq, mut host) = started(&config);

    seq.tick(0.016, TossInput::throw(), &mut host);
    seq.tick(0.016, TossInput::quit(), &mut host);
    assert!(!host.terminated);

    let (mut seq, mut host) = started(&config);
    seq.tick(0.016, TossInput::quit(), &mut host);
    assert!(host.terminated);
}

#[test]
fn test_nothing_happens_before_start() {
    let config = test_config(vec![DiceType::D6]);
    let mut host = FakeHost::new();
    let mut seq: RollSequencer<u32> = RollSequencer::new(&config);

    seq.tick(0.016, TossInput::throw(), &mut host);
    seq.physics_tick(&mut host);
    seq.tick(0.016, TossInput::quit(), &mut host);

    assert!(!seq.is_started());
    assert_eq!(seq.state(), RollState::Idle);
    assert!(host.spawned.is_empty());
    assert!(host.velocity_changes.is_empty());
    assert!(!host.terminated);
}

#[test]
fn test_same_seed_gives_same_tumble() {
    let config = test_config(vec![DiceType::D6]);
    let (mut a, mut host_a) = started(&config);
    let (mut b, mut host_b) = started(&config);

    for _ in 0..20 {
        a.physics_tick(&mut host_a);
        b.physics_tick(&mut host_b);
    }
    assert_eq!(
        a.oscillator().angular_velocity(),
        b.oscillator().angular_velocity()
    );
}
