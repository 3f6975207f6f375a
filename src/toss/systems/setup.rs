//! Scene setup
//!
//! Spawns the camera, lights, the dice tray and the two HUD panels. The die
//! itself is spawned by the sequencer through [`spawn_die`].

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::toss::meshes::create_die_mesh_and_collider;
use crate::toss::types::*;

const TRAY_HALF_SIZE: f32 = 3.0;
const WALL_HEIGHT: f32 = 2.0;
const WALL_THICKNESS: f32 = 0.2;

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<TossConfig>,
) {
    commands.spawn((Camera3d::default(), config.camera_start_transform(), MainCamera));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            intensity: 400_000.0,
            range: 30.0,
            ..default()
        },
        Transform::from_xyz(-4.0, 6.0, 4.0),
    ));

    spawn_tray(&mut commands, &mut meshes, &mut materials);
    spawn_hud(&mut commands);
}

fn spawn_tray(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let felt = materials.add(StandardMaterial {
        base_color: Color::srgb(0.08, 0.3, 0.15),
        perceptual_roughness: 0.9,
        ..default()
    });
    let wood = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.22, 0.12),
        perceptual_roughness: 0.6,
        ..default()
    });

    let size = TRAY_HALF_SIZE * 2.0;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(size, 0.3, size))),
        MeshMaterial3d(felt),
        Transform::from_xyz(0.0, -0.15, 0.0),
        Collider::cuboid(TRAY_HALF_SIZE, 0.15, TRAY_HALF_SIZE),
        RigidBody::Fixed,
        Restitution::coefficient(0.2),
        Friction::coefficient(0.8),
        DiceTray,
    ));

    let long = size + WALL_THICKNESS * 2.0;
    for (pos, extent) in [
        (
            Vec3::new(0.0, WALL_HEIGHT / 2.0, -TRAY_HALF_SIZE),
            Vec3::new(long, WALL_HEIGHT, WALL_THICKNESS),
        ),
        (
            Vec3::new(0.0, WALL_HEIGHT / 2.0, TRAY_HALF_SIZE),
            Vec3::new(long, WALL_HEIGHT, WALL_THICKNESS),
        ),
        (
            Vec3::new(-TRAY_HALF_SIZE, WALL_HEIGHT / 2.0, 0.0),
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, size),
        ),
        (
            Vec3::new(TRAY_HALF_SIZE, WALL_HEIGHT / 2.0, 0.0),
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, size),
        ),
    ] {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(extent.x, extent.y, extent.z))),
            MeshMaterial3d(wood.clone()),
            Transform::from_translation(pos),
            Collider::cuboid(extent.x / 2.0, extent.y / 2.0, extent.z / 2.0),
            RigidBody::Fixed,
            Restitution::coefficient(0.3),
            Friction::coefficient(0.6),
            DiceTray,
        ));
    }
}

fn spawn_hud(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                bottom: Val::Px(16.0),
                padding: UiRect::all(Val::Px(12.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            Visibility::Visible,
            HudPanel(Panel::PreThrow),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                PreThrowText,
            ));
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                top: Val::Px(16.0),
                padding: UiRect::all(Val::Px(12.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            Visibility::Hidden,
            HudPanel(Panel::PostThrow),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.85, 0.3)),
                PostThrowText,
            ));
        });
}

/// Spawn a die frozen in place at `pose`. It can spin but not move until
/// its translation is unlocked.
pub fn spawn_die(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    die_type: DiceType,
    pose: Pose,
) -> Entity {
    let (mesh, collider, face_normals) = create_die_mesh_and_collider(die_type);

    let material = materials.add(StandardMaterial {
        base_color: die_type.color(),
        perceptual_roughness: 0.35,
        metallic: 0.05,
        ..default()
    });

    commands
        .spawn((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(material),
            Transform::from(pose),
            RigidBody::Dynamic,
            collider,
            Velocity::zero(),
            LockedAxes::TRANSLATION_LOCKED,
            Restitution::coefficient(0.15),
            Friction::coefficient(0.7),
            ColliderMassProperties::Density(die_type.density()),
            Ccd::enabled(),
            Die {
                die_type,
                face_normals,
            },
        ))
        .id()
}
