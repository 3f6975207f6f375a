//! Die meshes, colliders and face tables

mod polyhedron;

use bevy::prelude::*;

use crate::toss::types::DiceType;

pub use polyhedron::{bottom_face, build_polyhedron, top_face, with_circumradius, DieGeometry};

const PHI: f32 = 1.618_034;

pub fn create_die_mesh_and_collider(die_type: DiceType) -> DieGeometry {
    let radius = base_radius(die_type) * die_type.scale();
    match die_type {
        DiceType::D4 => create_d4(radius),
        DiceType::D6 => create_d6(radius),
        DiceType::D8 => create_d8(radius),
        DiceType::D10 => create_d10(radius),
        DiceType::D12 => create_d12(radius),
        DiceType::D20 => create_d20(radius),
    }
}

/// Value shown by a die resting with `rotation`. A D4 has a vertex on top
/// rather than a face, so it is read from the face it lies on.
pub fn resting_value(
    die_type: DiceType,
    face_normals: &[(Vec3, u32)],
    rotation: Quat,
) -> Option<u32> {
    match die_type {
        DiceType::D4 => bottom_face(face_normals, rotation),
        _ => top_face(face_normals, rotation),
    }
}

fn base_radius(die_type: DiceType) -> f32 {
    match die_type {
        DiceType::D4 => 0.6,
        DiceType::D6 => 0.5,
        DiceType::D12 => 0.48,
        _ => 0.5,
    }
}

fn numbered(count: u32) -> Vec<u32> {
    (1..=count).collect()
}

pub fn create_d4(radius: f32) -> DieGeometry {
    let vertices = with_circumradius(
        vec![
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
        ],
        radius,
    );
    // Face i is opposite vertex i: lying on face i leaves vertex i on top.
    let faces = vec![vec![1, 2, 3], vec![0, 3, 2], vec![0, 1, 3], vec![0, 2, 1]];
    build_polyhedron(&vertices, &faces, &numbered(4))
}

pub fn create_d6(radius: f32) -> DieGeometry {
    // Vertex index bits: 1 = +x, 2 = +y, 4 = +z.
    let vertices: Vec<Vec3> = (0..8)
        .map(|i| {
            let sign = |bit: usize| if i & bit != 0 { 1.0 } else { -1.0 };
            Vec3::new(sign(1), sign(2), sign(4))
        })
        .collect();
    let vertices = with_circumradius(vertices, radius);

    let faces = vec![
        vec![2, 3, 7, 6], // +y
        vec![0, 1, 5, 4], // -y
        vec![1, 3, 7, 5], // +x
        vec![0, 2, 6, 4], // -x
        vec![4, 5, 7, 6], // +z
        vec![0, 1, 3, 2], // -z
    ];
    // Opposite faces add up to 7.
    build_polyhedron(&vertices, &faces, &[6, 1, 3, 4, 2, 5])
}

pub fn create_d8(radius: f32) -> DieGeometry {
    let vertices = vec![
        Vec3::X * radius,
        Vec3::NEG_X * radius,
        Vec3::Y * radius,
        Vec3::NEG_Y * radius,
        Vec3::Z * radius,
        Vec3::NEG_Z * radius,
    ];
    let corner = |sx: bool, sy: bool, sz: bool| {
        vec![
            if sx { 0 } else { 1 },
            if sy { 2 } else { 3 },
            if sz { 4 } else { 5 },
        ]
    };

    let mut faces = Vec::new();
    let mut values = Vec::new();
    for (value, (sx, sz)) in [(true, true), (false, true), (true, false), (false, false)]
        .into_iter()
        .enumerate()
    {
        faces.push(corner(sx, true, sz));
        values.push(value as u32 + 1);
        // Opposite faces add up to 9.
        faces.push(corner(!sx, false, !sz));
        values.push(8 - value as u32);
    }
    build_polyhedron(&vertices, &faces, &values)
}

/// Pentagonal trapezohedron: two apexes and two staggered rings of five.
pub fn create_d10(radius: f32) -> DieGeometry {
    let step = std::f32::consts::TAU / 5.0;
    let ring = |offset: f32, y: f32| -> Vec<Vec3> {
        (0..5)
            .map(|i| {
                let a = (i as f32 + offset) * step;
                Vec3::new(a.cos() * 0.7, y, a.sin() * 0.7)
            })
            .collect()
    };

    let mut vertices = vec![Vec3::new(0.0, 0.9, 0.0), Vec3::new(0.0, -0.9, 0.0)];
    vertices.extend(ring(0.0, 0.1));
    vertices.extend(ring(0.5, -0.1));
    let vertices = with_circumradius(vertices, radius);

    let (top, bottom) = (0, 1);
    let upper = |i: usize| 2 + i % 5;
    let lower = |i: usize| 7 + i % 5;

    let mut faces = Vec::new();
    let mut values = Vec::new();
    for i in 0..5 {
        faces.push(vec![top, upper(i), lower(i), upper(i + 1)]);
        values.push(i as u32 * 2 + 1);
        faces.push(vec![bottom, lower(i + 1), upper(i + 1), lower(i)]);
        values.push(i as u32 * 2 + 2);
    }
    build_polyhedron(&vertices, &faces, &values)
}

/// Dodecahedron as the dual of the icosahedron: one pentagon per icosahedron
/// vertex, cornered at the centroids of the five triangles around it.
pub fn create_d12(radius: f32) -> DieGeometry {
    let ico = icosahedron_vertices();
    let ico_faces = icosahedron_faces();

    let vertices: Vec<Vec3> = ico_faces
        .iter()
        .map(|f| (ico[f[0]] + ico[f[1]] + ico[f[2]]) / 3.0)
        .collect();
    let vertices = with_circumradius(vertices, radius);

    let faces: Vec<Vec<usize>> = ico
        .iter()
        .enumerate()
        .map(|(corner, axis)| {
            let axis = axis.normalize();
            let u = axis.any_orthonormal_vector();
            let w = axis.cross(u);
            let mut around: Vec<usize> = ico_faces
                .iter()
                .enumerate()
                .filter(|(_, f)| f.contains(&corner))
                .map(|(i, _)| i)
                .collect();
            around.sort_by(|&a, &b| {
                let angle = |i: usize| vertices[i].dot(w).atan2(vertices[i].dot(u));
                angle(a).total_cmp(&angle(b))
            });
            around
        })
        .collect();

    build_polyhedron(&vertices, &faces, &numbered(12))
}

pub fn create_d20(radius: f32) -> DieGeometry {
    let vertices = with_circumradius(icosahedron_vertices(), radius);
    let faces: Vec<Vec<usize>> = icosahedron_faces().iter().map(|f| f.to_vec()).collect();
    build_polyhedron(&vertices, &faces, &numbered(20))
}

fn icosahedron_vertices() -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 1.0, PHI),
        Vec3::new(0.0, -1.0, PHI),
        Vec3::new(0.0, 1.0, -PHI),
        Vec3::new(0.0, -1.0, -PHI),
        Vec3::new(1.0, PHI, 0.0),
        Vec3::new(-1.0, PHI, 0.0),
        Vec3::new(1.0, -PHI, 0.0),
        Vec3::new(-1.0, -PHI, 0.0),
        Vec3::new(PHI, 0.0, 1.0),
        Vec3::new(-PHI, 0.0, 1.0),
        Vec3::new(PHI, 0.0, -1.0),
        Vec3::new(-PHI, 0.0, -1.0),
    ]
}

fn icosahedron_faces() -> [[usize; 3]; 20] {
    [
        [0, 1, 8],
        [0, 8, 4],
        [0, 4, 5],
        [0, 5, 9],
        [0, 9, 1],
        [1, 6, 8],
        [8, 6, 10],
        [8, 10, 4],
        [4, 10, 2],
        [4, 2, 5],
        [5, 2, 11],
        [5, 11, 9],
        [9, 11, 7],
        [9, 7, 1],
        [1, 7, 6],
        [3, 6, 7],
        [3, 10, 6],
        [3, 2, 10],
        [3, 11, 2],
        [3, 7, 11],
    ]
}
