//! Flat-shaded convex polyhedra
//!
//! Every die is a convex solid centred on the origin, so a face's outward
//! normal is the direction of its centroid and triangle winding can be fixed
//! up against it.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy_mesh::{Indices, PrimitiveTopology};
use bevy_rapier3d::prelude::*;

/// Mesh, collider, and (outward face normal, face value) pairs.
pub type DieGeometry = (Mesh, Collider, Vec<(Vec3, u32)>);

/// Build a die from its vertices and polygon faces. Each face lists vertex
/// indices in order around its edge; `values[i]` is printed on `faces[i]`.
pub fn build_polyhedron(vertices: &[Vec3], faces: &[Vec<usize>], values: &[u32]) -> DieGeometry {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut face_normals = Vec::with_capacity(faces.len());

    for (face, value) in faces.iter().zip(values) {
        let corners: Vec<Vec3> = face.iter().map(|&i| vertices[i]).collect();
        let centroid = corners.iter().copied().sum::<Vec3>() / corners.len() as f32;
        let outward = centroid.normalize_or_zero();
        face_normals.push((outward, *value));

        // Fan from the first corner.
        for k in 1..corners.len().saturating_sub(1) {
            let (a, mut b, mut c) = (corners[0], corners[k], corners[k + 1]);
            let mut n = (b - a).cross(c - a).normalize_or_zero();
            if n.dot(outward) < 0.0 {
                std::mem::swap(&mut b, &mut c);
                n = -n;
            }
            positions.extend([a.to_array(), b.to_array(), c.to_array()]);
            normals.extend([n.to_array(); 3]);
        }
    }

    let radius = vertices.iter().map(|v| v.length()).fold(0.0_f32, f32::max);
    let collider = Collider::convex_hull(vertices).unwrap_or(Collider::ball(radius));

    let indices: Vec<u32> = (0..positions.len() as u32).collect();
    let uvs: Vec<[f32; 2]> = positions.iter().map(|_| [0.5, 0.5]).collect();

    let mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices));

    (mesh, collider, face_normals)
}

/// Scale vertices so the farthest one sits at `radius`.
pub fn with_circumradius(vertices: Vec<Vec3>, radius: f32) -> Vec<Vec3> {
    let current = vertices.iter().map(|v| v.length()).fold(0.0_f32, f32::max);
    if current <= f32::EPSILON {
        return vertices;
    }
    let k = radius / current;
    vertices.into_iter().map(|v| v * k).collect()
}

/// Value of the face pointing most nearly straight up for a die with the
/// given rotation.
pub fn top_face(face_normals: &[(Vec3, u32)], rotation: Quat) -> Option<u32> {
    face_along(face_normals, rotation, Vec3::Y)
}

/// Value of the face the die is lying on.
pub fn bottom_face(face_normals: &[(Vec3, u32)], rotation: Quat) -> Option<u32> {
    face_along(face_normals, rotation, Vec3::NEG_Y)
}

fn face_along(face_normals: &[(Vec3, u32)], rotation: Quat, direction: Vec3) -> Option<u32> {
    face_normals
        .iter()
        .map(|(normal, value)| ((rotation * *normal).dot(direction), *value))
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, value)| value)
}
