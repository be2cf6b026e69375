//! Tree mesh synthesis — a trunk cylinder capped by a crown sphere

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::TreeInstance;
use crate::voxel::Mesh;

/// Trunk bark color.
const TRUNK_COLOR: [u8; 3] = [139, 69, 19];

/// Trunk radius in world units.
const TRUNK_RADIUS: f32 = 0.1;

/// Radial segments around the trunk.
const TRUNK_SEGMENTS: u32 = 5;

/// Latitudinal and longitudinal divisions of the crown sphere.
const CROWN_DIVISIONS: u32 = 10;

/// Crown radius as a fraction of trunk height.
const CROWN_RADIUS_FACTOR: f32 = 0.55;

/// Build the mesh for one tree: a bark-colored trunk cylinder with a crown
/// sphere centered at the trunk top.
pub fn build_tree_mesh(tree: &TreeInstance) -> Mesh {
    let mut mesh = cylinder(
        tree.position,
        TRUNK_RADIUS,
        tree.height,
        TRUNK_SEGMENTS,
        TRUNK_COLOR,
    );
    let top = tree.position + Vec3::new(0.0, 0.0, tree.height);
    let crown = sphere(
        top,
        tree.height * CROWN_RADIUS_FACTOR,
        CROWN_DIVISIONS,
        tree.crown_color,
    );
    mesh.append(&crown);
    mesh
}

/// Open-ended cylinder: two vertex rings with quads between them.
fn cylinder(base: Vec3, radius: f32, height: f32, segments: u32, color: [u8; 3]) -> Mesh {
    let mut mesh = Mesh::new();
    for ring in 0..2u32 {
        let z = base.z + ring as f32 * height;
        for s in 0..segments {
            let a = s as f32 / segments as f32 * TAU;
            mesh.push_vertex(
                Vec3::new(base.x + radius * a.cos(), base.y + radius * a.sin(), z),
                color,
            );
        }
    }
    for s in 0..segments {
        let next = (s + 1) % segments;
        mesh.push_face([s, next, segments + next, segments + s]);
    }
    mesh
}

/// UV sphere on a (divisions + 1)^2 vertex grid; pole quads degenerate.
fn sphere(center: Vec3, radius: f32, divisions: u32, color: [u8; 3]) -> Mesh {
    let mut mesh = Mesh::new();
    for lat in 0..=divisions {
        let theta = lat as f32 / divisions as f32 * PI;
        for lon in 0..=divisions {
            let phi = lon as f32 / divisions as f32 * TAU;
            let offset = Vec3::new(
                radius * theta.sin() * phi.cos(),
                radius * theta.sin() * phi.sin(),
                radius * theta.cos(),
            );
            mesh.push_vertex(center + offset, color);
        }
    }
    let stride = divisions + 1;
    for lat in 0..divisions {
        for lon in 0..divisions {
            let a = lat * stride + lon;
            mesh.push_face([a, a + 1, a + stride + 1, a + stride]);
        }
    }
    mesh
}
