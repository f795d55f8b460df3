use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::dice3d::types::D6_FACES;

/// Pip spacing relative to the die's edge length.
const PIP_OFFSET: f32 = 0.25;

/// Pip radius relative to the die's edge length.
pub const PIP_RADIUS: f32 = 0.075;

pub fn create_d6(size: f32) -> (Mesh, Collider) {
    let half = size / 2.0;
    let mesh = Mesh::from(Cuboid::new(size, size, size));
    let collider = Collider::cuboid(half, half, half);
    (mesh, collider)
}

/// Pip layout for a face value in face-local units, each coordinate in
/// {-1, 0, 1}.
pub fn pip_pattern(value: u32) -> &'static [(f32, f32)] {
    match value {
        1 => &[(0.0, 0.0)],
        2 => &[(-1.0, -1.0), (1.0, 1.0)],
        3 => &[(-1.0, -1.0), (0.0, 0.0), (1.0, 1.0)],
        4 => &[(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)],
        5 => &[(-1.0, -1.0), (-1.0, 1.0), (0.0, 0.0), (1.0, -1.0), (1.0, 1.0)],
        6 => &[
            (-1.0, -1.0),
            (-1.0, 0.0),
            (-1.0, 1.0),
            (1.0, -1.0),
            (1.0, 0.0),
            (1.0, 1.0),
        ],
        _ => &[],
    }
}

/// Local positions of every pip on a die of edge `size`, laid out from the
/// same face table the face detector reads, paired with the face value.
///
/// Pips sit slightly inside the face so that only a cap shows.
pub fn d6_pip_positions(size: f32) -> Vec<(Vec3, u32)> {
    let depth = size / 2.0 - size * PIP_RADIUS * 0.4;
    let spacing = size * PIP_OFFSET;

    let mut pips = Vec::new();
    for (normal, value) in D6_FACES {
        let (u, v) = normal.any_orthonormal_pair();
        for (a, b) in pip_pattern(value) {
            let position = normal * depth + u * (a * spacing) + v * (b * spacing);
            pips.push((position, value));
        }
    }
    pips
}
