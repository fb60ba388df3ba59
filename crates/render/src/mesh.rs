use horizon_common::VertexInput;

/// Corners of the cube [-1, 1]^3. Positions double as lookup directions for
/// the fragment stage, so corners are shared between faces.
#[rustfmt::skip]
pub const SKY_CUBE_VERTICES: [VertexInput; 8] = [
    VertexInput::new(-1.0, -1.0, -1.0), // 0
    VertexInput::new( 1.0, -1.0, -1.0), // 1
    VertexInput::new( 1.0,  1.0, -1.0), // 2
    VertexInput::new(-1.0,  1.0, -1.0), // 3
    VertexInput::new(-1.0, -1.0,  1.0), // 4
    VertexInput::new( 1.0, -1.0,  1.0), // 5
    VertexInput::new( 1.0,  1.0,  1.0), // 6
    VertexInput::new(-1.0,  1.0,  1.0), // 7
];

/// Triangle list, wound counter-clockwise when seen from inside the cube.
#[rustfmt::skip]
pub const SKY_CUBE_INDICES: [u16; 36] = [
    4, 6, 5,  4, 7, 6, // +Z
    1, 2, 3,  1, 3, 0, // -Z
    5, 2, 1,  5, 6, 2, // +X
    0, 3, 7,  0, 7, 4, // -X
    3, 2, 6,  3, 6, 7, // +Y
    0, 5, 1,  0, 4, 5, // -Y
];

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn indices_in_range() {
        assert!(SKY_CUBE_INDICES
            .iter()
            .all(|&i| (i as usize) < SKY_CUBE_VERTICES.len()));
    }

    #[test]
    fn every_corner_is_used() {
        for i in 0..SKY_CUBE_VERTICES.len() as u16 {
            assert!(SKY_CUBE_INDICES.contains(&i), "corner {i} unused");
        }
    }

    #[test]
    fn triangles_face_inward() {
        for tri in SKY_CUBE_INDICES.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| SKY_CUBE_VERTICES[i as usize].position);
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(
                normal.dot(centroid) < 0.0,
                "triangle {tri:?} faces outward"
            );
        }
    }

    #[test]
    fn corners_lie_on_unit_cube() {
        for v in SKY_CUBE_VERTICES {
            assert_eq!(v.position.abs(), Vec3::ONE);
        }
    }
}
