use tessera_engine::gfx::{ColorVertex, TexVertex};

/// Pentagon corners A..E, counter-clockwise.
const CORNERS: [[f32; 3]; 5] = [
    [-0.0868241, 0.49240386, 0.0],
    [-0.49513406, 0.06958647, 0.0],
    [-0.21918549, -0.44939706, 0.0],
    [0.35966998, -0.3473291, 0.0],
    [0.44147372, 0.2347359, 0.0],
];

/// Texture coordinates for A..E; V grows downward.
const TEX_COORDS: [[f32; 2]; 5] = [
    [0.4131759, 0.00759614],
    [0.0048659444, 0.43041354],
    [0.28081453, 0.949397],
    [0.85967, 0.84732914],
    [0.9414737, 0.2652641],
];

/// Three triangles fanned around E.
pub const INDICES: [u16; 9] = [0, 1, 4, 1, 2, 4, 2, 3, 4];

pub fn colored() -> [ColorVertex; 5] {
    CORNERS.map(|position| ColorVertex {
        position,
        color: [0.5, 0.0, 0.5],
    })
}

pub fn textured() -> [TexVertex; 5] {
    let mut out = [TexVertex {
        position: [0.0; 3],
        tex_coords: [0.0; 2],
    }; 5];
    for (v, (position, tex_coords)) in out.iter_mut().zip(CORNERS.into_iter().zip(TEX_COORDS)) {
        *v = TexVertex { position, tex_coords };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_area(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> f32 {
        (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])
    }

    #[test]
    fn triangles_are_counter_clockwise() {
        for tri in INDICES.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| CORNERS[i as usize]);
            assert!(signed_area(a, b, c) > 0.0, "triangle {tri:?} is clockwise");
        }
    }

    #[test]
    fn textured_vertices_pair_corners_with_uvs() {
        let v = textured();
        assert_eq!(v[2].position, CORNERS[2]);
        assert_eq!(v[2].tex_coords, TEX_COORDS[2]);
        assert!(v.iter().all(|v| v.tex_coords.iter().all(|c| (0.0..=1.0).contains(c))));
    }
}
