//! Demo textures: one shipped as a PNG, one generated at startup.

use image::{Rgba, RgbaImage};

/// 256x256 checkerboard, 8 cells per side.
pub const CHECKER_PNG: &[u8] = include_bytes!("assets/checker.png");

const SIZE: u32 = 256;

/// Concentric rings fading from `inner` to `outer`.
pub fn rings(size: u32, inner: Rgba<u8>, outer: Rgba<u8>) -> RgbaImage {
    let center = size as f32 / 2.0;
    RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        let t = ((dx * dx + dy * dy).sqrt() / center).min(1.0);
        let band = if ((t * 8.0) as u32) % 2 == 0 { 1.0 } else { 0.8 };
        let mix = |i: usize| ((inner[i] as f32 * (1.0 - t) + outer[i] as f32 * t) * band) as u8;
        Rgba([mix(0), mix(1), mix(2), 255])
    })
}

/// Texture shown while Space is held.
pub fn alternate() -> RgbaImage {
    rings(SIZE, Rgba([250, 200, 60, 255]), Rgba([160, 30, 90, 255]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_engine::gfx::decode_rgba;

    #[test]
    fn checker_asset_decodes_to_alternating_cells() {
        let img = decode_rgba(CHECKER_PNG, "checker.png").unwrap();
        assert_eq!(img.dimensions(), (256, 256));
        assert_eq!(*img.get_pixel(0, 0), Rgba([230, 230, 230, 255]));
        assert_eq!(*img.get_pixel(32, 0), Rgba([40, 90, 160, 255]));
        assert_eq!(*img.get_pixel(32, 32), Rgba([230, 230, 230, 255]));
    }

    #[test]
    fn rings_are_opaque_and_start_from_inner() {
        let img = rings(32, Rgba([200, 100, 50, 255]), Rgba([0, 0, 0, 255]));
        assert!(img.pixels().all(|p| p[3] == 255));
        let c = img.get_pixel(16, 16);
        assert!(c[0] > 150, "center {c:?} should be close to the inner color");
    }

    #[test]
    fn demo_textures_differ() {
        let checker = decode_rgba(CHECKER_PNG, "checker.png").unwrap();
        assert_eq!(checker.dimensions(), alternate().dimensions());
        assert_ne!(checker, alternate());
    }
}
