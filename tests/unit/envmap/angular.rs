use super::*;

fn constant_probe(size: u32, rgba: [f32; 4]) -> TextureRecord {
    let mut texels = Vec::with_capacity((size * size * 4) as usize);
    for _ in 0..size * size {
        texels.extend_from_slice(&rgba);
    }
    TextureRecord::from_rgba(size, size, texels).unwrap()
}

#[test]
fn constant_probe_reprojects_to_constant_output() {
    let probe = constant_probe(7, [0.25, 0.5, 0.75, 0.125]);
    let map = angular_to_longlat(&probe, 16, 8).unwrap();

    assert_eq!((map.width(), map.height()), (16, 8));
    for px in map.texels().chunks_exact(4) {
        // alpha is forced to 1.0 regardless of the probe's alpha
        assert_eq!(px, &[0.25, 0.5, 0.75, 1.0][..]);
    }
}

#[test]
fn pole_rows_stay_finite() {
    let probe = constant_probe(9, [0.5; 4]);
    let map = angular_to_longlat(&probe, 12, 6).unwrap();

    for j in [0, 5] {
        for i in 0..12 {
            let px = map.texel(i, j);
            assert!(px.iter().all(|c| c.is_finite()));
        }
    }
}

#[test]
fn single_texel_probe_never_reads_out_of_bounds() {
    let probe = constant_probe(1, [0.125; 4]);
    let map = angular_to_longlat(&probe, 5, 3).unwrap();
    assert_eq!(map.texel(0, 0), [0.125, 0.125, 0.125, 1.0]);
    assert_eq!(map.texel(4, 2), [0.125, 0.125, 0.125, 1.0]);
}

#[test]
fn forward_direction_samples_the_probe_center() {
    let mut texels = vec![0.0f32; 4 * 4 * 4];
    let idx = 4 * (2 * 4 + 2);
    texels[idx..idx + 4].copy_from_slice(&[1.0, 0.5, 0.25, 1.0]);
    let probe = TextureRecord::from_rgba(4, 4, texels).unwrap();

    // dst (1, 1) of a 4x2 map is u = 0.25, v = 0.5: theta = pi/2, phi = pi/2,
    // the +z direction, which lands on the probe center.
    let map = angular_to_longlat(&probe, 4, 2).unwrap();
    assert_eq!(map.texel(1, 1), [1.0, 0.5, 0.25, 1.0]);
}

#[test]
fn zero_output_dimensions_are_rejected() {
    let probe = constant_probe(2, [0.0; 4]);
    assert!(angular_to_longlat(&probe, 0, 4).is_err());
    assert!(angular_to_longlat(&probe, 4, 0).is_err());
}
