use super::*;

fn constant_texture(w: u32, h: u32, rgba: [f32; 4]) -> TextureRecord {
    let mut texels = Vec::with_capacity((w * h * 4) as usize);
    for _ in 0..w * h {
        texels.extend_from_slice(&rgba);
    }
    TextureRecord::from_rgba(w, h, texels).unwrap()
}

#[test]
fn constant_color_survives_every_level() {
    let tex = constant_texture(8, 8, [0.25, 0.5, 0.75, 1.0]);
    let pyramid = MipmapPyramid::build(&tex);

    assert_eq!(pyramid.level_count(), 3);
    for level in pyramid.levels() {
        for px in level.texels().chunks_exact(4) {
            assert_eq!(px, &[0.25, 0.5, 0.75, 1.0][..]);
        }
    }

    let coarsest = pyramid.level(2).unwrap();
    assert_eq!((coarsest.width(), coarsest.height()), (2, 2));
}

#[test]
fn bright_texel_averages_to_a_quarter() {
    let mut texels = vec![0.0f32; 4 * 4 * 4];
    let idx = 4 * (2 * 4 + 2);
    texels[idx..idx + 4].copy_from_slice(&[1.0; 4]);
    let tex = TextureRecord::from_rgba(4, 4, texels).unwrap();

    let pyramid = MipmapPyramid::build(&tex);
    let level1 = pyramid.level(1).unwrap();
    assert_eq!(level1.texel(1, 1), [0.25; 4]);
    assert_eq!(level1.texel(0, 0), [0.0; 4]);
    assert_eq!(level1.texel(0, 1), [0.0; 4]);
}

#[test]
fn level_dimensions_halve_from_the_larger_side() {
    let tex = constant_texture(256, 128, [1.0, 0.0, 0.0, 1.0]);
    let pyramid = MipmapPyramid::build(&tex);

    assert_eq!(pyramid.level_count(), 8);
    for (i, level) in pyramid.levels().iter().enumerate() {
        assert_eq!(level.width(), 256 >> i);
        assert_eq!(level.height(), 128 >> i);
    }
}

#[test]
fn one_by_one_keeps_its_single_level() {
    let tex = constant_texture(1, 1, [0.5; 4]);
    let pyramid = MipmapPyramid::build(&tex);
    assert_eq!(pyramid.level_count(), 1);
    assert_eq!(pyramid.level(0).unwrap().texels(), tex.texels());
}

#[test]
fn odd_dimensions_truncate_instead_of_padding() {
    let tex = constant_texture(5, 3, [0.5; 4]);
    let pyramid = MipmapPyramid::build(&tex);

    assert_eq!(pyramid.level_count(), 2);
    let level1 = pyramid.level(1).unwrap();
    assert_eq!((level1.width(), level1.height()), (2, 1));
    for px in level1.texels().chunks_exact(4) {
        assert_eq!(px, &[0.5; 4][..]);
    }
}

#[test]
fn level_zero_copies_rather_than_aliases() {
    let tex = constant_texture(2, 2, [0.5; 4]);
    let pyramid = MipmapPyramid::build(&tex);
    assert_ne!(
        pyramid.level(0).unwrap().texels().as_ptr(),
        tex.texels().as_ptr()
    );
    assert_eq!(pyramid.level(0).unwrap().texels(), tex.texels());
}
