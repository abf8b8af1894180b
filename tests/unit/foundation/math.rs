use super::*;

#[test]
fn mul_div255_endpoints() {
    assert_eq!(mul_div255(255, 255), 255);
    assert_eq!(mul_div255(0, 255), 0);
    assert_eq!(mul_div255(200, 0), 0);
    assert_eq!(mul_div255(100, 128), ((100u16 * 128 + 127) / 255) as u8);
}

#[test]
fn premultiply_zeroes_transparent_pixels() {
    let mut px = vec![200u8, 100, 50, 0, 10, 20, 30, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0, 10, 20, 30, 255]);
}

#[test]
fn opaque_pixels_survive_premul_roundtrip() {
    let src = vec![1u8, 2, 3, 255, 250, 128, 7, 255];
    let mut px = src.clone();
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, src);
}

#[test]
fn unpremultiply_half_alpha_is_close() {
    let mut px = vec![100u8, 50, 200, 128];
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    for (got, want) in px[..3].iter().zip([100u8, 50, 200]) {
        assert!((i16::from(*got) - i16::from(want)).abs() <= 1);
    }
    assert_eq!(px[3], 128);
}
