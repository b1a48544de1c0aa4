use super::*;

#[test]
fn premultiply_matches_rounded_product() {
    let mut px = [100u8, 50, 200, 128];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(
        px,
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
}

#[test]
fn transparent_pixels_zero_their_color() {
    let mut px = [9u8, 9, 9, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, [0, 0, 0, 0]);
}

#[test]
fn unpremultiply_is_identity_for_opaque() {
    let mut px = [12u8, 34, 56, 255, 0, 0, 0, 0];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, [12, 34, 56, 255, 0, 0, 0, 0]);
}

#[test]
fn unpremultiply_roughly_inverts_premultiply() {
    let mut px = [200u8, 100, 40, 200];
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    assert!((i16::from(px[0]) - 200).abs() <= 1);
    assert!((i16::from(px[1]) - 100).abs() <= 1);
    assert!((i16::from(px[2]) - 40).abs() <= 1);
    assert_eq!(px[3], 200);
}
