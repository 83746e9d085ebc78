use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u16(128, 128), 64);
    assert_eq!(mul_div255_u8(255, 1), 1);
}

#[test]
fn unpremultiply_handles_opaque_transparent_and_partial() {
    let mut px = vec![10, 20, 30, 255, 9, 9, 9, 0, 64, 32, 0, 128];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[10, 20, 30, 255]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..12], &[128, 64, 0, 128]);
}

#[test]
fn unpremultiply_clamps_out_of_range_channels() {
    let mut px = vec![200, 0, 0, 100];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![255, 0, 0, 100]);
}
