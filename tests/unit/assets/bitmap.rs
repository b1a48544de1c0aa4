use super::*;

#[test]
fn rejects_empty_and_mismatched_buffers() {
    assert!(Bitmap::from_rgba8(0, 1, vec![]).is_err());
    assert!(Bitmap::from_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(Bitmap::from_rgba8(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn pixel_lookup_is_row_major() {
    let bytes = vec![
        1, 2, 3, 4, //
        5, 6, 7, 8, //
        9, 10, 11, 12, //
        13, 14, 15, 16,
    ];
    let bmp = Bitmap::from_rgba8(2, 2, bytes).unwrap();
    assert_eq!(bmp.pixel(1, 0), Some([5, 6, 7, 8]));
    assert_eq!(bmp.pixel(0, 1), Some([9, 10, 11, 12]));
    assert_eq!(bmp.pixel(2, 0), None);
    assert_eq!(bmp.pixels().count(), 4);
}

#[test]
fn gradient_spans_endpoints() {
    let g = Bitmap::vertical_gradient(Rgb8::from_hex(0x021427), Rgb8::from_hex(0x08254f), 16);
    assert_eq!((g.width(), g.height()), (1, 16));
    assert_eq!(g.pixel(0, 0), Some([0x02, 0x14, 0x27, 255]));
    assert_eq!(g.pixel(0, 15), Some([0x08, 0x25, 0x4f, 255]));
}

#[test]
fn resized_has_requested_size_and_keeps_solid_color() {
    let bmp = Bitmap::from_rgba8(3, 5, [10u8, 20, 30, 255].repeat(15)).unwrap();
    let r = bmp.resized(80, 80);
    assert_eq!((r.width(), r.height()), (80, 80));
    assert!(r.pixels().all(|px| px == [10, 20, 30, 255]));
    assert!((bmp.aspect_ratio() - 0.6).abs() < 1e-9);
}

#[test]
fn resizing_keeps_transparent_color_out_of_edges() {
    // Left half opaque red, right half fully transparent green.
    let mut bytes = Vec::new();
    for _ in 0..8 {
        for x in 0..8 {
            let px = if x < 4 { [200, 0, 0, 255] } else { [0, 255, 0, 0] };
            bytes.extend_from_slice(&px);
        }
    }
    let bmp = Bitmap::from_rgba8(8, 8, bytes).unwrap();
    let r = bmp.resized(3, 3);
    assert!(r.pixels().all(|px| px[1] == 0), "{:?}", r.rgba8());
    assert!(r.pixels().any(|px| px[3] > 0 && px[3] < 255));
}
