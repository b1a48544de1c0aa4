use super::*;

fn px(raster: &RasterRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * raster.width + x) * 4) as usize;
    [
        raster.data[i],
        raster.data[i + 1],
        raster.data[i + 2],
        raster.data[i + 3],
    ]
}

fn surface(w: u32, h: u32) -> CpuSurface {
    CpuSurface::new(w, h, &FontSet::default()).unwrap()
}

#[test]
fn rejects_oversized_or_empty_surfaces() {
    assert!(CpuSurface::new(70_000, 10, &FontSet::default()).is_err());
    assert!(CpuSurface::new(0, 10, &FontSet::default()).is_err());
}

#[test]
fn fill_rect_respects_logical_scale() {
    let mut s = surface(60, 60);
    s.begin(3.0, 3.0).unwrap();
    s.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Rgb8::new(255, 0, 0))
        .unwrap();
    s.finish().unwrap();

    let out = s.to_rgba8();
    assert_eq!((out.width, out.height), (60, 60));
    assert_eq!(px(&out, 15, 15), [255, 0, 0, 255]);
    assert_eq!(px(&out, 45, 45), [0, 0, 0, 0]);
}

#[test]
fn begin_clears_previous_render() {
    let mut s = surface(8, 8);
    s.begin(1.0, 1.0).unwrap();
    s.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Rgb8::WHITE).unwrap();
    s.finish().unwrap();
    assert_eq!(px(&s.to_rgba8(), 4, 4), [255, 255, 255, 255]);

    s.begin(1.0, 1.0).unwrap();
    s.finish().unwrap();
    assert_eq!(px(&s.to_rgba8(), 4, 4), [0, 0, 0, 0]);
}

#[test]
fn rounded_image_leaves_corners_clear() {
    let img = Bitmap::from_rgba8(4, 4, [0u8, 0, 255, 255].repeat(16)).unwrap();
    let mut s = surface(100, 100);
    s.begin(1.0, 1.0).unwrap();
    s.draw_image(&img, Rect::new(0.0, 0.0, 100.0, 100.0), 30.0)
        .unwrap();
    s.finish().unwrap();

    let out = s.to_rgba8();
    assert_eq!(px(&out, 1, 1)[3], 0);
    assert_eq!(px(&out, 50, 50), [0, 0, 255, 255]);
    assert_eq!(px(&out, 98, 50), [0, 0, 255, 255]);
}

#[test]
fn text_without_fonts_is_a_render_error() {
    let mut s = surface(8, 8);
    s.begin(1.0, 1.0).unwrap();
    assert_eq!(s.text_width("", &FontSpec::regular(10.0)).unwrap(), 0.0);
    let err = s
        .fill_text(
            "x",
            0.0,
            5.0,
            &FontSpec::bold(10.0),
            Rgb8::BLACK,
            TextAlign::Left,
        )
        .unwrap_err();
    assert!(matches!(err, PosterError::Render(_)));
}

#[test]
fn system_font_measurement_grows_with_text() {
    let Ok(fonts) = FontSet::discover(None) else {
        eprintln!("skipping: no system fonts available");
        return;
    };
    let mut s = CpuSurface::new(16, 16, &fonts).unwrap();
    let short = s.text_width("Abbey", &FontSpec::regular(20.0)).unwrap();
    let long = s.text_width("Abbey Road", &FontSpec::regular(20.0)).unwrap();
    let big = s.text_width("Abbey", &FontSpec::regular(40.0)).unwrap();
    assert!(short > 0.0);
    assert!(long > short);
    assert!((big / short - 2.0).abs() < 0.05);
}
