use super::*;

#[test]
fn cursor_never_moves_up() {
    let mut c = Cursor::new();
    assert_eq!(c.y(), 0.0);
    assert_eq!(c.advance_to(10.0), 10.0);
    assert_eq!(c.advance_to(-5.0), 10.0);
    assert_eq!(c.advance_to(4.0), 10.0);
    assert_eq!(c.advance_to(25.5), 25.5);
    assert_eq!(c.y(), 25.5);
}

#[test]
fn only_flow_blocks_are_stacked() {
    assert!(!BlockKind::Background.is_stacked());
    assert!(!BlockKind::RightCaption.is_stacked());
    assert!(!BlockKind::Attribution.is_stacked());
    for kind in [
        BlockKind::Cover,
        BlockKind::Title,
        BlockKind::Artist,
        BlockKind::ColorBar,
        BlockKind::Duration,
        BlockKind::Tracklist,
        BlockKind::Footer,
        BlockKind::ReleaseDate,
    ] {
        assert!(kind.is_stacked(), "{kind:?}");
    }
}

#[test]
fn context_follows_variant() {
    let settings = RenderSettings::default();
    let desc: PosterDescription = serde_json::from_str(
        r#"{ "variant": "track", "title": "Something", "artist_names": ["The Beatles"],
             "total_duration_ms": 182000 }"#,
    )
    .unwrap();
    let ctx = RenderContext::new(&desc, &settings);
    assert_eq!(ctx.geometry.pixel_size(), (2550, 3300));
    assert_eq!(ctx.metrics.page_width, 850.0);
    assert_eq!(ctx.metrics.title.base_size, 42.0);
}

#[test]
fn band_keeps_title_space_constant() {
    let settings = RenderSettings::default();
    let desc: PosterDescription = serde_json::from_str(
        r#"{ "variant": "album", "title": "Abbey Road", "artist_names": ["The Beatles"],
             "total_duration_ms": 2832000 }"#,
    )
    .unwrap();
    let ctx = RenderContext::new(&desc, &settings);
    let m = ctx.metrics;
    let reserved = m.title.reserved_height();
    assert!((reserved - 2.0 * 36.0 * 1.15).abs() < 1e-9);
    assert!(reserved >= m.title.base_size * m.title.line_height);
}
