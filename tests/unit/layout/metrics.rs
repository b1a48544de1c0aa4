use super::*;

fn metrics(variant: Variant) -> LayoutMetrics {
    LayoutMetrics::for_geometry(&PosterGeometry::for_variant(variant))
}

#[test]
fn margins_and_radius_scale_with_page_width() {
    let m = metrics(Variant::Album);
    assert!((m.margin - 72.0).abs() < 1e-9);
    assert!((m.corner_radius - 24.0).abs() < 1e-9);
    assert!((m.fallback_cover_height - 1080.0).abs() < 1e-9);
    assert!((m.right_edge() - 1128.0).abs() < 1e-9);

    let t = metrics(Variant::Track);
    assert!((t.margin - 51.0).abs() < 1e-9);
    assert!((t.fallback_cover_height - 660.0).abs() < 1e-9);
}

#[test]
fn text_column_leaves_room_for_the_right_slot() {
    for variant in [Variant::Album, Variant::Track] {
        let m = metrics(variant);
        assert!(m.text_width() > 0.0);
        assert!(
            (m.text_width() + m.slot_gap + m.slot_width - m.content_width()).abs() < 1e-9
        );
    }
}

#[test]
fn album_title_is_larger_than_track_title() {
    let a = metrics(Variant::Album);
    let t = metrics(Variant::Track);
    assert!(a.title.base_size > t.title.base_size);
    assert!(a.title.compact_size < a.title.base_size);
    assert!(t.title.compact_size < t.title.base_size);
}
