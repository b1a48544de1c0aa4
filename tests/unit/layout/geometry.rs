use super::*;

#[test]
fn album_is_12_by_18_at_300_dpi() {
    let g = PosterGeometry::for_variant(Variant::Album);
    assert_eq!(g.pixel_size(), (3600, 5400));
    assert_eq!((g.width(), g.height()), (1200.0, 1800.0));
    assert_eq!(g.scale(), (3.0, 3.0));
}

#[test]
fn track_is_letter_sized() {
    let g = PosterGeometry::for_variant(Variant::Track);
    assert_eq!(g.pixel_size(), (2550, 3300));
    assert_eq!((g.width(), g.height()), (850.0, 1100.0));
    assert_eq!(g.scale(), (3.0, 3.0));
}
