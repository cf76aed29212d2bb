//! End-to-end lifecycle tests driven entirely through the public engine
//! API: print, develop, drag, delete, export.

use polabooth::{
    BoothConfig, BoothError, CardState, HitTarget, PhotoBooth, Point, Size, SourceImage,
    StyleCatalog, StyleRef, DROP_DISTANCE, EMISSION_DROP_PX,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn booth() -> PhotoBooth<StyleCatalog> {
    init_tracing();
    let config = BoothConfig {
        viewport: Size::new(1280.0, 800.0),
        seed: Some(99),
    };
    PhotoBooth::new(config, StyleCatalog::new()).unwrap()
}

fn landscape() -> SourceImage {
    SourceImage::new("data:image/png;base64,AAAA", 400.0, 300.0)
}

#[test]
fn full_lifecycle_print_develop_delete() {
    let mut b = booth();
    b.attach_camera(400.0, 60.0, 200.0, 260.0);

    let id = b.print(0.0, &landscape(), "beach day", &StyleRef::builtin("kraft")).unwrap();
    assert_eq!(b.card(id).unwrap().state, CardState::Ejecting);

    // Mid-ejection: visible, still behind the development overlay.
    b.tick(700.0).unwrap();
    let card = b.card(id).unwrap();
    assert_eq!(card.state, CardState::Ejecting);
    assert_eq!(card.presentation.pose.opacity, 1.0);
    assert_eq!(card.presentation.overlay_opacity, 1.0);

    b.tick(1400.0).unwrap();
    assert_eq!(b.card(id).unwrap().state, CardState::Developed);

    b.click(1500.0, HitTarget::DeleteButton(id)).unwrap();
    let card = b.card(id).unwrap();
    assert_eq!(card.state, CardState::Tearing);
    assert!(card.presentation.clip_path.is_some());
    assert!(card.active_tear().is_some());

    // Mid-tear the halves drift apart; at the end the card is reaped.
    b.tick(1900.0).unwrap();
    assert!(b.card(id).unwrap().presentation.pose.translate.x < 0.0);
    b.tick(2300.0).unwrap();
    assert!(b.card(id).is_none());
    assert!(b.is_empty());
}

#[test]
fn cards_animate_independently() {
    let mut b = booth();
    let first = b.print(0.0, &landscape(), "one", &StyleRef::builtin("dots")).unwrap();
    let second = b.print(1000.0, &landscape(), "two", &StyleRef::builtin("grid")).unwrap();

    b.tick(1400.0).unwrap();
    assert_eq!(b.card(first).unwrap().state, CardState::Developed);
    assert_eq!(b.card(second).unwrap().state, CardState::Ejecting);

    b.tick(2400.0).unwrap();
    assert_eq!(b.card(second).unwrap().state, CardState::Developed);
    assert_eq!(b.len(), 2);
}

#[test]
fn developed_card_rests_below_the_camera_slot() {
    let mut b = booth();
    b.attach_camera(400.0, 60.0, 200.0, 260.0);
    let anchor = b.emission_anchor();
    assert_eq!(anchor, Point::new(500.0, 60.0 + EMISSION_DROP_PX));

    let id = b.print(0.0, &landscape(), "", &StyleRef::builtin("white")).unwrap();
    b.tick(1400.0).unwrap();
    let card = b.card(id).unwrap();
    assert_eq!(card.presentation.top, anchor.y + DROP_DISTANCE);
}

#[test]
fn drag_moves_a_developed_card_and_suppresses_the_click() {
    let mut b = booth();
    let id = b.print(0.0, &landscape(), "", &StyleRef::builtin("white")).unwrap();
    b.tick(1400.0).unwrap();
    let before = b.card(id).unwrap().position();

    b.pointer_down(HitTarget::Card(id), Point::new(600.0, 600.0));
    b.pointer_move(Point::new(680.0, 560.0));
    b.pointer_up();

    let after = b.card(id).unwrap().position();
    assert_eq!(after.x, before.x + 80.0);
    assert_eq!(after.y, before.y - 40.0);

    // The click that ends this drag must not tear the card.
    b.click(2000.0, HitTarget::DeleteButton(id)).unwrap();
    assert_eq!(b.card(id).unwrap().state, CardState::Developed);

    // A clean click afterwards does.
    b.click(2100.0, HitTarget::DeleteButton(id)).unwrap();
    assert_eq!(b.card(id).unwrap().state, CardState::Tearing);
}

#[test]
fn grabbing_the_delete_affordance_never_drags() {
    let mut b = booth();
    let id = b.print(0.0, &landscape(), "", &StyleRef::builtin("white")).unwrap();
    b.tick(1400.0).unwrap();
    let before = b.card(id).unwrap().position();

    b.pointer_down(HitTarget::DeleteButton(id), Point::new(600.0, 600.0));
    b.pointer_move(Point::new(700.0, 700.0));
    b.pointer_up();
    assert_eq!(b.card(id).unwrap().position(), before);
}

#[test]
fn dragging_the_camera_moves_the_emission_anchor() {
    let mut b = booth();
    b.attach_camera(400.0, 60.0, 200.0, 260.0);

    b.pointer_down(HitTarget::Camera, Point::new(450.0, 100.0));
    b.pointer_move(Point::new(480.0, 150.0));
    b.pointer_up();

    let camera = b.camera().unwrap();
    assert_eq!(camera.left, 430.0);
    assert_eq!(camera.top, 110.0);
    assert_eq!(b.emission_anchor(), Point::new(530.0, 110.0 + EMISSION_DROP_PX));
}

#[test]
fn tearing_card_is_inert_and_a_second_delete_is_harmless() {
    let mut b = booth();
    let id = b.print(0.0, &landscape(), "", &StyleRef::builtin("white")).unwrap();
    b.tick(1400.0).unwrap();
    b.delete_card(1500.0, id).unwrap();
    let clip = b.card(id).unwrap().presentation.clip_path.clone();

    b.delete_card(1600.0, id).unwrap();
    assert_eq!(b.card(id).unwrap().presentation.clip_path, clip);

    let before = b.card(id).unwrap().position();
    b.pointer_down(HitTarget::Card(id), Point::new(0.0, 0.0));
    b.pointer_move(Point::new(300.0, 300.0));
    b.pointer_up();
    assert_eq!(b.card(id).unwrap().position(), before);
}

#[test]
fn deleting_an_unknown_card_is_a_no_op() {
    let mut b = booth();
    let id = b.print(0.0, &landscape(), "", &StyleRef::builtin("white")).unwrap();
    b.delete_card(0.0, polabooth::CardId(999)).unwrap();
    assert!(b.card(id).is_some());
}

#[test]
fn custom_texture_flows_through_to_the_markup() {
    let mut catalog = StyleCatalog::new();
    let style = catalog.register_texture("data:image/jpeg;base64,TEX");
    let mut b = PhotoBooth::new(
        BoothConfig {
            seed: Some(1),
            ..BoothConfig::default()
        },
        catalog,
    )
    .unwrap();

    let id = b.print(0.0, &landscape(), "custom", &style).unwrap();
    let svg = &b.card(id).unwrap().svg;
    assert!(svg.contains("data:image/jpeg;base64,TEX"));
}

#[test]
fn export_renders_at_natural_size_without_the_overlay() {
    let mut b = booth();
    let id = b
        .print(0.0, &landscape(), "a & b <c>", &StyleRef::builtin("stars"))
        .unwrap();
    let svg = b.export_svg(id).unwrap();
    assert!(svg.contains(r#"width="350""#));
    assert!(svg.contains(r#"height="330""#));
    assert!(svg.contains("a &amp; b &lt;c&gt;"));
    assert!(b.export_svg(polabooth::CardId(42)).is_none());
}

#[test]
fn print_rejects_bad_dimensions_up_front() {
    let mut b = booth();
    let err = b
        .print(0.0, &SourceImage::new("x", -3.0, 100.0), "", &StyleRef::builtin("white"))
        .unwrap_err();
    assert!(matches!(err, BoothError::InvalidImageDimensions { .. }));
    assert!(b.is_empty());
}

#[test]
fn seeded_booths_produce_identical_tilts() {
    let run = |seed| {
        let mut b = PhotoBooth::new(
            BoothConfig {
                seed: Some(seed),
                ..BoothConfig::default()
            },
            StyleCatalog::new(),
        )
        .unwrap();
        let id = b.print(0.0, &landscape(), "", &StyleRef::builtin("white")).unwrap();
        b.card(id).unwrap().rotation_deg
    };
    assert_eq!(run(7), run(7));
    assert_ne!(run(7), run(8));
}
