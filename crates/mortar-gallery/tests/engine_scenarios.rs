//! End-to-end gallery scenarios driven through the public engine API.

use std::time::Duration;

use mortar_gallery::{
    Dimensions, GalleryItem, ImageState, LoadMode, MasonryConfig, MasonryEngine, MasonryEvent,
    MotionPhase, ProbeOutcome,
};
use mortar_layout::Rect;

const SETTLE: Duration = Duration::from_secs(2);

fn photos(range: std::ops::Range<usize>) -> Vec<GalleryItem> {
    range
        .map(|i| GalleryItem::new(format!("photo-{i}"), format!("https://cdn.test/{i}.jpg")))
        .collect()
}

/// Place pending items, then resolve their probes as square images.
fn resolve_square(engine: &mut MasonryEngine) {
    engine.update();
    for request in engine.take_probe_requests() {
        engine.complete_probe(&request.ticket, ProbeOutcome::Loaded(Dimensions::new(500, 500)));
    }
    engine.update();
}

fn slots(engine: &MasonryEngine) -> Vec<Rect> {
    engine.placed_items().iter().map(|p| p.slot).collect()
}

#[test]
fn forty_square_photos_in_four_columns() {
    let mut engine = MasonryEngine::default();
    engine.set_container_width(1204.0);
    engine.set_items(photos(0..40));
    engine.update();
    resolve_square(&mut engine);

    assert_eq!(engine.columns(), 4);
    assert_eq!(engine.layout().column_width(), 292.0);

    let placed = engine.placed_items();
    assert_eq!(placed.len(), 18);
    let columns: Vec<usize> = placed.iter().take(5).map(|p| p.column).collect();
    assert_eq!(columns, vec![0, 1, 2, 3, 0]);
    assert_eq!(placed[4].slot, Rect::new(0.0, 304.0, 292.0, 292.0));
    assert!(engine.sentinel().is_some());

    // Scroll to the bottom twice: 19-30, then 31-40.
    let first_batch = slots(&engine);
    assert!(engine.observe_viewport(engine.content_height(), 800.0));
    resolve_square(&mut engine);
    assert_eq!(engine.visible_count(), 30);
    assert_eq!(&slots(&engine)[..18], &first_batch[..]);

    let second_batch = slots(&engine);
    assert!(engine.observe_viewport(engine.content_height(), 800.0));
    resolve_square(&mut engine);
    assert_eq!(engine.visible_count(), 40);
    assert_eq!(&slots(&engine)[..30], &second_batch[..]);

    assert!(!engine.has_more());
    assert!(engine.sentinel().is_none());
    assert!(!engine.sentinel_entered());

    let revealed: Vec<MasonryEvent> = engine
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, MasonryEvent::BatchRevealed { .. }))
        .collect();
    assert_eq!(
        revealed,
        vec![
            MasonryEvent::BatchRevealed { start: 0, end: 18 },
            MasonryEvent::BatchRevealed { start: 18, end: 30 },
            MasonryEvent::BatchRevealed { start: 30, end: 40 },
        ]
    );
}

#[test]
fn distant_sentinel_does_not_reveal() {
    let mut engine = MasonryEngine::default();
    engine.set_container_width(1204.0);
    engine.set_items(photos(0..40));
    assert!(!engine.observe_viewport(0.0, 100.0));
    assert_eq!(engine.visible_count(), 18);
}

#[test]
fn resize_moves_settled_items_without_reentering() {
    let mut engine = MasonryEngine::default();
    engine.set_container_width(1204.0);
    engine.set_items(photos(0..12));
    engine.tick(SETTLE);
    engine.tick(SETTLE);
    assert!(
        engine
            .placed_items()
            .iter()
            .all(|p| p.phase == MotionPhase::Settled)
    );

    engine.set_container_width(700.0);
    assert_eq!(engine.columns(), 3);
    engine.tick(Duration::from_millis(300));

    let placed = engine.placed_items();
    assert!(placed.iter().any(|p| p.phase == MotionPhase::Moving));
    for p in &placed {
        assert_eq!(p.style.opacity, 1.0);
        assert_eq!(p.style.blur, 0.0);
        assert_ne!(p.phase, MotionPhase::Entering);
    }

    engine.tick(Duration::from_millis(350));
    assert!(!engine.is_animating());
    for p in engine.placed_items() {
        assert_eq!(p.style.rect, p.slot);
    }
    assert!(
        engine
            .drain_events()
            .contains(&MasonryEvent::ColumnsChanged { from: 4, to: 3 })
    );
}

#[test]
fn resize_during_entrance_retargets() {
    let mut engine = MasonryEngine::default();
    engine.set_container_width(1204.0);
    engine.set_items(photos(0..4));
    engine.tick(Duration::from_millis(300));
    assert_eq!(engine.phase("photo-0"), Some(MotionPhase::Entering));

    engine.set_container_width(1600.0);
    engine.tick(Duration::from_millis(16));
    assert_eq!(engine.phase("photo-0"), Some(MotionPhase::Entering));

    engine.tick(SETTLE);
    let first = engine.placed_items()[0];
    assert_eq!(first.phase, MotionPhase::Settled);
    assert_eq!(first.style.rect, first.slot);
    assert_eq!(first.slot.width, engine.layout().column_width());
}

#[test]
fn failed_image_keeps_its_slot() {
    let mut engine = MasonryEngine::default();
    engine.set_container_width(1000.0);
    engine.set_items(photos(0..8));
    engine.update();
    let before = slots(&engine);

    let requests = engine.take_probe_requests();
    assert_eq!(requests.len(), 8);
    assert_eq!(requests[2].source, "https://cdn.test/2.jpg");
    engine.complete_probe(&requests[2].ticket, ProbeOutcome::Failed);
    engine.update();

    assert_eq!(slots(&engine), before);
    assert_eq!(engine.image_state("photo-2"), Some(ImageState::Failed));
    assert_eq!(engine.image_state("photo-3"), Some(ImageState::Loading));
    // A second answer for the same probe is ignored.
    assert!(!engine.complete_probe(
        &requests[2].ticket,
        ProbeOutcome::Loaded(Dimensions::new(10, 40))
    ));
}

#[test]
fn controlled_mode_requests_once_until_answered() {
    let config = MasonryConfig::default()
        .batches(4, 2)
        .load_mode(LoadMode::Controlled { has_more: true });
    let mut engine = MasonryEngine::new(config).expect("valid config");
    engine.set_container_width(1204.0);
    engine.set_items(photos(0..4));

    assert!(engine.observe_viewport(0.0, 10_000.0));
    assert!(engine.is_load_pending());
    assert!(!engine.observe_viewport(0.0, 10_000.0));
    let requests: Vec<MasonryEvent> = engine
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, MasonryEvent::LoadMoreRequested { .. }))
        .collect();
    assert_eq!(requests, vec![MasonryEvent::LoadMoreRequested { visible: 4 }]);

    // Appending answers the request and reveals the next batch at once.
    engine.set_items(photos(0..7));
    assert!(!engine.is_load_pending());
    assert_eq!(engine.visible_count(), 6);

    assert!(engine.observe_viewport(0.0, 10_000.0));
    assert_eq!(engine.visible_count(), 7);
    engine.set_has_more(false);
    engine.update();
    assert!(!engine.has_more());
    assert!(engine.sentinel().is_none());
}

#[test]
fn finish_load_more_allows_another_request() {
    let config = MasonryConfig::default()
        .batches(2, 2)
        .load_mode(LoadMode::Controlled { has_more: true });
    let mut engine = MasonryEngine::new(config).expect("valid config");
    engine.set_container_width(800.0);
    assert!(engine.sentinel_entered());
    assert!(!engine.sentinel_entered());
    engine.finish_load_more();
    assert!(engine.sentinel_entered());
}

#[test]
fn replacing_the_list_starts_over() {
    let mut engine = MasonryEngine::default();
    engine.set_container_width(1204.0);
    engine.set_items(photos(0..30));
    engine.sentinel_entered();
    engine.tick(SETTLE);
    assert_eq!(engine.visible_count(), 30);
    let session = engine.session();

    engine.set_items(photos(100..130));
    engine.update();
    assert_ne!(engine.session(), session);
    assert_eq!(engine.visible_count(), 18);
    assert!(
        engine
            .placed_items()
            .iter()
            .all(|p| p.phase == MotionPhase::Entering)
    );
}

#[test]
fn appending_keeps_animation_state() {
    let mut engine = MasonryEngine::default();
    engine.set_container_width(1204.0);
    engine.set_items(photos(0..6));
    engine.tick(SETTLE);
    let session = engine.session();

    engine.set_items(photos(0..10));
    engine.update();
    assert_eq!(engine.session(), session);
    assert_eq!(engine.phase("photo-0"), Some(MotionPhase::Settled));
    assert_eq!(engine.phase("photo-9"), Some(MotionPhase::Entering));
}

#[test]
fn prepending_keeps_shown_items_settled() {
    let mut engine = MasonryEngine::default();
    engine.set_container_width(1204.0);
    engine.set_items(photos(0..3));
    engine.tick(SETTLE);
    engine.drain_events();
    let session = engine.session();

    let mut list = vec![GalleryItem::new("newest", "https://cdn.test/newest.jpg")];
    list.extend(photos(0..3));
    engine.set_items(list);
    engine.update();

    assert_eq!(engine.session(), session);
    assert_eq!(engine.phase("newest"), Some(MotionPhase::Entering));
    for id in ["photo-0", "photo-1", "photo-2"] {
        assert_eq!(engine.phase(id), Some(MotionPhase::Moving), "{id}");
        let style = engine.item_style(id).expect("placed");
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.blur, 0.0);
    }
    assert_eq!(
        engine.drain_events(),
        vec![MasonryEvent::BatchRevealed { start: 0, end: 1 }]
    );

    engine.tick(SETTLE);
    assert_eq!(engine.phase("photo-0"), Some(MotionPhase::Settled));
}

#[test]
fn removing_an_item_moves_its_neighbours() {
    let mut engine = MasonryEngine::default();
    engine.set_container_width(1204.0);
    engine.set_items(photos(0..3));
    engine.tick(SETTLE);

    let mut list = photos(0..3);
    list.remove(1);
    engine.set_items(list);
    engine.update();

    assert_eq!(engine.total_count(), 2);
    assert_eq!(engine.phase("photo-1"), None);
    assert_eq!(engine.phase("photo-0"), Some(MotionPhase::Settled));
    assert_eq!(engine.phase("photo-2"), Some(MotionPhase::Moving));
    let style = engine.item_style("photo-2").expect("placed");
    assert_eq!(style.opacity, 1.0);
    assert_eq!(style.blur, 0.0);
    assert_eq!(slots(&engine)[1].x, 304.0);
}

#[test]
fn prepending_keeps_the_last_shown_item_visible() {
    let mut engine = MasonryEngine::default();
    engine.set_container_width(1204.0);
    engine.set_items(photos(0..40));
    engine.tick(SETTLE);
    assert_eq!(engine.visible_count(), 18);

    let mut list = vec![GalleryItem::new("newest", "https://cdn.test/newest.jpg")];
    list.extend(photos(0..40));
    engine.set_items(list);
    engine.update();

    assert_eq!(engine.visible_count(), 19);
    assert_ne!(engine.phase("photo-17"), Some(MotionPhase::Entering));
    assert_eq!(engine.phase("photo-18"), Some(MotionPhase::Unseen));
}

#[test]
fn huge_batch_size_reveals_everything() {
    let mut engine = MasonryEngine::new(MasonryConfig::default().batches(2, usize::MAX))
        .expect("valid config");
    engine.set_container_width(1204.0);
    engine.set_items(photos(0..10));
    engine.update();
    assert!(engine.sentinel_entered());
    engine.update();
    assert_eq!(engine.visible_count(), 10);
    assert!(!engine.has_more());
}

#[test]
fn hover_scales_placed_items_only() {
    let mut engine = MasonryEngine::new(MasonryConfig::default().color_shift_on_hover(true))
        .expect("valid config");
    engine.set_container_width(1204.0);
    engine.set_items(photos(0..30));
    engine.tick(SETTLE);

    assert!(engine.pointer_enter("photo-1"));
    assert!(!engine.pointer_enter("photo-25"));
    engine.tick(Duration::from_millis(300));
    let style = engine.item_style("photo-1").expect("placed");
    assert!((style.scale - 0.95).abs() < 1e-4);
    assert!((style.overlay_opacity - 0.3).abs() < 1e-4);

    engine.pointer_leave("photo-1");
    engine.tick(Duration::from_millis(300));
    let style = engine.item_style("photo-1").expect("placed");
    assert!((style.scale - 1.0).abs() < 1e-4);
}

#[test]
fn load_hints_follow_position() {
    let mut engine = MasonryEngine::default();
    engine.set_container_width(1204.0);
    engine.set_items(photos(0..40));
    engine.sentinel_entered();
    engine.update();
    let placed = engine.placed_items();
    assert!(placed[11].load.high_priority);
    assert!(!placed[12].load.high_priority);
    assert!(placed[19].load.eager);
    assert!(!placed[20].load.eager);
}
