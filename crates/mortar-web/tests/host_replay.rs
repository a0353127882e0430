//! Replays recorded host sessions through the web adapter.

use core::time::Duration;

use mortar_web::{EventJson, HostEvent, PhaseJson, WebGallery, WebOptions};
use pretty_assertions::assert_eq;

const FRAME: Duration = Duration::from_millis(16);

fn items_json(range: std::ops::Range<usize>) -> String {
    let items: Vec<String> = range
        .map(|i| format!(r#"{{"id":"{i}","img":"https://cdn.test/{i}.jpg","height":400}}"#))
        .collect();
    format!(r#"{{"kind":"items","items":[{}]}}"#, items.join(","))
}

fn report_all_square(gallery: &mut WebGallery) {
    for probe in gallery.take_outputs().probes {
        gallery.push_event(HostEvent::ImageLoaded {
            id: probe.id,
            width: 800,
            height: 800,
        });
    }
}

#[test]
fn scroll_session_reveals_in_batches() {
    let mut gallery = WebGallery::new(WebOptions::default()).unwrap();
    gallery
        .push_json(r#"[{"kind":"viewport_resize","width":1280},{"kind":"container_resize","width":1204}]"#)
        .unwrap();
    gallery.push_json(&items_json(0..40)).unwrap();
    gallery.step().unwrap();
    report_all_square(&mut gallery);
    gallery.advance_time(Duration::from_secs(2));
    gallery.step().unwrap();

    let outputs = gallery.take_outputs();
    assert_eq!(outputs.columns, 4);
    assert_eq!(outputs.items.len(), 18);
    assert!(outputs.items.iter().all(|i| i.phase == PhaseJson::Settled));
    let sentinel = outputs.sentinel.expect("sentinel while items remain");
    assert_eq!(sentinel.y, outputs.container_height);

    gallery.push_event(HostEvent::Scroll {
        top: outputs.container_height - 400.0,
        height: 800.0,
    });
    gallery.advance_time(FRAME);
    gallery.step().unwrap();
    let outputs = gallery.take_outputs();
    assert_eq!(outputs.items.len(), 30);
    assert_eq!(
        outputs.events,
        vec![EventJson::BatchRevealed { start: 18, end: 30 }]
    );
    assert_eq!(outputs.probes.len(), 12);
    assert_eq!(outputs.items[18].phase, PhaseJson::Entering);
}

#[test]
fn controlled_session_round_trip() {
    let mut gallery = WebGallery::new(
        WebOptions::from_json_str(r#"{"initialBatchSize":4,"batchSize":4,"hasMore":true}"#)
            .unwrap(),
    )
    .unwrap();
    gallery.push_json(r#"{"kind":"container_resize","width":900}"#).unwrap();
    gallery.push_json(&items_json(0..4)).unwrap();
    gallery.push_json(r#"{"kind":"sentinel_visible"}"#).unwrap();
    gallery.push_json(r#"{"kind":"sentinel_visible"}"#).unwrap();
    gallery.step().unwrap();

    let requests: Vec<EventJson> = gallery
        .take_outputs()
        .events
        .into_iter()
        .filter(|e| matches!(e, EventJson::LoadMoreRequested { .. }))
        .collect();
    assert_eq!(requests, vec![EventJson::LoadMoreRequested { visible: 4 }]);

    // The page fetched the next page and re-sent the full list.
    gallery.push_json(&items_json(0..10)).unwrap();
    gallery.push_json(r#"{"kind":"has_more","value":false}"#).unwrap();
    gallery.step().unwrap();
    let outputs = gallery.take_outputs();
    assert_eq!(outputs.items.len(), 8);
    assert!(outputs.sentinel.is_some());

    gallery.push_json(r#"{"kind":"sentinel_visible"}"#).unwrap();
    gallery.step().unwrap();
    let outputs = gallery.take_outputs();
    assert_eq!(outputs.items.len(), 10);
    assert!(outputs.sentinel.is_none());
}

#[test]
fn click_reports_link_and_hover_scales() {
    let mut gallery = WebGallery::new(WebOptions::default()).unwrap();
    gallery.push_json(r#"{"kind":"container_resize","width":500}"#).unwrap();
    gallery
        .push_json(r#"{"kind":"items","items":[{"id":"a","img":"a.jpg","url":"https://example.com/a"}]}"#)
        .unwrap();
    gallery.step().unwrap();
    gallery.take_outputs();

    gallery.push_json(r#"{"kind":"pointer_enter","id":"a"}"#).unwrap();
    gallery.push_json(r#"{"kind":"click","id":"a"}"#).unwrap();
    gallery.advance_time(Duration::from_secs(1));
    gallery.step().unwrap();

    let outputs = gallery.take_outputs();
    assert_eq!(
        outputs.events,
        vec![EventJson::ItemClicked {
            id: "a".into(),
            index: 0,
            url: Some("https://example.com/a".into()),
        }]
    );
    assert!((outputs.items[0].scale - 0.95).abs() < 1e-4);
}

#[test]
fn new_list_drops_old_image_reports() {
    let mut gallery = WebGallery::new(WebOptions::default()).unwrap();
    gallery.push_json(r#"{"kind":"container_resize","width":1204}"#).unwrap();
    gallery.push_json(&items_json(0..3)).unwrap();
    gallery.step().unwrap();
    gallery.take_outputs();

    // A different list replaces the first before its images report.
    gallery.push_json(&items_json(10..12)).unwrap();
    gallery.push_event(HostEvent::ImageFailed { id: "0".into() });
    gallery.step().unwrap();
    let outputs = gallery.take_outputs();
    assert_eq!(outputs.items.len(), 2);
    assert_eq!(outputs.probes.len(), 2);
    assert!(
        outputs
            .events
            .contains(&EventJson::BatchRevealed { start: 0, end: 2 })
    );
}

#[test]
fn outputs_serialize_for_the_page() {
    let mut gallery = WebGallery::new(WebOptions::default()).unwrap();
    gallery.push_json(r#"{"kind":"container_resize","width":1204}"#).unwrap();
    gallery.push_json(&items_json(0..1)).unwrap();
    gallery.step().unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&gallery.take_outputs().to_json_string().unwrap()).unwrap();
    let item = &json["items"][0];
    assert_eq!(item["id"], "0");
    assert_eq!(item["phase"], "entering");
    assert_eq!(item["highPriority"], true);
    assert_eq!(item["rect"]["width"], 292.0);
    assert_eq!(json["probes"][0]["img"], "https://cdn.test/0.jpg");
}
