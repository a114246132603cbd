//! Editing Session Integration Tests
//!
//! Tests whole editing flows through the public API:
//! - Building a page from templates
//! - Drag, duplicate and delete through the canvas engine
//! - Property edits reaching the generated source
//! - Documents loaded from and saved to JSON

use pagecraft_core::mutation;
use pagecraft_core::{
    generate, CanvasEngine, ComponentId, ComponentKind, Document, DocumentError, EventOutcome,
    Field, InputEvent, KeyModifiers, MutationError, Point, PointerEvent,
};

/// Add a component to a document, returning the new document and id.
fn add(doc: &Document, kind: ComponentKind, x: f32, y: f32) -> (Document, ComponentId) {
    let m = mutation::add(doc, kind, Point::new(x, y));
    (m.document, m.id)
}

/// Count non-overlapping occurrences of `needle` in `haystack`.
fn occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

// ============================================================================
// Documented Scenarios
// ============================================================================

#[test]
fn test_add_button_to_empty_document() {
    let (doc, id) = add(&Document::new(), ComponentKind::Button, 10.0, 10.0);

    assert_eq!(doc.len(), 1);
    let button = doc.get(id).expect("button present");
    assert_eq!(button.kind, ComponentKind::Button);
    assert!((button.geometry.x - 10.0).abs() < f32::EPSILON);
    assert!((button.geometry.y - 10.0).abs() < f32::EPSILON);
    assert!((button.geometry.width - 120.0).abs() < f32::EPSILON);
    assert!((button.geometry.height - 40.0).abs() < f32::EPSILON);
    assert_eq!(button.content.as_deref(), Some("Click Me"));
}

#[test]
fn test_text_content_appears_once_in_its_block() {
    let (doc, t1) = add(&Document::new(), ComponentKind::Text, 0.0, 0.0);
    let doc = mutation::set_content(&doc, t1, "Hello")
        .expect("set content")
        .document;

    let out = generate(&doc);
    assert_eq!(occurrences(&out, "Hello"), 1);

    let block_start = out
        .find(&format!("data-component-id=\"{t1}\""))
        .expect("block for t1");
    let block_end = block_start + out[block_start..].find("</p>").expect("block end");
    let hello = out.find("Hello").expect("content");
    assert!(block_start < hello && hello < block_end);
}

#[test]
fn test_overlapping_components_emit_in_order() {
    let (doc, c1) = add(&Document::new(), ComponentKind::Card, 0.0, 0.0);
    let (doc, c2) = add(&doc, ComponentKind::Card, 50.0, 50.0);

    let out = generate(&doc);
    let first = out.find(&c1.to_string()).expect("c1 block");
    let second = out.find(&c2.to_string()).expect("c2 block");
    assert!(first < second);
}

#[test]
fn test_move_missing_id_leaves_document_unchanged() {
    let (doc, _) = add(&Document::new(), ComponentKind::Text, 0.0, 0.0);
    let snapshot = doc.clone();
    let missing = ComponentId::new();

    let err = mutation::move_to(&doc, missing, 0.0, 0.0).unwrap_err();
    assert_eq!(err, MutationError::NotFound(missing));
    assert_eq!(doc, snapshot);
}

// ============================================================================
// Model Properties
// ============================================================================

#[test]
fn test_add_then_remove_restores_document() {
    let (doc, _) = add(&Document::new(), ComponentKind::HeroBlock, 0.0, 64.0);
    let (with_card, card) = add(&doc, ComponentKind::Card, 40.0, 420.0);

    let back = mutation::remove(&with_card, card).expect("remove").document;
    assert_eq!(back, doc);
}

#[test]
fn test_duplicate_is_distinct_copy() {
    let (doc, id) = add(&Document::new(), ComponentKind::Button, 10.0, 10.0);
    let doc = mutation::set_style(&doc, id, "background-color", "#16a34a")
        .expect("style")
        .document;

    let m = mutation::duplicate(&doc, id).expect("duplicate");
    assert_ne!(m.id, id);

    let original = m.document.get(id).expect("original");
    let clone = m.document.get(m.id).expect("clone");
    assert_eq!(clone.style, original.style);
    assert_eq!(clone.content, original.content);
    let dx = clone.geometry.x - original.geometry.x;
    let dy = clone.geometry.y - original.geometry.y;
    assert!((dx - mutation::DUPLICATE_OFFSET).abs() < f32::EPSILON);
    assert!((dy - mutation::DUPLICATE_OFFSET).abs() < f32::EPSILON);
    assert!((clone.geometry.width - original.geometry.width).abs() < f32::EPSILON);
    assert!((clone.geometry.height - original.geometry.height).abs() < f32::EPSILON);
}

// ============================================================================
// Canvas Engine Sessions
// ============================================================================

#[test]
fn test_build_landing_page_session() {
    let mut engine = CanvasEngine::new();

    let nav = engine
        .add_component(ComponentKind::NavigationBar, Point::new(0.0, 0.0))
        .expect("nav");
    let hero = engine
        .add_component(ComponentKind::HeroBlock, Point::new(0.0, 64.0))
        .expect("hero");
    let cta = engine
        .add_named("button", Point::new(40.0, 300.0))
        .expect("cta");
    assert_eq!(engine.selection(), Some(cta));

    // Drag the CTA 100px right.
    engine.handle(&InputEvent::Pointer(PointerEvent::down_on(50.0, 310.0, cta)));
    engine.handle(&InputEvent::Pointer(PointerEvent::move_to(150.0, 310.0)));
    engine.handle(&InputEvent::Pointer(PointerEvent::Up));

    let g = engine.document().get(cta).expect("cta").geometry;
    assert!((g.x - 140.0).abs() < f32::EPSILON);
    assert!((g.y - 300.0).abs() < f32::EPSILON);

    assert_eq!(
        engine.edit(&Field::Content, "Check Price on Amazon"),
        EventOutcome::DocumentChanged
    );
    assert_eq!(
        engine.edit(&"background-color".parse().expect("field"), "#ff9900"),
        EventOutcome::DocumentChanged
    );

    assert_eq!(engine.document().ids(), vec![nav, hero, cta]);

    let out = generate(engine.document());
    assert!(out.contains(">Check Price on Amazon</button>"));
    assert!(out.contains("background-color: #ff9900;"));
    assert!(out.find("<nav").expect("nav") < out.find("<button").expect("button"));
}

#[test]
fn test_duplicate_then_delete_original() {
    let mut engine = CanvasEngine::new();
    let card = engine
        .add_component(ComponentKind::Card, Point::new(100.0, 100.0))
        .expect("card");

    let cmd = KeyModifiers {
        meta: true,
        ..KeyModifiers::default()
    };
    engine.handle(&InputEvent::key_with("d", cmd));
    let clone = engine.selection().expect("clone selected");
    assert_ne!(clone, card);

    engine.select(card);
    engine.handle(&InputEvent::key("Backspace"));
    assert_eq!(engine.selection(), None);
    assert_eq!(engine.document().ids(), vec![clone]);

    // Stale ids from the host are tolerated.
    let outcome = engine.handle(&InputEvent::Pointer(PointerEvent::down_on(0.0, 0.0, card)));
    assert_eq!(outcome, EventOutcome::Ignored);
    assert!(engine.inspector().is_empty());
}

#[test]
fn test_errors_never_stop_the_session() {
    let mut engine = CanvasEngine::new();
    assert!(engine.add_named("countdown-timer", Point::default()).is_none());

    let id = engine
        .add_component(ComponentKind::Text, Point::default())
        .expect("text");
    assert_eq!(engine.edit(&Field::Height, "0"), EventOutcome::Ignored);
    assert_eq!(engine.edit(&Field::Style("a b".into()), "x"), EventOutcome::Ignored);

    // Still fully interactive afterwards.
    engine.handle(&InputEvent::Pointer(PointerEvent::down_on(1.0, 1.0, id)));
    assert_eq!(
        engine.handle(&InputEvent::Pointer(PointerEvent::move_to(11.0, 1.0))),
        EventOutcome::DocumentChanged
    );
}

// ============================================================================
// Persistence Boundary
// ============================================================================

#[test]
fn test_document_survives_json_round_trip_into_new_session() {
    let mut engine = CanvasEngine::new();
    engine.add_component(ComponentKind::Footer, Point::new(0.0, 900.0));
    engine.add_component(ComponentKind::Image, Point::new(40.0, 400.0));
    let json = engine.document().to_json().expect("save");

    let loaded = Document::from_json(&json).expect("load");
    let resumed = CanvasEngine::with_document(loaded);
    assert_eq!(resumed.document(), engine.document());
    assert_eq!(generate(resumed.document()), generate(engine.document()));
    assert_eq!(resumed.selection(), None);
}

#[test]
fn test_saved_document_with_bad_component_is_refused() {
    let (doc, id) = add(&Document::new(), ComponentKind::Text, 0.0, 0.0);
    let json = doc.to_json().expect("save");

    let hostile = json.replacen(
        "\"style\": {",
        "\"style\": {\n      \"x\\\" onmouseover=\\\"alert(1)\": \"red\",",
        1,
    );
    let err = Document::from_json(&hostile).unwrap_err();
    assert!(matches!(
        err,
        DocumentError::InvalidComponent { id: bad, source: MutationError::InvalidStyleKey(_) }
            if bad == id
    ));

    let negative = json.replacen("\"width\": 300.0", "\"width\": -50.0", 1);
    assert_ne!(negative, json);
    let err = Document::from_json(&negative).unwrap_err();
    assert!(matches!(
        err,
        DocumentError::InvalidComponent { source: MutationError::InvalidGeometry(_), .. }
    ));
}
