use std::cell::RefCell;
use std::rc::Rc;

use ucdom::{Document, EventInit, EventPhase, NodeId};

/// (current target, target, phase) for each listener call.
type Seen = Rc<RefCell<Vec<(NodeId, NodeId, EventPhase)>>>;

fn record(doc: &mut Document, node: NodeId, event_type: &str, seen: &Seen) {
    let seen = Rc::clone(seen);
    doc.add_event_listener(node, event_type, move |_, event| {
        seen.borrow_mut().push((
            event.current_target().unwrap_or(node),
            event.target(),
            event.phase(),
        ));
    });
}

/// `page > host`, with `host`'s shadow tree `wrapper > button` and a light
/// child `label` projected through a default slot inside `wrapper`.
struct Fixture {
    doc: Document,
    page: NodeId,
    host: NodeId,
    shadow: NodeId,
    wrapper: NodeId,
    button: NodeId,
    slot: NodeId,
    label: NodeId,
}

fn fixture() -> Fixture {
    let mut doc = Document::new();
    let root = doc.root();
    let page = doc.create_element("main");
    let host = doc.create_element("x-host");
    let label = doc.create_element("span");
    doc.append_child(root, page).unwrap();
    doc.append_child(page, host).unwrap();
    doc.append_child(host, label).unwrap();

    let shadow = doc.attach_shadow(host).unwrap();
    let wrapper = doc.create_element("div");
    let button = doc.create_element("button");
    let slot = doc.create_element("slot");
    doc.append_child(shadow, wrapper).unwrap();
    doc.append_child(wrapper, button).unwrap();
    doc.append_child(wrapper, slot).unwrap();

    Fixture {
        doc,
        page,
        host,
        shadow,
        wrapper,
        button,
        slot,
        label,
    }
}

// ============================================================================
// Propagation path
// ============================================================================

#[test]
fn test_composed_path_crosses_shadow_boundary() {
    let f = fixture();
    let root = f.doc.root();
    assert_eq!(
        f.doc.event_path(f.button, true),
        vec![f.button, f.wrapper, f.shadow, f.host, f.page, root]
    );
}

#[test]
fn test_uncomposed_path_stops_at_shadow_root() {
    let f = fixture();
    assert_eq!(
        f.doc.event_path(f.button, false),
        vec![f.button, f.wrapper, f.shadow]
    );
}

#[test]
fn test_slotted_node_path_goes_through_slot() {
    let f = fixture();
    let root = f.doc.root();
    assert_eq!(
        f.doc.event_path(f.label, false),
        vec![f.label, f.slot, f.wrapper, f.shadow]
    );
    assert_eq!(
        f.doc.event_path(f.label, true),
        vec![f.label, f.slot, f.wrapper, f.shadow, f.host, f.page, root]
    );
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_bubbling_composed_event_is_retargeted() {
    let mut f = fixture();
    let seen: Seen = Rc::default();
    record(&mut f.doc, f.button, "cancel", &seen);
    record(&mut f.doc, f.host, "cancel", &seen);
    record(&mut f.doc, f.page, "cancel", &seen);

    let count = f
        .doc
        .dispatch_event(f.button, "cancel", EventInit::bubbling().composed())
        .unwrap();

    assert_eq!(count, 3);
    assert_eq!(
        *seen.borrow(),
        vec![
            (f.button, f.button, EventPhase::AtTarget),
            (f.host, f.host, EventPhase::AtTarget),
            (f.page, f.host, EventPhase::Bubbling),
        ]
    );
}

#[test]
fn test_uncomposed_event_stays_inside() {
    let mut f = fixture();
    let seen: Seen = Rc::default();
    record(&mut f.doc, f.wrapper, "ping", &seen);
    record(&mut f.doc, f.host, "ping", &seen);

    f.doc
        .dispatch_event(f.button, "ping", EventInit::bubbling())
        .unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![(f.wrapper, f.button, EventPhase::Bubbling)]
    );
}

#[test]
fn test_non_bubbling_event_only_reaches_target() {
    let mut f = fixture();
    let seen: Seen = Rc::default();
    record(&mut f.doc, f.host, "confirm", &seen);
    record(&mut f.doc, f.page, "confirm", &seen);

    let count = f
        .doc
        .dispatch_event(f.host, "confirm", EventInit::new())
        .unwrap();

    assert_eq!(count, 1);
    assert_eq!(*seen.borrow(), vec![(f.host, f.host, EventPhase::AtTarget)]);
}

#[test]
fn test_listeners_filter_by_type() {
    let mut f = fixture();
    let seen: Seen = Rc::default();
    record(&mut f.doc, f.button, "confirm", &seen);

    f.doc.click(f.button).unwrap();
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_stop_propagation_finishes_current_node() {
    let mut f = fixture();
    let seen: Seen = Rc::default();
    f.doc.add_event_listener(f.button, "click", |_, event| {
        event.stop_propagation();
    });
    record(&mut f.doc, f.button, "click", &seen);
    record(&mut f.doc, f.wrapper, "click", &seen);

    let count = f.doc.click(f.button).unwrap();

    assert_eq!(count, 2);
    assert_eq!(
        *seen.borrow(),
        vec![(f.button, f.button, EventPhase::AtTarget)]
    );
}

#[test]
fn test_remove_event_listener() {
    let mut f = fixture();
    let calls = Rc::new(RefCell::new(0));
    let inner = Rc::clone(&calls);
    let id = f.doc.add_event_listener(f.page, "click", move |_, _| {
        *inner.borrow_mut() += 1;
    });

    assert!(f.doc.remove_event_listener(id));
    assert!(!f.doc.remove_event_listener(id));
    assert_eq!(f.doc.click(f.button).unwrap(), 0);
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn test_listener_can_mutate_document() {
    let mut f = fixture();
    let host = f.host;
    f.doc.add_event_listener(f.button, "click", move |doc, _| {
        doc.set_attribute(host, "clicked", "").unwrap();
    });

    f.doc.click(f.button).unwrap();
    assert!(f.doc.has_attribute(f.host, "clicked"));
}

#[test]
fn test_dispatch_to_missing_node_fails() {
    let mut doc = Document::new();
    let mut other = Document::new();
    let foreign = (0..4).map(|_| other.create_element("div")).last().unwrap();

    assert!(doc.dispatch_event(foreign, "click", EventInit::new()).is_err());
}
