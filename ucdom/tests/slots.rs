use std::cell::Cell;
use std::rc::Rc;

use ucdom::{Document, NodeId, SLOTCHANGE};

/// A host with a `title` slot holding fallback text and a default slot.
struct Fixture {
    doc: Document,
    host: NodeId,
    title_slot: NodeId,
    body_slot: NodeId,
}

fn fixture() -> Fixture {
    let mut doc = Document::new();
    let root = doc.root();
    let host = doc.create_element("x-card");
    doc.append_child(root, host).unwrap();

    let shadow = doc.attach_shadow(host).unwrap();
    let header = doc.create_element("header");
    let title_slot = doc.create_element_with_attributes("slot", [("name", "title")]);
    let fallback = doc.create_text("Fallback");
    let body_slot = doc.create_element("slot");
    doc.append_child(title_slot, fallback).unwrap();
    doc.append_child(header, title_slot).unwrap();
    doc.append_child(shadow, header).unwrap();
    doc.append_child(shadow, body_slot).unwrap();

    Fixture {
        doc,
        host,
        title_slot,
        body_slot,
    }
}

fn count_slotchange(doc: &mut Document, slot: NodeId) -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let inner = Rc::clone(&count);
    doc.add_event_listener(slot, SLOTCHANGE, move |_, _| inner.set(inner.get() + 1));
    count
}

// ============================================================================
// Assignment
// ============================================================================

#[test]
fn test_named_and_default_assignment() {
    let mut f = fixture();
    let title = f.doc.create_element_with_attributes("h1", [("slot", "title")]);
    let para = f.doc.create_element("p");
    let text = f.doc.create_text("loose text");
    let stray = f.doc.create_element_with_attributes("p", [("slot", "missing")]);
    for child in [para, title, text, stray] {
        f.doc.append_child(f.host, child).unwrap();
    }

    assert_eq!(f.doc.assigned_nodes(f.title_slot), vec![title]);
    assert_eq!(f.doc.assigned_nodes(f.body_slot), vec![para, text]);
    assert_eq!(f.doc.assigned_slot(title), Some(f.title_slot));
    assert_eq!(f.doc.assigned_slot(stray), None);
}

#[test]
fn test_fallback_content_when_unassigned() {
    let mut f = fixture();
    let fallback = f.doc.children(f.title_slot).to_vec();
    assert_eq!(f.doc.slot_content(f.title_slot), fallback);

    let title = f.doc.create_element_with_attributes("h1", [("slot", "title")]);
    f.doc.append_child(f.host, title).unwrap();
    assert_eq!(f.doc.slot_content(f.title_slot), vec![title]);
}

// ============================================================================
// slotchange
// ============================================================================

#[test]
fn test_slotchange_on_append_and_remove() {
    let mut f = fixture();
    let body = count_slotchange(&mut f.doc, f.body_slot);
    let title = count_slotchange(&mut f.doc, f.title_slot);

    let para = f.doc.create_element("p");
    f.doc.append_child(f.host, para).unwrap();
    assert_eq!(body.get(), 1);

    f.doc.remove(para).unwrap();
    assert_eq!(body.get(), 2);
    assert_eq!(title.get(), 0);
}

#[test]
fn test_slotchange_once_per_replace_children() {
    let mut f = fixture();
    let first = f.doc.create_element("p");
    f.doc.append_child(f.host, first).unwrap();
    let body = count_slotchange(&mut f.doc, f.body_slot);

    let a = f.doc.create_element("p");
    let b = f.doc.create_element("p");
    let c = f.doc.create_text("c");
    f.doc.replace_children(f.host, [a, b, c]).unwrap();

    assert_eq!(body.get(), 1);
    assert_eq!(f.doc.assigned_nodes(f.body_slot), vec![a, b, c]);
}

#[test]
fn test_no_slotchange_when_assignment_unchanged() {
    let mut f = fixture();
    let title = count_slotchange(&mut f.doc, f.title_slot);
    let body = count_slotchange(&mut f.doc, f.body_slot);

    let heading = f.doc.create_element_with_attributes("h1", [("slot", "title")]);
    f.doc.append_child(f.host, heading).unwrap();
    assert_eq!((title.get(), body.get()), (1, 0));

    // Unobserved attribute, same assignment.
    f.doc.set_attribute(heading, "class", "big").unwrap();
    // Same slot attribute value.
    f.doc.set_attribute(heading, "slot", "title").unwrap();
    assert_eq!((title.get(), body.get()), (1, 0));
}

#[test]
fn test_slot_attribute_change_moves_node() {
    let mut f = fixture();
    let title = count_slotchange(&mut f.doc, f.title_slot);
    let body = count_slotchange(&mut f.doc, f.body_slot);

    let node = f.doc.create_element("h1");
    f.doc.append_child(f.host, node).unwrap();
    assert_eq!((title.get(), body.get()), (0, 1));

    f.doc.set_attribute(node, "slot", "title").unwrap();
    assert_eq!((title.get(), body.get()), (1, 2));
    assert_eq!(f.doc.assigned_nodes(f.title_slot), vec![node]);
    assert!(f.doc.assigned_nodes(f.body_slot).is_empty());
}

#[test]
fn test_slotchange_does_not_leave_shadow_tree() {
    let mut f = fixture();
    let outside = count_slotchange(&mut f.doc, f.host);
    let para = f.doc.create_element("p");
    f.doc.append_child(f.host, para).unwrap();
    assert_eq!(outside.get(), 0);
}
