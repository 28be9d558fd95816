use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use ucdom::{CustomElement, CustomElementRegistry, Document, DomError, NodeId};

type Log = Rc<RefCell<Vec<(String, Option<String>, Option<String>)>>>;

/// Records every observed attribute change.
struct Recorder {
    log: Log,
    constructed: bool,
}

impl CustomElement for Recorder {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["opened", "label"]
    }

    fn constructed(&mut self, _doc: &mut Document, _host: NodeId) {
        self.constructed = true;
    }

    fn attribute_changed(
        &mut self,
        _doc: &mut Document,
        _host: NodeId,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) {
        self.log.borrow_mut().push((
            name.to_string(),
            old.map(str::to_string),
            new.map(str::to_string),
        ));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn recorder_document() -> (Document, Log) {
    let log: Log = Rc::default();
    let mut registry = CustomElementRegistry::new();
    let shared = Rc::clone(&log);
    registry
        .define_with("x-recorder", move || {
            Box::new(Recorder {
                log: Rc::clone(&shared),
                constructed: false,
            })
        })
        .unwrap();
    (Document::with_registry(registry), log)
}

// ============================================================================
// Tree
// ============================================================================

#[test]
fn test_append_and_remove() {
    let mut doc = Document::new();
    let root = doc.root();
    let div = doc.create_element("div");
    let text = doc.create_text("hello");

    doc.append_child(root, div).unwrap();
    doc.append_child(div, text).unwrap();

    assert_eq!(doc.children(root), &[div]);
    assert_eq!(doc.parent(text), Some(div));
    assert!(doc.contains(text));
    assert_eq!(doc.text_content(root), "hello");

    doc.remove(div).unwrap();
    assert!(!doc.contains(text));
    assert!(doc.node(text).is_some(), "detached nodes stay valid");
}

#[test]
fn test_insert_before_orders_children() {
    let mut doc = Document::new();
    let root = doc.root();
    let a = doc.create_element("a");
    let b = doc.create_element("b");
    let c = doc.create_element("c");

    doc.append_child(root, a).unwrap();
    doc.append_child(root, c).unwrap();
    doc.insert_before(root, b, Some(c)).unwrap();

    assert_eq!(doc.children(root), &[a, b, c]);
}

#[test]
fn test_append_moves_node() {
    let mut doc = Document::new();
    let root = doc.root();
    let first = doc.create_element("div");
    let second = doc.create_element("div");
    let child = doc.create_element("span");
    doc.append_child(root, first).unwrap();
    doc.append_child(root, second).unwrap();

    doc.append_child(first, child).unwrap();
    doc.append_child(second, child).unwrap();

    assert!(doc.children(first).is_empty());
    assert_eq!(doc.children(second), &[child]);
}

#[test]
fn test_hierarchy_errors() {
    let mut doc = Document::new();
    let root = doc.root();
    let outer = doc.create_element("div");
    let inner = doc.create_element("div");
    let text = doc.create_text("leaf");
    doc.append_child(outer, inner).unwrap();

    assert!(matches!(
        doc.append_child(inner, outer),
        Err(DomError::HierarchyRequest(_))
    ));
    assert!(matches!(
        doc.append_child(outer, outer),
        Err(DomError::HierarchyRequest(_))
    ));
    assert!(matches!(
        doc.append_child(outer, root),
        Err(DomError::HierarchyRequest(_))
    ));
    assert!(matches!(
        doc.append_child(text, inner),
        Err(DomError::HierarchyRequest(_))
    ));

    let shadow = doc.attach_shadow(outer).unwrap();
    assert!(matches!(
        doc.append_child(root, shadow),
        Err(DomError::HierarchyRequest(_))
    ));
}

#[test]
fn test_remove_child_of_wrong_parent() {
    let mut doc = Document::new();
    let root = doc.root();
    let div = doc.create_element("div");
    let stray = doc.create_element("div");
    doc.append_child(root, div).unwrap();

    assert!(matches!(
        doc.remove_child(div, stray),
        Err(DomError::HierarchyRequest(_))
    ));
}

#[test]
fn test_replace_children() {
    let mut doc = Document::new();
    let root = doc.root();
    let old = doc.create_element("p");
    let new_a = doc.create_element("p");
    let new_b = doc.create_text("b");
    doc.append_child(root, old).unwrap();

    doc.replace_children(root, [new_a, new_b]).unwrap();

    assert_eq!(doc.children(root), &[new_a, new_b]);
    assert_eq!(doc.parent(old), None);
}

#[test]
fn test_describe() {
    let mut doc = Document::new();
    let h1 = doc.create_element_with_attributes("h1", [("slot", "title"), ("hidden", "")]);
    let text = doc.create_text("hi");

    assert_eq!(doc.describe(h1), "<h1 slot=\"title\" hidden>");
    assert_eq!(doc.describe(text), "\"hi\"");
    assert_eq!(doc.describe(doc.root()), "#document");
}

// ============================================================================
// Attributes
// ============================================================================

#[test]
fn test_attribute_roundtrip() {
    let mut doc = Document::new();
    let div = doc.create_element("div");

    assert!(!doc.has_attribute(div, "opened"));
    doc.set_attribute(div, "opened", "").unwrap();
    assert_eq!(doc.get_attribute(div, "opened"), Some(""));

    assert!(!doc.toggle_attribute(div, "opened").unwrap());
    assert!(!doc.has_attribute(div, "opened"));
    assert!(doc.toggle_attribute(div, "opened").unwrap());
    assert!(doc.has_attribute(div, "opened"));
}

#[test]
fn test_attribute_on_text_node_fails() {
    let mut doc = Document::new();
    let text = doc.create_text("t");
    assert_eq!(
        doc.set_attribute(text, "id", "x"),
        Err(DomError::NotAnElement(text))
    );
}

#[test]
fn test_observed_attribute_changes_are_reported() {
    let (mut doc, log) = recorder_document();
    let host = doc.create_element("x-recorder");

    doc.set_attribute(host, "opened", "").unwrap();
    doc.set_attribute(host, "opened", "").unwrap();
    doc.set_attribute(host, "ignored", "1").unwrap();
    doc.remove_attribute(host, "opened").unwrap();
    doc.remove_attribute(host, "opened").unwrap();

    let log = log.borrow();
    assert_eq!(
        *log,
        vec![
            ("opened".to_string(), None, Some(String::new())),
            ("opened".to_string(), Some(String::new()), Some(String::new())),
            ("opened".to_string(), Some(String::new()), None),
        ]
    );
}

#[test]
fn test_attributes_present_at_upgrade_are_reported() {
    let (mut doc, log) = recorder_document();
    let host = doc.create_element_with_attributes("x-recorder", [("label", "pay"), ("other", "")]);

    assert!(doc.is_upgraded(host));
    assert!(doc.component::<Recorder>(host).is_some_and(|r| r.constructed));
    assert_eq!(
        *log.borrow(),
        vec![("label".to_string(), None, Some("pay".to_string()))]
    );
}

#[test]
fn test_destroy_drops_instances_and_listeners() {
    let (mut doc, _) = recorder_document();
    let root = doc.root();
    let wrapper = doc.create_element("div");
    let host = doc.create_element("x-recorder");
    doc.append_child(root, wrapper).unwrap();
    doc.append_child(wrapper, host).unwrap();
    let shadow = doc.attach_shadow(host).unwrap();
    let inner = doc.create_element("button");
    doc.append_child(shadow, inner).unwrap();
    doc.add_event_listener(inner, "click", |_, _| {});
    doc.add_event_listener(wrapper, "click", |_, _| {});

    doc.destroy(wrapper).unwrap();

    assert!(!doc.contains(wrapper));
    assert!(!doc.is_upgraded(host));
    assert_eq!(doc.click(inner).unwrap(), 0);
    // Plain removal keeps a node's state.
    let kept = doc.create_element("x-recorder");
    doc.append_child(root, kept).unwrap();
    doc.remove(kept).unwrap();
    assert!(doc.is_upgraded(kept));
}

#[test]
fn test_destroy_root_fails() {
    let mut doc = Document::new();
    let root = doc.root();
    assert!(matches!(
        doc.destroy(root),
        Err(DomError::HierarchyRequest(_))
    ));
}

#[test]
fn test_undefined_tags_are_not_upgraded() {
    let (mut doc, _) = recorder_document();
    let plain = doc.create_element("x-other");
    assert!(!doc.is_upgraded(plain));
    assert!(doc.component::<Recorder>(plain).is_none());
}

// ============================================================================
// Registry
// ============================================================================

fn plain() -> Box<dyn CustomElement> {
    Box::new(Recorder {
        log: Rc::default(),
        constructed: false,
    })
}

#[test]
fn test_duplicate_definition_fails() {
    let mut registry = CustomElementRegistry::new();
    registry.define("x-plain", plain).unwrap();
    assert_eq!(
        registry.define("x-plain", plain),
        Err(DomError::AlreadyDefined("x-plain".to_string()))
    );
}

#[test]
fn test_invalid_names_rejected() {
    let mut registry = CustomElementRegistry::new();
    for name in ["plain", "X-upper", "x-Upper", "1-digit", "x y-z", ""] {
        assert_eq!(
            registry.define(name, plain),
            Err(DomError::InvalidName(name.to_string())),
            "{name:?}"
        );
    }
    assert!(registry.define("x-ok", plain).is_ok());
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["x-ok"]);
}

// ============================================================================
// Shadow roots and queries
// ============================================================================

#[test]
fn test_attach_shadow_once() {
    let mut doc = Document::new();
    let host = doc.create_element("div");
    let shadow = doc.attach_shadow(host).unwrap();

    assert_eq!(doc.shadow_root(host), Some(shadow));
    assert_eq!(doc.host_of(shadow), Some(host));
    assert_eq!(doc.attach_shadow(host), Err(DomError::ShadowRootExists(host)));
}

#[test]
fn test_queries_stay_in_scope() {
    let mut doc = Document::new();
    let root = doc.root();
    let host = doc.create_element("div");
    doc.append_child(root, host).unwrap();
    let shadow = doc.attach_shadow(host).unwrap();
    let inner = doc.create_element_with_attributes("button", [("id", "ok")]);
    doc.append_child(shadow, inner).unwrap();

    assert_eq!(doc.query_id(root, "ok"), None);
    assert_eq!(doc.query_id(shadow, "ok"), Some(inner));
    assert_eq!(doc.query_tag(shadow, "button"), Some(inner));
    assert!(doc.query_all_tag(root, "button").is_empty());
    assert!(doc.contains(inner));
    assert_eq!(doc.tree_root(inner), shadow);
}
