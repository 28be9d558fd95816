use ucdom::{
    Color, Compound, Declarations, Document, Edges, FlatTree, NodeId, PointerEvents, Selector,
    Style, Stylesheet, TextStyle,
};

/// Page `main > host`; the host's shadow tree is `panel > button + slot`,
/// and the host has one light `h1` child.
struct Fixture {
    doc: Document,
    page: NodeId,
    host: NodeId,
    shadow: NodeId,
    panel: NodeId,
    inner_button: NodeId,
    slot: NodeId,
    heading: NodeId,
}

fn fixture() -> Fixture {
    let mut doc = Document::new();
    let root = doc.root();
    let page = doc.create_element("main");
    let host = doc.create_element("x-card");
    let heading = doc.create_element("h1");
    let heading_text = doc.create_text("Title");
    doc.append_child(root, page).unwrap();
    doc.append_child(page, host).unwrap();
    doc.append_child(heading, heading_text).unwrap();
    doc.append_child(host, heading).unwrap();

    let shadow = doc.attach_shadow(host).unwrap();
    let panel = doc.create_element_with_attributes("div", [("id", "panel")]);
    let inner_button = doc.create_element("button");
    let slot = doc.create_element("slot");
    doc.append_child(shadow, panel).unwrap();
    doc.append_child(panel, inner_button).unwrap();
    doc.append_child(panel, slot).unwrap();

    Fixture {
        doc,
        page,
        host,
        shadow,
        panel,
        inner_button,
        slot,
        heading,
    }
}

fn red() -> Color {
    Color::rgb(255, 0, 0)
}

fn blue() -> Color {
    Color::rgb(0, 0, 255)
}

// ============================================================================
// Scoping
// ============================================================================

#[test]
fn test_document_rules_do_not_enter_shadow_tree() {
    let mut f = fixture();
    let root = f.doc.root();
    f.doc
        .set_stylesheet(
            root,
            Stylesheet::new().rule(Selector::tag("button"), Declarations::new().background(red())),
        )
        .unwrap();

    let inner = f.doc.computed_style(f.inner_button).unwrap();
    assert_eq!(inner.background, Some(Color::rgb(221, 221, 221)));

    let outside = f.doc.create_element("button");
    f.doc.append_child(f.page, outside).unwrap();
    assert_eq!(f.doc.computed_style(outside).unwrap().background, Some(red()));
}

#[test]
fn test_shadow_rules_do_not_leak_out() {
    let mut f = fixture();
    f.doc
        .set_stylesheet(
            f.shadow,
            Stylesheet::new()
                .rule(Selector::tag("h1"), Declarations::new().background(blue()))
                .rule(Selector::tag("main"), Declarations::new().background(blue())),
        )
        .unwrap();

    assert_eq!(f.doc.computed_style(f.heading).unwrap().background, None);
    assert_eq!(f.doc.computed_style(f.page).unwrap().background, None);
}

#[test]
fn test_stylesheet_needs_tree_scope() {
    let mut f = fixture();
    assert!(f.doc.set_stylesheet(f.panel, Stylesheet::new()).is_err());
}

// ============================================================================
// Cascade order
// ============================================================================

#[test]
fn test_specificity_beats_source_order() {
    let mut f = fixture();
    f.doc
        .set_stylesheet(
            f.shadow,
            Stylesheet::new()
                .rule(
                    Selector::host_with("opened").descendant(Compound::id("panel")),
                    Declarations::new().opacity(1.0),
                )
                .rule(Selector::id("panel"), Declarations::new().opacity(0.0))
                .rule(Selector::tag("div"), Declarations::new().opacity(0.5)),
        )
        .unwrap();

    assert_eq!(f.doc.computed_style(f.panel).unwrap().opacity, 0.0);

    f.doc.set_attribute(f.host, "opened", "").unwrap();
    assert_eq!(f.doc.computed_style(f.panel).unwrap().opacity, 1.0);

    f.doc.remove_attribute(f.host, "opened").unwrap();
    assert_eq!(f.doc.computed_style(f.panel).unwrap().opacity, 0.0);
}

#[test]
fn test_later_rule_wins_on_equal_specificity() {
    let mut f = fixture();
    f.doc
        .set_stylesheet(
            f.shadow,
            Stylesheet::new()
                .rule(Selector::tag("div"), Declarations::new().background(red()))
                .rule(Selector::tag("div"), Declarations::new().background(blue())),
        )
        .unwrap();
    assert_eq!(f.doc.computed_style(f.panel).unwrap().background, Some(blue()));
}

#[test]
fn test_host_rule_loses_to_page_rule() {
    let mut f = fixture();
    let root = f.doc.root();
    f.doc
        .set_stylesheet(
            f.shadow,
            Stylesheet::new().rule(Selector::host(), Declarations::new().background(red())),
        )
        .unwrap();
    assert_eq!(f.doc.computed_style(f.host).unwrap().background, Some(red()));

    f.doc
        .set_stylesheet(
            root,
            Stylesheet::new().rule(Selector::tag("x-card"), Declarations::new().background(blue())),
        )
        .unwrap();
    assert_eq!(f.doc.computed_style(f.host).unwrap().background, Some(blue()));
}

#[test]
fn test_slotted_rules_reach_projected_children() {
    let mut f = fixture();
    f.doc
        .set_stylesheet(
            f.shadow,
            Stylesheet::new().rule(
                Selector::slotted(Compound::tag("h1")),
                Declarations::new().margin(Edges::all(0)).foreground(red()),
            ),
        )
        .unwrap();

    let style = f.doc.computed_style(f.heading).unwrap();
    assert_eq!(style.foreground, Some(red()));
    // User-agent bold still applies underneath.
    assert!(style.text_style.bold);
}

// ============================================================================
// Inheritance and the flat tree
// ============================================================================

#[test]
fn test_inherited_properties() {
    let mut f = fixture();
    f.doc
        .set_stylesheet(
            f.shadow,
            Stylesheet::new().rule(
                Selector::id("panel"),
                Declarations::new()
                    .foreground(blue())
                    .text_style(TextStyle::new().italic())
                    .pointer_events(PointerEvents::None)
                    .background(red()),
            ),
        )
        .unwrap();

    // The light h1 inherits through the slot it is projected into.
    let style = f.doc.computed_style(f.heading).unwrap();
    assert_eq!(style.foreground, Some(blue()));
    assert_eq!(style.pointer_events, PointerEvents::None);
    assert!(style.text_style.italic);
    assert_eq!(style.background, None, "background is not inherited");
}

#[test]
fn test_bold_keeps_inherited_italic() {
    let mut f = fixture();
    f.doc
        .set_stylesheet(
            f.shadow,
            Stylesheet::new()
                .rule(Selector::id("panel"), Declarations::new().italic())
                .rule(
                    Selector::slotted(Compound::tag("h1")),
                    Declarations::new().margin(Edges::all(0)).bold(),
                ),
        )
        .unwrap();

    let style = f.doc.computed_style(f.heading).unwrap();
    assert!(style.text_style.bold);
    assert!(style.text_style.italic);
    assert!(!style.text_style.underline);
}

#[test]
fn test_text_flags_apply_one_by_one() {
    let mut style = Style {
        text_style: TextStyle::new().italic().underline(),
        ..Default::default()
    };

    Declarations::new().bold().apply(&mut style);
    assert_eq!(style.text_style, TextStyle::new().bold().italic().underline());

    // The shorthand sets every flag.
    Declarations::new()
        .text_style(TextStyle::new().dim())
        .apply(&mut style);
    assert_eq!(style.text_style, TextStyle::new().dim());
}

#[test]
fn test_flat_tree_projects_slots() {
    let f = fixture();
    let tree = FlatTree::build(&f.doc);

    assert_eq!(tree.children(f.host), &[f.panel]);
    assert_eq!(tree.children(f.panel), &[f.inner_button, f.heading]);
    assert_eq!(tree.parent(f.heading), Some(f.panel));
    assert!(!tree.contains(f.slot));
    assert!(!tree.contains(f.shadow));
}

#[test]
fn test_unassigned_children_are_not_rendered() {
    let mut f = fixture();
    let stray = f.doc.create_element_with_attributes("p", [("slot", "nowhere")]);
    f.doc.append_child(f.host, stray).unwrap();

    assert!(f.doc.computed_style(stray).is_none());
    assert!(f.doc.computed_style(f.heading).is_some());
}
