//! Flattened tree and scoped cascade.
//!
//! Rendering works on the flat tree: a shadow host shows its shadow root's
//! children instead of its own, and slots are replaced by the nodes assigned
//! to them (or their fallback children). Styles resolve in this order, later
//! winning, with specificity then source order deciding inside each layer:
//!
//! 1. user-agent defaults;
//! 2. `:host` rules of the element's own shadow root;
//! 3. `::slotted` rules of the shadow tree a light child is projected into;
//! 4. rules of the node's own tree scope.
//!
//! Rules from one scope never reach nodes of another, which is what keeps a
//! component's styles and its host page's styles apart.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::sheet::{user_agent, Rule, Stylesheet};
use super::Specificity;
use crate::dom::{Document, NodeId};
use crate::types::{Declarations, Style};

fn user_agent_sheet() -> &'static Stylesheet {
    static SHEET: OnceLock<Stylesheet> = OnceLock::new();
    SHEET.get_or_init(user_agent)
}

/// Snapshot of the rendered structure of a document with computed styles.
pub struct FlatTree<'a> {
    doc: &'a Document,
    root: NodeId,
    order: Vec<NodeId>,
    children: HashMap<NodeId, Vec<NodeId>>,
    parents: HashMap<NodeId, NodeId>,
    styles: HashMap<NodeId, Style>,
}

impl<'a> FlatTree<'a> {
    pub fn build(doc: &'a Document) -> Self {
        let root = doc.root();
        let mut tree = Self {
            doc,
            root,
            order: Vec::new(),
            children: HashMap::new(),
            parents: HashMap::new(),
            styles: HashMap::new(),
        };
        tree.styles.insert(root, Style::default());
        tree.visit(root);
        tree
    }

    fn visit(&mut self, node: NodeId) {
        self.order.push(node);

        let children = flat_children(self.doc, node);
        let parent_style = self.styles.get(&node).cloned().unwrap_or_default();
        for child in &children {
            self.parents.insert(*child, node);
            let style = compute_style(self.doc, *child, &parent_style);
            self.styles.insert(*child, style);
        }
        self.children.insert(node, children.clone());

        for child in children {
            self.visit(child);
        }
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Every rendered node, parents before children.
    pub fn nodes(&self) -> &[NodeId] {
        &self.order
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.styles.contains_key(&node)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.children.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(&node).copied()
    }

    pub fn style(&self, node: NodeId) -> Option<&Style> {
        self.styles.get(&node)
    }
}

impl Document {
    /// Computed style of a rendered node. None when the node is not part of
    /// the rendered tree (detached, or a light child no slot accepts).
    pub fn computed_style(&self, node: NodeId) -> Option<Style> {
        FlatTree::build(self).style(node).cloned()
    }
}

/// Rendered children of `node`.
fn flat_children(doc: &Document, node: NodeId) -> Vec<NodeId> {
    let source = match doc.shadow_root(node) {
        Some(shadow) => doc.children(shadow).to_vec(),
        None => doc.children(node).to_vec(),
    };
    let mut out = Vec::new();
    expand_slots(doc, &source, &mut out);
    out
}

fn expand_slots(doc: &Document, nodes: &[NodeId], out: &mut Vec<NodeId>) {
    for node in nodes {
        let in_shadow_tree = doc.host_of(doc.tree_root(*node)).is_some();
        if in_shadow_tree && doc.is_slot(*node) {
            expand_slots(doc, &doc.slot_content(*node), out);
        } else {
            out.push(*node);
        }
    }
}

fn compute_style(doc: &Document, node: NodeId, parent: &Style) -> Style {
    let mut style = Style::inherit_from(parent);
    if !doc.node(node).is_some_and(|n| n.is_element()) {
        return style;
    }
    for declarations in matched_declarations(doc, node) {
        declarations.apply(&mut style);
    }
    style
}

/// Declarations matching `node`, in ascending precedence.
fn matched_declarations(doc: &Document, node: NodeId) -> Vec<&Declarations> {
    let scope = doc.tree_root(node);
    let mut out = Vec::new();

    push_layer(&mut out, user_agent_sheet().rules(), |rule| {
        rule.selector.matches_in_scope(doc, scope, node)
    });

    if let Some(sheet) = doc.shadow_root(node).and_then(|s| doc.stylesheet(s)) {
        push_layer(&mut out, sheet.rules(), |rule| {
            rule.selector.matches_host(doc, node)
        });
    }

    if let Some(slot) = doc.assigned_slot(node) {
        let slot_scope = doc.tree_root(slot);
        if let Some(sheet) = doc.stylesheet(slot_scope) {
            push_layer(&mut out, sheet.rules(), |rule| {
                rule.selector.matches_slotted(doc, slot_scope, node)
            });
        }
    }

    if let Some(sheet) = doc.stylesheet(scope) {
        push_layer(&mut out, sheet.rules(), |rule| {
            rule.selector.matches_in_scope(doc, scope, node)
        });
    }

    out
}

fn push_layer<'r>(
    out: &mut Vec<&'r Declarations>,
    rules: &'r [Rule],
    matches: impl Fn(&Rule) -> bool,
) {
    let mut matched: Vec<(Specificity, usize, &'r Declarations)> = rules
        .iter()
        .enumerate()
        .filter(|(_, rule)| matches(rule))
        .map(|(index, rule)| (rule.selector.specificity(), index, &rule.declarations))
        .collect();
    matched.sort_by_key(|(specificity, index, _)| (*specificity, *index));
    out.extend(matched.into_iter().map(|(_, _, declarations)| declarations));
}
