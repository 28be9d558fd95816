use std::collections::HashMap;

use super::events::ListenerEntry;
use super::node::{ElementData, Node, NodeId, NodeKind};
use crate::error::DomError;
use crate::registry::{CustomElement, CustomElementRegistry};
use crate::style::Stylesheet;

/// A retained tree of elements, text and shadow roots.
///
/// Nodes live in an arena for the lifetime of the document. Removing a node
/// only detaches it: its id stays valid, it can be inserted again, and its
/// listeners and custom element instance stay live. [`Document::destroy`]
/// detaches a subtree for good and drops that state.
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    root: NodeId,
    registry: CustomElementRegistry,
    /// Upgraded custom element instances keyed by host.
    pub(crate) elements: HashMap<NodeId, Box<dyn CustomElement>>,
    pub(crate) listeners: HashMap<NodeId, Vec<ListenerEntry>>,
    pub(crate) next_listener: u64,
    /// Stylesheets keyed by tree scope root (document root or shadow root).
    pub(crate) stylesheets: HashMap<NodeId, Stylesheet>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("registry", &self.registry)
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_registry(CustomElementRegistry::new())
    }

    pub fn with_registry(registry: CustomElementRegistry) -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document)],
            root: NodeId(0),
            registry,
            elements: HashMap::new(),
            listeners: HashMap::new(),
            next_listener: 0,
            stylesheets: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn registry(&self) -> &CustomElementRegistry {
        &self.registry
    }

    /// Definitions made here only affect elements created afterwards.
    pub fn registry_mut(&mut self) -> &mut CustomElementRegistry {
        &mut self.registry
    }

    // =========================================================================
    // Node access
    // =========================================================================

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(id.0).ok_or(DomError::NotFound(id))
    }

    pub(crate) fn element_ref(&self, id: NodeId) -> Result<&ElementData, DomError> {
        self.node_ref(id)?
            .as_element()
            .ok_or(DomError::NotAnElement(id))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        match &mut self.nodes.get_mut(id.0).ok_or(DomError::NotFound(id))?.kind {
            NodeKind::Element(data) => Ok(data),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id)?.tag()
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id)?.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), DomError> {
        match &mut self.nodes.get_mut(id.0).ok_or(DomError::NotFound(id))?.kind {
            NodeKind::Text(existing) => {
                *existing = text.into();
                Ok(())
            }
            _ => Err(DomError::HierarchyRequest(format!("{id} is not a text node"))),
        }
    }

    /// Concatenated text of all light-tree descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else { return };
        if let NodeKind::Text(text) = &node.kind {
            out.push_str(text);
        }
        for child in &node.children {
            self.collect_text(*child, out);
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// Root of the tree scope `id` belongs to: the document root, a shadow
    /// root, or the top of a detached subtree.
    pub fn tree_root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Whether `id` is connected to the document, crossing shadow boundaries.
    pub fn contains(&self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        let mut current = id;
        loop {
            let root = self.tree_root(current);
            if root == self.root {
                return true;
            }
            match self.host_of(root) {
                Some(host) => current = host,
                None => return false,
            }
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors, following shadow
    /// roots to their hosts.
    pub fn is_shadow_including_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = match self.node(id).map(|n| &n.kind) {
                Some(NodeKind::ShadowRoot { host }) => Some(*host),
                Some(_) => self.parent(id),
                None => None,
            };
        }
        false
    }

    /// Short human-readable form of a node, e.g. `<h1 slot="title">` or `"text"`.
    pub fn describe(&self, id: NodeId) -> String {
        match self.node(id).map(|n| &n.kind) {
            Some(NodeKind::Document) => "#document".to_string(),
            Some(NodeKind::ShadowRoot { host }) => format!("#shadow-root({host})"),
            Some(NodeKind::Text(text)) => format!("{text:?}"),
            Some(NodeKind::Element(data)) => {
                let mut out = format!("<{}", data.tag);
                for (name, value) in &data.attributes {
                    if value.is_empty() {
                        out.push_str(&format!(" {name}"));
                    } else {
                        out.push_str(&format!(" {name}={value:?}"));
                    }
                }
                out.push('>');
                out
            }
            None => format!("<missing {id}>"),
        }
    }

    // =========================================================================
    // Creation
    // =========================================================================

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    /// Create a detached element. Defined custom elements are upgraded immediately.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = self.push_node(NodeKind::Element(ElementData::new(tag)));
        self.upgrade(id);
        id
    }

    /// Create a detached element that already carries `attributes` when it is
    /// upgraded, like parsing `<uc-modal opened>` from markup.
    pub fn create_element_with_attributes<K, V>(
        &mut self,
        tag: &str,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> NodeId
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut data = ElementData::new(tag);
        for (name, value) in attributes {
            let name = name.into();
            let value = value.into();
            match data.attributes.iter_mut().find(|(n, _)| *n == name) {
                Some(entry) => entry.1 = value,
                None => data.attributes.push((name, value)),
            }
        }
        let id = self.push_node(NodeKind::Element(data));
        self.upgrade(id);
        id
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push_node(NodeKind::Text(text.into()))
    }

    fn upgrade(&mut self, host: NodeId) {
        let Some(tag) = self.tag(host).map(str::to_string) else {
            return;
        };
        let Some(constructor) = self.registry.get(&tag) else {
            return;
        };

        log::debug!("upgrading <{tag}> {host}");
        let mut element = constructor();
        element.constructed(self, host);

        // Attributes present before upgrade are reported as additions.
        let observed = element.observed_attributes();
        let present: Vec<(String, String)> = self
            .element_ref(host)
            .map(|data| {
                data.attributes
                    .iter()
                    .filter(|(name, _)| observed.contains(&name.as_str()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        for (name, value) in present {
            element.attribute_changed(self, host, &name, None, Some(&value));
        }

        self.elements.insert(host, element);
    }

    // =========================================================================
    // Custom element instances
    // =========================================================================

    pub fn is_upgraded(&self, host: NodeId) -> bool {
        self.elements.contains_key(&host)
    }

    /// The custom element instance on `host`, if it is a `T`.
    pub fn component<T: CustomElement>(&self, host: NodeId) -> Option<&T> {
        self.elements.get(&host)?.as_any().downcast_ref::<T>()
    }

    pub fn component_mut<T: CustomElement>(&mut self, host: NodeId) -> Option<&mut T> {
        self.elements.get_mut(&host)?.as_any_mut().downcast_mut::<T>()
    }

    // =========================================================================
    // Tree mutation
    // =========================================================================

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` into `parent` before `reference`, or last when `reference` is None.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        if let Some(reference) = reference {
            if self.parent(reference) != Some(parent) {
                return Err(DomError::HierarchyRequest(format!(
                    "{reference} is not a child of {parent}"
                )));
            }
        }

        let old_parent = self.parent(child);
        let watched: Vec<NodeId> = std::iter::once(parent).chain(old_parent).collect();
        self.track_slots(&watched, |doc| {
            doc.detach(child);
            let index = reference
                .and_then(|r| doc.nodes[parent.0].children.iter().position(|c| *c == r))
                .unwrap_or(doc.nodes[parent.0].children.len());
            doc.nodes[parent.0].children.insert(index, child);
            doc.nodes[child.0].parent = Some(parent);
        });
        Ok(())
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.node_ref(parent)?;
        if self.parent(child) != Some(parent) {
            return Err(DomError::HierarchyRequest(format!(
                "{child} is not a child of {parent}"
            )));
        }
        self.track_slots(&[parent], |doc| doc.detach(child));
        Ok(())
    }

    /// Detach `node` from its parent, if any.
    pub fn remove(&mut self, node: NodeId) -> Result<(), DomError> {
        match self.node_ref(node)?.parent {
            Some(parent) => self.remove_child(parent, node),
            None => Ok(()),
        }
    }

    /// Detach `node` and drop the listeners, custom element instances and
    /// stylesheets of it and everything below it, shadow trees included.
    ///
    /// Ids stay valid but the nodes are inert from then on.
    pub fn destroy(&mut self, node: NodeId) -> Result<(), DomError> {
        if node == self.root {
            return Err(DomError::HierarchyRequest(
                "the document root cannot be destroyed".to_string(),
            ));
        }
        self.remove(node)?;

        let mut stack = vec![node];
        let mut dropped = 0;
        while let Some(id) = stack.pop() {
            if self.elements.remove(&id).is_some() {
                dropped += 1;
            }
            self.listeners.remove(&id);
            self.stylesheets.remove(&id);
            stack.extend(self.children(id));
            stack.extend(self.shadow_root(id));
        }
        log::debug!("destroyed {node} ({dropped} custom elements)");
        Ok(())
    }

    /// Replace all children of `parent` with `nodes` as one mutation.
    ///
    /// Slots affected by the replacement are notified once, after the new
    /// children are in place.
    pub fn replace_children(
        &mut self,
        parent: NodeId,
        nodes: impl IntoIterator<Item = NodeId>,
    ) -> Result<(), DomError> {
        let nodes: Vec<NodeId> = nodes.into_iter().collect();
        for child in &nodes {
            self.check_insert(parent, *child)?;
        }

        let mut watched = vec![parent];
        watched.extend(nodes.iter().filter_map(|c| self.parent(*c)));
        self.track_slots(&watched, |doc| {
            for old in std::mem::take(&mut doc.nodes[parent.0].children) {
                doc.nodes[old.0].parent = None;
            }
            for child in nodes {
                doc.detach(child);
                doc.nodes[parent.0].children.push(child);
                doc.nodes[child.0].parent = Some(parent);
            }
        });
        Ok(())
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_node = self.node_ref(parent)?;
        let child_node = self.node_ref(child)?;

        if parent_node.is_text() {
            return Err(DomError::HierarchyRequest(format!(
                "text node {parent} cannot have children"
            )));
        }
        if matches!(child_node.kind, NodeKind::Document | NodeKind::ShadowRoot { .. }) {
            return Err(DomError::HierarchyRequest(format!(
                "{} cannot be inserted",
                self.describe(child)
            )));
        }
        if self.is_shadow_including_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest(format!(
                "{child} is an ancestor of {parent}"
            )));
        }
        Ok(())
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(old_parent) = self.nodes[child.0].parent.take() {
            self.nodes[old_parent.0].children.retain(|c| *c != child);
        }
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?.as_element()?.attribute(name)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    /// Set an attribute. Observed attributes of upgraded elements are reported
    /// even when the value does not change.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        let value = value.into();
        self.element_ref(id)?;

        let watched = self.slot_watch_list(id, name);
        let old = self.track_slots(&watched, |doc| {
            let Ok(data) = doc.element_mut(id) else {
                return None;
            };
            match data.attributes.iter_mut().find(|(n, _)| n == name) {
                Some(entry) => Some(std::mem::replace(&mut entry.1, value.clone())),
                None => {
                    data.attributes.push((name.to_string(), value.clone()));
                    None
                }
            }
        });

        self.notify_attribute(id, name, old.as_deref(), Some(&value));
        Ok(())
    }

    /// Remove an attribute. Removing an absent attribute is a no-op.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        if !self.element_ref(id)?.attributes.iter().any(|(n, _)| n == name) {
            return Ok(());
        }

        let watched = self.slot_watch_list(id, name);
        let old = self.track_slots(&watched, |doc| {
            let data = doc.element_mut(id).ok()?;
            let index = data.attributes.iter().position(|(n, _)| n == name)?;
            Some(data.attributes.remove(index).1)
        });

        self.notify_attribute(id, name, old.as_deref(), None);
        Ok(())
    }

    /// Add a marker attribute when absent, remove it when present.
    /// Returns whether the attribute is present afterwards.
    pub fn toggle_attribute(&mut self, id: NodeId, name: &str) -> Result<bool, DomError> {
        if self.element_ref(id)?.attribute(name).is_some() {
            self.remove_attribute(id, name)?;
            Ok(false)
        } else {
            self.set_attribute(id, name, "")?;
            Ok(true)
        }
    }

    fn slot_watch_list(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        if name == "slot" || name == "name" {
            std::iter::once(id).chain(self.parent(id)).collect()
        } else {
            Vec::new()
        }
    }

    fn notify_attribute(&mut self, host: NodeId, name: &str, old: Option<&str>, new: Option<&str>) {
        let Some(mut element) = self.elements.remove(&host) else {
            return;
        };
        if element.observed_attributes().contains(&name) {
            log::debug!("attribute '{name}' changed on {host}: {old:?} -> {new:?}");
            element.attribute_changed(self, host, name, old, new);
        }
        self.elements.insert(host, element);
    }

    // =========================================================================
    // Shadow roots
    // =========================================================================

    /// Attach an isolated tree to `host` and return its root.
    pub fn attach_shadow(&mut self, host: NodeId) -> Result<NodeId, DomError> {
        if self.element_ref(host)?.shadow_root.is_some() {
            return Err(DomError::ShadowRootExists(host));
        }
        let shadow = self.push_node(NodeKind::ShadowRoot { host });
        self.element_mut(host)?.shadow_root = Some(shadow);
        Ok(shadow)
    }

    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.node(host)?.as_element()?.shadow_root
    }

    /// Host element of a shadow root.
    pub fn host_of(&self, shadow_root: NodeId) -> Option<NodeId> {
        match self.node(shadow_root)?.kind {
            NodeKind::ShadowRoot { host } => Some(host),
            _ => None,
        }
    }

    // =========================================================================
    // Queries (single tree scope, never entering shadow roots)
    // =========================================================================

    pub fn query_id(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|n| self.get_attribute(*n, "id") == Some(id))
    }

    pub fn query_tag(&self, scope: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|n| self.tag(*n) == Some(tag))
    }

    pub fn query_all_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| self.tag(*n) == Some(tag))
            .collect()
    }

    /// Descendants of `scope` in tree order, excluding `scope` itself.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    // =========================================================================
    // Stylesheets
    // =========================================================================

    /// Install the stylesheet of a tree scope (the document root or a shadow root).
    pub fn set_stylesheet(&mut self, scope: NodeId, sheet: Stylesheet) -> Result<(), DomError> {
        match self.node_ref(scope)?.kind {
            NodeKind::Document | NodeKind::ShadowRoot { .. } => {
                self.stylesheets.insert(scope, sheet);
                Ok(())
            }
            _ => Err(DomError::HierarchyRequest(format!(
                "{} is not a tree scope",
                self.describe(scope)
            ))),
        }
    }

    pub fn stylesheet(&self, scope: NodeId) -> Option<&Stylesheet> {
        self.stylesheets.get(&scope)
    }
}
