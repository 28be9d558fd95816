//! The `uc-modal` custom element.
//!
//! Visibility lives in the host's `opened` attribute. The element mirrors it
//! into `is_open` whenever the attribute changes, so the cached flag and the
//! attribute never disagree once a change has been reported.
//!
//! Backdrop and Cancel clicks hide the modal and then dispatch a bubbling,
//! composed `cancel` from the clicked element, which reaches the host page
//! retargeted to the host. Confirm hides the modal and then dispatches a local
//! `confirm` on the host.

use std::any::Any;

use ucdom::{
    CustomElement, CustomElementRegistry, Document, DomError, DomEvent, EventInit, ListenerId,
    NodeId, CLICK, SLOTCHANGE,
};

use crate::config::ModalConfig;
use crate::styles::stylesheet;

/// Tag name of the element.
pub const TAG: &str = "uc-modal";

/// Marker attribute holding the visibility state.
pub const OPENED: &str = "opened";

/// Event dispatched when the modal is dismissed.
pub const CANCEL: &str = "cancel";

/// Event dispatched on the host when the modal is confirmed.
pub const CONFIRM: &str = "confirm";

/// Slot name for header content.
pub const TITLE_SLOT: &str = "title";

pub(crate) const BACKDROP_ID: &str = "backdrop";
pub(crate) const MODAL_ID: &str = "modal";
const CANCEL_BUTTON_ID: &str = "cancel-btn";
const CONFIRM_BUTTON_ID: &str = "confirm-btn";

/// Shadow tree nodes the element holds on to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalParts {
    pub shadow_root: NodeId,
    pub backdrop: NodeId,
    pub panel: NodeId,
    pub title_slot: NodeId,
    pub body_slot: NodeId,
    pub cancel_button: NodeId,
    pub confirm_button: NodeId,
}

/// Per-host state of a `uc-modal` element.
#[derive(Debug, Default)]
pub struct Modal {
    config: ModalConfig,
    is_open: bool,
    parts: Option<ModalParts>,
    content_changes: usize,
}

impl Modal {
    pub fn new(config: ModalConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Cached visibility, kept in sync with the `opened` attribute.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    /// None until the element has been constructed.
    pub fn parts(&self) -> Option<ModalParts> {
        self.parts
    }

    /// How many times the body slot's assignment changed.
    pub fn content_changes(&self) -> usize {
        self.content_changes
    }

    /// Show the modal. Idempotent.
    pub fn open(doc: &mut Document, host: NodeId) {
        if let Err(e) = doc.set_attribute(host, OPENED, "") {
            log::warn!("cannot open modal {host}: {e}");
            return;
        }
        if let Some(modal) = doc.component_mut::<Modal>(host) {
            modal.is_open = true;
        }
    }

    /// Hide the modal. Idempotent.
    pub fn hide(doc: &mut Document, host: NodeId) {
        if doc.has_attribute(host, OPENED) {
            if let Err(e) = doc.remove_attribute(host, OPENED) {
                log::warn!("cannot hide modal {host}: {e}");
                return;
            }
        }
        if let Some(modal) = doc.component_mut::<Modal>(host) {
            modal.is_open = false;
        }
    }

    fn build(&self, doc: &mut Document, host: NodeId) -> Result<ModalParts, DomError> {
        let shadow_root = doc.attach_shadow(host)?;
        doc.set_stylesheet(shadow_root, stylesheet(&self.config))?;

        let backdrop = element_with_id(doc, "div", BACKDROP_ID);
        let panel = element_with_id(doc, "div", MODAL_ID);

        let header = doc.create_element("header");
        let title_slot = doc.create_element_with_attributes("slot", [("name", TITLE_SLOT)]);
        let fallback = doc.create_text(self.config.title.clone());
        doc.append_child(title_slot, fallback)?;
        doc.append_child(header, title_slot)?;

        let main = element_with_id(doc, "section", "main");
        let body_slot = doc.create_element("slot");
        doc.append_child(main, body_slot)?;

        let actions = element_with_id(doc, "section", "actions");
        let cancel_button = button(doc, CANCEL_BUTTON_ID, &self.config.cancel_label)?;
        let confirm_button = button(doc, CONFIRM_BUTTON_ID, &self.config.confirm_label)?;
        doc.append_child(actions, cancel_button)?;
        doc.append_child(actions, confirm_button)?;

        for part in [header, main, actions] {
            doc.append_child(panel, part)?;
        }
        doc.append_child(shadow_root, backdrop)?;
        doc.append_child(shadow_root, panel)?;

        Ok(ModalParts {
            shadow_root,
            backdrop,
            panel,
            title_slot,
            body_slot,
            cancel_button,
            confirm_button,
        })
    }

    fn wire(doc: &mut Document, host: NodeId, parts: &ModalParts) {
        doc.add_event_listener(parts.body_slot, SLOTCHANGE, move |doc, event| {
            let assigned: Vec<String> = doc
                .assigned_nodes(event.target())
                .into_iter()
                .map(|node| doc.describe(node))
                .collect();
            log::debug!("modal {host} content: [{}]", assigned.join(", "));
            if let Some(modal) = doc.component_mut::<Modal>(host) {
                modal.content_changes += 1;
            }
        });

        for trigger in [parts.backdrop, parts.cancel_button] {
            doc.add_event_listener(trigger, CLICK, move |doc, event| cancel(doc, host, event));
        }
        doc.add_event_listener(parts.confirm_button, CLICK, move |doc, _| confirm(doc, host));
    }
}

impl CustomElement for Modal {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &[OPENED]
    }

    fn constructed(&mut self, doc: &mut Document, host: NodeId) {
        match self.build(doc, host) {
            Ok(parts) => {
                Self::wire(doc, host, &parts);
                self.parts = Some(parts);
                log::debug!("constructed {TAG} {host}");
            }
            Err(e) => log::warn!("cannot construct {TAG} {host}: {e}"),
        }
    }

    fn attribute_changed(
        &mut self,
        doc: &mut Document,
        host: NodeId,
        _name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
    ) {
        self.is_open = doc.has_attribute(host, OPENED);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn cancel(doc: &mut Document, host: NodeId, event: &DomEvent) {
    Modal::hide(doc, host);
    let source = event.target();
    if let Err(e) = doc.dispatch_event(source, CANCEL, EventInit::bubbling().composed()) {
        log::warn!("cannot dispatch {CANCEL} from {source}: {e}");
    }
}

fn confirm(doc: &mut Document, host: NodeId) {
    Modal::hide(doc, host);
    if let Err(e) = doc.dispatch_event(host, CONFIRM, EventInit::new()) {
        log::warn!("cannot dispatch {CONFIRM} on {host}: {e}");
    }
}

fn element_with_id(doc: &mut Document, tag: &str, id: &str) -> NodeId {
    doc.create_element_with_attributes(tag, [("id", id)])
}

fn button(doc: &mut Document, id: &str, label: &str) -> Result<NodeId, DomError> {
    let button = element_with_id(doc, "button", id);
    let text = doc.create_text(label);
    doc.append_child(button, text)?;
    Ok(button)
}

fn new_modal() -> Box<dyn CustomElement> {
    Box::new(Modal::default())
}

inventory::submit! {
    ucdom::ElementRegistration::new(TAG, new_modal)
}

/// Define `uc-modal` with the stock configuration.
pub fn define(registry: &mut CustomElementRegistry) -> Result<(), DomError> {
    registry.define(TAG, new_modal)
}

/// Define `uc-modal` with a custom configuration.
pub fn define_with_config(
    registry: &mut CustomElementRegistry,
    config: ModalConfig,
) -> Result<(), DomError> {
    registry.define_with(TAG, move || Box::new(Modal::new(config.clone())))
}

/// Copyable reference to a `uc-modal` host.
///
/// Every method is a logged no-op when the node is not an upgraded modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModalHandle {
    host: NodeId,
}

impl ModalHandle {
    /// Create a detached `uc-modal` element. Fails when the tag is not defined
    /// in the document's registry.
    pub fn create(doc: &mut Document) -> Result<Self, DomError> {
        if !doc.registry().is_defined(TAG) {
            return Err(DomError::Undefined(TAG.to_string()));
        }
        let host = doc.create_element(TAG);
        Ok(Self { host })
    }

    /// Wrap an existing host, e.g. one created with attributes.
    pub fn from_host(doc: &Document, host: NodeId) -> Option<Self> {
        doc.component::<Modal>(host).map(|_| Self { host })
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    fn modal<'d>(&self, doc: &'d Document) -> Option<&'d Modal> {
        let modal = doc.component::<Modal>(self.host);
        if modal.is_none() {
            log::warn!("{} is not a {TAG}", doc.describe(self.host));
        }
        modal
    }

    pub fn open(&self, doc: &mut Document) {
        if self.modal(doc).is_some() {
            Modal::open(doc, self.host);
        }
    }

    pub fn hide(&self, doc: &mut Document) {
        if self.modal(doc).is_some() {
            Modal::hide(doc, self.host);
        }
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        self.modal(doc).is_some_and(Modal::is_open)
    }

    pub fn parts(&self, doc: &Document) -> Option<ModalParts> {
        self.modal(doc)?.parts()
    }

    pub fn backdrop(&self, doc: &Document) -> Option<NodeId> {
        Some(self.parts(doc)?.backdrop)
    }

    pub fn cancel_button(&self, doc: &Document) -> Option<NodeId> {
        Some(self.parts(doc)?.cancel_button)
    }

    pub fn confirm_button(&self, doc: &Document) -> Option<NodeId> {
        Some(self.parts(doc)?.confirm_button)
    }

    pub fn body_slot(&self, doc: &Document) -> Option<NodeId> {
        Some(self.parts(doc)?.body_slot)
    }

    pub fn content_changes(&self, doc: &Document) -> usize {
        self.modal(doc).map_or(0, Modal::content_changes)
    }

    /// Replace whatever is slotted into the header with an `h1` holding `text`.
    /// The replaced title nodes are destroyed.
    pub fn set_title(&self, doc: &mut Document, text: &str) -> Result<(), DomError> {
        if self.modal(doc).is_none() {
            return Ok(());
        }
        for node in self.title_children(doc) {
            doc.destroy(node)?;
        }
        let heading = doc.create_element_with_attributes("h1", [("slot", TITLE_SLOT)]);
        let label = doc.create_text(text);
        doc.append_child(heading, label)?;
        doc.append_child(self.host, heading)
    }

    /// Replace the body content, keeping slotted title content in place.
    pub fn set_content(
        &self,
        doc: &mut Document,
        nodes: impl IntoIterator<Item = NodeId>,
    ) -> Result<(), DomError> {
        if self.modal(doc).is_none() {
            return Ok(());
        }
        let mut children = self.title_children(doc);
        children.extend(nodes);
        doc.replace_children(self.host, children)
    }

    fn title_children(&self, doc: &Document) -> Vec<NodeId> {
        doc.children(self.host)
            .iter()
            .copied()
            .filter(|child| doc.get_attribute(*child, "slot") == Some(TITLE_SLOT))
            .collect()
    }

    /// Listen for `cancel` on the host. Also fires for cancels of nested
    /// modals, since the event bubbles.
    pub fn on_cancel(
        &self,
        doc: &mut Document,
        callback: impl Fn(&mut Document, &DomEvent) + 'static,
    ) -> ListenerId {
        doc.add_event_listener(self.host, CANCEL, callback)
    }

    pub fn on_confirm(
        &self,
        doc: &mut Document,
        callback: impl Fn(&mut Document, &DomEvent) + 'static,
    ) -> ListenerId {
        doc.add_event_listener(self.host, CONFIRM, callback)
    }
}
