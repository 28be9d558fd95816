//! Event listeners and dispatch.
//!
//! Dispatch builds the propagation path once, up front:
//! - a light child projected into a slot continues to that slot;
//! - a shadow root continues to its host only for composed events;
//! - everything else continues to its parent.
//!
//! Listeners outside a shadow tree never see nodes inside it as `target`;
//! the target is retargeted to the outermost host they can see.

use std::cell::Cell;
use std::rc::Rc;

use super::node::{NodeId, NodeKind};
use super::Document;
use crate::error::DomError;

pub const CLICK: &str = "click";

/// Options for a dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventInit {
    pub bubbles: bool,
    /// Whether the event crosses shadow boundaries on its way up.
    pub composed: bool,
}

impl EventInit {
    pub const fn new() -> Self {
        Self {
            bubbles: false,
            composed: false,
        }
    }

    pub const fn bubbling() -> Self {
        Self {
            bubbles: true,
            composed: false,
        }
    }

    pub const fn composed(mut self) -> Self {
        self.composed = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventPhase {
    #[default]
    None,
    AtTarget,
    Bubbling,
}

/// An event in flight. Listeners get a shared reference; the per-node fields
/// are updated as the event moves along its path.
#[derive(Debug)]
pub struct DomEvent {
    event_type: String,
    bubbles: bool,
    composed: bool,
    target: Cell<NodeId>,
    current_target: Cell<Option<NodeId>>,
    phase: Cell<EventPhase>,
    propagation_stopped: Cell<bool>,
}

impl DomEvent {
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn composed(&self) -> bool {
        self.composed
    }

    /// Target as seen from the current listener's tree scope.
    pub fn target(&self) -> NodeId {
        self.target.get()
    }

    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target.get()
    }

    pub fn phase(&self) -> EventPhase {
        self.phase.get()
    }

    /// Finish the listeners of the current node, then stop.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

pub type Listener = Rc<dyn Fn(&mut Document, &DomEvent)>;

/// Handle returned by [`Document::add_event_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub(crate) struct ListenerEntry {
    id: ListenerId,
    event_type: String,
    callback: Listener,
}

impl Document {
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        callback: impl Fn(&mut Document, &DomEvent) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.entry(node).or_default().push(ListenerEntry {
            id,
            event_type: event_type.to_string(),
            callback: Rc::new(callback),
        });
        id
    }

    /// Returns false when the listener was already removed.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        for entries in self.listeners.values_mut() {
            if let Some(index) = entries.iter().position(|e| e.id == id) {
                entries.remove(index);
                return true;
            }
        }
        false
    }

    /// Simulate a user click on `node`: a bubbling, composed `click` event.
    pub fn click(&mut self, node: NodeId) -> Result<usize, DomError> {
        self.dispatch_event(node, CLICK, EventInit::bubbling().composed())
    }

    /// Dispatch an event synchronously and return how many listeners ran.
    pub fn dispatch_event(
        &mut self,
        target: NodeId,
        event_type: &str,
        init: EventInit,
    ) -> Result<usize, DomError> {
        self.node_ref(target)?;

        let path = self.event_path(target, init.composed);
        let event = DomEvent {
            event_type: event_type.to_string(),
            bubbles: init.bubbles,
            composed: init.composed,
            target: Cell::new(target),
            current_target: Cell::new(None),
            phase: Cell::new(EventPhase::None),
            propagation_stopped: Cell::new(false),
        };
        log::debug!(
            "dispatch '{event_type}' at {} (path length {})",
            self.describe(target),
            path.len()
        );

        let mut invoked = 0;
        for node in path {
            let seen_target = self.retarget(target, node);
            let at_target = seen_target == node;
            if !at_target && !init.bubbles {
                continue;
            }

            let callbacks: Vec<Listener> = self
                .listeners
                .get(&node)
                .map(|entries| {
                    entries
                        .iter()
                        .filter(|e| e.event_type == event_type)
                        .map(|e| Rc::clone(&e.callback))
                        .collect()
                })
                .unwrap_or_default();
            if callbacks.is_empty() {
                continue;
            }

            event.target.set(seen_target);
            event.current_target.set(Some(node));
            event.phase.set(if at_target {
                EventPhase::AtTarget
            } else {
                EventPhase::Bubbling
            });

            for callback in callbacks {
                callback(self, &event);
                invoked += 1;
            }

            if event.is_propagation_stopped() {
                break;
            }
        }

        event.current_target.set(None);
        event.phase.set(EventPhase::None);
        Ok(invoked)
    }

    /// Nodes an event dispatched at `target` visits, innermost first.
    pub fn event_path(&self, target: NodeId, composed: bool) -> Vec<NodeId> {
        let mut path = vec![target];
        let mut current = target;
        loop {
            let next = if let Some(slot) = self.assigned_slot(current) {
                Some(slot)
            } else {
                match self.node(current).map(|n| &n.kind) {
                    Some(NodeKind::ShadowRoot { host }) if composed => Some(*host),
                    Some(NodeKind::ShadowRoot { .. }) => None,
                    Some(_) => self.parent(current),
                    None => None,
                }
            };
            match next {
                Some(node) => {
                    path.push(node);
                    current = node;
                }
                None => break,
            }
        }
        path
    }

    /// `target` as seen from `observer`: walk out of shadow trees until the
    /// target's tree root is one the observer lives under.
    pub fn retarget(&self, target: NodeId, observer: NodeId) -> NodeId {
        let mut current = target;
        loop {
            let root = self.tree_root(current);
            let Some(host) = self.host_of(root) else {
                return current;
            };
            if self.is_shadow_including_ancestor(root, observer) {
                return current;
            }
            current = host;
        }
    }
}
