//! Slot assignment and `slotchange` notification.
//!
//! A host's light children are projected into the `<slot>` elements of its
//! shadow tree: a child whose `slot` attribute equals a slot's `name` goes to
//! the first such slot in tree order; children without a `slot` attribute,
//! text included, go to the first slot without a name.

use super::events::EventInit;
use super::node::{NodeId, NodeKind};
use super::Document;

pub const SLOT_TAG: &str = "slot";
pub const SLOTCHANGE: &str = "slotchange";

impl Document {
    pub fn is_slot(&self, id: NodeId) -> bool {
        self.tag(id) == Some(SLOT_TAG)
    }

    /// Name of a slot element; the default slot has an empty name.
    pub fn slot_name(&self, slot: NodeId) -> &str {
        self.get_attribute(slot, "name").unwrap_or("")
    }

    /// Name of the slot a light child asks for.
    fn requested_slot(&self, node: NodeId) -> &str {
        match self.node(node).map(|n| &n.kind) {
            Some(NodeKind::Element(data)) => data.attribute("slot").unwrap_or(""),
            _ => "",
        }
    }

    /// First slot named `name` in `shadow_root`, in tree order.
    pub fn find_slot(&self, shadow_root: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(shadow_root)
            .into_iter()
            .find(|n| self.is_slot(*n) && self.slot_name(*n) == name)
    }

    /// The slot `node` is projected into, if its parent hosts a shadow tree.
    pub fn assigned_slot(&self, node: NodeId) -> Option<NodeId> {
        let node_ref = self.node(node)?;
        if !node_ref.is_element() && !node_ref.is_text() {
            return None;
        }
        let shadow = self.shadow_root(self.parent(node)?)?;
        self.find_slot(shadow, self.requested_slot(node))
    }

    /// Light children currently projected into `slot`, in tree order.
    pub fn assigned_nodes(&self, slot: NodeId) -> Vec<NodeId> {
        if !self.is_slot(slot) {
            return Vec::new();
        }
        let Some(host) = self.host_of(self.tree_root(slot)) else {
            return Vec::new();
        };
        self.children(host)
            .iter()
            .copied()
            .filter(|child| self.assigned_slot(*child) == Some(slot))
            .collect()
    }

    /// Assigned nodes, or the slot's own children when nothing is assigned.
    pub fn slot_content(&self, slot: NodeId) -> Vec<NodeId> {
        let assigned = self.assigned_nodes(slot);
        if assigned.is_empty() {
            self.children(slot).to_vec()
        } else {
            assigned
        }
    }

    /// Shadow hosts whose slot assignment may change when children or slot
    /// attributes of `node` change.
    fn slot_hosts(&self, node: NodeId) -> Vec<NodeId> {
        let mut hosts = Vec::new();
        if self.shadow_root(node).is_some() {
            hosts.push(node);
        }
        if let Some(host) = self.host_of(self.tree_root(node)) {
            hosts.push(host);
        }
        hosts
    }

    fn slot_snapshot(&self, host: NodeId) -> Vec<(NodeId, Vec<NodeId>)> {
        let Some(shadow) = self.shadow_root(host) else {
            return Vec::new();
        };
        self.descendants(shadow)
            .into_iter()
            .filter(|n| self.is_slot(*n))
            .map(|slot| (slot, self.assigned_nodes(slot)))
            .collect()
    }

    /// Run `mutate`, then fire one `slotchange` at every slot whose assigned
    /// nodes differ from before.
    pub(crate) fn track_slots<R>(
        &mut self,
        watched: &[NodeId],
        mutate: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let mut hosts: Vec<NodeId> = Vec::new();
        for node in watched {
            for host in self.slot_hosts(*node) {
                if !hosts.contains(&host) {
                    hosts.push(host);
                }
            }
        }
        let before: Vec<_> = hosts.iter().map(|h| self.slot_snapshot(*h)).collect();

        let result = mutate(self);

        let mut changed = Vec::new();
        for (host, before) in hosts.iter().zip(before) {
            for (slot, assigned) in self.slot_snapshot(*host) {
                let previous = before
                    .iter()
                    .find(|(s, _)| *s == slot)
                    .map(|(_, a)| a.as_slice())
                    .unwrap_or(&[]);
                if previous != assigned.as_slice() {
                    changed.push(slot);
                }
            }
        }

        for slot in changed {
            log::debug!("slot {slot} assignment changed");
            if let Err(e) = self.dispatch_event(slot, SLOTCHANGE, EventInit::bubbling()) {
                log::warn!("slotchange dispatch failed: {e}");
            }
        }

        result
    }
}
