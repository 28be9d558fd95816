mod document;
mod events;
mod node;
mod slots;

pub use document::Document;
pub use events::{DomEvent, EventInit, EventPhase, Listener, ListenerId, CLICK};
pub use node::{ElementData, Node, NodeId, NodeKind};
pub use slots::{SLOTCHANGE, SLOT_TAG};
